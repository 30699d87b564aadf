// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2026 The qrpack contributors

//! Reusable egui components structured for MVU-style updates.

pub mod entries;
pub mod results;
pub mod single;
