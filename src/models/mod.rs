// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2026 The qrpack contributors

//! Domain layer: pure data types shared between UI, batch, and export logic.

pub mod content;
pub mod export;
pub mod generated;

pub use content::{ContentKind, Entry, GenerationMode};
pub use export::{ImageFormat, NamingPolicy};
pub use generated::{BatchFailure, BatchReport, GeneratedCode};
