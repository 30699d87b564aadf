// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2026 The qrpack contributors

//! Business logic: payload formatting, kind detection, bulk import, encoding, and export.

pub mod archive;
pub mod batch;
pub mod bulk;
pub mod detector;
pub mod encoder;
pub mod error;
pub mod formatter;
pub mod vector;

pub use error::QrError;
