// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2026 The qrpack contributors

//! Error taxonomy for generation, import, and export.

use thiserror::Error;

/// Result alias for QR generation and export operations.
pub type Result<T> = std::result::Result<T, QrError>;

/// Failures surfaced to the user as short messages.
#[derive(Error, Debug)]
pub enum QrError {
    /// Nothing left to encode after trimming.
    #[error("Please enter some content to encode.")]
    EmptyInput,

    /// Upload extension is not plain text or spreadsheet.
    #[error("Unsupported file type '{0}'. Use .txt, .xlsx or .xls.")]
    UnsupportedFormat(String),

    /// Upload parsed but produced no usable lines or rows.
    #[error("The selected file contains no usable entries.")]
    EmptySource,

    /// Spreadsheet could not be opened or has no sheets.
    #[error("Could not read spreadsheet: {0}")]
    UnreadableSource(String),

    /// The QR encoder rejected the payload.
    #[error("Failed to encode '{content}': {reason}")]
    EncodingFailed { content: String, reason: String },

    /// The zip writer failed.
    #[error("Failed to build archive: {0}")]
    ArchiveBuildFailed(String),

    /// Bitmap data could not be read for vector conversion.
    #[error("Failed to export image: {0}")]
    ExportFailed(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<zip::result::ZipError> for QrError {
    fn from(err: zip::result::ZipError) -> Self {
        QrError::ArchiveBuildFailed(err.to_string())
    }
}
