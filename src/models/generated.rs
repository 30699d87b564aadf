// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2026 The qrpack contributors

//! Generated codes and batch reports produced by the orchestrator.

use crate::models::content::ContentKind;

/// A content string together with the payload encoded for it and the rendered image.
///
/// Fields are read-only outside the crate's batch logic so the payload always
/// stays derived from `(raw_content, kind, mode)`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GeneratedCode {
    raw_content: String,
    kind: ContentKind,
    encoded_payload: String,
    png: Vec<u8>,
}

impl GeneratedCode {
    pub(crate) fn new(
        raw_content: String,
        kind: ContentKind,
        encoded_payload: String,
        png: Vec<u8>,
    ) -> Self {
        Self {
            raw_content,
            kind,
            encoded_payload,
            png,
        }
    }

    pub fn raw_content(&self) -> &str {
        &self.raw_content
    }

    pub fn kind(&self) -> ContentKind {
        self.kind
    }

    pub fn encoded_payload(&self) -> &str {
        &self.encoded_payload
    }

    /// PNG-encoded RGBA bitmap.
    pub fn png(&self) -> &[u8] {
        &self.png
    }
}

/// One entry that could not be encoded during a lenient batch run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BatchFailure {
    /// Position of the entry in the submitted list.
    pub index: usize,
    pub raw_content: String,
    pub message: String,
}

/// Result of a lenient batch run: successes in input order plus failure markers.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BatchReport {
    pub codes: Vec<GeneratedCode>,
    pub failures: Vec<BatchFailure>,
}
