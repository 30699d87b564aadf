// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges
// SPDX-FileCopyrightText: 2026 The qrpack contributors

//! Produce archive-safe file stems from arbitrary content.

/// Longest stem kept after sanitizing.
pub const MAX_STEM_LEN: usize = 30;

/// Keep only ASCII letters and digits, lowercase them, and cap the length.
///
/// Everything else, including non-ASCII letters, is dropped rather than
/// replaced, so `"Hello, World!"` becomes `"helloworld"`.
pub fn sanitize_component(value: &str) -> String {
    value
        .chars()
        .filter(char::is_ascii_alphanumeric)
        .map(|ch| ch.to_ascii_lowercase())
        .take(MAX_STEM_LEN)
        .collect()
}
