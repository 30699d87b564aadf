// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges
// SPDX-FileCopyrightText: 2026 The qrpack contributors

//! Shared helper utilities reused by UI and export logic.

pub mod sanitize_component;

use std::path::PathBuf;

/// Reduce user content to a short archive-safe stem.
pub use sanitize_component::sanitize_component;

/// Force a specific extension onto a path when it is missing or different.
///
/// Keeps an existing matching extension (case-insensitive); otherwise replaces it.
pub fn ensure_extension(mut path: PathBuf, extension: &str) -> PathBuf {
    let replace = !matches!(
        path.extension().and_then(|e| e.to_str()),
        Some(ext) if ext.eq_ignore_ascii_case(extension)
    );

    if replace {
        path.set_extension(extension);
    }
    path
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ensure_extension_preserves_matching_extension_case_insensitive() {
        let path = PathBuf::from("/tmp/codes.ZIP");
        assert_eq!(ensure_extension(path.clone(), "zip"), path);
    }

    #[test]
    fn ensure_extension_replaces_when_different() {
        let result = ensure_extension(PathBuf::from("codes.txt"), "zip");
        assert_eq!(result.extension().and_then(|e| e.to_str()), Some("zip"));
    }

    #[test]
    fn ensure_extension_adds_when_missing() {
        let result = ensure_extension(PathBuf::from("code"), "eps");
        assert_eq!(result, PathBuf::from("code.eps"));
    }
}
