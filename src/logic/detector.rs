// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2026 The qrpack contributors

//! Heuristic content-kind sniffing. Ordered pattern checks, first match wins.

use std::sync::LazyLock;

use regex::Regex;

use crate::models::ContentKind;

static URL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^(https?://|www\.)").expect("valid url pattern"));
static EMAIL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email pattern"));
static PHONE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\+?[0-9\s()\-]{8,20}$").expect("valid phone pattern"));

/// Guess the kind of `raw`. Blank input is plain text.
pub fn detect_kind(raw: &str) -> ContentKind {
    let text = raw.trim();
    if text.is_empty() {
        return ContentKind::Text;
    }

    if URL_PATTERN.is_match(text) {
        ContentKind::Url
    } else if EMAIL_PATTERN.is_match(text) {
        ContentKind::Email
    } else if PHONE_PATTERN.is_match(text) {
        ContentKind::Phone
    } else if text.starts_with('{') && text.ends_with('}') && text.contains("ssid") {
        ContentKind::Wifi
    } else {
        ContentKind::Text
    }
}
