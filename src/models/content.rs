// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2026 The qrpack contributors

//! Content kinds, entries, and the generation mode that decides how payloads are built.

/// Semantic category of a text payload.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum ContentKind {
    #[default]
    Text,
    Url,
    Email,
    Phone,
    Sms,
    Wifi,
}

impl ContentKind {
    /// Every kind in the order shown by selectors.
    pub const ALL: [ContentKind; 6] = [
        ContentKind::Text,
        ContentKind::Url,
        ContentKind::Email,
        ContentKind::Phone,
        ContentKind::Sms,
        ContentKind::Wifi,
    ];

    /// Stable lowercase name used in archive filenames.
    pub fn as_str(&self) -> &'static str {
        match self {
            ContentKind::Text => "text",
            ContentKind::Url => "url",
            ContentKind::Email => "email",
            ContentKind::Phone => "phone",
            ContentKind::Sms => "sms",
            ContentKind::Wifi => "wifi",
        }
    }

    /// Human-facing label for selectors.
    pub fn label(&self) -> &'static str {
        match self {
            ContentKind::Text => "Text",
            ContentKind::Url => "URL",
            ContentKind::Email => "Email",
            ContentKind::Phone => "Phone",
            ContentKind::Sms => "SMS",
            ContentKind::Wifi => "WiFi",
        }
    }

    /// Input hint describing what the raw content should look like.
    pub fn hint(&self) -> &'static str {
        match self {
            ContentKind::Text => "Any text",
            ContentKind::Url => "e.g., example.com/page",
            ContentKind::Email => "e.g., someone@example.com",
            ContentKind::Phone => "e.g., +1 555 123 4567",
            ContentKind::Sms => "e.g., +15551234567",
            ContentKind::Wifi => r#"{"ssid":"Home","password":"secret","encryption":"WPA"}"#,
        }
    }
}

/// One user- or file-supplied content string awaiting encoding.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct Entry {
    pub raw_content: String,
    pub kind: ContentKind,
}

impl Entry {
    pub fn new(raw_content: impl Into<String>, kind: ContentKind) -> Self {
        Self {
            raw_content: raw_content.into(),
            kind,
        }
    }

    /// Entry created from an imported line or cell; always starts as plain text.
    pub fn imported(raw_content: impl Into<String>) -> Self {
        Self::new(raw_content, ContentKind::Text)
    }

    /// True when there is nothing to encode after trimming.
    pub fn is_blank(&self) -> bool {
        self.raw_content.trim().is_empty()
    }
}

/// How payloads are derived from entries.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum GenerationMode {
    /// Format each entry according to its kind.
    #[default]
    Standard,
    /// Substitute raw content into the fixed promo-code URL; kinds are ignored.
    PromoLink,
}

impl GenerationMode {
    pub fn label(&self) -> &'static str {
        match self {
            GenerationMode::Standard => "Standard",
            GenerationMode::PromoLink => "Promo link",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_names_are_lowercase_and_unique() {
        let names: Vec<_> = ContentKind::ALL.iter().map(|k| k.as_str()).collect();
        assert_eq!(names, vec!["text", "url", "email", "phone", "sms", "wifi"]);
    }

    #[test]
    fn imported_entries_default_to_text() {
        let entry = Entry::imported("https://example.com");
        assert_eq!(entry.kind, ContentKind::Text);
        assert!(!entry.is_blank());
        assert!(Entry::imported("   ").is_blank());
    }
}
