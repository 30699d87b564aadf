// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2026 The qrpack contributors

//! Export choices: archive member naming and image format.

/// How archive member names are derived from a generated code.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum NamingPolicy {
    /// Sanitized payload, then `_<kind>`.
    #[default]
    UsePayloadAndKind,
    /// Sanitized raw content only.
    UseRawContent,
}

/// Output image format for saved codes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ImageFormat {
    #[default]
    Png,
    /// One stroked segment per dark pixel.
    Eps,
    /// Runs of dark pixels in a row drawn as one segment; same rendering, smaller file.
    EpsMerged,
}

impl ImageFormat {
    pub const ALL: [ImageFormat; 3] = [ImageFormat::Png, ImageFormat::Eps, ImageFormat::EpsMerged];

    pub fn extension(&self) -> &'static str {
        match self {
            ImageFormat::Png => "png",
            ImageFormat::Eps | ImageFormat::EpsMerged => "eps",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ImageFormat::Png => "PNG",
            ImageFormat::Eps => "EPS",
            ImageFormat::EpsMerged => "EPS (merged rows)",
        }
    }
}
