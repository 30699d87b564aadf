// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2026 The qrpack contributors

//! QR symbol rendering behind a small trait so batch logic can be exercised with doubles.

use std::io::Cursor;

use anyhow::{Context, Result};
use image::{DynamicImage, ImageFormat, Rgba, RgbaImage};
use qrcode::{Color, QrCode};

use crate::config::GeneratorConfig;

/// Modules of light border required around a QR symbol.
const QUIET_ZONE_MODULES: u32 = 4;
const DARK: Rgba<u8> = Rgba([0, 0, 0, 255]);
/// Light modules stay transparent so vector export can key on alpha.
const LIGHT: Rgba<u8> = Rgba([255, 255, 255, 0]);

/// Encodes a payload string into a PNG bitmap.
pub trait QrEncoder {
    fn encode(&self, payload: &str) -> Result<Vec<u8>>;
}

/// Production encoder backed by the `qrcode` crate.
#[derive(Clone, Debug)]
pub struct QrCodeEncoder {
    module_scale: u32,
    quiet_zone: bool,
}

impl Default for QrCodeEncoder {
    fn default() -> Self {
        Self::from_config(&GeneratorConfig::default())
    }
}

impl QrCodeEncoder {
    pub fn from_config(config: &GeneratorConfig) -> Self {
        Self {
            module_scale: config.module_scale.max(1),
            quiet_zone: config.quiet_zone,
        }
    }

    /// Render `payload` to an RGBA bitmap: opaque black modules on a transparent field.
    pub fn render(&self, payload: &str) -> Result<RgbaImage> {
        let code = QrCode::new(payload.as_bytes()).context("QR encoding rejected the payload")?;
        let modules = code.width() as u32;
        let border = if self.quiet_zone { QUIET_ZONE_MODULES } else { 0 };
        let scale = self.module_scale;
        let side = (modules + 2 * border) * scale;

        let mut img = RgbaImage::from_pixel(side, side, LIGHT);
        for (i, color) in code.to_colors().iter().enumerate() {
            if *color != Color::Dark {
                continue;
            }
            let x = (i as u32 % modules + border) * scale;
            let y = (i as u32 / modules + border) * scale;
            for dy in 0..scale {
                for dx in 0..scale {
                    img.put_pixel(x + dx, y + dy, DARK);
                }
            }
        }
        Ok(img)
    }
}

impl QrEncoder for QrCodeEncoder {
    fn encode(&self, payload: &str) -> Result<Vec<u8>> {
        let img = self.render(payload)?;
        let mut png = Vec::new();
        DynamicImage::ImageRgba8(img)
            .write_to(&mut Cursor::new(&mut png), ImageFormat::Png)
            .context("Failed to encode QR bitmap as PNG")?;
        Ok(png)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_is_square_and_scaled() {
        let encoder = QrCodeEncoder {
            module_scale: 3,
            quiet_zone: false,
        };
        let img = encoder.render("https://example.com").unwrap();

        assert_eq!(img.width(), img.height());
        assert_eq!(img.width() % 3, 0);
        // Finder pattern corner is dark without a quiet zone.
        assert_eq!(*img.get_pixel(0, 0), DARK);
    }

    #[test]
    fn quiet_zone_is_transparent() {
        let encoder = QrCodeEncoder {
            module_scale: 2,
            quiet_zone: true,
        };
        let img = encoder.render("hello").unwrap();

        assert_eq!(img.get_pixel(0, 0)[3], 0);
        let edge = QUIET_ZONE_MODULES * 2;
        assert_eq!(*img.get_pixel(edge, edge), DARK);
    }

    #[test]
    fn encode_produces_decodable_png() {
        let png = QrCodeEncoder::default().encode("hello world").unwrap();
        let decoded = image::load_from_memory(&png).unwrap();
        assert!(decoded.width() > 0);
    }

    #[test]
    fn oversized_payload_is_rejected() {
        let payload = "x".repeat(8000);
        assert!(QrCodeEncoder::default().encode(&payload).is_err());
    }
}
