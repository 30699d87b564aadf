// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2026 The qrpack contributors

//! Generated batch results: thumbnails, payloads, and per-entry failures.

use eframe::egui;

use crate::models::{BatchFailure, GeneratedCode, GenerationMode};

/// Edge length of result thumbnails in points.
const THUMB_SIZE: f32 = 96.0;

/// Codes from the latest batch run with their preview textures.
#[derive(Default)]
pub struct ResultsModel {
    codes: Vec<GeneratedCode>,
    textures: Vec<egui::TextureHandle>,
    failures: Vec<BatchFailure>,
    mode: GenerationMode,
}

/// Messages for the results panel.
// Debug omitted because TextureHandle is not Debug.
pub enum ResultsMsg {
    Ready {
        codes: Vec<GeneratedCode>,
        textures: Vec<egui::TextureHandle>,
        failures: Vec<BatchFailure>,
        mode: GenerationMode,
    },
    Clear,
}

impl ResultsModel {
    pub fn codes(&self) -> &[GeneratedCode] {
        &self.codes
    }

    pub fn failures(&self) -> &[BatchFailure] {
        &self.failures
    }

    /// Mode the current codes were generated with; archive naming depends on it.
    pub fn mode(&self) -> GenerationMode {
        self.mode
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }
}

pub fn update(model: &mut ResultsModel, msg: ResultsMsg) {
    match msg {
        ResultsMsg::Ready {
            codes,
            textures,
            failures,
            mode,
        } => {
            model.codes = codes;
            model.textures = textures;
            model.failures = failures;
            model.mode = mode;
        }
        ResultsMsg::Clear => *model = ResultsModel::default(),
    }
}

/// Render thumbnails and failure notes. The panel emits no messages of its own.
pub fn view(ui: &mut egui::Ui, model: &ResultsModel) {
    if !model.failures.is_empty() {
        egui::Frame::group(ui.style()).show(ui, |ui| {
            ui.label(
                egui::RichText::new(format!(
                    "{} {} entr{} could not be encoded",
                    egui_phosphor::regular::WARNING,
                    model.failures.len(),
                    if model.failures.len() == 1 { "y" } else { "ies" }
                ))
                .color(egui::Color32::from_rgb(232, 89, 12)),
            );
            for failure in &model.failures {
                ui.label(
                    egui::RichText::new(format!("#{}: {}", failure.index + 1, failure.message))
                        .small()
                        .color(egui::Color32::from_gray(110)),
                );
            }
        });
        ui.add_space(6.0);
    }

    if model.codes.is_empty() {
        ui.label(egui::RichText::new("Nothing generated yet.").color(egui::Color32::from_gray(150)));
        return;
    }

    let available = ui.available_width();
    let cols = (available / (THUMB_SIZE + 80.0)).floor().max(1.0) as usize;

    egui::Grid::new("results_grid")
        .num_columns(cols)
        .spacing(egui::vec2(12.0, 12.0))
        .show(ui, |ui| {
            for (index, code) in model.codes.iter().enumerate() {
                ui.vertical(|ui| {
                    if let Some(texture) = model.textures.get(index) {
                        ui.add(egui::Image::new((
                            texture.id(),
                            egui::vec2(THUMB_SIZE, THUMB_SIZE),
                        )))
                        .on_hover_text(code.encoded_payload());
                    } else {
                        ui.allocate_space(egui::vec2(THUMB_SIZE, THUMB_SIZE));
                    }
                    ui.label(egui::RichText::new(truncate(code.raw_content(), 24)).small());
                    ui.label(
                        egui::RichText::new(code.kind().label())
                            .small()
                            .color(egui::Color32::from_gray(110)),
                    );
                });

                if (index + 1) % cols == 0 {
                    ui.end_row();
                }
            }
        });
}

fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        text.to_string()
    } else {
        let head: String = text.chars().take(max_chars.saturating_sub(1)).collect();
        format!("{head}…")
    }
}

/// Decode a generated PNG into an opaque preview, compositing transparency onto white.
pub(crate) fn preview_image(png: &[u8]) -> Result<egui::ColorImage, String> {
    let rgba = image::load_from_memory(png)
        .map_err(|e| e.to_string())?
        .to_rgba8();
    let size = [rgba.width() as usize, rgba.height() as usize];
    let pixels: Vec<u8> = rgba
        .pixels()
        .flat_map(|p| {
            let [r, g, b, a] = p.0;
            let blend = |c: u8| ((c as u16 * a as u16 + 255 * (255 - a as u16)) / 255) as u8;
            [blend(r), blend(g), blend(b), 255]
        })
        .collect();
    Ok(egui::ColorImage::from_rgba_unmultiplied(size, &pixels))
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use eframe::egui::Color32;
    use image::{Rgba, RgbaImage};

    use super::*;
    use crate::models::ContentKind;

    fn png(img: RgbaImage) -> Vec<u8> {
        let mut bytes = Vec::new();
        image::DynamicImage::ImageRgba8(img)
            .write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Png)
            .unwrap();
        bytes
    }

    #[test]
    fn preview_composites_transparency_on_white() {
        let mut img = RgbaImage::from_pixel(2, 1, Rgba([255, 255, 255, 0]));
        img.put_pixel(1, 0, Rgba([0, 0, 0, 255]));

        let preview = preview_image(&png(img)).unwrap();

        assert_eq!(preview.size, [2, 1]);
        assert_eq!(preview.pixels[0], Color32::WHITE);
        assert_eq!(preview.pixels[1], Color32::BLACK);
    }

    #[test]
    fn preview_rejects_invalid_png() {
        assert!(preview_image(b"nope").is_err());
    }

    #[test]
    fn ready_replaces_previous_results() {
        let mut model = ResultsModel::default();
        let code = GeneratedCode::new("a".into(), ContentKind::Text, "a".into(), Vec::new());

        update(
            &mut model,
            ResultsMsg::Ready {
                codes: vec![code.clone()],
                textures: Vec::new(),
                failures: Vec::new(),
                mode: GenerationMode::PromoLink,
            },
        );
        assert_eq!(model.codes(), &[code]);
        assert_eq!(model.mode(), GenerationMode::PromoLink);

        update(&mut model, ResultsMsg::Clear);
        assert!(model.is_empty());
        assert_eq!(model.mode(), GenerationMode::Standard);
    }

    #[test]
    fn truncate_appends_ellipsis() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("abcdefghij", 5), "abcd…");
    }
}
