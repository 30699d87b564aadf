// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges
// SPDX-FileCopyrightText: 2026 The qrpack contributors

//! Top-level egui application shell for generating QR codes.
//! Handles layout, export controls, dialogs, and wiring to the command worker.

pub mod components;

use eframe::egui;
use tracing::debug;

use crate::config::GeneratorConfig;
use crate::models::{GenerationMode, ImageFormat, NamingPolicy};
use crate::mvu::{self, AppModel, Command, Msg};
use crate::ui::components::results::ResultsMsg;
use crate::ui::components::single::SingleMsg;
use crate::ui::components::{entries, results, single};
use crate::utils::ensure_extension;

/// Stateful egui application for generating and exporting QR codes.
pub struct QrPackApp {
    model: AppModel,
    inbox: Vec<Msg>,
    cmd_tx: crossbeam_channel::Sender<Command>,
    msg_rx: crossbeam_channel::Receiver<Msg>,
}

impl QrPackApp {
    pub fn new(config: GeneratorConfig) -> Self {
        let (cmd_tx, cmd_rx) = crossbeam_channel::unbounded::<Command>();
        let (msg_tx, msg_rx) = crossbeam_channel::unbounded::<Msg>();

        // One worker keeps commands strictly ordered.
        std::thread::spawn(move || {
            for cmd in cmd_rx.iter() {
                let msg = mvu::run_command(cmd);
                let _ = msg_tx.send(msg);
            }
        });

        Self {
            model: AppModel {
                config,
                ..Default::default()
            },
            inbox: Vec::new(),
            cmd_tx,
            msg_rx,
        }
    }
}

impl eframe::App for QrPackApp {
    /// Drives a single UI frame: drains worker messages, turns decoded previews into
    /// textures, applies messages to the model, dispatches commands, and renders panels.
    fn ui(&mut self, ui: &mut egui::Ui, _frame: &mut eframe::Frame) {
        let ctx = ui.ctx().clone();
        ctx.global_style_mut(|style| {
            style.spacing.item_spacing = egui::vec2(6.0, 6.0);
        });

        // Pull messages produced by the command worker.
        while let Ok(msg) = self.msg_rx.try_recv() {
            self.model.pending_commands = self.model.pending_commands.saturating_sub(1);
            self.inbox.push(msg);
        }

        // Process pending messages in arrival order.
        let mut msgs: std::collections::VecDeque<Msg> = std::mem::take(&mut self.inbox).into();
        while let Some(msg) = msgs.pop_front() {
            match msg {
                Msg::SingleDecoded {
                    code,
                    preview,
                    mode,
                } => {
                    let texture =
                        ctx.load_texture("single-code", preview, egui::TextureOptions::NEAREST);
                    msgs.push_front(Msg::Single(SingleMsg::ResultReady {
                        code,
                        texture: Some(texture),
                        mode,
                    }));
                }
                Msg::BatchDecoded {
                    report,
                    previews,
                    mode,
                } => {
                    let textures = previews
                        .into_iter()
                        .enumerate()
                        .map(|(i, image)| {
                            ctx.load_texture(
                                format!("batch-code-{i}"),
                                image,
                                egui::TextureOptions::NEAREST,
                            )
                        })
                        .collect();
                    msgs.push_front(Msg::Results(ResultsMsg::Ready {
                        codes: report.codes,
                        textures,
                        failures: report.failures,
                        mode,
                    }));
                }
                other => {
                    let mut commands = Vec::new();
                    mvu::update(&mut self.model, other, &mut commands);
                    for cmd in commands {
                        if self.cmd_tx.send(cmd).is_ok() {
                            self.model.pending_commands += 1;
                        }
                    }
                }
            }
        }

        if self.model.pending_commands > 0 {
            ctx.request_repaint_after(std::time::Duration::from_millis(100));
        }

        egui::Panel::top("top_bar").show_inside(ui, |ui| {
            ui.add_space(6.0);
            ui.horizontal(|ui| {
                ui.heading("QR Codes");
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.add_space(2.0);
                    egui::widgets::global_theme_preference_switch(ui);
                    ui.separator();
                    self.render_mode_toggle(ui);
                });
            });
            ui.add_space(4.0);
        });

        self.render_error_modal(&ctx);

        egui::Panel::bottom("status_panel")
            .resizable(false)
            .show_inside(ui, |ui| {
                self.render_status(ui);
            });

        egui::CentralPanel::default().show_inside(ui, |ui| {
            ui.add_space(8.0);

            egui::ScrollArea::vertical().show(ui, |ui| {
                self.render_single_section(ui);
                ui.add_space(12.0);

                self.render_batch_section(ui);
                ui.add_space(12.0);

                self.render_results_section(ui);
                ui.add_space(8.0);
            });
        });
    }
}

impl QrPackApp {
    fn promo_mode(&self) -> bool {
        self.model.mode == GenerationMode::PromoLink
    }

    /// Segmented control choosing between standard formatting and the promo-link template.
    fn render_mode_toggle(&mut self, ui: &mut egui::Ui) {
        let mut choice = self.model.mode;
        ui.horizontal(|ui| {
            ui.selectable_value(
                &mut choice,
                GenerationMode::PromoLink,
                GenerationMode::PromoLink.label(),
            )
            .on_hover_text("Put every entry into the promo-code link; types are ignored");
            ui.selectable_value(
                &mut choice,
                GenerationMode::Standard,
                GenerationMode::Standard.label(),
            )
            .on_hover_text("Format each entry according to its type");
            ui.label("Mode");
        });
        if choice != self.model.mode {
            self.inbox.push(Msg::SetMode(choice));
        }
    }

    /// Single-code form, preview, and save buttons.
    fn render_single_section(&mut self, ui: &mut egui::Ui) {
        let promo_mode = self.promo_mode();
        egui::CollapsingHeader::new("Single code")
            .default_open(true)
            .show(ui, |ui| {
                let msgs = single::view(ui, &self.model.single, promo_mode);
                self.inbox.extend(msgs.into_iter().map(Msg::Single));

                let Some(code) = self.model.single.result() else {
                    return;
                };
                ui.add_space(8.0);
                ui.horizontal(|ui| {
                    if let Some(texture) = self.model.single.texture() {
                        ui.add(egui::Image::new((texture.id(), egui::vec2(160.0, 160.0))));
                    }
                    ui.vertical(|ui| {
                        ui.label(egui::RichText::new("Encoded payload").small());
                        ui.label(egui::RichText::new(code.encoded_payload()).monospace());
                        ui.add_space(6.0);
                        ui.horizontal(|ui| {
                            for format in ImageFormat::ALL {
                                let label = format!(
                                    "{} Save {}",
                                    egui_phosphor::regular::FLOPPY_DISK,
                                    format.label()
                                );
                                if ui.button(label).clicked() {
                                    let default_name = self
                                        .model
                                        .single
                                        .suggested_file_name(self.model.naming, format)
                                        .unwrap_or_default();
                                    let dialog = rfd::FileDialog::new()
                                        .set_title("Save QR code")
                                        .add_filter(format.label(), &[format.extension()])
                                        .set_file_name(&default_name);
                                    match dialog.save_file() {
                                        Some(path) => {
                                            let path = ensure_extension(path, format.extension());
                                            self.inbox.push(Msg::SaveImageRequested { path, format });
                                        }
                                        None => self.inbox.push(Msg::SaveCancelled),
                                    }
                                }
                            }
                        });
                    });
                });
            });
    }

    /// Entry editor plus the batch generate controls.
    fn render_batch_section(&mut self, ui: &mut egui::Ui) {
        let promo_mode = self.promo_mode();
        egui::CollapsingHeader::new("Batch")
            .default_open(true)
            .show(ui, |ui| {
                let msgs = entries::view(ui, &self.model.entries, promo_mode);
                self.inbox.extend(msgs.into_iter().map(Msg::Entries));

                ui.add_space(6.0);
                ui.horizontal(|ui| {
                    let mut skip = self.model.skip_failures;
                    if ui
                        .checkbox(&mut skip, "Skip failing entries")
                        .on_hover_text(
                            "Keep generating when an entry cannot be encoded and list it afterwards",
                        )
                        .changed()
                    {
                        self.inbox.push(Msg::SetSkipFailures(skip));
                    }

                    let button = egui::Button::new(format!(
                        "{} Generate all",
                        egui_phosphor::regular::QR_CODE
                    ));
                    if ui
                        .add_enabled(self.model.entries.has_content(), button)
                        .on_disabled_hover_text("Add or import entries first")
                        .clicked()
                    {
                        self.inbox.push(Msg::GenerateBatchRequested);
                    }
                });
            });
    }

    /// Export settings, archive button, and the generated thumbnails.
    fn render_results_section(&mut self, ui: &mut egui::Ui) {
        egui::CollapsingHeader::new("Results")
            .default_open(true)
            .show(ui, |ui| {
                egui::Frame::group(ui.style()).show(ui, |ui| {
                    ui.set_width(ui.available_width());
                    egui::Grid::new("export_grid")
                        .num_columns(2)
                        .spacing(egui::vec2(8.0, 10.0))
                        .min_col_width(140.0)
                        .show(ui, |ui| {
                            ui.label("File names");
                            self.render_naming_choice(ui);
                            ui.end_row();

                            ui.label("Image format");
                            self.render_format_choice(ui);
                            ui.end_row();
                        });

                    ui.add_space(6.0);
                    self.render_archive_button(ui);
                });

                ui.add_space(8.0);
                results::view(ui, &self.model.results);
            });
    }

    fn render_naming_choice(&mut self, ui: &mut egui::Ui) {
        let mut naming = self.model.naming;
        ui.horizontal(|ui| {
            ui.selectable_value(
                &mut naming,
                NamingPolicy::UsePayloadAndKind,
                "Payload and type",
            );
            ui.selectable_value(&mut naming, NamingPolicy::UseRawContent, "Content");
        });
        if naming != self.model.naming {
            self.inbox.push(Msg::SetNaming(naming));
        }
    }

    fn render_format_choice(&mut self, ui: &mut egui::Ui) {
        let mut format = self.model.image_format;
        ui.horizontal(|ui| {
            for option in ImageFormat::ALL {
                ui.selectable_value(&mut format, option, option.label());
            }
        });
        if format != self.model.image_format {
            self.inbox.push(Msg::SetImageFormat(format));
        }
    }

    /// "Save ZIP" button with the native save dialog.
    fn render_archive_button(&mut self, ui: &mut egui::Ui) {
        let button = egui::Button::new(format!(
            "{} Save ZIP archive",
            egui_phosphor::regular::FILE_ARCHIVE
        ));
        if ui
            .add_enabled(!self.model.results.is_empty(), button)
            .on_disabled_hover_text("Generate codes first")
            .clicked()
        {
            let dialog = rfd::FileDialog::new()
                .set_title("Save QR code archive")
                .add_filter("Zip archive", &["zip"])
                .set_file_name(&self.model.config.archive_name);

            if let Some(path) = dialog.save_file() {
                let output_path = ensure_extension(path, "zip");
                debug!(path = %output_path.display(), "Archive destination chosen");
                self.inbox.push(Msg::SaveArchiveRequested(output_path));
            } else {
                self.inbox.push(Msg::SaveCancelled);
            }
        }
    }

    /// Render a simple modal window for error messages.
    fn render_error_modal(&mut self, ctx: &egui::Context) {
        if let Some(message) = self.model.error.clone() {
            egui::Window::new("Error")
                .collapsible(false)
                .resizable(false)
                .anchor(egui::Align2::CENTER_CENTER, egui::Vec2::ZERO)
                .show(ctx, |ui| {
                    ui.label(message);
                    ui.add_space(8.0);
                    if ui.button("OK").clicked() {
                        self.inbox.push(Msg::DismissError);
                    }
                });
        }
    }

    /// Render latest status message when present.
    fn render_status(&self, ui: &mut egui::Ui) {
        if let Some(text) = &self.model.status {
            let display = if self.model.pending_commands > 0 {
                format!("{}  (working…)", text)
            } else {
                text.to_string()
            };
            ui.horizontal(|ui| {
                ui.label(egui::RichText::new(display).color(egui::Color32::from_gray(68)));
                if self.model.pending_commands > 0 {
                    ui.add(egui::Spinner::new().size(14.0));
                }
            });
        } else if self.model.pending_commands > 0 {
            ui.add(egui::Spinner::new().size(14.0));
        }
    }
}
