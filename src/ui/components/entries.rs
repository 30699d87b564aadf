// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2026 The qrpack contributors

//! Batch entry editor: import from file, edit content and kind per row.

use std::path::PathBuf;

use eframe::egui;

use crate::logic::detector::detect_kind;
use crate::models::{ContentKind, Entry};

/// UI model for the batch entry list.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EntriesModel {
    entries: Vec<Entry>,
    source: Option<PathBuf>,
}

/// Messages emitted by the entries view.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EntriesMsg {
    RequestImport,
    Imported { rows: Vec<String>, source: PathBuf },
    ImportFailed(String),
    ImportCancelled,
    Add,
    Remove(usize),
    ContentChanged { index: usize, text: String },
    KindChanged { index: usize, kind: ContentKind },
    DetectKinds,
    Clear,
}

/// Side effects requested by the entries editor.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EntriesCommand {
    PickSourceFile,
}

/// User-facing feedback for status/error surfaces.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EntriesEvent {
    pub message: String,
    pub is_error: bool,
}

impl EntriesEvent {
    fn info(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            is_error: false,
        }
    }

    fn error(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            is_error: true,
        }
    }
}

impl EntriesModel {
    /// Current entries in display order.
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    /// File the entries were last imported from.
    pub fn source(&self) -> Option<&PathBuf> {
        self.source.as_ref()
    }

    /// True when at least one entry has content.
    pub fn has_content(&self) -> bool {
        self.entries.iter().any(|e| !e.is_blank())
    }
}

/// Apply a message to the model. Returns a feedback event when relevant.
pub fn update(
    model: &mut EntriesModel,
    msg: EntriesMsg,
    cmds: &mut Vec<EntriesCommand>,
) -> Option<EntriesEvent> {
    match msg {
        EntriesMsg::RequestImport => {
            cmds.push(EntriesCommand::PickSourceFile);
            None
        }
        EntriesMsg::Imported { rows, source } => {
            let count = rows.len();
            model.entries = rows.into_iter().map(Entry::imported).collect();
            let name = source
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| source.display().to_string());
            model.source = Some(source);
            Some(EntriesEvent::info(format!(
                "Imported {count} {} from {name}.",
                entries_word(count)
            )))
        }
        EntriesMsg::ImportFailed(err) => {
            Some(EntriesEvent::error(format!("Import failed:\n\n{err}")))
        }
        EntriesMsg::ImportCancelled => Some(EntriesEvent::info("Import cancelled.")),
        EntriesMsg::Add => {
            model.entries.push(Entry::default());
            None
        }
        EntriesMsg::Remove(index) => {
            if index < model.entries.len() {
                model.entries.remove(index);
                return Some(EntriesEvent::info("Entry removed"));
            }
            None
        }
        EntriesMsg::ContentChanged { index, text } => {
            if let Some(entry) = model.entries.get_mut(index) {
                entry.raw_content = text;
            }
            None
        }
        EntriesMsg::KindChanged { index, kind } => {
            if let Some(entry) = model.entries.get_mut(index) {
                entry.kind = kind;
            }
            None
        }
        EntriesMsg::DetectKinds => {
            let mut detected = 0usize;
            for entry in model.entries.iter_mut().filter(|e| !e.is_blank()) {
                entry.kind = detect_kind(&entry.raw_content);
                detected += 1;
            }
            Some(EntriesEvent::info(format!(
                "Detected types for {detected} {}.",
                entries_word(detected)
            )))
        }
        EntriesMsg::Clear => {
            model.entries.clear();
            model.source = None;
            Some(EntriesEvent::info("Entries cleared"))
        }
    }
}

fn entries_word(count: usize) -> &'static str {
    if count == 1 { "entry" } else { "entries" }
}

/// Render the entry list and return any messages triggered by user interaction.
///
/// `promo_mode` hides per-entry kinds because they are ignored in that mode.
pub fn view(ui: &mut egui::Ui, model: &EntriesModel, promo_mode: bool) -> Vec<EntriesMsg> {
    let mut msgs = Vec::new();

    ui.horizontal_wrapped(|ui| {
        if ui
            .button(format!(
                "{} Import file",
                egui_phosphor::regular::UPLOAD_SIMPLE
            ))
            .on_hover_text("One entry per line (.txt) or per row of the first column (.xlsx, .xls)")
            .clicked()
        {
            msgs.push(EntriesMsg::RequestImport);
        }
        if ui
            .button(format!("{} Add entry", egui_phosphor::regular::PLUS))
            .clicked()
        {
            msgs.push(EntriesMsg::Add);
        }
        if !promo_mode
            && ui
                .add_enabled(
                    model.has_content(),
                    egui::Button::new(format!(
                        "{} Detect types",
                        egui_phosphor::regular::MAGIC_WAND
                    )),
                )
                .on_hover_text("Guess the type of every entry from its content")
                .clicked()
        {
            msgs.push(EntriesMsg::DetectKinds);
        }
        if ui
            .add_enabled(!model.entries.is_empty(), egui::Button::new("Clear"))
            .clicked()
        {
            msgs.push(EntriesMsg::Clear);
        }
    });

    if let Some(source) = model.source() {
        ui.label(
            egui::RichText::new(format!("Source: {}", source.display()))
                .small()
                .color(egui::Color32::from_gray(110)),
        );
    }

    ui.add_space(6.0);

    let visuals = ui.visuals().clone();
    egui::Frame::new()
        .fill(visuals.panel_fill)
        .stroke(visuals.window_stroke())
        .inner_margin(8.0)
        .show(ui, |ui| {
            if model.entries.is_empty() {
                ui.label(
                    egui::RichText::new("No entries. Import a file or add entries manually.")
                        .color(egui::Color32::from_gray(150)),
                );
            } else {
                render_entry_rows(ui, model, promo_mode, &mut msgs);
            }
        });

    msgs
}

/// One row per entry: content field, kind selector, remove button.
fn render_entry_rows(
    ui: &mut egui::Ui,
    model: &EntriesModel,
    promo_mode: bool,
    msgs: &mut Vec<EntriesMsg>,
) {
    egui::Grid::new("entries_grid")
        .num_columns(if promo_mode { 3 } else { 4 })
        .spacing(egui::vec2(8.0, 6.0))
        .striped(true)
        .show(ui, |ui| {
            for (index, entry) in model.entries.iter().enumerate() {
                ui.label(
                    egui::RichText::new(format!("{}", index + 1))
                        .color(egui::Color32::from_gray(120)),
                );

                let mut text = entry.raw_content.clone();
                if ui
                    .add(egui::TextEdit::singleline(&mut text).desired_width(320.0))
                    .changed()
                {
                    msgs.push(EntriesMsg::ContentChanged { index, text });
                }

                if !promo_mode {
                    let mut kind = entry.kind;
                    egui::ComboBox::from_id_salt(("entry_kind", index))
                        .selected_text(kind.label())
                        .width(90.0)
                        .show_ui(ui, |ui| {
                            for option in ContentKind::ALL {
                                ui.selectable_value(&mut kind, option, option.label());
                            }
                        });
                    if kind != entry.kind {
                        msgs.push(EntriesMsg::KindChanged { index, kind });
                    }
                }

                if ui
                    .button(
                        egui::RichText::new(egui_phosphor::regular::TRASH_SIMPLE)
                            .color(egui::Color32::from_gray(140)),
                    )
                    .on_hover_text("Remove entry")
                    .clicked()
                {
                    msgs.push(EntriesMsg::Remove(index));
                }
                ui.end_row();
            }
        });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn model_with(raws: &[&str]) -> EntriesModel {
        EntriesModel {
            entries: raws.iter().map(|r| Entry::imported(*r)).collect(),
            source: None,
        }
    }

    #[test]
    fn import_replaces_entries_as_text() {
        let mut model = model_with(&["old"]);
        let mut cmds = Vec::new();

        let event = update(
            &mut model,
            EntriesMsg::Imported {
                rows: vec!["https://a.example".into(), "b@c.de".into()],
                source: PathBuf::from("/tmp/codes.txt"),
            },
            &mut cmds,
        )
        .expect("event expected");

        assert_eq!(model.entries().len(), 2);
        assert!(model.entries().iter().all(|e| e.kind == ContentKind::Text));
        assert_eq!(event.message, "Imported 2 entries from codes.txt.");
        assert_eq!(model.source(), Some(&PathBuf::from("/tmp/codes.txt")));
    }

    #[test]
    fn request_import_enqueues_picker() {
        let mut model = EntriesModel::default();
        let mut cmds = Vec::new();

        update(&mut model, EntriesMsg::RequestImport, &mut cmds);

        assert_eq!(cmds, vec![EntriesCommand::PickSourceFile]);
    }

    #[test]
    fn import_failure_is_an_error_event() {
        let mut model = EntriesModel::default();
        let mut cmds = Vec::new();

        let event = update(
            &mut model,
            EntriesMsg::ImportFailed("bad file".into()),
            &mut cmds,
        )
        .expect("event expected");

        assert!(event.is_error);
        assert!(event.message.contains("bad file"));
    }

    #[test]
    fn detect_kinds_updates_non_blank_entries() {
        let mut model = model_with(&["https://example.com", "", "a@b.co", "hello"]);
        let mut cmds = Vec::new();

        let event = update(&mut model, EntriesMsg::DetectKinds, &mut cmds).unwrap();

        let kinds: Vec<_> = model.entries().iter().map(|e| e.kind).collect();
        assert_eq!(
            kinds,
            vec![
                ContentKind::Url,
                ContentKind::Text,
                ContentKind::Email,
                ContentKind::Text
            ]
        );
        assert_eq!(event.message, "Detected types for 3 entries.");
    }

    #[test]
    fn edits_apply_in_place_and_ignore_bad_indices() {
        let mut model = model_with(&["one", "two"]);
        let mut cmds = Vec::new();

        update(
            &mut model,
            EntriesMsg::ContentChanged {
                index: 1,
                text: "zwei".into(),
            },
            &mut cmds,
        );
        update(
            &mut model,
            EntriesMsg::KindChanged {
                index: 0,
                kind: ContentKind::Phone,
            },
            &mut cmds,
        );
        update(
            &mut model,
            EntriesMsg::ContentChanged {
                index: 9,
                text: "ignored".into(),
            },
            &mut cmds,
        );

        assert_eq!(model.entries()[1].raw_content, "zwei");
        assert_eq!(model.entries()[0].kind, ContentKind::Phone);
        assert_eq!(model.entries().len(), 2);
    }

    #[test]
    fn remove_and_clear() {
        let mut model = model_with(&["one", "two"]);
        let mut cmds = Vec::new();

        assert!(update(&mut model, EntriesMsg::Remove(5), &mut cmds).is_none());
        update(&mut model, EntriesMsg::Remove(0), &mut cmds);
        assert_eq!(model.entries()[0].raw_content, "two");

        update(&mut model, EntriesMsg::Add, &mut cmds);
        assert_eq!(model.entries().len(), 2);
        assert!(model.entries()[1].is_blank());

        update(&mut model, EntriesMsg::Clear, &mut cmds);
        assert!(model.entries().is_empty());
        assert!(!model.has_content());
    }
}
