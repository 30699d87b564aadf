// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2026 The qrpack contributors

//! Single-code form: one content field, a kind selector, and the latest generated code.

use eframe::egui;

use crate::logic::QrError;
use crate::logic::archive::archive_file_name;
use crate::logic::detector::detect_kind;
use crate::models::{ContentKind, GeneratedCode, GenerationMode, ImageFormat, NamingPolicy};

/// UI model for the single-code form.
pub struct SingleModel {
    /// Raw content as typed.
    pub input: String,
    /// Kind used for formatting.
    pub kind: ContentKind,
    /// Re-detect the kind whenever the input changes.
    pub auto_detect: bool,
    result: Option<GeneratedCode>,
    texture: Option<egui::TextureHandle>,
    /// Mode the current result was generated with.
    mode: GenerationMode,
}

impl Default for SingleModel {
    fn default() -> Self {
        Self {
            input: String::new(),
            kind: ContentKind::Text,
            auto_detect: true,
            result: None,
            texture: None,
            mode: GenerationMode::Standard,
        }
    }
}

impl SingleModel {
    /// Latest generated code, if any.
    pub fn result(&self) -> Option<&GeneratedCode> {
        self.result.as_ref()
    }

    pub fn texture(&self) -> Option<&egui::TextureHandle> {
        self.texture.as_ref()
    }

    /// Suggested file name for saving the current result, named by the mode it was
    /// generated with rather than the active one.
    pub fn suggested_file_name(&self, naming: NamingPolicy, format: ImageFormat) -> Option<String> {
        self.result
            .as_ref()
            .map(|code| archive_file_name(code, naming, self.mode, format))
    }
}

/// Messages emitted by the single-code view.
// Debug omitted because TextureHandle is not Debug.
pub enum SingleMsg {
    InputChanged(String),
    KindSelected(ContentKind),
    AutoDetectToggled(bool),
    GenerateRequested,
    ResultReady {
        code: GeneratedCode,
        texture: Option<egui::TextureHandle>,
        mode: GenerationMode,
    },
    Clear,
}

/// Side effects requested by the single-code form.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SingleCommand {
    Generate { raw: String, kind: ContentKind },
}

/// User-facing feedback for status/error surfaces.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SingleEvent {
    pub message: String,
    pub is_error: bool,
}

/// Apply a message to the model. Returns a feedback event when relevant.
pub fn update(
    model: &mut SingleModel,
    msg: SingleMsg,
    cmds: &mut Vec<SingleCommand>,
) -> Option<SingleEvent> {
    match msg {
        SingleMsg::InputChanged(text) => {
            model.input = text;
            if model.auto_detect {
                model.kind = detect_kind(&model.input);
            }
            None
        }
        SingleMsg::KindSelected(kind) => {
            model.kind = kind;
            model.auto_detect = false;
            None
        }
        SingleMsg::AutoDetectToggled(on) => {
            model.auto_detect = on;
            if on {
                model.kind = detect_kind(&model.input);
            }
            None
        }
        SingleMsg::GenerateRequested => {
            if model.input.trim().is_empty() {
                return Some(SingleEvent {
                    message: QrError::EmptyInput.to_string(),
                    is_error: true,
                });
            }
            cmds.push(SingleCommand::Generate {
                raw: model.input.clone(),
                kind: model.kind,
            });
            None
        }
        SingleMsg::ResultReady {
            code,
            texture,
            mode,
        } => {
            model.result = Some(code);
            model.texture = texture;
            model.mode = mode;
            Some(SingleEvent {
                message: "QR code generated.".into(),
                is_error: false,
            })
        }
        SingleMsg::Clear => {
            model.input.clear();
            model.result = None;
            model.texture = None;
            if model.auto_detect {
                model.kind = ContentKind::Text;
            }
            None
        }
    }
}

/// Render the input controls and return any messages triggered by user interaction.
///
/// `promo_mode` hides the kind selector because kinds are ignored in that mode.
pub fn view(ui: &mut egui::Ui, model: &SingleModel, promo_mode: bool) -> Vec<SingleMsg> {
    let mut msgs = Vec::new();

    let mut input = model.input.clone();
    let hint = if promo_mode {
        "Promo code"
    } else {
        model.kind.hint()
    };
    if ui
        .add(
            egui::TextEdit::multiline(&mut input)
                .hint_text(hint)
                .desired_rows(2)
                .desired_width(f32::INFINITY),
        )
        .changed()
    {
        msgs.push(SingleMsg::InputChanged(input));
    }

    if !promo_mode {
        ui.horizontal_wrapped(|ui| {
            ui.label("Type");
            for kind in ContentKind::ALL {
                let button = egui::Button::new(kind.label()).selected(model.kind == kind);
                if ui.add(button).clicked() && model.kind != kind {
                    msgs.push(SingleMsg::KindSelected(kind));
                }
            }
            ui.separator();
            let mut auto = model.auto_detect;
            if ui
                .checkbox(&mut auto, "Detect automatically")
                .on_hover_text("Guess the type from the content as you type")
                .changed()
            {
                msgs.push(SingleMsg::AutoDetectToggled(auto));
            }
        });
    }

    ui.add_space(4.0);
    ui.horizontal(|ui| {
        let generate = egui::Button::new(format!(
            "{} Generate",
            egui_phosphor::regular::QR_CODE
        ));
        if ui
            .add_enabled(!model.input.trim().is_empty(), generate)
            .on_disabled_hover_text("Enter some content first")
            .clicked()
        {
            msgs.push(SingleMsg::GenerateRequested);
        }

        let has_state = !model.input.is_empty() || model.result.is_some();
        if ui
            .add_enabled(
                has_state,
                egui::Button::new(format!("{} Clear", egui_phosphor::regular::X)),
            )
            .on_hover_text("Empty the form and drop the generated code")
            .clicked()
        {
            msgs.push(SingleMsg::Clear);
        }
    });

    msgs
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn typing_redetects_kind_while_auto_is_on() {
        let mut model = SingleModel::default();
        let mut cmds = Vec::new();

        update(
            &mut model,
            SingleMsg::InputChanged("someone@example.com".into()),
            &mut cmds,
        );
        assert_eq!(model.kind, ContentKind::Email);

        update(
            &mut model,
            SingleMsg::InputChanged("https://example.com".into()),
            &mut cmds,
        );
        assert_eq!(model.kind, ContentKind::Url);
    }

    #[test]
    fn manual_kind_disables_auto_detect() {
        let mut model = SingleModel::default();
        let mut cmds = Vec::new();

        update(&mut model, SingleMsg::KindSelected(ContentKind::Sms), &mut cmds);
        update(
            &mut model,
            SingleMsg::InputChanged("https://example.com".into()),
            &mut cmds,
        );

        assert!(!model.auto_detect);
        assert_eq!(model.kind, ContentKind::Sms);
    }

    #[test]
    fn re_enabling_auto_detect_applies_immediately() {
        let mut model = SingleModel {
            input: "+1 (555) 123-4567".into(),
            kind: ContentKind::Text,
            auto_detect: false,
            ..Default::default()
        };
        let mut cmds = Vec::new();

        update(&mut model, SingleMsg::AutoDetectToggled(true), &mut cmds);

        assert_eq!(model.kind, ContentKind::Phone);
    }

    #[test]
    fn generate_with_blank_input_reports_error() {
        let mut model = SingleModel {
            input: "   ".into(),
            ..Default::default()
        };
        let mut cmds = Vec::new();

        let event = update(&mut model, SingleMsg::GenerateRequested, &mut cmds)
            .expect("event expected");

        assert!(event.is_error);
        assert!(cmds.is_empty());
    }

    #[test]
    fn generate_enqueues_command_with_current_kind() {
        let mut model = SingleModel::default();
        let mut cmds = Vec::new();
        update(
            &mut model,
            SingleMsg::InputChanged("example.com".into()),
            &mut cmds,
        );
        update(&mut model, SingleMsg::KindSelected(ContentKind::Url), &mut cmds);

        update(&mut model, SingleMsg::GenerateRequested, &mut cmds);

        assert_eq!(
            cmds,
            vec![SingleCommand::Generate {
                raw: "example.com".into(),
                kind: ContentKind::Url,
            }]
        );
    }

    fn sample_code(raw: &str, payload: &str) -> GeneratedCode {
        GeneratedCode::new(raw.into(), ContentKind::Text, payload.into(), Vec::new())
    }

    #[test]
    fn clear_resets_form_and_result() {
        let mut model = SingleModel::default();
        let mut cmds = Vec::new();
        update(
            &mut model,
            SingleMsg::InputChanged("https://example.com".into()),
            &mut cmds,
        );
        update(
            &mut model,
            SingleMsg::ResultReady {
                code: sample_code("https://example.com", "https://example.com"),
                texture: None,
                mode: GenerationMode::Standard,
            },
            &mut cmds,
        );

        update(&mut model, SingleMsg::Clear, &mut cmds);

        assert!(model.input.is_empty());
        assert!(model.result().is_none());
        assert!(model.texture().is_none());
        assert_eq!(model.kind, ContentKind::Text);
        assert!(model.suggested_file_name(NamingPolicy::UsePayloadAndKind, ImageFormat::Png).is_none());
    }

    #[test]
    fn clear_keeps_manually_chosen_kind() {
        let mut model = SingleModel::default();
        let mut cmds = Vec::new();
        update(&mut model, SingleMsg::KindSelected(ContentKind::Wifi), &mut cmds);

        update(&mut model, SingleMsg::Clear, &mut cmds);

        assert_eq!(model.kind, ContentKind::Wifi);
        assert!(!model.auto_detect);
    }

    #[test]
    fn suggested_name_uses_mode_of_the_result() {
        let mut model = SingleModel::default();
        let mut cmds = Vec::new();
        update(
            &mut model,
            SingleMsg::ResultReady {
                code: sample_code("SAVE10", "https://promo.example.com/addpromocode?code=SAVE10"),
                texture: None,
                mode: GenerationMode::PromoLink,
            },
            &mut cmds,
        );

        assert_eq!(
            model
                .suggested_file_name(NamingPolicy::UsePayloadAndKind, ImageFormat::Png)
                .as_deref(),
            Some("save10.png")
        );
    }
}
