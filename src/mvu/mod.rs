// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges
// SPDX-FileCopyrightText: 2026 The qrpack contributors

//! Root Model-View-Update kernel wiring component state, messages, and commands.

use std::path::PathBuf;

use anyhow::Result;
use tracing::{debug, info};

use crate::config::GeneratorConfig;
use crate::logic::archive::{build_archive, export_single, write_output};
use crate::logic::batch::{generate_single, run_batch, run_batch_lenient};
use crate::logic::bulk::{SUPPORTED_EXTENSIONS, parse_file};
use crate::logic::encoder::QrCodeEncoder;
use crate::models::{
    BatchReport, ContentKind, Entry, GeneratedCode, GenerationMode, ImageFormat, NamingPolicy,
};
use crate::ui::components::entries::{self, EntriesCommand, EntriesModel, EntriesMsg};
use crate::ui::components::results::{self, ResultsModel, ResultsMsg, preview_image};
use crate::ui::components::single::{self, SingleCommand, SingleModel, SingleMsg};

/// Top-level application state.
#[derive(Default)]
pub struct AppModel {
    /// Rendering and promo settings for this session.
    pub config: GeneratorConfig,
    /// Active generation mode.
    pub mode: GenerationMode,
    /// Single-code form state.
    pub single: SingleModel,
    /// Batch entry list.
    pub entries: EntriesModel,
    /// Latest batch results.
    pub results: ResultsModel,
    /// How archive members are named.
    pub naming: NamingPolicy,
    /// Format used for saved images and archive members.
    pub image_format: ImageFormat,
    /// Continue batch runs past entries that fail to encode.
    pub skip_failures: bool,
    /// Latest status message to display.
    pub status: Option<String>,
    /// Latest error message to display in modal.
    pub error: Option<String>,
    /// Count of queued background commands.
    pub pending_commands: usize,
}

/// Application messages routed through the update function.
pub enum Msg {
    SetMode(GenerationMode),
    SetNaming(NamingPolicy),
    SetImageFormat(ImageFormat),
    SetSkipFailures(bool),
    GenerateBatchRequested,
    SingleDecoded {
        code: GeneratedCode,
        preview: eframe::egui::ColorImage,
        mode: GenerationMode,
    },
    SingleFailed(String),
    BatchDecoded {
        report: BatchReport,
        previews: Vec<eframe::egui::ColorImage>,
        mode: GenerationMode,
    },
    BatchFailed(String),
    SaveImageRequested {
        path: PathBuf,
        format: ImageFormat,
    },
    SaveArchiveRequested(PathBuf),
    SaveCancelled,
    SaveCompleted(Result<PathBuf, String>),
    DismissError,
    Single(SingleMsg),
    Entries(EntriesMsg),
    Results(ResultsMsg),
}

/// Commands represent side-effects executed between frames.
pub enum Command {
    PickSourceFile,
    GenerateSingle {
        raw: String,
        kind: ContentKind,
        mode: GenerationMode,
        config: GeneratorConfig,
    },
    GenerateBatch {
        entries: Vec<Entry>,
        mode: GenerationMode,
        lenient: bool,
        config: GeneratorConfig,
    },
    SaveImage {
        path: PathBuf,
        code: GeneratedCode,
        format: ImageFormat,
    },
    SaveArchive {
        path: PathBuf,
        codes: Vec<GeneratedCode>,
        naming: NamingPolicy,
        mode: GenerationMode,
        format: ImageFormat,
    },
}

const BUSY_MESSAGE: &str = "Please wait for the current task to finish.";

/// Update the application model and enqueue commands.
pub fn update(model: &mut AppModel, msg: Msg, cmds: &mut Vec<Command>) {
    match msg {
        Msg::SetMode(mode) => model.mode = mode,
        Msg::SetNaming(naming) => model.naming = naming,
        Msg::SetImageFormat(format) => model.image_format = format,
        Msg::SetSkipFailures(on) => model.skip_failures = on,
        Msg::DismissError => model.error = None,
        Msg::Single(m) => {
            if matches!(m, SingleMsg::GenerateRequested) && is_busy(model) {
                surface_event(model, BUSY_MESSAGE.into(), false);
                return;
            }
            let mut single_cmds = Vec::new();
            if let Some(event) = single::update(&mut model.single, m, &mut single_cmds) {
                surface_event(model, event.message, event.is_error);
            }
            for c in single_cmds {
                match c {
                    SingleCommand::Generate { raw, kind } => cmds.push(Command::GenerateSingle {
                        raw,
                        kind,
                        mode: model.mode,
                        config: model.config.clone(),
                    }),
                }
            }
        }
        Msg::Entries(m) => {
            let mut entry_cmds = Vec::new();
            if let Some(event) = entries::update(&mut model.entries, m, &mut entry_cmds) {
                surface_event(model, event.message, event.is_error);
            }
            for c in entry_cmds {
                match c {
                    EntriesCommand::PickSourceFile => cmds.push(Command::PickSourceFile),
                }
            }
        }
        Msg::Results(m) => {
            if let ResultsMsg::Ready {
                codes, failures, ..
            } = &m
            {
                let status = if failures.is_empty() {
                    format!("Generated {} QR code(s).", codes.len())
                } else {
                    format!(
                        "Generated {} QR code(s); {} failed.",
                        codes.len(),
                        failures.len()
                    )
                };
                model.status = Some(status);
            }
            results::update(&mut model.results, m);
        }
        Msg::SingleDecoded {
            code,
            preview,
            mode,
        } => {
            // Texture creation needs the egui context; the UI shell converts this into
            // `SingleMsg::ResultReady` before it reaches update.
            let _ = (code, preview, mode);
        }
        Msg::BatchDecoded {
            report,
            previews,
            mode,
        } => {
            // Converted into `ResultsMsg::Ready` by the UI shell, same as `SingleDecoded`.
            let _ = (report, previews, mode);
        }
        Msg::SingleFailed(err) => {
            surface_event(model, format!("Failed to generate QR code:\n\n{err}"), true)
        }
        Msg::BatchFailed(err) => {
            results::update(&mut model.results, ResultsMsg::Clear);
            surface_event(model, format!("Batch generation failed:\n\n{err}"), true);
        }
        Msg::GenerateBatchRequested => match validate_batch(model) {
            Ok(cmd) => cmds.push(cmd),
            Err(err) => {
                let is_error = err != BUSY_MESSAGE;
                surface_event(model, err, is_error);
            }
        },
        Msg::SaveImageRequested { path, format } => {
            if is_busy(model) {
                surface_event(model, BUSY_MESSAGE.into(), false);
                return;
            }
            match model.single.result() {
                Some(code) => cmds.push(Command::SaveImage {
                    path,
                    code: code.clone(),
                    format,
                }),
                None => surface_event(model, "Generate a QR code first.".into(), true),
            }
        }
        Msg::SaveArchiveRequested(path) => {
            if is_busy(model) {
                surface_event(model, BUSY_MESSAGE.into(), false);
            } else if model.results.is_empty() {
                surface_event(model, "Generate codes before exporting.".into(), true);
            } else {
                cmds.push(Command::SaveArchive {
                    path,
                    codes: model.results.codes().to_vec(),
                    naming: model.naming,
                    mode: model.results.mode(),
                    format: model.image_format,
                });
            }
        }
        Msg::SaveCancelled => surface_event(model, "Save cancelled.".to_string(), false),
        Msg::SaveCompleted(result) => match result {
            Ok(path) => surface_event(model, format!("Saved: {}", path.display()), false),
            Err(err) => surface_event(model, format!("Failed to save:\n\n{err}"), true),
        },
    }
}

/// Execute a command on the worker thread and return a resulting message.
pub fn run_command(cmd: Command) -> Msg {
    match cmd {
        Command::PickSourceFile => {
            let file = rfd::FileDialog::new()
                .set_title("Import entries")
                .add_filter("Text or spreadsheet", &SUPPORTED_EXTENSIONS)
                .pick_file();

            match file {
                Some(path) => match parse_file(&path) {
                    Ok(rows) => Msg::Entries(EntriesMsg::Imported { rows, source: path }),
                    Err(err) => Msg::Entries(EntriesMsg::ImportFailed(err.to_string())),
                },
                None => Msg::Entries(EntriesMsg::ImportCancelled),
            }
        }
        Command::GenerateSingle {
            raw,
            kind,
            mode,
            config,
        } => {
            let encoder = QrCodeEncoder::from_config(&config);
            let generated = generate_single(&raw, kind, mode, &config.promo, &encoder)
                .map_err(|e| e.to_string())
                .and_then(|code| {
                    let preview = preview_image(code.png())?;
                    Ok((code, preview))
                });
            match generated {
                Ok((code, preview)) => Msg::SingleDecoded {
                    code,
                    preview,
                    mode,
                },
                Err(err) => Msg::SingleFailed(err),
            }
        }
        Command::GenerateBatch {
            entries,
            mode,
            lenient,
            config,
        } => match generate_batch(&entries, mode, lenient, &config) {
            Ok((report, previews)) => Msg::BatchDecoded {
                report,
                previews,
                mode,
            },
            Err(err) => Msg::BatchFailed(err),
        },
        Command::SaveImage { path, code, format } => {
            let res = export_single(&code, format)
                .map_err(anyhow::Error::from)
                .and_then(|bytes| write_output(&path, &bytes))
                .map(|_| path);
            Msg::SaveCompleted(res.map_err(|e| e.to_string()))
        }
        Command::SaveArchive {
            path,
            codes,
            naming,
            mode,
            format,
        } => {
            let res = save_archive(&path, &codes, naming, mode, format).map(|_| path);
            Msg::SaveCompleted(res.map_err(|e| e.to_string()))
        }
    }
}

/// Run a batch and decode previews in the same order as the codes.
fn generate_batch(
    entries: &[Entry],
    mode: GenerationMode,
    lenient: bool,
    config: &GeneratorConfig,
) -> Result<(BatchReport, Vec<eframe::egui::ColorImage>), String> {
    let encoder = QrCodeEncoder::from_config(config);
    let report = if lenient {
        run_batch_lenient(entries, mode, &config.promo, &encoder)
    } else {
        run_batch(entries, mode, &config.promo, &encoder).map(|codes| BatchReport {
            codes,
            failures: Vec::new(),
        })
    }
    .map_err(|e| e.to_string())?;

    let previews = report
        .codes
        .iter()
        .map(|code| preview_image(code.png()))
        .collect::<Result<Vec<_>, _>>()?;
    Ok((report, previews))
}

fn save_archive(
    path: &std::path::Path,
    codes: &[GeneratedCode],
    naming: NamingPolicy,
    mode: GenerationMode,
    format: ImageFormat,
) -> Result<()> {
    let bytes = build_archive(codes, naming, mode, format)?;
    write_output(path, &bytes)?;
    info!(path = %path.display(), members = codes.len(), "Archive saved");
    Ok(())
}

fn is_busy(model: &AppModel) -> bool {
    model.pending_commands > 0
}

/// Update status/error fields consistently for user feedback.
fn surface_event(model: &mut AppModel, message: String, is_error: bool) {
    if is_error {
        model.error = Some(message.clone());
    }
    model.status = Some(message);
}

/// Validate model state and build the batch command.
fn validate_batch(model: &AppModel) -> Result<Command, String> {
    if is_busy(model) {
        return Err(BUSY_MESSAGE.into());
    }
    if model.entries.entries().is_empty() {
        return Err("Add or import entries first.".into());
    }
    if !model.entries.has_content() {
        return Err(crate::logic::QrError::EmptyInput.to_string());
    }

    debug!(
        entries = model.entries.entries().len(),
        mode = ?model.mode,
        lenient = model.skip_failures,
        "Queueing batch generation"
    );
    Ok(Command::GenerateBatch {
        entries: model.entries.entries().to_vec(),
        mode: model.mode,
        lenient: model.skip_failures,
        config: model.config.clone(),
    })
}
