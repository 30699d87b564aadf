// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges
// SPDX-FileCopyrightText: 2026 The qrpack contributors

//! Packaging generated codes into a zip archive, and single-image export.
//!
//! Responsibilities:
//! - Derive archive member names from content, payload, and kind.
//! - Convert bitmaps to EPS when the vector format is selected.
//! - Write archives and images to disk.

use std::collections::HashMap;
use std::fs;
use std::io::{Cursor, Write};
use std::path::Path;

use anyhow::Context;
use tracing::{info, warn};
use zip::{CompressionMethod, write::FileOptions};

use crate::logic::error::{QrError, Result};
use crate::logic::vector::png_to_vector_path;
use crate::models::{GeneratedCode, GenerationMode, ImageFormat, NamingPolicy};
use crate::utils::sanitize_component;

/// Stem used when sanitizing leaves nothing behind. The underscore keeps it outside
/// the `[a-z0-9]` alphabet of sanitized stems, so it never collides with one.
const FALLBACK_STEM: &str = "_empty";

/// Archive member name for `code`.
///
/// Raw content names the file when requested or in promo-link mode; otherwise
/// the payload plus `_<kind>` does. Names are not de-duplicated.
pub fn archive_file_name(
    code: &GeneratedCode,
    naming: NamingPolicy,
    mode: GenerationMode,
    format: ImageFormat,
) -> String {
    let use_raw = naming == NamingPolicy::UseRawContent || mode == GenerationMode::PromoLink;
    if use_raw {
        format!("{}.{}", stem(code.raw_content()), format.extension())
    } else {
        format!(
            "{}_{}.{}",
            stem(code.encoded_payload()),
            code.kind().as_str(),
            format.extension()
        )
    }
}

fn stem(value: &str) -> String {
    let sanitized = sanitize_component(value);
    if sanitized.is_empty() {
        FALLBACK_STEM.to_string()
    } else {
        sanitized
    }
}

/// Bytes of `code` in the requested format.
pub fn export_single(code: &GeneratedCode, format: ImageFormat) -> Result<Vec<u8>> {
    match format {
        ImageFormat::Png => Ok(code.png().to_vec()),
        ImageFormat::Eps => Ok(png_to_vector_path(code.png(), false)?.into_bytes()),
        ImageFormat::EpsMerged => Ok(png_to_vector_path(code.png(), true)?.into_bytes()),
    }
}

/// Build a zip archive in memory with one member per distinct file name.
///
/// When two codes map to the same name, the later one wins.
pub fn build_archive(
    codes: &[GeneratedCode],
    naming: NamingPolicy,
    mode: GenerationMode,
    format: ImageFormat,
) -> Result<Vec<u8>> {
    let names: Vec<String> = codes
        .iter()
        .map(|code| archive_file_name(code, naming, mode, format))
        .collect();

    let mut last_index: HashMap<&str, usize> = HashMap::new();
    for (index, name) in names.iter().enumerate() {
        if let Some(previous) = last_index.insert(name.as_str(), index) {
            warn!(name = %name, replaced = previous, by = index, "Archive name collision, keeping later code");
        }
    }

    let compression = match format {
        ImageFormat::Png => CompressionMethod::Stored,
        ImageFormat::Eps | ImageFormat::EpsMerged => CompressionMethod::Deflated,
    };
    let options: FileOptions<'_, ()> = FileOptions::default().compression_method(compression);
    let mut zip = zip::ZipWriter::new(Cursor::new(Vec::new()));

    for (index, (code, name)) in codes.iter().zip(&names).enumerate() {
        if last_index.get(name.as_str()) != Some(&index) {
            continue;
        }
        let bytes = export_single(code, format)?;
        zip.start_file(name.as_str(), options)?;
        zip.write_all(&bytes)
            .map_err(|err| QrError::ArchiveBuildFailed(err.to_string()))?;
    }

    let cursor = zip.finish()?;
    Ok(cursor.into_inner())
}

/// Write bytes to `output`, creating parent directories as needed.
pub fn write_output(output: &Path, bytes: &[u8]) -> anyhow::Result<()> {
    if let Some(parent) = output.parent()
        && !parent.as_os_str().is_empty()
        && !parent.exists()
    {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create output directory {:?}", parent))?;
    }

    fs::write(output, bytes).with_context(|| format!("Failed to write file {:?}", output))?;
    info!(path = %output.display(), bytes = bytes.len(), "Wrote output file");
    Ok(())
}
