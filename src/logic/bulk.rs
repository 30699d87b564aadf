// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2026 The qrpack contributors

//! Turn uploaded text or spreadsheet files into ordered content strings.

use std::io::Cursor;
use std::path::Path;

use calamine::{Data, Range, Reader, open_workbook_auto_from_rs};
use tracing::{debug, info};

use crate::logic::error::{QrError, Result};

/// Extensions offered by the import dialog.
pub const SUPPORTED_EXTENSIONS: [&str; 3] = ["txt", "xlsx", "xls"];

/// Source layout implied by the file extension.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SourceFormat {
    PlainText,
    Spreadsheet,
}

impl SourceFormat {
    /// Classify an extension (without the dot, any case).
    pub fn from_extension(extension: &str) -> Result<Self> {
        match extension.trim_start_matches('.').to_ascii_lowercase().as_str() {
            "txt" => Ok(SourceFormat::PlainText),
            "xlsx" | "xls" => Ok(SourceFormat::Spreadsheet),
            other => Err(QrError::UnsupportedFormat(other.to_string())),
        }
    }
}

/// Read `path` and parse it by its extension.
pub fn parse_file(path: &Path) -> Result<Vec<String>> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or_default();
    // Reject before touching the disk.
    SourceFormat::from_extension(extension)?;
    let bytes = std::fs::read(path)?;
    let rows = parse_source(&bytes, extension)?;
    info!(path = %path.display(), rows = rows.len(), "Imported bulk source");
    Ok(rows)
}

/// Parse file bytes into trimmed, non-blank content strings in source order.
pub fn parse_source(bytes: &[u8], extension: &str) -> Result<Vec<String>> {
    let rows = match SourceFormat::from_extension(extension)? {
        SourceFormat::PlainText => text_lines(bytes),
        SourceFormat::Spreadsheet => spreadsheet_rows(bytes)?,
    };

    if rows.is_empty() {
        return Err(QrError::EmptySource);
    }
    Ok(rows)
}

fn text_lines(bytes: &[u8]) -> Vec<String> {
    String::from_utf8_lossy(bytes)
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

fn spreadsheet_rows(bytes: &[u8]) -> Result<Vec<String>> {
    let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes.to_vec()))
        .map_err(|err| QrError::UnreadableSource(err.to_string()))?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| QrError::UnreadableSource("workbook has no sheets".into()))?
        .map_err(|err| QrError::UnreadableSource(err.to_string()))?;
    debug!(rows = range.height(), cols = range.width(), "Read first worksheet");
    Ok(first_column(&range))
}

/// Stringified, trimmed cells of column A, skipping blank cells.
pub(crate) fn first_column(range: &Range<Data>) -> Vec<String> {
    let (Some((first_row, _)), Some((last_row, _))) = (range.start(), range.end()) else {
        return Vec::new();
    };

    (first_row..=last_row)
        .filter_map(|row| range.get_value((row, 0)))
        .map(|cell| cell.to_string().trim().to_string())
        .filter(|cell| !cell.is_empty())
        .collect()
}
