// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2026 The qrpack contributors

//! Sequential batch generation: build a payload per entry, encode it, collect results.

use tracing::{debug, info, warn};

use crate::config::PromoTemplate;
use crate::logic::encoder::QrEncoder;
use crate::logic::error::{QrError, Result};
use crate::logic::formatter::format_payload;
use crate::models::{
    BatchFailure, BatchReport, ContentKind, Entry, GeneratedCode, GenerationMode,
};

/// Payload for `raw` under the active mode.
pub fn payload_for(raw: &str, kind: ContentKind, mode: GenerationMode, promo: &PromoTemplate) -> String {
    match mode {
        GenerationMode::Standard => format_payload(raw, kind),
        GenerationMode::PromoLink => promo.url_for(raw),
    }
}

/// Generate one code from the single-item form.
pub fn generate_single(
    raw: &str,
    kind: ContentKind,
    mode: GenerationMode,
    promo: &PromoTemplate,
    encoder: &dyn QrEncoder,
) -> Result<GeneratedCode> {
    if raw.trim().is_empty() {
        return Err(QrError::EmptyInput);
    }
    encode_entry(&Entry::new(raw, kind), mode, promo, encoder)
}

/// Encode every non-blank entry in order. The first encoder failure aborts the run.
pub fn run_batch(
    entries: &[Entry],
    mode: GenerationMode,
    promo: &PromoTemplate,
    encoder: &dyn QrEncoder,
) -> Result<Vec<GeneratedCode>> {
    let work = encodable(entries)?;
    info!(entries = work.len(), ?mode, "Starting batch generation");

    let mut codes = Vec::with_capacity(work.len());
    for (_, entry) in work {
        codes.push(encode_entry(entry, mode, promo, encoder)?);
    }

    info!(generated = codes.len(), "Batch generation finished");
    Ok(codes)
}

/// Like [`run_batch`], but keeps going past encoder failures and reports them per entry.
pub fn run_batch_lenient(
    entries: &[Entry],
    mode: GenerationMode,
    promo: &PromoTemplate,
    encoder: &dyn QrEncoder,
) -> Result<BatchReport> {
    let work = encodable(entries)?;
    info!(entries = work.len(), ?mode, "Starting lenient batch generation");

    let mut report = BatchReport::default();
    for (index, entry) in work {
        match encode_entry(entry, mode, promo, encoder) {
            Ok(code) => report.codes.push(code),
            Err(err) => {
                warn!(index, error = %err, "Skipping entry that failed to encode");
                report.failures.push(BatchFailure {
                    index,
                    raw_content: entry.raw_content.clone(),
                    message: err.to_string(),
                });
            }
        }
    }

    info!(
        generated = report.codes.len(),
        failed = report.failures.len(),
        "Lenient batch generation finished"
    );
    Ok(report)
}

/// Non-blank entries with their original positions; `EmptyInput` when none remain.
fn encodable(entries: &[Entry]) -> Result<Vec<(usize, &Entry)>> {
    let work: Vec<_> = entries
        .iter()
        .enumerate()
        .filter(|(_, entry)| !entry.is_blank())
        .collect();
    let skipped = entries.len() - work.len();
    if skipped > 0 {
        debug!(skipped, "Skipping blank entries");
    }
    if work.is_empty() {
        return Err(QrError::EmptyInput);
    }
    Ok(work)
}

fn encode_entry(
    entry: &Entry,
    mode: GenerationMode,
    promo: &PromoTemplate,
    encoder: &dyn QrEncoder,
) -> Result<GeneratedCode> {
    let payload = payload_for(&entry.raw_content, entry.kind, mode, promo);
    let png = encoder
        .encode(&payload)
        .map_err(|err| QrError::EncodingFailed {
            content: entry.raw_content.clone(),
            reason: err.to_string(),
        })?;
    Ok(GeneratedCode::new(
        entry.raw_content.clone(),
        entry.kind,
        payload,
        png,
    ))
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use super::*;

    /// Records payloads and fails on any payload containing `"fail"`.
    #[derive(Default)]
    struct RecordingEncoder {
        seen: RefCell<Vec<String>>,
    }

    impl QrEncoder for RecordingEncoder {
        fn encode(&self, payload: &str) -> anyhow::Result<Vec<u8>> {
            self.seen.borrow_mut().push(payload.to_string());
            if payload.contains("fail") {
                anyhow::bail!("payload rejected");
            }
            Ok(payload.as_bytes().to_vec())
        }
    }

    fn promo() -> PromoTemplate {
        PromoTemplate {
            host: "promo.example.com".into(),
            token: "tok".into(),
        }
    }

    #[test]
    fn batch_preserves_order_and_formats_payloads() {
        let encoder = RecordingEncoder::default();
        let entries = vec![
            Entry::new("example.com", ContentKind::Url),
            Entry::new("a@b.co", ContentKind::Email),
            Entry::new("plain", ContentKind::Text),
        ];

        let codes = run_batch(&entries, GenerationMode::Standard, &promo(), &encoder).unwrap();

        let payloads: Vec<_> = codes.iter().map(|c| c.encoded_payload()).collect();
        assert_eq!(payloads, vec!["https://example.com", "mailto:a@b.co", "plain"]);
        for (code, entry) in codes.iter().zip(&entries) {
            assert_eq!(
                code.encoded_payload(),
                format_payload(&entry.raw_content, entry.kind)
            );
            assert_eq!(code.png(), code.encoded_payload().as_bytes());
        }
    }

    #[test]
    fn blank_entries_are_skipped() {
        let encoder = RecordingEncoder::default();
        let entries = vec![
            Entry::imported("one"),
            Entry::imported("   "),
            Entry::imported("two"),
        ];

        let codes = run_batch(&entries, GenerationMode::Standard, &promo(), &encoder).unwrap();

        assert_eq!(codes.len(), 2);
        assert_eq!(encoder.seen.borrow().len(), 2);
    }

    #[test]
    fn all_blank_is_empty_input() {
        let encoder = RecordingEncoder::default();
        let entries = vec![Entry::imported(""), Entry::imported("  ")];

        let result = run_batch(&entries, GenerationMode::Standard, &promo(), &encoder);
        assert!(matches!(result, Err(QrError::EmptyInput)));
    }

    #[test]
    fn encoder_failure_aborts_whole_batch() {
        let encoder = RecordingEncoder::default();
        let entries = vec![
            Entry::imported("ok"),
            Entry::imported("fail here"),
            Entry::imported("never reached"),
        ];

        match run_batch(&entries, GenerationMode::Standard, &promo(), &encoder) {
            Err(QrError::EncodingFailed { content, .. }) => assert_eq!(content, "fail here"),
            other => panic!("expected EncodingFailed, got {other:?}"),
        }
        assert_eq!(encoder.seen.borrow().len(), 2, "run stops at first failure");
    }

    #[test]
    fn lenient_batch_reports_failures_by_index() {
        let encoder = RecordingEncoder::default();
        let entries = vec![
            Entry::imported("ok"),
            Entry::imported(""),
            Entry::imported("fail here"),
            Entry::imported("also ok"),
        ];

        let report =
            run_batch_lenient(&entries, GenerationMode::Standard, &promo(), &encoder).unwrap();

        let raws: Vec<_> = report.codes.iter().map(|c| c.raw_content()).collect();
        assert_eq!(raws, vec!["ok", "also ok"]);
        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].index, 2);
        assert_eq!(report.failures[0].raw_content, "fail here");
    }

    #[test]
    fn promo_mode_ignores_kind_and_substitutes_verbatim() {
        let encoder = RecordingEncoder::default();
        let entries = vec![
            Entry::new("SAVE 10", ContentKind::Email),
            Entry::new("x&y", ContentKind::Url),
        ];

        let codes = run_batch(&entries, GenerationMode::PromoLink, &promo(), &encoder).unwrap();

        assert_eq!(
            codes[0].encoded_payload(),
            "https://promo.example.com/addpromocode?adj_t=tok&ref=qr&code=SAVE 10"
        );
        assert_eq!(
            codes[1].encoded_payload(),
            "https://promo.example.com/addpromocode?adj_t=tok&ref=qr&code=x&y"
        );
    }

    #[test]
    fn single_generation_rejects_blank_input() {
        let encoder = RecordingEncoder::default();
        let result = generate_single(
            "  ",
            ContentKind::Text,
            GenerationMode::Standard,
            &promo(),
            &encoder,
        );
        assert!(matches!(result, Err(QrError::EmptyInput)));
        assert!(encoder.seen.borrow().is_empty());
    }

    #[test]
    fn single_generation_uses_real_encoder() {
        let encoder = crate::logic::encoder::QrCodeEncoder::default();
        let code = generate_single(
            r#"{"ssid":"Home","password":"pw"}"#,
            ContentKind::Wifi,
            GenerationMode::Standard,
            &promo(),
            &encoder,
        )
        .unwrap();

        assert_eq!(code.encoded_payload(), "WIFI:T:WPA;S:Home;P:pw;;");
        assert!(image::load_from_memory(code.png()).is_ok());
    }
}
