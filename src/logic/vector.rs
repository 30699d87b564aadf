// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2026 The qrpack contributors

//! Raster-to-PostScript export.
//!
//! Every pixel whose alpha exceeds [`ALPHA_THRESHOLD`] becomes one stroked,
//! unit-length horizontal segment. Output y is flipped (`height - y`) because
//! PostScript's origin is bottom-left. This is a stroke trace of the bitmap,
//! not a true vectorization.

use std::fmt::Write as _;

use image::RgbaImage;

use crate::logic::error::{QrError, Result};

/// Pixels with alpha strictly above this value are drawn.
pub const ALPHA_THRESHOLD: u8 = 128;

/// Name of the two-point stroke procedure defined in the prolog.
const SEGMENT_OP: &str = "s";

/// EPS with one segment per opaque pixel.
pub fn to_vector_path(image: &RgbaImage) -> String {
    render(image, false)
}

/// EPS with consecutive opaque pixels of a row merged into one segment.
///
/// Strokes of adjacent collinear unit segments cover the same area as one long
/// segment, so the rendered result matches [`to_vector_path`].
pub fn to_vector_path_merged(image: &RgbaImage) -> String {
    render(image, true)
}

/// Decode a PNG (or any format `image` reads) and convert it.
pub fn png_to_vector_path(bytes: &[u8], merge_runs: bool) -> Result<String> {
    let decoded =
        image::load_from_memory(bytes).map_err(|err| QrError::ExportFailed(err.to_string()))?;
    let image = decoded.to_rgba8();
    Ok(if merge_runs {
        to_vector_path_merged(&image)
    } else {
        to_vector_path(&image)
    })
}

fn render(image: &RgbaImage, merge_runs: bool) -> String {
    let (width, height) = image.dimensions();
    let mut out = String::new();
    write_header(&mut out, width, height);

    for y in 0..height {
        let out_y = height - y;
        let mut run_start: Option<u32> = None;
        for x in 0..width {
            let opaque = image.get_pixel(x, y)[3] > ALPHA_THRESHOLD;
            match (opaque, merge_runs) {
                (true, false) => push_segment(&mut out, x, x + 1, out_y),
                (true, true) => {
                    run_start.get_or_insert(x);
                }
                (false, _) => {
                    if let Some(start) = run_start.take() {
                        push_segment(&mut out, start, x, out_y);
                    }
                }
            }
        }
        if let Some(start) = run_start {
            push_segment(&mut out, start, width, out_y);
        }
    }

    out.push_str("showpage\n%%EOF\n");
    out
}

fn write_header(out: &mut String, width: u32, height: u32) {
    out.push_str("%!PS-Adobe-3.0 EPSF-3.0\n");
    let _ = writeln!(out, "%%BoundingBox: 0 0 {width} {height}");
    out.push_str("%%EndComments\n");
    out.push_str("0 0 0 setrgbcolor\n1 setlinewidth\n0 setlinecap\n");
    let _ = writeln!(out, "/{SEGMENT_OP} {{ newpath moveto lineto stroke }} bind def");
}

/// Segment from `x0` to `x1` at height `y`; operands are pushed end point first.
fn push_segment(out: &mut String, x0: u32, x1: u32, y: u32) {
    let _ = writeln!(out, "{x1} {y} {x0} {y} {SEGMENT_OP}");
}

#[cfg(test)]
mod tests {
    use image::Rgba;

    use super::*;

    const OPAQUE: Rgba<u8> = Rgba([0, 0, 0, 255]);
    const CLEAR: Rgba<u8> = Rgba([255, 255, 255, 0]);

    fn segment_lines(eps: &str) -> Vec<&str> {
        eps.lines()
            .filter(|line| line.ends_with(&format!(" {SEGMENT_OP}")))
            .collect()
    }

    #[test]
    fn opaque_two_by_two_emits_four_segments() {
        let img = RgbaImage::from_pixel(2, 2, OPAQUE);
        let eps = to_vector_path(&img);

        assert!(eps.starts_with("%!PS-Adobe-3.0 EPSF-3.0\n"));
        assert!(eps.contains("%%BoundingBox: 0 0 2 2\n"));
        assert_eq!(segment_lines(&eps).len(), 4);
        assert!(eps.ends_with("showpage\n%%EOF\n"));
    }

    #[test]
    fn y_axis_is_flipped() {
        let mut img = RgbaImage::from_pixel(3, 2, CLEAR);
        img.put_pixel(1, 0, OPAQUE);

        let eps = to_vector_path(&img);

        assert_eq!(segment_lines(&eps), vec!["2 2 1 2 s"]);
    }

    #[test]
    fn alpha_threshold_is_exclusive() {
        let mut img = RgbaImage::from_pixel(2, 1, CLEAR);
        img.put_pixel(0, 0, Rgba([0, 0, 0, ALPHA_THRESHOLD]));
        img.put_pixel(1, 0, Rgba([0, 0, 0, ALPHA_THRESHOLD + 1]));

        let eps = to_vector_path(&img);

        assert_eq!(segment_lines(&eps), vec!["2 1 1 1 s"]);
    }

    #[test]
    fn transparent_image_has_no_segments() {
        let img = RgbaImage::from_pixel(4, 4, CLEAR);
        assert!(segment_lines(&to_vector_path(&img)).is_empty());
    }

    #[test]
    fn merged_output_joins_runs_per_row() {
        let img = RgbaImage::from_pixel(2, 2, OPAQUE);
        let eps = to_vector_path_merged(&img);

        assert_eq!(segment_lines(&eps), vec!["2 2 0 2 s", "2 1 0 1 s"]);
    }

    #[test]
    fn merged_output_splits_on_gaps() {
        let mut img = RgbaImage::from_pixel(5, 1, OPAQUE);
        img.put_pixel(2, 0, CLEAR);

        let eps = to_vector_path_merged(&img);

        assert_eq!(segment_lines(&eps), vec!["2 1 0 1 s", "5 1 3 1 s"]);
    }

    #[test]
    fn output_is_deterministic() {
        let mut img = RgbaImage::from_pixel(3, 3, CLEAR);
        img.put_pixel(0, 2, OPAQUE);
        assert_eq!(to_vector_path(&img), to_vector_path(&img));
    }

    #[test]
    fn undecodable_bytes_fail_export() {
        assert!(matches!(
            png_to_vector_path(b"not a png", false),
            Err(QrError::ExportFailed(_))
        ));
    }
}
