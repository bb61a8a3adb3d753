//! Annotated copy of the input image.
//!
//! Rendering is separate from measurement: [`render_annotation`] draws on a
//! copy of the input and [`encode_artifact`] turns the result into bytes.
//! Neither writes anywhere; storing the artifact is the caller's business.

pub mod glyphs;

use crate::contours::{Contour, Point};
use crate::error::AnalysisError;
use crate::image::io::encode_rgb_image;
use crate::types::{AnnotatedArtifact, ArtifactFormat, MeasurementRecord};
use image::{Rgb, RgbImage};
use imageproc::drawing::{draw_hollow_rect_mut, draw_line_segment_mut};
use imageproc::rect::Rect;

pub const CONTOUR_COLOR: Rgb<u8> = Rgb([0, 255, 0]);
pub const BOX_COLOR: Rgb<u8> = Rgb([0, 0, 255]);
pub const TEXT_COLOR: Rgb<u8> = Rgb([255, 255, 0]);

const CONTOUR_THICKNESS: i32 = 3;
const TEXT_SCALE: u32 = 2;
const LINE_STEP: i32 = 30;
const LABEL_GAP: i32 = 10;
/// Labels whose baseline would sit above this row move below the box.
const MIN_BASELINE: i32 = 30;

/// Base name for the artifact; the extension follows the format.
pub const ARTIFACT_STEM: &str = "processed";

/// Python-style float text: integral values keep one decimal.
fn fmt_value(v: f64) -> String {
    if v.fract() == 0.0 {
        format!("{v:.1}")
    } else {
        format!("{v}")
    }
}

/// The four overlay lines, top of the stack last.
pub fn label_lines(record: &MeasurementRecord) -> [String; 4] {
    [
        format!(
            "Size: {}x{} cm",
            fmt_value(record.width_cm),
            fmt_value(record.height_cm)
        ),
        format!("Area: {} cm2", fmt_value(record.area_cm2)),
        format!("Depth: ~{} cm", fmt_value(record.depth_estimate_cm)),
        format!("Severity: {}", record.severity.as_str().to_uppercase()),
    ]
}

/// Baseline of label `index` for a box at `y` with height `h`.
pub fn label_baseline(y: i32, h: i32, index: usize) -> i32 {
    let step = index as i32 * LINE_STEP;
    let above = y - LABEL_GAP - step;
    if above < MIN_BASELINE {
        y + h + LINE_STEP + step
    } else {
        above
    }
}

fn draw_thick_polyline(img: &mut RgbImage, points: &[Point], thickness: i32, color: Rgb<u8>) {
    if points.is_empty() {
        return;
    }
    let lo = -(thickness / 2);
    let hi = lo + thickness;
    let n = points.len();
    for i in 0..n {
        let a = points[i];
        let b = points[(i + 1) % n];
        for oy in lo..hi {
            for ox in lo..hi {
                draw_line_segment_mut(
                    img,
                    ((a.x + ox) as f32, (a.y + oy) as f32),
                    ((b.x + ox) as f32, (b.y + oy) as f32),
                    color,
                );
            }
        }
    }
}

/// Render contour, bounding box and labels on a copy of `original`.
pub fn render_annotation(
    original: &RgbImage,
    region: &Contour,
    record: &MeasurementRecord,
) -> RgbImage {
    let mut canvas = original.clone();
    draw_thick_polyline(&mut canvas, &region.points, CONTOUR_THICKNESS, CONTOUR_COLOR);

    let bb = record.bounding_box;
    let (x, y) = (bb.x as i32, bb.y as i32);
    // Corners inclusive, two pixels thick inward.
    draw_hollow_rect_mut(
        &mut canvas,
        Rect::at(x, y).of_size(bb.width + 1, bb.height + 1),
        BOX_COLOR,
    );
    if bb.width >= 2 && bb.height >= 2 {
        draw_hollow_rect_mut(
            &mut canvas,
            Rect::at(x + 1, y + 1).of_size(bb.width - 1, bb.height - 1),
            BOX_COLOR,
        );
    }

    for (i, line) in label_lines(record).iter().enumerate() {
        let baseline = label_baseline(y, bb.height as i32, i);
        glyphs::draw_text_mut(&mut canvas, line, x, baseline, TEXT_SCALE, TEXT_COLOR);
    }
    canvas
}

/// Encode a rendered image into an artifact with a suggested file name.
pub fn encode_artifact(
    rendered: &RgbImage,
    format: ArtifactFormat,
) -> Result<AnnotatedArtifact, AnalysisError> {
    let bytes = encode_rgb_image(rendered, format)?;
    Ok(AnnotatedArtifact {
        bytes,
        format,
        suggested_name: format!("{ARTIFACT_STEM}.{}", format.extension()),
        width: rendered.width(),
        height: rendered.height(),
    })
}
