//! Measurement engine: pixel geometry → centimetres.
//!
//! Scale comes from a fixed heuristic, not a measured calibration: the
//! image's vertical field of view is taken to span [`CALIBRATION_SPAN_CM`]
//! at a standard capture distance, so `pixels_per_cm = rows / 100`. The
//! downstream cost and priority formulas are tuned against this convention.
use crate::contours::Contour;
use crate::types::BoundingBox;
use serde::Serialize;

/// Physical extent assumed for the full image height.
pub const CALIBRATION_SPAN_CM: f64 = 100.0;

/// Round to two decimals.
#[inline]
pub fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

/// Pixels-per-centimetre factor for one image.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Calibration {
    pub pixels_per_cm: f64,
}

impl Calibration {
    /// `None` for a zero-height image; otherwise strictly positive.
    pub fn from_image_height(height_px: u32) -> Option<Self> {
        (height_px > 0).then(|| Self {
            pixels_per_cm: height_px as f64 / CALIBRATION_SPAN_CM,
        })
    }

    #[inline]
    pub fn length_cm(&self, px: f64) -> f64 {
        px / self.pixels_per_cm
    }

    #[inline]
    pub fn area_cm2(&self, px2: f64) -> f64 {
        px2 / (self.pixels_per_cm * self.pixels_per_cm)
    }
}

/// Region size in centimetres, each value rounded to two decimals.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Dimensions {
    pub width_cm: f64,
    pub height_cm: f64,
    pub area_cm2: f64,
    pub perimeter_cm: f64,
    pub bounding_box: BoundingBox,
}

pub fn measure(contour: &Contour, calibration: &Calibration) -> Dimensions {
    let bb = contour.bounding_box;
    Dimensions {
        width_cm: round2(calibration.length_cm(bb.width as f64)),
        height_cm: round2(calibration.length_cm(bb.height as f64)),
        area_cm2: round2(calibration.area_cm2(contour.area_px)),
        perimeter_cm: round2(calibration.length_cm(contour.perimeter_px)),
        bounding_box: bb,
    }
}
