use crate::contours::Contour;
use crate::edges::EdgeDetection;
use crate::types::BoundingBox;
use serde::Serialize;

/// Edge map statistics.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EdgeStage {
    pub low_threshold: f32,
    pub high_threshold: f32,
    pub strong_candidates: usize,
    pub weak_candidates: usize,
    /// Pixels surviving hysteresis.
    pub edge_pixels: usize,
    pub elapsed_ms: f64,
}

impl EdgeStage {
    pub fn from_detection(det: &EdgeDetection, low: f32, high: f32, elapsed_ms: f64) -> Self {
        Self {
            low_threshold: low,
            high_threshold: high,
            strong_candidates: det.strong_candidates,
            weak_candidates: det.weak_candidates,
            edge_pixels: det.edge_pixels(),
            elapsed_ms,
        }
    }
}

/// The contour picked as the defect region.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectedContour {
    pub index: usize,
    pub area_px: f64,
    pub perimeter_px: f64,
    pub vertices: usize,
    pub bounding_box: BoundingBox,
}

impl SelectedContour {
    pub fn new(index: usize, contour: &Contour) -> Self {
        Self {
            index,
            area_px: contour.area_px,
            perimeter_px: contour.perimeter_px,
            vertices: contour.points.len(),
            bounding_box: contour.bounding_box,
        }
    }
}

/// Region extraction summary.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContourStage {
    /// External contours found in the edge map.
    pub count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selected: Option<SelectedContour>,
    pub elapsed_ms: f64,
}
