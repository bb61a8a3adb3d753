//! Region extraction: external contours of the edge map and selection of the
//! single largest one.
//!
//! Border chains from [`trace`] are compressed to their corner vertices
//! before measuring. Compression drops only points in the middle of straight
//! 8-connected runs, so area, arc length and extents are unchanged.
//!
//! Selecting the largest contour is a deliberate simplification: one image
//! is assumed to show one pothole, and smaller regions are ignored.

pub mod geometry;
pub mod trace;

pub use geometry::Point;

use crate::image::GrayImageU8;
use crate::types::BoundingBox;
use geometry::{bounding_box, closed_arc_length, compress_chain, polygon_area};
use serde::Serialize;

/// A closed external boundary with its pixel-space measurements.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Contour {
    /// Corner vertices of the boundary chain, in tracing order.
    pub points: Vec<Point>,
    /// Enclosed polygon area in square pixels.
    pub area_px: f64,
    /// Closed boundary length in pixels.
    pub perimeter_px: f64,
    pub bounding_box: BoundingBox,
}

impl Contour {
    /// Build from a raw (uncompressed) border chain.
    pub fn from_chain(chain: &[Point]) -> Self {
        let points = compress_chain(chain);
        let area_px = polygon_area(&points);
        let perimeter_px = closed_arc_length(&points);
        let bounding_box = bounding_box(&points);
        Self {
            points,
            area_px,
            perimeter_px,
            bounding_box,
        }
    }
}

/// All outermost contours of the non-zero pixels, in raster order of their
/// first pixel.
pub fn find_external_contours(edges: &GrayImageU8) -> Vec<Contour> {
    trace::external_borders(edges.data(), edges.width(), edges.height())
        .iter()
        .map(|chain| Contour::from_chain(chain))
        .collect()
}

/// Index of the contour with the largest area. Ties keep the earliest one.
pub fn largest_by_area(contours: &[Contour]) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (idx, c) in contours.iter().enumerate() {
        match best {
            Some((_, area)) if c.area_px <= area => {}
            _ => best = Some((idx, c.area_px)),
        }
    }
    best.map(|(idx, _)| idx)
}
