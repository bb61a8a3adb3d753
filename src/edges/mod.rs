//! Canny-style edge detection on the smoothed grayscale image.
//!
//! Stages:
//! - Sobel gradients with replicated borders and L1 magnitude ([`grad`]).
//! - Direction-aligned non-maximum suppression with a low/high double
//!   threshold ([`nms`]).
//! - Hysteresis linking of weak candidates to strong edges
//!   ([`hysteresis`]).
//!
//! Thresholds are in 8-bit Sobel L1 units; the usual pair is 50/150.

pub mod grad;
pub mod hysteresis;
pub mod nms;

pub use grad::{sobel_gradients, Grad};
pub use hysteresis::EDGE;
pub use nms::EdgeClass;

use crate::image::{GrayImageU8, ImageF32, ImageU8};

/// Binary edge map plus candidate counts for diagnostics.
#[derive(Clone, Debug)]
pub struct EdgeDetection {
    /// `EDGE` (255) on edge pixels, 0 elsewhere.
    pub edges: GrayImageU8,
    pub strong_candidates: usize,
    pub weak_candidates: usize,
}

impl EdgeDetection {
    pub fn edge_pixels(&self) -> usize {
        self.edges.count_nonzero()
    }
}

/// Run gradient → NMS → hysteresis on an 8-bit image.
pub fn detect_edges(smoothed: ImageU8<'_>, low: f32, high: f32) -> EdgeDetection {
    let grad = sobel_gradients(&ImageF32::from_u8(smoothed));
    let classes = nms::suppress_and_classify(&grad, low, high);
    let strong_candidates = classes.iter().filter(|c| **c == EdgeClass::Strong).count();
    let weak_candidates = classes.iter().filter(|c| **c == EdgeClass::Weak).count();
    let edges = hysteresis::link_edges(&classes, smoothed.w, smoothed.h);
    EdgeDetection {
        edges,
        strong_candidates,
        weak_candidates,
    }
}
