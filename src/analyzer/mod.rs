//! Pothole analyzer: the five-stage pipeline from RGB pixels to a
//! measurement record.
//!
//! Overview
//! - Preprocess: BT.601 luma, 5×5 Gaussian smoothing.
//! - Region extraction: Canny edges, external contours, largest by area.
//!   No contour at all is the `NoDefectDetected` outcome.
//! - Measurement: pixel geometry scaled by `rows / 100` pixels per cm.
//! - Depth and severity: mean darkness under the region mask, then the
//!   additive area/depth/shape score.
//! - Impact: impact score, repair priority, cost estimate.
//!
//! [`PotholeAnalyzer::assess`] stops at the record; the `analyze_*` entry
//! points also render the annotated artifact when enabled in
//! [`AnnotationParams`].
//!
//! Modules
//! - [`params`] – tunables deserialized from tool configs.
//! - `context` – per-call calibration state.
//! - `pipeline` – the [`PotholeAnalyzer`] implementation.

mod context;
pub mod params;
mod pipeline;

pub use context::AnalysisContext;
pub use params::{AnalyzerParams, AnnotationParams, EdgeParams};
pub use pipeline::{Assessment, PotholeAnalyzer};
