//! Diagnostics data model returned by
//! [`PotholeAnalyzer::analyze_with_diagnostics`](crate::PotholeAnalyzer).
//!
//! `AnalysisReport` bundles the outcome with an `AnalysisTrace` describing
//! every stage the pipeline executed, down to the severity breakdown and
//! per-stage timings.

pub mod pipeline;
pub mod stages;
pub mod timing;

pub use pipeline::{AnalysisReport, AnalysisTrace, InputDescriptor};
pub use stages::{ContourStage, EdgeStage, SelectedContour};
pub use timing::{Stage, StageTiming, TimingBreakdown};
