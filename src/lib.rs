#![doc = include_str!("../README.md")]

// Public modules (stable-ish surface)
pub mod analyzer;
pub mod annotate;
pub mod diagnostics;
pub mod entity;
pub mod error;
pub mod image;
pub mod sink;
pub mod types;

// Stage modules: public for tools and tests, considered internals.
pub mod config;
pub mod contours;
pub mod depth;
pub mod edges;
pub mod impact;
pub mod measure;
pub mod preprocess;
pub mod severity;

// --- High-level re-exports -------------------------------------------------

pub use crate::analyzer::{AnalysisContext, AnalyzerParams, Assessment, PotholeAnalyzer};
pub use crate::error::AnalysisError;
pub use crate::types::{
    Analysis, AnalysisOutcome, AnnotatedArtifact, ArtifactFormat, BoundingBox, Detection,
    MeasurementRecord, Severity,
};

pub use crate::diagnostics::{AnalysisReport, AnalysisTrace};
pub use crate::entity::{AnalysisEntity, ReanalyzeError};
pub use crate::sink::{DirectorySink, ImageSink};

// --- Prelude ---------------------------------------------------------------

/// Small prelude for quick experiments.
pub mod prelude {
    pub use crate::{
        AnalysisError, AnalyzerParams, Detection, MeasurementRecord, PotholeAnalyzer, Severity,
    };
}
