//! Parameter types configuring the analyzer.
//!
//! Only the edge thresholds and the artifact settings are tunable. The scale
//! convention and the scoring ladders are fixed: the cost and priority
//! formulas are calibrated against them.

use crate::types::ArtifactFormat;
use serde::{Deserialize, Serialize};

/// Analyzer-wide parameters.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyzerParams {
    pub edge: EdgeParams,
    pub annotation: AnnotationParams,
}

/// Double threshold for the Canny stage, in Sobel L1 units.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EdgeParams {
    /// Gradients above this may join an edge if linked to a strong one.
    pub low_threshold: f32,
    /// Gradients above this seed edges.
    pub high_threshold: f32,
}

impl Default for EdgeParams {
    fn default() -> Self {
        Self {
            low_threshold: 50.0,
            high_threshold: 150.0,
        }
    }
}

/// Controls rendering of the annotated copy in `analyze_*` calls.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnnotationParams {
    pub enabled: bool,
    pub format: ArtifactFormat,
}

impl Default for AnnotationParams {
    fn default() -> Self {
        Self {
            enabled: true,
            format: ArtifactFormat::Jpeg,
        }
    }
}
