use crate::analyzer::AnalysisContext;
use crate::depth::DepthEstimate;
use crate::diagnostics::{ContourStage, EdgeStage, TimingBreakdown};
use crate::measure::Dimensions;
use crate::severity::SeverityAssessment;
use crate::types::AnalysisOutcome;
use serde::Serialize;

/// Result produced by
/// [`PotholeAnalyzer::analyze_with_diagnostics`](crate::PotholeAnalyzer).
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisReport {
    pub outcome: AnalysisOutcome,
    pub trace: AnalysisTrace,
}

/// End-to-end trace of one analysis call.
///
/// Stages after region extraction are absent when no defect was found.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisTrace {
    pub input: InputDescriptor,
    pub timings: TimingBreakdown,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub edges: Option<EdgeStage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contours: Option<ContourStage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<AnalysisContext>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dimensions: Option<Dimensions>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub depth: Option<DepthEstimate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub severity: Option<SeverityAssessment>,
}

impl AnalysisTrace {
    pub fn new(input: InputDescriptor) -> Self {
        Self {
            input,
            timings: TimingBreakdown::default(),
            edges: None,
            contours: None,
            context: None,
            dimensions: None,
            depth: None,
            severity: None,
        }
    }

    /// True when a depth or perimeter fallback fired during the run.
    pub fn used_fallback(&self) -> bool {
        self.depth.map(|d| d.is_fallback()).unwrap_or(false)
            || self
                .severity
                .map(|s| s.breakdown.degenerate_perimeter)
                .unwrap_or(false)
    }

    /// One-line human-readable summary for tool output.
    pub fn summary(&self) -> String {
        let contours = self.contours.as_ref().map(|c| c.count).unwrap_or(0);
        let edges = self.edges.as_ref().map(|e| e.edge_pixels).unwrap_or(0);
        let score = self
            .severity
            .map(|s| s.score.to_string())
            .unwrap_or_else(|| "-".to_string());
        format!(
            "{}x{} edges={} contours={} score={} total={:.2}ms",
            self.input.width, self.input.height, edges, contours, score, self.timings.total_ms
        )
    }
}

#[derive(Clone, Copy, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InputDescriptor {
    pub width: u32,
    pub height: u32,
}
