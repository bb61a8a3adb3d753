use serde::{Deserialize, Serialize};

/// Axis-aligned box in pixel coordinates.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

/// Discrete severity class derived from the additive severity score.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
    Critical,
}

impl Severity {
    pub const ALL: [Severity; 4] = [
        Severity::Low,
        Severity::Medium,
        Severity::High,
        Severity::Critical,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Low => "low",
            Severity::Medium => "medium",
            Severity::High => "high",
            Severity::Critical => "critical",
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The measurement result threaded through the pipeline.
///
/// Centimetre values are rounded to two decimals. `severity` and
/// `confidence_score` always come from the same severity assessment.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MeasurementRecord {
    pub width_cm: f64,
    pub height_cm: f64,
    pub area_cm2: f64,
    pub perimeter_cm: f64,
    pub bounding_box: BoundingBox,
    pub depth_estimate_cm: f64,
    pub severity: Severity,
    pub confidence_score: f64,
    /// 1–10.
    pub impact_score: u8,
    /// 2–5, a function of `severity` only.
    pub repair_priority: u8,
    pub estimated_repair_cost: f64,
    /// Suggested file name of the rendered annotated image, once rendered.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub annotated_image: Option<String>,
}

/// Container format of the annotated artifact.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArtifactFormat {
    #[default]
    Jpeg,
    Png,
}

impl ArtifactFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ArtifactFormat::Jpeg => "jpg",
            ArtifactFormat::Png => "png",
        }
    }

    pub fn image_format(&self) -> image::ImageFormat {
        match self {
            ArtifactFormat::Jpeg => image::ImageFormat::Jpeg,
            ArtifactFormat::Png => image::ImageFormat::Png,
        }
    }
}

/// Encoded annotated copy of the input image. Never written by the core.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnnotatedArtifact {
    #[serde(skip)]
    pub bytes: Vec<u8>,
    pub format: ArtifactFormat,
    pub suggested_name: String,
    pub width: u32,
    pub height: u32,
}

/// Result of an analysis call that did not fail on input.
///
/// `NoDefectDetected` is an expected outcome ("nothing to report"), never a
/// zero-filled record.
#[derive(Clone, Debug, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Detection<T> {
    Detected(T),
    NoDefectDetected,
}

impl<T> Detection<T> {
    pub fn is_detected(&self) -> bool {
        matches!(self, Detection::Detected(_))
    }

    pub fn detected(self) -> Option<T> {
        match self {
            Detection::Detected(v) => Some(v),
            Detection::NoDefectDetected => None,
        }
    }

    pub fn as_detected(&self) -> Option<&T> {
        match self {
            Detection::Detected(v) => Some(v),
            Detection::NoDefectDetected => None,
        }
    }
}

/// Full analysis: the record plus the rendered artifact (when enabled).
#[derive(Clone, Debug, Serialize)]
pub struct Analysis {
    pub record: MeasurementRecord,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub artifact: Option<AnnotatedArtifact>,
}

pub type AnalysisOutcome = Detection<Analysis>;
