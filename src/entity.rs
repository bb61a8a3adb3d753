//! Persisted analysis record and its re-analysis workflow.
//!
//! An entity is created when an image is uploaded and is updated in place
//! each time it is (re)analyzed. A failed analysis leaves it untouched.
use crate::analyzer::PotholeAnalyzer;
use crate::error::AnalysisError;
use crate::sink::ImageSink;
use crate::types::{Detection, MeasurementRecord, Severity};
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

/// Seconds since the Unix epoch.
pub fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalysisEntity {
    pub id: u64,
    /// Original uploaded image.
    pub image: PathBuf,
    /// Stored reference to the annotated image.
    pub processed_image: Option<String>,

    pub width_cm: Option<f64>,
    pub height_cm: Option<f64>,
    pub area_cm2: Option<f64>,
    pub depth_estimate: Option<f64>,
    pub perimeter_cm: Option<f64>,
    pub severity: Option<Severity>,
    pub confidence_score: Option<f64>,

    pub location: Option<String>,
    pub impact_score: Option<u8>,
    pub repair_priority: Option<u8>,
    pub estimated_repair_cost: Option<f64>,

    pub created_at: u64,
    pub analyzed_at: Option<u64>,
    #[serde(default)]
    pub notes: String,
}

/// Why a re-analysis did not update the entity.
#[derive(Debug, Clone, PartialEq)]
pub enum ReanalyzeError {
    /// The stored image could not be read or decoded.
    Input(AnalysisError),
    /// The image was analyzed but shows no pothole.
    NoDefectDetected,
    /// Rendering or storing the annotated image failed.
    Storage(AnalysisError),
}

impl ReanalyzeError {
    /// HTTP status a web layer should answer with.
    pub fn http_status(&self) -> u16 {
        match self {
            Self::Input(_) => 400,
            Self::NoDefectDetected => 422,
            Self::Storage(_) => 500,
        }
    }
}

impl From<AnalysisError> for ReanalyzeError {
    fn from(err: AnalysisError) -> Self {
        if err.is_input_error() {
            Self::Input(err)
        } else {
            Self::Storage(err)
        }
    }
}

impl std::fmt::Display for ReanalyzeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Input(e) => write!(f, "invalid input image: {}", e),
            Self::NoDefectDetected => f.write_str("no pothole detected in image"),
            Self::Storage(e) => write!(f, "could not store analysis output: {}", e),
        }
    }
}

impl std::error::Error for ReanalyzeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Input(e) | Self::Storage(e) => Some(e),
            Self::NoDefectDetected => None,
        }
    }
}

impl AnalysisEntity {
    /// New, not yet analyzed entity for an uploaded image.
    pub fn new(id: u64, image: impl Into<PathBuf>) -> Self {
        Self {
            id,
            image: image.into(),
            created_at: unix_now(),
            ..Self::default()
        }
    }

    pub fn is_analyzed(&self) -> bool {
        self.analyzed_at.is_some()
    }

    /// "Pothole Analysis 7 - high", or "Pending" before analysis.
    pub fn label(&self) -> String {
        let status = self.severity.map(|s| s.as_str()).unwrap_or("Pending");
        format!("Pothole Analysis {} - {}", self.id, status)
    }

    /// Copy the record's fields onto the entity.
    pub fn apply_record(&mut self, record: &MeasurementRecord, processed_image: Option<String>) {
        self.width_cm = Some(record.width_cm);
        self.height_cm = Some(record.height_cm);
        self.area_cm2 = Some(record.area_cm2);
        self.depth_estimate = Some(record.depth_estimate_cm);
        self.perimeter_cm = Some(record.perimeter_cm);
        self.severity = Some(record.severity);
        self.confidence_score = Some(record.confidence_score);
        self.impact_score = Some(record.impact_score);
        self.repair_priority = Some(record.repair_priority);
        self.estimated_repair_cost = Some(record.estimated_repair_cost);
        self.processed_image = processed_image;
        self.analyzed_at = Some(unix_now());
    }

    /// Analyze the entity's image, store the annotated copy as
    /// `processed_<id>.<ext>` and update the entity.
    pub fn reanalyze(
        &mut self,
        analyzer: &PotholeAnalyzer,
        sink: &dyn ImageSink,
    ) -> Result<MeasurementRecord, ReanalyzeError> {
        debug!("reanalyzing entity {} from {}", self.id, self.image.display());
        let analysis = match analyzer.analyze_path(&self.image)? {
            Detection::Detected(a) => a,
            Detection::NoDefectDetected => {
                debug!("entity {}: no pothole detected", self.id);
                return Err(ReanalyzeError::NoDefectDetected);
            }
        };

        let mut record = analysis.record;
        let processed = match &analysis.artifact {
            Some(artifact) => {
                let name = format!("processed_{}.{}", self.id, artifact.format.extension());
                let stored = sink.store(&name, &artifact.bytes).map_err(|e| {
                    warn!("entity {}: storing annotated image failed: {}", self.id, e);
                    ReanalyzeError::Storage(e)
                })?;
                record.annotated_image = Some(name);
                Some(stored)
            }
            None => None,
        };

        self.apply_record(&record, processed);
        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::AnalyzerParams;
    use crate::image::io::encode_rgb_image;
    use crate::types::ArtifactFormat;
    use image::{Rgb, RgbImage};
    use std::cell::RefCell;
    use std::fs;

    #[derive(Default)]
    struct MemorySink {
        stored: RefCell<Vec<(String, usize)>>,
    }

    impl ImageSink for MemorySink {
        fn store(&self, name: &str, bytes: &[u8]) -> Result<String, AnalysisError> {
            self.stored.borrow_mut().push((name.to_string(), bytes.len()));
            Ok(format!("mem://{name}"))
        }
    }

    struct FailingSink;

    impl ImageSink for FailingSink {
        fn store(&self, name: &str, _bytes: &[u8]) -> Result<String, AnalysisError> {
            Err(AnalysisError::Write {
                path: PathBuf::from(name),
                message: "disk full".to_string(),
            })
        }
    }

    fn write_png(tag: &str, img: &RgbImage) -> PathBuf {
        let path = std::env::temp_dir().join(format!("pothole_entity_{tag}_{}.png", std::process::id()));
        fs::write(&path, encode_rgb_image(img, ArtifactFormat::Png).unwrap()).unwrap();
        path
    }

    fn pothole_image() -> RgbImage {
        RgbImage::from_fn(160, 120, |x, y| {
            if (40..100).contains(&x) && (30..80).contains(&y) {
                Rgb([25, 25, 25])
            } else {
                Rgb([200, 200, 200])
            }
        })
    }

    #[test]
    fn status_codes() {
        let input = ReanalyzeError::from(AnalysisError::EmptyImage { width: 0, height: 0 });
        assert_eq!(input.http_status(), 400);
        assert_eq!(ReanalyzeError::NoDefectDetected.http_status(), 422);
        let storage = ReanalyzeError::from(AnalysisError::Encode("x".to_string()));
        assert_eq!(storage.http_status(), 500);
    }

    #[test]
    fn reanalyze_updates_fields_and_stores_artifact() {
        let path = write_png("ok", &pothole_image());
        let mut entity = AnalysisEntity::new(7, &path);
        assert_eq!(entity.label(), "Pothole Analysis 7 - Pending");
        let sink = MemorySink::default();
        let analyzer = PotholeAnalyzer::new(AnalyzerParams::default());

        let record = entity.reanalyze(&analyzer, &sink).unwrap();
        assert!(entity.is_analyzed());
        assert_eq!(entity.severity, Some(record.severity));
        assert_eq!(entity.width_cm, Some(record.width_cm));
        assert_eq!(entity.processed_image.as_deref(), Some("mem://processed_7.jpg"));
        assert_eq!(record.annotated_image.as_deref(), Some("processed_7.jpg"));
        assert_eq!(sink.stored.borrow()[0].0, "processed_7.jpg");
        fs::remove_file(path).unwrap();
    }

    #[test]
    fn failures_leave_entity_unchanged() {
        let analyzer = PotholeAnalyzer::default();

        let mut missing = AnalysisEntity::new(1, "/nonexistent/pothole.jpg");
        let before = missing.clone();
        let err = missing.reanalyze(&analyzer, &MemorySink::default()).unwrap_err();
        assert_eq!(err.http_status(), 400);
        assert_eq!(missing, before);

        let blank = write_png("blank", &RgbImage::from_pixel(50, 40, Rgb([90, 90, 90])));
        let mut entity = AnalysisEntity::new(2, &blank);
        let before = entity.clone();
        let err = entity.reanalyze(&analyzer, &MemorySink::default()).unwrap_err();
        assert_eq!(err, ReanalyzeError::NoDefectDetected);
        assert_eq!(entity, before);
        fs::remove_file(blank).unwrap();

        let path = write_png("fail", &pothole_image());
        let mut entity = AnalysisEntity::new(3, &path);
        let before = entity.clone();
        let err = entity.reanalyze(&analyzer, &FailingSink).unwrap_err();
        assert_eq!(err.http_status(), 500);
        assert_eq!(entity, before);
        fs::remove_file(path).unwrap();
    }
}
