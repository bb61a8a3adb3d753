//! The [`PotholeAnalyzer`] implementation.
//!
//! Typical usage:
//! ```no_run
//! use pothole_analyzer::{AnalyzerParams, Detection, PotholeAnalyzer};
//! use std::path::Path;
//!
//! # fn example() -> Result<(), pothole_analyzer::AnalysisError> {
//! let analyzer = PotholeAnalyzer::new(AnalyzerParams::default());
//! match analyzer.analyze_path(Path::new("road.jpg"))? {
//!     Detection::Detected(analysis) => {
//!         println!("severity: {}", analysis.record.severity);
//!     }
//!     Detection::NoDefectDetected => println!("No pothole detected"),
//! }
//! # Ok(())
//! # }
//! ```
use super::context::AnalysisContext;
use super::params::AnalyzerParams;
use crate::annotate::{encode_artifact, render_annotation};
use crate::contours::{find_external_contours, largest_by_area, Contour};
use crate::depth::{estimate_depth, region_mask};
use crate::diagnostics::timing::elapsed_ms;
use crate::diagnostics::{
    AnalysisReport, AnalysisTrace, ContourStage, EdgeStage, InputDescriptor, SelectedContour,
    Stage,
};
use crate::edges::detect_edges;
use crate::error::AnalysisError;
use crate::image::io::{decode_rgb_image, load_rgb_image};
use crate::impact::{impact_score, repair_cost, repair_priority};
use crate::measure::measure;
use crate::preprocess::{preprocess, GAUSSIAN_5TAP};
use crate::severity::assess_severity;
use crate::types::{Analysis, AnalysisOutcome, Detection, MeasurementRecord};
use image::RgbImage;
use log::debug;
use std::path::Path;
use std::time::Instant;

/// Measurement record together with the region it was computed from.
#[derive(Clone, Debug)]
pub struct Assessment {
    pub record: MeasurementRecord,
    pub region: Contour,
    pub context: AnalysisContext,
}

/// Stateless analyzer; holds only its parameters.
///
/// Safe to share across threads: every call builds its own
/// [`AnalysisContext`].
#[derive(Clone, Debug, Default)]
pub struct PotholeAnalyzer {
    params: AnalyzerParams,
}

impl PotholeAnalyzer {
    pub fn new(params: AnalyzerParams) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &AnalyzerParams {
        &self.params
    }

    /// Load, decode and analyze an image file.
    pub fn analyze_path(&self, path: &Path) -> Result<AnalysisOutcome, AnalysisError> {
        let image = load_rgb_image(path)?;
        self.analyze_image(&image)
    }

    /// Decode and analyze an encoded image buffer.
    pub fn analyze_bytes(&self, bytes: &[u8]) -> Result<AnalysisOutcome, AnalysisError> {
        let image = decode_rgb_image(bytes)?;
        self.analyze_image(&image)
    }

    /// Full analysis of a decoded image, including the annotated artifact
    /// when enabled.
    pub fn analyze_image(&self, image: &RgbImage) -> Result<AnalysisOutcome, AnalysisError> {
        Ok(self.analyze_with_diagnostics(image)?.outcome)
    }

    /// Record computation only: no rendering, no encoding.
    pub fn assess(&self, image: &RgbImage) -> Result<Detection<Assessment>, AnalysisError> {
        let (detection, _) = self.assess_traced(image)?;
        Ok(detection)
    }

    /// Run the analysis and return the outcome with a per-stage trace.
    pub fn analyze_with_diagnostics(
        &self,
        image: &RgbImage,
    ) -> Result<AnalysisReport, AnalysisError> {
        let total_start = Instant::now();
        let (detection, mut trace) = self.assess_traced(image)?;

        let outcome = match detection {
            Detection::NoDefectDetected => Detection::NoDefectDetected,
            Detection::Detected(Assessment {
                mut record, region, ..
            }) => {
                let artifact = if self.params.annotation.enabled {
                    let format = self.params.annotation.format;
                    let artifact = trace.timings.time(Stage::Annotate, || {
                        encode_artifact(&render_annotation(image, &region, &record), format)
                    })?;
                    record.annotated_image = Some(artifact.suggested_name.clone());
                    Some(artifact)
                } else {
                    None
                };
                Detection::Detected(Analysis { record, artifact })
            }
        };

        trace.timings.total_ms = elapsed_ms(total_start);
        Ok(AnalysisReport { outcome, trace })
    }

    fn assess_traced(
        &self,
        image: &RgbImage,
    ) -> Result<(Detection<Assessment>, AnalysisTrace), AnalysisError> {
        let total_start = Instant::now();
        let context = AnalysisContext::for_image(image)?;
        let (width, height) = (context.width as usize, context.height as usize);
        debug!(
            "PotholeAnalyzer::assess start w={} h={} px/cm={:.3}",
            width, height, context.calibration.pixels_per_cm
        );
        let mut trace = AnalysisTrace::new(InputDescriptor {
            width: context.width,
            height: context.height,
        });

        let pre = trace
            .timings
            .time(Stage::Preprocess, || preprocess(image, &GAUSSIAN_5TAP));

        let edge = self.params.edge;
        let edges = trace.timings.time(Stage::Edges, || {
            detect_edges(pre.smoothed.as_view(), edge.low_threshold, edge.high_threshold)
        });
        let edge_ms = trace.timings.stage_ms(Stage::Edges).unwrap_or(0.0);
        let edge_stage =
            EdgeStage::from_detection(&edges, edge.low_threshold, edge.high_threshold, edge_ms);
        debug!(
            "edges: strong={} weak={} linked={}",
            edge_stage.strong_candidates, edge_stage.weak_candidates, edge_stage.edge_pixels
        );
        trace.edges = Some(edge_stage);

        let (mut contours, selected) = trace.timings.time(Stage::Contours, || {
            let contours = find_external_contours(&edges.edges);
            let selected = largest_by_area(&contours);
            (contours, selected)
        });
        let contour_ms = trace.timings.stage_ms(Stage::Contours).unwrap_or(0.0);
        trace.contours = Some(ContourStage {
            count: contours.len(),
            selected: selected.map(|idx| SelectedContour::new(idx, &contours[idx])),
            elapsed_ms: contour_ms,
        });

        let Some(idx) = selected else {
            debug!("contours: none found, no defect detected");
            trace.timings.total_ms = elapsed_ms(total_start);
            return Ok((Detection::NoDefectDetected, trace));
        };
        let region = contours.swap_remove(idx);
        debug!(
            "contours: {} found, selected #{} area={:.1}px perimeter={:.1}px",
            trace.contours.as_ref().map(|c| c.count).unwrap_or(0),
            idx,
            region.area_px,
            region.perimeter_px
        );

        let dims = trace
            .timings
            .time(Stage::Measure, || measure(&region, &context.calibration));

        let (depth, severity) = trace.timings.time(Stage::Severity, || {
            let mask = region_mask(&region, width, height);
            let depth = estimate_depth(&pre.gray, &mask);
            let severity = assess_severity(dims.area_cm2, depth.depth_cm, dims.perimeter_cm);
            (depth, severity)
        });
        debug!(
            "severity: area={} cm2 depth={} cm score={} class={}",
            dims.area_cm2, depth.depth_cm, severity.score, severity.severity
        );

        let record = MeasurementRecord {
            width_cm: dims.width_cm,
            height_cm: dims.height_cm,
            area_cm2: dims.area_cm2,
            perimeter_cm: dims.perimeter_cm,
            bounding_box: dims.bounding_box,
            depth_estimate_cm: depth.depth_cm,
            severity: severity.severity,
            confidence_score: severity.confidence,
            impact_score: impact_score(dims.area_cm2, depth.depth_cm),
            repair_priority: repair_priority(severity.severity),
            estimated_repair_cost: repair_cost(dims.area_cm2, depth.depth_cm),
            annotated_image: None,
        };

        trace.context = Some(context);
        trace.dimensions = Some(dims);
        trace.depth = Some(depth);
        trace.severity = Some(severity);
        trace.timings.total_ms = elapsed_ms(total_start);

        Ok((
            Detection::Detected(Assessment {
                record,
                region,
                context,
            }),
            trace,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Severity;
    use image::Rgb;

    fn dark_square(size: u32, x0: u32, y0: u32, side: u32) -> RgbImage {
        RgbImage::from_fn(size, size, |x, y| {
            if (x0..x0 + side).contains(&x) && (y0..y0 + side).contains(&y) {
                Rgb([30, 30, 30])
            } else {
                Rgb([210, 210, 210])
            }
        })
    }

    #[test]
    fn blank_image_has_no_defect() {
        let analyzer = PotholeAnalyzer::default();
        let img = RgbImage::from_pixel(64, 48, Rgb([120, 120, 120]));
        let out = analyzer.assess(&img).unwrap();
        assert!(!out.is_detected());
        let report = analyzer.analyze_with_diagnostics(&img).unwrap();
        assert!(!report.outcome.is_detected());
        assert_eq!(report.trace.contours.as_ref().unwrap().count, 0);
        assert!(report.trace.severity.is_none());
    }

    #[test]
    fn empty_image_is_an_input_error() {
        let analyzer = PotholeAnalyzer::default();
        let err = analyzer.assess(&RgbImage::new(0, 0)).unwrap_err();
        assert!(err.is_input_error());
    }

    #[test]
    fn square_record_is_consistent() {
        let analyzer = PotholeAnalyzer::default();
        let img = dark_square(200, 50, 60, 80);
        let assessment = analyzer.assess(&img).unwrap().detected().unwrap();
        let r = &assessment.record;
        assert_eq!(r.width_cm, 40.0);
        assert_eq!(r.height_cm, 40.0);
        assert_eq!(r.bounding_box.x, 49);
        assert_eq!(r.bounding_box.y, 59);
        assert!(r.depth_estimate_cm > 10.0 && r.depth_estimate_cm < 15.0);
        assert_eq!(r.severity, Severity::Critical);
        assert_eq!(r.repair_priority, 5);
        assert_eq!(r.impact_score, 10);
        assert!(r.annotated_image.is_none());
        assert_eq!(assessment.context.calibration.pixels_per_cm, 2.0);
    }

    #[test]
    fn annotation_can_be_disabled() {
        let mut params = AnalyzerParams::default();
        params.annotation.enabled = false;
        let analyzer = PotholeAnalyzer::new(params);
        let analysis = analyzer
            .analyze_image(&dark_square(120, 30, 30, 50))
            .unwrap()
            .detected()
            .unwrap();
        assert!(analysis.artifact.is_none());
        assert!(analysis.record.annotated_image.is_none());

        let analysis = PotholeAnalyzer::default()
            .analyze_image(&dark_square(120, 30, 30, 50))
            .unwrap()
            .detected()
            .unwrap();
        let artifact = analysis.artifact.unwrap();
        assert_eq!(analysis.record.annotated_image.as_deref(), Some("processed.jpg"));
        assert_eq!((artifact.width, artifact.height), (120, 120));
    }
}
