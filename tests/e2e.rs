mod common;

use approx::assert_abs_diff_eq;
use common::synthetic_image::{blank_rgb, dark_disc_rgb, dark_rectangle_rgb};
use image::ColorType;
use pothole_analyzer::diagnostics::Stage;
use pothole_analyzer::image::io::encode_rgb_image;
use pothole_analyzer::{
    AnalysisError, AnalyzerParams, ArtifactFormat, Detection, PotholeAnalyzer, Severity,
};
use rayon::prelude::*;

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

#[test]
fn blank_image_reports_no_defect() {
    init_logging();
    let analyzer = PotholeAnalyzer::default();
    for value in [0u8, 128, 255] {
        let outcome = analyzer.analyze_image(&blank_rgb(320, 240, value)).unwrap();
        assert!(
            matches!(outcome, Detection::NoDefectDetected),
            "uniform value {value} produced a record"
        );
    }
}

#[test]
fn rectangle_dimensions_follow_height_calibration() {
    init_logging();
    let analyzer = PotholeAnalyzer::default();
    // factor = 300 / 100 = 3 px per cm
    let img = dark_rectangle_rgb(400, 300, 140, 100, 120, 90);
    let report = analyzer.analyze_with_diagnostics(&img).unwrap();
    let analysis = report.outcome.as_detected().expect("rectangle must be detected");
    let r = &analysis.record;

    assert_abs_diff_eq!(r.width_cm, 40.0, epsilon = 0.01);
    assert_abs_diff_eq!(r.height_cm, 30.0, epsilon = 0.01);
    assert_abs_diff_eq!(r.area_cm2, 1200.0, epsilon = 12.0);
    assert!(r.depth_estimate_cm > 10.0 && r.depth_estimate_cm < 15.0);
    assert_eq!(r.severity, Severity::Critical);
    assert_eq!(r.repair_priority, 5);
    assert_eq!(r.impact_score, 10);

    let severity = report.trace.severity.expect("severity stage traced");
    let expected_conf = round2((severity.score as f64 / 100.0).min(0.95));
    assert_eq!(r.confidence_score, expected_conf);
    assert!((0.0..=0.95).contains(&r.confidence_score));

    let expected_cost = round2(50.0 + r.area_cm2 * 0.5 + r.depth_estimate_cm * 10.0);
    assert_abs_diff_eq!(r.estimated_repair_cost, expected_cost, epsilon = 1e-9);
}

#[test]
fn scale_tracks_image_height() {
    init_logging();
    let analyzer = PotholeAnalyzer::default();
    for (w, h, rw, rh) in [(300u32, 200u32, 60u32, 40u32), (500, 500, 100, 150)] {
        let img = dark_rectangle_rgb(w, h, 50, 30, rw, rh);
        let assessment = analyzer.assess(&img).unwrap().detected().unwrap();
        let factor = h as f64 / 100.0;
        assert_abs_diff_eq!(assessment.record.width_cm, rw as f64 / factor, epsilon = 0.01);
        assert_abs_diff_eq!(assessment.record.height_cm, rh as f64 / factor, epsilon = 0.01);
        assert_abs_diff_eq!(assessment.context.calibration.pixels_per_cm, factor);
    }
}

#[test]
fn disc_is_round_and_scored_as_regular() {
    init_logging();
    let analyzer = PotholeAnalyzer::default();
    let img = dark_disc_rgb(400, 400, 200.0, 200.0, 60.0);
    let report = analyzer.analyze_with_diagnostics(&img).unwrap();
    let r = &report.outcome.as_detected().unwrap().record;
    // 4 px per cm: radius 15 cm
    let expected_area = std::f64::consts::PI * 15.0 * 15.0;
    assert!((r.area_cm2 - expected_area).abs() / expected_area < 0.1);
    let breakdown = report.trace.severity.unwrap().breakdown;
    assert!(breakdown.circularity > 0.7, "circularity {}", breakdown.circularity);
    assert_eq!(breakdown.shape_points, 5);
}

#[test]
fn bytes_and_image_entry_points_agree() {
    init_logging();
    let mut params = AnalyzerParams::default();
    params.annotation.enabled = false;
    let analyzer = PotholeAnalyzer::new(params);
    let img = dark_rectangle_rgb(240, 180, 60, 50, 70, 40);
    let png = encode_rgb_image(&img, ArtifactFormat::Png).unwrap();

    let direct = analyzer.analyze_image(&img).unwrap().detected().unwrap();
    let decoded = analyzer.analyze_bytes(&png).unwrap().detected().unwrap();
    assert_eq!(direct.record, decoded.record);
}

#[test]
fn unreadable_inputs_are_errors() {
    init_logging();
    let analyzer = PotholeAnalyzer::default();
    let err = analyzer.analyze_bytes(b"definitely not an image").unwrap_err();
    assert!(matches!(err, AnalysisError::Decode { .. }));
    assert!(err.is_input_error());

    let err = analyzer
        .analyze_path(std::path::Path::new("/nonexistent/road.jpg"))
        .unwrap_err();
    assert!(matches!(err, AnalysisError::Read { .. }));
}

#[test]
fn annotation_preserves_dimensions_and_color_depth() {
    init_logging();
    for format in [ArtifactFormat::Jpeg, ArtifactFormat::Png] {
        let mut params = AnalyzerParams::default();
        params.annotation.format = format;
        let analyzer = PotholeAnalyzer::new(params);
        let img = dark_rectangle_rgb(320, 240, 100, 90, 80, 60);
        let analysis = analyzer.analyze_image(&img).unwrap().detected().unwrap();
        let artifact = analysis.artifact.expect("annotation enabled by default");
        assert_eq!(artifact.format, format);

        let decoded = image::load_from_memory(&artifact.bytes).unwrap();
        assert_eq!((decoded.width(), decoded.height()), img.dimensions());
        assert_eq!(decoded.color(), ColorType::Rgb8);
        assert_eq!(
            analysis.record.annotated_image.as_deref(),
            Some(artifact.suggested_name.as_str())
        );
    }
}

#[test]
fn concurrent_analyses_match_sequential() {
    init_logging();
    let analyzer = PotholeAnalyzer::default();
    let images: Vec<_> = (0..6u32)
        .map(|i| dark_rectangle_rgb(300, 240, 40 + i * 10, 50, 60 + i * 15, 50 + i * 5))
        .collect();
    let sequential: Vec<_> = images
        .iter()
        .map(|img| analyzer.assess(img).unwrap().detected().unwrap().record)
        .collect();
    let parallel: Vec<_> = images
        .par_iter()
        .map(|img| analyzer.assess(img).unwrap().detected().unwrap().record)
        .collect();
    assert_eq!(sequential, parallel);
}

#[test]
fn trace_serializes_with_camel_case_keys() {
    init_logging();
    let analyzer = PotholeAnalyzer::default();
    let img = dark_rectangle_rgb(200, 150, 50, 40, 60, 50);
    let report = analyzer.analyze_with_diagnostics(&img).unwrap();
    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["outcome"]["status"], "detected");
    assert!(json["trace"]["edges"]["edgePixels"].as_u64().unwrap() > 0);
    assert!(json["trace"]["contours"]["selected"]["areaPx"].is_number());
    assert!(json["outcome"]["record"]["width_cm"].is_number());
    assert!(report.trace.timings.stage_ms(Stage::Edges).is_some());
    assert!(report.trace.timings.stage_ms(Stage::Annotate).is_some());
    assert!(report.trace.timings.stages_ms() <= report.trace.timings.total_ms);

    let blank = analyzer.analyze_with_diagnostics(&blank_rgb(200, 150, 90)).unwrap();
    assert!(blank.trace.timings.stage_ms(Stage::Contours).is_some());
    assert!(blank.trace.timings.stage_ms(Stage::Measure).is_none());
}
