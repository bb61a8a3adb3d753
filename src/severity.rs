//! Additive severity score and its class / confidence.
//!
//! Each factor is an ordered threshold ladder: the first row whose exclusive
//! upper bound exceeds the input yields its points, otherwise the top value.
use crate::measure::round2;
use crate::types::Severity;
use log::debug;
use serde::Serialize;
use std::f64::consts::PI;

/// Perimeters at or below this are treated as degenerate.
pub const MIN_PERIMETER_CM: f64 = 1e-6;

/// Confidence never exceeds this value.
pub const MAX_CONFIDENCE: f64 = 0.95;

/// Ordered `(exclusive upper bound, value)` rows plus a fallback top value.
#[derive(Clone, Copy, Debug)]
pub struct ThresholdTable<T: Copy + 'static> {
    pub bands: &'static [(f64, T)],
    pub top: T,
}

impl<T: Copy + 'static> ThresholdTable<T> {
    pub fn lookup(&self, value: f64) -> T {
        self.bands
            .iter()
            .find(|(bound, _)| value < *bound)
            .map(|&(_, v)| v)
            .unwrap_or(self.top)
    }
}

/// Area points, `cm²`.
pub const AREA_POINTS: ThresholdTable<u8> = ThresholdTable {
    bands: &[(100.0, 10), (300.0, 20), (600.0, 30)],
    top: 40,
};

/// Depth points, `cm`.
pub const DEPTH_POINTS: ThresholdTable<u8> = ThresholdTable {
    bands: &[(2.0, 5), (5.0, 15), (8.0, 25)],
    top: 40,
};

/// Shape points by circularity. Irregular outlines score higher.
pub const SHAPE_POINTS: ThresholdTable<u8> = ThresholdTable {
    bands: &[(0.5, 15), (0.7, 10)],
    top: 5,
};

/// Class by total score.
pub const SEVERITY_CLASSES: ThresholdTable<Severity> = ThresholdTable {
    bands: &[
        (30.0, Severity::Low),
        (50.0, Severity::Medium),
        (70.0, Severity::High),
    ],
    top: Severity::Critical,
};

/// Per-factor contributions to the score.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SeverityBreakdown {
    pub area_points: u8,
    pub depth_points: u8,
    pub shape_points: u8,
    pub circularity: f64,
    /// Set when the perimeter was too small to compute circularity.
    pub degenerate_perimeter: bool,
}

/// Severity class and confidence, always produced together.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SeverityAssessment {
    pub severity: Severity,
    pub score: u8,
    pub confidence: f64,
    pub breakdown: SeverityBreakdown,
}

/// `4π·A / P²`; `None` for a degenerate perimeter.
pub fn circularity(area_cm2: f64, perimeter_cm: f64) -> Option<f64> {
    (perimeter_cm > MIN_PERIMETER_CM).then(|| 4.0 * PI * area_cm2 / (perimeter_cm * perimeter_cm))
}

/// `min(score / 100, 0.95)` rounded to two decimals.
pub fn confidence_from_score(score: u8) -> f64 {
    round2((score as f64 / 100.0).min(MAX_CONFIDENCE))
}

pub fn classify(score: u8) -> Severity {
    SEVERITY_CLASSES.lookup(score as f64)
}

pub fn assess_severity(area_cm2: f64, depth_cm: f64, perimeter_cm: f64) -> SeverityAssessment {
    // A point-like region has no outline to call irregular: it takes the
    // regular-shape row.
    let (circ, shape_points, degenerate) = match circularity(area_cm2, perimeter_cm) {
        Some(c) => (c, SHAPE_POINTS.lookup(c), false),
        None => {
            debug!(
                "severity: perimeter {perimeter_cm} cm is degenerate, shape scored {}",
                SHAPE_POINTS.top
            );
            (0.0, SHAPE_POINTS.top, true)
        }
    };

    let breakdown = SeverityBreakdown {
        area_points: AREA_POINTS.lookup(area_cm2),
        depth_points: DEPTH_POINTS.lookup(depth_cm),
        shape_points,
        circularity: circ,
        degenerate_perimeter: degenerate,
    };
    let score = breakdown.area_points + breakdown.depth_points + breakdown.shape_points;

    SeverityAssessment {
        severity: classify(score),
        score,
        confidence: confidence_from_score(score),
        breakdown,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn ladder_bounds_are_exclusive() {
        assert_eq!(AREA_POINTS.lookup(99.99), 10);
        assert_eq!(AREA_POINTS.lookup(100.0), 20);
        assert_eq!(AREA_POINTS.lookup(600.0), 40);
        assert_eq!(DEPTH_POINTS.lookup(4.99), 15);
        assert_eq!(DEPTH_POINTS.lookup(5.0), 25);
        assert_eq!(DEPTH_POINTS.lookup(0.0), 5);
        assert_eq!(SHAPE_POINTS.lookup(0.5), 10);
        assert_eq!(SHAPE_POINTS.lookup(0.7), 5);
        assert_eq!(classify(29), Severity::Low);
        assert_eq!(classify(30), Severity::Medium);
        assert_eq!(classify(69), Severity::High);
        assert_eq!(classify(70), Severity::Critical);
    }

    #[test]
    fn circle_and_square_circularity() {
        let r = 10.0;
        let c = circularity(PI * r * r, 2.0 * PI * r).unwrap();
        assert_abs_diff_eq!(c, 1.0, epsilon = 1e-12);
        let s = circularity(100.0, 40.0).unwrap();
        assert_abs_diff_eq!(s, PI / 4.0, epsilon = 1e-12);
        assert!(circularity(5.0, 0.0).is_none());
    }

    #[test]
    fn degenerate_perimeter_takes_regular_shape_points() {
        let a = assess_severity(0.0, 1.0, 0.0);
        assert!(a.breakdown.degenerate_perimeter);
        assert_eq!(a.breakdown.shape_points, SHAPE_POINTS.top);
        assert_eq!(a.score, 10 + 5 + 5);
        assert_eq!(a.severity, Severity::Low);
        assert_eq!(a.confidence, 0.2);

        let tiny = assess_severity(50.0, 1.0, 1e-9);
        assert!(tiny.breakdown.degenerate_perimeter);
        assert_eq!(tiny.breakdown.shape_points, 5);
    }

    #[test]
    fn severity_is_monotonic_in_area_and_depth() {
        let circ_perimeter = |area: f64| 2.0 * (PI * area).sqrt();
        for depth in [0.5, 3.0, 6.0, 12.0] {
            let mut prev = Severity::Low;
            for area in (0..80).map(|i| i as f64 * 12.5 + 1.0) {
                let s = assess_severity(area, depth, circ_perimeter(area)).severity;
                assert!(s >= prev, "area {area} depth {depth}");
                prev = s;
            }
        }
        // Square outline fixes circularity at π/4 while area varies.
        for area in [50.0, 250.0, 500.0, 900.0] {
            let perimeter = 4.0 * f64::sqrt(area);
            let mut prev = Severity::Low;
            for depth in (0..60).map(|i| i as f64 * 0.25) {
                let s = assess_severity(area, depth, perimeter).severity;
                assert!(s >= prev, "area {area} depth {depth}");
                prev = s;
            }
        }
    }

    #[test]
    fn confidence_tracks_score_and_caps() {
        for score in 0..=100u8 {
            let c = confidence_from_score(score);
            assert!((0.0..=MAX_CONFIDENCE).contains(&c));
            let expected = ((score as f64 / 100.0).min(0.95) * 100.0).round() / 100.0;
            assert_eq!(c, expected);
        }
        let a = assess_severity(1000.0, 10.0, 500.0);
        assert_eq!(a.score, 95);
        assert_eq!(a.severity, Severity::Critical);
        assert_eq!(a.confidence, 0.95);
    }
}
