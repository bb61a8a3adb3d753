//! Impact score, repair priority and cost estimate.
use crate::measure::round2;
use crate::types::Severity;

pub const MIN_IMPACT: u8 = 1;
pub const MAX_IMPACT: u8 = 10;

/// Flat call-out cost before size and depth terms.
pub const BASE_REPAIR_COST: f64 = 50.0;
pub const COST_PER_CM2: f64 = 0.5;
pub const COST_PER_CM_DEPTH: f64 = 10.0;

/// `floor(area/100 + depth/2)` clamped into `1..=10`.
pub fn impact_score(area_cm2: f64, depth_cm: f64) -> u8 {
    let raw = (area_cm2 / 100.0 + depth_cm / 2.0).floor();
    raw.clamp(MIN_IMPACT as f64, MAX_IMPACT as f64) as u8
}

pub fn repair_priority(severity: Severity) -> u8 {
    match severity {
        Severity::Low => 2,
        Severity::Medium => 3,
        Severity::High => 4,
        Severity::Critical => 5,
    }
}

pub fn repair_cost(area_cm2: f64, depth_cm: f64) -> f64 {
    round2(BASE_REPAIR_COST + area_cm2 * COST_PER_CM2 + depth_cm * COST_PER_CM_DEPTH)
}
