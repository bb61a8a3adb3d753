//! Wall-clock cost of each analysis stage.
use serde::{Deserialize, Serialize};
use std::time::Instant;

/// Pipeline stages, in execution order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Stage {
    Preprocess,
    Edges,
    Contours,
    Measure,
    Severity,
    Annotate,
}

impl Stage {
    pub fn label(&self) -> &'static str {
        match self {
            Stage::Preprocess => "preprocess",
            Stage::Edges => "edges",
            Stage::Contours => "contours",
            Stage::Measure => "measure",
            Stage::Severity => "severity",
            Stage::Annotate => "annotate",
        }
    }
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StageTiming {
    pub stage: Stage,
    pub elapsed_ms: f64,
}

/// Per-stage milliseconds of one call. Stages skipped by an early
/// `NoDefectDetected` exit are simply absent.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimingBreakdown {
    pub total_ms: f64,
    pub stages: Vec<StageTiming>,
}

impl TimingBreakdown {
    /// Run `f`, recording its duration under `stage`.
    pub fn time<T>(&mut self, stage: Stage, f: impl FnOnce() -> T) -> T {
        let start = Instant::now();
        let out = f();
        self.stages.push(StageTiming {
            stage,
            elapsed_ms: elapsed_ms(start),
        });
        out
    }

    pub fn stage_ms(&self, stage: Stage) -> Option<f64> {
        self.stages
            .iter()
            .find(|s| s.stage == stage)
            .map(|s| s.elapsed_ms)
    }

    /// Sum of the recorded stages; at most `total_ms` once the total is set.
    pub fn stages_ms(&self) -> f64 {
        self.stages.iter().map(|s| s.elapsed_ms).sum()
    }
}

/// Milliseconds elapsed since `start`.
pub fn elapsed_ms(start: Instant) -> f64 {
    start.elapsed().as_secs_f64() * 1000.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timed_stages_are_recorded_in_order() {
        let mut t = TimingBreakdown::default();
        let v = t.time(Stage::Preprocess, || 41 + 1);
        assert_eq!(v, 42);
        t.time(Stage::Edges, || ());
        let order: Vec<Stage> = t.stages.iter().map(|s| s.stage).collect();
        assert_eq!(order, vec![Stage::Preprocess, Stage::Edges]);
        assert!(t.stage_ms(Stage::Edges).is_some());
        assert!(t.stage_ms(Stage::Annotate).is_none());
        assert!(t.stages_ms() >= 0.0);
    }

    #[test]
    fn stages_serialize_as_lowercase_labels() {
        let s = StageTiming {
            stage: Stage::Contours,
            elapsed_ms: 1.5,
        };
        let json = serde_json::to_value(s).unwrap();
        assert_eq!(json["stage"], Stage::Contours.label());
        assert_eq!(json["elapsedMs"], 1.5);
    }
}
