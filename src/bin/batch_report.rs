use log::{error, info};
use pothole_analyzer::config::batch::load_config;
use pothole_analyzer::image::io::write_json_file;
use pothole_analyzer::sink::{DirectorySink, ImageSink};
use pothole_analyzer::{AnalysisError, Detection, MeasurementRecord, PotholeAnalyzer};
use rayon::prelude::*;
use serde::Serialize;
use std::env;
use std::path::{Path, PathBuf};
use std::time::Instant;

#[derive(Debug, Serialize)]
#[serde(rename_all = "snake_case")]
enum EntryStatus {
    Detected,
    NoDefect,
    Error,
}

#[derive(Debug, Serialize)]
struct BatchEntry {
    input: PathBuf,
    status: EntryStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    record: Option<MeasurementRecord>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

#[derive(Debug, Serialize)]
struct BatchSummary {
    total: usize,
    detected: usize,
    no_defect: usize,
    errors: usize,
    elapsed_ms: f64,
    entries: Vec<BatchEntry>,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    if let Err(err) = run() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let config_path = env::args().nth(1).ok_or_else(usage)?;
    let config = load_config(Path::new(&config_path))?;
    let inputs = config.resolve_inputs()?;
    info!("analyzing {} images", inputs.len());

    let analyzer = PotholeAnalyzer::new(config.params.clone());
    let sink = DirectorySink::new(&config.output_dir);
    let start = Instant::now();

    let entries: Vec<BatchEntry> = inputs
        .par_iter()
        .enumerate()
        .map(|(idx, input)| match analyze_one(&analyzer, &sink, idx, input) {
            Ok(Some(record)) => BatchEntry {
                input: input.clone(),
                status: EntryStatus::Detected,
                record: Some(record),
                error: None,
            },
            Ok(None) => BatchEntry {
                input: input.clone(),
                status: EntryStatus::NoDefect,
                record: None,
                error: None,
            },
            Err(err) => {
                error!("{}: {}", input.display(), err);
                BatchEntry {
                    input: input.clone(),
                    status: EntryStatus::Error,
                    record: None,
                    error: Some(err.to_string()),
                }
            }
        })
        .collect();

    let count = |s: fn(&EntryStatus) -> bool| entries.iter().filter(|e| s(&e.status)).count();
    let summary = BatchSummary {
        total: entries.len(),
        detected: count(|s| matches!(s, EntryStatus::Detected)),
        no_defect: count(|s| matches!(s, EntryStatus::NoDefect)),
        errors: count(|s| matches!(s, EntryStatus::Error)),
        elapsed_ms: start.elapsed().as_secs_f64() * 1000.0,
        entries,
    };

    let summary_path = config.output_dir.join("summary.json");
    write_json_file(&summary_path, &summary).map_err(|e| e.to_string())?;
    println!(
        "{} images: {} detected, {} without defect, {} failed ({:.1} ms)",
        summary.total, summary.detected, summary.no_defect, summary.errors, summary.elapsed_ms
    );
    println!("Summary written to {}", summary_path.display());
    Ok(())
}

fn analyze_one(
    analyzer: &PotholeAnalyzer,
    sink: &DirectorySink,
    idx: usize,
    input: &Path,
) -> Result<Option<MeasurementRecord>, AnalysisError> {
    let analysis = match analyzer.analyze_path(input)? {
        Detection::Detected(analysis) => analysis,
        Detection::NoDefectDetected => {
            info!("{}: no pothole detected", input.display());
            return Ok(None);
        }
    };
    let mut record = analysis.record;
    if let Some(artifact) = &analysis.artifact {
        let stem = input
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("image");
        let name = format!("{idx:04}_{stem}_{}", artifact.suggested_name);
        record.annotated_image = Some(sink.store(&name, &artifact.bytes)?);
    }
    info!("{}: {} severity", input.display(), record.severity);
    Ok(Some(record))
}

fn usage() -> String {
    let program = env::args()
        .next()
        .unwrap_or_else(|| "batch_report".to_string());
    format!("Usage: {program} <config.json>")
}
