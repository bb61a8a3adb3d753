use log::{info, warn};
use pothole_analyzer::config::report::load_config;
use pothole_analyzer::image::io::{load_rgb_image, write_json_file};
use pothole_analyzer::sink::{DirectorySink, ImageSink};
use pothole_analyzer::{Detection, MeasurementRecord, PotholeAnalyzer};
use std::env;
use std::path::Path;

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

    let analyzer = PotholeAnalyzer::new(config.params.clone());
    let image = load_rgb_image(&config.input).map_err(|e| e.to_string())?;
    info!(
        "analyzing {} ({}x{})",
        config.input.display(),
        image.width(),
        image.height()
    );
    let report = analyzer
        .analyze_with_diagnostics(&image)
        .map_err(|e| e.to_string())?;

    if let Some(path) = &config.output.trace_json {
        write_json_file(path, &report).map_err(|e| e.to_string())?;
        info!("trace written to {}", path.display());
    }

    match report.outcome {
        Detection::NoDefectDetected => {
            let outcome: Detection<MeasurementRecord> = Detection::NoDefectDetected;
            write_json_file(&config.output.record_json, &outcome).map_err(|e| e.to_string())?;
            println!("No pothole detected");
        }
        Detection::Detected(analysis) => {
            let mut record = analysis.record;
            match (&config.output.image_dir, &analysis.artifact) {
                (Some(dir), Some(artifact)) => {
                    let stored = DirectorySink::new(dir)
                        .store(&artifact.suggested_name, &artifact.bytes)
                        .map_err(|e| e.to_string())?;
                    info!("annotated image written to {stored}");
                    record.annotated_image = Some(stored);
                }
                (Some(_), None) => warn!("image_dir set but annotation is disabled"),
                _ => {}
            }
            write_json_file(&config.output.record_json, &record).map_err(|e| e.to_string())?;
            print_summary(&record);
        }
    }
    println!("{}", report.trace.summary());
    println!("Record written to {}", config.output.record_json.display());
    Ok(())
}

fn print_summary(r: &MeasurementRecord) {
    println!("Pothole detected");
    println!("  size:       {} x {} cm", r.width_cm, r.height_cm);
    println!("  area:       {} cm2", r.area_cm2);
    println!("  perimeter:  {} cm", r.perimeter_cm);
    println!("  depth:      ~{} cm", r.depth_estimate_cm);
    println!(
        "  severity:   {} (confidence {:.2})",
        r.severity, r.confidence_score
    );
    println!(
        "  impact:     {}/10, priority {}",
        r.impact_score, r.repair_priority
    );
    println!("  est. cost:  {:.2}", r.estimated_repair_cost);
}

fn usage() -> String {
    let program = env::args()
        .next()
        .unwrap_or_else(|| "pothole_report".to_string());
    format!("Usage: {program} <config.json>")
}
