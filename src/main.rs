use image::{Rgb, RgbImage};
use pothole_analyzer::{AnalyzerParams, Detection, PotholeAnalyzer};

fn main() {
    // Demo: a dark elliptical patch on light asphalt.
    let (w, h) = (640u32, 480u32);
    let img = RgbImage::from_fn(w, h, |x, y| {
        let dx = (x as f32 - 320.0) / 140.0;
        let dy = (y as f32 - 260.0) / 90.0;
        if dx * dx + dy * dy <= 1.0 {
            Rgb([45, 42, 40])
        } else {
            Rgb([175, 172, 168])
        }
    });

    let analyzer = PotholeAnalyzer::new(AnalyzerParams::default());
    let report = match analyzer.analyze_with_diagnostics(&img) {
        Ok(report) => report,
        Err(err) => {
            eprintln!("Error: {err}");
            std::process::exit(1);
        }
    };

    match &report.outcome {
        Detection::Detected(analysis) => {
            let r = &analysis.record;
            println!(
                "size={}x{}cm area={}cm2 depth={}cm severity={} confidence={:.2}",
                r.width_cm, r.height_cm, r.area_cm2, r.depth_estimate_cm, r.severity, r.confidence_score
            );
            println!(
                "impact={} priority={} cost={:.2}",
                r.impact_score, r.repair_priority, r.estimated_repair_cost
            );
        }
        Detection::NoDefectDetected => println!("No pothole detected"),
    }
    println!("{}", report.trace.summary());
}
