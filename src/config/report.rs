use crate::analyzer::AnalyzerParams;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Config for `pothole_report`: one image in, record (and optionally trace
/// and annotated image) out.
#[derive(Debug, Deserialize)]
pub struct ReportToolConfig {
    pub input: PathBuf,
    #[serde(default)]
    pub params: AnalyzerParams,
    pub output: ReportOutputConfig,
}

#[derive(Debug, Deserialize)]
pub struct ReportOutputConfig {
    /// Measurement record JSON.
    pub record_json: PathBuf,
    /// Full diagnostics report JSON.
    #[serde(default)]
    pub trace_json: Option<PathBuf>,
    /// Directory receiving the annotated image.
    #[serde(default)]
    pub image_dir: Option<PathBuf>,
}

pub fn load_config(path: &Path) -> Result<ReportToolConfig, String> {
    let data = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read config {}: {e}", path.display()))?;
    serde_json::from_str(&data)
        .map_err(|e| format!("Failed to parse config {}: {e}", path.display()))
}
