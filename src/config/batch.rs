use crate::analyzer::AnalyzerParams;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// File extensions picked up when scanning `input_dir`.
pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "bmp", "tif", "tiff", "webp"];

/// Config for `batch_report`.
#[derive(Debug, Deserialize)]
pub struct BatchToolConfig {
    /// Explicit input files.
    #[serde(default)]
    pub inputs: Vec<PathBuf>,
    /// Directory scanned (non-recursively) for images.
    #[serde(default)]
    pub input_dir: Option<PathBuf>,
    /// Receives annotated images and `summary.json`.
    pub output_dir: PathBuf,
    #[serde(default)]
    pub params: AnalyzerParams,
}

impl BatchToolConfig {
    /// Explicit inputs followed by the sorted images of `input_dir`.
    pub fn resolve_inputs(&self) -> Result<Vec<PathBuf>, String> {
        let mut inputs = self.inputs.clone();
        if let Some(dir) = &self.input_dir {
            let entries = fs::read_dir(dir)
                .map_err(|e| format!("Failed to list {}: {e}", dir.display()))?;
            let mut found: Vec<PathBuf> = entries
                .filter_map(|entry| entry.ok().map(|e| e.path()))
                .filter(|p| p.is_file() && has_image_extension(p))
                .collect();
            found.sort();
            inputs.extend(found);
        }
        if inputs.is_empty() {
            return Err("Batch config lists no input images".to_string());
        }
        Ok(inputs)
    }
}

fn has_image_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| IMAGE_EXTENSIONS.contains(&e.to_ascii_lowercase().as_str()))
        .unwrap_or(false)
}

pub fn load_config(path: &Path) -> Result<BatchToolConfig, String> {
    let data = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read config {}: {e}", path.display()))?;
    serde_json::from_str(&data)
        .map_err(|e| format!("Failed to parse config {}: {e}", path.display()))
}
