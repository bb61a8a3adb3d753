//! Destinations for encoded annotated images.
//!
//! The analyzer never writes its artifact itself; callers hand it to an
//! [`ImageSink`] and keep the returned reference.
use crate::error::AnalysisError;
use std::fs;
use std::path::{Path, PathBuf};

/// Accepts encoded image bytes and returns a reference to the stored copy.
pub trait ImageSink {
    fn store(&self, suggested_name: &str, bytes: &[u8]) -> Result<String, AnalysisError>;
}

/// Writes artifacts as files under a root directory.
#[derive(Clone, Debug)]
pub struct DirectorySink {
    root: PathBuf,
}

impl DirectorySink {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl ImageSink for DirectorySink {
    /// Creates the root as needed and returns the written path.
    fn store(&self, suggested_name: &str, bytes: &[u8]) -> Result<String, AnalysisError> {
        let file_name = Path::new(suggested_name)
            .file_name()
            .ok_or_else(|| AnalysisError::Write {
                path: self.root.join(suggested_name),
                message: "artifact name has no file component".to_string(),
            })?;
        fs::create_dir_all(&self.root).map_err(|e| AnalysisError::Write {
            path: self.root.clone(),
            message: e.to_string(),
        })?;
        let path = self.root.join(file_name);
        fs::write(&path, bytes).map_err(|e| AnalysisError::Write {
            path: path.clone(),
            message: e.to_string(),
        })?;
        Ok(path.display().to_string())
    }
}
