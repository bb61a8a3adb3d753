//! Error type for the analysis boundary.
//!
//! Only input failures (unreadable, undecodable or empty images) abort an
//! analysis. "No pothole in frame" is an outcome, not an error, and lives in
//! [`AnalysisOutcome`](crate::types::AnalysisOutcome). Encode and write
//! variants are produced by the artifact helpers used by callers.

use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq)]
pub enum AnalysisError {
    /// The image file could not be read from disk.
    Read { path: PathBuf, message: String },
    /// The bytes are not a decodable image. `origin` names the path or buffer.
    Decode { origin: String, message: String },
    /// The decoded image has no pixels.
    EmptyImage { width: u32, height: u32 },
    /// The annotated artifact could not be encoded.
    Encode(String),
    /// An output (artifact, JSON) could not be written.
    Write { path: PathBuf, message: String },
}

impl AnalysisError {
    /// True for the fatal input errors that cross the core boundary.
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            Self::Read { .. } | Self::Decode { .. } | Self::EmptyImage { .. }
        )
    }
}

impl std::fmt::Display for AnalysisError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Read { path, message } => {
                write!(f, "failed to read {}: {}", path.display(), message)
            }
            Self::Decode { origin, message } => {
                write!(f, "could not decode image from {}: {}", origin, message)
            }
            Self::EmptyImage { width, height } => {
                write!(f, "image has no pixels ({}x{})", width, height)
            }
            Self::Encode(msg) => write!(f, "failed to encode annotated image: {}", msg),
            Self::Write { path, message } => {
                write!(f, "failed to write {}: {}", path.display(), message)
            }
        }
    }
}

impl std::error::Error for AnalysisError {}
