//! I/O helpers for color input, encoded artifacts and JSON.
//!
//! - `load_rgb_image` / `decode_rgb_image`: read a PNG/JPEG/etc. into an
//!   8-bit RGB buffer, surfacing failures as input errors.
//! - `encode_rgb_image`: encode an RGB buffer into JPEG or PNG bytes.
//! - `write_json_file`: pretty-print a serializable value to disk.
use crate::error::AnalysisError;
use crate::types::ArtifactFormat;
use image::RgbImage;
use serde::Serialize;
use std::fs;
use std::io::Cursor;
use std::path::Path;

/// Read an image file from disk and convert it to 8-bit RGB.
pub fn load_rgb_image(path: &Path) -> Result<RgbImage, AnalysisError> {
    let bytes = fs::read(path).map_err(|e| AnalysisError::Read {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    decode_with_origin(&bytes, &path.display().to_string())
}

/// Decode an in-memory encoded image (format sniffed from content).
pub fn decode_rgb_image(bytes: &[u8]) -> Result<RgbImage, AnalysisError> {
    decode_with_origin(bytes, "<memory buffer>")
}

fn decode_with_origin(bytes: &[u8], origin: &str) -> Result<RgbImage, AnalysisError> {
    let img = image::load_from_memory(bytes).map_err(|e| AnalysisError::Decode {
        origin: origin.to_string(),
        message: e.to_string(),
    })?;
    Ok(img.into_rgb8())
}

/// Encode an RGB buffer in the requested container format.
pub fn encode_rgb_image(image: &RgbImage, format: ArtifactFormat) -> Result<Vec<u8>, AnalysisError> {
    let mut buffer = Cursor::new(Vec::new());
    image
        .write_to(&mut buffer, format.image_format())
        .map_err(|e| AnalysisError::Encode(e.to_string()))?;
    Ok(buffer.into_inner())
}

/// Serialize a value as pretty JSON to `path`, creating parent directories.
pub fn write_json_file<T: Serialize>(path: &Path, value: &T) -> Result<(), AnalysisError> {
    ensure_parent_dir(path)?;
    let json = serde_json::to_string_pretty(value).map_err(|e| AnalysisError::Write {
        path: path.to_path_buf(),
        message: format!("JSON serialization failed: {e}"),
    })?;
    fs::write(path, json).map_err(|e| AnalysisError::Write {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

fn ensure_parent_dir(path: &Path) -> Result<(), AnalysisError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|e| AnalysisError::Write {
                path: parent.to_path_buf(),
                message: e.to_string(),
            })?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    #[test]
    fn garbage_bytes_are_a_decode_error() {
        let err = decode_rgb_image(b"definitely not an image").unwrap_err();
        assert!(matches!(err, AnalysisError::Decode { .. }));
        assert!(err.is_input_error());
    }

    #[test]
    fn missing_file_is_a_read_error() {
        let err = load_rgb_image(Path::new("/nonexistent/pothole.jpg")).unwrap_err();
        assert!(matches!(err, AnalysisError::Read { .. }));
    }

    #[test]
    fn png_encoding_decodes_back_to_same_pixels() {
        let img = RgbImage::from_pixel(8, 6, Rgb([10, 20, 30]));
        let bytes = encode_rgb_image(&img, ArtifactFormat::Png).unwrap();
        let back = decode_rgb_image(&bytes).unwrap();
        assert_eq!(back.dimensions(), (8, 6));
        assert_eq!(back.get_pixel(3, 3), &Rgb([10, 20, 30]));
    }
}
