use crate::error::AnalysisError;
use crate::measure::Calibration;
use image::RgbImage;
use serde::Serialize;

/// Per-call state derived from the input image.
///
/// Built fresh for every analysis; the analyzer itself holds no
/// image-dependent state.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisContext {
    pub width: u32,
    pub height: u32,
    pub calibration: Calibration,
}

impl AnalysisContext {
    /// Fails with [`AnalysisError::EmptyImage`] for a zero-sized image.
    pub fn for_image(image: &RgbImage) -> Result<Self, AnalysisError> {
        let (width, height) = image.dimensions();
        let empty = AnalysisError::EmptyImage { width, height };
        if width == 0 {
            return Err(empty);
        }
        let calibration = Calibration::from_image_height(height).ok_or(empty)?;
        Ok(Self {
            width,
            height,
            calibration,
        })
    }
}
