//! Preprocessor: RGB → luma, then fixed 5×5 Gaussian smoothing.
//!
//! The unsmoothed luma is kept alongside the smoothed buffer: edge detection
//! runs on the smoothed image while depth sampling reads raw intensities.

pub mod filters;
pub mod luma;

use crate::image::GrayImageU8;
use filters::{apply_separable, SeparableFilter};
use image::RgbImage;

pub use filters::{StaticSeparableFilter, GAUSSIAN_5TAP};
pub use luma::rgb_to_luma;

/// Output of the preprocessing stage.
#[derive(Clone, Debug)]
pub struct Preprocessed {
    /// Luma of the input, unfiltered.
    pub gray: GrayImageU8,
    /// `gray` after the separable smoothing filter.
    pub smoothed: GrayImageU8,
}

/// Convert to luma and smooth with `filter`.
pub fn preprocess(image: &RgbImage, filter: &dyn SeparableFilter) -> Preprocessed {
    let gray = rgb_to_luma(image);
    let smoothed = apply_separable(filter, gray.as_view());
    Preprocessed { gray, smoothed }
}
