//! Image buffers used by the analysis pipeline.
//!
//! Color input arrives as `image::RgbImage` and is reduced to single-channel
//! 8-bit buffers early. Gradient stages work on `ImageF32` in raw intensity
//! units (0–255), so edge thresholds keep their familiar 8-bit meaning.
pub mod f32;
pub mod gray;
pub mod io;
pub mod traits;
pub mod u8;

pub use self::f32::ImageF32;
pub use self::gray::GrayImageU8;
pub use self::traits::{ImageView, ImageViewMut, Rows};
pub use self::u8::ImageU8;
