//! RGB → luma conversion with ITU-R BT.601 weights.
//!
//! Uses 14-bit fixed point (`0.299, 0.587, 0.114` scaled by 2^14, summing
//! to exactly 16384) so neutral grays map to themselves.
use crate::image::GrayImageU8;
use image::RgbImage;

const R_WEIGHT: u32 = 4899;
const G_WEIGHT: u32 = 9617;
const B_WEIGHT: u32 = 1868;
const SHIFT: u32 = 14;
const HALF: u32 = 1 << (SHIFT - 1);

#[inline]
pub fn luma(r: u8, g: u8, b: u8) -> u8 {
    ((r as u32 * R_WEIGHT + g as u32 * G_WEIGHT + b as u32 * B_WEIGHT + HALF) >> SHIFT) as u8
}

/// Convert an RGB image to an owned 8-bit luma buffer.
pub fn rgb_to_luma(image: &RgbImage) -> GrayImageU8 {
    let (w, h) = (image.width() as usize, image.height() as usize);
    let data = image
        .pixels()
        .map(|p| luma(p.0[0], p.0[1], p.0[2]))
        .collect();
    GrayImageU8::new(w, h, data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    #[test]
    fn neutral_gray_is_preserved() {
        for v in [0u8, 1, 40, 128, 200, 255] {
            assert_eq!(luma(v, v, v), v);
        }
    }

    #[test]
    fn green_dominates_luma() {
        assert!(luma(0, 255, 0) > luma(255, 0, 0));
        assert!(luma(255, 0, 0) > luma(0, 0, 255));
        assert_eq!(luma(255, 0, 0), 76);
    }

    #[test]
    fn converts_every_pixel_in_row_major_order() {
        let mut img = RgbImage::from_pixel(3, 2, Rgb([10, 10, 10]));
        img.put_pixel(2, 1, Rgb([90, 90, 90]));
        let gray = rgb_to_luma(&img);
        assert_eq!((gray.width(), gray.height()), (3, 2));
        assert_eq!(gray.get(2, 1), 90);
        assert_eq!(gray.get(0, 0), 10);
    }
}
