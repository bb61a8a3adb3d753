//! Float working buffer for the smoothing and gradient passes.
//!
//! Values keep raw 8-bit intensity units (0–255 for copies of gray images),
//! so Sobel magnitudes compare directly against the 50/150 edge thresholds.
use super::traits::{ImageView, ImageViewMut};
use super::ImageU8;

/// Packed row-major `f32` image (`stride == w`).
#[derive(Clone, Debug)]
pub struct ImageF32 {
    pub w: usize,
    pub h: usize,
    pub stride: usize,
    pub data: Vec<f32>,
}

impl ImageF32 {
    pub fn zeros(w: usize, h: usize) -> Self {
        Self {
            w,
            h,
            stride: w,
            data: vec![0.0; w * h],
        }
    }

    /// Widen an 8-bit view without rescaling.
    pub fn from_u8(src: ImageU8<'_>) -> Self {
        let mut out = Self::zeros(src.w, src.h);
        for y in 0..src.h {
            for (dst, &px) in out.row_mut(y).iter_mut().zip(src.row(y)) {
                *dst = f32::from(px);
            }
        }
        out
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> f32 {
        self.data[y * self.stride + x]
    }

    #[inline]
    pub fn set(&mut self, x: usize, y: usize, v: f32) {
        self.data[y * self.stride + x] = v;
    }
}

impl ImageView for ImageF32 {
    type Pixel = f32;

    fn width(&self) -> usize {
        self.w
    }
    fn height(&self) -> usize {
        self.h
    }
    fn stride(&self) -> usize {
        self.stride
    }
    fn row(&self, y: usize) -> &[f32] {
        let start = y * self.stride;
        &self.data[start..start + self.w]
    }
}

impl ImageViewMut for ImageF32 {
    fn row_mut(&mut self, y: usize) -> &mut [f32] {
        let start = y * self.stride;
        &mut self.data[start..start + self.w]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn widening_respects_source_stride() {
        // 3×2 view over a buffer with stride 4; the padding byte must be skipped.
        let data = [1u8, 2, 3, 99, 4, 5, 6, 99];
        let view = ImageU8 {
            w: 3,
            h: 2,
            stride: 4,
            data: &data,
        };
        let img = ImageF32::from_u8(view);
        assert_eq!(img.data, vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
        assert_eq!(img.get(2, 1), 6.0);
    }
}
