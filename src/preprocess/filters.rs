//! Separable smoothing filters applied to 8-bit grayscale.
//!
//! Borders replicate the outermost pixel. Results are rounded back to 8 bits,
//! so the smoothed image is bit-stable for kernels whose taps are dyadic
//! fractions (the default 5-tap Gaussian is).
use crate::image::{GrayImageU8, ImageF32, ImageU8, ImageView, ImageViewMut};

/// Trait implemented by separable 1D filters.
pub trait SeparableFilter {
    /// Return the 1D taps (in left-to-right order). The kernel is assumed to be
    /// symmetric around its centre, but the implementation does not rely on it.
    fn taps(&self) -> &[f32];
}

/// Simple wrapper around a static filter kernel.
#[derive(Clone, Copy, Debug)]
pub struct StaticSeparableFilter {
    taps: &'static [f32],
}

impl Default for StaticSeparableFilter {
    fn default() -> Self {
        GAUSSIAN_5TAP
    }
}

impl StaticSeparableFilter {
    pub const fn new(taps: &'static [f32]) -> Self {
        Self { taps }
    }
}

impl SeparableFilter for StaticSeparableFilter {
    #[inline]
    fn taps(&self) -> &[f32] {
        self.taps
    }
}

/// Normalised 5-tap Gaussian filter `[1, 4, 6, 4, 1] / 16` (5×5 when applied
/// separably).
pub const GAUSSIAN_5TAP: StaticSeparableFilter =
    StaticSeparableFilter::new(&[0.0625, 0.25, 0.375, 0.25, 0.0625]);

/// Smooth an 8-bit image with a separable filter: horizontal pass into a float
/// scratch buffer, vertical pass, then round to nearest.
pub fn apply_separable(filter: &dyn SeparableFilter, src: ImageU8<'_>) -> GrayImageU8 {
    let (w, h) = (src.w, src.h);
    let mut out = GrayImageU8::zeros(w, h);
    if w == 0 || h == 0 {
        return out;
    }
    let taps = filter.taps();
    if taps.is_empty() {
        for y in 0..h {
            out.row_mut(y).copy_from_slice(src.row(y));
        }
        return out;
    }
    let radius = (taps.len() / 2) as isize;

    let mut horiz = ImageF32::zeros(w, h);
    for y in 0..h {
        let row = src.row(y);
        let dst = horiz.row_mut(y);
        for (x, px) in dst.iter_mut().enumerate() {
            let mut acc = 0.0f32;
            for (k, &tap) in taps.iter().enumerate() {
                let sx = clamp_index(x as isize + k as isize - radius, w);
                acc += tap * row[sx] as f32;
            }
            *px = acc;
        }
    }

    for y in 0..h {
        let dst = out.row_mut(y);
        for (x, px) in dst.iter_mut().enumerate() {
            let mut acc = 0.0f32;
            for (k, &tap) in taps.iter().enumerate() {
                let sy = clamp_index(y as isize + k as isize - radius, h);
                acc += tap * horiz.get(x, sy);
            }
            *px = acc.round().clamp(0.0, 255.0) as u8;
        }
    }
    out
}

fn clamp_index(idx: isize, upper: usize) -> usize {
    if idx < 0 {
        0
    } else if (idx as usize) >= upper {
        upper - 1
    } else {
        idx as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gaussian_taps_are_normalised() {
        let sum: f32 = GAUSSIAN_5TAP.taps().iter().sum();
        assert!((sum - 1.0).abs() < 1e-6);
    }

    #[test]
    fn flat_image_is_unchanged() {
        let data = vec![123u8; 12 * 9];
        let out = apply_separable(&GAUSSIAN_5TAP, ImageU8::packed(12, 9, &data));
        assert!(out.data().iter().all(|&v| v == 123));
    }

    #[test]
    fn step_edge_is_spread_symmetrically() {
        // Light (200) left of column 8, dark (40) from column 8 on.
        let (w, h) = (16usize, 5usize);
        let data: Vec<u8> = (0..w * h)
            .map(|i| if i % w < 8 { 200 } else { 40 })
            .collect();
        let out = apply_separable(&GAUSSIAN_5TAP, ImageU8::packed(w, h, &data));
        let row: Vec<u8> = (0..w).map(|x| out.get(x, 2)).collect();
        assert_eq!(&row[5..11], &[200, 190, 150, 90, 50, 40]);
    }
}
