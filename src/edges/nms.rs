//! Non-maximum suppression with double-threshold classification.
//!
//! Each pixel's gradient direction is quantized into four sectors using
//! tan(22.5°) boundaries. A pixel survives when its magnitude beats the two
//! neighbours along that direction. Horizontal and vertical sectors are
//! asymmetric on ties: strictly greater than the left/upper neighbour,
//! greater-or-equal to the right/lower one. An ideal step edge spreads
//! equal responses over two pixels, and this keeps exactly one of them.
//! Diagonal sectors require strict dominance on both sides.
//!
//! Border handling ignores the outermost 1-pixel frame to avoid
//! out-of-bounds checks in neighbour lookup.
use crate::edges::grad::Grad;
use crate::image::ImageView;

const TAN_22_5_DEG: f32 = 0.414_213_57;
const TAN_67_5_DEG: f32 = 2.414_213_6;

/// Per-pixel class after suppression.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum EdgeClass {
    Suppressed = 0,
    Weak = 1,
    Strong = 2,
}

/// Suppress non-maxima and classify survivors: magnitude `> high` is strong,
/// `> low` is weak. Returns one class per pixel in row-major order.
pub fn suppress_and_classify(grad: &Grad, low: f32, high: f32) -> Vec<EdgeClass> {
    let w = grad.mag.w;
    let h = grad.mag.h;
    let mut classes = vec![EdgeClass::Suppressed; w * h];
    if w < 3 || h < 3 {
        return classes;
    }

    for y in 1..h - 1 {
        let mag_prev = grad.mag.row(y - 1);
        let mag_row = grad.mag.row(y);
        let mag_next = grad.mag.row(y + 1);
        let gx_row = grad.gx.row(y);
        let gy_row = grad.gy.row(y);

        for x in 1..w - 1 {
            let mag = mag_row[x];
            if mag <= low {
                continue;
            }

            let gx = gx_row[x];
            let gy = gy_row[x];
            let abs_gx = gx.abs();
            let abs_gy = gy.abs();

            let is_max = if abs_gy < abs_gx * TAN_22_5_DEG {
                mag > mag_row[x - 1] && mag >= mag_row[x + 1]
            } else if abs_gy > abs_gx * TAN_67_5_DEG {
                mag > mag_prev[x] && mag >= mag_next[x]
            } else if (gx >= 0.0) == (gy >= 0.0) {
                // Gradient along the main diagonal (down-right on screen).
                mag > mag_prev[x - 1] && mag > mag_next[x + 1]
            } else {
                mag > mag_prev[x + 1] && mag > mag_next[x - 1]
            };

            if is_max {
                classes[y * w + x] = if mag > high {
                    EdgeClass::Strong
                } else {
                    EdgeClass::Weak
                };
            }
        }
    }

    classes
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::edges::grad::sobel_gradients;
    use crate::image::ImageF32;

    fn blurred_step(width: usize, height: usize, split_x: usize) -> ImageF32 {
        // Profile of a 200→40 step after the 5-tap Gaussian.
        let profile = [200.0, 190.0, 150.0, 90.0, 50.0, 40.0];
        let mut img = ImageF32::zeros(width, height);
        for y in 0..height {
            for x in 0..width {
                let offset = x as isize - (split_x as isize - 3);
                let v = if offset < 0 {
                    200.0
                } else if offset as usize >= profile.len() {
                    40.0
                } else {
                    profile[offset as usize]
                };
                img.set(x, y, v);
            }
        }
        img
    }

    #[test]
    fn tie_keeps_the_pixel_left_of_the_step() {
        let img = blurred_step(16, 6, 8);
        let grad = sobel_gradients(&img);
        let classes = suppress_and_classify(&grad, 50.0, 150.0);
        let row: Vec<EdgeClass> = (0..16).map(|x| classes[2 * 16 + x]).collect();
        let kept: Vec<usize> = row
            .iter()
            .enumerate()
            .filter(|(_, c)| **c != EdgeClass::Suppressed)
            .map(|(x, _)| x)
            .collect();
        assert_eq!(kept, vec![7]);
        assert_eq!(row[7], EdgeClass::Strong);
    }

    #[test]
    fn flat_image_has_no_candidates() {
        let img = ImageF32::zeros(10, 10);
        let grad = sobel_gradients(&img);
        let classes = suppress_and_classify(&grad, 50.0, 150.0);
        assert!(classes.iter().all(|c| *c == EdgeClass::Suppressed));
    }
}
