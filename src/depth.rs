//! Depth estimate from the darkness of the region.
//!
//! Shadowed pothole floors read darker than the surrounding asphalt, so the
//! mean luma under the region mask maps linearly onto a depth scale:
//! `depth_cm = (255 - mean) / 255 * MAX_DEPTH_CM`. Exact-zero pixels are
//! excluded from the mean; an empty sample set yields the maximal depth.
use crate::contours::Contour;
use crate::image::{GrayImageU8, ImageView};
use crate::measure::round2;
use imageproc::drawing::BresenhamLineIter;
use log::debug;
use serde::Serialize;

/// Depth assigned to pure black; ceiling of the linear scale.
pub const MAX_DEPTH_CM: f64 = 15.0;

const INSIDE: u8 = 255;

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DepthEstimate {
    /// Depth in centimetres, rounded to two decimals.
    pub depth_cm: f64,
    /// Mean luma of the sampled pixels; `None` when nothing was sampled.
    pub mean_intensity: Option<f64>,
    pub sampled_pixels: usize,
}

impl DepthEstimate {
    /// True when the empty-mask fallback produced the estimate.
    pub fn is_fallback(&self) -> bool {
        self.mean_intensity.is_none()
    }
}

/// Linear intensity → depth mapping.
pub fn depth_from_intensity(mean_intensity: f64) -> f64 {
    ((255.0 - mean_intensity) / 255.0) * MAX_DEPTH_CM
}

/// Mask of the pixels on or inside the contour polygon.
///
/// The closed polygon is rasterized with Bresenham lines, then everything
/// 4-connected to the outside is flood-filled; whatever the fill cannot reach
/// belongs to the region.
pub fn region_mask(contour: &Contour, width: usize, height: usize) -> GrayImageU8 {
    let mut mask = GrayImageU8::zeros(width, height);
    if width == 0 || height == 0 || contour.points.is_empty() {
        return mask;
    }

    // Padded grid so the exterior is connected around the whole image.
    let pw = width + 2;
    let ph = height + 2;
    const OPEN: u8 = 0;
    const WALL: u8 = 1;
    const OUTSIDE: u8 = 2;
    let mut grid = vec![OPEN; pw * ph];

    let n = contour.points.len();
    for i in 0..n {
        let a = contour.points[i];
        let b = contour.points[(i + 1) % n];
        let segment =
            BresenhamLineIter::new((a.x as f32, a.y as f32), (b.x as f32, b.y as f32));
        for (x, y) in std::iter::once((a.x, a.y)).chain(segment) {
            if x >= 0 && y >= 0 && (x as usize) < width && (y as usize) < height {
                grid[(y as usize + 1) * pw + x as usize + 1] = WALL;
            }
        }
    }

    let mut stack = vec![0usize];
    grid[0] = OUTSIDE;
    while let Some(idx) = stack.pop() {
        let x = idx % pw;
        let y = idx / pw;
        let mut visit = |nidx: usize| {
            if grid[nidx] == OPEN {
                grid[nidx] = OUTSIDE;
                stack.push(nidx);
            }
        };
        if x > 0 {
            visit(idx - 1);
        }
        if x + 1 < pw {
            visit(idx + 1);
        }
        if y > 0 {
            visit(idx - pw);
        }
        if y + 1 < ph {
            visit(idx + pw);
        }
    }

    for y in 0..height {
        for x in 0..width {
            if grid[(y + 1) * pw + x + 1] != OUTSIDE {
                mask.set(x, y, INSIDE);
            }
        }
    }
    mask
}

/// Mean of the non-zero `gray` pixels under `mask`, mapped to depth.
pub fn estimate_depth(gray: &GrayImageU8, mask: &GrayImageU8) -> DepthEstimate {
    let mut sum = 0u64;
    let mut count = 0usize;
    for (g_row, m_row) in gray.rows().zip(mask.rows()) {
        for (&g, &m) in g_row.iter().zip(m_row) {
            if m != 0 && g != 0 {
                sum += g as u64;
                count += 1;
            }
        }
    }

    if count == 0 {
        debug!("depth: region has no non-zero samples, using {MAX_DEPTH_CM} cm");
        return DepthEstimate {
            depth_cm: MAX_DEPTH_CM,
            mean_intensity: None,
            sampled_pixels: 0,
        };
    }

    let mean = sum as f64 / count as f64;
    DepthEstimate {
        depth_cm: round2(depth_from_intensity(mean)),
        mean_intensity: Some(mean),
        sampled_pixels: count,
    }
}
