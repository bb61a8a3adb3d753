use image::{Rgb, RgbImage};

pub const ASPHALT: Rgb<u8> = Rgb([200, 200, 200]);
pub const HOLE: Rgb<u8> = Rgb([40, 40, 40]);

/// Uniform image with no structure at all.
pub fn blank_rgb(width: u32, height: u32, value: u8) -> RgbImage {
    assert!(width > 0 && height > 0, "image dimensions must be positive");
    RgbImage::from_pixel(width, height, Rgb([value, value, value]))
}

/// Solid dark `rect_w × rect_h` rectangle with top-left corner `(x0, y0)` on
/// a light background.
pub fn dark_rectangle_rgb(
    width: u32,
    height: u32,
    x0: u32,
    y0: u32,
    rect_w: u32,
    rect_h: u32,
) -> RgbImage {
    assert!(x0 + rect_w < width && y0 + rect_h < height, "rectangle must fit inside");
    RgbImage::from_fn(width, height, |x, y| {
        if (x0..x0 + rect_w).contains(&x) && (y0..y0 + rect_h).contains(&y) {
            HOLE
        } else {
            ASPHALT
        }
    })
}

/// Solid dark disc of `radius` pixels centred at `(cx, cy)`.
pub fn dark_disc_rgb(width: u32, height: u32, cx: f32, cy: f32, radius: f32) -> RgbImage {
    RgbImage::from_fn(width, height, |x, y| {
        let dx = x as f32 - cx;
        let dy = y as f32 - cy;
        if dx * dx + dy * dy <= radius * radius {
            HOLE
        } else {
            ASPHALT
        }
    })
}
