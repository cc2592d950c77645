use glam::Vec2;
use image::{Rgba, RgbaImage};

use crate::shapes::Rect;

/// A drawable surface that sprites render themselves onto.
///
/// Draw calls are applied in the order they are made, so later draws cover
/// earlier ones where they overlap.
pub trait RenderTarget {
    /// Draw `image` with its top-left corner at `dest.position`.
    fn blit(&mut self, image: &RgbaImage, dest: &Rect);

    /// Fill an opaque square of `size` pixels centered on `center`.
    fn fill_marker(&mut self, center: Vec2, size: f32, color: Rgba<u8>);
}

/// A CPU side RGBA framebuffer. The renderer copies it to the window once per
/// frame.
pub struct Canvas {
    pixels: RgbaImage,
}

impl Canvas {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            pixels: RgbaImage::new(width, height),
        }
    }

    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    pub fn pixels(&self) -> &RgbaImage {
        &self.pixels
    }

    /// Overwrite every pixel with `color`.
    pub fn clear(&mut self, color: Rgba<u8>) {
        self.pixels.pixels_mut().for_each(|p| *p = color);
    }
}

impl RenderTarget for Canvas {
    fn blit(&mut self, image: &RgbaImage, dest: &Rect) {
        let left = dest.position.x.round() as i64;
        let top = dest.position.y.round() as i64;

        for (x, y, src) in image.enumerate_pixels() {
            let cx = left + x as i64;
            let cy = top + y as i64;

            if cx < 0 || cy < 0 || cx >= self.width() as i64 || cy >= self.height() as i64 {
                continue;
            }

            let dst = self.pixels.get_pixel_mut(cx as u32, cy as u32);
            *dst = blend_over(*src, *dst);
        }
    }

    fn fill_marker(&mut self, center: Vec2, size: f32, color: Rgba<u8>) {
        let top_left = (center - Vec2::splat(size * 0.5)).round();
        let size = size.round().max(0.0) as i64;

        let x0 = (top_left.x as i64).clamp(0, self.width() as i64);
        let y0 = (top_left.y as i64).clamp(0, self.height() as i64);
        let x1 = (top_left.x as i64 + size).clamp(0, self.width() as i64);
        let y1 = (top_left.y as i64 + size).clamp(0, self.height() as i64);

        for y in y0..y1 {
            for x in x0..x1 {
                self.pixels.put_pixel(x as u32, y as u32, color);
            }
        }
    }
}

/// Composite `src` on top of `dst` using straight (non-premultiplied) alpha.
fn blend_over(src: Rgba<u8>, dst: Rgba<u8>) -> Rgba<u8> {
    let src_a = src[3] as u32;

    match src_a {
        0 => dst,
        255 => src,
        _ => {
            let dst_a = dst[3] as u32 * (255 - src_a) / 255;
            let out_a = src_a + dst_a;

            let channel = |i: usize| {
                ((src[i] as u32 * src_a + dst[i] as u32 * dst_a) / out_a.max(1)) as u8
            };

            Rgba([channel(0), channel(1), channel(2), out_a as u8])
        }
    }
}
