use std::rc::Rc;

use glam::Vec2;
use image::{imageops, Rgba, RgbaImage};
use tracing::trace;

/// Returns a copy of `source` rotated by `angle_degrees`, where positive angles
/// turn counterclockwise on screen.
///
/// The returned image grows to fit the rotated corners of `source` and any
/// pixel not covered by the source is fully transparent. Quarter turns are
/// exact and keep the image size (with width and height swapped when needed).
pub fn rotate_image(source: &RgbaImage, angle_degrees: f32) -> RgbaImage {
    let angle = angle_degrees.rem_euclid(360.0);

    // `imageops` rotates clockwise, so a counterclockwise quarter turn is a
    // clockwise three quarter turn.
    match angle {
        a if a == 0.0 => return source.clone(),
        a if a == 90.0 => return imageops::rotate270(source),
        a if a == 180.0 => return imageops::rotate180(source),
        a if a == 270.0 => return imageops::rotate90(source),
        _ => {}
    }

    let (sin, cos) = angle.to_radians().sin_cos();
    let (src_w, src_h) = (source.width() as f32, source.height() as f32);

    let dst_w = (src_w * cos.abs() + src_h * sin.abs()).ceil().max(1.0) as u32;
    let dst_h = (src_w * sin.abs() + src_h * cos.abs()).ceil().max(1.0) as u32;

    let src_center = Vec2::new(src_w, src_h) * 0.5;
    let dst_center = Vec2::new(dst_w as f32, dst_h as f32) * 0.5;

    // Walk the destination pixels and sample the source through the inverse
    // rotation (nearest neighbor).
    RgbaImage::from_fn(dst_w, dst_h, |x, y| {
        let d = Vec2::new(x as f32 + 0.5, y as f32 + 0.5) - dst_center;
        let s = Vec2::new(d.x * cos - d.y * sin, d.x * sin + d.y * cos) + src_center;

        if s.x < 0.0 || s.y < 0.0 || s.x >= src_w || s.y >= src_h {
            Rgba([0, 0, 0, 0])
        } else {
            *source.get_pixel(s.x as u32, s.y as u32)
        }
    })
}

/// A sprite's source art together with a rotated working copy.
///
/// The working copy is cached by the angle it was generated for, and is only
/// regenerated when a different angle is requested.
#[derive(Clone, Debug)]
pub struct SpriteImage {
    /// Unrotated source image which may be shared between sprites.
    source: Rc<RgbaImage>,
    /// Copy of `source` rotated by `working_angle` degrees.
    working: RgbaImage,
    working_angle: f32,
}

impl SpriteImage {
    pub fn new(source: Rc<RgbaImage>) -> Self {
        Self {
            working: source.as_ref().clone(),
            source,
            working_angle: 0.0,
        }
    }

    /// Make the working copy show the source rotated by `angle_degrees`.
    /// Returns true if the working copy had to be regenerated.
    pub fn set_angle(&mut self, angle_degrees: f32) -> bool {
        if angle_degrees == self.working_angle {
            return false;
        }

        trace!("regenerating sprite image at {angle_degrees} degrees");

        self.working = rotate_image(&self.source, angle_degrees);
        self.working_angle = angle_degrees;
        true
    }

    pub fn working(&self) -> &RgbaImage {
        &self.working
    }

    /// Get the size of the working copy in pixels.
    pub fn size(&self) -> Vec2 {
        Vec2::new(self.working.width() as f32, self.working.height() as f32)
    }
}
