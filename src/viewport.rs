use glam::Vec2;
use thiserror::Error;

/// Maps the fixed size canvas into a window of any size.
///
/// The canvas is scaled uniformly to fit the window and centered, leaving
/// letterbox bars on the sides or on the top and bottom when the aspect ratios
/// differ.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Viewport {
    canvas_size: Vec2,
    window_size: Vec2,
}

impl Viewport {
    pub fn new(canvas_width: u32, canvas_height: u32) -> Self {
        let canvas_size = Vec2::new(canvas_width as f32, canvas_height as f32);

        Self {
            canvas_size,
            window_size: canvas_size,
        }
    }

    /// Resize the window the canvas is shown in.
    pub fn set_window_size(
        &mut self,
        new_width: u32,
        new_height: u32,
    ) -> Result<(), InvalidViewportSize> {
        if new_width > 0 && new_height > 0 {
            self.window_size = Vec2::new(new_width as f32, new_height as f32);
            Ok(())
        } else {
            Err(InvalidViewportSize(new_width, new_height))
        }
    }

    pub fn window_size(&self) -> Vec2 {
        self.window_size
    }

    /// Uniform scale from canvas pixels to window pixels.
    pub fn scale(&self) -> f32 {
        let ratio = self.window_size / self.canvas_size;
        ratio.x.min(ratio.y)
    }

    /// Get the fraction of the window's width and height covered by the canvas,
    /// which is the scale to apply to a full screen quad in NDC.
    pub fn ndc_scale(&self) -> Vec2 {
        self.canvas_size * self.scale() / self.window_size
    }

    /// Convert a window position in physical pixels to canvas coordinates.
    /// Returns `None` for positions inside the letterbox bars.
    pub fn window_to_canvas(&self, position: Vec2) -> Option<Vec2> {
        let scale = self.scale();
        let offset = (self.window_size - self.canvas_size * scale) * 0.5;
        let canvas_pos = (position - offset) / scale;

        let inside =
            canvas_pos.cmpge(Vec2::ZERO).all() && canvas_pos.cmplt(self.canvas_size).all();
        inside.then_some(canvas_pos)
    }
}

/// Remembers where the cursor is in the window so its canvas position can be
/// recomputed when the viewport changes.
#[derive(Copy, Clone, Debug, Default)]
pub struct CursorTracker {
    window_position: Option<Vec2>,
}

impl CursorTracker {
    /// Record a new cursor position in physical window pixels and return it
    /// in canvas coordinates.
    pub fn moved(&mut self, window_position: Vec2, viewport: &Viewport) -> Option<Vec2> {
        self.window_position = Some(window_position);
        self.canvas_position(viewport)
    }

    /// Forget the cursor after it leaves the window.
    pub fn left(&mut self) {
        self.window_position = None;
    }

    /// Get the last cursor position mapped through `viewport`.
    pub fn canvas_position(&self, viewport: &Viewport) -> Option<Vec2> {
        self.window_position.and_then(|position| viewport.window_to_canvas(position))
    }
}

#[derive(Debug, Error)]
#[error("viewport width and height must be larger than zero but width was {} and height was {}", .0, .1)]
pub struct InvalidViewportSize(u32, u32);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matching_window_is_identity() {
        let viewport = Viewport::new(500, 500);

        assert_eq!(1.0, viewport.scale());
        assert_eq!(Vec2::ONE, viewport.ndc_scale());
        assert_eq!(
            Some(Vec2::new(12.0, 480.0)),
            viewport.window_to_canvas(Vec2::new(12.0, 480.0))
        );
    }

    #[test]
    fn wide_window_letterboxes_sides() {
        let mut viewport = Viewport::new(500, 500);
        assert!(viewport.set_window_size(1000, 500).is_ok());

        assert_eq!(Vec2::new(0.5, 1.0), viewport.ndc_scale());
        assert_eq!(None, viewport.window_to_canvas(Vec2::new(100.0, 250.0)));
        assert_eq!(
            Some(Vec2::new(0.0, 250.0)),
            viewport.window_to_canvas(Vec2::new(250.0, 250.0))
        );
    }

    #[test]
    fn large_window_scales_coordinates() {
        let mut viewport = Viewport::new(500, 500);
        assert!(viewport.set_window_size(1000, 1200).is_ok());

        assert_eq!(2.0, viewport.scale());
        assert_eq!(
            Some(Vec2::new(100.0, 100.0)),
            viewport.window_to_canvas(Vec2::new(200.0, 300.0))
        );
    }

    #[test]
    fn set_invalid_window_size() {
        let mut viewport = Viewport::new(500, 500);

        let err = viewport.set_window_size(0, 100).unwrap_err();
        assert_eq!(0, err.0);
        assert_eq!(100, err.1);

        assert!(viewport.set_window_size(600, 0).is_err());
        assert_eq!(Vec2::new(500.0, 500.0), viewport.window_size());
    }

    #[test]
    fn cursor_is_remapped_after_resize() {
        let mut viewport = Viewport::new(500, 500);
        let mut cursor = CursorTracker::default();

        assert_eq!(
            Some(Vec2::new(200.0, 300.0)),
            cursor.moved(Vec2::new(200.0, 300.0), &viewport)
        );

        assert!(viewport.set_window_size(1000, 1000).is_ok());
        assert_eq!(Some(Vec2::new(100.0, 150.0)), cursor.canvas_position(&viewport));

        // The same window point now lands in the left letterbox bar.
        assert!(viewport.set_window_size(1000, 500).is_ok());
        assert_eq!(None, cursor.canvas_position(&viewport));
    }

    #[test]
    fn cursor_outside_window_has_no_position() {
        let viewport = Viewport::new(500, 500);
        let mut cursor = CursorTracker::default();
        assert_eq!(None, cursor.canvas_position(&viewport));

        cursor.moved(Vec2::new(10.0, 10.0), &viewport);
        cursor.left();
        assert_eq!(None, cursor.canvas_position(&viewport));
    }
}
