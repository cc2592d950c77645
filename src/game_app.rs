pub mod orbit_demo;

use std::time::Duration;

use glam::Vec2;
use image::Rgba;
use tracing::{error, warn};

use crate::{
    canvas::{Canvas, RenderTarget},
    renderer::Renderer,
    viewport::CursorTracker,
};

/// Dispatches events coming from the underlying platform to the game for
/// execution, and presents what the game draws.
pub struct GameAppHost<'a> {
    renderer: Renderer<'a>,
    canvas: Canvas,
    clear_color: Rgba<u8>,
    cursor: CursorTracker,
    game: Box<dyn GameApp>,
}

impl<'a> GameAppHost<'a> {
    pub fn new(
        renderer: Renderer<'a>,
        canvas: Canvas,
        clear_color: Rgba<u8>,
        game: Box<dyn GameApp>,
    ) -> Self {
        Self {
            renderer,
            canvas,
            clear_color,
            cursor: CursorTracker::default(),
            game,
        }
    }

    pub fn load_content(&mut self) -> anyhow::Result<()> {
        self.game.load_content()
    }

    pub fn input(&mut self, event: &winit::event::WindowEvent) -> bool {
        self.game.input(event)
    }

    /// Handles when the cursor moves inside the window. `position` is in
    /// physical window pixels.
    pub fn cursor_moved(&mut self, position: winit::dpi::PhysicalPosition<f64>) {
        let window_pos = Vec2::new(position.x as f32, position.y as f32);
        let canvas_pos = self.cursor.moved(window_pos, self.renderer.viewport());

        self.game.cursor_moved(canvas_pos)
    }

    /// Handles when the cursor leaves the window.
    pub fn cursor_left(&mut self) {
        self.cursor.left();
        self.game.cursor_moved(None)
    }

    /// Tell the game where the cursor now is on the canvas after the viewport
    /// changes.
    fn remap_cursor(&mut self) {
        let canvas_pos = self.cursor.canvas_position(self.renderer.viewport());
        self.game.cursor_moved(canvas_pos)
    }

    pub fn update_sim(&mut self, delta: Duration) {
        self.game.update_sim(delta)
    }

    pub fn render(&mut self) {
        self.canvas.clear(self.clear_color);
        self.game.draw(&mut self.canvas);

        match self.renderer.render(&self.canvas) {
            Ok(_) => {}
            // Reconfigure surface when lost:
            Err(wgpu::SurfaceError::Lost) | Err(wgpu::SurfaceError::Outdated) => {
                warn!("handling surface lost or outdated event by re-applying current window size");
                let window_size = self.renderer.window_size();
                self.renderer.resize(window_size.width, window_size.height);
            }
            // System is out of memory - bail out!
            Err(wgpu::SurfaceError::OutOfMemory) => {
                panic!("WGPU out of memory error")
            }
            // Other errors (timeout) should be resolved by next frame
            Err(e) => {
                error!("WGPU error, will skip frame and try to ignore: {e:?}");
            }
        }
    }

    /// Handles when the game window ("rendering window") is resized.
    pub fn window_resized(&mut self, new_width: u32, new_height: u32) {
        self.renderer.resize(new_width, new_height);
        self.remap_cursor();
    }

    /// Handles when Windows DPI scaling is changed.
    pub fn scale_factor_changed(&mut self) {
        let new_size = self.renderer.window().inner_size();
        self.renderer.resize(new_size.width, new_size.height);
        self.remap_cursor();
    }
}

/// A specific game or demo scene implementation.
pub trait GameApp {
    /// Loads content required by the game prior to the start of rendering.
    fn load_content(&mut self) -> anyhow::Result<()>;

    /// Advances the game's simulation state by one tick. `delta` is the time
    /// since the previous tick.
    fn update_sim(&mut self, delta: Duration);

    /// Called anytime there is a new input event from the host.
    fn input(&mut self, event: &winit::event::WindowEvent) -> bool;

    /// Called by the host when the cursor moves. `position` is in canvas
    /// coordinates, or `None` if the cursor is outside the canvas.
    fn cursor_moved(&mut self, _position: Option<Vec2>) {}

    /// Draws the current state of the game.
    fn draw(&self, target: &mut dyn RenderTarget);
}
