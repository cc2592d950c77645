use image::Rgba;

/// Tunable values for the orbit demo.
#[derive(Clone, Debug)]
pub struct DemoSettings {
    pub window_title: String,
    /// Size of the drawing canvas. The canvas is scaled to fit the window.
    pub canvas_width: u32,
    pub canvas_height: u32,
    /// Target number of ticks (and frames) per second.
    pub frames_per_second: f32,
    /// Pixels the player sprite moves per tick in each held direction.
    pub move_speed: f32,
    /// Degrees per tick added or removed by a speed command.
    pub speed_step: f32,
    pub show_pivot_markers: bool,
    pub clear_color: Rgba<u8>,
    /// Sprite images, relative to the content directory.
    pub player_image: String,
    pub orbiter_image: String,
}

impl Default for DemoSettings {
    fn default() -> Self {
        Self {
            window_title: "Orbiter".to_string(),
            canvas_width: 500,
            canvas_height: 500,
            frames_per_second: 60.0,
            move_speed: 3.0,
            speed_step: 1.0,
            show_pivot_markers: true,
            clear_color: Rgba([0, 0, 0, 255]),
            player_image: "badge.png".to_string(),
            orbiter_image: "portrait.png".to_string(),
        }
    }
}
