use std::time::Duration;

use glam::Vec2;
use tracing::{debug, info, trace};

use crate::{
    canvas::RenderTarget,
    content::load_sprite_image,
    gameplay::OrbitInputController,
    settings::DemoSettings,
    sprite::OrbitingSprite,
};

use super::GameApp;

/// Two sprites orbiting their pivots. The first is player controlled: arrow
/// keys move it, clicking moves its pivot and `+`/`-`/`0` change its speed.
pub struct OrbitDemo {
    settings: DemoSettings,
    controller: OrbitInputController,
    /// Drawn in order, so later sprites cover earlier ones.
    sprites: Vec<OrbitingSprite>,
    show_pivot_markers: bool,
    ticks: u64,
}

impl OrbitDemo {
    const PLAYER_LOCATION: Vec2 = Vec2::new(100.0, 100.0);
    const PLAYER_ORIGIN: &'static str = "midbottom";
    const ORBITER_LOCATION: Vec2 = Vec2::new(300.0, 300.0);
    const ORBITER_ORIGIN: &'static str = "270,280";
    const ORBITER_SPEED: f32 = -2.0;

    pub fn new(settings: DemoSettings) -> Self {
        Self {
            show_pivot_markers: settings.show_pivot_markers,
            settings,
            controller: OrbitInputController::new(),
            sprites: Vec::new(),
            ticks: 0,
        }
    }

    pub fn sprites(&self) -> &[OrbitingSprite] {
        &self.sprites
    }
}

impl GameApp for OrbitDemo {
    fn load_content(&mut self) -> anyhow::Result<()> {
        let player_image = pollster::block_on(load_sprite_image(&self.settings.player_image))?;
        let orbiter_image = pollster::block_on(load_sprite_image(&self.settings.orbiter_image))?;

        // The orbiter is drawn first so the player sprite stays on top.
        let mut orbiter = OrbitingSprite::with_origin_name(
            orbiter_image,
            Self::ORBITER_LOCATION,
            Self::ORBITER_ORIGIN,
        )?;
        orbiter.set_angular_speed(Self::ORBITER_SPEED);

        let mut player = OrbitingSprite::with_origin_name(
            player_image,
            Self::PLAYER_LOCATION,
            Self::PLAYER_ORIGIN,
        )?;
        player.player_controlled = true;

        self.sprites = vec![orbiter, player];

        info!("orbit demo loaded {} sprites", self.sprites.len());
        Ok(())
    }

    fn update_sim(&mut self, delta: Duration) {
        self.ticks += 1;
        trace!(ticks = self.ticks, ?delta, "orbit demo tick");

        let input = self.controller.take_snapshot();

        if input.toggle_pivot_markers {
            self.show_pivot_markers = !self.show_pivot_markers;
            debug!("show_pivot_markers = {}", self.show_pivot_markers);
        }

        for sprite in &mut self.sprites {
            sprite.update(&input, self.settings.move_speed, self.settings.speed_step);
        }
    }

    fn input(&mut self, event: &winit::event::WindowEvent) -> bool {
        self.controller.process_input(event)
    }

    fn cursor_moved(&mut self, position: Option<Vec2>) {
        self.controller.process_cursor(position)
    }

    fn draw(&self, target: &mut dyn RenderTarget) {
        for sprite in &self.sprites {
            sprite.render(target, self.show_pivot_markers);
        }
    }
}
