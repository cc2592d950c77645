use std::rc::Rc;

use glam::Vec2;
use image::{Rgba, RgbaImage};
use tracing::debug;

use crate::{
    canvas::RenderTarget,
    images::SpriteImage,
    input::{InputSnapshot, SpeedCommand},
    rotator::PivotRotator,
    shapes::{InvalidOriginSpec, OriginSpec, Rect},
};

/// A sprite that spins around a pivot point which can sit anywhere on or off
/// the sprite.
///
/// Each call to `tick` advances the rotation angle by the angular speed, then
/// places the sprite on its orbit around the current pivot. The bounding
/// rectangle always reflects the most recent tick, relocation or translation.
pub struct OrbitingSprite {
    image: SpriteImage,
    bounding_rect: Rect,
    pivot: Vec2,
    rotator: PivotRotator,
    /// Rotation in degrees, kept in [0, 360).
    angle: f32,
    /// Signed degrees added to `angle` every tick. Zero pauses rotation.
    angular_speed: f32,
    /// Allow movement input to translate this sprite.
    pub player_controlled: bool,
}

impl OrbitingSprite {
    pub const DEFAULT_ANGULAR_SPEED: f32 = 1.0;
    pub const PIVOT_MARKER_SIZE: f32 = 6.0;
    pub const PIVOT_MARKER_COLOR: Rgba<u8> = Rgba([255, 0, 255, 255]);

    /// Create a sprite centered on `location` that rotates around `origin`.
    /// Anchor origins are resolved against the sprite's initial rectangle.
    pub fn new(image: Rc<RgbaImage>, location: Vec2, origin: OriginSpec) -> Self {
        let image = SpriteImage::new(image);
        let bounding_rect = Rect::from_center(location, image.size());
        let pivot = origin.resolve(&bounding_rect);

        Self {
            rotator: PivotRotator::new(bounding_rect.center(), pivot, 0.0),
            image,
            bounding_rect,
            pivot,
            angle: 0.0,
            angular_speed: Self::DEFAULT_ANGULAR_SPEED,
            player_controlled: false,
        }
    }

    /// Create a sprite with an origin given as text, either an anchor name such
    /// as "midbottom" or an "x,y" point.
    pub fn with_origin_name(
        image: Rc<RgbaImage>,
        location: Vec2,
        origin: &str,
    ) -> Result<Self, InvalidOriginSpec> {
        Ok(Self::new(image, location, origin.parse()?))
    }

    /// Move the pivot to `new_pivot` without disturbing the sprite.
    ///
    /// The orbit is rebuilt from the sprite's current rotated center and
    /// current angle, so rotation continues from where the sprite is now.
    pub fn relocate_pivot(&mut self, new_pivot: Vec2) {
        debug!("relocating pivot from {} to {new_pivot}", self.pivot);

        self.rotator = PivotRotator::new(self.bounding_rect.center(), new_pivot, self.angle);
        self.pivot = new_pivot;
    }

    /// Shift the pivot and the sprite together by `delta`. Ignored unless the
    /// sprite is player controlled.
    pub fn translate(&mut self, delta: Vec2) {
        if !self.player_controlled || delta == Vec2::ZERO {
            return;
        }

        self.pivot += delta;
        self.bounding_rect.translate(delta);
    }

    /// Advance the rotation by one step. Does nothing while rotation is
    /// stopped.
    pub fn tick(&mut self) {
        if self.is_stopped() {
            return;
        }

        self.angle = (self.angle + self.angular_speed).rem_euclid(360.0);

        // Adding a tiny negative speed can round up to exactly 360.
        if self.angle >= 360.0 {
            self.angle = 0.0;
        }

        let new_center = self.rotator.evaluate(self.angle, self.pivot);
        self.image.set_angle(self.angle);
        self.bounding_rect = Rect::from_center(new_center, self.image.size());
    }

    /// Apply one tick of input and then advance the rotation.
    ///
    /// Pivot relocation, speed commands and movement only apply to player
    /// controlled sprites. `move_speed` scales the held movement direction.
    pub fn update(&mut self, input: &InputSnapshot, move_speed: f32, speed_step: f32) {
        if self.player_controlled {
            if let Some(new_pivot) = input.relocate_pivot {
                self.relocate_pivot(new_pivot);
            }

            for command in &input.speed_commands {
                match command {
                    SpeedCommand::Increase => self.adjust_angular_speed(speed_step),
                    SpeedCommand::Decrease => self.adjust_angular_speed(-speed_step),
                    SpeedCommand::Stop => self.set_angular_speed(0.0),
                }
            }

            self.translate(input.movement() * move_speed);
        }

        self.tick();
    }

    pub fn adjust_angular_speed(&mut self, delta: f32) {
        self.set_angular_speed(self.angular_speed + delta);
    }

    pub fn set_angular_speed(&mut self, angular_speed: f32) {
        debug!("angular speed {} -> {angular_speed}", self.angular_speed);
        self.angular_speed = angular_speed;
    }

    /// Draw the sprite, and optionally a small marker on its pivot.
    pub fn render(&self, target: &mut dyn RenderTarget, show_pivot_marker: bool) {
        target.blit(self.image.working(), &self.bounding_rect);

        if show_pivot_marker {
            target.fill_marker(
                self.pivot,
                Self::PIVOT_MARKER_SIZE,
                Self::PIVOT_MARKER_COLOR,
            );
        }
    }

    pub fn is_stopped(&self) -> bool {
        self.angular_speed == 0.0
    }

    pub fn angle(&self) -> f32 {
        self.angle
    }

    pub fn angular_speed(&self) -> f32 {
        self.angular_speed
    }

    pub fn pivot(&self) -> Vec2 {
        self.pivot
    }

    pub fn bounding_rect(&self) -> &Rect {
        &self.bounding_rect
    }

    pub fn center(&self) -> Vec2 {
        self.bounding_rect.center()
    }

    pub fn rotator(&self) -> &PivotRotator {
        &self.rotator
    }

    pub fn working_image(&self) -> &RgbaImage {
        self.image.working()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::Direction;
    use crate::shapes::Anchor;

    const EPSILON: f32 = 1e-3;

    fn square_image(side: u32) -> Rc<RgbaImage> {
        Rc::new(RgbaImage::from_pixel(side, side, Rgba([10, 20, 30, 255])))
    }

    fn midbottom_sprite() -> OrbitingSprite {
        OrbitingSprite::new(
            square_image(60),
            Vec2::new(100.0, 100.0),
            Anchor::MidBottom.into(),
        )
    }

    fn assert_consistent(sprite: &OrbitingSprite) {
        let expected = sprite.rotator().evaluate(sprite.angle(), sprite.pivot());
        assert!(sprite.center().abs_diff_eq(expected, EPSILON));
    }

    /// Records draw calls for inspection.
    #[derive(Default)]
    struct RecordingTarget {
        blits: Vec<Rect>,
        markers: Vec<(Vec2, f32, Rgba<u8>)>,
    }

    impl RenderTarget for RecordingTarget {
        fn blit(&mut self, _image: &RgbaImage, dest: &Rect) {
            self.blits.push(*dest);
        }

        fn fill_marker(&mut self, center: Vec2, size: f32, color: Rgba<u8>) {
            self.markers.push((center, size, color));
        }
    }

    #[test]
    fn new_sprite_resolves_anchor_pivot() {
        let sprite = midbottom_sprite();

        assert_eq!(Vec2::new(100.0, 130.0), sprite.pivot());
        assert_eq!(Vec2::new(100.0, 100.0), sprite.center());
        assert_eq!(0.0, sprite.angle());
        assert_eq!(OrbitingSprite::DEFAULT_ANGULAR_SPEED, sprite.angular_speed());
        assert!(!sprite.player_controlled);
        assert_consistent(&sprite);
    }

    #[test]
    fn origin_names_are_parsed() {
        let sprite =
            OrbitingSprite::with_origin_name(square_image(8), Vec2::new(300.0, 300.0), "270,280")
                .unwrap();
        assert_eq!(Vec2::new(270.0, 280.0), sprite.pivot());

        let result =
            OrbitingSprite::with_origin_name(square_image(8), Vec2::new(300.0, 300.0), "centre");
        assert!(result.is_err());
    }

    #[test]
    fn quarter_turn_matches_closed_form() {
        let mut sprite = midbottom_sprite();

        for _ in 0..90 {
            sprite.tick();
        }

        assert_eq!(90.0, sprite.angle());
        assert!(sprite.center().abs_diff_eq(Vec2::new(70.0, 130.0), EPSILON));
        assert_consistent(&sprite);
    }

    #[test]
    fn full_turn_returns_to_start() {
        let mut sprite = midbottom_sprite();
        let start = sprite.center();

        for _ in 0..360 {
            sprite.tick();
            assert_consistent(&sprite);
        }

        assert_eq!(0.0, sprite.angle());
        assert!(sprite.center().abs_diff_eq(start, EPSILON));
        assert_eq!((60, 60), sprite.working_image().dimensions());
    }

    #[test]
    fn negative_speed_wraps_into_range() {
        let mut sprite = midbottom_sprite();
        sprite.set_angular_speed(-2.0);
        sprite.tick();

        assert_eq!(358.0, sprite.angle());
        assert_consistent(&sprite);
    }

    #[test]
    fn stopped_sprite_does_not_change() {
        let mut sprite = midbottom_sprite();
        for _ in 0..10 {
            sprite.tick();
        }

        sprite.set_angular_speed(0.0);
        assert!(sprite.is_stopped());

        let rect = *sprite.bounding_rect();
        let image = sprite.working_image().clone();
        let angle = sprite.angle();

        for _ in 0..25 {
            sprite.tick();
        }

        assert_eq!(rect, *sprite.bounding_rect());
        assert_eq!(&image, sprite.working_image());
        assert_eq!(angle, sprite.angle());

        sprite.adjust_angular_speed(3.0);
        sprite.tick();
        assert_eq!(angle + 3.0, sprite.angle());
    }

    #[test]
    fn relocating_onto_center_anchors_sprite_in_place() {
        let mut sprite = midbottom_sprite();
        for _ in 0..37 {
            sprite.tick();
        }

        let center = sprite.center();
        sprite.relocate_pivot(center);
        assert!(sprite.rotator().radius() < EPSILON);

        sprite.tick();
        assert!(sprite.center().abs_diff_eq(center, EPSILON));
        assert_consistent(&sprite);
    }

    #[test]
    fn relocating_pivot_continues_from_current_position() {
        let mut sprite = midbottom_sprite();
        for _ in 0..20 {
            sprite.tick();
        }

        let center = sprite.center();
        let new_pivot = Vec2::new(160.0, 90.0);
        sprite.relocate_pivot(new_pivot);

        assert_eq!(new_pivot, sprite.pivot());
        assert!((sprite.rotator().radius() - center.distance(new_pivot)).abs() < EPSILON);
        assert_consistent(&sprite);

        // One degree later the sprite is still next to where it was.
        sprite.tick();
        assert!(sprite.center().distance(center) < 2.0);
        assert_consistent(&sprite);
    }

    #[test]
    fn translation_moves_orbit_rigidly() {
        let mut sprite = midbottom_sprite();
        sprite.player_controlled = true;
        for _ in 0..45 {
            sprite.tick();
        }

        let delta = Vec2::new(9.0, -6.0);
        let pivot = sprite.pivot();
        let expected = sprite.rotator().evaluate(sprite.angle(), pivot) + delta;

        sprite.translate(delta);

        assert_eq!(pivot + delta, sprite.pivot());
        assert!(sprite.center().abs_diff_eq(expected, EPSILON));
        assert_consistent(&sprite);
    }

    #[test]
    fn translation_requires_player_control() {
        let mut sprite = midbottom_sprite();
        let pivot = sprite.pivot();

        sprite.translate(Vec2::new(5.0, 5.0));
        assert_eq!(pivot, sprite.pivot());
    }

    #[test]
    fn translation_works_while_stopped() {
        let mut sprite = midbottom_sprite();
        sprite.player_controlled = true;
        sprite.set_angular_speed(0.0);

        sprite.translate(Vec2::new(-3.0, 0.0));
        sprite.tick();

        assert_eq!(Vec2::new(97.0, 100.0), sprite.center());
        assert!(sprite.is_stopped());
        assert_consistent(&sprite);
    }

    #[test]
    fn zero_radius_sprite_spins_in_place() {
        let mut sprite = OrbitingSprite::new(
            square_image(20),
            Vec2::new(50.0, 50.0),
            Anchor::Center.into(),
        );

        for _ in 0..30 {
            sprite.tick();
            assert!(sprite.center().abs_diff_eq(Vec2::new(50.0, 50.0), EPSILON));
        }
    }

    #[test]
    fn update_applies_input_only_to_player_sprites() {
        let mut input = InputSnapshot::default();
        input.held.set(Direction::Right, true);
        input.relocate_pivot = Some(Vec2::new(10.0, 10.0));
        input.speed_commands = vec![SpeedCommand::Increase, SpeedCommand::Increase];

        let mut npc = midbottom_sprite();
        npc.update(&input, 3.0, 1.0);
        assert_eq!(Vec2::new(100.0, 130.0), npc.pivot());
        assert_eq!(1.0, npc.angular_speed());

        let mut player = midbottom_sprite();
        player.player_controlled = true;
        player.update(&input, 3.0, 1.0);
        assert_eq!(Vec2::new(13.0, 10.0), player.pivot());
        assert_eq!(3.0, player.angular_speed());
        assert_eq!(3.0, player.angle());
        assert_consistent(&player);

        let stop = InputSnapshot {
            speed_commands: vec![SpeedCommand::Stop],
            ..Default::default()
        };
        player.update(&stop, 3.0, 1.0);
        assert!(player.is_stopped());
        assert_eq!(3.0, player.angle());
    }

    #[test]
    fn render_draws_image_then_marker() {
        let sprite = midbottom_sprite();

        let mut target = RecordingTarget::default();
        sprite.render(&mut target, true);

        assert_eq!(vec![*sprite.bounding_rect()], target.blits);
        assert_eq!(
            vec![(
                sprite.pivot(),
                OrbitingSprite::PIVOT_MARKER_SIZE,
                OrbitingSprite::PIVOT_MARKER_COLOR
            )],
            target.markers
        );

        let mut target = RecordingTarget::default();
        sprite.render(&mut target, false);
        assert!(target.markers.is_empty());
    }
}
