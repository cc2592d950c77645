use glam::Vec2;

use crate::math_utils::{rotate_around_pivot, screen_angle};

/// Remembers how far a tracked point sits from a pivot and at which angle, so
/// the point can be placed on its orbit for any absolute rotation angle.
///
/// The radius and phase are captured once when the rotator is created and are
/// never recomputed. The pivot is supplied on every call to `evaluate` which
/// lets the pivot move freely while the orbit keeps its shape. When the orbit
/// itself has to change a new rotator must be created.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PivotRotator {
    /// Distance between the tracked point and the pivot.
    radius: f32,
    /// Angle in radians of the tracked point relative to the pivot, measured
    /// against the image's unrotated orientation.
    phase: f32,
}

impl PivotRotator {
    /// Create a rotator for `tracked` orbiting `pivot`.
    ///
    /// `image_angle_offset` is the rotation in degrees that the tracked image
    /// already has. It is removed from the phase so that `evaluate` called with
    /// that same angle returns `tracked`.
    ///
    /// A tracked point equal to the pivot produces a zero radius orbit that
    /// always evaluates to the pivot.
    pub fn new(tracked: Vec2, pivot: Vec2, image_angle_offset: f32) -> Self {
        Self {
            radius: tracked.distance(pivot),
            phase: screen_angle(tracked, pivot) - image_angle_offset.to_radians(),
        }
    }

    /// Get the position of the tracked point after rotating `angle_degrees`
    /// around `pivot`.
    pub fn evaluate(&self, angle_degrees: f32, pivot: Vec2) -> Vec2 {
        rotate_around_pivot(pivot, self.radius, angle_degrees.to_radians() + self.phase)
    }

    /// Get the distance between the tracked point and the pivot.
    pub fn radius(&self) -> f32 {
        self.radius
    }

    /// Get the starting angle of the tracked point in radians.
    pub fn phase(&self) -> f32 {
        self.phase
    }
}
