use glam::Vec2;

/// Calculates the (x, y) screen position that results from orbiting around
/// `pivot` at a distance of `radius`.
///
/// Screen space has +Y pointing down, so the sine term is subtracted to keep
/// positive angles turning counterclockwise on screen.
pub fn rotate_around_pivot(pivot: Vec2, radius: f32, angle_radian: f32) -> Vec2 {
    Vec2 {
        x: pivot.x + radius * f32::cos(angle_radian),
        y: pivot.y - radius * f32::sin(angle_radian),
    }
}

/// Returns the screen space angle in radians of `point` as seen from `pivot`.
pub fn screen_angle(point: Vec2, pivot: Vec2) -> f32 {
    let offset = point - pivot;
    f32::atan2(-offset.y, offset.x)
}
