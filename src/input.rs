use glam::Vec2;

/// A screen direction that can be held down to move a sprite.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Left,
        Direction::Right,
        Direction::Up,
        Direction::Down,
    ];

    /// Unit vector in screen space (+Y is down).
    pub const fn unit_vector(self) -> Vec2 {
        match self {
            Direction::Left => Vec2::new(-1.0, 0.0),
            Direction::Right => Vec2::new(1.0, 0.0),
            Direction::Up => Vec2::new(0.0, -1.0),
            Direction::Down => Vec2::new(0.0, 1.0),
        }
    }

    const fn index(self) -> usize {
        match self {
            Direction::Left => 0,
            Direction::Right => 1,
            Direction::Up => 2,
            Direction::Down => 3,
        }
    }
}

/// A one-shot request to change a sprite's rotation speed.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SpeedCommand {
    Increase,
    Decrease,
    Stop,
}

/// Directions that are currently held down.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct HeldDirections([bool; 4]);

impl HeldDirections {
    pub fn set(&mut self, direction: Direction, is_held: bool) {
        self.0[direction.index()] = is_held;
    }

    pub fn is_held(&self, direction: Direction) -> bool {
        self.0[direction.index()]
    }

    /// Sum of the unit vectors of every held direction. Opposite directions
    /// cancel out and diagonals are not normalized.
    pub fn movement(&self) -> Vec2 {
        Direction::ALL
            .into_iter()
            .filter(|d| self.is_held(*d))
            .map(Direction::unit_vector)
            .sum()
    }
}

/// Input collected by the driver for a single tick.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct InputSnapshot {
    pub held: HeldDirections,
    /// Move the pivot to this screen position.
    pub relocate_pivot: Option<Vec2>,
    pub speed_commands: Vec<SpeedCommand>,
    /// Flip pivot marker visibility.
    pub toggle_pivot_markers: bool,
}

impl InputSnapshot {
    /// Get the movement direction for this tick.
    pub fn movement(&self) -> Vec2 {
        self.held.movement()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_held_keys_means_no_movement() {
        assert_eq!(Vec2::ZERO, InputSnapshot::default().movement());
    }

    #[test]
    fn held_directions_sum() {
        let mut held = HeldDirections::default();
        held.set(Direction::Left, true);
        held.set(Direction::Down, true);
        assert_eq!(Vec2::new(-1.0, 1.0), held.movement());

        held.set(Direction::Right, true);
        assert_eq!(Vec2::new(0.0, 1.0), held.movement());

        held.set(Direction::Down, false);
        assert_eq!(Vec2::ZERO, held.movement());
    }

    #[test]
    fn unit_vectors_are_screen_space() {
        assert_eq!(Vec2::new(0.0, -1.0), Direction::Up.unit_vector());
        assert_eq!(Vec2::new(1.0, 0.0), Direction::Right.unit_vector());
    }
}
