use std::time::{Duration, Instant};

/// Paces the frame loop at a fixed number of frames per second.
///
/// The clock does not sleep itself. The event loop waits until
/// `next_deadline()` before requesting the next frame.
#[derive(Copy, Clone, Debug)]
pub struct FrameClock {
    /// Time the previous frame started.
    last_frame: Instant,
    frame_duration: Duration,
}

impl FrameClock {
    /// Create a clock targeting `frames_per_second`. Non-positive rates are
    /// clamped to one frame per second.
    pub fn new(frames_per_second: f32) -> Self {
        Self {
            last_frame: Instant::now(),
            frame_duration: Duration::from_secs_f32(1.0 / frames_per_second.max(1.0)),
        }
    }

    /// Mark the start of a new frame and return the time since the previous
    /// one.
    pub fn tick(&mut self) -> Duration {
        let now = Instant::now();
        let delta = now - self.last_frame;

        self.last_frame = now;
        delta
    }

    /// The earliest time the next frame should start.
    pub fn next_deadline(&self) -> Instant {
        self.last_frame + self.frame_duration
    }

    /// Check if the next frame is due at `now`.
    pub fn is_due(&self, now: Instant) -> bool {
        now >= self.next_deadline()
    }

    pub fn frame_duration(&self) -> Duration {
        self.frame_duration
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deadline_is_one_frame_after_last_tick() {
        let mut clock = FrameClock::new(50.0);
        clock.tick();

        assert!((clock.frame_duration().as_secs_f32() - 0.02).abs() < 1e-6);
        assert_eq!(
            clock.frame_duration(),
            clock.next_deadline() - clock.last_frame
        );
    }

    #[test]
    fn frames_are_not_due_before_the_deadline() {
        let mut clock = FrameClock::new(60.0);
        clock.tick();
        let last_frame = clock.last_frame;

        assert!(!clock.is_due(last_frame));
        assert!(!clock.is_due(last_frame + clock.frame_duration() / 2));
        assert!(clock.is_due(clock.next_deadline()));
        assert!(clock.is_due(last_frame + clock.frame_duration() * 3));
    }

    #[test]
    fn invalid_rates_are_clamped() {
        assert_eq!(Duration::from_secs(1), FrameClock::new(0.0).frame_duration());
        assert_eq!(Duration::from_secs(1), FrameClock::new(-5.0).frame_duration());
    }
}
