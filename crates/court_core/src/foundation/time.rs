//! Frame time management

use std::time::Instant;

/// Per-tick frame clock.
///
/// The external scheduler hands the simulation one delta per display refresh.
/// `FrameClock` sanitises that delta and keeps running totals; it never sleeps.
#[derive(Debug, Clone)]
pub struct FrameClock {
    last_frame: Option<Instant>,
    max_frame_delta: f32,
    delta_time: f32,
    total_time: f32,
    frame_count: u64,
}

impl FrameClock {
    /// Create a clock that clamps every tick to at most `max_frame_delta` seconds
    pub fn new(max_frame_delta: f32) -> Self {
        Self {
            last_frame: None,
            max_frame_delta,
            delta_time: 0.0,
            total_time: 0.0,
            frame_count: 0,
        }
    }

    /// Advance by an externally supplied delta and return the delta actually used.
    ///
    /// Non-finite or negative deltas become zero. Deltas above the configured
    /// maximum are clamped to it.
    pub fn advance(&mut self, delta: f32) -> f32 {
        let sanitized = if delta.is_finite() && delta > 0.0 {
            delta.min(self.max_frame_delta)
        } else {
            if delta != 0.0 {
                log::warn!("Ignoring invalid frame delta {delta}");
            }
            0.0
        };

        self.delta_time = sanitized;
        self.total_time += sanitized;
        self.frame_count += 1;
        sanitized
    }

    /// Measure the wall-clock delta since the previous call and advance by it.
    ///
    /// The first call returns zero.
    pub fn measure(&mut self) -> f32 {
        let now = Instant::now();
        let elapsed = self
            .last_frame
            .map_or(0.0, |last| now.duration_since(last).as_secs_f32());
        self.last_frame = Some(now);
        self.advance(elapsed)
    }

    /// Get the delta used by the most recent tick in seconds
    pub fn delta_time(&self) -> f32 {
        self.delta_time
    }

    /// Get the total simulated time
    pub fn total_time(&self) -> f32 {
        self.total_time
    }

    /// Get the current frame count
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Get the average simulated FPS
    pub fn average_fps(&self) -> f32 {
        if self.total_time > 0.0 {
            self.frame_count as f32 / self.total_time
        } else {
            0.0
        }
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new(0.25)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_advance_accumulates() {
        let mut clock = FrameClock::new(0.25);
        clock.advance(0.1);
        clock.advance(0.2);

        assert_eq!(clock.frame_count(), 2);
        assert_relative_eq!(clock.total_time(), 0.3, epsilon = 1.0e-6);
        assert_relative_eq!(clock.delta_time(), 0.2);
    }

    #[test]
    fn test_invalid_deltas_become_zero() {
        let mut clock = FrameClock::default();
        assert_eq!(clock.advance(f32::NAN), 0.0);
        assert_eq!(clock.advance(-1.0), 0.0);
        assert_eq!(clock.advance(f32::INFINITY), 0.0);
        assert_eq!(clock.total_time(), 0.0);
        assert_eq!(clock.frame_count(), 3);
    }

    #[test]
    fn test_large_delta_is_clamped() {
        let mut clock = FrameClock::new(0.1);
        assert_relative_eq!(clock.advance(3.0), 0.1);
    }

    #[test]
    fn test_first_measure_is_zero() {
        let mut clock = FrameClock::default();
        assert_eq!(clock.measure(), 0.0);
    }
}
