//! Frame clock driven by host-supplied timestamps

/// Tracks the interval between frame callbacks.
///
/// Timestamps come from the host's frame callback (milliseconds, monotonic).
/// The first tick after construction or [`reset`](Self::reset) yields a zero
/// delta, so time spent stopped or paused never shows up as one huge step.
#[derive(Debug, Default)]
pub struct FrameClock {
    /// Timestamp of the previous tick, if any
    previous: Option<f64>,
    /// Interval measured by the most recent tick, in milliseconds
    pub delta_ms: f64,
    /// Ticks since construction
    pub frame_count: u64,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance the clock to `timestamp_ms` and return the floored delta.
    ///
    /// Negative or non-finite intervals (clock anomalies) come back as 0.
    pub fn tick(&mut self, timestamp_ms: f64) -> f64 {
        self.frame_count += 1;

        let delta = match self.previous {
            Some(previous) => timestamp_ms - previous,
            None => 0.0,
        };
        if timestamp_ms.is_finite() {
            self.previous = Some(timestamp_ms);
        }

        self.delta_ms = if delta.is_finite() && delta > 0.0 {
            delta
        } else {
            0.0
        };
        self.delta_ms
    }

    /// Forget the previous timestamp; the next tick measures zero
    pub fn reset(&mut self) {
        self.previous = None;
        self.delta_ms = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_tick_zero_delta() {
        let mut clock = FrameClock::new();
        assert_eq!(clock.tick(1000.0), 0.0);
        assert_eq!(clock.tick(1016.0), 16.0);
        assert_eq!(clock.frame_count, 2);
    }

    #[test]
    fn test_reset_swallows_gap() {
        let mut clock = FrameClock::new();
        clock.tick(100.0);
        clock.tick(116.0);
        clock.reset();
        assert_eq!(clock.tick(60_000.0), 0.0);
        assert_eq!(clock.tick(60_016.0), 16.0);
    }

    #[test]
    fn test_backwards_time_floors_to_zero() {
        let mut clock = FrameClock::new();
        clock.tick(500.0);
        assert_eq!(clock.tick(400.0), 0.0);
        // Measured from the latest timestamp, not the largest
        assert_eq!(clock.tick(410.0), 10.0);
    }

    #[test]
    fn test_non_finite_timestamp() {
        let mut clock = FrameClock::new();
        clock.tick(500.0);
        assert_eq!(clock.tick(f64::NAN), 0.0);
        assert_eq!(clock.tick(516.0), 16.0);
    }
}
