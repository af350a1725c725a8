//! Frame timing.
//!
//! The main loop owns wall-clock time; the physics core only ever sees a
//! clamped `dt` in seconds.

use std::time::{Duration, Instant};

/// Clamp a caller-supplied time step into `[0, max_dt]`.
///
/// Stalled frames (huge or infinite `dt`) collapse to `max_dt`. `NaN` and
/// negative steps collapse to zero so physics never runs backwards, as does
/// any step under a cap that is not finite and strictly positive.
#[must_use]
pub fn clamp_dt(dt: f64, max_dt: f64) -> f64 {
    if dt.is_nan() || dt <= 0.0 || !(max_dt.is_finite() && max_dt > 0.0) {
        0.0
    } else if dt > max_dt {
        max_dt
    } else {
        dt
    }
}

/// Measures wall-clock time between consecutive frames.
#[derive(Debug, Clone)]
pub struct FrameClock {
    last: Instant,
    frame_budget: Duration,
    frames: u64,
}

impl FrameClock {
    /// Create a clock targeting the given frame rate.
    #[must_use]
    pub fn new(frame_rate_hz: u32) -> Self {
        Self {
            last: Instant::now(),
            frame_budget: Self::budget_for(frame_rate_hz),
            frames: 0,
        }
    }

    /// Create a clock from a fixed frame interval.
    #[must_use]
    pub fn from_interval(interval: Duration) -> Self {
        Self {
            last: Instant::now(),
            frame_budget: interval,
            frames: 0,
        }
    }

    /// Frame budget for a target rate; zero is treated as 1 Hz.
    #[must_use]
    pub fn budget_for(frame_rate_hz: u32) -> Duration {
        Duration::from_secs_f64(1.0 / f64::from(frame_rate_hz.max(1)))
    }

    /// Time allotted to one frame.
    #[must_use]
    pub const fn frame_budget(&self) -> Duration {
        self.frame_budget
    }

    /// Number of completed ticks.
    #[must_use]
    pub const fn frames(&self) -> u64 {
        self.frames
    }

    /// Seconds elapsed since the previous tick; restarts the measurement.
    pub fn tick(&mut self) -> f64 {
        let now = Instant::now();
        let dt = now.duration_since(self.last).as_secs_f64();
        self.last = now;
        self.frames += 1;
        dt
    }

    /// Time left in the current frame before the next tick is due.
    #[must_use]
    pub fn remaining(&self) -> Duration {
        self.frame_budget.saturating_sub(self.last.elapsed())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_dt_passthrough() {
        assert!((clamp_dt(0.016, 0.05) - 0.016).abs() < f64::EPSILON);
    }

    #[test]
    fn test_clamp_dt_caps_stalled_frame() {
        assert!((clamp_dt(2.5, 0.05) - 0.05).abs() < f64::EPSILON);
        assert!((clamp_dt(f64::INFINITY, 0.05) - 0.05).abs() < f64::EPSILON);
    }

    #[test]
    fn test_clamp_dt_rejects_nan_and_negative() {
        assert_eq!(clamp_dt(f64::NAN, 0.05), 0.0);
        assert_eq!(clamp_dt(-0.1, 0.05), 0.0);
        assert_eq!(clamp_dt(f64::NEG_INFINITY, 0.05), 0.0);
    }

    #[test]
    fn test_clamp_dt_invalid_cap_stops_time() {
        for cap in [f64::NAN, 0.0, -0.05, f64::INFINITY] {
            assert_eq!(clamp_dt(5.0, cap), 0.0, "cap {cap}");
            assert_eq!(clamp_dt(0.01, cap), 0.0, "cap {cap}");
        }
    }

    #[test]
    fn test_frame_budget() {
        let clock = FrameClock::new(60);
        let budget = clock.frame_budget().as_secs_f64();
        assert!((budget - 1.0 / 60.0).abs() < 1e-9);
        assert_eq!(FrameClock::budget_for(0), Duration::from_secs(1));
    }

    #[test]
    fn test_tick_counts_frames() {
        let mut clock = FrameClock::from_interval(Duration::from_millis(20));
        let dt = clock.tick();
        assert!(dt >= 0.0);
        clock.tick();
        assert_eq!(clock.frames(), 2);
        assert!(clock.remaining() <= Duration::from_millis(20));
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Clamped steps always land in [0, max_dt].
        #[test]
        fn prop_clamp_dt_bounded(
            dt in proptest::num::f64::ANY,
            max_dt in 1e-6f64..1.0,
        ) {
            let clamped = clamp_dt(dt, max_dt);
            prop_assert!(clamped >= 0.0);
            prop_assert!(clamped <= max_dt);
        }
    }
}
