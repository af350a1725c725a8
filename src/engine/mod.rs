//! Frame-driven simulation plumbing shared by both engines.
//!
//! - Run state machine for the pendulum (`Stopped` / `Running` / `Paused`)
//! - Wall-clock frame timing and time-step clamping

pub mod clock;

use serde::{Deserialize, Serialize};

pub use clock::{clamp_dt, FrameClock};

/// Run state of an integrating simulation.
///
/// `Reset` is a transition, not a state: it always lands in `Stopped`.
/// There is no terminal state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RunState {
    /// Initial state; ticks render but do not advance physics.
    #[default]
    Stopped,
    /// Ticks advance physics and record the trail.
    Running,
    /// Frozen mid-run; ticks render the last state.
    Paused,
}

impl RunState {
    /// Transition taken by the start button (also resumes from pause).
    #[must_use]
    pub const fn start(self) -> Self {
        Self::Running
    }

    /// Transition taken by the pause button. Only a running simulation pauses.
    #[must_use]
    pub const fn pause(self) -> Self {
        match self {
            Self::Running => Self::Paused,
            other => other,
        }
    }

    /// Transition taken by the reset button, from any state.
    #[must_use]
    pub const fn reset(self) -> Self {
        Self::Stopped
    }

    /// Whether ticks should advance physics.
    #[must_use]
    pub const fn is_running(self) -> bool {
        matches!(self, Self::Running)
    }

    /// Short label for status displays.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Stopped => "STOPPED",
            Self::Running => "RUNNING",
            Self::Paused => "PAUSED",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_state_is_stopped() {
        assert_eq!(RunState::default(), RunState::Stopped);
        assert!(!RunState::default().is_running());
    }

    #[test]
    fn test_start_pause_resume_cycle() {
        let state = RunState::Stopped.start();
        assert_eq!(state, RunState::Running);

        let state = state.pause();
        assert_eq!(state, RunState::Paused);

        let state = state.start();
        assert_eq!(state, RunState::Running);
    }

    #[test]
    fn test_pause_only_affects_running() {
        assert_eq!(RunState::Stopped.pause(), RunState::Stopped);
        assert_eq!(RunState::Paused.pause(), RunState::Paused);
    }

    #[test]
    fn test_reset_from_any_state() {
        for state in [RunState::Stopped, RunState::Running, RunState::Paused] {
            assert_eq!(state.reset(), RunState::Stopped);
        }
    }

    #[test]
    fn test_labels() {
        assert_eq!(RunState::Running.label(), "RUNNING");
        assert_eq!(RunState::Paused.label(), "PAUSED");
        assert_eq!(RunState::Stopped.label(), "STOPPED");
    }
}
