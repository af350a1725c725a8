//! Pendulum TUI application state and logic.
//!
//! Terminal I/O is handled by the binary; this module owns the session,
//! the slider panel and the per-frame poll.

use crossterm::event::KeyCode;

use crate::config::{PendulumConfig, SimConfig};
use crate::controls::{ControlAction, ControlPanel};
use crate::error::SimResult;
use crate::render::{pendulum_scene, RenderCommand, ScreenMapping};
use crate::scenarios::pendulum::{PendulumIntegrator, PendulumParams, PendulumSession};

use super::{action_for_key, DEFAULT_CONFIG_YAML};

/// Application state for the pendulum TUI.
#[derive(Debug, Clone)]
pub struct PendulumApp {
    /// Simulation session.
    pub session: PendulumSession,
    /// Length, gravity, damping and initial-angle sliders.
    pub controls: ControlPanel,
    /// Meters to pixels.
    pub mapping: ScreenMapping,
    /// Bob radius (px).
    pub bob_radius: f64,
    /// Target frame rate.
    pub frame_rate_hz: u32,
    /// Frames processed.
    pub frame_count: u64,
    /// Whether the app should quit.
    pub should_quit: bool,
}

impl PendulumApp {
    /// Create the app from the embedded default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::from_yaml(DEFAULT_CONFIG_YAML).unwrap_or_else(|_| Self::fallback())
    }

    fn fallback() -> Self {
        let config = PendulumConfig::default();
        Self {
            session: PendulumSession::new(
                PendulumParams::default(),
                PendulumIntegrator::new(config.max_dt).unwrap_or_default(),
                config.trail_capacity,
            ),
            controls: ControlPanel::pendulum(&config),
            mapping: ScreenMapping::default(),
            bob_radius: 20.0,
            frame_rate_hz: config.frame_rate_hz,
            frame_count: 0,
            should_quit: false,
        }
    }

    /// Create from a YAML configuration string.
    ///
    /// # Errors
    ///
    /// Returns error if parsing or validation fails.
    pub fn from_yaml(yaml: &str) -> SimResult<Self> {
        Self::from_config(&SimConfig::from_yaml(yaml)?)
    }

    /// Create from a loaded configuration.
    ///
    /// # Errors
    ///
    /// Returns error if the configured initial values are invalid.
    pub fn from_config(config: &SimConfig) -> SimResult<Self> {
        Ok(Self {
            session: PendulumSession::from_config(&config.pendulum)?,
            controls: ControlPanel::pendulum(&config.pendulum),
            mapping: ScreenMapping::from_config(&config.render),
            bob_radius: config.render.bob_radius,
            frame_rate_hz: config.pendulum.frame_rate_hz,
            frame_count: 0,
            should_quit: false,
        })
    }

    /// Handle a key press.
    pub fn handle_key(&mut self, key: KeyCode) {
        if let Some(action) = action_for_key(key) {
            self.apply(action);
        }
    }

    /// Apply a button or slider action.
    pub fn apply(&mut self, action: ControlAction) {
        match action {
            ControlAction::Start => self.session.start(),
            ControlAction::Pause => self.session.pause(),
            ControlAction::Reset => self.session.reset(),
            ControlAction::FocusNext => self.controls.focus_next(),
            ControlAction::FocusPrev => self.controls.focus_prev(),
            ControlAction::Increase => {
                self.controls.nudge_focused(1);
            }
            ControlAction::Decrease => {
                self.controls.nudge_focused(-1);
            }
            ControlAction::Quit => self.should_quit = true,
        }
    }

    /// Push slider values into the session if they differ.
    pub fn poll_controls(&mut self) -> bool {
        match self.controls.pendulum_params() {
            Ok(params) => self.session.apply_params(params),
            Err(e) => {
                tracing::warn!(error = %e, "ignoring invalid slider values");
                false
            }
        }
    }

    /// Process one frame: poll sliders, then advance physics by `dt`.
    pub fn update(&mut self, dt: f64) {
        self.poll_controls();
        self.session.tick(dt);
        self.frame_count += 1;
    }

    /// Draw commands for the current frame.
    #[must_use]
    pub fn scene(&self) -> Vec<RenderCommand> {
        pendulum_scene(&self.session, &self.mapping, self.bob_radius)
    }
}

impl Default for PendulumApp {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controls::pendulum::{INITIAL_ANGLE, LENGTH};
    use crate::engine::RunState;

    #[test]
    fn test_new_app() {
        let app = PendulumApp::new();
        assert_eq!(app.session.run_state(), RunState::Stopped);
        assert!(!app.should_quit);
        assert_eq!(app.frame_count, 0);
        assert_eq!(app.frame_rate_hz, 60);
    }

    #[test]
    fn test_fallback_matches_embedded_defaults() {
        let embedded = PendulumApp::new();
        let fallback = PendulumApp::fallback();
        assert_eq!(embedded.session.params(), fallback.session.params());
        assert_eq!(embedded.controls, fallback.controls);
    }

    #[test]
    fn test_handle_key_quit() {
        let mut app = PendulumApp::new();
        app.handle_key(KeyCode::Char('q'));
        assert!(app.should_quit);

        let mut app = PendulumApp::new();
        app.handle_key(KeyCode::Esc);
        assert!(app.should_quit);
    }

    #[test]
    fn test_start_pause_reset_keys() {
        let mut app = PendulumApp::new();
        app.handle_key(KeyCode::Char('s'));
        assert_eq!(app.session.run_state(), RunState::Running);

        app.update(0.016);
        app.handle_key(KeyCode::Char('p'));
        assert_eq!(app.session.run_state(), RunState::Paused);

        app.handle_key(KeyCode::Char('r'));
        assert_eq!(app.session.run_state(), RunState::Stopped);
        assert!(app.session.trail().is_empty());
    }

    #[test]
    fn test_update_when_stopped_keeps_state() {
        let mut app = PendulumApp::new();
        let before = *app.session.state();
        app.update(0.016);
        assert_eq!(*app.session.state(), before);
        assert_eq!(app.frame_count, 1);
    }

    #[test]
    fn test_slider_change_reaches_session() {
        let mut app = PendulumApp::new();
        assert_eq!(app.controls.focus(), LENGTH);
        app.handle_key(KeyCode::Right);
        app.update(0.016);
        assert!((app.session.params().length() - 1.1).abs() < 1e-9);
    }

    #[test]
    fn test_initial_angle_slider_moves_bob() {
        let mut app = PendulumApp::new();
        app.controls.set(INITIAL_ANGLE, 45.0);
        app.update(0.016);
        assert!((app.session.state().angle - 45.0_f64.to_radians()).abs() < 1e-12);
    }

    #[test]
    fn test_focus_keys_cycle() {
        let mut app = PendulumApp::new();
        app.handle_key(KeyCode::Up);
        assert_eq!(app.controls.focus(), INITIAL_ANGLE);
        app.handle_key(KeyCode::Tab);
        assert_eq!(app.controls.focus(), LENGTH);
    }

    #[test]
    fn test_unknown_key_ignored() {
        let mut app = PendulumApp::new();
        app.handle_key(KeyCode::Char('x'));
        assert!(!app.should_quit);
        assert_eq!(app.session.run_state(), RunState::Stopped);
    }

    #[test]
    fn test_scene_not_empty() {
        let app = PendulumApp::new();
        assert!(app.scene().len() > 3);
    }
}
