//! Spring-mass oscillator TUI application state and logic.

use std::time::Duration;

use crossterm::event::KeyCode;

use crate::config::{OscillatorConfig, SimConfig};
use crate::controls::{ControlAction, ControlPanel};
use crate::error::SimResult;
use crate::render::{oscillator_plot, oscillator_scene, RenderCommand};
use crate::scenarios::oscillator::{OscillatorParams, OscillatorSession, SampleGrid};

use super::{action_for_key, DEFAULT_CONFIG_YAML};

/// Application state for the oscillator TUI.
#[derive(Debug, Clone)]
pub struct OscillatorApp {
    /// Simulation session.
    pub session: OscillatorSession,
    /// Mass, spring constant, amplitude and damping sliders.
    pub controls: ControlPanel,
    /// Animation frame interval.
    pub interval: Duration,
    /// Frames processed.
    pub frame_count: u64,
    /// Whether the app should quit.
    pub should_quit: bool,
}

impl OscillatorApp {
    /// Create the app from the embedded default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::from_yaml(DEFAULT_CONFIG_YAML).unwrap_or_else(|_| Self::fallback())
    }

    fn fallback() -> Self {
        let config = OscillatorConfig::default();
        Self {
            session: OscillatorSession::new(
                OscillatorParams::default(),
                SampleGrid::default(),
                config.interval_ms,
            ),
            controls: ControlPanel::oscillator(&config),
            interval: Duration::from_millis(config.interval_ms),
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
    /// Returns error if the configured initial values or grid are invalid.
    pub fn from_config(config: &SimConfig) -> SimResult<Self> {
        Ok(Self {
            session: OscillatorSession::from_config(&config.oscillator)?,
            controls: ControlPanel::oscillator(&config.oscillator),
            interval: Duration::from_millis(config.oscillator.interval_ms),
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

    /// Apply a button or slider action. The animation always runs, so
    /// start and pause do nothing; reset restores every slider and the next
    /// poll recomputes the grid.
    pub fn apply(&mut self, action: ControlAction) {
        match action {
            ControlAction::Reset => {
                self.controls.reset_all();
            }
            ControlAction::FocusNext => self.controls.focus_next(),
            ControlAction::FocusPrev => self.controls.focus_prev(),
            ControlAction::Increase => {
                self.controls.nudge_focused(1);
            }
            ControlAction::Decrease => {
                self.controls.nudge_focused(-1);
            }
            ControlAction::Quit => self.should_quit = true,
            ControlAction::Start | ControlAction::Pause => {}
        }
    }

    /// Push slider values into the session if they differ.
    pub fn poll_controls(&mut self) -> bool {
        match self.controls.oscillator_params() {
            Ok(params) => self.session.apply_params(params),
            Err(e) => {
                tracing::warn!(error = %e, "ignoring invalid slider values");
                false
            }
        }
    }

    /// Process one animation frame: poll sliders, then move the playhead.
    pub fn update(&mut self) {
        self.poll_controls();
        self.session.advance_frame();
        self.frame_count += 1;
    }

    /// Spring-mass draw commands for the current frame.
    #[must_use]
    pub fn scene(&self) -> Vec<RenderCommand> {
        oscillator_scene(&self.session)
    }

    /// Position-time plot draw commands for the current frame.
    #[must_use]
    pub fn plot(&self) -> Vec<RenderCommand> {
        oscillator_plot(&self.session)
    }
}

impl Default for OscillatorApp {
    fn default() -> Self {
        Self::new()
    }
}
