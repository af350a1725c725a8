//! Slider and button model for the interactive front ends.
//!
//! Front ends write raw slider positions here; the panel clamps and snaps
//! them, and the app diffs the resulting parameter set against the session
//! once per frame.

use serde::{Deserialize, Serialize};

use crate::config::{OscillatorConfig, PendulumConfig, SliderSpec};
use crate::error::{SimError, SimResult};
use crate::scenarios::oscillator::OscillatorParams;
use crate::scenarios::pendulum::PendulumParams;

/// Pendulum slider order.
pub mod pendulum {
    pub const LENGTH: usize = 0;
    pub const GRAVITY: usize = 1;
    pub const DAMPING: usize = 2;
    pub const INITIAL_ANGLE: usize = 3;
}

/// Oscillator slider order.
pub mod oscillator {
    pub const MASS: usize = 0;
    pub const SPRING_CONSTANT: usize = 1;
    pub const AMPLITUDE: usize = 2;
    pub const DAMPING: usize = 3;
}

/// A bounded numeric input with a step grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Slider {
    label: String,
    min: f64,
    max: f64,
    step: f64,
    value: f64,
    initial: f64,
}

impl Slider {
    /// Create a slider positioned at its initial value.
    #[must_use]
    pub fn from_spec(label: impl Into<String>, spec: &SliderSpec) -> Self {
        Self {
            label: label.into(),
            min: spec.min,
            max: spec.max,
            step: spec.step,
            value: spec.initial,
            initial: spec.initial,
        }
    }

    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    #[must_use]
    pub const fn value(&self) -> f64 {
        self.value
    }

    #[must_use]
    pub const fn min(&self) -> f64 {
        self.min
    }

    #[must_use]
    pub const fn max(&self) -> f64 {
        self.max
    }

    #[must_use]
    pub const fn step(&self) -> f64 {
        self.step
    }

    /// Knob position in `[0, 1]`.
    #[must_use]
    pub fn fraction(&self) -> f64 {
        ((self.value - self.min) / (self.max - self.min)).clamp(0.0, 1.0)
    }

    /// Snap `raw` onto the step grid and clamp it into range.
    #[must_use]
    pub fn snap(&self, raw: f64) -> f64 {
        let snapped = if self.step > 0.0 {
            self.min + ((raw - self.min) / self.step).round() * self.step
        } else {
            raw
        };
        snapped.clamp(self.min, self.max)
    }

    /// Write a new value. `NaN` is ignored; everything else is snapped and
    /// clamped. Returns whether the value changed.
    pub fn set(&mut self, raw: f64) -> bool {
        if raw.is_nan() {
            return false;
        }
        let next = self.snap(raw);
        if next == self.value {
            return false;
        }
        self.value = next;
        true
    }

    /// Move by a whole number of steps.
    pub fn nudge(&mut self, steps: i32) -> bool {
        self.set(self.value + f64::from(steps) * self.step)
    }

    /// Restore the initial value.
    pub fn reset(&mut self) -> bool {
        let changed = self.value != self.initial;
        self.value = self.initial;
        changed
    }
}

/// Run-control buttons and slider navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ControlAction {
    Start,
    Pause,
    Reset,
    FocusNext,
    FocusPrev,
    Increase,
    Decrease,
    Quit,
}

/// An ordered bank of sliders with one focused entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ControlPanel {
    sliders: Vec<Slider>,
    focus: usize,
}

impl ControlPanel {
    /// Create a panel focused on the first slider.
    #[must_use]
    pub fn new(sliders: Vec<Slider>) -> Self {
        Self { sliders, focus: 0 }
    }

    /// Length, gravity, damping and initial-angle sliders.
    #[must_use]
    pub fn pendulum(config: &PendulumConfig) -> Self {
        Self::new(vec![
            Slider::from_spec("Length (m)", &config.length),
            Slider::from_spec("Gravity (m/s²)", &config.gravity),
            Slider::from_spec("Dampening", &config.damping),
            Slider::from_spec("Initial Angle (°)", &config.initial_angle_deg),
        ])
    }

    /// Mass, spring constant, amplitude and damping sliders.
    #[must_use]
    pub fn oscillator(config: &OscillatorConfig) -> Self {
        Self::new(vec![
            Slider::from_spec("Mass (kg)", &config.mass),
            Slider::from_spec("Spring Constant (N/m)", &config.spring_constant),
            Slider::from_spec("Amplitude (m)", &config.amplitude),
            Slider::from_spec("Damping", &config.damping),
        ])
    }

    #[must_use]
    pub fn sliders(&self) -> &[Slider] {
        &self.sliders
    }

    /// Index of the focused slider.
    #[must_use]
    pub const fn focus(&self) -> usize {
        self.focus
    }

    #[must_use]
    pub fn value(&self, index: usize) -> Option<f64> {
        self.sliders.get(index).map(Slider::value)
    }

    fn required(&self, index: usize) -> SimResult<f64> {
        self.value(index)
            .ok_or_else(|| SimError::config(format!("control panel has no slider {index}")))
    }

    /// Write a raw value into one slider. Returns whether it changed.
    pub fn set(&mut self, index: usize, raw: f64) -> bool {
        self.sliders.get_mut(index).is_some_and(|s| s.set(raw))
    }

    pub fn focus_next(&mut self) {
        if !self.sliders.is_empty() {
            self.focus = (self.focus + 1) % self.sliders.len();
        }
    }

    pub fn focus_prev(&mut self) {
        if !self.sliders.is_empty() {
            self.focus = (self.focus + self.sliders.len() - 1) % self.sliders.len();
        }
    }

    /// Nudge the focused slider by whole steps.
    pub fn nudge_focused(&mut self, steps: i32) -> bool {
        self.sliders
            .get_mut(self.focus)
            .is_some_and(|s| s.nudge(steps))
    }

    /// Restore every slider. Returns whether any value changed.
    pub fn reset_all(&mut self) -> bool {
        self.sliders
            .iter_mut()
            .fold(false, |changed, s| s.reset() | changed)
    }

    /// Parameter set described by a pendulum panel.
    ///
    /// # Errors
    ///
    /// Returns error if a slider is missing or the values are invalid.
    pub fn pendulum_params(&self) -> SimResult<PendulumParams> {
        PendulumParams::new(
            self.required(pendulum::LENGTH)?,
            self.required(pendulum::GRAVITY)?,
            self.required(pendulum::DAMPING)?,
            self.required(pendulum::INITIAL_ANGLE)?.to_radians(),
        )
    }

    /// Parameter set described by an oscillator panel.
    ///
    /// # Errors
    ///
    /// Returns error if a slider is missing or the values are invalid.
    pub fn oscillator_params(&self) -> SimResult<OscillatorParams> {
        OscillatorParams::new(
            self.required(oscillator::MASS)?,
            self.required(oscillator::SPRING_CONSTANT)?,
            self.required(oscillator::AMPLITUDE)?,
            self.required(oscillator::DAMPING)?,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slider() -> Slider {
        Slider::from_spec("Length", &SliderSpec::new(0.1, 2.0, 0.1, 1.0))
    }

    #[test]
    fn test_set_clamps_to_bounds() {
        let mut s = slider();
        assert!(s.set(5.0));
        assert_eq!(s.value(), 2.0);
        assert!(s.set(-3.0));
        assert_eq!(s.value(), 0.1);
    }

    #[test]
    fn test_set_snaps_to_step() {
        let mut s = slider();
        s.set(1.234);
        assert!((s.value() - 1.2).abs() < 1e-9);
    }

    #[test]
    fn test_set_ignores_nan() {
        let mut s = slider();
        assert!(!s.set(f64::NAN));
        assert_eq!(s.value(), 1.0);
    }

    #[test]
    fn test_set_same_value_reports_no_change() {
        let mut s = slider();
        s.set(1.5);
        assert!(!s.set(1.5));
    }

    #[test]
    fn test_nudge_and_reset() {
        let mut s = slider();
        assert!(s.nudge(3));
        assert!((s.value() - 1.3).abs() < 1e-9);
        assert!(s.reset());
        assert_eq!(s.value(), 1.0);
        assert!(!s.reset());
    }

    #[test]
    fn test_fraction() {
        let s = Slider::from_spec("x", &SliderSpec::new(0.0, 10.0, 1.0, 2.5));
        assert!((s.fraction() - 0.25).abs() < 1e-12);
    }

    #[test]
    fn test_panel_focus_wraps() {
        let mut panel = ControlPanel::pendulum(&PendulumConfig::default());
        assert_eq!(panel.focus(), 0);
        panel.focus_prev();
        assert_eq!(panel.focus(), pendulum::INITIAL_ANGLE);
        panel.focus_next();
        assert_eq!(panel.focus(), pendulum::LENGTH);
    }

    #[test]
    fn test_panel_nudge_focused() {
        let mut panel = ControlPanel::pendulum(&PendulumConfig::default());
        panel.focus_next();
        assert!(panel.nudge_focused(-8));
        let gravity = panel.value(pendulum::GRAVITY).expect("gravity");
        assert!((gravity - 9.0).abs() < 1e-9);
    }

    #[test]
    fn test_panel_reset_all() {
        let mut panel = ControlPanel::oscillator(&OscillatorConfig::default());
        assert!(!panel.reset_all());
        panel.set(oscillator::MASS, 3.0);
        panel.set(oscillator::DAMPING, 0.5);
        assert!(panel.reset_all());
        assert_eq!(panel.value(oscillator::MASS), Some(1.0));
        assert_eq!(panel.value(oscillator::DAMPING), Some(0.1));
    }

    #[test]
    fn test_panel_params_match_config_defaults() {
        let config = PendulumConfig::default();
        let panel = ControlPanel::pendulum(&config);
        let params = panel.pendulum_params().expect("params");
        assert_eq!(params, PendulumParams::from_config(&config).expect("config"));

        let config = OscillatorConfig::default();
        let panel = ControlPanel::oscillator(&config);
        let params = panel.oscillator_params().expect("params");
        assert_eq!(params, OscillatorParams::from_config(&config).expect("config"));
    }

    #[test]
    fn test_panel_missing_slider_is_error() {
        let panel = ControlPanel::new(Vec::new());
        assert!(panel.pendulum_params().is_err());
        assert_eq!(panel.value(0), None);
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Any non-NaN write lands inside the slider range.
        #[test]
        fn prop_set_stays_in_range(raw in proptest::num::f64::ANY) {
            let mut s = Slider::from_spec("x", &SliderSpec::new(0.1, 2.0, 0.1, 1.0));
            s.set(raw);
            prop_assert!(s.value() >= 0.1 && s.value() <= 2.0);
        }
    }
}
