//! Damped spring-mass oscillator evaluated in closed form.
//!
//! # Governing Equations
//!
//! ```text
//! ω  = √(k/m)
//! γ  = c / 2m
//! c = 0:        x(t) = A·cos(ωt)
//! ω² > γ²:      x(t) = A·e^(−γt)·cos(ω_d t),  ω_d = √(ω² − γ²)
//! otherwise:    x(t) = A·e^(−γt)
//! ```
//!
//! The last branch is an approximation: the exact overdamped solution is a
//! sum of two exponentials. It is kept deliberately so the displayed motion
//! matches the classic classroom plot.

use serde::{Deserialize, Serialize};

use crate::config::OscillatorConfig;
use crate::domains::physics::OscillatorQuantities;
use crate::error::{SimError, SimResult};

/// Tunable oscillator constants. Mass, spring constant and amplitude are
/// strictly positive for every constructed value, including deserialized
/// ones.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawOscillatorParams")]
pub struct OscillatorParams {
    mass: f64,
    spring_constant: f64,
    amplitude: f64,
    damping: f64,
}

#[derive(Deserialize)]
struct RawOscillatorParams {
    mass: f64,
    spring_constant: f64,
    amplitude: f64,
    damping: f64,
}

impl TryFrom<RawOscillatorParams> for OscillatorParams {
    type Error = SimError;

    fn try_from(raw: RawOscillatorParams) -> SimResult<Self> {
        Self::new(raw.mass, raw.spring_constant, raw.amplitude, raw.damping)
    }
}

impl Default for OscillatorParams {
    fn default() -> Self {
        Self {
            mass: 1.0,
            spring_constant: 10.0,
            amplitude: 1.0,
            damping: 0.1,
        }
    }
}

impl OscillatorParams {
    /// Create a validated parameter set.
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` if mass, spring constant or amplitude is
    /// not strictly positive, or damping is negative.
    pub fn new(mass: f64, spring_constant: f64, amplitude: f64, damping: f64) -> SimResult<Self> {
        for (name, value) in [
            ("mass", mass),
            ("spring_constant", spring_constant),
            ("amplitude", amplitude),
        ] {
            if !(value.is_finite() && value > 0.0) {
                return Err(SimError::invalid_parameter(
                    name,
                    value,
                    "must be finite and strictly positive",
                ));
            }
        }
        if !(damping.is_finite() && damping >= 0.0) {
            return Err(SimError::invalid_parameter(
                "damping",
                damping,
                "must be finite and non-negative",
            ));
        }
        Ok(Self {
            mass,
            spring_constant,
            amplitude,
            damping,
        })
    }

    /// Build the startup parameter set from slider initial values.
    ///
    /// # Errors
    ///
    /// Propagates validation failures from [`OscillatorParams::new`].
    pub fn from_config(config: &OscillatorConfig) -> SimResult<Self> {
        Self::new(
            config.mass.initial,
            config.spring_constant.initial,
            config.amplitude.initial,
            config.damping.initial,
        )
    }

    /// Mass (kg).
    #[must_use]
    pub const fn mass(&self) -> f64 {
        self.mass
    }

    /// Spring constant (N/m).
    #[must_use]
    pub const fn spring_constant(&self) -> f64 {
        self.spring_constant
    }

    /// Initial displacement (m).
    #[must_use]
    pub const fn amplitude(&self) -> f64 {
        self.amplitude
    }

    /// Damping coefficient (kg/s).
    #[must_use]
    pub const fn damping(&self) -> f64 {
        self.damping
    }

    /// Position at time `t` for this parameter set.
    #[must_use]
    pub fn position_at(&self, t: f64) -> f64 {
        position_at(t, self.amplitude, self.mass, self.spring_constant, self.damping)
    }
}

/// Damping regime of the oscillator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DampingRegime {
    /// No damping; pure cosine.
    Undamped,
    /// Decaying oscillation, `ω² > γ²`.
    Underdamped,
    /// No oscillation, `ω² ≤ γ²`; rendered as a single decaying exponential.
    CriticallyOrOverdamped,
}

impl DampingRegime {
    /// Classify from natural frequency `omega` and decay rate `gamma`.
    #[must_use]
    pub fn classify(omega: f64, gamma: f64) -> Self {
        if gamma == 0.0 {
            Self::Undamped
        } else if omega * omega > gamma * gamma {
            Self::Underdamped
        } else {
            Self::CriticallyOrOverdamped
        }
    }

    /// Display label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Undamped => "undamped",
            Self::Underdamped => "underdamped",
            Self::CriticallyOrOverdamped => "overdamped",
        }
    }
}

/// Closed-form position of a damped harmonic oscillator released from rest
/// at `amplitude`. Pure; `position_at(0.0, a, ..) == a` for every input.
#[must_use]
pub fn position_at(t: f64, amplitude: f64, mass: f64, spring_constant: f64, damping: f64) -> f64 {
    let omega = (spring_constant / mass).sqrt();
    if damping == 0.0 {
        return amplitude * (omega * t).cos();
    }

    let gamma = damping / (2.0 * mass);
    let envelope = amplitude * (-gamma * t).exp();
    match DampingRegime::classify(omega, gamma) {
        DampingRegime::Underdamped => {
            let omega_d = (omega * omega - gamma * gamma).sqrt();
            envelope * (omega_d * t).cos()
        }
        _ => envelope,
    }
}

/// Fixed, evenly spaced time axis `t_0 = 0 .. t_{N-1} = duration`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SampleGrid {
    times: Vec<f64>,
    spacing: f64,
    duration: f64,
}

impl Default for SampleGrid {
    /// 1000 samples over 10 s.
    fn default() -> Self {
        Self::linspace(10.0, 1000)
    }
}

impl SampleGrid {
    /// Create a grid of `samples` points over `[0, duration]`, endpoints
    /// included.
    ///
    /// # Errors
    ///
    /// Returns a configuration error for fewer than two samples or a
    /// non-positive duration.
    pub fn new(duration: f64, samples: usize) -> SimResult<Self> {
        if samples < 2 {
            return Err(SimError::config(format!(
                "sample grid needs at least 2 points, got {samples}"
            )));
        }
        if !(duration.is_finite() && duration > 0.0) {
            return Err(SimError::config(format!(
                "sample grid duration must be positive, got {duration}"
            )));
        }
        Ok(Self::linspace(duration, samples))
    }

    fn linspace(duration: f64, samples: usize) -> Self {
        let last = (samples - 1) as f64;
        let times = (0..samples)
            .map(|i| duration * i as f64 / last)
            .collect();
        Self {
            times,
            spacing: duration / last,
            duration,
        }
    }

    /// Sample times (s).
    #[must_use]
    pub fn times(&self) -> &[f64] {
        &self.times
    }

    /// Distance between consecutive samples (s).
    #[must_use]
    pub const fn spacing(&self) -> f64 {
        self.spacing
    }

    /// Span of the grid (s).
    #[must_use]
    pub const fn duration(&self) -> f64 {
        self.duration
    }

    /// Number of samples.
    #[must_use]
    pub fn len(&self) -> usize {
        self.times.len()
    }

    /// Whether the grid has no samples (never true for a constructed grid).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    /// Sample index for playback time `t`; wraps to zero past the end.
    #[must_use]
    pub fn index_at(&self, t: f64) -> usize {
        if !(t.is_finite() && t >= 0.0) {
            return 0;
        }
        let idx = (t / self.spacing) as usize;
        if idx >= self.times.len() {
            0
        } else {
            idx
        }
    }

    /// Evaluate the closed-form position at every grid time.
    #[must_use]
    pub fn evaluate(&self, params: &OscillatorParams) -> Vec<f64> {
        self.times.iter().map(|&t| params.position_at(t)).collect()
    }
}

/// One oscillator simulation: parameters, sample grid, positions and the
/// animation playhead.
#[derive(Debug, Clone)]
pub struct OscillatorSession {
    params: OscillatorParams,
    grid: SampleGrid,
    positions: Vec<f64>,
    quantities: OscillatorQuantities,
    frame: u64,
    interval_s: f64,
    recomputations: u64,
}

impl OscillatorSession {
    /// Create a session and evaluate the full grid once.
    #[must_use]
    pub fn new(params: OscillatorParams, grid: SampleGrid, interval_ms: u64) -> Self {
        let positions = grid.evaluate(&params);
        tracing::debug!(
            samples = grid.len(),
            duration = grid.duration(),
            "oscillator session created"
        );
        Self {
            params,
            positions,
            quantities: OscillatorQuantities::compute(&params),
            grid,
            frame: 0,
            interval_s: interval_ms as f64 / 1000.0,
            recomputations: 0,
        }
    }

    /// Create a session from configuration.
    ///
    /// # Errors
    ///
    /// Returns error if the configured initial values or grid are invalid.
    pub fn from_config(config: &OscillatorConfig) -> SimResult<Self> {
        let params = OscillatorParams::from_config(config)?;
        let grid = SampleGrid::new(config.duration_s, config.samples)?;
        Ok(Self::new(params, grid, config.interval_ms))
    }

    /// Current parameters.
    #[must_use]
    pub const fn params(&self) -> &OscillatorParams {
        &self.params
    }

    /// The fixed time axis.
    #[must_use]
    pub const fn grid(&self) -> &SampleGrid {
        &self.grid
    }

    /// Positions at every grid time for the current parameters.
    #[must_use]
    pub fn positions(&self) -> &[f64] {
        &self.positions
    }

    /// Derived quantities for display.
    #[must_use]
    pub const fn quantities(&self) -> &OscillatorQuantities {
        &self.quantities
    }

    /// Animation frames shown so far.
    #[must_use]
    pub const fn frame(&self) -> u64 {
        self.frame
    }

    /// Number of full-grid re-evaluations triggered by parameter changes.
    #[must_use]
    pub const fn recomputations(&self) -> u64 {
        self.recomputations
    }

    /// Replace the parameters if they differ, re-evaluating the ENTIRE grid
    /// and the derived quantities. The playhead is left untouched.
    pub fn apply_params(&mut self, params: OscillatorParams) -> bool {
        if params == self.params {
            return false;
        }
        self.params = params;
        self.positions = self.grid.evaluate(&self.params);
        self.quantities = OscillatorQuantities::compute(&self.params);
        self.recomputations += 1;
        tracing::debug!(
            mass = params.mass,
            spring_constant = params.spring_constant,
            amplitude = params.amplitude,
            damping = params.damping,
            regime = self.quantities.regime.label(),
            "oscillator grid recomputed"
        );
        true
    }

    /// Move the playhead one animation interval forward.
    pub fn advance_frame(&mut self) {
        self.frame += 1;
    }

    /// Playback time: elapsed animation time modulo the grid duration.
    #[must_use]
    pub fn playback_time(&self) -> f64 {
        (self.frame as f64 * self.interval_s) % self.grid.duration()
    }

    /// Grid index under the playhead.
    #[must_use]
    pub fn current_index(&self) -> usize {
        self.grid.index_at(self.playback_time())
    }

    /// Mass position under the playhead (m).
    #[must_use]
    pub fn current_position(&self) -> f64 {
        self.positions
            .get(self.current_index())
            .copied()
            .unwrap_or(self.params.amplitude)
    }

    /// Vertical bounds of the position-time plot, `±1.5·A`.
    #[must_use]
    pub fn plot_bounds(&self) -> (f64, f64) {
        let span = 1.5 * self.params.amplitude;
        (-span, span)
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Both cosine and exponential factors are one at t = 0.
        #[test]
        fn prop_initial_position_is_amplitude(
            amplitude in 0.1f64..2.0,
            mass in 0.1f64..5.0,
            k in 1.0f64..30.0,
            damping in 0.0f64..50.0,
        ) {
            prop_assert_eq!(position_at(0.0, amplitude, mass, k, damping), amplitude);
        }

        /// Damped motion never exceeds the initial amplitude.
        #[test]
        fn prop_position_bounded_by_amplitude(
            t in 0.0f64..10.0,
            amplitude in 0.1f64..2.0,
            mass in 0.1f64..5.0,
            k in 1.0f64..30.0,
            damping in 0.0f64..5.0,
        ) {
            let x = position_at(t, amplitude, mass, k, damping);
            prop_assert!(x.abs() <= amplitude * (1.0 + 1e-12));
        }

        /// Playback index is always a valid grid index.
        #[test]
        fn prop_index_in_range(
            t in -5.0f64..50.0,
            samples in 2usize..2000,
        ) {
            let grid = SampleGrid::new(10.0, samples).expect("grid");
            prop_assert!(grid.index_at(t) < grid.len());
        }
    }
}
