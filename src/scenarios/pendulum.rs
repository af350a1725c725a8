//! Simple pendulum: parameters, angular state, Euler integrator and session.
//!
//! The bob hangs from a fixed pivot on a massless string. Angles are measured
//! from the downward vertical; positive angles swing the bob to the right.

use serde::{Deserialize, Serialize};

use crate::config::PendulumConfig;
use crate::domains::physics::PendulumQuantities;
use crate::engine::{clamp_dt, RunState};
use crate::error::{SimError, SimResult};
use crate::render::TrailBuffer;

/// Tunable pendulum constants.
///
/// Length and gravity are strictly positive for every constructed value,
/// including deserialized ones.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawPendulumParams")]
pub struct PendulumParams {
    length: f64,
    gravity: f64,
    damping: f64,
    initial_angle: f64,
}

#[derive(Deserialize)]
struct RawPendulumParams {
    length: f64,
    gravity: f64,
    damping: f64,
    initial_angle: f64,
}

impl TryFrom<RawPendulumParams> for PendulumParams {
    type Error = SimError;

    fn try_from(raw: RawPendulumParams) -> SimResult<Self> {
        Self::new(raw.length, raw.gravity, raw.damping, raw.initial_angle)
    }
}

impl Default for PendulumParams {
    fn default() -> Self {
        Self {
            length: 1.0,
            gravity: 9.8,
            damping: 0.005,
            initial_angle: 30.0_f64.to_radians(),
        }
    }
}

impl PendulumParams {
    /// Create a validated parameter set.
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` if length or gravity is not strictly
    /// positive, damping is negative, or any value is non-finite.
    pub fn new(length: f64, gravity: f64, damping: f64, initial_angle: f64) -> SimResult<Self> {
        if !(length.is_finite() && length > 0.0) {
            return Err(SimError::invalid_parameter(
                "length",
                length,
                "must be finite and strictly positive",
            ));
        }
        if !(gravity.is_finite() && gravity > 0.0) {
            return Err(SimError::invalid_parameter(
                "gravity",
                gravity,
                "must be finite and strictly positive",
            ));
        }
        if !(damping.is_finite() && damping >= 0.0) {
            return Err(SimError::invalid_parameter(
                "damping",
                damping,
                "must be finite and non-negative",
            ));
        }
        if !initial_angle.is_finite() {
            return Err(SimError::invalid_parameter(
                "initial_angle",
                initial_angle,
                "must be finite",
            ));
        }
        Ok(Self {
            length,
            gravity,
            damping,
            initial_angle,
        })
    }

    /// Build the startup parameter set from slider initial values.
    ///
    /// # Errors
    ///
    /// Propagates validation failures from [`PendulumParams::new`].
    pub fn from_config(config: &PendulumConfig) -> SimResult<Self> {
        Self::new(
            config.length.initial,
            config.gravity.initial,
            config.damping.initial,
            config.initial_angle_deg.initial.to_radians(),
        )
    }

    /// String length (m).
    #[must_use]
    pub const fn length(&self) -> f64 {
        self.length
    }

    /// Gravitational acceleration (m/s²).
    #[must_use]
    pub const fn gravity(&self) -> f64 {
        self.gravity
    }

    /// Damping coefficient (1/s).
    #[must_use]
    pub const fn damping(&self) -> f64 {
        self.damping
    }

    /// Angle restored on reset (rad).
    #[must_use]
    pub const fn initial_angle(&self) -> f64 {
        self.initial_angle
    }
}

/// Angular state of the bob.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PendulumState {
    /// Angle from the downward vertical (rad). Unbounded.
    pub angle: f64,
    /// Angular velocity (rad/s).
    pub angular_velocity: f64,
    /// Angular acceleration of the last step (rad/s²).
    pub angular_acceleration: f64,
}

impl PendulumState {
    /// Bob released from rest at `angle`.
    #[must_use]
    pub const fn at_rest(angle: f64) -> Self {
        Self {
            angle,
            angular_velocity: 0.0,
            angular_acceleration: 0.0,
        }
    }

    /// Bob offset from the pivot in meters, `(right, down)`.
    #[must_use]
    pub fn bob_offset(&self, length: f64) -> (f64, f64) {
        (length * self.angle.sin(), length * self.angle.cos())
    }
}

/// Explicit Euler integrator with a capped time step.
///
/// The cap is finite and strictly positive.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawPendulumIntegrator")]
pub struct PendulumIntegrator {
    max_dt: f64,
}

#[derive(Deserialize)]
struct RawPendulumIntegrator {
    max_dt: f64,
}

impl TryFrom<RawPendulumIntegrator> for PendulumIntegrator {
    type Error = SimError;

    fn try_from(raw: RawPendulumIntegrator) -> SimResult<Self> {
        Self::new(raw.max_dt)
    }
}

impl Default for PendulumIntegrator {
    fn default() -> Self {
        Self {
            max_dt: Self::DEFAULT_MAX_DT,
        }
    }
}

impl PendulumIntegrator {
    /// Default step cap (s).
    pub const DEFAULT_MAX_DT: f64 = 0.05;

    /// Create an integrator with the given step cap.
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` unless the cap is finite and strictly
    /// positive.
    pub fn new(max_dt: f64) -> SimResult<Self> {
        if !(max_dt.is_finite() && max_dt > 0.0) {
            return Err(SimError::invalid_parameter(
                "max_dt",
                max_dt,
                "must be finite and strictly positive",
            ));
        }
        Ok(Self { max_dt })
    }

    /// Step cap (s).
    #[must_use]
    pub const fn max_dt(&self) -> f64 {
        self.max_dt
    }

    /// Advance the state by one step of `dt` seconds (clamped to the cap).
    ///
    /// Velocity is updated before angle, so the new angle uses the new
    /// velocity. Large damping or large steps can gain energy; that is the
    /// accepted behavior of the scheme.
    #[must_use]
    pub fn advance(&self, state: PendulumState, params: &PendulumParams, dt: f64) -> PendulumState {
        let dt = clamp_dt(dt, self.max_dt);
        if dt == 0.0 {
            return state;
        }

        let mut acceleration = -(params.gravity / params.length) * state.angle.sin();
        acceleration -= params.damping * state.angular_velocity;
        let angular_velocity = state.angular_velocity + acceleration * dt;
        let angle = state.angle + angular_velocity * dt;

        PendulumState {
            angle,
            angular_velocity,
            angular_acceleration: acceleration,
        }
    }
}

/// Release the bob from rest at the initial angle and measure the mean time
/// between upward zero crossings over `steps` steps of `dt`.
///
/// Returns `None` when fewer than two crossings occur.
#[must_use]
pub fn measure_period(
    params: &PendulumParams,
    integrator: &PendulumIntegrator,
    dt: f64,
    steps: usize,
) -> Option<f64> {
    let dt = clamp_dt(dt, integrator.max_dt());
    let mut state = PendulumState::at_rest(params.initial_angle);
    let mut first: Option<f64> = None;
    let mut last = 0.0;
    let mut crossings = 0_usize;

    for step in 0..steps {
        let next = integrator.advance(state, params, dt);
        if state.angle < 0.0 && next.angle >= 0.0 {
            let frac = -state.angle / (next.angle - state.angle);
            let t = (step as f64 + frac) * dt;
            first.get_or_insert(t);
            last = t;
            crossings += 1;
        }
        state = next;
    }

    match first {
        Some(first) if crossings >= 2 => Some((last - first) / (crossings - 1) as f64),
        _ => None,
    }
}

/// One pendulum simulation: parameters, state, run state and trail.
#[derive(Debug, Clone)]
pub struct PendulumSession {
    params: PendulumParams,
    state: PendulumState,
    integrator: PendulumIntegrator,
    run_state: RunState,
    trail: TrailBuffer,
    quantities: PendulumQuantities,
    sim_time: f64,
    step_count: u64,
}

impl PendulumSession {
    /// Create a stopped session with the bob at rest at the initial angle.
    #[must_use]
    pub fn new(params: PendulumParams, integrator: PendulumIntegrator, trail_capacity: usize) -> Self {
        let state = PendulumState::at_rest(params.initial_angle);
        tracing::debug!(
            length = params.length,
            gravity = params.gravity,
            damping = params.damping,
            initial_angle = params.initial_angle,
            "pendulum session created"
        );
        Self {
            params,
            state,
            integrator,
            run_state: RunState::Stopped,
            trail: TrailBuffer::new(trail_capacity),
            quantities: PendulumQuantities::compute(&state, &params),
            sim_time: 0.0,
            step_count: 0,
        }
    }

    /// Create a session from configuration.
    ///
    /// # Errors
    ///
    /// Returns error if the configured initial values are invalid.
    pub fn from_config(config: &PendulumConfig) -> SimResult<Self> {
        let params = PendulumParams::from_config(config)?;
        Ok(Self::new(
            params,
            PendulumIntegrator::new(config.max_dt)?,
            config.trail_capacity,
        ))
    }

    /// Current parameters.
    #[must_use]
    pub const fn params(&self) -> &PendulumParams {
        &self.params
    }

    /// Current angular state.
    #[must_use]
    pub const fn state(&self) -> &PendulumState {
        &self.state
    }

    /// Current run state.
    #[must_use]
    pub const fn run_state(&self) -> RunState {
        self.run_state
    }

    /// Recent bob offsets from the pivot (m).
    #[must_use]
    pub const fn trail(&self) -> &TrailBuffer {
        &self.trail
    }

    /// Derived quantities for display.
    #[must_use]
    pub const fn quantities(&self) -> &PendulumQuantities {
        &self.quantities
    }

    /// Simulated seconds since the last reset.
    #[must_use]
    pub const fn sim_time(&self) -> f64 {
        self.sim_time
    }

    /// Steps taken since the last reset.
    #[must_use]
    pub const fn step_count(&self) -> u64 {
        self.step_count
    }

    /// Start or resume.
    pub fn start(&mut self) {
        self.transition(self.run_state.start());
    }

    /// Pause a running simulation.
    pub fn pause(&mut self) {
        self.transition(self.run_state.pause());
    }

    /// Return to `Stopped` at the initial angle with an empty trail.
    pub fn reset(&mut self) {
        self.transition(self.run_state.reset());
        self.state = PendulumState::at_rest(self.params.initial_angle);
        self.trail.clear();
        self.sim_time = 0.0;
        self.step_count = 0;
        self.refresh_quantities();
    }

    fn transition(&mut self, next: RunState) {
        if next != self.run_state {
            tracing::info!(from = self.run_state.label(), to = next.label(), "pendulum run state");
            self.run_state = next;
        }
    }

    /// Replace the parameter set if it differs from the current one.
    ///
    /// A changed initial angle also moves the live bob to that angle.
    /// Returns whether anything changed.
    pub fn apply_params(&mut self, params: PendulumParams) -> bool {
        if params == self.params {
            return false;
        }
        if params.initial_angle != self.params.initial_angle {
            self.state.angle = params.initial_angle;
        }
        tracing::debug!(
            length = params.length,
            gravity = params.gravity,
            damping = params.damping,
            initial_angle = params.initial_angle,
            "pendulum parameters changed"
        );
        self.params = params;
        self.refresh_quantities();
        true
    }

    /// Process one frame. Only a running session integrates and records
    /// the trail. Returns whether physics advanced.
    pub fn tick(&mut self, dt: f64) -> bool {
        if !self.run_state.is_running() {
            return false;
        }
        let step = clamp_dt(dt, self.integrator.max_dt());
        if step < dt || dt.is_nan() {
            tracing::trace!(dt, step, "frame time step clamped");
        }

        self.state = self.integrator.advance(self.state, &self.params, step);
        self.trail.push(self.state.bob_offset(self.params.length));
        self.sim_time += step;
        self.step_count += 1;
        self.refresh_quantities();
        true
    }

    fn refresh_quantities(&mut self) {
        self.quantities = PendulumQuantities::compute(&self.state, &self.params);
    }
}
