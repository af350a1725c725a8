//! Derived physical quantities for display.
//!
//! # Governing Equations
//!
//! ```text
//! Pendulum period:   T = 2π·√(L/g)
//! Kinetic energy:    KE = ½·m·L²·θ̇²
//! Potential energy:  PE = m·g·(h_bob − h_pivot) = −m·g·L·cos θ
//! Oscillator:        ω = √(k/m),  T = 2π/ω,  f = 1/T
//! ```
//!
//! Heights are measured upward, so the potential is lowest with the bob
//! hanging straight down.

use serde::{Deserialize, Serialize};

use crate::error::{SimError, SimResult};
use crate::scenarios::oscillator::{DampingRegime, OscillatorParams};
use crate::scenarios::pendulum::{PendulumParams, PendulumState};

/// Bob mass used for pendulum energies (unit mass).
pub const BOB_MASS: f64 = 1.0;

/// Small-angle pendulum period `2π√(L/g)`.
///
/// # Errors
///
/// Returns `UndefinedQuantity` unless both inputs are finite and strictly
/// positive.
pub fn pendulum_period(length: f64, gravity: f64) -> SimResult<f64> {
    if !(length.is_finite() && length > 0.0) {
        return Err(SimError::undefined(
            "period",
            format!("length must be strictly positive, got {length}"),
        ));
    }
    if !(gravity.is_finite() && gravity > 0.0) {
        return Err(SimError::undefined(
            "period",
            format!("gravity must be strictly positive, got {gravity}"),
        ));
    }
    Ok(period_unchecked(length, gravity))
}

fn period_unchecked(length: f64, gravity: f64) -> f64 {
    2.0 * std::f64::consts::PI * (length / gravity).sqrt()
}

/// Pendulum display values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PendulumQuantities {
    /// Small-angle period (s).
    pub period: f64,
    /// Angular velocity (rad/s).
    pub angular_velocity: f64,
    /// Kinetic energy (J).
    pub kinetic_energy: f64,
    /// Potential energy relative to the pivot (J).
    pub potential_energy: f64,
    /// Kinetic plus potential (J).
    pub total_energy: f64,
}

impl PendulumQuantities {
    /// Compute from a state and a validated parameter set.
    #[must_use]
    pub fn compute(state: &PendulumState, params: &PendulumParams) -> Self {
        let length = params.length();
        let gravity = params.gravity();
        let omega = state.angular_velocity;

        let kinetic_energy = 0.5 * BOB_MASS * length * length * omega * omega;
        let (_, depth) = state.bob_offset(length);
        let potential_energy = BOB_MASS * gravity * -depth;

        Self {
            period: period_unchecked(length, gravity),
            angular_velocity: omega,
            kinetic_energy,
            potential_energy,
            total_energy: kinetic_energy + potential_energy,
        }
    }
}

/// Oscillator display values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OscillatorQuantities {
    /// Natural angular frequency ω (rad/s).
    pub omega: f64,
    /// Natural period (s).
    pub period: f64,
    /// Natural frequency (Hz).
    pub frequency: f64,
    /// Decay rate γ = c/2m (1/s).
    pub gamma: f64,
    /// Damped angular frequency, when the motion oscillates.
    pub damped_omega: Option<f64>,
    /// Damping regime.
    pub regime: DampingRegime,
}

impl OscillatorQuantities {
    /// Compute from a validated parameter set.
    #[must_use]
    pub fn compute(params: &OscillatorParams) -> Self {
        let omega = (params.spring_constant() / params.mass()).sqrt();
        let period = 2.0 * std::f64::consts::PI / omega;
        let gamma = params.damping() / (2.0 * params.mass());
        let regime = DampingRegime::classify(omega, gamma);
        let damped_omega = match regime {
            DampingRegime::Undamped => Some(omega),
            DampingRegime::Underdamped => Some((omega * omega - gamma * gamma).sqrt()),
            DampingRegime::CriticallyOrOverdamped => None,
        };

        Self {
            omega,
            period,
            frequency: 1.0 / period,
            gamma,
            damped_omega,
            regime,
        }
    }
}
