//! Interactive simulation scenarios.
//!
//! - Simple pendulum integrated frame by frame (Euler, capped `dt`)
//! - Damped spring-mass oscillator evaluated in closed form on a fixed grid

pub mod oscillator;
pub mod pendulum;

pub use oscillator::{position_at, DampingRegime, OscillatorParams, OscillatorSession, SampleGrid};
pub use pendulum::{
    measure_period, PendulumIntegrator, PendulumParams, PendulumSession, PendulumState,
};
