//! Domain calculations shared by the simulation engines.
//!
//! - Physics: periods, frequencies and energies derived from parameters

pub mod physics;

pub use physics::{pendulum_period, OscillatorQuantities, PendulumQuantities, BOB_MASS};
