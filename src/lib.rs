//! # oscisim
//!
//! Interactive simulator for two classic oscillators:
//! - A simple pendulum integrated frame by frame with a capped Euler step
//! - A damped spring-mass oscillator evaluated in closed form on a time grid
//!
//! The core works in meters, radians and seconds. Front ends poll slider
//! values once per frame, feed them to a session, and replay the render
//! commands the session produces.
//!
//! ## Example
//!
//! ```rust
//! use oscisim::prelude::*;
//!
//! let mut session = PendulumSession::new(
//!     PendulumParams::default(),
//!     PendulumIntegrator::default(),
//!     100,
//! );
//! session.start();
//! session.tick(1.0 / 60.0);
//! assert_eq!(session.trail().len(), 1);
//! ```

#![forbid(unsafe_code)]
#![deny(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![warn(clippy::pedantic, clippy::nursery)]
#![allow(
    clippy::module_name_repetitions,
    clippy::similar_names,
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::suboptimal_flops,  // Formulas are written as they appear in the derivation
    clippy::imprecise_flops,
    clippy::float_cmp,         // Exact comparisons detect unchanged slider values
    clippy::missing_const_for_fn,
)]

pub mod cli;
pub mod config;
pub mod controls;
pub mod domains;
pub mod engine;
pub mod error;
pub mod logging;
pub mod render;
pub mod scenarios;
pub mod tui;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::config::{SimConfig, SimConfigBuilder};
    pub use crate::controls::{ControlAction, ControlPanel, Slider};
    pub use crate::domains::physics::{OscillatorQuantities, PendulumQuantities};
    pub use crate::engine::{clamp_dt, FrameClock, RunState};
    pub use crate::error::{SimError, SimResult};
    pub use crate::render::{RenderCommand, ScreenMapping, TrailBuffer};
    pub use crate::scenarios::oscillator::{
        position_at, DampingRegime, OscillatorParams, OscillatorSession, SampleGrid,
    };
    pub use crate::scenarios::pendulum::{
        PendulumIntegrator, PendulumParams, PendulumSession, PendulumState,
    };
}

/// Re-export for public API
pub use error::{SimError, SimResult};
