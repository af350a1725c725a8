//! oscisim CLI - pendulum and spring-mass oscillator simulator
//!
//! Thin wrapper around [`oscisim::cli`].

use oscisim::cli::{run_cli, Args};
use std::process::ExitCode;

fn main() -> ExitCode {
    run_cli(Args::parse())
}
