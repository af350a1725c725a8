//! CLI module for oscisim.
//!
//! All CLI logic lives here so `main.rs` stays a thin wrapper and every
//! command is reachable from tests.

mod args;
mod commands;
mod output;

pub use args::{Args, Command, DEFAULT_DT, DEFAULT_STEPS};
pub use commands::{load_config, run_cli, simulate_pendulum, PendulumRunReport};
pub use output::{format_pendulum_report, format_summary, print_help, print_version};
