//! CLI command handlers.

use std::path::Path;
use std::process::ExitCode;

use crate::config::SimConfig;
use crate::domains::physics::PendulumQuantities;
use crate::error::SimResult;
use crate::logging;
use crate::scenarios::pendulum::{
    measure_period, PendulumIntegrator, PendulumParams, PendulumState,
};

use super::output::{format_pendulum_report, format_summary, print_help, print_version};
use super::{Args, Command};

/// Main CLI entry point.
#[must_use]
pub fn run_cli(args: Args) -> ExitCode {
    match args.command {
        Command::Info { config_path } => info(config_path.as_deref()),
        Command::Check { config_path } => check(&config_path),
        Command::Pendulum {
            config_path,
            steps,
            dt,
        } => pendulum(config_path.as_deref(), steps, dt),
        Command::Help => {
            print_help();
            ExitCode::SUCCESS
        }
        Command::Version => {
            print_version();
            ExitCode::SUCCESS
        }
    }
}

/// Load a configuration file, or the built-in defaults when `path` is `None`.
///
/// # Errors
///
/// Returns error if the file cannot be read, parsed or validated.
pub fn load_config(path: Option<&Path>) -> SimResult<SimConfig> {
    path.map_or_else(|| Ok(SimConfig::default()), SimConfig::load)
}

fn load_with_logging(path: Option<&Path>) -> SimResult<SimConfig> {
    let config = load_config(path)?;
    if let Err(e) = logging::init(&config.logging) {
        eprintln!("Warning: {e}");
    }
    Ok(config)
}

fn info(path: Option<&Path>) -> ExitCode {
    print_version();
    let summary = load_with_logging(path).and_then(|config| format_summary(&config));
    match summary {
        Ok(text) => {
            println!("{text}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn check(path: &Path) -> ExitCode {
    match load_config(Some(path)) {
        Ok(_) => {
            println!("✓ {} is valid", path.display());
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("✗ {}: {e}", path.display());
            ExitCode::FAILURE
        }
    }
}

fn pendulum(path: Option<&Path>, steps: usize, dt: f64) -> ExitCode {
    let report = load_with_logging(path).and_then(|config| simulate_pendulum(&config, steps, dt));
    match report {
        Ok(report) => {
            println!("{}", format_pendulum_report(&report));
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

/// Outcome of a headless pendulum run.
#[derive(Debug, Clone, PartialEq)]
pub struct PendulumRunReport {
    /// Steps taken.
    pub steps: usize,
    /// Effective step size after clamping (s).
    pub dt: f64,
    /// State after the last step.
    pub final_state: PendulumState,
    /// Total energy at release (J).
    pub initial_energy: f64,
    /// Total energy after the last step (J).
    pub final_energy: f64,
    /// Small-angle period `2π√(L/g)` (s).
    pub predicted_period: f64,
    /// Period measured from zero crossings (s).
    pub measured_period: Option<f64>,
}

/// Integrate the configured pendulum from rest for `steps` steps of `dt`.
///
/// # Errors
///
/// Returns error if the configured initial values are invalid.
pub fn simulate_pendulum(config: &SimConfig, steps: usize, dt: f64) -> SimResult<PendulumRunReport> {
    let params = PendulumParams::from_config(&config.pendulum)?;
    let integrator = PendulumIntegrator::new(config.pendulum.max_dt)?;
    let dt = crate::engine::clamp_dt(dt, integrator.max_dt());

    let initial = PendulumState::at_rest(params.initial_angle());
    let final_state = (0..steps).fold(initial, |state, _| integrator.advance(state, &params, dt));

    let start = PendulumQuantities::compute(&initial, &params);
    let end = PendulumQuantities::compute(&final_state, &params);
    tracing::info!(steps, dt, "headless pendulum run finished");

    Ok(PendulumRunReport {
        steps,
        dt,
        final_state,
        initial_energy: start.total_energy,
        final_energy: end.total_energy,
        predicted_period: start.period,
        measured_period: measure_period(&params, &integrator, dt, steps),
    })
}
