//! CLI output formatting.
//!
//! Formatting returns strings so it can be asserted on; the `print_*`
//! wrappers only write them out.

use std::fmt::Write as _;

use crate::config::SimConfig;
use crate::domains::physics::{pendulum_period, OscillatorQuantities};
use crate::error::SimResult;
use crate::scenarios::oscillator::OscillatorParams;

use super::commands::PendulumRunReport;

/// Print version information.
pub fn print_version() {
    println!("oscisim {}", env!("CARGO_PKG_VERSION"));
}

/// Print help message.
pub fn print_help() {
    println!(
        r"oscisim - Interactive pendulum and spring-mass oscillator simulator

USAGE:
    oscisim <COMMAND> [OPTIONS]
    oscisim <config.yaml>          Same as 'info <config.yaml>'

COMMANDS:
    info [config.yaml]             Print derived quantities of the initial values
    check <config.yaml>            Validate a configuration file

    pendulum [config.yaml]         Integrate the pendulum without a display
        --config <config.yaml>     Same as the positional path (default: built-in)
        --steps <N>                Number of steps (default: 1000)
        --dt <SECONDS>             Step size (default: 0.01)

    help                           Show this help message
    version                        Show version information

INTERACTIVE FRONT ENDS:
    pendulum-tui [config.yaml]
    oscillator-tui [config.yaml]

ENVIRONMENT:
    OSCISIM_LOG                    Log filter, overrides logging.level
"
    );
}

/// Human-readable summary of a configuration's initial values.
///
/// # Errors
///
/// Returns error if the initial values do not form valid parameter sets.
pub fn format_summary(config: &SimConfig) -> SimResult<String> {
    let pendulum = &config.pendulum;
    let period = pendulum_period(pendulum.length.initial, pendulum.gravity.initial)?;
    let oscillator = OscillatorQuantities::compute(&OscillatorParams::from_config(&config.oscillator)?);

    let mut out = String::new();
    let _ = writeln!(out, "Pendulum");
    let _ = writeln!(out, "  Length:          {:.2} m", pendulum.length.initial);
    let _ = writeln!(out, "  Gravity:         {:.2} m/s²", pendulum.gravity.initial);
    let _ = writeln!(out, "  Dampening:       {:.3}", pendulum.damping.initial);
    let _ = writeln!(out, "  Initial angle:   {:.1}°", pendulum.initial_angle_deg.initial);
    let _ = writeln!(out, "  Period (T):      {period:.3} s");
    let _ = writeln!(out, "Oscillator");
    let _ = writeln!(out, "  Mass:            {:.2} kg", config.oscillator.mass.initial);
    let _ = writeln!(
        out,
        "  Spring constant: {:.2} N/m",
        config.oscillator.spring_constant.initial
    );
    let _ = writeln!(out, "  ω:               {:.3} rad/s", oscillator.omega);
    let _ = writeln!(out, "  Period:          {:.3} s", oscillator.period);
    let _ = writeln!(out, "  Frequency:       {:.3} Hz", oscillator.frequency);
    let _ = write!(out, "  Regime:          {}", oscillator.regime.label());
    Ok(out)
}

/// Human-readable report of a headless pendulum run.
#[must_use]
pub fn format_pendulum_report(report: &PendulumRunReport) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Steps:            {} × {:.4} s", report.steps, report.dt);
    let _ = writeln!(out, "Final angle:      {:.4} rad", report.final_state.angle);
    let _ = writeln!(
        out,
        "Final velocity:   {:.4} rad/s",
        report.final_state.angular_velocity
    );
    let _ = writeln!(out, "Energy:           {:.4} -> {:.4} J", report.initial_energy, report.final_energy);
    let _ = writeln!(out, "Predicted period: {:.4} s", report.predicted_period);
    match report.measured_period {
        Some(measured) => {
            let _ = write!(out, "Measured period:  {measured:.4} s");
        }
        None => {
            let _ = write!(out, "Measured period:  n/a (fewer than two crossings)");
        }
    }
    out
}
