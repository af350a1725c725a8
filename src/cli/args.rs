//! CLI argument parsing.
//!
//! Accepts any iterator of strings so parsing is testable without touching
//! `std::env::args()`.

use std::path::PathBuf;

/// Default number of steps for a headless pendulum run.
pub const DEFAULT_STEPS: usize = 1000;
/// Default step size for a headless pendulum run (s).
pub const DEFAULT_DT: f64 = 0.01;

/// CLI arguments container.
#[derive(Debug, Clone, PartialEq)]
pub struct Args {
    /// The command to execute.
    pub command: Command,
}

/// Available CLI commands.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Print the derived quantities of a configuration's initial values.
    Info {
        /// Configuration file; built-in defaults when absent.
        config_path: Option<PathBuf>,
    },
    /// Validate a configuration file.
    Check {
        /// Configuration file.
        config_path: PathBuf,
    },
    /// Integrate the pendulum headlessly and report the result.
    Pendulum {
        /// Configuration file; built-in defaults when absent.
        config_path: Option<PathBuf>,
        /// Number of integration steps.
        steps: usize,
        /// Step size (s), clamped to the configured cap.
        dt: f64,
    },
    /// Show help
    Help,
    /// Show version
    Version,
}

impl Args {
    /// Parse command-line arguments from an iterator.
    #[must_use]
    pub fn parse_from<I, S>(args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let args: Vec<String> = args.into_iter().map(|s| s.as_ref().to_string()).collect();
        Self::parse_from_vec(&args)
    }

    /// Parse command-line arguments from the environment.
    #[must_use]
    pub fn parse() -> Self {
        Self::parse_from(std::env::args())
    }

    fn parse_from_vec(args: &[String]) -> Self {
        if args.len() < 2 {
            return Self {
                command: Command::Help,
            };
        }

        let command = match args[1].as_str() {
            "info" => Command::Info {
                config_path: args.get(2).map(PathBuf::from),
            },
            "check" => Self::parse_check_command(args),
            "pendulum" => Self::parse_pendulum_command(args),
            "-h" | "--help" | "help" => Command::Help,
            "-V" | "--version" | "version" => Command::Version,
            path if is_yaml_path(path) => Command::Info {
                config_path: Some(PathBuf::from(path)),
            },
            unknown => {
                eprintln!("Unknown command: {unknown}");
                Command::Help
            }
        };

        Self { command }
    }

    fn parse_check_command(args: &[String]) -> Command {
        args.get(2).map_or_else(
            || {
                eprintln!("Error: 'check' command requires a configuration path");
                Command::Help
            },
            |path| Command::Check {
                config_path: PathBuf::from(path),
            },
        )
    }

    fn parse_pendulum_command(args: &[String]) -> Command {
        let mut config_path = None;
        let mut steps = DEFAULT_STEPS;
        let mut dt = DEFAULT_DT;

        let mut i = 2;
        while i < args.len() {
            match args[i].as_str() {
                "--steps" => {
                    if let Some(n) = args.get(i + 1).and_then(|v| v.parse().ok()) {
                        steps = n;
                    }
                    i += 2;
                }
                "--dt" => {
                    if let Some(v) = args.get(i + 1).and_then(|v| v.parse().ok()) {
                        dt = v;
                    }
                    i += 2;
                }
                "--config" => {
                    config_path = args.get(i + 1).map(PathBuf::from);
                    i += 2;
                }
                arg if !arg.starts_with('-') && config_path.is_none() => {
                    config_path = Some(PathBuf::from(arg));
                    i += 1;
                }
                _ => i += 1,
            }
        }

        Command::Pendulum {
            config_path,
            steps,
            dt,
        }
    }
}

fn is_yaml_path(arg: &str) -> bool {
    std::path::Path::new(arg)
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml"))
}
