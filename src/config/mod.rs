//! Configuration system with YAML schema and validation.
//!
//! Implements Poka-Yoke (mistake-proofing) through:
//! - Type-safe configuration structs
//! - Schema validation via `validator`
//! - Runtime semantic validation of slider ranges
//!
//! Slider ranges are the parameter-validation boundary: a range whose minimum
//! is not strictly positive for length, gravity, mass, spring constant or
//! amplitude is rejected here so the physics core never sees it.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use validator::Validate;

use crate::error::{SimError, SimResult};

/// Top-level simulator configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct SimConfig {
    /// Schema version for forward compatibility.
    #[validate(length(min = 1))]
    #[serde(default = "default_schema_version")]
    pub schema_version: String,

    /// Pendulum engine settings.
    #[validate(nested)]
    #[serde(default)]
    pub pendulum: PendulumConfig,

    /// Spring-mass oscillator settings.
    #[validate(nested)]
    #[serde(default)]
    pub oscillator: OscillatorConfig,

    /// Renderer boundary settings (screen geometry, pixel scale).
    #[validate(nested)]
    #[serde(default)]
    pub render: RenderConfig,

    /// Logging settings.
    #[validate(nested)]
    #[serde(default)]
    pub logging: LoggingConfig,
}

fn default_schema_version() -> String {
    "1.0".to_string()
}

impl SimConfig {
    /// Load configuration from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - File cannot be read
    /// - YAML parsing fails
    /// - Validation fails
    pub fn load<P: AsRef<Path>>(path: P) -> SimResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        let config = Self::from_yaml(&content)?;
        tracing::debug!(path = %path.display(), "loaded configuration");
        Ok(config)
    }

    /// Parse configuration from YAML string.
    ///
    /// # Errors
    ///
    /// Returns error if parsing or validation fails.
    pub fn from_yaml(yaml: &str) -> SimResult<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.check()?;
        Ok(config)
    }

    /// Run schema and semantic validation.
    ///
    /// # Errors
    ///
    /// Returns the first violated constraint.
    pub fn check(&self) -> SimResult<()> {
        self.validate()?;
        self.validate_semantic()
    }

    /// Create a builder for configuration.
    #[must_use]
    pub fn builder() -> SimConfigBuilder {
        SimConfigBuilder::default()
    }

    /// Validate semantic constraints beyond schema.
    fn validate_semantic(&self) -> SimResult<()> {
        let p = &self.pendulum;
        p.length.check("pendulum.length", Bound::Positive)?;
        p.gravity.check("pendulum.gravity", Bound::Positive)?;
        p.damping.check("pendulum.damping", Bound::NonNegative)?;
        p.initial_angle_deg
            .check("pendulum.initial_angle_deg", Bound::Any)?;

        let o = &self.oscillator;
        o.mass.check("oscillator.mass", Bound::Positive)?;
        o.spring_constant
            .check("oscillator.spring_constant", Bound::Positive)?;
        o.amplitude.check("oscillator.amplitude", Bound::Positive)?;
        o.damping.check("oscillator.damping", Bound::NonNegative)?;

        if !p.max_dt.is_finite() || p.max_dt <= 0.0 {
            return Err(SimError::config("pendulum.max_dt must be positive"));
        }
        if !o.duration_s.is_finite() {
            return Err(SimError::config("oscillator.duration_s must be finite"));
        }
        if !self.render.pixels_per_meter.is_finite() {
            return Err(SimError::config("render.pixels_per_meter must be finite"));
        }

        Ok(())
    }
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            pendulum: PendulumConfig::default(),
            oscillator: OscillatorConfig::default(),
            render: RenderConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

/// Configuration builder for programmatic construction.
#[derive(Debug, Default)]
pub struct SimConfigBuilder {
    max_dt: Option<f64>,
    trail_capacity: Option<usize>,
    duration_s: Option<f64>,
    samples: Option<usize>,
    pixels_per_meter: Option<f64>,
    log_level: Option<String>,
}

impl SimConfigBuilder {
    /// Set the pendulum time-step cap in seconds.
    #[must_use]
    pub const fn max_dt(mut self, dt: f64) -> Self {
        self.max_dt = Some(dt);
        self
    }

    /// Set the pendulum trail capacity.
    #[must_use]
    pub const fn trail_capacity(mut self, capacity: usize) -> Self {
        self.trail_capacity = Some(capacity);
        self
    }

    /// Set the oscillator sample-grid duration in seconds.
    #[must_use]
    pub const fn duration(mut self, seconds: f64) -> Self {
        self.duration_s = Some(seconds);
        self
    }

    /// Set the number of oscillator grid samples.
    #[must_use]
    pub const fn samples(mut self, samples: usize) -> Self {
        self.samples = Some(samples);
        self
    }

    /// Set the renderer pixel scale.
    #[must_use]
    pub const fn pixels_per_meter(mut self, ppm: f64) -> Self {
        self.pixels_per_meter = Some(ppm);
        self
    }

    /// Set the log level filter.
    #[must_use]
    pub fn log_level(mut self, level: impl Into<String>) -> Self {
        self.log_level = Some(level.into());
        self
    }

    /// Build the configuration.
    #[must_use]
    pub fn build(self) -> SimConfig {
        let mut config = SimConfig::default();

        if let Some(dt) = self.max_dt {
            config.pendulum.max_dt = dt;
        }
        if let Some(capacity) = self.trail_capacity {
            config.pendulum.trail_capacity = capacity;
        }
        if let Some(duration) = self.duration_s {
            config.oscillator.duration_s = duration;
        }
        if let Some(samples) = self.samples {
            config.oscillator.samples = samples;
        }
        if let Some(ppm) = self.pixels_per_meter {
            config.render.pixels_per_meter = ppm;
        }
        if let Some(level) = self.log_level {
            config.logging.level = level;
        }

        config
    }
}

/// Lower-bound rule applied to a slider range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Bound {
    Positive,
    NonNegative,
    Any,
}

/// Range, step and initial value of one tunable parameter.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SliderSpec {
    /// Smallest allowed value.
    pub min: f64,
    /// Largest allowed value.
    pub max: f64,
    /// Step granularity.
    pub step: f64,
    /// Value at startup and after a slider reset.
    pub initial: f64,
}

impl SliderSpec {
    /// Create a new slider specification.
    #[must_use]
    pub const fn new(min: f64, max: f64, step: f64, initial: f64) -> Self {
        Self {
            min,
            max,
            step,
            initial,
        }
    }

    fn check(&self, name: &str, bound: Bound) -> SimResult<()> {
        let values = [self.min, self.max, self.step, self.initial];
        if values.iter().any(|v| !v.is_finite()) {
            return Err(SimError::config(format!("{name}: values must be finite")));
        }
        if self.min >= self.max {
            return Err(SimError::config(format!(
                "{name}: min ({}) must be below max ({})",
                self.min, self.max
            )));
        }
        if self.step <= 0.0 {
            return Err(SimError::config(format!("{name}: step must be positive")));
        }
        if self.initial < self.min || self.initial > self.max {
            return Err(SimError::config(format!(
                "{name}: initial value {} outside [{}, {}]",
                self.initial, self.min, self.max
            )));
        }
        match bound {
            Bound::Positive if self.min <= 0.0 => Err(SimError::config(format!(
                "{name}: min must be strictly positive, got {}",
                self.min
            ))),
            Bound::NonNegative if self.min < 0.0 => Err(SimError::config(format!(
                "{name}: min must not be negative, got {}",
                self.min
            ))),
            _ => Ok(()),
        }
    }
}

/// Pendulum engine configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(default, deny_unknown_fields)]
pub struct PendulumConfig {
    /// String length (m).
    pub length: SliderSpec,
    /// Gravitational acceleration (m/s²).
    pub gravity: SliderSpec,
    /// Damping coefficient (1/s).
    pub damping: SliderSpec,
    /// Initial angle (degrees from vertical).
    pub initial_angle_deg: SliderSpec,
    /// Upper bound on the integration step (s).
    #[validate(range(min = 0.000_001, max = 1.0))]
    pub max_dt: f64,
    /// Number of bob positions kept for the trail.
    #[validate(range(min = 1, max = 100_000))]
    pub trail_capacity: usize,
    /// Target frame rate of the front end.
    #[validate(range(min = 1, max = 1000))]
    pub frame_rate_hz: u32,
}

impl Default for PendulumConfig {
    fn default() -> Self {
        Self {
            length: SliderSpec::new(0.1, 2.0, 0.1, 1.0),
            gravity: SliderSpec::new(1.0, 20.0, 0.1, 9.8),
            damping: SliderSpec::new(0.0, 0.1, 0.001, 0.005),
            initial_angle_deg: SliderSpec::new(0.0, 90.0, 1.0, 30.0),
            max_dt: 0.05,
            trail_capacity: 100,
            frame_rate_hz: 60,
        }
    }
}

/// Spring-mass oscillator configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(default, deny_unknown_fields)]
pub struct OscillatorConfig {
    /// Mass (kg).
    pub mass: SliderSpec,
    /// Spring constant (N/m).
    pub spring_constant: SliderSpec,
    /// Initial displacement (m).
    pub amplitude: SliderSpec,
    /// Damping coefficient (kg/s).
    pub damping: SliderSpec,
    /// Span of the sample grid (s).
    #[validate(range(min = 0.001))]
    pub duration_s: f64,
    /// Number of grid points, endpoints included.
    #[validate(range(min = 2, max = 1_000_000))]
    pub samples: usize,
    /// Animation frame interval (ms).
    #[validate(range(min = 1, max = 10_000))]
    pub interval_ms: u64,
}

impl Default for OscillatorConfig {
    fn default() -> Self {
        Self {
            mass: SliderSpec::new(0.1, 5.0, 0.01, 1.0),
            spring_constant: SliderSpec::new(1.0, 30.0, 0.1, 10.0),
            amplitude: SliderSpec::new(0.1, 2.0, 0.01, 1.0),
            damping: SliderSpec::new(0.0, 1.0, 0.01, 0.1),
            duration_s: 10.0,
            samples: 1000,
            interval_ms: 20,
        }
    }
}

/// Renderer boundary configuration.
///
/// The pixel scale lives here and nowhere in the physics core.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(default, deny_unknown_fields)]
pub struct RenderConfig {
    /// Pixels per physical meter.
    #[validate(range(min = 0.001))]
    pub pixels_per_meter: f64,
    /// Surface width (px).
    #[validate(range(min = 1.0))]
    pub width: f64,
    /// Surface height (px).
    #[validate(range(min = 1.0))]
    pub height: f64,
    /// Pivot x (px).
    pub pivot_x: f64,
    /// Pivot y (px, grows downward).
    pub pivot_y: f64,
    /// Bob radius (px).
    #[validate(range(min = 0.0))]
    pub bob_radius: f64,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            pixels_per_meter: 150.0,
            width: 800.0,
            height: 600.0,
            pivot_x: 400.0,
            pivot_y: 100.0,
            bob_radius: 20.0,
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingConfig {
    /// `tracing` filter directive (e.g. "warn", "oscisim=debug").
    #[validate(length(min = 1))]
    pub level: String,
    /// Optional log file; the TUI front ends only log when this is set.
    pub file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            file: None,
        }
    }
}
