//! Error types for oscisim.
//!
//! Every fallible operation returns `SimResult<T>`. Physics functions are
//! total over valid inputs, so most variants describe a violated parameter
//! contract rather than a runtime failure.

use thiserror::Error;

/// Result type alias for oscisim operations.
pub type SimResult<T> = Result<T, SimError>;

/// Unified error type for all oscisim operations.
#[derive(Debug, Error)]
pub enum SimError {
    // ===== Physics Contract Errors =====
    /// A derived quantity has no defined value for the given inputs.
    #[error("Undefined quantity '{quantity}': {reason}")]
    UndefinedQuantity {
        /// Name of the quantity (e.g. "period").
        quantity: &'static str,
        /// Why it is undefined.
        reason: String,
    },

    /// A physical parameter is outside its valid domain.
    #[error("Invalid parameter '{name}' = {value}: {reason}")]
    InvalidParameter {
        /// Parameter name.
        name: &'static str,
        /// Rejected value.
        value: f64,
        /// Constraint that was violated.
        reason: &'static str,
    },

    // ===== Configuration Errors =====
    /// Invalid configuration parameter.
    #[error("Configuration error: {message}")]
    Config {
        /// Description of the configuration error.
        message: String,
    },

    /// YAML parsing error.
    #[error("YAML parsing error: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    /// Validation error.
    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    // ===== I/O Errors =====
    /// File I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Logging subscriber could not be installed.
    #[error("Logging error: {0}")]
    Logging(String),
}

impl SimError {
    /// Create a configuration error with a message.
    #[must_use]
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create an undefined-quantity error.
    #[must_use]
    pub fn undefined(quantity: &'static str, reason: impl Into<String>) -> Self {
        Self::UndefinedQuantity {
            quantity,
            reason: reason.into(),
        }
    }

    /// Create an invalid-parameter error.
    #[must_use]
    pub const fn invalid_parameter(name: &'static str, value: f64, reason: &'static str) -> Self {
        Self::InvalidParameter {
            name,
            value,
            reason,
        }
    }

    /// Check if this error comes from a violated parameter contract.
    #[must_use]
    pub const fn is_parameter_error(&self) -> bool {
        matches!(
            self,
            Self::UndefinedQuantity { .. } | Self::InvalidParameter { .. }
        )
    }
}
