//! Unified error hierarchy for steptracker
//!
//! Record parsing, input validation and activity resolution each get their
//! own error type; `TrackerError` ties them together for the public API.

use chrono::Duration;
use std::num::ParseIntError;
use thiserror::Error;

use crate::export::ExportError;

/// Top-level error type for all steptracker operations
#[derive(Debug, Error)]
pub enum TrackerError {
    /// Malformed input record
    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),

    /// Non-positive numeric input
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Activity label that maps to no known activity kind
    #[error("Unknown activity type: {label}")]
    UnknownActivity { label: String },

    /// A derived value could not be represented (NaN or infinite)
    #[error("Calculation error: {0}")]
    Calculation(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Export errors
    #[error("Export error: {0}")]
    Export(#[from] ExportError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors raised while splitting and decoding an input record
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseError {
    /// Record does not have the expected number of comma-separated fields
    #[error("expected {expected} comma-separated fields, got {actual}")]
    FieldCount { expected: usize, actual: usize },

    /// Step count is not an integer
    #[error("invalid step count '{value}': {source}")]
    InvalidSteps {
        value: String,
        #[source]
        source: ParseIntError,
    },

    /// Step count is zero or negative
    #[error("step count must be positive, got {steps}")]
    NonPositiveSteps { steps: i64 },

    /// Duration literal could not be decoded
    #[error("invalid duration '{value}': {reason}")]
    InvalidDuration { value: String, reason: String },
}

/// Errors raised by the calorie formulas on non-positive inputs
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("steps must be positive, got {steps}")]
    NonPositiveSteps { steps: i64 },

    #[error("weight must be positive, got {weight}")]
    NonPositiveWeight { weight: f64 },

    #[error("height must be positive, got {height}")]
    NonPositiveHeight { height: f64 },

    #[error("duration must be positive, got {duration}")]
    NonPositiveDuration { duration: Duration },
}

/// Result type alias for steptracker operations
pub type Result<T> = std::result::Result<T, TrackerError>;

impl TrackerError {
    /// Get error severity level
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            TrackerError::Parse(_) => ErrorSeverity::Warning,
            TrackerError::Validation(_) => ErrorSeverity::Warning,
            TrackerError::UnknownActivity { .. } => ErrorSeverity::Warning,
            TrackerError::Calculation(_) => ErrorSeverity::Critical,
            _ => ErrorSeverity::Error,
        }
    }

    /// Get user-friendly error message
    pub fn user_message(&self) -> String {
        match self {
            TrackerError::Parse(ParseError::FieldCount { expected, .. }) => {
                let shape = if *expected == 3 {
                    "<steps>,<activity>,<duration>"
                } else {
                    "<steps>,<duration>"
                };
                format!("Record is malformed, expected {}", shape)
            }
            TrackerError::Parse(ParseError::InvalidDuration { value, .. }) => {
                format!(
                    "Could not read duration '{}'. Use forms like 45m, 1h30m or 0.75h",
                    value
                )
            }
            TrackerError::UnknownActivity { label } => {
                format!("Unknown activity '{}'. Supported: Walking, Running", label)
            }
            _ => self.to_string(),
        }
    }
}

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    /// Internal error that should never happen for validated input
    Critical,
    /// Error that prevents operation
    Error,
    /// Bad input, the caller can fix and retry
    Warning,
}

impl ErrorSeverity {
    /// Level at which an error of this severity is logged
    pub fn to_tracing_level(&self) -> tracing::Level {
        match self {
            ErrorSeverity::Critical => tracing::Level::ERROR,
            ErrorSeverity::Error => tracing::Level::ERROR,
            ErrorSeverity::Warning => tracing::Level::WARN,
        }
    }

    /// Prefix for the CLI error line
    pub fn label(&self) -> &'static str {
        match self {
            ErrorSeverity::Critical => "internal error:",
            ErrorSeverity::Error => "error:",
            ErrorSeverity::Warning => "invalid input:",
        }
    }
}
