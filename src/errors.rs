//! Shared error types for rpa-insights

use std::path::PathBuf;
use thiserror::Error;

/// Failures raised while deriving ROI metrics from a calculation.
///
/// Relative metrics (efficiency gain, error reduction, throughput
/// improvement) are only defined against a non-zero baseline. Instead of
/// letting `NaN` or infinities leak into reports, the engine reports which
/// base was missing.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RoiError {
    /// A relative delta was requested against a zero base
    #[error("cannot compute {metric}: {base} is zero")]
    DivisionByZero {
        metric: &'static str,
        base: &'static str,
    },

    /// The current-state baseline needed for relative metrics is empty
    #[error("missing baseline: {field} must be greater than zero")]
    MissingBaseline { field: &'static str },

    /// An input value violates the record invariants
    #[error("invalid {field} = {value}: {reason}")]
    InvalidInput {
        field: &'static str,
        value: f64,
        reason: &'static str,
    },
}

/// Main error type for rpa-insights operations
#[derive(Debug, Error)]
pub enum Error {
    /// ROI engine errors
    #[error("ROI calculation '{process}' failed: {source}")]
    Roi {
        process: String,
        #[source]
        source: RoiError,
    },

    /// Impact analysis was requested for an unknown process
    #[error("Process not found: {0}")]
    ProcessNotFound(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Input file errors
    #[error("Input error in {path}: {message}")]
    Input { path: PathBuf, message: String },

    /// Rulebook endpoint answered with a non-success status
    #[error("Failed to fetch rules: {status}")]
    Http { status: u16 },

    /// Rulebook request could not be sent or read
    #[error("Network error: {0}")]
    Network(String),

    /// Rulebook payload did not match the expected shape
    #[error("Deserialization error: {0}")]
    Deserialization(String),

    /// Generic errors with context
    #[error("{context}: {message}")]
    WithContext { context: String, message: String },

    /// IO errors
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// JSON errors
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Attach the process name to an ROI engine failure
    pub fn roi(process: impl Into<String>, source: RoiError) -> Self {
        Self::Roi {
            process: process.into(),
            source,
        }
    }

    /// Create an input error with path context
    pub fn input(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::Input {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Add context to an error
    pub fn with_context(self, context: impl Into<String>) -> Self {
        Self::WithContext {
            context: context.into(),
            message: self.to_string(),
        }
    }
}

/// Result type alias using our error type
pub type Result<T> = std::result::Result<T, Error>;

/// Extension trait for adding context to Results
pub trait ResultExt<T> {
    /// Add context to an error
    fn context(self, context: impl Into<String>) -> Result<T>;
}

impl<T> ResultExt<T> for Result<T> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| e.with_context(context))
    }
}
