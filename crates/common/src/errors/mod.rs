//! Error types for Spear ranking runs
//!
//! Provides a single error enum with:
//! - Distinct variants for input, configuration and numeric failures
//! - Machine-readable error codes
//! - A split between caller-fixable and internal errors

use thiserror::Error;

/// Result type alias using SpearError
pub type Result<T> = std::result::Result<T, SpearError>;

/// Error codes for machine-readable error identification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    // Input errors (1xxx)
    ValidationError,
    MissingTimestamp,
    EmptyActivityLog,
    InvalidFormat,

    // Numeric errors (2xxx)
    DegenerateNormalization,

    // Internal errors (9xxx)
    ConfigurationError,
    SerializationError,
    IoError,
}

impl ErrorCode {
    /// Get the numeric code for this error
    pub fn as_code(&self) -> u16 {
        match self {
            // Input (1xxx)
            ErrorCode::ValidationError => 1001,
            ErrorCode::MissingTimestamp => 1002,
            ErrorCode::EmptyActivityLog => 1003,
            ErrorCode::InvalidFormat => 1004,

            // Numeric (2xxx)
            ErrorCode::DegenerateNormalization => 2001,

            // Internal (9xxx)
            ErrorCode::ConfigurationError => 9002,
            ErrorCode::SerializationError => 9003,
            ErrorCode::IoError => 9004,
        }
    }
}

/// Which score vector a numeric failure happened in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreVector {
    Expertise,
    Quality,
}

impl std::fmt::Display for ScoreVector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScoreVector::Expertise => write!(f, "expertise"),
            ScoreVector::Quality => write!(f, "quality"),
        }
    }
}

/// Ranking error types
#[derive(Error, Debug)]
pub enum SpearError {
    // Input errors
    #[error("Validation failed: {message}")]
    Validation {
        message: String,
        field: Option<String>,
    },

    #[error("Activity at position {index} has no timestamp")]
    MissingTimestamp { index: usize },

    #[error("Activity log is empty; at least one activity is required")]
    EmptyActivityLog,

    #[error("Invalid format: {message}")]
    InvalidFormat { message: String },

    // Numeric errors
    #[error("Cannot normalize {vector} vector in iteration {iteration}: sum is {sum}")]
    DegenerateNormalization {
        vector: ScoreVector,
        iteration: usize,
        sum: f64,
    },

    // Internal errors
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl SpearError {
    /// Shorthand for a validation failure on a named field
    pub fn validation(field: &str, message: impl Into<String>) -> Self {
        SpearError::Validation {
            message: message.into(),
            field: Some(field.to_string()),
        }
    }

    /// Get the error code for this error
    pub fn code(&self) -> ErrorCode {
        match self {
            SpearError::Validation { .. } => ErrorCode::ValidationError,
            SpearError::MissingTimestamp { .. } => ErrorCode::MissingTimestamp,
            SpearError::EmptyActivityLog => ErrorCode::EmptyActivityLog,
            SpearError::InvalidFormat { .. } => ErrorCode::InvalidFormat,
            SpearError::DegenerateNormalization { .. } => ErrorCode::DegenerateNormalization,
            SpearError::Configuration { .. } => ErrorCode::ConfigurationError,
            SpearError::Io(_) => ErrorCode::IoError,
            SpearError::Serialization(_) => ErrorCode::SerializationError,
        }
    }

    /// Check if the caller can fix this error by changing its input or settings
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            SpearError::Validation { .. }
                | SpearError::MissingTimestamp { .. }
                | SpearError::EmptyActivityLog
                | SpearError::InvalidFormat { .. }
                | SpearError::Configuration { .. }
        )
    }
}

impl From<config::ConfigError> for SpearError {
    fn from(err: config::ConfigError) -> Self {
        SpearError::Configuration {
            message: err.to_string(),
        }
    }
}
