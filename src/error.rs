//! Error types for the statutory payroll engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur while loading rate tables and
//! computing salary breakdowns.

use thiserror::Error;

/// The main error type for the statutory payroll engine.
///
/// Every computation in the engine is a precondition check followed by pure
/// arithmetic, so the variants describe bad input or bad configuration rather
/// than runtime faults.
///
/// # Example
///
/// ```
/// use statutory_payroll::error::EngineError;
///
/// let error = EngineError::ConfigNotFound {
///     path: "/missing/rates.yaml".to_string(),
/// };
/// assert_eq!(error.to_string(), "Configuration file not found: /missing/rates.yaml");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// A compensation input or rate table field failed validation.
    #[error("Invalid value for '{field}': {message}")]
    Validation {
        /// The field that was invalid.
        field: String,
        /// A description of what made the field invalid.
        message: String,
    },

    /// The rate table is structurally unusable (e.g. a PT slab table with gaps).
    #[error("Configuration error: {message}")]
    Configuration {
        /// A description of the configuration problem.
        message: String,
    },
}

impl EngineError {
    /// Shorthand for building a [`EngineError::Validation`].
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Shorthand for building a [`EngineError::Configuration`].
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
