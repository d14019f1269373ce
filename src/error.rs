//! Error types for the tax engine.
//!
//! The calculation core is total over its typed inputs and never fails. Errors
//! only arise at the boundaries: loading a tariff table, and parsing
//! enumerated values (tax class, state, insurance type) coming from callers.

use thiserror::Error;

/// The main error type for the tax engine.
///
/// # Example
///
/// ```
/// use steuer_engine::error::EngineError;
///
/// let error = EngineError::UnknownState {
///     name: "Atlantis".to_string(),
/// };
/// assert_eq!(error.to_string(), "Unknown federal state: Atlantis");
/// ```
#[derive(Debug, Error)]
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

    /// A tariff table was loaded but its values are inconsistent.
    #[error("Invalid tariff table: {message}")]
    InvalidTariff {
        /// What is wrong with the table.
        message: String,
    },

    /// A tax class outside 1..=6 was supplied.
    #[error("Invalid tax class: {value} (expected 1 to 6)")]
    InvalidTaxClass {
        /// The rejected value.
        value: u8,
    },

    /// A federal state name was not recognised.
    #[error("Unknown federal state: {name}")]
    UnknownState {
        /// The rejected name.
        name: String,
    },

    /// A health insurance type was not recognised.
    #[error("Unknown insurance type: {value}")]
    UnknownInsuranceType {
        /// The rejected value.
        value: String,
    },

    /// A numeric input was outside the accepted range.
    #[error("Invalid input field '{field}': {message}")]
    InvalidInput {
        /// The offending field.
        field: String,
        /// A description of what made the field invalid.
        message: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
