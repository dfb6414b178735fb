//! Error types for the site labor cost engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for every failure a cost or payroll calculation can hit.

use chrono::NaiveDate;
use thiserror::Error;

/// The main error type for the engine.
///
/// All operations in the engine return this error type, making it easy
/// to handle errors consistently throughout the application.
///
/// # Example
///
/// ```
/// use sitepay::error::EngineError;
///
/// let error = EngineError::InvalidArgument {
///     field: "hours_worked".to_string(),
///     message: "must not be negative".to_string(),
/// };
/// assert_eq!(
///     error.to_string(),
///     "Invalid argument 'hours_worked': must not be negative"
/// );
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

    /// Trade code was not found in the trade catalogue.
    #[error("Trade not found: {code}")]
    TradeNotFound {
        /// The trade code that was not found.
        code: String,
    },

    /// Equipment class has no rate in any rate table.
    #[error("Equipment class not found: {code}")]
    EquipmentNotFound {
        /// The equipment code that was not found.
        code: String,
    },

    /// No rate table covered the given code and date.
    #[error("Rate not found for '{code}' on date {date}")]
    RateNotFound {
        /// The trade or equipment code.
        code: String,
        /// The date for which the rate was requested.
        date: NaiveDate,
    },

    /// A caller-supplied value was out of range.
    #[error("Invalid argument '{field}': {message}")]
    InvalidArgument {
        /// The argument that was invalid.
        field: String,
        /// A description of what made the argument invalid.
        message: String,
    },

    /// A work record was invalid or contained inconsistent data.
    #[error("Invalid work record '{record_id}': {message}")]
    InvalidRecord {
        /// The ID of the invalid record.
        record_id: String,
        /// A description of what made the record invalid.
        message: String,
    },

    /// A general calculation error occurred.
    #[error("Calculation error: {message}")]
    CalculationError {
        /// A description of the calculation error.
        message: String,
    },
}

impl EngineError {
    /// Shorthand for [`EngineError::InvalidArgument`].
    pub fn invalid_argument(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Error for a decimal operation that left the representable range.
    pub fn overflow(operation: &str) -> Self {
        Self::CalculationError {
            message: format!("decimal overflow while computing {}", operation),
        }
    }
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
