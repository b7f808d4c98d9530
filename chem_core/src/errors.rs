//! # Error Types
//!
//! Structured error types for chem_core. Every failure is scoped to a single
//! call and carries enough context (offending token, symbol, or violated
//! constraint) for a front end to render a specific message.
//!
//! Non-convergence of the iterative solver is *not* an error: it is reported
//! through the `converged` flag on an otherwise valid result.
//!
//! ## Example
//!
//! ```rust
//! use chem_core::errors::{ChemError, ChemResult};
//!
//! fn validate_moles(moles: f64) -> ChemResult<()> {
//!     if moles <= 0.0 {
//!         return Err(ChemError::InvalidQuantity {
//!             field: "moles".to_string(),
//!             value: moles.to_string(),
//!             reason: "Amount of substance must be positive".to_string(),
//!         });
//!     }
//!     Ok(())
//! }
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for chem_core operations
pub type ChemResult<T> = Result<T, ChemError>;

/// Structured error type for chemical computations.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum ChemError {
    /// A formula token could not be recognized
    #[error("Cannot parse '{formula}': {reason} '{token}' at position {position}")]
    Parse {
        formula: String,
        token: String,
        position: usize,
        reason: String,
    },

    /// Symbol has no entry in the atomic mass table
    #[error("Unknown element: {symbol}")]
    UnknownElement { symbol: String },

    /// Symbol is a valid element but not accepted by this operation
    #[error("Element '{symbol}' is not supported by {operation}")]
    UnsupportedElement { symbol: String, operation: String },

    /// A physical quantity is non-positive or non-finite
    #[error("Invalid quantity for '{field}': {value} - {reason}")]
    InvalidQuantity {
        field: String,
        value: String,
        reason: String,
    },

    /// A physical constraint was violated (e.g. V <= nb)
    #[error("Domain error: {constraint} - {details}")]
    Domain { constraint: String, details: String },

    /// An input value is malformed (wrong sign on a constant, over-specified request, ...)
    #[error("Invalid input for '{field}': {value} - {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    /// A required field is missing
    #[error("Missing required field: {field}")]
    MissingField { field: String },

    /// JSON serialization/deserialization error
    #[error("Serialization error: {reason}")]
    Serialization { reason: String },
}

impl ChemError {
    /// Create a Parse error
    pub fn parse(
        formula: impl Into<String>,
        token: impl Into<String>,
        position: usize,
        reason: impl Into<String>,
    ) -> Self {
        ChemError::Parse {
            formula: formula.into(),
            token: token.into(),
            position,
            reason: reason.into(),
        }
    }

    /// Create an UnknownElement error
    pub fn unknown_element(symbol: impl Into<String>) -> Self {
        ChemError::UnknownElement {
            symbol: symbol.into(),
        }
    }

    /// Create an UnsupportedElement error
    pub fn unsupported_element(symbol: impl Into<String>, operation: impl Into<String>) -> Self {
        ChemError::UnsupportedElement {
            symbol: symbol.into(),
            operation: operation.into(),
        }
    }

    /// Create an InvalidQuantity error
    pub fn invalid_quantity(
        field: impl Into<String>,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        ChemError::InvalidQuantity {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create a Domain error
    pub fn domain(constraint: impl Into<String>, details: impl Into<String>) -> Self {
        ChemError::Domain {
            constraint: constraint.into(),
            details: details.into(),
        }
    }

    /// Create an InvalidInput error
    pub fn invalid_input(
        field: impl Into<String>,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        ChemError::InvalidInput {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create a MissingField error
    pub fn missing_field(field: impl Into<String>) -> Self {
        ChemError::MissingField {
            field: field.into(),
        }
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            ChemError::Parse { .. } => "PARSE_ERROR",
            ChemError::UnknownElement { .. } => "UNKNOWN_ELEMENT",
            ChemError::UnsupportedElement { .. } => "UNSUPPORTED_ELEMENT",
            ChemError::InvalidQuantity { .. } => "INVALID_QUANTITY",
            ChemError::Domain { .. } => "DOMAIN_ERROR",
            ChemError::InvalidInput { .. } => "INVALID_INPUT",
            ChemError::MissingField { .. } => "MISSING_FIELD",
            ChemError::Serialization { .. } => "SERIALIZATION_ERROR",
        }
    }
}

impl From<serde_json::Error> for ChemError {
    fn from(err: serde_json::Error) -> Self {
        ChemError::Serialization {
            reason: err.to_string(),
        }
    }
}

/// Reject NaN, infinities and values <= 0.
pub(crate) fn require_positive(field: &str, value: f64) -> ChemResult<f64> {
    if !value.is_finite() {
        return Err(ChemError::invalid_quantity(
            field,
            value.to_string(),
            "Quantity must be a finite number",
        ));
    }
    if value <= 0.0 {
        return Err(ChemError::invalid_quantity(
            field,
            value.to_string(),
            "Quantity must be positive",
        ));
    }
    Ok(value)
}
