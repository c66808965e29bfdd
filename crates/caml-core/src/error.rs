//! Core error types for the CAML query builder
//!
//! Query construction is almost entirely infallible. The only failure a
//! caller has to handle at build time is a value that has no markup type.

use thiserror::Error;

/// Core error type for all query operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CamlError {
    /// A value could not be classified as Text, Integer, Number or DateTime
    #[error("Invalid value type: {found}")]
    InvalidValueType { found: String },

    /// Operator used with a number of values outside its convention
    #[error("Operator {operator} expects {expected}, got {found} value(s)")]
    ArityMismatch {
        operator: String,
        expected: &'static str,
        found: usize,
    },

    #[error("Invalid query definition: {0}")]
    Definition(String),
}

impl CamlError {
    /// Build an `InvalidValueType` error from a description of the rejected input
    pub fn invalid_value_type(found: impl Into<String>) -> Self {
        Self::InvalidValueType {
            found: found.into(),
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            CamlError::InvalidValueType { .. } => "invalid_value_type",
            CamlError::ArityMismatch { .. } => "arity_mismatch",
            CamlError::Definition(_) => "invalid_definition",
        }
    }

    /// Whether the error was caused by a rejected scalar value
    pub fn is_invalid_value_type(&self) -> bool {
        matches!(self, CamlError::InvalidValueType { .. })
    }
}
