//! # Error Types
//!
//! Structured error types for geo_core. Every variant carries enough context
//! for a caller (human or program) to see which input or stage was at fault.
//!
//! Note that an effective stress of zero or less is *not* an error: it is a
//! normal outcome of the liquefaction check and is reported through
//! [`Verdict::InvalidEffectiveStress`](crate::calculations::liquefaction::Verdict).
//!
//! ## Example
//!
//! ```rust
//! use geo_core::errors::{CalcError, CalcResult};
//!
//! fn validate_d10(d10_mm: f64) -> CalcResult<()> {
//!     if d10_mm <= 0.0 {
//!         return Err(CalcError::InvalidInput {
//!             field: "d10_mm".to_string(),
//!             value: d10_mm.to_string(),
//!             reason: "D10 must be positive".to_string(),
//!         });
//!     }
//!     Ok(())
//! }
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for geo_core operations
pub type CalcResult<T> = Result<T, CalcError>;

/// Structured error type for calculation and project operations.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum CalcError {
    /// An input value is invalid (non-positive diameter, out of range, NaN)
    #[error("Invalid input for '{field}': {value} - {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    /// A stage was requested before its predecessor produced output
    #[error("Cannot {operation} while {state}")]
    StageOutOfOrder { operation: String, state: String },

    /// No project item exists with the given id
    #[error("Item not found: {id}")]
    ItemNotFound { id: String },

    /// File I/O error
    #[error("File error: {operation} on '{path}' - {reason}")]
    FileError {
        operation: String,
        path: String,
        reason: String,
    },

    /// File is locked by another user/process
    #[error("File locked: '{path}' is locked by {locked_by} since {locked_at}")]
    FileLocked {
        path: String,
        locked_by: String,
        locked_at: String,
    },

    /// JSON serialization/deserialization error
    #[error("Serialization error: {reason}")]
    SerializationError { reason: String },

    /// Schema version mismatch
    #[error("Version mismatch: file version {file_version}, expected {expected_version}")]
    VersionMismatch {
        file_version: String,
        expected_version: String,
    },
}

impl CalcError {
    /// Create an InvalidInput error
    pub fn invalid_input(field: impl Into<String>, value: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::InvalidInput {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create a StageOutOfOrder error
    pub fn stage_out_of_order(operation: impl Into<String>, state: impl Into<String>) -> Self {
        CalcError::StageOutOfOrder {
            operation: operation.into(),
            state: state.into(),
        }
    }

    /// Create an ItemNotFound error
    pub fn item_not_found(id: impl ToString) -> Self {
        CalcError::ItemNotFound { id: id.to_string() }
    }

    /// Create a FileError
    pub fn file_error(operation: impl Into<String>, path: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::FileError {
            operation: operation.into(),
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create a FileLocked error
    pub fn file_locked(path: impl Into<String>, locked_by: impl Into<String>, locked_at: impl Into<String>) -> Self {
        CalcError::FileLocked {
            path: path.into(),
            locked_by: locked_by.into(),
            locked_at: locked_at.into(),
        }
    }

    /// Create a SerializationError from anything displayable
    pub fn serialization(reason: impl ToString) -> Self {
        CalcError::SerializationError {
            reason: reason.to_string(),
        }
    }

    /// Check if this is a recoverable error (e.g., can retry)
    ///
    /// Calculation errors are precondition violations and never worth retrying.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, CalcError::FileLocked { .. })
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            CalcError::InvalidInput { .. } => "INVALID_INPUT",
            CalcError::StageOutOfOrder { .. } => "STAGE_OUT_OF_ORDER",
            CalcError::ItemNotFound { .. } => "ITEM_NOT_FOUND",
            CalcError::FileError { .. } => "FILE_ERROR",
            CalcError::FileLocked { .. } => "FILE_LOCKED",
            CalcError::SerializationError { .. } => "SERIALIZATION_ERROR",
            CalcError::VersionMismatch { .. } => "VERSION_MISMATCH",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_serialization() {
        let error = CalcError::invalid_input("d10_mm", "0", "D10 must be positive");
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("\"type\":\"InvalidInput\""));
        let roundtrip: CalcError = serde_json::from_str(&json).unwrap();
        assert_eq!(error, roundtrip);
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(CalcError::item_not_found("abc").error_code(), "ITEM_NOT_FOUND");
        assert_eq!(
            CalcError::stage_out_of_order("derive seismic demand", "awaiting classification").error_code(),
            "STAGE_OUT_OF_ORDER"
        );
    }

    #[test]
    fn test_only_locks_are_recoverable() {
        assert!(CalcError::file_locked("a.geo", "someone", "now").is_recoverable());
        assert!(!CalcError::invalid_input("d60_mm", "-1", "must be positive").is_recoverable());
    }

    #[test]
    fn test_stage_message() {
        let err = CalcError::stage_out_of_order("evaluate liquefaction", "awaiting seismic demand");
        assert_eq!(err.to_string(), "Cannot evaluate liquefaction while awaiting seismic demand");
    }
}
