//! # Error Types
//!
//! Structured error types for estimate_core. The estimation engine itself
//! never fails; these errors come from the editing boundary (rejected room,
//! material or labor edits), configuration loading and document rendering.
//!
//! ## Example
//!
//! ```rust
//! use estimate_core::errors::{EstimateError, EstimateResult};
//!
//! fn validate_width(width_m: f64) -> EstimateResult<()> {
//!     if !(width_m > 0.0) {
//!         return Err(EstimateError::invalid_input(
//!             "width_m",
//!             width_m.to_string(),
//!             "Width must be positive",
//!         ));
//!     }
//!     Ok(())
//! }
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for estimate_core operations
pub type EstimateResult<T> = Result<T, EstimateError>;

/// Structured error type for project edits and I/O around the engine.
///
/// A rejected edit always leaves the project untouched, so every variant
/// here describes an edit that was not applied or an input that could not
/// be read.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum EstimateError {
    /// An input value is invalid (non-positive dimension, negative rate, etc.)
    #[error("Invalid input for '{field}': {value} - {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    /// No room with this identifier exists
    #[error("Room not found: {id}")]
    RoomNotFound { id: String },

    /// No floor with this identifier exists
    #[error("Floor not found: {id}")]
    FloorNotFound { id: String },

    /// A material or labor line item was not found
    #[error("{kind} item not found: {id}")]
    ItemNotFound { kind: String, id: String },

    /// Attempted to remove the only remaining floor
    #[error("Cannot remove floor '{id}': a project must keep at least one floor")]
    LastFloor { id: String },

    /// File I/O error
    #[error("File error: {operation} on '{path}' - {reason}")]
    FileError {
        operation: String,
        path: String,
        reason: String,
    },

    /// JSON/TOML serialization or deserialization error
    #[error("Serialization error: {reason}")]
    SerializationError { reason: String },

    /// Estimate document could not be compiled or rendered
    #[error("Render failed: {stage} - {reason}")]
    RenderFailed { stage: String, reason: String },

    /// Generic internal error (should be rare)
    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl EstimateError {
    /// Create an InvalidInput error
    pub fn invalid_input(field: impl Into<String>, value: impl Into<String>, reason: impl Into<String>) -> Self {
        EstimateError::InvalidInput {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create a RoomNotFound error
    pub fn room_not_found(id: impl Into<String>) -> Self {
        EstimateError::RoomNotFound { id: id.into() }
    }

    /// Create a FloorNotFound error
    pub fn floor_not_found(id: impl Into<String>) -> Self {
        EstimateError::FloorNotFound { id: id.into() }
    }

    /// Create an ItemNotFound error for a material line
    pub fn material_not_found(id: impl Into<String>) -> Self {
        EstimateError::ItemNotFound {
            kind: "Material".to_string(),
            id: id.into(),
        }
    }

    /// Create an ItemNotFound error for a labor line
    pub fn labor_not_found(id: impl Into<String>) -> Self {
        EstimateError::ItemNotFound {
            kind: "Labor".to_string(),
            id: id.into(),
        }
    }

    /// Create a FileError
    pub fn file_error(operation: impl Into<String>, path: impl Into<String>, reason: impl Into<String>) -> Self {
        EstimateError::FileError {
            operation: operation.into(),
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create a SerializationError
    pub fn serialization(reason: impl Into<String>) -> Self {
        EstimateError::SerializationError {
            reason: reason.into(),
        }
    }

    /// Create a RenderFailed error
    pub fn render_failed(stage: impl Into<String>, reason: impl Into<String>) -> Self {
        EstimateError::RenderFailed {
            stage: stage.into(),
            reason: reason.into(),
        }
    }

    /// Check if this error came from a rejected edit (input can be corrected
    /// and the edit retried)
    pub fn is_rejected_edit(&self) -> bool {
        matches!(
            self,
            EstimateError::InvalidInput { .. }
                | EstimateError::RoomNotFound { .. }
                | EstimateError::FloorNotFound { .. }
                | EstimateError::ItemNotFound { .. }
                | EstimateError::LastFloor { .. }
        )
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            EstimateError::InvalidInput { .. } => "INVALID_INPUT",
            EstimateError::RoomNotFound { .. } => "ROOM_NOT_FOUND",
            EstimateError::FloorNotFound { .. } => "FLOOR_NOT_FOUND",
            EstimateError::ItemNotFound { .. } => "ITEM_NOT_FOUND",
            EstimateError::LastFloor { .. } => "LAST_FLOOR",
            EstimateError::FileError { .. } => "FILE_ERROR",
            EstimateError::SerializationError { .. } => "SERIALIZATION_ERROR",
            EstimateError::RenderFailed { .. } => "RENDER_FAILED",
            EstimateError::Internal { .. } => "INTERNAL_ERROR",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_serialization() {
        let error = EstimateError::invalid_input("width_m", "-3", "Width must be positive");
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("\"type\":\"InvalidInput\""));
        let roundtrip: EstimateError = serde_json::from_str(&json).unwrap();
        assert_eq!(error, roundtrip);
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(EstimateError::room_not_found("room-1").error_code(), "ROOM_NOT_FOUND");
        assert_eq!(EstimateError::labor_not_found("labor-9").error_code(), "ITEM_NOT_FOUND");
        assert_eq!(
            EstimateError::LastFloor { id: "floor-1".into() }.error_code(),
            "LAST_FLOOR"
        );
    }

    #[test]
    fn test_rejected_edit_classification() {
        assert!(EstimateError::floor_not_found("floor-x").is_rejected_edit());
        assert!(!EstimateError::serialization("bad toml").is_rejected_edit());
        assert!(!EstimateError::render_failed("compile", "oops").is_rejected_edit());
    }

    #[test]
    fn test_item_not_found_message() {
        let err = EstimateError::material_not_found("mat-7");
        assert_eq!(err.to_string(), "Material item not found: mat-7");
    }
}
