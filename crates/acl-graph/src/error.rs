//! Error types for graph construction and export.

use thiserror::Error;

/// Graph error types.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GraphError {
    /// An identifier that must be an absolute IRI was not one
    #[error("Invalid IRI: {0}")]
    InvalidIri(String),

    /// Failed to serialize a change log or graph
    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Result type for graph operations.
pub type GraphResult<T> = Result<T, GraphError>;

impl GraphError {
    /// Get error code for API responses.
    pub fn error_code(&self) -> &'static str {
        match self {
            GraphError::InvalidIri(_) => "INVALID_IRI",
            GraphError::Serialization(_) => "SERIALIZATION_ERROR",
        }
    }
}
