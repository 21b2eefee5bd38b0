//! Error types for rule graph operations
//!
//! Only genuine caller errors are reported here. "No matching rule" is not an
//! error (it resolves to no access), and "no accessible rule graph" is
//! reported as an indeterminate decision rather than as a failure.

use acl_graph::GraphError;
use thiserror::Error;

use crate::config::ConfigError;

/// Rule graph error types.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AclError {
    /// A rule names more than one `accessTo` resource
    #[error("Rule {rule} applies to more than one resource")]
    ConflictingScope {
        /// Subject of the offending rule.
        rule: String,
    },

    /// Attempted to edit a graph inherited from an ancestor container
    #[error("Not a resource ACL: {0} is inherited from an ancestor")]
    NotAResourceAcl(String),

    /// `controlRead` and `controlWrite` were given different values
    #[error("controlRead and controlWrite must be set to the same value")]
    UnpairedControl,

    /// Malformed identifier or graph export failure
    #[error(transparent)]
    Graph(#[from] GraphError),

    /// Configuration error
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Result type for rule graph operations.
pub type AclResult<T> = Result<T, AclError>;

impl AclError {
    /// Get error code for API responses.
    pub fn error_code(&self) -> &'static str {
        match self {
            AclError::ConflictingScope { .. } => "CONFLICTING_SCOPE",
            AclError::NotAResourceAcl(_) => "NOT_A_RESOURCE_ACL",
            AclError::UnpairedControl => "UNPAIRED_CONTROL",
            AclError::Graph(e) => e.error_code(),
            AclError::Config(_) => "CONFIG_ERROR",
        }
    }

    /// Check if this error was caused by the caller's input rather than by
    /// configuration.
    pub fn is_caller_error(&self) -> bool {
        !matches!(self, AclError::Config(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(
            AclError::ConflictingScope { rule: "urn:r".to_string() }.error_code(),
            "CONFLICTING_SCOPE"
        );
        assert_eq!(
            AclError::Graph(GraphError::InvalidIri("x".to_string())).error_code(),
            "INVALID_IRI"
        );
        assert_eq!(AclError::UnpairedControl.error_code(), "UNPAIRED_CONTROL");
    }

    #[test]
    fn test_display() {
        let err = AclError::NotAResourceAcl("https://pod.example/.acl".to_string());
        assert_eq!(
            err.to_string(),
            "Not a resource ACL: https://pod.example/.acl is inherited from an ancestor"
        );
    }
}
