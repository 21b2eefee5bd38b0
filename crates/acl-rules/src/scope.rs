//! # Scopes
//!
//! A rule applies either to a resource itself or to the children of a
//! container. The two are never merged into one decision.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Which of the two scope statements a rule is matched on.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ScopeKind {
    /// `acl:accessTo`: the rule applies to the resource itself.
    Resource,
    /// `acl:default`: the rule applies to everything inside a container.
    Default,
}

impl ScopeKind {
    /// Get the string representation of the scope kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            ScopeKind::Resource => "resource",
            ScopeKind::Default => "default",
        }
    }
}

/// A scope kind bound to the IRI it applies to.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct Scope {
    /// Resource or default.
    pub kind: ScopeKind,
    /// The resource (for `Resource`) or container (for `Default`).
    pub iri: String,
}

impl Scope {
    /// Rules applying to the resource itself.
    pub fn resource(iri: impl Into<String>) -> Self {
        Self {
            kind: ScopeKind::Resource,
            iri: iri.into(),
        }
    }

    /// Rules applying to the children of a container.
    pub fn default_for(iri: impl Into<String>) -> Self {
        Self {
            kind: ScopeKind::Default,
            iri: iri.into(),
        }
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.kind.as_str(), self.iri)
    }
}
