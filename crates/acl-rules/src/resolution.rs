//! # Resolution Policy
//!
//! Decides which single rule graph answers questions about a resource.
//!
//! A resource's own rule graph always wins, even if it grants less than the
//! inherited one. Only when the resource has no accessible graph of its own
//! is the nearest ancestor's graph used, and then only its default-scope
//! rules count. Rules from both graphs are never combined.

use serde::{Deserialize, Serialize};

use acl_graph::AclGraph;

use crate::error::{AclError, AclResult};
use crate::scope::Scope;

/// Where a resolved rule graph came from.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum AclOrigin {
    /// The resource's own ACL.
    Resource,
    /// The nearest ancestor container's ACL.
    Fallback,
}

/// The one rule graph chosen for a resource.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedAcl {
    graph: AclGraph,
    origin: AclOrigin,
}

impl ResolvedAcl {
    /// Wrap a resource's own ACL.
    pub fn own(graph: AclGraph) -> Self {
        Self {
            graph,
            origin: AclOrigin::Resource,
        }
    }

    /// Wrap an ancestor's ACL used as fallback.
    pub fn fallback(graph: AclGraph) -> Self {
        Self {
            graph,
            origin: AclOrigin::Fallback,
        }
    }

    /// The chosen graph.
    pub fn graph(&self) -> &AclGraph {
        &self.graph
    }

    /// Where the graph came from.
    pub fn origin(&self) -> AclOrigin {
        self.origin
    }

    /// Check if the graph was inherited from an ancestor.
    pub fn is_fallback(&self) -> bool {
        self.origin == AclOrigin::Fallback
    }

    /// The scope queries against this graph must use: resource scope at the
    /// resource for its own ACL, default scope at the ancestor for a fallback.
    pub fn scope(&self) -> Scope {
        match self.origin {
            AclOrigin::Resource => Scope::resource(self.graph.access_to()),
            AclOrigin::Fallback => Scope::default_for(self.graph.access_to()),
        }
    }

    /// Take the graph for editing.
    ///
    /// # Errors
    ///
    /// [`AclError::NotAResourceAcl`] if the graph is an inherited one; edits
    /// must go to the resource's own ACL.
    pub fn into_resource_graph(self) -> AclResult<AclGraph> {
        match self.origin {
            AclOrigin::Resource => Ok(self.graph),
            AclOrigin::Fallback => Err(AclError::NotAResourceAcl(self.graph.acl_iri().to_string())),
        }
    }
}

/// Pick the graph that answers for a resource.
///
/// # Example
///
/// ```
/// use acl_graph::AclGraph;
/// use acl_rules::{resolve, AclOrigin};
///
/// let own = AclGraph::new("https://pod.example/c/doc.acl", "https://pod.example/c/doc").unwrap();
/// let inherited = AclGraph::new("https://pod.example/c/.acl", "https://pod.example/c/").unwrap();
///
/// let resolved = resolve(Some(own), Some(inherited.clone())).unwrap();
/// assert_eq!(resolved.origin(), AclOrigin::Resource);
///
/// let resolved = resolve(None, Some(inherited)).unwrap();
/// assert_eq!(resolved.origin(), AclOrigin::Fallback);
///
/// assert!(resolve(None, None).is_none());
/// ```
pub fn resolve(own: Option<AclGraph>, fallback: Option<AclGraph>) -> Option<ResolvedAcl> {
    match (own, fallback) {
        (Some(graph), _) => Some(ResolvedAcl::own(graph)),
        (None, Some(graph)) => Some(ResolvedAcl::fallback(graph)),
        (None, None) => None,
    }
}

/// An access answer that may be unknown.
///
/// `Indeterminate` means no rule graph was accessible; it is not the same as
/// "no access" and must not be treated as a denial.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "status", content = "access", rename_all = "snake_case")]
pub enum AccessDecision<T> {
    /// Answer derived from an accessible rule graph.
    Known(T),
    /// No rule graph was accessible.
    Indeterminate,
}

impl<T> AccessDecision<T> {
    /// Get the known value.
    pub fn known(self) -> Option<T> {
        match self {
            AccessDecision::Known(value) => Some(value),
            AccessDecision::Indeterminate => None,
        }
    }

    /// Check if the answer is unknown.
    pub fn is_indeterminate(&self) -> bool {
        matches!(self, AccessDecision::Indeterminate)
    }

    /// Transform the known value.
    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> AccessDecision<U> {
        match self {
            AccessDecision::Known(value) => AccessDecision::Known(f(value)),
            AccessDecision::Indeterminate => AccessDecision::Indeterminate,
        }
    }
}

impl<T> From<Option<T>> for AccessDecision<T> {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(value) => AccessDecision::Known(value),
            None => AccessDecision::Indeterminate,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scope::ScopeKind;

    fn own() -> AclGraph {
        AclGraph::new("https://pod.example/c/doc.acl", "https://pod.example/c/doc").unwrap()
    }

    fn inherited() -> AclGraph {
        AclGraph::new("https://pod.example/c/.acl", "https://pod.example/c/").unwrap()
    }

    #[test]
    fn test_own_wins() {
        let resolved = resolve(Some(own()), Some(inherited())).unwrap();
        assert!(!resolved.is_fallback());
        assert_eq!(resolved.scope(), Scope::resource("https://pod.example/c/doc"));
    }

    #[test]
    fn test_fallback_uses_default_scope_at_ancestor() {
        let resolved = resolve(None, Some(inherited())).unwrap();
        let scope = resolved.scope();
        assert_eq!(scope.kind, ScopeKind::Default);
        assert_eq!(scope.iri, "https://pod.example/c/");
    }

    #[test]
    fn test_fallback_cannot_be_edited() {
        let err = resolve(None, Some(inherited()))
            .unwrap()
            .into_resource_graph()
            .unwrap_err();
        assert_eq!(err.error_code(), "NOT_A_RESOURCE_ACL");

        assert!(resolve(Some(own()), None).unwrap().into_resource_graph().is_ok());
    }

    #[test]
    fn test_decision_helpers() {
        let known: AccessDecision<u8> = Some(3).into();
        assert_eq!(known.map(|v| v * 2).known(), Some(6));

        let unknown: AccessDecision<u8> = None.into();
        assert!(unknown.is_indeterminate());
        assert_eq!(unknown.known(), None);
    }

    #[test]
    fn test_decision_serde() {
        let json = serde_json::to_string(&AccessDecision::<bool>::Indeterminate).unwrap();
        assert_eq!(json, r#"{"status":"indeterminate"}"#);
        let json = serde_json::to_string(&AccessDecision::Known(true)).unwrap();
        assert_eq!(json, r#"{"status":"known","access":true}"#);
    }
}
