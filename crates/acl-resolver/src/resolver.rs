//! Resource ACL resolution
//!
//! Fetches a resource's own ACL, falling back to the nearest ancestor's, and
//! answers access questions against whichever one was found.

use crate::source::AclSource;
use acl_graph::AclGraph;
use acl_rules::{resolve, AccessControl, AccessDecision, AclResult, AgentAccess, ResolvedAcl, UniversalAccess};
use std::collections::BTreeMap;
use std::sync::Arc;

/// Resolves and queries ACLs through an [`AclSource`].
///
/// # Example
///
/// ```rust
/// use acl_graph::AclGraph;
/// use acl_resolver::{AclResolver, MemoryAclSource};
/// use acl_rules::{AccessControl, AccessDecision, AgentAccess};
/// use std::sync::Arc;
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let source = Arc::new(MemoryAclSource::new());
/// let resolver = AclResolver::new(source.clone(), AccessControl::default());
///
/// let webid = "https://alice.example/profile#me";
/// assert_eq!(
///     resolver.agent_access("https://pod.example/doc", webid).await,
///     AccessDecision::Indeterminate
/// );
///
/// let graph = AclGraph::new("https://pod.example/doc.acl", "https://pod.example/doc").unwrap();
/// let graph = resolver.control().set_agent_resource_access(&graph, webid, AgentAccess::full()).unwrap().graph;
/// source.insert(graph).await;
///
/// assert_eq!(
///     resolver.agent_access("https://pod.example/doc", webid).await,
///     AccessDecision::Known(AgentAccess::full())
/// );
/// # }
/// ```
pub struct AclResolver {
    /// Where rule graphs come from
    source: Arc<dyn AclSource>,
    /// Rule queries and edits
    control: AccessControl,
}

impl std::fmt::Debug for AclResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AclResolver")
            .field("control", &self.control)
            .finish()
    }
}

impl AclResolver {
    /// Create a resolver over a source.
    pub fn new(source: Arc<dyn AclSource>, control: AccessControl) -> Self {
        Self { source, control }
    }

    /// The access control used for queries.
    pub fn control(&self) -> &AccessControl {
        &self.control
    }

    /// Find the rule graph that answers for `resource`.
    ///
    /// The resource's own ACL is always preferred. A fetch failure is treated
    /// like a missing ACL. Returns `None` when neither graph is accessible.
    pub async fn resolve(&self, resource: &str) -> Option<ResolvedAcl> {
        let own = match self.source.fetch_resource_acl(resource).await {
            Ok(graph) => graph,
            Err(e) => {
                tracing::warn!(resource = resource, error = %e, "Resource ACL not accessible");
                None
            }
        };
        if own.is_some() {
            return resolve(own, None);
        }

        let fallback = match self.source.fetch_fallback_acl(resource).await {
            Ok(graph) => graph,
            Err(e) => {
                tracing::warn!(resource = resource, error = %e, "Fallback ACL not accessible");
                None
            }
        };

        let resolved = resolve(None, fallback);
        if let Some(acl) = &resolved {
            tracing::debug!(
                resource = resource,
                acl = acl.graph().acl_iri(),
                "Using fallback ACL"
            );
        }
        resolved
    }

    /// The resource's own ACL, for editing.
    ///
    /// Returns `Ok(None)` if no ACL is accessible at all.
    ///
    /// # Errors
    ///
    /// [`acl_rules::AclError::NotAResourceAcl`] if the resource only has an
    /// inherited ACL; create its own one first, e.g. with
    /// [`acl_rules::create_acl_from_fallback`].
    pub async fn editable_acl(&self, resource: &str) -> AclResult<Option<AclGraph>> {
        self.resolve(resource)
            .await
            .map(ResolvedAcl::into_resource_graph)
            .transpose()
    }

    /// Access an agent has to `resource`.
    pub async fn agent_access(&self, resource: &str, webid: &str) -> AccessDecision<AgentAccess> {
        self.resolve(resource)
            .await
            .map(|acl| self.control.get_agent_access(&acl, webid))
            .into()
    }

    /// Access of every agent named for `resource`.
    pub async fn agent_access_all(&self, resource: &str) -> AccessDecision<BTreeMap<String, AgentAccess>> {
        self.resolve(resource)
            .await
            .map(|acl| self.control.get_agent_access_all(&acl))
            .into()
    }

    /// Access a group has to `resource`.
    pub async fn group_access(&self, resource: &str, group: &str) -> AccessDecision<AgentAccess> {
        self.resolve(resource)
            .await
            .map(|acl| self.control.get_group_access(&acl, group))
            .into()
    }

    /// Access everyone has to `resource`.
    pub async fn public_access(&self, resource: &str) -> AccessDecision<AgentAccess> {
        self.resolve(resource)
            .await
            .map(|acl| self.control.get_public_access(&acl))
            .into()
    }

    /// Tri-state access an agent has to `resource`.
    pub async fn agent_access_universal(&self, resource: &str, webid: &str) -> AccessDecision<UniversalAccess> {
        self.resolve(resource)
            .await
            .map(|acl| self.control.get_agent_access_universal(&acl, webid))
            .into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::MemoryAclSource;
    use acl_rules::AclOrigin;

    const WEBID: &str = "https://alice.example/profile#me";
    const FOLDER: &str = "https://pod.example/notes/";
    const DOC: &str = "https://pod.example/notes/todo.ttl";

    fn read() -> AgentAccess {
        AgentAccess {
            read: true,
            ..AgentAccess::none()
        }
    }

    async fn setup() -> (Arc<MemoryAclSource>, AclResolver) {
        let source = Arc::new(MemoryAclSource::new());
        let resolver = AclResolver::new(source.clone(), AccessControl::default());

        let folder = AclGraph::new(format!("{FOLDER}.acl"), FOLDER).unwrap();
        let folder = resolver
            .control()
            .set_agent_default_access(&folder, WEBID, AgentAccess::full())
            .unwrap()
            .graph;
        let folder = resolver.control().set_public_default_access(&folder, read()).unwrap().graph;
        source.insert(folder).await;

        (source, resolver)
    }

    #[tokio::test]
    async fn test_fallback_answers_from_default_rules() {
        let (_, resolver) = setup().await;

        let acl = resolver.resolve(DOC).await.unwrap();
        assert_eq!(acl.origin(), AclOrigin::Fallback);

        assert_eq!(resolver.agent_access(DOC, WEBID).await, AccessDecision::Known(AgentAccess::full()));
        assert_eq!(resolver.public_access(DOC).await, AccessDecision::Known(read()));
    }

    #[tokio::test]
    async fn test_own_acl_wins() {
        let (source, resolver) = setup().await;

        let own = AclGraph::new(format!("{DOC}.acl"), DOC).unwrap();
        let own = resolver.control().set_agent_resource_access(&own, WEBID, read()).unwrap().graph;
        source.insert(own).await;

        assert_eq!(resolver.agent_access(DOC, WEBID).await, AccessDecision::Known(read()));
        assert_eq!(resolver.public_access(DOC).await, AccessDecision::Known(AgentAccess::none()));

        let all = resolver.agent_access_all(DOC).await.known().unwrap();
        assert_eq!(all.len(), 1);
    }

    #[tokio::test]
    async fn test_nothing_accessible_is_indeterminate() {
        let (source, resolver) = setup().await;
        source.forbid(FOLDER).await;

        assert!(resolver.agent_access(DOC, WEBID).await.is_indeterminate());
        assert!(resolver.agent_access_universal(DOC, WEBID).await.is_indeterminate());
        assert!(resolver
            .group_access(DOC, "https://pod.example/groups#team")
            .await
            .is_indeterminate());
        assert!(resolver.editable_acl(DOC).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_forbidden_own_acl_falls_back() {
        let (source, resolver) = setup().await;
        let own = AclGraph::new(format!("{DOC}.acl"), DOC).unwrap();
        source.insert(own).await;
        source.forbid(DOC).await;

        let acl = resolver.resolve(DOC).await.unwrap();
        assert!(acl.is_fallback());
    }

    #[tokio::test]
    async fn test_inherited_acl_is_not_editable() {
        let (source, resolver) = setup().await;

        let err = resolver.editable_acl(DOC).await.unwrap_err();
        assert_eq!(err.error_code(), "NOT_A_RESOURCE_ACL");

        let own = AclGraph::new(format!("{DOC}.acl"), DOC).unwrap();
        source.insert(own).await;
        let graph = resolver.editable_acl(DOC).await.unwrap().unwrap();
        assert_eq!(graph.access_to(), DOC);
    }
}
