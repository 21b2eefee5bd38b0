//! # Per-Actor Access
//!
//! Reading and setting the access of individual agents, groups, the public,
//! authenticated agents and origins.
//!
//! Each actor kind is answered only from rules naming it: asking about an
//! agent never looks at group, class or origin rules.

use std::collections::BTreeMap;

use acl_graph::{vocab, AclGraph};

use crate::aggregate::{by_actor, combine};
use crate::bridge::{apply_patch, to_universal, AgentAccess, UniversalAccess};
use crate::config::AclConfig;
use crate::error::{AclError, AclResult};
use crate::index::RuleIndex;
use crate::mutate::{Mutation, RuleMutator};
use crate::resolution::ResolvedAcl;
use crate::scope::{Scope, ScopeKind};
use crate::targets::ActorKind;

/// Reads and edits per-actor access on rule graphs.
///
/// # Example
///
/// ```
/// use acl_graph::AclGraph;
/// use acl_rules::{AccessControl, AgentAccess};
///
/// let control = AccessControl::default();
/// let graph = AclGraph::new("https://pod.example/doc.acl", "https://pod.example/doc").unwrap();
/// let webid = "https://alice.example/profile#me";
///
/// let access = AgentAccess { read: true, ..AgentAccess::none() };
/// let edited = control.set_agent_resource_access(&graph, webid, access).unwrap();
///
/// assert_eq!(control.get_agent_resource_access(&edited.graph, webid), access);
/// assert_eq!(control.get_agent_default_access(&edited.graph, webid), AgentAccess::none());
/// ```
#[derive(Debug, Clone, Default)]
pub struct AccessControl {
    config: AclConfig,
}

impl AccessControl {
    /// Create with a validated configuration.
    pub fn new(config: AclConfig) -> AclResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// The configuration in use.
    pub fn config(&self) -> &AclConfig {
        &self.config
    }

    fn index(&self, graph: &AclGraph) -> RuleIndex {
        RuleIndex::with_legacy_default(graph, self.config.honor_default_for_new)
    }

    fn scope(graph: &AclGraph, scope_kind: ScopeKind) -> Scope {
        Scope {
            kind: scope_kind,
            iri: graph.access_to().to_string(),
        }
    }

    // Generic operations

    /// Access of one actor in one scope of the graph's resource.
    pub fn actor_access(&self, graph: &AclGraph, kind: ActorKind, id: &str, scope_kind: ScopeKind) -> AgentAccess {
        self.actor_access_in(graph, &Self::scope(graph, scope_kind), kind, id)
    }

    fn actor_access_in(&self, graph: &AclGraph, scope: &Scope, kind: ActorKind, id: &str) -> AgentAccess {
        let index = self.index(graph);
        combine(index.for_actor(scope, kind, id)).into()
    }

    /// Access of every actor of `kind` named in one scope of the graph's resource.
    pub fn actor_access_all(
        &self,
        graph: &AclGraph,
        kind: ActorKind,
        scope_kind: ScopeKind,
    ) -> BTreeMap<String, AgentAccess> {
        self.actor_access_all_in(graph, &Self::scope(graph, scope_kind), kind)
    }

    fn actor_access_all_in(&self, graph: &AclGraph, scope: &Scope, kind: ActorKind) -> BTreeMap<String, AgentAccess> {
        let index = self.index(graph);
        by_actor(index.for_kind(scope, kind), kind)
            .into_iter()
            .map(|(id, modes)| (id, modes.into()))
            .collect()
    }

    /// Give one actor exactly `access` in one scope of the graph's resource.
    pub fn set_actor_access(
        &self,
        graph: &AclGraph,
        kind: ActorKind,
        id: &str,
        scope_kind: ScopeKind,
        access: AgentAccess,
    ) -> AclResult<Mutation> {
        RuleMutator::new(&self.config).set_access(graph, kind, id, scope_kind, access.into())
    }

    // Agents

    /// Access an agent has to the resource itself.
    pub fn get_agent_resource_access(&self, graph: &AclGraph, webid: &str) -> AgentAccess {
        self.actor_access(graph, ActorKind::Agent, webid, ScopeKind::Resource)
    }

    /// Access an agent has to the children of the container.
    pub fn get_agent_default_access(&self, graph: &AclGraph, webid: &str) -> AgentAccess {
        self.actor_access(graph, ActorKind::Agent, webid, ScopeKind::Default)
    }

    /// Resource access of every agent named in the graph.
    pub fn get_agent_resource_access_all(&self, graph: &AclGraph) -> BTreeMap<String, AgentAccess> {
        self.actor_access_all(graph, ActorKind::Agent, ScopeKind::Resource)
    }

    /// Default access of every agent named in the graph.
    pub fn get_agent_default_access_all(&self, graph: &AclGraph) -> BTreeMap<String, AgentAccess> {
        self.actor_access_all(graph, ActorKind::Agent, ScopeKind::Default)
    }

    /// Set an agent's access to the resource itself.
    pub fn set_agent_resource_access(&self, graph: &AclGraph, webid: &str, access: AgentAccess) -> AclResult<Mutation> {
        self.set_actor_access(graph, ActorKind::Agent, webid, ScopeKind::Resource, access)
    }

    /// Set an agent's access to the children of the container.
    pub fn set_agent_default_access(&self, graph: &AclGraph, webid: &str, access: AgentAccess) -> AclResult<Mutation> {
        self.set_actor_access(graph, ActorKind::Agent, webid, ScopeKind::Default, access)
    }

    // Groups

    /// Access a group has to the resource itself.
    pub fn get_group_resource_access(&self, graph: &AclGraph, group: &str) -> AgentAccess {
        self.actor_access(graph, ActorKind::Group, group, ScopeKind::Resource)
    }

    /// Access a group has to the children of the container.
    pub fn get_group_default_access(&self, graph: &AclGraph, group: &str) -> AgentAccess {
        self.actor_access(graph, ActorKind::Group, group, ScopeKind::Default)
    }

    /// Resource access of every group named in the graph.
    pub fn get_group_resource_access_all(&self, graph: &AclGraph) -> BTreeMap<String, AgentAccess> {
        self.actor_access_all(graph, ActorKind::Group, ScopeKind::Resource)
    }

    /// Default access of every group named in the graph.
    pub fn get_group_default_access_all(&self, graph: &AclGraph) -> BTreeMap<String, AgentAccess> {
        self.actor_access_all(graph, ActorKind::Group, ScopeKind::Default)
    }

    /// Set a group's access to the resource itself.
    pub fn set_group_resource_access(&self, graph: &AclGraph, group: &str, access: AgentAccess) -> AclResult<Mutation> {
        self.set_actor_access(graph, ActorKind::Group, group, ScopeKind::Resource, access)
    }

    /// Set a group's access to the children of the container.
    pub fn set_group_default_access(&self, graph: &AclGraph, group: &str, access: AgentAccess) -> AclResult<Mutation> {
        self.set_actor_access(graph, ActorKind::Group, group, ScopeKind::Default, access)
    }

    // Agent classes

    /// Access everyone has to the resource itself.
    pub fn get_public_resource_access(&self, graph: &AclGraph) -> AgentAccess {
        self.actor_access(graph, ActorKind::AgentClass, vocab::FOAF_AGENT, ScopeKind::Resource)
    }

    /// Access everyone has to the children of the container.
    pub fn get_public_default_access(&self, graph: &AclGraph) -> AgentAccess {
        self.actor_access(graph, ActorKind::AgentClass, vocab::FOAF_AGENT, ScopeKind::Default)
    }

    /// Set everyone's access to the resource itself.
    pub fn set_public_resource_access(&self, graph: &AclGraph, access: AgentAccess) -> AclResult<Mutation> {
        self.set_actor_access(graph, ActorKind::AgentClass, vocab::FOAF_AGENT, ScopeKind::Resource, access)
    }

    /// Set everyone's access to the children of the container.
    pub fn set_public_default_access(&self, graph: &AclGraph, access: AgentAccess) -> AclResult<Mutation> {
        self.set_actor_access(graph, ActorKind::AgentClass, vocab::FOAF_AGENT, ScopeKind::Default, access)
    }

    /// Access any authenticated agent has to the resource itself.
    pub fn get_authenticated_resource_access(&self, graph: &AclGraph) -> AgentAccess {
        self.actor_access(graph, ActorKind::AgentClass, vocab::ACL_AUTHENTICATED_AGENT, ScopeKind::Resource)
    }

    /// Access any authenticated agent has to the children of the container.
    pub fn get_authenticated_default_access(&self, graph: &AclGraph) -> AgentAccess {
        self.actor_access(graph, ActorKind::AgentClass, vocab::ACL_AUTHENTICATED_AGENT, ScopeKind::Default)
    }

    /// Set the access of any authenticated agent to the resource itself.
    pub fn set_authenticated_resource_access(&self, graph: &AclGraph, access: AgentAccess) -> AclResult<Mutation> {
        self.set_actor_access(
            graph,
            ActorKind::AgentClass,
            vocab::ACL_AUTHENTICATED_AGENT,
            ScopeKind::Resource,
            access,
        )
    }

    /// Set the access of any authenticated agent to the children of the container.
    pub fn set_authenticated_default_access(&self, graph: &AclGraph, access: AgentAccess) -> AclResult<Mutation> {
        self.set_actor_access(
            graph,
            ActorKind::AgentClass,
            vocab::ACL_AUTHENTICATED_AGENT,
            ScopeKind::Default,
            access,
        )
    }

    // Origins

    /// Access requests from an origin have to the resource itself.
    pub fn get_origin_resource_access(&self, graph: &AclGraph, origin: &str) -> AgentAccess {
        self.actor_access(graph, ActorKind::Origin, origin, ScopeKind::Resource)
    }

    /// Access requests from an origin have to the children of the container.
    pub fn get_origin_default_access(&self, graph: &AclGraph, origin: &str) -> AgentAccess {
        self.actor_access(graph, ActorKind::Origin, origin, ScopeKind::Default)
    }

    /// Set the access of requests from an origin to the resource itself.
    pub fn set_origin_resource_access(&self, graph: &AclGraph, origin: &str, access: AgentAccess) -> AclResult<Mutation> {
        self.set_actor_access(graph, ActorKind::Origin, origin, ScopeKind::Resource, access)
    }

    /// Set the access of requests from an origin to the children of the container.
    pub fn set_origin_default_access(&self, graph: &AclGraph, origin: &str, access: AgentAccess) -> AclResult<Mutation> {
        self.set_actor_access(graph, ActorKind::Origin, origin, ScopeKind::Default, access)
    }

    // Resolved graphs

    /// Access an agent has to a resource, from whichever graph was resolved
    /// for it.
    pub fn get_agent_access(&self, acl: &ResolvedAcl, webid: &str) -> AgentAccess {
        self.actor_access_in(acl.graph(), &acl.scope(), ActorKind::Agent, webid)
    }

    /// Access of every agent named in the resolved graph.
    pub fn get_agent_access_all(&self, acl: &ResolvedAcl) -> BTreeMap<String, AgentAccess> {
        self.actor_access_all_in(acl.graph(), &acl.scope(), ActorKind::Agent)
    }

    /// Access a group has to a resource, from the resolved graph.
    pub fn get_group_access(&self, acl: &ResolvedAcl, group: &str) -> AgentAccess {
        self.actor_access_in(acl.graph(), &acl.scope(), ActorKind::Group, group)
    }

    /// Access everyone has to a resource, from the resolved graph.
    pub fn get_public_access(&self, acl: &ResolvedAcl) -> AgentAccess {
        self.actor_access_in(acl.graph(), &acl.scope(), ActorKind::AgentClass, vocab::FOAF_AGENT)
    }

    /// Tri-state view of [`get_agent_access`](Self::get_agent_access).
    pub fn get_agent_access_universal(&self, acl: &ResolvedAcl, webid: &str) -> UniversalAccess {
        to_universal(self.get_agent_access(acl, webid))
    }

    /// Update an agent's resource access from a tri-state patch.
    ///
    /// Fields left `None` keep their current value; `Some(false)` revokes.
    ///
    /// # Errors
    ///
    /// [`AclError::UnpairedControl`] if `control_read` and `control_write`
    /// are both given with different values.
    pub fn set_agent_access_universal(
        &self,
        graph: &AclGraph,
        webid: &str,
        patch: UniversalAccess,
    ) -> AclResult<Mutation> {
        if let (Some(read), Some(write)) = (patch.control_read, patch.control_write) {
            if read != write {
                return Err(AclError::UnpairedControl);
            }
        }
        let current = self.get_agent_resource_access(graph, webid);
        self.set_agent_resource_access(graph, webid, apply_patch(current, patch))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use acl_graph::{Statement, Term};

    const ACL: &str = "https://pod.example/c/.acl";
    const CONTAINER: &str = "https://pod.example/c/";
    const ALICE: &str = "https://alice.example/profile#me";
    const BOB: &str = "https://bob.example/profile#me";
    const TEAM: &str = "https://pod.example/groups#team";
    const APP: &str = "https://app.example";

    fn read() -> AgentAccess {
        AgentAccess {
            read: true,
            ..AgentAccess::none()
        }
    }

    fn empty() -> AclGraph {
        AclGraph::new(ACL, CONTAINER).unwrap()
    }

    #[test]
    fn test_agent_and_public_are_separate() {
        let control = AccessControl::default();
        let graph = control.set_public_resource_access(&empty(), read()).unwrap().graph;

        assert_eq!(control.get_public_resource_access(&graph), read());
        assert_eq!(control.get_agent_resource_access(&graph, ALICE), AgentAccess::none());
        assert_eq!(control.get_authenticated_resource_access(&graph), AgentAccess::none());
    }

    #[test]
    fn test_group_and_origin() {
        let control = AccessControl::default();
        let graph = control.set_group_default_access(&empty(), TEAM, read()).unwrap().graph;
        let graph = control.set_origin_resource_access(&graph, APP, AgentAccess::full()).unwrap().graph;

        assert_eq!(control.get_group_default_access(&graph, TEAM), read());
        assert_eq!(control.get_group_resource_access(&graph, TEAM), AgentAccess::none());
        assert_eq!(control.get_origin_resource_access(&graph, APP), AgentAccess::full());
        assert_eq!(control.get_origin_default_access(&graph, APP), AgentAccess::none());
        assert_eq!(control.get_group_default_access_all(&graph).len(), 1);
    }

    #[test]
    fn test_access_all() {
        let control = AccessControl::default();
        let graph = control.set_agent_resource_access(&empty(), ALICE, read()).unwrap().graph;
        let graph = control
            .set_agent_resource_access(&graph, BOB, AgentAccess::full())
            .unwrap()
            .graph;
        let graph = control.set_public_resource_access(&graph, read()).unwrap().graph;

        let all = control.get_agent_resource_access_all(&graph);
        assert_eq!(all.len(), 2);
        assert_eq!(all[ALICE], read());
        assert_eq!(all[BOB], AgentAccess::full());
        assert!(control.get_agent_default_access_all(&graph).is_empty());
    }

    #[test]
    fn test_authenticated() {
        let control = AccessControl::default();
        let graph = control
            .set_authenticated_default_access(&empty(), read())
            .unwrap()
            .graph;
        assert_eq!(control.get_authenticated_default_access(&graph), read());
        assert_eq!(control.get_public_default_access(&graph), AgentAccess::none());

        let graph = control
            .set_authenticated_resource_access(&graph, AgentAccess::full())
            .unwrap()
            .graph;
        assert_eq!(control.get_authenticated_resource_access(&graph), AgentAccess::full());
        assert_eq!(control.get_authenticated_default_access(&graph), read());
    }

    #[test]
    fn test_resolved_fallback_reads_default_rules() {
        let control = AccessControl::default();
        let inherited = control
            .set_agent_default_access(&empty(), ALICE, read())
            .unwrap()
            .graph;
        let inherited = control
            .set_agent_resource_access(&inherited, ALICE, AgentAccess::full())
            .unwrap()
            .graph;

        let resolved = ResolvedAcl::fallback(inherited);
        assert_eq!(control.get_agent_access(&resolved, ALICE), read());
        assert_eq!(control.get_agent_access_all(&resolved).len(), 1);
    }

    #[test]
    fn test_universal_roundtrip() {
        let control = AccessControl::default();
        let patch = UniversalAccess {
            read: Some(true),
            control_read: Some(true),
            control_write: Some(true),
            ..UniversalAccess::unset()
        };
        let graph = control.set_agent_access_universal(&empty(), ALICE, patch).unwrap().graph;

        let resolved = ResolvedAcl::own(graph.clone());
        assert_eq!(control.get_agent_access_universal(&resolved, ALICE), patch);

        // unset fields keep their value, false revokes
        let patch = UniversalAccess {
            write: Some(true),
            control_read: Some(false),
            control_write: Some(false),
            ..UniversalAccess::unset()
        };
        let graph = control.set_agent_access_universal(&graph, ALICE, patch).unwrap().graph;
        assert_eq!(
            control.get_agent_resource_access(&graph, ALICE),
            AgentAccess {
                read: true,
                write: true,
                ..AgentAccess::none()
            }
        );
    }

    #[test]
    fn test_universal_control_write_alone_grants_nothing() {
        let control = AccessControl::default();
        let patch = UniversalAccess {
            read: Some(true),
            control_write: Some(true),
            ..UniversalAccess::unset()
        };
        let graph = control.set_agent_access_universal(&empty(), ALICE, patch).unwrap().graph;
        assert_eq!(control.get_agent_resource_access(&graph, ALICE), read());
    }

    #[test]
    fn test_universal_rejects_unpaired_control() {
        let control = AccessControl::default();
        let patch = UniversalAccess {
            control_read: Some(true),
            control_write: Some(false),
            ..UniversalAccess::unset()
        };
        let err = control.set_agent_access_universal(&empty(), ALICE, patch).unwrap_err();
        assert_eq!(err, AclError::UnpairedControl);
    }

    #[test]
    fn test_legacy_marker_honored_by_config() {
        let r = Term::iri(format!("{}#legacy", ACL));
        let graph = AclGraph::from_statements(
            ACL,
            CONTAINER,
            vec![
                Statement::new(r.clone(), vocab::RDF_TYPE, Term::iri(vocab::ACL_AUTHORIZATION)),
                Statement::new(r.clone(), vocab::ACL_DEFAULT_FOR_NEW, Term::iri(CONTAINER)),
                Statement::new(r.clone(), vocab::ACL_MODE, Term::iri(vocab::ACL_READ)),
                Statement::new(r, vocab::ACL_AGENT, Term::iri(ALICE)),
            ],
        )
        .unwrap();

        assert_eq!(AccessControl::default().get_agent_default_access(&graph, ALICE), read());

        let strict = AccessControl::new(AclConfig {
            honor_default_for_new: false,
            ..AclConfig::default()
        })
        .unwrap();
        assert_eq!(strict.get_agent_default_access(&graph, ALICE), AgentAccess::none());
    }

    #[test]
    fn test_new_rejects_invalid_config() {
        let err = AccessControl::new(AclConfig {
            rule_prefix: String::new(),
            ..AclConfig::default()
        })
        .unwrap_err();
        assert_eq!(err.error_code(), "CONFIG_ERROR");
    }
}
