//! # Rule Index
//!
//! Finds the rules of a graph that apply to a scope and, optionally, to one
//! actor. Pure reads: the graph is never touched.

use acl_graph::AclGraph;

use crate::rule::{AuthorizationRule, RuleSet};
use crate::scope::Scope;
use crate::targets::ActorKind;

/// Scope and actor lookups over the rules of one graph.
///
/// # Example
///
/// ```
/// use acl_graph::{vocab, AclGraph, Statement, Term};
/// use acl_rules::{ActorKind, RuleIndex, Scope};
///
/// let doc = "https://pod.example/doc";
/// let rule = Term::iri("https://pod.example/doc.acl#r");
/// let graph = AclGraph::from_statements("https://pod.example/doc.acl", doc, vec![
///     Statement::new(rule.clone(), vocab::RDF_TYPE, Term::iri(vocab::ACL_AUTHORIZATION)),
///     Statement::new(rule.clone(), vocab::ACL_ACCESS_TO, Term::iri(doc)),
///     Statement::new(rule.clone(), vocab::ACL_MODE, Term::iri(vocab::ACL_READ)),
///     Statement::new(rule, vocab::ACL_AGENT, Term::iri("https://alice.example/#me")),
/// ]).unwrap();
///
/// let index = RuleIndex::new(&graph);
/// assert_eq!(index.for_scope(&Scope::resource(doc)).len(), 1);
/// assert!(index.for_scope(&Scope::default_for(doc)).is_empty());
/// assert_eq!(
///     index.for_actor(&Scope::resource(doc), ActorKind::Agent, "https://alice.example/#me").len(),
///     1
/// );
/// ```
#[derive(Debug, Clone)]
pub struct RuleIndex {
    rules: RuleSet,
    honor_legacy_default: bool,
}

impl RuleIndex {
    /// Index a graph. The legacy `defaultForNew` marker counts as default scope.
    pub fn new(graph: &AclGraph) -> Self {
        Self::with_legacy_default(graph, true)
    }

    /// Index a graph, choosing whether `defaultForNew` counts as default scope.
    pub fn with_legacy_default(graph: &AclGraph, honor_legacy_default: bool) -> Self {
        Self {
            rules: RuleSet::from_graph(graph),
            honor_legacy_default,
        }
    }

    /// Every rule in the graph.
    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    /// Rules whose scope statement matches exactly the given scope.
    ///
    /// Resource and default results for the same IRI are disjoint unless a
    /// rule carries both statements.
    pub fn for_scope(&self, scope: &Scope) -> Vec<&AuthorizationRule> {
        self.rules
            .iter()
            .filter(|rule| rule.applies_to(scope, self.honor_legacy_default))
            .collect()
    }

    /// Rules matching the scope that name `id` under `kind`.
    pub fn for_actor(&self, scope: &Scope, kind: ActorKind, id: &str) -> Vec<&AuthorizationRule> {
        self.for_scope(scope)
            .into_iter()
            .filter(|rule| rule.targets.contains(kind, id))
            .collect()
    }

    /// Rules matching the scope that name at least one actor of `kind`.
    pub fn for_kind(&self, scope: &Scope, kind: ActorKind) -> Vec<&AuthorizationRule> {
        self.for_scope(scope)
            .into_iter()
            .filter(|rule| !rule.targets.get(kind).is_empty())
            .collect()
    }
}
