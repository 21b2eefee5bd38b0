//! # Rule Mutation
//!
//! Rewrites a rule graph so that exactly one actor has exactly the given
//! modes in one scope, leaving every other actor, resource and scope as it
//! was.
//!
//! ## Algorithm
//!
//! ```text
//! for each rule R naming the actor (under the given kind) in the edited scope:
//!     R_without_actor       = R minus the actor
//!     R_for_actor_elsewhere = R's modes and other scopes, for the actor only
//! add one new rule:           edited scope, actor, new modes
//! prune rules that grant nothing (no scope, no mode or no target)
//! diff against the input
//! ```
//!
//! A rule naming the actor but not carrying the edited scope is left as it
//! is: splitting it would yield two rules granting exactly what it already
//! grants. Skipping it keeps the diff minimal and makes repeated edits
//! idempotent.

use serde::Serialize;

use acl_graph::{validate_iri, AclGraph, ChangeLog, Term};

use crate::config::AclConfig;
use crate::error::AclResult;
use crate::modes::AccessModeSet;
use crate::naming::RuleNamer;
use crate::rule::{AuthorizationRule, RuleSet};
use crate::scope::{Scope, ScopeKind};
use crate::targets::{ActorKind, Targets};
use crate::validate::ensure_valid;

/// Result of an edit: the new graph and what changed.
///
/// `changes` covers this edit only. The graph's own change log accumulates
/// every edit since it was loaded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Mutation {
    /// The edited graph. The input graph is never modified.
    pub graph: AclGraph,
    /// Statements added and removed by this edit.
    pub changes: ChangeLog,
}

/// Applies access edits to rule graphs.
#[derive(Debug, Clone, Copy)]
pub struct RuleMutator<'a> {
    config: &'a AclConfig,
}

impl<'a> RuleMutator<'a> {
    /// Create a mutator using the given configuration.
    pub fn new(config: &'a AclConfig) -> Self {
        Self { config }
    }

    /// Give `actor` exactly `modes` in the given scope of the graph's resource.
    ///
    /// # Arguments
    ///
    /// * `graph` - The resource's own rule graph
    /// * `kind` - Which kind of actor `actor` is
    /// * `actor` - Actor IRI
    /// * `scope_kind` - Resource or default scope; the IRI is the graph's `access_to`
    /// * `modes` - The complete new set of modes (empty revokes)
    ///
    /// # Errors
    ///
    /// - [`crate::AclError::Graph`] if `actor` is not an IRI
    /// - [`crate::AclError::ConflictingScope`] in strict mode, if a rule names several resources
    /// - [`crate::AclError::Config`] if the naming configuration is invalid
    pub fn set_access(
        &self,
        graph: &AclGraph,
        kind: ActorKind,
        actor: &str,
        scope_kind: ScopeKind,
        modes: AccessModeSet,
    ) -> AclResult<Mutation> {
        validate_iri(actor)?;
        self.config.validate()?;

        let scope = Scope {
            kind: scope_kind,
            iri: graph.access_to().to_string(),
        };
        ensure_valid(graph, self.config)?;
        let mut set = RuleSet::from_graph(graph);

        // Step 1: split every rule that gives the actor access in this scope.
        let mut namer = RuleNamer::new(graph.acl_iri(), self.config, set.subjects());
        let existing = std::mem::take(&mut set.rules);
        let mut working = Vec::with_capacity(existing.len() + 2);

        for rule in existing {
            // The legacy marker always counts here so that revoking default
            // access also strips it.
            if !rule.targets.contains(kind, actor) || !rule.applies_to(&scope, true) {
                working.push(rule);
                continue;
            }

            let subject = namer.mint(&[
                "elsewhere",
                rule.subject.value(),
                kind.as_str(),
                actor,
                scope.kind.as_str(),
                &scope.iri,
            ]);
            let without_actor = rule.without_target(kind, actor);
            let elsewhere = rule.for_actor_elsewhere(subject, kind, actor, &scope);

            tracing::debug!(
                rule = %rule.subject,
                actor = actor,
                kind = kind.as_str(),
                scope = %scope,
                "Split rule naming actor"
            );

            working.push(without_actor);
            working.push(elsewhere);
        }

        // Step 3 runs before the new rule is added so a rule emptied above
        // frees its subject for reuse.
        let before = working.len();
        working.retain(|rule| !rule.is_inert());
        let pruned = before - working.len();
        set.rules = working;

        // Step 2: the one rule carrying the new access.
        let mut namer = RuleNamer::new(graph.acl_iri(), self.config, set.subjects());
        let subject = namer.mint(&[scope.kind.as_str(), &scope.iri, kind.as_str(), actor]);
        let new_rule = new_rule(subject, &scope, kind, actor, modes);
        if !new_rule.is_inert() {
            set.rules.push(new_rule);
        }

        // Step 4
        let (next, changes) = graph.replace_statements(set.to_statements());

        tracing::debug!(
            acl = graph.acl_iri(),
            actor = actor,
            scope = %scope,
            added = changes.additions.len(),
            removed = changes.deletions.len(),
            pruned = pruned,
            "Applied access change"
        );

        Ok(Mutation {
            graph: next,
            changes,
        })
    }
}

fn new_rule(
    subject: Term,
    scope: &Scope,
    kind: ActorKind,
    actor: &str,
    modes: AccessModeSet,
) -> AuthorizationRule {
    let mut rule = AuthorizationRule::new(subject);
    rule.modes = modes;
    match scope.kind {
        ScopeKind::Resource => rule.access_to.push(scope.iri.clone()),
        ScopeKind::Default => rule.default.push(scope.iri.clone()),
    }
    rule.targets = Targets::only(kind, actor);
    rule
}
