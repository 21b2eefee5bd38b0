//! Diagnostics for rule graphs.

use serde::Serialize;

use acl_graph::AclGraph;

use crate::config::AclConfig;
use crate::error::{AclError, AclResult};
use crate::rule::RuleSet;

/// Findings about the rules of one graph.
#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
pub struct ValidationReport {
    /// Rules naming more than one `accessTo` resource.
    pub conflicting_scopes: Vec<String>,
    /// Rules that grant nothing and would be pruned by the next edit.
    pub inert_rules: Vec<String>,
    /// Rules with a scope and modes but no target, kept only because they
    /// carry statements outside the ACL vocabulary. They grant nothing.
    pub targetless_rules: Vec<String>,
}

impl ValidationReport {
    /// Check if nothing was found.
    pub fn is_clean(&self) -> bool {
        self.conflicting_scopes.is_empty() && self.inert_rules.is_empty() && self.targetless_rules.is_empty()
    }
}

/// Inspect a graph's rules.
pub fn validate(graph: &AclGraph) -> ValidationReport {
    let rules = RuleSet::from_graph(graph);
    let mut report = ValidationReport::default();

    for rule in rules.iter() {
        if rule.has_conflicting_scope() {
            report.conflicting_scopes.push(rule.subject.value().to_string());
        }
        if rule.is_inert() {
            report.inert_rules.push(rule.subject.value().to_string());
        } else if rule.targets.is_empty() {
            report.targetless_rules.push(rule.subject.value().to_string());
        }
    }
    report
}

/// Fail if strict scopes are configured and a rule names several resources.
///
/// Inert rules are never an error.
pub fn ensure_valid(graph: &AclGraph, config: &AclConfig) -> AclResult<()> {
    if !config.strict_scopes {
        return Ok(());
    }
    match validate(graph).conflicting_scopes.into_iter().next() {
        Some(rule) => Err(AclError::ConflictingScope { rule }),
        None => Ok(()),
    }
}
