//! # Authorization Rules
//!
//! Typed view of the rule subjects inside an ACL graph.
//!
//! A graph is read into a [`RuleSet`]: an arena of [`AuthorizationRule`]s
//! keyed by subject, plus the residual statements about subjects that are
//! not rules. Writing the set back produces the statements again, so rules
//! can be edited as structs instead of by matching statement patterns.

use std::collections::{HashMap, HashSet};

use acl_graph::{vocab, AclGraph, Statement, Term};

use crate::modes::{AccessMode, AccessModeSet};
use crate::scope::{Scope, ScopeKind};
use crate::targets::{ActorKind, Targets};

/// One authorization rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorizationRule {
    /// The rule's subject identifier.
    pub subject: Term,
    /// Resources the rule applies to directly.
    pub access_to: Vec<String>,
    /// Containers whose children the rule applies to.
    pub default: Vec<String>,
    /// Legacy synonym of `default`.
    pub default_for_new: Vec<String>,
    /// Modes granted.
    pub modes: AccessModeSet,
    /// Actors the rule applies to.
    pub targets: Targets,
    /// Statements about the rule with no typed field (extra types, unknown
    /// modes, literal objects, foreign predicates), kept verbatim.
    pub other: Vec<(String, Term)>,
}

impl AuthorizationRule {
    /// Create a rule with no scope, modes or targets.
    pub fn new(subject: Term) -> Self {
        Self {
            subject,
            access_to: Vec::new(),
            default: Vec::new(),
            default_for_new: Vec::new(),
            modes: AccessModeSet::empty(),
            targets: Targets::new(),
            other: Vec::new(),
        }
    }

    /// Build a rule from the statements about its subject.
    ///
    /// The `rdf:type acl:Authorization` statement is implied and not stored.
    pub fn from_statements<'a, I>(subject: Term, statements: I) -> Self
    where
        I: IntoIterator<Item = &'a Statement>,
    {
        let mut rule = Self::new(subject);

        for statement in statements {
            let predicate = statement.predicate.as_str();
            let iri = statement.object.as_iri();

            let typed = match (predicate, iri) {
                (vocab::RDF_TYPE, Some(vocab::ACL_AUTHORIZATION)) => true,
                (vocab::ACL_ACCESS_TO, Some(iri)) => {
                    push_unique(&mut rule.access_to, iri);
                    true
                }
                (vocab::ACL_DEFAULT, Some(iri)) => {
                    push_unique(&mut rule.default, iri);
                    true
                }
                (vocab::ACL_DEFAULT_FOR_NEW, Some(iri)) => {
                    push_unique(&mut rule.default_for_new, iri);
                    true
                }
                (vocab::ACL_MODE, Some(iri)) => match AccessMode::from_iri(iri) {
                    Some(mode) => {
                        rule.modes.insert(mode);
                        true
                    }
                    None => false,
                },
                (p, Some(iri)) => match ActorKind::from_predicate(p) {
                    Some(kind) => {
                        rule.targets.insert(kind, iri);
                        true
                    }
                    None => false,
                },
                _ => false,
            };

            if !typed {
                rule.other
                    .push((statement.predicate.clone(), statement.object.clone()));
            }
        }

        rule
    }

    /// Write the rule out as statements.
    ///
    /// Order: type, modes, accessTo, default, defaultForNew, targets, other.
    pub fn to_statements(&self) -> Vec<Statement> {
        let s = |p: &str, o: Term| Statement::new(self.subject.clone(), p, o);

        let mut out = vec![s(vocab::RDF_TYPE, Term::iri(vocab::ACL_AUTHORIZATION))];
        out.extend(self.modes.iter().map(|m| s(vocab::ACL_MODE, Term::iri(m.iri()))));
        out.extend(self.access_to.iter().map(|i| s(vocab::ACL_ACCESS_TO, Term::iri(i))));
        out.extend(self.default.iter().map(|i| s(vocab::ACL_DEFAULT, Term::iri(i))));
        out.extend(
            self.default_for_new
                .iter()
                .map(|i| s(vocab::ACL_DEFAULT_FOR_NEW, Term::iri(i))),
        );
        out.extend(
            self.targets
                .iter()
                .map(|(kind, id)| s(kind.predicate(), Term::iri(id))),
        );
        out.extend(self.other.iter().map(|(p, o)| s(p, o.clone())));
        out
    }

    /// Check whether the rule applies to the given scope.
    ///
    /// With `honor_legacy_default`, the deprecated `defaultForNew` marker
    /// counts as a default scope statement.
    pub fn applies_to(&self, scope: &Scope, honor_legacy_default: bool) -> bool {
        match scope.kind {
            ScopeKind::Resource => self.access_to.iter().any(|i| *i == scope.iri),
            ScopeKind::Default => {
                self.default.iter().any(|i| *i == scope.iri)
                    || (honor_legacy_default && self.default_for_new.iter().any(|i| *i == scope.iri))
            }
        }
    }

    /// Check whether the rule carries any scope statement at all.
    pub fn has_scope(&self) -> bool {
        !self.access_to.is_empty() || !self.default.is_empty() || !self.default_for_new.is_empty()
    }

    /// Check whether the rule carries any mode statement, known or not.
    pub fn has_any_mode(&self) -> bool {
        !self.modes.is_empty() || self.other.iter().any(|(p, _)| p == vocab::ACL_MODE)
    }

    /// Check whether the rule has statements outside the ACL vocabulary.
    pub fn has_foreign_statements(&self) -> bool {
        self.other
            .iter()
            .any(|(p, o)| !vocab::is_acl_statement(p, o.value()))
    }

    /// A rule is inert when it consists only of ACL statements and is
    /// missing a scope, a mode or a target. Inert rules grant nothing and
    /// are pruned on mutation.
    pub fn is_inert(&self) -> bool {
        if self.has_foreign_statements() {
            return false;
        }
        !self.has_scope() || !self.has_any_mode() || self.targets.is_empty()
    }

    /// Check whether the rule names more than one resource in `accessTo`.
    pub fn has_conflicting_scope(&self) -> bool {
        self.access_to.len() > 1
    }

    /// Copy of this rule with one actor removed from its targets.
    pub fn without_target(&self, kind: ActorKind, id: &str) -> Self {
        let mut rule = self.clone();
        rule.targets.remove(kind, id);
        rule
    }

    /// Copy of this rule that keeps the actor's access everywhere except in
    /// `scope`.
    ///
    /// The copy carries the rule's type, modes and scope statements minus
    /// the one for `scope` (and minus the legacy `defaultForNew` marker for
    /// that IRI when `scope` is a default scope), and names exactly `id`
    /// under `kind`. Every other target kind is cleared, so access granted
    /// to groups, classes or origins alongside the actor is never copied.
    pub fn for_actor_elsewhere(&self, subject: Term, kind: ActorKind, id: &str, scope: &Scope) -> Self {
        let mut rule = Self::new(subject);
        rule.modes = self.modes;
        rule.access_to = self.access_to.clone();
        rule.default = self.default.clone();
        rule.default_for_new = self.default_for_new.clone();
        rule.other = self
            .other
            .iter()
            .filter(|(p, _)| p == vocab::ACL_MODE)
            .cloned()
            .collect();

        match scope.kind {
            ScopeKind::Resource => rule.access_to.retain(|i| *i != scope.iri),
            ScopeKind::Default => {
                rule.default.retain(|i| *i != scope.iri);
                rule.default_for_new.retain(|i| *i != scope.iri);
            }
        }

        rule.targets = Targets::only(kind, id);
        rule
    }
}

fn push_unique(list: &mut Vec<String>, value: &str) {
    if !list.iter().any(|v| v == value) {
        list.push(value.to_string());
    }
}

/// The rules of a graph, plus everything in it that is not a rule.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuleSet {
    /// Rules, in order of first appearance of their subject.
    pub rules: Vec<AuthorizationRule>,
    /// Statements about subjects that are not rules, kept verbatim.
    pub residual: Vec<Statement>,
}

impl RuleSet {
    /// Read every rule out of a graph.
    ///
    /// A subject is a rule when it has the `rdf:type acl:Authorization`
    /// statement.
    pub fn from_graph(graph: &AclGraph) -> Self {
        let rule_subjects: HashSet<&Term> = graph
            .iter()
            .filter(|s| s.has_predicate(vocab::RDF_TYPE) && s.object.is_iri(vocab::ACL_AUTHORIZATION))
            .map(|s| &s.subject)
            .collect();

        let mut order: Vec<&Term> = Vec::new();
        let mut grouped: HashMap<&Term, Vec<&Statement>> = HashMap::new();
        let mut residual = Vec::new();

        for statement in graph.iter() {
            if rule_subjects.contains(&statement.subject) {
                let entry = grouped.entry(&statement.subject).or_default();
                if entry.is_empty() {
                    order.push(&statement.subject);
                }
                entry.push(statement);
            } else {
                residual.push(statement.clone());
            }
        }

        let rules = order
            .into_iter()
            .map(|subject| {
                let statements = grouped.remove(subject).unwrap_or_default();
                AuthorizationRule::from_statements(subject.clone(), statements)
            })
            .collect();

        Self { rules, residual }
    }

    /// Write the set back out as statements: residual first, then rules.
    pub fn to_statements(&self) -> Vec<Statement> {
        let mut out = self.residual.clone();
        for rule in &self.rules {
            out.extend(rule.to_statements());
        }
        out
    }

    /// Iterate over the rules.
    pub fn iter(&self) -> std::slice::Iter<'_, AuthorizationRule> {
        self.rules.iter()
    }

    /// Find a rule by subject.
    pub fn get(&self, subject: &Term) -> Option<&AuthorizationRule> {
        self.rules.iter().find(|r| r.subject == *subject)
    }

    /// Number of rules.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Check if there are no rules.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Every subject in use, rule or not.
    pub fn subjects(&self) -> HashSet<String> {
        self.rules
            .iter()
            .map(|r| r.subject.value().to_string())
            .chain(self.residual.iter().map(|s| s.subject.value().to_string()))
            .collect()
    }
}
