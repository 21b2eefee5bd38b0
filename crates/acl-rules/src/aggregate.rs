//! # Access Aggregation
//!
//! Combines the modes of every matching rule into one decision. A mode is
//! granted if at least one rule grants it; the order of rules never matters.

use std::collections::BTreeMap;

use crate::modes::AccessModeSet;
use crate::rule::AuthorizationRule;
use crate::targets::ActorKind;

/// Union of the modes of all given rules. No rules means no access.
///
/// # Example
///
/// ```
/// use acl_graph::Term;
/// use acl_rules::{combine, AccessMode, AuthorizationRule};
///
/// let mut a = AuthorizationRule::new(Term::iri("urn:a"));
/// a.modes.insert(AccessMode::Read);
/// let mut b = AuthorizationRule::new(Term::iri("urn:b"));
/// b.modes.insert(AccessMode::Append);
///
/// let modes = combine([&a, &b]);
/// assert!(modes.contains(AccessMode::Read));
/// assert!(modes.contains(AccessMode::Append));
/// assert!(combine(Vec::<&AuthorizationRule>::new()).is_empty());
/// ```
pub fn combine<'a, I>(rules: I) -> AccessModeSet
where
    I: IntoIterator<Item = &'a AuthorizationRule>,
{
    rules
        .into_iter()
        .fold(AccessModeSet::empty(), |acc, rule| acc.union(rule.modes))
}

/// Group rules by every actor of `kind` they name and combine within each
/// group.
///
/// A rule naming two actors contributes to both.
pub fn by_actor<'a, I>(rules: I, kind: ActorKind) -> BTreeMap<String, AccessModeSet>
where
    I: IntoIterator<Item = &'a AuthorizationRule>,
{
    let mut out: BTreeMap<String, AccessModeSet> = BTreeMap::new();
    for rule in rules {
        for id in rule.targets.get(kind) {
            let entry = out.entry(id.clone()).or_default();
            *entry = entry.union(rule.modes);
        }
    }
    out
}
