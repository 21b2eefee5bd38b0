//! # Actor Targets
//!
//! The kinds of actor a rule can name, and the per-kind target sets a rule
//! carries.

use serde::{Deserialize, Serialize};

use acl_graph::vocab;

/// Kind of actor a rule applies to.
///
/// Each kind is bound to one target predicate:
/// - **Agent**: an individual, identified by WebID (`acl:agent`)
/// - **Group**: a group of agents (`acl:agentGroup`)
/// - **AgentClass**: a class such as "anyone" or "any authenticated agent" (`acl:agentClass`)
/// - **Origin**: the origin of the request (`acl:origin`)
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum ActorKind {
    /// Individual agent.
    Agent,
    /// Agent group.
    Group,
    /// Agent class.
    AgentClass,
    /// Request origin.
    Origin,
}

impl ActorKind {
    /// Get the string representation of the kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            ActorKind::Agent => "agent",
            ActorKind::Group => "group",
            ActorKind::AgentClass => "agent_class",
            ActorKind::Origin => "origin",
        }
    }

    /// Parse from string representation.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "agent" => Some(ActorKind::Agent),
            "group" | "agent_group" => Some(ActorKind::Group),
            "agent_class" | "class" => Some(ActorKind::AgentClass),
            "origin" => Some(ActorKind::Origin),
            _ => None,
        }
    }

    /// The target predicate for this kind.
    pub fn predicate(&self) -> &'static str {
        match self {
            ActorKind::Agent => vocab::ACL_AGENT,
            ActorKind::Group => vocab::ACL_AGENT_GROUP,
            ActorKind::AgentClass => vocab::ACL_AGENT_CLASS,
            ActorKind::Origin => vocab::ACL_ORIGIN,
        }
    }

    /// Find the kind whose target predicate this is.
    pub fn from_predicate(predicate: &str) -> Option<Self> {
        match predicate {
            vocab::ACL_AGENT => Some(ActorKind::Agent),
            vocab::ACL_AGENT_GROUP => Some(ActorKind::Group),
            vocab::ACL_AGENT_CLASS => Some(ActorKind::AgentClass),
            vocab::ACL_ORIGIN => Some(ActorKind::Origin),
            _ => None,
        }
    }

    /// All kinds, in canonical order.
    pub fn all() -> [Self; 4] {
        [
            ActorKind::Agent,
            ActorKind::Group,
            ActorKind::AgentClass,
            ActorKind::Origin,
        ]
    }
}

/// Actor identifiers a rule applies to, grouped by kind.
///
/// Identifiers keep their insertion order and are never duplicated within a
/// kind. Each kind is independent: the same identifier listed under two
/// kinds counts as two separate targets.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Targets {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    agents: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    groups: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    agent_classes: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    origins: Vec<String>,
}

impl Targets {
    /// No targets at all.
    pub fn new() -> Self {
        Self::default()
    }

    /// A target set naming exactly one actor.
    pub fn only(kind: ActorKind, id: impl Into<String>) -> Self {
        let mut targets = Self::new();
        targets.insert(kind, id);
        targets
    }

    /// Identifiers of one kind.
    pub fn get(&self, kind: ActorKind) -> &[String] {
        match kind {
            ActorKind::Agent => &self.agents,
            ActorKind::Group => &self.groups,
            ActorKind::AgentClass => &self.agent_classes,
            ActorKind::Origin => &self.origins,
        }
    }

    fn get_mut(&mut self, kind: ActorKind) -> &mut Vec<String> {
        match kind {
            ActorKind::Agent => &mut self.agents,
            ActorKind::Group => &mut self.groups,
            ActorKind::AgentClass => &mut self.agent_classes,
            ActorKind::Origin => &mut self.origins,
        }
    }

    /// Check whether the identifier is listed under the given kind.
    pub fn contains(&self, kind: ActorKind, id: &str) -> bool {
        self.get(kind).iter().any(|t| t == id)
    }

    /// Add an identifier under a kind.
    pub fn insert(&mut self, kind: ActorKind, id: impl Into<String>) {
        let id = id.into();
        let list = self.get_mut(kind);
        if !list.contains(&id) {
            list.push(id);
        }
    }

    /// Remove an identifier from a kind.
    ///
    /// # Returns
    ///
    /// `true` if the identifier was present
    pub fn remove(&mut self, kind: ActorKind, id: &str) -> bool {
        let list = self.get_mut(kind);
        let before = list.len();
        list.retain(|t| t != id);
        list.len() != before
    }

    /// Check if no actor of any kind is named.
    pub fn is_empty(&self) -> bool {
        ActorKind::all().iter().all(|k| self.get(*k).is_empty())
    }

    /// Iterate over every `(kind, identifier)` pair in canonical kind order.
    pub fn iter(&self) -> impl Iterator<Item = (ActorKind, &str)> + '_ {
        ActorKind::all()
            .into_iter()
            .flat_map(move |kind| self.get(kind).iter().map(move |id| (kind, id.as_str())))
    }
}
