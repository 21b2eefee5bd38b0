//! # ACL Rules
//!
//! This crate reads and edits the authorization rules stored in an
//! [`acl_graph::AclGraph`].
//!
//! ## Overview
//!
//! The acl-rules crate handles:
//! - **Rule Index**: Finding the rules that apply to a scope and actor
//! - **Aggregation**: Combining the modes of several rules into one answer
//! - **Model Bridge**: Converting between boolean and tri-state access
//! - **Mutation**: Giving one actor exactly a set of modes in one scope
//! - **Resolution**: Choosing between a resource's own ACL and its fallback
//!
//! ## Usage
//!
//! ```rust
//! use acl_graph::AclGraph;
//! use acl_rules::{AccessControl, AgentAccess};
//!
//! let control = AccessControl::default();
//! let graph = AclGraph::new("https://pod.example/doc.acl", "https://pod.example/doc").unwrap();
//! let webid = "https://alice.example/profile#me";
//!
//! let edited = control
//!     .set_agent_resource_access(&graph, webid, AgentAccess::full())
//!     .unwrap();
//!
//! assert_eq!(control.get_agent_resource_access(&edited.graph, webid), AgentAccess::full());
//! // the input graph is never modified
//! assert!(graph.is_empty());
//! ```
//!
//! ## Actors
//!
//! | Kind | Predicate | Examples |
//! |------|-----------|----------|
//! | Agent | `acl:agent` | WebIDs |
//! | Group | `acl:agentGroup` | vcard groups |
//! | Agent class | `acl:agentClass` | `foaf:Agent` (public), `acl:AuthenticatedAgent` |
//! | Origin | `acl:origin` | Web application origins |
//!
//! Actor kinds never leak into each other: public access is not agent access.

pub mod access;
pub mod aggregate;
pub mod bootstrap;
pub mod bridge;
pub mod config;
pub mod error;
pub mod index;
pub mod modes;
pub mod mutate;
pub mod naming;
pub mod resolution;
pub mod rule;
pub mod scope;
pub mod targets;
pub mod validate;

mod proptests;

// Re-export main types for convenience
pub use access::AccessControl;
pub use aggregate::{by_actor, combine};
pub use bootstrap::{create_acl, create_acl_from_fallback};
pub use bridge::{apply_patch, to_legacy, to_universal, AgentAccess, UniversalAccess};
pub use config::{AclConfig, ConfigError, RuleNaming};
pub use error::{AclError, AclResult};
pub use index::RuleIndex;
pub use modes::{AccessMode, AccessModeSet};
pub use mutate::{Mutation, RuleMutator};
pub use resolution::{resolve, AccessDecision, AclOrigin, ResolvedAcl};
pub use rule::{AuthorizationRule, RuleSet};
pub use scope::{Scope, ScopeKind};
pub use targets::{ActorKind, Targets};
pub use validate::{ensure_valid, validate, ValidationReport};
