//! # ACL Graph
//!
//! This crate provides the statement store that access-control rule
//! documents are read from and written back to.
//!
//! ## Overview
//!
//! The acl-graph crate handles:
//! - **Terms**: IRIs and literals appearing in statements
//! - **Statements**: `(subject, predicate, object)` triples
//! - **Graphs**: Immutable, copy-on-write statement sets bound to an ACL document
//! - **Change Logs**: Minimal diffs of added/removed statements for persistence
//! - **Vocabulary**: The fixed identifiers rules are matched against
//!
//! ## Usage
//!
//! ```rust
//! use acl_graph::{vocab, AclGraph, Statement, Term};
//!
//! let mut graph = AclGraph::new(
//!     "https://pod.example/doc.acl",
//!     "https://pod.example/doc",
//! ).unwrap();
//!
//! let rule = Term::iri("https://pod.example/doc.acl#owner");
//! graph.add(Statement::new(rule.clone(), vocab::RDF_TYPE, Term::iri(vocab::ACL_AUTHORIZATION)));
//! graph.add(Statement::new(rule, vocab::ACL_MODE, Term::iri(vocab::ACL_READ)));
//!
//! assert_eq!(graph.len(), 2);
//! assert_eq!(graph.change_log().additions.len(), 2);
//! ```
//!
//! ## Immutability
//!
//! Cloning an [`AclGraph`] is cheap: the statement list is shared behind an
//! `Arc` and only copied when one of the clones is edited. Editing a clone
//! never affects the graph it was cloned from.

pub mod changelog;
pub mod error;
pub mod graph;
pub mod term;
pub mod vocab;

// Re-export main types for convenience
pub use changelog::ChangeLog;
pub use error::{GraphError, GraphResult};
pub use graph::AclGraph;
pub use term::{validate_iri, Statement, Term};
