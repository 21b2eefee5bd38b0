//! # ACL Resolver
//!
//! This crate fetches rule graphs for resources and answers access questions
//! against them.
//!
//! ## Overview
//!
//! The acl-resolver crate handles:
//! - **ACL Sources**: Async retrieval of a resource's own and inherited ACLs
//! - **Resolution**: Choosing the one graph that answers for a resource
//! - **Queries**: Per-actor access that is unknown when no ACL is readable
//!
//! ## Resolution
//!
//! A resource's own ACL is always used when it can be read, even if an
//! ancestor's ACL grants more. Otherwise the nearest ancestor container's ACL
//! is used, and only its default rules count. When neither can be read every
//! answer is [`acl_rules::AccessDecision::Indeterminate`], never a denial.

pub mod resolver;
pub mod source;

// Re-export main types for convenience
pub use resolver::AclResolver;
pub use source::{AclSource, MemoryAclSource, SourceError, SourceResult, SourceStats};
