//! # Vocabulary
//!
//! Fixed identifiers rules are matched against. These are not configurable.

/// Web Access Control namespace.
pub const ACL_NS: &str = "http://www.w3.org/ns/auth/acl#";

/// `rdf:type`.
pub const RDF_TYPE: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#type";

/// Type marker of an authorization rule.
pub const ACL_AUTHORIZATION: &str = "http://www.w3.org/ns/auth/acl#Authorization";

// Scope predicates

/// Rule applies to this resource.
pub const ACL_ACCESS_TO: &str = "http://www.w3.org/ns/auth/acl#accessTo";
/// Rule applies to the children of this container.
pub const ACL_DEFAULT: &str = "http://www.w3.org/ns/auth/acl#default";
/// Deprecated synonym of [`ACL_DEFAULT`].
pub const ACL_DEFAULT_FOR_NEW: &str = "http://www.w3.org/ns/auth/acl#defaultForNew";

// Target predicates

/// Individual agent (WebID).
pub const ACL_AGENT: &str = "http://www.w3.org/ns/auth/acl#agent";
/// Group of agents.
pub const ACL_AGENT_GROUP: &str = "http://www.w3.org/ns/auth/acl#agentGroup";
/// Class of agents (public, authenticated).
pub const ACL_AGENT_CLASS: &str = "http://www.w3.org/ns/auth/acl#agentClass";
/// Request origin.
pub const ACL_ORIGIN: &str = "http://www.w3.org/ns/auth/acl#origin";

// Modes

/// Access mode predicate.
pub const ACL_MODE: &str = "http://www.w3.org/ns/auth/acl#mode";
pub const ACL_READ: &str = "http://www.w3.org/ns/auth/acl#Read";
pub const ACL_APPEND: &str = "http://www.w3.org/ns/auth/acl#Append";
pub const ACL_WRITE: &str = "http://www.w3.org/ns/auth/acl#Write";
pub const ACL_CONTROL: &str = "http://www.w3.org/ns/auth/acl#Control";

// Well-known agent classes

/// Anyone, authenticated or not.
pub const FOAF_AGENT: &str = "http://xmlns.com/foaf/0.1/Agent";
/// Any authenticated agent.
pub const ACL_AUTHENTICATED_AGENT: &str = "http://www.w3.org/ns/auth/acl#AuthenticatedAgent";

/// Every predicate that belongs to the access-control vocabulary.
pub const ACL_PREDICATES: [&str; 8] = [
    ACL_ACCESS_TO,
    ACL_DEFAULT,
    ACL_DEFAULT_FOR_NEW,
    ACL_AGENT,
    ACL_AGENT_GROUP,
    ACL_AGENT_CLASS,
    ACL_ORIGIN,
    ACL_MODE,
];

/// Check whether a predicate/object pair is part of the access-control
/// vocabulary (including the rule type marker).
///
/// # Example
///
/// ```
/// use acl_graph::vocab;
///
/// assert!(vocab::is_acl_statement(vocab::ACL_MODE, vocab::ACL_READ));
/// assert!(vocab::is_acl_statement(vocab::RDF_TYPE, vocab::ACL_AUTHORIZATION));
/// assert!(!vocab::is_acl_statement(vocab::RDF_TYPE, "https://schema.org/Thing"));
/// ```
pub fn is_acl_statement(predicate: &str, object: &str) -> bool {
    if predicate == RDF_TYPE {
        return object == ACL_AUTHORIZATION;
    }
    ACL_PREDICATES.contains(&predicate)
}
