//! # Terms and Statements
//!
//! The atoms of a rule graph. A statement links a subject to an object
//! through a predicate; subjects and predicates are always IRIs, objects may
//! be IRIs or literals.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{GraphError, GraphResult};

/// A node in a statement: either an IRI or a literal value.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum Term {
    /// Named node.
    Iri(String),
    /// Literal value (stored in its lexical form).
    Literal(String),
}

impl Term {
    /// Create an IRI term.
    pub fn iri(value: impl Into<String>) -> Self {
        Term::Iri(value.into())
    }

    /// Create a literal term.
    pub fn literal(value: impl Into<String>) -> Self {
        Term::Literal(value.into())
    }

    /// Get the IRI, if this term is one.
    ///
    /// # Example
    ///
    /// ```
    /// use acl_graph::Term;
    ///
    /// assert_eq!(Term::iri("https://a.example/").as_iri(), Some("https://a.example/"));
    /// assert_eq!(Term::literal("x").as_iri(), None);
    /// ```
    pub fn as_iri(&self) -> Option<&str> {
        match self {
            Term::Iri(iri) => Some(iri),
            Term::Literal(_) => None,
        }
    }

    /// Check whether this term is the given IRI.
    pub fn is_iri(&self, iri: &str) -> bool {
        self.as_iri() == Some(iri)
    }

    /// Get the raw value regardless of kind.
    pub fn value(&self) -> &str {
        match self {
            Term::Iri(v) | Term::Literal(v) => v,
        }
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Term::Iri(iri) => write!(f, "<{}>", iri),
            Term::Literal(lit) => write!(f, "{:?}", lit),
        }
    }
}

/// A single `(subject, predicate, object)` statement.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Statement {
    /// The thing the statement is about.
    pub subject: Term,
    /// The relation, always an IRI.
    pub predicate: String,
    /// The value.
    pub object: Term,
}

impl Statement {
    /// Create a new statement.
    ///
    /// # Example
    ///
    /// ```
    /// use acl_graph::{vocab, Statement, Term};
    ///
    /// let st = Statement::new(
    ///     Term::iri("https://pod.example/doc.acl#r1"),
    ///     vocab::ACL_MODE,
    ///     Term::iri(vocab::ACL_READ),
    /// );
    /// assert_eq!(st.predicate, vocab::ACL_MODE);
    /// ```
    pub fn new(subject: Term, predicate: impl Into<String>, object: Term) -> Self {
        Self {
            subject,
            predicate: predicate.into(),
            object,
        }
    }

    /// Check if this statement has the given predicate.
    pub fn has_predicate(&self, predicate: &str) -> bool {
        self.predicate == predicate
    }
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} <{}> {} .", self.subject, self.predicate, self.object)
    }
}

/// Check that a value looks like an absolute IRI.
///
/// Only the shape is checked: a scheme followed by `:`, no whitespace, and
/// no angle brackets.
pub fn validate_iri(value: &str) -> GraphResult<()> {
    let scheme_end = value
        .find(':')
        .ok_or_else(|| GraphError::InvalidIri(value.to_string()))?;
    let scheme = &value[..scheme_end];

    let scheme_ok = scheme
        .chars()
        .next()
        .map(|c| c.is_ascii_alphabetic())
        .unwrap_or(false)
        && scheme
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'));

    if !scheme_ok || value.chars().any(|c| c.is_whitespace() || c == '<' || c == '>') {
        return Err(GraphError::InvalidIri(value.to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_term_accessors() {
        let iri = Term::iri("https://a.example/x");
        assert!(iri.is_iri("https://a.example/x"));
        assert_eq!(iri.value(), "https://a.example/x");

        let lit = Term::literal("hello");
        assert!(!lit.is_iri("hello"));
        assert_eq!(lit.value(), "hello");
    }

    #[test]
    fn test_statement_display() {
        let st = Statement::new(
            Term::iri("https://a.example/s"),
            "https://a.example/p",
            Term::literal("o"),
        );
        assert_eq!(
            st.to_string(),
            "<https://a.example/s> <https://a.example/p> \"o\" ."
        );
    }

    #[test]
    fn test_validate_iri() {
        assert!(validate_iri("https://pod.example/doc").is_ok());
        assert!(validate_iri("urn:uuid:1234").is_ok());
        assert!(validate_iri("mailto:a@b.example").is_ok());

        assert!(validate_iri("").is_err());
        assert!(validate_iri("no-scheme").is_err());
        assert!(validate_iri("https://pod.example/a doc").is_err());
        assert!(validate_iri("1http://x").is_err());
        assert!(validate_iri("<https://x>").is_err());
    }

    #[test]
    fn test_term_serde_shape() {
        let json = serde_json::to_string(&Term::iri("https://a.example/")).unwrap();
        assert_eq!(json, r#"{"type":"iri","value":"https://a.example/"}"#);
    }
}
