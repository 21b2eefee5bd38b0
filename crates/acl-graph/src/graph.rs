//! # ACL Graph
//!
//! An immutable-by-convention set of statements making up one ACL document.
//!
//! The graph remembers the IRI of the ACL document itself and of the resource
//! (or container) the document controls. Statement order is insertion order;
//! duplicates are never stored.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::Arc;

use crate::changelog::ChangeLog;
use crate::error::{GraphError, GraphResult};
use crate::term::{validate_iri, Statement, Term};

/// The statements of one ACL document.
///
/// Clones share storage until one of them is edited.
///
/// # Example
///
/// ```
/// use acl_graph::{AclGraph, Statement, Term};
///
/// let original = AclGraph::new("https://pod.example/.acl", "https://pod.example/").unwrap();
/// let mut edited = original.clone();
/// edited.add(Statement::new(Term::iri("urn:s"), "urn:p", Term::iri("urn:o")));
///
/// assert!(original.is_empty());
/// assert_eq!(edited.len(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "AclGraphData")]
pub struct AclGraph {
    /// IRI of the ACL document.
    acl_iri: String,
    /// IRI of the resource or container this document controls.
    access_to: String,
    /// Statements, in insertion order.
    statements: Arc<Vec<Statement>>,
    /// Changes relative to the loaded snapshot.
    change_log: ChangeLog,
}

/// Serialized form of [`AclGraph`], checked on the way in.
#[derive(Deserialize)]
struct AclGraphData {
    acl_iri: String,
    access_to: String,
    statements: Vec<Statement>,
    #[serde(default)]
    change_log: ChangeLog,
}

impl TryFrom<AclGraphData> for AclGraph {
    type Error = GraphError;

    fn try_from(data: AclGraphData) -> GraphResult<Self> {
        let mut graph = AclGraph::from_statements(data.acl_iri, data.access_to, data.statements)?;
        graph.change_log = data.change_log;
        Ok(graph)
    }
}

impl AclGraph {
    /// Create an empty graph for an ACL document.
    ///
    /// # Arguments
    ///
    /// * `acl_iri` - IRI of the ACL document
    /// * `access_to` - IRI of the resource or container it controls
    pub fn new(acl_iri: impl Into<String>, access_to: impl Into<String>) -> GraphResult<Self> {
        let acl_iri = acl_iri.into();
        let access_to = access_to.into();
        validate_iri(&acl_iri)?;
        validate_iri(&access_to)?;

        Ok(Self {
            acl_iri,
            access_to,
            statements: Arc::new(Vec::new()),
            change_log: ChangeLog::new(),
        })
    }

    /// Load a snapshot from existing statements.
    ///
    /// The result has an empty change log: the statements are treated as
    /// already persisted. Duplicate statements are dropped.
    pub fn from_statements<I>(
        acl_iri: impl Into<String>,
        access_to: impl Into<String>,
        statements: I,
    ) -> GraphResult<Self>
    where
        I: IntoIterator<Item = Statement>,
    {
        let mut graph = Self::new(acl_iri, access_to)?;
        let mut seen = HashSet::new();
        let list: Vec<Statement> = statements
            .into_iter()
            .filter(|s| seen.insert(s.clone()))
            .collect();
        graph.statements = Arc::new(list);
        Ok(graph)
    }

    /// IRI of the ACL document.
    pub fn acl_iri(&self) -> &str {
        &self.acl_iri
    }

    /// IRI of the resource or container this document controls.
    pub fn access_to(&self) -> &str {
        &self.access_to
    }

    /// All statements, in insertion order.
    pub fn statements(&self) -> &[Statement] {
        &self.statements
    }

    /// Iterate over all statements.
    pub fn iter(&self) -> std::slice::Iter<'_, Statement> {
        self.statements.iter()
    }

    /// Number of statements.
    pub fn len(&self) -> usize {
        self.statements.len()
    }

    /// Check if the graph holds no statements.
    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }

    /// Check if a statement is present.
    pub fn contains(&self, statement: &Statement) -> bool {
        self.statements.contains(statement)
    }

    /// Add a statement.
    ///
    /// # Returns
    ///
    /// `true` if the statement was not already present
    pub fn add(&mut self, statement: Statement) -> bool {
        if self.contains(&statement) {
            return false;
        }
        self.change_log.record_addition(statement.clone());
        Arc::make_mut(&mut self.statements).push(statement);
        true
    }

    /// Remove a statement.
    ///
    /// # Returns
    ///
    /// `true` if the statement was present
    pub fn remove(&mut self, statement: &Statement) -> bool {
        let Some(pos) = self.statements.iter().position(|s| s == statement) else {
            return false;
        };
        let removed = Arc::make_mut(&mut self.statements).remove(pos);
        self.change_log.record_deletion(removed);
        true
    }

    /// Distinct subjects, in order of first appearance.
    pub fn subjects(&self) -> Vec<&Term> {
        let mut seen = HashSet::new();
        self.statements
            .iter()
            .map(|s| &s.subject)
            .filter(|s| seen.insert(*s))
            .collect()
    }

    /// All statements about one subject.
    pub fn statements_about<'a>(&'a self, subject: &'a Term) -> impl Iterator<Item = &'a Statement> {
        self.statements.iter().filter(move |s| s.subject == *subject)
    }

    /// Accumulated changes relative to the loaded snapshot.
    pub fn change_log(&self) -> &ChangeLog {
        &self.change_log
    }

    /// Forget accumulated changes, e.g. after the caller persisted them.
    pub fn mark_persisted(&self) -> Self {
        Self {
            change_log: ChangeLog::new(),
            ..self.clone()
        }
    }

    /// Produce a new graph holding exactly `next`, plus the diff from `self`.
    ///
    /// Statements kept from `self` stay in their original order; new ones are
    /// appended in the order given. The returned change log covers only this
    /// step, while the new graph's own change log accumulates it.
    pub fn replace_statements(&self, next: Vec<Statement>) -> (AclGraph, ChangeLog) {
        let current: HashSet<&Statement> = self.statements.iter().collect();
        let mut seen = HashSet::new();
        let wanted: Vec<Statement> = next.into_iter().filter(|s| seen.insert(s.clone())).collect();
        let wanted_set: HashSet<&Statement> = wanted.iter().collect();

        let mut diff = ChangeLog::new();
        let mut result = Vec::with_capacity(wanted.len());

        for statement in self.statements.iter() {
            if wanted_set.contains(statement) {
                result.push(statement.clone());
            } else {
                diff.deletions.push(statement.clone());
            }
        }
        for statement in &wanted {
            if !current.contains(statement) {
                diff.additions.push(statement.clone());
                result.push(statement.clone());
            }
        }

        let mut change_log = self.change_log.clone();
        change_log.merge(&diff);

        let graph = AclGraph {
            acl_iri: self.acl_iri.clone(),
            access_to: self.access_to.clone(),
            statements: Arc::new(result),
            change_log,
        };
        (graph, diff)
    }
}

impl<'a> IntoIterator for &'a AclGraph {
    type Item = &'a Statement;
    type IntoIter = std::slice::Iter<'a, Statement>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn st(s: &str, o: &str) -> Statement {
        Statement::new(Term::iri(s), "urn:p", Term::iri(o))
    }

    fn graph() -> AclGraph {
        AclGraph::new("https://pod.example/doc.acl", "https://pod.example/doc").unwrap()
    }

    #[test]
    fn test_new_rejects_bad_iri() {
        let err = AclGraph::new("not an iri", "https://pod.example/doc").unwrap_err();
        assert_eq!(err, GraphError::InvalidIri("not an iri".to_string()));
    }

    #[test]
    fn test_deserialize_checks_iris_and_dedups() {
        let mut g = graph();
        g.add(st("urn:a", "urn:b"));
        let json = serde_json::to_string(&g).unwrap();
        let back: AclGraph = serde_json::from_str(&json).unwrap();
        assert_eq!(back, g);

        let bad = json.replace("https://pod.example/doc.acl", "not an iri");
        assert!(serde_json::from_str::<AclGraph>(&bad).is_err());

        let mut value: serde_json::Value = serde_json::from_str(&json).unwrap();
        let statement = value["statements"][0].clone();
        value["statements"] = serde_json::Value::Array(vec![statement.clone(), statement]);
        let back: AclGraph = serde_json::from_value(value).unwrap();
        assert_eq!(back.len(), 1);
    }

    #[test]
    fn test_add_remove_records_changes() {
        let mut g = graph();
        assert!(g.add(st("urn:a", "urn:b")));
        assert!(!g.add(st("urn:a", "urn:b")));
        assert_eq!(g.len(), 1);
        assert_eq!(g.change_log().additions.len(), 1);

        assert!(g.remove(&st("urn:a", "urn:b")));
        assert!(!g.remove(&st("urn:a", "urn:b")));
        assert!(g.is_empty());
        assert!(g.change_log().is_empty());
    }

    #[test]
    fn test_from_statements_dedups_and_has_clean_log() {
        let g = AclGraph::from_statements(
            "https://pod.example/doc.acl",
            "https://pod.example/doc",
            vec![st("urn:a", "urn:b"), st("urn:a", "urn:b"), st("urn:c", "urn:d")],
        )
        .unwrap();
        assert_eq!(g.len(), 2);
        assert!(g.change_log().is_empty());
    }

    #[test]
    fn test_clone_is_independent() {
        let mut original = graph();
        original.add(st("urn:a", "urn:b"));
        let mut copy = original.clone();
        copy.remove(&st("urn:a", "urn:b"));
        assert_eq!(original.len(), 1);
        assert!(copy.is_empty());
    }

    #[test]
    fn test_subjects_in_first_appearance_order() {
        let g = AclGraph::from_statements(
            "https://pod.example/doc.acl",
            "https://pod.example/doc",
            vec![st("urn:b", "urn:1"), st("urn:a", "urn:2"), st("urn:b", "urn:3")],
        )
        .unwrap();
        let subjects: Vec<&str> = g.subjects().iter().map(|t| t.value()).collect();
        assert_eq!(subjects, vec!["urn:b", "urn:a"]);
        assert_eq!(g.statements_about(&Term::iri("urn:b")).count(), 2);
    }

    #[test]
    fn test_replace_statements_minimal_diff() {
        let g = AclGraph::from_statements(
            "https://pod.example/doc.acl",
            "https://pod.example/doc",
            vec![st("urn:a", "urn:1"), st("urn:b", "urn:2"), st("urn:c", "urn:3")],
        )
        .unwrap();

        let (next, diff) = g.replace_statements(vec![
            st("urn:d", "urn:4"),
            st("urn:c", "urn:3"),
            st("urn:a", "urn:1"),
        ]);

        assert_eq!(diff.deletions, vec![st("urn:b", "urn:2")]);
        assert_eq!(diff.additions, vec![st("urn:d", "urn:4")]);
        // kept statements stay in original order, additions go last
        assert_eq!(
            next.statements(),
            &[st("urn:a", "urn:1"), st("urn:c", "urn:3"), st("urn:d", "urn:4")]
        );
        assert_eq!(next.change_log(), &diff);
        // input untouched
        assert_eq!(g.len(), 3);
        assert!(g.change_log().is_empty());
    }

    #[test]
    fn test_replace_with_same_is_empty_diff() {
        let g = AclGraph::from_statements(
            "https://pod.example/doc.acl",
            "https://pod.example/doc",
            vec![st("urn:a", "urn:1")],
        )
        .unwrap();
        let (next, diff) = g.replace_statements(g.statements().to_vec());
        assert!(diff.is_empty());
        assert_eq!(next, g);
    }

    #[test]
    fn test_mark_persisted() {
        let mut g = graph();
        g.add(st("urn:a", "urn:b"));
        let persisted = g.mark_persisted();
        assert!(persisted.change_log().is_empty());
        assert_eq!(persisted.len(), 1);
    }
}
