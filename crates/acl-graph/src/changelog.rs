//! # Change Log
//!
//! Records which statements were added to and removed from a graph relative
//! to the snapshot it was loaded from, so callers can persist a minimal diff.

use serde::{Deserialize, Serialize};

use crate::error::{GraphError, GraphResult};
use crate::term::Statement;

/// Statements added and removed by one or more edits.
///
/// A change log is always minimal: no statement appears in both lists, and
/// no statement appears twice in the same list.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChangeLog {
    /// Statements present after the edit but not before.
    pub additions: Vec<Statement>,
    /// Statements present before the edit but not after.
    pub deletions: Vec<Statement>,
}

impl ChangeLog {
    /// Create an empty change log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if nothing changed.
    pub fn is_empty(&self) -> bool {
        self.additions.is_empty() && self.deletions.is_empty()
    }

    /// Total number of recorded statement changes.
    pub fn len(&self) -> usize {
        self.additions.len() + self.deletions.len()
    }

    /// Record an added statement.
    ///
    /// Adding a statement that was previously recorded as deleted cancels the
    /// deletion instead.
    pub fn record_addition(&mut self, statement: Statement) {
        if let Some(pos) = self.deletions.iter().position(|s| *s == statement) {
            self.deletions.remove(pos);
        } else if !self.additions.contains(&statement) {
            self.additions.push(statement);
        }
    }

    /// Record a removed statement.
    ///
    /// Removing a statement that was previously recorded as added cancels the
    /// addition instead.
    pub fn record_deletion(&mut self, statement: Statement) {
        if let Some(pos) = self.additions.iter().position(|s| *s == statement) {
            self.additions.remove(pos);
        } else if !self.deletions.contains(&statement) {
            self.deletions.push(statement);
        }
    }

    /// Fold a later change log into this one.
    ///
    /// # Example
    ///
    /// ```
    /// use acl_graph::{ChangeLog, Statement, Term};
    ///
    /// let st = Statement::new(Term::iri("urn:s"), "urn:p", Term::iri("urn:o"));
    ///
    /// let mut first = ChangeLog::new();
    /// first.record_addition(st.clone());
    ///
    /// let mut second = ChangeLog::new();
    /// second.record_deletion(st);
    ///
    /// first.merge(&second);
    /// assert!(first.is_empty());
    /// ```
    pub fn merge(&mut self, later: &ChangeLog) {
        for statement in &later.deletions {
            self.record_deletion(statement.clone());
        }
        for statement in &later.additions {
            self.record_addition(statement.clone());
        }
    }

    /// Export as JSON for persistence layers that ship diffs as documents.
    pub fn to_json(&self) -> GraphResult<String> {
        serde_json::to_string(self).map_err(|e| GraphError::Serialization(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::term::Term;

    fn st(n: u32) -> Statement {
        Statement::new(Term::iri(format!("urn:s{}", n)), "urn:p", Term::literal("o"))
    }

    #[test]
    fn test_addition_cancels_deletion() {
        let mut log = ChangeLog::new();
        log.record_deletion(st(1));
        log.record_addition(st(1));
        assert!(log.is_empty());
    }

    #[test]
    fn test_no_duplicates() {
        let mut log = ChangeLog::new();
        log.record_addition(st(1));
        log.record_addition(st(1));
        log.record_deletion(st(2));
        log.record_deletion(st(2));
        assert_eq!(log.additions, vec![st(1)]);
        assert_eq!(log.deletions, vec![st(2)]);
        assert_eq!(log.len(), 2);
    }

    #[test]
    fn test_merge_keeps_order() {
        let mut first = ChangeLog::new();
        first.record_addition(st(1));
        first.record_deletion(st(5));

        let mut second = ChangeLog::new();
        second.record_addition(st(2));
        second.record_addition(st(5));
        second.record_deletion(st(1));
        second.record_deletion(st(6));

        first.merge(&second);
        assert_eq!(first.additions, vec![st(2)]);
        assert_eq!(first.deletions, vec![st(6)]);
    }

    #[test]
    fn test_to_json() {
        let mut log = ChangeLog::new();
        log.record_addition(st(1));
        let json = log.to_json().unwrap();
        let back: ChangeLog = serde_json::from_str(&json).unwrap();
        assert_eq!(back, log);
    }
}
