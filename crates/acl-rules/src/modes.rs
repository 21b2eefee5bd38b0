//! # Access Modes
//!
//! Defines the four access modes a rule can grant and the set type used to
//! carry them around.

use serde::{Deserialize, Serialize};
use std::fmt;

use acl_graph::vocab;

/// Modes of access a rule can grant.
///
/// Modes are independent:
/// - **Read**: View resource data
/// - **Append**: Add data without removing any
/// - **Write**: Modify or delete data
/// - **Control**: Read and modify the ACL itself
///
/// `Write` does not imply `Append` and `Append` does not imply `Write`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum AccessMode {
    /// Read resource data.
    Read,
    /// Append to resource data.
    Append,
    /// Write (modify or delete) resource data.
    Write,
    /// Read and edit the ACL.
    Control,
}

impl AccessMode {
    /// Get the string representation of the mode.
    pub fn as_str(&self) -> &'static str {
        match self {
            AccessMode::Read => "read",
            AccessMode::Append => "append",
            AccessMode::Write => "write",
            AccessMode::Control => "control",
        }
    }

    /// Get the vocabulary IRI of the mode.
    pub fn iri(&self) -> &'static str {
        match self {
            AccessMode::Read => vocab::ACL_READ,
            AccessMode::Append => vocab::ACL_APPEND,
            AccessMode::Write => vocab::ACL_WRITE,
            AccessMode::Control => vocab::ACL_CONTROL,
        }
    }

    /// Parse a mode from its vocabulary IRI.
    ///
    /// # Example
    ///
    /// ```
    /// use acl_graph::vocab;
    /// use acl_rules::AccessMode;
    ///
    /// assert_eq!(AccessMode::from_iri(vocab::ACL_WRITE), Some(AccessMode::Write));
    /// assert_eq!(AccessMode::from_iri("https://example.org/Other"), None);
    /// ```
    pub fn from_iri(iri: &str) -> Option<Self> {
        match iri {
            vocab::ACL_READ => Some(AccessMode::Read),
            vocab::ACL_APPEND => Some(AccessMode::Append),
            vocab::ACL_WRITE => Some(AccessMode::Write),
            vocab::ACL_CONTROL => Some(AccessMode::Control),
            _ => None,
        }
    }

    /// Parse a mode from its short name (case-insensitive).
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "read" => Some(AccessMode::Read),
            "append" => Some(AccessMode::Append),
            "write" => Some(AccessMode::Write),
            "control" => Some(AccessMode::Control),
            _ => None,
        }
    }

    /// All modes, in canonical order.
    pub fn all() -> [Self; 4] {
        [
            AccessMode::Read,
            AccessMode::Append,
            AccessMode::Write,
            AccessMode::Control,
        ]
    }

    fn bit(self) -> u8 {
        match self {
            AccessMode::Read => 1,
            AccessMode::Append => 1 << 1,
            AccessMode::Write => 1 << 2,
            AccessMode::Control => 1 << 3,
        }
    }
}

impl fmt::Display for AccessMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An unordered set of access modes.
///
/// # Example
///
/// ```
/// use acl_rules::{AccessMode, AccessModeSet};
///
/// let mut set = AccessModeSet::empty();
/// set.insert(AccessMode::Read);
///
/// let other = AccessModeSet::from_iter([AccessMode::Write]);
/// let union = set.union(other);
///
/// assert!(union.contains(AccessMode::Read));
/// assert!(union.contains(AccessMode::Write));
/// assert!(!union.contains(AccessMode::Append));
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct AccessModeSet {
    bits: u8,
}

impl AccessModeSet {
    /// The empty set.
    pub fn empty() -> Self {
        Self { bits: 0 }
    }

    /// The set of all four modes.
    pub fn all() -> Self {
        AccessMode::all().into_iter().collect()
    }

    /// Check if a mode is present.
    pub fn contains(&self, mode: AccessMode) -> bool {
        self.bits & mode.bit() != 0
    }

    /// Add a mode.
    pub fn insert(&mut self, mode: AccessMode) {
        self.bits |= mode.bit();
    }

    /// Remove a mode.
    pub fn remove(&mut self, mode: AccessMode) {
        self.bits &= !mode.bit();
    }

    /// Union with another set.
    pub fn union(self, other: AccessModeSet) -> AccessModeSet {
        AccessModeSet {
            bits: self.bits | other.bits,
        }
    }

    /// Check if no mode is present.
    pub fn is_empty(&self) -> bool {
        self.bits == 0
    }

    /// Number of modes present.
    pub fn len(&self) -> usize {
        self.bits.count_ones() as usize
    }

    /// Iterate over the present modes in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = AccessMode> + '_ {
        AccessMode::all().into_iter().filter(|m| self.contains(*m))
    }
}

impl FromIterator<AccessMode> for AccessModeSet {
    fn from_iter<T: IntoIterator<Item = AccessMode>>(iter: T) -> Self {
        let mut set = AccessModeSet::empty();
        for mode in iter {
            set.insert(mode);
        }
        set
    }
}

impl Serialize for AccessModeSet {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.iter())
    }
}

impl<'de> Deserialize<'de> for AccessModeSet {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let modes = Vec::<AccessMode>::deserialize(deserializer)?;
        Ok(modes.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_parsing() {
        assert_eq!(AccessMode::parse("read"), Some(AccessMode::Read));
        assert_eq!(AccessMode::parse("APPEND"), Some(AccessMode::Append));
        assert_eq!(AccessMode::parse("Write"), Some(AccessMode::Write));
        assert_eq!(AccessMode::parse("control"), Some(AccessMode::Control));
        assert_eq!(AccessMode::parse("delete"), None);
    }

    #[test]
    fn test_mode_iri_roundtrip() {
        for mode in AccessMode::all() {
            assert_eq!(AccessMode::from_iri(mode.iri()), Some(mode));
        }
    }

    #[test]
    fn test_write_does_not_imply_append() {
        let set = AccessModeSet::from_iter([AccessMode::Write]);
        assert!(set.contains(AccessMode::Write));
        assert!(!set.contains(AccessMode::Append));

        let set = AccessModeSet::from_iter([AccessMode::Append]);
        assert!(!set.contains(AccessMode::Write));
    }

    #[test]
    fn test_set_operations() {
        let mut set = AccessModeSet::empty();
        assert!(set.is_empty());

        set.insert(AccessMode::Read);
        set.insert(AccessMode::Control);
        set.insert(AccessMode::Read);
        assert_eq!(set.len(), 2);

        set.remove(AccessMode::Read);
        assert_eq!(set.iter().collect::<Vec<_>>(), vec![AccessMode::Control]);
        assert_eq!(AccessModeSet::all().len(), 4);
    }

    #[test]
    fn test_set_serde() {
        let set = AccessModeSet::from_iter([AccessMode::Write, AccessMode::Read]);
        let json = serde_json::to_string(&set).unwrap();
        assert_eq!(json, r#"["read","write"]"#);
        let back: AccessModeSet = serde_json::from_str(&json).unwrap();
        assert_eq!(back, set);
    }
}
