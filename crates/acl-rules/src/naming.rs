//! Subject naming for rules created by the mutator.
//!
//! New rules live in the ACL document as `<acl>#<prefix><name>`. With
//! deterministic naming the name is a digest of what the rule is for, so
//! replaying an edit recreates the same subject and produces no diff.

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use sha2::{Digest, Sha256};
use std::collections::HashSet;
use uuid::Uuid;

use acl_graph::Term;

use crate::config::{AclConfig, RuleNaming};

/// Mints unused rule subjects inside one ACL document.
#[derive(Debug)]
pub struct RuleNamer<'a> {
    document: &'a str,
    config: &'a AclConfig,
    taken: HashSet<String>,
}

impl<'a> RuleNamer<'a> {
    /// Create a namer for the ACL document at `acl_iri`.
    ///
    /// # Arguments
    ///
    /// * `acl_iri` - IRI of the ACL document (any fragment is ignored)
    /// * `config` - Naming configuration
    /// * `taken` - Subjects already in use
    pub fn new(acl_iri: &'a str, config: &'a AclConfig, taken: HashSet<String>) -> Self {
        let document = acl_iri.split('#').next().unwrap_or(acl_iri);
        Self {
            document,
            config,
            taken,
        }
    }

    /// Mint a subject for a rule described by `seed`.
    ///
    /// The subject is unique among those known to this namer; a numeric
    /// suffix is appended on collision.
    pub fn mint(&mut self, seed: &[&str]) -> Term {
        let name = match self.config.rule_naming {
            RuleNaming::Deterministic => digest(seed),
            RuleNaming::Random => Uuid::now_v7().simple().to_string(),
        };

        let base = format!("{}#{}{}", self.document, self.config.rule_prefix, name);
        let mut candidate = base.clone();
        let mut suffix = 2;
        while self.taken.contains(&candidate) {
            candidate = format!("{}-{}", base, suffix);
            suffix += 1;
        }

        self.taken.insert(candidate.clone());
        Term::iri(candidate)
    }
}

fn digest(seed: &[&str]) -> String {
    let mut hasher = Sha256::new();
    for part in seed {
        hasher.update(part.as_bytes());
        hasher.update([0u8]);
    }
    let hash = hasher.finalize();
    URL_SAFE_NO_PAD.encode(&hash[..12])
}

#[cfg(test)]
mod tests {
    use super::*;

    const ACL: &str = "https://pod.example/doc.acl";

    #[test]
    fn test_deterministic_names_repeat() {
        let config = AclConfig::default();
        let a = RuleNamer::new(ACL, &config, HashSet::new()).mint(&["resource", "x"]);
        let b = RuleNamer::new(ACL, &config, HashSet::new()).mint(&["resource", "x"]);
        let c = RuleNamer::new(ACL, &config, HashSet::new()).mint(&["resource", "y"]);
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert!(a.value().starts_with("https://pod.example/doc.acl#rule-"));
    }

    #[test]
    fn test_seed_parts_are_delimited() {
        assert_ne!(digest(&["ab", "c"]), digest(&["a", "bc"]));
    }

    #[test]
    fn test_collision_gets_suffix() {
        let config = AclConfig::default();
        let mut namer = RuleNamer::new(ACL, &config, HashSet::new());
        let first = namer.mint(&["same"]);
        let second = namer.mint(&["same"]);
        assert_ne!(first, second);
        assert_eq!(second.value(), format!("{}-2", first.value()));
    }

    #[test]
    fn test_fragment_in_acl_iri_ignored() {
        let config = AclConfig::default();
        let subject = RuleNamer::new("https://pod.example/doc.acl#old", &config, HashSet::new()).mint(&["s"]);
        assert_eq!(subject.value().matches('#').count(), 1);
    }

    #[test]
    fn test_random_names_differ() {
        let config = AclConfig {
            rule_naming: RuleNaming::Random,
            ..AclConfig::default()
        };
        let mut namer = RuleNamer::new(ACL, &config, HashSet::new());
        assert_ne!(namer.mint(&["s"]), namer.mint(&["s"]));
    }
}
