//! # ACL Bootstrap
//!
//! Creating a resource's own ACL, either empty or seeded from the rules it
//! currently inherits.

use acl_graph::AclGraph;

use crate::config::AclConfig;
use crate::error::AclResult;
use crate::naming::RuleNamer;
use crate::rule::{AuthorizationRule, RuleSet};
use crate::scope::Scope;

/// Create an empty ACL for a resource.
///
/// Every statement later added to it shows up in its change log.
pub fn create_acl(acl_iri: &str, resource_iri: &str) -> AclResult<AclGraph> {
    Ok(AclGraph::new(acl_iri, resource_iri)?)
}

/// Create a resource's own ACL that grants what it currently inherits.
///
/// Every default-scope rule of `fallback` (for the fallback's container)
/// becomes a rule with both `accessTo` and `default` pointing at the
/// resource, keeping the original modes and targets. Rules that grant
/// nothing are skipped.
///
/// # Example
///
/// ```
/// use acl_rules::{create_acl, create_acl_from_fallback, AccessControl, AclConfig, AgentAccess};
///
/// let control = AccessControl::default();
/// let webid = "https://alice.example/profile#me";
/// let read = AgentAccess { read: true, ..AgentAccess::none() };
///
/// let parent = create_acl("https://pod.example/c/.acl", "https://pod.example/c/").unwrap();
/// let parent = control.set_agent_default_access(&parent, webid, read).unwrap().graph;
///
/// let own = create_acl_from_fallback(
///     "https://pod.example/c/doc.acl",
///     "https://pod.example/c/doc",
///     &parent,
///     &AclConfig::default(),
/// ).unwrap();
///
/// assert_eq!(control.get_agent_resource_access(&own, webid), read);
/// ```
pub fn create_acl_from_fallback(
    acl_iri: &str,
    resource_iri: &str,
    fallback: &AclGraph,
    config: &AclConfig,
) -> AclResult<AclGraph> {
    config.validate()?;
    let mut graph = create_acl(acl_iri, resource_iri)?;

    let inherited = RuleSet::from_graph(fallback);
    let scope = Scope::default_for(fallback.access_to());
    let mut namer = RuleNamer::new(acl_iri, config, Default::default());
    let mut copied = 0;

    for source in inherited
        .iter()
        .filter(|rule| rule.applies_to(&scope, config.honor_default_for_new))
    {
        let subject = namer.mint(&["inherited", source.subject.value(), resource_iri]);
        let mut rule = AuthorizationRule::new(subject);
        rule.modes = source.modes;
        rule.access_to.push(resource_iri.to_string());
        rule.default.push(resource_iri.to_string());
        rule.targets = source.targets.clone();

        if rule.is_inert() {
            continue;
        }
        for statement in rule.to_statements() {
            graph.add(statement);
        }
        copied += 1;
    }

    tracing::debug!(
        fallback = fallback.acl_iri(),
        acl = acl_iri,
        rules = copied,
        "Created ACL from fallback"
    );

    Ok(graph)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::access::AccessControl;
    use crate::bridge::AgentAccess;

    const WEBID: &str = "https://alice.example/profile#me";

    fn read() -> AgentAccess {
        AgentAccess {
            read: true,
            ..AgentAccess::none()
        }
    }

    #[test]
    fn test_create_acl_is_empty() {
        let graph = create_acl("https://pod.example/doc.acl", "https://pod.example/doc").unwrap();
        assert!(graph.is_empty());
        assert_eq!(graph.access_to(), "https://pod.example/doc");
        assert!(create_acl("bad", "https://pod.example/doc").is_err());
    }

    #[test]
    fn test_resource_rules_of_fallback_not_copied() {
        let control = AccessControl::default();
        let parent = create_acl("https://pod.example/c/.acl", "https://pod.example/c/").unwrap();
        let parent = control
            .set_agent_resource_access(&parent, WEBID, AgentAccess::full())
            .unwrap()
            .graph;
        let parent = control.set_public_default_access(&parent, read()).unwrap().graph;

        let own = create_acl_from_fallback(
            "https://pod.example/c/sub/.acl",
            "https://pod.example/c/sub/",
            &parent,
            &AclConfig::default(),
        )
        .unwrap();

        assert_eq!(control.get_agent_resource_access(&own, WEBID), AgentAccess::none());
        assert_eq!(control.get_public_resource_access(&own), read());
        assert_eq!(control.get_public_default_access(&own), read());
        // everything in a new ACL is an addition
        assert_eq!(own.change_log().additions.len(), own.len());
    }
}
