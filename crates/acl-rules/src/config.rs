//! Engine configuration.
//!
//! Controls how new rule subjects are named and how strictly rule graphs are
//! read. Configuration is loaded from environment variables with defaults
//! suitable for most pods.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// Invalid configuration value.
    #[error("Invalid configuration value for {key}: {message}")]
    InvalidValue {
        /// Configuration key.
        key: String,
        /// Error message.
        message: String,
    },
}

/// How subjects of newly created rules are named.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum RuleNaming {
    /// Derived from the rule's content; repeating an edit yields the same name.
    #[default]
    Deterministic,
    /// Fresh time-ordered UUID for every rule.
    Random,
}

impl RuleNaming {
    /// Parse from string representation.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "deterministic" | "stable" => Some(RuleNaming::Deterministic),
            "random" | "uuid" => Some(RuleNaming::Random),
            _ => None,
        }
    }
}

/// Configuration for reading and editing rule graphs.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AclConfig {
    /// Naming strategy for new rule subjects.
    pub rule_naming: RuleNaming,

    /// Fragment prefix for new rule subjects (`<acl>#<prefix><name>`).
    pub rule_prefix: String,

    /// Whether the legacy `defaultForNew` marker counts as default scope
    /// when reading.
    pub honor_default_for_new: bool,

    /// Reject edits of graphs whose rules name more than one `accessTo`
    /// resource.
    pub strict_scopes: bool,
}

impl Default for AclConfig {
    fn default() -> Self {
        Self {
            rule_naming: RuleNaming::Deterministic,
            rule_prefix: "rule-".to_string(),
            honor_default_for_new: true,
            strict_scopes: false,
        }
    }
}

impl AclConfig {
    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - `ACL_RULE_NAMING`: `deterministic` or `random` (default: deterministic)
    /// - `ACL_RULE_PREFIX`: fragment prefix for new rules (default: `rule-`)
    /// - `ACL_HONOR_DEFAULT_FOR_NEW`: treat `defaultForNew` as default scope (default: true)
    /// - `ACL_STRICT_SCOPES`: reject rules naming several resources (default: false)
    ///
    /// Unparseable values fall back to the default.
    pub fn from_env() -> Self {
        let default = Self::default();

        let config = Self {
            rule_naming: std::env::var("ACL_RULE_NAMING")
                .ok()
                .and_then(|s| RuleNaming::parse(&s))
                .unwrap_or(default.rule_naming),
            rule_prefix: std::env::var("ACL_RULE_PREFIX").unwrap_or(default.rule_prefix),
            honor_default_for_new: std::env::var("ACL_HONOR_DEFAULT_FOR_NEW")
                .map(|s| s != "false" && s != "0")
                .unwrap_or(default.honor_default_for_new),
            strict_scopes: std::env::var("ACL_STRICT_SCOPES")
                .map(|s| s == "true" || s == "1")
                .unwrap_or(default.strict_scopes),
        };

        tracing::debug!(
            rule_naming = ?config.rule_naming,
            rule_prefix = %config.rule_prefix,
            honor_default_for_new = config.honor_default_for_new,
            strict_scopes = config.strict_scopes,
            "Loaded ACL configuration"
        );
        config
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.rule_prefix.is_empty() {
            return Err(ConfigError::InvalidValue {
                key: "ACL_RULE_PREFIX".to_string(),
                message: "must not be empty".to_string(),
            });
        }
        if self
            .rule_prefix
            .chars()
            .any(|c| c == '#' || c.is_whitespace())
        {
            return Err(ConfigError::InvalidValue {
                key: "ACL_RULE_PREFIX".to_string(),
                message: "must not contain '#' or whitespace".to_string(),
            });
        }
        Ok(())
    }
}
