//! # Access Shapes
//!
//! The two shapes access decisions are reported in, and the conversions
//! between them.
//!
//! - [`AgentAccess`] is the boolean shape of the rule vocabulary: every mode
//!   is either granted or not.
//! - [`UniversalAccess`] is the tri-state shape: every mode is granted
//!   (`Some(true)`), denied (`Some(false)`) or not mentioned (`None`), and
//!   control is split into `control_read` and `control_write`.
//!
//! Converting boolean → tri-state never loses information. Converting
//! tri-state → boolean collapses "denied" and "not mentioned" into `false`.

use serde::{Deserialize, Serialize};

use crate::modes::{AccessMode, AccessModeSet};

/// Boolean access shape.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct AgentAccess {
    pub read: bool,
    pub append: bool,
    pub write: bool,
    pub control: bool,
}

impl AgentAccess {
    /// No access at all.
    pub fn none() -> Self {
        Self::default()
    }

    /// Every mode granted.
    pub fn full() -> Self {
        Self {
            read: true,
            append: true,
            write: true,
            control: true,
        }
    }

    /// Get one mode.
    pub fn get(&self, mode: AccessMode) -> bool {
        match mode {
            AccessMode::Read => self.read,
            AccessMode::Append => self.append,
            AccessMode::Write => self.write,
            AccessMode::Control => self.control,
        }
    }

    /// Set one mode.
    pub fn set(&mut self, mode: AccessMode, granted: bool) {
        match mode {
            AccessMode::Read => self.read = granted,
            AccessMode::Append => self.append = granted,
            AccessMode::Write => self.write = granted,
            AccessMode::Control => self.control = granted,
        }
    }
}

impl From<AccessModeSet> for AgentAccess {
    fn from(modes: AccessModeSet) -> Self {
        Self {
            read: modes.contains(AccessMode::Read),
            append: modes.contains(AccessMode::Append),
            write: modes.contains(AccessMode::Write),
            control: modes.contains(AccessMode::Control),
        }
    }
}

impl From<AgentAccess> for AccessModeSet {
    fn from(access: AgentAccess) -> Self {
        AccessMode::all()
            .into_iter()
            .filter(|m| access.get(*m))
            .collect()
    }
}

/// Tri-state access shape.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub struct UniversalAccess {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub read: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub append: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub write: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub control_read: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub control_write: Option<bool>,
}

impl UniversalAccess {
    /// Nothing mentioned.
    pub fn unset() -> Self {
        Self::default()
    }

    /// Check whether the two control fields agree once "denied" and "not
    /// mentioned" are treated alike.
    pub fn control_is_paired(&self) -> bool {
        granted(self.control_read) == granted(self.control_write)
    }
}

fn granted(value: Option<bool>) -> bool {
    value == Some(true)
}

fn tri(value: bool) -> Option<bool> {
    if value {
        Some(true)
    } else {
        None
    }
}

/// Boolean → tri-state.
///
/// `true` becomes `Some(true)`, `false` becomes `None`; control sets both
/// control fields together.
///
/// # Example
///
/// ```
/// use acl_rules::{to_universal, AgentAccess};
///
/// let access = AgentAccess { read: true, append: false, write: false, control: true };
/// let universal = to_universal(access);
/// assert_eq!(universal.read, Some(true));
/// assert_eq!(universal.append, None);
/// assert_eq!(universal.control_read, Some(true));
/// assert_eq!(universal.control_write, Some(true));
/// ```
pub fn to_universal(access: AgentAccess) -> UniversalAccess {
    UniversalAccess {
        read: tri(access.read),
        append: tri(access.append),
        write: tri(access.write),
        control_read: tri(access.control),
        control_write: tri(access.control),
    }
}

/// Tri-state → boolean.
///
/// Only `Some(true)` counts as granted. Control follows `control_read`.
pub fn to_legacy(access: UniversalAccess) -> AgentAccess {
    AgentAccess {
        read: granted(access.read),
        append: granted(access.append),
        write: granted(access.write),
        control: granted(access.control_read),
    }
}

impl From<AgentAccess> for UniversalAccess {
    fn from(access: AgentAccess) -> Self {
        to_universal(access)
    }
}

impl From<UniversalAccess> for AgentAccess {
    fn from(access: UniversalAccess) -> Self {
        to_legacy(access)
    }
}

/// Apply a tri-state patch on top of a boolean access value.
///
/// Fields set to `Some(_)` overwrite the current value; `None` keeps it.
/// Control follows `control_read` only; `control_write` alone changes
/// nothing.
pub fn apply_patch(current: AgentAccess, patch: UniversalAccess) -> AgentAccess {
    AgentAccess {
        read: patch.read.unwrap_or(current.read),
        append: patch.append.unwrap_or(current.append),
        write: patch.write.unwrap_or(current.write),
        control: patch.control_read.unwrap_or(current.control),
    }
}
