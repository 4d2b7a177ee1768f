//! Toolchain Custom Resource Definitions
//!
//! One module per resource, each defined with the `kube` derive the same
//! way the operators publish them. Specs are camelCase on the wire.

pub mod banneduser;
pub mod masteruserrecord;
pub mod socialevent;
pub mod space;
pub mod spacebinding;
pub mod tier;
pub mod usersignup;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A single status condition as reported by the operators.
#[derive(Clone, Debug, Default, Deserialize, Serialize, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Condition {
    /// Condition type (e.g. "Ready", "Approved")
    #[serde(rename = "type")]
    pub type_: String,

    /// "True", "False" or "Unknown"
    pub status: String,

    /// Machine-readable reason for the last transition
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,

    /// Human-readable detail
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    /// RFC 3339 timestamp of the last transition
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_transition_time: Option<String>,
}
