//! SocialEvent Custom Resource Definition
//!
//! A SocialEvent is a time-boxed activation code: signups entering the
//! code are approved onto the event's tiers without individual review.

use kube::CustomResource;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::Condition;

/// Specification for a SocialEvent
#[derive(CustomResource, Clone, Debug, Deserialize, Serialize, JsonSchema, PartialEq)]
#[kube(
    group = "toolchain.dev.openshift.com",
    version = "v1alpha1",
    kind = "SocialEvent",
    status = "SocialEventStatus",
    namespaced
)]
#[serde(rename_all = "camelCase")]
pub struct SocialEventSpec {
    /// UserTier attendees are placed on
    pub user_tier: String,

    /// NSTemplateTier attendee spaces are templated from
    pub space_tier: String,

    /// Maximum number of signups the code activates
    pub max_attendees: i32,

    /// RFC 3339 instant the code becomes valid
    pub start_time: String,

    /// RFC 3339 instant the code expires
    pub end_time: String,

    /// Human-readable event description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Member cluster attendee spaces are provisioned on
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_cluster: Option<String>,
}

/// Status for a SocialEvent
#[derive(Clone, Debug, Default, Deserialize, Serialize, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SocialEventStatus {
    /// Number of signups that have used the code so far
    #[serde(default)]
    pub activation_count: i32,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub conditions: Vec<Condition>,
}
