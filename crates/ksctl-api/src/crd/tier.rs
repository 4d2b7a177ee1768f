//! Tier Custom Resource Definitions
//!
//! NSTemplateTier templates a Space's namespaces and names the roles a
//! SpaceBinding may grant; UserTier governs account lifecycle.

use std::collections::BTreeMap;

use kube::CustomResource;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Specification for an NSTemplateTier
#[derive(CustomResource, Clone, Debug, Default, Deserialize, Serialize, JsonSchema, PartialEq)]
#[kube(
    group = "toolchain.dev.openshift.com",
    version = "v1alpha1",
    kind = "NSTemplateTier",
    namespaced
)]
#[serde(rename_all = "camelCase")]
pub struct NSTemplateTierSpec {
    /// Space roles this tier offers, keyed by role name
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub space_roles: BTreeMap<String, SpaceRoleTemplate>,
}

/// Template backing one space role
#[derive(Clone, Debug, Default, Deserialize, Serialize, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SpaceRoleTemplate {
    /// Reference to the TierTemplate holding the role's objects
    pub template_ref: String,
}

impl NSTemplateTier {
    /// Role names this tier offers, sorted.
    pub fn role_names(&self) -> Vec<&str> {
        self.spec.space_roles.keys().map(String::as_str).collect()
    }

    /// Returns true if the tier offers the given space role.
    pub fn has_role(&self, role: &str) -> bool {
        self.spec.space_roles.contains_key(role)
    }
}

/// Specification for a UserTier
#[derive(CustomResource, Clone, Debug, Default, Deserialize, Serialize, JsonSchema, PartialEq)]
#[kube(
    group = "toolchain.dev.openshift.com",
    version = "v1alpha1",
    kind = "UserTier",
    namespaced
)]
#[serde(rename_all = "camelCase")]
pub struct UserTierSpec {
    /// Days of inactivity after which accounts on this tier deactivate
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deactivation_timeout_days: Option<i32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_names_sorted_by_key() {
        let mut spec = NSTemplateTierSpec::default();
        spec.space_roles.insert(
            "viewer".to_string(),
            SpaceRoleTemplate {
                template_ref: "base1ns-viewer-123".to_string(),
            },
        );
        spec.space_roles.insert(
            "admin".to_string(),
            SpaceRoleTemplate {
                template_ref: "base1ns-admin-123".to_string(),
            },
        );
        let tier = NSTemplateTier::new("base1ns", spec);

        assert_eq!(tier.role_names(), vec!["admin", "viewer"]);
        assert!(tier.has_role("admin"));
        assert!(!tier.has_role("owner"));
    }
}
