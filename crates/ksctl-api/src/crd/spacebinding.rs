//! SpaceBinding Custom Resource Definition

use kube::CustomResource;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::{LABEL_MASTER_USER_RECORD, LABEL_SPACE};

/// Specification for a SpaceBinding, which grants one user a role in one
/// Space.
#[derive(CustomResource, Clone, Debug, Deserialize, Serialize, JsonSchema, PartialEq)]
#[kube(
    group = "toolchain.dev.openshift.com",
    version = "v1alpha1",
    kind = "SpaceBinding",
    namespaced
)]
#[serde(rename_all = "camelCase")]
pub struct SpaceBindingSpec {
    /// Name of the bound MasterUserRecord
    pub master_user_record: String,

    /// Name of the bound Space
    pub space: String,

    /// Role the user holds in the Space (must be a role of the Space's tier)
    pub space_role: String,
}

impl SpaceBinding {
    /// Build the binding granting `role` on `space` to the user behind
    /// `master_user_record`, labelled so both ends can be selected on.
    pub fn bind(space: &str, master_user_record: &str, role: &str) -> Self {
        let mut binding = SpaceBinding::new(
            &format!("{space}-{master_user_record}"),
            SpaceBindingSpec {
                master_user_record: master_user_record.to_string(),
                space: space.to_string(),
                space_role: role.to_string(),
            },
        );
        let labels = binding.metadata.labels.get_or_insert_with(Default::default);
        labels.insert(LABEL_SPACE.to_string(), space.to_string());
        labels.insert(
            LABEL_MASTER_USER_RECORD.to_string(),
            master_user_record.to_string(),
        );
        binding
    }

    /// Label selector matching every binding of one user in one Space.
    pub fn selector(space: &str, master_user_record: &str) -> String {
        format!("{LABEL_SPACE}={space},{LABEL_MASTER_USER_RECORD}={master_user_record}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bind_sets_name_spec_and_labels() {
        let binding = SpaceBinding::bind("alice-dev", "bob", "viewer");

        assert_eq!(binding.metadata.name.as_deref(), Some("alice-dev-bob"));
        assert_eq!(binding.spec.space, "alice-dev");
        assert_eq!(binding.spec.master_user_record, "bob");
        assert_eq!(binding.spec.space_role, "viewer");

        let labels = binding.metadata.labels.as_ref().unwrap();
        assert_eq!(labels[LABEL_SPACE], "alice-dev");
        assert_eq!(labels[LABEL_MASTER_USER_RECORD], "bob");
    }

    #[test]
    fn selector_matches_both_labels() {
        let selector = SpaceBinding::selector("alice-dev", "bob");
        assert!(selector.contains("toolchain.dev.openshift.com/space=alice-dev"));
        assert!(selector.contains("toolchain.dev.openshift.com/masteruserrecord=bob"));
    }
}
