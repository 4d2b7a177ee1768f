//! Space Custom Resource Definition
//!
//! A Space is a tenant workspace: a set of namespaces provisioned on one
//! member cluster according to an NSTemplateTier. Feature toggles are
//! carried in a comma-separated annotation on the Space.

use kube::CustomResource;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::Condition;
use crate::ANNOTATION_FEATURES;

/// Specification for a Space
#[derive(CustomResource, Clone, Debug, Deserialize, Serialize, JsonSchema, PartialEq)]
#[kube(
    group = "toolchain.dev.openshift.com",
    version = "v1alpha1",
    kind = "Space",
    status = "SpaceStatus",
    namespaced
)]
#[serde(rename_all = "camelCase")]
pub struct SpaceSpec {
    /// Member cluster the Space's namespaces live on
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_cluster: Option<String>,

    /// NSTemplateTier the namespaces are templated from
    pub tier_name: String,
}

/// Status for a Space
#[derive(Clone, Debug, Default, Deserialize, Serialize, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SpaceStatus {
    /// Cluster the Space is currently provisioned on
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_cluster: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub conditions: Vec<Condition>,
}

impl Space {
    /// Features currently enabled on this Space.
    pub fn features(&self) -> Vec<String> {
        self.metadata
            .annotations
            .as_ref()
            .and_then(|annotations| annotations.get(ANNOTATION_FEATURES))
            .map(|value| {
                value
                    .split(',')
                    .map(str::trim)
                    .filter(|f| !f.is_empty())
                    .map(String::from)
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Add a feature to the toggle annotation. Re-enabling an already
    /// enabled feature is a no-op.
    pub fn enable_feature(&mut self, feature: &str) {
        let mut features = self.features();
        if !features.iter().any(|f| f == feature) {
            features.push(feature.to_string());
        }
        self.set_features(&features);
    }

    /// Remove a feature from the toggle annotation.
    pub fn disable_feature(&mut self, feature: &str) {
        let mut features = self.features();
        features.retain(|f| f != feature);
        self.set_features(&features);
    }

    fn set_features(&mut self, features: &[String]) {
        let annotations = self
            .metadata
            .annotations
            .get_or_insert_with(Default::default);
        if features.is_empty() {
            annotations.remove(ANNOTATION_FEATURES);
        } else {
            annotations.insert(ANNOTATION_FEATURES.to_string(), features.join(","));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn space() -> Space {
        Space::new(
            "alice-dev",
            SpaceSpec {
                target_cluster: Some("member-1".to_string()),
                tier_name: "base1ns".to_string(),
            },
        )
    }

    #[test]
    fn features_empty_without_annotation() {
        assert!(space().features().is_empty());
    }

    #[test]
    fn enable_feature_appends_to_annotation() {
        let mut space = space();
        space.enable_feature("webhooks");
        space.enable_feature("idlers");
        assert_eq!(space.features(), vec!["webhooks", "idlers"]);

        let annotations = space.metadata.annotations.as_ref().unwrap();
        assert_eq!(annotations[ANNOTATION_FEATURES], "webhooks,idlers");
    }

    #[test]
    fn enable_feature_twice_is_idempotent() {
        let mut space = space();
        space.enable_feature("webhooks");
        space.enable_feature("webhooks");
        assert_eq!(space.features(), vec!["webhooks"]);
    }

    #[test]
    fn disable_last_feature_removes_annotation() {
        let mut space = space();
        space.enable_feature("webhooks");
        space.disable_feature("webhooks");
        assert!(space.features().is_empty());
        assert!(space
            .metadata
            .annotations
            .as_ref()
            .map_or(true, |a| !a.contains_key(ANNOTATION_FEATURES)));
    }

    #[test]
    fn features_tolerate_whitespace() {
        let mut space = space();
        space
            .metadata
            .annotations
            .get_or_insert_with(Default::default)
            .insert(ANNOTATION_FEATURES.to_string(), " a , b ,".to_string());
        assert_eq!(space.features(), vec!["a", "b"]);
    }
}
