//! MasterUserRecord Custom Resource Definition

use kube::CustomResource;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::Condition;

/// Specification for a MasterUserRecord, the host-cluster record of a
/// provisioned user account.
#[derive(CustomResource, Clone, Debug, Deserialize, Serialize, JsonSchema, PartialEq)]
#[kube(
    group = "toolchain.dev.openshift.com",
    version = "v1alpha1",
    kind = "MasterUserRecord",
    status = "MasterUserRecordStatus",
    namespaced
)]
#[serde(rename_all = "camelCase")]
pub struct MasterUserRecordSpec {
    /// Name of the UserTier governing the account's lifecycle
    pub tier_name: String,

    /// When true the user's accounts are disabled on every member cluster
    #[serde(default)]
    pub disabled: bool,
}

/// Status for a MasterUserRecord
#[derive(Clone, Debug, Default, Deserialize, Serialize, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MasterUserRecordStatus {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub conditions: Vec<Condition>,
}
