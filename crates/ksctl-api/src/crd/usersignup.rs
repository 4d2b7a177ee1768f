//! UserSignup Custom Resource Definition
//!
//! A UserSignup is the host-cluster record of one person's registration.
//! Approval, deactivation and banning all start from this object.

use kube::CustomResource;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::Condition;
use crate::{LABEL_EMAIL_HASH, LABEL_PHONE_HASH};

/// Specification for a UserSignup
#[derive(CustomResource, Clone, Debug, Deserialize, Serialize, JsonSchema, PartialEq)]
#[kube(
    group = "toolchain.dev.openshift.com",
    version = "v1alpha1",
    kind = "UserSignup",
    status = "UserSignupStatus",
    namespaced
)]
#[serde(rename_all = "camelCase")]
pub struct UserSignupSpec {
    /// Claims carried over from the identity provider at signup time
    pub identity_claims: IdentityClaims,

    /// Requested lifecycle states; the operator reconciles towards the
    /// last one set (approved, deactivated)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub states: Vec<UserSignupState>,

    /// Member cluster the user's namespaces should be provisioned on
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_cluster: Option<String>,
}

/// Identity claims recorded at signup
#[derive(Clone, Debug, Default, Deserialize, Serialize, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct IdentityClaims {
    /// Subject identifier from the identity provider
    pub sub: String,

    /// Email address the user signed up with
    pub email: String,

    /// Username the user asked for
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preferred_username: Option<String>,
}

/// Lifecycle states an operator can request on a signup
#[derive(Clone, Copy, Debug, Deserialize, Serialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum UserSignupState {
    Approved,
    Deactivated,
}

/// Status for a UserSignup
#[derive(Clone, Debug, Default, Deserialize, Serialize, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UserSignupStatus {
    /// Username after compliance transformations (DNS-safe, unique)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub compliant_username: Option<String>,

    /// Conditions reported by the host operator
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub conditions: Vec<Condition>,
}

impl UserSignupSpec {
    /// Returns true if approval has been requested
    pub fn is_approved(&self) -> bool {
        self.states.contains(&UserSignupState::Approved)
    }

    /// Returns true if deactivation has been requested
    pub fn is_deactivated(&self) -> bool {
        self.states.contains(&UserSignupState::Deactivated)
    }

    /// Replace the requested states with a single state
    pub fn set_state(&mut self, state: UserSignupState) {
        self.states = vec![state];
    }
}

impl UserSignup {
    /// The email-hash label, if the signup carries one.
    pub fn email_hash(&self) -> Option<&str> {
        self.metadata
            .labels
            .as_ref()?
            .get(LABEL_EMAIL_HASH)
            .map(String::as_str)
    }

    /// The phone-hash label, set once phone verification completed.
    pub fn phone_hash(&self) -> Option<&str> {
        self.metadata
            .labels
            .as_ref()?
            .get(LABEL_PHONE_HASH)
            .map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn signup(states: Vec<UserSignupState>) -> UserSignupSpec {
        UserSignupSpec {
            identity_claims: IdentityClaims {
                sub: "abc123".to_string(),
                email: "alice@example.com".to_string(),
                preferred_username: Some("alice".to_string()),
            },
            states,
            target_cluster: None,
        }
    }

    #[test]
    fn set_state_replaces_previous_states() {
        let mut spec = signup(vec![UserSignupState::Approved]);
        spec.set_state(UserSignupState::Deactivated);
        assert_eq!(spec.states, vec![UserSignupState::Deactivated]);
        assert!(spec.is_deactivated());
        assert!(!spec.is_approved());
    }

    #[test]
    fn states_serialize_lowercase() {
        let spec = signup(vec![UserSignupState::Approved]);
        let json = serde_json::to_value(&spec).unwrap();
        assert_eq!(json["states"][0], "approved");
        assert_eq!(json["identityClaims"]["preferredUsername"], "alice");
    }

    #[test]
    fn hash_labels_read_from_metadata() {
        let mut signup = UserSignup::new("alice", signup_spec());
        assert!(signup.email_hash().is_none());

        let labels = signup.metadata.labels.get_or_insert_with(Default::default);
        labels.insert(crate::LABEL_EMAIL_HASH.to_string(), "e-hash".to_string());
        labels.insert(crate::LABEL_PHONE_HASH.to_string(), "p-hash".to_string());

        assert_eq!(signup.email_hash(), Some("e-hash"));
        assert_eq!(signup.phone_hash(), Some("p-hash"));
    }

    fn signup_spec() -> UserSignupSpec {
        signup(vec![])
    }
}
