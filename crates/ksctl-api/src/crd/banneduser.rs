//! BannedUser Custom Resource Definition
//!
//! The presence of a BannedUser matching a signup's email hash blocks the
//! user from signing up again. Created only by operators, never by the
//! platform itself.

use kube::CustomResource;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::usersignup::UserSignup;
use crate::{LABEL_BANNED_BY, LABEL_EMAIL_HASH, LABEL_PHONE_HASH};

/// Specification for a BannedUser
#[derive(CustomResource, Clone, Debug, Deserialize, Serialize, JsonSchema, PartialEq)]
#[kube(
    group = "toolchain.dev.openshift.com",
    version = "v1alpha1",
    kind = "BannedUser",
    namespaced
)]
#[serde(rename_all = "camelCase")]
pub struct BannedUserSpec {
    /// Email address of the banned user
    pub email: String,

    /// Why the user was banned
    pub reason: String,
}

impl BannedUser {
    /// Build the BannedUser record for a signup.
    ///
    /// Returns `None` when the signup carries no email-hash label; the ban
    /// must be refused in that case because the record would never match.
    pub fn for_signup(signup: &UserSignup, reason: &str, banned_by: &str) -> Option<Self> {
        let email_hash = signup.email_hash()?.to_string();

        let mut banned = BannedUser::new(
            &format!("banneduser-{email_hash}"),
            BannedUserSpec {
                email: signup.spec.identity_claims.email.clone(),
                reason: reason.to_string(),
            },
        );

        let labels = banned.metadata.labels.get_or_insert_with(Default::default);
        labels.insert(LABEL_EMAIL_HASH.to_string(), email_hash);
        labels.insert(LABEL_BANNED_BY.to_string(), banned_by.to_string());
        if let Some(phone_hash) = signup.phone_hash() {
            labels.insert(LABEL_PHONE_HASH.to_string(), phone_hash.to_string());
        }

        Some(banned)
    }

    /// Label selector matching every ban for one email hash.
    pub fn selector(email_hash: &str) -> String {
        format!("{LABEL_EMAIL_HASH}={email_hash}")
    }
}
