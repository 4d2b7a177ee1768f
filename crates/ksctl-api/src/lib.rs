//! Toolchain resource types for ksctl
//!
//! Typed views of the `toolchain.dev.openshift.com/v1alpha1` resources the
//! CLI administers: user records, spaces, bindings, bans, tiers and events.

pub mod crd;

pub use crd::banneduser::{BannedUser, BannedUserSpec};
pub use crd::masteruserrecord::{MasterUserRecord, MasterUserRecordSpec};
pub use crd::socialevent::{SocialEvent, SocialEventSpec, SocialEventStatus};
pub use crd::space::{Space, SpaceSpec, SpaceStatus};
pub use crd::spacebinding::{SpaceBinding, SpaceBindingSpec};
pub use crd::tier::{NSTemplateTier, NSTemplateTierSpec, SpaceRoleTemplate, UserTier, UserTierSpec};
pub use crd::usersignup::{
    IdentityClaims, UserSignup, UserSignupSpec, UserSignupState, UserSignupStatus,
};

/// API group of every toolchain resource.
pub const TOOLCHAIN_GROUP: &str = "toolchain.dev.openshift.com";

/// Label carrying the hash of the signup's email address.
pub const LABEL_EMAIL_HASH: &str = "toolchain.dev.openshift.com/email-hash";

/// Label carrying the hash of the signup's verified phone number.
pub const LABEL_PHONE_HASH: &str = "toolchain.dev.openshift.com/phone-hash";

/// Label recording which operator created a BannedUser.
pub const LABEL_BANNED_BY: &str = "toolchain.dev.openshift.com/banned-by";

/// Label on a SpaceBinding naming its MasterUserRecord.
pub const LABEL_MASTER_USER_RECORD: &str = "toolchain.dev.openshift.com/masteruserrecord";

/// Label on a SpaceBinding naming its Space.
pub const LABEL_SPACE: &str = "toolchain.dev.openshift.com/space";

/// Annotation holding the comma-separated list of features enabled on a Space.
pub const ANNOTATION_FEATURES: &str = "toolchain.dev.openshift.com/feature";
