//! CLI commands
//!
//! One file per command. Mutating commands implement
//! [`crate::flow::GuardedMutation`] and run through the shared protocol;
//! the read commands (`get`, `describe`, `logs`) go through the generic
//! client and never prompt.

pub mod add_space_users;
pub mod approve;
pub mod ban;
pub mod create_event;
pub mod deactivate;
pub mod describe;
pub mod disable;
pub mod disable_feature;
pub mod enable_feature;
pub mod format;
pub mod gdpr_delete;
pub mod get;
pub mod logs;
pub mod promote_space;
pub mod promote_user;
pub mod remove_space_users;
pub mod retarget;

#[cfg(test)]
pub(crate) mod test_support {
    /// A client that is never called: command precondition tests build
    /// their mutation structs around it. Needs a tokio runtime to exist.
    pub(crate) fn disconnected_client() -> kube::Client {
        let config = kube::Config::new(http::Uri::from_static("https://localhost:6443"));
        kube::Client::try_from(config).expect("client construction is offline")
    }
}
