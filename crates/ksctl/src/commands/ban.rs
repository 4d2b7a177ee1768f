//! `ksctl ban` — ban a user and prevent them from signing up again.
//!
//! Creates a BannedUser record matching the signup's email hash. Banning
//! is a danger-zone operation: the user is deactivated everywhere and the
//! email can never sign up again.
//!
//! # Usage
//!
//! ```bash
//! ksctl ban alice "terms of service violation"
//!
//! # A signup that never completed phone verification carries no phone
//! # hash; ban it anyway:
//! ksctl ban alice "spam" --skip-phone-check
//! ```

use async_trait::async_trait;
use clap::Args;
use kube::api::{ListParams, PostParams};
use kube::Api;
use tracing::debug;

use ksctl_api::{BannedUser, UserSignup};

use crate::context::CommandContext;
use crate::flow::{self, GuardedMutation, Precondition};
use crate::{Error, Result};

/// Ban the user behind a UserSignup
#[derive(Args, Debug)]
pub struct BanArgs {
    /// Name of the UserSignup whose user should be banned
    pub name: String,

    /// Why the user is being banned (recorded on the BannedUser)
    pub reason: String,

    /// Ban even if the signup has no phone hash label
    #[arg(long)]
    pub skip_phone_check: bool,
}

/// Run the ban command.
pub async fn run(ctx: &mut CommandContext, args: BanArgs) -> Result<()> {
    let (cluster, client) = ctx.host_client().await?;
    let signups: Api<UserSignup> = Api::namespaced(client.clone(), &cluster.operator_namespace);
    let banned: Api<BannedUser> = Api::namespaced(client, &cluster.operator_namespace);

    let signup = flow::fetch(&signups, &cluster.operator_namespace, &args.name).await?;

    // The no-op guard needs the existing bans for this email hash, looked
    // up before the protocol starts so the precondition stays local.
    let already_banned = match signup.email_hash() {
        Some(hash) => {
            let existing = banned
                .list(&ListParams::default().labels(&BannedUser::selector(hash)))
                .await?;
            debug!(
                "found {} existing ban(s) for email hash {}",
                existing.items.len(),
                hash
            );
            !existing.items.is_empty()
        }
        None => false,
    };

    let mutation = Ban {
        api: banned,
        name: args.name,
        reason: args.reason,
        skip_phone_check: args.skip_phone_check,
        banned_by: ctx.identity().to_string(),
        already_banned,
    };
    flow::execute(&mut ctx.term, mutation, signup).await?;
    Ok(())
}

struct Ban {
    api: Api<BannedUser>,
    name: String,
    reason: String,
    skip_phone_check: bool,
    banned_by: String,
    already_banned: bool,
}

#[async_trait]
impl GuardedMutation for Ban {
    type Target = UserSignup;

    fn preview_title(&self) -> String {
        format!("UserSignup '{}'", self.name)
    }

    fn check(&self, target: &UserSignup) -> Result<Precondition> {
        if self.already_banned {
            return Ok(Precondition::NothingToDo(format!(
                "the user behind UserSignup '{}' is already banned",
                self.name
            )));
        }

        if target.email_hash().is_none() {
            return Err(Error::validation(format!(
                "UserSignup '{}' is missing an email hash label and cannot be banned",
                self.name
            )));
        }

        if !self.skip_phone_check && target.phone_hash().is_none() {
            return Err(Error::validation(format!(
                "UserSignup '{}' is missing a phone hash label; \
                 pass --skip-phone-check to ban the user anyway",
                self.name
            )));
        }

        Ok(Precondition::Proceed)
    }

    fn danger_warning(&self) -> Option<String> {
        Some(
            "banning deactivates the user everywhere and permanently blocks \
             this email from signing up again"
                .to_string(),
        )
    }

    fn question(&self) -> String {
        format!("ban the user behind UserSignup '{}'?", self.name)
    }

    async fn apply(&mut self, target: UserSignup) -> Result<()> {
        let banned = BannedUser::for_signup(&target, &self.reason, &self.banned_by)
            .ok_or_else(|| {
                Error::validation(format!(
                    "UserSignup '{}' is missing an email hash label and cannot be banned",
                    self.name
                ))
            })?;
        self.api.create(&PostParams::default(), &banned).await?;
        Ok(())
    }

    fn success_message(&self) -> String {
        format!("the user behind UserSignup '{}' has been banned", self.name)
    }
}
