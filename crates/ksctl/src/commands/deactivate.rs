//! `ksctl deactivate` — deactivate a user record.
//!
//! Deactivation tears down the user's namespaces on the member clusters;
//! the signup record itself is kept.
//!
//! # Usage
//!
//! ```bash
//! ksctl deactivate alice
//! ```

use async_trait::async_trait;
use clap::Args;
use kube::Api;

use ksctl_api::{UserSignup, UserSignupState};

use crate::context::CommandContext;
use crate::flow::{self, GuardedMutation, Precondition};
use crate::Result;

/// Deactivate a UserSignup
#[derive(Args, Debug)]
pub struct DeactivateArgs {
    /// Name of the UserSignup to deactivate
    pub name: String,
}

/// Run the deactivate command.
pub async fn run(ctx: &mut CommandContext, args: DeactivateArgs) -> Result<()> {
    let (cluster, client) = ctx.host_client().await?;
    let api: Api<UserSignup> = Api::namespaced(client, &cluster.operator_namespace);

    let mutation = Deactivate {
        api: api.clone(),
        name: args.name.clone(),
    };
    flow::run(
        &mut ctx.term,
        &api,
        &cluster.operator_namespace,
        &args.name,
        mutation,
    )
    .await?;
    Ok(())
}

struct Deactivate {
    api: Api<UserSignup>,
    name: String,
}

#[async_trait]
impl GuardedMutation for Deactivate {
    type Target = UserSignup;

    fn preview_title(&self) -> String {
        format!("UserSignup '{}'", self.name)
    }

    fn check(&self, target: &UserSignup) -> Result<Precondition> {
        if target.spec.is_deactivated() {
            return Ok(Precondition::NothingToDo(format!(
                "UserSignup '{}' is already deactivated",
                self.name
            )));
        }
        Ok(Precondition::Proceed)
    }

    fn danger_warning(&self) -> Option<String> {
        Some(
            "deactivating deletes the user's namespaces and all the resources in them"
                .to_string(),
        )
    }

    fn question(&self) -> String {
        format!("deactivate the UserSignup '{}'?", self.name)
    }

    async fn apply(&mut self, mut target: UserSignup) -> Result<()> {
        target.spec.set_state(UserSignupState::Deactivated);
        flow::update(&self.api, target).await?;
        Ok(())
    }

    fn success_message(&self) -> String {
        format!("UserSignup '{}' has been deactivated", self.name)
    }
}
