//! `ksctl approve` — approve a user record on the host cluster.
//!
//! # Usage
//!
//! ```bash
//! ksctl approve alice
//! ```

use async_trait::async_trait;
use clap::Args;
use kube::Api;

use ksctl_api::{UserSignup, UserSignupState};

use crate::context::CommandContext;
use crate::flow::{self, GuardedMutation, Precondition};
use crate::Result;

/// Approve a UserSignup
#[derive(Args, Debug)]
pub struct ApproveArgs {
    /// Name of the UserSignup to approve
    pub name: String,
}

/// Run the approve command.
pub async fn run(ctx: &mut CommandContext, args: ApproveArgs) -> Result<()> {
    let (cluster, client) = ctx.host_client().await?;
    let api: Api<UserSignup> = Api::namespaced(client, &cluster.operator_namespace);

    let mutation = Approve {
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

struct Approve {
    api: Api<UserSignup>,
    name: String,
}

#[async_trait]
impl GuardedMutation for Approve {
    type Target = UserSignup;

    fn preview_title(&self) -> String {
        format!("UserSignup '{}'", self.name)
    }

    fn check(&self, target: &UserSignup) -> Result<Precondition> {
        if target.spec.is_approved() {
            return Ok(Precondition::NothingToDo(format!(
                "UserSignup '{}' is already approved",
                self.name
            )));
        }
        Ok(Precondition::Proceed)
    }

    fn question(&self) -> String {
        format!("approve the UserSignup '{}'?", self.name)
    }

    async fn apply(&mut self, mut target: UserSignup) -> Result<()> {
        target.spec.set_state(UserSignupState::Approved);
        flow::update(&self.api, target).await?;
        Ok(())
    }

    fn success_message(&self) -> String {
        format!("UserSignup '{}' has been approved", self.name)
    }
}

#[cfg(test)]
mod tests {
    use ksctl_api::{IdentityClaims, UserSignupSpec};

    use super::*;

    fn signup(states: Vec<UserSignupState>) -> UserSignup {
        UserSignup::new(
            "alice",
            UserSignupSpec {
                identity_claims: IdentityClaims {
                    sub: "abc".to_string(),
                    email: "alice@example.com".to_string(),
                    preferred_username: None,
                },
                states,
                target_cluster: None,
            },
        )
    }

    fn mutation() -> Approve {
        let client = crate::commands::test_support::disconnected_client();
        Approve {
            api: Api::namespaced(client, "toolchain-host-operator"),
            name: "alice".to_string(),
        }
    }

    #[tokio::test]
    async fn already_approved_is_nothing_to_do() {
        let result = mutation()
            .check(&signup(vec![UserSignupState::Approved]))
            .unwrap();
        assert!(matches!(result, Precondition::NothingToDo(message)
            if message.contains("already approved")));
    }

    #[tokio::test]
    async fn unapproved_signup_proceeds() {
        let result = mutation().check(&signup(vec![])).unwrap();
        assert!(matches!(result, Precondition::Proceed));
    }
}
