//! `ksctl gdpr-delete` — erase a user record and everything owned by it.
//!
//! Deletes the UserSignup with foreground propagation so every dependent
//! object (MasterUserRecord, Spaces, bindings) is gone before the delete
//! completes. Used for GDPR erasure requests; there is no undo.
//!
//! # Usage
//!
//! ```bash
//! ksctl gdpr-delete alice
//! ```

use async_trait::async_trait;
use clap::Args;
use kube::api::DeleteParams;
use kube::Api;

use ksctl_api::UserSignup;

use crate::context::CommandContext;
use crate::flow::{self, GuardedMutation, Precondition};
use crate::Result;

/// Delete a UserSignup and all the user's data
#[derive(Args, Debug)]
pub struct GdprDeleteArgs {
    /// Name of the UserSignup to erase
    pub name: String,
}

/// Run the gdpr-delete command.
pub async fn run(ctx: &mut CommandContext, args: GdprDeleteArgs) -> Result<()> {
    let (cluster, client) = ctx.host_client().await?;
    let api: Api<UserSignup> = Api::namespaced(client, &cluster.operator_namespace);

    let mutation = GdprDelete {
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

struct GdprDelete {
    api: Api<UserSignup>,
    name: String,
}

#[async_trait]
impl GuardedMutation for GdprDelete {
    type Target = UserSignup;

    fn preview_title(&self) -> String {
        format!("UserSignup '{}'", self.name)
    }

    fn check(&self, _target: &UserSignup) -> Result<Precondition> {
        // Erasure has no benign already-done state: the fetch would have
        // failed if the record were gone.
        Ok(Precondition::Proceed)
    }

    fn danger_warning(&self) -> Option<String> {
        Some(
            "this deletes the UserSignup and every resource belonging to the \
             user on all clusters"
                .to_string(),
        )
    }

    fn question(&self) -> String {
        format!("permanently erase the UserSignup '{}'?", self.name)
    }

    async fn apply(&mut self, _target: UserSignup) -> Result<()> {
        self.api
            .delete(&self.name, &DeleteParams::foreground())
            .await?;
        Ok(())
    }

    fn success_message(&self) -> String {
        format!("UserSignup '{}' and all its dependent data have been deleted", self.name)
    }
}

#[cfg(test)]
mod tests {
    use ksctl_api::{IdentityClaims, UserSignupSpec};

    use super::*;
    use crate::commands::test_support::disconnected_client;
    use crate::flow::Outcome;
    use crate::term::Terminal;

    fn signup() -> UserSignup {
        UserSignup::new(
            "alice",
            UserSignupSpec {
                identity_claims: IdentityClaims {
                    sub: "abc".to_string(),
                    email: "alice@example.com".to_string(),
                    preferred_username: None,
                },
                states: vec![],
                target_cluster: None,
            },
        )
    }

    fn mutation() -> GdprDelete {
        GdprDelete {
            api: Api::namespaced(disconnected_client(), "toolchain-host-operator"),
            name: "alice".to_string(),
        }
    }

    #[tokio::test]
    async fn erasure_always_proceeds_to_the_prompt() {
        let result = mutation().check(&signup()).unwrap();
        assert!(matches!(result, Precondition::Proceed));
    }

    #[tokio::test]
    async fn declining_the_danger_prompt_deletes_nothing() {
        let (mut term, out) = Terminal::test("n\n");
        let outcome = flow::execute(&mut term, mutation(), signup()).await.unwrap();

        assert_eq!(outcome, Outcome::Declined);
        let printed = out.contents();
        assert!(printed.contains("CANNOT BE UNDONE"));
        assert!(!printed.contains("have been deleted"));
    }
}
