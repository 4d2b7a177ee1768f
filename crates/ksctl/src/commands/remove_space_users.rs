//! `ksctl remove-space-users` — revoke users' access to a Space.
//!
//! Deletes the SpaceBindings tying the users to the Space. A user with no
//! binding is a hard failure: there is nothing to revoke, which usually
//! means a typo.
//!
//! # Usage
//!
//! ```bash
//! ksctl remove-space-users alice-dev bob carol
//! ```

use async_trait::async_trait;
use clap::Args;
use kube::api::{DeleteParams, ListParams};
use kube::{Api, ResourceExt};

use ksctl_api::{Space, SpaceBinding};

use crate::context::CommandContext;
use crate::flow::{self, GuardedMutation, Precondition};
use crate::{Error, Result};

/// Revoke users' access to a Space
#[derive(Args, Debug)]
pub struct RemoveSpaceUsersArgs {
    /// Name of the Space
    pub space: String,

    /// MasterUserRecord names of the users to remove
    #[arg(required = true)]
    pub users: Vec<String>,
}

/// Run the remove-space-users command.
pub async fn run(ctx: &mut CommandContext, args: RemoveSpaceUsersArgs) -> Result<()> {
    let (cluster, client) = ctx.host_client().await?;
    let namespace = cluster.operator_namespace.clone();
    let spaces: Api<Space> = Api::namespaced(client.clone(), &namespace);
    let bindings: Api<SpaceBinding> = Api::namespaced(client, &namespace);

    let space = flow::fetch(&spaces, &namespace, &args.space).await?;

    // Collect the bindings to delete; every user must have at least one.
    let mut to_delete = Vec::new();
    for user in &args.users {
        let found = bindings
            .list(&ListParams::default().labels(&SpaceBinding::selector(&args.space, user)))
            .await?;
        if found.items.is_empty() {
            return Err(Error::validation(format!(
                "no SpaceBinding found for the Space '{}' and the user '{}'",
                args.space, user
            )));
        }
        to_delete.extend(found.items);
    }

    let mutation = RemoveSpaceUsers {
        api: bindings,
        space: args.space,
        users: args.users,
        to_delete,
    };
    flow::execute(&mut ctx.term, mutation, space).await?;
    Ok(())
}

struct RemoveSpaceUsers {
    api: Api<SpaceBinding>,
    space: String,
    users: Vec<String>,
    to_delete: Vec<SpaceBinding>,
}

#[async_trait]
impl GuardedMutation for RemoveSpaceUsers {
    type Target = Space;

    fn preview_title(&self) -> String {
        format!("Space '{}'", self.space)
    }

    fn check(&self, _target: &Space) -> Result<Precondition> {
        Ok(Precondition::Proceed)
    }

    fn danger_warning(&self) -> Option<String> {
        Some(format!(
            "the removed users immediately lose all access to the Space '{}'",
            self.space
        ))
    }

    fn question(&self) -> String {
        format!(
            "remove {} from the Space '{}'?",
            self.users.join(", "),
            self.space
        )
    }

    async fn apply(&mut self, _target: Space) -> Result<()> {
        for binding in &self.to_delete {
            self.api
                .delete(&binding.name_any(), &DeleteParams::default())
                .await?;
        }
        Ok(())
    }

    fn success_message(&self) -> String {
        format!(
            "{} no longer have access to the Space '{}'",
            self.users.join(", "),
            self.space
        )
    }
}

#[cfg(test)]
mod tests {
    use ksctl_api::SpaceSpec;

    use super::*;
    use crate::commands::test_support::disconnected_client;
    use crate::flow::Outcome;
    use crate::term::Terminal;

    fn space() -> Space {
        Space::new(
            "alice-dev",
            SpaceSpec {
                target_cluster: Some("member-1".to_string()),
                tier_name: "base1ns".to_string(),
            },
        )
    }

    fn mutation() -> RemoveSpaceUsers {
        RemoveSpaceUsers {
            api: Api::namespaced(disconnected_client(), "toolchain-host-operator"),
            space: "alice-dev".to_string(),
            users: vec!["bob".to_string()],
            to_delete: vec![SpaceBinding::bind("alice-dev", "bob", "admin")],
        }
    }

    #[tokio::test]
    async fn declining_keeps_every_binding() {
        let (mut term, out) = Terminal::test("n\n");
        let outcome = flow::execute(&mut term, mutation(), space()).await.unwrap();

        assert_eq!(outcome, Outcome::Declined);
        assert!(!out.contents().contains("no longer have access"));
    }

    #[tokio::test]
    async fn question_names_every_user() {
        let mut mutation = mutation();
        mutation.users.push("carol".to_string());
        assert!(mutation.question().contains("bob, carol"));
    }
}
