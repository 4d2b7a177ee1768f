//! `ksctl add-space-users` — grant users a role in a Space.
//!
//! Creates one SpaceBinding per user. The role must be one the Space's
//! tier actually offers and every named MasterUserRecord must exist; both
//! are hard requirements checked before any prompt.
//!
//! # Usage
//!
//! ```bash
//! ksctl add-space-users alice-dev bob carol --role viewer
//! ```

use async_trait::async_trait;
use clap::Args;
use kube::api::PostParams;
use kube::Api;

use ksctl_api::{MasterUserRecord, NSTemplateTier, Space, SpaceBinding};

use crate::context::CommandContext;
use crate::flow::{self, GuardedMutation, Precondition};
use crate::{Error, Result};

/// Grant users a role in a Space
#[derive(Args, Debug)]
pub struct AddSpaceUsersArgs {
    /// Name of the Space
    pub space: String,

    /// MasterUserRecord names of the users to add
    #[arg(required = true)]
    pub users: Vec<String>,

    /// Space role to grant
    #[arg(long, default_value = "admin")]
    pub role: String,
}

/// Run the add-space-users command.
pub async fn run(ctx: &mut CommandContext, args: AddSpaceUsersArgs) -> Result<()> {
    let (cluster, client) = ctx.host_client().await?;
    let namespace = cluster.operator_namespace.clone();
    let spaces: Api<Space> = Api::namespaced(client.clone(), &namespace);
    let tiers: Api<NSTemplateTier> = Api::namespaced(client.clone(), &namespace);
    let records: Api<MasterUserRecord> = Api::namespaced(client.clone(), &namespace);
    let bindings: Api<SpaceBinding> = Api::namespaced(client, &namespace);

    let space = flow::fetch(&spaces, &namespace, &args.space).await?;

    // The tier names the roles that may be granted.
    let tier = flow::fetch(&tiers, &namespace, &space.spec.tier_name).await?;

    // Every user must exist; a typo fails the whole command up front.
    for user in &args.users {
        flow::fetch(&records, &namespace, user).await?;
    }

    let mutation = AddSpaceUsers {
        api: bindings,
        space: args.space,
        users: args.users,
        role: args.role,
        tier,
    };
    flow::execute(&mut ctx.term, mutation, space).await?;
    Ok(())
}

struct AddSpaceUsers {
    api: Api<SpaceBinding>,
    space: String,
    users: Vec<String>,
    role: String,
    tier: NSTemplateTier,
}

#[async_trait]
impl GuardedMutation for AddSpaceUsers {
    type Target = Space;

    fn preview_title(&self) -> String {
        format!("Space '{}'", self.space)
    }

    fn check(&self, _target: &Space) -> Result<Precondition> {
        if !self.tier.has_role(&self.role) {
            return Err(Error::validation(format!(
                "invalid role '{}' for Space '{}': the '{}' tier only offers: {}",
                self.role,
                self.space,
                self.tier.metadata.name.as_deref().unwrap_or_default(),
                self.tier.role_names().join(", ")
            )));
        }
        Ok(Precondition::Proceed)
    }

    fn question(&self) -> String {
        format!(
            "grant the role '{}' on the Space '{}' to: {}?",
            self.role,
            self.space,
            self.users.join(", ")
        )
    }

    async fn apply(&mut self, _target: Space) -> Result<()> {
        for user in &self.users {
            let binding = SpaceBinding::bind(&self.space, user, &self.role);
            self.api.create(&PostParams::default(), &binding).await?;
        }
        Ok(())
    }

    fn success_message(&self) -> String {
        format!(
            "SpaceBindings created: {} now hold the role '{}' on the Space '{}'",
            self.users.join(", "),
            self.role,
            self.space
        )
    }
}

#[cfg(test)]
mod tests {
    use ksctl_api::{NSTemplateTierSpec, SpaceRoleTemplate, SpaceSpec};

    use super::*;
    use crate::commands::test_support::disconnected_client;

    fn tier(roles: &[&str]) -> NSTemplateTier {
        let mut spec = NSTemplateTierSpec::default();
        for role in roles {
            spec.space_roles.insert(
                role.to_string(),
                SpaceRoleTemplate {
                    template_ref: format!("base1ns-{role}-123"),
                },
            );
        }
        NSTemplateTier::new("base1ns", spec)
    }

    fn space() -> Space {
        Space::new(
            "alice-dev",
            SpaceSpec {
                target_cluster: Some("member-1".to_string()),
                tier_name: "base1ns".to_string(),
            },
        )
    }

    fn mutation(role: &str, tier_roles: &[&str]) -> AddSpaceUsers {
        AddSpaceUsers {
            api: Api::namespaced(disconnected_client(), "toolchain-host-operator"),
            space: "alice-dev".to_string(),
            users: vec!["bob".to_string()],
            role: role.to_string(),
            tier: tier(tier_roles),
        }
    }

    #[tokio::test]
    async fn role_offered_by_the_tier_proceeds() {
        let result = mutation("viewer", &["admin", "viewer"])
            .check(&space())
            .unwrap();
        assert!(matches!(result, Precondition::Proceed));
    }

    #[tokio::test]
    async fn unknown_role_is_a_hard_failure_listing_the_roles() {
        let err = mutation("owner", &["admin", "viewer"])
            .check(&space())
            .unwrap_err();
        let message = err.to_string();
        assert!(message.contains("invalid role 'owner'"));
        assert!(message.contains("admin, viewer"));
    }
}
