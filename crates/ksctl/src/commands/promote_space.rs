//! `ksctl promote-space` — move a Space to another namespace template
//! tier.
//!
//! # Usage
//!
//! ```bash
//! ksctl promote-space alice-dev base1ns6didler
//! ```

use async_trait::async_trait;
use clap::Args;
use kube::Api;

use ksctl_api::{NSTemplateTier, Space};

use crate::context::CommandContext;
use crate::flow::{self, GuardedMutation, Precondition};
use crate::Result;

/// Move a Space to another namespace template tier
#[derive(Args, Debug)]
pub struct PromoteSpaceArgs {
    /// Name of the Space to promote
    pub name: String,

    /// Name of the NSTemplateTier to move the Space to
    pub target_tier: String,
}

/// Run the promote-space command.
pub async fn run(ctx: &mut CommandContext, args: PromoteSpaceArgs) -> Result<()> {
    let (cluster, client) = ctx.host_client().await?;
    let spaces: Api<Space> = Api::namespaced(client.clone(), &cluster.operator_namespace);
    let tiers: Api<NSTemplateTier> = Api::namespaced(client, &cluster.operator_namespace);

    // Hard requirement: the tier must exist before anything is previewed.
    flow::fetch(&tiers, &cluster.operator_namespace, &args.target_tier).await?;

    let mutation = PromoteSpace {
        api: spaces.clone(),
        name: args.name.clone(),
        target_tier: args.target_tier,
    };
    flow::run(
        &mut ctx.term,
        &spaces,
        &cluster.operator_namespace,
        &args.name,
        mutation,
    )
    .await?;
    Ok(())
}

struct PromoteSpace {
    api: Api<Space>,
    name: String,
    target_tier: String,
}

#[async_trait]
impl GuardedMutation for PromoteSpace {
    type Target = Space;

    fn preview_title(&self) -> String {
        format!("Space '{}'", self.name)
    }

    fn check(&self, target: &Space) -> Result<Precondition> {
        if target.spec.tier_name == self.target_tier {
            return Ok(Precondition::NothingToDo(format!(
                "Space '{}' is already on the '{}' tier",
                self.name, self.target_tier
            )));
        }
        Ok(Precondition::Proceed)
    }

    fn question(&self) -> String {
        format!(
            "promote the Space '{}' to the '{}' tier?",
            self.name, self.target_tier
        )
    }

    async fn apply(&mut self, mut target: Space) -> Result<()> {
        target.spec.tier_name = self.target_tier.clone();
        flow::update(&self.api, target).await?;
        Ok(())
    }

    fn success_message(&self) -> String {
        format!(
            "Space '{}' has been promoted to the '{}' tier",
            self.name, self.target_tier
        )
    }
}

#[cfg(test)]
mod tests {
    use ksctl_api::SpaceSpec;

    use super::*;
    use crate::commands::test_support::disconnected_client;

    fn space(tier: &str) -> Space {
        Space::new(
            "alice-dev",
            SpaceSpec {
                target_cluster: Some("member-1".to_string()),
                tier_name: tier.to_string(),
            },
        )
    }

    fn mutation() -> PromoteSpace {
        PromoteSpace {
            api: Api::namespaced(disconnected_client(), "toolchain-host-operator"),
            name: "alice-dev".to_string(),
            target_tier: "base1ns6didler".to_string(),
        }
    }

    #[tokio::test]
    async fn already_on_target_tier_is_nothing_to_do() {
        let result = mutation().check(&space("base1ns6didler")).unwrap();
        assert!(matches!(result, Precondition::NothingToDo(_)));
    }

    #[tokio::test]
    async fn different_tier_proceeds() {
        let result = mutation().check(&space("base1ns")).unwrap();
        assert!(matches!(result, Precondition::Proceed));
    }
}
