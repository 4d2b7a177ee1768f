//! `ksctl promote-user` — move a user account to another user tier.
//!
//! The target UserTier must exist on the host cluster; promoting to an
//! unknown tier is a hard failure before any prompt.
//!
//! # Usage
//!
//! ```bash
//! ksctl promote-user alice nodeactivation
//! ```

use async_trait::async_trait;
use clap::Args;
use kube::Api;

use ksctl_api::{MasterUserRecord, UserTier};

use crate::context::CommandContext;
use crate::flow::{self, GuardedMutation, Precondition};
use crate::Result;

/// Move a MasterUserRecord to another user tier
#[derive(Args, Debug)]
pub struct PromoteUserArgs {
    /// Name of the MasterUserRecord to promote
    pub name: String,

    /// Name of the UserTier to move the account to
    pub target_tier: String,
}

/// Run the promote-user command.
pub async fn run(ctx: &mut CommandContext, args: PromoteUserArgs) -> Result<()> {
    let (cluster, client) = ctx.host_client().await?;
    let records: Api<MasterUserRecord> = Api::namespaced(client.clone(), &cluster.operator_namespace);
    let tiers: Api<UserTier> = Api::namespaced(client, &cluster.operator_namespace);

    // Hard requirement: the tier must exist before anything is previewed.
    flow::fetch(&tiers, &cluster.operator_namespace, &args.target_tier).await?;

    let mutation = PromoteUser {
        api: records.clone(),
        name: args.name.clone(),
        target_tier: args.target_tier,
    };
    flow::run(
        &mut ctx.term,
        &records,
        &cluster.operator_namespace,
        &args.name,
        mutation,
    )
    .await?;
    Ok(())
}

struct PromoteUser {
    api: Api<MasterUserRecord>,
    name: String,
    target_tier: String,
}

#[async_trait]
impl GuardedMutation for PromoteUser {
    type Target = MasterUserRecord;

    fn preview_title(&self) -> String {
        format!("MasterUserRecord '{}'", self.name)
    }

    fn check(&self, target: &MasterUserRecord) -> Result<Precondition> {
        if target.spec.tier_name == self.target_tier {
            return Ok(Precondition::NothingToDo(format!(
                "MasterUserRecord '{}' is already on the '{}' tier",
                self.name, self.target_tier
            )));
        }
        Ok(Precondition::Proceed)
    }

    fn question(&self) -> String {
        format!(
            "promote the MasterUserRecord '{}' to the '{}' tier?",
            self.name, self.target_tier
        )
    }

    async fn apply(&mut self, mut target: MasterUserRecord) -> Result<()> {
        target.spec.tier_name = self.target_tier.clone();
        flow::update(&self.api, target).await?;
        Ok(())
    }

    fn success_message(&self) -> String {
        format!(
            "MasterUserRecord '{}' has been promoted to the '{}' tier",
            self.name, self.target_tier
        )
    }
}

#[cfg(test)]
mod tests {
    use ksctl_api::MasterUserRecordSpec;

    use super::*;
    use crate::commands::test_support::disconnected_client;

    fn record(tier: &str) -> MasterUserRecord {
        MasterUserRecord::new(
            "alice",
            MasterUserRecordSpec {
                tier_name: tier.to_string(),
                disabled: false,
            },
        )
    }

    fn mutation() -> PromoteUser {
        PromoteUser {
            api: Api::namespaced(disconnected_client(), "toolchain-host-operator"),
            name: "alice".to_string(),
            target_tier: "nodeactivation".to_string(),
        }
    }

    #[tokio::test]
    async fn already_on_target_tier_is_nothing_to_do() {
        let result = mutation().check(&record("nodeactivation")).unwrap();
        assert!(matches!(result, Precondition::NothingToDo(message)
            if message.contains("already on the 'nodeactivation' tier")));
    }

    #[tokio::test]
    async fn different_tier_proceeds() {
        let result = mutation().check(&record("deactivate30")).unwrap();
        assert!(matches!(result, Precondition::Proceed));
    }
}
