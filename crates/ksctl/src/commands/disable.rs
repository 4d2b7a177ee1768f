//! `ksctl disable` — disable a provisioned user account.
//!
//! Sets `spec.disabled` on the MasterUserRecord; the member operators
//! then revoke the user's access on every member cluster without deleting
//! anything.
//!
//! # Usage
//!
//! ```bash
//! ksctl disable alice
//! ```

use async_trait::async_trait;
use clap::Args;
use kube::Api;

use ksctl_api::MasterUserRecord;

use crate::context::CommandContext;
use crate::flow::{self, GuardedMutation, Precondition};
use crate::Result;

/// Disable a MasterUserRecord
#[derive(Args, Debug)]
pub struct DisableArgs {
    /// Name of the MasterUserRecord to disable
    pub name: String,
}

/// Run the disable command.
pub async fn run(ctx: &mut CommandContext, args: DisableArgs) -> Result<()> {
    let (cluster, client) = ctx.host_client().await?;
    let api: Api<MasterUserRecord> = Api::namespaced(client, &cluster.operator_namespace);

    let mutation = Disable {
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

struct Disable {
    api: Api<MasterUserRecord>,
    name: String,
}

#[async_trait]
impl GuardedMutation for Disable {
    type Target = MasterUserRecord;

    fn preview_title(&self) -> String {
        format!("MasterUserRecord '{}'", self.name)
    }

    fn check(&self, target: &MasterUserRecord) -> Result<Precondition> {
        if target.spec.disabled {
            return Ok(Precondition::NothingToDo(format!(
                "MasterUserRecord '{}' is already disabled",
                self.name
            )));
        }
        Ok(Precondition::Proceed)
    }

    fn danger_warning(&self) -> Option<String> {
        Some("the user loses access to every member cluster until re-enabled".to_string())
    }

    fn question(&self) -> String {
        format!("disable the MasterUserRecord '{}'?", self.name)
    }

    async fn apply(&mut self, mut target: MasterUserRecord) -> Result<()> {
        target.spec.disabled = true;
        flow::update(&self.api, target).await?;
        Ok(())
    }

    fn success_message(&self) -> String {
        format!("MasterUserRecord '{}' has been disabled", self.name)
    }
}

#[cfg(test)]
mod tests {
    use ksctl_api::MasterUserRecordSpec;

    use super::*;
    use crate::commands::test_support::disconnected_client;

    fn record(disabled: bool) -> MasterUserRecord {
        MasterUserRecord::new(
            "alice",
            MasterUserRecordSpec {
                tier_name: "deactivate30".to_string(),
                disabled,
            },
        )
    }

    fn mutation() -> Disable {
        Disable {
            api: Api::namespaced(disconnected_client(), "toolchain-host-operator"),
            name: "alice".to_string(),
        }
    }

    #[tokio::test]
    async fn already_disabled_is_nothing_to_do() {
        let result = mutation().check(&record(true)).unwrap();
        assert!(matches!(result, Precondition::NothingToDo(_)));
    }

    #[tokio::test]
    async fn enabled_record_proceeds() {
        let result = mutation().check(&record(false)).unwrap();
        assert!(matches!(result, Precondition::Proceed));
    }
}
