//! `ksctl enable-feature` — enable a feature toggle on a Space.
//!
//! Features are carried in a comma-separated annotation on the Space and
//! picked up by the member operator on the next reconcile. Enabling a
//! feature that is already enabled is a no-op, so the command can be
//! re-run safely.
//!
//! # Usage
//!
//! ```bash
//! ksctl enable-feature alice-dev webhooks
//! ```

use async_trait::async_trait;
use clap::Args;
use kube::Api;

use ksctl_api::Space;

use crate::context::CommandContext;
use crate::flow::{self, GuardedMutation, Precondition};
use crate::Result;

/// Enable a feature on a Space
#[derive(Args, Debug)]
pub struct EnableFeatureArgs {
    /// Name of the Space
    pub name: String,

    /// Name of the feature to enable
    pub feature: String,
}

/// Run the enable-feature command.
pub async fn run(ctx: &mut CommandContext, args: EnableFeatureArgs) -> Result<()> {
    let (cluster, client) = ctx.host_client().await?;
    let spaces: Api<Space> = Api::namespaced(client, &cluster.operator_namespace);

    let mutation = EnableFeature {
        api: spaces.clone(),
        name: args.name.clone(),
        feature: args.feature,
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

struct EnableFeature {
    api: Api<Space>,
    name: String,
    feature: String,
}

#[async_trait]
impl GuardedMutation for EnableFeature {
    type Target = Space;

    fn preview_title(&self) -> String {
        format!("Space '{}'", self.name)
    }

    fn check(&self, target: &Space) -> Result<Precondition> {
        if target.features().iter().any(|f| f == &self.feature) {
            return Ok(Precondition::NothingToDo(format!(
                "the feature '{}' is already enabled on the Space '{}'",
                self.feature, self.name
            )));
        }
        Ok(Precondition::Proceed)
    }

    fn question(&self) -> String {
        format!(
            "enable the feature '{}' on the Space '{}'?",
            self.feature, self.name
        )
    }

    async fn apply(&mut self, mut target: Space) -> Result<()> {
        target.enable_feature(&self.feature);
        flow::update(&self.api, target).await?;
        Ok(())
    }

    fn success_message(&self) -> String {
        format!(
            "the feature '{}' has been enabled on the Space '{}'",
            self.feature, self.name
        )
    }
}
