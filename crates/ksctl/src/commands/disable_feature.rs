//! `ksctl disable-feature` — disable a feature toggle on a Space.
//!
//! Unlike enable-feature, asking to disable a feature that is not enabled
//! is a hard failure: it usually means the operator is looking at the
//! wrong Space.
//!
//! # Usage
//!
//! ```bash
//! ksctl disable-feature alice-dev webhooks
//! ```

use async_trait::async_trait;
use clap::Args;
use kube::Api;

use ksctl_api::Space;

use crate::context::CommandContext;
use crate::flow::{self, GuardedMutation, Precondition};
use crate::{Error, Result};

/// Disable a feature on a Space
#[derive(Args, Debug)]
pub struct DisableFeatureArgs {
    /// Name of the Space
    pub name: String,

    /// Name of the feature to disable
    pub feature: String,
}

/// Run the disable-feature command.
pub async fn run(ctx: &mut CommandContext, args: DisableFeatureArgs) -> Result<()> {
    let (cluster, client) = ctx.host_client().await?;
    let spaces: Api<Space> = Api::namespaced(client, &cluster.operator_namespace);

    let mutation = DisableFeature {
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

struct DisableFeature {
    api: Api<Space>,
    name: String,
    feature: String,
}

#[async_trait]
impl GuardedMutation for DisableFeature {
    type Target = Space;

    fn preview_title(&self) -> String {
        format!("Space '{}'", self.name)
    }

    fn check(&self, target: &Space) -> Result<Precondition> {
        if !target.features().iter().any(|f| f == &self.feature) {
            return Err(Error::validation(format!(
                "the feature '{}' is not enabled on the Space '{}'",
                self.feature, self.name
            )));
        }
        Ok(Precondition::Proceed)
    }

    fn question(&self) -> String {
        format!(
            "disable the feature '{}' on the Space '{}'?",
            self.feature, self.name
        )
    }

    async fn apply(&mut self, mut target: Space) -> Result<()> {
        target.disable_feature(&self.feature);
        flow::update(&self.api, target).await?;
        Ok(())
    }

    fn success_message(&self) -> String {
        format!(
            "the feature '{}' has been disabled on the Space '{}'",
            self.feature, self.name
        )
    }
}

#[cfg(test)]
mod tests {
    use ksctl_api::SpaceSpec;

    use super::*;
    use crate::commands::test_support::disconnected_client;

    fn space(features: &[&str]) -> Space {
        let mut space = Space::new(
            "alice-dev",
            SpaceSpec {
                target_cluster: Some("member-1".to_string()),
                tier_name: "base1ns".to_string(),
            },
        );
        for feature in features {
            space.enable_feature(feature);
        }
        space
    }

    fn mutation() -> DisableFeature {
        DisableFeature {
            api: Api::namespaced(disconnected_client(), "toolchain-host-operator"),
            name: "alice-dev".to_string(),
            feature: "webhooks".to_string(),
        }
    }

    #[tokio::test]
    async fn enabled_feature_proceeds() {
        let result = mutation().check(&space(&["webhooks", "idlers"])).unwrap();
        assert!(matches!(result, Precondition::Proceed));
    }

    #[tokio::test]
    async fn absent_feature_is_a_hard_failure() {
        let err = mutation().check(&space(&["idlers"])).unwrap_err();
        assert!(err
            .to_string()
            .contains("'webhooks' is not enabled on the Space 'alice-dev'"));
    }
}
