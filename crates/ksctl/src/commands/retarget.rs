//! `ksctl retarget` — move a Space to another member cluster.
//!
//! The target must resolve to a *member* cluster in the configuration
//! before the Space is even fetched: naming an unknown cluster, or the
//! host cluster, fails resolution and leaves the Space untouched.
//!
//! # Usage
//!
//! ```bash
//! ksctl retarget alice-dev member-2
//! ```

use async_trait::async_trait;
use clap::Args;
use kube::Api;

use ksctl_api::Space;

use crate::config::ClusterType;
use crate::context::CommandContext;
use crate::flow::{self, GuardedMutation, Precondition};
use crate::Result;

/// Move a Space to another member cluster
#[derive(Args, Debug)]
pub struct RetargetArgs {
    /// Name of the Space to move
    pub name: String,

    /// Name of the member cluster to move it to (as named in ksctl.yaml)
    pub target_cluster: String,
}

/// Run the retarget command.
pub async fn run(ctx: &mut CommandContext, args: RetargetArgs) -> Result<()> {
    // The target cluster name must be a configured member cluster. This
    // guard fires before any fetch, so a typo can never touch the Space.
    let member = ctx.resolve(&args.target_cluster, Some(ClusterType::Member))?;

    let (cluster, client) = ctx.host_client().await?;
    let spaces: Api<Space> = Api::namespaced(client, &cluster.operator_namespace);

    let mutation = Retarget {
        api: spaces.clone(),
        name: args.name.clone(),
        target_cluster: member.name,
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

struct Retarget {
    api: Api<Space>,
    name: String,
    target_cluster: String,
}

#[async_trait]
impl GuardedMutation for Retarget {
    type Target = Space;

    fn preview_title(&self) -> String {
        format!("Space '{}'", self.name)
    }

    fn check(&self, target: &Space) -> Result<Precondition> {
        if target.spec.target_cluster.as_deref() == Some(self.target_cluster.as_str()) {
            return Ok(Precondition::NothingToDo(format!(
                "Space '{}' is already targeted at cluster '{}'",
                self.name, self.target_cluster
            )));
        }
        Ok(Precondition::Proceed)
    }

    fn danger_warning(&self) -> Option<String> {
        Some(
            "retargeting deletes the Space's namespaces on the current cluster \
             and recreates them empty on the target cluster"
                .to_string(),
        )
    }

    fn question(&self) -> String {
        format!(
            "move the Space '{}' to cluster '{}'?",
            self.name, self.target_cluster
        )
    }

    async fn apply(&mut self, mut target: Space) -> Result<()> {
        target.spec.target_cluster = Some(self.target_cluster.clone());
        flow::update(&self.api, target).await?;
        Ok(())
    }

    fn success_message(&self) -> String {
        format!(
            "Space '{}' is now targeted at cluster '{}'",
            self.name, self.target_cluster
        )
    }
}
