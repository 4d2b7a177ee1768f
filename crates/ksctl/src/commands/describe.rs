//! `ksctl describe` — show one resource in full.
//!
//! # Usage
//!
//! ```bash
//! ksctl describe usersignup alice
//! ksctl describe space alice-dev --target-cluster member-1 -n custom-ns
//! ```

use clap::Args;

use crate::client::GenericClient;
use crate::context::CommandContext;
use crate::Result;

/// Show one resource in full
#[derive(Args, Debug)]
pub struct DescribeArgs {
    /// Resource kind (e.g. usersignup, space, pod)
    pub kind: String,

    /// Resource name
    pub name: String,

    /// Cluster to read from, as named in ksctl.yaml (default: the host)
    #[arg(long)]
    pub target_cluster: Option<String>,

    /// Namespace to read from (default: the cluster's operator namespace)
    #[arg(short, long)]
    pub namespace: Option<String>,
}

/// Run the describe command.
pub async fn run(ctx: &mut CommandContext, args: DescribeArgs) -> Result<()> {
    let (cluster, client) = match &args.target_cluster {
        Some(name) => ctx.client_for(name, None).await?,
        None => ctx.host_client().await?,
    };

    let generic = GenericClient::new(client).await?;
    let (resource, scope) = generic.resolve_kind(&args.kind)?;
    let namespace = args
        .namespace
        .as_deref()
        .unwrap_or(&cluster.operator_namespace);

    let object = generic.api(&resource, &scope, namespace).get(&args.name).await?;
    ctx.term
        .print_object(&format!("{} '{}'", resource.kind, args.name), &object)
}
