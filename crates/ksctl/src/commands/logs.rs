//! `ksctl logs` — fetch logs from a pod on a cluster.
//!
//! # Usage
//!
//! ```bash
//! # Host operator logs
//! ksctl logs host-operator-controller-manager-abc123
//!
//! # A member operator container, last 100 lines
//! ksctl logs member-operator-abc123 --target-cluster member-1 \
//!   -c manager --tail 100
//! ```

use clap::Args;
use k8s_openapi::api::core::v1::Pod;
use kube::api::LogParams;
use kube::Api;

use crate::context::CommandContext;
use crate::flow;
use crate::Result;

/// Fetch logs from a pod on a cluster
#[derive(Args, Debug)]
pub struct LogsArgs {
    /// Name of the pod
    pub pod: String,

    /// Cluster to read from, as named in ksctl.yaml (default: the host)
    #[arg(long)]
    pub target_cluster: Option<String>,

    /// Namespace of the pod (default: the cluster's operator namespace)
    #[arg(short, long)]
    pub namespace: Option<String>,

    /// Container to read (default: the pod's only container)
    #[arg(short, long)]
    pub container: Option<String>,

    /// Only return this many lines from the end of the log
    #[arg(long)]
    pub tail: Option<i64>,
}

/// Run the logs command.
pub async fn run(ctx: &mut CommandContext, args: LogsArgs) -> Result<()> {
    let (cluster, client) = match &args.target_cluster {
        Some(name) => ctx.client_for(name, None).await?,
        None => ctx.host_client().await?,
    };

    let namespace = args
        .namespace
        .as_deref()
        .unwrap_or(&cluster.operator_namespace);
    let pods: Api<Pod> = Api::namespaced(client, namespace);

    // Probe with a typed fetch first so a missing pod reports the same
    // qualified not-found error as everything else.
    flow::fetch(&pods, namespace, &args.pod).await?;

    let params = LogParams {
        container: args.container.clone(),
        tail_lines: args.tail,
        ..LogParams::default()
    };
    let logs = pods.logs(&args.pod, &params).await?;
    ctx.term.println(logs)
}
