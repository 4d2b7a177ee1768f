//! `ksctl get` — list or fetch raw resources from a cluster.
//!
//! A thin pass-through over the generic object client: the kind is
//! resolved via API discovery, so anything the target cluster serves can
//! be listed, not just toolchain resources.
//!
//! # Usage
//!
//! ```bash
//! # UserSignups on the host cluster
//! ksctl get usersignups
//!
//! # One Space as YAML
//! ksctl get space alice-dev -o yaml
//!
//! # Pods on a member cluster, by label
//! ksctl get pods --target-cluster member-1 -n toolchain-member-operator \
//!   -l app=member-operator
//! ```

use clap::{Args, ValueEnum};
use kube::api::{DynamicObject, ListParams};
use kube::ResourceExt;

use crate::client::GenericClient;
use crate::context::CommandContext;
use crate::Result;

use super::format::{format_age, render_table};

/// List or fetch raw resources from a cluster
#[derive(Args, Debug)]
pub struct GetArgs {
    /// Resource kind (e.g. usersignups, spaces, pods)
    pub kind: String,

    /// Resource name (omit to list)
    pub name: Option<String>,

    /// Cluster to read from, as named in ksctl.yaml (default: the host)
    #[arg(long)]
    pub target_cluster: Option<String>,

    /// Namespace to read from (default: the cluster's operator namespace)
    #[arg(short, long)]
    pub namespace: Option<String>,

    /// Label selector to filter a listing
    #[arg(short = 'l', long)]
    pub selector: Option<String>,

    /// Output format
    #[arg(short, long, default_value = "table")]
    pub output: OutputFormat,
}

/// Output format for read commands
#[derive(Clone, Debug, Default, ValueEnum)]
pub enum OutputFormat {
    /// Columnar table
    #[default]
    Table,
    /// YAML
    Yaml,
    /// JSON
    Json,
}

/// Run the get command.
pub async fn run(ctx: &mut CommandContext, args: GetArgs) -> Result<()> {
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
    let api = generic.api(&resource, &scope, namespace);

    match &args.name {
        Some(name) => {
            let object = api.get(name).await?;
            print_one(ctx, &resource.kind, &object, &args.output)
        }
        None => {
            let mut params = ListParams::default();
            if let Some(selector) = &args.selector {
                params = params.labels(selector);
            }
            let objects = api.list(&params).await?;
            print_list(ctx, &objects.items, &args.output)
        }
    }
}

fn print_one(
    ctx: &mut CommandContext,
    kind: &str,
    object: &DynamicObject,
    output: &OutputFormat,
) -> Result<()> {
    match output {
        OutputFormat::Yaml | OutputFormat::Table => {
            ctx.term
                .print_object(&format!("{} '{}'", kind, object.name_any()), object)
        }
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(object)?;
            ctx.term.println(json)
        }
    }
}

fn print_list(
    ctx: &mut CommandContext,
    objects: &[DynamicObject],
    output: &OutputFormat,
) -> Result<()> {
    match output {
        OutputFormat::Table => {
            if objects.is_empty() {
                return ctx.term.println("No resources found.");
            }
            let rows: Vec<Vec<String>> = objects
                .iter()
                .map(|object| {
                    let age = object
                        .metadata
                        .creation_timestamp
                        .as_ref()
                        .map(|time| format_age(&time.0))
                        .unwrap_or_else(|| "-".to_string());
                    vec![object.name_any(), age]
                })
                .collect();
            ctx.term.println(render_table(&["NAME", "AGE"], &rows))
        }
        OutputFormat::Yaml => {
            for object in objects {
                ctx.term.print_object(&object.name_any(), object)?;
            }
            Ok(())
        }
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(objects)?;
            ctx.term.println(json)
        }
    }
}
