//! ksctl library
//!
//! Operator CLI for administering tenants of a multi-cluster platform:
//! user records, spaces, bindings, bans, tiers and events, spread across
//! one host cluster and any number of member clusters.

pub mod client;
pub mod cluster;
pub mod commands;
pub mod config;
pub mod context;
pub mod error;
pub mod flow;
pub mod term;

pub use error::{Error, Result};

use std::path::PathBuf;
use std::time::Duration;

use clap::{Args, Parser, Subcommand};

use crate::client::{ClientOptions, KubeClientFactory, DEFAULT_TIMEOUT_SECS};
use crate::context::CommandContext;
use crate::term::Terminal;

/// ksctl - administer tenants across host and member clusters
#[derive(Parser, Debug)]
#[command(name = "ksctl")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Commands,
}

/// Flags shared by every command.
#[derive(Args, Debug)]
pub struct GlobalArgs {
    /// Path to the ksctl configuration file (default: $HOME/.sandbox.yaml)
    #[arg(long, global = true, env = "KSCTL_CONFIG")]
    pub config: Option<PathBuf>,

    /// Print debug-level logs
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Assume "yes" to every confirmation prompt
    #[arg(short = 'y', long, global = true)]
    pub assume_yes: bool,

    /// Tolerate self-signed TLS certificates (internal clusters only)
    #[arg(long, global = true)]
    pub insecure_skip_tls_verify: bool,

    /// Timeout in seconds applied to every API call
    #[arg(long, global = true, default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub timeout: u64,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Approve a UserSignup
    Approve(commands::approve::ApproveArgs),
    /// Ban a user and prevent them from signing up again
    Ban(commands::ban::BanArgs),
    /// Deactivate a UserSignup
    Deactivate(commands::deactivate::DeactivateArgs),
    /// Disable a MasterUserRecord on every member cluster
    Disable(commands::disable::DisableArgs),
    /// Delete a UserSignup and all the user's data (GDPR erasure)
    GdprDelete(commands::gdpr_delete::GdprDeleteArgs),
    /// Move a MasterUserRecord to another user tier
    PromoteUser(commands::promote_user::PromoteUserArgs),
    /// Move a Space to another namespace template tier
    PromoteSpace(commands::promote_space::PromoteSpaceArgs),
    /// Move a Space to another member cluster
    Retarget(commands::retarget::RetargetArgs),
    /// Enable a feature on a Space
    EnableFeature(commands::enable_feature::EnableFeatureArgs),
    /// Disable a feature on a Space
    DisableFeature(commands::disable_feature::DisableFeatureArgs),
    /// Grant users a role in a Space
    AddSpaceUsers(commands::add_space_users::AddSpaceUsersArgs),
    /// Revoke users' access to a Space
    RemoveSpaceUsers(commands::remove_space_users::RemoveSpaceUsersArgs),
    /// Create a SocialEvent activation code
    CreateEvent(commands::create_event::CreateEventArgs),
    /// List or fetch raw resources from a cluster
    Get(commands::get::GetArgs),
    /// Show one resource in full
    Describe(commands::describe::DescribeArgs),
    /// Fetch logs from a pod on a cluster
    Logs(commands::logs::LogsArgs),
}

impl Cli {
    /// Load configuration, build the per-invocation context and run the
    /// selected command.
    pub async fn run(self) -> Result<()> {
        let config = config::load(self.global.config.as_deref())?;

        let factory = KubeClientFactory::new(ClientOptions {
            timeout: Duration::from_secs(self.global.timeout),
            insecure_skip_tls_verify: self.global.insecure_skip_tls_verify,
        });

        let mut term = Terminal::stdio();
        if self.global.assume_yes {
            term.assume(true);
        }

        let mut ctx = CommandContext::new(term, config, Box::new(factory));

        match self.command {
            Commands::Approve(args) => commands::approve::run(&mut ctx, args).await,
            Commands::Ban(args) => commands::ban::run(&mut ctx, args).await,
            Commands::Deactivate(args) => commands::deactivate::run(&mut ctx, args).await,
            Commands::Disable(args) => commands::disable::run(&mut ctx, args).await,
            Commands::GdprDelete(args) => commands::gdpr_delete::run(&mut ctx, args).await,
            Commands::PromoteUser(args) => commands::promote_user::run(&mut ctx, args).await,
            Commands::PromoteSpace(args) => commands::promote_space::run(&mut ctx, args).await,
            Commands::Retarget(args) => commands::retarget::run(&mut ctx, args).await,
            Commands::EnableFeature(args) => commands::enable_feature::run(&mut ctx, args).await,
            Commands::DisableFeature(args) => commands::disable_feature::run(&mut ctx, args).await,
            Commands::AddSpaceUsers(args) => commands::add_space_users::run(&mut ctx, args).await,
            Commands::RemoveSpaceUsers(args) => {
                commands::remove_space_users::run(&mut ctx, args).await
            }
            Commands::CreateEvent(args) => commands::create_event::run(&mut ctx, args).await,
            Commands::Get(args) => commands::get::run(&mut ctx, args).await,
            Commands::Describe(args) => commands::describe::run(&mut ctx, args).await,
            Commands::Logs(args) => commands::logs::run(&mut ctx, args).await,
        }
    }
}
