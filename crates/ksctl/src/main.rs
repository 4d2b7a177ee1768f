//! ksctl
//!
//! Operator CLI for administering tenants across host and member clusters.

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use ksctl::Cli;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Verbosity is an explicit per-invocation value, not process-global
    // mutable state: it is read once here and never changed.
    let default_filter = if cli.global.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)))
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    if let Err(err) = cli.run().await {
        // Errors are operator-facing output, not log noise.
        println!("Error: {err}");
        std::process::exit(1);
    }
}
