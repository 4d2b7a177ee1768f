//! `ksctl create-event` — create a SocialEvent activation code.
//!
//! Generates a short code, previews the event and creates it on the host
//! cluster after confirmation. Signups entering the code are approved
//! onto the event's tiers without individual review.
//!
//! # Usage
//!
//! ```bash
//! ksctl create-event \
//!   --description "Rust workshop" \
//!   --start-time 2026-09-01T09:00:00Z \
//!   --end-time 2026-09-01T18:00:00Z \
//!   --max-attendees 40
//! ```

use clap::Args;
use kube::api::PostParams;
use kube::Api;

use ksctl_api::{NSTemplateTier, SocialEvent, SocialEventSpec, UserTier};

use crate::context::CommandContext;
use crate::flow;
use crate::Result;

/// Create a SocialEvent activation code
#[derive(Args, Debug)]
pub struct CreateEventArgs {
    /// Human-readable event description
    #[arg(long)]
    pub description: String,

    /// RFC 3339 instant the code becomes valid
    #[arg(long)]
    pub start_time: String,

    /// RFC 3339 instant the code expires
    #[arg(long)]
    pub end_time: String,

    /// Maximum number of signups the code activates
    #[arg(long, default_value_t = 10)]
    pub max_attendees: i32,

    /// UserTier attendees are placed on
    #[arg(long, default_value = "deactivate30")]
    pub user_tier: String,

    /// NSTemplateTier attendee spaces are templated from
    #[arg(long, default_value = "base1ns")]
    pub space_tier: String,

    /// Member cluster attendee spaces are provisioned on
    #[arg(long)]
    pub target_cluster: Option<String>,
}

/// Run the create-event command.
pub async fn run(ctx: &mut CommandContext, args: CreateEventArgs) -> Result<()> {
    let (cluster, client) = ctx.host_client().await?;
    let namespace = cluster.operator_namespace.clone();
    let user_tiers: Api<UserTier> = Api::namespaced(client.clone(), &namespace);
    let space_tiers: Api<NSTemplateTier> = Api::namespaced(client.clone(), &namespace);
    let events: Api<SocialEvent> = Api::namespaced(client, &namespace);

    // Both tiers must exist; a typo here would strand every attendee.
    flow::fetch(&user_tiers, &namespace, &args.user_tier).await?;
    flow::fetch(&space_tiers, &namespace, &args.space_tier).await?;

    let code = generate_activation_code();
    let event = SocialEvent::new(
        &code,
        SocialEventSpec {
            user_tier: args.user_tier,
            space_tier: args.space_tier,
            max_attendees: args.max_attendees,
            start_time: args.start_time,
            end_time: args.end_time,
            description: Some(args.description),
            target_cluster: args.target_cluster,
        },
    );

    ctx.term
        .print_object(&format!("SocialEvent '{code}'"), &event)?;
    if !ctx
        .term
        .confirm(format!("create the SocialEvent '{code}'?"))?
    {
        return Ok(());
    }

    events.create(&PostParams::default(), &event).await?;
    ctx.term.println(format!(
        "SocialEvent '{code}' has been created; share the code with the attendees"
    ))?;
    Ok(())
}

/// Generate a short readable activation code (6 hex chars).
///
/// Derived from timestamp and pid so parallel invocations get distinct
/// codes without a randomness dependency.
fn generate_activation_code() -> String {
    use std::time::{SystemTime, UNIX_EPOCH};
    let timestamp = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as u32;
    let pid = std::process::id();
    format!("{:06x}", (timestamp ^ pid) & 0xFFFFFF)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn activation_code_is_six_hex_chars() {
        let code = generate_activation_code();
        assert_eq!(code.len(), 6);
        assert!(code.chars().all(|c| c.is_ascii_hexdigit()));
    }
}
