//! Cluster name resolution.
//!
//! Turns a logical cluster name from the loaded configuration into a
//! validated [`ClusterConfig`] ready to hand to the client factory. Pure
//! local validation over the already-loaded configuration; no network I/O
//! happens here, which is why every guard can be unit-tested without a
//! server.

use crate::config::{ClusterType, KsctlConfig};
use crate::{Error, Result};

/// A resolved, validated view of one cluster access definition.
///
/// Only ever constructed with a proven non-empty token: an entry without a
/// token represents an operator who is known but not entitled to act on
/// that cluster, and resolution refuses it before any call is attempted.
#[derive(Clone, Debug)]
pub struct ClusterConfig {
    pub name: String,
    pub server_api: String,
    pub server_name: String,
    pub token: String,
    pub cluster_type: ClusterType,
    pub operator_namespace: String,
    pub sandbox_namespace: Option<String>,
}

/// Resolve `name` against the configuration.
///
/// Fails with `ClusterNotFound` (listing the known names) when the name is
/// absent, `KindMismatch` when `expected_kind` is given and differs from
/// the stored kind, and `MissingToken` when the entry has no usable token.
pub fn resolve(
    config: &KsctlConfig,
    name: &str,
    expected_kind: Option<ClusterType>,
) -> Result<ClusterConfig> {
    let definition = config
        .cluster_access_definitions
        .get(name)
        .ok_or_else(|| Error::ClusterNotFound {
            name: name.to_string(),
            known: config.cluster_names(),
        })?;

    if let Some(expected) = expected_kind {
        if definition.cluster_type != expected {
            return Err(Error::KindMismatch {
                name: name.to_string(),
                expected,
                actual: definition.cluster_type,
            });
        }
    }

    let token = match definition.token.as_deref() {
        Some(token) if !token.trim().is_empty() => token.to_string(),
        _ => {
            return Err(Error::MissingToken {
                name: name.to_string(),
            })
        }
    };

    Ok(ClusterConfig {
        name: name.to_string(),
        server_api: definition.server_api.clone(),
        server_name: definition.server_name.clone(),
        token,
        cluster_type: definition.cluster_type,
        operator_namespace: definition
            .operator_namespace
            .clone()
            .unwrap_or_else(|| definition.cluster_type.default_operator_namespace().to_string()),
        sandbox_namespace: definition.sandbox_namespace.clone(),
    })
}
