//! ksctl configuration loaded from `$HOME/.sandbox.yaml`.
//!
//! The file names the acting operator and maps cluster names to access
//! definitions:
//!
//! ```yaml
//! name: john.admin
//! clusterAccessDefinitions:
//!   host:
//!     serverAPI: https://api.host.example.com:6443
//!     serverName: host.example.com
//!     clusterType: host
//!     token: cool-token
//!   member-1:
//!     serverAPI: https://api.m1.example.com:6443
//!     serverName: m1.example.com
//!     clusterType: member
//!     token: other-token
//! ```
//!
//! Parsing is strict: unknown fields and unknown cluster kinds fail the
//! whole load. The file is re-read on every invocation, so external edits
//! take effect on the next run.

use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// File name looked up under `$HOME` when `--config` is not given.
pub const DEFAULT_CONFIG_FILE: &str = ".sandbox.yaml";

/// Kind of a configured cluster.
#[derive(Clone, Copy, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ClusterType {
    /// Control-plane cluster holding the tenant records
    Host,
    /// Workload cluster where tenant namespaces live
    Member,
}

impl ClusterType {
    /// Namespace the cluster's operator runs in when the definition does
    /// not name one.
    pub fn default_operator_namespace(self) -> &'static str {
        match self {
            ClusterType::Host => "toolchain-host-operator",
            ClusterType::Member => "toolchain-member-operator",
        }
    }
}

impl fmt::Display for ClusterType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClusterType::Host => write!(f, "host"),
            ClusterType::Member => write!(f, "member"),
        }
    }
}

/// Connection facts for one named cluster.
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ClusterAccessDefinition {
    /// URL of the cluster's API server
    #[serde(rename = "serverAPI")]
    pub server_api: String,

    /// Display/verification name of the cluster
    pub server_name: String,

    /// Bearer token. Absent means the operator is known but not entitled
    /// to act on this cluster; every mutating command must refuse.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,

    pub cluster_type: ClusterType,

    /// Namespace the toolchain operator runs in
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operator_namespace: Option<String>,

    /// Namespace sandbox resources are looked up in
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sandbox_namespace: Option<String>,
}

/// The root configuration document.
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct KsctlConfig {
    /// Acting operator's name, recorded in audit labels
    pub name: String,

    #[serde(default)]
    pub cluster_access_definitions: BTreeMap<String, ClusterAccessDefinition>,
}

impl KsctlConfig {
    /// Names of every configured cluster, sorted.
    pub fn cluster_names(&self) -> Vec<String> {
        self.cluster_access_definitions.keys().cloned().collect()
    }
}

/// Path used when `--config` is not given: `$HOME/.sandbox.yaml`.
pub fn default_path() -> Result<PathBuf> {
    let home = dirs::home_dir()
        .ok_or_else(|| Error::validation("could not determine home directory"))?;
    Ok(home.join(DEFAULT_CONFIG_FILE))
}

/// Load the configuration from `explicit` or the default path.
///
/// Partial configs are never accepted: any parse failure fails the load.
pub fn load(explicit: Option<&Path>) -> Result<KsctlConfig> {
    let path = match explicit {
        Some(path) => path.to_path_buf(),
        None => default_path()?,
    };

    if !path.exists() {
        return Err(Error::ConfigNotFound { path });
    }

    let raw = std::fs::read_to_string(&path)?;
    serde_yaml::from_str(&raw).map_err(|e| Error::ConfigParse { path, source: e })
}
