//! Error types for the CLI

use std::path::PathBuf;

use crate::config::ClusterType;

/// CLI Result type
pub type Result<T> = std::result::Result<T, Error>;

/// CLI errors
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("configuration file not found: {}", .path.display())]
    ConfigNotFound { path: PathBuf },

    #[error("failed to parse {}: {source}", .path.display())]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("the cluster '{name}' is not present in your ksctl.yaml file; known clusters are: {}", .known.join(", "))]
    ClusterNotFound { name: String, known: Vec<String> },

    #[error("the cluster '{name}' is a {actual} cluster, not a {expected} cluster")]
    KindMismatch {
        name: String,
        expected: ClusterType,
        actual: ClusterType,
    },

    #[error("the cluster '{name}' has no token set in your ksctl.yaml file; you are not entitled to act on it")]
    MissingToken { name: String },

    #[error("{kind} '{namespace}/{name}' not found")]
    NotFound {
        kind: String,
        namespace: String,
        name: String,
    },

    #[error("{message}")]
    Validation { message: String },

    #[error("invalid server API URL '{url}': {reason}")]
    InvalidServerUrl { url: String, reason: String },

    #[error("failed to render object preview: {0}")]
    Render(String),

    #[error("failed to read confirmation answer: {0}")]
    Input(#[source] std::io::Error),

    #[error("kubernetes api error: {0}")]
    Kube(#[from] kube::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    pub fn validation(message: impl Into<String>) -> Self {
        Error::Validation {
            message: message.into(),
        }
    }

    pub fn not_found(kind: impl Into<String>, namespace: &str, name: &str) -> Self {
        Error::NotFound {
            kind: kind.into(),
            namespace: namespace.to_string(),
            name: name.to_string(),
        }
    }
}
