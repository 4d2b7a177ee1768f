//! Kubernetes client construction from resolved cluster access.
//!
//! Two flavors: the typed [`kube::Client`] every command works with, and
//! the [`GenericClient`] capability the delegated read commands (`get`,
//! `describe`, `logs`) use to address arbitrary kinds via API discovery.
//!
//! Construction is side-effect-free beyond building the HTTP transport;
//! connectivity is only proven by the first real call.

use std::time::Duration;

use async_trait::async_trait;
use kube::api::{ApiResource, DynamicObject};
use kube::discovery::{Discovery, Scope};
use kube::{Api, Client, Config};
use secrecy::SecretString;

use crate::cluster::ClusterConfig;
use crate::{Error, Result};

/// Default timeout applied to every API call.
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Transport options shared by every client built in one invocation.
#[derive(Clone, Copy, Debug)]
pub struct ClientOptions {
    /// Connect/read/write timeout applied to every call
    pub timeout: Duration,

    /// Tolerate self-signed certificates. An explicit operational
    /// concession for internal clusters, never a default.
    pub insecure_skip_tls_verify: bool,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            insecure_skip_tls_verify: false,
        }
    }
}

/// Builds authenticated API clients from resolved cluster configs.
///
/// A trait so tests can substitute a factory that records or refuses
/// construction; resolution failures must never reach it.
#[async_trait]
pub trait ClientFactory: Send + Sync {
    async fn client(&self, cluster: &ClusterConfig) -> Result<Client>;
}

/// The production factory.
pub struct KubeClientFactory {
    options: ClientOptions,
}

impl KubeClientFactory {
    pub fn new(options: ClientOptions) -> Self {
        Self { options }
    }
}

#[async_trait]
impl ClientFactory for KubeClientFactory {
    async fn client(&self, cluster: &ClusterConfig) -> Result<Client> {
        let config = build_config(cluster, &self.options)?;
        Client::try_from(config).map_err(Error::from)
    }
}

/// Build the client configuration for one cluster: server URL, bearer
/// token and the explicit timeout.
fn build_config(cluster: &ClusterConfig, options: &ClientOptions) -> Result<Config> {
    let url: http::Uri =
        cluster
            .server_api
            .parse()
            .map_err(|e: http::uri::InvalidUri| Error::InvalidServerUrl {
                url: cluster.server_api.clone(),
                reason: e.to_string(),
            })?;

    let mut config = Config::new(url);
    config.default_namespace = cluster.operator_namespace.clone();
    config.auth_info.token = Some(SecretString::from(cluster.token.clone()));
    config.accept_invalid_certs = options.insecure_skip_tls_verify;
    config.connect_timeout = Some(options.timeout);
    config.read_timeout = Some(options.timeout);
    config.write_timeout = Some(options.timeout);
    Ok(config)
}

/// Narrow generic-object capability for the delegated read commands.
///
/// Wraps one discovery run against the target cluster; kinds are addressed
/// by name or plural, case-insensitively, the way the upstream get/describe
/// tooling accepts them.
pub struct GenericClient {
    client: Client,
    discovery: Discovery,
}

impl GenericClient {
    pub async fn new(client: Client) -> Result<Self> {
        let discovery = Discovery::new(client.clone()).run().await?;
        Ok(Self { client, discovery })
    }

    /// Resolve a kind name or plural alias to a discovered API resource.
    pub fn resolve_kind(&self, kind: &str) -> Result<(ApiResource, Scope)> {
        let want = kind.to_ascii_lowercase();
        for group in self.discovery.groups() {
            for (resource, capabilities) in group.recommended_resources() {
                if resource.kind.to_ascii_lowercase() == want || resource.plural == want {
                    return Ok((resource, capabilities.scope));
                }
            }
        }
        Err(Error::validation(format!(
            "the server does not know the resource kind '{kind}'"
        )))
    }

    /// An API handle for the resolved resource, namespaced when the
    /// resource is.
    pub fn api(&self, resource: &ApiResource, scope: &Scope, namespace: &str) -> Api<DynamicObject> {
        match scope {
            Scope::Namespaced => Api::namespaced_with(self.client.clone(), namespace, resource),
            Scope::Cluster => Api::all_with(self.client.clone(), resource),
        }
    }
}

#[cfg(test)]
mod tests {
    use secrecy::ExposeSecret;

    use super::*;
    use crate::config::ClusterType;

    fn cluster(server_api: &str) -> ClusterConfig {
        ClusterConfig {
            name: "host".to_string(),
            server_api: server_api.to_string(),
            server_name: "host.example.com".to_string(),
            token: "cool-token".to_string(),
            cluster_type: ClusterType::Host,
            operator_namespace: "toolchain-host-operator".to_string(),
            sandbox_namespace: None,
        }
    }

    #[test]
    fn config_carries_server_token_and_namespace() {
        let options = ClientOptions::default();
        let config = build_config(&cluster("https://api.host.example.com:6443"), &options).unwrap();

        assert_eq!(config.cluster_url.host(), Some("api.host.example.com"));
        assert_eq!(config.cluster_url.port_u16(), Some(6443));
        assert_eq!(config.default_namespace, "toolchain-host-operator");
        assert_eq!(
            config.auth_info.token.as_ref().unwrap().expose_secret(),
            "cool-token"
        );
        assert!(!config.accept_invalid_certs);
    }

    #[test]
    fn timeout_is_applied_to_the_transport() {
        let options = ClientOptions {
            timeout: Duration::from_secs(5),
            insecure_skip_tls_verify: false,
        };
        let config = build_config(&cluster("https://api.host.example.com:6443"), &options).unwrap();
        assert_eq!(config.connect_timeout, Some(Duration::from_secs(5)));
        assert_eq!(config.read_timeout, Some(Duration::from_secs(5)));
        assert_eq!(config.write_timeout, Some(Duration::from_secs(5)));
    }

    #[test]
    fn insecure_tls_only_when_asked_for() {
        let options = ClientOptions {
            timeout: Duration::from_secs(1),
            insecure_skip_tls_verify: true,
        };
        let config = build_config(&cluster("https://api.host.example.com:6443"), &options).unwrap();
        assert!(config.accept_invalid_certs);
    }

    #[test]
    fn invalid_server_url_is_rejected() {
        let err = build_config(&cluster("not a url"), &ClientOptions::default()).unwrap_err();
        assert!(matches!(err, Error::InvalidServerUrl { .. }));
    }
}
