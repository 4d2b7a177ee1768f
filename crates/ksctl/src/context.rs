//! Per-invocation command context.
//!
//! Bundles the interactive session, the loaded configuration and the
//! client factory, and is passed by mutable reference into every command
//! body. Created at command entry, dropped at command exit; never shared
//! across tasks.

use kube::Client;

use crate::client::ClientFactory;
use crate::cluster::{self, ClusterConfig};
use crate::config::{ClusterType, KsctlConfig};
use crate::term::Terminal;
use crate::{Error, Result};

pub struct CommandContext {
    pub term: Terminal,
    config: KsctlConfig,
    factory: Box<dyn ClientFactory>,
}

impl CommandContext {
    pub fn new(term: Terminal, config: KsctlConfig, factory: Box<dyn ClientFactory>) -> Self {
        Self {
            term,
            config,
            factory,
        }
    }

    /// The acting operator's name, recorded in audit labels.
    pub fn identity(&self) -> &str {
        &self.config.name
    }

    /// Resolve a cluster name against the loaded configuration.
    pub fn resolve(
        &self,
        name: &str,
        expected_kind: Option<ClusterType>,
    ) -> Result<ClusterConfig> {
        cluster::resolve(&self.config, name, expected_kind)
    }

    /// Resolve and connect in one step.
    ///
    /// Resolution failures (unknown name, kind mismatch, missing token)
    /// return before the factory is ever invoked, so an unauthenticated
    /// call can never be attempted.
    pub async fn client_for(
        &self,
        name: &str,
        expected_kind: Option<ClusterType>,
    ) -> Result<(ClusterConfig, Client)> {
        let cluster = self.resolve(name, expected_kind)?;
        let client = self.factory.client(&cluster).await?;
        Ok((cluster, client))
    }

    /// Name of the single host cluster in the configuration.
    pub fn host_cluster_name(&self) -> Result<String> {
        let mut hosts = self
            .config
            .cluster_access_definitions
            .iter()
            .filter(|(_, definition)| definition.cluster_type == ClusterType::Host);

        let (name, _) = hosts
            .next()
            .ok_or_else(|| Error::validation("no host cluster defined in your ksctl.yaml file"))?;

        if hosts.next().is_some() {
            return Err(Error::validation(
                "more than one host cluster defined in your ksctl.yaml file",
            ));
        }

        Ok(name.clone())
    }

    /// Connect to the host cluster, where the tenant records live.
    pub async fn host_client(&self) -> Result<(ClusterConfig, Client)> {
        let name = self.host_cluster_name()?;
        self.client_for(&name, Some(ClusterType::Host)).await
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use async_trait::async_trait;

    use super::*;

    /// A factory that fails the test if any resolution guard lets a
    /// request through to client construction.
    pub(crate) struct RefusingFactory;

    #[async_trait]
    impl ClientFactory for RefusingFactory {
        async fn client(&self, cluster: &ClusterConfig) -> Result<Client> {
            panic!(
                "client factory invoked for cluster '{}' although resolution should have failed",
                cluster.name
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::test_support::RefusingFactory;
    use super::*;
    use crate::config::ClusterAccessDefinition;

    fn definition(cluster_type: ClusterType, token: Option<&str>) -> ClusterAccessDefinition {
        ClusterAccessDefinition {
            server_api: "https://api.example.com:6443".to_string(),
            server_name: "example.com".to_string(),
            token: token.map(String::from),
            cluster_type,
            operator_namespace: None,
            sandbox_namespace: None,
        }
    }

    fn context(clusters: BTreeMap<String, ClusterAccessDefinition>) -> CommandContext {
        let (term, _) = Terminal::test("");
        CommandContext::new(
            term,
            KsctlConfig {
                name: "john.admin".to_string(),
                cluster_access_definitions: clusters,
            },
            Box::new(RefusingFactory),
        )
    }

    #[tokio::test]
    async fn missing_token_never_reaches_the_factory() {
        let mut clusters = BTreeMap::new();
        clusters.insert("host".to_string(), definition(ClusterType::Host, None));
        let ctx = context(clusters);

        // RefusingFactory panics if invoked; reaching the assertion proves
        // the guard fired first.
        let err = ctx.client_for("host", None).await.err().unwrap();
        assert!(matches!(err, Error::MissingToken { .. }));
    }

    #[tokio::test]
    async fn unknown_cluster_never_reaches_the_factory() {
        let ctx = context(BTreeMap::new());
        let err = ctx.client_for("ghost", None).await.err().unwrap();
        assert!(matches!(err, Error::ClusterNotFound { .. }));
    }

    #[test]
    fn host_cluster_name_requires_exactly_one_host() {
        let mut clusters = BTreeMap::new();
        clusters.insert(
            "member-1".to_string(),
            definition(ClusterType::Member, Some("t")),
        );
        let err = context(clusters.clone()).host_cluster_name().unwrap_err();
        assert!(err.to_string().contains("no host cluster"));

        clusters.insert("host-a".to_string(), definition(ClusterType::Host, Some("t")));
        clusters.insert("host-b".to_string(), definition(ClusterType::Host, Some("t")));
        let err = context(clusters).host_cluster_name().unwrap_err();
        assert!(err.to_string().contains("more than one host cluster"));
    }

    #[test]
    fn host_cluster_name_finds_the_host() {
        let mut clusters = BTreeMap::new();
        clusters.insert("host".to_string(), definition(ClusterType::Host, Some("t")));
        clusters.insert(
            "member-1".to_string(),
            definition(ClusterType::Member, Some("t")),
        );
        assert_eq!(context(clusters).host_cluster_name().unwrap(), "host");
    }
}
