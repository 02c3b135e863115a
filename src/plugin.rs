use crate::config::PluginConfig;
use crate::graph::GraphDefinition;
use crate::metrics::{self, MetricSet};
use crate::runtime::{self, ContainerLister, DockerClient};

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to list containers: {0}")]
    ListContainers(#[source] runtime::Error),
    #[error(transparent)]
    Classify(#[from] metrics::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

/// Counts containers per lifecycle and health state.
#[derive(Debug)]
pub struct DockerStatePlugin<L> {
    lister: L,
    config: PluginConfig,
}

impl DockerStatePlugin<DockerClient> {
    /// Creates a plugin talking to the Docker Engine API at the configured endpoint.
    pub fn connect(config: PluginConfig) -> Self {
        let client = DockerClient::new(config.endpoint().clone());
        Self::new(client, config)
    }
}

impl<L: ContainerLister> DockerStatePlugin<L> {
    pub fn new(lister: L, config: PluginConfig) -> Self {
        Self { lister, config }
    }

    pub fn metric_key_prefix(&self) -> &str {
        self.config.metric_prefix()
    }

    /// Runs one collection cycle.
    ///
    /// # Errors
    ///
    /// - [`Error::ListContainers`] if the runtime could not be queried.
    /// - [`Error::Classify`] if any container reports an unknown state.
    ///
    /// Either way no metrics are returned for the cycle.
    pub async fn fetch_metrics(&self) -> Result<MetricSet> {
        let containers = self
            .lister
            .list_containers()
            .await
            .map_err(Error::ListContainers)?;

        Ok(metrics::aggregate(&containers, &self.config)?)
    }

    pub fn graph_definition(&self) -> GraphDefinition {
        GraphDefinition::container_statuses(self.config.metric_prefix())
    }
}
