//! Access to the container runtime.
//!
//! The plugin only ever needs one capability from the runtime: listing every
//! container together with its lifecycle state and status text. That
//! capability is the [`ContainerLister`] trait; [`DockerClient`] implements it
//! against the Docker Engine API.
mod connector;
mod docker;

use std::path::PathBuf;

pub use connector::{Connection, Connector};
pub use docker::DockerClient;

use crate::container::ContainerSnapshot;

/// Lists all containers known to a runtime, including stopped ones.
pub trait ContainerLister {
    fn list_containers(&self) -> impl Future<Output = Result<Vec<ContainerSnapshot>>> + Send;
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to connect to socket `{path}`: {source}")]
    SocketConnect {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to connect to `{authority}`: {source}")]
    TcpConnect {
        authority: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to build request: {0}")]
    BuildRequest(#[source] http::Error),
    #[error("HTTP handshake failed: {0}")]
    Handshake(#[source] hyper::Error),
    #[error("failed to send request: {0}")]
    Request(#[source] hyper::Error),
    #[error("failed to read response body: {0}")]
    Body(#[source] hyper::Error),
    #[error("unexpected response status {status}: {body}")]
    UnexpectedStatus {
        status: hyper::StatusCode,
        body: String,
    },
    #[error("failed to decode container list: {0}")]
    Decode(#[source] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
