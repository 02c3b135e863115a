use http_body_util::{BodyExt, Empty};
use hyper::body::Bytes;
use hyper::header;
use tower::ServiceExt;

use super::{ContainerLister, Error, Result, connector::Connector};
use crate::config::Endpoint;
use crate::container::ContainerSnapshot;

/// Lists all containers, including stopped ones.
const LIST_CONTAINERS_PATH: &str = "/containers/json?all=1";

/// Minimal Docker Engine API client.
///
/// Every request uses a fresh HTTP/1.1 connection; the plugin issues a single
/// request per invocation.
#[derive(Debug, Clone)]
pub struct DockerClient {
    connector: Connector,
}

impl DockerClient {
    pub fn new(endpoint: Endpoint) -> Self {
        Self {
            connector: Connector::new(endpoint),
        }
    }

    pub fn endpoint(&self) -> &Endpoint {
        self.connector.endpoint()
    }

    async fn get(&self, path_and_query: &'static str) -> Result<Bytes> {
        let uri = hyper::Uri::from_static(path_and_query);
        let io = self.connector.clone().oneshot(uri.clone()).await?;

        let (mut sender, connection) = hyper::client::conn::http1::handshake(io)
            .await
            .map_err(Error::Handshake)?;
        tokio::spawn(async move {
            if let Err(err) = connection.await {
                log::debug!("Connection to container runtime closed with error: {err}");
            }
        });

        let request = hyper::Request::get(uri)
            .header(header::HOST, "docker")
            .header(header::ACCEPT, "application/json")
            .body(Empty::<Bytes>::new())
            .map_err(Error::BuildRequest)?;
        log::debug!("GET {path_and_query} on {}", self.endpoint());

        let response = sender.send_request(request).await.map_err(Error::Request)?;
        let status = response.status();
        let body = response
            .into_body()
            .collect()
            .await
            .map_err(Error::Body)?
            .to_bytes();
        log::trace!("Received {status} with {} bytes", body.len());

        if !status.is_success() {
            return Err(Error::UnexpectedStatus {
                status,
                body: String::from_utf8_lossy(&body).trim().to_owned(),
            });
        }

        Ok(body)
    }
}

impl ContainerLister for DockerClient {
    async fn list_containers(&self) -> Result<Vec<ContainerSnapshot>> {
        let body = self.get(LIST_CONTAINERS_PATH).await?;
        let containers: Vec<ContainerSnapshot> =
            serde_json::from_slice(&body).map_err(Error::Decode)?;
        log::debug!("Found {} containers", containers.len());

        Ok(containers)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::path::PathBuf;

    use axum::extract::Query;
    use axum::http::StatusCode;
    use axum::response::{IntoResponse, Response};
    use axum::routing::get;

    use super::*;

    const LISTING: &str = r#"[
        {
            "Id": "8dfafdbc3a40",
            "Names": ["/web"],
            "Image": "nginx:latest",
            "State": "running",
            "Status": "Up 16 minutes (health: starting)",
            "Labels": {"com.example.vendor": "Acme"}
        },
        {
            "Id": "9cd87474be90",
            "Names": ["/db"],
            "Image": "postgres:16",
            "State": "dead",
            "Status": ""
        },
        {
            "Id": "3176a2479c92",
            "Names": ["/job"],
            "Image": "busybox",
            "State": "exited",
            "Status": "Exited (0) 2 hours ago"
        }
    ]"#;

    async fn list_all(Query(params): Query<HashMap<String, String>>) -> Response {
        if params.get("all").map(String::as_str) != Some("1") {
            return (StatusCode::BAD_REQUEST, "expected all=1").into_response();
        }
        ([(header::CONTENT_TYPE, "application/json")], LISTING).into_response()
    }

    fn fake_docker(listing: axum::routing::MethodRouter) -> axum::Router {
        axum::Router::new().route("/containers/json", listing)
    }

    async fn serve_unix(router: axum::Router) -> (tempfile::TempDir, PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("docker.sock");
        let listener = tokio::net::UnixListener::bind(&path).unwrap();
        tokio::spawn(async move { axum::serve(listener, router).await.unwrap() });
        (dir, path)
    }

    async fn serve_tcp(router: axum::Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let authority = listener.local_addr().unwrap().to_string();
        tokio::spawn(async move { axum::serve(listener, router).await.unwrap() });
        authority
    }

    fn want_listing() -> Vec<ContainerSnapshot> {
        vec![
            ContainerSnapshot::new("running", "Up 16 minutes (health: starting)"),
            ContainerSnapshot::new("dead", ""),
            ContainerSnapshot::new("exited", "Exited (0) 2 hours ago"),
        ]
    }

    #[tokio::test]
    async fn test_list_containers_over_unix_socket() {
        let (_dir, path) = serve_unix(fake_docker(get(list_all))).await;
        let client = DockerClient::new(Endpoint::Unix(path));

        let containers = client.list_containers().await.unwrap();
        assert_eq!(containers, want_listing());
    }

    #[tokio::test]
    async fn test_list_containers_over_tcp() {
        let authority = serve_tcp(fake_docker(get(list_all))).await;
        let client = DockerClient::new(format!("tcp://{authority}").parse().unwrap());

        let containers = client.list_containers().await.unwrap();
        assert_eq!(containers, want_listing());
    }

    #[tokio::test]
    async fn test_list_containers_empty() {
        let router = fake_docker(get(|| async { "[]" }));
        let (_dir, path) = serve_unix(router).await;
        let client = DockerClient::new(Endpoint::Unix(path));

        assert!(client.list_containers().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_list_containers_unexpected_status() {
        let router = fake_docker(get(|| async {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                r#"{"message":"daemon is shutting down"}"#,
            )
        }));
        let (_dir, path) = serve_unix(router).await;
        let client = DockerClient::new(Endpoint::Unix(path));

        let err = client.list_containers().await.unwrap_err();
        match err {
            Error::UnexpectedStatus { status, body } => {
                assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
                assert!(body.contains("daemon is shutting down"), "{body}");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn test_list_containers_invalid_body() {
        let router = fake_docker(get(|| async { r#"{"message":"not a list"}"# }));
        let (_dir, path) = serve_unix(router).await;
        let client = DockerClient::new(Endpoint::Unix(path));

        let err = client.list_containers().await.unwrap_err();
        assert!(matches!(err, Error::Decode(_)), "{err}");
    }

    #[tokio::test]
    async fn test_list_containers_missing_socket() {
        let dir = tempfile::tempdir().unwrap();
        let client = DockerClient::new(Endpoint::Unix(dir.path().join("docker.sock")));

        let err = client.list_containers().await.unwrap_err();
        assert!(matches!(err, Error::SocketConnect { .. }), "{err}");
    }
}
