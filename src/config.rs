use std::collections::BTreeSet;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use crate::metrics::{self, MetricBucket};

/// Default Docker Engine API endpoint.
pub const DEFAULT_HOST: &str = "unix:///var/run/docker.sock";

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid failing state `{name}`: {source}")]
    FailingState {
        name: String,
        #[source]
        source: metrics::Error,
    },
    #[error("invalid container runtime endpoint `{endpoint}`: {reason}")]
    InvalidEndpoint {
        endpoint: String,
        reason: &'static str,
    },
}

pub type Result<T> = std::result::Result<T, Error>;

/// Address of the container runtime API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Endpoint {
    /// A unix domain socket, e.g. `/var/run/docker.sock`.
    Unix(PathBuf),
    /// A plain TCP `host:port` authority.
    Tcp { authority: String },
}

impl FromStr for Endpoint {
    type Err = Error;

    /// Parses a Docker style host string.
    ///
    /// Accepted forms are `unix://<path>`, `tcp://<host:port>` and
    /// `http://<host:port>`. A unix path without a leading `/` is treated as
    /// absolute, so `unix://var/run/docker.sock` is accepted as well.
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let invalid = |reason| Error::InvalidEndpoint {
            endpoint: s.to_owned(),
            reason,
        };
        let (scheme, address) = s
            .split_once("://")
            .ok_or_else(|| invalid("missing scheme, expected `unix://` or `tcp://`"))?;
        let address = address.trim_end_matches('/');
        if address.is_empty() {
            return Err(invalid("empty address"));
        }

        match scheme {
            "unix" => {
                let path = if address.starts_with('/') {
                    PathBuf::from(address)
                } else {
                    PathBuf::from(format!("/{address}"))
                };
                Ok(Self::Unix(path))
            }
            "tcp" | "http" => {
                if address.contains('/') {
                    return Err(invalid("tcp endpoints must not contain a path"));
                }
                Ok(Self::Tcp {
                    authority: address.to_owned(),
                })
            }
            _ => Err(invalid("unsupported scheme, expected `unix://` or `tcp://`")),
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Endpoint::Unix(path) => write!(f, "unix://{}", path.display()),
            Endpoint::Tcp { authority } => write!(f, "tcp://{authority}"),
        }
    }
}

/// Buckets whose containers also count towards the `failing` metric.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FailingStatusSet(BTreeSet<MetricBucket>);

impl FailingStatusSet {
    /// Validates every name against the bucket vocabulary.
    ///
    /// # Errors
    ///
    /// Returns [`Error::FailingState`] for the first name that is not a bucket.
    pub fn from_names<I, S>(names: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut buckets = BTreeSet::new();
        for name in names {
            let name = name.as_ref();
            let bucket = name
                .parse::<MetricBucket>()
                .map_err(|source| Error::FailingState {
                    name: name.to_owned(),
                    source,
                })?;
            buckets.insert(bucket);
        }

        Ok(Self(buckets))
    }

    pub fn contains(&self, bucket: MetricBucket) -> bool {
        self.0.contains(&bucket)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = MetricBucket> + '_ {
        self.0.iter().copied()
    }
}

impl FromStr for FailingStatusSet {
    type Err = Error;

    /// Parses a comma separated list such as `dead,exited,running_unhealthy`.
    ///
    /// Surrounding whitespace is trimmed and empty entries are skipped, so an
    /// empty string yields an empty set.
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Self::from_names(s.split(',').map(str::trim).filter(|name| !name.is_empty()))
    }
}

impl FromIterator<MetricBucket> for FailingStatusSet {
    fn from_iter<T: IntoIterator<Item = MetricBucket>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Validated plugin configuration.
#[derive(Debug, Clone)]
pub struct PluginConfig {
    endpoint: Endpoint,
    metric_prefix: String,
    enable_total: bool,
    enable_failing: bool,
    failing_buckets: FailingStatusSet,
}

impl PluginConfig {
    /// Builds a configuration from raw bootstrap values.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidEndpoint`] if `host` is not a supported endpoint.
    /// - [`Error::FailingState`] if any failing state is not a known bucket.
    pub fn new(
        host: &str,
        metric_prefix: impl Into<String>,
        enable_total: bool,
        enable_failing: bool,
        failing_states: &str,
    ) -> Result<Self> {
        Ok(Self {
            endpoint: host.parse()?,
            metric_prefix: metric_prefix.into(),
            enable_total,
            enable_failing,
            failing_buckets: failing_states.parse()?,
        })
    }

    /// Configuration without the `total` and `failing` rollups.
    pub fn without_rollups(endpoint: Endpoint, metric_prefix: impl Into<String>) -> Self {
        Self {
            endpoint,
            metric_prefix: metric_prefix.into(),
            enable_total: false,
            enable_failing: false,
            failing_buckets: FailingStatusSet::default(),
        }
    }

    pub fn with_total(mut self, enable: bool) -> Self {
        self.enable_total = enable;
        self
    }

    pub fn with_failing(mut self, buckets: FailingStatusSet) -> Self {
        self.enable_failing = true;
        self.failing_buckets = buckets;
        self
    }

    pub fn endpoint(&self) -> &Endpoint {
        &self.endpoint
    }

    pub fn metric_prefix(&self) -> &str {
        &self.metric_prefix
    }

    pub fn enable_total(&self) -> bool {
        self.enable_total
    }

    pub fn enable_failing(&self) -> bool {
        self.enable_failing
    }

    pub fn failing_buckets(&self) -> &FailingStatusSet {
        &self.failing_buckets
    }

    /// Whether a container in `bucket` also counts as failing.
    pub fn is_failing(&self, bucket: MetricBucket) -> bool {
        self.enable_failing && self.failing_buckets.contains(bucket)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_unix() {
        assert_eq!(
            DEFAULT_HOST.parse::<Endpoint>().unwrap(),
            Endpoint::Unix(PathBuf::from("/var/run/docker.sock"))
        );
        assert_eq!(
            "unix://var/run/docker.sock".parse::<Endpoint>().unwrap(),
            Endpoint::Unix(PathBuf::from("/var/run/docker.sock"))
        );
    }

    #[test]
    fn test_endpoint_tcp() {
        let want = Endpoint::Tcp {
            authority: "127.0.0.1:2375".to_owned(),
        };
        assert_eq!("tcp://127.0.0.1:2375".parse::<Endpoint>().unwrap(), want);
        assert_eq!("http://127.0.0.1:2375/".parse::<Endpoint>().unwrap(), want);
        assert_eq!(want.to_string(), "tcp://127.0.0.1:2375");
    }

    #[test]
    fn test_endpoint_invalid() {
        for host in [
            "",
            "/var/run/docker.sock",
            "unix://",
            "tcp://",
            "https://127.0.0.1:2376",
            "npipe:////./pipe/docker_engine",
            "tcp://127.0.0.1:2375/v1.45",
        ] {
            let err = host.parse::<Endpoint>().unwrap_err();
            assert!(
                matches!(err, Error::InvalidEndpoint { ref endpoint, .. } if endpoint == host),
                "unexpected error for {host:?}: {err}"
            );
        }
    }

    #[test]
    fn test_failing_set_from_str() {
        let set: FailingStatusSet = "dead,exited,paused,running_unhealthy".parse().unwrap();
        assert_eq!(
            set.iter().collect::<Vec<_>>(),
            vec![
                MetricBucket::Exited,
                MetricBucket::Paused,
                MetricBucket::Dead,
                MetricBucket::RunningUnhealthy,
            ]
        );
        assert!(set.contains(MetricBucket::Dead));
        assert!(!set.contains(MetricBucket::Running));
    }

    #[test]
    fn test_failing_set_trims_and_skips_empty_entries() {
        let set: FailingStatusSet = " dead , ,running_unhealthy,dead,".parse().unwrap();
        assert_eq!(
            set,
            [MetricBucket::Dead, MetricBucket::RunningUnhealthy]
                .into_iter()
                .collect()
        );

        let set: FailingStatusSet = "".parse().unwrap();
        assert!(set.is_empty());
    }

    #[test]
    fn test_failing_set_rejects_unknown_bucket() {
        let err = "dead,bogus,exited".parse::<FailingStatusSet>().unwrap_err();
        match err {
            Error::FailingState { name, .. } => assert_eq!(name, "bogus"),
            other => panic!("unexpected error: {other}"),
        }

        for name in ["total", "failing", "DEAD"] {
            assert!(FailingStatusSet::from_names([name]).is_err(), "{name}");
        }
    }

    #[test]
    fn test_plugin_config_new() {
        let config = PluginConfig::new(DEFAULT_HOST, "docker", true, false, "dead").unwrap();
        assert_eq!(config.metric_prefix(), "docker");
        assert!(config.enable_total());
        assert!(!config.enable_failing());
        // failing disabled, so nothing counts as failing
        assert!(!config.is_failing(MetricBucket::Dead));
    }

    #[test]
    fn test_plugin_config_new_fails_on_bogus_failing_state() {
        let err = PluginConfig::new(DEFAULT_HOST, "docker", true, true, "bogus").unwrap_err();
        assert!(matches!(err, Error::FailingState { .. }));
    }

    #[test]
    fn test_plugin_config_new_fails_on_invalid_host() {
        let err = PluginConfig::new("ftp://docker", "docker", true, true, "dead").unwrap_err();
        assert!(matches!(err, Error::InvalidEndpoint { .. }));
    }
}
