use std::fmt;
use std::str::FromStr;

use super::{Error, HealthStatus};

/// Name of the synthetic metric counting all listed containers.
pub const METRIC_TOTAL: &str = "total";
/// Name of the synthetic metric counting containers in a failing bucket.
pub const METRIC_FAILING: &str = "failing";

/// A counter a single container is classified into.
///
/// The wire names returned by [`MetricBucket::as_str`] are part of the metric
/// keys and must stay stable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum MetricBucket {
    Created,
    Restarting,
    Exited,
    Paused,
    Dead,
    /// Running without a recognized health check status.
    Running,
    RunningStarting,
    RunningHealthy,
    RunningUnhealthy,
}

impl MetricBucket {
    /// Every bucket a container can be classified into.
    pub const ALL: [Self; 9] = [
        Self::Created,
        Self::Restarting,
        Self::Exited,
        Self::Paused,
        Self::Dead,
        Self::Running,
        Self::RunningStarting,
        Self::RunningHealthy,
        Self::RunningUnhealthy,
    ];

    /// Buckets that correspond one to one to a non-running lifecycle state.
    pub const LIFECYCLE: [Self; 5] = [
        Self::Created,
        Self::Restarting,
        Self::Exited,
        Self::Paused,
        Self::Dead,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Created => "created",
            Self::Restarting => "restarting",
            Self::Exited => "exited",
            Self::Paused => "paused",
            Self::Dead => "dead",
            Self::Running => "running",
            Self::RunningStarting => "running_starting",
            Self::RunningHealthy => "running_healthy",
            Self::RunningUnhealthy => "running_unhealthy",
        }
    }

    /// Maps a non-running lifecycle state to its bucket.
    ///
    /// Returns `None` for `running` and for any state outside the vocabulary.
    pub fn from_lifecycle_state(state: &str) -> Option<Self> {
        Self::LIFECYCLE
            .into_iter()
            .find(|bucket| bucket.as_str() == state)
    }

    /// Maps the health state of a running container to its bucket.
    pub const fn from_health(health: HealthStatus) -> Self {
        match health {
            HealthStatus::Unknown => Self::Running,
            HealthStatus::Starting => Self::RunningStarting,
            HealthStatus::Healthy => Self::RunningHealthy,
            HealthStatus::Unhealthy => Self::RunningUnhealthy,
        }
    }
}

impl FromStr for MetricBucket {
    type Err = Error;

    /// Parses a bucket from its wire name.
    ///
    /// The synthetic `total` and `failing` metrics are not buckets and are
    /// rejected like any other unknown name.
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|bucket| bucket.as_str() == s)
            .ok_or_else(|| Error::UnknownBucket { name: s.to_owned() })
    }
}

impl fmt::Display for MetricBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
