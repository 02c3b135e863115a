/// Status suffix of a running container whose health check is failing.
pub const SUFFIX_UNHEALTHY: &str = "(unhealthy)";
/// Status suffix of a running container whose health check has not yet passed.
pub const SUFFIX_STARTING: &str = "(health: starting)";
/// Status suffix of a running container whose health check passes.
pub const SUFFIX_HEALTHY: &str = "(healthy)";

/// Health check state of a `running` container.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HealthStatus {
    /// No health check configured, or a status text without a known marker.
    Unknown,
    Starting,
    Healthy,
    Unhealthy,
}

impl HealthStatus {
    /// Derives the health state from the status text reported by the runtime.
    ///
    /// Markers are matched as exact, case-sensitive suffixes in the order
    /// unhealthy, starting, healthy. The first match wins.
    ///
    /// # Examples
    ///
    /// ```
    /// # use docker_state_plugin::metrics::HealthStatus;
    /// assert_eq!(HealthStatus::from_status("Up 2 minutes (healthy)"), HealthStatus::Healthy);
    /// assert_eq!(HealthStatus::from_status("Up 2 minutes"), HealthStatus::Unknown);
    /// ```
    pub fn from_status(status: &str) -> Self {
        if status.ends_with(SUFFIX_UNHEALTHY) {
            return Self::Unhealthy;
        }

        if status.ends_with(SUFFIX_STARTING) {
            return Self::Starting;
        }

        if status.ends_with(SUFFIX_HEALTHY) {
            return Self::Healthy;
        }

        Self::Unknown
    }
}
