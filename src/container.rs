use std::fmt;

/// The lifecycle state reported by the runtime for running containers.
pub const STATE_RUNNING: &str = "running";

/// Point-in-time view of a single container as reported by the runtime API.
///
/// Only the two fields the classifier needs are kept. Every other field of the
/// runtime's listing response is dropped during decoding.
///
/// # Examples
///
/// ```
/// # use docker_state_plugin::container::ContainerSnapshot;
/// let snapshot = ContainerSnapshot::new("running", "Up 3 hours (healthy)");
/// assert!(snapshot.is_running());
/// assert_eq!(snapshot.status(), "Up 3 hours (healthy)");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Deserialize)]
pub struct ContainerSnapshot {
    #[serde(rename = "State", default)]
    state: String,
    #[serde(rename = "Status", default)]
    status: String,
}

impl ContainerSnapshot {
    pub fn new(state: impl Into<String>, status: impl Into<String>) -> Self {
        Self {
            state: state.into(),
            status: status.into(),
        }
    }

    /// Coarse lifecycle label, e.g. `running` or `exited`.
    pub fn state(&self) -> &str {
        &self.state
    }

    /// Free-form human readable status, e.g. `Up 16 minutes (health: starting)`.
    pub fn status(&self) -> &str {
        &self.status
    }

    pub fn is_running(&self) -> bool {
        self.state == STATE_RUNNING
    }
}

impl fmt::Display for ContainerSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "state={}, status={:?}", self.state, self.status)
    }
}
