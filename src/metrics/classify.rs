use crate::container::ContainerSnapshot;

use super::{Error, HealthStatus, MetricBucket, Result};

/// Classifies a single container into exactly one bucket.
///
/// # Errors
///
/// Returns [`Error::UnknownState`] if the lifecycle state is neither a known
/// non-running state nor `running`.
pub fn classify(container: &ContainerSnapshot) -> Result<MetricBucket> {
    if let Some(bucket) = MetricBucket::from_lifecycle_state(container.state()) {
        return Ok(bucket);
    }

    if !container.is_running() {
        return Err(Error::UnknownState {
            state: container.state().to_owned(),
        });
    }

    let health = HealthStatus::from_status(container.status());
    Ok(MetricBucket::from_health(health))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_lifecycle_states_verbatim() {
        for bucket in MetricBucket::LIFECYCLE {
            let container = ContainerSnapshot::new(bucket.as_str(), "");
            assert_eq!(classify(&container).unwrap(), bucket);
        }
    }

    #[test]
    fn test_classify_ignores_status_of_non_running_containers() {
        let container = ContainerSnapshot::new("exited", "Exited (1) 3 minutes ago (unhealthy)");
        assert_eq!(classify(&container).unwrap(), MetricBucket::Exited);
    }

    #[test]
    fn test_classify_running_by_health() {
        let cases = [
            ("", MetricBucket::Running),
            ("Up 2 hours", MetricBucket::Running),
            ("Up 16 minutes (health: starting)", MetricBucket::RunningStarting),
            ("Up 15 minutes (healthy)", MetricBucket::RunningHealthy),
            ("Up 15 minutes (unhealthy)", MetricBucket::RunningUnhealthy),
        ];
        for (status, want) in cases {
            let container = ContainerSnapshot::new("running", status);
            assert_eq!(classify(&container).unwrap(), want, "status={status:?}");
        }
    }

    #[test]
    fn test_classify_unknown_state() {
        for state in ["zombie", "", "Running", "running_healthy", "removing"] {
            let err = classify(&ContainerSnapshot::new(state, "")).unwrap_err();
            match err {
                Error::UnknownState { state: got } => assert_eq!(got, state),
                other => panic!("unexpected error: {other}"),
            }
        }
    }
}
