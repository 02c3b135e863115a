use std::collections::BTreeMap;

use crate::config::PluginConfig;
use crate::container::ContainerSnapshot;

use super::{METRIC_FAILING, METRIC_TOTAL, Result, classify};

/// Container counts keyed by metric name.
///
/// Values are `f64` because that is what the monitoring backend consumes; they
/// always hold whole numbers.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MetricSet(BTreeMap<&'static str, f64>);

impl MetricSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<f64> {
        self.0.get(name).copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    fn seed(&mut self, name: &'static str) {
        self.0.insert(name, 0.0);
    }

    fn increment(&mut self, name: &'static str) {
        *self.0.entry(name).or_insert(0.0) += 1.0;
    }

    fn set(&mut self, name: &'static str, value: f64) {
        self.0.insert(name, value);
    }
}

impl<const N: usize> From<[(&'static str, f64); N]> for MetricSet {
    fn from(entries: [(&'static str, f64); N]) -> Self {
        Self(BTreeMap::from(entries))
    }
}

/// Tallies a container listing into a [`MetricSet`].
///
/// With `total` enabled the result always holds a `total` key equal to the
/// number of containers. With `failing` enabled it always holds a `failing`
/// key counting the containers whose bucket is in the configured failing set.
///
/// # Errors
///
/// Returns [`super::Error::UnknownState`] as soon as one container cannot be
/// classified. No partial metrics are returned in that case.
pub fn aggregate(containers: &[ContainerSnapshot], config: &PluginConfig) -> Result<MetricSet> {
    let mut metrics = MetricSet::new();
    if config.enable_total() {
        metrics.seed(METRIC_TOTAL);
    }
    if config.enable_failing() {
        metrics.seed(METRIC_FAILING);
    }

    for container in containers {
        let bucket = classify(container)?;
        log::trace!("classified container ({container}) as `{bucket}`");

        metrics.increment(bucket.as_str());
        if config.is_failing(bucket) {
            metrics.increment(METRIC_FAILING);
        }
    }

    if config.enable_total() {
        metrics.set(METRIC_TOTAL, containers.len() as f64);
    }

    Ok(metrics)
}
