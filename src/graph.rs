//! Static shape of the graph the plugin reports to.

use crate::metrics::{METRIC_FAILING, METRIC_TOTAL, MetricBucket};

/// Name of the single graph exposed by the plugin.
pub const GRAPH_NAME: &str = "statuses";

/// Unit of the values of a graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Unit {
    Integer,
}

/// One series of a graph.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct SeriesDefinition {
    pub name: &'static str,
    pub label: &'static str,
    /// Whether the series stacks on top of its stacked siblings.
    pub stacked: bool,
}

impl SeriesDefinition {
    const fn stacked(name: &'static str, label: &'static str) -> Self {
        Self {
            name,
            label,
            stacked: true,
        }
    }

    const fn overlay(name: &'static str, label: &'static str) -> Self {
        Self {
            name,
            label,
            stacked: false,
        }
    }
}

/// Series in display order. Every bucket stacks, the rollups are overlays.
const SERIES: [SeriesDefinition; 11] = [
    SeriesDefinition::stacked(MetricBucket::Created.as_str(), "Created"),
    SeriesDefinition::stacked(MetricBucket::Running.as_str(), "Running"),
    SeriesDefinition::stacked(
        MetricBucket::RunningStarting.as_str(),
        "Running (Health: starting)",
    ),
    SeriesDefinition::stacked(
        MetricBucket::RunningUnhealthy.as_str(),
        "Running (Health: unhealthy)",
    ),
    SeriesDefinition::stacked(
        MetricBucket::RunningHealthy.as_str(),
        "Running (Health: healthy)",
    ),
    SeriesDefinition::stacked(MetricBucket::Restarting.as_str(), "Restarting"),
    SeriesDefinition::stacked(MetricBucket::Exited.as_str(), "Exited"),
    SeriesDefinition::stacked(MetricBucket::Paused.as_str(), "Paused"),
    SeriesDefinition::stacked(MetricBucket::Dead.as_str(), "Dead"),
    SeriesDefinition::overlay(METRIC_TOTAL, "Total"),
    SeriesDefinition::overlay(METRIC_FAILING, "Failing"),
];

/// Declared shape of a graph: label, unit and ordered series.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct GraphDefinition {
    #[serde(skip)]
    pub name: &'static str,
    pub label: String,
    pub unit: Unit,
    #[serde(rename = "metrics")]
    pub series: Vec<SeriesDefinition>,
}

impl GraphDefinition {
    /// Builds the container status graph for the given metric prefix.
    ///
    /// The result depends on nothing but the prefix. An empty prefix keeps the
    /// separating space, so the label reads ` Container Statuses`.
    pub fn container_statuses(metric_prefix: &str) -> Self {
        Self {
            name: GRAPH_NAME,
            label: format!("{metric_prefix} Container Statuses"),
            unit: Unit::Integer,
            series: SERIES.to_vec(),
        }
    }
}
