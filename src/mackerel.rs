//! Output side of the Mackerel agent plugin protocol.
//!
//! The agent runs the plugin on its own schedule and reads stdout. In the
//! default mode every metric becomes one `key\tvalue\ttimestamp` line. With
//! `MACKEREL_AGENT_PLUGIN_META` set, the agent instead asks for the graph
//! definitions, which are printed as a JSON document behind a marker line.
use std::collections::BTreeMap;
use std::ffi::OsStr;
use std::fmt::Write as _;
use std::io::Write;
use std::time::{SystemTime, SystemTimeError, UNIX_EPOCH};

use crate::graph::GraphDefinition;
use crate::metrics::MetricSet;
use crate::plugin::{self, DockerStatePlugin};
use crate::runtime::ContainerLister;

/// Environment variable the agent sets when it requests graph definitions.
pub const META_ENV: &str = "MACKEREL_AGENT_PLUGIN_META";

const META_HEADER: &str = "# mackerel-agent-plugin";

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Fetch(#[from] plugin::Error),
    #[error("failed to write plugin output: {0}")]
    Write(#[source] std::io::Error),
    #[error("failed to serialize graph definitions: {0}")]
    Serialize(#[source] serde_json::Error),
    #[error("system clock is before the unix epoch: {0}")]
    Clock(#[source] SystemTimeError),
}

pub type Result<T> = std::result::Result<T, Error>;

/// What the agent asked the plugin for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Current metric values.
    Values,
    /// Graph definitions.
    Definitions,
}

impl Mode {
    /// Reads the mode from `MACKEREL_AGENT_PLUGIN_META`.
    pub fn from_env() -> Self {
        Self::from_meta_var(std::env::var_os(META_ENV).as_deref())
    }

    /// Any non-empty value asks for graph definitions.
    pub fn from_meta_var(value: Option<&OsStr>) -> Self {
        match value {
            Some(value) if !value.is_empty() => Self::Definitions,
            _ => Self::Values,
        }
    }
}

#[derive(serde::Serialize)]
struct Meta<'a> {
    graphs: BTreeMap<String, &'a GraphDefinition>,
}

/// Key of a graph, i.e. `<prefix>.<graph>`, or just `<graph>` without prefix.
pub fn graph_key(metric_prefix: &str, graph_name: &str) -> String {
    if metric_prefix.is_empty() {
        graph_name.to_owned()
    } else {
        format!("{metric_prefix}.{graph_name}")
    }
}

/// Formats one line per series of `graph` that has a value in `metrics`.
///
/// Lines follow the series order of the graph. Series without a value are
/// skipped.
pub fn format_values(
    metric_prefix: &str,
    graph: &GraphDefinition,
    metrics: &MetricSet,
    timestamp: u64,
) -> String {
    let key = graph_key(metric_prefix, graph.name);
    let mut out = String::new();
    for series in &graph.series {
        if let Some(value) = metrics.get(series.name) {
            writeln!(out, "{key}.{}\t{value:.6}\t{timestamp}", series.name)
                .expect("write!() into String to never fail");
        }
    }
    out
}

/// Formats the graph definition document.
///
/// # Errors
///
/// Returns [`Error::Serialize`] if the definitions cannot be encoded.
pub fn format_definitions(metric_prefix: &str, graph: &GraphDefinition) -> Result<String> {
    let meta = Meta {
        graphs: BTreeMap::from([(graph_key(metric_prefix, graph.name), graph)]),
    };
    let json = serde_json::to_string(&meta).map_err(Error::Serialize)?;

    Ok(format!("{META_HEADER}\n{json}\n"))
}

/// Answers a single agent invocation.
///
/// Output is written in one piece once it is complete. If fetching the metrics
/// fails, nothing is written and the error is returned.
pub async fn run<L, W>(plugin: &DockerStatePlugin<L>, mode: Mode, mut out: W) -> Result<()>
where
    L: ContainerLister,
    W: Write,
{
    let prefix = plugin.metric_key_prefix();
    let graph = plugin.graph_definition();
    let output = match mode {
        Mode::Definitions => format_definitions(prefix, &graph)?,
        Mode::Values => {
            let metrics = plugin.fetch_metrics().await.inspect_err(|err| {
                log::error!("failed to fetch metrics: {err}");
            })?;
            let timestamp = SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map_err(Error::Clock)?
                .as_secs();
            format_values(prefix, &graph, &metrics, timestamp)
        }
    };

    out.write_all(output.as_bytes()).map_err(Error::Write)?;
    out.flush().map_err(Error::Write)
}
