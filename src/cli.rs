use std::ffi::OsString;

use clap::{ArgAction, Parser};

use crate::config::{self, DEFAULT_HOST, PluginConfig};

/// Buckets counted as failing unless configured otherwise.
pub const DEFAULT_FAILING_STATES: &str = "dead,exited,paused,running_unhealthy";

/// Long flags that existing agent configurations pass with a single dash.
const LONG_FLAGS: [&str; 5] = [
    "host",
    "metric-key-prefix",
    "enable-total",
    "enable-failing",
    "failing-states",
];

/// Rewrites single-dash long flags such as `-host=...` into `--host=...`.
///
/// Every other argument, including `-h` and `-V`, is passed through unchanged.
pub fn normalize_flags<I, T>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    args.into_iter()
        .map(Into::into)
        .map(|arg| {
            let single_dash_long = arg
                .to_str()
                .and_then(|s| s.strip_prefix('-'))
                .filter(|flag| !flag.starts_with('-'))
                .is_some_and(|flag| {
                    let name = flag.split_once('=').map_or(flag, |(name, _)| name);
                    LONG_FLAGS.contains(&name)
                });
            if single_dash_long {
                let mut long = OsString::from("-");
                long.push(&arg);
                long
            } else {
                arg
            }
        })
        .collect()
}

#[derive(Debug, Parser)]
#[command(name = "docker-state-plugin")]
#[command(about = "Mackerel plugin counting Docker containers per state")]
#[command(version = env!("CARGO_PKG_VERSION"))]
pub struct Args {
    /// Docker Engine API endpoint
    #[arg(long, value_name = "URL", env = "DOCKER_HOST", default_value = DEFAULT_HOST)]
    pub host: String,

    /// Metric key prefix
    #[arg(long, value_name = "PREFIX", default_value = "docker")]
    pub metric_key_prefix: String,

    /// Output the total count of containers
    #[arg(
        long,
        value_name = "BOOL",
        action = ArgAction::Set,
        num_args = 0..=1,
        require_equals = true,
        default_value_t = true,
        default_missing_value = "true"
    )]
    pub enable_total: bool,

    /// Output the count of containers in a failing state
    #[arg(
        long,
        value_name = "BOOL",
        action = ArgAction::Set,
        num_args = 0..=1,
        require_equals = true,
        default_value_t = true,
        default_missing_value = "true"
    )]
    pub enable_failing: bool,

    /// States treated as failing (comma separated)
    #[arg(long, value_name = "STATES", default_value = DEFAULT_FAILING_STATES)]
    pub failing_states: String,
}

impl Args {
    /// Parses the process arguments, accepting single-dash long flags too.
    pub fn parse_args() -> Self {
        Self::parse_from(normalize_flags(std::env::args_os()))
    }

    /// Validates the flags into a [`PluginConfig`].
    pub fn into_config(self) -> config::Result<PluginConfig> {
        PluginConfig::new(
            &self.host,
            self.metric_key_prefix,
            self.enable_total,
            self.enable_failing,
            &self.failing_states,
        )
    }
}
