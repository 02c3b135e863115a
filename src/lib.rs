//! Docker State Plugin: a Mackerel agent plugin that counts Docker containers
//! per lifecycle and health state.
//!
//! Each invocation lists all containers through the Docker Engine API,
//! classifies every container into exactly one bucket, and prints the counts
//! (or, on request, the graph definitions) in the Mackerel plugin format.
pub mod cli;
pub mod config;
pub mod container;
pub mod graph;
pub mod mackerel;
pub mod metrics;
pub mod plugin;
pub mod runtime;

/// Runs the plugin once.
///
/// Validates the configuration, then answers the agent in the mode selected by
/// the environment (see [`mackerel::Mode::from_env`]) on stdout.
///
/// # Errors
///
/// Possible errors include:
/// - An unknown failing state or an unsupported host in the arguments.
/// - Failure to list containers through the Docker Engine API.
/// - A container in a lifecycle state outside the known vocabulary.
/// - Failure to write to stdout.
pub async fn run(args: cli::Args) -> Result<(), Box<dyn std::error::Error>> {
    let config = args.into_config()?;
    log::debug!(
        "Endpoint: {}, prefix: `{}`, total: {}, failing: {} {:?}",
        config.endpoint(),
        config.metric_prefix(),
        config.enable_total(),
        config.enable_failing(),
        config
            .failing_buckets()
            .iter()
            .map(metrics::MetricBucket::as_str)
            .collect::<Vec<_>>(),
    );

    let plugin = plugin::DockerStatePlugin::connect(config);
    let mode = mackerel::Mode::from_env();
    log::trace!("Answering agent in {mode:?} mode");

    mackerel::run(&plugin, mode, std::io::stdout().lock()).await?;

    Ok(())
}
