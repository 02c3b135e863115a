/// Entry point for the Docker state Mackerel plugin.
///
/// Lists all containers of the Docker daemon, counts them per state and prints
/// the counts for the Mackerel agent.
///
/// # Errors
///
/// Exits non-zero if the configuration is invalid, the Docker daemon cannot be
/// queried, or a container reports an unknown state.
///
/// # Examples
///
/// ```bash
/// RUST_LOG=debug cargo run -- --host unix:///var/run/docker.sock --failing-states dead,exited
/// ```
#[tokio::main(flavor = "current_thread")]
async fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let args = docker_state_plugin::cli::Args::parse_args();
    docker_state_plugin::run(args).await
}
