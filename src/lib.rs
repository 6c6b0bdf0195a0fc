//! docker-sd: Promtail file based service discovery for Docker containers.
//!
//! The daemon polls the Docker Engine API over its Unix socket on a fixed
//! interval, turns every running container into a scrape target labeled with
//! its compose, swarm and ECS metadata, and atomically rewrites a JSON target
//! file that Promtail picks up through `file_sd_configs`.
pub mod config;
pub mod cycle;
pub mod docker;
pub mod fsutil;
pub mod publish;
pub mod target;
pub mod transport;

use config::Config;

/// Runs the discovery loop until the process is terminated.
///
/// The transport is created once and shared by every refresh. Refreshes run
/// one after another; a refresh that overruns the interval delays the next
/// tick instead of overlapping with it. A failing refresh is logged and the
/// loop carries on with the next tick.
pub async fn run(config: Config) -> Result<(), Box<dyn std::error::Error>> {
    log::info!(
        "Watching {} (API {}), writing targets to {} every {}",
        config.socket_path.display(),
        config.api_version,
        config.output_path.display(),
        humantime::format_duration(config.interval),
    );
    if !config.targets.exclude_name.is_empty() {
        log::info!("Excluding container `{}`", config.targets.exclude_name);
    }

    let connector = transport::UnixConnector::new(&config.socket_path);
    let client = docker::Client::new(connector, config.api_version);
    let refresher = cycle::Refresher::new(client, config.output_path, config.targets);

    let mut interval = tokio::time::interval(config.interval);
    interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
    log::info!("Starting run loop");
    loop {
        interval.tick().await;
        log::trace!("Refreshing {}", refresher.output_path().display());
        refresher.refresh_and_log().await;
    }
}
