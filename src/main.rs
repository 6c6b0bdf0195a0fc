use clap::Parser;

use docker_sd::config::{Args, Config};

/// Entry point for the docker-sd discovery daemon.
///
/// Parses the command line, initializes logging and runs the refresh loop
/// until the process is terminated.
///
/// # Examples
///
/// ```bash
/// RUST_LOG=debug docker-sd --every 30s --out /etc/promtail/promtail-targets.json
/// ```
#[tokio::main]
async fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    docker_sd::run(Config::from(args)).await
}
