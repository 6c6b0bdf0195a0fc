use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

use crate::target::TargetOptions;

pub const DEFAULT_OUTPUT_PATH: &str = "/etc/promtail/promtail-targets.json";
pub const DEFAULT_SOCKET_PATH: &str = "/var/run/docker.sock";
pub const DEFAULT_API_VERSION: &str = "v1.24";
/// Name of the ECS container agent, which is not a useful log source.
pub const DEFAULT_EXCLUDE_NAME: &str = "/ecs-agent";

/// Writes Promtail file discovery targets for the containers of a Docker daemon.
#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// How often to refresh the targets.
    #[arg(long, value_name = "DURATION", default_value = "10s", value_parser = parse_interval)]
    pub every: Duration,

    /// Path where the target file will be written.
    #[arg(long, value_name = "FILE", default_value = DEFAULT_OUTPUT_PATH)]
    pub out: PathBuf,

    /// Docker socket path.
    #[arg(long, visible_alias = "url", value_name = "PATH", default_value = DEFAULT_SOCKET_PATH)]
    pub socket: PathBuf,

    /// Docker Engine API version used for requests.
    #[arg(long, value_name = "VERSION", default_value = DEFAULT_API_VERSION)]
    pub api_version: String,

    /// Skip the container whose first name equals this value.
    #[arg(long, value_name = "NAME", default_value = DEFAULT_EXCLUDE_NAME)]
    pub exclude_name: String,

    /// Keep the leading `/` of container names in the `name` label.
    #[arg(long)]
    pub keep_name_prefix: bool,
}

fn parse_interval(src: &str) -> Result<Duration, String> {
    let interval = humantime::parse_duration(src).map_err(|err| err.to_string())?;
    if interval.is_zero() {
        return Err("interval must be greater than zero".to_owned());
    }
    Ok(interval)
}

/// Immutable runtime configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub interval: Duration,
    pub output_path: PathBuf,
    pub socket_path: PathBuf,
    pub api_version: String,
    pub targets: TargetOptions,
}

impl From<Args> for Config {
    fn from(args: Args) -> Self {
        Self {
            interval: args.every,
            output_path: args.out,
            socket_path: args.socket,
            api_version: args.api_version,
            targets: TargetOptions {
                exclude_name: args.exclude_name,
                keep_name_prefix: args.keep_name_prefix,
            },
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(10),
            output_path: PathBuf::from(DEFAULT_OUTPUT_PATH),
            socket_path: PathBuf::from(DEFAULT_SOCKET_PATH),
            api_version: DEFAULT_API_VERSION.to_owned(),
            targets: TargetOptions::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = Args::try_parse_from(["docker-sd"]).unwrap();
        assert_eq!(Config::from(args), Config::default());
    }

    #[test]
    fn test_flags() {
        let args = Args::try_parse_from([
            "docker-sd",
            "--every",
            "1m 30s",
            "--out",
            "/tmp/targets.json",
            "--url",
            "/run/docker.sock",
            "--api-version",
            "v1.41",
            "--exclude-name",
            "/promtail",
            "--keep-name-prefix",
        ])
        .unwrap();
        let config = Config::from(args);

        assert_eq!(config.interval, Duration::from_secs(90));
        assert_eq!(config.output_path, PathBuf::from("/tmp/targets.json"));
        assert_eq!(config.socket_path, PathBuf::from("/run/docker.sock"));
        assert_eq!(config.api_version, "v1.41");
        assert_eq!(config.targets.exclude_name, "/promtail");
        assert!(config.targets.keep_name_prefix);
    }

    #[test]
    fn test_invalid_interval() {
        assert!(Args::try_parse_from(["docker-sd", "--every", "0s"]).is_err());
        assert!(Args::try_parse_from(["docker-sd", "--every", "soon"]).is_err());
    }
}
