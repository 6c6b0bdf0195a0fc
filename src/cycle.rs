use std::path::{Path, PathBuf};

use crate::docker;
use crate::publish;
use crate::target::{self, TargetOptions};

/// Reasons a refresh was skipped.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to list containers: {0}")]
    Fetch(#[from] docker::Error),
    #[error("failed to publish targets: {0}")]
    Publish(#[from] publish::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

/// Everything one refresh needs. Built once at startup and only read afterwards.
#[derive(Debug, Clone)]
pub struct Refresher {
    client: docker::Client,
    output_path: PathBuf,
    options: TargetOptions,
}

impl Refresher {
    pub fn new(client: docker::Client, output_path: PathBuf, options: TargetOptions) -> Self {
        Self {
            client,
            output_path,
            options,
        }
    }

    pub fn output_path(&self) -> &Path {
        &self.output_path
    }

    /// Lists the containers, converts them into targets and rewrites the target file.
    ///
    /// Returns the number of targets written. Any failure leaves the previously
    /// written file in place.
    pub async fn refresh(&self) -> Result<usize> {
        let containers = self.client.list_containers().await?;
        log::trace!("Found {} containers", containers.len());

        let targets = target::build_targets(&containers, &self.options);
        publish::publish_targets(&self.output_path, &targets)?;

        Ok(targets.len())
    }

    /// Runs a refresh and logs its outcome instead of returning it.
    pub async fn refresh_and_log(&self) {
        match self.refresh().await {
            Ok(count) => log::debug!(
                "Refreshed {} targets in {}",
                count,
                self.output_path.display()
            ),
            Err(err) => log::error!("Skipping refresh: {}", err),
        }
    }
}
