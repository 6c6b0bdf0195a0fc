//! Conversion of running containers into Promtail `file_sd` targets.
mod labels;

use serde::Serialize;

use crate::docker::RawContainer;

pub use labels::{FieldAccessor, LABEL_MAPPINGS, TargetLabels};

/// A single scrape target: the container id and its labels.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Target {
    pub targets: Vec<String>,
    #[serde(rename = "Labels", skip_serializing_if = "TargetLabels::is_empty")]
    pub labels: TargetLabels,
}

/// Controls how containers are turned into targets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetOptions {
    /// Containers whose first name equals this value are skipped.
    pub exclude_name: String,
    /// Keep the leading `/` the engine reports in front of container names.
    pub keep_name_prefix: bool,
}

impl Default for TargetOptions {
    fn default() -> Self {
        Self {
            exclude_name: crate::config::DEFAULT_EXCLUDE_NAME.to_owned(),
            keep_name_prefix: false,
        }
    }
}

impl TargetOptions {
    fn is_excluded(&self, container: &RawContainer) -> bool {
        container.primary_name() == Some(self.exclude_name.as_str())
    }

    fn display_name<'a>(&self, name: &'a str) -> &'a str {
        if self.keep_name_prefix {
            name
        } else {
            name.strip_prefix('/').unwrap_or(name)
        }
    }
}

impl Target {
    pub fn from_container(container: &RawContainer, options: &TargetOptions) -> Self {
        let labels = TargetLabels::from_raw(&container.labels)
            .with_image(&container.image)
            .with_name(container.primary_name().map(|n| options.display_name(n)));

        Self {
            targets: vec![container.id.clone()],
            labels,
        }
    }
}

/// Builds the targets for all containers except the excluded one, in the
/// order they were listed.
pub fn build_targets(containers: &[RawContainer], options: &TargetOptions) -> Vec<Target> {
    containers
        .iter()
        .filter(|c| {
            let excluded = options.is_excluded(c);
            if excluded {
                log::trace!("Skipping excluded container `{}`", c.id);
            }
            !excluded
        })
        .map(|c| Target::from_container(c, options))
        .collect()
}
