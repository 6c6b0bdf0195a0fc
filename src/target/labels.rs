use std::collections::HashMap;

use serde::Serialize;

/// Labels written for a discovery target.
///
/// Every field is optional and only serialized when present, so an entry
/// without any recognized labels is written without a `Labels` object.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TargetLabels {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ecs_cluster: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ecs_task_family: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ecs_task_version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ecs_container_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ecs_task_arn: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub docker_compose_service: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub docker_compose_project: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stack: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub app: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub application: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub component: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

pub type FieldAccessor = fn(&mut TargetLabels) -> &mut Option<String>;

/// Raw container label keys and the target label each one is copied into.
///
/// Keys that are not listed here are dropped.
pub const LABEL_MAPPINGS: &[(&str, FieldAccessor)] = &[
    ("com.amazonaws.ecs.cluster", |l| &mut l.ecs_cluster),
    ("com.amazonaws.ecs.task-definition-family", |l| &mut l.ecs_task_family),
    ("com.amazonaws.ecs.task-definition-version", |l| &mut l.ecs_task_version),
    ("com.amazonaws.ecs.container-name", |l| &mut l.ecs_container_name),
    ("com.amazonaws.ecs.task-arn", |l| &mut l.ecs_task_arn),
    ("com.docker.compose.service", |l| &mut l.docker_compose_service),
    ("com.docker.compose.project", |l| &mut l.docker_compose_project),
    ("com.docker.stack.namespace", |l| &mut l.stack),
    ("com.docker.swarm.service.name", |l| &mut l.service),
    ("app", |l| &mut l.app),
    ("application", |l| &mut l.application),
    ("component", |l| &mut l.component),
    ("type", |l| &mut l.kind),
];

impl TargetLabels {
    /// Builds target labels from raw container labels using [`LABEL_MAPPINGS`].
    ///
    /// Empty values are treated as missing.
    pub fn from_raw(raw: &HashMap<String, String>) -> Self {
        let mut labels = Self::default();
        for (key, field) in LABEL_MAPPINGS {
            *field(&mut labels) = non_empty(raw.get(*key).map(String::as_str));
        }
        labels
    }

    pub fn with_image(mut self, image: &str) -> Self {
        self.image = non_empty(Some(image));
        self
    }

    pub fn with_name(mut self, name: Option<&str>) -> Self {
        self.name = non_empty(name);
        self
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value.filter(|v| !v.is_empty()).map(str::to_owned)
}
