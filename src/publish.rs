use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};

use crate::fsutil;
use crate::target::Target;

const INDENT: &[u8] = b" ";

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to encode targets for `{path}`: {source}")]
    Encode {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error(transparent)]
    Write(#[from] fsutil::FileWriteError),
}

pub type Result<T> = std::result::Result<T, Error>;

/// Encodes targets as an indented JSON array.
pub fn encode_targets(targets: &[Target]) -> serde_json::Result<Vec<u8>> {
    let mut out = Vec::with_capacity(128 * targets.len() + 2);
    let mut serializer = Serializer::with_formatter(&mut out, PrettyFormatter::with_indent(INDENT));
    targets.serialize(&mut serializer)?;
    Ok(out)
}

/// Encodes `targets` and replaces the file at `path` with the result.
///
/// # Errors
///
/// - [`Error::Encode`] if the targets cannot be encoded.
/// - [`Error::Write`] if the file cannot be replaced. The previous file is kept.
pub fn publish_targets(path: impl AsRef<Path>, targets: &[Target]) -> Result<()> {
    let path = path.as_ref();
    let contents = encode_targets(targets).map_err(|source| Error::Encode {
        path: path.to_path_buf(),
        source,
    })?;
    fsutil::write_atomic(path, &contents)?;
    log::debug!(
        "Wrote {} targets ({} bytes) to {}",
        targets.len(),
        contents.len(),
        path.display()
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::target::TargetLabels;

    fn target(id: &str, labels: TargetLabels) -> Target {
        Target {
            targets: vec![id.to_owned()],
            labels,
        }
    }

    #[test]
    fn test_encode_targets_layout() {
        let targets = vec![
            target(
                "abc123",
                TargetLabels {
                    docker_compose_service: Some("web".to_owned()),
                    ..TargetLabels::default()
                }
                .with_image("nginx:latest")
                .with_name(Some("web-1")),
            ),
            target("def456", TargetLabels::default()),
        ];

        let encoded = String::from_utf8(encode_targets(&targets).unwrap()).unwrap();
        let expected = r#"[
 {
  "targets": [
   "abc123"
  ],
  "Labels": {
   "docker_compose_service": "web",
   "image": "nginx:latest",
   "name": "web-1"
  }
 },
 {
  "targets": [
   "def456"
  ]
 }
]"#;
        assert_eq!(encoded, expected);
    }

    #[test]
    fn test_encode_no_targets() {
        assert_eq!(encode_targets(&[]).unwrap(), b"[]");
    }

    #[test]
    fn test_publish_targets_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("promtail-targets.json");
        let targets = vec![target(
            "abc123",
            TargetLabels::default().with_image("redis:7"),
        )];

        publish_targets(&path, &targets).unwrap();
        let first = std::fs::read(&path).unwrap();
        publish_targets(&path, &targets).unwrap();
        let second = std::fs::read(&path).unwrap();

        assert_eq!(first, second);
        let decoded: serde_json::Value = serde_json::from_slice(&second).unwrap();
        assert_eq!(decoded[0]["Labels"]["image"], "redis:7");
    }

    #[test]
    fn test_publish_targets_write_error() {
        let err = publish_targets("/definitely/does/not/exist/targets.json", &[]).unwrap_err();
        assert!(matches!(err, Error::Write(_)));
    }
}
