use std::fs::Permissions;
use std::io::{self, Write};
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

/// Mode of published files, readable by the log shipper running as another user.
pub const PUBLISHED_FILE_MODE: u32 = 0o644;

/// Error that occurs when atomically replacing a file fails.
#[derive(Debug, thiserror::Error)]
#[error("failed to write file `{path}`: {source}")]
pub struct FileWriteError {
    pub path: PathBuf,
    #[source]
    pub source: io::Error,
}

/// Replaces the contents of `path` with `contents`.
///
/// The data is written to a temporary file in the same directory which is then
/// renamed over `path`, so readers either see the old or the new file. On error
/// the existing file is left as it was and the temporary file is removed.
///
/// # Errors
///
/// Returns a [`FileWriteError`] if the temporary file cannot be created,
/// written, or renamed into place.
///
/// # Example
/// ```no_run
/// # use docker_sd::fsutil;
/// fsutil::write_atomic("/etc/promtail/promtail-targets.json", b"[]")?;
/// # Ok::<(), fsutil::FileWriteError>(())
/// ```
pub fn write_atomic(path: impl AsRef<Path>, contents: &[u8]) -> Result<(), FileWriteError> {
    let path = path.as_ref();
    let err = |source| FileWriteError {
        path: path.to_path_buf(),
        source,
    };
    let dir = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };

    let mut tmp = tempfile::Builder::new()
        .prefix(".")
        .suffix(".tmp")
        .tempfile_in(dir)
        .map_err(err)?;
    tmp.write_all(contents).map_err(err)?;
    tmp.as_file().sync_all().map_err(err)?;
    tmp.as_file()
        .set_permissions(Permissions::from_mode(PUBLISHED_FILE_MODE))
        .map_err(err)?;
    tmp.persist(path).map_err(|e| err(e.error))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_atomic_creates_and_replaces() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("targets.json");

        write_atomic(&path, b"first").expect("should create file");
        assert_eq!(std::fs::read(&path).unwrap(), b"first");

        write_atomic(&path, b"second").expect("should replace file");
        assert_eq!(std::fs::read(&path).unwrap(), b"second");

        let mode = std::fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, PUBLISHED_FILE_MODE);

        let leftovers: Vec<_> = std::fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name())
            .collect();
        assert_eq!(leftovers, ["targets.json"]);
    }

    #[test]
    fn test_write_atomic_error() {
        let result = write_atomic("/definitely/does/not/exist/targets.json", b"[]");
        assert!(result.is_err());
        let err = result.unwrap_err();
        assert_eq!(
            err.path,
            PathBuf::from("/definitely/does/not/exist/targets.json")
        );
        assert_eq!(err.source.kind(), std::io::ErrorKind::NotFound);
    }

    #[test]
    fn test_write_atomic_failed_rename_leaves_target_untouched() {
        let dir = tempfile::tempdir().unwrap();
        // A non-empty directory cannot be replaced by a rename.
        let blocked = dir.path().join("targets.json");
        std::fs::create_dir(&blocked).unwrap();
        std::fs::write(blocked.join("inner"), b"previous").unwrap();

        let err = write_atomic(&blocked, b"new").unwrap_err();
        assert_eq!(err.path, blocked);
        assert_eq!(std::fs::read(blocked.join("inner")).unwrap(), b"previous");

        let entries = std::fs::read_dir(dir.path()).unwrap().count();
        assert_eq!(entries, 1, "temporary file should be cleaned up");
    }
}
