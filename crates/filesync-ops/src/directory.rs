//! Directory existence checks and creation.

use std::fs;
use std::path::Path;

use tracing::info;

use filesync_core::SyncError;

/// Check if `path` exists and is a directory.
pub fn directory_exists(path: &Path) -> bool {
    fs::metadata(path).map(|m| m.is_dir()).unwrap_or(false)
}

/// Create a directory, including any missing parents.
pub fn create_directory(path: &Path) -> Result<(), SyncError> {
    fs::create_dir_all(path).map_err(|source| SyncError::DestinationCreateFailed {
        path: path.to_path_buf(),
        source,
    })?;
    info!(path = %path.display(), "created directory");
    Ok(())
}

/// Make sure the destination directory exists.
///
/// Returns `true` if the directory had to be created.
pub fn ensure_directory(path: &Path, create: bool) -> Result<bool, SyncError> {
    if directory_exists(path) {
        return Ok(false);
    }
    if path.exists() {
        return Err(SyncError::NotADirectory {
            path: path.to_path_buf(),
        });
    }
    if !create {
        return Err(SyncError::DestinationMissing {
            path: path.to_path_buf(),
        });
    }
    create_directory(path)?;
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_directory_exists() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("file.txt");
        fs::write(&file, "x").unwrap();

        assert!(directory_exists(temp.path()));
        assert!(!directory_exists(&file));
        assert!(!directory_exists(&temp.path().join("missing")));
    }

    #[test]
    fn test_ensure_directory_creates_nested() {
        let temp = TempDir::new().unwrap();
        let dest = temp.path().join("a/b/c");

        assert!(ensure_directory(&dest, true).unwrap());
        assert!(dest.is_dir());
        assert!(!ensure_directory(&dest, true).unwrap());
    }

    #[test]
    fn test_ensure_directory_without_create() {
        let temp = TempDir::new().unwrap();
        let dest = temp.path().join("missing");

        let err = ensure_directory(&dest, false).unwrap_err();

        assert!(matches!(err, SyncError::DestinationMissing { .. }));
        assert!(!dest.exists());
    }

    #[test]
    fn test_ensure_directory_rejects_file() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("file.txt");
        fs::write(&file, "x").unwrap();

        let err = ensure_directory(&file, true).unwrap_err();

        assert!(matches!(err, SyncError::NotADirectory { .. }));
    }

    #[test]
    fn test_create_directory_fails_under_file() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("file.txt");
        fs::write(&file, "x").unwrap();

        let err = create_directory(&file.join("child")).unwrap_err();

        assert!(matches!(err, SyncError::DestinationCreateFailed { .. }));
    }
}
