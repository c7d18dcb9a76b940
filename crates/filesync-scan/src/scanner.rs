//! JWalk-based single-level directory scanner.

use std::fs::Metadata;
use std::path::Path;
use std::time::Instant;

use jwalk::{Parallelism, WalkDir};
use tracing::{debug, warn};

use filesync_core::{DirectorySnapshot, FileRecord, ModTime, NameFilter, ScanWarning, SyncError};

/// Builds [`DirectorySnapshot`]s from the regular files directly inside a directory.
#[derive(Debug, Clone, Default)]
pub struct SnapshotScanner {
    filter: NameFilter,
}

impl SnapshotScanner {
    /// Create a scanner that keeps every regular file.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a scanner that leaves out names matched by `filter`.
    pub fn with_filter(filter: NameFilter) -> Self {
        Self { filter }
    }

    /// Scan `path` and return its files in name order.
    pub fn scan_sorted(&self, path: &Path) -> Result<DirectorySnapshot, SyncError> {
        let mut snapshot = self.scan(path)?;
        snapshot.sort_by_name();
        Ok(snapshot)
    }

    /// Scan `path` and return its files in listing order.
    ///
    /// Subdirectories, symlinks, and special files are left out of `files` but
    /// their names are kept in `other_entries`. Entries whose metadata cannot
    /// be read are recorded as warnings and skipped; failing to open or list
    /// the directory itself is an error.
    pub fn scan(&self, path: &Path) -> Result<DirectorySnapshot, SyncError> {
        let start = Instant::now();
        let root_path = path
            .canonicalize()
            .map_err(|e| SyncError::unreadable(path, e))?;

        if !root_path.is_dir() {
            return Err(SyncError::NotADirectory { path: root_path });
        }

        let walker = WalkDir::new(&root_path)
            .parallelism(Parallelism::Serial)
            .skip_hidden(false)
            .follow_links(false)
            .min_depth(0)
            .max_depth(1);

        let mut files = Vec::new();
        let mut other_entries = Vec::new();
        let mut warnings = Vec::new();

        for entry_result in walker {
            let mut entry = match entry_result {
                Ok(e) => e,
                Err(err) => {
                    // The root itself failing means nothing can be listed.
                    if err.depth() == 0 {
                        let source = walk_io_error(err);
                        return Err(SyncError::unreadable(&root_path, source));
                    }
                    let path = err.path().map(Path::to_path_buf).unwrap_or_default();
                    warn!(path = %path.display(), error = %err, "skipping unreadable entry");
                    warnings.push(ScanWarning::read_error(path, err.to_string()));
                    continue;
                }
            };

            if entry.depth() == 0 {
                if let Some(err) = entry.read_children_error.take() {
                    return Err(SyncError::unreadable(&root_path, walk_io_error(err)));
                }
                continue;
            }

            let os_name = entry.file_name().to_os_string();

            if !entry.file_type().is_file() {
                debug!(name = %os_name.to_string_lossy(), "not a regular file");
                other_entries.push(os_name);
                continue;
            }

            if self.filter.excludes(&os_name) {
                debug!(name = %os_name.to_string_lossy(), "ignored by filter");
                continue;
            }
            let entry_path = entry.path();

            let metadata = match entry.metadata() {
                Ok(m) => m,
                Err(err) => {
                    let source = walk_io_error(err);
                    warn!(path = %entry_path.display(), error = %source, "skipping entry without metadata");
                    warnings.push(ScanWarning::metadata_unavailable(&entry_path, &source));
                    continue;
                }
            };

            let modified = match modified_time(&metadata) {
                Ok(t) => t,
                Err(source) => {
                    warn!(path = %entry_path.display(), error = %source, "skipping entry without mtime");
                    warnings.push(ScanWarning::metadata_unavailable(&entry_path, &source));
                    continue;
                }
            };

            let record = FileRecord::from_os_name(os_name, modified, metadata.len());
            debug!(name = %record.name, size = record.size, mtime = %modified, "scanned file");
            files.push(record);
        }

        debug!(
            root = %root_path.display(),
            files = files.len(),
            warnings = warnings.len(),
            "scan complete"
        );

        Ok(
            DirectorySnapshot::new(root_path, files, warnings, start.elapsed())
                .with_other_entries(other_entries),
        )
    }
}

/// Convert a jwalk error into the underlying I/O error where there is one.
fn walk_io_error(err: jwalk::Error) -> std::io::Error {
    let message = err.to_string();
    err.into_io_error()
        .unwrap_or_else(|| std::io::Error::other(message))
}

/// Get the modification time from metadata.
#[cfg(unix)]
fn modified_time(metadata: &Metadata) -> std::io::Result<ModTime> {
    use std::os::unix::fs::MetadataExt;
    Ok(ModTime::new(metadata.mtime(), metadata.mtime_nsec() as u32))
}

#[cfg(not(unix))]
fn modified_time(metadata: &Metadata) -> std::io::Result<ModTime> {
    metadata.modified().map(ModTime::from_system_time)
}

/// Scan a directory with the default scanner, sorted by name.
pub fn scan_directory(path: impl AsRef<Path>) -> Result<DirectorySnapshot, SyncError> {
    SnapshotScanner::new().scan_sorted(path.as_ref())
}
