//! Directory snapshot container.

use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Serialize;

use crate::error::ScanWarning;
use crate::record::FileRecord;

/// Point-in-time listing of the regular files directly inside a directory.
#[derive(Debug, Clone, Serialize)]
pub struct DirectorySnapshot {
    /// Absolute path the snapshot was taken from.
    pub root_path: PathBuf,

    /// File records, in listing order until [`sort_by_name`](Self::sort_by_name) is called.
    pub files: Vec<FileRecord>,

    /// Names of entries that exist but are not regular files.
    #[serde(skip)]
    pub other_entries: Vec<OsString>,

    /// Entries that were skipped because they could not be read.
    pub warnings: Vec<ScanWarning>,

    /// Duration of the scan.
    pub scan_duration: Duration,
}

impl DirectorySnapshot {
    /// Create a new snapshot.
    pub fn new(
        root_path: PathBuf,
        files: Vec<FileRecord>,
        warnings: Vec<ScanWarning>,
        scan_duration: Duration,
    ) -> Self {
        Self {
            root_path,
            files,
            other_entries: Vec::new(),
            warnings,
            scan_duration,
        }
    }

    /// Record the names of subdirectories, symlinks, and special files.
    pub fn with_other_entries(mut self, other_entries: Vec<OsString>) -> Self {
        self.other_entries = other_entries;
        self
    }

    /// Create an empty snapshot for a directory with no files.
    pub fn empty(root_path: impl Into<PathBuf>) -> Self {
        Self::new(root_path.into(), Vec::new(), Vec::new(), Duration::ZERO)
    }

    /// Sort files by name, byte-wise ascending.
    ///
    /// The sort is stable, so records that compare equal keep their listing order.
    pub fn sort_by_name(&mut self) {
        self.files
            .sort_by(|a, b| a.name_bytes().cmp(b.name_bytes()));
    }

    /// Check if the files are in name order.
    pub fn is_sorted(&self) -> bool {
        self.files
            .windows(2)
            .all(|w| w[0].name_bytes() <= w[1].name_bytes())
    }

    /// Full path of a file in this snapshot.
    pub fn path_of(&self, record: &FileRecord) -> PathBuf {
        self.root_path.join(record.file_name())
    }

    /// Check if `name` is taken by an entry that is not a regular file.
    pub fn has_other_entry(&self, name: &OsStr) -> bool {
        self.other_entries.iter().any(|n| n == name)
    }

    /// Root directory of the snapshot.
    pub fn root(&self) -> &Path {
        &self.root_path
    }

    /// Number of files.
    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// Check if the snapshot has no files.
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Total size of all files in bytes.
    pub fn total_size(&self) -> u64 {
        self.files.iter().map(|f| f.size).sum()
    }

    /// Check if there were any warnings during scanning.
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::ModTime;

    fn record(name: &str, size: u64) -> FileRecord {
        FileRecord::new(name, ModTime::new(0, 0), size)
    }

    #[test]
    fn test_sort_by_name_is_bytewise() {
        let mut snapshot = DirectorySnapshot::empty("/tmp/x");
        snapshot.files = vec![record("b.txt", 1), record("B.txt", 1), record("a.txt", 1)];

        snapshot.sort_by_name();

        let names: Vec<_> = snapshot.files.iter().map(|f| f.name.as_str()).collect();
        // Uppercase sorts before lowercase in byte order.
        assert_eq!(names, vec!["B.txt", "a.txt", "b.txt"]);
        assert!(snapshot.is_sorted());
    }

    #[test]
    fn test_sort_is_stable_for_equal_names() {
        let mut snapshot = DirectorySnapshot::empty("/tmp/x");
        snapshot.files = vec![record("same", 1), record("a", 0), record("same", 2)];

        snapshot.sort_by_name();

        let sizes: Vec<_> = snapshot.files.iter().map(|f| f.size).collect();
        assert_eq!(sizes, vec![0, 1, 2]);
    }

    #[test]
    fn test_path_and_totals() {
        let mut snapshot = DirectorySnapshot::empty("/tmp/x");
        snapshot.files = vec![record("a", 10), record("b", 5)];

        assert_eq!(snapshot.path_of(&snapshot.files[0]), PathBuf::from("/tmp/x/a"));
        assert_eq!(snapshot.total_size(), 15);
        assert_eq!(snapshot.len(), 2);
        assert!(!snapshot.has_warnings());
    }

    #[test]
    fn test_other_entries() {
        let snapshot = DirectorySnapshot::empty("/tmp/x")
            .with_other_entries(vec![OsString::from("subdir"), OsString::from("link")]);

        assert!(snapshot.has_other_entry(OsStr::new("link")));
        assert!(!snapshot.has_other_entry(OsStr::new("a.txt")));
        assert!(snapshot.is_empty());
    }

    #[cfg(unix)]
    #[test]
    fn test_sort_uses_raw_name_bytes() {
        use std::os::unix::ffi::OsStrExt;

        let mut snapshot = DirectorySnapshot::empty("/tmp/x");
        snapshot.files = vec![
            FileRecord::from_os_name(OsStr::from_bytes(b"x\xea"), ModTime::new(0, 0), 2),
            FileRecord::from_os_name(OsStr::from_bytes(b"x\xe9"), ModTime::new(0, 0), 1),
        ];

        snapshot.sort_by_name();

        // Both render as the same lossy name but stay distinct and ordered.
        assert_eq!(snapshot.files[0].name, snapshot.files[1].name);
        assert_eq!(snapshot.files[0].size, 1);
        assert_eq!(
            snapshot.path_of(&snapshot.files[1]),
            Path::new("/tmp/x").join(OsStr::from_bytes(b"x\xea"))
        );
    }
}
