//! Name-based matching of files across snapshots.

use std::collections::{HashMap, HashSet};
use std::ffi::OsStr;

use filesync_core::{DirectorySnapshot, FileRecord};

/// Exact-name index over a snapshot's files.
///
/// Keys are raw file names, so two names that only differ in bytes that are
/// not valid UTF-8 never collide.
#[derive(Debug)]
pub struct SnapshotIndex<'a> {
    by_name: HashMap<&'a OsStr, &'a FileRecord>,
    occupied: HashSet<&'a OsStr>,
}

impl<'a> SnapshotIndex<'a> {
    /// Index every file in `snapshot`.
    ///
    /// If a name appears twice the first record wins, matching a front-to-back scan.
    pub fn new(snapshot: &'a DirectorySnapshot) -> Self {
        let mut by_name = HashMap::with_capacity(snapshot.files.len());
        for record in &snapshot.files {
            by_name.entry(record.file_name()).or_insert(record);
        }
        let occupied = snapshot
            .other_entries
            .iter()
            .map(|name| name.as_os_str())
            .collect();
        Self { by_name, occupied }
    }

    /// Find the record whose name equals `name` exactly.
    pub fn get(&self, name: impl AsRef<OsStr>) -> Option<&'a FileRecord> {
        self.by_name.get(name.as_ref()).copied()
    }

    /// Find the counterpart of `record` in the indexed snapshot.
    pub fn find_match(&self, record: &FileRecord) -> Option<&'a FileRecord> {
        self.get(record.file_name())
    }

    /// Check if `name` is taken by something other than a regular file.
    pub fn is_occupied(&self, name: impl AsRef<OsStr>) -> bool {
        self.occupied.contains(name.as_ref())
    }

    /// Number of indexed names.
    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    /// Check if the index is empty.
    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }
}

/// Find the file named like `record` in `snapshot` with a linear scan.
pub fn find_match<'a>(record: &FileRecord, snapshot: &'a DirectorySnapshot) -> Option<&'a FileRecord> {
    snapshot
        .files
        .iter()
        .find(|f| f.file_name() == record.file_name())
}
