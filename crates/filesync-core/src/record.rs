//! File record and modification time types.

use std::cmp::Ordering;
use std::ffi::{OsStr, OsString};
use std::fmt;
use std::time::{SystemTime, UNIX_EPOCH};

use compact_str::CompactString;
use serde::{Deserialize, Serialize};

/// Modification timestamp with nanosecond resolution.
///
/// Ordering is lexicographic: whole seconds first, then the sub-second part.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ModTime {
    /// Seconds relative to the Unix epoch (negative before 1970).
    pub secs: i64,
    /// Sub-second component, always in `0..1_000_000_000`.
    pub nanos: u32,
}

impl ModTime {
    /// Create a timestamp from seconds and nanoseconds.
    pub fn new(secs: i64, nanos: u32) -> Self {
        Self { secs, nanos }
    }

    /// Convert a `SystemTime` into a `ModTime`.
    pub fn from_system_time(time: SystemTime) -> Self {
        match time.duration_since(UNIX_EPOCH) {
            Ok(d) => Self::new(d.as_secs() as i64, d.subsec_nanos()),
            Err(e) => {
                // Before the epoch: borrow one second so nanos stay positive.
                let d = e.duration();
                let secs = -(d.as_secs() as i64);
                match d.subsec_nanos() {
                    0 => Self::new(secs, 0),
                    n => Self::new(secs - 1, 1_000_000_000 - n),
                }
            }
        }
    }

    /// Check if this timestamp is strictly newer than `other`.
    pub fn is_newer_than(&self, other: &ModTime) -> bool {
        self > other
    }
}

impl Ord for ModTime {
    fn cmp(&self, other: &Self) -> Ordering {
        self.secs
            .cmp(&other.secs)
            .then_with(|| self.nanos.cmp(&other.nanos))
    }
}

impl PartialOrd for ModTime {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for ModTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:09}", self.secs, self.nanos)
    }
}

impl From<SystemTime> for ModTime {
    fn from(time: SystemTime) -> Self {
        Self::from_system_time(time)
    }
}

/// A regular file found while scanning a directory.
///
/// `os_name` is the name exactly as the file system returned it and is what
/// paths, matching, and ordering use. `name` is its lossy UTF-8 rendering for
/// logs, trace lines, and JSON.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileRecord {
    /// Base name for display.
    pub name: CompactString,

    /// Base name as raw OS bytes.
    #[serde(skip)]
    pub os_name: OsString,

    /// Last modification time.
    pub modified: ModTime,

    /// Size in bytes.
    pub size: u64,
}

impl FileRecord {
    /// Create a new file record from a UTF-8 name.
    pub fn new(name: impl Into<CompactString>, modified: ModTime, size: u64) -> Self {
        let name = name.into();
        Self {
            os_name: OsString::from(name.as_str()),
            name,
            modified,
            size,
        }
    }

    /// Create a file record from the name the file system reported.
    pub fn from_os_name(os_name: impl Into<OsString>, modified: ModTime, size: u64) -> Self {
        let os_name = os_name.into();
        Self {
            name: CompactString::new(os_name.to_string_lossy()),
            os_name,
            modified,
            size,
        }
    }

    /// The raw file name.
    pub fn file_name(&self) -> &OsStr {
        &self.os_name
    }

    /// Bytes of the raw file name, used for ordering.
    pub fn name_bytes(&self) -> &[u8] {
        self.os_name.as_encoded_bytes()
    }

    /// Check if this file was modified strictly after `other`.
    pub fn is_newer_than(&self, other: &FileRecord) -> bool {
        self.modified.is_newer_than(&other.modified)
    }
}
