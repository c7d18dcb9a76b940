//! Synchronization configuration types.

use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use derive_builder::Builder;
use globset::{Glob, GlobSet, GlobSetBuilder};
use serde::{Deserialize, Serialize};

use crate::error::SyncError;

/// Default chunk size for content comparison.
pub const DEFAULT_BUFFER_SIZE: usize = 64 * 1024;

/// Configuration for a synchronization run.
#[derive(Debug, Clone, Builder, Serialize, Deserialize)]
#[builder(setter(into), build_fn(validate = "Self::validate"))]
pub struct SyncConfig {
    /// Directory whose files are propagated.
    pub source: PathBuf,

    /// Directory receiving the files.
    pub destination: PathBuf,

    /// Decide and report without copying anything.
    #[builder(default = "false")]
    #[serde(default)]
    pub dry_run: bool,

    /// Give copied files the source's modification time.
    #[builder(default = "true")]
    #[serde(default = "default_true")]
    pub preserve_times: bool,

    /// Create the destination directory if it is missing.
    #[builder(default = "true")]
    #[serde(default = "default_true")]
    pub create_destination: bool,

    /// Include hidden files (starting with .).
    #[builder(default = "true")]
    #[serde(default = "default_true")]
    pub include_hidden: bool,

    /// Glob patterns matched against file names; matches are not synced.
    #[builder(default)]
    #[serde(default)]
    pub ignore_patterns: Vec<String>,

    /// Chunk size used when comparing file contents.
    #[builder(default = "DEFAULT_BUFFER_SIZE")]
    #[serde(default = "default_buffer_size")]
    pub buffer_size: usize,
}

fn default_true() -> bool {
    true
}

fn default_buffer_size() -> usize {
    DEFAULT_BUFFER_SIZE
}

impl SyncConfigBuilder {
    fn validate(&self) -> Result<(), String> {
        for (label, path) in [("Source", &self.source), ("Destination", &self.destination)] {
            match path {
                Some(p) if p.as_os_str().is_empty() => {
                    return Err(format!("{label} path cannot be empty"));
                }
                Some(_) => {}
                None => return Err(format!("{label} path is required")),
            }
        }
        if self.buffer_size == Some(0) {
            return Err("Buffer size must be greater than zero".to_string());
        }
        Ok(())
    }
}

impl SyncConfig {
    /// Create a new config builder.
    pub fn builder() -> SyncConfigBuilder {
        SyncConfigBuilder::default()
    }

    /// Create a config with default options for a source/destination pair.
    pub fn new(source: impl Into<PathBuf>, destination: impl Into<PathBuf>) -> Self {
        Self {
            source: source.into(),
            destination: destination.into(),
            dry_run: false,
            preserve_times: true,
            create_destination: true,
            include_hidden: true,
            ignore_patterns: Vec::new(),
            buffer_size: DEFAULT_BUFFER_SIZE,
        }
    }

    /// Compile the ignore patterns into a name filter.
    pub fn name_filter(&self) -> Result<NameFilter, SyncError> {
        NameFilter::new(&self.ignore_patterns, self.include_hidden)
    }
}

/// Compiled ignore rules applied to file names during a scan.
#[derive(Debug, Clone)]
pub struct NameFilter {
    ignore: GlobSet,
    include_hidden: bool,
}

impl NameFilter {
    /// Build a filter from glob patterns.
    pub fn new(patterns: &[String], include_hidden: bool) -> Result<Self, SyncError> {
        let mut builder = GlobSetBuilder::new();
        for pattern in patterns {
            let glob = Glob::new(pattern).map_err(|e| SyncError::InvalidConfig {
                message: format!("bad ignore pattern '{pattern}': {e}"),
            })?;
            builder.add(glob);
        }
        let ignore = builder.build().map_err(|e| SyncError::InvalidConfig {
            message: e.to_string(),
        })?;
        Ok(Self {
            ignore,
            include_hidden,
        })
    }

    /// A filter that accepts every name.
    pub fn allow_all() -> Self {
        Self {
            ignore: GlobSet::empty(),
            include_hidden: true,
        }
    }

    /// Check if a file name should be left out of the snapshot.
    ///
    /// Names that are not valid UTF-8 are matched on their raw bytes.
    pub fn excludes(&self, name: impl AsRef<OsStr>) -> bool {
        let name = name.as_ref();
        let hidden = name.as_encoded_bytes().first() == Some(&b'.');
        (!self.include_hidden && hidden) || self.ignore.is_match(Path::new(name))
    }
}

impl Default for NameFilter {
    fn default() -> Self {
        Self::allow_all()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_builder() {
        let config = SyncConfig::builder()
            .source("/data/in")
            .destination("/data/out")
            .dry_run(true)
            .build()
            .unwrap();

        assert_eq!(config.source, PathBuf::from("/data/in"));
        assert_eq!(config.destination, PathBuf::from("/data/out"));
        assert!(config.dry_run);
        assert!(config.preserve_times);
        assert!(config.create_destination);
        assert_eq!(config.buffer_size, DEFAULT_BUFFER_SIZE);
    }

    #[test]
    fn test_config_builder_requires_paths() {
        let err = SyncConfig::builder().source("/a").build().unwrap_err();
        assert!(err.to_string().contains("Destination path is required"));

        let err = SyncConfig::builder()
            .source("")
            .destination("/b")
            .build()
            .unwrap_err();
        assert!(err.to_string().contains("Source path cannot be empty"));
    }

    #[test]
    fn test_config_builder_rejects_zero_buffer() {
        let err = SyncConfig::builder()
            .source("/a")
            .destination("/b")
            .buffer_size(0usize)
            .build()
            .unwrap_err();
        assert!(err.to_string().contains("Buffer size"));
    }

    #[test]
    fn test_name_filter() {
        let filter = NameFilter::new(&["*.tmp".to_string(), "Thumbs.db".to_string()], false)
            .unwrap();

        assert!(filter.excludes("scratch.tmp"));
        assert!(filter.excludes("Thumbs.db"));
        assert!(filter.excludes(".hidden"));
        assert!(!filter.excludes("notes.txt"));
    }

    #[cfg(unix)]
    #[test]
    fn test_name_filter_matches_non_utf8_names() {
        use std::os::unix::ffi::OsStrExt;

        let filter = NameFilter::new(&["*.tmp".to_string()], false).unwrap();

        assert!(filter.excludes(OsStr::from_bytes(b"caf\xe9.tmp")));
        assert!(filter.excludes(OsStr::from_bytes(b".caf\xe9")));
        assert!(!filter.excludes(OsStr::from_bytes(b"caf\xe9.txt")));
    }

    #[test]
    fn test_name_filter_rejects_bad_glob() {
        let err = NameFilter::new(&["[".to_string()], true).unwrap_err();
        assert!(matches!(err, SyncError::InvalidConfig { .. }));
    }

    #[test]
    fn test_allow_all() {
        let filter = NameFilter::allow_all();
        assert!(!filter.excludes(".profile"));
        assert!(!filter.excludes("a.txt"));
    }
}
