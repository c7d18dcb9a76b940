//! Error types for synchronization runs.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that abort a synchronization run.
#[derive(Debug, Error)]
pub enum SyncError {
    /// Source directory does not exist.
    #[error("Source directory '{}' does not exist", path.display())]
    SourceMissing { path: PathBuf },

    /// Destination directory was missing and could not be created.
    #[error("Failed to create destination directory '{}': {source}", path.display())]
    DestinationCreateFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Destination directory is missing and creation is disabled.
    #[error("Destination directory '{}' does not exist", path.display())]
    DestinationMissing { path: PathBuf },

    /// A directory could not be opened or listed.
    #[error("Cannot read directory '{}': {source}", path.display())]
    DirectoryUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Path exists but is not a directory.
    #[error("Not a directory: {}", path.display())]
    NotADirectory { path: PathBuf },

    /// Content comparison could not be performed.
    #[error(
        "Failed to compare '{}' with '{}': {source}",
        source_path.display(),
        destination_path.display()
    )]
    CompareFailed {
        source_path: PathBuf,
        destination_path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A copy did not complete fully.
    #[error(
        "Failed to copy '{}' to '{}': {reason}",
        source_path.display(),
        destination_path.display()
    )]
    CopyFailed {
        source_path: PathBuf,
        destination_path: PathBuf,
        reason: String,
    },

    /// Invalid configuration.
    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },
}

impl SyncError {
    /// Create a directory-unreadable error with path context.
    pub fn unreadable(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::DirectoryUnreadable {
            path: path.into(),
            source,
        }
    }

    /// Check if this error happened before any file was touched.
    pub fn is_setup_error(&self) -> bool {
        matches!(
            self,
            Self::SourceMissing { .. }
                | Self::DestinationCreateFailed { .. }
                | Self::DestinationMissing { .. }
                | Self::NotADirectory { .. }
                | Self::InvalidConfig { .. }
        )
    }

    /// Create a compare error for a source/destination pair.
    pub fn compare(
        source_path: impl Into<PathBuf>,
        destination_path: impl Into<PathBuf>,
        source: std::io::Error,
    ) -> Self {
        Self::CompareFailed {
            source_path: source_path.into(),
            destination_path: destination_path.into(),
            source,
        }
    }

    /// Create a copy error for a source/destination pair.
    pub fn copy(
        source_path: impl Into<PathBuf>,
        destination_path: impl Into<PathBuf>,
        reason: impl Into<String>,
    ) -> Self {
        Self::CopyFailed {
            source_path: source_path.into(),
            destination_path: destination_path.into(),
            reason: reason.into(),
        }
    }
}

/// Kind of scan warning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WarningKind {
    /// Entry metadata could not be read.
    MetadataUnavailable,
    /// Entry could not be read from the directory listing.
    ReadError,
}

/// Non-fatal problem with a single directory entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanWarning {
    /// Path of the offending entry.
    pub path: PathBuf,
    /// Human-readable message.
    pub message: String,
    /// Kind of warning.
    pub kind: WarningKind,
}

impl ScanWarning {
    /// Create a new scan warning.
    pub fn new(path: impl Into<PathBuf>, message: impl Into<String>, kind: WarningKind) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
            kind,
        }
    }

    /// Create a metadata-unavailable warning.
    pub fn metadata_unavailable(path: impl Into<PathBuf>, error: &std::io::Error) -> Self {
        Self::new(
            path,
            format!("Metadata unavailable: {error}"),
            WarningKind::MetadataUnavailable,
        )
    }

    /// Create a read error warning.
    pub fn read_error(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::new(path, message, WarningKind::ReadError)
    }
}
