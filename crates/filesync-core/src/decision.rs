//! Per-file synchronization decisions.

use std::ffi::OsStr;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::record::FileRecord;

/// What happens to a source file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DecisionKind {
    /// File is missing from the destination and will be copied.
    Create,
    /// Destination copy differs and will be overwritten.
    Update,
    /// Nothing to do.
    Skip,
}

impl DecisionKind {
    /// Check if this decision copies data.
    pub fn needs_copy(&self) -> bool {
        matches!(self, Self::Create | Self::Update)
    }
}

impl fmt::Display for DecisionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Create => write!(f, "CREATE"),
            Self::Update => write!(f, "UPDATE"),
            Self::Skip => write!(f, "SKIP"),
        }
    }
}

/// Why a decision was made.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DecisionReason {
    /// No file with this name exists in the destination.
    NewInSource,
    /// Both files have the same bytes.
    Identical,
    /// Contents differ and the source is newer or equally old.
    SourceNewer,
    /// Contents differ and the destination is strictly newer.
    DestinationNewer,
    /// The destination name is taken by a directory, symlink, or special file.
    DestinationNotRegular,
}

impl DecisionReason {
    /// The decision implied by this reason.
    pub fn kind(&self) -> DecisionKind {
        match self {
            Self::NewInSource => DecisionKind::Create,
            Self::SourceNewer => DecisionKind::Update,
            Self::Identical | Self::DestinationNewer | Self::DestinationNotRegular => {
                DecisionKind::Skip
            }
        }
    }
}

impl fmt::Display for DecisionReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NewInSource => write!(f, "new file in source"),
            Self::Identical => write!(f, "identical"),
            Self::SourceNewer => write!(f, "source newer; updating"),
            Self::DestinationNewer => write!(f, "destination newer; skipping"),
            Self::DestinationNotRegular => {
                write!(f, "destination is not a regular file; skipping")
            }
        }
    }
}

/// The outcome of examining one source file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SyncDecision {
    /// Resulting action.
    pub kind: DecisionKind,
    /// Justification for the action.
    pub reason: DecisionReason,
    /// The source file.
    pub source: FileRecord,
    /// The matching destination file, absent for [`DecisionKind::Create`].
    pub destination: Option<FileRecord>,
}

impl SyncDecision {
    /// Build a decision from its reason.
    pub fn new(reason: DecisionReason, source: FileRecord, destination: Option<FileRecord>) -> Self {
        Self {
            kind: reason.kind(),
            reason,
            source,
            destination,
        }
    }

    /// A file that only exists in the source.
    pub fn create(source: FileRecord) -> Self {
        Self::new(DecisionReason::NewInSource, source, None)
    }

    /// Name of the file the decision is about, for display.
    pub fn name(&self) -> &str {
        self.source.name.as_str()
    }

    /// Raw name of the file, for building paths.
    pub fn file_name(&self) -> &OsStr {
        self.source.file_name()
    }
}

impl fmt::Display for SyncDecision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}: {}", self.kind, self.name(), self.reason)
    }
}
