//! Core types and errors for filesync.
//!
//! This crate provides the data structures shared by the scanning, file
//! operation, and decision crates: file records, directory snapshots,
//! decisions, configuration, and errors.

mod config;
mod decision;
mod error;
mod record;
mod snapshot;

pub use config::{DEFAULT_BUFFER_SIZE, NameFilter, SyncConfig, SyncConfigBuilder};
pub use decision::{DecisionKind, DecisionReason, SyncDecision};
pub use error::{ScanWarning, SyncError, WarningKind};
pub use record::{FileRecord, ModTime};
pub use snapshot::DirectorySnapshot;
