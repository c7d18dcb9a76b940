//! Synchronization decision engine for filesync.
//!
//! Given a source and a destination directory, the engine snapshots both,
//! matches files by name, and decides per source file:
//!
//! - **CREATE** when the destination has no file of that name
//! - **SKIP** when both files have identical bytes, whatever their timestamps
//! - **UPDATE** when contents differ and the source is newer or equally old
//! - **SKIP** when contents differ and the destination is strictly newer
//!
//! CREATE and UPDATE are carried out immediately, one file at a time, in
//! byte-wise name order. Files that only exist in the destination are never
//! touched.
//!
//! ```rust,no_run
//! use filesync_engine::{SyncConfig, SyncEngine, SyncEvent};
//!
//! let config = SyncConfig::new("/data/in", "/data/out");
//! let report = SyncEngine::new(config)
//!     .run_with(&mut |event: &SyncEvent<'_>| {
//!         if let SyncEvent::Decided(decision) = event {
//!             println!("{decision}");
//!         }
//!     })
//!     .unwrap();
//!
//! println!("{} created, {} updated", report.stats.created, report.stats.updated);
//! ```

mod engine;
mod matcher;
mod observer;
mod report;

pub use engine::{DecisionEngine, SyncEngine, sync_directories};
pub use matcher::{SnapshotIndex, find_match};
pub use observer::{NoopObserver, SyncEvent, SyncObserver};
pub use report::{ReportEntry, SyncReport, SyncStats, describe};

// Re-export core types
pub use filesync_core::{
    DecisionKind, DecisionReason, DirectorySnapshot, FileRecord, ModTime, SyncConfig,
    SyncDecision, SyncError,
};
pub use filesync_ops::ActionOutcome;
