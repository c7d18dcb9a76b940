//! Directory snapshot builder for filesync.
//!
//! Lists the regular files directly inside a directory (no recursion) using
//! jwalk, recording each file's name, size, and modification time.
//!
//! # Example
//!
//! ```rust,no_run
//! use filesync_scan::SnapshotScanner;
//!
//! let snapshot = SnapshotScanner::new()
//!     .scan_sorted("/path/to/dir".as_ref())
//!     .unwrap();
//!
//! for file in &snapshot.files {
//!     println!("{} ({} bytes)", file.name, file.size);
//! }
//! ```

mod scanner;

pub use scanner::{SnapshotScanner, scan_directory};

// Re-export core types for convenience
pub use filesync_core::{DirectorySnapshot, FileRecord, ModTime, NameFilter, ScanWarning, SyncError};
