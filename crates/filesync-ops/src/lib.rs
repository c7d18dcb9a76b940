//! File system primitives for filesync.
//!
//! This crate provides the blocking operations a synchronization run is
//! built from: checking and creating directories, comparing file contents
//! byte for byte, and copying files. [`ActionExecutor`] turns CREATE and
//! UPDATE decisions into copies.

mod compare;
mod copy;
mod directory;
mod executor;

pub use compare::files_differ;
pub use copy::{CopyOptions, copy_file};
pub use directory::{create_directory, directory_exists, ensure_directory};
pub use executor::{ActionExecutor, ActionOutcome};
