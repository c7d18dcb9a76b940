//! Carries out CREATE and UPDATE decisions.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::info;

use filesync_core::{DecisionKind, SyncDecision, SyncError};

use crate::copy::{CopyOptions, copy_file};

/// What the executor did for one decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActionOutcome {
    /// The file was copied.
    Copied { bytes: u64 },
    /// A copy was due but dry-run mode is on.
    Planned,
    /// Nothing to do for a SKIP.
    Skipped,
}

impl ActionOutcome {
    /// Bytes written to the destination.
    pub fn bytes_copied(&self) -> u64 {
        match self {
            Self::Copied { bytes } => *bytes,
            _ => 0,
        }
    }
}

/// Copies files from a source root into a destination root.
#[derive(Debug, Clone)]
pub struct ActionExecutor {
    source_root: PathBuf,
    dest_root: PathBuf,
    options: CopyOptions,
    dry_run: bool,
}

impl ActionExecutor {
    /// Create an executor between two directories.
    pub fn new(source_root: impl Into<PathBuf>, dest_root: impl Into<PathBuf>) -> Self {
        Self {
            source_root: source_root.into(),
            dest_root: dest_root.into(),
            options: CopyOptions::default(),
            dry_run: false,
        }
    }

    /// Set whether copies keep the source modification time.
    pub fn with_preserve_timestamps(mut self, preserve: bool) -> Self {
        self.options.preserve_timestamps = preserve;
        self
    }

    /// Set dry-run mode, where no file is written.
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Destination directory.
    pub fn dest_root(&self) -> &Path {
        &self.dest_root
    }

    /// Check if the executor is in dry-run mode.
    pub fn is_dry_run(&self) -> bool {
        self.dry_run
    }

    /// Execute a decision.
    pub fn execute(&self, decision: &SyncDecision) -> Result<ActionOutcome, SyncError> {
        if decision.kind == DecisionKind::Skip {
            return Ok(ActionOutcome::Skipped);
        }

        let source = self.source_root.join(decision.file_name());
        let dest = self.dest_root.join(decision.file_name());

        if self.dry_run {
            info!(kind = %decision.kind, file = decision.name(), "dry run, not copying");
            return Ok(ActionOutcome::Planned);
        }

        let bytes = copy_file(&source, &dest, self.options)?;
        info!(kind = %decision.kind, file = decision.name(), bytes, "copied");
        Ok(ActionOutcome::Copied { bytes })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use filesync_core::{DecisionReason, FileRecord, ModTime};
    use std::fs;
    use tempfile::TempDir;

    fn setup() -> (TempDir, PathBuf, PathBuf) {
        let temp = TempDir::new().unwrap();
        let src = temp.path().join("src");
        let dst = temp.path().join("dst");
        fs::create_dir(&src).unwrap();
        fs::create_dir(&dst).unwrap();
        fs::write(src.join("a.txt"), "X").unwrap();
        (temp, src, dst)
    }

    fn record() -> FileRecord {
        FileRecord::new("a.txt", ModTime::new(1, 0), 1)
    }

    #[test]
    fn test_execute_create() {
        let (_temp, src, dst) = setup();
        let executor = ActionExecutor::new(&src, &dst);

        let outcome = executor.execute(&SyncDecision::create(record())).unwrap();

        assert_eq!(outcome, ActionOutcome::Copied { bytes: 1 });
        assert_eq!(fs::read_to_string(dst.join("a.txt")).unwrap(), "X");
    }

    #[test]
    fn test_execute_skip_does_nothing() {
        let (_temp, src, dst) = setup();
        let executor = ActionExecutor::new(&src, &dst);
        let decision = SyncDecision::new(DecisionReason::Identical, record(), Some(record()));

        let outcome = executor.execute(&decision).unwrap();

        assert_eq!(outcome, ActionOutcome::Skipped);
        assert!(!dst.join("a.txt").exists());
    }

    #[test]
    fn test_execute_dry_run() {
        let (_temp, src, dst) = setup();
        let executor = ActionExecutor::new(&src, &dst).with_dry_run(true);

        let outcome = executor.execute(&SyncDecision::create(record())).unwrap();

        assert_eq!(outcome, ActionOutcome::Planned);
        assert_eq!(outcome.bytes_copied(), 0);
        assert!(!dst.join("a.txt").exists());
    }

    #[cfg(unix)]
    #[test]
    fn test_execute_uses_raw_file_name() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let (_temp, src, dst) = setup();
        let raw = OsStr::from_bytes(b"caf\xe9.txt");
        fs::write(src.join(raw), "cafe").unwrap();
        let executor = ActionExecutor::new(&src, &dst);
        let decision = SyncDecision::create(FileRecord::from_os_name(raw, ModTime::new(1, 0), 4));

        let outcome = executor.execute(&decision).unwrap();

        assert_eq!(outcome, ActionOutcome::Copied { bytes: 4 });
        assert_eq!(fs::read(dst.join(raw)).unwrap(), b"cafe");
    }

    #[test]
    fn test_execute_missing_source_fails() {
        let (_temp, src, dst) = setup();
        fs::remove_file(src.join("a.txt")).unwrap();
        let executor = ActionExecutor::new(&src, &dst);

        let err = executor.execute(&SyncDecision::create(record())).unwrap_err();

        assert!(matches!(err, SyncError::CopyFailed { .. }));
    }
}
