//! Per-file decisions and the synchronization run.

use std::path::{Path, PathBuf};
use std::time::Instant;

use tracing::{debug, info, warn};

use filesync_core::{
    DecisionReason, DirectorySnapshot, FileRecord, SyncConfig, SyncDecision, SyncError,
};
use filesync_ops::{ActionExecutor, directory_exists, ensure_directory, files_differ};
use filesync_scan::SnapshotScanner;

use crate::matcher::SnapshotIndex;
use crate::observer::{NoopObserver, SyncEvent, SyncObserver};
use crate::report::SyncReport;

/// Decides what to do with each source file against a fixed destination snapshot.
#[derive(Debug)]
pub struct DecisionEngine<'a> {
    source: &'a DirectorySnapshot,
    destination: &'a DirectorySnapshot,
    index: SnapshotIndex<'a>,
    buffer_size: usize,
}

impl<'a> DecisionEngine<'a> {
    /// Create an engine over two snapshots.
    pub fn new(
        source: &'a DirectorySnapshot,
        destination: &'a DirectorySnapshot,
        buffer_size: usize,
    ) -> Self {
        Self {
            source,
            destination,
            index: SnapshotIndex::new(destination),
            buffer_size,
        }
    }

    /// Decide the fate of one source file.
    ///
    /// A missing counterpart means CREATE, unless the name is taken by a
    /// directory, symlink, or special file, which is never written over.
    /// Identical bytes mean SKIP whatever the timestamps. Differing bytes mean
    /// UPDATE unless the destination is strictly newer; equal timestamps go to
    /// the source.
    pub fn decide(&self, file: &FileRecord) -> Result<SyncDecision, SyncError> {
        let Some(dest) = self.index.find_match(file) else {
            if self.index.is_occupied(file.file_name()) {
                debug!(file = %file.name, "destination entry is not a regular file");
                return Ok(SyncDecision::new(
                    DecisionReason::DestinationNotRegular,
                    file.clone(),
                    None,
                ));
            }
            return Ok(SyncDecision::create(file.clone()));
        };

        let source_path = self.source.path_of(file);
        let dest_path = self.destination.path_of(dest);

        let reason = if !files_differ(&source_path, &dest_path, self.buffer_size)? {
            DecisionReason::Identical
        } else if dest.is_newer_than(file) {
            DecisionReason::DestinationNewer
        } else {
            DecisionReason::SourceNewer
        };

        debug!(
            file = %file.name,
            source_mtime = %file.modified,
            dest_mtime = %dest.modified,
            ?reason,
            "compared"
        );

        Ok(SyncDecision::new(reason, file.clone(), Some(dest.clone())))
    }

    /// Decide every source file in snapshot order without executing anything.
    pub fn plan(&self) -> Result<Vec<SyncDecision>, SyncError> {
        self.source.files.iter().map(|f| self.decide(f)).collect()
    }
}

/// Runs a complete one-way synchronization.
#[derive(Debug, Clone)]
pub struct SyncEngine {
    config: SyncConfig,
}

impl SyncEngine {
    /// Create an engine for a configuration.
    pub fn new(config: SyncConfig) -> Self {
        Self { config }
    }

    /// Configuration in use.
    pub fn config(&self) -> &SyncConfig {
        &self.config
    }

    /// Run the synchronization.
    pub fn run(&self) -> Result<SyncReport, SyncError> {
        self.run_with(&mut NoopObserver)
    }

    /// Run the synchronization, reporting each step to `observer`.
    ///
    /// Source files are processed one at a time in name order; each is
    /// decided and, for CREATE or UPDATE, copied before the next is looked
    /// at. The destination snapshot is taken once and never refreshed. The
    /// first error aborts the run.
    pub fn run_with<O>(&self, observer: &mut O) -> Result<SyncReport, SyncError>
    where
        O: SyncObserver + ?Sized,
    {
        let start = Instant::now();
        let config = &self.config;

        if !directory_exists(&config.source) {
            return Err(SyncError::SourceMissing {
                path: config.source.clone(),
            });
        }

        // A dry run never creates the destination; a missing one is simply empty.
        let dest_absent = !config.destination.exists();
        let destination_created = if config.dry_run && dest_absent && config.create_destination {
            false
        } else {
            ensure_directory(&config.destination, config.create_destination)?
        };
        if destination_created {
            observer.on_event(&SyncEvent::DestinationCreated(&config.destination));
        }

        let filter = config.name_filter()?;
        let source = SnapshotScanner::with_filter(filter).scan_sorted(&config.source)?;
        let destination = if dest_absent && !destination_created {
            DirectorySnapshot::empty(absolute(&config.destination))
        } else {
            SnapshotScanner::new().scan_sorted(&config.destination)?
        };

        info!(
            source = %source.root_path.display(),
            destination = %destination.root_path.display(),
            source_files = source.len(),
            destination_files = destination.len(),
            dry_run = config.dry_run,
            "starting sync"
        );

        let mut report = SyncReport::new(
            source.root_path.clone(),
            destination.root_path.clone(),
            config.dry_run,
        );
        report.destination_created = destination_created;
        observer.on_event(&SyncEvent::Started {
            source: &source.root_path,
            destination: &destination.root_path,
        });
        report.warnings.extend(source.warnings.iter().cloned());
        report.warnings.extend(destination.warnings.iter().cloned());
        for warning in &report.warnings {
            warn!(path = %warning.path.display(), "{}", warning.message);
        }

        let decisions = DecisionEngine::new(&source, &destination, config.buffer_size);
        let executor = ActionExecutor::new(&source.root_path, &destination.root_path)
            .with_preserve_timestamps(config.preserve_times)
            .with_dry_run(config.dry_run);

        for file in &source.files {
            let decision = decisions.decide(file)?;
            info!(file = %file.name, kind = %decision.kind, reason = %decision.reason, "decided");
            observer.on_event(&SyncEvent::Decided(&decision));

            let outcome = executor.execute(&decision)?;
            observer.on_event(&SyncEvent::Executed(&decision, outcome));

            report.push(decision, outcome);
        }

        report.elapsed = start.elapsed();
        info!(
            created = report.stats.created,
            updated = report.stats.updated,
            skipped = report.stats.skipped(),
            bytes = report.stats.bytes_copied,
            "sync complete"
        );

        Ok(report)
    }
}

/// Make a path absolute without touching the file system.
fn absolute(path: &Path) -> PathBuf {
    std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf())
}

/// Synchronize `source` into `destination` with default options.
pub fn sync_directories(
    source: impl Into<PathBuf>,
    destination: impl Into<PathBuf>,
) -> Result<SyncReport, SyncError> {
    SyncEngine::new(SyncConfig::new(source, destination)).run()
}
