//! Summary of a completed run.

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use filesync_core::{DecisionReason, ScanWarning, SyncDecision};
use filesync_ops::ActionOutcome;

/// Counters for a run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncStats {
    /// Files copied because they were missing from the destination.
    pub created: u64,
    /// Destination files overwritten with newer source content.
    pub updated: u64,
    /// Files skipped because both sides already match.
    pub identical: u64,
    /// Files skipped because the destination copy is newer.
    pub destination_newer: u64,
    /// Files skipped because the destination name is not a regular file.
    pub not_regular: u64,
    /// Bytes written to the destination.
    pub bytes_copied: u64,
}

impl SyncStats {
    /// Count one decision and its outcome.
    pub fn record(&mut self, decision: &SyncDecision, outcome: &ActionOutcome) {
        match decision.reason {
            DecisionReason::NewInSource => self.created += 1,
            DecisionReason::SourceNewer => self.updated += 1,
            DecisionReason::Identical => self.identical += 1,
            DecisionReason::DestinationNewer => self.destination_newer += 1,
            DecisionReason::DestinationNotRegular => self.not_regular += 1,
        }
        self.bytes_copied += outcome.bytes_copied();
    }

    /// Total files examined.
    pub fn total(&self) -> u64 {
        self.created + self.updated + self.skipped()
    }

    /// Files skipped for any reason.
    pub fn skipped(&self) -> u64 {
        self.identical + self.destination_newer + self.not_regular
    }
}

/// One processed source file.
#[derive(Debug, Clone, Serialize)]
pub struct ReportEntry {
    /// The decision taken.
    pub decision: SyncDecision,
    /// What the executor did with it.
    pub outcome: ActionOutcome,
}

impl ReportEntry {
    /// Human-readable trace line for this entry.
    pub fn describe(&self) -> String {
        describe(&self.decision, &self.outcome)
    }
}

/// Complete record of a synchronization run.
#[derive(Debug, Clone, Serialize)]
pub struct SyncReport {
    /// Canonical source directory.
    pub source_root: PathBuf,
    /// Destination directory.
    pub destination_root: PathBuf,
    /// Whether the destination directory was created by this run.
    pub destination_created: bool,
    /// Whether copies were suppressed.
    pub dry_run: bool,
    /// Processed files, in the order they were handled.
    pub entries: Vec<ReportEntry>,
    /// Aggregate counters.
    pub stats: SyncStats,
    /// Entries skipped while scanning either directory.
    pub warnings: Vec<ScanWarning>,
    /// Wall-clock duration of the run.
    pub elapsed: Duration,
}

impl SyncReport {
    /// Create an empty report.
    pub fn new(source_root: PathBuf, destination_root: PathBuf, dry_run: bool) -> Self {
        Self {
            source_root,
            destination_root,
            destination_created: false,
            dry_run,
            entries: Vec::new(),
            stats: SyncStats::default(),
            warnings: Vec::new(),
            elapsed: Duration::ZERO,
        }
    }

    /// Append a processed file.
    pub fn push(&mut self, decision: SyncDecision, outcome: ActionOutcome) {
        self.stats.record(&decision, &outcome);
        self.entries.push(ReportEntry { decision, outcome });
    }

    /// Decisions in processing order.
    pub fn decisions(&self) -> impl Iterator<Item = &SyncDecision> {
        self.entries.iter().map(|e| &e.decision)
    }

    /// Check if the run changed nothing.
    pub fn is_noop(&self) -> bool {
        self.stats.created == 0 && self.stats.updated == 0
    }
}

/// Human-readable trace line for a decision and its outcome.
pub fn describe(decision: &SyncDecision, outcome: &ActionOutcome) -> String {
    let name = decision.name();
    let planned = matches!(outcome, ActionOutcome::Planned);
    match (decision.reason, planned) {
        (DecisionReason::NewInSource, false) => format!("created: {name}"),
        (DecisionReason::NewInSource, true) => format!("would create: {name}"),
        (DecisionReason::SourceNewer, false) => format!("updated: {name}"),
        (DecisionReason::SourceNewer, true) => format!("would update: {name}"),
        (DecisionReason::Identical, _) => format!("identical: {name}"),
        (DecisionReason::DestinationNewer, _) => {
            format!("skipped (destination newer): {name}")
        }
        (DecisionReason::DestinationNotRegular, _) => {
            format!("skipped (destination not a regular file): {name}")
        }
    }
}
