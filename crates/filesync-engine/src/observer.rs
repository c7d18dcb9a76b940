//! Run events delivered to callers as they happen.

use std::path::Path;

use filesync_core::SyncDecision;
use filesync_ops::ActionOutcome;

/// Something that happened during a run.
#[derive(Debug, Clone, Copy)]
pub enum SyncEvent<'a> {
    /// The destination directory did not exist and was created.
    DestinationCreated(&'a Path),
    /// Both directories were scanned and files are about to be processed.
    Started {
        source: &'a Path,
        destination: &'a Path,
    },
    /// A decision was made for a source file.
    Decided(&'a SyncDecision),
    /// The executor finished with a decision.
    Executed(&'a SyncDecision, ActionOutcome),
}

/// Receives [`SyncEvent`]s in the order they occur.
pub trait SyncObserver {
    /// Handle one event.
    fn on_event(&mut self, event: &SyncEvent<'_>);
}

impl<F> SyncObserver for F
where
    F: FnMut(&SyncEvent<'_>),
{
    fn on_event(&mut self, event: &SyncEvent<'_>) {
        self(event)
    }
}

/// Observer that ignores every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl SyncObserver for NoopObserver {
    fn on_event(&mut self, _event: &SyncEvent<'_>) {}
}
