//! The search session: one full scan of a document set.
//!
//! A session owns the `ResultAggregate` and mutates it single-threadedly,
//! one document at a time. Cancellation is cooperative and checked only
//! at the per-document loop head, so a document's scan always runs to
//! completion once started. Events fire at defined points only: aggregate
//! cleared, document inserted, session completed.

use std::collections::HashSet;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::query::Query;
use crate::results::ResultAggregate;
use crate::scan::scan_document;
use crate::source::WorkbookSource;

/// Cooperative cancellation handle. Cloneable; any clone can request
/// cancellation and the session observes it between documents.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    flag: Arc<AtomicBool>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.flag.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::Relaxed)
    }
}

/// A document the session could not read. Non-fatal: the session keeps
/// going and the document is simply absent from the aggregate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanFailure {
    pub path: PathBuf,
    pub message: String,
}

/// Final accounting for one session run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchOutcome {
    /// Total matches across all documents in the aggregate.
    pub match_count: usize,
    /// Documents that produced at least one match.
    pub documents_with_matches: usize,
    /// Documents whose scan started (and therefore finished).
    pub scanned: usize,
    /// Documents that could not be read.
    pub failures: Vec<ScanFailure>,
    /// True when the run stopped early at a cancellation check.
    pub cancelled: bool,
}

/// Notifications fired at the aggregate's defined change points.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchEvent {
    /// The aggregate was cleared for a new generation.
    Cleared,
    /// One document finished scanning with matches and was inserted.
    DocumentAdded { path: PathBuf, match_count: usize },
    /// The run finished, fully or at a cancellation boundary.
    Completed { match_count: usize, cancelled: bool },
}

/// Callback type for receiving search events.
pub type EventCallback = Box<dyn FnMut(SearchEvent)>;

/// Orchestrates scanning across a document set.
pub struct SearchSession<S> {
    source: S,
    aggregate: ResultAggregate,
    callback: Option<EventCallback>,
}

impl<S: WorkbookSource> SearchSession<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            aggregate: ResultAggregate::new(),
            callback: None,
        }
    }

    /// Register a callback for change notifications. At most one; a new
    /// registration replaces the old.
    pub fn on_event(&mut self, callback: EventCallback) {
        self.callback = Some(callback);
    }

    /// The current result tree. During a run a reader through this
    /// accessor sees a partial, monotonically growing aggregate; after
    /// completion it is stable until the next run clears it.
    pub fn results(&self) -> &ResultAggregate {
        &self.aggregate
    }

    /// Run one search over `paths`, in order.
    ///
    /// Clears the previous generation first. Duplicate paths are scanned
    /// once (the aggregate is keyed by path, so a second insert would be
    /// unreachable through the read projections). Per-document read
    /// failures are recorded and skipped; an already-cancelled token
    /// still clears the aggregate but scans nothing.
    pub fn run(&mut self, paths: &[PathBuf], query: &Query, cancel: &CancelToken) -> SearchOutcome {
        self.aggregate.clear();
        self.emit(SearchEvent::Cleared);

        let mut failures = Vec::new();
        let mut seen: HashSet<&PathBuf> = HashSet::new();
        let mut scanned = 0;
        let mut cancelled = false;

        for path in paths {
            // Coarse cancellation: between documents only, never mid-scan
            if cancel.is_cancelled() {
                cancelled = true;
                break;
            }

            if !seen.insert(path) {
                continue;
            }

            scanned += 1;
            match scan_document(&self.source, path, query) {
                Ok(Some(document)) => {
                    let event = SearchEvent::DocumentAdded {
                        path: document.path.clone(),
                        match_count: document.match_count(),
                    };
                    self.aggregate.insert(document);
                    self.emit(event);
                }
                Ok(None) => {}
                Err(err) => failures.push(ScanFailure {
                    path: err.path,
                    message: err.message,
                }),
            }
        }

        let outcome = SearchOutcome {
            match_count: self.aggregate.total_matches(),
            documents_with_matches: self.aggregate.documents().count(),
            scanned,
            failures,
            cancelled,
        };
        self.emit(SearchEvent::Completed {
            match_count: outcome.match_count,
            cancelled,
        });
        outcome
    }

    fn emit(&mut self, event: SearchEvent) {
        if let Some(callback) = &mut self.callback {
            callback(event);
        }
    }
}

/// Simple event collector for testing.
#[derive(Debug, Clone, Default)]
pub struct EventCollector {
    events: Arc<std::sync::Mutex<Vec<SearchEvent>>>,
}

impl EventCollector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn callback(&self) -> EventCallback {
        let events = Arc::clone(&self.events);
        Box::new(move |event| events.lock().unwrap().push(event))
    }

    pub fn take(&self) -> Vec<SearchEvent> {
        std::mem::take(&mut *self.events.lock().unwrap())
    }
}
