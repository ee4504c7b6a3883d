//! Mutation events and the sinks that receive them
//!
//! Every executed action produces exactly one event. The core never formats
//! or persists events itself; that is up to the sink.

use std::path::PathBuf;
use std::sync::Mutex;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::sync::ActionKind;

/// Something that happened during a pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum SyncEvent {
    /// A mutation succeeded
    Applied {
        kind: ActionKind,
        source: Option<PathBuf>,
        destination: PathBuf,
        timestamp: DateTime<Utc>,
    },
    /// A mutation would have been performed (dry run)
    Planned {
        kind: ActionKind,
        source: Option<PathBuf>,
        destination: PathBuf,
        timestamp: DateTime<Utc>,
    },
    /// A mutation failed
    Failed {
        kind: ActionKind,
        path: PathBuf,
        error: String,
        timestamp: DateTime<Utc>,
    },
    /// An entry could not be compared
    ScanFailed {
        path: PathBuf,
        error: String,
        timestamp: DateTime<Utc>,
    },
}

impl SyncEvent {
    pub fn applied(kind: ActionKind, source: Option<PathBuf>, destination: PathBuf) -> Self {
        Self::Applied {
            kind,
            source,
            destination,
            timestamp: Utc::now(),
        }
    }

    pub fn planned(kind: ActionKind, source: Option<PathBuf>, destination: PathBuf) -> Self {
        Self::Planned {
            kind,
            source,
            destination,
            timestamp: Utc::now(),
        }
    }

    pub fn failed(kind: ActionKind, path: PathBuf, error: String) -> Self {
        Self::Failed {
            kind,
            path,
            error,
            timestamp: Utc::now(),
        }
    }

    pub fn scan_failed(path: PathBuf, error: String) -> Self {
        Self::ScanFailed {
            path,
            error,
            timestamp: Utc::now(),
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Self::Failed { .. } | Self::ScanFailed { .. })
    }

    /// The action kind, for events produced by the executor.
    pub fn kind(&self) -> Option<ActionKind> {
        match self {
            Self::Applied { kind, .. } | Self::Planned { kind, .. } | Self::Failed { kind, .. } => {
                Some(*kind)
            }
            Self::ScanFailed { .. } => None,
        }
    }
}

/// Receives pass events.
pub trait EventSink {
    fn emit(&self, event: &SyncEvent);
}

/// Forwards events to `tracing`: successes at INFO, failures at ERROR.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl EventSink for TracingSink {
    fn emit(&self, event: &SyncEvent) {
        match event {
            SyncEvent::Applied {
                kind,
                source,
                destination,
                ..
            } => match source {
                Some(source) => tracing::info!(
                    action = %kind,
                    source = %source.display(),
                    destination = %destination.display(),
                    "{}",
                    kind.verb()
                ),
                None => tracing::info!(
                    action = %kind,
                    destination = %destination.display(),
                    "{}",
                    kind.verb()
                ),
            },
            SyncEvent::Planned {
                kind, destination, ..
            } => tracing::info!(
                action = %kind,
                destination = %destination.display(),
                "[dry-run] {}",
                kind.verb()
            ),
            SyncEvent::Failed {
                kind, path, error, ..
            } => tracing::error!(action = %kind, path = %path.display(), error = %error, "Action failed"),
            SyncEvent::ScanFailed { path, error, .. } => {
                tracing::error!(path = %path.display(), error = %error, "Comparison failed")
            }
        }
    }
}

/// Collects events in memory.
#[derive(Debug, Default)]
pub struct MemorySink {
    events: Mutex<Vec<SyncEvent>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything emitted so far.
    pub fn events(&self) -> Vec<SyncEvent> {
        self.events
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    /// Remove and return everything emitted so far.
    pub fn take(&self) -> Vec<SyncEvent> {
        std::mem::take(
            &mut *self
                .events
                .lock()
                .unwrap_or_else(|poisoned| poisoned.into_inner()),
        )
    }
}

impl EventSink for MemorySink {
    fn emit(&self, event: &SyncEvent) {
        self.events
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(event.clone());
    }
}
