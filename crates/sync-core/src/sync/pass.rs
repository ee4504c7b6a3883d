//! A complete synchronization pass

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use super::action::{ScanIssue, SyncAction};
use super::compare::TreeComparator;
use super::executor::{Outcome, SyncExecutor};
use crate::events::{EventSink, SyncEvent};
use crate::{PassOptions, Result, SyncTarget};

/// One executed action and how it went
#[derive(Debug, Clone, Serialize)]
pub struct ActionRecord {
    #[serde(flatten)]
    pub action: SyncAction,
    pub outcome: Outcome,
}

/// Counts of pass outcomes
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PassSummary {
    pub applied: usize,
    pub planned: usize,
    pub failed: usize,
    pub issues: usize,
}

impl PassSummary {
    /// True if nothing failed and nothing needed doing.
    pub fn is_in_sync(&self) -> bool {
        self.applied == 0 && self.planned == 0 && self.failed == 0 && self.issues == 0
    }
}

/// Report from a synchronization pass
#[derive(Debug, Clone, Serialize)]
pub struct PassReport {
    /// Identifier for correlating log lines of one pass
    pub pass_id: Uuid,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub dry_run: bool,
    /// Every planned action, in execution order, with its outcome
    pub records: Vec<ActionRecord>,
    /// Entries that could not be compared
    pub issues: Vec<ScanIssue>,
}

impl PassReport {
    pub fn summary(&self) -> PassSummary {
        let mut summary = PassSummary {
            issues: self.issues.len(),
            ..PassSummary::default()
        };
        for record in &self.records {
            match record.outcome {
                Outcome::Applied => summary.applied += 1,
                Outcome::Planned => summary.planned += 1,
                Outcome::Failed { .. } => summary.failed += 1,
            }
        }
        summary
    }

    /// The actions of this pass, in order.
    pub fn actions(&self) -> impl Iterator<Item = &SyncAction> {
        self.records.iter().map(|r| &r.action)
    }

    pub fn has_failures(&self) -> bool {
        !self.issues.is_empty() || self.records.iter().any(|r| r.outcome.is_failed())
    }
}

/// Run one synchronization pass.
///
/// Compares the two trees, then applies each planned action in order,
/// emitting one event per action (and one per comparison failure) to
/// `sink`. Individual failures are recorded in the report; the remaining
/// actions still run.
///
/// # Errors
///
/// Only pass-level preconditions fail the whole pass: the source root must
/// still exist and be a directory.
pub fn run_pass(target: &SyncTarget, options: &PassOptions, sink: &dyn EventSink) -> Result<PassReport> {
    let pass_id = Uuid::new_v4();
    let span = tracing::info_span!("pass", id = %pass_id);
    let _guard = span.enter();

    target.check_source()?;

    let started_at = Utc::now();
    tracing::debug!(
        source = %target.source_root().display(),
        replica = %target.replica_root().display(),
        dry_run = options.dry_run,
        "Starting pass"
    );

    let plan = TreeComparator::new(target, options.symlinks).compare();
    for issue in &plan.issues {
        sink.emit(&SyncEvent::scan_failed(issue.path.clone(), issue.error.clone()));
    }

    let executor = SyncExecutor::new(target).dry_run(options.dry_run);
    let records: Vec<ActionRecord> = plan
        .actions
        .into_iter()
        .map(|action| {
            let outcome = executor.execute(&action, sink);
            ActionRecord { action, outcome }
        })
        .collect();

    let report = PassReport {
        pass_id,
        started_at,
        finished_at: Utc::now(),
        dry_run: options.dry_run,
        records,
        issues: plan.issues,
    };

    let summary = report.summary();
    if summary.is_in_sync() {
        tracing::debug!("Replica already in sync");
    } else {
        tracing::info!(
            applied = summary.applied,
            planned = summary.planned,
            failed = summary.failed,
            issues = summary.issues,
            "Pass complete"
        );
    }

    Ok(report)
}
