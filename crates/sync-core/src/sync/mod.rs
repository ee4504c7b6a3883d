//! The synchronization pass
//!
//! This module provides:
//! - **action**: planned mutations and the plan holding them
//! - **compare**: the TreeComparator that produces a plan
//! - **executor**: the SyncExecutor that applies it
//! - **pass**: `run_pass`, tying comparison and execution together

mod action;
mod compare;
mod executor;
mod pass;

pub use action::{ActionKind, Plan, ScanIssue, SyncAction};
pub use compare::TreeComparator;
pub use executor::{Outcome, SyncExecutor};
pub use pass::{ActionRecord, PassReport, PassSummary, run_pass};
