//! One-way folder synchronization for syncfolders
//!
//! This crate implements a single synchronization pass between a source
//! tree and its replica:
//!
//! - **TreeComparator**: walks both trees and plans the mutations that make
//!   the replica identical to the source
//! - **SyncExecutor**: applies planned actions one at a time, isolating
//!   failures and reporting every outcome to an [`EventSink`]
//! - **run_pass**: comparison plus execution, returning a [`PassReport`]
//!
//! # Architecture
//!
//! ```text
//!              sync-cli (driver)
//!                     |
//!                 sync-core
//!                     |
//!                  sync-fs
//! ```
//!
//! No state survives between passes. Every pass recomputes the plan from the
//! two trees, so a failed item is retried by the next pass.
//!
//! # Example
//!
//! ```no_run
//! use sync_core::{PassOptions, SyncTarget, TracingSink, run_pass};
//!
//! fn example() -> sync_core::Result<()> {
//!     let target = SyncTarget::new("source", "replica")?;
//!     target.preflight()?;
//!     let report = run_pass(&target, &PassOptions::default(), &TracingSink)?;
//!     println!("{} actions", report.records.len());
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod events;
pub mod options;
pub mod sync;
pub mod target;

pub use error::{Error, Result};
pub use events::{EventSink, MemorySink, SyncEvent, TracingSink};
pub use options::{PassOptions, SymlinkPolicy};
pub use sync::{
    ActionKind, ActionRecord, Outcome, PassReport, PassSummary, Plan, ScanIssue, SyncAction,
    SyncExecutor, TreeComparator, run_pass,
};
pub use target::SyncTarget;
