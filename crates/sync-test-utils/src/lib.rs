//! Shared test utilities for the syncfolders workspace.
//!
//! This crate provides standardised source/replica fixtures so crate test
//! suites don't each rebuild them. It is a dev-dependency only; never published.
//!
//! # Modules
//!
//! - [`tree`]: [`TestTree`] with a source and a replica directory, plus
//!   snapshot-based assertions

pub mod tree;

pub use tree::{Node, TestTree, snapshot};
