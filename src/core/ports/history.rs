//! Commit history port
//!
//! Defines how the pipeline obtains the commits it classifies.

use crate::core::models::CommitRecord;

/// Source of a materialized commit history
///
/// Implementations own acquisition (opening, cloning, walking) and report
/// failures as opaque errors; the pipeline never interprets them.
#[cfg_attr(test, mockall::automock)]
pub trait CommitHistory: Send + Sync {
    /// Every commit reachable from the analyzed head, newest first
    fn commits(&self) -> anyhow::Result<Vec<CommitRecord>>;

    /// Human-readable description of where the history comes from
    fn source(&self) -> String;
}
