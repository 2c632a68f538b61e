//! Ownership attribution by contribution share
//!
//! Owners are derived from a feature's finalized commit list, counting commits
//! per author email:
//!
//! - every author at or above the primary threshold is a primary owner;
//! - when someone is primary, the remaining authors at or above the backup
//!   threshold are backups;
//! - when nobody is primary, every author at or above the backup threshold is
//!   a backup, so fragmented features still surface their contributors.

use std::borrow::Borrow;
use std::collections::BTreeMap;

use thiserror::Error;

use crate::core::models::CommitRecord;

/// Default share needed to be a primary owner
pub const DEFAULT_PRIMARY_THRESHOLD: f64 = 0.2;

/// Default share needed to be a backup owner
pub const DEFAULT_BACKUP_THRESHOLD: f64 = 0.1;

/// Invalid threshold value
#[derive(Debug, Clone, Copy, Error, PartialEq)]
pub enum ThresholdError {
    /// Threshold outside `(0, 1]`
    #[error("{name} threshold must be in (0, 1], got {value}")]
    OutOfRange {
        /// Which threshold
        name: &'static str,
        /// The rejected value
        value: f64,
    },
}

/// Primary and backup share thresholds
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Thresholds {
    primary: f64,
    backup: f64,
}

impl Thresholds {
    /// Validate and build thresholds; both must lie in `(0, 1]`
    pub fn new(primary: f64, backup: f64) -> Result<Self, ThresholdError> {
        Ok(Self {
            primary: check_range("primary", primary)?,
            backup: check_range("backup", backup)?,
        })
    }

    /// Share needed to be a primary owner
    #[must_use]
    pub const fn primary(&self) -> f64 {
        self.primary
    }

    /// Share needed to be a backup owner
    #[must_use]
    pub const fn backup(&self) -> f64 {
        self.backup
    }
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            primary: DEFAULT_PRIMARY_THRESHOLD,
            backup: DEFAULT_BACKUP_THRESHOLD,
        }
    }
}

fn check_range(name: &'static str, value: f64) -> Result<f64, ThresholdError> {
    if value > 0.0 && value <= 1.0 {
        Ok(value)
    } else {
        Err(ThresholdError::OutOfRange { name, value })
    }
}

/// Result of an ownership computation
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Ownership {
    /// Primary owners: email -> share
    pub owners: BTreeMap<String, f64>,
    /// Backup owners: email -> share
    pub backups: BTreeMap<String, f64>,
}

/// Computes owners from a commit list
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct OwnershipAttributor {
    thresholds: Thresholds,
}

impl OwnershipAttributor {
    /// Create an attributor with the given thresholds
    #[must_use]
    pub const fn new(thresholds: Thresholds) -> Self {
        Self { thresholds }
    }

    /// Thresholds in use
    #[must_use]
    pub const fn thresholds(&self) -> Thresholds {
        self.thresholds
    }

    /// Compute primary and backup owners for a commit list
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn attribute<C: Borrow<CommitRecord>>(&self, commits: &[C]) -> Ownership {
        if commits.is_empty() {
            return Ownership::default();
        }

        let total = commits.len() as f64;
        let shares: Vec<(String, f64)> = contribution_counts(commits)
            .into_iter()
            .map(|(email, count)| (email, count as f64 / total))
            .collect();

        let owners: BTreeMap<String, f64> = shares
            .iter()
            .filter(|(_, share)| *share >= self.thresholds.primary)
            .cloned()
            .collect();

        let backups = shares
            .into_iter()
            .filter(|(email, share)| {
                *share >= self.thresholds.backup && !owners.contains_key(email)
            })
            .collect();

        Ownership { owners, backups }
    }

    /// Up to `n` author emails with the most commits, busiest first.
    ///
    /// Authors with equal counts are ordered by email.
    #[must_use]
    pub fn top_owners<C: Borrow<CommitRecord>>(&self, commits: &[C], n: usize) -> Vec<String> {
        if n == 0 {
            return Vec::new();
        }

        let mut ranked: Vec<(String, usize)> = contribution_counts(commits).into_iter().collect();
        ranked.sort_by(|(a_email, a_count), (b_email, b_count)| {
            b_count.cmp(a_count).then_with(|| a_email.cmp(b_email))
        });
        ranked.into_iter().take(n).map(|(email, _)| email).collect()
    }
}

/// Commits per author email
#[must_use]
pub fn contribution_counts<C: Borrow<CommitRecord>>(commits: &[C]) -> BTreeMap<String, usize> {
    let mut counts = BTreeMap::new();
    for commit in commits {
        *counts.entry(commit.borrow().author_email.clone()).or_insert(0) += 1;
    }
    counts
}
