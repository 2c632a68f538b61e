//! Output formatting for human and JSON modes
//!
//! This module turns a finalized feature set into a report that can be
//! rendered either as human-readable text or machine-parseable JSON.

use std::collections::BTreeMap;
use std::fmt::Write as _;

use chrono::{DateTime, Utc};
use colored::Colorize;
use serde::Serialize;

use crate::core::models::{Bug, Feature, FeatureSet};
use crate::core::services::OwnershipAttributor;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Output mode for the CLI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// Human-readable output (default)
    #[default]
    Human,
    /// JSON output (machine-readable)
    Json,
}

/// Report over every analyzed feature
#[derive(Debug, Serialize)]
pub struct FeatureReport {
    /// Number of commits analyzed
    pub commits_analyzed: usize,
    /// One entry per feature, sorted by name
    pub features: Vec<FeatureSummary>,
}

/// Report entry for one feature
#[derive(Debug, Serialize)]
pub struct FeatureSummary {
    /// Feature name
    pub name: String,
    /// Earliest matching commit
    pub created_at: Option<DateTime<Utc>>,
    /// Latest matching commit
    pub last_updated: Option<DateTime<Utc>>,
    /// Primary owners, sorted by email
    pub owners: Vec<OwnerShare>,
    /// Backup owners, sorted by email
    pub backup_owners: Vec<OwnerShare>,
    /// Busiest contributors, when requested
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub top_contributors: Vec<String>,
    /// Number of matching commits
    pub commit_count: usize,
    /// Bug fixes, in commit order
    pub bugs: Vec<BugEntry>,
}

/// An owner and their share of a feature's commits
#[derive(Debug, Serialize, PartialEq)]
pub struct OwnerShare {
    /// Author email
    pub email: String,
    /// Share in `[0, 1]`
    pub share: f64,
}

/// A bug fix as shown in the report
#[derive(Debug, Serialize)]
pub struct BugEntry {
    /// Fixing commit
    pub commit_hash: String,
    /// When it was fixed
    pub fixed_at: DateTime<Utc>,
    /// Who fixed it
    pub author_email: String,
    /// Full commit message
    pub description: String,
    /// Files touched by the fix
    pub affected_files: Vec<String>,
}

impl From<&Bug> for BugEntry {
    fn from(bug: &Bug) -> Self {
        Self {
            commit_hash: bug.commit_hash.clone(),
            fixed_at: bug.fixed_at,
            author_email: bug.author_email.clone(),
            description: bug.description.clone(),
            affected_files: bug.affected_files.clone(),
        }
    }
}

/// Options controlling which details end up in the report
#[derive(Debug, Clone, Copy, Default)]
pub struct ReportOptions {
    /// Number of top contributors to list per feature (0 = none)
    pub top: usize,
    /// Leave out features no commit matched
    pub skip_empty: bool,
}

impl FeatureReport {
    /// Build a report from finalized features
    #[must_use]
    pub fn new(
        commits_analyzed: usize,
        features: &FeatureSet,
        attributor: &OwnershipAttributor,
        options: ReportOptions,
    ) -> Self {
        let features = features
            .values()
            .filter(|f| !(options.skip_empty && f.is_empty()))
            .map(|f| FeatureSummary::new(f, attributor, options.top))
            .collect();

        Self {
            commits_analyzed,
            features,
        }
    }

    /// Render the report based on output mode
    pub fn render(&self, mode: OutputMode) {
        match mode {
            OutputMode::Human => print!("{}", self.to_human()),
            OutputMode::Json => self.render_json(),
        }
    }

    /// Human-readable text of the report
    #[must_use]
    pub fn to_human(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "Found {} commits", self.commits_analyzed);
        let _ = writeln!(out, "\n{}", "Feature Analysis:".bold());

        for feature in &self.features {
            feature.write_human(&mut out);
        }
        out
    }

    fn render_json(&self) {
        println!("{}", serde_json::to_string_pretty(self).unwrap_or_default());
    }
}

impl FeatureSummary {
    fn new(feature: &Feature, attributor: &OwnershipAttributor, top: usize) -> Self {
        Self {
            name: feature.name.clone(),
            created_at: feature.created_at,
            last_updated: feature.last_updated,
            owners: owner_shares(&feature.owners),
            backup_owners: owner_shares(&feature.backup_owners),
            top_contributors: attributor.top_owners(&feature.commits, top),
            commit_count: feature.commits.len(),
            bugs: feature.bugs.iter().map(BugEntry::from).collect(),
        }
    }

    fn write_human(&self, out: &mut String) {
        let _ = writeln!(out, "\n{} {}", "Feature:".bold(), self.name.cyan());
        let _ = writeln!(out, "Created: {}", format_date(self.created_at));
        let _ = writeln!(out, "Last Updated: {}", format_date(self.last_updated));

        let _ = writeln!(out, "Primary Owners:");
        for owner in &self.owners {
            let _ = writeln!(out, "  - {} ({:.1}%)", owner.email, owner.share * 100.0);
        }

        let _ = writeln!(out, "Backup Owners:");
        for owner in &self.backup_owners {
            let _ = writeln!(out, "  - {} ({:.1}%)", owner.email, owner.share * 100.0);
        }

        if !self.top_contributors.is_empty() {
            let _ = writeln!(out, "Top Contributors: {}", self.top_contributors.join(", "));
        }

        let _ = writeln!(out, "Number of Commits: {}", self.commit_count);
        let _ = writeln!(out, "Number of Bugs: {}", self.bugs.len());

        if !self.bugs.is_empty() {
            let _ = writeln!(out, "Bug History:");
            for bug in &self.bugs {
                let _ = writeln!(
                    out,
                    "  - [{}] by {}: {}",
                    bug.fixed_at.format(DATE_FORMAT),
                    bug.author_email,
                    bug.description.lines().next().unwrap_or_default()
                );
            }
        }
    }
}

fn owner_shares(map: &BTreeMap<String, f64>) -> Vec<OwnerShare> {
    map.iter()
        .map(|(email, share)| OwnerShare {
            email: email.clone(),
            share: *share,
        })
        .collect()
}

/// Calendar date in UTC, `-` when absent
fn format_date(date: Option<DateTime<Utc>>) -> String {
    date.map_or_else(|| "-".to_string(), |d| d.format(DATE_FORMAT).to_string())
}
