//! Classification pipeline
//!
//! Turns a materialized commit list into one finalized [`Feature`] per
//! taxonomy entry. Each commit header is parsed once; features are then
//! processed in parallel, each by a single worker that owns its accumulator
//! and walks the commits in input order.

use std::sync::Arc;

use anyhow::Context;
use log::{debug, info};
use rayon::prelude::*;

use super::bug_detector::is_bug_fix;
use super::classifier::{FeatureAccumulator, classify};
use super::ownership::OwnershipAttributor;
use crate::core::models::{
    CommitRecord, ConventionalCommit, Feature, FeatureMatcher, FeatureSet, Taxonomy,
};
use crate::core::ports::CommitHistory;

/// A commit with its per-commit derived data
struct PreparedCommit {
    record: Arc<CommitRecord>,
    parsed: Option<ConventionalCommit>,
    is_bug_fix: bool,
}

/// Classification and ownership over a commit list
#[derive(Debug, Clone)]
pub struct Pipeline {
    taxonomy: Arc<Taxonomy>,
    attributor: OwnershipAttributor,
}

impl Pipeline {
    /// Create a pipeline over a taxonomy
    #[must_use]
    pub const fn new(taxonomy: Arc<Taxonomy>, attributor: OwnershipAttributor) -> Self {
        Self {
            taxonomy,
            attributor,
        }
    }

    /// Taxonomy in use
    #[must_use]
    pub fn taxonomy(&self) -> &Taxonomy {
        &self.taxonomy
    }

    /// Ownership attributor in use
    #[must_use]
    pub const fn attributor(&self) -> &OwnershipAttributor {
        &self.attributor
    }

    /// Classify every commit and finalize every feature
    ///
    /// Every taxonomy entry appears in the result, including features no
    /// commit matched.
    #[must_use]
    pub fn run(&self, commits: &[CommitRecord]) -> FeatureSet {
        let prepared: Vec<PreparedCommit> = commits
            .par_iter()
            .map(|record| {
                let parsed = ConventionalCommit::parse(&record.message);
                let is_bug_fix = is_bug_fix(&record.message, parsed.as_ref());
                PreparedCommit {
                    record: Arc::new(record.clone()),
                    parsed,
                    is_bug_fix,
                }
            })
            .collect();

        let conventional = prepared.iter().filter(|c| c.parsed.is_some()).count();
        debug!("{conventional} of {} commit(s) follow the conventional format", commits.len());

        let features: FeatureSet = self
            .taxonomy
            .features()
            .par_iter()
            .map(|matcher| {
                let feature = self.build_feature(matcher, &prepared);
                (feature.name.clone(), feature)
            })
            .collect();

        let matched = features.values().filter(|f| !f.is_empty()).count();
        info!("{matched} of {} feature(s) matched at least one commit", features.len());

        features
    }

    fn build_feature(&self, matcher: &FeatureMatcher, commits: &[PreparedCommit]) -> Feature {
        let mut acc = FeatureAccumulator::new(matcher.name());
        for commit in commits {
            if let Some(source) = classify(matcher, &commit.record, commit.parsed.as_ref()) {
                debug!(
                    "{} -> {} (matched on {source:?})",
                    commit.record.short_hash(),
                    matcher.name()
                );
                acc.record(Arc::clone(&commit.record), commit.is_bug_fix);
            }
        }
        acc.finish(&self.attributor)
    }
}

/// Outcome of analyzing one history
#[derive(Debug, Clone, PartialEq)]
pub struct Analysis {
    /// Number of commits read from the history
    pub commit_count: usize,
    /// Finalized features
    pub features: FeatureSet,
}

/// Load a history through its port and run the pipeline over it
///
/// History errors are returned as-is, with the source named in the context.
pub fn analyze(history: &dyn CommitHistory, pipeline: &Pipeline) -> anyhow::Result<Analysis> {
    let commits = history
        .commits()
        .with_context(|| format!("Failed to read commit history from {}", history.source()))?;
    info!("Loaded {} commit(s) from {}", commits.len(), history.source());

    Ok(Analysis {
        commit_count: commits.len(),
        features: pipeline.run(&commits),
    })
}
