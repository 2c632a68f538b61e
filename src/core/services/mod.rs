//! Business logic services
//!
//! Pure orchestration logic that operates on domain models.
//! These services have no I/O dependencies - they operate on
//! data passed in and return results.
//!
//! - [`bug_detector`] - Flag commits that fix bugs
//! - [`classifier`] - Match commits to taxonomy features
//! - [`ownership`] - Primary/backup owners by commit share
//! - [`pipeline`] - Compose the above over a commit list

pub mod bug_detector;
pub mod classifier;
pub mod ownership;
pub mod pipeline;

pub use bug_detector::is_bug_fix;
pub use classifier::{FeatureAccumulator, MatchSource, classify};
pub use ownership::{
    Ownership, OwnershipAttributor, ThresholdError, Thresholds, contribution_counts,
};
pub use pipeline::{Analysis, Pipeline, analyze};
