//! Domain models for featmap
//!
//! Pure data structures with no I/O dependencies.
//!
//! - [`CommitRecord`] - One commit of the analyzed history
//! - [`ConventionalCommit`] - Parsed `type(scope)!: description` header
//! - [`Feature`] / [`Bug`] - Per-feature results
//! - [`Taxonomy`] - Feature names and their compiled patterns

mod commit;
mod conventional;
mod feature;
mod taxonomy;

pub use commit::CommitRecord;
pub use conventional::ConventionalCommit;
pub use feature::{Bug, Feature, FeatureSet};
pub use taxonomy::{FeatureMatcher, Taxonomy, TaxonomyError};
