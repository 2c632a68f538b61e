//! Port traits (interfaces) for external dependencies
//!
//! These traits define the boundary between the classification core and the
//! systems that feed it. Implementations live in the `adapters` module.

mod history;

#[cfg(test)]
pub use history::MockCommitHistory;
pub use history::CommitHistory;
