//! Adapter implementations for port traits
//!
//! This module contains concrete implementations that handle I/O:
//!
//! - `git/` - Commit history from a local or cloned git repository

pub mod git;

pub use git::{GitHistory, HistoryError};
