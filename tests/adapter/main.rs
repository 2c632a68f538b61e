//! Adapter tests
//!
//! Exercise `GitHistory` against real repositories created with the git CLI.

#[path = "../common/mod.rs"]
#[allow(dead_code)]
mod common;

mod git_history_test;
