//! Core domain logic for featmap
//!
//! This module contains pure business logic with no I/O dependencies.
//! All external interactions are abstracted through port traits.
//!
//! ## Architecture
//!
//! - `models/` - Domain types (`CommitRecord`, `Feature`, `Taxonomy`, ...)
//! - `services/` - Classification, ownership and the pipeline
//! - `ports/` - Trait definitions for external dependencies

pub mod models;
pub mod ports;
pub mod services;
