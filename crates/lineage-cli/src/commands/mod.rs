//! CLI command implementations

pub mod completions;
pub mod person;
pub mod query;
pub mod relationship;
pub mod tree;
