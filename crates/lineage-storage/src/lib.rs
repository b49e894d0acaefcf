//! Lineage Storage - Graph backends for the genealogy graph
//!
//! This crate provides the Graph Backend collaborator: keyed person nodes,
//! the two typed edge kinds, and the atomic conditional writes the
//! relationship invariants require.

#![allow(clippy::result_large_err)]

pub mod error;
pub mod memory;
pub mod migration;
pub mod redb;
pub mod traits;

pub use error::{StorageError, StorageResult};
pub use memory::MemoryBackend;
pub use migration::{Migratable, CURRENT_VERSION};
pub use redb::RedbBackend;
pub use traits::{GraphBackend, MarriageAttempt, ParentageAttempt};
