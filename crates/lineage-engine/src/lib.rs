//! Lineage Engine - Services over the genealogy graph
//!
//! Three collaborating services share one graph backend: the person store
//! (node CRUD), the relationship manager (invariant-checked edge writes),
//! and the query engine (read-side traversals and filters).

pub mod person_store;
pub mod queries;
pub mod relationships;
pub mod seed;

pub use person_store::PersonStore;
pub use queries::QueryEngine;
pub use relationships::RelationshipManager;
