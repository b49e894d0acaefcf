//! Lineage Core - Domain model for the genealogy graph
//!
//! This crate provides the core data types, validation rules, and pure
//! kinship algorithms for the Lineage system.

pub mod error;
pub mod kinship;
pub mod limits;
pub mod person;
pub mod relationship;

pub use error::{Error, Result};
pub use person::{NewPerson, Person, PersonKey, PersonUpdate};
pub use relationship::{EdgeKind, Marriage, Parentage, RelationId, TreeEdge};
