//! Graph backend trait definitions

use crate::error::StorageResult;
use async_trait::async_trait;
use lineage_core::{Marriage, Parentage, Person, PersonKey};

/// Outcome of an atomic marriage conditional write.
///
/// The existence checks, the monogamy check, and the edge insert are one
/// indivisible step inside the backend; two concurrent calls can never both
/// observe "not yet married" and both commit.
#[derive(Debug, Clone, PartialEq)]
pub enum MarriageAttempt {
    /// Edge created
    Created,
    /// One of the endpoints does not exist
    MissingPerson(PersonKey),
    /// The named person already has a marriage edge
    AlreadyMarried(PersonKey),
}

/// Outcome of an atomic parentage conditional write (two edges, one unit).
#[derive(Debug, Clone, PartialEq)]
pub enum ParentageAttempt {
    /// Both child→parent edges created
    Created,
    /// The child or one of the parents does not exist
    MissingPerson(PersonKey),
}

/// Trait for graph backend implementations
#[async_trait]
pub trait GraphBackend: Send + Sync {
    /// Initialize the storage (create tables, run migrations, etc.)
    async fn initialize(&self) -> StorageResult<()>;

    /// Close the storage connection
    async fn close(&self) -> StorageResult<()>;

    /// Health check
    async fn health_check(&self) -> StorageResult<bool>;

    // ─────────────────────────────────────────────────────────────────────────
    // Person Node Operations
    // ─────────────────────────────────────────────────────────────────────────

    /// Insert a person node. Returns `false` (and writes nothing) when the
    /// key is already taken.
    async fn insert_person(&self, person: &Person) -> StorageResult<bool>;

    /// Get a person by key
    async fn get_person(&self, key: &PersonKey) -> StorageResult<Option<Person>>;

    /// Get every person node
    async fn all_people(&self) -> StorageResult<Vec<Person>>;

    /// Overwrite an existing person node. Returns `false` when the key does
    /// not exist.
    async fn update_person(&self, person: &Person) -> StorageResult<bool>;

    /// Remove a person node and every incident marriage and parentage edge
    /// in one atomic step. Returns `false` when the key does not exist.
    async fn remove_person(&self, key: &PersonKey) -> StorageResult<bool>;

    /// Remove every node and edge
    async fn clear(&self) -> StorageResult<()>;

    /// Number of person nodes
    async fn count_people(&self) -> StorageResult<usize>;

    // ─────────────────────────────────────────────────────────────────────────
    // Edge Operations (atomic conditional writes)
    // ─────────────────────────────────────────────────────────────────────────

    /// Atomically verify both endpoints exist and neither is married, then
    /// create the symmetric marriage edge.
    async fn try_create_marriage(
        &self,
        p1: &PersonKey,
        p2: &PersonKey,
    ) -> StorageResult<MarriageAttempt>;

    /// Atomically verify the child and both parents exist, then create the
    /// two child→parent edges. Duplicate (child, parent) pairs collapse.
    async fn try_create_parentage(
        &self,
        child: &PersonKey,
        parent1: &PersonKey,
        parent2: &PersonKey,
    ) -> StorageResult<ParentageAttempt>;

    /// Every marriage edge
    async fn marriages(&self) -> StorageResult<Vec<Marriage>>;

    /// Every parentage edge
    async fn parentages(&self) -> StorageResult<Vec<Parentage>>;

    // ─────────────────────────────────────────────────────────────────────────
    // Adjacency Reads
    // ─────────────────────────────────────────────────────────────────────────

    /// The spouse of `key`, if any
    async fn spouse_of(&self, key: &PersonKey) -> StorageResult<Option<PersonKey>> {
        Ok(self
            .marriages()
            .await?
            .iter()
            .find_map(|m| m.spouse_of(key).cloned()))
    }

    /// The parents of `key`
    async fn parents_of(&self, key: &PersonKey) -> StorageResult<Vec<PersonKey>> {
        Ok(self
            .parentages()
            .await?
            .into_iter()
            .filter(|edge| &edge.child == key)
            .map(|edge| edge.parent)
            .collect())
    }

    /// The children of `key`
    async fn children_of(&self, key: &PersonKey) -> StorageResult<Vec<PersonKey>> {
        Ok(self
            .parentages()
            .await?
            .into_iter()
            .filter(|edge| &edge.parent == key)
            .map(|edge| edge.child)
            .collect())
    }
}
