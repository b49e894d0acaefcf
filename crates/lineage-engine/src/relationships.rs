//! Relationship manager - invariant-checked edge writes

use lineage_core::{Error, PersonKey, Result};
use lineage_storage::{GraphBackend, MarriageAttempt, ParentageAttempt};
use std::sync::Arc;

/// Writes marriage and parentage edges, enforcing the relationship
/// invariants. All existence and monogamy checks happen inside the
/// backend's conditional writes, so a rejected request leaves the graph
/// exactly as it was.
pub struct RelationshipManager {
    backend: Arc<dyn GraphBackend>,
}

impl RelationshipManager {
    pub fn new(backend: Arc<dyn GraphBackend>) -> Self {
        Self { backend }
    }

    /// Marry two existing, unmarried people. The edge is symmetric; the
    /// argument order does not matter. Rejected with `AlreadyMarried` when
    /// either party holds a marriage edge, naming the first offender found.
    pub async fn add_marriage(&self, p1: &PersonKey, p2: &PersonKey) -> Result<()> {
        if p1 == p2 {
            return Err(Error::SelfRelationship(p1.clone()));
        }

        let attempt = self
            .backend
            .try_create_marriage(p1, p2)
            .await
            .map_err(Error::backend)?;

        match attempt {
            MarriageAttempt::Created => {
                tracing::info!("Married {} and {}", p1, p2);
                Ok(())
            }
            MarriageAttempt::MissingPerson(key) => Err(Error::NotFound(key)),
            MarriageAttempt::AlreadyMarried(key) => Err(Error::AlreadyMarried(key)),
        }
    }

    /// Record that `child` is the child of both parents: two child→parent
    /// edges written as one unit. Duplicate (child, parent) pairs collapse
    /// silently; the two parents are not required to be distinct or married.
    pub async fn add_parentage(
        &self,
        child: &PersonKey,
        parent1: &PersonKey,
        parent2: &PersonKey,
    ) -> Result<()> {
        if child == parent1 || child == parent2 {
            return Err(Error::SelfRelationship(child.clone()));
        }

        let attempt = self
            .backend
            .try_create_parentage(child, parent1, parent2)
            .await
            .map_err(Error::backend)?;

        match attempt {
            ParentageAttempt::Created => {
                tracing::info!("Recorded {} as child of {} and {}", child, parent1, parent2);
                Ok(())
            }
            ParentageAttempt::MissingPerson(key) => Err(Error::NotFound(key)),
        }
    }
}
