//! In-memory graph backend for testing

use crate::error::{StorageError, StorageResult};
use crate::traits::{GraphBackend, MarriageAttempt, ParentageAttempt};
use async_trait::async_trait;
use lineage_core::{Marriage, Parentage, Person, PersonKey};
use std::collections::HashMap;
use std::sync::RwLock;

/// Shared graph state. Nodes and both edge lists live under one lock so
/// every compound operation (conditional marriage write, paired parentage
/// write, cascading delete) is atomic with respect to concurrent callers.
#[derive(Default)]
struct State {
    people: HashMap<PersonKey, Person>,
    marriages: Vec<Marriage>,
    parentages: Vec<Parentage>,
}

/// In-memory graph backend
///
/// Useful for testing and temporary storage.
pub struct MemoryBackend {
    state: RwLock<State>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self {
            state: RwLock::new(State::default()),
        }
    }

    fn read(&self) -> StorageResult<std::sync::RwLockReadGuard<'_, State>> {
        self.state
            .read()
            .map_err(|e| StorageError::Database(format!("Lock error: {}", e)))
    }

    fn write(&self) -> StorageResult<std::sync::RwLockWriteGuard<'_, State>> {
        self.state
            .write()
            .map_err(|e| StorageError::Database(format!("Lock error: {}", e)))
    }
}

impl Default for MemoryBackend {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl GraphBackend for MemoryBackend {
    async fn initialize(&self) -> StorageResult<()> {
        Ok(())
    }

    async fn close(&self) -> StorageResult<()> {
        Ok(())
    }

    async fn health_check(&self) -> StorageResult<bool> {
        Ok(true)
    }

    // Person node operations

    async fn insert_person(&self, person: &Person) -> StorageResult<bool> {
        let mut state = self.write()?;
        if state.people.contains_key(&person.key) {
            return Ok(false);
        }
        state.people.insert(person.key.clone(), person.clone());
        Ok(true)
    }

    async fn get_person(&self, key: &PersonKey) -> StorageResult<Option<Person>> {
        Ok(self.read()?.people.get(key).cloned())
    }

    async fn all_people(&self) -> StorageResult<Vec<Person>> {
        Ok(self.read()?.people.values().cloned().collect())
    }

    async fn update_person(&self, person: &Person) -> StorageResult<bool> {
        let mut state = self.write()?;
        if !state.people.contains_key(&person.key) {
            return Ok(false);
        }
        state.people.insert(person.key.clone(), person.clone());
        Ok(true)
    }

    async fn remove_person(&self, key: &PersonKey) -> StorageResult<bool> {
        let mut state = self.write()?;
        if state.people.remove(key).is_none() {
            return Ok(false);
        }
        // Cascading detach under the same lock
        state.marriages.retain(|m| !m.involves(key));
        state.parentages.retain(|p| !p.involves(key));
        Ok(true)
    }

    async fn clear(&self) -> StorageResult<()> {
        let mut state = self.write()?;
        state.people.clear();
        state.marriages.clear();
        state.parentages.clear();
        Ok(())
    }

    async fn count_people(&self) -> StorageResult<usize> {
        Ok(self.read()?.people.len())
    }

    // Edge operations

    async fn try_create_marriage(
        &self,
        p1: &PersonKey,
        p2: &PersonKey,
    ) -> StorageResult<MarriageAttempt> {
        let mut state = self.write()?;

        if !state.people.contains_key(p1) {
            return Ok(MarriageAttempt::MissingPerson(p1.clone()));
        }
        if !state.people.contains_key(p2) {
            return Ok(MarriageAttempt::MissingPerson(p2.clone()));
        }
        // Monogamy: reject if EITHER party holds any marriage edge,
        // including two people each married to different third parties.
        for candidate in [p1, p2] {
            if state.marriages.iter().any(|m| m.involves(candidate)) {
                return Ok(MarriageAttempt::AlreadyMarried(candidate.clone()));
            }
        }

        state.marriages.push(Marriage::new(p1.clone(), p2.clone()));
        Ok(MarriageAttempt::Created)
    }

    async fn try_create_parentage(
        &self,
        child: &PersonKey,
        parent1: &PersonKey,
        parent2: &PersonKey,
    ) -> StorageResult<ParentageAttempt> {
        let mut state = self.write()?;

        for key in [child, parent1, parent2] {
            if !state.people.contains_key(key) {
                return Ok(ParentageAttempt::MissingPerson(key.clone()));
            }
        }

        for parent in [parent1, parent2] {
            let exists = state
                .parentages
                .iter()
                .any(|p| &p.child == child && &p.parent == parent);
            if !exists {
                state
                    .parentages
                    .push(Parentage::new(child.clone(), parent.clone()));
            }
        }
        Ok(ParentageAttempt::Created)
    }

    async fn marriages(&self) -> StorageResult<Vec<Marriage>> {
        Ok(self.read()?.marriages.clone())
    }

    async fn parentages(&self) -> StorageResult<Vec<Parentage>> {
        Ok(self.read()?.parentages.clone())
    }
}
