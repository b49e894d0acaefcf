//! ReDB graph backend

use crate::error::{StorageError, StorageResult};
use crate::migration::Migratable;
use crate::traits::{GraphBackend, MarriageAttempt, ParentageAttempt};
use async_trait::async_trait;
use lineage_core::{Marriage, Parentage, Person, PersonKey};
use redb::{Database, ReadableTable, TableDefinition};
use std::path::Path;
use std::sync::Mutex;

// Table definitions
const PEOPLE: TableDefinition<&str, &[u8]> = TableDefinition::new("people");
const MARRIAGES: TableDefinition<&str, &[u8]> = TableDefinition::new("marriages");
const PARENTAGES: TableDefinition<&str, &[u8]> = TableDefinition::new("parentages");
const META: TableDefinition<&str, u32> = TableDefinition::new("meta");

const SCHEMA_VERSION_KEY: &str = "schema_version";

/// ReDB graph backend
///
/// Every compound operation (conditional marriage write, paired parentage
/// write, cascading delete) runs inside a single write transaction; a
/// validation failure drops the transaction, so partial edge state never
/// commits.
pub struct RedbBackend {
    db: Mutex<Database>,
}

impl RedbBackend {
    /// Open or create a ReDB database at the given path
    pub fn open(path: impl AsRef<Path>) -> StorageResult<Self> {
        let db = Database::create(path).map_err(|e| StorageError::Database(e.to_string()))?;

        // Initialize tables
        {
            let write_txn = db
                .begin_write()
                .map_err(|e| StorageError::Database(e.to_string()))?;
            {
                let _ = write_txn.open_table(PEOPLE)?;
                let _ = write_txn.open_table(MARRIAGES)?;
                let _ = write_txn.open_table(PARENTAGES)?;
                let _ = write_txn.open_table(META)?;
            }
            write_txn
                .commit()
                .map_err(|e| StorageError::Database(e.to_string()))?;
        }

        let backend = Self { db: Mutex::new(db) };
        backend.migrate_to_latest()?;
        Ok(backend)
    }

    fn lock(&self) -> StorageResult<std::sync::MutexGuard<'_, Database>> {
        self.db
            .lock()
            .map_err(|e| StorageError::Database(e.to_string()))
    }

    // Table keys are the JSON form of the key tuple. Delimiter-joined
    // composites would let names containing the delimiter collide; JSON
    // escaping keeps every distinct key distinct.

    fn person_key(key: &PersonKey) -> StorageResult<String> {
        Ok(serde_json::to_string(key)?)
    }

    fn marriage_key(marriage: &Marriage) -> StorageResult<String> {
        Ok(serde_json::to_string(&(&marriage.a, &marriage.b))?)
    }

    fn parentage_key(child: &PersonKey, parent: &PersonKey) -> StorageResult<String> {
        Ok(serde_json::to_string(&(child, parent))?)
    }
}

#[async_trait]
impl GraphBackend for RedbBackend {
    async fn initialize(&self) -> StorageResult<()> {
        Ok(())
    }

    async fn close(&self) -> StorageResult<()> {
        Ok(())
    }

    async fn health_check(&self) -> StorageResult<bool> {
        Ok(true)
    }

    async fn insert_person(&self, person: &Person) -> StorageResult<bool> {
        let key = Self::person_key(&person.key)?;
        let value = serde_json::to_vec(person)?;

        let db = self.lock()?;
        let write_txn = db
            .begin_write()
            .map_err(|e| StorageError::Database(e.to_string()))?;
        {
            let mut table = write_txn.open_table(PEOPLE)?;
            if table.get(key.as_str())?.is_some() {
                // Dropping the transaction aborts it
                return Ok(false);
            }
            table.insert(key.as_str(), value.as_slice())?;
        }
        write_txn.commit()?;

        Ok(true)
    }

    async fn get_person(&self, key: &PersonKey) -> StorageResult<Option<Person>> {
        let key = Self::person_key(key)?;

        let db = self.lock()?;
        let read_txn = db
            .begin_read()
            .map_err(|e| StorageError::Database(e.to_string()))?;
        let table = read_txn.open_table(PEOPLE)?;

        if let Some(value) = table.get(key.as_str())? {
            let person: Person = serde_json::from_slice(value.value())?;
            Ok(Some(person))
        } else {
            Ok(None)
        }
    }

    async fn all_people(&self) -> StorageResult<Vec<Person>> {
        let db = self.lock()?;
        let read_txn = db
            .begin_read()
            .map_err(|e| StorageError::Database(e.to_string()))?;
        let table = read_txn.open_table(PEOPLE)?;

        let mut people = Vec::new();
        for entry in table.iter()? {
            let (_, value) = entry?;
            let person: Person = serde_json::from_slice(value.value())?;
            people.push(person);
        }

        Ok(people)
    }

    async fn update_person(&self, person: &Person) -> StorageResult<bool> {
        let key = Self::person_key(&person.key)?;
        let value = serde_json::to_vec(person)?;

        let db = self.lock()?;
        let write_txn = db
            .begin_write()
            .map_err(|e| StorageError::Database(e.to_string()))?;
        {
            let mut table = write_txn.open_table(PEOPLE)?;
            if table.get(key.as_str())?.is_none() {
                return Ok(false);
            }
            table.insert(key.as_str(), value.as_slice())?;
        }
        write_txn.commit()?;

        Ok(true)
    }

    async fn remove_person(&self, key: &PersonKey) -> StorageResult<bool> {
        let db = self.lock()?;
        let write_txn = db
            .begin_write()
            .map_err(|e| StorageError::Database(e.to_string()))?;

        {
            let mut table = write_txn.open_table(PEOPLE)?;
            if table.remove(Self::person_key(key)?.as_str())?.is_none() {
                return Ok(false);
            }
        }

        // Cascading detach within the same transaction
        {
            let mut table = write_txn.open_table(MARRIAGES)?;
            let doomed: Vec<String> = {
                let mut keys = Vec::new();
                for entry in table.iter()? {
                    let (edge_key, value) = entry?;
                    let marriage: Marriage = serde_json::from_slice(value.value())?;
                    if marriage.involves(key) {
                        keys.push(edge_key.value().to_string());
                    }
                }
                keys
            };
            for edge_key in doomed {
                table.remove(edge_key.as_str())?;
            }
        }
        {
            let mut table = write_txn.open_table(PARENTAGES)?;
            let doomed: Vec<String> = {
                let mut keys = Vec::new();
                for entry in table.iter()? {
                    let (edge_key, value) = entry?;
                    let parentage: Parentage = serde_json::from_slice(value.value())?;
                    if parentage.involves(key) {
                        keys.push(edge_key.value().to_string());
                    }
                }
                keys
            };
            for edge_key in doomed {
                table.remove(edge_key.as_str())?;
            }
        }

        write_txn.commit()?;
        Ok(true)
    }

    async fn clear(&self) -> StorageResult<()> {
        let db = self.lock()?;
        let write_txn = db
            .begin_write()
            .map_err(|e| StorageError::Database(e.to_string()))?;
        {
            // Drop and recreate the data tables; schema metadata survives
            let _ = write_txn.delete_table(PEOPLE)?;
            let _ = write_txn.delete_table(MARRIAGES)?;
            let _ = write_txn.delete_table(PARENTAGES)?;
            let _ = write_txn.open_table(PEOPLE)?;
            let _ = write_txn.open_table(MARRIAGES)?;
            let _ = write_txn.open_table(PARENTAGES)?;
        }
        write_txn.commit()?;
        Ok(())
    }

    async fn count_people(&self) -> StorageResult<usize> {
        let db = self.lock()?;
        let read_txn = db
            .begin_read()
            .map_err(|e| StorageError::Database(e.to_string()))?;
        let table = read_txn.open_table(PEOPLE)?;

        let mut count = 0;
        for entry in table.iter()? {
            entry?;
            count += 1;
        }
        Ok(count)
    }

    async fn try_create_marriage(
        &self,
        p1: &PersonKey,
        p2: &PersonKey,
    ) -> StorageResult<MarriageAttempt> {
        let db = self.lock()?;
        let write_txn = db
            .begin_write()
            .map_err(|e| StorageError::Database(e.to_string()))?;

        let attempt = {
            let people = write_txn.open_table(PEOPLE)?;
            if people.get(Self::person_key(p1)?.as_str())?.is_none() {
                MarriageAttempt::MissingPerson(p1.clone())
            } else if people.get(Self::person_key(p2)?.as_str())?.is_none() {
                MarriageAttempt::MissingPerson(p2.clone())
            } else {
                let mut marriages = write_txn.open_table(MARRIAGES)?;

                let mut taken = None;
                for entry in marriages.iter()? {
                    let (_, value) = entry?;
                    let marriage: Marriage = serde_json::from_slice(value.value())?;
                    if marriage.involves(p1) {
                        taken = Some(p1.clone());
                        break;
                    }
                    if marriage.involves(p2) {
                        taken = Some(p2.clone());
                        break;
                    }
                }

                match taken {
                    Some(key) => MarriageAttempt::AlreadyMarried(key),
                    None => {
                        let marriage = Marriage::new(p1.clone(), p2.clone());
                        let value = serde_json::to_vec(&marriage)?;
                        marriages
                            .insert(Self::marriage_key(&marriage)?.as_str(), value.as_slice())?;
                        MarriageAttempt::Created
                    }
                }
            }
        };

        match attempt {
            MarriageAttempt::Created => {
                write_txn.commit()?;
                Ok(MarriageAttempt::Created)
            }
            // Validation failed: dropping the transaction rolls back
            other => Ok(other),
        }
    }

    async fn try_create_parentage(
        &self,
        child: &PersonKey,
        parent1: &PersonKey,
        parent2: &PersonKey,
    ) -> StorageResult<ParentageAttempt> {
        let db = self.lock()?;
        let write_txn = db
            .begin_write()
            .map_err(|e| StorageError::Database(e.to_string()))?;

        let attempt = {
            let people = write_txn.open_table(PEOPLE)?;
            let mut missing = None;
            for key in [child, parent1, parent2] {
                if people.get(Self::person_key(key)?.as_str())?.is_none() {
                    missing = Some(key.clone());
                    break;
                }
            }

            match missing {
                Some(key) => ParentageAttempt::MissingPerson(key),
                None => {
                    let mut parentages = write_txn.open_table(PARENTAGES)?;
                    for parent in [parent1, parent2] {
                        let edge_key = Self::parentage_key(child, parent)?;
                        if parentages.get(edge_key.as_str())?.is_none() {
                            let edge = Parentage::new(child.clone(), parent.clone());
                            let value = serde_json::to_vec(&edge)?;
                            parentages.insert(edge_key.as_str(), value.as_slice())?;
                        }
                    }
                    ParentageAttempt::Created
                }
            }
        };

        match attempt {
            ParentageAttempt::Created => {
                write_txn.commit()?;
                Ok(ParentageAttempt::Created)
            }
            other => Ok(other),
        }
    }

    async fn marriages(&self) -> StorageResult<Vec<Marriage>> {
        let db = self.lock()?;
        let read_txn = db
            .begin_read()
            .map_err(|e| StorageError::Database(e.to_string()))?;
        let table = read_txn.open_table(MARRIAGES)?;

        let mut marriages = Vec::new();
        for entry in table.iter()? {
            let (_, value) = entry?;
            let marriage: Marriage = serde_json::from_slice(value.value())?;
            marriages.push(marriage);
        }

        Ok(marriages)
    }

    async fn parentages(&self) -> StorageResult<Vec<Parentage>> {
        let db = self.lock()?;
        let read_txn = db
            .begin_read()
            .map_err(|e| StorageError::Database(e.to_string()))?;
        let table = read_txn.open_table(PARENTAGES)?;

        let mut parentages = Vec::new();
        for entry in table.iter()? {
            let (_, value) = entry?;
            let parentage: Parentage = serde_json::from_slice(value.value())?;
            parentages.push(parentage);
        }

        Ok(parentages)
    }
}

impl Migratable for RedbBackend {
    fn get_schema_version(&self) -> StorageResult<u32> {
        let db = self.lock()?;
        let read_txn = db
            .begin_read()
            .map_err(|e| StorageError::Database(e.to_string()))?;
        let table = read_txn.open_table(META)?;
        Ok(table.get(SCHEMA_VERSION_KEY)?.map(|v| v.value()).unwrap_or(0))
    }

    fn set_schema_version(&self, version: u32) -> StorageResult<()> {
        let db = self.lock()?;
        let write_txn = db
            .begin_write()
            .map_err(|e| StorageError::Database(e.to_string()))?;
        {
            let mut table = write_txn.open_table(META)?;
            table.insert(SCHEMA_VERSION_KEY, version)?;
        }
        write_txn.commit()?;
        Ok(())
    }

    fn run_migration(&self, version: u32) -> StorageResult<()> {
        match version {
            // v1 tables are created by open()
            1 => Ok(()),
            other => Err(StorageError::Migration(format!(
                "Unknown schema version: {}",
                other
            ))),
        }
    }
}
