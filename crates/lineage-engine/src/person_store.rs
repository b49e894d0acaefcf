//! Person store - CRUD over person nodes

use chrono::Utc;
use lineage_core::limits::{validate_new_person, validate_update};
use lineage_core::{Error, NewPerson, Person, PersonKey, PersonUpdate, Result};
use lineage_storage::GraphBackend;
use std::sync::Arc;

/// CRUD service for person nodes.
///
/// Uniqueness of the (first name, last name) key is enforced here through
/// the backend's conditional insert; relationship edges are out of scope
/// except for the cascading detach on delete, which the backend performs.
pub struct PersonStore {
    backend: Arc<dyn GraphBackend>,
}

impl PersonStore {
    pub fn new(backend: Arc<dyn GraphBackend>) -> Self {
        Self { backend }
    }

    /// Create a person. Fails with `DuplicateKey` when the name pair is
    /// already taken, `InvalidArgument` when a field fails validation.
    pub async fn create(&self, new: NewPerson) -> Result<Person> {
        let today = Utc::now().date_naive();
        validate_new_person(&new, today)?;

        let person = Person::from_new(new);
        let inserted = self
            .backend
            .insert_person(&person)
            .await
            .map_err(Error::backend)?;
        if !inserted {
            return Err(Error::DuplicateKey(person.key));
        }

        tracing::info!("Created person {}", person.key);
        Ok(person)
    }

    /// Look up a single person by key
    pub async fn read(&self, key: &PersonKey) -> Result<Person> {
        self.backend
            .get_person(key)
            .await
            .map_err(Error::backend)?
            .ok_or_else(|| Error::NotFound(key.clone()))
    }

    /// Every person, sorted by key for stable output
    pub async fn list_all(&self) -> Result<Vec<Person>> {
        let mut people = self.backend.all_people().await.map_err(Error::backend)?;
        people.sort_by(|a, b| a.key.cmp(&b.key));
        Ok(people)
    }

    /// Apply a partial update to an existing person. The key itself cannot
    /// change through this path.
    pub async fn update(&self, key: &PersonKey, update: PersonUpdate) -> Result<Person> {
        let today = Utc::now().date_naive();
        validate_update(&update, today)?;

        let mut person = self.read(key).await?;
        person.apply_update(&update);

        let updated = self
            .backend
            .update_person(&person)
            .await
            .map_err(Error::backend)?;
        if !updated {
            // Deleted between read and write
            return Err(Error::NotFound(key.clone()));
        }

        tracing::info!("Updated person {}", person.key);
        Ok(person)
    }

    /// Delete a person and detach every incident relationship edge
    pub async fn delete(&self, key: &PersonKey) -> Result<()> {
        let removed = self
            .backend
            .remove_person(key)
            .await
            .map_err(Error::backend)?;
        if !removed {
            return Err(Error::NotFound(key.clone()));
        }

        tracing::info!("Deleted person {}", key);
        Ok(())
    }

    /// Delete every person and every relationship edge. Succeeds on an
    /// empty graph.
    pub async fn delete_all(&self) -> Result<()> {
        self.backend.clear().await.map_err(Error::backend)?;
        tracing::warn!("Deleted all people and relationships");
        Ok(())
    }

    /// Number of person nodes
    pub async fn count(&self) -> Result<usize> {
        self.backend.count_people().await.map_err(Error::backend)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use lineage_storage::MemoryBackend;

    fn store() -> PersonStore {
        PersonStore::new(Arc::new(MemoryBackend::new()))
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[tokio::test]
    async fn test_create_and_read() {
        let store = store();
        let created = store
            .create(NewPerson::new("John", "Doe", date(1950, 7, 15), "Engineer"))
            .await
            .unwrap();

        let read = store.read(&created.key).await.unwrap();
        assert_eq!(read, created);
    }

    #[tokio::test]
    async fn test_create_duplicate_key() {
        let store = store();
        let new = NewPerson::new("John", "Doe", date(1950, 7, 15), "Engineer");
        store.create(new.clone()).await.unwrap();

        // Same name pair, different fields: still a duplicate
        let other = NewPerson::new("John", "Doe", date(1980, 1, 1), "Doctor");
        let err = store.create(other).await.unwrap_err();
        assert!(matches!(err, Error::DuplicateKey(key) if key == new.key()));
    }

    #[tokio::test]
    async fn test_create_rejects_invalid_fields() {
        let store = store();
        let err = store
            .create(NewPerson::new("John", "Doe", date(1950, 7, 15), ""))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::InvalidArgument(_)));

        let err = store
            .create(NewPerson::new("", "Doe", date(1950, 7, 15), "Engineer"))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::InvalidArgument(_)));
    }

    #[tokio::test]
    async fn test_read_missing() {
        let store = store();
        let key = PersonKey::new("No", "Body");
        let err = store.read(&key).await.unwrap_err();
        assert!(matches!(err, Error::NotFound(k) if k == key));
    }

    #[tokio::test]
    async fn test_list_all_sorted() {
        let store = store();
        store
            .create(NewPerson::new("Mike", "Doe", date(1980, 3, 2), "Teacher"))
            .await
            .unwrap();
        store
            .create(NewPerson::new("Jane", "Doe", date(1952, 1, 1), "Homemaker"))
            .await
            .unwrap();

        let people = store.list_all().await.unwrap();
        assert_eq!(people.len(), 2);
        assert_eq!(people[0].key.first_name, "Jane");
        assert_eq!(people[1].key.first_name, "Mike");
    }

    #[tokio::test]
    async fn test_update_partial() {
        let store = store();
        let created = store
            .create(NewPerson::new("John", "Doe", date(1950, 7, 15), "Engineer"))
            .await
            .unwrap();

        let updated = store
            .update(
                &created.key,
                PersonUpdate::new().with_occupation("Retired Engineer"),
            )
            .await
            .unwrap();

        assert_eq!(updated.occupation, "Retired Engineer");
        assert_eq!(updated.birthdate, created.birthdate);
    }

    #[tokio::test]
    async fn test_update_empty_rejected() {
        let store = store();
        let created = store
            .create(NewPerson::new("John", "Doe", date(1950, 7, 15), "Engineer"))
            .await
            .unwrap();

        let err = store
            .update(&created.key, PersonUpdate::new())
            .await
            .unwrap_err();
        assert!(matches!(err, Error::InvalidArgument(_)));
    }

    #[tokio::test]
    async fn test_update_missing() {
        let store = store();
        let err = store
            .update(
                &PersonKey::new("No", "Body"),
                PersonUpdate::new().with_occupation("Ghost"),
            )
            .await
            .unwrap_err();
        assert!(matches!(err, Error::NotFound(_)));
    }

    #[tokio::test]
    async fn test_delete_and_count() {
        let store = store();
        let created = store
            .create(NewPerson::new("John", "Doe", date(1950, 7, 15), "Engineer"))
            .await
            .unwrap();
        assert_eq!(store.count().await.unwrap(), 1);

        store.delete(&created.key).await.unwrap();
        assert_eq!(store.count().await.unwrap(), 0);

        let err = store.delete(&created.key).await.unwrap_err();
        assert!(matches!(err, Error::NotFound(_)));
    }

    #[tokio::test]
    async fn test_delete_all_on_empty_graph() {
        let store = store();
        store.delete_all().await.unwrap();
        assert_eq!(store.count().await.unwrap(), 0);
    }
}
