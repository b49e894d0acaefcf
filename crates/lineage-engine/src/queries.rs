//! Query engine - read-side traversals and filters

use chrono::Utc;
use lineage_core::limits::validate_min_age;
use lineage_core::{kinship, Error, Person, PersonKey, Result, TreeEdge};
use lineage_storage::GraphBackend;
use std::sync::Arc;

/// Read-only queries over the genealogy graph. Kinship traversals run as
/// explicit walks over the edge lists; nothing here writes.
pub struct QueryEngine {
    backend: Arc<dyn GraphBackend>,
}

impl QueryEngine {
    pub fn new(backend: Arc<dyn GraphBackend>) -> Self {
        Self { backend }
    }

    /// Case-sensitive substring search over every textual field, dates
    /// included. An empty term matches everyone. Results sorted by key.
    pub async fn search(&self, term: &str) -> Result<Vec<Person>> {
        let mut hits: Vec<Person> = self
            .backend
            .all_people()
            .await
            .map_err(Error::backend)?
            .into_iter()
            .filter(|person| person.matches(term))
            .collect();
        hits.sort_by(|a, b| a.key.cmp(&b.key));

        tracing::debug!("search {:?}: {} hits", term, hits.len());
        Ok(hits)
    }

    /// Everyone sharing at least one parent with `key`, excluding `key`
    /// itself. Fails with `NotFound` when `key` does not exist; a person
    /// with no recorded parents has no siblings.
    pub async fn siblings_of(&self, key: &PersonKey) -> Result<Vec<PersonKey>> {
        if self
            .backend
            .get_person(key)
            .await
            .map_err(Error::backend)?
            .is_none()
        {
            return Err(Error::NotFound(key.clone()));
        }

        let parentages = self.backend.parentages().await.map_err(Error::backend)?;
        Ok(kinship::siblings_of(key, &parentages))
    }

    /// Everyone tied for the maximum number of distinct children. Empty
    /// when nobody has children.
    pub async fn people_with_most_children(&self) -> Result<Vec<PersonKey>> {
        let parentages = self.backend.parentages().await.map_err(Error::backend)?;
        Ok(kinship::most_children(&parentages))
    }

    /// Everyone strictly older than `min_age` years. Age counts toward the
    /// recorded death date when there is one, toward today otherwise.
    pub async fn people_over_age(&self, min_age: i64) -> Result<Vec<Person>> {
        validate_min_age(min_age)?;
        let today = Utc::now().date_naive();

        let mut people: Vec<Person> = self
            .backend
            .all_people()
            .await
            .map_err(Error::backend)?
            .into_iter()
            .filter(|person| person.age_in_years(today) > min_age)
            .collect();
        people.sort_by(|a, b| a.key.cmp(&b.key));
        Ok(people)
    }

    /// The full edge list for external visualization: every parentage edge
    /// plus each marriage exactly once.
    pub async fn family_tree_edges(&self) -> Result<Vec<TreeEdge>> {
        let marriages = self.backend.marriages().await.map_err(Error::backend)?;
        let parentages = self.backend.parentages().await.map_err(Error::backend)?;
        Ok(kinship::tree_edges(&marriages, &parentages))
    }

    /// Number of person nodes
    pub async fn count(&self) -> Result<usize> {
        self.backend.count_people().await.map_err(Error::backend)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, NaiveDate, Utc};
    use lineage_core::{EdgeKind, NewPerson};
    use lineage_storage::MemoryBackend;

    struct Fixture {
        backend: Arc<MemoryBackend>,
        queries: QueryEngine,
    }

    impl Fixture {
        fn new() -> Self {
            let backend = Arc::new(MemoryBackend::new());
            let queries = QueryEngine::new(backend.clone());
            Self { backend, queries }
        }

        async fn add(&self, new: NewPerson) -> PersonKey {
            let person = lineage_core::Person::from_new(new);
            let key = person.key.clone();
            self.backend.insert_person(&person).await.unwrap();
            key
        }

        async fn parent(&self, child: &PersonKey, p1: &PersonKey, p2: &PersonKey) {
            self.backend
                .try_create_parentage(child, p1, p2)
                .await
                .unwrap();
        }
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[tokio::test]
    async fn test_search_case_sensitive_substring() {
        let fx = Fixture::new();
        fx.add(NewPerson::new("John", "Doe", date(1950, 7, 15), "Engineer"))
            .await;
        fx.add(NewPerson::new("Jane", "Doe", date(1952, 1, 1), "Homemaker"))
            .await;
        fx.add(NewPerson::new("Peter", "Jones", date(1960, 5, 5), "Doctor"))
            .await;

        let hits = fx.queries.search("Doe").await.unwrap();
        assert_eq!(hits.len(), 2);

        // Lowercase does not match
        assert!(fx.queries.search("doe").await.unwrap().is_empty());

        // Dates are searchable text
        let hits = fx.queries.search("1950-07").await.unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].key.first_name, "John");
    }

    #[tokio::test]
    async fn test_search_empty_term_matches_all() {
        let fx = Fixture::new();
        fx.add(NewPerson::new("John", "Doe", date(1950, 7, 15), "Engineer"))
            .await;
        fx.add(NewPerson::new("Jane", "Doe", date(1952, 1, 1), "Homemaker"))
            .await;

        assert_eq!(fx.queries.search("").await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_siblings_requires_existing_person() {
        let fx = Fixture::new();
        let ghost = PersonKey::new("No", "Body");
        let err = fx.queries.siblings_of(&ghost).await.unwrap_err();
        assert!(matches!(err, Error::NotFound(k) if k == ghost));
    }

    #[tokio::test]
    async fn test_siblings_two_hop() {
        let fx = Fixture::new();
        let john = fx
            .add(NewPerson::new("John", "Doe", date(1950, 7, 15), "Engineer"))
            .await;
        let jane = fx
            .add(NewPerson::new("Jane", "Doe", date(1952, 1, 1), "Homemaker"))
            .await;
        let mike = fx
            .add(NewPerson::new("Mike", "Doe", date(1980, 3, 2), "Teacher"))
            .await;
        let sarah = fx
            .add(NewPerson::new("Sarah", "Doe", date(1982, 9, 9), "Nurse"))
            .await;
        fx.parent(&mike, &john, &jane).await;
        fx.parent(&sarah, &john, &jane).await;

        assert_eq!(fx.queries.siblings_of(&mike).await.unwrap(), vec![sarah]);
    }

    #[tokio::test]
    async fn test_most_children_tie_set() {
        let fx = Fixture::new();
        let john = fx
            .add(NewPerson::new("John", "Doe", date(1950, 7, 15), "Engineer"))
            .await;
        let jane = fx
            .add(NewPerson::new("Jane", "Doe", date(1952, 1, 1), "Homemaker"))
            .await;
        let mike = fx
            .add(NewPerson::new("Mike", "Doe", date(1980, 3, 2), "Teacher"))
            .await;
        let sarah = fx
            .add(NewPerson::new("Sarah", "Doe", date(1982, 9, 9), "Nurse"))
            .await;
        fx.parent(&mike, &john, &jane).await;
        fx.parent(&sarah, &john, &jane).await;

        // John and Jane tie at two children each
        let winners = fx.queries.people_with_most_children().await.unwrap();
        assert_eq!(winners, vec![jane, john]);
    }

    #[tokio::test]
    async fn test_most_children_empty_graph() {
        let fx = Fixture::new();
        assert!(fx
            .queries
            .people_with_most_children()
            .await
            .unwrap()
            .is_empty());
    }

    #[tokio::test]
    async fn test_people_over_age_strict() {
        let fx = Fixture::new();
        let today = Utc::now().date_naive();

        // Born exactly 30 * 365 days ago: age is exactly 30
        let thirty = today - chrono::Duration::days(30 * 365);
        fx.add(NewPerson::new("Mike", "Doe", thirty, "Teacher")).await;
        // Comfortably older
        fx.add(NewPerson::new(
            "John",
            "Doe",
            date(today.year() - 70, 1, 1),
            "Engineer",
        ))
        .await;

        // Strictly greater: the exactly-30 person is excluded
        let over_30 = fx.queries.people_over_age(30).await.unwrap();
        assert_eq!(over_30.len(), 1);
        assert_eq!(over_30[0].key.first_name, "John");

        let over_29 = fx.queries.people_over_age(29).await.unwrap();
        assert_eq!(over_29.len(), 2);
    }

    #[tokio::test]
    async fn test_people_over_age_uses_deathdate() {
        let fx = Fixture::new();
        fx.add(
            NewPerson::new("Old", "Timer", date(1900, 1, 1), "Farmer")
                .with_deathdate(date(1960, 1, 1)),
        )
        .await;

        // Died at 60: not over 60, whatever today is
        assert!(fx.queries.people_over_age(60).await.unwrap().is_empty());
        assert_eq!(fx.queries.people_over_age(59).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_people_over_age_rejects_negative() {
        let fx = Fixture::new();
        let err = fx.queries.people_over_age(-1).await.unwrap_err();
        assert!(matches!(err, Error::InvalidArgument(_)));
    }

    #[tokio::test]
    async fn test_family_tree_edges() {
        let fx = Fixture::new();
        let john = fx
            .add(NewPerson::new("John", "Doe", date(1950, 7, 15), "Engineer"))
            .await;
        let jane = fx
            .add(NewPerson::new("Jane", "Doe", date(1952, 1, 1), "Homemaker"))
            .await;
        let mike = fx
            .add(NewPerson::new("Mike", "Doe", date(1980, 3, 2), "Teacher"))
            .await;
        fx.backend.try_create_marriage(&john, &jane).await.unwrap();
        fx.parent(&mike, &john, &jane).await;

        let edges = fx.queries.family_tree_edges().await.unwrap();
        assert_eq!(edges.len(), 3);
        assert_eq!(
            edges.iter().filter(|e| e.kind == EdgeKind::Married).count(),
            1
        );
        assert_eq!(
            edges.iter().filter(|e| e.kind == EdgeKind::Child).count(),
            2
        );
    }
}
