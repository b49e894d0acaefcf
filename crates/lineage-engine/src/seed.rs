//! Example family data for demos and smoke testing

use chrono::NaiveDate;
use lineage_core::{NewPerson, PersonKey, Result};

use crate::{PersonStore, RelationshipManager};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid seed date")
}

fn key(first: &str, last: &str) -> PersonKey {
    PersonKey::new(first, last)
}

/// Populate the graph with the example Doe/Jones/Washington families:
/// sixteen people, seven marriages, and three generations of parentage.
/// Intended for an empty graph; fails with `DuplicateKey` otherwise.
pub async fn seed_example_family(
    people: &PersonStore,
    relationships: &RelationshipManager,
) -> Result<()> {
    let members = [
        NewPerson::new("John", "Doe", date(1950, 7, 15), "Retired Engineer")
            .with_description("Patriarch of the Doe family"),
        NewPerson::new("Jane", "Doe", date(1955, 9, 20), "Homemaker")
            .with_description("Matriarch of the Doe family"),
        NewPerson::new("Mike", "Doe", date(1975, 3, 10), "Doctor")
            .with_description("Eldest son of John and Jane Doe"),
        NewPerson::new("Sarah", "Doe", date(1978, 6, 25), "Lawyer")
            .with_description("Daughter of John and Jane Doe"),
        NewPerson::new("Emily", "Doe", date(1980, 11, 5), "Teacher")
            .with_description("Youngest daughter of John and Jane Doe"),
        NewPerson::new("Mark", "Smith", date(1988, 4, 12), "Architect")
            .with_description("Son of Robert and Mary Smith"),
        NewPerson::new("Mary", "Smith", date(1990, 6, 20), "Nurse")
            .with_description("Wife of Mark Smith"),
        NewPerson::new("Jacob", "Brown", date(1992, 9, 15), "Software Developer")
            .with_description("Son of William and Emma Brown"),
        NewPerson::new("Emma", "Brown", date(1994, 11, 30), "Accountant")
            .with_description("Wife of Jacob Brown"),
        NewPerson::new("Sophia", "Jones", date(1985, 3, 22), "Professor")
            .with_description("Daughter of Peter and Susan Jones"),
        NewPerson::new("Peter", "Jones", date(1960, 8, 10), "Lawyer")
            .with_description("Patriarch of the Jones family"),
        NewPerson::new("Susan", "Jones", date(1965, 11, 25), "Artist")
            .with_description("Matriarch of the Jones family"),
        NewPerson::new("Olivia", "Williams", date(1993, 7, 18), "Veterinarian")
            .with_description("Wife of Mike Doe"),
        NewPerson::new("Thomas", "Miller", date(1995, 12, 20), "Engineer")
            .with_description("Husband of Sarah Doe"),
        NewPerson::new("Karl", "Washington", date(1888, 4, 12), "Entrepreneur")
            .with_deathdate(date(1980, 5, 22))
            .with_description("Root of the Washington family"),
        NewPerson::new("Linda", "Washington", date(1890, 6, 20), "Philanthropist")
            .with_deathdate(date(1975, 4, 2))
            .with_description("Root of the Washington family"),
    ];
    for new in members {
        people.create(new).await?;
    }

    let marriages = [
        (key("John", "Doe"), key("Jane", "Doe")),
        (key("Mike", "Doe"), key("Olivia", "Williams")),
        (key("Thomas", "Miller"), key("Sarah", "Doe")),
        (key("Mark", "Smith"), key("Mary", "Smith")),
        (key("Jacob", "Brown"), key("Emma", "Brown")),
        (key("Peter", "Jones"), key("Susan", "Jones")),
        (key("Karl", "Washington"), key("Linda", "Washington")),
    ];
    for (a, b) in &marriages {
        relationships.add_marriage(a, b).await?;
    }

    let parentages = [
        (key("Mike", "Doe"), key("John", "Doe"), key("Jane", "Doe")),
        (key("Sarah", "Doe"), key("John", "Doe"), key("Jane", "Doe")),
        (key("Emily", "Doe"), key("John", "Doe"), key("Jane", "Doe")),
        (
            key("Mary", "Smith"),
            key("Peter", "Jones"),
            key("Susan", "Jones"),
        ),
        (
            key("Jacob", "Brown"),
            key("Peter", "Jones"),
            key("Susan", "Jones"),
        ),
        (
            key("Sophia", "Jones"),
            key("Peter", "Jones"),
            key("Susan", "Jones"),
        ),
        (
            key("Susan", "Jones"),
            key("Karl", "Washington"),
            key("Linda", "Washington"),
        ),
        (
            key("John", "Doe"),
            key("Karl", "Washington"),
            key("Linda", "Washington"),
        ),
    ];
    for (child, p1, p2) in &parentages {
        relationships.add_parentage(child, p1, p2).await?;
    }

    tracing::info!("Seeded example family data");
    Ok(())
}
