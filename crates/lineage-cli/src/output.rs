//! Output formatting utilities

use lineage_core::Person;
use serde::Serialize;

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Table,
    Json,
}

impl From<&str> for OutputFormat {
    fn from(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "json" => Self::Json,
            _ => Self::Table,
        }
    }
}

/// Serialize any payload as pretty JSON
pub fn to_json<T: Serialize>(data: &T) -> String {
    serde_json::to_string_pretty(data).unwrap_or_else(|_| "{}".to_string())
}

/// One-line table row for a person
pub fn person_line(person: &Person) -> String {
    let death = person
        .deathdate
        .map(|d| format!(", died {}", d))
        .unwrap_or_default();
    format!(
        "{} (born {}{}) - {}",
        person.key, person.birthdate, death, person.occupation
    )
}

/// Print a list of people in the requested format
pub fn print_people(people: &[Person], format: OutputFormat) {
    match format {
        OutputFormat::Json => println!("{}", to_json(&people)),
        OutputFormat::Table => {
            for person in people {
                println!("  {}", person_line(person));
            }
        }
    }
}
