//! Person (node) types and operations

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Unique key for a person: the ordered (first name, last name) pair.
///
/// No two persons may share a key. Key fields are immutable once a person
/// is created; renaming means delete-and-recreate.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PersonKey {
    pub first_name: String,
    pub last_name: String,
}

impl PersonKey {
    pub fn new(first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
        }
    }
}

impl std::fmt::Display for PersonKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.first_name, self.last_name)
    }
}

/// A person in the genealogy graph (a node)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Person {
    /// Unique (first name, last name) key
    pub key: PersonKey,

    /// Date of birth
    pub birthdate: NaiveDate,

    /// Occupation (required, non-empty)
    pub occupation: String,

    /// Date of death, if recorded. `None` means alive / not recorded;
    /// there is no sentinel date anywhere in the system.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deathdate: Option<NaiveDate>,

    /// Free-form description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,

    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
}

impl Person {
    /// Build a person record from creation data
    pub fn from_new(new: NewPerson) -> Self {
        let now = Utc::now();
        Self {
            key: PersonKey::new(new.first_name, new.last_name),
            birthdate: new.birthdate,
            occupation: new.occupation,
            deathdate: new.deathdate,
            description: new.description,
            created_at: now,
            updated_at: now,
        }
    }

    /// The date against which this person's age is measured: the recorded
    /// death date if there is one, otherwise the supplied current date.
    pub fn reference_date(&self, today: NaiveDate) -> NaiveDate {
        self.deathdate.unwrap_or(today)
    }

    /// Age in whole years, computed as floor(days / 365) from birthdate to
    /// the reference date.
    pub fn age_in_years(&self, today: NaiveDate) -> i64 {
        let days = self
            .reference_date(today)
            .signed_duration_since(self.birthdate)
            .num_days();
        days.div_euclid(365)
    }

    /// Case-sensitive substring match against the person's textual fields:
    /// first name, last name, occupation, description, and the ISO-8601
    /// forms of birthdate and deathdate. An empty term matches everything.
    pub fn matches(&self, term: &str) -> bool {
        if term.is_empty() {
            return true;
        }
        if self.key.first_name.contains(term)
            || self.key.last_name.contains(term)
            || self.occupation.contains(term)
        {
            return true;
        }
        if let Some(desc) = &self.description {
            if desc.contains(term) {
                return true;
            }
        }
        if self.birthdate.format("%Y-%m-%d").to_string().contains(term) {
            return true;
        }
        if let Some(death) = self.deathdate {
            if death.format("%Y-%m-%d").to_string().contains(term) {
                return true;
            }
        }
        false
    }

    /// Apply a partial update. Only supplied fields change; the key is
    /// untouchable through this path.
    pub fn apply_update(&mut self, update: &PersonUpdate) {
        if let Some(birthdate) = update.birthdate {
            self.birthdate = birthdate;
        }
        if let Some(occupation) = &update.occupation {
            self.occupation = occupation.clone();
        }
        if let Some(deathdate) = update.deathdate {
            self.deathdate = Some(deathdate);
        }
        if let Some(description) = &update.description {
            self.description = Some(description.clone());
        }
        self.updated_at = Utc::now();
    }
}

/// Data for creating a new person
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewPerson {
    pub first_name: String,
    pub last_name: String,
    pub birthdate: NaiveDate,
    pub occupation: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deathdate: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl NewPerson {
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        birthdate: NaiveDate,
        occupation: impl Into<String>,
    ) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
            birthdate,
            occupation: occupation.into(),
            deathdate: None,
            description: None,
        }
    }

    pub fn with_deathdate(mut self, deathdate: NaiveDate) -> Self {
        self.deathdate = Some(deathdate);
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn key(&self) -> PersonKey {
        PersonKey::new(self.first_name.clone(), self.last_name.clone())
    }
}

/// Partial update for a person. `None` means "leave unchanged"; there is no
/// way to clear a previously recorded deathdate or description through an
/// update.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PersonUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub birthdate: Option<NaiveDate>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub occupation: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub deathdate: Option<NaiveDate>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl PersonUpdate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_birthdate(mut self, birthdate: NaiveDate) -> Self {
        self.birthdate = Some(birthdate);
        self
    }

    pub fn with_occupation(mut self, occupation: impl Into<String>) -> Self {
        self.occupation = Some(occupation.into());
        self
    }

    pub fn with_deathdate(mut self, deathdate: NaiveDate) -> Self {
        self.deathdate = Some(deathdate);
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.birthdate.is_none()
            && self.occupation.is_none()
            && self.deathdate.is_none()
            && self.description.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn john() -> Person {
        Person::from_new(
            NewPerson::new("John", "Doe", date(1950, 7, 15), "Engineer")
                .with_description("Patriarch of the Doe family"),
        )
    }

    #[test]
    fn test_key_display() {
        let key = PersonKey::new("John", "Doe");
        assert_eq!(key.to_string(), "John Doe");
    }

    #[test]
    fn test_from_new() {
        let person = john();
        assert_eq!(person.key, PersonKey::new("John", "Doe"));
        assert_eq!(person.occupation, "Engineer");
        assert!(person.deathdate.is_none());
    }

    #[test]
    fn test_age_uses_deathdate_when_recorded() {
        let mut person = john();
        person.deathdate = Some(date(2000, 7, 15));
        // Reference is the death date, not today
        assert_eq!(person.age_in_years(date(2030, 1, 1)), 50);
    }

    #[test]
    fn test_age_strict_boundary() {
        let person = Person::from_new(NewPerson::new(
            "Jane",
            "Doe",
            date(1990, 1, 1),
            "Homemaker",
        ));
        // Exactly 30 calendar years later: 10957 days / 365 = 30
        assert_eq!(person.age_in_years(date(2020, 1, 1)), 30);
        // One day earlier stays at 30 only if floor still rounds down
        assert_eq!(person.age_in_years(date(2019, 12, 31)), 29);
    }

    #[test]
    fn test_matches_is_case_sensitive() {
        let person = john();
        assert!(person.matches("John"));
        assert!(!person.matches("john"));
        assert!(person.matches("Engineer"));
        assert!(person.matches("Patriarch"));
    }

    #[test]
    fn test_matches_dates_and_empty_term() {
        let mut person = john();
        person.deathdate = Some(date(2020, 3, 2));
        assert!(person.matches("1950-07"));
        assert!(person.matches("2020-03-02"));
        assert!(person.matches(""));
        assert!(!person.matches("1999"));
    }

    #[test]
    fn test_apply_update_partial() {
        let mut person = john();
        let update = PersonUpdate::new().with_occupation("Retired Engineer");
        person.apply_update(&update);

        assert_eq!(person.occupation, "Retired Engineer");
        // Unsupplied fields untouched
        assert_eq!(person.birthdate, date(1950, 7, 15));
        assert!(person.deathdate.is_none());
    }

    #[test]
    fn test_update_is_empty() {
        assert!(PersonUpdate::new().is_empty());
        assert!(!PersonUpdate::new().with_occupation("Doctor").is_empty());
    }
}
