//! Input validation limits and field checks

use crate::error::Error;
use crate::person::{NewPerson, PersonUpdate};
use chrono::NaiveDate;

/// Maximum length for a first or last name (256 chars)
pub const MAX_NAME_LEN: usize = 256;

/// Maximum length for an occupation (256 chars)
pub const MAX_OCCUPATION_LEN: usize = 256;

/// Maximum length for a description (64KB)
pub const MAX_DESCRIPTION_LEN: usize = 64 * 1024;

/// Validation error type
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    EmptyFirstName,
    EmptyLastName,
    EmptyOccupation,
    NameTooLong { len: usize, max: usize },
    OccupationTooLong { len: usize, max: usize },
    DescriptionTooLong { len: usize, max: usize },
    BirthdateInFuture { birthdate: NaiveDate },
    EmptyUpdate,
    NegativeAge { age: i64 },
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyFirstName => write!(f, "First name cannot be empty"),
            Self::EmptyLastName => write!(f, "Last name cannot be empty"),
            Self::EmptyOccupation => write!(f, "Occupation cannot be empty"),
            Self::NameTooLong { len, max } => {
                write!(f, "Name too long: {} chars (max {})", len, max)
            }
            Self::OccupationTooLong { len, max } => {
                write!(f, "Occupation too long: {} chars (max {})", len, max)
            }
            Self::DescriptionTooLong { len, max } => {
                write!(f, "Description too long: {} chars (max {})", len, max)
            }
            Self::BirthdateInFuture { birthdate } => {
                write!(f, "Birthdate {} is in the future", birthdate)
            }
            Self::EmptyUpdate => write!(f, "Update supplies no fields"),
            Self::NegativeAge { age } => write!(f, "Age cannot be negative: {}", age),
        }
    }
}

impl std::error::Error for ValidationError {}

impl From<ValidationError> for Error {
    fn from(err: ValidationError) -> Self {
        Error::InvalidArgument(err.to_string())
    }
}

/// Validate a name field (first or last)
pub fn validate_name(name: &str, is_first: bool) -> Result<(), ValidationError> {
    if name.is_empty() {
        return Err(if is_first {
            ValidationError::EmptyFirstName
        } else {
            ValidationError::EmptyLastName
        });
    }
    if name.len() > MAX_NAME_LEN {
        return Err(ValidationError::NameTooLong {
            len: name.len(),
            max: MAX_NAME_LEN,
        });
    }
    Ok(())
}

/// Validate an occupation
pub fn validate_occupation(occupation: &str) -> Result<(), ValidationError> {
    if occupation.is_empty() {
        return Err(ValidationError::EmptyOccupation);
    }
    if occupation.len() > MAX_OCCUPATION_LEN {
        return Err(ValidationError::OccupationTooLong {
            len: occupation.len(),
            max: MAX_OCCUPATION_LEN,
        });
    }
    Ok(())
}

/// Validate a description
pub fn validate_description(description: &str) -> Result<(), ValidationError> {
    if description.len() > MAX_DESCRIPTION_LEN {
        return Err(ValidationError::DescriptionTooLong {
            len: description.len(),
            max: MAX_DESCRIPTION_LEN,
        });
    }
    Ok(())
}

/// Validate a birthdate against the current date. Birthdates after today
/// are rejected.
pub fn validate_birthdate(birthdate: NaiveDate, today: NaiveDate) -> Result<(), ValidationError> {
    if birthdate > today {
        return Err(ValidationError::BirthdateInFuture { birthdate });
    }
    Ok(())
}

/// Validate a minimum-age argument for the over-age query
pub fn validate_min_age(min_age: i64) -> Result<(), ValidationError> {
    if min_age < 0 {
        return Err(ValidationError::NegativeAge { age: min_age });
    }
    Ok(())
}

/// Validate all fields of a creation request
pub fn validate_new_person(new: &NewPerson, today: NaiveDate) -> Result<(), ValidationError> {
    validate_name(&new.first_name, true)?;
    validate_name(&new.last_name, false)?;
    validate_occupation(&new.occupation)?;
    validate_birthdate(new.birthdate, today)?;
    if let Some(description) = &new.description {
        validate_description(description)?;
    }
    Ok(())
}

/// Validate the supplied fields of a partial update
pub fn validate_update(update: &PersonUpdate, today: NaiveDate) -> Result<(), ValidationError> {
    if update.is_empty() {
        return Err(ValidationError::EmptyUpdate);
    }
    if let Some(occupation) = &update.occupation {
        validate_occupation(occupation)?;
    }
    if let Some(birthdate) = update.birthdate {
        validate_birthdate(birthdate, today)?;
    }
    if let Some(description) = &update.description {
        validate_description(description)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_validate_name() {
        assert!(validate_name("John", true).is_ok());
        assert_eq!(
            validate_name("", true),
            Err(ValidationError::EmptyFirstName)
        );
        assert_eq!(validate_name("", false), Err(ValidationError::EmptyLastName));
        assert!(validate_name(&"x".repeat(300), true).is_err());
    }

    #[test]
    fn test_validate_birthdate() {
        let today = date(2024, 6, 1);
        assert!(validate_birthdate(date(1950, 7, 15), today).is_ok());
        assert!(validate_birthdate(today, today).is_ok());
        assert!(validate_birthdate(date(2024, 6, 2), today).is_err());
    }

    #[test]
    fn test_validate_new_person() {
        let today = date(2024, 6, 1);
        let valid = NewPerson::new("John", "Doe", date(1950, 7, 15), "Engineer");
        assert!(validate_new_person(&valid, today).is_ok());

        let no_occupation = NewPerson::new("John", "Doe", date(1950, 7, 15), "");
        assert_eq!(
            validate_new_person(&no_occupation, today),
            Err(ValidationError::EmptyOccupation)
        );
    }

    #[test]
    fn test_validate_min_age() {
        assert!(validate_min_age(0).is_ok());
        assert!(validate_min_age(65).is_ok());
        assert_eq!(
            validate_min_age(-1),
            Err(ValidationError::NegativeAge { age: -1 })
        );
    }

    #[test]
    fn test_validation_error_converts_to_invalid_argument() {
        let err: Error = ValidationError::EmptyOccupation.into();
        assert!(matches!(err, Error::InvalidArgument(_)));
    }
}
