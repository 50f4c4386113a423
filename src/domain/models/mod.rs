//! Domain entities for the chore tracker.

pub mod activity;
pub mod enums;
pub mod residence;
pub mod resident;

pub use activity::Activity;
pub use enums::{ActivityCategory, ActivityStatus};
pub use residence::{Residence, ResidenceStats};
pub use resident::{PerformanceSummary, PerformanceTier, Resident};

/// Validation failures raised when constructing or renaming domain entities.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("name must have at least 2 characters")]
    NameTooShort,
    #[error("name cannot exceed 50 characters")]
    NameTooLong,
    #[error("name may only contain letters and spaces")]
    NameInvalidChars,
    #[error("task name must have at least 3 characters")]
    TaskNameTooShort,
}

/// Validates a person name: 2-50 chars after trimming, letters and spaces only.
/// Returns the trimmed, title-cased form.
pub(crate) fn validate_person_name(name: &str) -> Result<String, ValidationError> {
    let trimmed = name.trim();
    if trimmed.chars().count() < 2 {
        return Err(ValidationError::NameTooShort);
    }
    if trimmed.chars().count() > 50 {
        return Err(ValidationError::NameTooLong);
    }
    if !trimmed.chars().all(|c| c.is_alphabetic() || c.is_whitespace()) {
        return Err(ValidationError::NameInvalidChars);
    }
    Ok(title_case(trimmed))
}

/// Validates a house name: 2-50 chars after trimming, any characters.
/// Returns the trimmed form.
pub(crate) fn validate_house_name(name: &str) -> Result<String, ValidationError> {
    let trimmed = name.trim();
    if trimmed.chars().count() < 2 {
        return Err(ValidationError::NameTooShort);
    }
    if trimmed.chars().count() > 50 {
        return Err(ValidationError::NameTooLong);
    }
    Ok(trimmed.to_string())
}

/// Uppercases the first letter of each word, lowercases the rest.
fn title_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut word_start = true;
    for c in name.chars() {
        if c.is_whitespace() {
            out.push(c);
            word_start = true;
        } else if word_start {
            out.extend(c.to_uppercase());
            word_start = false;
        } else {
            out.extend(c.to_lowercase());
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_person_name_title_cased() {
        assert_eq!(validate_person_name("  ana clara ").unwrap(), "Ana Clara");
        assert_eq!(validate_person_name("JOÃO silva").unwrap(), "João Silva");
    }

    #[test]
    fn test_person_name_length_bounds() {
        assert_eq!(validate_person_name("a"), Err(ValidationError::NameTooShort));
        assert_eq!(validate_person_name("   "), Err(ValidationError::NameTooShort));
        assert!(validate_person_name("ab").is_ok());
        let long = "a".repeat(51);
        assert_eq!(validate_person_name(&long), Err(ValidationError::NameTooLong));
    }

    #[test]
    fn test_person_name_rejects_non_letters() {
        assert_eq!(
            validate_person_name("Kid #1"),
            Err(ValidationError::NameInvalidChars)
        );
        assert_eq!(
            validate_person_name("Ana2"),
            Err(ValidationError::NameInvalidChars)
        );
    }

    #[test]
    fn test_house_name_allows_punctuation() {
        assert_eq!(validate_house_name(" Casa #1 ").unwrap(), "Casa #1");
        assert_eq!(validate_house_name("x"), Err(ValidationError::NameTooShort));
    }
}
