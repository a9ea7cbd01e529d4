//! Field rules shared by user and team payloads

use thiserror::Error;

pub const MAX_ID_LENGTH: usize = 64;
pub const MAX_NAME_LENGTH: usize = 100;

/// A single rejected field; `field` names it the way clients send it
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("'{field}' cannot be empty")]
    Empty { field: &'static str },

    #[error("'{field}' cannot exceed {max} characters")]
    TooLong { field: &'static str, max: usize },

    #[error("'{field}' contains invalid character '{found}'. Only alphanumeric characters, '-', '_' and '.' are allowed")]
    InvalidCharacter { field: &'static str, found: char },
}

/// Identifiers travel in URL paths, so they are restricted to a URL-safe alphabet
pub fn validate_identifier(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.is_empty() {
        return Err(ValidationError::Empty { field });
    }

    if value.chars().count() > MAX_ID_LENGTH {
        return Err(ValidationError::TooLong {
            field,
            max: MAX_ID_LENGTH,
        });
    }

    match value
        .chars()
        .find(|c| !(c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.')))
    {
        Some(found) => Err(ValidationError::InvalidCharacter { field, found }),
        None => Ok(()),
    }
}

/// Display names: not blank, bounded length
pub fn validate_name(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::Empty { field });
    }

    if value.chars().count() > MAX_NAME_LENGTH {
        return Err(ValidationError::TooLong {
            field,
            max: MAX_NAME_LENGTH,
        });
    }

    Ok(())
}

pub fn validate_present(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.is_empty() {
        Err(ValidationError::Empty { field })
    } else {
        Ok(())
    }
}
