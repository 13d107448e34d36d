use thiserror::Error;

/// Errors produced by the key scheme for malformed identifiers.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum KeyError {
    #[error("{field} must not be empty")]
    EmptyIdentifier { field: &'static str },
}

/// Caller-supplied parameters that fail a precondition.
///
/// A request rejected with one of these never reaches the store.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Provide movieId or actorId")]
    MissingIdentifier,
    #[error(transparent)]
    InvalidKey(#[from] KeyError),
    #[error("Movie title cannot be empty")]
    EmptyTitle,
    #[error("Movie title too long (max 200 characters)")]
    TitleTooLong,
    #[error("Invalid release date (expected YYYY-MM-DD): {0}")]
    InvalidReleaseDate(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_error_display() {
        assert_eq!(
            KeyError::EmptyIdentifier { field: "movieId" }.to_string(),
            "movieId must not be empty"
        );
    }

    #[test]
    fn test_validation_error_display() {
        assert_eq!(
            ValidationError::MissingIdentifier.to_string(),
            "Provide movieId or actorId"
        );
        assert_eq!(
            ValidationError::from(KeyError::EmptyIdentifier { field: "actorId" }).to_string(),
            "actorId must not be empty"
        );
        assert_eq!(
            ValidationError::InvalidReleaseDate("1994/09/22".to_string()).to_string(),
            "Invalid release date (expected YYYY-MM-DD): 1994/09/22"
        );
    }
}
