//! Pure functions for mapping store errors to HTTP status codes.

use super::StoreError;

/// Maps a [`StoreError`] to an HTTP status code.
///
/// - `NotFound` -> 404 (Not Found)
/// - `AlreadyExists` -> 409 (Conflict)
/// - `ConnectionFailed` -> 503 (Service Unavailable)
/// - `Throttled` -> 503 (Service Unavailable)
/// - `Timeout` -> 504 (Gateway Timeout)
/// - `QueryFailed` -> 500 (Internal Server Error)
/// - `Serialization` -> 500 (Internal Server Error)
/// - `InvalidData` -> 500 (Internal Server Error)
///
/// # Examples
///
/// ```
/// use moviedb_core::catalog::EntityKind;
/// use moviedb_core::storage::{store_error_to_status_code, StoreError};
///
/// let error = StoreError::NotFound {
///     kind: EntityKind::Movie,
///     key: "m1000/xxxx".to_string(),
/// };
/// assert_eq!(store_error_to_status_code(&error), 404);
/// ```
pub fn store_error_to_status_code(error: &StoreError) -> u16 {
    match error {
        StoreError::NotFound { .. } => 404,
        StoreError::AlreadyExists { .. } => 409,
        StoreError::ConnectionFailed(_) => 503,
        StoreError::Throttled(_) => 503,
        StoreError::Timeout(_) => 504,
        StoreError::QueryFailed(_) => 500,
        StoreError::Serialization(_) => 500,
        StoreError::InvalidData(_) => 500,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::EntityKind;

    #[test]
    fn test_not_found_maps_to_404() {
        let error = StoreError::NotFound {
            kind: EntityKind::Movie,
            key: "m1/xxxx".to_string(),
        };
        assert_eq!(store_error_to_status_code(&error), 404);
    }

    #[test]
    fn test_already_exists_maps_to_409() {
        let error = StoreError::AlreadyExists {
            kind: EntityKind::Movie,
            key: "m1/xxxx".to_string(),
        };
        assert_eq!(store_error_to_status_code(&error), 409);
    }

    #[test]
    fn test_unavailable_maps_to_503() {
        let error = StoreError::ConnectionFailed("dns failure".to_string());
        assert_eq!(store_error_to_status_code(&error), 503);
        let error = StoreError::Throttled("request limit".to_string());
        assert_eq!(store_error_to_status_code(&error), 503);
    }

    #[test]
    fn test_timeout_maps_to_504() {
        assert_eq!(store_error_to_status_code(&StoreError::Timeout(100)), 504);
    }

    #[test]
    fn test_data_faults_map_to_500() {
        let error = StoreError::InvalidData("unknown partition prefix".to_string());
        assert_eq!(store_error_to_status_code(&error), 500);
        let error = StoreError::Serialization("year is not a number".to_string());
        assert_eq!(store_error_to_status_code(&error), 500);
    }
}
