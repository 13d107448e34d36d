use chrono::{DateTime, Utc};

use super::AuthError;

/// Session cookie lifetime used when the provider does not report one.
const DEFAULT_SESSION_SECONDS: i64 = 3600;

/// Check if a token has expired. A token is expired at its exact `exp`.
pub fn is_token_expired(expires_at: DateTime<Utc>, now: DateTime<Utc>) -> bool {
    expires_at <= now
}

/// Converts a numeric `exp` claim (seconds since epoch) into a timestamp.
pub fn expiry_from_claim(exp: i64) -> Result<DateTime<Utc>, AuthError> {
    DateTime::<Utc>::from_timestamp(exp, 0)
        .ok_or_else(|| AuthError::InvalidToken(format!("exp out of range: {exp}")))
}

/// Cookie `Max-Age` for a freshly issued session.
pub fn session_max_age_seconds(expires_in: Option<i64>) -> i64 {
    match expires_in {
        Some(seconds) if seconds > 0 => seconds,
        _ => DEFAULT_SESSION_SECONDS,
    }
}

/// Maps an identity provider error type and message into an [`AuthError`].
///
/// Error types may arrive fully qualified
/// (`com.amazonaws...#NotAuthorizedException`); only the last segment counts.
pub fn classify_provider_error(error_type: &str, message: &str) -> AuthError {
    let code = error_type.rsplit('#').next().unwrap_or(error_type);
    let message = message.to_string();

    match code {
        "NotAuthorizedException" => AuthError::NotAuthorized(message),
        "UserNotConfirmedException" => AuthError::UserNotConfirmed(message),
        "InternalErrorException" | "ServiceUnavailableException" | "" => {
            AuthError::Provider(format!("{code}: {message}"))
        }
        _ => AuthError::InvalidRequest {
            code: code.to_string(),
            message,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_is_token_expired_returns_false_for_future_expiry() {
        let now = Utc::now();
        assert!(!is_token_expired(now + Duration::hours(1), now));
    }

    #[test]
    fn test_is_token_expired_returns_true_for_past_expiry() {
        let now = Utc::now();
        assert!(is_token_expired(now - Duration::seconds(1), now));
    }

    #[test]
    fn test_is_token_expired_returns_true_at_exact_expiry() {
        let now = Utc::now();
        assert!(is_token_expired(now, now));
    }

    #[test]
    fn test_expiry_from_claim_converts_seconds() {
        let expiry = expiry_from_claim(2_000_000_000).unwrap();
        assert_eq!(expiry.timestamp(), 2_000_000_000);
    }

    #[test]
    fn test_expiry_from_claim_rejects_out_of_range() {
        assert!(matches!(
            expiry_from_claim(i64::MAX),
            Err(AuthError::InvalidToken(_))
        ));
    }

    #[test]
    fn test_session_max_age_defaults_to_one_hour() {
        assert_eq!(session_max_age_seconds(None), 3600);
        assert_eq!(session_max_age_seconds(Some(0)), 3600);
        assert_eq!(session_max_age_seconds(Some(900)), 900);
    }

    #[test]
    fn test_classify_provider_error_maps_credential_failures() {
        assert_eq!(
            classify_provider_error("NotAuthorizedException", "Incorrect username or password."),
            AuthError::NotAuthorized("Incorrect username or password.".to_string())
        );
        assert_eq!(
            classify_provider_error("UserNotConfirmedException", "User is not confirmed."),
            AuthError::UserNotConfirmed("User is not confirmed.".to_string())
        );
    }

    #[test]
    fn test_classify_provider_error_strips_namespace() {
        let error = classify_provider_error(
            "com.amazonaws.cognito#UsernameExistsException",
            "User already exists",
        );
        assert_eq!(
            error,
            AuthError::InvalidRequest {
                code: "UsernameExistsException".to_string(),
                message: "User already exists".to_string(),
            }
        );
    }

    #[test]
    fn test_classify_provider_error_treats_service_faults_as_provider_errors() {
        assert!(matches!(
            classify_provider_error("InternalErrorException", "oops"),
            AuthError::Provider(_)
        ));
    }
}
