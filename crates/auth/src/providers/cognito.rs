//! Cognito user pool client over the identity provider JSON API.

use async_trait::async_trait;
use moviedb_core::auth::{
    classify_provider_error, AuthError, ConfirmSignUpRequest, IdentityProvider, Result,
    SessionTokens, SignInRequest, SignUpRequest,
};
use serde::{Deserialize, Serialize};
use std::time::Duration;

const TARGET_PREFIX: &str = "AWSCognitoIdentityProviderService";
const CONTENT_TYPE: &str = "application/x-amz-json-1.1";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Serialize)]
#[serde(rename_all = "PascalCase")]
struct AttributeType<'a> {
    name: &'a str,
    value: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "PascalCase")]
struct SignUpBody<'a> {
    client_id: &'a str,
    username: &'a str,
    password: &'a str,
    user_attributes: Vec<AttributeType<'a>>,
}

#[derive(Deserialize)]
#[serde(rename_all = "PascalCase")]
struct SignUpResponse {
    #[serde(default)]
    user_confirmed: bool,
}

#[derive(Serialize)]
#[serde(rename_all = "PascalCase")]
struct ConfirmSignUpBody<'a> {
    client_id: &'a str,
    username: &'a str,
    confirmation_code: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "PascalCase")]
struct InitiateAuthBody<'a> {
    auth_flow: &'a str,
    client_id: &'a str,
    auth_parameters: AuthParameters<'a>,
}

#[derive(Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
struct AuthParameters<'a> {
    username: &'a str,
    password: &'a str,
}

#[derive(Deserialize)]
#[serde(rename_all = "PascalCase")]
struct InitiateAuthResponse {
    authentication_result: Option<AuthenticationResult>,
    challenge_name: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "PascalCase")]
struct AuthenticationResult {
    id_token: Option<String>,
    access_token: Option<String>,
    refresh_token: Option<String>,
    expires_in: Option<i64>,
}

#[derive(Deserialize)]
struct ErrorBody {
    #[serde(rename = "__type", default)]
    error_type: String,
    #[serde(alias = "Message", default)]
    message: String,
}

/// Cognito identity provider.
pub struct CognitoProvider {
    http_client: reqwest::Client,
    endpoint: String,
    client_id: String,
}

impl CognitoProvider {
    pub fn new(
        http_client: reqwest::Client,
        endpoint: impl Into<String>,
        client_id: impl Into<String>,
    ) -> Self {
        Self {
            http_client,
            endpoint: endpoint.into(),
            client_id: client_id.into(),
        }
    }

    async fn call<B, R>(&self, operation: &str, body: &B) -> Result<R>
    where
        B: Serialize + Sync,
        R: for<'de> Deserialize<'de>,
    {
        let response = self
            .http_client
            .post(&self.endpoint)
            .timeout(REQUEST_TIMEOUT)
            .header("Content-Type", CONTENT_TYPE)
            .header("X-Amz-Target", format!("{TARGET_PREFIX}.{operation}"))
            .json(body)
            .send()
            .await
            .map_err(|e| AuthError::Provider(format!("{operation} request failed: {e}")))?;

        let status = response.status();
        let bytes = response
            .bytes()
            .await
            .map_err(|e| AuthError::Provider(format!("{operation} response unreadable: {e}")))?;

        if status.is_success() {
            return serde_json::from_slice(&bytes).map_err(|e| {
                AuthError::Provider(format!("{operation} response malformed: {e}"))
            });
        }

        let error = serde_json::from_slice::<ErrorBody>(&bytes).unwrap_or(ErrorBody {
            error_type: String::new(),
            message: String::from_utf8_lossy(&bytes).into_owned(),
        });
        tracing::debug!(
            operation,
            status = %status,
            error_type = %error.error_type,
            "Identity provider rejected request"
        );

        if status.is_server_error() {
            return Err(AuthError::Provider(format!(
                "{operation} failed with {status}: {}",
                error.message
            )));
        }
        Err(classify_provider_error(&error.error_type, &error.message))
    }
}

#[async_trait]
impl IdentityProvider for CognitoProvider {
    async fn sign_up(&self, request: &SignUpRequest) -> Result<bool> {
        let body = SignUpBody {
            client_id: &self.client_id,
            username: &request.username,
            password: &request.password,
            user_attributes: vec![AttributeType {
                name: "email",
                value: &request.email,
            }],
        };
        let response: SignUpResponse = self.call("SignUp", &body).await?;
        Ok(response.user_confirmed)
    }

    async fn confirm_sign_up(&self, request: &ConfirmSignUpRequest) -> Result<()> {
        let body = ConfirmSignUpBody {
            client_id: &self.client_id,
            username: &request.username,
            confirmation_code: &request.code,
        };
        let _: serde_json::Value = self.call("ConfirmSignUp", &body).await?;
        Ok(())
    }

    async fn sign_in(&self, request: &SignInRequest) -> Result<SessionTokens> {
        let body = InitiateAuthBody {
            auth_flow: "USER_PASSWORD_AUTH",
            client_id: &self.client_id,
            auth_parameters: AuthParameters {
                username: &request.username,
                password: &request.password,
            },
        };
        let response: InitiateAuthResponse = self.call("InitiateAuth", &body).await?;

        if let Some(challenge) = response.challenge_name {
            return Err(AuthError::InvalidRequest {
                code: challenge,
                message: "Additional sign-in challenge required".to_string(),
            });
        }

        let result = response
            .authentication_result
            .ok_or_else(|| AuthError::Provider("InitiateAuth returned no tokens".to_string()))?;
        let id_token = result
            .id_token
            .ok_or_else(|| AuthError::Provider("InitiateAuth returned no IdToken".to_string()))?;

        Ok(SessionTokens {
            id_token,
            access_token: result.access_token,
            refresh_token: result.refresh_token,
            expires_in: result.expires_in,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sign_up_body_uses_provider_field_names() {
        let body = SignUpBody {
            client_id: "client",
            username: "alice",
            password: "secret",
            user_attributes: vec![AttributeType {
                name: "email",
                value: "alice@example.com",
            }],
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["ClientId"], "client");
        assert_eq!(json["UserAttributes"][0]["Name"], "email");
        assert_eq!(json["UserAttributes"][0]["Value"], "alice@example.com");
    }

    #[test]
    fn test_initiate_auth_body_uses_upper_case_parameters() {
        let body = InitiateAuthBody {
            auth_flow: "USER_PASSWORD_AUTH",
            client_id: "client",
            auth_parameters: AuthParameters {
                username: "alice",
                password: "secret",
            },
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["AuthFlow"], "USER_PASSWORD_AUTH");
        assert_eq!(json["AuthParameters"]["USERNAME"], "alice");
        assert_eq!(json["AuthParameters"]["PASSWORD"], "secret");
    }

    #[test]
    fn test_authentication_result_parses() {
        let response: InitiateAuthResponse = serde_json::from_str(
            r#"{"AuthenticationResult":{"IdToken":"id","AccessToken":"acc","ExpiresIn":3600,"TokenType":"Bearer"}}"#,
        )
        .unwrap();
        let result = response.authentication_result.unwrap();
        assert_eq!(result.id_token.as_deref(), Some("id"));
        assert_eq!(result.expires_in, Some(3600));
        assert_eq!(result.refresh_token, None);
    }

    #[test]
    fn test_error_body_accepts_either_message_casing() {
        let lower: ErrorBody =
            serde_json::from_str(r#"{"__type":"NotAuthorizedException","message":"bad"}"#)
                .unwrap();
        let upper: ErrorBody =
            serde_json::from_str(r#"{"__type":"NotAuthorizedException","Message":"bad"}"#)
                .unwrap();
        assert_eq!(lower.message, "bad");
        assert_eq!(upper.message, "bad");
    }
}
