//! HTTP handlers for auth routes.

use axum::{
    extract::{rejection::JsonRejection, State},
    routing::{get, post},
    Json, Router,
};
use axum_extra::extract::cookie::{Cookie, SameSite};
use axum_extra::extract::CookieJar;
use moviedb_core::auth::{
    session_max_age_seconds, ConfirmSignUpRequest, SignInRequest, SignUpRequest,
};
use serde::Serialize;

use crate::error::AuthError;
use crate::AuthState;

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    fn new(message: impl Into<String>) -> Json<Self> {
        Json(Self {
            message: message.into(),
        })
    }
}

/// Creates the auth router with all authentication routes.
///
/// Routes:
/// - `POST /auth/signup` - Register a user
/// - `POST /auth/confirm_signup` - Confirm a registration code
/// - `POST /auth/signin` - Exchange credentials for a session cookie
/// - `GET /auth/signout` - Clear the session cookie
pub fn auth_routes() -> Router<AuthState> {
    Router::new()
        .route("/auth/signup", post(signup))
        .route("/auth/confirm_signup", post(confirm_signup))
        .route("/auth/signin", post(signin))
        .route("/auth/signout", get(signout))
}

fn invalid_body(rejection: JsonRejection) -> AuthError {
    AuthError::InvalidBody(rejection.body_text())
}

async fn signup(
    State(state): State<AuthState>,
    payload: Result<Json<SignUpRequest>, JsonRejection>,
) -> Result<Json<MessageResponse>, AuthError> {
    let Json(request) = payload.map_err(invalid_body)?;
    let confirmed = state.provider()?.sign_up(&request).await?;
    tracing::info!(username = %request.username, confirmed, "User signed up");

    let message = if confirmed {
        format!("User {} signed up", request.username)
    } else {
        format!(
            "User {} signed up, check your email for a confirmation code",
            request.username
        )
    };
    Ok(MessageResponse::new(message))
}

async fn confirm_signup(
    State(state): State<AuthState>,
    payload: Result<Json<ConfirmSignUpRequest>, JsonRejection>,
) -> Result<Json<MessageResponse>, AuthError> {
    let Json(request) = payload.map_err(invalid_body)?;
    state.provider()?.confirm_sign_up(&request).await?;
    tracing::info!(username = %request.username, "User confirmed");
    Ok(MessageResponse::new(format!(
        "User {} successfully confirmed",
        request.username
    )))
}

async fn signin(
    State(state): State<AuthState>,
    jar: CookieJar,
    payload: Result<Json<SignInRequest>, JsonRejection>,
) -> Result<(CookieJar, Json<MessageResponse>), AuthError> {
    let Json(request) = payload.map_err(invalid_body)?;
    let tokens = state.provider()?.sign_in(&request).await?;
    tracing::info!(username = %request.username, "User signed in");

    let cookie = Cookie::build((state.config.cookie_name.clone(), tokens.id_token))
        .path("/")
        .http_only(true)
        .secure(state.config.cookie_secure)
        .same_site(SameSite::None)
        .max_age(time::Duration::seconds(session_max_age_seconds(
            tokens.expires_in,
        )))
        .build();

    Ok((
        jar.add(cookie),
        MessageResponse::new("Auth successful"),
    ))
}

async fn signout(
    State(state): State<AuthState>,
    jar: CookieJar,
) -> (CookieJar, Json<MessageResponse>) {
    let cookie = Cookie::build((state.config.cookie_name.clone(), ""))
        .path("/")
        .http_only(true)
        .secure(state.config.cookie_secure)
        .same_site(SameSite::None)
        .max_age(time::Duration::ZERO)
        .build();

    (jar.add(cookie), MessageResponse::new("Signout successful"))
}
