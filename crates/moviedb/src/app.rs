use std::time::Duration;

use axum::{
    http::{header, HeaderName, Method, StatusCode},
    middleware::from_fn_with_state,
    routing::{delete, get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use moviedb_auth::{auth_routes, enforce_access};
use moviedb_core::auth::AccessLevel;

use crate::{
    handlers::{
        awards::find_awards,
        cast::{get_cast_member, list_cast},
        health::livez,
        movies::{create_movie, delete_movie, get_movie, list_movies},
    },
    state::AppState,
};

/// Router-wide timeout always exceeds the store timeout by this much.
const REQUEST_TIMEOUT_MARGIN: Duration = Duration::from_secs(1);

/// Router-wide request timeout for a given store timeout.
fn request_timeout(store_timeout: Duration) -> Duration {
    store_timeout + REQUEST_TIMEOUT_MARGIN
}

/// Create the application router with all routes and middleware.
///
/// Each catalog route declares its access level next to its registration;
/// the gate rejects before the handler runs.
pub fn create_app(state: AppState) -> Router {
    let timeout = request_timeout(state.engine.timeout());
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, HeaderName::from_static("x-amz-date")]);

    let token = from_fn_with_state(
        state.auth.access(AccessLevel::TokenAuthorized),
        enforce_access,
    );
    let api_key = from_fn_with_state(
        state.auth.access(AccessLevel::ApiKeyRequired),
        enforce_access,
    );

    let catalog_routes = Router::new()
        .route(
            "/movies",
            get(list_movies)
                .route_layer(token.clone())
                .merge(post(create_movie).route_layer(api_key.clone())),
        )
        .route(
            "/movies/{movie_id}",
            get(get_movie)
                .route_layer(token.clone())
                .merge(delete(delete_movie).route_layer(api_key)),
        )
        .route(
            "/movies/{movie_id}/actors",
            get(list_cast).route_layer(token.clone()),
        )
        .route(
            "/movies/{movie_id}/actors/{actor_id}",
            get(get_cast_member).route_layer(token.clone()),
        )
        .route("/awards", get(find_awards).route_layer(token));

    Router::new()
        .route("/livez", get(livez))
        .merge(catalog_routes)
        .merge(auth_routes().with_state(state.auth.clone()))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            timeout,
        ))
        .with_state(state)
}
