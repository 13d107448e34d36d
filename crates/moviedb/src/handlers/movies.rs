//! Movie handlers.

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};

use moviedb_auth::CurrentPrincipal;
use moviedb_core::catalog::keys::movie_key;
use moviedb_core::catalog::{CreateMovieRequest, EntityKind, Movie};
use moviedb_core::storage::StoreError;

use crate::{context::RequestContext, handlers::ApiError, state::AppState};

/// List all movies (GET /movies).
pub async fn list_movies(
    ctx: RequestContext,
    CurrentPrincipal(principal): CurrentPrincipal,
    State(state): State<AppState>,
) -> Result<Json<Vec<Movie>>, ApiError> {
    let movies = state.engine.list_movies().await?;
    tracing::debug!(
        request_id = %ctx.request_id,
        subject = %principal.subject,
        count = movies.len(),
        "Listed movies"
    );
    Ok(Json(movies))
}

/// Get a single movie (GET /movies/{movie_id}).
pub async fn get_movie(
    State(state): State<AppState>,
    Path(movie_id): Path<String>,
) -> Result<Json<Movie>, ApiError> {
    match state.engine.get_movie(&movie_id).await? {
        Some(movie) => Ok(Json(movie)),
        None => Err(StoreError::NotFound {
            kind: EntityKind::Movie,
            key: movie_key(&movie_id)
                .map(|key| key.to_string())
                .unwrap_or(movie_id),
        }
        .into()),
    }
}

/// Create a movie (POST /movies).
pub async fn create_movie(
    ctx: RequestContext,
    State(state): State<AppState>,
    payload: Result<Json<CreateMovieRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Movie>), ApiError> {
    let Json(request) = payload.map_err(|e| ApiError::BadRequest(e.body_text()))?;
    let movie = state.engine.create_movie(request).await?;
    tracing::info!(request_id = %ctx.request_id, movie_id = %movie.id, "Created movie");
    Ok((StatusCode::CREATED, Json(movie)))
}

/// Delete a movie (DELETE /movies/{movie_id}).
pub async fn delete_movie(
    ctx: RequestContext,
    State(state): State<AppState>,
    Path(movie_id): Path<String>,
) -> Result<Json<Movie>, ApiError> {
    let movie = state.engine.delete_movie(&movie_id).await?;
    tracing::info!(request_id = %ctx.request_id, movie_id = %movie.id, "Deleted movie");
    Ok(Json(movie))
}
