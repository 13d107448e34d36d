//! Movie cast handlers.

use axum::{
    extract::{Path, State},
    Json,
};

use moviedb_core::catalog::keys::cast_key;
use moviedb_core::catalog::{EntityKind, MovieCast};
use moviedb_core::storage::StoreError;

use crate::{handlers::ApiError, state::AppState};

/// List the cast of a movie (GET /movies/{movie_id}/actors).
pub async fn list_cast(
    State(state): State<AppState>,
    Path(movie_id): Path<String>,
) -> Result<Json<Vec<MovieCast>>, ApiError> {
    Ok(Json(state.engine.movie_cast(&movie_id).await?))
}

/// Get one cast member of a movie (GET /movies/{movie_id}/actors/{actor_id}).
pub async fn get_cast_member(
    State(state): State<AppState>,
    Path((movie_id, actor_id)): Path<(String, String)>,
) -> Result<Json<MovieCast>, ApiError> {
    match state.engine.cast_member(&movie_id, &actor_id).await? {
        Some(cast) => Ok(Json(cast)),
        None => Err(StoreError::NotFound {
            kind: EntityKind::MovieCast,
            key: cast_key(&movie_id, &actor_id)
                .map(|key| key.to_string())
                .unwrap_or(actor_id),
        }
        .into()),
    }
}
