//! Award lookup handler.

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    Json,
};

use moviedb_auth::CurrentPrincipal;
use moviedb_core::catalog::{Award, AwardQuery};

use crate::{context::RequestContext, handlers::ApiError, state::AppState};

/// Find awards (GET /awards?movieId=&actorId=&awardBody=).
///
/// Empty parameters count as absent; at least one must be given.
pub async fn find_awards(
    ctx: RequestContext,
    CurrentPrincipal(principal): CurrentPrincipal,
    State(state): State<AppState>,
    params: Result<Query<AwardQuery>, QueryRejection>,
) -> Result<Json<Vec<Award>>, ApiError> {
    let Query(query) = params.map_err(|e| ApiError::BadRequest(e.body_text()))?;
    let awards = state.engine.find_awards(&query).await?;
    tracing::debug!(
        request_id = %ctx.request_id,
        subject = %principal.subject,
        movie_id = ?query.movie_id,
        actor_id = ?query.actor_id,
        award_body = ?query.award_body,
        count = awards.len(),
        "Award lookup"
    );
    Ok(Json(awards))
}
