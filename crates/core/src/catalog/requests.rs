//! API request types for catalog writes.
//!
//! Pure data types and validation, no I/O.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::error::ValidationError;
use super::keys;
use super::types::Movie;

const MAX_TITLE_LEN: usize = 200;

/// Request payload for creating a movie.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateMovieRequest {
    #[serde(alias = "movieId")]
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub release_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub overview: Option<String>,
}

impl CreateMovieRequest {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            release_date: None,
            overview: None,
        }
    }

    pub fn with_release_date(mut self, release_date: impl Into<String>) -> Self {
        self.release_date = Some(release_date.into());
        self
    }

    pub fn with_overview(mut self, overview: impl Into<String>) -> Self {
        self.overview = Some(overview.into());
        self
    }

    /// Validates the request and converts it into a sanitized [`Movie`].
    ///
    /// Empty optional attributes are dropped so they are never written.
    pub fn into_movie(self) -> Result<Movie, ValidationError> {
        let id = self.id.trim();
        keys::movie_key(id)?;

        let title = self.title.trim();
        if title.is_empty() {
            return Err(ValidationError::EmptyTitle);
        }
        if title.chars().count() > MAX_TITLE_LEN {
            return Err(ValidationError::TitleTooLong);
        }

        let release_date = non_empty(self.release_date);
        if let Some(date) = &release_date {
            NaiveDate::parse_from_str(date, "%Y-%m-%d")
                .map_err(|_| ValidationError::InvalidReleaseDate(date.clone()))?;
        }

        Ok(Movie {
            id: id.to_string(),
            title: title.to_string(),
            release_date,
            overview: non_empty(self.overview),
        })
    }
}

/// Drops empty or whitespace-only optional attributes.
pub fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
