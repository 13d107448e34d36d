//! Catalog query engine.
//!
//! Wraps the process-wide repository handle. Every store call is bounded by
//! the same timeout; a timeout yields `StoreError::Timeout` and never a
//! partial result. Calls are not retried.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;

use moviedb_core::catalog::keys::{cast_key, cast_partition, movie_key};
use moviedb_core::catalog::{
    build_award_filter, movies_filter, Award, AwardQuery, CatalogItem, CreateMovieRequest,
    FilterExpression, KeyError, Movie, MovieCast, ValidationError,
};
use moviedb_core::storage::{CatalogRepository, StoreError};

/// Errors returned by engine operations that take caller parameters.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CatalogError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl From<KeyError> for CatalogError {
    fn from(err: KeyError) -> Self {
        Self::Validation(err.into())
    }
}

/// Executes catalog reads and writes against the repository.
#[derive(Clone)]
pub struct CatalogQueryEngine {
    repository: Arc<dyn CatalogRepository>,
    timeout: Duration,
}

impl CatalogQueryEngine {
    pub fn new(repository: Arc<dyn CatalogRepository>, timeout: Duration) -> Self {
        Self {
            repository,
            timeout,
        }
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    async fn bounded<T>(
        &self,
        operation: &'static str,
        call: impl Future<Output = Result<T, StoreError>>,
    ) -> Result<T, StoreError> {
        match tokio::time::timeout(self.timeout, call).await {
            Ok(result) => result,
            Err(_) => {
                let millis = u64::try_from(self.timeout.as_millis()).unwrap_or(u64::MAX);
                tracing::error!(operation, timeout_ms = millis, "Store call timed out");
                Err(StoreError::Timeout(millis))
            }
        }
    }

    /// Full scan post-filtered by `filter`, in the store's native order.
    pub async fn execute(&self, filter: &FilterExpression) -> Result<Vec<CatalogItem>, StoreError> {
        let items = self.bounded("scan", self.repository.scan(filter)).await?;
        tracing::debug!(
            expression = %filter.expression(),
            count = items.len(),
            "Catalog scan executed"
        );
        Ok(items)
    }

    pub async fn list_movies(&self) -> Result<Vec<Movie>, StoreError> {
        let items = self.execute(&movies_filter()).await?;
        Ok(items
            .into_iter()
            .filter_map(|item| match item {
                CatalogItem::Movie(movie) => Some(movie),
                _ => None,
            })
            .collect())
    }

    pub async fn get_movie(&self, movie_id: &str) -> Result<Option<Movie>, CatalogError> {
        let key = movie_key(movie_id)?;
        let item = self.bounded("get_item", self.repository.get_item(&key)).await?;
        Ok(match item {
            Some(CatalogItem::Movie(movie)) => Some(movie),
            _ => None,
        })
    }

    /// All cast rows of one movie.
    pub async fn movie_cast(&self, movie_id: &str) -> Result<Vec<MovieCast>, CatalogError> {
        let partition = cast_partition(movie_id)?;
        let items = self
            .bounded("query", self.repository.query_partition(&partition))
            .await?;
        Ok(items
            .into_iter()
            .filter_map(|item| match item {
                CatalogItem::MovieCast(cast) => Some(cast),
                _ => None,
            })
            .collect())
    }

    pub async fn cast_member(
        &self,
        movie_id: &str,
        actor_id: &str,
    ) -> Result<Option<MovieCast>, CatalogError> {
        let key = cast_key(movie_id, actor_id)?;
        let item = self.bounded("get_item", self.repository.get_item(&key)).await?;
        Ok(match item {
            Some(CatalogItem::MovieCast(cast)) => Some(cast),
            _ => None,
        })
    }

    /// Awards of a movie and/or an actor, optionally narrowed by award body.
    ///
    /// An award body alone scans the whole table; only Award rows are
    /// returned.
    pub async fn find_awards(&self, query: &AwardQuery) -> Result<Vec<Award>, CatalogError> {
        let filter = build_award_filter(query)?;
        if is_blank(&query.movie_id) && is_blank(&query.actor_id) {
            tracing::warn!(
                award_body = ?query.award_body,
                "Award lookup by award body only scans the whole catalog"
            );
        }

        let items = self.execute(&filter).await?;
        Ok(items
            .into_iter()
            .filter_map(|item| match item {
                CatalogItem::Award(award) => Some(award),
                _ => None,
            })
            .collect())
    }

    /// Validates the request and stores the movie unless its key exists.
    pub async fn create_movie(&self, request: CreateMovieRequest) -> Result<Movie, CatalogError> {
        let movie = request.into_movie()?;
        self.bounded("put_item", self.repository.put_movie(&movie))
            .await?;
        tracing::info!(movie_id = %movie.id, "Movie created");
        Ok(movie)
    }

    /// Deletes a movie and returns it.
    pub async fn delete_movie(&self, movie_id: &str) -> Result<Movie, CatalogError> {
        let key = movie_key(movie_id)?;
        let movie = self
            .bounded("delete_item", self.repository.delete_movie(&key))
            .await?;
        tracing::info!(movie_id = %movie.id, "Movie deleted");
        Ok(movie)
    }
}

fn is_blank(value: &Option<String>) -> bool {
    value.as_deref().is_none_or(str::is_empty)
}
