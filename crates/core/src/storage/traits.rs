use async_trait::async_trait;

use crate::catalog::{CatalogItem, FilterExpression, ItemKey, Movie};

use super::Result;

/// Access to the shared catalog table.
///
/// One implementation is created per process and shared by every request.
#[async_trait]
pub trait CatalogRepository: Send + Sync {
    /// Full scan of the table, post-filtered by `filter`.
    ///
    /// Items come back in the store's native iteration order.
    async fn scan(&self, filter: &FilterExpression) -> Result<Vec<CatalogItem>>;

    /// All items sharing one partition key.
    async fn query_partition(&self, partition: &str) -> Result<Vec<CatalogItem>>;

    /// Point read by composite key.
    async fn get_item(&self, key: &ItemKey) -> Result<Option<CatalogItem>>;

    /// Creates a movie. Fails with `AlreadyExists` if the key is taken.
    async fn put_movie(&self, movie: &Movie) -> Result<()>;

    /// Deletes a movie and returns it. Fails with `NotFound` if absent.
    async fn delete_movie(&self, key: &ItemKey) -> Result<Movie>;
}
