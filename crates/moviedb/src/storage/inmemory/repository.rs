//! In-memory repository implementation.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use moviedb_core::catalog::{
    partition_filter, CatalogItem, EntityKind, FilterExpression, ItemKey, Movie,
};
use moviedb_core::storage::{CatalogRepository, Result, StoreError};

/// In-memory storage backend.
///
/// Items live in a `BTreeMap` keyed by composite key wrapped in
/// `Arc<RwLock<_>>`; iteration order is key order. Data is not persisted.
#[derive(Debug, Clone, Default)]
pub struct InMemoryRepository {
    items: Arc<RwLock<BTreeMap<ItemKey, CatalogItem>>>,
}

impl InMemoryRepository {
    /// Creates a repository preloaded with `items`.
    ///
    /// Fails on the first malformed key or duplicate key.
    pub fn with_items(items: impl IntoIterator<Item = CatalogItem>) -> Result<Self> {
        let mut map = BTreeMap::new();
        for item in items {
            let key = item
                .key()
                .map_err(|e| StoreError::InvalidData(e.to_string()))?;
            if map.contains_key(&key) {
                return Err(StoreError::AlreadyExists {
                    kind: item.kind(),
                    key: key.to_string(),
                });
            }
            map.insert(key, item);
        }
        Ok(Self {
            items: Arc::new(RwLock::new(map)),
        })
    }

    pub async fn len(&self) -> usize {
        self.items.read().await.len()
    }
}

#[async_trait]
impl CatalogRepository for InMemoryRepository {
    async fn scan(&self, filter: &FilterExpression) -> Result<Vec<CatalogItem>> {
        let items = self.items.read().await;
        Ok(items
            .iter()
            .filter(|(key, _)| filter.matches(key))
            .map(|(_, item)| item.clone())
            .collect())
    }

    async fn query_partition(&self, partition: &str) -> Result<Vec<CatalogItem>> {
        self.scan(&partition_filter(partition)).await
    }

    async fn get_item(&self, key: &ItemKey) -> Result<Option<CatalogItem>> {
        let items = self.items.read().await;
        Ok(items.get(key).cloned())
    }

    async fn put_movie(&self, movie: &Movie) -> Result<()> {
        let key = movie
            .key()
            .map_err(|e| StoreError::InvalidData(e.to_string()))?;
        let mut items = self.items.write().await;
        if items.contains_key(&key) {
            return Err(StoreError::AlreadyExists {
                kind: EntityKind::Movie,
                key: key.to_string(),
            });
        }
        items.insert(key, CatalogItem::Movie(movie.clone()));
        Ok(())
    }

    async fn delete_movie(&self, key: &ItemKey) -> Result<Movie> {
        let mut items = self.items.write().await;
        match items.get(key) {
            Some(CatalogItem::Movie(_)) => {}
            _ => {
                return Err(StoreError::NotFound {
                    kind: EntityKind::Movie,
                    key: key.to_string(),
                })
            }
        }
        match items.remove(key) {
            Some(CatalogItem::Movie(movie)) => Ok(movie),
            _ => Err(StoreError::NotFound {
                kind: EntityKind::Movie,
                key: key.to_string(),
            }),
        }
    }
}
