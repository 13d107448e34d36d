//! DynamoDB repository implementation.
//!
//! Implements `CatalogRepository` from `moviedb_core::storage` over the
//! single catalog table.

use std::collections::HashMap;

use async_trait::async_trait;
use aws_sdk_dynamodb::types::{AttributeValue, ReturnValue};
use aws_sdk_dynamodb::Client;

use moviedb_core::catalog::keys::{PARTITION_ATTR, SORT_ATTR};
use moviedb_core::catalog::{CatalogItem, EntityKind, FilterExpression, ItemKey, Movie};
use moviedb_core::storage::{CatalogRepository, Result, StoreError};

use super::conversions::{item_to_catalog_item, item_to_movie, key_to_attributes, movie_to_item};
use super::error::{
    map_delete_item_error, map_get_item_error, map_put_item_error, map_query_error,
    map_scan_error,
};

/// DynamoDB-based repository implementation.
pub struct DynamoDbRepository {
    client: Client,
    table_name: String,
}

impl DynamoDbRepository {
    /// Creates a new repository with the given DynamoDB client and table name.
    pub fn new(client: Client, table_name: impl Into<String>) -> Self {
        Self {
            client,
            table_name: table_name.into(),
        }
    }

    /// Creates a new repository using the AWS SDK default credential chain.
    pub async fn connect(table_name: impl Into<String>) -> Self {
        let config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
        Self::new(Client::new(&config), table_name)
    }

    /// Get the table name.
    pub fn table_name(&self) -> &str {
        &self.table_name
    }
}

#[async_trait]
impl CatalogRepository for DynamoDbRepository {
    async fn scan(&self, filter: &FilterExpression) -> Result<Vec<CatalogItem>> {
        let values: HashMap<String, AttributeValue> = filter
            .bindings
            .iter()
            .map(|(placeholder, value)| (placeholder.clone(), AttributeValue::S(value.clone())))
            .collect();
        let expression = filter.expression();

        let mut items = Vec::new();
        let mut start_key = None;
        loop {
            let page = self
                .client
                .scan()
                .table_name(&self.table_name)
                .filter_expression(&expression)
                .set_expression_attribute_values(Some(values.clone()))
                .set_exclusive_start_key(start_key)
                .send()
                .await
                .map_err(map_scan_error)?;

            for item in page.items.unwrap_or_default() {
                items.push(item_to_catalog_item(&item)?);
            }

            start_key = page.last_evaluated_key;
            if start_key.is_none() {
                break;
            }
        }

        tracing::debug!(expression = %expression, count = items.len(), "Scan completed");
        Ok(items)
    }

    async fn query_partition(&self, partition: &str) -> Result<Vec<CatalogItem>> {
        let mut items = Vec::new();
        let mut start_key = None;
        loop {
            let page = self
                .client
                .query()
                .table_name(&self.table_name)
                .key_condition_expression(format!("{PARTITION_ATTR} = :partition"))
                .expression_attribute_values(":partition", AttributeValue::S(partition.to_string()))
                .set_exclusive_start_key(start_key)
                .send()
                .await
                .map_err(map_query_error)?;

            for item in page.items.unwrap_or_default() {
                items.push(item_to_catalog_item(&item)?);
            }

            start_key = page.last_evaluated_key;
            if start_key.is_none() {
                break;
            }
        }

        Ok(items)
    }

    async fn get_item(&self, key: &ItemKey) -> Result<Option<CatalogItem>> {
        let result = self
            .client
            .get_item()
            .table_name(&self.table_name)
            .set_key(Some(key_to_attributes(key)))
            .send()
            .await
            .map_err(map_get_item_error)?;

        match result.item {
            Some(item) => Ok(Some(item_to_catalog_item(&item)?)),
            None => Ok(None),
        }
    }

    async fn put_movie(&self, movie: &Movie) -> Result<()> {
        let item = movie_to_item(movie)?;
        let key = movie
            .key()
            .map_err(|e| StoreError::InvalidData(e.to_string()))?;

        self.client
            .put_item()
            .table_name(&self.table_name)
            .set_item(Some(item))
            .condition_expression(format!(
                "attribute_not_exists({PARTITION_ATTR}) AND attribute_not_exists({SORT_ATTR})"
            ))
            .send()
            .await
            .map_err(|e| map_put_item_error(e, EntityKind::Movie, key.to_string()))?;

        Ok(())
    }

    async fn delete_movie(&self, key: &ItemKey) -> Result<Movie> {
        let result = self
            .client
            .delete_item()
            .table_name(&self.table_name)
            .set_key(Some(key_to_attributes(key)))
            .condition_expression(format!("attribute_exists({PARTITION_ATTR})"))
            .return_values(ReturnValue::AllOld)
            .send()
            .await
            .map_err(|e| map_delete_item_error(e, EntityKind::Movie, key.to_string()))?;

        let attributes = result.attributes.ok_or_else(|| StoreError::NotFound {
            kind: EntityKind::Movie,
            key: key.to_string(),
        })?;
        item_to_movie(&attributes)
    }
}
