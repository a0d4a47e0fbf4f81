//! Storage abstraction layer
//!
//! Provides a unified interface over MongoDB and an in-process store, plus
//! the [`ItemGateway`] that bounds every call with a timeout.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use crate::types::{Item, ItemId, NewItem};
use crate::{Error, Result};

pub mod memory;
pub mod mongo;

/// Item storage backend trait
#[async_trait]
pub trait ItemStore: Send + Sync {
    /// Parse a raw identifier into this backend's identifier format
    fn parse_id(&self, raw: &str) -> Result<ItemId>;

    /// List all items in insertion order
    async fn list(&self) -> Result<Vec<Item>>;

    /// Fetch one item
    async fn get(&self, id: &ItemId) -> Result<Item>;

    /// Persist a new item and assign its identifier
    async fn create(&self, item: NewItem) -> Result<Item>;

    /// Replace the mutable fields of an existing item
    async fn update(&self, id: &ItemId, item: NewItem) -> Result<Item>;

    /// Remove an item
    async fn delete(&self, id: &ItemId) -> Result<()>;

    /// Check that the backend is reachable
    async fn ping(&self) -> Result<()>;

    /// Release backend resources
    async fn shutdown(&self) {}
}

/// Storage configuration
#[derive(Debug, Clone)]
pub enum StorageConfig {
    Mongo {
        uri: String,
        database: String,
        collection: String,
        connect_timeout: Duration,
    },
    Memory,
}

/// Create storage backend from config
pub async fn create_storage(config: StorageConfig) -> Result<Box<dyn ItemStore>> {
    match config {
        StorageConfig::Mongo {
            uri,
            database,
            collection,
            connect_timeout,
        } => {
            let backend =
                mongo::MongoStore::connect(&uri, &database, &collection, connect_timeout).await?;
            Ok(Box::new(backend))
        }
        StorageConfig::Memory => Ok(Box::new(memory::MemoryStore::new())),
    }
}

/// Shared handle used by request handlers
///
/// Wraps a store and fails any call that does not finish within
/// `operation_timeout`.
#[derive(Clone)]
pub struct ItemGateway {
    store: Arc<dyn ItemStore>,
    operation_timeout: Duration,
}

impl ItemGateway {
    pub fn new(store: Arc<dyn ItemStore>, operation_timeout: Duration) -> Self {
        Self {
            store,
            operation_timeout,
        }
    }

    pub fn parse_id(&self, raw: &str) -> Result<ItemId> {
        self.store.parse_id(raw)
    }

    pub async fn list(&self) -> Result<Vec<Item>> {
        self.bounded("list", self.store.list()).await
    }

    pub async fn get(&self, id: &ItemId) -> Result<Item> {
        self.bounded("get", self.store.get(id)).await
    }

    pub async fn create(&self, item: NewItem) -> Result<Item> {
        self.bounded("create", self.store.create(item)).await
    }

    pub async fn update(&self, id: &ItemId, item: NewItem) -> Result<Item> {
        self.bounded("update", self.store.update(id, item)).await
    }

    pub async fn delete(&self, id: &ItemId) -> Result<()> {
        self.bounded("delete", self.store.delete(id)).await
    }

    async fn bounded<T>(
        &self,
        operation: &'static str,
        fut: impl Future<Output = Result<T>>,
    ) -> Result<T> {
        let result = match tokio::time::timeout(self.operation_timeout, fut).await {
            Ok(result) => result,
            Err(_) => Err(Error::Timeout {
                operation,
                after: self.operation_timeout,
            }),
        };

        if let Err(err) = &result {
            if !err.is_client_error() {
                tracing::error!(operation, error = %err, "Store operation failed");
            }
        }

        result
    }
}
