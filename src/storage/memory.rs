//! In-process storage backend
//!
//! Keeps items in insertion order behind a lock. Identifiers are UUIDs.

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::types::{Item, ItemId, NewItem};
use crate::{Error, Result};

use super::ItemStore;

/// In-memory item storage
#[derive(Default)]
pub struct MemoryStore {
    items: RwLock<Vec<Item>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ItemStore for MemoryStore {
    fn parse_id(&self, raw: &str) -> Result<ItemId> {
        let uuid = Uuid::parse_str(raw).map_err(|e| Error::InvalidId(e.to_string()))?;
        Ok(ItemId::new(uuid.to_string()))
    }

    async fn list(&self) -> Result<Vec<Item>> {
        Ok(self.items.read().await.clone())
    }

    async fn get(&self, id: &ItemId) -> Result<Item> {
        self.items
            .read()
            .await
            .iter()
            .find(|item| &item.id == id)
            .cloned()
            .ok_or(Error::NotFound)
    }

    async fn create(&self, item: NewItem) -> Result<Item> {
        let item = Item::from_new(ItemId::new(Uuid::new_v4().to_string()), item);
        self.items.write().await.push(item.clone());
        Ok(item)
    }

    async fn update(&self, id: &ItemId, item: NewItem) -> Result<Item> {
        let mut items = self.items.write().await;
        let slot = items
            .iter_mut()
            .find(|existing| &existing.id == id)
            .ok_or(Error::NotFound)?;
        *slot = Item::from_new(id.clone(), item);
        Ok(slot.clone())
    }

    async fn delete(&self, id: &ItemId) -> Result<()> {
        let mut items = self.items.write().await;
        let position = items
            .iter()
            .position(|item| &item.id == id)
            .ok_or(Error::NotFound)?;
        items.remove(position);
        Ok(())
    }

    async fn ping(&self) -> Result<()> {
        Ok(())
    }
}
