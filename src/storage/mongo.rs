//! MongoDB storage backend

use std::time::Duration;

use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::bson::{doc, oid::ObjectId};
use mongodb::options::ClientOptions;
use mongodb::{Client, Collection};
use serde::{Deserialize, Serialize};

use crate::types::{Item, ItemId, NewItem};
use crate::{Error, Result};

use super::ItemStore;

/// Document shape stored in the collection
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ItemDocument {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    id: Option<ObjectId>,
    name: String,
    unit_price: f64,
    quantity: i64,
}

impl ItemDocument {
    fn into_item(self) -> Result<Item> {
        let id = self
            .id
            .ok_or_else(|| Error::storage("stored document has no _id"))?;
        Ok(Item {
            id: ItemId::new(id.to_hex()),
            name: self.name,
            unit_price: self.unit_price,
            quantity: self.quantity,
        })
    }
}

/// MongoDB item storage
pub struct MongoStore {
    client: Client,
    collection: Collection<ItemDocument>,
}

impl MongoStore {
    /// Connect and verify the server answers a ping
    pub async fn connect(
        uri: &str,
        database: &str,
        collection: &str,
        connect_timeout: Duration,
    ) -> Result<Self> {
        let mut options = ClientOptions::parse(uri).await?;
        options.app_name = Some(env!("CARGO_PKG_NAME").to_string());
        options.connect_timeout = Some(connect_timeout);
        options.server_selection_timeout = Some(connect_timeout);

        let client = Client::with_options(options)?;
        let store = Self {
            collection: client.database(database).collection(collection),
            client,
        };
        store.ping().await?;

        tracing::info!(
            target_uri = %redact_uri(uri),
            database,
            collection,
            "Connected to MongoDB"
        );

        Ok(store)
    }

    fn object_id(raw: &str) -> Result<ObjectId> {
        ObjectId::parse_str(raw).map_err(|e| Error::InvalidId(e.to_string()))
    }
}

#[async_trait]
impl ItemStore for MongoStore {
    fn parse_id(&self, raw: &str) -> Result<ItemId> {
        let oid = Self::object_id(raw)?;
        Ok(ItemId::new(oid.to_hex()))
    }

    async fn list(&self) -> Result<Vec<Item>> {
        let cursor = self.collection.find(doc! {}).sort(doc! { "_id": 1 }).await?;
        let documents: Vec<ItemDocument> = cursor.try_collect().await?;

        documents.into_iter().map(ItemDocument::into_item).collect()
    }

    async fn get(&self, id: &ItemId) -> Result<Item> {
        let oid = Self::object_id(id.as_str())?;

        self.collection
            .find_one(doc! { "_id": oid })
            .await?
            .ok_or(Error::NotFound)?
            .into_item()
    }

    async fn create(&self, item: NewItem) -> Result<Item> {
        let document = ItemDocument {
            id: None,
            name: item.name.clone(),
            unit_price: item.unit_price,
            quantity: item.quantity,
        };

        let result = self.collection.insert_one(&document).await?;
        let oid = result
            .inserted_id
            .as_object_id()
            .ok_or_else(|| Error::storage("inserted _id is not an ObjectId"))?;

        Ok(Item::from_new(ItemId::new(oid.to_hex()), item))
    }

    async fn update(&self, id: &ItemId, item: NewItem) -> Result<Item> {
        let oid = Self::object_id(id.as_str())?;

        let result = self
            .collection
            .update_one(
                doc! { "_id": oid },
                doc! {
                    "$set": {
                        "name": item.name.as_str(),
                        "unitPrice": item.unit_price,
                        "quantity": item.quantity,
                    }
                },
            )
            .await?;

        if result.matched_count == 0 {
            return Err(Error::NotFound);
        }

        Ok(Item::from_new(id.clone(), item))
    }

    async fn delete(&self, id: &ItemId) -> Result<()> {
        let oid = Self::object_id(id.as_str())?;

        let result = self.collection.delete_one(doc! { "_id": oid }).await?;
        if result.deleted_count == 0 {
            return Err(Error::NotFound);
        }

        Ok(())
    }

    async fn ping(&self) -> Result<()> {
        self.client
            .database("admin")
            .run_command(doc! { "ping": 1 })
            .await?;
        Ok(())
    }

    async fn shutdown(&self) {
        self.client.clone().shutdown().await;
        tracing::info!("Disconnected from MongoDB");
    }
}

/// Hide credentials in a connection string before it is logged
pub fn redact_uri(uri: &str) -> String {
    let Some(scheme_end) = uri.find("://") else {
        return uri.to_string();
    };
    let rest = &uri[scheme_end + 3..];
    let host_end = rest.find('/').unwrap_or(rest.len());

    match rest[..host_end].rfind('@') {
        Some(at) => format!("{}://***@{}", &uri[..scheme_end], &rest[at + 1..]),
        None => uri.to_string(),
    }
}
