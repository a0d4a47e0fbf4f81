//! Runs the store against a live MongoDB when `MONGODB_URI` is set.

use std::time::Duration;

use mongodb::bson::Document;
use mongodb::Client;
use stockpile::storage::mongo::MongoStore;
use stockpile::storage::ItemStore;
use stockpile::types::NewItem;
use stockpile::Error;

#[tokio::test]
async fn test_mongo_store_round_trip() {
    let Ok(uri) = std::env::var("MONGODB_URI") else {
        eprintln!("MONGODB_URI not set; skipping MongoDB integration test");
        return;
    };

    let collection = format!("ci_items_{}", std::process::id());
    let store = MongoStore::connect(&uri, "test", &collection, Duration::from_secs(10))
        .await
        .expect("MongoDB should be reachable");

    let created = store
        .create(NewItem::new("ci-test", 1.25, 3))
        .await
        .unwrap();
    assert_eq!(created.id.as_str().len(), 24);

    let fetched = store.get(&created.id).await.unwrap();
    assert_eq!(fetched, created);

    let updated = store
        .update(&created.id, NewItem::new("ci-test-updated", 2.0, 4))
        .await
        .unwrap();
    assert_eq!(store.get(&created.id).await.unwrap(), updated);

    let listed = store.list().await.unwrap();
    assert!(listed.iter().any(|item| item.id == created.id));

    store.delete(&created.id).await.unwrap();
    assert!(matches!(store.get(&created.id).await, Err(Error::NotFound)));
    assert!(matches!(store.delete(&created.id).await, Err(Error::NotFound)));

    assert!(matches!(store.parse_id("xyz"), Err(Error::InvalidId(_))));

    store.shutdown().await;

    let client = Client::with_uri_str(&uri).await.unwrap();
    client
        .database("test")
        .collection::<Document>(&collection)
        .drop()
        .await
        .unwrap();
    client.shutdown().await;
}
