use std::collections::HashMap;
use std::time::Duration;

use stockpile::config::{AppConfig, DatabaseBackendKind, DatabaseSection, LogFormat};
use stockpile::storage::StorageConfig;
use tempfile::TempDir;

fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let vars: HashMap<String, String> = vars
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key| vars.get(key).cloned()
}

#[test]
fn defaults_match_documented_values() {
    let config = AppConfig::from_sources(None, false).unwrap();

    assert_eq!(config.server.port, 8080);
    assert_eq!(config.database.backend, DatabaseBackendKind::Mongo);
    assert_eq!(config.database.name, "test");
    assert_eq!(config.database.collection, "items");
    assert_eq!(config.database.operation_timeout_secs, 5);
    assert_eq!(config.logging.level, "info");
    assert_eq!(config.logging.format, LogFormat::Text);
}

#[test]
fn mongo_backend_requires_uri() {
    let config = AppConfig::default();

    let result = config.storage_runtime();
    assert!(
        result.is_err(),
        "Expected mongo backend without a URI to fail validation"
    );
}

#[test]
fn memory_backend_needs_no_uri() {
    let config = AppConfig {
        database: DatabaseSection {
            backend: DatabaseBackendKind::Memory,
            ..Default::default()
        },
        ..Default::default()
    };

    let (storage, timeout) = config.storage_runtime().unwrap();
    assert!(matches!(storage, StorageConfig::Memory));
    assert_eq!(timeout, Duration::from_secs(5));
}

#[test]
fn zero_operation_timeout_is_rejected() {
    let config = AppConfig {
        database: DatabaseSection {
            backend: DatabaseBackendKind::Memory,
            operation_timeout_secs: 0,
            ..Default::default()
        },
        ..Default::default()
    };

    assert!(config.storage_runtime().is_err());
}

#[test]
fn mongodb_uri_is_preferred_over_legacy_variable() {
    let mut config = AppConfig::default();
    config
        .apply_conventional_env(lookup(&[
            ("MONGODB_URI", "mongodb://primary:27017"),
            ("MONGO_URI", "mongodb://legacy:27017"),
            ("PORT", "9090"),
        ]))
        .unwrap();

    assert_eq!(config.server.port, 9090);

    let (storage, _) = config.storage_runtime().unwrap();
    match storage {
        StorageConfig::Mongo {
            uri,
            database,
            collection,
            connect_timeout,
        } => {
            assert_eq!(uri, "mongodb://primary:27017");
            assert_eq!(database, "test");
            assert_eq!(collection, "items");
            assert_eq!(connect_timeout, Duration::from_secs(10));
        }
        other => panic!("Unexpected storage config: {other:?}"),
    }
}

#[test]
fn legacy_uri_is_used_when_preferred_is_empty() {
    let mut config = AppConfig::default();
    config
        .apply_conventional_env(lookup(&[
            ("MONGODB_URI", ""),
            ("MONGO_URI", "mongodb://legacy:27017"),
        ]))
        .unwrap();

    assert_eq!(config.database.uri.as_deref(), Some("mongodb://legacy:27017"));
    assert_eq!(config.server.port, 8080);
}

#[test]
fn invalid_port_is_an_error() {
    let mut config = AppConfig::default();
    let result = config.apply_conventional_env(lookup(&[("PORT", "eighty")]));
    assert!(result.is_err());
}

#[test]
fn config_file_overrides_defaults() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("config.toml");
    std::fs::write(
        &path,
        r#"
[server]
port = 3001

[database]
backend = "memory"
operation_timeout_secs = 2

[logging]
format = "json"
"#,
    )
    .unwrap();

    let config = AppConfig::from_sources(Some(&path), false).unwrap();

    assert_eq!(config.server.host, "0.0.0.0");
    assert_eq!(config.server.port, 3001);
    assert_eq!(config.database.backend, DatabaseBackendKind::Memory);
    assert_eq!(config.logging.format, LogFormat::Json);
    // Unset keys inside a present section keep their defaults
    assert_eq!(config.database.collection, "items");

    let (_, timeout) = config.storage_runtime().unwrap();
    assert_eq!(timeout, Duration::from_secs(2));
}
