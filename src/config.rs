use std::env;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{bail, Result};
use serde::Deserialize;

use crate::storage::StorageConfig;

const DEFAULT_PORT: u16 = 8080;

/// Top-level application configuration loaded from file + environment.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseSection,
    pub logging: LoggingSection,
}

impl AppConfig {
    /// Load configuration from disk and environment.
    ///
    /// Precedence, lowest first: config file, `STOCKPILE__*` variables, then
    /// the conventional `MONGODB_URI` / `MONGO_URI` / `PORT` variables.
    pub fn load() -> Result<Self> {
        let config_path =
            env::var("STOCKPILE_CONFIG").unwrap_or_else(|_| "config.toml".to_string());

        let mut config = Self::from_sources(Some(Path::new(&config_path)), true)?;
        config.apply_conventional_env(|key| env::var(key).ok())?;

        Ok(config)
    }

    /// Load configuration from an optional file, optionally layering the
    /// prefixed environment on top.
    pub fn from_sources(config_path: Option<&Path>, with_env: bool) -> Result<Self> {
        let mut builder = config::Config::builder();

        if let Some(path) = config_path.filter(|p| p.exists()) {
            builder = builder.add_source(config::File::from(PathBuf::from(path)));
        }

        if with_env {
            builder = builder.add_source(
                config::Environment::with_prefix("STOCKPILE")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            );
        }

        let settings = builder.build()?;
        let mut config: Self = settings.try_deserialize()?;

        if config.logging.level.trim().is_empty() {
            config.logging.level = "info".to_string();
        }

        Ok(config)
    }

    /// Apply `MONGODB_URI` (or legacy `MONGO_URI`) and `PORT`.
    pub fn apply_conventional_env(
        &mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<()> {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(uri) = non_empty("MONGODB_URI").or_else(|| non_empty("MONGO_URI")) {
            self.database.uri = Some(uri);
        }

        if let Some(port) = non_empty("PORT") {
            self.server.port = match port.trim().parse() {
                Ok(port) => port,
                Err(_) => bail!("invalid PORT: {}", port),
            };
        }

        Ok(())
    }

    /// Resolve storage configuration and the per-operation timeout.
    pub fn storage_runtime(&self) -> Result<(StorageConfig, Duration)> {
        self.database.to_runtime()
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: DEFAULT_PORT,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DatabaseSection {
    pub backend: DatabaseBackendKind,
    pub uri: Option<String>,
    pub name: String,
    pub collection: String,
    pub connect_timeout_secs: u64,
    pub operation_timeout_secs: u64,
}

impl DatabaseSection {
    pub fn to_runtime(&self) -> Result<(StorageConfig, Duration)> {
        if self.operation_timeout_secs == 0 {
            bail!("database.operation_timeout_secs must be greater than zero");
        }
        let operation_timeout = Duration::from_secs(self.operation_timeout_secs);

        match self.backend {
            DatabaseBackendKind::Memory => Ok((StorageConfig::Memory, operation_timeout)),
            DatabaseBackendKind::Mongo => {
                let uri = match self.uri.as_deref().map(str::trim) {
                    Some(uri) if !uri.is_empty() => uri.to_string(),
                    _ => bail!("MONGODB_URI (or MONGO_URI) is required for the mongo backend"),
                };
                if self.name.trim().is_empty() {
                    bail!("database.name must be specified");
                }
                if self.collection.trim().is_empty() {
                    bail!("database.collection must be specified");
                }
                if self.connect_timeout_secs == 0 {
                    bail!("database.connect_timeout_secs must be greater than zero");
                }

                let storage_config = StorageConfig::Mongo {
                    uri,
                    database: self.name.clone(),
                    collection: self.collection.clone(),
                    connect_timeout: Duration::from_secs(self.connect_timeout_secs),
                };
                Ok((storage_config, operation_timeout))
            }
        }
    }
}

impl Default for DatabaseSection {
    fn default() -> Self {
        Self {
            backend: DatabaseBackendKind::Mongo,
            uri: None,
            name: "test".to_string(),
            collection: "items".to_string(),
            connect_timeout_secs: 10,
            operation_timeout_secs: 5,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum DatabaseBackendKind {
    #[default]
    Mongo,
    Memory,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingSection {
    pub level: String,
    pub format: LogFormat,
}

impl Default for LoggingSection {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Text,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Json,
    #[default]
    Text,
}
