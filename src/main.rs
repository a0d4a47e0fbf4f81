//! Stockpile server binary

use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use stockpile::api::{create_router, AppState};
use stockpile::config::{AppConfig, LogFormat};
use stockpile::storage::{create_storage, ItemStore};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let dotenv_loaded = dotenv::dotenv().is_ok();

    let config = AppConfig::load().context("failed to load configuration")?;

    init_tracing(&config)?;

    if !dotenv_loaded {
        tracing::info!("No .env file found; using process environment");
    }

    let (storage_config, operation_timeout) = config
        .storage_runtime()
        .context("invalid database configuration")?;

    // Nothing to serve without the store, so a failed connection ends the process
    let store: Arc<dyn ItemStore> = Arc::from(
        create_storage(storage_config)
            .await
            .context("failed to connect to the database")?,
    );

    let router = create_router(AppState::new(store.clone(), operation_timeout));

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind to {}", addr))?;
    tracing::info!(%addr, "Listening for HTTP traffic");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    store.shutdown().await;
    tracing::info!("Server stopped");

    Ok(())
}

fn init_tracing(config: &AppConfig) -> anyhow::Result<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.logging.level.clone()))
        .unwrap_or_else(|_| EnvFilter::new("stockpile=info,tower_http=info"));

    let registry = tracing_subscriber::registry().with(env_filter);

    match config.logging.format {
        LogFormat::Json => {
            registry
                .with(tracing_subscriber::fmt::layer().json())
                .init();
        }
        LogFormat::Text => {
            registry.with(tracing_subscriber::fmt::layer()).init();
        }
    }

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::warn!(error = %err, "Failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                tracing::warn!(error = %err, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
