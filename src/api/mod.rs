//! HTTP API server

use axum::{routing::get, Router};
use std::sync::Arc;
use std::time::Duration;
use tower_http::trace::TraceLayer;

use crate::storage::ItemStore;

pub mod error;
pub mod handlers;
pub mod state;

pub use state::AppState;

/// Build the API router using the provided application state
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .nest(
            "/api",
            Router::new()
                .route(
                    "/items",
                    get(handlers::list_items).post(handlers::create_item),
                )
                .route(
                    "/items/:id",
                    get(handlers::get_item)
                        .put(handlers::update_item)
                        .delete(handlers::delete_item),
                ),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Convenience helper for building a router straight from a store
pub fn create_store_router(store: Arc<dyn ItemStore>, operation_timeout: Duration) -> Router {
    create_router(AppState::new(store, operation_timeout))
}
