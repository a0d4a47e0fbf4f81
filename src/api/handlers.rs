//! API handlers

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;

use crate::api::AppState;
use crate::types::{Item, NewItem};
use crate::{Error, Result};

/// Liveness probe
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

/// List every stored item
pub async fn list_items(State(state): State<AppState>) -> Result<Json<Vec<Item>>> {
    let items = state.gateway.list().await?;
    Ok(Json(items))
}

/// Fetch a single item
pub async fn get_item(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Item>> {
    let id = state.gateway.parse_id(&id)?;
    let item = state.gateway.get(&id).await?;
    Ok(Json(item))
}

/// Create an item; the store assigns its identifier
pub async fn create_item(
    State(state): State<AppState>,
    payload: std::result::Result<Json<NewItem>, JsonRejection>,
) -> Result<(StatusCode, Json<Item>)> {
    let payload = validated(payload)?;

    let item = state.gateway.create(payload).await?;
    tracing::debug!(id = %item.id, "Item created");

    Ok((StatusCode::CREATED, Json(item)))
}

/// Replace the mutable fields of an item
pub async fn update_item(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: std::result::Result<Json<NewItem>, JsonRejection>,
) -> Result<Json<Item>> {
    // The identifier is checked before the body
    let id = state.gateway.parse_id(&id)?;
    let payload = validated(payload)?;

    let item = state.gateway.update(&id, payload).await?;
    Ok(Json(item))
}

/// Remove an item
pub async fn delete_item(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>> {
    let id = state.gateway.parse_id(&id)?;
    state.gateway.delete(&id).await?;
    tracing::debug!(%id, "Item deleted");

    Ok(Json(MessageResponse {
        message: "Item deleted",
    }))
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

fn validated(payload: std::result::Result<Json<NewItem>, JsonRejection>) -> Result<NewItem> {
    let Json(item) = payload.map_err(|rejection| Error::InvalidBody(rejection.body_text()))?;
    item.validate()?;
    Ok(item)
}
