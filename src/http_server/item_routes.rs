//! Item HTTP Routes
//!
//! CRUD over namespaced items:
//!
//! - `GET    /{group}/{kind}`      list
//! - `POST   /{group}/{kind}`      create
//! - `GET    /{group}/{kind}/{id}` read
//! - `PUT    /{group}/{kind}/{id}` replace
//! - `DELETE /{group}/{kind}/{id}` delete

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};

use crate::core::{namespace, Item, Service};

use super::errors::{ApiError, ApiResult};

/// State shared by item handlers
pub struct ItemState {
    pub service: Arc<dyn Service>,
}

impl ItemState {
    pub fn new(service: Arc<dyn Service>) -> Self {
        Self { service }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ListResponse {
    pub items: Vec<Item>,
}

#[derive(Debug, Deserialize)]
pub struct NamespacePath {
    pub group: String,
    pub kind: String,
}

impl NamespacePath {
    fn key(&self) -> String {
        namespace::encode(&self.group, &self.kind)
    }
}

#[derive(Debug, Deserialize)]
pub struct ItemPath {
    pub group: String,
    pub kind: String,
    pub id: String,
}

impl ItemPath {
    fn key(&self) -> String {
        namespace::encode(&self.group, &self.kind)
    }
}

/// Create item routes
pub fn item_routes(state: Arc<ItemState>) -> Router {
    Router::new()
        .route("/:group/:kind", get(list_handler).post(create_handler))
        .route(
            "/:group/:kind/:id",
            get(read_handler)
                .put(replace_handler)
                .delete(delete_handler),
        )
        .with_state(state)
}

/// Decode a request body into an item
fn parse_item(body: &[u8]) -> ApiResult<Item> {
    serde_json::from_slice::<Item>(body).map_err(|e| ApiError::InvalidBody(e.to_string()))
}

async fn list_handler(
    State(state): State<Arc<ItemState>>,
    Path(path): Path<NamespacePath>,
) -> ApiResult<Json<ListResponse>> {
    let key = path.key();
    let items = state.service.list(&key)?;
    Ok(Json(ListResponse { items }))
}

async fn create_handler(
    State(state): State<Arc<ItemState>>,
    Path(path): Path<NamespacePath>,
    body: Bytes,
) -> ApiResult<(StatusCode, Json<Item>)> {
    let item = parse_item(&body)?;
    let key = path.key();
    let stored = state.service.create(&key, item)?;
    Ok((StatusCode::CREATED, Json(stored)))
}

async fn read_handler(
    State(state): State<Arc<ItemState>>,
    Path(path): Path<ItemPath>,
) -> ApiResult<Json<Item>> {
    let key = path.key();
    let item = state.service.read(&key, &path.id)?;
    Ok(Json(item))
}

async fn replace_handler(
    State(state): State<Arc<ItemState>>,
    Path(path): Path<ItemPath>,
    body: Bytes,
) -> ApiResult<StatusCode> {
    let item = parse_item(&body)?;
    let key = path.key();
    state.service.replace(&key, &path.id, item)?;
    Ok(StatusCode::NO_CONTENT)
}

async fn delete_handler(
    State(state): State<Arc<ItemState>>,
    Path(path): Path<ItemPath>,
) -> ApiResult<StatusCode> {
    let key = path.key();
    state.service.delete(&key, &path.id)?;
    Ok(StatusCode::NO_CONTENT)
}
