use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Extension, Json,
};
use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::context::Session;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Item {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub qty: u32,
}

#[derive(Debug, Deserialize)]
pub struct ItemInput {
    pub name: String,
    #[serde(default)]
    pub qty: u32,
}

#[derive(Debug, Default)]
pub struct ItemStore {
    next_id: AtomicU64,
    items: DashMap<u64, Item>,
}

impl ItemStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn create(&self, input: ItemInput) -> Item {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed) + 1;
        let item = Item { id, name: input.name, qty: input.qty };
        self.items.insert(id, item.clone());
        item
    }

    pub fn get(&self, id: u64) -> Option<Item> {
        self.items.get(&id).map(|e| e.value().clone())
    }

    pub fn update(&self, id: u64, input: ItemInput) -> Option<Item> {
        let mut entry = self.items.get_mut(&id)?;
        entry.name = input.name;
        entry.qty = input.qty;
        Some(entry.clone())
    }

    pub fn remove(&self, id: u64) -> Option<Item> {
        self.items.remove(&id).map(|(_, v)| v)
    }

    pub fn list(&self) -> Vec<Item> {
        let mut out: Vec<Item> = self.items.iter().map(|e| e.value().clone()).collect();
        out.sort_by_key(|i| i.id);
        out
    }
}

/// State for the item routes.
#[derive(Clone)]
pub struct ItemsState {
    pub store: Arc<ItemStore>,
    pub csrf_header: String,
    pub csrf_session_key: String,
}

fn not_found() -> Response {
    (StatusCode::NOT_FOUND, Json(json!({ "error": "not found" }))).into_response()
}

/// `/items/{id}.json` => id
fn parse_id(file: &str) -> Option<u64> {
    file.strip_suffix(".json")?.parse().ok()
}

/// Mutations require the token previously stored in the caller's session.
async fn check_csrf(state: &ItemsState, session: Option<&Session>, headers: &HeaderMap) -> bool {
    let Some(session) = session else {
        return false;
    };
    let Some(sent) = headers.get(state.csrf_header.as_str()).and_then(|v| v.to_str().ok()) else {
        return false;
    };
    session.get(&state.csrf_session_key).await.as_deref() == Some(sent)
}

fn forbidden() -> Response {
    (StatusCode::FORBIDDEN, Json(json!({ "error": "invalid csrf token" }))).into_response()
}

pub async fn list(State(state): State<ItemsState>) -> Json<Vec<Item>> {
    Json(state.store.list())
}

pub async fn create(
    State(state): State<ItemsState>,
    session: Option<Extension<Session>>,
    headers: HeaderMap,
    Json(input): Json<ItemInput>,
) -> Response {
    if !check_csrf(&state, session.as_ref().map(|Extension(s)| s), &headers).await {
        return forbidden();
    }
    let item = state.store.create(input);
    tracing::info!(id = item.id, "item created");
    (StatusCode::CREATED, Json(item)).into_response()
}

pub async fn show(State(state): State<ItemsState>, Path(file): Path<String>) -> Response {
    match parse_id(&file).and_then(|id| state.store.get(id)) {
        Some(item) => Json(item).into_response(),
        None => not_found(),
    }
}

pub async fn update(
    State(state): State<ItemsState>,
    Path(file): Path<String>,
    session: Option<Extension<Session>>,
    headers: HeaderMap,
    Json(input): Json<ItemInput>,
) -> Response {
    if !check_csrf(&state, session.as_ref().map(|Extension(s)| s), &headers).await {
        return forbidden();
    }
    match parse_id(&file).and_then(|id| state.store.update(id, input)) {
        Some(item) => Json(item).into_response(),
        None => not_found(),
    }
}

pub async fn destroy(
    State(state): State<ItemsState>,
    Path(file): Path<String>,
    session: Option<Extension<Session>>,
    headers: HeaderMap,
) -> Response {
    if !check_csrf(&state, session.as_ref().map(|Extension(s)| s), &headers).await {
        return forbidden();
    }
    match parse_id(&file).and_then(|id| state.store.remove(id)) {
        Some(_) => StatusCode::NO_CONTENT.into_response(),
        None => not_found(),
    }
}
