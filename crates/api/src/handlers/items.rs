//! Handlers for the `/items` resource.
//!
//! Every mutation synchronously drives the availability index, so the
//! "indexed iff available" invariant holds at the end of each call.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;

use lendhub_core::error::CoreError;
use lendhub_core::item::{Item, ItemPatch, NewItem};
use lendhub_core::types::DbId;

use crate::error::{validate, AppResult};
use crate::extract::SharerId;
use crate::state::AppState;

/// Query parameters for `GET /items/search`.
#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    /// Substring to look for in item names and descriptions. Blank or
    /// missing yields an empty result.
    pub text: Option<String>,
}

/// POST /items
///
/// List a new item; the header user becomes its owner.
pub async fn create_item(
    SharerId(owner_id): SharerId,
    State(state): State<AppState>,
    Json(body): Json<NewItem>,
) -> AppResult<impl IntoResponse> {
    validate(&body)?;
    state
        .users
        .find_by_id(owner_id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "User",
            id: owner_id,
        })?;

    let item = state.items.create(owner_id, body).await?;
    state.index.apply(&item);
    tracing::info!(item_id = item.id, owner_id, "item created");
    Ok((StatusCode::CREATED, Json(item)))
}

/// PATCH /items/{id}
///
/// Partially update an item. Only the owner may do this; anyone else gets
/// 404 rather than 403, so item ids cannot be probed for ownership.
pub async fn update_item(
    SharerId(user_id): SharerId,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(patch): Json<ItemPatch>,
) -> AppResult<Json<Item>> {
    let existing = state
        .items
        .find_by_id(id)
        .await?
        .ok_or(CoreError::NotFound { entity: "Item", id })?;
    if existing.owner_id != user_id {
        return Err(CoreError::NotFound { entity: "Item", id }.into());
    }

    let item = state
        .items
        .update(id, patch)
        .await?
        .ok_or(CoreError::NotFound { entity: "Item", id })?;
    // Recomputed from the merged result: upserts or evicts as needed.
    state.index.apply(&item);
    Ok(Json(item))
}

/// GET /items/{id}
pub async fn get_item(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<Item>> {
    let item = state
        .items
        .find_by_id(id)
        .await?
        .ok_or(CoreError::NotFound { entity: "Item", id })?;
    Ok(Json(item))
}

/// GET /items
///
/// List the header user's own items.
pub async fn list_items(
    SharerId(owner_id): SharerId,
    State(state): State<AppState>,
) -> AppResult<Json<Vec<Item>>> {
    Ok(Json(state.items.list_by_owner(owner_id).await?))
}

/// DELETE /items/{id}
///
/// Delete an owned item (and its bookings) and evict it from the index.
pub async fn delete_item(
    SharerId(user_id): SharerId,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let existing = state
        .items
        .find_by_id(id)
        .await?
        .ok_or(CoreError::NotFound { entity: "Item", id })?;
    if existing.owner_id != user_id {
        return Err(CoreError::NotFound { entity: "Item", id }.into());
    }

    state.items.delete(id).await?;
    state.index.remove(id);
    Ok(StatusCode::NO_CONTENT)
}

/// GET /items/search?text=
///
/// Search available items through the availability index. Ids the index
/// returns but the store no longer has (a racing delete) are skipped.
pub async fn search_items(
    State(state): State<AppState>,
    Query(params): Query<SearchQuery>,
) -> AppResult<Json<Vec<Item>>> {
    let text = params.text.unwrap_or_default();
    let ids = state.index.search(&text);

    let mut items = Vec::with_capacity(ids.len());
    for id in ids {
        if let Some(item) = state.items.find_by_id(id).await? {
            items.push(item);
        }
    }
    Ok(Json(items))
}
