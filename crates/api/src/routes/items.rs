//! Route definitions for the `/items` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::items;
use crate::state::AppState;

/// Routes mounted at `/items`.
///
/// ```text
/// POST   /           -> create_item       (owner from header)
/// GET    /           -> list_items        (header user's items)
/// GET    /search     -> search_items      (availability index)
/// GET    /{id}       -> get_item
/// PATCH  /{id}       -> update_item       (owner only)
/// DELETE /{id}       -> delete_item       (owner only)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(items::list_items).post(items::create_item))
        .route("/search", get(items::search_items))
        .route(
            "/{id}",
            get(items::get_item)
                .patch(items::update_item)
                .delete(items::delete_item),
        )
}
