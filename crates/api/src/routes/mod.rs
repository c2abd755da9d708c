pub mod bookings;
pub mod health;
pub mod items;
pub mod users;

use axum::Router;

use crate::state::AppState;

/// Build the resource route tree (mounted at the root, next to `/health`).
///
/// ```text
/// /users                users CRUD
/// /items                item CRUD + /items/search
/// /bookings             booking lifecycle + listings
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/users", users::router())
        .nest("/items", items::router())
        .nest("/bookings", bookings::router())
}
