//! Route definitions for the `/bookings` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::bookings;
use crate::state::AppState;

/// Routes mounted at `/bookings`.
///
/// ```text
/// POST   /           -> create_booking        (booker from header)
/// GET    /           -> list_bookings         (header user as booker)
/// GET    /owner      -> list_owner_bookings   (header user as owner)
/// GET    /{id}       -> get_booking           (booker or owner)
/// PATCH  /{id}       -> update_status         (?approved=true|false)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(bookings::list_bookings).post(bookings::create_booking),
        )
        .route("/owner", get(bookings::list_owner_bookings))
        .route(
            "/{id}",
            get(bookings::get_booking).patch(bookings::update_status),
        )
}
