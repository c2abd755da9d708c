//! Handlers for the `/bookings` resource.
//!
//! Thin shims over the [`BookingEngine`]: they validate the interval (the
//! core relies on `start < end` holding upstream), parse listing
//! parameters, and map domain errors to HTTP.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use chrono::Utc;
use serde::Deserialize;

use lendhub_core::booking::{Booking, BookingState, Role};
use lendhub_core::error::CoreError;
use lendhub_core::types::{DbId, Timestamp};

use crate::error::{AppError, AppResult};
use crate::extract::SharerId;
use crate::state::AppState;

/// Default page size for booking listings.
const DEFAULT_SIZE: i64 = 10;

/// Request body for `POST /bookings`.
#[derive(Debug, Deserialize)]
pub struct CreateBookingRequest {
    pub item_id: DbId,
    pub start: Timestamp,
    pub end: Timestamp,
}

/// Query parameters for `PATCH /bookings/{id}`.
#[derive(Debug, Deserialize)]
pub struct ApproveQuery {
    pub approved: bool,
}

/// Query parameters for booking listings.
#[derive(Debug, Deserialize)]
pub struct ListQuery {
    /// State bucket token; defaults to `ALL`.
    pub state: Option<String>,
    /// Zero-based offset into the filtered sequence; defaults to 0.
    pub from: Option<i64>,
    /// Maximum number of results; defaults to 10.
    pub size: Option<i64>,
}

impl ListQuery {
    /// Parse and validate into `(state, from, size)`.
    fn resolve(self) -> Result<(BookingState, usize, usize), AppError> {
        let state = match self.state.as_deref() {
            None => BookingState::All,
            Some(raw) => BookingState::parse(raw)?,
        };
        let from = self.from.unwrap_or(0);
        if from < 0 {
            return Err(CoreError::Validation("from must not be negative".into()).into());
        }
        let size = self.size.unwrap_or(DEFAULT_SIZE);
        if size < 1 {
            return Err(CoreError::Validation("size must be positive".into()).into());
        }
        Ok((state, from as usize, size as usize))
    }
}

/// POST /bookings
///
/// Request a booking of an item for an interval. Interval ordering is
/// validated here, upstream of the engine.
pub async fn create_booking(
    SharerId(booker_id): SharerId,
    State(state): State<AppState>,
    Json(body): Json<CreateBookingRequest>,
) -> AppResult<impl IntoResponse> {
    if body.end <= body.start {
        return Err(CoreError::Validation("end must be after start".into()).into());
    }
    if body.start < Utc::now() {
        return Err(CoreError::Validation("start must not be in the past".into()).into());
    }

    let booking = state
        .engine
        .create_booking(body.item_id, booker_id, body.start, body.end)
        .await?;
    Ok((StatusCode::CREATED, Json(booking)))
}

/// PATCH /bookings/{id}?approved=true|false
///
/// Owner approves or rejects a waiting booking.
pub async fn update_status(
    SharerId(user_id): SharerId,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Query(params): Query<ApproveQuery>,
) -> AppResult<Json<Booking>> {
    let booking = state
        .engine
        .update_status(id, user_id, params.approved)
        .await?;
    Ok(Json(booking))
}

/// GET /bookings/{id}
///
/// Fetch one booking; visible only to its booker and the item owner.
pub async fn get_booking(
    SharerId(user_id): SharerId,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<Booking>> {
    let booking = state.engine.get_for_user(id, user_id).await?;
    Ok(Json(booking))
}

/// GET /bookings?state=&from=&size=
///
/// List the header user's own bookings, newest start first.
pub async fn list_bookings(
    SharerId(user_id): SharerId,
    State(state): State<AppState>,
    Query(params): Query<ListQuery>,
) -> AppResult<Json<Vec<Booking>>> {
    let (bucket, from, size) = params.resolve()?;
    let bookings = state
        .engine
        .list_by_state(bucket, user_id, from, size, Role::Booker)
        .await?;
    Ok(Json(bookings))
}

/// GET /bookings/owner?state=&from=&size=
///
/// List bookings on the header user's items, newest start first.
pub async fn list_owner_bookings(
    SharerId(user_id): SharerId,
    State(state): State<AppState>,
    Query(params): Query<ListQuery>,
) -> AppResult<Json<Vec<Booking>>> {
    let (bucket, from, size) = params.resolve()?;
    let bookings = state
        .engine
        .list_by_state(bucket, user_id, from, size, Role::Owner)
        .await?;
    Ok(Json(bookings))
}
