//! Acting-user extractor for Axum handlers.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use lendhub_core::types::DbId;

use crate::error::AppError;

/// The acting user, taken from the `X-Sharer-User-Id` header.
///
/// The platform trusts the fronting gateway to have authenticated the
/// caller; authentication itself is out of scope here. Use this as an
/// extractor parameter in any handler that needs to know who is acting:
///
/// ```ignore
/// async fn my_handler(SharerId(user_id): SharerId) -> AppResult<Json<()>> {
///     tracing::info!(user_id, "handling request");
///     Ok(Json(()))
/// }
/// ```
#[derive(Debug, Clone, Copy)]
pub struct SharerId(pub DbId);

/// Header carrying the acting user's id.
pub const SHARER_HEADER: &str = "x-sharer-user-id";

impl<S> FromRequestParts<S> for SharerId
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let raw = parts
            .headers
            .get(SHARER_HEADER)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| AppError::BadRequest("Missing X-Sharer-User-Id header".into()))?;

        let id = raw
            .trim()
            .parse::<DbId>()
            .map_err(|_| AppError::BadRequest("X-Sharer-User-Id must be an integer id".into()))?;

        Ok(SharerId(id))
    }
}
