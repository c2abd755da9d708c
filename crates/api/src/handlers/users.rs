//! Handlers for the `/users` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

use lendhub_core::error::CoreError;
use lendhub_core::types::DbId;
use lendhub_core::user::{NewUser, User, UserPatch};

use crate::error::{validate, AppResult};
use crate::state::AppState;

/// POST /users
///
/// Register a new user. Duplicate email yields 409.
pub async fn create_user(
    State(state): State<AppState>,
    Json(body): Json<NewUser>,
) -> AppResult<impl IntoResponse> {
    validate(&body)?;
    let user = state.users.create(body).await?;
    tracing::info!(user_id = user.id, "user created");
    Ok((StatusCode::CREATED, Json(user)))
}

/// GET /users
///
/// List all users.
pub async fn list_users(State(state): State<AppState>) -> AppResult<Json<Vec<User>>> {
    Ok(Json(state.users.list().await?))
}

/// GET /users/{id}
pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<User>> {
    let user = state
        .users
        .find_by_id(id)
        .await?
        .ok_or(CoreError::NotFound { entity: "User", id })?;
    Ok(Json(user))
}

/// PATCH /users/{id}
///
/// Partially update a user. Absent fields are left untouched.
pub async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(patch): Json<UserPatch>,
) -> AppResult<Json<User>> {
    validate(&patch)?;
    let user = state
        .users
        .update(id, patch)
        .await?
        .ok_or(CoreError::NotFound { entity: "User", id })?;
    Ok(Json(user))
}

/// DELETE /users/{id}
pub async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let deleted = state.users.delete(id).await?;
    if !deleted {
        return Err(CoreError::NotFound { entity: "User", id }.into());
    }
    Ok(StatusCode::NO_CONTENT)
}
