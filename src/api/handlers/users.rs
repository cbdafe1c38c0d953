//! Handlers for the user account endpoints.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use serde_json::json;
use validator::Validate;

use crate::api::dto::pagination::{PageInfo, PaginationParams};
use crate::api::dto::user::{
    CreateUserRequest, UpdateUserRequest, UserListResponse, UserResponse,
};
use crate::api::extract::Json;
use crate::error::AppError;
use crate::state::AppState;

/// Registers a user.
///
/// # Endpoint
///
/// `POST /api/users`
///
/// # Errors
///
/// 400 on validation failure, 409 when the email is already registered.
pub async fn create_user_handler(
    State(state): State<AppState>,
    Json(payload): Json<CreateUserRequest>,
) -> Result<(StatusCode, axum::Json<UserResponse>), AppError> {
    payload.validate()?;

    let user = state
        .user_service
        .register_user(payload.into_new_user())
        .await?;

    Ok((StatusCode::CREATED, axum::Json(user.into())))
}

/// Lists user accounts.
///
/// # Endpoint
///
/// `GET /api/users?page=1&page_size=20`
pub async fn list_users_handler(
    State(state): State<AppState>,
    Query(params): Query<PaginationParams>,
) -> Result<axum::Json<UserListResponse>, AppError> {
    let page = params
        .validate_and_resolve()
        .map_err(|e| AppError::bad_request(e, json!({})))?;

    let (users, total) = state.user_service.list_users(page.offset, page.limit).await?;

    Ok(axum::Json(UserListResponse {
        items: users.into_iter().map(Into::into).collect(),
        pagination: PageInfo {
            page: page.page,
            page_size: page.page_size,
            total,
        },
    }))
}

/// Fetches one user.
///
/// # Endpoint
///
/// `GET /api/users/{id}`
pub async fn get_user_handler(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<axum::Json<UserResponse>, AppError> {
    let user = state.user_service.get_user(id).await?;
    Ok(axum::Json(user.into()))
}

/// Partially updates a user.
///
/// # Endpoint
///
/// `PATCH /api/users/{id}`
pub async fn update_user_handler(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateUserRequest>,
) -> Result<axum::Json<UserResponse>, AppError> {
    payload.validate()?;

    let user = state
        .user_service
        .update_user(id, payload.into_patch())
        .await?;

    Ok(axum::Json(user.into()))
}

/// Deletes a user account.
///
/// # Endpoint
///
/// `DELETE /api/users/{id}`
pub async fn delete_user_handler(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    state.user_service.delete_user(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
