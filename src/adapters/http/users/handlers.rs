//! HTTP handlers for admin user endpoints.

use axum::extract::{Json, Path, State};
use axum::response::IntoResponse;

use crate::application::handlers::users::{DeleteUserCommand, UpdateUserCommand};
use crate::domain::foundation::{DomainError, UserId};

use super::super::auth::UserResponse;
use super::super::error::ApiError;
use super::super::middleware::RequireAdmin;
use super::super::state::AppState;
use super::dto::UpdateUserRequest;

/// GET /api/users - all accounts, newest first (admin)
pub async fn get_users(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
) -> Result<impl IntoResponse, ApiError> {
    let users = state.list_users_handler().handle().await?;
    let response: Vec<UserResponse> = users.iter().map(UserResponse::from).collect();
    Ok(Json(response))
}

/// PUT /api/users/:id - edit role and/or subscription (admin)
pub async fn update_user(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<String>,
    Json(body): Json<UpdateUserRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let user_id = parse_user_id(&id)?;
    let updated = state
        .update_user_handler()
        .handle(UpdateUserCommand {
            user_id,
            role: body.role,
            subscription: body.subscription.map(Into::into),
        })
        .await?;

    Ok(Json(UserResponse::from(&updated)))
}

/// DELETE /api/users/:id - remove an account and its data (admin)
pub async fn delete_user(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let user_id = parse_user_id(&id)?;
    state
        .delete_user_handler()
        .handle(DeleteUserCommand { user_id })
        .await?;

    Ok(Json(serde_json::json!({ "message": "User deleted" })))
}

fn parse_user_id(raw: &str) -> Result<UserId, ApiError> {
    UserId::parse(raw)
        .map_err(|_| ApiError(DomainError::validation("id", "Invalid user id")))
}
