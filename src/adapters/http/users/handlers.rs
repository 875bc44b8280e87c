//! HTTP handlers for user management. Every route needs `manage_users`.

use axum::extract::State;

use crate::adapters::http::extract::{ApiJson, ApiPath};
use crate::adapters::http::middleware::RequireAuth;
use crate::adapters::http::response::{ApiError, ApiResponse, Empty};
use crate::adapters::http::state::AppState;
use crate::application::handlers::account::UpdateUserCommand;
use crate::domain::account::User;
use crate::domain::foundation::UserId;

use super::dto::UpdateUserRequest;

/// GET /users
pub async fn list_users(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
) -> Result<ApiResponse<Vec<User>>, ApiError> {
    let users = state.user_admin_handler().list(&user).await?;
    Ok(ApiResponse::list(users))
}

/// GET /users/:id
pub async fn get_user(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    ApiPath(user_id): ApiPath<UserId>,
) -> Result<ApiResponse<User>, ApiError> {
    let account = state.user_admin_handler().get(&user, user_id).await?;
    Ok(ApiResponse::ok(account))
}

/// PUT /users/:id
pub async fn update_user(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    ApiPath(user_id): ApiPath<UserId>,
    ApiJson(request): ApiJson<UpdateUserRequest>,
) -> Result<ApiResponse<User>, ApiError> {
    let account = state
        .user_admin_handler()
        .update(UpdateUserCommand {
            actor: user,
            user_id,
            update: request.into(),
        })
        .await?;
    Ok(ApiResponse::ok(account))
}

/// DELETE /users/:id
pub async fn delete_user(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    ApiPath(user_id): ApiPath<UserId>,
) -> Result<ApiResponse<Empty>, ApiError> {
    state.user_admin_handler().delete(&user, user_id).await?;
    Ok(ApiResponse::ok(Empty {}).with_message("User deleted"))
}
