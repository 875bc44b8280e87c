//! HTTP handlers for account endpoints.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;

use crate::adapters::http::extract::ApiJson;
use crate::adapters::http::middleware::RequireAuth;
use crate::adapters::http::response::{ApiError, ApiResponse, Empty};
use crate::adapters::http::state::AppState;
use crate::application::handlers::account::{
    LoginCommand, RegisterCommand, UpdateDetailsCommand, UpdatePasswordCommand,
};
use crate::domain::account::User;

use super::dto::{
    AuthResponse, LoginRequest, RegisterRequest, UpdateDetailsRequest, UpdatePasswordRequest,
};

/// POST /auth/register
pub async fn register(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<RegisterRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let session = state
        .register_handler()
        .handle(RegisterCommand {
            name: request.name,
            email: request.email,
            password: request.password,
            role: request.role,
            phone: request.phone,
        })
        .await?;
    Ok((StatusCode::CREATED, ApiResponse::ok(AuthResponse::from(session))))
}

/// POST /auth/login
pub async fn login(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<LoginRequest>,
) -> Result<ApiResponse<AuthResponse>, ApiError> {
    let session = state
        .login_handler()
        .handle(LoginCommand {
            email: request.email,
            password: request.password,
        })
        .await?;
    Ok(ApiResponse::ok(session.into()))
}

/// GET /auth/me
pub async fn me(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
) -> Result<ApiResponse<User>, ApiError> {
    let account = state.profile_handler().me(&user).await?;
    Ok(ApiResponse::ok(account))
}

/// PUT /auth/updatedetails
pub async fn update_details(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    ApiJson(request): ApiJson<UpdateDetailsRequest>,
) -> Result<ApiResponse<User>, ApiError> {
    let account = state
        .profile_handler()
        .update_details(UpdateDetailsCommand {
            actor: user,
            update: request.into(),
        })
        .await?;
    Ok(ApiResponse::ok(account))
}

/// PUT /auth/updatepassword
pub async fn update_password(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    ApiJson(request): ApiJson<UpdatePasswordRequest>,
) -> Result<ApiResponse<AuthResponse>, ApiError> {
    let session = state
        .profile_handler()
        .update_password(UpdatePasswordCommand {
            actor: user,
            current_password: request.current_password,
            new_password: request.new_password,
        })
        .await?;
    Ok(ApiResponse::ok(session.into()))
}

/// GET /auth/logout
///
/// Tokens are not tracked server-side; the client drops its copy.
pub async fn logout(RequireAuth(user): RequireAuth) -> ApiResponse<Empty> {
    tracing::info!(user_id = %user.id, "user logged out");
    ApiResponse::ok(Empty {}).with_message("Logged out")
}
