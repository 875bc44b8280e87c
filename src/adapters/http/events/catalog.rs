//! HTTP handlers for categories and tags, served under `/events`.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;

use crate::adapters::http::extract::{ApiJson, ApiPath};
use crate::adapters::http::middleware::RequireAuth;
use crate::adapters::http::response::{ApiError, ApiResponse, Empty};
use crate::adapters::http::state::AppState;
use crate::application::handlers::catalog::{
    CreateCategoryCommand, CreateTagCommand, DeleteCategoryCommand, DeleteTagCommand,
};
use crate::domain::catalog::{Category, Tag};
use crate::domain::foundation::{CategoryId, TagId};

use super::dto::{CreateCategoryRequest, CreateTagRequest};

/// GET /events/categories
pub async fn list_categories(
    State(state): State<AppState>,
) -> Result<ApiResponse<Vec<Category>>, ApiError> {
    let categories = state.category_handler().list().await?;
    Ok(ApiResponse::list(categories))
}

/// POST /events/categories
pub async fn create_category(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    ApiJson(request): ApiJson<CreateCategoryRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let category = state
        .category_handler()
        .create(CreateCategoryCommand {
            actor: user,
            name: request.name,
        })
        .await?;
    Ok((StatusCode::CREATED, ApiResponse::ok(category)))
}

/// DELETE /events/categories/:id
pub async fn delete_category(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    ApiPath(category_id): ApiPath<CategoryId>,
) -> Result<ApiResponse<Empty>, ApiError> {
    state
        .category_handler()
        .delete(DeleteCategoryCommand {
            actor: user,
            category_id,
        })
        .await?;
    Ok(ApiResponse::ok(Empty {}).with_message("Category deleted"))
}

/// GET /events/tags
pub async fn list_tags(State(state): State<AppState>) -> Result<ApiResponse<Vec<Tag>>, ApiError> {
    let tags = state.tag_handler().list().await?;
    Ok(ApiResponse::list(tags))
}

/// POST /events/tags
pub async fn create_tag(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    ApiJson(request): ApiJson<CreateTagRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let tag = state
        .tag_handler()
        .create(CreateTagCommand {
            actor: user,
            name: request.name,
            color: request.color,
        })
        .await?;
    Ok((StatusCode::CREATED, ApiResponse::ok(tag)))
}

/// DELETE /events/tags/:id
pub async fn delete_tag(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    ApiPath(tag_id): ApiPath<TagId>,
) -> Result<ApiResponse<Empty>, ApiError> {
    state
        .tag_handler()
        .delete(DeleteTagCommand {
            actor: user,
            tag_id,
        })
        .await?;
    Ok(ApiResponse::ok(Empty {}).with_message("Tag deleted"))
}
