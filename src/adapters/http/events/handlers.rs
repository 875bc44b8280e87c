//! HTTP handlers for event endpoints.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;

use crate::adapters::http::extract::{ApiJson, ApiPath, ApiQuery};
use crate::adapters::http::middleware::RequireAuth;
use crate::adapters::http::response::{ApiError, ApiResponse, Empty};
use crate::adapters::http::state::AppState;
use crate::application::handlers::event::{
    CreateEventCommand, DeleteEventCommand, InventoryAuditQuery, UpdateEventCommand,
};
use crate::domain::event::{Event, InventoryAudit};
use crate::domain::foundation::{EventId, UserId};

use super::dto::{CreateEventRequest, ListEventsParams, PageParams, UpdateEventRequest};

// ════════════════════════════════════════════════════════════════════════════════
// Query Handlers (public)
// ════════════════════════════════════════════════════════════════════════════════

/// GET /events
pub async fn list_events(
    State(state): State<AppState>,
    ApiQuery(params): ApiQuery<ListEventsParams>,
) -> Result<ApiResponse<Vec<Event>>, ApiError> {
    let query = params.into_query().map_err(|e| ApiError::validation(&e))?;
    let page = state.event_query_handler().list(query).await?;
    Ok(ApiResponse::page(page))
}

/// GET /events/event/:id
pub async fn get_event(
    State(state): State<AppState>,
    ApiPath(event_id): ApiPath<EventId>,
) -> Result<ApiResponse<Event>, ApiError> {
    let event = state.event_query_handler().get(event_id).await?;
    Ok(ApiResponse::ok(event))
}

/// GET /events/organizer/:id
pub async fn events_by_organizer(
    State(state): State<AppState>,
    ApiPath(organizer_id): ApiPath<UserId>,
    ApiQuery(params): ApiQuery<PageParams>,
) -> Result<ApiResponse<Vec<Event>>, ApiError> {
    let page = params.into_request()?;
    let events = state
        .event_query_handler()
        .by_organizer(organizer_id, page)
        .await?;
    Ok(ApiResponse::page(events))
}

/// GET /events/featured
pub async fn featured_events(
    State(state): State<AppState>,
) -> Result<ApiResponse<Vec<Event>>, ApiError> {
    let events = state.event_query_handler().featured().await?;
    Ok(ApiResponse::list(events))
}

/// GET /events/upcoming
pub async fn upcoming_events(
    State(state): State<AppState>,
) -> Result<ApiResponse<Vec<Event>>, ApiError> {
    let events = state.event_query_handler().upcoming().await?;
    Ok(ApiResponse::list(events))
}

// ════════════════════════════════════════════════════════════════════════════════
// Command Handlers (authenticated)
// ════════════════════════════════════════════════════════════════════════════════

/// POST /events
pub async fn create_event(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    ApiJson(request): ApiJson<CreateEventRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let input = request.into_input().map_err(|e| ApiError::validation(&e))?;
    let event = state
        .create_event_handler()
        .handle(CreateEventCommand { actor: user, input })
        .await?;
    Ok((StatusCode::CREATED, ApiResponse::ok(event)))
}

/// PUT /events/:id
pub async fn update_event(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    ApiPath(event_id): ApiPath<EventId>,
    ApiJson(request): ApiJson<UpdateEventRequest>,
) -> Result<ApiResponse<Event>, ApiError> {
    let update = request.into_update().map_err(|e| ApiError::validation(&e))?;
    let event = state
        .update_event_handler()
        .handle(UpdateEventCommand {
            actor: user,
            event_id,
            update,
        })
        .await?;
    Ok(ApiResponse::ok(event))
}

/// DELETE /events/:id
pub async fn delete_event(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    ApiPath(event_id): ApiPath<EventId>,
) -> Result<ApiResponse<Empty>, ApiError> {
    state
        .delete_event_handler()
        .handle(DeleteEventCommand {
            actor: user,
            event_id,
        })
        .await?;
    Ok(ApiResponse::ok(Empty {}).with_message("Event deleted"))
}

/// GET /events/:id/inventory
pub async fn inventory_audit(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    ApiPath(event_id): ApiPath<EventId>,
) -> Result<ApiResponse<InventoryAudit>, ApiError> {
    let audit = state
        .inventory_audit_handler()
        .handle(InventoryAuditQuery {
            actor: user,
            event_id,
        })
        .await?;
    Ok(ApiResponse::ok(audit))
}
