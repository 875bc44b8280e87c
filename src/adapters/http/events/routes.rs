//! Router for event, category and tag endpoints.

use axum::routing::{delete, get, put};
use axum::Router;

use crate::adapters::http::state::AppState;

use super::catalog::{
    create_category, create_tag, delete_category, delete_tag, list_categories, list_tags,
};
use super::handlers::{
    create_event, delete_event, events_by_organizer, featured_events, get_event,
    inventory_audit, list_events, update_event, upcoming_events,
};

/// Event routes, mounted at `/events`.
///
/// Static segments (`featured`, `categories`, ...) take priority over `:id`.
pub fn event_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_events).post(create_event))
        .route("/featured", get(featured_events))
        .route("/upcoming", get(upcoming_events))
        .route("/event/:id", get(get_event))
        .route("/organizer/:id", get(events_by_organizer))
        .route("/categories", get(list_categories).post(create_category))
        .route("/categories/:id", delete(delete_category))
        .route("/tags", get(list_tags).post(create_tag))
        .route("/tags/:id", delete(delete_tag))
        .route("/:id", put(update_event).delete(delete_event))
        .route("/:id/inventory", get(inventory_audit))
}
