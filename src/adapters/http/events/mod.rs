//! HTTP adapter for event, category and tag endpoints.
//!
//! Public:
//! - `GET /events` - Filtered, sorted, paginated listing
//! - `GET /events/event/:id`, `/events/organizer/:id`, `/events/featured`, `/events/upcoming`
//! - `GET /events/categories`, `GET /events/tags`
//!
//! Authenticated:
//! - `POST /events`, `PUT /events/:id`, `DELETE /events/:id`
//! - `GET /events/:id/inventory` - Inventory audit
//! - `POST|DELETE /events/categories[/:id]`, `POST|DELETE /events/tags[/:id]`

pub mod catalog;
pub mod dto;
pub mod handlers;
pub mod routes;

pub use routes::event_routes;
