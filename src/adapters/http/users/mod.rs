//! HTTP adapter for administrator user management.
//!
//! - `GET /users` - All accounts
//! - `GET /users/:id`, `PUT /users/:id`, `DELETE /users/:id`

pub mod dto;
pub mod handlers;
pub mod routes;

pub use routes::user_routes;
