//! HTTP adapter - the REST API under `/api/v1`.
//!
//! One module per resource (`auth`, `bookings`, `events`, `users`), each with
//! its own dto/handlers/routes split, sharing [`AppState`] and the JSON
//! envelope from [`response`].

pub mod auth;
pub mod bookings;
pub mod events;
pub mod extract;
pub mod middleware;
pub mod response;
pub mod router;
pub mod state;
pub mod users;

pub use response::{ApiError, ApiResponse};
pub use router::{api_router, build_router, API_PREFIX};
pub use state::AppState;
