//! Router for booking endpoints.

use axum::routing::{get, put};
use axum::Router;

use crate::adapters::http::state::AppState;

use super::handlers::{cancel_booking, create_booking, get_booking, list_bookings};

/// Booking routes, mounted at `/bookings`. All require authentication.
pub fn booking_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_bookings).post(create_booking))
        .route("/:id", get(get_booking))
        .route("/:id/cancel", put(cancel_booking))
}
