//! HTTP adapter for booking endpoints.
//!
//! - `POST /bookings` - Book tickets for an event
//! - `GET /bookings` - Caller's bookings
//! - `GET /bookings/:id` - One booking (owner or admin)
//! - `PUT /bookings/:id/cancel` - Cancel and release tickets (owner or admin)

pub mod dto;
pub mod handlers;
pub mod routes;

pub use routes::booking_routes;
