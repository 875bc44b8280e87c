//! HTTP handlers for booking endpoints.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;

use crate::adapters::http::extract::{ApiJson, ApiPath};
use crate::adapters::http::middleware::RequireAuth;
use crate::adapters::http::response::{ApiError, ApiResponse};
use crate::adapters::http::state::AppState;
use crate::application::handlers::booking::{
    CancelBookingCommand, CreateBookingCommand, GetBookingQuery, ListBookingsQuery,
};
use crate::domain::foundation::BookingId;

use super::dto::{BookingResponse, CreateBookingRequest};

/// POST /bookings
pub async fn create_booking(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    ApiJson(request): ApiJson<CreateBookingRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let (event_id, ticket_count) = request.parse().map_err(|e| ApiError::validation(&e))?;
    let cmd = CreateBookingCommand {
        actor: user,
        event_id,
        ticket_count,
        special_requests: request.special_requests,
        payment_method: request.payment_method,
    };

    let view = state.create_booking_handler().handle(cmd).await?;
    Ok((
        StatusCode::CREATED,
        ApiResponse::ok(BookingResponse::from(view)),
    ))
}

/// GET /bookings
pub async fn list_bookings(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
) -> Result<ApiResponse<Vec<BookingResponse>>, ApiError> {
    let views = state
        .list_bookings_handler()
        .handle(ListBookingsQuery { actor: user })
        .await?;
    Ok(ApiResponse::list(views))
}

/// GET /bookings/:id
pub async fn get_booking(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    ApiPath(booking_id): ApiPath<BookingId>,
) -> Result<ApiResponse<BookingResponse>, ApiError> {
    let view = state
        .get_booking_handler()
        .handle(GetBookingQuery {
            actor: user,
            booking_id,
        })
        .await?;
    Ok(ApiResponse::ok(view.into()))
}

/// PUT /bookings/:id/cancel
pub async fn cancel_booking(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    ApiPath(booking_id): ApiPath<BookingId>,
) -> Result<ApiResponse<BookingResponse>, ApiError> {
    let view = state
        .cancel_booking_handler()
        .handle(CancelBookingCommand {
            actor: user,
            booking_id,
        })
        .await?;
    Ok(ApiResponse::ok(BookingResponse::from(view)).with_message("Booking cancelled"))
}
