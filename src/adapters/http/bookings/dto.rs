//! Request and response bodies for booking endpoints.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::application::handlers::booking::BookingView;
use crate::domain::booking::{BookingReference, BookingStatus, PaymentMethod, PaymentStatus};
use crate::domain::event::EventSummary;
use crate::domain::foundation::{BookingId, EventId, Timestamp, UserId, ValidationError};

// ════════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBookingRequest {
    /// Id of the event to book.
    #[serde(alias = "eventId")]
    pub event: Option<String>,
    pub ticket_count: Option<i64>,
    #[serde(default)]
    pub special_requests: Option<String>,
    #[serde(default)]
    pub payment_method: Option<PaymentMethod>,
}

impl CreateBookingRequest {
    /// Checks the fields serde cannot, reporting all of them at once.
    pub fn parse(&self) -> Result<(EventId, i64), Vec<ValidationError>> {
        let mut errors = Vec::new();

        let event = match self.event.as_deref().map(str::trim) {
            None | Some("") => {
                errors.push(ValidationError::empty_field("event"));
                None
            }
            Some(raw) => match raw.parse::<EventId>() {
                Ok(id) => Some(id),
                Err(_) => {
                    errors.push(ValidationError::invalid_format("event", "Invalid event id"));
                    None
                }
            },
        };
        if self.ticket_count.is_none() {
            errors.push(ValidationError::empty_field("ticketCount"));
        }

        match (event, self.ticket_count) {
            (Some(event), Some(count)) => Ok((event, count)),
            _ => Err(errors),
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingResponse {
    pub id: BookingId,
    pub event_id: EventId,
    /// Title, date, location and image of the booked event.
    pub event: Option<EventSummary>,
    pub user_id: UserId,
    pub ticket_count: i32,
    pub status: BookingStatus,
    pub total_price: Decimal,
    pub payment_status: PaymentStatus,
    pub payment_method: PaymentMethod,
    pub booking_reference: BookingReference,
    pub special_requests: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<BookingView> for BookingResponse {
    fn from(view: BookingView) -> Self {
        let BookingView { booking, event } = view;
        Self {
            id: booking.id,
            event_id: booking.event_id,
            event,
            user_id: booking.user_id,
            ticket_count: booking.ticket_count.value(),
            status: booking.status,
            total_price: booking.total_price,
            payment_status: booking.payment_status,
            payment_method: booking.payment_method,
            booking_reference: booking.booking_reference,
            special_requests: booking.special_requests,
            created_at: booking.created_at,
            updated_at: booking.updated_at,
        }
    }
}
