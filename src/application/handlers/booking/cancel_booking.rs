//! CancelBookingHandler - cancel a booking and return its tickets.

use std::sync::Arc;

use crate::domain::access::Capability;
use crate::domain::booking::BookingError;
use crate::domain::foundation::{authorize_owner_or, AuthenticatedUser, BookingId};
use crate::ports::{BookingRepository, TicketInventory};

use super::{inventory_error, BookingView};

#[derive(Debug, Clone)]
pub struct CancelBookingCommand {
    pub actor: AuthenticatedUser,
    pub booking_id: BookingId,
}

pub struct CancelBookingHandler {
    bookings: Arc<dyn BookingRepository>,
    inventory: Arc<dyn TicketInventory>,
}

impl CancelBookingHandler {
    pub fn new(bookings: Arc<dyn BookingRepository>, inventory: Arc<dyn TicketInventory>) -> Self {
        Self {
            bookings,
            inventory,
        }
    }

    pub async fn handle(&self, cmd: CancelBookingCommand) -> Result<BookingView, BookingError> {
        let mut booking = self
            .bookings
            .find_by_id(&cmd.booking_id)
            .await?
            .ok_or(BookingError::not_found(cmd.booking_id))?;

        let access = authorize_owner_or(&booking, &cmd.actor, Capability::CancelAnyBooking);
        access.log("cancel");
        if !access.is_granted() {
            return Err(BookingError::forbidden(cmd.actor.id, "cancel"));
        }

        booking.cancel()?;

        // The adapter re-checks the stored status, so a concurrent cancel
        // still surfaces as AlreadyCancelled and releases nothing.
        let event = self
            .inventory
            .release_and_cancel(&booking)
            .await
            .map_err(inventory_error)?;

        tracing::info!(
            booking_id = %booking.id,
            event_id = %event.id,
            cancelled_by = %cmd.actor.id,
            tickets = booking.ticket_count.value(),
            available = event.available_tickets,
            "booking cancelled"
        );

        Ok(BookingView {
            booking,
            event: Some(event.summary()),
        })
    }
}
