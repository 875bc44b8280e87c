//! CreateBookingHandler - reserve tickets and record the booking.

use std::sync::Arc;

use crate::domain::access::Capability;
use crate::domain::booking::{Booking, BookingError, BookingQuote, PaymentMethod, TicketCount};
use crate::domain::foundation::{AuthenticatedUser, EventId};
use crate::ports::{EventRepository, InventoryError, TicketInventory};

use super::{inventory_error, BookingView};

/// Attempts at drawing an unused booking reference before giving up.
const REFERENCE_ATTEMPTS: usize = 5;

#[derive(Debug, Clone)]
pub struct CreateBookingCommand {
    pub actor: AuthenticatedUser,
    pub event_id: EventId,
    pub ticket_count: i64,
    pub special_requests: Option<String>,
    pub payment_method: Option<PaymentMethod>,
}

pub struct CreateBookingHandler {
    events: Arc<dyn EventRepository>,
    inventory: Arc<dyn TicketInventory>,
}

impl CreateBookingHandler {
    pub fn new(events: Arc<dyn EventRepository>, inventory: Arc<dyn TicketInventory>) -> Self {
        Self { events, inventory }
    }

    pub async fn handle(&self, cmd: CreateBookingCommand) -> Result<BookingView, BookingError> {
        if !cmd.actor.capabilities().allows(Capability::CreateBooking) {
            return Err(BookingError::forbidden(cmd.actor.id, "create"));
        }

        let ticket_count = TicketCount::new(cmd.ticket_count)?;

        // Price comes from the event; availability is decided by the
        // inventory port below, not by this read.
        let event = self
            .events
            .find_by_id(&cmd.event_id)
            .await?
            .ok_or(BookingError::event_not_found(cmd.event_id))?;

        let quote = BookingQuote::compute(event.price, ticket_count, cmd.payment_method)?;
        let mut booking = Booking::confirmed(
            event.id,
            cmd.actor.id,
            ticket_count,
            quote,
            cmd.special_requests,
        );

        let mut attempt = 1;
        let event = loop {
            match self.inventory.reserve_and_record(&booking).await {
                Ok(event) => break event,
                Err(InventoryError::DuplicateReference(taken)) if attempt < REFERENCE_ATTEMPTS => {
                    tracing::warn!(reference = %taken, attempt, "booking reference clash, retrying");
                    booking.reissue_reference();
                    attempt += 1;
                }
                Err(e) => return Err(inventory_error(e)),
            }
        };

        tracing::info!(
            booking_id = %booking.id,
            event_id = %event.id,
            user_id = %booking.user_id,
            tickets = ticket_count.value(),
            remaining = event.available_tickets,
            reference = %booking.booking_reference,
            "booking created"
        );

        Ok(BookingView {
            booking,
            event: Some(event.summary()),
        })
    }
}
