//! DeleteEventHandler - remove a listing that nobody has booked.

use std::sync::Arc;

use crate::domain::access::Capability;
use crate::domain::event::EventError;
use crate::domain::foundation::{AuthenticatedUser, ErrorCode, EventId};
use crate::ports::{BookingRepository, EventRepository};

use super::authorize;

#[derive(Debug, Clone)]
pub struct DeleteEventCommand {
    pub actor: AuthenticatedUser,
    pub event_id: EventId,
}

pub struct DeleteEventHandler {
    events: Arc<dyn EventRepository>,
    bookings: Arc<dyn BookingRepository>,
}

impl DeleteEventHandler {
    pub fn new(events: Arc<dyn EventRepository>, bookings: Arc<dyn BookingRepository>) -> Self {
        Self { events, bookings }
    }

    pub async fn handle(&self, cmd: DeleteEventCommand) -> Result<(), EventError> {
        let event = self
            .events
            .find_by_id(&cmd.event_id)
            .await?
            .ok_or(EventError::not_found(cmd.event_id))?;

        authorize(
            &event,
            &cmd.actor,
            Capability::DeleteOwnEvent,
            Capability::DeleteAnyEvent,
            "delete",
        )?;

        // Cancelled bookings are kept, so they block deletion too.
        if self.bookings.count_for_event(&event.id).await? > 0 {
            return Err(EventError::HasBookings(event.id));
        }

        // The store re-checks atomically in case a booking landed since.
        self.events.delete(&event.id).await.map_err(|e| match e.code {
            ErrorCode::EventHasBookings => EventError::HasBookings(event.id),
            _ => EventError::from(e),
        })?;
        tracing::info!(event_id = %event.id, deleted_by = %cmd.actor.id, "event deleted");
        Ok(())
    }
}
