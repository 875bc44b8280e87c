//! InventoryAuditHandler - compare an event's counter with its bookings.

use std::sync::Arc;

use crate::domain::access::Capability;
use crate::domain::event::{EventError, InventoryAudit};
use crate::domain::foundation::{AuthenticatedUser, EventId};
use crate::ports::{BookingRepository, EventRepository};

use super::authorize;

#[derive(Debug, Clone)]
pub struct InventoryAuditQuery {
    pub actor: AuthenticatedUser,
    pub event_id: EventId,
}

pub struct InventoryAuditHandler {
    events: Arc<dyn EventRepository>,
    bookings: Arc<dyn BookingRepository>,
}

impl InventoryAuditHandler {
    pub fn new(events: Arc<dyn EventRepository>, bookings: Arc<dyn BookingRepository>) -> Self {
        Self { events, bookings }
    }

    pub async fn handle(&self, query: InventoryAuditQuery) -> Result<InventoryAudit, EventError> {
        let event = self
            .events
            .find_by_id(&query.event_id)
            .await?
            .ok_or(EventError::not_found(query.event_id))?;

        // Whoever may edit any event may audit any event.
        authorize(
            &event,
            &query.actor,
            Capability::AuditInventory,
            Capability::UpdateAnyEvent,
            "audit",
        )?;

        let booked = self.bookings.active_ticket_total(&event.id).await?;
        let audit = InventoryAudit::new(event.id, event.capacity, event.available_tickets, booked);

        if !audit.consistent {
            tracing::warn!(
                event_id = %event.id,
                capacity = audit.capacity,
                available = audit.available_tickets,
                booked = audit.booked_tickets,
                "inventory drift detected"
            );
        }
        Ok(audit)
    }
}
