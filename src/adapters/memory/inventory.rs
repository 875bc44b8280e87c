use async_trait::async_trait;

use crate::domain::booking::{Booking, BookingStatus};
use crate::domain::event::{self, Event};
use crate::domain::foundation::{EventId, Timestamp};
use crate::ports::{InventoryError, TicketInventory};

use super::store::State;
use super::InMemoryStore;

fn reserve_locked(
    state: &mut State,
    event_id: &EventId,
    ticket_count: i32,
) -> Result<Event, InventoryError> {
    let stored = state
        .events
        .get_mut(event_id)
        .ok_or(InventoryError::EventNotFound(*event_id))?;
    let remaining = event::try_reserve(stored.available_tickets, ticket_count).map_err(|s| {
        InventoryError::Insufficient {
            requested: s.requested,
            available: s.available,
        }
    })?;
    stored.available_tickets = remaining;
    stored.updated_at = Timestamp::now();
    Ok(stored.clone())
}

fn release_locked(
    state: &mut State,
    event_id: &EventId,
    ticket_count: i32,
) -> Result<Event, InventoryError> {
    let stored = state
        .events
        .get_mut(event_id)
        .ok_or(InventoryError::EventNotFound(*event_id))?;
    stored.available_tickets =
        event::release(stored.available_tickets, stored.capacity, ticket_count);
    stored.updated_at = Timestamp::now();
    Ok(stored.clone())
}

#[async_trait]
impl TicketInventory for InMemoryStore {
    async fn reserve(&self, event_id: &EventId, ticket_count: i32) -> Result<Event, InventoryError> {
        let mut state = self.state.write().await;
        reserve_locked(&mut state, event_id, ticket_count)
    }

    async fn release(&self, event_id: &EventId, ticket_count: i32) -> Result<Event, InventoryError> {
        let mut state = self.state.write().await;
        release_locked(&mut state, event_id, ticket_count)
    }

    async fn reserve_and_record(&self, booking: &Booking) -> Result<Event, InventoryError> {
        let mut state = self.state.write().await;
        if state.bookings.contains_key(&booking.id) {
            return Err(InventoryError::Store(format!(
                "Booking {} already recorded",
                booking.id
            )));
        }
        if state
            .bookings
            .values()
            .any(|b| b.booking_reference == booking.booking_reference)
        {
            return Err(InventoryError::DuplicateReference(
                booking.booking_reference.to_string(),
            ));
        }
        let event = reserve_locked(&mut state, &booking.event_id, booking.ticket_count.value())?;
        state.bookings.insert(booking.id, booking.clone());
        Ok(event)
    }

    async fn release_and_cancel(&self, booking: &Booking) -> Result<Event, InventoryError> {
        let mut state = self.state.write().await;
        let stored = state
            .bookings
            .get(&booking.id)
            .ok_or(InventoryError::BookingNotFound(booking.id))?;
        if !stored.is_active() {
            return Err(InventoryError::AlreadyReleased(booking.id));
        }
        let (event_id, ticket_count) = (stored.event_id, stored.ticket_count.value());
        if !state.events.contains_key(&event_id) {
            return Err(InventoryError::EventNotFound(event_id));
        }

        if let Some(stored) = state.bookings.get_mut(&booking.id) {
            stored.status = BookingStatus::Cancelled;
            stored.updated_at = booking.updated_at;
        }
        release_locked(&mut state, &event_id, ticket_count)
    }
}
