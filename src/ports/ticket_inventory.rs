//! Ticket inventory port.
//!
//! The only writer of `Event.available_tickets`. Every operation is a
//! single atomic check-and-mutate; implementations must never read the
//! counter and write it back in two steps.
//!
//! ```ignore
//! // Booking create: reservation and insert commit together.
//! inventory.reserve_and_record(&booking).await?;
//!
//! // Booking cancel: guarded status flip and release commit together.
//! inventory.release_and_cancel(&booking).await?;
//! ```

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::booking::Booking;
use crate::domain::event::Event;
use crate::domain::foundation::{BookingId, DomainError, ErrorCode, EventId};

/// Inventory operation failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InventoryError {
    #[error("Event {0} not found")]
    EventNotFound(EventId),

    #[error("Requested {requested} tickets but only {available} available")]
    Insufficient { requested: i32, available: i32 },

    /// The booking was already cancelled; nothing was released.
    #[error("Booking {0} is already cancelled")]
    AlreadyReleased(BookingId),

    #[error("Booking {0} not found")]
    BookingNotFound(BookingId),

    /// Another booking already holds this reference; nothing was reserved.
    #[error("Booking reference {0} is already taken")]
    DuplicateReference(String),

    #[error("Inventory store error: {0}")]
    Store(String),
}

impl From<DomainError> for InventoryError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::DuplicateReference => InventoryError::DuplicateReference(
                err.detail("reference").unwrap_or_default().to_string(),
            ),
            _ => InventoryError::Store(err.to_string()),
        }
    }
}

#[async_trait]
pub trait TicketInventory: Send + Sync {
    /// Atomically takes `ticket_count` tickets from the event.
    ///
    /// # Errors
    ///
    /// - `EventNotFound` if the event doesn't exist
    /// - `Insufficient` if fewer than `ticket_count` remain; nothing changes
    async fn reserve(&self, event_id: &EventId, ticket_count: i32) -> Result<Event, InventoryError>;

    /// Atomically gives `ticket_count` tickets back, clamped to capacity.
    ///
    /// Callers guarantee at most one release per booking allocation.
    async fn release(&self, event_id: &EventId, ticket_count: i32) -> Result<Event, InventoryError>;

    /// Reserves the booking's tickets and inserts the booking in one unit.
    ///
    /// Either both happen or neither does. A clash on `booking_reference`
    /// fails with `DuplicateReference` and leaves the stock untouched.
    async fn reserve_and_record(&self, booking: &Booking) -> Result<Event, InventoryError>;

    /// Flips the stored booking to cancelled and releases its tickets in one
    /// unit. The flip is guarded on the stored status, so a concurrent second
    /// cancel gets `AlreadyReleased` and releases nothing.
    async fn release_and_cancel(&self, booking: &Booking) -> Result<Event, InventoryError>;
}
