//! Booking repository port (read side plus lookups).
//!
//! Inserts and status changes go through `TicketInventory` so they commit
//! together with the inventory mutation.

use async_trait::async_trait;

use crate::domain::booking::Booking;
use crate::domain::foundation::{BookingId, DomainError, EventId, UserId};

#[async_trait]
pub trait BookingRepository: Send + Sync {
    async fn find_by_id(&self, id: &BookingId) -> Result<Option<Booking>, DomainError>;

    /// All bookings of a user, newest first.
    async fn find_by_user(&self, user_id: &UserId) -> Result<Vec<Booking>, DomainError>;

    /// Number of bookings in any status that reference the event.
    async fn count_for_event(&self, event_id: &EventId) -> Result<u64, DomainError>;

    /// Sum of `ticket_count` over the event's active bookings.
    async fn active_ticket_total(&self, event_id: &EventId) -> Result<i64, DomainError>;
}
