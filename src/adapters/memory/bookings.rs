use async_trait::async_trait;

use crate::domain::booking::Booking;
use crate::domain::foundation::{BookingId, DomainError, EventId, UserId};
use crate::ports::BookingRepository;

use super::InMemoryStore;

#[async_trait]
impl BookingRepository for InMemoryStore {
    async fn find_by_id(&self, id: &BookingId) -> Result<Option<Booking>, DomainError> {
        Ok(self.state.read().await.bookings.get(id).cloned())
    }

    async fn find_by_user(&self, user_id: &UserId) -> Result<Vec<Booking>, DomainError> {
        let state = self.state.read().await;
        let mut bookings: Vec<Booking> = state
            .bookings
            .values()
            .filter(|b| &b.user_id == user_id)
            .cloned()
            .collect();
        bookings.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(bookings)
    }

    async fn count_for_event(&self, event_id: &EventId) -> Result<u64, DomainError> {
        let state = self.state.read().await;
        Ok(state
            .bookings
            .values()
            .filter(|b| &b.event_id == event_id)
            .count() as u64)
    }

    async fn active_ticket_total(&self, event_id: &EventId) -> Result<i64, DomainError> {
        let state = self.state.read().await;
        Ok(state
            .bookings
            .values()
            .filter(|b| &b.event_id == event_id && b.is_active())
            .map(|b| b.ticket_count.value() as i64)
            .sum())
    }
}
