//! Booking queries: one booking, or all of the caller's bookings.

use std::collections::HashMap;
use std::sync::Arc;

use crate::domain::access::Capability;
use crate::domain::booking::BookingError;
use crate::domain::foundation::{authorize_owner_or, AuthenticatedUser, BookingId};
use crate::ports::{BookingRepository, EventRepository};

use super::BookingView;

#[derive(Debug, Clone)]
pub struct GetBookingQuery {
    pub actor: AuthenticatedUser,
    pub booking_id: BookingId,
}

pub struct GetBookingHandler {
    bookings: Arc<dyn BookingRepository>,
    events: Arc<dyn EventRepository>,
}

impl GetBookingHandler {
    pub fn new(bookings: Arc<dyn BookingRepository>, events: Arc<dyn EventRepository>) -> Self {
        Self { bookings, events }
    }

    pub async fn handle(&self, query: GetBookingQuery) -> Result<BookingView, BookingError> {
        let booking = self
            .bookings
            .find_by_id(&query.booking_id)
            .await?
            .ok_or(BookingError::not_found(query.booking_id))?;

        let access = authorize_owner_or(&booking, &query.actor, Capability::ViewAnyBooking);
        access.log("view");
        if !access.is_granted() {
            return Err(BookingError::forbidden(query.actor.id, "access"));
        }

        let event = self.events.find_by_id(&booking.event_id).await?;
        Ok(BookingView {
            booking,
            event: event.map(|e| e.summary()),
        })
    }
}

#[derive(Debug, Clone)]
pub struct ListBookingsQuery {
    pub actor: AuthenticatedUser,
}

/// Lists the caller's own bookings, newest first, cancelled ones included.
pub struct ListBookingsHandler {
    bookings: Arc<dyn BookingRepository>,
    events: Arc<dyn EventRepository>,
}

impl ListBookingsHandler {
    pub fn new(bookings: Arc<dyn BookingRepository>, events: Arc<dyn EventRepository>) -> Self {
        Self { bookings, events }
    }

    pub async fn handle(&self, query: ListBookingsQuery) -> Result<Vec<BookingView>, BookingError> {
        let bookings = self.bookings.find_by_user(&query.actor.id).await?;

        let mut event_ids: Vec<_> = bookings.iter().map(|b| b.event_id).collect();
        event_ids.sort();
        event_ids.dedup();
        let summaries: HashMap<_, _> = self
            .events
            .find_many(&event_ids)
            .await?
            .into_iter()
            .map(|e| (e.id, e.summary()))
            .collect();

        Ok(bookings
            .into_iter()
            .map(|booking| BookingView {
                event: summaries.get(&booking.event_id).cloned(),
                booking,
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryStore;
    use crate::application::handlers::booking::test_support::{actor, seed_event};
    use crate::application::handlers::booking::{CreateBookingCommand, CreateBookingHandler};
    use crate::domain::access::Role;
    use crate::domain::foundation::EventId;

    async fn book(store: &InMemoryStore, owner: &AuthenticatedUser, event_id: EventId) -> BookingId {
        CreateBookingHandler::new(Arc::new(store.clone()), Arc::new(store.clone()))
            .handle(CreateBookingCommand {
                actor: owner.clone(),
                event_id,
                ticket_count: 1,
                special_requests: Some("  aisle seat ".into()),
                payment_method: None,
            })
            .await
            .unwrap()
            .booking
            .id
    }

    fn get_handler(store: &InMemoryStore) -> GetBookingHandler {
        GetBookingHandler::new(Arc::new(store.clone()), Arc::new(store.clone()))
    }

    #[tokio::test]
    async fn owner_sees_booking_with_event_summary() {
        let store = InMemoryStore::new();
        let event = seed_event(&store, 10, 5).await;
        let owner = actor(Role::User);
        let booking_id = book(&store, &owner, event.id).await;

        let view = get_handler(&store)
            .handle(GetBookingQuery {
                actor: owner,
                booking_id,
            })
            .await
            .unwrap();

        assert_eq!(view.booking.special_requests.as_deref(), Some("aisle seat"));
        assert_eq!(view.event.unwrap().id, event.id);
    }

    #[tokio::test]
    async fn other_users_are_forbidden_but_admin_is_not() {
        let store = InMemoryStore::new();
        let event = seed_event(&store, 10, 5).await;
        let booking_id = book(&store, &actor(Role::User), event.id).await;

        let stranger = actor(Role::Organizer);
        let err = get_handler(&store)
            .handle(GetBookingQuery {
                actor: stranger.clone(),
                booking_id,
            })
            .await
            .unwrap_err();
        assert_eq!(err, BookingError::forbidden(stranger.id, "access"));

        assert!(get_handler(&store)
            .handle(GetBookingQuery {
                actor: actor(Role::Admin),
                booking_id,
            })
            .await
            .is_ok());
    }

    #[tokio::test]
    async fn list_returns_only_callers_bookings() {
        let store = InMemoryStore::new();
        let first = seed_event(&store, 10, 5).await;
        let second = seed_event(&store, 10, 0).await;
        let me = actor(Role::User);
        book(&store, &me, first.id).await;
        book(&store, &me, second.id).await;
        book(&store, &actor(Role::User), first.id).await;

        let views = ListBookingsHandler::new(Arc::new(store.clone()), Arc::new(store.clone()))
            .handle(ListBookingsQuery { actor: me.clone() })
            .await
            .unwrap();

        assert_eq!(views.len(), 2);
        assert!(views.iter().all(|v| v.booking.user_id == me.id));
        assert!(views.iter().all(|v| v.event.is_some()));
    }
}
