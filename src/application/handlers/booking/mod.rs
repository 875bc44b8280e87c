//! Booking command and query handlers.
//!
//! Creating and cancelling go through `TicketInventory`, never through a
//! plain repository write, so the stock counter and the booking row always
//! move together.

mod cancel_booking;
mod create_booking;
mod get_booking;

pub use cancel_booking::{CancelBookingCommand, CancelBookingHandler};
pub use create_booking::{CreateBookingCommand, CreateBookingHandler};
pub use get_booking::{GetBookingHandler, GetBookingQuery, ListBookingsHandler, ListBookingsQuery};

use crate::domain::booking::{Booking, BookingError};
use crate::domain::event::EventSummary;
use crate::ports::InventoryError;

/// A booking together with the event it is for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingView {
    pub booking: Booking,
    /// `None` only if the event row has since disappeared.
    pub event: Option<EventSummary>,
}

fn inventory_error(err: InventoryError) -> BookingError {
    match err {
        InventoryError::EventNotFound(id) => BookingError::event_not_found(id),
        InventoryError::Insufficient {
            requested,
            available,
        } => BookingError::insufficient_inventory(requested, available),
        InventoryError::AlreadyReleased(id) => BookingError::already_cancelled(id),
        InventoryError::BookingNotFound(id) => BookingError::not_found(id),
        InventoryError::DuplicateReference(reference) => {
            BookingError::infrastructure(format!("Booking reference {} is already taken", reference))
        }
        InventoryError::Store(msg) => BookingError::infrastructure(msg),
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use crate::adapters::memory::InMemoryStore;
    use crate::domain::access::Role;
    use crate::domain::event::{Event, NewEvent};
    use crate::domain::foundation::{AuthenticatedUser, Timestamp, UserId};
    use crate::ports::EventRepository;
    use rust_decimal::Decimal;

    pub fn actor(role: Role) -> AuthenticatedUser {
        AuthenticatedUser::new(UserId::new(), "someone@example.com", "Someone", role)
    }

    pub async fn seed_event(store: &InMemoryStore, capacity: i64, price: i64) -> Event {
        let event = Event::create(
            UserId::new(),
            NewEvent {
                title: "Jazz Night".into(),
                description: "Live quartet".into(),
                location: "Blue Room".into(),
                date: Some(Timestamp::now().add_days(14)),
                start_time: "19:30".into(),
                end_time: "23:00".into(),
                capacity,
                price: Some(Decimal::from(price)),
                is_published: true,
                ..Default::default()
            },
        )
        .unwrap();
        EventRepository::save(store, &event).await.unwrap();
        event
    }
}
