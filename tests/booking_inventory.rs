//! Integration tests for ticket inventory across the booking lifecycle.
//!
//! Everything runs against `InMemoryStore` through the public handlers, so
//! these exercise the same path the HTTP layer takes.

use proptest::prelude::*;
use rust_decimal::Decimal;
use std::sync::Arc;

use eventhub::adapters::memory::InMemoryStore;
use eventhub::application::{
    CancelBookingCommand, CancelBookingHandler, CreateBookingCommand, CreateBookingHandler,
    InventoryAuditHandler, InventoryAuditQuery,
};
use eventhub::domain::access::Role;
use eventhub::domain::booking::{BookingError, BookingStatus, PaymentStatus};
use eventhub::domain::event::{Event, NewEvent};
use eventhub::domain::foundation::{AuthenticatedUser, BookingId, EventId, Timestamp, UserId};
use eventhub::ports::{BookingRepository, EventRepository};

// =============================================================================
// Test Infrastructure
// =============================================================================

fn attendee() -> AuthenticatedUser {
    AuthenticatedUser::new(UserId::new(), "attendee@example.com", "Attendee", Role::User)
}

fn admin() -> AuthenticatedUser {
    AuthenticatedUser::new(UserId::new(), "admin@example.com", "Admin", Role::Admin)
}

async fn seed_event(store: &InMemoryStore, capacity: i64, price: Decimal) -> Event {
    let event = Event::create(
        UserId::new(),
        NewEvent {
            title: "Harbour Lights Festival".into(),
            description: "Lanterns on the water".into(),
            location: "Pier 4".into(),
            date: Some(Timestamp::now().add_days(30)),
            start_time: "18:00".into(),
            end_time: "22:00".into(),
            capacity,
            price: Some(price),
            is_published: true,
            ..Default::default()
        },
    )
    .unwrap();
    EventRepository::save(store, &event).await.unwrap();
    event
}

struct Desk {
    store: InMemoryStore,
    create: CreateBookingHandler,
    cancel: CancelBookingHandler,
}

impl Desk {
    fn new() -> Self {
        let store = InMemoryStore::new();
        let shared = Arc::new(store.clone());
        Self {
            create: CreateBookingHandler::new(shared.clone(), shared.clone()),
            cancel: CancelBookingHandler::new(shared.clone(), shared),
            store,
        }
    }

    async fn book(
        &self,
        actor: &AuthenticatedUser,
        event_id: EventId,
        tickets: i64,
    ) -> Result<BookingId, BookingError> {
        self.create
            .handle(CreateBookingCommand {
                actor: actor.clone(),
                event_id,
                ticket_count: tickets,
                special_requests: None,
                payment_method: None,
            })
            .await
            .map(|view| view.booking.id)
    }

    async fn cancel(
        &self,
        actor: &AuthenticatedUser,
        booking_id: BookingId,
    ) -> Result<(), BookingError> {
        self.cancel
            .handle(CancelBookingCommand {
                actor: actor.clone(),
                booking_id,
            })
            .await
            .map(|_| ())
    }

    async fn available(&self, event_id: &EventId) -> i32 {
        EventRepository::find_by_id(&self.store, event_id)
            .await
            .unwrap()
            .unwrap()
            .available_tickets
    }

    async fn assert_consistent(&self, event_id: EventId) {
        let handler = InventoryAuditHandler::new(
            Arc::new(self.store.clone()),
            Arc::new(self.store.clone()),
        );
        let audit = handler
            .handle(InventoryAuditQuery {
                actor: admin(),
                event_id,
            })
            .await
            .unwrap();
        assert!(audit.consistent, "inventory drifted: {:?}", audit);
    }
}

// =============================================================================
// Lifecycle
// =============================================================================

#[tokio::test]
async fn book_then_cancel_restores_inventory() {
    let desk = Desk::new();
    let event = seed_event(&desk.store, 10, Decimal::new(2500, 2)).await;
    let user = attendee();

    let booking_id = desk.book(&user, event.id, 3).await.unwrap();
    assert_eq!(desk.available(&event.id).await, 7);
    desk.assert_consistent(event.id).await;

    desk.cancel(&user, booking_id).await.unwrap();
    assert_eq!(desk.available(&event.id).await, 10);
    desk.assert_consistent(event.id).await;

    let stored = BookingRepository::find_by_id(&desk.store, &booking_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.status, BookingStatus::Cancelled);
}

#[tokio::test]
async fn last_tickets_can_be_taken_but_not_exceeded() {
    let desk = Desk::new();
    let event = seed_event(&desk.store, 5, Decimal::TEN).await;
    let user = attendee();

    desk.book(&user, event.id, 3).await.unwrap();

    let err = desk.book(&user, event.id, 3).await.unwrap_err();
    assert_eq!(
        err,
        BookingError::InsufficientInventory {
            requested: 3,
            available: 2
        }
    );
    assert_eq!(desk.available(&event.id).await, 2);

    desk.book(&user, event.id, 2).await.unwrap();
    assert_eq!(desk.available(&event.id).await, 0);
    desk.assert_consistent(event.id).await;
}

#[tokio::test]
async fn free_event_bookings_are_paid_and_free() {
    let desk = Desk::new();
    let event = seed_event(&desk.store, 50, Decimal::ZERO).await;

    let booking_id = desk.book(&attendee(), event.id, 4).await.unwrap();

    let booking = BookingRepository::find_by_id(&desk.store, &booking_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(booking.total_price, Decimal::ZERO);
    assert_eq!(booking.payment_status, PaymentStatus::Paid);
}

#[tokio::test]
async fn only_owner_or_admin_can_cancel() {
    let desk = Desk::new();
    let event = seed_event(&desk.store, 10, Decimal::TEN).await;
    let owner = attendee();
    let booking_id = desk.book(&owner, event.id, 2).await.unwrap();

    let stranger = attendee();
    let err = desk.cancel(&stranger, booking_id).await.unwrap_err();
    assert!(matches!(err, BookingError::Forbidden { .. }));
    assert_eq!(desk.available(&event.id).await, 8);

    desk.cancel(&admin(), booking_id).await.unwrap();
    assert_eq!(desk.available(&event.id).await, 10);
}

#[tokio::test]
async fn second_cancel_releases_nothing() {
    let desk = Desk::new();
    let event = seed_event(&desk.store, 10, Decimal::TEN).await;
    let user = attendee();
    let booking_id = desk.book(&user, event.id, 4).await.unwrap();

    desk.cancel(&user, booking_id).await.unwrap();
    let err = desk.cancel(&user, booking_id).await.unwrap_err();

    assert_eq!(err, BookingError::AlreadyCancelled(booking_id));
    assert_eq!(desk.available(&event.id).await, 10);
    desk.assert_consistent(event.id).await;
}

#[tokio::test]
async fn out_of_range_ticket_count_is_rejected_without_touching_stock() {
    let desk = Desk::new();
    let event = seed_event(&desk.store, 20, Decimal::TEN).await;

    for tickets in [0, 11, -1] {
        let err = desk.book(&attendee(), event.id, tickets).await.unwrap_err();
        assert!(matches!(err, BookingError::ValidationFailed { .. }), "{tickets}");
    }
    assert_eq!(desk.available(&event.id).await, 20);
}

// =============================================================================
// Concurrency
// =============================================================================

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_bookings_never_oversell() {
    let desk = Arc::new(Desk::new());
    let event = seed_event(&desk.store, 10, Decimal::TEN).await;

    let mut tasks = Vec::new();
    for _ in 0..20 {
        let desk = desk.clone();
        tasks.push(tokio::spawn(async move {
            desk.book(&attendee(), event.id, 1).await
        }));
    }

    let mut succeeded = 0;
    for task in tasks {
        match task.await.unwrap() {
            Ok(_) => succeeded += 1,
            Err(BookingError::InsufficientInventory { .. }) => {}
            Err(other) => panic!("unexpected error: {other:?}"),
        }
    }

    assert_eq!(succeeded, 10);
    assert_eq!(desk.available(&event.id).await, 0);
    desk.assert_consistent(event.id).await;
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_cancels_release_once() {
    let desk = Arc::new(Desk::new());
    let event = seed_event(&desk.store, 10, Decimal::TEN).await;
    let user = attendee();
    let booking_id = desk.book(&user, event.id, 5).await.unwrap();

    let mut tasks = Vec::new();
    for _ in 0..8 {
        let desk = desk.clone();
        let user = user.clone();
        tasks.push(tokio::spawn(async move { desk.cancel(&user, booking_id).await }));
    }

    let mut cancelled = 0;
    for task in tasks {
        if task.await.unwrap().is_ok() {
            cancelled += 1;
        }
    }

    assert_eq!(cancelled, 1);
    assert_eq!(desk.available(&event.id).await, 10);
}

// =============================================================================
// Property: counter always equals capacity minus active tickets
// =============================================================================

#[derive(Debug, Clone)]
enum Op {
    Book(i64),
    CancelNth(usize),
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        3 => (1i64..=10).prop_map(Op::Book),
        1 => (0usize..16).prop_map(Op::CancelNth),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn inventory_matches_active_bookings(capacity in 1i64..40, ops in prop::collection::vec(op(), 1..30)) {
        let runtime = tokio::runtime::Runtime::new().unwrap();
        runtime.block_on(async {
            let desk = Desk::new();
            let event = seed_event(&desk.store, capacity, Decimal::ONE).await;
            let user = attendee();
            let mut booked: Vec<BookingId> = Vec::new();

            for op in ops {
                match op {
                    Op::Book(n) => {
                        let before = desk.available(&event.id).await;
                        match desk.book(&user, event.id, n).await {
                            Ok(id) => booked.push(id),
                            Err(BookingError::InsufficientInventory { .. }) => {
                                assert!(i64::from(before) < n);
                            }
                            Err(other) => panic!("unexpected error: {other:?}"),
                        }
                    }
                    Op::CancelNth(i) if !booked.is_empty() => {
                        let id = booked[i % booked.len()];
                        let _ = desk.cancel(&user, id).await;
                    }
                    Op::CancelNth(_) => {}
                }

                let available = desk.available(&event.id).await;
                assert!(available >= 0 && i64::from(available) <= capacity);
            }

            let active = BookingRepository::active_ticket_total(&desk.store, &event.id)
                .await
                .unwrap();
            assert_eq!(i64::from(desk.available(&event.id).await), capacity - active);
            desk.assert_consistent(event.id).await;
        });
    }
}
