//! PostgreSQL implementation of TicketInventory.
//!
//! Every change to `available_tickets` is a single conditional UPDATE, so two
//! concurrent reservations can never both pass the availability check.

use async_trait::async_trait;
use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

use crate::domain::booking::Booking;
use crate::domain::event::Event;
use crate::domain::foundation::{DomainError, EventId};
use crate::ports::{InventoryError, TicketInventory};

use super::booking_repository::insert_on;
use super::event_repository::{EventRow, EVENT_COLUMNS};

pub struct PostgresTicketInventory {
    pool: PgPool,
}

impl PostgresTicketInventory {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn store_error(context: &str, err: sqlx::Error) -> InventoryError {
    InventoryError::from(DomainError::database(context, err))
}

async fn reserve_on(
    conn: &mut PgConnection,
    event_id: &EventId,
    ticket_count: i32,
) -> Result<Event, InventoryError> {
    let row: Option<EventRow> = sqlx::query_as(&format!(
        "UPDATE events SET available_tickets = available_tickets - $2, updated_at = NOW() \
         WHERE id = $1 AND available_tickets >= $2 RETURNING {}",
        EVENT_COLUMNS
    ))
    .bind(event_id.as_uuid())
    .bind(ticket_count)
    .fetch_optional(&mut *conn)
    .await
    .map_err(|e| store_error("Failed to reserve tickets", e))?;

    if let Some(row) = row {
        return Ok(Event::from(row));
    }

    // Nothing updated: either the event is gone or stock ran short.
    let available: Option<i32> =
        sqlx::query_scalar("SELECT available_tickets FROM events WHERE id = $1")
            .bind(event_id.as_uuid())
            .fetch_optional(&mut *conn)
            .await
            .map_err(|e| store_error("Failed to read inventory", e))?;

    match available {
        Some(available) => Err(InventoryError::Insufficient {
            requested: ticket_count,
            available,
        }),
        None => Err(InventoryError::EventNotFound(*event_id)),
    }
}

async fn release_on(
    conn: &mut PgConnection,
    event_id: &EventId,
    ticket_count: i32,
) -> Result<Event, InventoryError> {
    let row: Option<EventRow> = sqlx::query_as(&format!(
        "UPDATE events SET available_tickets = LEAST(capacity, available_tickets + $2), \
         updated_at = NOW() WHERE id = $1 RETURNING {}",
        EVENT_COLUMNS
    ))
    .bind(event_id.as_uuid())
    .bind(ticket_count)
    .fetch_optional(&mut *conn)
    .await
    .map_err(|e| store_error("Failed to release tickets", e))?;

    row.map(Event::from)
        .ok_or(InventoryError::EventNotFound(*event_id))
}

#[async_trait]
impl TicketInventory for PostgresTicketInventory {
    async fn reserve(&self, event_id: &EventId, ticket_count: i32) -> Result<Event, InventoryError> {
        let mut conn = self
            .pool
            .acquire()
            .await
            .map_err(|e| store_error("Failed to acquire connection", e))?;
        reserve_on(&mut conn, event_id, ticket_count).await
    }

    async fn release(&self, event_id: &EventId, ticket_count: i32) -> Result<Event, InventoryError> {
        let mut conn = self
            .pool
            .acquire()
            .await
            .map_err(|e| store_error("Failed to acquire connection", e))?;
        release_on(&mut conn, event_id, ticket_count).await
    }

    async fn reserve_and_record(&self, booking: &Booking) -> Result<Event, InventoryError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| store_error("Failed to begin transaction", e))?;

        let event = reserve_on(&mut tx, &booking.event_id, booking.ticket_count.value()).await?;
        insert_on(&mut tx, booking).await?;

        tx.commit()
            .await
            .map_err(|e| store_error("Failed to commit booking", e))?;
        Ok(event)
    }

    async fn release_and_cancel(&self, booking: &Booking) -> Result<Event, InventoryError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| store_error("Failed to begin transaction", e))?;

        // The status flip is the guard: only one caller can move a booking
        // out of an active state, so tickets are returned at most once.
        let cancelled: Option<(Uuid, i32)> = sqlx::query_as(
            "UPDATE bookings SET status = 'cancelled', updated_at = $2 \
             WHERE id = $1 AND status <> 'cancelled' RETURNING event_id, ticket_count",
        )
        .bind(booking.id.as_uuid())
        .bind(booking.updated_at.as_datetime())
        .fetch_optional(&mut *tx)
        .await
        .map_err(|e| store_error("Failed to cancel booking", e))?;

        let Some((event_uuid, ticket_count)) = cancelled else {
            let exists: bool =
                sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM bookings WHERE id = $1)")
                    .bind(booking.id.as_uuid())
                    .fetch_one(&mut *tx)
                    .await
                    .map_err(|e| store_error("Failed to read booking", e))?;
            return Err(if exists {
                InventoryError::AlreadyReleased(booking.id)
            } else {
                InventoryError::BookingNotFound(booking.id)
            });
        };

        let event = release_on(&mut tx, &EventId::from_uuid(event_uuid), ticket_count).await?;

        tx.commit()
            .await
            .map_err(|e| store_error("Failed to commit cancellation", e))?;
        Ok(event)
    }
}
