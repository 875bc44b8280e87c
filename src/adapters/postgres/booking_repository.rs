//! PostgreSQL implementation of BookingRepository.
//!
//! Bookings are only ever inserted or cancelled by the inventory adapter,
//! which shares `insert_on` so the write happens inside its transaction.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

use crate::domain::booking::{Booking, BookingReference, TicketCount};
use crate::domain::foundation::{
    BookingId, DomainError, ErrorCode, EventId, Timestamp, UserId,
};
use crate::ports::BookingRepository;

const BOOKING_COLUMNS: &str = "id, event_id, user_id, ticket_count, status, total_price, \
    payment_status, payment_method, booking_reference, special_requests, created_at, updated_at";

pub struct PostgresBookingRepository {
    pool: PgPool,
}

impl PostgresBookingRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Database row representation of a booking.
#[derive(Debug, sqlx::FromRow)]
struct BookingRow {
    id: Uuid,
    event_id: Uuid,
    user_id: Uuid,
    ticket_count: i32,
    status: String,
    total_price: Decimal,
    payment_status: String,
    payment_method: String,
    booking_reference: String,
    special_requests: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<BookingRow> for Booking {
    type Error = DomainError;

    fn try_from(row: BookingRow) -> Result<Self, Self::Error> {
        let ticket_count = TicketCount::new(row.ticket_count as i64).map_err(|e| {
            DomainError::new(ErrorCode::DatabaseError, format!("Invalid ticket_count: {}", e))
        })?;

        Ok(Booking {
            id: BookingId::from_uuid(row.id),
            event_id: EventId::from_uuid(row.event_id),
            user_id: UserId::from_uuid(row.user_id),
            ticket_count,
            status: parse_column(&row.status, "status")?,
            total_price: row.total_price,
            payment_status: parse_column(&row.payment_status, "payment_status")?,
            payment_method: parse_column(&row.payment_method, "payment_method")?,
            booking_reference: BookingReference::from_stored(row.booking_reference),
            special_requests: row.special_requests,
            created_at: Timestamp::from_datetime(row.created_at),
            updated_at: Timestamp::from_datetime(row.updated_at),
        })
    }
}

fn parse_column<T>(value: &str, column: &str) -> Result<T, DomainError>
where
    T: std::str::FromStr<Err = String>,
{
    value.parse().map_err(|e: String| {
        DomainError::new(ErrorCode::DatabaseError, format!("Invalid {}: {}", column, e))
    })
}

/// Inserts a booking on an open connection or transaction.
pub(super) async fn insert_on(conn: &mut PgConnection, booking: &Booking) -> Result<(), DomainError> {
    sqlx::query(
        r#"
        INSERT INTO bookings (
            id, event_id, user_id, ticket_count, status, total_price, payment_status,
            payment_method, booking_reference, special_requests, created_at, updated_at
        ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
        "#,
    )
    .bind(booking.id.as_uuid())
    .bind(booking.event_id.as_uuid())
    .bind(booking.user_id.as_uuid())
    .bind(booking.ticket_count.value())
    .bind(booking.status.as_str())
    .bind(booking.total_price)
    .bind(booking.payment_status.as_str())
    .bind(booking.payment_method.as_str())
    .bind(booking.booking_reference.as_str())
    .bind(booking.special_requests.as_deref())
    .bind(booking.created_at.as_datetime())
    .bind(booking.updated_at.as_datetime())
    .execute(conn)
    .await
    .map_err(|e| insert_error(booking, e))?;

    Ok(())
}

/// Maps the unique reference constraint onto `DuplicateReference`.
fn insert_error(booking: &Booking, err: sqlx::Error) -> DomainError {
    if let sqlx::Error::Database(ref db_err) = err {
        if db_err.constraint() == Some("bookings_reference_key") {
            return DomainError::new(ErrorCode::DuplicateReference, "Booking reference taken")
                .with_detail("reference", booking.booking_reference.as_str());
        }
    }
    DomainError::database("Failed to save booking", err)
}

#[async_trait]
impl BookingRepository for PostgresBookingRepository {
    async fn find_by_id(&self, id: &BookingId) -> Result<Option<Booking>, DomainError> {
        let row: Option<BookingRow> =
            sqlx::query_as(&format!("SELECT {} FROM bookings WHERE id = $1", BOOKING_COLUMNS))
                .bind(id.as_uuid())
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| DomainError::database("Failed to find booking", e))?;

        row.map(Booking::try_from).transpose()
    }

    async fn find_by_user(&self, user_id: &UserId) -> Result<Vec<Booking>, DomainError> {
        let rows: Vec<BookingRow> = sqlx::query_as(&format!(
            "SELECT {} FROM bookings WHERE user_id = $1 ORDER BY created_at DESC, id",
            BOOKING_COLUMNS
        ))
        .bind(user_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to list bookings", e))?;

        rows.into_iter().map(Booking::try_from).collect()
    }

    async fn count_for_event(&self, event_id: &EventId) -> Result<u64, DomainError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM bookings WHERE event_id = $1")
            .bind(event_id.as_uuid())
            .fetch_one(&self.pool)
            .await
            .map_err(|e| DomainError::database("Failed to count bookings", e))?;

        Ok(count.max(0) as u64)
    }

    async fn active_ticket_total(&self, event_id: &EventId) -> Result<i64, DomainError> {
        sqlx::query_scalar(
            "SELECT COALESCE(SUM(ticket_count), 0)::BIGINT FROM bookings \
             WHERE event_id = $1 AND status <> 'cancelled'",
        )
        .bind(event_id.as_uuid())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to sum booked tickets", e))
    }
}
