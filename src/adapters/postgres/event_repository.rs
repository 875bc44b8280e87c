//! PostgreSQL implementation of EventRepository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use crate::domain::event::Event;
use crate::domain::foundation::{
    CategoryId, DomainError, ErrorCode, EventId, TagId, Timestamp, UserId,
};
use crate::ports::{EventFilter, EventRepository, EventSort, Page, PageRequest};

/// Column list shared by every query that returns an `EventRow`.
pub(super) const EVENT_COLUMNS: &str = "id, title, slug, description, location, date, \
    start_time, end_time, capacity, available_tickets, price, is_published, is_featured, \
    image, organizer_id, category_id, tag_ids, created_at, updated_at";

pub struct PostgresEventRepository {
    pool: PgPool,
}

impl PostgresEventRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Database row representation of an event.
#[derive(Debug, sqlx::FromRow)]
pub(super) struct EventRow {
    id: Uuid,
    title: String,
    slug: String,
    description: String,
    location: String,
    date: DateTime<Utc>,
    start_time: String,
    end_time: String,
    capacity: i32,
    available_tickets: i32,
    price: Decimal,
    is_published: bool,
    is_featured: bool,
    image: String,
    organizer_id: Uuid,
    category_id: Option<Uuid>,
    tag_ids: Vec<Uuid>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<EventRow> for Event {
    fn from(row: EventRow) -> Self {
        Event {
            id: EventId::from_uuid(row.id),
            title: row.title,
            slug: row.slug,
            description: row.description,
            location: row.location,
            date: Timestamp::from_datetime(row.date),
            start_time: row.start_time,
            end_time: row.end_time,
            capacity: row.capacity,
            available_tickets: row.available_tickets,
            price: row.price,
            is_published: row.is_published,
            is_featured: row.is_featured,
            image: row.image,
            organizer_id: UserId::from_uuid(row.organizer_id),
            category_id: row.category_id.map(CategoryId::from_uuid),
            tag_ids: row.tag_ids.into_iter().map(TagId::from_uuid).collect(),
            created_at: Timestamp::from_datetime(row.created_at),
            updated_at: Timestamp::from_datetime(row.updated_at),
        }
    }
}

fn tag_uuids(event: &Event) -> Vec<Uuid> {
    event.tag_ids.iter().map(|t| *t.as_uuid()).collect()
}

/// Escapes LIKE wildcards so user input matches literally.
fn like_pattern(term: &str) -> String {
    let escaped = term
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{}%", escaped)
}

fn push_filters(builder: &mut QueryBuilder<'_, Postgres>, filter: &EventFilter) {
    builder.push(" WHERE TRUE");
    if let Some(term) = filter.search.as_deref() {
        let pattern = like_pattern(term);
        builder.push(" AND (title ILIKE ");
        builder.push_bind(pattern.clone());
        builder.push(" OR description ILIKE ");
        builder.push_bind(pattern.clone());
        builder.push(" OR location ILIKE ");
        builder.push_bind(pattern);
        builder.push(")");
    }
    if let Some(category) = filter.category_id {
        builder.push(" AND category_id = ").push_bind(*category.as_uuid());
    }
    if let Some(organizer) = filter.organizer_id {
        builder.push(" AND organizer_id = ").push_bind(*organizer.as_uuid());
    }
    if let Some(published) = filter.published {
        builder.push(" AND is_published = ").push_bind(published);
    }
    if let Some(featured) = filter.featured {
        builder.push(" AND is_featured = ").push_bind(featured);
    }
    if let Some(min) = filter.min_price {
        builder.push(" AND price >= ").push_bind(min);
    }
    if let Some(max) = filter.max_price {
        builder.push(" AND price <= ").push_bind(max);
    }
    if let Some(from) = filter.from {
        builder.push(" AND date >= ").push_bind(*from.as_datetime());
    }
    if let Some(to) = filter.to {
        builder.push(" AND date <= ").push_bind(*to.as_datetime());
    }
}

fn order_by(sort: EventSort) -> &'static str {
    match sort {
        EventSort::DateAsc => " ORDER BY date ASC, id",
        EventSort::DateDesc => " ORDER BY date DESC, id",
        EventSort::PriceAsc => " ORDER BY price ASC, id",
        EventSort::PriceDesc => " ORDER BY price DESC, id",
        EventSort::TitleAsc => " ORDER BY title ASC, id",
        EventSort::TitleDesc => " ORDER BY title DESC, id",
        EventSort::CreatedAsc => " ORDER BY created_at ASC, id",
        EventSort::CreatedDesc => " ORDER BY created_at DESC, id",
    }
}

fn not_found(id: &EventId) -> DomainError {
    DomainError::new(ErrorCode::EventNotFound, format!("Event not found: {}", id))
}

#[async_trait]
impl EventRepository for PostgresEventRepository {
    async fn save(&self, event: &Event) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO events (
                id, title, slug, description, location, date, start_time, end_time,
                capacity, available_tickets, price, is_published, is_featured, image,
                organizer_id, category_id, tag_ids, created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17, $18, $19)
            "#,
        )
        .bind(event.id.as_uuid())
        .bind(&event.title)
        .bind(&event.slug)
        .bind(&event.description)
        .bind(&event.location)
        .bind(event.date.as_datetime())
        .bind(&event.start_time)
        .bind(&event.end_time)
        .bind(event.capacity)
        .bind(event.available_tickets)
        .bind(event.price)
        .bind(event.is_published)
        .bind(event.is_featured)
        .bind(&event.image)
        .bind(event.organizer_id.as_uuid())
        .bind(event.category_id.map(|c| *c.as_uuid()))
        .bind(tag_uuids(event))
        .bind(event.created_at.as_datetime())
        .bind(event.updated_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to save event", e))?;

        Ok(())
    }

    async fn update(&self, event: &Event) -> Result<(), DomainError> {
        // capacity, available_tickets and organizer_id are intentionally absent
        let result = sqlx::query(
            r#"
            UPDATE events SET
                title = $2,
                slug = $3,
                description = $4,
                location = $5,
                date = $6,
                start_time = $7,
                end_time = $8,
                price = $9,
                is_published = $10,
                is_featured = $11,
                image = $12,
                category_id = $13,
                tag_ids = $14,
                updated_at = $15
            WHERE id = $1
            "#,
        )
        .bind(event.id.as_uuid())
        .bind(&event.title)
        .bind(&event.slug)
        .bind(&event.description)
        .bind(&event.location)
        .bind(event.date.as_datetime())
        .bind(&event.start_time)
        .bind(&event.end_time)
        .bind(event.price)
        .bind(event.is_published)
        .bind(event.is_featured)
        .bind(&event.image)
        .bind(event.category_id.map(|c| *c.as_uuid()))
        .bind(tag_uuids(event))
        .bind(event.updated_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to update event", e))?;

        if result.rows_affected() == 0 {
            return Err(not_found(&event.id));
        }
        Ok(())
    }

    async fn find_by_id(&self, id: &EventId) -> Result<Option<Event>, DomainError> {
        let row: Option<EventRow> =
            sqlx::query_as(&format!("SELECT {} FROM events WHERE id = $1", EVENT_COLUMNS))
                .bind(id.as_uuid())
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| DomainError::database("Failed to find event", e))?;

        Ok(row.map(Event::from))
    }

    async fn find_many(&self, ids: &[EventId]) -> Result<Vec<Event>, DomainError> {
        let uuids: Vec<Uuid> = ids.iter().map(|id| *id.as_uuid()).collect();
        let rows: Vec<EventRow> = sqlx::query_as(&format!(
            "SELECT {} FROM events WHERE id = ANY($1)",
            EVENT_COLUMNS
        ))
        .bind(uuids)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to load events", e))?;

        Ok(rows.into_iter().map(Event::from).collect())
    }

    async fn list(
        &self,
        filter: &EventFilter,
        sort: EventSort,
        page: PageRequest,
    ) -> Result<Page<Event>, DomainError> {
        let mut count = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM events");
        push_filters(&mut count, filter);
        let total: i64 = count
            .build_query_scalar()
            .fetch_one(&self.pool)
            .await
            .map_err(|e| DomainError::database("Failed to count events", e))?;

        let mut select = QueryBuilder::<Postgres>::new(format!("SELECT {} FROM events", EVENT_COLUMNS));
        push_filters(&mut select, filter);
        select.push(order_by(sort));
        select.push(" LIMIT ").push_bind(page.limit as i64);
        select.push(" OFFSET ").push_bind(page.offset() as i64);

        let rows: Vec<EventRow> = select
            .build_query_as()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| DomainError::database("Failed to list events", e))?;

        Ok(Page {
            items: rows.into_iter().map(Event::from).collect(),
            total: total.max(0) as u64,
            request: page,
        })
    }

    async fn any_with_category(&self, id: &CategoryId) -> Result<bool, DomainError> {
        sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM events WHERE category_id = $1)")
            .bind(id.as_uuid())
            .fetch_one(&self.pool)
            .await
            .map_err(|e| DomainError::database("Failed to check category usage", e))
    }

    async fn any_with_tag(&self, id: &TagId) -> Result<bool, DomainError> {
        sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM events WHERE $1 = ANY(tag_ids))")
            .bind(id.as_uuid())
            .fetch_one(&self.pool)
            .await
            .map_err(|e| DomainError::database("Failed to check tag usage", e))
    }

    async fn delete(&self, id: &EventId) -> Result<(), DomainError> {
        let result = sqlx::query("DELETE FROM events WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(|e| delete_error(id, e))?;

        if result.rows_affected() == 0 {
            return Err(not_found(id));
        }
        Ok(())
    }
}

/// A booking inserted after the handler's check trips the foreign key.
fn delete_error(id: &EventId, err: sqlx::Error) -> DomainError {
    if let sqlx::Error::Database(ref db_err) = err {
        if db_err.constraint() == Some("bookings_event_id_fkey") {
            return DomainError::new(ErrorCode::EventHasBookings, format!("Event {} has bookings", id));
        }
    }
    DomainError::database("Failed to delete event", err)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn like_pattern_escapes_wildcards() {
        assert_eq!(like_pattern("50%_off"), "%50\\%\\_off%");
        assert_eq!(like_pattern("jazz"), "%jazz%");
    }

    #[test]
    fn order_by_always_breaks_ties_on_id() {
        for sort in [EventSort::DateDesc, EventSort::PriceAsc, EventSort::TitleDesc] {
            assert!(order_by(sort).ends_with(", id"));
        }
    }

    #[test]
    fn filters_render_in_sql() {
        let filter = EventFilter {
            search: Some("rock".into()),
            published: Some(true),
            min_price: Some(Decimal::from(5)),
            ..Default::default()
        };
        let mut builder = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM events");
        push_filters(&mut builder, &filter);
        let sql = builder.sql();

        assert!(sql.contains("title ILIKE $1"));
        assert!(sql.contains("location ILIKE $3"));
        assert!(sql.contains("is_published = $4"));
        assert!(sql.contains("price >= $5"));
        assert!(!sql.contains("category_id"));
    }
}
