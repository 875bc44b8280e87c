//! Event aggregate entity.
//!
//! # Invariants
//!
//! - `0 <= available_tickets <= capacity`
//! - `capacity` never changes after creation
//! - `available_tickets` is only changed by inventory operations, never by
//!   `apply_update`

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::foundation::{
    slugify, Authorizable, CategoryId, EventId, OwnedByUser, TagId, Timestamp, UserId,
    ValidationError,
};

pub const TITLE_MAX_LEN: usize = 100;
pub const DEFAULT_EVENT_IMAGE: &str = "default-event.jpg";

/// Input for creating an event.
#[derive(Debug, Clone, Default)]
pub struct NewEvent {
    pub title: String,
    pub description: String,
    pub location: String,
    pub date: Option<Timestamp>,
    pub start_time: String,
    pub end_time: String,
    pub capacity: i64,
    pub price: Option<Decimal>,
    pub is_published: bool,
    pub is_featured: bool,
    pub category_id: Option<CategoryId>,
    pub tag_ids: Vec<TagId>,
}

/// Partial update. Capacity, inventory and organizer are deliberately absent.
#[derive(Debug, Clone, Default)]
pub struct EventUpdate {
    pub title: Option<String>,
    pub description: Option<String>,
    pub location: Option<String>,
    pub date: Option<Timestamp>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub price: Option<Decimal>,
    pub is_published: Option<bool>,
    pub is_featured: Option<bool>,
    pub category_id: Option<CategoryId>,
    pub tag_ids: Option<Vec<TagId>>,
}

/// Event aggregate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: EventId,
    pub title: String,
    pub slug: String,
    pub description: String,
    pub location: String,
    pub date: Timestamp,
    pub start_time: String,
    pub end_time: String,
    pub capacity: i32,
    pub available_tickets: i32,
    pub price: Decimal,
    pub is_published: bool,
    pub is_featured: bool,
    pub image: String,
    pub organizer_id: UserId,
    pub category_id: Option<CategoryId>,
    pub tag_ids: Vec<TagId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// The slice of an event shown alongside a booking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventSummary {
    pub id: EventId,
    pub title: String,
    pub date: Timestamp,
    pub location: String,
    pub image: String,
}

impl Event {
    /// Validates `input` and creates an event with a full inventory.
    ///
    /// Every failing field is reported, not just the first.
    pub fn create(organizer_id: UserId, input: NewEvent) -> Result<Self, Vec<ValidationError>> {
        let mut errors = Vec::new();

        let title = collect(&mut errors, validate_title(&input.title));
        let description = collect(&mut errors, required("description", &input.description));
        let location = collect(&mut errors, required("location", &input.location));
        let start_time = collect(&mut errors, required("startTime", &input.start_time));
        let end_time = collect(&mut errors, required("endTime", &input.end_time));
        let capacity = collect(&mut errors, validate_capacity(input.capacity));
        let price = collect(&mut errors, validate_price(input.price.unwrap_or(Decimal::ZERO)));
        let date = collect(
            &mut errors,
            input.date.ok_or_else(|| ValidationError::empty_field("date")),
        );

        match (title, description, location, start_time, end_time, capacity, price, date) {
            (
                Some(title),
                Some(description),
                Some(location),
                Some(start_time),
                Some(end_time),
                Some(capacity),
                Some(price),
                Some(date),
            ) if errors.is_empty() => {
                let now = Timestamp::now();
                Ok(Self {
                    id: EventId::new(),
                    slug: slugify(&title),
                    title,
                    description,
                    location,
                    date,
                    start_time,
                    end_time,
                    capacity,
                    available_tickets: capacity,
                    price,
                    is_published: input.is_published,
                    is_featured: input.is_featured,
                    image: DEFAULT_EVENT_IMAGE.to_string(),
                    organizer_id,
                    category_id: input.category_id,
                    tag_ids: dedup(input.tag_ids),
                    created_at: now,
                    updated_at: now,
                })
            }
            _ => Err(errors),
        }
    }

    /// Applies a partial update. Inventory fields are never touched.
    pub fn apply_update(&mut self, update: EventUpdate) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        let title = update
            .title
            .as_deref()
            .and_then(|t| collect(&mut errors, validate_title(t)));
        let description = update
            .description
            .as_deref()
            .and_then(|d| collect(&mut errors, required("description", d)));
        let location = update
            .location
            .as_deref()
            .and_then(|l| collect(&mut errors, required("location", l)));
        let start_time = update
            .start_time
            .as_deref()
            .and_then(|s| collect(&mut errors, required("startTime", s)));
        let end_time = update
            .end_time
            .as_deref()
            .and_then(|s| collect(&mut errors, required("endTime", s)));
        let price = update
            .price
            .and_then(|p| collect(&mut errors, validate_price(p)));

        if !errors.is_empty() {
            return Err(errors);
        }

        if let Some(title) = title {
            self.slug = slugify(&title);
            self.title = title;
        }
        if let Some(description) = description {
            self.description = description;
        }
        if let Some(location) = location {
            self.location = location;
        }
        if let Some(date) = update.date {
            self.date = date;
        }
        if let Some(start_time) = start_time {
            self.start_time = start_time;
        }
        if let Some(end_time) = end_time {
            self.end_time = end_time;
        }
        if let Some(price) = price {
            self.price = price;
        }
        if let Some(published) = update.is_published {
            self.is_published = published;
        }
        if let Some(featured) = update.is_featured {
            self.is_featured = featured;
        }
        if let Some(category_id) = update.category_id {
            self.category_id = Some(category_id);
        }
        if let Some(tag_ids) = update.tag_ids {
            self.tag_ids = dedup(tag_ids);
        }
        self.updated_at = Timestamp::now();
        Ok(())
    }

    pub fn is_full(&self) -> bool {
        self.available_tickets <= 0
    }

    pub fn is_upcoming(&self) -> bool {
        self.date.is_after(&Timestamp::now())
    }

    pub fn summary(&self) -> EventSummary {
        EventSummary {
            id: self.id,
            title: self.title.clone(),
            date: self.date,
            location: self.location.clone(),
            image: self.image.clone(),
        }
    }
}

impl OwnedByUser for Event {
    fn owner_id(&self) -> &UserId {
        &self.organizer_id
    }
}

impl Authorizable for Event {
    const RESOURCE_TYPE: &'static str = "Event";

    fn resource_id(&self) -> String {
        self.id.to_string()
    }
}

fn collect<T>(errors: &mut Vec<ValidationError>, result: Result<T, ValidationError>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(e) => {
            errors.push(e);
            None
        }
    }
}

fn required(field: &str, value: &str) -> Result<String, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::empty_field(field));
    }
    Ok(trimmed.to_string())
}

fn validate_title(title: &str) -> Result<String, ValidationError> {
    let title = required("title", title)?;
    if title.chars().count() > TITLE_MAX_LEN {
        return Err(ValidationError::too_long("title", TITLE_MAX_LEN));
    }
    Ok(title)
}

fn validate_capacity(capacity: i64) -> Result<i32, ValidationError> {
    if capacity < 1 || capacity > i32::MAX as i64 {
        return Err(ValidationError::out_of_range(
            "capacity",
            1,
            i32::MAX as i64,
            capacity,
        ));
    }
    Ok(capacity as i32)
}

fn validate_price(price: Decimal) -> Result<Decimal, ValidationError> {
    if price.is_sign_negative() && !price.is_zero() {
        return Err(ValidationError::invalid_format("price", "Price cannot be negative"));
    }
    Ok(price)
}

fn dedup(mut ids: Vec<TagId>) -> Vec<TagId> {
    let mut seen = std::collections::HashSet::new();
    ids.retain(|id| seen.insert(*id));
    ids
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input() -> NewEvent {
        NewEvent {
            title: "Rust Meetup".to_string(),
            description: "Talks and pizza".to_string(),
            location: "Berlin".to_string(),
            date: Some(Timestamp::now().add_days(7)),
            start_time: "18:00".to_string(),
            end_time: "21:00".to_string(),
            capacity: 50,
            price: Some(Decimal::new(1500, 2)),
            ..Default::default()
        }
    }

    // ============================================================
    // Creation
    // ============================================================

    #[test]
    fn create_starts_with_full_inventory() {
        let event = Event::create(UserId::new(), input()).unwrap();
        assert_eq!(event.capacity, 50);
        assert_eq!(event.available_tickets, 50);
        assert_eq!(event.slug, "rust-meetup");
        assert_eq!(event.image, DEFAULT_EVENT_IMAGE);
        assert!(!event.is_published);
        assert!(!event.is_full());
        assert!(event.is_upcoming());
    }

    #[test]
    fn create_defaults_price_to_zero() {
        let event = Event::create(
            UserId::new(),
            NewEvent {
                price: None,
                ..input()
            },
        )
        .unwrap();
        assert!(event.price.is_zero());
    }

    #[test]
    fn create_reports_every_invalid_field() {
        let errors = Event::create(
            UserId::new(),
            NewEvent {
                title: " ".into(),
                location: String::new(),
                capacity: 0,
                date: None,
                ..input()
            },
        )
        .unwrap_err();

        let fields: Vec<&str> = errors.iter().map(|e| e.field()).collect();
        assert_eq!(fields, vec!["title", "location", "capacity", "date"]);
    }

    #[test]
    fn create_rejects_long_title() {
        let errors = Event::create(
            UserId::new(),
            NewEvent {
                title: "x".repeat(101),
                ..input()
            },
        )
        .unwrap_err();
        assert_eq!(errors, vec![ValidationError::too_long("title", 100)]);
    }

    #[test]
    fn create_rejects_negative_price() {
        let errors = Event::create(
            UserId::new(),
            NewEvent {
                price: Some(Decimal::new(-1, 0)),
                ..input()
            },
        )
        .unwrap_err();
        assert_eq!(errors[0].field(), "price");
    }

    #[test]
    fn create_drops_duplicate_tags() {
        let tag = TagId::new();
        let event = Event::create(
            UserId::new(),
            NewEvent {
                tag_ids: vec![tag, tag],
                ..input()
            },
        )
        .unwrap();
        assert_eq!(event.tag_ids, vec![tag]);
    }

    // ============================================================
    // Updates
    // ============================================================

    #[test]
    fn update_changes_fields_and_slug() {
        let mut event = Event::create(UserId::new(), input()).unwrap();
        event
            .apply_update(EventUpdate {
                title: Some("Rust Meetup II".into()),
                is_published: Some(true),
                ..Default::default()
            })
            .unwrap();

        assert_eq!(event.title, "Rust Meetup II");
        assert_eq!(event.slug, "rust-meetup-ii");
        assert!(event.is_published);
    }

    #[test]
    fn update_never_changes_inventory() {
        let mut event = Event::create(UserId::new(), input()).unwrap();
        event.available_tickets = 12;

        event
            .apply_update(EventUpdate {
                location: Some("Hamburg".into()),
                ..Default::default()
            })
            .unwrap();

        assert_eq!(event.available_tickets, 12);
        assert_eq!(event.capacity, 50);
    }

    #[test]
    fn invalid_update_leaves_event_untouched() {
        let mut event = Event::create(UserId::new(), input()).unwrap();
        let before = event.clone();

        let errors = event
            .apply_update(EventUpdate {
                title: Some(String::new()),
                location: Some("Paris".into()),
                ..Default::default()
            })
            .unwrap_err();

        assert_eq!(errors[0].field(), "title");
        assert_eq!(event, before);
    }

    // ============================================================
    // Derived state
    // ============================================================

    #[test]
    fn sold_out_event_is_full() {
        let mut event = Event::create(UserId::new(), input()).unwrap();
        event.available_tickets = 0;
        assert!(event.is_full());
    }

    #[test]
    fn past_event_is_not_upcoming() {
        let event = Event::create(
            UserId::new(),
            NewEvent {
                date: Some(Timestamp::now().add_days(-1)),
                ..input()
            },
        )
        .unwrap();
        assert!(!event.is_upcoming());
    }

    #[test]
    fn organizer_owns_event() {
        let organizer = UserId::new();
        let event = Event::create(organizer, input()).unwrap();
        assert!(event.is_owner(&organizer));
    }
}
