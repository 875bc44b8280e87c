//! Event repository port.
//!
//! Also defines the filter, sort and paging types used by event listings.
//! Implementations never write `capacity` or `available_tickets` from
//! `update`; those columns belong to the `TicketInventory` port.

use async_trait::async_trait;
use rust_decimal::Decimal;
use std::str::FromStr;

use crate::domain::event::Event;
use crate::domain::foundation::{
    CategoryId, DomainError, EventId, TagId, Timestamp, UserId, ValidationError,
};

/// Listing filters. Every `None` means "no constraint".
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EventFilter {
    /// Case-insensitive substring over title, description and location.
    pub search: Option<String>,
    pub category_id: Option<CategoryId>,
    pub organizer_id: Option<UserId>,
    pub published: Option<bool>,
    pub featured: Option<bool>,
    pub min_price: Option<Decimal>,
    pub max_price: Option<Decimal>,
    /// Inclusive lower bound on event date.
    pub from: Option<Timestamp>,
    /// Inclusive upper bound on event date.
    pub to: Option<Timestamp>,
}

impl EventFilter {
    /// Returns true if `event` satisfies every constraint.
    pub fn matches(&self, event: &Event) -> bool {
        if let Some(term) = self.search.as_deref() {
            let term = term.to_lowercase();
            let hit = [&event.title, &event.description, &event.location]
                .iter()
                .any(|field| field.to_lowercase().contains(&term));
            if !hit {
                return false;
            }
        }
        self.category_id.map_or(true, |c| event.category_id == Some(c))
            && self.organizer_id.map_or(true, |o| event.organizer_id == o)
            && self.published.map_or(true, |p| event.is_published == p)
            && self.featured.map_or(true, |f| event.is_featured == f)
            && self.min_price.map_or(true, |p| event.price >= p)
            && self.max_price.map_or(true, |p| event.price <= p)
            && self.from.map_or(true, |d| event.date >= d)
            && self.to.map_or(true, |d| event.date <= d)
    }
}

/// Sort key for event listings. A leading `-` means descending.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EventSort {
    DateAsc,
    #[default]
    DateDesc,
    PriceAsc,
    PriceDesc,
    TitleAsc,
    TitleDesc,
    CreatedAsc,
    CreatedDesc,
}

impl FromStr for EventSort {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "date" => Ok(EventSort::DateAsc),
            "-date" => Ok(EventSort::DateDesc),
            "price" => Ok(EventSort::PriceAsc),
            "-price" => Ok(EventSort::PriceDesc),
            "title" => Ok(EventSort::TitleAsc),
            "-title" => Ok(EventSort::TitleDesc),
            "created" => Ok(EventSort::CreatedAsc),
            "-created" => Ok(EventSort::CreatedDesc),
            other => Err(ValidationError::invalid_format(
                "sort",
                format!("Unsupported sort key '{}'", other),
            )),
        }
    }
}

impl EventSort {
    /// Orders two events under this key.
    pub fn compare(&self, a: &Event, b: &Event) -> std::cmp::Ordering {
        match self {
            EventSort::DateAsc => a.date.cmp(&b.date),
            EventSort::DateDesc => b.date.cmp(&a.date),
            EventSort::PriceAsc => a.price.cmp(&b.price),
            EventSort::PriceDesc => b.price.cmp(&a.price),
            EventSort::TitleAsc => a.title.cmp(&b.title),
            EventSort::TitleDesc => b.title.cmp(&a.title),
            EventSort::CreatedAsc => a.created_at.cmp(&b.created_at),
            EventSort::CreatedDesc => b.created_at.cmp(&a.created_at),
        }
    }
}

/// One-based page request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u32,
    pub limit: u32,
}

impl PageRequest {
    pub const DEFAULT_LIMIT: u32 = 10;
    pub const MAX_LIMIT: u32 = 100;

    pub fn new(page: Option<i64>, limit: Option<i64>) -> Result<Self, ValidationError> {
        let page = page.unwrap_or(1);
        let limit = limit.unwrap_or(Self::DEFAULT_LIMIT as i64);
        if page < 1 || page > u32::MAX as i64 {
            return Err(ValidationError::out_of_range("page", 1, u32::MAX as i64, page));
        }
        if !(1..=Self::MAX_LIMIT as i64).contains(&limit) {
            return Err(ValidationError::out_of_range(
                "limit",
                1,
                Self::MAX_LIMIT as i64,
                limit,
            ));
        }
        Ok(Self {
            page: page as u32,
            limit: limit as u32,
        })
    }

    pub fn offset(&self) -> u64 {
        (self.page as u64 - 1) * self.limit as u64
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: 1,
            limit: Self::DEFAULT_LIMIT,
        }
    }
}

/// One page of results plus the total across all pages.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: u64,
    pub request: PageRequest,
}

impl<T> Page<T> {
    pub fn has_next(&self) -> bool {
        self.request.offset() + (self.request.limit as u64) < self.total
    }

    pub fn has_prev(&self) -> bool {
        self.request.offset() > 0
    }
}

/// Repository port for Event persistence.
#[async_trait]
pub trait EventRepository: Send + Sync {
    /// Save a new event.
    async fn save(&self, event: &Event) -> Result<(), DomainError>;

    /// Update descriptive fields of an existing event.
    ///
    /// Must not write `capacity`, `available_tickets` or `organizer_id`.
    ///
    /// # Errors
    ///
    /// - `EventNotFound` if the event doesn't exist
    async fn update(&self, event: &Event) -> Result<(), DomainError>;

    async fn find_by_id(&self, id: &EventId) -> Result<Option<Event>, DomainError>;

    /// Loads several events at once; missing ids are skipped.
    async fn find_many(&self, ids: &[EventId]) -> Result<Vec<Event>, DomainError>;

    /// Filtered, sorted, paginated listing.
    async fn list(
        &self,
        filter: &EventFilter,
        sort: EventSort,
        page: PageRequest,
    ) -> Result<Page<Event>, DomainError>;

    /// Returns true if any event uses the category.
    async fn any_with_category(&self, id: &CategoryId) -> Result<bool, DomainError>;

    /// Returns true if any event carries the tag.
    async fn any_with_tag(&self, id: &TagId) -> Result<bool, DomainError>;

    /// Delete an event.
    ///
    /// # Errors
    ///
    /// - `EventNotFound` if the event doesn't exist
    /// - `EventHasBookings` if any booking references it; nothing is removed
    async fn delete(&self, id: &EventId) -> Result<(), DomainError>;
}
