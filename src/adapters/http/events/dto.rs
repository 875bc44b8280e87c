//! Request bodies and query strings for event endpoints.
//!
//! Ids, dates and prices arrive as strings and are parsed here so that a
//! bad value comes back as a field error rather than a deserializer message.

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::str::FromStr;

use crate::application::handlers::event::ListEventsQuery;
use crate::domain::event::{EventUpdate, NewEvent};
use crate::domain::foundation::{CategoryId, TagId, Timestamp, UserId, ValidationError};
use crate::ports::{EventFilter, EventSort, PageRequest};

// ════════════════════════════════════════════════════════════════════════════════
// Field parsers
// ════════════════════════════════════════════════════════════════════════════════

/// Accepts RFC 3339 or a bare `YYYY-MM-DD` (midnight UTC).
pub fn parse_date(field: &str, raw: &str) -> Result<Timestamp, ValidationError> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Ok(Timestamp::from_datetime(dt.with_timezone(&Utc)));
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| Timestamp::from_datetime(Utc.from_utc_datetime(&naive)))
        .ok_or_else(|| ValidationError::invalid_format(field, "Please add a valid date"))
}

fn parse_id<T: FromStr>(field: &str, raw: &str) -> Result<T, ValidationError> {
    raw.trim()
        .parse()
        .map_err(|_| ValidationError::invalid_format(field, "Invalid id"))
}

fn parse_price(field: &str, raw: &str) -> Result<Decimal, ValidationError> {
    Decimal::from_str(raw.trim())
        .map_err(|_| ValidationError::invalid_format(field, "Price must be a number"))
}

/// Runs `parse` on a present value, pushing any failure onto `errors`.
fn optional<T>(
    errors: &mut Vec<ValidationError>,
    raw: Option<&str>,
    parse: impl FnOnce(&str) -> Result<T, ValidationError>,
) -> Option<T> {
    match raw.map(str::trim).filter(|s| !s.is_empty()).map(parse) {
        Some(Ok(value)) => Some(value),
        Some(Err(e)) => {
            errors.push(e);
            None
        }
        None => None,
    }
}

fn tag_ids(errors: &mut Vec<ValidationError>, raw: &[String]) -> Vec<TagId> {
    raw.iter()
        .filter_map(|t| optional(errors, Some(t.as_str()), |s| parse_id("tags", s)))
        .collect()
}

// ════════════════════════════════════════════════════════════════════════════════
// Listing
// ════════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListEventsParams {
    pub search: Option<String>,
    pub category: Option<String>,
    pub organizer: Option<String>,
    pub published: Option<bool>,
    pub featured: Option<bool>,
    pub min_price: Option<String>,
    pub max_price: Option<String>,
    pub from: Option<String>,
    pub to: Option<String>,
    pub sort: Option<String>,
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

impl ListEventsParams {
    pub fn into_query(self) -> Result<ListEventsQuery, Vec<ValidationError>> {
        let mut errors = Vec::new();

        let filter = EventFilter {
            search: self.search.filter(|s| !s.trim().is_empty()),
            category_id: optional(&mut errors, self.category.as_deref(), |s| {
                parse_id::<CategoryId>("category", s)
            }),
            organizer_id: optional(&mut errors, self.organizer.as_deref(), |s| {
                parse_id::<UserId>("organizer", s)
            }),
            published: self.published,
            featured: self.featured,
            min_price: optional(&mut errors, self.min_price.as_deref(), |s| {
                parse_price("minPrice", s)
            }),
            max_price: optional(&mut errors, self.max_price.as_deref(), |s| {
                parse_price("maxPrice", s)
            }),
            from: optional(&mut errors, self.from.as_deref(), |s| parse_date("from", s)),
            to: optional(&mut errors, self.to.as_deref(), |s| parse_date("to", s)),
        };
        let sort = optional(&mut errors, self.sort.as_deref(), EventSort::from_str)
            .unwrap_or_default();
        let page = PageRequest::new(self.page, self.limit)
            .map_err(|e| errors.push(e))
            .ok();

        match page {
            Some(page) if errors.is_empty() => Ok(ListEventsQuery { filter, sort, page }),
            _ => Err(errors),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PageParams {
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

impl PageParams {
    pub fn into_request(self) -> Result<PageRequest, ValidationError> {
        PageRequest::new(self.page, self.limit)
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Create / update
// ════════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateEventRequest {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub location: String,
    pub date: Option<String>,
    #[serde(default)]
    pub start_time: String,
    #[serde(default)]
    pub end_time: String,
    #[serde(default)]
    pub capacity: i64,
    pub price: Option<Decimal>,
    #[serde(default)]
    pub is_published: bool,
    #[serde(default)]
    pub is_featured: bool,
    #[serde(alias = "categoryId")]
    pub category: Option<String>,
    #[serde(default, alias = "tagIds")]
    pub tags: Vec<String>,
}

impl CreateEventRequest {
    /// Parses ids and the date. Field rules are left to `Event::create`.
    pub fn into_input(self) -> Result<NewEvent, Vec<ValidationError>> {
        let mut errors = Vec::new();
        let date = optional(&mut errors, self.date.as_deref(), |s| parse_date("date", s));
        let category_id = optional(&mut errors, self.category.as_deref(), |s| {
            parse_id::<CategoryId>("category", s)
        });
        let tag_ids = tag_ids(&mut errors, &self.tags);

        if !errors.is_empty() {
            return Err(errors);
        }
        Ok(NewEvent {
            title: self.title,
            description: self.description,
            location: self.location,
            date,
            start_time: self.start_time,
            end_time: self.end_time,
            capacity: self.capacity,
            price: self.price,
            is_published: self.is_published,
            is_featured: self.is_featured,
            category_id,
            tag_ids,
        })
    }
}

/// Partial update. There is deliberately no field for capacity or
/// available tickets; unknown keys are ignored.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateEventRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub location: Option<String>,
    pub date: Option<String>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub price: Option<Decimal>,
    pub is_published: Option<bool>,
    pub is_featured: Option<bool>,
    #[serde(alias = "categoryId")]
    pub category: Option<String>,
    #[serde(alias = "tagIds")]
    pub tags: Option<Vec<String>>,
}

impl UpdateEventRequest {
    pub fn into_update(self) -> Result<EventUpdate, Vec<ValidationError>> {
        let mut errors = Vec::new();
        let date = optional(&mut errors, self.date.as_deref(), |s| parse_date("date", s));
        let category_id = optional(&mut errors, self.category.as_deref(), |s| {
            parse_id::<CategoryId>("category", s)
        });
        let tag_ids = self.tags.map(|tags| tag_ids(&mut errors, &tags));

        if !errors.is_empty() {
            return Err(errors);
        }
        Ok(EventUpdate {
            title: self.title,
            description: self.description,
            location: self.location,
            date,
            start_time: self.start_time,
            end_time: self.end_time,
            price: self.price,
            is_published: self.is_published,
            is_featured: self.is_featured,
            category_id,
            tag_ids,
        })
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Catalog
// ════════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Deserialize)]
pub struct CreateCategoryRequest {
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateTagRequest {
    #[serde(default)]
    pub name: String,
    pub color: Option<String>,
}
