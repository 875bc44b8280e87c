//! Public event queries.

use std::sync::Arc;

use crate::domain::event::{Event, EventError};
use crate::domain::foundation::{EventId, Timestamp, UserId};
use crate::ports::{EventFilter, EventRepository, EventSort, Page, PageRequest};

pub const FEATURED_LIMIT: u32 = 6;
pub const UPCOMING_LIMIT: u32 = 10;

#[derive(Debug, Clone, Default)]
pub struct ListEventsQuery {
    pub filter: EventFilter,
    pub sort: EventSort,
    pub page: PageRequest,
}

/// Read side for events. None of these require authentication.
pub struct EventQueryHandler {
    events: Arc<dyn EventRepository>,
}

impl EventQueryHandler {
    pub fn new(events: Arc<dyn EventRepository>) -> Self {
        Self { events }
    }

    pub async fn get(&self, id: EventId) -> Result<Event, EventError> {
        self.events
            .find_by_id(&id)
            .await?
            .ok_or(EventError::not_found(id))
    }

    pub async fn list(&self, query: ListEventsQuery) -> Result<Page<Event>, EventError> {
        Ok(self
            .events
            .list(&query.filter, query.sort, query.page)
            .await?)
    }

    pub async fn by_organizer(
        &self,
        organizer_id: UserId,
        page: PageRequest,
    ) -> Result<Page<Event>, EventError> {
        let filter = EventFilter {
            organizer_id: Some(organizer_id),
            ..Default::default()
        };
        Ok(self.events.list(&filter, EventSort::DateDesc, page).await?)
    }

    /// Featured and published, at most `FEATURED_LIMIT`.
    pub async fn featured(&self) -> Result<Vec<Event>, EventError> {
        let filter = EventFilter {
            featured: Some(true),
            published: Some(true),
            ..Default::default()
        };
        let page = PageRequest {
            page: 1,
            limit: FEATURED_LIMIT,
        };
        Ok(self.events.list(&filter, EventSort::DateAsc, page).await?.items)
    }

    /// Published events from now on, soonest first.
    pub async fn upcoming(&self) -> Result<Vec<Event>, EventError> {
        let filter = EventFilter {
            published: Some(true),
            from: Some(Timestamp::now()),
            ..Default::default()
        };
        let page = PageRequest {
            page: 1,
            limit: UPCOMING_LIMIT,
        };
        Ok(self.events.list(&filter, EventSort::DateAsc, page).await?.items)
    }
}
