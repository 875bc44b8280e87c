use async_trait::async_trait;

use crate::domain::event::Event;
use crate::domain::foundation::{CategoryId, DomainError, ErrorCode, EventId, TagId};
use crate::ports::{EventFilter, EventRepository, EventSort, Page, PageRequest};

use super::InMemoryStore;

fn has_bookings(id: &EventId) -> DomainError {
    DomainError::new(ErrorCode::EventHasBookings, format!("Event {} has bookings", id))
}

#[async_trait]
impl EventRepository for InMemoryStore {
    async fn save(&self, event: &Event) -> Result<(), DomainError> {
        let mut state = self.state.write().await;
        state.events.insert(event.id, event.clone());
        Ok(())
    }

    async fn update(&self, event: &Event) -> Result<(), DomainError> {
        let mut state = self.state.write().await;
        let stored = state.events.get_mut(&event.id).ok_or_else(|| {
            DomainError::new(ErrorCode::EventNotFound, format!("Event not found: {}", event.id))
        })?;

        let capacity = stored.capacity;
        let available = stored.available_tickets;
        let organizer = stored.organizer_id;
        *stored = event.clone();
        stored.capacity = capacity;
        stored.available_tickets = available;
        stored.organizer_id = organizer;
        Ok(())
    }

    async fn find_by_id(&self, id: &EventId) -> Result<Option<Event>, DomainError> {
        Ok(self.state.read().await.events.get(id).cloned())
    }

    async fn find_many(&self, ids: &[EventId]) -> Result<Vec<Event>, DomainError> {
        let state = self.state.read().await;
        Ok(ids.iter().filter_map(|id| state.events.get(id).cloned()).collect())
    }

    async fn list(
        &self,
        filter: &EventFilter,
        sort: EventSort,
        page: PageRequest,
    ) -> Result<Page<Event>, DomainError> {
        let state = self.state.read().await;
        let mut matching: Vec<Event> = state
            .events
            .values()
            .filter(|e| filter.matches(e))
            .cloned()
            .collect();
        matching.sort_by(|a, b| sort.compare(a, b).then_with(|| a.id.cmp(&b.id)));

        let total = matching.len() as u64;
        let items = matching
            .into_iter()
            .skip(page.offset() as usize)
            .take(page.limit as usize)
            .collect();

        Ok(Page {
            items,
            total,
            request: page,
        })
    }

    async fn any_with_category(&self, id: &CategoryId) -> Result<bool, DomainError> {
        let state = self.state.read().await;
        Ok(state.events.values().any(|e| e.category_id.as_ref() == Some(id)))
    }

    async fn any_with_tag(&self, id: &TagId) -> Result<bool, DomainError> {
        let state = self.state.read().await;
        Ok(state.events.values().any(|e| e.tag_ids.contains(id)))
    }

    async fn delete(&self, id: &EventId) -> Result<(), DomainError> {
        let mut state = self.state.write().await;
        if state.bookings.values().any(|b| &b.event_id == id) {
            return Err(has_bookings(id));
        }
        state
            .events
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| DomainError::new(ErrorCode::EventNotFound, format!("Event not found: {}", id)))
    }
}
