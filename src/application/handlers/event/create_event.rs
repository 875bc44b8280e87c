//! CreateEventHandler - publish a new listing with a full inventory.

use std::sync::Arc;

use crate::domain::access::Capability;
use crate::domain::event::{Event, EventError, NewEvent};
use crate::domain::foundation::AuthenticatedUser;
use crate::ports::{CategoryRepository, EventRepository, TagRepository};

use super::check_references;

#[derive(Debug, Clone)]
pub struct CreateEventCommand {
    pub actor: AuthenticatedUser,
    pub input: NewEvent,
}

pub struct CreateEventHandler {
    events: Arc<dyn EventRepository>,
    categories: Arc<dyn CategoryRepository>,
    tags: Arc<dyn TagRepository>,
}

impl CreateEventHandler {
    pub fn new(
        events: Arc<dyn EventRepository>,
        categories: Arc<dyn CategoryRepository>,
        tags: Arc<dyn TagRepository>,
    ) -> Self {
        Self {
            events,
            categories,
            tags,
        }
    }

    pub async fn handle(&self, cmd: CreateEventCommand) -> Result<Event, EventError> {
        if !cmd.actor.capabilities().allows(Capability::CreateEvent) {
            return Err(EventError::forbidden(cmd.actor.id, "create"));
        }

        let event = Event::create(cmd.actor.id, cmd.input).map_err(EventError::ValidationFailed)?;
        check_references(
            self.categories.as_ref(),
            self.tags.as_ref(),
            event.category_id,
            &event.tag_ids,
        )
        .await?;

        self.events.save(&event).await?;

        tracing::info!(
            event_id = %event.id,
            organizer_id = %event.organizer_id,
            capacity = event.capacity,
            "event created"
        );
        Ok(event)
    }
}
