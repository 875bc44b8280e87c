//! UpdateEventHandler - edit a listing's descriptive fields.

use std::sync::Arc;

use crate::domain::access::Capability;
use crate::domain::event::{Event, EventError, EventUpdate};
use crate::domain::foundation::{AuthenticatedUser, EventId};
use crate::ports::{CategoryRepository, EventRepository, TagRepository};

use super::{authorize, check_references};

#[derive(Debug, Clone)]
pub struct UpdateEventCommand {
    pub actor: AuthenticatedUser,
    pub event_id: EventId,
    pub update: EventUpdate,
}

pub struct UpdateEventHandler {
    events: Arc<dyn EventRepository>,
    categories: Arc<dyn CategoryRepository>,
    tags: Arc<dyn TagRepository>,
}

impl UpdateEventHandler {
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

    pub async fn handle(&self, cmd: UpdateEventCommand) -> Result<Event, EventError> {
        let mut event = self
            .events
            .find_by_id(&cmd.event_id)
            .await?
            .ok_or(EventError::not_found(cmd.event_id))?;

        authorize(
            &event,
            &cmd.actor,
            Capability::UpdateOwnEvent,
            Capability::UpdateAnyEvent,
            "update",
        )?;

        check_references(
            self.categories.as_ref(),
            self.tags.as_ref(),
            cmd.update.category_id,
            cmd.update.tag_ids.as_deref().unwrap_or_default(),
        )
        .await?;

        event
            .apply_update(cmd.update)
            .map_err(EventError::ValidationFailed)?;
        self.events.update(&event).await?;

        tracing::info!(event_id = %event.id, updated_by = %cmd.actor.id, "event updated");

        // Re-read so the response reflects the stored inventory, not our copy.
        self.events
            .find_by_id(&event.id)
            .await?
            .ok_or(EventError::not_found(event.id))
    }
}
