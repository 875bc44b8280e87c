//! Event command and query handlers.

mod create_event;
mod delete_event;
mod inventory_audit;
mod queries;
mod update_event;

pub use create_event::{CreateEventCommand, CreateEventHandler};
pub use delete_event::{DeleteEventCommand, DeleteEventHandler};
pub use inventory_audit::{InventoryAuditHandler, InventoryAuditQuery};
pub use queries::{
    EventQueryHandler, ListEventsQuery, FEATURED_LIMIT, UPCOMING_LIMIT,
};
pub use update_event::{UpdateEventCommand, UpdateEventHandler};

use crate::domain::access::Capability;
use crate::domain::event::{Event, EventError};
use crate::domain::foundation::{authorize_owner_or, AuthenticatedUser, CategoryId, TagId};
use crate::ports::{CategoryRepository, TagRepository};

/// Owners need `own`; everyone else needs `any`.
fn authorize(
    event: &Event,
    actor: &AuthenticatedUser,
    own: Capability,
    any: Capability,
    action: &str,
) -> Result<(), EventError> {
    let caps = actor.capabilities();
    let access = authorize_owner_or(event, actor, any);
    access.log(action);
    if access.is_granted() && (caps.allows(own) || caps.allows(any)) {
        Ok(())
    } else {
        Err(EventError::forbidden(actor.id, action))
    }
}

/// Fails if the category or any tag does not exist.
async fn check_references(
    categories: &dyn CategoryRepository,
    tags: &dyn TagRepository,
    category_id: Option<CategoryId>,
    tag_ids: &[TagId],
) -> Result<(), EventError> {
    if let Some(id) = category_id {
        if categories.find_by_id(&id).await?.is_none() {
            return Err(EventError::CategoryNotFound(id));
        }
    }
    if let Some(missing) = tags.first_missing(tag_ids).await? {
        return Err(EventError::TagNotFound(missing));
    }
    Ok(())
}
