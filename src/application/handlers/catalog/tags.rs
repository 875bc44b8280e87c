use std::sync::Arc;

use crate::domain::access::Capability;
use crate::domain::catalog::{CatalogError, Tag};
use crate::domain::foundation::{AuthenticatedUser, TagId};
use crate::ports::{EventRepository, TagRepository};

#[derive(Debug, Clone)]
pub struct CreateTagCommand {
    pub actor: AuthenticatedUser,
    pub name: String,
    pub color: Option<String>,
}

#[derive(Debug, Clone)]
pub struct DeleteTagCommand {
    pub actor: AuthenticatedUser,
    pub tag_id: TagId,
}

pub struct TagHandler {
    tags: Arc<dyn TagRepository>,
    events: Arc<dyn EventRepository>,
}

impl TagHandler {
    pub fn new(tags: Arc<dyn TagRepository>, events: Arc<dyn EventRepository>) -> Self {
        Self { tags, events }
    }

    pub async fn list(&self) -> Result<Vec<Tag>, CatalogError> {
        Ok(self.tags.list().await?)
    }

    pub async fn create(&self, cmd: CreateTagCommand) -> Result<Tag, CatalogError> {
        if !cmd.actor.capabilities().allows(Capability::ManageTags) {
            return Err(CatalogError::Forbidden);
        }
        let tag = Tag::new(&cmd.name, cmd.color.as_deref(), Some(cmd.actor.id))?;
        self.tags.save(&tag).await?;
        tracing::info!(tag_id = %tag.id, name = %tag.name, "tag created");
        Ok(tag)
    }

    pub async fn delete(&self, cmd: DeleteTagCommand) -> Result<(), CatalogError> {
        if !cmd.actor.capabilities().allows(Capability::ManageTags) {
            return Err(CatalogError::Forbidden);
        }
        if self.tags.find_by_id(&cmd.tag_id).await?.is_none() {
            return Err(CatalogError::TagNotFound(cmd.tag_id));
        }
        if self.events.any_with_tag(&cmd.tag_id).await? {
            return Err(CatalogError::TagInUse(cmd.tag_id));
        }
        self.tags.delete(&cmd.tag_id).await?;
        tracing::info!(tag_id = %cmd.tag_id, "tag deleted");
        Ok(())
    }
}
