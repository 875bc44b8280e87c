use std::sync::Arc;

use crate::domain::access::Capability;
use crate::domain::catalog::{CatalogError, Category};
use crate::domain::foundation::{AuthenticatedUser, CategoryId};
use crate::ports::{CategoryRepository, EventRepository};

#[derive(Debug, Clone)]
pub struct CreateCategoryCommand {
    pub actor: AuthenticatedUser,
    pub name: String,
}

#[derive(Debug, Clone)]
pub struct DeleteCategoryCommand {
    pub actor: AuthenticatedUser,
    pub category_id: CategoryId,
}

pub struct CategoryHandler {
    categories: Arc<dyn CategoryRepository>,
    events: Arc<dyn EventRepository>,
}

impl CategoryHandler {
    pub fn new(categories: Arc<dyn CategoryRepository>, events: Arc<dyn EventRepository>) -> Self {
        Self { categories, events }
    }

    pub async fn list(&self) -> Result<Vec<Category>, CatalogError> {
        Ok(self.categories.list().await?)
    }

    pub async fn create(&self, cmd: CreateCategoryCommand) -> Result<Category, CatalogError> {
        if !cmd.actor.capabilities().allows(Capability::ManageCategories) {
            return Err(CatalogError::Forbidden);
        }
        let category = Category::new(&cmd.name)?;
        self.categories.save(&category).await?;
        tracing::info!(category_id = %category.id, name = %category.name, "category created");
        Ok(category)
    }

    pub async fn delete(&self, cmd: DeleteCategoryCommand) -> Result<(), CatalogError> {
        if !cmd.actor.capabilities().allows(Capability::ManageCategories) {
            return Err(CatalogError::Forbidden);
        }
        if self.categories.find_by_id(&cmd.category_id).await?.is_none() {
            return Err(CatalogError::CategoryNotFound(cmd.category_id));
        }
        if self.events.any_with_category(&cmd.category_id).await? {
            return Err(CatalogError::CategoryInUse(cmd.category_id));
        }
        self.categories.delete(&cmd.category_id).await?;
        tracing::info!(category_id = %cmd.category_id, "category deleted");
        Ok(())
    }
}
