use async_trait::async_trait;

use crate::domain::catalog::{Category, Tag};
use crate::domain::foundation::{CategoryId, DomainError, ErrorCode, TagId};
use crate::ports::{CategoryRepository, TagRepository};

use super::InMemoryStore;

fn duplicate(name: &str) -> DomainError {
    DomainError::new(ErrorCode::DuplicateName, format!("Duplicate name: {}", name))
        .with_detail("name", name)
}

#[async_trait]
impl CategoryRepository for InMemoryStore {
    async fn save(&self, category: &Category) -> Result<(), DomainError> {
        let mut state = self.state.write().await;
        if state
            .categories
            .values()
            .any(|c| c.name.eq_ignore_ascii_case(&category.name))
        {
            return Err(duplicate(&category.name));
        }
        state.categories.insert(category.id, category.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &CategoryId) -> Result<Option<Category>, DomainError> {
        Ok(self.state.read().await.categories.get(id).cloned())
    }

    async fn list(&self) -> Result<Vec<Category>, DomainError> {
        let state = self.state.read().await;
        let mut categories: Vec<Category> = state.categories.values().cloned().collect();
        categories.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(categories)
    }

    async fn delete(&self, id: &CategoryId) -> Result<(), DomainError> {
        let mut state = self.state.write().await;
        state.categories.remove(id).map(|_| ()).ok_or_else(|| {
            DomainError::new(ErrorCode::CategoryNotFound, format!("Category not found: {}", id))
        })
    }
}

#[async_trait]
impl TagRepository for InMemoryStore {
    async fn save(&self, tag: &Tag) -> Result<(), DomainError> {
        let mut state = self.state.write().await;
        if state
            .tags
            .values()
            .any(|t| t.name.eq_ignore_ascii_case(&tag.name))
        {
            return Err(duplicate(&tag.name));
        }
        state.tags.insert(tag.id, tag.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &TagId) -> Result<Option<Tag>, DomainError> {
        Ok(self.state.read().await.tags.get(id).cloned())
    }

    async fn first_missing(&self, ids: &[TagId]) -> Result<Option<TagId>, DomainError> {
        let state = self.state.read().await;
        Ok(ids.iter().find(|id| !state.tags.contains_key(id)).copied())
    }

    async fn list(&self) -> Result<Vec<Tag>, DomainError> {
        let state = self.state.read().await;
        let mut tags: Vec<Tag> = state.tags.values().cloned().collect();
        tags.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(tags)
    }

    async fn delete(&self, id: &TagId) -> Result<(), DomainError> {
        let mut state = self.state.write().await;
        state.tags.remove(id).map(|_| ()).ok_or_else(|| {
            DomainError::new(ErrorCode::TagNotFound, format!("Tag not found: {}", id))
        })
    }
}
