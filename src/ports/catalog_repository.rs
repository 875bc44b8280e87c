//! Category and tag repository ports.

use async_trait::async_trait;

use crate::domain::catalog::{Category, Tag};
use crate::domain::foundation::{CategoryId, DomainError, TagId};

#[async_trait]
pub trait CategoryRepository: Send + Sync {
    /// # Errors
    ///
    /// - `DuplicateName` if the name is taken
    async fn save(&self, category: &Category) -> Result<(), DomainError>;

    async fn find_by_id(&self, id: &CategoryId) -> Result<Option<Category>, DomainError>;

    /// All categories ordered by name.
    async fn list(&self) -> Result<Vec<Category>, DomainError>;

    async fn delete(&self, id: &CategoryId) -> Result<(), DomainError>;
}

#[async_trait]
pub trait TagRepository: Send + Sync {
    /// # Errors
    ///
    /// - `DuplicateName` if the name is taken
    async fn save(&self, tag: &Tag) -> Result<(), DomainError>;

    async fn find_by_id(&self, id: &TagId) -> Result<Option<Tag>, DomainError>;

    /// Returns the first id in `ids` with no stored tag, if any.
    async fn first_missing(&self, ids: &[TagId]) -> Result<Option<TagId>, DomainError>;

    /// All tags ordered by name.
    async fn list(&self) -> Result<Vec<Tag>, DomainError>;

    async fn delete(&self, id: &TagId) -> Result<(), DomainError>;
}
