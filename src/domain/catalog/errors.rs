//! Catalog error types.
//!
//! | Error | HTTP Status |
//! |-------|-------------|
//! | CategoryNotFound / TagNotFound | 404 |
//! | DuplicateName | 400 |
//! | CategoryInUse / TagInUse | 400 |
//! | ValidationFailed | 400 |
//! | Forbidden | 403 |
//! | Infrastructure | 500 |

use crate::domain::foundation::{CategoryId, DomainError, ErrorCode, TagId, ValidationError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    CategoryNotFound(CategoryId),
    TagNotFound(TagId),

    /// A category or tag with this name already exists.
    DuplicateName(String),

    /// Events still reference the category.
    CategoryInUse(CategoryId),

    /// Events still reference the tag.
    TagInUse(TagId),

    ValidationFailed { field: String, message: String },
    Forbidden,
    Infrastructure(String),
}

impl CatalogError {
    pub fn infrastructure(message: impl Into<String>) -> Self {
        CatalogError::Infrastructure(message.into())
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            CatalogError::CategoryNotFound(_) => ErrorCode::CategoryNotFound,
            CatalogError::TagNotFound(_) => ErrorCode::TagNotFound,
            CatalogError::DuplicateName(_) => ErrorCode::DuplicateName,
            CatalogError::CategoryInUse(_) | CatalogError::TagInUse(_) => {
                ErrorCode::ValidationFailed
            }
            CatalogError::ValidationFailed { .. } => ErrorCode::ValidationFailed,
            CatalogError::Forbidden => ErrorCode::Forbidden,
            CatalogError::Infrastructure(_) => ErrorCode::DatabaseError,
        }
    }

    pub fn message(&self) -> String {
        match self {
            CatalogError::CategoryNotFound(id) => format!("Category not found with id of {}", id),
            CatalogError::TagNotFound(id) => format!("Tag with id {} not found", id),
            CatalogError::DuplicateName(name) => format!("Duplicate field value entered: {}", name),
            CatalogError::CategoryInUse(_) => {
                "Cannot delete a category that is assigned to events".to_string()
            }
            CatalogError::TagInUse(_) => "Cannot delete a tag that is assigned to events".to_string(),
            CatalogError::ValidationFailed { message, .. } => message.clone(),
            CatalogError::Forbidden => "Not authorized to manage the catalog".to_string(),
            CatalogError::Infrastructure(msg) => format!("Error: {}", msg),
        }
    }
}

impl std::fmt::Display for CatalogError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for CatalogError {}

impl From<ValidationError> for CatalogError {
    fn from(err: ValidationError) -> Self {
        CatalogError::ValidationFailed {
            field: err.field().to_string(),
            message: err.to_string(),
        }
    }
}

impl From<DomainError> for CatalogError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::DuplicateName => {
                CatalogError::DuplicateName(err.detail("name").unwrap_or("name").to_string())
            }
            _ => CatalogError::Infrastructure(err.to_string()),
        }
    }
}
