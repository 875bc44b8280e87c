use serde::{Deserialize, Serialize};

use crate::domain::foundation::{slugify, CategoryId, Timestamp, ValidationError};

pub const CATEGORY_NAME_MAX_LEN: usize = 50;

/// Event category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    pub slug: String,
    pub is_active: bool,
    pub created_at: Timestamp,
}

impl Category {
    pub fn new(name: &str) -> Result<Self, ValidationError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ValidationError::empty_field("name"));
        }
        if name.chars().count() > CATEGORY_NAME_MAX_LEN {
            return Err(ValidationError::too_long("name", CATEGORY_NAME_MAX_LEN));
        }
        Ok(Self {
            id: CategoryId::new(),
            name: name.to_string(),
            slug: slugify(name),
            is_active: true,
            created_at: Timestamp::now(),
        })
    }
}
