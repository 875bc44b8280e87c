//! PostgreSQL implementations of CategoryRepository and TagRepository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::catalog::{Category, Tag};
use crate::domain::foundation::{CategoryId, DomainError, ErrorCode, TagId, Timestamp, UserId};
use crate::ports::{CategoryRepository, TagRepository};

pub struct PostgresCategoryRepository {
    pool: PgPool,
}

impl PostgresCategoryRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

pub struct PostgresTagRepository {
    pool: PgPool,
}

impl PostgresTagRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct CategoryRow {
    id: Uuid,
    name: String,
    slug: String,
    is_active: bool,
    created_at: DateTime<Utc>,
}

impl From<CategoryRow> for Category {
    fn from(row: CategoryRow) -> Self {
        Category {
            id: CategoryId::from_uuid(row.id),
            name: row.name,
            slug: row.slug,
            is_active: row.is_active,
            created_at: Timestamp::from_datetime(row.created_at),
        }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct TagRow {
    id: Uuid,
    name: String,
    slug: String,
    color: String,
    created_by: Option<Uuid>,
    is_active: bool,
    created_at: DateTime<Utc>,
}

impl From<TagRow> for Tag {
    fn from(row: TagRow) -> Self {
        Tag {
            id: TagId::from_uuid(row.id),
            name: row.name,
            slug: row.slug,
            color: row.color,
            created_by: row.created_by.map(UserId::from_uuid),
            is_active: row.is_active,
            created_at: Timestamp::from_datetime(row.created_at),
        }
    }
}

/// Maps the case-insensitive name indexes onto `DuplicateName`.
fn insert_error(context: &str, name: &str, err: sqlx::Error) -> DomainError {
    if let sqlx::Error::Database(ref db_err) = err {
        if matches!(
            db_err.constraint(),
            Some("categories_name_key") | Some("tags_name_key")
        ) {
            return DomainError::new(ErrorCode::DuplicateName, format!("Duplicate name: {}", name))
                .with_detail("name", name);
        }
    }
    DomainError::database(context, err)
}

#[async_trait]
impl CategoryRepository for PostgresCategoryRepository {
    async fn save(&self, category: &Category) -> Result<(), DomainError> {
        sqlx::query(
            "INSERT INTO categories (id, name, slug, is_active, created_at) VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(category.id.as_uuid())
        .bind(&category.name)
        .bind(&category.slug)
        .bind(category.is_active)
        .bind(category.created_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| insert_error("Failed to save category", &category.name, e))?;

        Ok(())
    }

    async fn find_by_id(&self, id: &CategoryId) -> Result<Option<Category>, DomainError> {
        let row: Option<CategoryRow> = sqlx::query_as(
            "SELECT id, name, slug, is_active, created_at FROM categories WHERE id = $1",
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to find category", e))?;

        Ok(row.map(Category::from))
    }

    async fn list(&self) -> Result<Vec<Category>, DomainError> {
        let rows: Vec<CategoryRow> = sqlx::query_as(
            "SELECT id, name, slug, is_active, created_at FROM categories ORDER BY name",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to list categories", e))?;

        Ok(rows.into_iter().map(Category::from).collect())
    }

    async fn delete(&self, id: &CategoryId) -> Result<(), DomainError> {
        let result = sqlx::query("DELETE FROM categories WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::database("Failed to delete category", e))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(
                ErrorCode::CategoryNotFound,
                format!("Category not found: {}", id),
            ));
        }
        Ok(())
    }
}

#[async_trait]
impl TagRepository for PostgresTagRepository {
    async fn save(&self, tag: &Tag) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO tags (id, name, slug, color, created_by, is_active, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(tag.id.as_uuid())
        .bind(&tag.name)
        .bind(&tag.slug)
        .bind(&tag.color)
        .bind(tag.created_by.map(|u| *u.as_uuid()))
        .bind(tag.is_active)
        .bind(tag.created_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| insert_error("Failed to save tag", &tag.name, e))?;

        Ok(())
    }

    async fn find_by_id(&self, id: &TagId) -> Result<Option<Tag>, DomainError> {
        let row: Option<TagRow> = sqlx::query_as(
            "SELECT id, name, slug, color, created_by, is_active, created_at FROM tags WHERE id = $1",
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to find tag", e))?;

        Ok(row.map(Tag::from))
    }

    async fn first_missing(&self, ids: &[TagId]) -> Result<Option<TagId>, DomainError> {
        if ids.is_empty() {
            return Ok(None);
        }
        let uuids: Vec<Uuid> = ids.iter().map(|id| *id.as_uuid()).collect();
        let found: Vec<Uuid> = sqlx::query_scalar("SELECT id FROM tags WHERE id = ANY($1)")
            .bind(uuids)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| DomainError::database("Failed to check tags", e))?;

        Ok(ids.iter().find(|id| !found.contains(id.as_uuid())).copied())
    }

    async fn list(&self) -> Result<Vec<Tag>, DomainError> {
        let rows: Vec<TagRow> = sqlx::query_as(
            "SELECT id, name, slug, color, created_by, is_active, created_at FROM tags ORDER BY name",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to list tags", e))?;

        Ok(rows.into_iter().map(Tag::from).collect())
    }

    async fn delete(&self, id: &TagId) -> Result<(), DomainError> {
        let result = sqlx::query("DELETE FROM tags WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::database("Failed to delete tag", e))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(
                ErrorCode::TagNotFound,
                format!("Tag not found: {}", id),
            ));
        }
        Ok(())
    }
}
