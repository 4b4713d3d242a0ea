/// Category model and database operations
///
/// Categories are per-user, color-coded labels for tasks. Deleting a
/// category leaves its tasks in place with their `category_id` cleared
/// (FK `ON DELETE SET NULL`); tasks are never cascaded away with a label.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE categories (
///     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
///     user_id UUID NOT NULL REFERENCES users(id) ON DELETE CASCADE,
///     name VARCHAR(255) NOT NULL,
///     color_code VARCHAR(16)
/// );
/// ```
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

/// A user-owned task category
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Category {
    /// Unique category id (UUID v4)
    pub id: Uuid,

    /// Owning user
    pub user_id: Uuid,

    /// Display name
    pub name: String,

    /// Display color, e.g. "#e74c3c"
    pub color_code: Option<String>,
}

/// Input for creating a category
#[derive(Debug, Clone)]
pub struct CreateCategory {
    pub user_id: Uuid,
    pub name: String,
    pub color_code: Option<String>,
}

/// Partial update for a category
///
/// `None` fields are left unchanged.
#[derive(Debug, Clone, Default)]
pub struct UpdateCategory {
    pub name: Option<String>,
    pub color_code: Option<String>,
}

impl Category {
    /// Lists all categories owned by a user
    pub async fn list_by_user(pool: &PgPool, user_id: Uuid) -> Result<Vec<Self>, sqlx::Error> {
        let categories = sqlx::query_as::<_, Category>(
            r#"
            SELECT id, user_id, name, color_code
            FROM categories
            WHERE user_id = $1
            ORDER BY name
            "#,
        )
        .bind(user_id)
        .fetch_all(pool)
        .await?;

        Ok(categories)
    }

    /// Creates a new category
    pub async fn create(pool: &PgPool, data: CreateCategory) -> Result<Self, sqlx::Error> {
        let category = sqlx::query_as::<_, Category>(
            r#"
            INSERT INTO categories (user_id, name, color_code)
            VALUES ($1, $2, $3)
            RETURNING id, user_id, name, color_code
            "#,
        )
        .bind(data.user_id)
        .bind(data.name)
        .bind(data.color_code)
        .fetch_one(pool)
        .await?;

        Ok(category)
    }

    /// Applies a partial update; omitted fields keep their current value
    ///
    /// # Returns
    ///
    /// The updated category, or `None` if the id does not exist.
    pub async fn update(
        pool: &PgPool,
        id: Uuid,
        data: UpdateCategory,
    ) -> Result<Option<Self>, sqlx::Error> {
        let category = sqlx::query_as::<_, Category>(
            r#"
            UPDATE categories
            SET name = COALESCE($2, name),
                color_code = COALESCE($3, color_code)
            WHERE id = $1
            RETURNING id, user_id, name, color_code
            "#,
        )
        .bind(id)
        .bind(data.name)
        .bind(data.color_code)
        .fetch_optional(pool)
        .await?;

        Ok(category)
    }

    /// Deletes a category
    ///
    /// Tasks referencing it have their `category_id` set to NULL by the
    /// foreign key, not deleted.
    ///
    /// # Returns
    ///
    /// `true` if a row was deleted.
    pub async fn delete(pool: &PgPool, id: Uuid) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM categories WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
