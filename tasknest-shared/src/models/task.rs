/// Task model and database operations
///
/// Tasks belong to a user, optionally sit in one of the user's categories,
/// and may carry a deadline. Updates are merges: fields absent from an
/// update request keep their current value. The completion flag toggles
/// independently of everything else.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE tasks (
///     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
///     user_id UUID NOT NULL REFERENCES users(id) ON DELETE CASCADE,
///     category_id UUID REFERENCES categories(id) ON DELETE SET NULL,
///     title VARCHAR(255) NOT NULL,
///     description TEXT,
///     deadline TIMESTAMPTZ,
///     is_completed BOOLEAN NOT NULL DEFAULT FALSE,
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```
///
/// # Example
///
/// ```no_run
/// use tasknest_shared::models::task::{CreateTask, Task};
/// use chrono::Utc;
/// # use sqlx::PgPool;
/// # use uuid::Uuid;
///
/// # async fn example(pool: PgPool, user_id: Uuid) -> Result<(), sqlx::Error> {
/// let task = Task::create(
///     &pool,
///     CreateTask {
///         user_id,
///         category_id: None,
///         title: "File taxes".to_string(),
///         description: None,
///         deadline: Some(Utc::now()),
///     },
/// )
/// .await?;
///
/// assert!(!task.is_completed);
/// # Ok(())
/// # }
/// ```
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

/// A task record
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Task {
    /// Unique task id (UUID v4)
    pub id: Uuid,

    /// Owning user
    pub user_id: Uuid,

    /// Category, if the task is filed under one
    pub category_id: Option<Uuid>,

    /// Short title
    pub title: String,

    /// Free-form details
    pub description: Option<String>,

    /// When the task is due, if a deadline is set
    pub deadline: Option<DateTime<Utc>>,

    /// Completion flag; completed tasks are excluded from reminders
    pub is_completed: bool,

    /// When the task was created
    pub created_at: DateTime<Utc>,

    /// When the task was last updated
    pub updated_at: DateTime<Utc>,
}

/// Category fields attached to a task listing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskCategory {
    pub id: Uuid,
    pub name: String,
    pub color_code: Option<String>,
}

/// A task joined with its category for listing responses
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskWithCategory {
    #[serde(flatten)]
    pub task: Task,

    /// The owning category, if any
    pub category: Option<TaskCategory>,
}

/// Input for creating a task
#[derive(Debug, Clone)]
pub struct CreateTask {
    pub user_id: Uuid,
    pub category_id: Option<Uuid>,
    pub title: String,
    pub description: Option<String>,
    pub deadline: Option<DateTime<Utc>>,
}

/// Partial update for a task
///
/// `None` fields are left unchanged; an update is a merge, not a replace.
/// There is deliberately no way to clear a field back to NULL through this
/// path; that matches the wire protocol, where omitted fields mean "keep".
#[derive(Debug, Clone, Default)]
pub struct UpdateTask {
    pub title: Option<String>,
    pub description: Option<String>,
    pub deadline: Option<DateTime<Utc>>,
    pub category_id: Option<Uuid>,
}

impl UpdateTask {
    /// Whether the update changes anything at all
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.deadline.is_none()
            && self.category_id.is_none()
    }
}

/// A task due in the reminder window, joined with its owner's contact fields
///
/// Produced by [`Task::due_between`] for the daily deadline scan. `deadline`
/// is non-optional here: the query only matches tasks that have one.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct DueTask {
    /// Task id, for per-send logging
    pub id: Uuid,

    /// Task title, quoted in the reminder email
    pub title: String,

    /// The deadline that put this task in the window
    pub deadline: DateTime<Utc>,

    /// Owner's email address
    pub owner_email: String,

    /// Owner's display name
    pub owner_name: String,
}

/// Flat row shape for the task/category join
#[derive(Debug, sqlx::FromRow)]
struct TaskWithCategoryRow {
    id: Uuid,
    user_id: Uuid,
    category_id: Option<Uuid>,
    title: String,
    description: Option<String>,
    deadline: Option<DateTime<Utc>>,
    is_completed: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    category_name: Option<String>,
    category_color_code: Option<String>,
}

impl From<TaskWithCategoryRow> for TaskWithCategory {
    fn from(row: TaskWithCategoryRow) -> Self {
        let category = match (row.category_id, row.category_name) {
            (Some(id), Some(name)) => Some(TaskCategory {
                id,
                name,
                color_code: row.category_color_code,
            }),
            _ => None,
        };

        TaskWithCategory {
            task: Task {
                id: row.id,
                user_id: row.user_id,
                category_id: row.category_id,
                title: row.title,
                description: row.description,
                deadline: row.deadline,
                is_completed: row.is_completed,
                created_at: row.created_at,
                updated_at: row.updated_at,
            },
            category,
        }
    }
}

impl Task {
    /// Lists a user's tasks joined with their categories, newest first
    pub async fn list_by_user(
        pool: &PgPool,
        user_id: Uuid,
    ) -> Result<Vec<TaskWithCategory>, sqlx::Error> {
        let rows = sqlx::query_as::<_, TaskWithCategoryRow>(
            r#"
            SELECT t.id, t.user_id, t.category_id, t.title, t.description,
                   t.deadline, t.is_completed, t.created_at, t.updated_at,
                   c.name AS category_name, c.color_code AS category_color_code
            FROM tasks t
            LEFT JOIN categories c ON c.id = t.category_id
            WHERE t.user_id = $1
            ORDER BY t.created_at DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(pool)
        .await?;

        Ok(rows.into_iter().map(TaskWithCategory::from).collect())
    }

    /// Creates a new task
    pub async fn create(pool: &PgPool, data: CreateTask) -> Result<Self, sqlx::Error> {
        let task = sqlx::query_as::<_, Task>(
            r#"
            INSERT INTO tasks (user_id, category_id, title, description, deadline)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, user_id, category_id, title, description, deadline,
                      is_completed, created_at, updated_at
            "#,
        )
        .bind(data.user_id)
        .bind(data.category_id)
        .bind(data.title)
        .bind(data.description)
        .bind(data.deadline)
        .fetch_one(pool)
        .await?;

        Ok(task)
    }

    /// Finds a task by id
    pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Self>, sqlx::Error> {
        let task = sqlx::query_as::<_, Task>(
            r#"
            SELECT id, user_id, category_id, title, description, deadline,
                   is_completed, created_at, updated_at
            FROM tasks
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(task)
    }

    /// Applies a merge update; omitted fields keep their current value
    ///
    /// # Returns
    ///
    /// The updated task, or `None` if the id does not exist.
    pub async fn update(
        pool: &PgPool,
        id: Uuid,
        data: UpdateTask,
    ) -> Result<Option<Self>, sqlx::Error> {
        let task = sqlx::query_as::<_, Task>(
            r#"
            UPDATE tasks
            SET title = COALESCE($2, title),
                description = COALESCE($3, description),
                deadline = COALESCE($4, deadline),
                category_id = COALESCE($5, category_id),
                updated_at = NOW()
            WHERE id = $1
            RETURNING id, user_id, category_id, title, description, deadline,
                      is_completed, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(data.title)
        .bind(data.description)
        .bind(data.deadline)
        .bind(data.category_id)
        .fetch_optional(pool)
        .await?;

        Ok(task)
    }

    /// Sets the completion flag to an explicit value
    ///
    /// # Returns
    ///
    /// The updated task, or `None` if the id does not exist.
    pub async fn set_completed(
        pool: &PgPool,
        id: Uuid,
        is_completed: bool,
    ) -> Result<Option<Self>, sqlx::Error> {
        let task = sqlx::query_as::<_, Task>(
            r#"
            UPDATE tasks
            SET is_completed = $2, updated_at = NOW()
            WHERE id = $1
            RETURNING id, user_id, category_id, title, description, deadline,
                      is_completed, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(is_completed)
        .fetch_optional(pool)
        .await?;

        Ok(task)
    }

    /// Deletes a task
    ///
    /// # Returns
    ///
    /// `true` if a row was deleted.
    pub async fn delete(pool: &PgPool, id: Uuid) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM tasks WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Finds incomplete tasks with deadlines in `[start, end)`, joined with
    /// each owner's email and name
    ///
    /// The interval is half-open: a deadline exactly at `end` is excluded.
    /// Completed tasks never match regardless of deadline. This backs the
    /// daily reminder scan.
    pub async fn due_between(
        pool: &PgPool,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<DueTask>, sqlx::Error> {
        let due = sqlx::query_as::<_, DueTask>(
            r#"
            SELECT t.id, t.title, t.deadline,
                   u.email AS owner_email, u.name AS owner_name
            FROM tasks t
            JOIN users u ON u.id = t.user_id
            WHERE t.deadline >= $1
              AND t.deadline < $2
              AND t.is_completed = FALSE
            ORDER BY t.deadline
            "#,
        )
        .bind(start)
        .bind(end)
        .fetch_all(pool)
        .await?;

        Ok(due)
    }
}
