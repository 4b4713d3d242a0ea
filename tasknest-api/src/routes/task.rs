/// Task endpoints
///
/// Per-user CRUD for tasks plus the completion toggle. Updates are merges:
/// fields absent from the request keep their current value.
///
/// # Endpoints
///
/// - `GET /v1/task/get/:user_id` - List a user's tasks with their categories
/// - `POST /v1/task/create/:user_id` - Create a task
/// - `PUT /v1/task/update/:id` - Merge-update a task
/// - `PUT /v1/task/toggleStatus/:id` - Set the completion flag
/// - `DELETE /v1/task/delete/:id` - Delete a task
use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tasknest_shared::models::task::{CreateTask, Task, TaskWithCategory, UpdateTask};
use uuid::Uuid;
use validator::Validate;

/// Create task request
#[derive(Debug, Deserialize, Validate)]
pub struct CreateTaskRequest {
    /// Short title
    #[validate(length(min = 1, max = 255, message = "Title must be 1-255 characters"))]
    pub title: String,

    /// Free-form details
    pub description: Option<String>,

    /// Deadline, if the task has one
    pub deadline: Option<DateTime<Utc>>,

    /// Category to file the task under
    pub category_id: Option<Uuid>,
}

/// Update task request; omitted fields keep their current value
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateTaskRequest {
    #[validate(length(min = 1, max = 255, message = "Title must be 1-255 characters"))]
    pub title: Option<String>,
    pub description: Option<String>,
    pub deadline: Option<DateTime<Utc>>,
    pub category_id: Option<Uuid>,
}

/// Completion toggle request
///
/// An absent flag means "not completed"; the wire protocol coerces the
/// value to a plain bool.
#[derive(Debug, Deserialize)]
pub struct ToggleStatusRequest {
    #[serde(default)]
    pub is_completed: bool,
}

/// Task list response
#[derive(Debug, Serialize)]
pub struct TaskListResponse {
    pub success: bool,
    pub tasks: Vec<TaskWithCategory>,
}

/// Single-task response
#[derive(Debug, Serialize)]
pub struct TaskResponse {
    pub success: bool,
    pub message: String,
    pub task: Task,
}

/// Plain success envelope
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub success: bool,
    pub message: String,
}

/// Lists a user's tasks joined with their categories, newest first
pub async fn list_tasks(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> ApiResult<Json<TaskListResponse>> {
    let tasks = Task::list_by_user(&state.db, user_id).await?;

    Ok(Json(TaskListResponse {
        success: true,
        tasks,
    }))
}

/// Creates a task for a user
///
/// # Errors
///
/// - `422 Unprocessable Entity`: validation failed
/// - `500 Internal Server Error`: unknown user (FK violation surfaces here)
pub async fn create_task(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
    Json(req): Json<CreateTaskRequest>,
) -> ApiResult<(StatusCode, Json<TaskResponse>)> {
    req.validate()?;

    let task = Task::create(
        &state.db,
        CreateTask {
            user_id,
            category_id: req.category_id,
            title: req.title,
            description: req.description,
            deadline: req.deadline,
        },
    )
    .await?;

    Ok((
        StatusCode::CREATED,
        Json(TaskResponse {
            success: true,
            message: "Task created".to_string(),
            task,
        }),
    ))
}

/// Merge-updates a task; omitted fields keep their current value
///
/// # Errors
///
/// - `404 Not Found`: unknown task id
pub async fn update_task(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateTaskRequest>,
) -> ApiResult<Json<TaskResponse>> {
    req.validate()?;

    let task = Task::update(
        &state.db,
        id,
        UpdateTask {
            title: req.title,
            description: req.description,
            deadline: req.deadline,
            category_id: req.category_id,
        },
    )
    .await?
    .ok_or_else(|| ApiError::NotFound("Task not found".to_string()))?;

    Ok(Json(TaskResponse {
        success: true,
        message: "Task updated".to_string(),
        task,
    }))
}

/// Sets the completion flag from the request body
///
/// # Errors
///
/// - `404 Not Found`: unknown task id
pub async fn toggle_status(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<ToggleStatusRequest>,
) -> ApiResult<Json<TaskResponse>> {
    let task = Task::set_completed(&state.db, id, req.is_completed)
        .await?
        .ok_or_else(|| ApiError::NotFound("Task not found".to_string()))?;

    Ok(Json(TaskResponse {
        success: true,
        message: "Task status updated".to_string(),
        task,
    }))
}

/// Deletes a task
///
/// # Errors
///
/// - `404 Not Found`: unknown task id
pub async fn delete_task(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<MessageResponse>> {
    let deleted = Task::delete(&state.db, id).await?;
    if !deleted {
        return Err(ApiError::NotFound("Task not found".to_string()));
    }

    Ok(Json(MessageResponse {
        success: true,
        message: "Task deleted".to_string(),
    }))
}
