/// Category endpoints
///
/// Per-user CRUD for task categories.
///
/// # Endpoints
///
/// - `GET /v1/category/get/:user_id` - List a user's categories
/// - `POST /v1/category/create/:user_id` - Create a category
/// - `PUT /v1/category/update/:id` - Merge-update a category
/// - `DELETE /v1/category/delete/:id` - Delete a category
use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use tasknest_shared::models::category::{Category, CreateCategory, UpdateCategory};
use uuid::Uuid;
use validator::Validate;

/// Create category request
#[derive(Debug, Deserialize, Validate)]
pub struct CreateCategoryRequest {
    /// Display name
    #[validate(length(min = 1, max = 255, message = "Name must be 1-255 characters"))]
    pub name: String,

    /// Display color, e.g. "#e74c3c"
    pub color_code: Option<String>,
}

/// Update category request; omitted fields keep their current value
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateCategoryRequest {
    #[validate(length(min = 1, max = 255, message = "Name must be 1-255 characters"))]
    pub name: Option<String>,
    pub color_code: Option<String>,
}

/// Category list response
#[derive(Debug, Serialize)]
pub struct CategoryListResponse {
    pub success: bool,
    pub categories: Vec<Category>,
}

/// Single-category response
#[derive(Debug, Serialize)]
pub struct CategoryResponse {
    pub success: bool,
    pub message: String,
    pub category: Category,
}

/// Plain success envelope
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub success: bool,
    pub message: String,
}

/// Lists all categories owned by a user, ordered by name
pub async fn list_categories(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> ApiResult<Json<CategoryListResponse>> {
    let categories = Category::list_by_user(&state.db, user_id).await?;

    Ok(Json(CategoryListResponse {
        success: true,
        categories,
    }))
}

/// Creates a category for a user
///
/// # Errors
///
/// - `422 Unprocessable Entity`: validation failed
/// - `500 Internal Server Error`: unknown user (FK violation surfaces here)
pub async fn create_category(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
    Json(req): Json<CreateCategoryRequest>,
) -> ApiResult<(StatusCode, Json<CategoryResponse>)> {
    req.validate()?;

    let category = Category::create(
        &state.db,
        CreateCategory {
            user_id,
            name: req.name,
            color_code: req.color_code,
        },
    )
    .await?;

    Ok((
        StatusCode::CREATED,
        Json(CategoryResponse {
            success: true,
            message: "Category created".to_string(),
            category,
        }),
    ))
}

/// Merge-updates a category; omitted fields keep their current value
///
/// # Errors
///
/// - `404 Not Found`: unknown category id
pub async fn update_category(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateCategoryRequest>,
) -> ApiResult<Json<CategoryResponse>> {
    req.validate()?;

    let category = Category::update(
        &state.db,
        id,
        UpdateCategory {
            name: req.name,
            color_code: req.color_code,
        },
    )
    .await?
    .ok_or_else(|| ApiError::NotFound("Category not found".to_string()))?;

    Ok(Json(CategoryResponse {
        success: true,
        message: "Category updated".to_string(),
        category,
    }))
}

/// Deletes a category
///
/// Tasks filed under it are detached, not deleted.
///
/// # Errors
///
/// - `404 Not Found`: unknown category id
pub async fn delete_category(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<MessageResponse>> {
    let deleted = Category::delete(&state.db, id).await?;
    if !deleted {
        return Err(ApiError::NotFound("Category not found".to_string()));
    }

    Ok(Json(MessageResponse {
        success: true,
        message: "Category deleted".to_string(),
    }))
}
