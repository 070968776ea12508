// ABOUTME: HTTP request handlers for todo operations
// ABOUTME: Parses requests, calls the store, and wraps results in the envelope

use axum::{
    extract::{rejection::JsonRejection, rejection::PathRejection, Path, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use tracing::info;

use crate::db::DbState;
use crate::extract::JsonOrForm;
use crate::response::{ApiError, ApiResponse, ApiResult};
use todo_items::{PositionUpdate, TodoError};

type EnvelopeResponse = (StatusCode, Json<ApiResponse>);

fn todo_id(path: Result<Path<i64>, PathRejection>) -> ApiResult<i64> {
    path.map(|Path(id)| id)
        .map_err(|_| ApiError(TodoError::validation("Invalid todo id")))
}

fn json_body<T>(payload: Result<Json<T>, JsonRejection>) -> ApiResult<T> {
    payload
        .map(|Json(request)| request)
        .map_err(|_| ApiError::invalid_request())
}

/// List all todos
pub async fn list_todos(State(db): State<DbState>) -> ApiResult<EnvelopeResponse> {
    info!("Listing todos");

    let todos = db.todo_storage.list_todos().await?;
    Ok((
        StatusCode::OK,
        Json(ApiResponse::success("All Todos List").with_todos(todos)),
    ))
}

/// Get a single todo by ID
pub async fn get_todo(
    State(db): State<DbState>,
    path: Result<Path<i64>, PathRejection>,
) -> ApiResult<EnvelopeResponse> {
    let id = todo_id(path)?;
    info!("Getting todo: {}", id);

    let todo = db.todo_storage.get_todo(id).await?;
    Ok((
        StatusCode::OK,
        Json(ApiResponse::success("Todo found").with_todo(todo)),
    ))
}

/// Request body for creating a todo
#[derive(Deserialize)]
pub struct CreateTodoRequest {
    #[serde(rename = "new-list-item-text", alias = "description", default)]
    pub text: String,
}

/// Create a new todo at the end of the list
pub async fn create_todo(
    State(db): State<DbState>,
    JsonOrForm(request): JsonOrForm<CreateTodoRequest>,
) -> ApiResult<EnvelopeResponse> {
    info!("Creating todo");

    let todo = db.todo_storage.create_todo(&request.text).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success("Item added successfully").with_todo(todo)),
    ))
}

/// Request body for updating a todo's description
#[derive(Deserialize)]
pub struct UpdateTodoRequest {
    #[serde(default)]
    pub description: String,
}

/// Replace a todo's description
pub async fn update_todo(
    State(db): State<DbState>,
    path: Result<Path<i64>, PathRejection>,
    JsonOrForm(request): JsonOrForm<UpdateTodoRequest>,
) -> ApiResult<EnvelopeResponse> {
    let id = todo_id(path)?;
    info!("Updating todo: {}", id);

    let todo = db
        .todo_storage
        .update_description(id, &request.description)
        .await?;
    Ok((
        StatusCode::OK,
        Json(ApiResponse::success("Item updated successfully").with_todo(todo)),
    ))
}

/// Mark a todo as done
pub async fn mark_done(
    State(db): State<DbState>,
    path: Result<Path<i64>, PathRejection>,
) -> ApiResult<EnvelopeResponse> {
    let id = todo_id(path)?;
    info!("Marking todo as done: {}", id);

    db.todo_storage.mark_done(id).await?;
    Ok((StatusCode::OK, Json(ApiResponse::success("Item marked as done"))))
}

/// Request body for changing a todo's color
#[derive(Deserialize)]
pub struct UpdateColorRequest {
    #[serde(default)]
    pub color: String,
}

/// Set a todo's list color
pub async fn update_color(
    State(db): State<DbState>,
    path: Result<Path<i64>, PathRejection>,
    JsonOrForm(request): JsonOrForm<UpdateColorRequest>,
) -> ApiResult<EnvelopeResponse> {
    let id = todo_id(path)?;
    info!("Updating color of todo: {}", id);

    db.todo_storage.update_color(id, &request.color).await?;
    Ok((
        StatusCode::OK,
        Json(ApiResponse::success("Color updated successfully")),
    ))
}

/// Request body for reordering todos
#[derive(Deserialize)]
pub struct UpdatePositionsRequest {
    pub order: Option<Vec<PositionUpdate>>,
}

/// Apply a new ordering in one transaction
pub async fn update_positions(
    State(db): State<DbState>,
    payload: Result<Json<UpdatePositionsRequest>, JsonRejection>,
) -> ApiResult<EnvelopeResponse> {
    let order = json_body(payload)?
        .order
        .ok_or_else(ApiError::invalid_request)?;
    info!("Updating positions of {} todos", order.len());

    db.todo_storage.reorder(&order).await?;
    Ok((StatusCode::OK, Json(ApiResponse::success("Positions updated"))))
}

/// Delete a todo and renumber the ones after it
pub async fn delete_todo(
    State(db): State<DbState>,
    path: Result<Path<i64>, PathRejection>,
) -> ApiResult<EnvelopeResponse> {
    let id = todo_id(path)?;
    info!("Deleting todo: {}", id);

    db.todo_storage.delete_todo(id).await?;
    Ok((
        StatusCode::OK,
        Json(ApiResponse::success("Task deleted and positions updated")),
    ))
}
