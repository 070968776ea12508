// ABOUTME: Response envelope and error mapping for the todo API
// ABOUTME: Every endpoint answers with {status, message, [todo|todos]}

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json as ResponseJson, Response},
};
use serde::Serialize;
use tracing::{error, info};

use todo_items::{TodoError, TodoItem};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseStatus {
    Success,
    Error,
}

/// Standard API response envelope
#[derive(Debug, Serialize)]
pub struct ApiResponse {
    pub status: ResponseStatus,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub todo: Option<TodoItem>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub todos: Option<Vec<TodoItem>>,
}

impl ApiResponse {
    pub fn success(message: impl Into<String>) -> Self {
        ApiResponse {
            status: ResponseStatus::Success,
            message: message.into(),
            todo: None,
            todos: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        ApiResponse {
            status: ResponseStatus::Error,
            message: message.into(),
            todo: None,
            todos: None,
        }
    }

    pub fn with_todo(mut self, todo: TodoItem) -> Self {
        self.todo = Some(todo);
        self
    }

    pub fn with_todos(mut self, todos: Vec<TodoItem>) -> Self {
        self.todos = Some(todos);
        self
    }
}

/// Handler error: a store error rendered as an envelope with its HTTP status
#[derive(Debug)]
pub struct ApiError(pub TodoError);

/// Result type alias for API handlers
pub type ApiResult<T> = Result<T, ApiError>;

impl ApiError {
    pub fn invalid_request() -> Self {
        Self(TodoError::validation("Invalid request"))
    }

    pub fn status_code(&self) -> StatusCode {
        match &self.0 {
            TodoError::Validation(_) => StatusCode::BAD_REQUEST,
            TodoError::NotFound(_) => StatusCode::NOT_FOUND,
            TodoError::Persistence(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<TodoError> for ApiError {
    fn from(err: TodoError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        match &self.0 {
            TodoError::Persistence(cause) => {
                error!(error = %cause, "Storage operation failed");
            }
            other => {
                info!(status = %status, error = %other, "API error response");
            }
        }

        (status, ResponseJson(ApiResponse::error(self.0.to_string()))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            ApiError(TodoError::validation("x")).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError(TodoError::not_found("x")).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError(TodoError::persistence("x")).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            ApiError::invalid_request().0,
            TodoError::Validation("Invalid request".to_string())
        );
    }

    #[test]
    fn test_envelope_omits_absent_payload() {
        let value = serde_json::to_value(ApiResponse::success("Positions updated")).unwrap();
        assert_eq!(
            value,
            json!({"status": "success", "message": "Positions updated"})
        );
    }

    #[test]
    fn test_envelope_carries_todo() {
        let todo = TodoItem {
            id: 3,
            description: "buy milk".to_string(),
            is_done: false,
            item_position: 1,
            list_color: None,
        };
        let value =
            serde_json::to_value(ApiResponse::success("Item added successfully").with_todo(todo))
                .unwrap();

        assert_eq!(value["status"], "success");
        assert_eq!(value["todo"]["id"], 3);
        assert!(value.get("todos").is_none());
    }
}
