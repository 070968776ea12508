// ABOUTME: HTTP API layer for the todo list providing REST endpoints and routing
// ABOUTME: Maps requests onto the ordered item store and wraps results in the envelope

use axum::{
    routing::{get, put},
    Router,
};

pub mod db;
pub mod extract;
pub mod health;
pub mod response;
pub mod todos_handlers;

pub use db::DbState;
pub use response::{ApiResponse, ResponseStatus};

/// Creates the todos API router (nested under /api/todos)
pub fn create_todos_router() -> Router<DbState> {
    Router::new()
        .route(
            "/",
            get(todos_handlers::list_todos).post(todos_handlers::create_todo),
        )
        .route("/positions", put(todos_handlers::update_positions))
        .route(
            "/{id}",
            get(todos_handlers::get_todo)
                .put(todos_handlers::update_todo)
                .delete(todos_handlers::delete_todo),
        )
        .route("/{id}/done", put(todos_handlers::mark_done))
        .route("/{id}/color", put(todos_handlers::update_color))
}

/// Creates the full application router with state attached
pub fn create_router(db: DbState) -> Router {
    Router::new()
        .route("/api/health", get(health::health_check))
        .nest("/api/todos", create_todos_router())
        .with_state(db)
}
