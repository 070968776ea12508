// ABOUTME: Core paths and constants for the todo list server
// ABOUTME: Foundational package shared by storage and the CLI

pub mod constants;

// Re-export constants
pub use constants::{default_database_path, todo_dir, DATABASE_FILE_NAME, TODO_DIR_NAME};
