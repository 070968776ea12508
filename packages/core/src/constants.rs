use std::env;
use std::path::PathBuf;

/// Name of the per-user data directory
pub const TODO_DIR_NAME: &str = ".todo-list";

/// File name of the SQLite database inside the data directory
pub const DATABASE_FILE_NAME: &str = "todos.db";

/// Get the path to the data directory (~/.todo-list)
pub fn todo_dir() -> PathBuf {
    // HOME first so tests can redirect it
    if let Ok(home) = env::var("HOME") {
        PathBuf::from(home).join(TODO_DIR_NAME)
    } else {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(TODO_DIR_NAME)
    }
}

/// Get the default database path (~/.todo-list/todos.db)
pub fn default_database_path() -> PathBuf {
    todo_dir().join(DATABASE_FILE_NAME)
}
