// ABOUTME: Shared state handed to API handlers
// ABOUTME: Holds the todo store built on the SQLite pool

use sqlx::SqlitePool;
use std::sync::Arc;
use todo_items::TodoStorage;
use todo_storage::{DatabaseConfig, StorageError};

/// Shared database state for API handlers
#[derive(Clone)]
pub struct DbState {
    pub todo_storage: Arc<TodoStorage>,
}

impl DbState {
    /// Create new database state from a SQLite pool
    pub fn new(pool: SqlitePool) -> Self {
        let todo_storage = Arc::new(TodoStorage::new(pool));
        Self { todo_storage }
    }

    /// Connect to the configured database file and run migrations
    pub async fn init(config: &DatabaseConfig) -> Result<Self, StorageError> {
        let pool = todo_storage::connect(config).await?;
        Ok(Self::new(pool))
    }

    /// In-memory database, used by tests and throwaway servers
    pub async fn in_memory() -> Result<Self, StorageError> {
        let pool = todo_storage::connect_in_memory().await?;
        Ok(Self::new(pool))
    }
}
