// ABOUTME: Database connection management for the todo list
// ABOUTME: Builds the SQLite pool and applies embedded migrations

use sqlx::sqlite::{
    SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous,
};
use sqlx::SqlitePool;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;
use tracing::{debug, info};

use crate::{StorageError, StorageResult};

/// Default number of pooled connections
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;

/// How long a writer waits on a locked database before giving up
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// How long a caller waits for a free pooled connection
const ACQUIRE_TIMEOUT: Duration = Duration::from_secs(30);

/// Connection settings for the SQLite backend
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    /// Database file; `None` uses `~/.todo-list/todos.db`
    pub path: Option<PathBuf>,
    pub max_connections: u32,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: None,
            max_connections: DEFAULT_MAX_CONNECTIONS,
        }
    }
}

impl DatabaseConfig {
    pub fn database_path(&self) -> PathBuf {
        self.path
            .clone()
            .unwrap_or_else(todo_core::default_database_path)
    }
}

/// Open (creating if needed) the database file, configure SQLite and run migrations
pub async fn connect(config: &DatabaseConfig) -> StorageResult<SqlitePool> {
    let database_path = config.database_path();

    // Ensure parent directory exists
    if let Some(parent) = database_path.parent() {
        if !parent.as_os_str().is_empty() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(StorageError::Io)?;
        }
    }

    debug!("Connecting to database: {}", database_path.display());

    let options = SqliteConnectOptions::new()
        .filename(&database_path)
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal)
        .synchronous(SqliteSynchronous::Normal)
        .foreign_keys(true)
        .busy_timeout(BUSY_TIMEOUT);

    let pool = SqlitePoolOptions::new()
        .max_connections(config.max_connections.max(1))
        .acquire_timeout(ACQUIRE_TIMEOUT)
        .connect_with(options)
        .await
        .map_err(StorageError::Sqlx)?;

    info!("Database connection established");

    run_migrations(&pool).await?;

    Ok(pool)
}

/// Single-connection in-memory database with migrations applied.
///
/// The connection is never recycled, since closing it would drop the data.
pub async fn connect_in_memory() -> StorageResult<SqlitePool> {
    let options = SqliteConnectOptions::from_str(":memory:")
        .map_err(StorageError::Sqlx)?
        .foreign_keys(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect_with(options)
        .await
        .map_err(StorageError::Sqlx)?;

    run_migrations(&pool).await?;

    Ok(pool)
}

/// Apply the embedded schema migrations
pub async fn run_migrations(pool: &SqlitePool) -> StorageResult<()> {
    sqlx::migrate!("./migrations")
        .run(pool)
        .await
        .map_err(StorageError::Migration)?;

    debug!("Database migrations completed");
    Ok(())
}
