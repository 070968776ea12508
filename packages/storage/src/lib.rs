// ABOUTME: Data layer and persistence for the todo list server
// ABOUTME: Provides the SQLite pool, embedded migrations, and storage errors

use thiserror::Error;

pub mod db;

pub use db::{connect, connect_in_memory, run_migrations, DatabaseConfig};

/// Storage errors
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
    #[error("Sqlx error: {0}")]
    Sqlx(#[from] sqlx::Error),
}

pub type StorageResult<T> = Result<T, StorageError>;
