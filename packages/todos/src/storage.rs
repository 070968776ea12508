// ABOUTME: Todo item storage layer using SQLite
// ABOUTME: Every mutation runs in one transaction and keeps positions dense

use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqliteConnection, SqlitePool};
use tracing::{debug, error};

use crate::error::{TodoError, TodoResult};
use crate::types::{PositionUpdate, TodoItem};

const TODO_NOT_FOUND: &str = "Todo not found";
const ITEM_NOT_FOUND: &str = "Item not found";

pub struct TodoStorage {
    pool: SqlitePool,
}

impl TodoStorage {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// List all items in position order
    pub async fn list_todos(&self) -> TodoResult<Vec<TodoItem>> {
        debug!("Fetching all todos");

        let rows = sqlx::query("SELECT * FROM todo_list ORDER BY item_position, id")
            .fetch_all(&self.pool)
            .await?;

        rows.iter().map(row_to_todo).collect()
    }

    /// Get a single item by ID
    pub async fn get_todo(&self, id: i64) -> TodoResult<TodoItem> {
        debug!("Fetching todo: {}", id);

        let mut conn = self.pool.acquire().await?;
        find_todo(&mut conn, id)
            .await?
            .ok_or_else(|| TodoError::not_found(TODO_NOT_FOUND))
    }

    /// Create a new item at the end of the list.
    ///
    /// The next position is computed inside the INSERT itself, so SQLite's
    /// write lock serializes concurrent creates and no two of them can read
    /// the same maximum.
    pub async fn create_todo(&self, description: &str) -> TodoResult<TodoItem> {
        let description = require_text(description, "Description cannot be empty")?;

        debug!("Creating todo: {}", description);

        let mut tx = self.pool.begin().await?;

        let result = sqlx::query(
            r#"
            INSERT INTO todo_list (description, is_done, item_position)
            SELECT ?, 0, COALESCE(MAX(item_position), 0) + 1
            FROM todo_list
            "#,
        )
        .bind(description)
        .execute(&mut *tx)
        .await?;

        let todo = find_todo(&mut tx, result.last_insert_rowid())
            .await?
            .ok_or_else(|| TodoError::persistence("Created item could not be read back"))?;

        tx.commit().await?;

        debug!("Created todo {} at position {}", todo.id, todo.item_position);
        Ok(todo)
    }

    /// Replace an item's description
    pub async fn update_description(&self, id: i64, new_text: &str) -> TodoResult<TodoItem> {
        let new_text = require_text(new_text, "Description cannot be empty")?;

        debug!("Updating description of todo: {}", id);

        let mut tx = self.pool.begin().await?;
        ensure_exists(&mut tx, id, TODO_NOT_FOUND).await?;

        let result = sqlx::query("UPDATE todo_list SET description = ? WHERE id = ?")
            .bind(new_text)
            .bind(id)
            .execute(&mut *tx)
            .await?;

        if result.rows_affected() == 0 {
            return Err(TodoError::persistence("Failed to update item"));
        }

        let todo = find_todo(&mut tx, id)
            .await?
            .ok_or_else(|| TodoError::persistence("Failed to update item"))?;

        tx.commit().await?;
        Ok(todo)
    }

    /// Mark an item as done. Marking a done item again still succeeds.
    pub async fn mark_done(&self, id: i64) -> TodoResult<()> {
        debug!("Marking todo as done: {}", id);

        let mut tx = self.pool.begin().await?;
        ensure_exists(&mut tx, id, TODO_NOT_FOUND).await?;

        let result = sqlx::query("UPDATE todo_list SET is_done = 1 WHERE id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        if result.rows_affected() == 0 {
            return Err(TodoError::persistence("Failed to update"));
        }

        tx.commit().await?;
        Ok(())
    }

    /// Set an item's list color
    pub async fn update_color(&self, id: i64, color: &str) -> TodoResult<()> {
        let color = require_text(color, "Color cannot be empty")?;

        debug!("Updating color of todo {} to {}", id, color);

        let mut tx = self.pool.begin().await?;
        ensure_exists(&mut tx, id, TODO_NOT_FOUND).await?;

        let result = sqlx::query("UPDATE todo_list SET list_color = ? WHERE id = ?")
            .bind(color)
            .bind(id)
            .execute(&mut *tx)
            .await?;

        if result.rows_affected() == 0 {
            return Err(TodoError::persistence("Failed to update color"));
        }

        tx.commit().await?;
        Ok(())
    }

    /// Apply a caller-supplied set of positions as one unit.
    ///
    /// The positions are taken as given: the caller is responsible for
    /// sending a permutation of 1..=N. Entries naming unknown ids change
    /// nothing. If any single update fails none of them are kept.
    pub async fn reorder(&self, order: &[PositionUpdate]) -> TodoResult<()> {
        debug!("Reordering {} todos", order.len());

        let mut tx = self.pool.begin().await?;

        for update in order {
            let result = sqlx::query("UPDATE todo_list SET item_position = ? WHERE id = ?")
                .bind(update.position)
                .bind(update.id)
                .execute(&mut *tx)
                .await;

            if let Err(e) = result {
                error!(
                    todo_id = update.id,
                    position = update.position,
                    error = %e,
                    "Reorder failed, rolling back"
                );
                let _ = tx.rollback().await;
                return Err(TodoError::from(e));
            }
        }

        tx.commit().await?;
        Ok(())
    }

    /// Delete an item and close the gap it leaves behind
    pub async fn delete_todo(&self, id: i64) -> TodoResult<()> {
        debug!("Deleting todo: {}", id);

        let mut tx = self.pool.begin().await?;

        let deleted_position: Option<i64> =
            sqlx::query_scalar("SELECT item_position FROM todo_list WHERE id = ?")
                .bind(id)
                .fetch_optional(&mut *tx)
                .await?;

        let Some(deleted_position) = deleted_position else {
            tx.rollback().await?;
            return Err(TodoError::not_found(ITEM_NOT_FOUND));
        };

        let result = sqlx::query("DELETE FROM todo_list WHERE id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        if result.rows_affected() == 0 {
            let _ = tx.rollback().await;
            return Err(TodoError::persistence("Error deleting task"));
        }

        let shifted = sqlx::query(
            "UPDATE todo_list SET item_position = item_position - 1 WHERE item_position > ?",
        )
        .bind(deleted_position)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        debug!(
            "Deleted todo {} from position {}, shifted {} items",
            id,
            deleted_position,
            shifted.rows_affected()
        );
        Ok(())
    }
}

/// Trim `value`, rejecting it with `message` if nothing is left
fn require_text<'a>(value: &'a str, message: &str) -> TodoResult<&'a str> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(TodoError::validation(message));
    }
    Ok(trimmed)
}

async fn find_todo(conn: &mut SqliteConnection, id: i64) -> TodoResult<Option<TodoItem>> {
    let row = sqlx::query("SELECT * FROM todo_list WHERE id = ?")
        .bind(id)
        .fetch_optional(&mut *conn)
        .await?;

    row.as_ref().map(row_to_todo).transpose()
}

async fn ensure_exists(conn: &mut SqliteConnection, id: i64, message: &str) -> TodoResult<()> {
    let found: Option<i64> = sqlx::query_scalar("SELECT id FROM todo_list WHERE id = ?")
        .bind(id)
        .fetch_optional(&mut *conn)
        .await?;

    match found {
        Some(_) => Ok(()),
        None => Err(TodoError::not_found(message)),
    }
}

/// Convert a database row to a TodoItem
fn row_to_todo(row: &SqliteRow) -> TodoResult<TodoItem> {
    let list_color: Option<String> = row.try_get("list_color")?;

    Ok(TodoItem {
        id: row.try_get("id")?,
        description: row.try_get("description")?,
        is_done: row.try_get::<i64, _>("is_done")? != 0,
        item_position: row.try_get("item_position")?,
        // Empty strings count as unset
        list_color: list_color.filter(|c| !c.trim().is_empty()),
    })
}
