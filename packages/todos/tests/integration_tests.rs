// ABOUTME: Integration tests for the ordered todo item store
// ABOUTME: Tests position bookkeeping, validation, not-found handling and rollback

use pretty_assertions::assert_eq;
use sqlx::SqlitePool;
use std::sync::Arc;
use todo_items::{PositionUpdate, TodoError, TodoState, TodoStorage};
use todo_storage::DatabaseConfig;

/// Helper to create an in-memory database for testing
async fn create_test_storage() -> TodoStorage {
    let pool = todo_storage::connect_in_memory().await.unwrap();
    TodoStorage::new(pool)
}

/// Helper to create items and return their ids in creation order
async fn seed(storage: &TodoStorage, descriptions: &[&str]) -> Vec<i64> {
    let mut ids = Vec::new();
    for description in descriptions {
        ids.push(storage.create_todo(description).await.unwrap().id);
    }
    ids
}

/// (id, position) pairs in position order
async fn positions(storage: &TodoStorage) -> Vec<(i64, i64)> {
    storage
        .list_todos()
        .await
        .unwrap()
        .into_iter()
        .map(|t| (t.id, t.item_position))
        .collect()
}

#[tokio::test]
async fn test_create_first_item() {
    let storage = create_test_storage().await;

    let todo = storage.create_todo("buy milk").await.unwrap();

    assert_eq!(todo.description, "buy milk");
    assert_eq!(todo.item_position, 1);
    assert!(!todo.is_done);
    assert_eq!(todo.state(), TodoState::Pending);
    assert!(todo.list_color.is_none());
}

#[tokio::test]
async fn test_create_appends_after_max_position() {
    let storage = create_test_storage().await;

    seed(&storage, &["a", "b", "c"]).await;
    let todo = storage.create_todo("d").await.unwrap();

    assert_eq!(todo.item_position, 4);
}

#[tokio::test]
async fn test_create_uses_max_not_count() {
    let storage = create_test_storage().await;
    let ids = seed(&storage, &["a", "b"]).await;

    // Leave a hole on purpose; the next item goes after the highest position
    storage
        .reorder(&[PositionUpdate { id: ids[1], position: 7 }])
        .await
        .unwrap();

    let todo = storage.create_todo("c").await.unwrap();
    assert_eq!(todo.item_position, 8);
}

#[tokio::test]
async fn test_create_trims_description() {
    let storage = create_test_storage().await;

    let todo = storage.create_todo("   walk the dog \n").await.unwrap();

    assert_eq!(todo.description, "walk the dog");
}

#[tokio::test]
async fn test_create_rejects_blank_description() {
    let storage = create_test_storage().await;

    let result = storage.create_todo("   ").await;

    assert_eq!(
        result,
        Err(TodoError::Validation("Description cannot be empty".to_string()))
    );
    assert!(storage.list_todos().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_get_todo() {
    let storage = create_test_storage().await;
    let created = storage.create_todo("buy milk").await.unwrap();

    let fetched = storage.get_todo(created.id).await.unwrap();
    assert_eq!(fetched, created);

    let missing = storage.get_todo(created.id + 100).await;
    assert!(matches!(missing, Err(TodoError::NotFound(_))));
}

#[tokio::test]
async fn test_update_description() {
    let storage = create_test_storage().await;
    let created = storage.create_todo("buy milk").await.unwrap();

    let updated = storage
        .update_description(created.id, "  buy oat milk ")
        .await
        .unwrap();

    assert_eq!(updated.id, created.id);
    assert_eq!(updated.description, "buy oat milk");
    assert_eq!(updated.item_position, created.item_position);
}

#[tokio::test]
async fn test_update_description_validates_before_lookup() {
    let storage = create_test_storage().await;

    let result = storage.update_description(99, "").await;

    assert!(matches!(result, Err(TodoError::Validation(_))));
}

#[tokio::test]
async fn test_update_description_missing_item() {
    let storage = create_test_storage().await;
    let created = storage.create_todo("buy milk").await.unwrap();

    let result = storage.update_description(99, "x").await;

    assert_eq!(result, Err(TodoError::NotFound("Todo not found".to_string())));
    let unchanged = storage.get_todo(created.id).await.unwrap();
    assert_eq!(unchanged, created);
}

#[tokio::test]
async fn test_mark_done_is_idempotent() {
    let storage = create_test_storage().await;
    let created = storage.create_todo("buy milk").await.unwrap();

    storage.mark_done(created.id).await.unwrap();
    let first = storage.get_todo(created.id).await.unwrap();
    assert!(first.is_done);
    assert_eq!(first.state(), TodoState::Done);

    storage.mark_done(created.id).await.unwrap();
    let second = storage.get_todo(created.id).await.unwrap();
    assert!(second.is_done);
}

#[tokio::test]
async fn test_mark_done_missing_item() {
    let storage = create_test_storage().await;

    let result = storage.mark_done(42).await;

    assert!(matches!(result, Err(TodoError::NotFound(_))));
}

#[tokio::test]
async fn test_update_color() {
    let storage = create_test_storage().await;
    let created = storage.create_todo("buy milk").await.unwrap();

    storage.update_color(created.id, " #ff0000 ").await.unwrap();

    let todo = storage.get_todo(created.id).await.unwrap();
    assert_eq!(todo.list_color.as_deref(), Some("#ff0000"));
}

#[tokio::test]
async fn test_update_color_rejects_blank_and_missing() {
    let storage = create_test_storage().await;
    let created = storage.create_todo("buy milk").await.unwrap();

    let blank = storage.update_color(created.id, "  ").await;
    assert_eq!(
        blank,
        Err(TodoError::Validation("Color cannot be empty".to_string()))
    );

    let missing = storage.update_color(created.id + 1, "blue").await;
    assert!(matches!(missing, Err(TodoError::NotFound(_))));
}

#[tokio::test]
async fn test_reorder_swaps_positions() {
    let storage = create_test_storage().await;
    let ids = seed(&storage, &["a", "b"]).await;

    storage
        .reorder(&[
            PositionUpdate { id: ids[0], position: 2 },
            PositionUpdate { id: ids[1], position: 1 },
        ])
        .await
        .unwrap();

    assert_eq!(positions(&storage).await, vec![(ids[1], 1), (ids[0], 2)]);
}

#[tokio::test]
async fn test_reorder_empty_order_is_noop() {
    let storage = create_test_storage().await;
    let ids = seed(&storage, &["a", "b"]).await;

    storage.reorder(&[]).await.unwrap();

    assert_eq!(positions(&storage).await, vec![(ids[0], 1), (ids[1], 2)]);
}

#[tokio::test]
async fn test_reorder_ignores_unknown_ids() {
    let storage = create_test_storage().await;
    let ids = seed(&storage, &["a"]).await;

    storage
        .reorder(&[PositionUpdate { id: 999, position: 1 }])
        .await
        .unwrap();

    assert_eq!(positions(&storage).await, vec![(ids[0], 1)]);
}

#[tokio::test]
async fn test_reorder_failure_rolls_back_whole_batch() {
    let storage = create_test_storage().await;
    let ids = seed(&storage, &["a", "b", "c"]).await;

    // The last entry violates the position >= 1 constraint
    let result = storage
        .reorder(&[
            PositionUpdate { id: ids[0], position: 3 },
            PositionUpdate { id: ids[1], position: 1 },
            PositionUpdate { id: ids[2], position: 0 },
        ])
        .await;

    assert!(matches!(result, Err(TodoError::Persistence(_))));
    assert_eq!(
        positions(&storage).await,
        vec![(ids[0], 1), (ids[1], 2), (ids[2], 3)]
    );
}

#[tokio::test]
async fn test_delete_middle_item_renumbers() {
    let storage = create_test_storage().await;
    let ids = seed(&storage, &["a", "b", "c"]).await;

    storage.delete_todo(ids[1]).await.unwrap();

    assert_eq!(positions(&storage).await, vec![(ids[0], 1), (ids[2], 2)]);
}

#[tokio::test]
async fn test_delete_keeps_range_dense() {
    let storage = create_test_storage().await;
    let ids = seed(&storage, &["a", "b", "c", "d", "e"]).await;

    // Delete position 2 of 5: positions below stay, positions above move down one
    storage.delete_todo(ids[1]).await.unwrap();
    assert_eq!(
        positions(&storage).await,
        vec![(ids[0], 1), (ids[2], 2), (ids[3], 3), (ids[4], 4)]
    );

    storage.delete_todo(ids[4]).await.unwrap();
    storage.delete_todo(ids[0]).await.unwrap();
    assert_eq!(positions(&storage).await, vec![(ids[2], 1), (ids[3], 2)]);

    let next = storage.create_todo("f").await.unwrap();
    assert_eq!(next.item_position, 3);
}

#[tokio::test]
async fn test_delete_missing_item() {
    let storage = create_test_storage().await;
    let ids = seed(&storage, &["a", "b"]).await;

    let result = storage.delete_todo(999).await;

    assert_eq!(result, Err(TodoError::NotFound("Item not found".to_string())));
    assert_eq!(positions(&storage).await, vec![(ids[0], 1), (ids[1], 2)]);
}

#[tokio::test]
async fn test_delete_rolls_back_when_renumbering_fails() {
    let pool = todo_storage::connect_in_memory().await.unwrap();
    let storage = TodoStorage::new(pool.clone());
    let ids = seed(&storage, &["a", "b", "c"]).await;

    // Any position shift now aborts, after the row itself is already deleted
    sqlx::query(
        r#"
        CREATE TRIGGER block_position_shift
        BEFORE UPDATE OF item_position ON todo_list
        BEGIN
            SELECT RAISE(ABORT, 'position shift blocked');
        END
        "#,
    )
    .execute(&pool)
    .await
    .unwrap();

    let result = storage.delete_todo(ids[0]).await;

    assert!(matches!(result, Err(TodoError::Persistence(_))));
    assert_eq!(
        positions(&storage).await,
        vec![(ids[0], 1), (ids[1], 2), (ids[2], 3)]
    );
}

#[tokio::test]
async fn test_empty_color_reads_as_unset() {
    let pool = todo_storage::connect_in_memory().await.unwrap();
    sqlx::query("INSERT INTO todo_list (description, item_position, list_color) VALUES ('a', 1, '')")
        .execute(&pool)
        .await
        .unwrap();

    let storage = TodoStorage::new(pool);
    let todos = storage.list_todos().await.unwrap();

    assert_eq!(todos.len(), 1);
    assert!(todos[0].list_color.is_none());
}

#[sqlx::test(migrations = "../storage/migrations")]
async fn test_positions_stay_dense_through_mixed_operations(pool: SqlitePool) {
    let storage = TodoStorage::new(pool);
    let ids = seed(&storage, &["a", "b", "c", "d"]).await;

    storage
        .reorder(&[
            PositionUpdate { id: ids[3], position: 1 },
            PositionUpdate { id: ids[0], position: 2 },
            PositionUpdate { id: ids[1], position: 3 },
            PositionUpdate { id: ids[2], position: 4 },
        ])
        .await
        .unwrap();
    storage.delete_todo(ids[0]).await.unwrap();
    storage.create_todo("e").await.unwrap();

    let mut found: Vec<i64> = positions(&storage).await.into_iter().map(|(_, p)| p).collect();
    found.sort_unstable();
    assert_eq!(found, vec![1, 2, 3, 4]);
}

#[sqlx::test(migrations = "../storage/migrations")]
async fn test_done_state_survives_reorder_and_delete(pool: SqlitePool) {
    let storage = TodoStorage::new(pool);
    let ids = seed(&storage, &["a", "b", "c"]).await;

    storage.mark_done(ids[2]).await.unwrap();
    storage.delete_todo(ids[0]).await.unwrap();

    let todo = storage.get_todo(ids[2]).await.unwrap();
    assert!(todo.is_done);
    assert_eq!(todo.item_position, 2);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_creates_get_distinct_positions() {
    let temp_dir = tempfile::TempDir::new().unwrap();
    let config = DatabaseConfig {
        path: Some(temp_dir.path().join("todos.db")),
        max_connections: 8,
    };
    let pool = todo_storage::connect(&config).await.unwrap();
    let storage = Arc::new(TodoStorage::new(pool));

    let mut handles = Vec::new();
    for i in 0..16 {
        let storage = storage.clone();
        handles.push(tokio::spawn(async move {
            storage.create_todo(&format!("item {}", i)).await
        }));
    }
    for handle in handles {
        handle.await.unwrap().unwrap();
    }

    let mut found: Vec<i64> = positions(&storage).await.into_iter().map(|(_, p)| p).collect();
    found.sort_unstable();
    assert_eq!(found, (1..=16).collect::<Vec<i64>>());
}
