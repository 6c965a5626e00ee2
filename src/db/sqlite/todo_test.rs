//! Tests for SqliteTodoRepository.

use chrono::{TimeZone, Utc};

use crate::db::{Database, DbError, SqliteDatabase, Status, Todo, TodoRepository};

async fn setup_db() -> SqliteDatabase {
    let db = SqliteDatabase::in_memory()
        .await
        .expect("Failed to create in-memory database");
    db.migrate().await.expect("Migration should succeed");
    db
}

#[tokio::test(flavor = "multi_thread")]
async fn todo_list_initially_empty() {
    let db = setup_db().await;

    let todos = db.todos().list().await.expect("List should succeed");
    assert!(todos.is_empty());
}

#[tokio::test(flavor = "multi_thread")]
async fn todo_create_and_get() {
    let db = setup_db().await;
    let todos = db.todos();
    let expiry = Utc.with_ymd_and_hms(2024, 12, 10, 0, 0, 0).unwrap();

    let id = todos
        .create(&Todo::new("New Todo", Status::Incomplete).with_expiry(expiry))
        .await
        .expect("Create should succeed");
    assert!(id > 0);

    let retrieved = todos.get(id).await.expect("Get should succeed");
    assert_eq!(retrieved.id, id);
    assert_eq!(retrieved.title, "New Todo");
    assert_eq!(retrieved.status, Status::Incomplete);
    assert_eq!(retrieved.expired_at, Some(expiry));
    assert!(retrieved.created_at.is_some());
    assert_eq!(retrieved.created_at, retrieved.updated_at);
}

#[tokio::test(flavor = "multi_thread")]
async fn todo_create_ignores_client_id_and_timestamps() {
    let db = setup_db().await;
    let todos = db.todos();
    let old = Utc.with_ymd_and_hms(2000, 1, 1, 0, 0, 0).unwrap();

    let input = Todo {
        id: 500,
        title: "Sneaky".to_string(),
        status: Status::Complete,
        expired_at: None,
        created_at: Some(old),
        updated_at: Some(old),
    };
    let id = todos.create(&input).await.unwrap();
    assert_ne!(id, 500);

    let stored = todos.get(id).await.unwrap();
    assert_ne!(stored.created_at, Some(old));
}

#[tokio::test(flavor = "multi_thread")]
async fn todo_get_nonexistent_returns_not_found() {
    let db = setup_db().await;

    let result = db.todos().get(999).await;
    assert!(matches!(result, Err(DbError::NotFound { .. })));
}

#[tokio::test(flavor = "multi_thread")]
async fn todo_list_returns_rows_in_id_order() {
    let db = setup_db().await;
    let todos = db.todos();

    let first = todos
        .create(&Todo::new("Mock Todo 1", Status::Incomplete))
        .await
        .unwrap();
    let second = todos
        .create(&Todo::new("Mock Todo 2", Status::Complete))
        .await
        .unwrap();

    let all = todos.list().await.unwrap();
    assert_eq!(all.len(), 2);
    assert_eq!(all[0].id, first);
    assert_eq!(all[0].title, "Mock Todo 1");
    assert_eq!(all[1].id, second);
    assert_eq!(all[1].status, Status::Complete);
}

#[tokio::test(flavor = "multi_thread")]
async fn todo_update_replaces_fields() {
    let db = setup_db().await;
    let todos = db.todos();
    let expiry = Utc.with_ymd_and_hms(2024, 12, 15, 0, 0, 0).unwrap();

    let id = todos
        .create(&Todo::new("Original", Status::Incomplete).with_expiry(expiry))
        .await
        .unwrap();

    let mut todo = todos.get(id).await.unwrap();
    todo.title = "Updated Todo".to_string();
    todo.status = Status::Complete;
    todo.expired_at = None;
    todos.update(&todo).await.expect("Update should succeed");

    let updated = todos.get(id).await.unwrap();
    assert_eq!(updated.id, id);
    assert_eq!(updated.title, "Updated Todo");
    assert_eq!(updated.status, Status::Complete);
    assert_eq!(updated.expired_at, None);
    assert_eq!(updated.created_at, todo.created_at);
}

#[tokio::test(flavor = "multi_thread")]
async fn todo_update_allows_any_status_transition() {
    let db = setup_db().await;
    let todos = db.todos();

    let id = todos
        .create(&Todo::new("Flip", Status::Complete))
        .await
        .unwrap();
    let mut todo = todos.get(id).await.unwrap();
    todo.status = Status::Incomplete;
    todos.update(&todo).await.unwrap();

    assert_eq!(todos.get(id).await.unwrap().status, Status::Incomplete);
}

#[tokio::test(flavor = "multi_thread")]
async fn todo_update_nonexistent_returns_not_found() {
    let db = setup_db().await;

    let mut todo = Todo::new("x", Status::Complete);
    todo.id = 42;

    let result = db.todos().update(&todo).await;
    assert!(matches!(result, Err(DbError::NotFound { .. })));
}

#[tokio::test(flavor = "multi_thread")]
async fn todo_delete_removes_row() {
    let db = setup_db().await;
    let todos = db.todos();

    let id = todos
        .create(&Todo::new("Doomed", Status::Incomplete))
        .await
        .unwrap();
    todos.delete(id).await.expect("Delete should succeed");

    assert!(matches!(todos.get(id).await, Err(DbError::NotFound { .. })));
}

#[tokio::test(flavor = "multi_thread")]
async fn todo_delete_twice_returns_not_found() {
    let db = setup_db().await;
    let todos = db.todos();

    let id = todos
        .create(&Todo::new("Once", Status::Incomplete))
        .await
        .unwrap();
    todos.delete(id).await.unwrap();

    let second = todos.delete(id).await;
    assert!(matches!(second, Err(DbError::NotFound { .. })));
}

#[tokio::test(flavor = "multi_thread")]
async fn todo_create_violating_schema_is_constraint_error() {
    let db = setup_db().await;

    let result = db
        .todos()
        .create(&Todo::new("", Status::Incomplete))
        .await;
    assert!(matches!(result, Err(DbError::Constraint { .. })));
}

#[tokio::test(flavor = "multi_thread")]
async fn todo_list_fails_without_schema() {
    let db = SqliteDatabase::in_memory().await.unwrap();

    let result = db.todos().list().await;
    assert!(matches!(result, Err(DbError::Database { .. })));
}
