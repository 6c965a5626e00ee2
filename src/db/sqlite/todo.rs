//! SQLite TodoRepository implementation.

use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};

use crate::db::utils::current_timestamp;
use crate::db::{DbError, DbResult, Status, Todo, TodoRepository};

const SELECT_TODO: &str =
    "SELECT id, title, status, expires_at, created_at, updated_at FROM todos";

/// SQLx-backed todo repository.
///
/// Holds a clone of the shared pool handle.
pub struct SqliteTodoRepository {
    pub(crate) pool: SqlitePool,
}

fn todo_from_row(row: &SqliteRow) -> DbResult<Todo> {
    let status: String = row.try_get("status")?;
    let status = Status::parse(&status).map_err(|e| DbError::InvalidData {
        message: e.to_string(),
    })?;

    Ok(Todo {
        id: row.try_get("id")?,
        title: row.try_get("title")?,
        status,
        expired_at: row.try_get("expires_at")?,
        created_at: Some(row.try_get("created_at")?),
        updated_at: Some(row.try_get("updated_at")?),
    })
}

impl TodoRepository for SqliteTodoRepository {
    async fn list(&self) -> DbResult<Vec<Todo>> {
        let rows = sqlx::query(&format!("{} ORDER BY id ASC", SELECT_TODO))
            .fetch_all(&self.pool)
            .await?;

        rows.iter().map(todo_from_row).collect()
    }

    async fn get(&self, id: i64) -> DbResult<Todo> {
        let row = sqlx::query(&format!("{} WHERE id = ?", SELECT_TODO))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        let row = row.ok_or_else(|| DbError::todo_not_found(id))?;
        todo_from_row(&row)
    }

    async fn create(&self, todo: &Todo) -> DbResult<i64> {
        // Always generate timestamps - never trust input
        let now = current_timestamp();

        let result = sqlx::query(
            "INSERT INTO todos (title, status, expires_at, created_at, updated_at) VALUES (?, ?, ?, ?, ?)",
        )
        .bind(&todo.title)
        .bind(todo.status.as_str())
        .bind(todo.expired_at)
        .bind(now)
        .bind(now)
        .execute(&self.pool)
        .await?;

        Ok(result.last_insert_rowid())
    }

    async fn update(&self, todo: &Todo) -> DbResult<()> {
        let result = sqlx::query(
            "UPDATE todos SET title = ?, status = ?, expires_at = ?, updated_at = ? WHERE id = ?",
        )
        .bind(&todo.title)
        .bind(todo.status.as_str())
        .bind(todo.expired_at)
        .bind(current_timestamp())
        .bind(todo.id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::todo_not_found(todo.id));
        }

        Ok(())
    }

    async fn delete(&self, id: i64) -> DbResult<()> {
        let result = sqlx::query("DELETE FROM todos WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::todo_not_found(id));
        }

        Ok(())
    }
}
