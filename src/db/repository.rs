//! Repository traits for data access abstraction.
//!
//! These traits define the contract for data access, allowing different
//! storage backends to be swapped without changing business logic.
//!
//! Methods return `Send` futures so handlers generic over [`Database`]
//! can be served by axum.

use std::future::Future;

use crate::db::{
    DbResult,
    models::{HealthStatus, Todo},
};

/// Repository for Todo operations.
pub trait TodoRepository: Send + Sync {
    /// Get all todos, ordered by id. Empty when the table is empty.
    fn list(&self) -> impl Future<Output = DbResult<Vec<Todo>>> + Send;

    /// Get a todo by ID. Fails with `NotFound` when no row matches.
    fn get(&self, id: i64) -> impl Future<Output = DbResult<Todo>> + Send;

    /// Insert a new todo and return the store-assigned ID.
    ///
    /// `id` and timestamps on the input are ignored.
    fn create(&self, todo: &Todo) -> impl Future<Output = DbResult<i64>> + Send;

    /// Replace title, status and expiry of the row matching `todo.id`.
    ///
    /// Fails with `NotFound` when no row matches.
    fn update(&self, todo: &Todo) -> impl Future<Output = DbResult<()>> + Send;

    /// Permanently delete a todo. Fails with `NotFound` when no row matches.
    fn delete(&self, id: i64) -> impl Future<Output = DbResult<()>> + Send;
}

/// Combined database interface.
pub trait Database: Send + Sync {
    type Todos: TodoRepository;

    /// Run pending migrations.
    fn migrate(&self) -> impl Future<Output = DbResult<()>> + Send;

    /// Get the todo repository.
    fn todos(&self) -> &Self::Todos;

    /// Probe the store. Never fails; a broken store reports `Down`.
    fn health_check(&self) -> impl Future<Output = HealthStatus> + Send;
}
