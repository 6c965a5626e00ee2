//! SQLite connection pool and migration management.

use std::str::FromStr;

use sqlx::SqlitePool;
use sqlx::migrate::Migrator;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use tracing::{debug, warn};

use super::todo::SqliteTodoRepository;
use crate::db::{Database, DbError, DbResult, HealthState, HealthStatus};

// Embed migrations from data/sql/sqlite/ at compile time
static MIGRATOR: Migrator = sqlx::migrate!("data/sql/sqlite");

const MAX_CONNECTIONS: u32 = 8;

/// SQLite database implementation.
///
/// Provides access to repositories via associated types, avoiding dynamic dispatch.
pub struct SqliteDatabase {
    pool: SqlitePool,
    todos: SqliteTodoRepository,
}

impl SqliteDatabase {
    /// Open (creating if missing) the database at a `sqlite://` URL.
    pub async fn open(url: &str) -> DbResult<Self> {
        let options = SqliteConnectOptions::from_str(url)
            .map_err(|e| DbError::Connection {
                message: format!("invalid database url '{}': {}", url, e),
            })?
            .create_if_missing(true)
            .foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(MAX_CONNECTIONS)
            .connect_with(options)
            .await
            .map_err(|e| DbError::Connection {
                message: e.to_string(),
            })?;

        debug!(url, "opened sqlite pool");
        Ok(Self::from_pool(pool))
    }

    /// Create an in-memory database (useful for testing).
    ///
    /// A single long-lived connection backs the pool, since every new
    /// in-memory connection would see an empty database.
    pub async fn in_memory() -> DbResult<Self> {
        let pool = SqlitePoolOptions::new()
            .min_connections(1)
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect("sqlite::memory:")
            .await
            .map_err(|e| DbError::Connection {
                message: e.to_string(),
            })?;
        Ok(Self::from_pool(pool))
    }

    fn from_pool(pool: SqlitePool) -> Self {
        Self {
            todos: SqliteTodoRepository { pool: pool.clone() },
            pool,
        }
    }

    /// Access the underlying pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Close every pooled connection.
    pub async fn close(&self) {
        self.pool.close().await;
    }
}

impl Database for SqliteDatabase {
    type Todos = SqliteTodoRepository;

    async fn migrate(&self) -> DbResult<()> {
        MIGRATOR
            .run(&self.pool)
            .await
            .map_err(|e| DbError::Migration {
                message: e.to_string(),
            })
    }

    fn todos(&self) -> &Self::Todos {
        &self.todos
    }

    async fn health_check(&self) -> HealthStatus {
        let probe = sqlx::query("SELECT 1").execute(&self.pool).await;

        let (status, message) = match probe {
            Ok(_) => (HealthState::Up, "It's healthy".to_string()),
            Err(e) => {
                warn!(error = %e, "database health check failed");
                (HealthState::Down, format!("db down: {}", e))
            }
        };

        HealthStatus {
            status,
            message,
            open_connections: self.pool.size(),
            idle_connections: self.pool.num_idle(),
        }
    }
}
