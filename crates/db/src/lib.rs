//! Persistence handle for the relational store.
//!
//! The pool is built once per process by [`acquire`] and reused by every
//! request; sqlx pools are cheap to clone and safe to share across tasks.

use std::str::FromStr;

use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use sqlx::ConnectOptions;
use tokio::sync::OnceCell;

pub mod models;
pub mod repositories;
pub mod store;

pub use store::{PgWorkflowStore, WorkflowStore};

pub type DbPool = sqlx::PgPool;

/// Default pool ceiling when `DB_MAX_CONNECTIONS` is not set.
pub const DEFAULT_MAX_CONNECTIONS: u32 = 10;

/// Process-wide pool, filled on the first successful [`acquire`].
static POOL: OnceCell<DbPool> = OnceCell::const_new();

/// Connection settings that are not part of the database URL.
#[derive(Debug, Clone)]
pub struct PoolSettings {
    pub max_connections: u32,
    /// Emit every SQL statement through `tracing`. Enabled in development only.
    pub log_statements: bool,
}

impl Default for PoolSettings {
    fn default() -> Self {
        Self {
            max_connections: DEFAULT_MAX_CONNECTIONS,
            log_statements: false,
        }
    }
}

/// Create a connection pool from a database URL.
///
/// Connects eagerly, so an unreachable store is reported here rather than on
/// the first query.
pub async fn create_pool(database_url: &str, settings: &PoolSettings) -> Result<DbPool, sqlx::Error> {
    let mut options = PgConnectOptions::from_str(database_url)?;
    if !settings.log_statements {
        options = options.disable_statement_logging();
    }

    PgPoolOptions::new()
        .max_connections(settings.max_connections)
        .connect_with(options)
        .await
}

/// Return the process-wide pool, creating it on first use.
///
/// Concurrent first callers wait on the same initialization; exactly one pool
/// is built. A failed attempt leaves nothing cached so a later call may retry.
pub async fn acquire(
    database_url: &str,
    settings: &PoolSettings,
) -> Result<&'static DbPool, sqlx::Error> {
    acquire_in(&POOL, database_url, settings).await
}

async fn acquire_in<'a>(
    cell: &'a OnceCell<DbPool>,
    database_url: &str,
    settings: &PoolSettings,
) -> Result<&'a DbPool, sqlx::Error> {
    cell.get_or_try_init(|| async {
        tracing::info!(max_connections = settings.max_connections, "Creating database pool");
        create_pool(database_url, settings).await
    })
    .await
}

/// Round-trip a trivial query to confirm the store is reachable.
pub async fn health_check(pool: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}

/// Apply the embedded migrations from `db/migrations`.
pub async fn run_migrations(pool: &DbPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("../../db/migrations").run(pool).await
}
