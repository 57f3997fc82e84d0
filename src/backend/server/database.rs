/**
 * Database Connection
 *
 * Opens the SQLite pool and brings the schema up to date. Unlike an
 * optional service, the store is required: the server refuses to start
 * when the database cannot be opened or migrated.
 */

use std::str::FromStr;
use std::time::Duration;

use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions};
use sqlx::{Sqlite, Transaction};

use crate::backend::error::BackendError;
use crate::backend::server::config::ServerConfig;

/// How long a writer waits for the database lock before failing
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Load and initialize the database connection pool
///
/// This function:
/// 1. Parses `database_url`, creating the file if missing
/// 2. Enables foreign keys and WAL journaling on every connection
/// 3. Creates a pool of `max_connections`
/// 4. Runs migrations
///
/// # Errors
///
/// Returns `BackendError::Store` when the database cannot be opened and
/// `BackendError::Migration` when the schema cannot be applied.
pub async fn load_database(config: &ServerConfig) -> Result<SqlitePool, BackendError> {
    tracing::info!("Connecting to database...");

    let options = SqliteConnectOptions::from_str(&config.database_url)?
        .create_if_missing(true)
        .foreign_keys(true)
        .journal_mode(SqliteJournalMode::Wal)
        .busy_timeout(BUSY_TIMEOUT);

    let pool = SqlitePoolOptions::new()
        .max_connections(config.max_connections)
        .connect_with(options)
        .await
        .map_err(|e| {
            tracing::error!("Failed to create database connection pool: {:?}", e);
            e
        })?;

    tracing::info!("Database connection pool created successfully");
    run_migrations(&pool).await?;
    Ok(pool)
}

/// Open a private in-memory database with the schema applied
///
/// The pool keeps a single connection alive forever, since every new
/// connection to `sqlite::memory:` would see an empty database.
pub async fn connect_in_memory() -> Result<SqlitePool, BackendError> {
    let options = SqliteConnectOptions::from_str("sqlite::memory:")?.foreign_keys(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect_with(options)
        .await?;

    run_migrations(&pool).await?;
    Ok(pool)
}

/// Open a write transaction
///
/// The transaction takes the database write lock up front
/// (`BEGIN IMMEDIATE`). A workflow that reads before writing would
/// otherwise have to upgrade its read lock mid-transaction, which SQLite
/// refuses with `SQLITE_BUSY` while another writer is active, without
/// waiting out the busy timeout.
pub async fn begin_write(pool: &SqlitePool) -> Result<Transaction<'static, Sqlite>, sqlx::Error> {
    pool.begin_with("BEGIN IMMEDIATE").await
}

/// Run embedded migrations from `./migrations`
pub async fn run_migrations(pool: &SqlitePool) -> Result<(), BackendError> {
    tracing::info!("Running database migrations...");
    sqlx::migrate!().run(pool).await.map_err(|e| {
        tracing::error!("Failed to run database migrations: {}", e);
        e
    })?;
    tracing::info!("Database migrations completed successfully");
    Ok(())
}
