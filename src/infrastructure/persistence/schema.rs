//! SQLite pool construction and schema initialization.

use anyhow::{Context, Result};
use sqlx::migrate::Migrator;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions};
use std::str::FromStr;
use std::time::Duration;

use crate::config::Config;

/// Embedded migrations creating `users` and `urls` when absent.
pub static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// DDL used to recreate `urls` after a startup reset.
const CREATE_URLS_TABLE: &str =
    include_str!("../../../migrations/20260101000001_create_urls.sql");

/// Opens the SQLite connection pool described by `config`.
///
/// The database file is created if it does not exist yet.
///
/// # Errors
///
/// Returns an error if the URL is malformed or the database cannot be opened.
pub async fn connect(config: &Config) -> Result<SqlitePool> {
    let options = SqliteConnectOptions::from_str(&config.database_url)
        .with_context(|| format!("Invalid DATABASE_URL '{}'", config.database_url))?
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal);

    let pool = SqlitePoolOptions::new()
        .max_connections(config.db_max_connections)
        .acquire_timeout(Duration::from_secs(config.db_connect_timeout))
        .connect_with(options)
        .await
        .context("Failed to open database")?;

    Ok(pool)
}

/// Ensures the schema exists.
///
/// `users` is never dropped. When `reset_links` is set, `urls` is dropped and
/// recreated, discarding every stored link.
///
/// # Errors
///
/// Any failure here is fatal for the server: it must not start serving.
pub async fn init(pool: &SqlitePool, reset_links: bool) -> Result<()> {
    MIGRATOR
        .run(pool)
        .await
        .context("Failed to apply migrations")?;

    if reset_links {
        tracing::warn!("RESET_LINKS_ON_STARTUP is set, dropping all stored links");

        sqlx::query("DROP TABLE IF EXISTS urls")
            .execute(pool)
            .await
            .context("Failed to drop urls table")?;

        sqlx::raw_sql(CREATE_URLS_TABLE)
            .execute(pool)
            .await
            .context("Failed to recreate urls table")?;
    }

    Ok(())
}
