//! Database location and connection setup
//!
//! The store connection is built here and passed into the repository
//! functions explicitly; there is no process-global client.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};

use crate::store::repository::main_table;

/// Environment variable overriding the database file location.
pub const DB_ENV_VAR: &str = "GRN_DB";

/// Resolve the database path: CLI flag, then `GRN_DB`, then a default
/// under the platform data directory.
pub fn database_path(cli_override: Option<PathBuf>) -> Result<PathBuf> {
    if let Some(path) = cli_override {
        return Ok(path);
    }
    if let Ok(path) = std::env::var(DB_ENV_VAR) {
        return Ok(PathBuf::from(path));
    }

    let dir = dirs::data_local_dir()
        .context("Could not determine a local data directory")?
        .join("grn-cli");
    Ok(dir.join("vendor_grn.db"))
}

/// Open (creating if needed) the SQLite database and make sure the
/// warehouse table exists.
pub async fn connect(path: &Path) -> Result<SqlitePool> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create database directory: {}", parent.display()))?;
    }

    let options = SqliteConnectOptions::new()
        .filename(path)
        .create_if_missing(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(options)
        .await
        .with_context(|| format!("Failed to open database: {}", path.display()))?;

    main_table::ensure_schema(&pool).await?;

    Ok(pool)
}
