pub mod content_store;
pub mod migrations;
pub mod path_store;

use std::path::Path;
use std::time::Duration;

use rusqlite::Connection;

use crate::config::StoreConfig;
use crate::error::VaultError;

/// Opens (creating if needed) the store described by `config`. Any failure is
/// reported as [`VaultError::StoreOpen`], which the UI treats as fatal.
pub fn open_database(config: &StoreConfig) -> Result<Connection, VaultError> {
    open_at(&config.db_path, config.busy_timeout()).map_err(|e| {
        tracing::error!("failed to open store at {}: {e}", config.db_path.display());
        VaultError::StoreOpen(format!("{}: {e}", config.db_path.display()))
    })
}

fn open_at(db_path: &Path, busy_timeout: Duration) -> Result<Connection, VaultError> {
    if let Some(dir) = db_path.parent().filter(|d| !d.as_os_str().is_empty()) {
        std::fs::create_dir_all(dir)?;
    }
    let conn = Connection::open(db_path)?;
    conn.busy_timeout(busy_timeout)?;
    migrations::run_migrations(&conn)?;
    tracing::info!("opened file store at {}", db_path.display());
    Ok(conn)
}

pub fn open_in_memory() -> Result<Connection, VaultError> {
    let conn = Connection::open_in_memory()
        .map_err(|e| VaultError::StoreOpen(format!("in-memory store: {e}")))?;
    migrations::run_migrations(&conn)?;
    Ok(conn)
}
