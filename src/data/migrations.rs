use chrono::Utc;
use rusqlite::{params, Connection};

use crate::error::VaultError;
use crate::models::entry::{EntryId, EntryKind};
use crate::vpath::ROOT_PATH;

const SCHEMA_V1: &str = "
CREATE TABLE IF NOT EXISTS entries (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    parent_id INTEGER REFERENCES entries(id) ON DELETE CASCADE,
    name TEXT NOT NULL,
    kind TEXT NOT NULL CHECK (kind IN ('folder', 'file')),
    created_at TEXT NOT NULL,
    modified_at TEXT NOT NULL,
    size_bytes INTEGER,
    mime_type TEXT,
    UNIQUE (parent_id, name)
);

CREATE INDEX IF NOT EXISTS idx_entries_parent ON entries(parent_id);
CREATE INDEX IF NOT EXISTS idx_entries_name ON entries(name COLLATE NOCASE);

CREATE TABLE IF NOT EXISTS contents (
    entry_id INTEGER PRIMARY KEY REFERENCES entries(id) ON DELETE CASCADE,
    data BLOB NOT NULL,
    last_modified TEXT
);
";

pub fn run_migrations(conn: &Connection) -> Result<(), VaultError> {
    conn.execute_batch("PRAGMA foreign_keys=ON;")?;
    conn.execute_batch("PRAGMA journal_mode=WAL;")?;
    conn.execute_batch(SCHEMA_V1)?;
    seed_root(conn)?;
    Ok(())
}

fn seed_root(conn: &Connection) -> Result<(), VaultError> {
    let now = Utc::now();
    conn.execute(
        "INSERT OR IGNORE INTO entries (id, parent_id, name, kind, created_at, modified_at)
         VALUES (?1, NULL, ?2, ?3, ?4, ?4)",
        params![EntryId::ROOT, ROOT_PATH, EntryKind::Folder, now],
    )?;
    Ok(())
}
