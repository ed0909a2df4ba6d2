//! File payloads, keyed by the owning entry. Metadata queries never read
//! this table.

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension};

use crate::data::path_store;
use crate::error::VaultError;
use crate::models::content::Content;
use crate::models::entry::{EntryId, EntryKind};

pub fn get(conn: &Connection, entry_id: EntryId) -> Result<Option<Content>, VaultError> {
    let content = conn
        .query_row(
            "SELECT entry_id, data, last_modified FROM contents WHERE entry_id = ?1",
            params![entry_id],
            |row| {
                Ok(Content {
                    entry_id: row.get(0)?,
                    data: row.get(1)?,
                    last_modified: row.get(2)?,
                })
            },
        )
        .optional()?;
    Ok(content)
}

/// Content currently reachable at `path`.
pub fn get_at(conn: &Connection, path: &str) -> Result<Option<Content>, VaultError> {
    match path_store::resolve(conn, path)? {
        Some(id) => get(conn, id),
        None => Ok(None),
    }
}

/// Inserts or overwrites the payload of a file entry.
pub fn put(conn: &Connection, content: &Content) -> Result<(), VaultError> {
    write(conn, content.entry_id, &content.data, content.last_modified)
}

pub fn write(
    conn: &Connection,
    entry_id: EntryId,
    data: &[u8],
    last_modified: Option<DateTime<Utc>>,
) -> Result<(), VaultError> {
    let kind: Option<EntryKind> = conn
        .query_row(
            "SELECT kind FROM entries WHERE id = ?1",
            params![entry_id],
            |row| row.get(0),
        )
        .optional()?;
    match kind {
        Some(EntryKind::File) => {}
        Some(EntryKind::Folder) => {
            return Err(VaultError::InvalidOperation(format!(
                "folders have no content (entry #{})",
                entry_id.0
            )))
        }
        None => {
            return Err(VaultError::NotFound(format!(
                "entry #{}",
                entry_id.0
            )))
        }
    }

    conn.execute(
        "INSERT INTO contents (entry_id, data, last_modified) VALUES (?1, ?2, ?3)
         ON CONFLICT(entry_id) DO UPDATE SET data = excluded.data, last_modified = excluded.last_modified",
        params![entry_id, data, last_modified],
    )?;
    Ok(())
}

pub fn delete(conn: &Connection, entry_id: EntryId) -> Result<usize, VaultError> {
    let count = conn.execute("DELETE FROM contents WHERE entry_id = ?1", params![entry_id])?;
    Ok(count)
}

/// Duplicates the payload of `from` onto `to` without loading it into Rust.
pub fn copy(conn: &Connection, from: EntryId, to: EntryId) -> Result<usize, VaultError> {
    let count = conn.execute(
        "INSERT INTO contents (entry_id, data, last_modified)
         SELECT ?2, data, last_modified FROM contents WHERE entry_id = ?1",
        params![from, to],
    )?;
    Ok(count)
}
