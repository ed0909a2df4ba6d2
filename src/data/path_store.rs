use std::collections::HashMap;

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension, Row};

use crate::error::VaultError;
use crate::models::entry::{Entry, EntryId, EntryKind};
use crate::vpath;

const ROW_COLUMNS: &str =
    "id, parent_id, name, kind, created_at, modified_at, size_bytes, mime_type";

struct EntryRow {
    id: EntryId,
    parent_id: Option<EntryId>,
    name: String,
    kind: EntryKind,
    created_at: DateTime<Utc>,
    modified_at: DateTime<Utc>,
    size_bytes: Option<i64>,
    mime_type: Option<String>,
}

impl EntryRow {
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            parent_id: row.get(1)?,
            name: row.get(2)?,
            kind: row.get(3)?,
            created_at: row.get(4)?,
            modified_at: row.get(5)?,
            size_bytes: row.get(6)?,
            mime_type: row.get(7)?,
        })
    }

    fn into_entry(self, path: String) -> Entry {
        Entry {
            parent_path: vpath::parent_of(&path).to_string(),
            path,
            name: self.name,
            kind: self.kind,
            created_at: self.created_at,
            modified_at: self.modified_at,
            size_bytes: self.size_bytes,
            mime_type: self.mime_type,
        }
    }
}

pub fn lookup(conn: &Connection, path: &str) -> Result<Option<(EntryId, EntryKind)>, VaultError> {
    let path = vpath::normalize(path)?;
    let mut current = (EntryId::ROOT, EntryKind::Folder);
    for segment in path.split('/').skip(1) {
        match child(conn, current.0, segment)? {
            Some(found) => current = found,
            None => return Ok(None),
        }
    }
    Ok(Some(current))
}

pub fn resolve(conn: &Connection, path: &str) -> Result<Option<EntryId>, VaultError> {
    Ok(lookup(conn, path)?.map(|(id, _)| id))
}

pub fn require_folder(conn: &Connection, path: &str) -> Result<EntryId, VaultError> {
    match lookup(conn, path)? {
        Some((id, EntryKind::Folder)) => Ok(id),
        Some((_, EntryKind::File)) => Err(VaultError::InvalidOperation(format!(
            "not a folder: {path}"
        ))),
        None => Err(VaultError::NotFound(format!("folder {path}"))),
    }
}

pub fn child(
    conn: &Connection,
    parent_id: EntryId,
    name: &str,
) -> Result<Option<(EntryId, EntryKind)>, VaultError> {
    let found = conn
        .query_row(
            "SELECT id, kind FROM entries WHERE parent_id = ?1 AND name = ?2",
            params![parent_id, name],
            |row| Ok((row.get(0)?, row.get(1)?)),
        )
        .optional()?;
    Ok(found)
}

pub fn path_of(conn: &Connection, id: EntryId) -> Result<Option<String>, VaultError> {
    let mut stmt = conn.prepare(
        "WITH RECURSIVE chain(id, parent_id, name, depth) AS (
             SELECT id, parent_id, name, 0 FROM entries WHERE id = ?1
             UNION ALL
             SELECT e.id, e.parent_id, e.name, c.depth + 1
             FROM entries e JOIN chain c ON e.id = c.parent_id
         )
         SELECT name FROM chain ORDER BY depth DESC",
    )?;

    let names = stmt
        .query_map(params![id], |row| row.get::<_, String>(0))?
        .collect::<Result<Vec<_>, _>>()?;

    if names.is_empty() {
        return Ok(None);
    }
    Ok(Some(names.join("/")))
}

pub fn get(conn: &Connection, path: &str) -> Result<Option<Entry>, VaultError> {
    let path = vpath::normalize(path)?;
    match resolve(conn, &path)? {
        Some(id) => Ok(fetch_row(conn, id)?.map(|row| row.into_entry(path))),
        None => Ok(None),
    }
}

pub fn get_by_id(conn: &Connection, id: EntryId) -> Result<Option<Entry>, VaultError> {
    let Some(row) = fetch_row(conn, id)? else {
        return Ok(None);
    };
    let path = path_of(conn, id)?
        .ok_or_else(|| VaultError::NotFound(format!("entry #{}", id.0)))?;
    Ok(Some(row.into_entry(path)))
}

fn fetch_row(conn: &Connection, id: EntryId) -> Result<Option<EntryRow>, VaultError> {
    let row = conn
        .query_row(
            &format!("SELECT {ROW_COLUMNS} FROM entries WHERE id = ?1"),
            params![id],
            EntryRow::from_row,
        )
        .optional()?;
    Ok(row)
}

/// The parent folder must already exist. Overwriting keeps the entry's id (and
/// therefore its children and content) but replaces every metadata field.
pub fn put(conn: &Connection, entry: &Entry) -> Result<EntryId, VaultError> {
    let path = vpath::normalize(&entry.path)?;
    if vpath::is_root(&path) {
        return Err(VaultError::InvalidOperation(
            "the root folder cannot be overwritten".to_string(),
        ));
    }
    if entry.name != vpath::name_of(&path) || entry.parent_path != vpath::parent_of(&path) {
        return Err(VaultError::InvalidPath(format!(
            "name and parent do not match path: {}",
            entry.path
        )));
    }
    vpath::validate_name(&entry.name)?;

    let parent_id = require_folder(conn, &entry.parent_path)?;
    match child(conn, parent_id, &entry.name)? {
        Some((_, kind)) if kind != entry.kind => Err(VaultError::Collision(format!(
            "{path} already exists as a {kind}"
        ))),
        Some((id, _)) => {
            conn.execute(
                "UPDATE entries SET created_at = ?2, modified_at = ?3, size_bytes = ?4, mime_type = ?5
                 WHERE id = ?1",
                params![
                    id,
                    entry.created_at,
                    entry.modified_at,
                    entry.size_bytes,
                    entry.mime_type,
                ],
            )?;
            Ok(id)
        }
        None => insert_child(conn, parent_id, entry),
    }
}

/// Inserts `entry` under `parent_id` using the entry's own name. The caller
/// has already checked for a sibling with the same name.
pub fn insert_child(conn: &Connection, parent_id: EntryId, entry: &Entry) -> Result<EntryId, VaultError> {
    conn.execute(
        "INSERT INTO entries (parent_id, name, kind, created_at, modified_at, size_bytes, mime_type)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        params![
            parent_id,
            entry.name,
            entry.kind,
            entry.created_at,
            entry.modified_at,
            entry.size_bytes,
            entry.mime_type,
        ],
    )?;
    Ok(EntryId(conn.last_insert_rowid()))
}

pub fn set_name(
    conn: &Connection,
    id: EntryId,
    name: &str,
    modified_at: DateTime<Utc>,
) -> Result<(), VaultError> {
    conn.execute(
        "UPDATE entries SET name = ?2, modified_at = ?3 WHERE id = ?1",
        params![id, name, modified_at],
    )?;
    Ok(())
}

pub fn set_parent(
    conn: &Connection,
    id: EntryId,
    parent_id: EntryId,
    modified_at: DateTime<Utc>,
) -> Result<(), VaultError> {
    conn.execute(
        "UPDATE entries SET parent_id = ?2, modified_at = ?3 WHERE id = ?1",
        params![id, parent_id, modified_at],
    )?;
    Ok(())
}

pub fn set_file_meta(
    conn: &Connection,
    id: EntryId,
    size_bytes: i64,
    mime_type: Option<&str>,
    modified_at: DateTime<Utc>,
) -> Result<(), VaultError> {
    conn.execute(
        "UPDATE entries SET size_bytes = ?2, mime_type = ?3, modified_at = ?4 WHERE id = ?1",
        params![id, size_bytes, mime_type, modified_at],
    )?;
    Ok(())
}

pub fn duplicate(
    conn: &Connection,
    source: EntryId,
    parent_id: EntryId,
    name: &str,
    now: DateTime<Utc>,
) -> Result<EntryId, VaultError> {
    let inserted = conn.execute(
        "INSERT INTO entries (parent_id, name, kind, created_at, modified_at, size_bytes, mime_type)
         SELECT ?2, ?3, kind, ?4, ?4, size_bytes, mime_type FROM entries WHERE id = ?1",
        params![source, parent_id, name, now],
    )?;
    if inserted == 0 {
        return Err(VaultError::NotFound(format!("entry #{}", source.0)));
    }
    Ok(EntryId(conn.last_insert_rowid()))
}

pub fn children(conn: &Connection, parent_id: EntryId) -> Result<Vec<(EntryId, String)>, VaultError> {
    let mut stmt = conn.prepare("SELECT id, name FROM entries WHERE parent_id = ?1 ORDER BY id")?;
    let children = stmt
        .query_map(params![parent_id], |row| Ok((row.get(0)?, row.get(1)?)))?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(children)
}

pub fn subtree_ids(conn: &Connection, id: EntryId) -> Result<Vec<EntryId>, VaultError> {
    let mut stmt = conn.prepare(
        "WITH RECURSIVE subtree(id) AS (
             SELECT ?1
             UNION ALL
             SELECT e.id FROM entries e JOIN subtree s ON e.parent_id = s.id
         )
         SELECT id FROM subtree",
    )?;
    let ids = stmt
        .query_map(params![id], |row| row.get(0))?
        .collect::<Result<Vec<EntryId>, _>>()?;
    Ok(ids)
}

/// Not transactional on its own; composite operations wrap it.
pub fn delete(conn: &Connection, path: &str) -> Result<usize, VaultError> {
    let path = vpath::normalize(path)?;
    if vpath::is_root(&path) {
        return Err(VaultError::InvalidOperation(
            "the root folder cannot be deleted".to_string(),
        ));
    }
    match resolve(conn, &path)? {
        Some(id) => delete_subtree(conn, id),
        None => Ok(0),
    }
}

pub fn delete_subtree(conn: &Connection, id: EntryId) -> Result<usize, VaultError> {
    let ids = subtree_ids(conn, id)?;
    let subtree = "WITH RECURSIVE subtree(id) AS (
                       SELECT ?1
                       UNION ALL
                       SELECT e.id FROM entries e JOIN subtree s ON e.parent_id = s.id
                   )";
    conn.execute(
        &format!("{subtree} DELETE FROM contents WHERE entry_id IN (SELECT id FROM subtree)"),
        params![id],
    )?;
    conn.execute(
        &format!("{subtree} DELETE FROM entries WHERE id IN (SELECT id FROM subtree)"),
        params![id],
    )?;
    Ok(ids.len())
}

pub fn list_children(conn: &Connection, parent_path: &str) -> Result<Vec<Entry>, VaultError> {
    let parent_path = vpath::normalize(parent_path)?;
    match resolve(conn, &parent_path)? {
        Some(parent_id) => list_children_of(conn, parent_id, &parent_path),
        None => Ok(Vec::new()),
    }
}

pub fn list_children_of(
    conn: &Connection,
    parent_id: EntryId,
    parent_path: &str,
) -> Result<Vec<Entry>, VaultError> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {ROW_COLUMNS} FROM entries WHERE parent_id = ?1
         ORDER BY kind = 'file', name COLLATE NOCASE, name"
    ))?;

    let entries = stmt
        .query_map(params![parent_id], EntryRow::from_row)?
        .map(|row| row.map(|row| {
            let path = vpath::join(parent_path, &row.name);
            row.into_entry(path)
        }))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(entries)
}

pub fn list_all(conn: &Connection) -> Result<Vec<Entry>, VaultError> {
    let mut stmt = conn.prepare(&format!("SELECT {ROW_COLUMNS} FROM entries ORDER BY id"))?;
    let rows = stmt
        .query_map([], EntryRow::from_row)?
        .collect::<Result<Vec<_>, _>>()?;

    let mut paths: HashMap<EntryId, String> = HashMap::with_capacity(rows.len());
    {
        let links: HashMap<EntryId, (Option<EntryId>, &str)> = rows
            .iter()
            .map(|row| (row.id, (row.parent_id, row.name.as_str())))
            .collect();
        for row in &rows {
            compute_path(row.id, &links, &mut paths)?;
        }
    }

    let entries = rows
        .into_iter()
        .map(|row| {
            let path = paths.remove(&row.id).unwrap_or_default();
            row.into_entry(path)
        })
        .collect();
    Ok(entries)
}

fn compute_path(
    id: EntryId,
    links: &HashMap<EntryId, (Option<EntryId>, &str)>,
    known: &mut HashMap<EntryId, String>,
) -> Result<String, VaultError> {
    let mut chain = Vec::new();
    let mut cursor = Some(id);
    let mut prefix = None;

    while let Some(current) = cursor {
        if let Some(path) = known.get(&current) {
            prefix = Some(path.clone());
            break;
        }
        let (parent, name) = links
            .get(&current)
            .ok_or_else(|| VaultError::NotFound(format!("parent entry #{}", current.0)))?;
        if chain.len() > links.len() {
            return Err(VaultError::General(format!(
                "cycle in entry tree at #{}",
                current.0
            )));
        }
        chain.push((current, *name));
        cursor = *parent;
    }

    let mut path = prefix.unwrap_or_default();
    for (current, name) in chain.into_iter().rev() {
        path = if path.is_empty() {
            name.to_string()
        } else {
            vpath::join(&path, name)
        };
        known.insert(current, path.clone());
    }
    Ok(path)
}
