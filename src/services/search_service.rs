use rusqlite::Connection;

use crate::data::path_store;
use crate::error::VaultError;
use crate::models::search::SearchResult;
use crate::vpath;

/// Case-insensitive substring match on entry names across the whole tree.
pub fn search(conn: &Connection, query: &str, limit: usize) -> Result<Vec<SearchResult>, VaultError> {
    let trimmed = query.trim();
    if trimmed.is_empty() || limit == 0 {
        return Ok(Vec::new());
    }
    let needle = trimmed.to_lowercase();

    let results = path_store::list_all(conn)?
        .into_iter()
        .filter(|entry| !vpath::is_root(&entry.path))
        .filter(|entry| entry.name.to_lowercase().contains(&needle))
        .take(limit)
        .map(|entry| SearchResult {
            path: entry.path,
            name: entry.name,
            kind: entry.kind,
            parent_path: entry.parent_path,
        })
        .collect();

    Ok(results)
}
