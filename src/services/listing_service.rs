use std::collections::HashMap;

use rusqlite::Connection;

use crate::data::path_store;
use crate::error::VaultError;
use crate::models::entry::Entry;
use crate::models::listing::{DirectoryListing, FolderNode};
use crate::vpath::{self, ROOT_PATH};

/// Children of the folder at `path`, split into folders and files.
pub fn load_directory(conn: &Connection, path: &str) -> Result<DirectoryListing, VaultError> {
    let path = vpath::normalize(path)?;
    let folder_id = path_store::require_folder(conn, &path)?;
    let (folders, files): (Vec<Entry>, Vec<Entry>) = path_store::list_children_of(conn, folder_id, &path)?
        .into_iter()
        .partition(Entry::is_folder);

    Ok(DirectoryListing {
        path,
        folders,
        files,
    })
}

/// Folder-only hierarchy rooted at [`ROOT_PATH`], built from a single scan.
/// Siblings keep the scan's insertion order.
pub fn build_folder_tree(conn: &Connection) -> Result<FolderNode, VaultError> {
    let entries = path_store::list_all(conn)?;

    let mut by_parent: HashMap<&str, Vec<&Entry>> = HashMap::new();
    for entry in entries.iter().filter(|e| e.is_folder() && !vpath::is_root(&e.path)) {
        by_parent
            .entry(entry.parent_path.as_str())
            .or_default()
            .push(entry);
    }

    Ok(build_node(ROOT_PATH, ROOT_PATH, &by_parent))
}

fn build_node(path: &str, name: &str, by_parent: &HashMap<&str, Vec<&Entry>>) -> FolderNode {
    let children = by_parent
        .get(path)
        .map(|children| {
            children
                .iter()
                .map(|child| build_node(&child.path, &child.name, by_parent))
                .collect()
        })
        .unwrap_or_default();

    FolderNode {
        path: path.to_string(),
        name: name.to_string(),
        children,
    }
}
