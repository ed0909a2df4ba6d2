use serde::{Deserialize, Serialize};

use crate::models::entry::Entry;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DirectoryListing {
    pub path: String,
    pub folders: Vec<Entry>,
    pub files: Vec<Entry>,
}

impl DirectoryListing {
    /// Rendering order: folders, then files.
    pub fn entries(&self) -> impl Iterator<Item = &Entry> {
        self.folders.iter().chain(self.files.iter())
    }

    pub fn len(&self) -> usize {
        self.folders.len() + self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.folders.is_empty() && self.files.is_empty()
    }
}

/// Folder-only node of the navigation tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FolderNode {
    pub path: String,
    pub name: String,
    pub children: Vec<FolderNode>,
}

impl FolderNode {
    pub fn find(&self, path: &str) -> Option<&FolderNode> {
        if self.path == path {
            return Some(self);
        }
        self.children.iter().find_map(|child| child.find(path))
    }

    pub fn count(&self) -> usize {
        1 + self.children.iter().map(FolderNode::count).sum::<usize>()
    }
}

/// What the UI re-renders after a mutation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewState {
    pub listing: DirectoryListing,
    pub tree: FolderNode,
}
