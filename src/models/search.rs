use serde::{Deserialize, Serialize};

use crate::models::entry::EntryKind;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    pub path: String,
    pub name: String,
    pub kind: EntryKind,
    pub parent_path: String,
}
