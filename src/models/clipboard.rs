use serde::{Deserialize, Serialize};

use crate::models::entry::{EntryId, EntryKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClipboardAction {
    Cut,
    Copy,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClipboardItem {
    pub id: EntryId,
    pub path: String,
    pub name: String,
    pub kind: EntryKind,
    pub action: ClipboardAction,
}

/// Single-slot cut/copy holder. A new cut or copy replaces whatever was
/// pending; a paste consumes it.
#[derive(Debug, Default)]
pub struct Clipboard {
    slot: Option<ClipboardItem>,
}

impl Clipboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, item: ClipboardItem) {
        self.slot = Some(item);
    }

    pub fn peek(&self) -> Option<&ClipboardItem> {
        self.slot.as_ref()
    }

    pub fn peek_mut(&mut self) -> Option<&mut ClipboardItem> {
        self.slot.as_mut()
    }

    pub fn clear(&mut self) {
        self.slot = None;
    }
}
