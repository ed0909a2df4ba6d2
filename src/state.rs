use std::sync::{Mutex, MutexGuard};

use rusqlite::Connection;

use crate::config::StoreConfig;
use crate::data;
use crate::error::VaultError;
use crate::models::clipboard::{Clipboard, ClipboardItem};
use crate::vpath::{self, ROOT_PATH};

/// Everything one open file manager owns: the store connection, the folder
/// being viewed and the pending cut/copy. Created at startup, mutated only by
/// the command layer, dropped when the session ends.
pub struct Session {
    db: Mutex<Connection>,
    config: StoreConfig,
    current_path: Mutex<String>,
    clipboard: Mutex<Clipboard>,
}

impl Session {
    pub fn open(config: StoreConfig) -> Result<Self, VaultError> {
        let conn = data::open_database(&config)?;
        Ok(Self::with_connection(conn, config))
    }

    pub fn open_in_memory() -> Result<Self, VaultError> {
        let conn = data::open_in_memory()?;
        Ok(Self::with_connection(conn, StoreConfig::default()))
    }

    fn with_connection(conn: Connection, config: StoreConfig) -> Self {
        Self {
            db: Mutex::new(conn),
            config,
            current_path: Mutex::new(ROOT_PATH.to_string()),
            clipboard: Mutex::new(Clipboard::new()),
        }
    }

    pub fn db(&self) -> MutexGuard<'_, Connection> {
        self.db
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    pub fn current_path(&self) -> String {
        self.current_path
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    pub fn set_current_path(&self, path: String) {
        let mut current = self
            .current_path
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        *current = path;
    }

    /// Rewrites the current directory and the pending clipboard item after
    /// `old` became `new` (rename or move of the entry or an ancestor).
    pub fn follow_relocation(&self, old: &str, new: &str) {
        {
            let mut current = self
                .current_path
                .lock()
                .unwrap_or_else(|poisoned| poisoned.into_inner());
            if vpath::is_within(&current, old) {
                *current = vpath::rebase(&current, old, new);
            }
        }

        let mut clipboard = self
            .clipboard
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        if let Some(item) = clipboard.peek_mut() {
            if vpath::is_within(&item.path, old) {
                item.path = vpath::rebase(&item.path, old, new);
                item.name = vpath::name_of(&item.path).to_string();
            }
        }
    }

    /// Falls back to the parent of `deleted` when the current directory was
    /// inside the removed subtree.
    pub fn follow_deletion(&self, deleted: &str) {
        let mut current = self
            .current_path
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        if vpath::is_within(&current, deleted) {
            *current = vpath::parent_of(deleted).to_string();
        }
    }

    pub fn set_clipboard(&self, item: ClipboardItem) {
        self.clipboard
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .set(item);
    }

    pub fn clipboard(&self) -> Option<ClipboardItem> {
        self.clipboard
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .peek()
            .cloned()
    }

    pub fn clear_clipboard(&self) {
        self.clipboard
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clear();
    }
}
