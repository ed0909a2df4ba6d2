//! Controller surface the UI calls for every file-manager action. Mutations
//! return the refreshed listing and tree so the caller can re-render at once.

use std::sync::Arc;

use rusqlite::Connection;
use serde::Serialize;

use crate::commands::blocking;
use crate::data::path_store;
use crate::error::VaultError;
use crate::models::clipboard::{ClipboardAction, ClipboardItem};
use crate::models::listing::{DirectoryListing, ViewState};
use crate::models::preview::Preview;
use crate::models::upload::{OnCollision, UploadFile, UploadReport};
use crate::services::{file_service, listing_service, preview_service};
use crate::state::Session;
use crate::vpath::{self, ROOT_PATH};

#[derive(Debug, Clone, Serialize)]
pub struct UploadResponse {
    pub report: UploadReport,
    pub view: ViewState,
}

fn view_state(session: &Session, conn: &Connection) -> Result<ViewState, VaultError> {
    let listing = match listing_service::load_directory(conn, &session.current_path()) {
        Ok(listing) => listing,
        Err(VaultError::NotFound(_)) | Err(VaultError::InvalidOperation(_)) => {
            session.set_current_path(ROOT_PATH.to_string());
            listing_service::load_directory(conn, ROOT_PATH)?
        }
        Err(e) => return Err(e),
    };
    let tree = listing_service::build_folder_tree(conn)?;
    Ok(ViewState { listing, tree })
}

pub async fn open_directory(session: &Arc<Session>, path: String) -> Result<DirectoryListing, VaultError> {
    blocking(session, move |s| {
        let listing = listing_service::load_directory(&s.db(), &path)?;
        s.set_current_path(listing.path.clone());
        Ok(listing)
    })
    .await
}

pub async fn go_up(session: &Arc<Session>) -> Result<DirectoryListing, VaultError> {
    let current = session.current_path();
    let parent = match vpath::parent_of(&current) {
        vpath::ROOT_PARENT => ROOT_PATH.to_string(),
        parent => parent.to_string(),
    };
    open_directory(session, parent).await
}

pub async fn refresh(session: &Arc<Session>) -> Result<ViewState, VaultError> {
    blocking(session, |s| view_state(s, &s.db())).await
}

pub async fn create_folder(session: &Arc<Session>, name: String) -> Result<ViewState, VaultError> {
    blocking(session, move |s| {
        let conn = s.db();
        file_service::create_folder(&conn, &s.current_path(), &name)?;
        view_state(s, &conn)
    })
    .await
}

pub async fn upload_files(
    session: &Arc<Session>,
    files: Vec<UploadFile>,
    on_collision: OnCollision,
) -> Result<UploadResponse, VaultError> {
    blocking(session, move |s| {
        let conn = s.db();
        let report = file_service::upload_files(&conn, &s.current_path(), &files, on_collision)?;
        let view = view_state(s, &conn)?;
        Ok(UploadResponse { report, view })
    })
    .await
}

pub async fn open_entry(session: &Arc<Session>, path: String) -> Result<Preview, VaultError> {
    blocking(session, move |s| preview_service::open(&s.db(), &path)).await
}

pub async fn rename_entry(
    session: &Arc<Session>,
    path: String,
    new_name: String,
) -> Result<ViewState, VaultError> {
    blocking(session, move |s| {
        let conn = s.db();
        let old_path = vpath::normalize(&path)?;
        let renamed = file_service::rename(&conn, &old_path, &new_name)?;
        s.follow_relocation(&old_path, &renamed.path);
        view_state(s, &conn)
    })
    .await
}

pub async fn cut_entry(session: &Arc<Session>, path: String) -> Result<ClipboardItem, VaultError> {
    stage(session, path, ClipboardAction::Cut).await
}

pub async fn copy_entry(session: &Arc<Session>, path: String) -> Result<ClipboardItem, VaultError> {
    stage(session, path, ClipboardAction::Copy).await
}

async fn stage(
    session: &Arc<Session>,
    path: String,
    action: ClipboardAction,
) -> Result<ClipboardItem, VaultError> {
    blocking(session, move |s| {
        let path = vpath::normalize(&path)?;
        if vpath::is_root(&path) {
            return Err(VaultError::InvalidOperation(
                "the root folder cannot be cut or copied".to_string(),
            ));
        }
        let (id, kind) = path_store::lookup(&s.db(), &path)?.ok_or_else(|| VaultError::NotFound(path.clone()))?;
        let item = ClipboardItem {
            id,
            name: vpath::name_of(&path).to_string(),
            path,
            kind,
            action,
        };
        s.set_clipboard(item.clone());
        Ok(item)
    })
    .await
}

/// Pastes the pending clipboard item into the current directory. The slot is
/// consumed once the paste went through (or was skipped); on error it stays so
/// the user can pick another folder or collision answer. An item whose entry
/// no longer exists is dropped.
pub async fn paste(session: &Arc<Session>, on_collision: OnCollision) -> Result<ViewState, VaultError> {
    blocking(session, move |s| {
        let item = s
            .clipboard()
            .ok_or_else(|| VaultError::InvalidOperation("clipboard is empty".to_string()))?;
        let conn = s.db();
        let source_path = match file_service::clipboard_source(&conn, &item) {
            Ok(source_path) => source_path,
            Err(e) => {
                s.clear_clipboard();
                return Err(e);
            }
        };
        let pasted = file_service::paste(&conn, &item, &s.current_path(), on_collision)?;
        if let (ClipboardAction::Cut, Some(entry)) = (item.action, &pasted) {
            s.follow_relocation(&source_path, &entry.path);
        }
        s.clear_clipboard();
        view_state(s, &conn)
    })
    .await
}

pub async fn delete_entry(session: &Arc<Session>, path: String) -> Result<ViewState, VaultError> {
    blocking(session, move |s| {
        let conn = s.db();
        let path = vpath::normalize(&path)?;
        file_service::delete(&conn, &path)?;
        s.follow_deletion(&path);
        if s.clipboard().is_some_and(|item| vpath::is_within(&item.path, &path)) {
            s.clear_clipboard();
        }
        view_state(s, &conn)
    })
    .await
}
