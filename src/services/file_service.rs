use chrono::{DateTime, Utc};
use rusqlite::Connection;

use crate::data::{content_store, path_store};
use crate::error::VaultError;
use crate::models::clipboard::{ClipboardAction, ClipboardItem};
use crate::models::entry::{Entry, EntryId, EntryKind};
use crate::models::upload::{OnCollision, UploadFailure, UploadFile, UploadReport};
use crate::services::preview_service::guess_mime;
use crate::vpath;

pub fn create_folder(conn: &Connection, parent_path: &str, name: &str) -> Result<Entry, VaultError> {
    vpath::validate_name(name)?;
    let parent_path = vpath::normalize(parent_path)?;
    let parent_id = path_store::require_folder(conn, &parent_path)?;
    let path = vpath::join(&parent_path, name);

    let tx = conn.unchecked_transaction()?;
    if path_store::child(&tx, parent_id, name)?.is_some() {
        return Err(VaultError::Collision(path));
    }
    let entry = Entry::folder(&path, Utc::now());
    path_store::insert_child(&tx, parent_id, &entry)?;
    tx.commit()?;

    tracing::debug!("created folder {path}");
    Ok(entry)
}

/// Stores one uploaded file under `parent_path`. Returns `None` when the user
/// chose to skip an existing file.
pub fn upload(
    conn: &Connection,
    parent_path: &str,
    file: &UploadFile,
    on_collision: OnCollision,
) -> Result<Option<Entry>, VaultError> {
    vpath::validate_name(&file.name)?;
    let parent_path = vpath::normalize(parent_path)?;
    let parent_id = path_store::require_folder(conn, &parent_path)?;
    let path = vpath::join(&parent_path, &file.name);
    let size = i64::try_from(file.data.len())
        .map_err(|_| VaultError::General(format!("file too large: {}", file.name)))?;
    let mime_type = file
        .mime_type
        .clone()
        .filter(|m| !m.trim().is_empty())
        .unwrap_or_else(|| guess_mime(&file.name));
    let now = Utc::now();

    let tx = conn.unchecked_transaction()?;
    let id = match path_store::child(&tx, parent_id, &file.name)? {
        None => {
            let entry = Entry::file(&path, size, Some(mime_type), now);
            path_store::insert_child(&tx, parent_id, &entry)?
        }
        Some((_, EntryKind::Folder)) => {
            return Err(VaultError::Collision(format!("{path} is a folder")));
        }
        Some((id, EntryKind::File)) => match on_collision {
            OnCollision::Reject => return Err(VaultError::Collision(path)),
            OnCollision::Skip => {
                tracing::debug!("skipped upload of existing {path}");
                return Ok(None);
            }
            OnCollision::Overwrite => {
                path_store::set_file_meta(&tx, id, size, Some(&mime_type), now)?;
                id
            }
        },
    };
    content_store::write(&tx, id, &file.data, file.last_modified)?;
    tx.commit()?;

    tracing::debug!("uploaded {path} ({size} bytes)");
    path_store::get_by_id(conn, id)
}

pub fn upload_files(
    conn: &Connection,
    parent_path: &str,
    files: &[UploadFile],
    on_collision: OnCollision,
) -> Result<UploadReport, VaultError> {
    let parent_path = vpath::normalize(parent_path)?;
    path_store::require_folder(conn, &parent_path)?;

    let mut report = UploadReport::default();
    for file in files {
        match upload(conn, &parent_path, file, on_collision) {
            Ok(Some(entry)) => report.uploaded.push(entry.path),
            Ok(None) => report.skipped.push(file.name.clone()),
            Err(e) => {
                tracing::warn!("upload of {} rolled back: {e}", file.name);
                report.failed.push(UploadFailure {
                    name: file.name.clone(),
                    error: e.to_string(),
                });
            }
        }
    }
    Ok(report)
}

pub fn rename(conn: &Connection, path: &str, new_name: &str) -> Result<Entry, VaultError> {
    vpath::validate_name(new_name)?;
    let path = vpath::normalize(path)?;
    if vpath::is_root(&path) {
        return Err(VaultError::InvalidOperation(
            "the root folder cannot be renamed".to_string(),
        ));
    }
    let id = path_store::resolve(conn, &path)?.ok_or_else(|| VaultError::NotFound(path.clone()))?;
    let parent_path = vpath::parent_of(&path);
    let new_path = vpath::join(parent_path, new_name);
    if new_path == path {
        return path_store::get_by_id(conn, id)?.ok_or(VaultError::NotFound(new_path));
    }
    let parent_id = path_store::require_folder(conn, parent_path)?;

    let tx = conn.unchecked_transaction()?;
    if path_store::child(&tx, parent_id, new_name)?.is_some() {
        return Err(VaultError::Collision(new_path));
    }
    path_store::set_name(&tx, id, new_name, Utc::now())?;
    tx.commit()?;

    tracing::debug!("renamed {path} to {new_path}");
    path_store::get_by_id(conn, id)?.ok_or(VaultError::NotFound(new_path))
}

/// The source is looked up by id, so a rename since the cut/copy is followed.
pub fn paste(
    conn: &Connection,
    item: &ClipboardItem,
    dest_dir: &str,
    on_collision: OnCollision,
) -> Result<Option<Entry>, VaultError> {
    let source_path = clipboard_source(conn, item)?;
    match item.action {
        ClipboardAction::Copy => copy_entry(conn, &source_path, dest_dir, on_collision),
        ClipboardAction::Cut => move_entry(conn, &source_path, dest_dir, on_collision),
    }
}

pub fn clipboard_source(conn: &Connection, item: &ClipboardItem) -> Result<String, VaultError> {
    path_store::path_of(conn, item.id)?.ok_or_else(|| VaultError::NotFound(item.path.clone()))
}

pub fn copy_entry(
    conn: &Connection,
    source_path: &str,
    dest_dir: &str,
    on_collision: OnCollision,
) -> Result<Option<Entry>, VaultError> {
    let plan = TransferPlan::new(conn, source_path, dest_dir)?;
    if plan.dest_path == plan.source_path {
        return match on_collision {
            OnCollision::Skip => Ok(None),
            _ => Err(VaultError::Collision(plan.dest_path)),
        };
    }

    let tx = conn.unchecked_transaction()?;
    if !plan.clear_destination(&tx, on_collision)? {
        return Ok(None);
    }
    let now = Utc::now();
    let new_id = copy_subtree(&tx, plan.source_id, plan.dest_parent_id, &plan.name, now)?;
    tx.commit()?;

    tracing::debug!("copied {} to {}", plan.source_path, plan.dest_path);
    path_store::get_by_id(conn, new_id)
}

pub fn move_entry(
    conn: &Connection,
    source_path: &str,
    dest_dir: &str,
    on_collision: OnCollision,
) -> Result<Option<Entry>, VaultError> {
    let plan = TransferPlan::new(conn, source_path, dest_dir)?;
    if plan.dest_path == plan.source_path {
        return path_store::get_by_id(conn, plan.source_id);
    }

    let tx = conn.unchecked_transaction()?;
    if !plan.clear_destination(&tx, on_collision)? {
        return Ok(None);
    }
    path_store::set_parent(&tx, plan.source_id, plan.dest_parent_id, Utc::now())?;
    tx.commit()?;

    tracing::debug!("moved {} to {}", plan.source_path, plan.dest_path);
    path_store::get_by_id(conn, plan.source_id)
}

pub fn delete(conn: &Connection, path: &str) -> Result<usize, VaultError> {
    let path = vpath::normalize(path)?;
    if vpath::is_root(&path) {
        return Err(VaultError::InvalidOperation(
            "the root folder cannot be deleted".to_string(),
        ));
    }

    let tx = conn.unchecked_transaction()?;
    let id = path_store::resolve(&tx, &path)?.ok_or_else(|| VaultError::NotFound(path.clone()))?;
    let removed = path_store::delete_subtree(&tx, id)?;
    tx.commit()?;

    tracing::debug!("deleted {path} ({removed} entries)");
    Ok(removed)
}

struct TransferPlan {
    source_id: EntryId,
    source_kind: EntryKind,
    source_path: String,
    name: String,
    dest_parent_id: EntryId,
    dest_path: String,
}

impl TransferPlan {
    fn new(conn: &Connection, source_path: &str, dest_dir: &str) -> Result<Self, VaultError> {
        let source_path = vpath::normalize(source_path)?;
        if vpath::is_root(&source_path) {
            return Err(VaultError::InvalidOperation(
                "the root folder cannot be copied or moved".to_string(),
            ));
        }
        let (source_id, source_kind) = path_store::lookup(conn, &source_path)?
            .ok_or_else(|| VaultError::NotFound(source_path.clone()))?;

        let dest_dir = vpath::normalize(dest_dir)?;
        if source_kind == EntryKind::Folder && vpath::is_within(&dest_dir, &source_path) {
            tracing::warn!("rejected paste of {source_path} into {dest_dir}");
            return Err(VaultError::InvalidOperation(format!(
                "cannot paste {source_path} into itself"
            )));
        }
        let dest_parent_id = path_store::require_folder(conn, &dest_dir)?;
        let name = vpath::name_of(&source_path).to_string();
        let dest_path = vpath::join(&dest_dir, &name);

        Ok(Self {
            source_id,
            source_kind,
            source_path,
            name,
            dest_parent_id,
            dest_path,
        })
    }

    /// Applies the collision decision at the destination. Returns `false` when
    /// the transfer should be skipped.
    fn clear_destination(&self, conn: &Connection, on_collision: OnCollision) -> Result<bool, VaultError> {
        match path_store::child(conn, self.dest_parent_id, &self.name)? {
            None => Ok(true),
            Some(_) if on_collision == OnCollision::Skip => Ok(false),
            Some((existing, EntryKind::File))
                if on_collision == OnCollision::Overwrite && self.source_kind == EntryKind::File =>
            {
                path_store::delete_subtree(conn, existing)?;
                Ok(true)
            }
            Some(_) => {
                tracing::warn!("paste target {} already exists", self.dest_path);
                Err(VaultError::Collision(self.dest_path.clone()))
            }
        }
    }
}

fn copy_subtree(
    conn: &Connection,
    source: EntryId,
    dest_parent: EntryId,
    name: &str,
    now: DateTime<Utc>,
) -> Result<EntryId, VaultError> {
    let copy = path_store::duplicate(conn, source, dest_parent, name, now)?;
    content_store::copy(conn, source, copy)?;
    for (child, child_name) in path_store::children(conn, source)? {
        copy_subtree(conn, child, copy, &child_name, now)?;
    }
    Ok(copy)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::migrations::run_migrations;

    fn setup_db() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        run_migrations(&conn).unwrap();
        conn
    }

    fn content_at(conn: &Connection, path: &str) -> Option<Vec<u8>> {
        content_store::get_at(conn, path).unwrap().map(|c| c.data)
    }

    fn content_rows(conn: &Connection) -> i64 {
        conn.query_row("SELECT COUNT(*) FROM contents", [], |row| row.get(0))
            .unwrap()
    }

    #[test]
    fn test_create_folder() {
        let conn = setup_db();
        let docs = create_folder(&conn, "files", "Docs").unwrap();
        assert_eq!(docs.path, "files/Docs");
        assert!(docs.is_folder());

        let err = create_folder(&conn, "files", "Docs").unwrap_err();
        assert!(err.is_collision());
        assert!(create_folder(&conn, "files", "a/b").is_err());
        assert!(matches!(
            create_folder(&conn, "files/missing", "x"),
            Err(VaultError::NotFound(_))
        ));
    }

    #[test]
    fn test_upload_writes_entry_and_content() {
        let conn = setup_db();
        let mut file = UploadFile::new("notes.txt", b"hello".to_vec());
        file.last_modified = Some("2024-03-01T08:00:00Z".parse().unwrap());

        let entry = upload(&conn, "files", &file, OnCollision::Reject).unwrap().unwrap();
        assert_eq!(entry.path, "files/notes.txt");
        assert_eq!(entry.size_bytes, Some(5));
        assert_eq!(entry.mime_type.as_deref(), Some("text/plain"));

        let content = content_store::get_at(&conn, "files/notes.txt").unwrap().unwrap();
        assert_eq!(content.data, b"hello");
        assert_eq!(content.last_modified, file.last_modified);
    }

    #[test]
    fn test_upload_collision_decisions() {
        let conn = setup_db();
        upload(&conn, "files", &UploadFile::new("a.txt", b"one".to_vec()), OnCollision::Reject).unwrap();

        let second = UploadFile::new("a.txt", b"second".to_vec());
        assert!(upload(&conn, "files", &second, OnCollision::Reject).unwrap_err().is_collision());
        assert!(upload(&conn, "files", &second, OnCollision::Skip).unwrap().is_none());
        assert_eq!(content_at(&conn, "files/a.txt").unwrap(), b"one");

        let entry = upload(&conn, "files", &second, OnCollision::Overwrite).unwrap().unwrap();
        assert_eq!(entry.size_bytes, Some(6));
        assert_eq!(content_at(&conn, "files/a.txt").unwrap(), b"second");
        assert_eq!(content_rows(&conn), 1);
    }

    #[test]
    fn test_upload_never_overwrites_folders() {
        let conn = setup_db();
        create_folder(&conn, "files", "Docs").unwrap();
        let file = UploadFile::new("Docs", b"x".to_vec());
        assert!(upload(&conn, "files", &file, OnCollision::Overwrite).unwrap_err().is_collision());
    }

    #[test]
    fn test_upload_files_reports_each_file() {
        let conn = setup_db();
        upload(&conn, "files", &UploadFile::new("taken.txt", b"x".to_vec()), OnCollision::Reject).unwrap();

        let files = vec![
            UploadFile::new("fresh.txt", b"a".to_vec()),
            UploadFile::new("taken.txt", b"b".to_vec()),
            UploadFile::new("bad/name.txt", b"c".to_vec()),
        ];
        let report = upload_files(&conn, "files", &files, OnCollision::Reject).unwrap();

        assert_eq!(report.uploaded, vec!["files/fresh.txt"]);
        assert!(report.skipped.is_empty());
        let failed: Vec<&str> = report.failed.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(failed, vec!["taken.txt", "bad/name.txt"]);
        assert!(!report.is_clean());
        assert_eq!(content_at(&conn, "files/taken.txt").unwrap(), b"x");
    }

    #[test]
    fn test_failed_content_write_rolls_back_entry() {
        let conn = setup_db();
        upload(&conn, "files", &UploadFile::new("old.bin", b"ok".to_vec()), OnCollision::Reject).unwrap();
        conn.execute_batch(
            "CREATE TRIGGER reject_large_content BEFORE INSERT ON contents
             WHEN length(NEW.data) > 3
             BEGIN SELECT RAISE(ABORT, 'content rejected'); END;",
        )
        .unwrap();

        let big = UploadFile::new("big.bin", b"too large".to_vec());
        assert!(matches!(
            upload(&conn, "files", &big, OnCollision::Reject),
            Err(VaultError::Database(_))
        ));
        assert!(path_store::get(&conn, "files/big.bin").unwrap().is_none());

        let replacement = UploadFile::new("old.bin", b"too large".to_vec());
        assert!(upload(&conn, "files", &replacement, OnCollision::Overwrite).is_err());
        let old = path_store::get(&conn, "files/old.bin").unwrap().unwrap();
        assert_eq!(old.size_bytes, Some(2));
        assert_eq!(content_at(&conn, "files/old.bin").unwrap(), b"ok");

        let files = vec![
            UploadFile::new("a.bin", b"a".to_vec()),
            big,
            UploadFile::new("c.bin", b"c".to_vec()),
        ];
        let report = upload_files(&conn, "files", &files, OnCollision::Reject).unwrap();
        assert_eq!(report.uploaded, vec!["files/a.bin", "files/c.bin"]);
        assert_eq!(report.failed.len(), 1);
        assert_eq!(report.failed[0].name, "big.bin");
        assert!(path_store::get(&conn, "files/big.bin").unwrap().is_none());
        assert_eq!(content_rows(&conn), 3);
    }

    #[test]
    fn test_rename_file_moves_content_key() {
        let conn = setup_db();
        let before = upload(&conn, "files", &UploadFile::new("old.txt", b"body".to_vec()), OnCollision::Reject)
            .unwrap()
            .unwrap();

        let after = rename(&conn, "files/old.txt", "new.txt").unwrap();

        assert!(path_store::get(&conn, "files/old.txt").unwrap().is_none());
        assert_eq!(after.path, "files/new.txt");
        assert_eq!(after.name, "new.txt");
        assert_eq!(after.kind, before.kind);
        assert_eq!(after.created_at, before.created_at);
        assert_eq!(after.size_bytes, before.size_bytes);
        assert_eq!(after.mime_type, before.mime_type);
        assert!(after.modified_at >= before.modified_at);
        assert!(content_at(&conn, "files/old.txt").is_none());
        assert_eq!(content_at(&conn, "files/new.txt").unwrap(), b"body");
    }

    #[test]
    fn test_rename_folder_cascades_to_descendants() {
        let conn = setup_db();
        create_folder(&conn, "files", "Docs").unwrap();
        create_folder(&conn, "files/Docs", "Inner").unwrap();
        upload(&conn, "files/Docs/Inner", &UploadFile::new("deep.txt", b"d".to_vec()), OnCollision::Reject)
            .unwrap();

        rename(&conn, "files/Docs", "Documents").unwrap();

        let deep = path_store::get(&conn, "files/Documents/Inner/deep.txt").unwrap().unwrap();
        assert_eq!(deep.parent_path, "files/Documents/Inner");
        assert!(path_store::get(&conn, "files/Docs/Inner").unwrap().is_none());
        assert_eq!(content_at(&conn, "files/Documents/Inner/deep.txt").unwrap(), b"d");
    }

    #[test]
    fn test_rename_rejects_collisions_and_root() {
        let conn = setup_db();
        create_folder(&conn, "files", "A").unwrap();
        create_folder(&conn, "files", "B").unwrap();

        assert!(rename(&conn, "files/A", "B").unwrap_err().is_collision());
        assert!(rename(&conn, "files", "root").is_err());
        assert!(matches!(
            rename(&conn, "files/missing", "x"),
            Err(VaultError::NotFound(_))
        ));
        assert_eq!(rename(&conn, "files/A", "A").unwrap().path, "files/A");
    }

    #[test]
    fn test_copy_leaves_source_untouched() {
        let conn = setup_db();
        create_folder(&conn, "files", "Src").unwrap();
        create_folder(&conn, "files", "Dst").unwrap();
        upload(&conn, "files/Src", &UploadFile::new("a.txt", b"aaa".to_vec()), OnCollision::Reject).unwrap();

        let copied = copy_entry(&conn, "files/Src/a.txt", "files/Dst", OnCollision::Reject)
            .unwrap()
            .unwrap();

        assert_eq!(copied.path, "files/Dst/a.txt");
        assert_eq!(copied.parent_path, "files/Dst");
        assert_eq!(content_at(&conn, "files/Src/a.txt").unwrap(), b"aaa");
        assert_eq!(content_at(&conn, "files/Dst/a.txt").unwrap(), b"aaa");
        assert_eq!(content_rows(&conn), 2);
    }

    #[test]
    fn test_copy_folder_duplicates_subtree() {
        let conn = setup_db();
        create_folder(&conn, "files", "Src").unwrap();
        create_folder(&conn, "files/Src", "Sub").unwrap();
        upload(&conn, "files/Src/Sub", &UploadFile::new("x.bin", vec![1, 2]), OnCollision::Reject).unwrap();
        create_folder(&conn, "files", "Dst").unwrap();

        copy_entry(&conn, "files/Src", "files/Dst", OnCollision::Reject).unwrap();

        assert!(path_store::get(&conn, "files/Dst/Src/Sub").unwrap().unwrap().is_folder());
        assert_eq!(content_at(&conn, "files/Dst/Src/Sub/x.bin").unwrap(), vec![1, 2]);
        assert_eq!(content_at(&conn, "files/Src/Sub/x.bin").unwrap(), vec![1, 2]);
    }

    #[test]
    fn test_copy_onto_itself_is_a_collision() {
        let conn = setup_db();
        upload(&conn, "files", &UploadFile::new("a.txt", b"a".to_vec()), OnCollision::Reject).unwrap();

        let err = copy_entry(&conn, "files/a.txt", "files", OnCollision::Overwrite).unwrap_err();
        assert!(err.is_collision());
        assert_eq!(content_at(&conn, "files/a.txt").unwrap(), b"a");
        assert!(copy_entry(&conn, "files/a.txt", "files", OnCollision::Skip).unwrap().is_none());
    }

    #[test]
    fn test_move_removes_source_after_destination_write() {
        let conn = setup_db();
        create_folder(&conn, "files", "Dst").unwrap();
        upload(&conn, "files", &UploadFile::new("a.txt", b"moving".to_vec()), OnCollision::Reject).unwrap();

        let moved = move_entry(&conn, "files/a.txt", "files/Dst", OnCollision::Reject)
            .unwrap()
            .unwrap();

        assert_eq!(moved.path, "files/Dst/a.txt");
        assert!(path_store::get(&conn, "files/a.txt").unwrap().is_none());
        assert!(content_at(&conn, "files/a.txt").is_none());
        assert_eq!(content_at(&conn, "files/Dst/a.txt").unwrap(), b"moving");
    }

    #[test]
    fn test_failed_move_keeps_source() {
        let conn = setup_db();
        create_folder(&conn, "files", "Dst").unwrap();
        upload(&conn, "files/Dst", &UploadFile::new("a.txt", b"old".to_vec()), OnCollision::Reject).unwrap();
        upload(&conn, "files", &UploadFile::new("a.txt", b"new".to_vec()), OnCollision::Reject).unwrap();

        let err = move_entry(&conn, "files/a.txt", "files/Dst", OnCollision::Reject).unwrap_err();
        assert!(err.is_collision());
        assert_eq!(content_at(&conn, "files/a.txt").unwrap(), b"new");

        move_entry(&conn, "files/a.txt", "files/Dst", OnCollision::Overwrite).unwrap();
        assert!(content_at(&conn, "files/a.txt").is_none());
        assert_eq!(content_at(&conn, "files/Dst/a.txt").unwrap(), b"new");
        assert_eq!(content_rows(&conn), 1);
    }

    #[test]
    fn test_folder_cannot_be_pasted_into_itself() {
        let conn = setup_db();
        create_folder(&conn, "files", "A").unwrap();
        create_folder(&conn, "files/A", "B").unwrap();

        assert!(matches!(
            move_entry(&conn, "files/A", "files/A/B", OnCollision::Reject),
            Err(VaultError::InvalidOperation(_))
        ));
        assert!(matches!(
            copy_entry(&conn, "files/A", "files/A", OnCollision::Reject),
            Err(VaultError::InvalidOperation(_))
        ));
    }

    #[test]
    fn test_paste_dispatches_on_action() {
        let conn = setup_db();
        create_folder(&conn, "files", "Dst").unwrap();
        upload(&conn, "files", &UploadFile::new("a.txt", b"a".to_vec()), OnCollision::Reject).unwrap();
        let id = path_store::resolve(&conn, "files/a.txt").unwrap().unwrap();
        let mut item = ClipboardItem {
            id,
            path: "files/a.txt".to_string(),
            name: "a.txt".to_string(),
            kind: EntryKind::File,
            action: ClipboardAction::Copy,
        };

        paste(&conn, &item, "files/Dst", OnCollision::Reject).unwrap();
        assert!(path_store::get(&conn, "files/a.txt").unwrap().is_some());

        item.action = ClipboardAction::Cut;
        paste(&conn, &item, "files/Dst", OnCollision::Overwrite).unwrap();
        assert!(path_store::get(&conn, "files/a.txt").unwrap().is_none());
        assert!(path_store::get(&conn, "files/Dst/a.txt").unwrap().is_some());
    }

    #[test]
    fn test_paste_follows_renamed_source() {
        let conn = setup_db();
        create_folder(&conn, "files", "Dst").unwrap();
        upload(&conn, "files", &UploadFile::new("a.txt", b"cut me".to_vec()), OnCollision::Reject).unwrap();
        let item = ClipboardItem {
            id: path_store::resolve(&conn, "files/a.txt").unwrap().unwrap(),
            path: "files/a.txt".to_string(),
            name: "a.txt".to_string(),
            kind: EntryKind::File,
            action: ClipboardAction::Cut,
        };

        rename(&conn, "files/a.txt", "kept.txt").unwrap();
        upload(&conn, "files", &UploadFile::new("a.txt", b"OTHER".to_vec()), OnCollision::Reject).unwrap();

        let moved = paste(&conn, &item, "files/Dst", OnCollision::Reject).unwrap().unwrap();
        assert_eq!(moved.path, "files/Dst/kept.txt");
        assert_eq!(content_at(&conn, "files/Dst/kept.txt").unwrap(), b"cut me");
        assert_eq!(content_at(&conn, "files/a.txt").unwrap(), b"OTHER");
        assert!(path_store::get(&conn, "files/kept.txt").unwrap().is_none());

        delete(&conn, "files/Dst/kept.txt").unwrap();
        assert!(matches!(
            paste(&conn, &item, "files", OnCollision::Reject),
            Err(VaultError::NotFound(_))
        ));
    }

    #[test]
    fn test_delete_folder_removes_subtree_and_content() {
        let conn = setup_db();
        create_folder(&conn, "files", "Docs").unwrap();
        create_folder(&conn, "files/Docs", "Inner").unwrap();
        upload(&conn, "files/Docs", &UploadFile::new("a.txt", b"a".to_vec()), OnCollision::Reject).unwrap();
        upload(&conn, "files/Docs/Inner", &UploadFile::new("b.txt", b"b".to_vec()), OnCollision::Reject).unwrap();
        upload(&conn, "files", &UploadFile::new("keep.txt", b"k".to_vec()), OnCollision::Reject).unwrap();

        assert_eq!(delete(&conn, "files/Docs").unwrap(), 4);

        let paths: Vec<String> = path_store::list_all(&conn).unwrap().into_iter().map(|e| e.path).collect();
        assert_eq!(paths, vec!["files", "files/keep.txt"]);
        assert_eq!(content_rows(&conn), 1);
        assert!(matches!(delete(&conn, "files/Docs"), Err(VaultError::NotFound(_))));
        assert!(delete(&conn, "files").is_err());
    }
}
