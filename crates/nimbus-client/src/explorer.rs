//! File-explorer view model.
//!
//! A single store holds everything the explorer shows: the file list and
//! folder set synced from the server, session-local folders, the locally
//! persisted trash list, the active view, and the two orthogonal filters
//! (search term, selection). All mutations go through store methods so
//! there is one source of truth to sync against server responses.
//!
//! Trash is client-only. Moving a file to trash removes it locally and
//! the caller deletes it server-side; restoring only reinserts the local
//! copy, so a re-sync from the server makes restored files disappear
//! again. That divergence is inherited behavior, deliberately kept.

use std::collections::HashSet;

use chrono::{DateTime, Utc};

use nimbus_core::error::AppError;
use nimbus_core::types::FileId;
use nimbus_entity::file::FileRecord;
use nimbus_entity::trash::TrashEntry;

/// The active explorer view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExplorerView {
    /// Folder grid plus all files.
    Home,
    /// Files under one folder label.
    Folder(String),
    /// The client-local trash list.
    Trash,
}

/// A server listing to sync the store from.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct Listing {
    /// Distinct folder labels derived server-side.
    pub folders: Vec<String>,
    /// All of the user's records.
    pub files: Vec<FileRecord>,
}

/// The explorer store.
#[derive(Debug)]
pub struct ExplorerStore {
    /// Active file records, synced from the server (then locally
    /// mutated by trash/restore).
    files: Vec<FileRecord>,
    /// Folder labels derived from server records.
    server_folders: Vec<String>,
    /// Folder labels created this session with no backing file. Never
    /// persisted anywhere: they vanish when the session ends.
    local_folders: Vec<String>,
    /// The locally persisted trash list.
    trash: Vec<TrashEntry>,
    /// Active view.
    view: ExplorerView,
    /// Case-insensitive name filter.
    search: String,
    /// Selected file ids within the active view.
    selection: HashSet<FileId>,
}

impl ExplorerStore {
    /// Create a store, seeding the trash list from persisted state.
    pub fn new(trash: Vec<TrashEntry>) -> Self {
        Self {
            files: Vec::new(),
            server_folders: Vec::new(),
            local_folders: Vec::new(),
            trash,
            view: ExplorerView::Home,
            search: String::new(),
            selection: HashSet::new(),
        }
    }

    /// Replace files and server-derived folders from a listing response.
    ///
    /// Session-local folders and the trash list are untouched, which is
    /// why trashed-then-restored files reappear in their original folder
    /// after a sync, and why empty folders survive only until the
    /// session ends.
    pub fn sync_listing(&mut self, listing: Listing) {
        self.files = listing.files;
        self.server_folders = listing.folders;
    }

    // ── Views ────────────────────────────────────────────────

    /// The active view.
    pub fn view(&self) -> &ExplorerView {
        &self.view
    }

    /// Switch to a folder view. Selection is cleared on every
    /// transition.
    pub fn open_folder(&mut self, name: &str) {
        self.view = ExplorerView::Folder(name.to_string());
        self.selection.clear();
    }

    /// Switch to the trash view.
    pub fn open_trash(&mut self) {
        self.view = ExplorerView::Trash;
        self.selection.clear();
    }

    /// Return to the home view.
    pub fn go_home(&mut self) {
        self.view = ExplorerView::Home;
        self.selection.clear();
    }

    /// Breadcrumb path for the active view.
    pub fn breadcrumb(&self) -> Vec<String> {
        match &self.view {
            ExplorerView::Home => vec!["Home".to_string()],
            ExplorerView::Folder(name) => vec!["Home".to_string(), name.clone()],
            ExplorerView::Trash => vec!["Home".to_string(), "Trash".to_string()],
        }
    }

    // ── Filters ──────────────────────────────────────────────

    /// Set the search term.
    pub fn set_search(&mut self, term: &str) {
        self.search = term.to_string();
    }

    /// The current search term.
    pub fn search(&self) -> &str {
        &self.search
    }

    /// Toggle selection of a file in the active view.
    pub fn toggle_select(&mut self, id: FileId) {
        if !self.selection.insert(id) {
            self.selection.remove(&id);
        }
    }

    /// The selected file ids.
    pub fn selection(&self) -> &HashSet<FileId> {
        &self.selection
    }

    // ── Folders ──────────────────────────────────────────────

    /// All folder labels: server-derived plus session-local, deduped.
    pub fn folders(&self) -> Vec<String> {
        let mut folders = self.server_folders.clone();
        for name in &self.local_folders {
            if !folders.contains(name) {
                folders.push(name.clone());
            }
        }
        folders
    }

    /// Add a session-local folder.
    pub fn create_folder(&mut self, name: &str) -> Result<(), AppError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(AppError::validation("Please enter a folder name"));
        }
        if self.folders().iter().any(|f| f == name) {
            return Err(AppError::conflict("Folder already exists"));
        }
        self.local_folders.push(name.to_string());
        Ok(())
    }

    // ── Files ────────────────────────────────────────────────

    /// All active records.
    pub fn files(&self) -> &[FileRecord] {
        &self.files
    }

    /// Files visible in the active view after folder and search
    /// filtering. In the trash view this is empty; use
    /// [`Self::visible_trash`].
    pub fn visible_files(&self) -> Vec<&FileRecord> {
        match &self.view {
            ExplorerView::Trash => Vec::new(),
            ExplorerView::Home => self
                .files
                .iter()
                .filter(|f| self.matches_search(&f.name))
                .collect(),
            ExplorerView::Folder(folder) => self
                .files
                .iter()
                .filter(|f| &f.folder == folder && self.matches_search(&f.name))
                .collect(),
        }
    }

    /// Trash entries visible in the trash view after search filtering.
    pub fn visible_trash(&self) -> Vec<&TrashEntry> {
        self.trash
            .iter()
            .filter(|entry| self.matches_search(&entry.file.name))
            .collect()
    }

    /// The full trash list (for persistence).
    pub fn trash(&self) -> &[TrashEntry] {
        &self.trash
    }

    /// Resolve a file in the active list by exact name or id string.
    pub fn resolve_file(&self, name_or_id: &str) -> Result<&FileRecord, AppError> {
        if let Ok(id) = name_or_id.parse::<FileId>() {
            if let Some(record) = self.files.iter().find(|f| f.id == id) {
                return Ok(record);
            }
        }

        let mut matches = self.files.iter().filter(|f| f.name == name_or_id);
        match (matches.next(), matches.next()) {
            (Some(record), None) => Ok(record),
            (Some(_), Some(_)) => Err(AppError::conflict(format!(
                "Multiple files named '{name_or_id}'; use the file id"
            ))),
            (None, _) => Err(AppError::not_found(format!("File not found: {name_or_id}"))),
        }
    }

    /// Resolve a trash entry by exact name or id string.
    pub fn resolve_trash(&self, name_or_id: &str) -> Result<&TrashEntry, AppError> {
        if let Ok(id) = name_or_id.parse::<FileId>() {
            if let Some(entry) = self.trash.iter().find(|e| e.file.id == id) {
                return Ok(entry);
            }
        }

        let mut matches = self.trash.iter().filter(|e| e.file.name == name_or_id);
        match (matches.next(), matches.next()) {
            (Some(entry), None) => Ok(entry),
            (Some(_), Some(_)) => Err(AppError::conflict(format!(
                "Multiple trashed files named '{name_or_id}'; use the file id"
            ))),
            (None, _) => Err(AppError::not_found(format!(
                "Not in trash: {name_or_id}"
            ))),
        }
    }

    // ── Trash ────────────────────────────────────────────────

    /// Move a file to trash: removed from the active list, appended to
    /// the trash list with a deletion timestamp and its original folder.
    ///
    /// The caller is responsible for the server delete call and for
    /// persisting the trash list; the local mutation is complete either
    /// way.
    pub fn move_to_trash(
        &mut self,
        id: FileId,
        deleted_at: DateTime<Utc>,
    ) -> Result<TrashEntry, AppError> {
        let index = self
            .files
            .iter()
            .position(|f| f.id == id)
            .ok_or_else(|| AppError::not_found("File not found"))?;

        let record = self.files.remove(index);
        let entry = TrashEntry::from_record(record, deleted_at);
        self.trash.push(entry.clone());
        self.selection.clear();
        Ok(entry)
    }

    /// Restore a trashed file into the active list, trash fields
    /// stripped. No server call is involved: the record does not
    /// actually exist server-side any more.
    pub fn restore(&mut self, id: FileId) -> Result<FileRecord, AppError> {
        let index = self
            .trash
            .iter()
            .position(|e| e.file.id == id)
            .ok_or_else(|| AppError::not_found("Not in trash"))?;

        let record = self.trash.remove(index).into_restored();
        self.files.push(record.clone());
        self.selection.clear();
        Ok(record)
    }

    /// Permanently remove one entry from the trash list.
    pub fn purge(&mut self, id: FileId) -> Result<TrashEntry, AppError> {
        let index = self
            .trash
            .iter()
            .position(|e| e.file.id == id)
            .ok_or_else(|| AppError::not_found("Not in trash"))?;

        self.selection.clear();
        Ok(self.trash.remove(index))
    }

    /// Remove every entry from the trash list, returning how many were
    /// dropped.
    pub fn empty_trash(&mut self) -> usize {
        let count = self.trash.len();
        self.trash.clear();
        self.selection.clear();
        count
    }

    fn matches_search(&self, name: &str) -> bool {
        name.to_lowercase().contains(&self.search.to_lowercase())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nimbus_core::types::UserId;

    fn record(name: &str, folder: &str) -> FileRecord {
        FileRecord {
            id: FileId::new(),
            owner_id: UserId::new(),
            folder: folder.to_string(),
            name: name.to_string(),
            size_bytes: 10,
            mime_type: None,
            storage_key: format!("k/{name}"),
            uploaded_at: Utc::now(),
        }
    }

    fn listing(files: Vec<FileRecord>) -> Listing {
        let mut folders: Vec<String> = files.iter().map(|f| f.folder.clone()).collect();
        folders.sort();
        folders.dedup();
        Listing { folders, files }
    }

    fn store_with(files: Vec<FileRecord>) -> ExplorerStore {
        let mut store = ExplorerStore::new(Vec::new());
        store.sync_listing(listing(files));
        store
    }

    #[test]
    fn test_sync_derives_folder_set() {
        let store = store_with(vec![
            record("a.txt", "docs"),
            record("b.txt", "docs"),
            record("c.txt", "work"),
        ]);
        assert_eq!(store.folders(), vec!["docs".to_string(), "work".to_string()]);
    }

    #[test]
    fn test_folder_view_filters_by_folder_and_search() {
        let mut store = store_with(vec![
            record("report.pdf", "docs"),
            record("notes.txt", "docs"),
            record("report.txt", "work"),
        ]);

        store.open_folder("docs");
        assert_eq!(store.visible_files().len(), 2);

        store.set_search("REPORT");
        let visible = store.visible_files();
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].name, "report.pdf");
    }

    #[test]
    fn test_home_view_ignores_folder_filter() {
        let mut store = store_with(vec![
            record("a.txt", "docs"),
            record("b.txt", "work"),
        ]);
        store.open_folder("docs");
        store.go_home();
        assert_eq!(store.visible_files().len(), 2);
    }

    #[test]
    fn test_selection_cleared_on_every_transition() {
        let files = vec![record("a.txt", "docs")];
        let id = files[0].id;
        let mut store = store_with(files);

        store.toggle_select(id);
        assert_eq!(store.selection().len(), 1);

        store.open_folder("docs");
        assert!(store.selection().is_empty());

        store.toggle_select(id);
        store.open_trash();
        assert!(store.selection().is_empty());

        store.toggle_select(id);
        store.go_home();
        assert!(store.selection().is_empty());
    }

    #[test]
    fn test_local_folder_lost_on_new_session() {
        let mut store = store_with(vec![record("a.txt", "docs")]);
        store.create_folder("Work").unwrap();
        assert!(store.folders().contains(&"Work".to_string()));

        // A new session rebuilds the store from persisted state, which
        // holds only the trash list; the empty folder is gone.
        let mut next_session = ExplorerStore::new(store.trash().to_vec());
        next_session.sync_listing(listing(vec![record("a.txt", "docs")]));
        assert!(!next_session.folders().contains(&"Work".to_string()));
    }

    #[test]
    fn test_create_folder_rejects_blank_and_duplicate() {
        let mut store = store_with(vec![record("a.txt", "docs")]);
        assert!(store.create_folder("  ").is_err());
        assert!(store.create_folder("docs").is_err());
        store.create_folder("new").unwrap();
        assert!(store.create_folder("new").is_err());
    }

    #[test]
    fn test_move_to_trash_keeps_original_folder() {
        let files = vec![record("a.txt", "docs")];
        let id = files[0].id;
        let mut store = store_with(files);

        let entry = store.move_to_trash(id, Utc::now()).unwrap();
        assert_eq!(entry.original_folder, "docs");
        assert!(store.files().is_empty());
        assert_eq!(store.trash().len(), 1);
    }

    #[test]
    fn test_trash_view_searches_trash_only() {
        let files = vec![record("a.txt", "docs"), record("b.txt", "docs")];
        let id = files[0].id;
        let mut store = store_with(files);

        store.move_to_trash(id, Utc::now()).unwrap();
        store.open_trash();

        assert!(store.visible_files().is_empty());
        assert_eq!(store.visible_trash().len(), 1);

        store.set_search("b");
        assert!(store.visible_trash().is_empty());
    }

    #[test]
    fn test_restore_reinserts_without_trash_fields() {
        let files = vec![record("a.txt", "docs")];
        let id = files[0].id;
        let mut store = store_with(files);

        store.move_to_trash(id, Utc::now()).unwrap();
        let restored = store.restore(id).unwrap();

        assert_eq!(restored.folder, "docs");
        assert_eq!(store.files().len(), 1);
        assert!(store.trash().is_empty());
    }

    #[test]
    fn test_trash_divergence_survives_sync() {
        // Trash a file, then sync from a server that still returns it
        // (e.g. the delete call failed silently). The file reappears in
        // the active list while the trash list still shows it.
        let files = vec![record("a.txt", "docs")];
        let id = files[0].id;
        let mut store = store_with(files.clone());

        store.move_to_trash(id, Utc::now()).unwrap();
        store.sync_listing(listing(files));

        assert_eq!(store.files().len(), 1);
        assert_eq!(store.trash().len(), 1);
    }

    #[test]
    fn test_purge_and_empty_trash() {
        let files = vec![record("a.txt", "docs"), record("b.txt", "docs")];
        let (id_a, id_b) = (files[0].id, files[1].id);
        let mut store = store_with(files);

        store.move_to_trash(id_a, Utc::now()).unwrap();
        store.move_to_trash(id_b, Utc::now()).unwrap();

        store.purge(id_a).unwrap();
        assert_eq!(store.trash().len(), 1);
        assert!(store.purge(id_a).is_err());

        assert_eq!(store.empty_trash(), 1);
        assert!(store.trash().is_empty());
    }

    #[test]
    fn test_resolve_file_by_name_and_id() {
        let files = vec![record("a.txt", "docs"), record("dup.txt", "docs")];
        let id = files[0].id;
        let mut store = store_with(files);
        store
            .sync_listing(listing(vec![
                record("dup.txt", "docs"),
                record("dup.txt", "work"),
                {
                    let mut r = record("a.txt", "docs");
                    r.id = id;
                    r
                },
            ]));

        assert_eq!(store.resolve_file("a.txt").unwrap().id, id);
        assert_eq!(store.resolve_file(&id.to_string()).unwrap().id, id);
        assert!(store.resolve_file("dup.txt").is_err());
        assert!(store.resolve_file("missing").is_err());
    }

    #[test]
    fn test_breadcrumb() {
        let mut store = store_with(vec![]);
        assert_eq!(store.breadcrumb(), vec!["Home"]);
        store.open_folder("docs");
        assert_eq!(store.breadcrumb(), vec!["Home", "docs"]);
        store.open_trash();
        assert_eq!(store.breadcrumb(), vec!["Home", "Trash"]);
    }
}
