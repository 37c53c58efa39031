//! In-memory folder and file store for notes
//!
//! The store is the single owner of every [`Folder`] and [`NoteFile`]. Records
//! live in keyed maps; each folder keeps the ordered list of file ids it owns and
//! an owner index maps every file back to its folder.

use std::collections::HashMap;
use std::fmt;
use std::time::{Duration, SystemTime};

use super::error::{RecordKind, Result, StoreError};

/// Name given to files created from the "New note" action
pub const DEFAULT_FILE_NAME: &str = "Untitled.txt";

/// Opaque folder identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FolderId(String);

impl FolderId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FolderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Opaque file identifier, unique across the whole store
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FileId(String);

impl FileId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A folder record
#[derive(Debug, Clone, PartialEq)]
pub struct Folder {
    pub id: FolderId,
    pub name: String,
    /// Files owned by this folder, in creation order
    pub file_ids: Vec<FileId>,
    pub created_at: SystemTime,
    pub updated_at: SystemTime,
}

/// A plain-text note
#[derive(Debug, Clone, PartialEq)]
pub struct NoteFile {
    pub id: FileId,
    pub name: String,
    pub content: String,
    pub created_at: SystemTime,
    pub updated_at: SystemTime,
}

/// Owned copy of a folder together with its files
#[derive(Debug, Clone, PartialEq)]
pub struct FolderSnapshot {
    pub id: FolderId,
    pub name: String,
    pub files: Vec<NoteFile>,
    pub created_at: SystemTime,
    pub updated_at: SystemTime,
}

/// Wall clock that never hands out the same instant twice
#[derive(Debug, Default)]
struct Clock {
    last: Option<SystemTime>,
}

impl Clock {
    fn now(&mut self) -> SystemTime {
        let now = SystemTime::now();
        let now = match self.last {
            Some(last) if now <= last => last + Duration::from_micros(1),
            _ => now,
        };
        self.last = Some(now);
        now
    }
}

/// Owner of all folders and files
#[derive(Debug)]
pub struct DocumentStore {
    folders: HashMap<FolderId, Folder>,
    /// Folder ids in insertion order
    order: Vec<FolderId>,
    files: HashMap<FileId, NoteFile>,
    /// Owning folder of every file
    owners: HashMap<FileId, FolderId>,
    next_id: u64,
    clock: Clock,
}

impl Default for DocumentStore {
    /// Store seeded with a "Default" folder holding a welcome note
    fn default() -> Self {
        let mut store = Self::empty();
        let now = store.clock.now();

        let folder_id = FolderId::new("default");
        let file_id = FileId::new("welcome");

        store.files.insert(
            file_id.clone(),
            NoteFile {
                id: file_id.clone(),
                name: "Welcome.txt".to_string(),
                content: "Welcome to Notebook!".to_string(),
                created_at: now,
                updated_at: now,
            },
        );
        store.owners.insert(file_id.clone(), folder_id.clone());
        store.folders.insert(
            folder_id.clone(),
            Folder {
                id: folder_id.clone(),
                name: "Default".to_string(),
                file_ids: vec![file_id],
                created_at: now,
                updated_at: now,
            },
        );
        store.order.push(folder_id);
        store
    }
}

impl DocumentStore {
    fn empty() -> Self {
        Self {
            folders: HashMap::new(),
            order: Vec::new(),
            files: HashMap::new(),
            owners: HashMap::new(),
            next_id: 0,
            clock: Clock::default(),
        }
    }

    /// Create a store holding a single empty folder
    #[cfg(test)]
    pub fn new(folder_name: &str) -> Result<Self> {
        let mut store = Self::empty();
        store.create_folder(folder_name)?;
        Ok(store)
    }

    /// Trim a name and reject it when nothing is left
    fn validate_name(name: &str, kind: RecordKind) -> Result<String> {
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(StoreError::Validation { kind });
        }
        Ok(trimmed.to_string())
    }

    fn fresh_folder_id(&mut self) -> FolderId {
        loop {
            self.next_id += 1;
            let id = FolderId::new(format!("folder-{}", self.next_id));
            if !self.folders.contains_key(&id) {
                return id;
            }
        }
    }

    fn fresh_file_id(&mut self) -> FileId {
        loop {
            self.next_id += 1;
            let id = FileId::new(format!("file-{}", self.next_id));
            if !self.files.contains_key(&id) {
                return id;
            }
        }
    }

    /// Create a new, empty folder at the end of the folder list
    pub fn create_folder(&mut self, name: &str) -> Result<Folder> {
        let name = Self::validate_name(name, RecordKind::Folder)?;
        let id = self.fresh_folder_id();
        let now = self.clock.now();

        let folder = Folder {
            id: id.clone(),
            name,
            file_ids: Vec::new(),
            created_at: now,
            updated_at: now,
        };
        self.folders.insert(id.clone(), folder.clone());
        self.order.push(id);

        tracing::info!("Created folder {} ({})", folder.name, folder.id);
        Ok(folder)
    }

    /// Rename a folder
    pub fn rename_folder(&mut self, folder_id: &FolderId, name: &str) -> Result<()> {
        let name = Self::validate_name(name, RecordKind::Folder)?;
        let now = self.clock.now();
        let folder = self
            .folders
            .get_mut(folder_id)
            .ok_or_else(|| StoreError::folder_not_found(folder_id.as_str()))?;

        folder.name = name;
        folder.updated_at = now;
        Ok(())
    }

    /// Delete a folder together with every file it owns.
    ///
    /// Confirming the destructive intent is the caller's job.
    pub fn delete_folder(&mut self, folder_id: &FolderId) -> Result<()> {
        if self.order.len() <= 1 {
            return Err(StoreError::Invariant("Cannot delete the only folder"));
        }
        let folder = self
            .folders
            .remove(folder_id)
            .ok_or_else(|| StoreError::folder_not_found(folder_id.as_str()))?;

        for file_id in &folder.file_ids {
            self.files.remove(file_id);
            self.owners.remove(file_id);
        }
        self.order.retain(|id| id != folder_id);

        tracing::info!(
            "Deleted folder {} ({}) and {} file(s)",
            folder.name,
            folder.id,
            folder.file_ids.len()
        );
        Ok(())
    }

    /// Create a file at the end of a folder's file list
    pub fn create_file(&mut self, folder_id: &FolderId, name: &str, content: &str) -> Result<NoteFile> {
        if !self.folders.contains_key(folder_id) {
            return Err(StoreError::folder_not_found(folder_id.as_str()));
        }
        let name = Self::validate_name(name, RecordKind::File)?;
        let id = self.fresh_file_id();
        let now = self.clock.now();

        let file = NoteFile {
            id: id.clone(),
            name,
            content: content.to_string(),
            created_at: now,
            updated_at: now,
        };
        self.files.insert(id.clone(), file.clone());
        self.owners.insert(id.clone(), folder_id.clone());
        if let Some(folder) = self.folders.get_mut(folder_id) {
            folder.file_ids.push(id);
            folder.updated_at = now;
        }

        tracing::info!("Created file {} ({}) in {}", file.name, file.id, folder_id);
        Ok(file)
    }

    /// Create an empty [`DEFAULT_FILE_NAME`] note
    pub fn create_untitled_file(&mut self, folder_id: &FolderId) -> Result<NoteFile> {
        self.create_file(folder_id, DEFAULT_FILE_NAME, "")
    }

    /// Remove a file from the folder that owns it
    pub fn delete_file(&mut self, folder_id: &FolderId, file_id: &FileId) -> Result<()> {
        if !self.folders.contains_key(folder_id) {
            return Err(StoreError::folder_not_found(folder_id.as_str()));
        }
        if self.owners.get(file_id) != Some(folder_id) {
            return Err(StoreError::file_not_found(file_id.as_str()));
        }

        let now = self.clock.now();
        self.files.remove(file_id);
        self.owners.remove(file_id);
        if let Some(folder) = self.folders.get_mut(folder_id) {
            folder.file_ids.retain(|id| id != file_id);
            folder.updated_at = now;
        }

        tracing::info!("Deleted file {} from {}", file_id, folder_id);
        Ok(())
    }

    /// Replace a file's content
    pub fn update_file_content(&mut self, file_id: &FileId, content: impl Into<String>) -> Result<()> {
        let now = self.clock.now();
        let file = self
            .files
            .get_mut(file_id)
            .ok_or_else(|| StoreError::file_not_found(file_id.as_str()))?;

        file.content = content.into();
        file.updated_at = now;
        tracing::debug!("Updated content of {}", file_id);
        Ok(())
    }

    /// Rename a file
    pub fn rename_file(&mut self, file_id: &FileId, name: &str) -> Result<()> {
        let name = Self::validate_name(name, RecordKind::File)?;
        let now = self.clock.now();
        let file = self
            .files
            .get_mut(file_id)
            .ok_or_else(|| StoreError::file_not_found(file_id.as_str()))?;

        file.name = name;
        file.updated_at = now;
        Ok(())
    }

    /// Owned copies of all folders and their files, in insertion order
    pub fn list_folders(&self) -> Vec<FolderSnapshot> {
        self.folders()
            .map(|folder| FolderSnapshot {
                id: folder.id.clone(),
                name: folder.name.clone(),
                files: folder
                    .file_ids
                    .iter()
                    .filter_map(|id| self.files.get(id).cloned())
                    .collect(),
                created_at: folder.created_at,
                updated_at: folder.updated_at,
            })
            .collect()
    }

    /// Iterate folders in insertion order
    pub fn folders(&self) -> impl Iterator<Item = &Folder> {
        self.order.iter().filter_map(|id| self.folders.get(id))
    }

    pub fn folder(&self, folder_id: &FolderId) -> Option<&Folder> {
        self.folders.get(folder_id)
    }

    pub fn file(&self, file_id: &FileId) -> Option<&NoteFile> {
        self.files.get(file_id)
    }

    /// The folder that owns a file
    pub fn folder_of(&self, file_id: &FileId) -> Option<&FolderId> {
        self.owners.get(file_id)
    }

    pub fn contains_file(&self, file_id: &FileId) -> bool {
        self.files.contains_key(file_id)
    }

    pub fn first_folder_id(&self) -> Option<&FolderId> {
        self.order.first()
    }

    pub fn folder_count(&self) -> usize {
        self.order.len()
    }

    pub fn file_count(&self) -> usize {
        self.files.len()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    fn default_id() -> FolderId {
        FolderId::new("default")
    }

    #[test]
    fn test_seed_store() {
        let store = DocumentStore::default();
        let folders = store.list_folders();
        assert_eq!(folders.len(), 1);
        assert_eq!(folders[0].name, "Default");
        assert_eq!(folders[0].files.len(), 1);
        assert_eq!(folders[0].files[0].name, "Welcome.txt");
        assert_eq!(folders[0].files[0].content, "Welcome to Notebook!");
    }

    #[test]
    fn test_ids_are_unique() {
        let mut store = DocumentStore::default();
        let mut folder_ids = HashSet::new();
        let mut file_ids = HashSet::new();
        folder_ids.insert(default_id());
        file_ids.insert(FileId::new("welcome"));

        for i in 0..20 {
            let folder = store.create_folder(&format!("Folder {}", i)).unwrap();
            assert!(folder_ids.insert(folder.id.clone()));
            for _ in 0..3 {
                let file = store.create_untitled_file(&folder.id).unwrap();
                assert!(file_ids.insert(file.id));
            }
            let file = store.create_untitled_file(&default_id()).unwrap();
            assert!(file_ids.insert(file.id));
        }

        assert_eq!(store.folder_count(), folder_ids.len());
        assert_eq!(store.file_count(), file_ids.len());
    }

    #[test]
    fn test_create_folder_rejects_blank_name() {
        let mut store = DocumentStore::default();
        let err = store.create_folder("   ").unwrap_err();
        assert_eq!(
            err,
            StoreError::Validation {
                kind: RecordKind::Folder
            }
        );
        assert_eq!(store.folder_count(), 1);
    }

    #[test]
    fn test_create_folder_trims_name() {
        let mut store = DocumentStore::default();
        let folder = store.create_folder("  Work ").unwrap();
        assert_eq!(folder.name, "Work");
        assert!(folder.file_ids.is_empty());
        assert_eq!(folder.created_at, folder.updated_at);
        assert_eq!(store.list_folders()[1].id, folder.id);
    }

    #[test]
    fn test_rename_folder_rejects_empty_names() {
        let mut store = DocumentStore::default();
        let work = store.create_folder("Work").unwrap();
        store.create_file(&work.id, "a.txt", "").unwrap();

        for name in ["", "   "] {
            let err = store.rename_folder(&work.id, name).unwrap_err();
            assert!(matches!(err, StoreError::Validation { .. }));
            assert_eq!(store.folder(&work.id).unwrap().name, "Work");
        }
    }

    #[test]
    fn test_rename_folder() {
        let mut store = DocumentStore::default();
        let before = store.folder(&default_id()).unwrap().updated_at;
        store.rename_folder(&default_id(), "Inbox").unwrap();

        let folder = store.folder(&default_id()).unwrap();
        assert_eq!(folder.name, "Inbox");
        assert!(folder.updated_at > before);

        let err = store.rename_folder(&FolderId::new("missing"), "x").unwrap_err();
        assert!(matches!(err, StoreError::NotFound { kind: RecordKind::Folder, .. }));
    }

    #[test]
    fn test_delete_only_folder_is_rejected() {
        let mut store = DocumentStore::default();
        let err = store.delete_folder(&default_id()).unwrap_err();
        assert!(matches!(err, StoreError::Invariant(_)));
        assert_eq!(store.folder_count(), 1);
        assert_eq!(store.file_count(), 1);
        assert_eq!(store.list_folders()[0].files[0].name, "Welcome.txt");
    }

    #[test]
    fn test_delete_folder_cascades() {
        let mut store = DocumentStore::default();
        let work = store.create_folder("Work").unwrap();
        let a = store.create_file(&work.id, "a.txt", "a").unwrap();
        let b = store.create_file(&work.id, "b.txt", "b").unwrap();

        store.delete_folder(&work.id).unwrap();
        assert!(store.folder(&work.id).is_none());
        assert!(!store.contains_file(&a.id));
        assert!(!store.contains_file(&b.id));
        assert!(store.folder_of(&a.id).is_none());
        assert_eq!(store.file_count(), 1);

        let err = store.delete_folder(&work.id).unwrap_err();
        assert!(matches!(err, StoreError::Invariant(_)));
    }

    #[test]
    fn test_delete_unknown_folder() {
        let mut store = DocumentStore::default();
        store.create_folder("Work").unwrap();
        let err = store.delete_folder(&FolderId::new("nope")).unwrap_err();
        assert!(matches!(err, StoreError::NotFound { .. }));
        assert_eq!(store.folder_count(), 2);
    }

    #[test]
    fn test_create_file_is_owned_by_one_folder() {
        let mut store = DocumentStore::default();
        let work = store.create_folder("Work").unwrap();
        let file = store.create_untitled_file(&work.id).unwrap();
        assert_eq!(file.name, DEFAULT_FILE_NAME);
        assert_eq!(file.content, "");

        for folder in store.folders() {
            let count = folder.file_ids.iter().filter(|id| **id == file.id).count();
            if folder.id == work.id {
                assert_eq!(count, 1);
            } else {
                assert_eq!(count, 0);
            }
        }
        assert_eq!(store.folder_of(&file.id), Some(&work.id));
        assert!(store.folder(&work.id).unwrap().updated_at >= file.created_at);
    }

    #[test]
    fn test_create_file_in_unknown_folder() {
        let mut store = DocumentStore::default();
        let err = store
            .create_file(&FolderId::new("nope"), "a.txt", "")
            .unwrap_err();
        assert!(matches!(err, StoreError::NotFound { kind: RecordKind::Folder, .. }));
        assert_eq!(store.file_count(), 1);
    }

    #[test]
    fn test_delete_file() {
        let mut store = DocumentStore::default();
        let file = store.create_untitled_file(&default_id()).unwrap();

        store.delete_file(&default_id(), &file.id).unwrap();
        assert!(store.folders().all(|f| !f.file_ids.contains(&file.id)));

        let err = store.delete_file(&default_id(), &file.id).unwrap_err();
        assert!(matches!(err, StoreError::NotFound { kind: RecordKind::File, .. }));
    }

    #[test]
    fn test_delete_file_from_wrong_folder() {
        let mut store = DocumentStore::default();
        let work = store.create_folder("Work").unwrap();
        let file = store.create_untitled_file(&work.id).unwrap();

        let err = store.delete_file(&default_id(), &file.id).unwrap_err();
        assert!(matches!(err, StoreError::NotFound { kind: RecordKind::File, .. }));
        assert!(store.contains_file(&file.id));
        assert_eq!(store.folder(&work.id).unwrap().file_ids, vec![file.id]);
    }

    #[test]
    fn test_update_file_content() {
        let mut store = DocumentStore::default();
        let file = store.create_file(&default_id(), "Untitled.txt", "").unwrap();
        store.update_file_content(&file.id, "hello").unwrap();

        let folders = store.list_folders();
        let reread = folders[0]
            .files
            .iter()
            .find(|f| f.id == file.id)
            .unwrap();
        assert_eq!(reread.content, "hello");
        assert!(reread.updated_at > reread.created_at);

        let err = store
            .update_file_content(&FileId::new("ghost"), "x")
            .unwrap_err();
        assert!(matches!(err, StoreError::NotFound { .. }));
    }

    #[test]
    fn test_rename_file() {
        let mut store = DocumentStore::default();
        let id = FileId::new("welcome");
        store.rename_file(&id, " notes.txt ").unwrap();
        assert_eq!(store.file(&id).unwrap().name, "notes.txt");

        let err = store.rename_file(&id, "").unwrap_err();
        assert!(matches!(err, StoreError::Validation { kind: RecordKind::File }));
        assert_eq!(store.file(&id).unwrap().name, "notes.txt");
    }

    #[test]
    fn test_snapshot_is_detached() {
        let mut store = DocumentStore::default();
        let mut snapshot = store.list_folders();
        snapshot[0].name = "Changed".to_string();
        snapshot[0].files.clear();

        assert_eq!(store.folder(&default_id()).unwrap().name, "Default");
        assert_eq!(store.list_folders()[0].files.len(), 1);

        store.create_folder("Later").unwrap();
        assert_eq!(snapshot.len(), 1);
    }

    #[test]
    fn test_new_store_with_single_folder() {
        let store = DocumentStore::new("Notes").unwrap();
        assert_eq!(store.folder_count(), 1);
        assert_eq!(store.file_count(), 0);
        assert!(DocumentStore::new(" ").is_err());
    }
}
