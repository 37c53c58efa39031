//! Selection and buffer state for the open note

use super::capability::Confirm;
use super::error::{Result, StoreError};
use super::store::{DocumentStore, FileId, FolderId};

/// Which file is open and what the editor currently holds.
///
/// A session is either *attached* to a file in the store or *detached*, holding a
/// scratch buffer that came from "New" or from an imported file.
#[derive(Debug, Clone, Default)]
pub struct Session {
    current_folder_id: Option<FolderId>,
    current_file_id: Option<FileId>,
    buffer: String,
    /// Name of a detached buffer, if it has one
    detached_name: Option<String>,
    /// Set on every edit, cleared on load, commit or export
    modified: bool,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current_folder_id(&self) -> Option<&FolderId> {
        self.current_folder_id.as_ref()
    }

    pub fn current_file_id(&self) -> Option<&FileId> {
        self.current_file_id.as_ref()
    }

    pub fn buffer(&self) -> &str {
        &self.buffer
    }

    pub fn is_attached(&self) -> bool {
        self.current_file_id.is_some()
    }

    /// Whether the buffer differs from what was last persisted.
    ///
    /// Attached buffers are compared with the store's content; detached buffers
    /// rely on the modified bit.
    pub fn has_unsaved_edits(&self, store: &DocumentStore) -> bool {
        match self.current_file_id.as_ref().and_then(|id| store.file(id)) {
            Some(file) => file.content != self.buffer,
            None => self.modified,
        }
    }

    /// Replace the buffer with the editor's text
    pub fn edit_buffer(&mut self, text: impl Into<String>) {
        self.buffer = text.into();
        self.modified = true;
    }

    /// Write the buffer into the store for the attached file.
    ///
    /// Returns `false` for detached buffers, which have nowhere to go in the store.
    pub fn commit(&mut self, store: &mut DocumentStore) -> Result<bool> {
        let Some(file_id) = self.current_file_id.clone() else {
            return Ok(false);
        };
        let unchanged = store
            .file(&file_id)
            .map(|file| file.content == self.buffer)
            .ok_or_else(|| StoreError::file_not_found(file_id.as_str()))?;

        if !unchanged {
            store.update_file_content(&file_id, self.buffer.clone())?;
        }
        self.modified = false;
        Ok(true)
    }

    /// Open a file from the store.
    ///
    /// Unsaved edits are put to `confirm` first. For an attached buffer the question
    /// is whether to save (yes commits, no discards). For a detached buffer it is
    /// whether to discard, and a refusal keeps the current selection. Returns
    /// whether the selection switched.
    pub fn select_file(
        &mut self,
        store: &mut DocumentStore,
        file_id: &FileId,
        confirm: &mut dyn Confirm,
    ) -> Result<bool> {
        if !store.contains_file(file_id) {
            return Err(StoreError::file_not_found(file_id.as_str()));
        }
        if self.current_file_id.as_ref() == Some(file_id) {
            return Ok(true);
        }

        if self.has_unsaved_edits(store) {
            let name = self.display_name(store);
            if self.is_attached() {
                if confirm.confirm("Unsaved changes", &format!("Save changes to {}?", name)) {
                    self.commit(store)?;
                }
            } else if !confirm.confirm(
                "Unsaved changes",
                &format!("Discard unsaved changes to {}?", name),
            ) {
                return Ok(false);
            }
        }

        let Some(file) = store.file(file_id) else {
            return Err(StoreError::file_not_found(file_id.as_str()));
        };
        self.buffer = file.content.clone();
        self.current_folder_id = store.folder_of(file_id).cloned();
        self.current_file_id = Some(file_id.clone());
        self.detached_name = None;
        self.modified = false;

        tracing::debug!("Selected file {}", file_id);
        Ok(true)
    }

    /// Detach and start an empty, unnamed buffer
    pub fn new_buffer(&mut self) {
        *self = Self::default();
    }

    /// Detach and hold text read from the host file system
    pub fn load_imported(&mut self, name: impl Into<String>, text: impl Into<String>) {
        *self = Self {
            buffer: text.into(),
            detached_name: Some(name.into()),
            ..Self::default()
        };
    }

    /// Record that the buffer was written out under `name`
    pub fn mark_exported(&mut self, name: &str) {
        if !self.is_attached() {
            self.detached_name = Some(name.to_string());
        }
        self.modified = false;
    }

    /// Detach when the open file no longer exists in the store
    pub fn reconcile(&mut self, store: &DocumentStore) {
        if let Some(file_id) = &self.current_file_id {
            if !store.contains_file(file_id) {
                tracing::debug!("Open file {} was deleted, detaching", file_id);
                self.new_buffer();
            }
        }
    }

    /// Name of the open file, if it has one
    pub fn file_name(&self, store: &DocumentStore) -> Option<String> {
        match &self.current_file_id {
            Some(id) => store.file(id).map(|file| file.name.clone()),
            None => self.detached_name.clone(),
        }
    }

    /// Name shown in the title bar
    pub fn display_name(&self, store: &DocumentStore) -> String {
        self.file_name(store)
            .unwrap_or_else(|| "Untitled".to_string())
    }

    pub fn encoding(&self) -> &'static str {
        "UTF-8"
    }
}
