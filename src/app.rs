//! Main application state and UI coordination

use std::collections::HashSet;
use std::path::PathBuf;

use eframe::egui;

use crate::core::capability::Confirm;
use crate::core::config::{AppConfig, CommitPolicy};
use crate::core::cursor::CursorPosition;
use crate::core::edit::{self, Selection};
use crate::core::error::StoreError;
use crate::core::file_io::{self, OPEN_EXTENSIONS};
use crate::core::search;
use crate::core::session::Session;
use crate::core::store::{DocumentStore, FileId, FolderId};
use crate::ui::dialogs::{FindAction, FindReplaceDialog, FontDialog, NameDialog};
use crate::ui::host::{NativeConfirm, SystemClipboard};
use crate::ui::notices::Notices;
use crate::ui::{editor::EditorPanel, folder_tree::FolderTreePanel, status_bar::StatusBar};

/// Main application state
pub struct NotebookApp {
    /// All folders and notes
    pub store: DocumentStore,
    /// Open note and its live buffer
    pub session: Session,
    /// Application configuration
    pub config: AppConfig,
    /// Cursor position reported by the editor
    pub cursor: CursorPosition,
    /// Selection reported by the editor
    pub selection: Selection,
    /// Selection to apply to the editor on the next frame
    pub pending_selection: Option<Selection>,
    /// Folders currently expanded in the tree
    pub expanded_folders: HashSet<FolderId>,
    pub new_folder_dialog: NameDialog<FolderId>,
    pub rename_folder_dialog: NameDialog<FolderId>,
    pub rename_note_dialog: NameDialog<FileId>,
    pub find_dialog: FindReplaceDialog,
    pub font_dialog: FontDialog,
    pub notices: Notices,
    /// Bumped whenever the editor shows a different buffer; keys its undo history
    editor_generation: u64,
    confirm: Box<dyn Confirm>,
    clipboard: SystemClipboard,
    /// Where settings are saved; `None` keeps them in memory
    config_path: Option<PathBuf>,
    /// Last title sent to the window
    title: String,
}

impl NotebookApp {
    /// Create a new application instance
    pub fn new(_cc: &eframe::CreationContext<'_>) -> Self {
        let config_path = AppConfig::default_path();
        if config_path.is_none() {
            tracing::warn!("Could not determine config directory, settings will not be saved");
        }
        let config = config_path
            .as_deref()
            .map(AppConfig::load)
            .transpose()
            .unwrap_or_else(|e| {
                tracing::error!("Failed to load config, using defaults: {:#}", e);
                None
            })
            .unwrap_or_default();

        let mut app = Self::with_host(config, Box::new(NativeConfirm));
        app.config_path = config_path;
        app
    }

    pub(crate) fn with_host(config: AppConfig, confirm: Box<dyn Confirm>) -> Self {
        let store = DocumentStore::default();
        let expanded_folders = store.first_folder_id().cloned().into_iter().collect();

        Self {
            store,
            session: Session::new(),
            config,
            cursor: CursorPosition::default(),
            selection: Selection::default(),
            pending_selection: None,
            expanded_folders,
            new_folder_dialog: NameDialog::new_folder(),
            rename_folder_dialog: NameDialog::rename_folder(),
            rename_note_dialog: NameDialog::rename_note(),
            find_dialog: FindReplaceDialog::default(),
            font_dialog: FontDialog::default(),
            notices: Notices::default(),
            editor_generation: 0,
            config_path: None,
            confirm,
            clipboard: SystemClipboard::new(),
            title: String::new(),
        }
    }

    fn save_config(&self) {
        let Some(path) = &self.config_path else {
            return;
        };
        if let Err(e) = self.config.save(path) {
            tracing::error!("Failed to save config: {:#}", e);
        }
    }

    /// Take new editor text, committing it to the store under [`CommitPolicy::OnEdit`]
    pub fn apply_edit(&mut self, text: String) {
        self.session.edit_buffer(text);
        if self.config.editor.commit_policy == CommitPolicy::OnEdit {
            if let Err(e) = self.session.commit(&mut self.store) {
                self.notices.error(e.to_string());
            }
        }
    }

    /// Id of the editor widget for the buffer currently shown
    pub fn editor_id(&self) -> egui::Id {
        egui::Id::new("notebook_editor").with(self.editor_generation)
    }

    pub fn toggle_sidebar(&mut self) {
        self.config.ui.sidebar_visible = !self.config.ui.sidebar_visible;
        self.save_config();
    }

    pub fn toggle_folder(&mut self, folder_id: &FolderId) {
        if !self.expanded_folders.remove(folder_id) {
            self.expanded_folders.insert(folder_id.clone());
        }
    }

    /// Create a folder; returns whether the name was accepted
    pub fn create_folder(&mut self, name: &str) -> bool {
        match self.store.create_folder(name) {
            Ok(folder) => {
                self.notices
                    .success(format!("Folder \"{}\" created", folder.name));
                self.expanded_folders.insert(folder.id);
                true
            }
            Err(e) => {
                self.notices.error(e.to_string());
                false
            }
        }
    }

    /// Rename a folder; returns whether the name was accepted
    pub fn rename_folder(&mut self, folder_id: &FolderId, name: &str) -> bool {
        match self.store.rename_folder(folder_id, name) {
            Ok(()) => {
                self.notices.success("Folder renamed");
                true
            }
            Err(e) => {
                self.notices.error(e.to_string());
                false
            }
        }
    }

    /// Rename a note; returns whether the name was accepted
    pub fn rename_note(&mut self, file_id: &FileId, name: &str) -> bool {
        match self.store.rename_file(file_id, name) {
            Ok(()) => {
                self.notices.success("Note renamed");
                true
            }
            Err(e) => {
                self.notices.error(e.to_string());
                false
            }
        }
    }

    pub fn delete_folder(&mut self, folder_id: &FolderId) {
        // The only folder is rejected by the store without asking first
        if self.store.folder_count() > 1 {
            let Some(name) = self.store.folder(folder_id).map(|f| f.name.clone()) else {
                self.notices
                    .error(StoreError::folder_not_found(folder_id.as_str()).to_string());
                return;
            };
            let message = format!(
                "Are you sure you want to delete \"{}\"? All files in it will be lost.",
                name
            );
            if !self.confirm.confirm("Delete folder", &message) {
                return;
            }
        }

        match self.store.delete_folder(folder_id) {
            Ok(()) => {
                self.expanded_folders.remove(folder_id);
                self.reconcile_session();
                self.notices.success("Folder deleted");
            }
            Err(e) => self.notices.error(e.to_string()),
        }
    }

    /// Create an untitled note in a folder and open it
    pub fn new_note(&mut self, folder_id: &FolderId) {
        match self.store.create_untitled_file(folder_id) {
            Ok(file) => {
                self.expanded_folders.insert(folder_id.clone());
                self.select_note(&file.id);
            }
            Err(e) => self.notices.error(e.to_string()),
        }
    }

    pub fn delete_note(&mut self, folder_id: &FolderId, file_id: &FileId) {
        if !self
            .confirm
            .confirm("Delete file", "Are you sure you want to delete this file?")
        {
            return;
        }

        match self.store.delete_file(folder_id, file_id) {
            Ok(()) => {
                self.reconcile_session();
                self.notices.success("File deleted");
            }
            Err(e) => self.notices.error(e.to_string()),
        }
    }

    /// Open a note from the tree
    pub fn select_note(&mut self, file_id: &FileId) {
        let previous = self.session.current_file_id().cloned();
        match self
            .session
            .select_file(&mut self.store, file_id, self.confirm.as_mut())
        {
            Ok(true) if previous.as_ref() != Some(file_id) => self.reset_cursor(),
            Ok(_) => {}
            Err(e) => self.notices.error(e.to_string()),
        }
    }

    fn reconcile_session(&mut self) {
        let was_attached = self.session.is_attached();
        self.session.reconcile(&self.store);
        if was_attached && !self.session.is_attached() {
            self.reset_cursor();
        }
    }

    fn reset_cursor(&mut self) {
        self.cursor = CursorPosition::default();
        self.selection = Selection::default();
        self.pending_selection = Some(Selection::default());
        self.editor_generation += 1;
    }

    /// Offer to save unsaved edits before the buffer is replaced
    fn offer_save(&mut self) {
        if self.session.has_unsaved_edits(&self.store)
            && self
                .confirm
                .confirm("Unsaved changes", "Do you want to save changes?")
        {
            self.save_document();
        }
    }

    /// File > New
    pub fn new_document(&mut self) {
        self.offer_save();
        self.session.new_buffer();
        self.reset_cursor();
        self.notices.success("New file created");
    }

    /// File > Open...
    pub fn open_document(&mut self) {
        self.offer_save();

        let mut dialog = rfd::FileDialog::new().add_filter("Text", OPEN_EXTENSIONS);
        if let Some(ref dir) = self.config.last_directory {
            dialog = dialog.set_directory(dir);
        }
        if let Some(path) = dialog.pick_file() {
            self.load_document(path);
        }
    }

    /// Read a file from disk into a detached buffer
    pub fn load_document(&mut self, path: PathBuf) {
        match file_io::import_text(&path) {
            Ok(imported) => {
                self.notices.success(format!("Opened {}", imported.name));
                self.session.load_imported(imported.name, imported.content);
                self.reset_cursor();
                self.config.add_recent_file(path);
                self.save_config();
            }
            Err(e) => {
                tracing::error!("{:#}", e);
                self.notices.error("Error reading file");
            }
        }
    }

    /// File > Save: commit to the store, then write the buffer to disk
    pub fn save_document(&mut self) {
        if let Err(e) = self.session.commit(&mut self.store) {
            self.notices.error(e.to_string());
            return;
        }

        let name = file_io::export_name(self.session.file_name(&self.store).as_deref());
        let mut dialog = rfd::FileDialog::new().set_file_name(&name);
        if let Some(ref dir) = self.config.last_directory {
            dialog = dialog.set_directory(dir);
        }
        let Some(path) = dialog.save_file() else {
            return;
        };

        match file_io::export_text(&path, self.session.buffer()) {
            Ok(()) => {
                let saved_name = path
                    .file_name()
                    .map(|s| s.to_string_lossy().to_string())
                    .unwrap_or(name);
                self.session.mark_exported(&saved_name);
                self.notices.success(format!("Saved as {}", saved_name));
                self.config.add_recent_file(path);
                self.save_config();
            }
            Err(e) => {
                tracing::error!("{:#}", e);
                self.notices.error(format!("Could not save {}", name));
            }
        }
    }

    /// Apply a find/replace dialog action to the buffer
    pub fn run_find_action(&mut self, action: FindAction) {
        let find_text = self.find_dialog.find_text.clone();
        if find_text.is_empty() {
            return;
        }
        let replace_text = self.find_dialog.replace_text.clone();
        let case_sensitive = self.find_dialog.case_sensitive;
        let buffer = self.session.buffer();

        match action {
            FindAction::Find => match search::find_range(buffer, &find_text, case_sensitive) {
                Some(range) => {
                    let start = buffer[..range.start].chars().count();
                    let end = start + buffer[range].chars().count();
                    let len = search::count(buffer, &find_text, case_sensitive);
                    self.pending_selection = Some(Selection::new(start, end));
                    self.notices
                        .success(format!("Found \"{}\" ({} match(es))", find_text, len));
                }
                None => self
                    .notices
                    .error(format!("Could not find \"{}\"", find_text)),
            },
            FindAction::Replace | FindAction::ReplaceAll => {
                let replaced = if action == FindAction::Replace {
                    search::replace_first(buffer, &find_text, &replace_text, case_sensitive)
                } else {
                    search::replace_all(buffer, &find_text, &replace_text, case_sensitive)
                };
                match replaced {
                    Some(text) => {
                        self.apply_edit(text);
                        self.notices.success(format!(
                            "Replaced \"{}\" with \"{}\"",
                            find_text, replace_text
                        ));
                    }
                    None => self
                        .notices
                        .error(format!("Could not find \"{}\"", find_text)),
                }
            }
        }
    }

    /// Run an Edit menu command against the buffer and current selection
    fn run_edit(&mut self, command: EditCommand) {
        let mut text = self.session.buffer().to_string();
        let selection = self.selection;

        let (selection, changed) = match command {
            EditCommand::Cut => {
                let caret = edit::cut(&mut text, selection, &mut self.clipboard);
                (caret, true)
            }
            EditCommand::Copy => {
                edit::copy(&text, selection, &mut self.clipboard);
                (selection, false)
            }
            EditCommand::Paste => {
                let caret = edit::paste(&mut text, selection, &mut self.clipboard);
                (caret, true)
            }
            EditCommand::Delete => (edit::delete(&mut text, selection), true),
            EditCommand::SelectAll => (edit::select_all(&text), false),
            EditCommand::InsertDateTime => (edit::append_timestamp(&mut text), true),
        };

        if changed && text != self.session.buffer() {
            self.apply_edit(text);
        }
        self.pending_selection = Some(selection);
    }

    fn update_title(&mut self, ctx: &egui::Context) {
        let marker = if self.session.has_unsaved_edits(&self.store) {
            "*"
        } else {
            ""
        };
        let title = format!("{}{} - Notebook", self.session.display_name(&self.store), marker);
        if title != self.title {
            ctx.send_viewport_cmd(egui::ViewportCommand::Title(title.clone()));
            self.title = title;
        }
    }

    /// Render the top menu bar
    fn render_menu_bar(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            egui::menu::bar(ui, |ui| {
                ui.menu_button("File", |ui| {
                    if ui.button("New").clicked() {
                        ui.close();
                        self.new_document();
                    }
                    if ui.button("Open...").clicked() {
                        ui.close();
                        self.open_document();
                    }
                    if !self.config.recent_files.is_empty() {
                        ui.menu_button("Open Recent", |ui| {
                            for path in self.config.recent_files.clone() {
                                if ui.button(path.display().to_string()).clicked() {
                                    ui.close();
                                    self.offer_save();
                                    self.load_document(path);
                                }
                            }
                        });
                    }
                    if ui.button("Save").clicked() {
                        ui.close();
                        self.save_document();
                    }
                    ui.separator();
                    if ui.button("Exit").clicked() {
                        ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                    }
                });

                ui.menu_button("Edit", |ui| {
                    let commands = [
                        ("Cut", EditCommand::Cut),
                        ("Copy", EditCommand::Copy),
                        ("Paste", EditCommand::Paste),
                        ("Delete", EditCommand::Delete),
                    ];
                    for (label, command) in commands {
                        if ui.button(label).clicked() {
                            ui.close();
                            self.run_edit(command);
                        }
                    }
                    ui.separator();
                    let find = ui.button("Find...").clicked();
                    let replace = ui.button("Replace...").clicked();
                    if find || replace {
                        self.find_dialog.visible = true;
                        ui.close();
                    }
                    ui.separator();
                    if ui.button("Select All").clicked() {
                        ui.close();
                        self.run_edit(EditCommand::SelectAll);
                    }
                    if ui.button("Time/Date").clicked() {
                        ui.close();
                        self.run_edit(EditCommand::InsertDateTime);
                    }
                });

                ui.menu_button("Format", |ui| {
                    if ui
                        .checkbox(&mut self.config.editor.word_wrap, "Word Wrap")
                        .changed()
                    {
                        self.save_config();
                    }
                    if ui.button("Font...").clicked() {
                        self.font_dialog.visible = true;
                        ui.close();
                    }
                    let mut on_save = self.config.editor.commit_policy == CommitPolicy::OnSave;
                    if ui
                        .checkbox(&mut on_save, "Keep edits until Save")
                        .changed()
                    {
                        self.config.editor.commit_policy = if on_save {
                            CommitPolicy::OnSave
                        } else {
                            CommitPolicy::OnEdit
                        };
                        if !on_save {
                            if let Err(e) = self.session.commit(&mut self.store) {
                                self.notices.error(e.to_string());
                            }
                        }
                        self.save_config();
                    }
                });

                ui.menu_button("View", |ui| {
                    if ui
                        .checkbox(&mut self.config.ui.show_status_bar, "Status Bar")
                        .changed()
                    {
                        self.save_config();
                    }
                    if ui
                        .checkbox(&mut self.config.ui.sidebar_visible, "Folders")
                        .changed()
                    {
                        self.save_config();
                    }
                });

                ui.menu_button("Help", |ui| {
                    if ui.button("About Notebook").clicked() {
                        self.notices.info("Notebook - A simple text editor");
                        ui.close();
                    }
                });
            });
        });
    }

    /// Render floating dialogs and apply what they return
    fn render_dialogs(&mut self, ctx: &egui::Context) {
        if let Some(name) = self.new_folder_dialog.show(ctx) {
            if self.create_folder(&name) {
                self.new_folder_dialog.close();
            }
        }

        if let Some(name) = self.rename_folder_dialog.show(ctx) {
            if let Some(folder_id) = self.rename_folder_dialog.target.clone() {
                if self.rename_folder(&folder_id, &name) {
                    self.rename_folder_dialog.close();
                }
            }
        }

        if let Some(name) = self.rename_note_dialog.show(ctx) {
            if let Some(file_id) = self.rename_note_dialog.target.clone() {
                if self.rename_note(&file_id, &name) {
                    self.rename_note_dialog.close();
                }
            }
        }

        if let Some(action) = self.find_dialog.show(ctx) {
            self.run_find_action(action);
        }

        if self.font_dialog.show(ctx, &mut self.config.editor) {
            self.save_config();
        }
    }
}

/// Edit menu commands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EditCommand {
    Cut,
    Copy,
    Paste,
    Delete,
    SelectAll,
    InsertDateTime,
}

impl eframe::App for NotebookApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Handle keyboard shortcuts
        let (new, open, save, find, sidebar) = ctx.input(|i| {
            (
                i.modifiers.ctrl && i.key_pressed(egui::Key::N),
                i.modifiers.ctrl && i.key_pressed(egui::Key::O),
                i.modifiers.ctrl && i.key_pressed(egui::Key::S),
                i.modifiers.ctrl && i.key_pressed(egui::Key::F),
                i.modifiers.ctrl && i.key_pressed(egui::Key::B),
            )
        });
        if new {
            self.new_document();
        }
        if open {
            self.open_document();
        }
        if save {
            self.save_document();
        }
        if find {
            self.find_dialog.visible = true;
        }
        if sidebar {
            self.toggle_sidebar();
        }

        // Render menu bar
        self.render_menu_bar(ctx);

        if self.config.ui.show_status_bar {
            egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
                StatusBar::show(ui, self.cursor, self.session.encoding());
            });
        }

        // Render sidebar with folder tree
        if self.config.ui.sidebar_visible {
            egui::SidePanel::left("sidebar")
                .resizable(true)
                .default_width(self.config.ui.sidebar_width)
                .min_width(150.0)
                .show(ctx, |ui| {
                    FolderTreePanel::show(ui, self);
                });
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            EditorPanel::show(ui, self);
        });

        self.render_dialogs(ctx);
        self.notices.show(ctx);
        self.update_title(ctx);
    }
}
