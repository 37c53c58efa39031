//! Folder tree panel for note navigation

use std::time::SystemTime;

use chrono::{DateTime, Local};
use eframe::egui;

use crate::app::NotebookApp;
use crate::core::store::{FolderSnapshot, NoteFile};

/// Folder tree panel
pub struct FolderTreePanel;

impl FolderTreePanel {
    /// Show the folder tree panel
    pub fn show(ui: &mut egui::Ui, app: &mut NotebookApp) {
        ui.vertical(|ui| {
            // Header
            ui.horizontal(|ui| {
                ui.heading("Folders");
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.button("+").on_hover_text("New folder").clicked() {
                        app.new_folder_dialog.open(None, "");
                    }
                });
            });

            ui.separator();

            egui::ScrollArea::vertical()
                .id_salt("folder_tree_scroll")
                .show(ui, |ui| {
                    for folder in app.store.list_folders() {
                        Self::show_folder(ui, &folder, app);
                    }
                });

            ui.separator();
            ui.small(format!(
                "{} folder(s), {} note(s)",
                app.store.folder_count(),
                app.store.file_count()
            ));
        });
    }

    /// Show a folder row and, when expanded, its notes
    fn show_folder(ui: &mut egui::Ui, folder: &FolderSnapshot, app: &mut NotebookApp) {
        let expanded = app.expanded_folders.contains(&folder.id);
        let is_current = app.session.current_folder_id() == Some(&folder.id);

        ui.horizontal(|ui| {
            let icon = if expanded { "\u{1F4C2}" } else { "\u{1F4C1}" };
            if ui
                .selectable_label(is_current, format!("{} {}", icon, folder.name))
                .on_hover_text(format!("Modified {}", format_time(folder.updated_at)))
                .clicked()
            {
                app.toggle_folder(&folder.id);
            }

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui.small_button("\u{1F5D1}").on_hover_text("Delete folder").clicked() {
                    app.delete_folder(&folder.id);
                }
                if ui.small_button("\u{270F}").on_hover_text("Rename folder").clicked() {
                    app.rename_folder_dialog
                        .open(Some(folder.id.clone()), &folder.name);
                }
            });
        });

        if expanded {
            ui.indent(folder.id.as_str(), |ui| {
                for file in &folder.files {
                    Self::show_file(ui, folder, file, app);
                }
                if ui.small_button("+ New note").clicked() {
                    app.new_note(&folder.id);
                }
            });
        }
    }

    /// Show a note row
    fn show_file(ui: &mut egui::Ui, folder: &FolderSnapshot, file: &NoteFile, app: &mut NotebookApp) {
        let is_active = app.session.current_file_id() == Some(&file.id);

        let display_name = if is_active && app.session.has_unsaved_edits(&app.store) {
            format!("\u{1F4C4} {}*", file.name)
        } else {
            format!("\u{1F4C4} {}", file.name)
        };

        ui.horizontal(|ui| {
            if ui
                .selectable_label(is_active, display_name)
                .on_hover_text(format!(
                    "Created {}\nModified {}",
                    format_time(file.created_at),
                    format_time(file.updated_at)
                ))
                .clicked()
            {
                app.select_note(&file.id);
            }
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui.small_button("\u{1F5D1}").on_hover_text("Delete note").clicked() {
                    app.delete_note(&folder.id, &file.id);
                }
                if ui.small_button("\u{270F}").on_hover_text("Rename note").clicked() {
                    app.rename_note_dialog.open(Some(file.id.clone()), &file.name);
                }
            });
        });
    }
}

fn format_time(time: SystemTime) -> String {
    DateTime::<Local>::from(time).format("%Y-%m-%d %H:%M").to_string()
}
