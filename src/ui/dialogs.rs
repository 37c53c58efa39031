//! Modal-style windows: folder naming, find/replace and font selection

use eframe::egui;

use crate::core::config::{EditorConfig, AVAILABLE_FONTS};

/// Single text field dialog used to create and rename records
pub struct NameDialog<T> {
    pub visible: bool,
    pub name: String,
    /// Record being renamed; `None` when creating
    pub target: Option<T>,
    title: &'static str,
    confirm_label: &'static str,
    hint: &'static str,
}

impl<T> NameDialog<T> {
    fn new(title: &'static str, confirm_label: &'static str, hint: &'static str) -> Self {
        Self {
            visible: false,
            name: String::new(),
            target: None,
            title,
            confirm_label,
            hint,
        }
    }

    pub fn new_folder() -> Self {
        Self::new("Create New Folder", "Create", "Enter folder name")
    }

    pub fn rename_folder() -> Self {
        Self::new("Rename Folder", "Save", "Enter new folder name")
    }

    pub fn rename_note() -> Self {
        Self::new("Rename Note", "Save", "Enter new file name")
    }

    pub fn open(&mut self, target: Option<T>, name: &str) {
        self.visible = true;
        self.target = target;
        self.name = name.to_string();
    }

    pub fn close(&mut self) {
        self.visible = false;
        self.target = None;
        self.name.clear();
    }

    /// Show the dialog; returns the entered name when the user confirms.
    ///
    /// The dialog stays open so a rejected name can be corrected; callers close it
    /// once the name was accepted.
    pub fn show(&mut self, ctx: &egui::Context) -> Option<String> {
        let mut result = None;

        if self.visible {
            egui::Window::new(self.title)
                .collapsible(false)
                .resizable(false)
                .anchor(egui::Align2::CENTER_CENTER, egui::vec2(0.0, 0.0))
                .show(ctx, |ui| {
                    let response = ui.add(
                        egui::TextEdit::singleline(&mut self.name).hint_text(self.hint),
                    );
                    let submitted =
                        response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));

                    ui.add_space(8.0);
                    ui.horizontal(|ui| {
                        if ui.button("Cancel").clicked() {
                            self.visible = false;
                        }
                        if ui.button(self.confirm_label).clicked() || submitted {
                            result = Some(self.name.clone());
                        }
                    });
                });
        }

        if !self.visible {
            self.target = None;
        }
        result
    }
}

/// Button pressed in the find/replace dialog
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FindAction {
    Find,
    Replace,
    ReplaceAll,
}

/// Find and replace dialog state
#[derive(Debug, Default)]
pub struct FindReplaceDialog {
    pub visible: bool,
    pub find_text: String,
    pub replace_text: String,
    pub case_sensitive: bool,
}

impl FindReplaceDialog {
    pub fn show(&mut self, ctx: &egui::Context) -> Option<FindAction> {
        let mut action = None;
        if !self.visible {
            return action;
        }

        egui::Window::new("Find and Replace")
            .collapsible(false)
            .resizable(false)
            .show(ctx, |ui| {
                egui::Grid::new("find_replace_grid")
                    .num_columns(2)
                    .spacing([8.0, 6.0])
                    .show(ui, |ui| {
                        ui.label("Find:");
                        ui.text_edit_singleline(&mut self.find_text);
                        ui.end_row();

                        ui.label("Replace with:");
                        ui.text_edit_singleline(&mut self.replace_text);
                        ui.end_row();
                    });
                ui.checkbox(&mut self.case_sensitive, "Match case");

                ui.add_space(8.0);
                ui.horizontal(|ui| {
                    if ui.button("Find").clicked() {
                        action = Some(FindAction::Find);
                    }
                    if ui.button("Replace").clicked() {
                        action = Some(FindAction::Replace);
                    }
                    if ui.button("Replace All").clicked() {
                        action = Some(FindAction::ReplaceAll);
                    }
                    if ui.button("Cancel").clicked() {
                        self.visible = false;
                    }
                });
            });

        action
    }
}

/// Font picker
#[derive(Debug, Default)]
pub struct FontDialog {
    pub visible: bool,
}

impl FontDialog {
    /// Returns `true` when the font or size changed
    pub fn show(&mut self, ctx: &egui::Context, editor: &mut EditorConfig) -> bool {
        let mut changed = false;
        if !self.visible {
            return changed;
        }

        egui::Window::new("Font")
            .collapsible(false)
            .resizable(false)
            .show(ctx, |ui| {
                ui.label("Select Font");
                egui::Grid::new("font_grid").num_columns(2).show(ui, |ui| {
                    for (i, font) in AVAILABLE_FONTS.iter().enumerate() {
                        let selected = editor.font_family == *font;
                        if ui.selectable_label(selected, *font).clicked() && !selected {
                            editor.font_family = font.to_string();
                            changed = true;
                        }
                        if i % 2 == 1 {
                            ui.end_row();
                        }
                    }
                });

                ui.add_space(8.0);
                ui.horizontal(|ui| {
                    ui.label("Size:");
                    changed |= ui
                        .add(egui::Slider::new(&mut editor.font_size, 8.0..=32.0))
                        .changed();
                });

                ui.add_space(8.0);
                if ui.button("OK").clicked() {
                    self.visible = false;
                }
            });

        changed
    }
}
