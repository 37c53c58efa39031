//! Bottom status bar

use eframe::egui;

use crate::core::cursor::CursorPosition;

pub struct StatusBar;

impl StatusBar {
    pub fn show(ui: &mut egui::Ui, cursor: CursorPosition, encoding: &str) {
        ui.horizontal(|ui| {
            ui.small(format!("Ln {}, Col {}", cursor.line, cursor.column));
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                ui.small(encoding);
            });
        });
    }
}
