//! Plain-text editor panel

use eframe::egui;
use eframe::egui::text::{CCursor, CCursorRange};

use crate::app::NotebookApp;
use crate::core::cursor::CursorPosition;
use crate::core::edit::Selection;

/// Plain-text editor panel
pub struct EditorPanel;

impl EditorPanel {
    /// Show the editor panel
    pub fn show(ui: &mut egui::Ui, app: &mut NotebookApp) {
        let font = if app.config.editor.is_monospace() {
            egui::FontId::monospace(app.config.editor.font_size)
        } else {
            egui::FontId::proportional(app.config.editor.font_size)
        };
        let wrap = app.config.editor.word_wrap;
        let mut text = app.session.buffer().to_string();

        // Word wrap off lays out every line at infinite width
        let mut layouter = |ui: &egui::Ui, buffer: &dyn egui::TextBuffer, wrap_width: f32| {
            let job = egui::text::LayoutJob::simple(
                buffer.as_str().to_owned(),
                font.clone(),
                ui.visuals().text_color(),
                if wrap { wrap_width } else { f32::INFINITY },
            );
            ui.fonts(|fonts| fonts.layout_job(job))
        };

        let scroll = if wrap {
            egui::ScrollArea::vertical()
        } else {
            egui::ScrollArea::both()
        };

        scroll
            .id_salt("editor_scroll")
            .auto_shrink(false)
            .show(ui, |ui| {
                let mut output = egui::TextEdit::multiline(&mut text)
                    // A fresh id per buffer keeps undo history from crossing notes
                    .id(app.editor_id())
                    .frame(false)
                    .lock_focus(true)
                    .desired_width(f32::INFINITY)
                    .desired_rows(30)
                    .layouter(&mut layouter)
                    .show(ui);

                if output.response.changed() {
                    app.apply_edit(text);
                }

                // Selection set by an Edit menu command
                if let Some(selection) = app.pending_selection.take() {
                    output.state.cursor.set_char_range(Some(CCursorRange::two(
                        CCursor::new(selection.start),
                        CCursor::new(selection.end),
                    )));
                    output.state.clone().store(ui.ctx(), output.response.id);
                    output.response.request_focus();
                }

                if let Some(range) = output.state.cursor.char_range() {
                    app.selection = Selection::new(range.primary.index, range.secondary.index);
                    app.cursor =
                        CursorPosition::from_offset(app.session.buffer(), range.primary.index);
                }
            });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::capability::FixedAnswer;
    use crate::core::config::AppConfig;
    use crate::core::store::FileId;

    fn frame(ctx: &egui::Context, app: &mut NotebookApp, events: Vec<egui::Event>) {
        let input = egui::RawInput {
            events,
            ..Default::default()
        };
        let _ = ctx.run(input, |ctx| {
            egui::CentralPanel::default().show(ctx, |ui| EditorPanel::show(ui, app));
        });
    }

    fn undo() -> egui::Event {
        egui::Event::Key {
            key: egui::Key::Z,
            physical_key: None,
            pressed: true,
            repeat: false,
            modifiers: egui::Modifiers::COMMAND,
        }
    }

    #[test]
    fn test_undo_stays_within_the_open_note() {
        let ctx = egui::Context::default();
        let mut app = NotebookApp::with_host(AppConfig::default(), Box::new(FixedAnswer(true)));
        let default = app.store.first_folder_id().cloned().unwrap();
        let other = app.store.create_file(&default, "b.txt", "BBB").unwrap();
        let welcome = FileId::new("welcome");

        app.select_note(&welcome);
        frame(&ctx, &mut app, Vec::new());
        frame(&ctx, &mut app, vec![egui::Event::Text("X".to_string())]);
        assert_eq!(app.store.file(&welcome).unwrap().content, "XWelcome to Notebook!");

        app.select_note(&other.id);
        frame(&ctx, &mut app, Vec::new());
        frame(&ctx, &mut app, vec![undo()]);
        frame(&ctx, &mut app, Vec::new());

        assert_eq!(app.session.buffer(), "BBB");
        assert_eq!(app.store.file(&other.id).unwrap().content, "BBB");
        assert_eq!(app.store.file(&welcome).unwrap().content, "XWelcome to Notebook!");
    }

    #[test]
    fn test_switching_notes_changes_editor_id() {
        let mut app = NotebookApp::with_host(AppConfig::default(), Box::new(FixedAnswer(true)));
        let before = app.editor_id();
        app.select_note(&FileId::new("welcome"));
        assert_ne!(app.editor_id(), before);

        let attached = app.editor_id();
        app.new_document();
        assert_ne!(app.editor_id(), attached);
    }
}
