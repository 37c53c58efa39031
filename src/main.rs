//! Notebook - a plain-text note editor
//!
//! Folders of notes in the sidebar, a text editor, find/replace and plain-text
//! import/export.

mod app;
mod core;
mod ui;

use app::NotebookApp;
use eframe::egui;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> eframe::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(tracing_subscriber::filter::LevelFilter::INFO)
        .init();

    tracing::info!("Starting Notebook...");

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1024.0, 720.0])
            .with_min_inner_size([640.0, 480.0])
            .with_title("Untitled - Notebook"),
        ..Default::default()
    };

    eframe::run_native(
        "Notebook",
        native_options,
        Box::new(|cc| Ok(Box::new(NotebookApp::new(cc)))),
    )
}
