//! Plain-text import and export against the host file system

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

/// File name offered when the buffer has none
pub const DEFAULT_EXPORT_NAME: &str = "untitled.txt";

/// Extensions offered by the open dialog
pub const OPEN_EXTENSIONS: &[&str] = &["txt", "md", "js", "ts", "html", "css"];

/// Text read from disk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportedText {
    pub name: String,
    pub content: String,
}

/// Read a text file
pub fn import_text(path: &Path) -> Result<ImportedText> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Error reading file: {}", path.display()))?;

    let name = path
        .file_name()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| DEFAULT_EXPORT_NAME.to_string());

    tracing::info!("Opened {}", path.display());
    Ok(ImportedText { name, content })
}

/// Write the buffer as plain text
pub fn export_text(path: &Path, content: &str) -> Result<()> {
    fs::write(path, content)
        .with_context(|| format!("Failed to save file: {}", path.display()))?;
    tracing::info!("Saved {}", path.display());
    Ok(())
}

/// Name to suggest in the save dialog
pub fn export_name(file_name: Option<&str>) -> String {
    match file_name {
        Some(name) if !name.trim().is_empty() => name.to_string(),
        _ => DEFAULT_EXPORT_NAME.to_string(),
    }
}
