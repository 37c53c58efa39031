//! Application configuration management

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

/// Fonts offered by the Font dialog
pub const AVAILABLE_FONTS: &[&str] = &[
    "Consolas",
    "Courier New",
    "monospace",
    "Arial",
    "Verdana",
    "Times New Roman",
];

const MONOSPACE_FONTS: &[&str] = &["Consolas", "Courier New", "monospace"];

const MAX_RECENT_FILES: usize = 10;

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Recently opened or saved files, most recent first
    pub recent_files: Vec<PathBuf>,
    /// Directory the file dialogs start in
    pub last_directory: Option<PathBuf>,
    /// Editor settings
    pub editor: EditorConfig,
    /// UI settings
    pub ui: UiConfig,
}

/// When edits made in the editor reach the document store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CommitPolicy {
    /// After every edit
    #[default]
    OnEdit,
    /// Only on Save, or when switching files and agreeing to save
    OnSave,
}

/// Editor-specific settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// One of [`AVAILABLE_FONTS`]
    pub font_family: String,
    /// Font size in points
    pub font_size: f32,
    /// Word wrap
    pub word_wrap: bool,
    pub commit_policy: CommitPolicy,
}

/// UI settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    pub show_status_bar: bool,
    pub sidebar_visible: bool,
    pub sidebar_width: f32,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            font_family: "Consolas".to_string(),
            font_size: 14.0,
            word_wrap: true,
            commit_policy: CommitPolicy::default(),
        }
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            show_status_bar: true,
            sidebar_visible: true,
            sidebar_width: 256.0,
        }
    }
}

impl EditorConfig {
    /// Whether the selected font should render with egui's monospace family
    pub fn is_monospace(&self) -> bool {
        MONOSPACE_FONTS.contains(&self.font_family.as_str())
    }
}

impl AppConfig {
    /// Get the config file path in the user's config directory
    pub fn default_path() -> Option<PathBuf> {
        ProjectDirs::from("com", "notebook", "Notebook")
            .map(|dirs| dirs.config_dir().join("config.json"))
    }

    /// Load configuration from disk; a missing file yields the defaults
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;
        let config: Self = serde_json::from_str(&content)
            .with_context(|| format!("Invalid config: {}", path.display()))?;
        Ok(config)
    }

    /// Save configuration to disk
    pub fn save(&self, path: &Path) -> Result<()> {
        // Ensure config directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;

        tracing::info!("Saved config to: {}", path.display());
        Ok(())
    }

    /// Add a file to recent files and remember its directory
    pub fn add_recent_file(&mut self, path: PathBuf) {
        if let Some(parent) = path.parent() {
            self.last_directory = Some(parent.to_path_buf());
        }
        self.recent_files.retain(|p| p != &path);
        self.recent_files.insert(0, path);
        self.recent_files.truncate(MAX_RECENT_FILES);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert!(config.editor.word_wrap);
        assert!(config.editor.is_monospace());
        assert!(config.ui.show_status_bar);
        assert_eq!(config.editor.commit_policy, CommitPolicy::OnEdit);
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.json");

        let mut config = AppConfig::default();
        config.editor.font_family = "Arial".to_string();
        config.editor.commit_policy = CommitPolicy::OnSave;
        config.ui.show_status_bar = false;
        config.save(&path).unwrap();

        let loaded = AppConfig::load(&path).unwrap();
        assert_eq!(loaded.editor.font_family, "Arial");
        assert!(!loaded.editor.is_monospace());
        assert_eq!(loaded.editor.commit_policy, CommitPolicy::OnSave);
        assert!(!loaded.ui.show_status_bar);
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"editor": {"word_wrap": false}}"#).unwrap();

        let loaded = AppConfig::load(&path).unwrap();
        assert!(!loaded.editor.word_wrap);
        assert_eq!(loaded.editor.font_family, "Consolas");
        assert!(loaded.ui.sidebar_visible);
    }

    #[test]
    fn test_missing_config() {
        let dir = tempfile::tempdir().unwrap();
        let loaded = AppConfig::load(&dir.path().join("none.json")).unwrap();
        assert!(loaded.recent_files.is_empty());
    }

    #[test]
    fn test_recent_files() {
        let mut config = AppConfig::default();
        for i in 0..12 {
            config.add_recent_file(PathBuf::from(format!("/notes/{}.txt", i)));
        }
        config.add_recent_file(PathBuf::from("/notes/5.txt"));

        assert_eq!(config.recent_files.len(), 10);
        assert_eq!(config.recent_files[0], PathBuf::from("/notes/5.txt"));
        assert_eq!(config.recent_files.iter().filter(|p| p.ends_with("5.txt")).count(), 1);
        assert_eq!(config.last_directory, Some(PathBuf::from("/notes")));
    }
}
