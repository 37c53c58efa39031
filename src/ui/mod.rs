//! UI components for Notebook

pub mod dialogs;
pub mod editor;
pub mod folder_tree;
pub mod host;
pub mod notices;
pub mod status_bar;
