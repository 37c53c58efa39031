//! Native implementations of the core capabilities

use crate::core::capability::{Clipboard, Confirm, MemoryClipboard};

/// Yes/No message box
#[derive(Debug, Default)]
pub struct NativeConfirm;

impl Confirm for NativeConfirm {
    fn confirm(&mut self, title: &str, message: &str) -> bool {
        let result = rfd::MessageDialog::new()
            .set_title(title)
            .set_description(message)
            .set_level(rfd::MessageLevel::Warning)
            .set_buttons(rfd::MessageButtons::YesNo)
            .show();
        result == rfd::MessageDialogResult::Yes
    }
}

/// System clipboard, falling back to an in-process one when unavailable
pub struct SystemClipboard {
    clipboard: Option<arboard::Clipboard>,
    fallback: MemoryClipboard,
}

impl Default for SystemClipboard {
    fn default() -> Self {
        Self::new()
    }
}

impl SystemClipboard {
    pub fn new() -> Self {
        let clipboard = match arboard::Clipboard::new() {
            Ok(clipboard) => Some(clipboard),
            Err(e) => {
                tracing::warn!("System clipboard unavailable: {}", e);
                None
            }
        };
        Self {
            clipboard,
            fallback: MemoryClipboard::default(),
        }
    }
}

impl Clipboard for SystemClipboard {
    fn get_text(&mut self) -> Option<String> {
        match self.clipboard.as_mut() {
            Some(clipboard) => clipboard
                .get_text()
                .map_err(|e| tracing::warn!("Failed to read clipboard: {}", e))
                .ok(),
            None => self.fallback.get_text(),
        }
    }

    fn set_text(&mut self, text: &str) {
        match self.clipboard.as_mut() {
            Some(clipboard) => {
                if let Err(e) = clipboard.set_text(text) {
                    tracing::warn!("Failed to write clipboard: {}", e);
                }
            }
            None => self.fallback.set_text(text),
        }
    }
}
