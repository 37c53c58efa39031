//! Host capabilities the core relies on
//!
//! The UI layer implements these traits with native dialogs and the system
//! clipboard; tests use in-memory fakes.

/// Yes/no confirmation asked of the user
pub trait Confirm {
    /// Returns `true` when the user accepts
    fn confirm(&mut self, title: &str, message: &str) -> bool;
}

/// Plain-text clipboard access
pub trait Clipboard {
    fn get_text(&mut self) -> Option<String>;
    fn set_text(&mut self, text: &str);
}

/// Confirmation that always gives the same answer
#[cfg(test)]
#[derive(Debug, Clone, Copy)]
pub struct FixedAnswer(pub bool);

#[cfg(test)]
impl Confirm for FixedAnswer {
    fn confirm(&mut self, _title: &str, _message: &str) -> bool {
        self.0
    }
}

/// Clipboard kept in process memory
#[derive(Debug, Clone, Default)]
pub struct MemoryClipboard {
    pub contents: Option<String>,
}

impl Clipboard for MemoryClipboard {
    fn get_text(&mut self) -> Option<String> {
        self.contents.clone()
    }

    fn set_text(&mut self, text: &str) {
        self.contents = Some(text.to_string());
    }
}
