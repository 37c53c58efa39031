//! Clipboard-style edit commands for the Edit menu
//!
//! All positions are char indices, which is what the egui text widget reports.

use std::ops::Range;

use chrono::Local;

use super::capability::Clipboard;

/// A selected char range; `start == end` is a plain caret
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Selection {
    pub start: usize,
    pub end: usize,
}

impl Selection {
    /// Selection between two ends in either order
    pub fn new(a: usize, b: usize) -> Self {
        Self {
            start: a.min(b),
            end: a.max(b),
        }
    }

    pub fn caret(pos: usize) -> Self {
        Self { start: pos, end: pos }
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    fn clamp(self, text: &str) -> Self {
        let len = text.chars().count();
        Self::new(self.start.min(len), self.end.min(len))
    }

    fn byte_range(&self, text: &str) -> Range<usize> {
        byte_offset(text, self.start)..byte_offset(text, self.end)
    }
}

fn byte_offset(text: &str, char_index: usize) -> usize {
    text.char_indices()
        .nth(char_index)
        .map(|(i, _)| i)
        .unwrap_or(text.len())
}

/// Copy the selected text; an empty selection leaves the clipboard alone
pub fn copy(text: &str, selection: Selection, clipboard: &mut dyn Clipboard) {
    let selection = selection.clamp(text);
    if !selection.is_empty() {
        clipboard.set_text(&text[selection.byte_range(text)]);
    }
}

/// Copy then remove the selected text
pub fn cut(text: &mut String, selection: Selection, clipboard: &mut dyn Clipboard) -> Selection {
    let selection = selection.clamp(text);
    if selection.is_empty() {
        return selection;
    }
    copy(text, selection, clipboard);
    let range = selection.byte_range(text);
    text.replace_range(range, "");
    Selection::caret(selection.start)
}

/// Replace the selection with the clipboard's text
pub fn paste(text: &mut String, selection: Selection, clipboard: &mut dyn Clipboard) -> Selection {
    let selection = selection.clamp(text);
    let Some(pasted) = clipboard.get_text() else {
        return selection;
    };
    let range = selection.byte_range(text);
    text.replace_range(range, &pasted);
    Selection::caret(selection.start + pasted.chars().count())
}

/// Remove the selection, or the char after the caret when nothing is selected
pub fn delete(text: &mut String, selection: Selection) -> Selection {
    let selection = selection.clamp(text);
    let range = if selection.is_empty() {
        Selection::new(selection.start, selection.start + 1).clamp(text)
    } else {
        selection
    };
    let bytes = range.byte_range(text);
    text.replace_range(bytes, "");
    Selection::caret(range.start)
}

pub fn select_all(text: &str) -> Selection {
    Selection::new(0, text.chars().count())
}

/// Append the local date and time to the end of the text
pub fn append_timestamp(text: &mut String) -> Selection {
    text.push_str(&timestamp_now());
    Selection::caret(text.chars().count())
}

fn timestamp_now() -> String {
    Local::now().format("%-I:%M %p %-m/%-d/%Y").to_string()
}
