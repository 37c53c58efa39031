//! Line/column computation for the status bar

/// 1-indexed cursor position
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CursorPosition {
    pub line: usize,
    pub column: usize,
}

impl Default for CursorPosition {
    fn default() -> Self {
        Self { line: 1, column: 1 }
    }
}

impl CursorPosition {
    /// Position of the cursor sitting before the `offset`-th char of `text`.
    ///
    /// Offsets past the end are clamped to the end of the text.
    pub fn from_offset(text: &str, offset: usize) -> Self {
        let mut line = 1;
        let mut column = 1;
        for c in text.chars().take(offset) {
            if c == '\n' {
                line += 1;
                column = 1;
            } else {
                column += 1;
            }
        }
        Self { line, column }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_start_of_text() {
        assert_eq!(CursorPosition::from_offset("", 0), CursorPosition::default());
        assert_eq!(
            CursorPosition::from_offset("abc", 0),
            CursorPosition { line: 1, column: 1 }
        );
    }

    #[test]
    fn test_counts_newlines() {
        let text = "first\nsecond\n\nfourth";
        assert_eq!(
            CursorPosition::from_offset(text, 3),
            CursorPosition { line: 1, column: 4 }
        );
        assert_eq!(
            CursorPosition::from_offset(text, 6),
            CursorPosition { line: 2, column: 1 }
        );
        assert_eq!(
            CursorPosition::from_offset(text, 14),
            CursorPosition { line: 4, column: 1 }
        );
        assert_eq!(
            CursorPosition::from_offset(text, 100),
            CursorPosition { line: 4, column: 7 }
        );
    }

    #[test]
    fn test_counts_chars_not_bytes() {
        assert_eq!(
            CursorPosition::from_offset("héllo", 2),
            CursorPosition { line: 1, column: 3 }
        );
    }
}
