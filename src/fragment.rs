//! Source fragment value type
//!
//! A fragment is a block of generated JavaScript text whose line count is
//! computed once at construction, so the composer never re-scans text to
//! decide when to stop.

use std::fmt;

/// A self-contained unit of generated source text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFragment {
    text: String,
    line_count: usize,
}

impl SourceFragment {
    /// Wrap text, counting its lines the way a `split('\n')` would
    ///
    /// An empty string counts as one line, and a trailing newline adds an
    /// empty final line.
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let line_count = text.bytes().filter(|&b| b == b'\n').count() + 1;
        Self { text, line_count }
    }

    /// Fragment text without trailing separator
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Number of lines in the fragment text
    pub fn line_count(&self) -> usize {
        self.line_count
    }

    /// Consume the fragment, returning its text
    pub fn into_text(self) -> String {
        self.text
    }
}

impl fmt::Display for SourceFragment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_line() {
        let fragment = SourceFragment::new("const a = 1;");
        assert_eq!(fragment.line_count(), 1);
    }

    #[test]
    fn test_multi_line() {
        let fragment = SourceFragment::new("function f() {\n  return 1;\n}");
        assert_eq!(fragment.line_count(), 3);
        assert_eq!(fragment.text(), "function f() {\n  return 1;\n}");
    }

    #[test]
    fn test_empty_counts_one_line() {
        assert_eq!(SourceFragment::new("").line_count(), 1);
    }

    #[test]
    fn test_trailing_newline_adds_line() {
        assert_eq!(SourceFragment::new("a\n").line_count(), 2);
    }

    #[test]
    fn test_display_matches_text() {
        let fragment = SourceFragment::new("x\ny");
        assert_eq!(fragment.to_string(), "x\ny");
        assert_eq!(fragment.into_text(), "x\ny");
    }
}
