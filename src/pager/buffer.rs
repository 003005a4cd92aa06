//! The immutable text being paged.

use std::sync::OnceLock;

use regex::Regex;

/// Pre-styled display lines.
///
/// Lines may carry embedded ANSI escapes; they are written to the screen
/// verbatim. Built once before a session starts and never mutated.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LineBuffer {
    lines: Vec<String>,
}

impl LineBuffer {
    /// Split `text` into display lines. A trailing newline does not produce
    /// an extra empty line.
    pub fn new(text: &str) -> Self {
        Self {
            lines: text.lines().map(ToOwned::to_owned).collect(),
        }
    }

    pub fn from_lines(lines: Vec<String>) -> Self {
        Self { lines }
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn line(&self, index: usize) -> Option<&str> {
        self.lines.get(index).map(String::as_str)
    }

    /// Lines `[start, min(len, start + count))`.
    pub fn window(&self, start: usize, count: usize) -> &[String] {
        let start = start.min(self.lines.len());
        let end = start.saturating_add(count).min(self.lines.len());
        &self.lines[start..end]
    }

    /// Indices of lines whose visible text contains `query`, ignoring case.
    ///
    /// An empty query matches nothing.
    pub fn find_matches(&self, query: &str) -> Vec<usize> {
        if query.is_empty() {
            return Vec::new();
        }
        let needle = query.to_lowercase();
        self.lines
            .iter()
            .enumerate()
            .filter(|(_, line)| strip_ansi(line).to_lowercase().contains(&needle))
            .map(|(index, _)| index)
            .collect()
    }
}

/// Remove SGR color/attribute escapes so search only sees visible text.
pub fn strip_ansi(line: &str) -> std::borrow::Cow<'_, str> {
    static SGR: OnceLock<Regex> = OnceLock::new();
    if !line.contains('\x1b') {
        return std::borrow::Cow::Borrowed(line);
    }
    let re = SGR.get_or_init(|| Regex::new(r"\x1b\[[0-9;:]*m").expect("valid SGR pattern"));
    re.replace_all(line, "")
}
