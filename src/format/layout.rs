/// Layout budget and line packing shared by text and attribute reflow
use std::borrow::Cow;

use crate::parser::patterns::SPACES_RE;

/// One indentation level
pub const INDENT: &str = "  ";

/// Below this many columns the indentation is no longer subtracted
pub const MIN_AVAILABLE_WIDTH: usize = 40;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layout {
    pub line_width: usize,
}

impl Default for Layout {
    fn default() -> Self {
        Self { line_width: 80 }
    }
}

impl Layout {
    #[must_use]
    pub fn new(line_width: usize) -> Self {
        Self { line_width }
    }

    /// Columns left for content at `depth`.
    ///
    /// Falls back to the full line width when indentation would leave fewer
    /// than [`MIN_AVAILABLE_WIDTH`] columns.
    #[must_use]
    pub fn available(&self, depth: usize) -> usize {
        let available = self.line_width.saturating_sub(INDENT.len() * depth);
        if available < MIN_AVAILABLE_WIDTH {
            self.line_width
        } else {
            available
        }
    }
}

/// `s` trimmed, on a new line indented to `depth`
#[must_use]
pub fn indented(depth: usize, s: &str) -> String {
    let s = s.trim();
    let mut line = String::with_capacity(1 + INDENT.len() * depth + s.len());
    line.push('\n');
    line.push_str(&INDENT.repeat(depth));
    line.push_str(s);
    line
}

/// Trim and squeeze every whitespace run to one space
#[must_use]
pub fn collapse_whitespace(s: &str) -> Cow<'_, str> {
    SPACES_RE.replace_all(s.trim(), " ")
}

/// Greedily pack `words` into lines joined by single spaces.
///
/// The first line may hold `first_width` columns, every later line
/// `width`. Words are never split: a word wider than the budget gets a
/// line of its own. `tail` columns of output glued to the last word are
/// counted as part of it.
pub fn greedy_lines<'w, I, M>(
    words: I,
    first_width: usize,
    width: usize,
    tail: usize,
    measure: M,
) -> Vec<String>
where
    I: IntoIterator<Item = &'w str>,
    M: Fn(&str) -> usize,
{
    let mut lines = Vec::new();
    let mut line = String::new();
    let mut line_width = 0;

    let mut words = words.into_iter().peekable();
    while let Some(word) = words.next() {
        let mut word_width = measure(word);
        if words.peek().is_none() {
            word_width += tail;
        }
        if line.is_empty() {
            line.push_str(word);
            line_width = word_width;
            continue;
        }
        let budget = if lines.is_empty() { first_width } else { width };
        if line_width + 1 + word_width <= budget {
            line.push(' ');
            line.push_str(word);
            line_width += 1 + word_width;
        } else {
            lines.push(std::mem::take(&mut line));
            line.push_str(word);
            line_width = word_width;
        }
    }
    if !line.is_empty() {
        lines.push(line);
    }
    lines
}
