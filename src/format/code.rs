/// Embedded-code fragments: parsing, classification and re-indentation
use crate::embed::SyntaxProbe;
use crate::parser::patterns::{CLOSE_BLOCK_RE, ERB_TAG_RE, REOPEN_BLOCK_RE, STANDALONE_BLOCK_RE};

use super::layout::INDENT;

/// Terminators tried, in order, to close an opener before formatting it
pub const SYNTHETIC_TERMINATORS: &[&str] = &["end", "}"];

/// An ERB tag split into delimiters and code
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ErbTag<'s> {
    /// `<%`, `<%=`, `<%==` or `<%-`
    pub open: &'s str,
    /// Code with surrounding whitespace removed
    pub code: &'s str,
    /// `%>` or `-%>`
    pub close: &'s str,
}

impl<'s> ErbTag<'s> {
    #[must_use]
    pub fn parse(tag: &'s str) -> Option<Self> {
        let caps = ERB_TAG_RE.captures(tag)?;
        Some(Self {
            open: caps.get(1)?.as_str(),
            code: caps.get(2)?.as_str(),
            close: caps.get(3)?.as_str(),
        })
    }

    /// The tag around `code`, one space inside each delimiter.
    ///
    /// Comments keep `#` against the opening delimiter.
    #[must_use]
    pub fn render(&self, code: &str) -> String {
        let space = if code.starts_with('#') { "" } else { " " };
        format!("{}{space}{code} {}", self.open, self.close)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CodeKind {
    /// `<%# ... %>`
    Comment,
    /// `yield`, `next`
    Standalone,
    /// `end`, `}`
    Closer,
    /// `else`, `elsif ...`, `when ...`, `in ...`, `rescue ...`, `ensure`
    Reopener,
    /// Leaves a block open
    Opener,
    Expression,
}

/// Classify one fragment. Keyword checks run before the probe is asked.
pub fn classify(code: &str, probe: &dyn SyntaxProbe) -> CodeKind {
    if code.starts_with('#') {
        CodeKind::Comment
    } else if STANDALONE_BLOCK_RE.is_match(code) {
        CodeKind::Standalone
    } else if CLOSE_BLOCK_RE.is_match(code) {
        CodeKind::Closer
    } else if REOPEN_BLOCK_RE.is_match(code) {
        CodeKind::Reopener
    } else if probe.is_incomplete(code) {
        CodeKind::Opener
    } else {
        CodeKind::Expression
    }
}

/// The first terminator that makes `code` a complete program
pub fn autoclose(code: &str, probe: &dyn SyntaxProbe) -> Option<(&'static str, String)> {
    SYNTHETIC_TERMINATORS.iter().find_map(|&terminator| {
        let candidate = format!("{code}\n{terminator}");
        (!probe.is_incomplete(&candidate)).then_some((terminator, candidate))
    })
}

/// Drop the synthetic terminator line from formatted output
#[must_use]
pub fn strip_terminator<'f>(formatted: &'f str, terminator: &str) -> Option<&'f str> {
    let (head, last) = formatted.trim_end().rsplit_once('\n')?;
    let head = head.trim_end();
    (last.trim() == terminator && !head.is_empty()).then_some(head)
}

/// Indent every line after the first to `depth`, keeping relative
/// indentation. Blank lines stay empty.
#[must_use]
pub fn reindent(formatted: &str, depth: usize) -> String {
    let indent = INDENT.repeat(depth);
    let mut lines = formatted.trim().lines();
    let mut out = lines.next().unwrap_or_default().trim_end().to_string();
    for line in lines {
        out.push('\n');
        let line = line.trim_end();
        if !line.is_empty() {
            out.push_str(&indent);
            out.push_str(line);
        }
    }
    out
}
