/// Free-text reflow
///
/// Text between tags is collapsed to single spaces and packed into lines.
/// Blank lines survive only as a single paragraph break after the text.
use super::layout::greedy_lines;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Reflowed {
    /// The text began with whitespace, so its first line goes on a new line
    pub leading_space: bool,
    /// The trailing whitespace held a blank line
    pub paragraph_break: bool,
    pub lines: Vec<String>,
}

/// Break `text` into lines of at most `width` columns.
///
/// `inline_width` is the budget of the first line when it continues the
/// current output line, which is the case unless the text starts with
/// whitespace. `tail` is the width of tags that follow the text without
/// whitespace and so end up on its last line.
pub fn reflow<M>(
    text: &str,
    width: usize,
    inline_width: usize,
    tail: usize,
    measure: M,
) -> Reflowed
where
    M: Fn(&str) -> usize,
{
    let leading_space = text.starts_with(char::is_whitespace);
    let trailing = &text[text.trim_end().len()..];
    let paragraph_break = trailing.matches('\n').count() > 1;

    let first_width = if leading_space { width } else { inline_width };
    Reflowed {
        leading_space,
        paragraph_break,
        lines: greedy_lines(text.split_whitespace(), first_width, width, tail, measure),
    }
}
