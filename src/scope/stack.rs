//! `BlockStack` - nesting tracker for tags and code blocks
//!
//! The stack depth is the indentation level of whatever is emitted next.
//! Every pop is validated against the top entry, so a mismatched closing tag
//! or a stray `end` aborts formatting instead of silently shifting indentation.

use crate::error::ErrorKind;
use crate::scope::types::{Frame, FrameKind};

#[derive(Debug, Default, Clone)]
pub struct BlockStack {
    frames: Vec<Frame>,
}

impl BlockStack {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, frame: Frame) {
        self.frames.push(frame);
    }

    /// Pop the top frame if a closer of `kind` named `name` matches it.
    ///
    /// `found` is the closer as written, for the error message.
    pub fn pop(&mut self, kind: FrameKind, name: &str, found: &str) -> Result<Frame, ErrorKind> {
        let closes_top = self
            .frames
            .last()
            .is_some_and(|top| top.is_closed_by(kind, name));
        if !closes_top {
            return Err(unmatched(found, self.frames.last()));
        }
        self.frames.pop().ok_or_else(|| unmatched(found, None))
    }

    #[must_use]
    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    #[must_use]
    pub fn top(&self) -> Option<&Frame> {
        self.frames.last()
    }

    /// Labels of every open frame, outermost first
    #[must_use]
    pub fn labels(&self) -> Vec<String> {
        self.frames.iter().map(|f| f.label().to_string()).collect()
    }

    /// Fails when anything is still open
    pub fn finish(&self) -> Result<(), ErrorKind> {
        if self.frames.is_empty() {
            Ok(())
        } else {
            Err(ErrorKind::UnmatchedCloseTag {
                found: None,
                open: self.labels(),
            })
        }
    }
}

fn unmatched(found: &str, top: Option<&Frame>) -> ErrorKind {
    ErrorKind::UnmatchedCloseTag {
        found: Some(found.to_string()),
        open: top.map(|f| f.label().to_string()).into_iter().collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_pop_tags() {
        let mut stack = BlockStack::new();
        stack.push(Frame::tag("ul", "<ul>"));
        stack.push(Frame::tag("li", "<li>"));
        assert_eq!(stack.depth(), 2);

        let popped = stack.pop(FrameKind::Tag, "li", "</li>").unwrap();
        assert_eq!(popped.label(), "li");
        assert_eq!(stack.depth(), 1);
    }

    #[test]
    fn test_pop_mismatched_tag() {
        let mut stack = BlockStack::new();
        stack.push(Frame::tag("div", "<div>"));
        let error = stack.pop(FrameKind::Tag, "span", "</span>").unwrap_err();
        assert_eq!(
            error,
            ErrorKind::UnmatchedCloseTag {
                found: Some("</span>".to_string()),
                open: vec!["div".to_string()],
            }
        );
        // A failed pop leaves the stack untouched
        assert_eq!(stack.depth(), 1);
    }

    #[test]
    fn test_pop_empty_stack() {
        let mut stack = BlockStack::new();
        let error = stack.pop(FrameKind::Tag, "p", "</p>").unwrap_err();
        assert_eq!(
            error,
            ErrorKind::UnmatchedCloseTag {
                found: Some("</p>".to_string()),
                open: vec![],
            }
        );
    }

    #[test]
    fn test_code_closer_cannot_close_tag() {
        let mut stack = BlockStack::new();
        stack.push(Frame::code_block("if admin?"));
        stack.push(Frame::tag("p", "<p>"));
        assert!(stack.pop(FrameKind::CodeBlock, "end", "end").is_err());
        assert!(stack.pop(FrameKind::Tag, "p", "</p>").is_ok());
        assert!(stack.pop(FrameKind::CodeBlock, "end", "end").is_ok());
        assert!(stack.is_empty());
    }

    #[test]
    fn test_finish_reports_open_frames() {
        let mut stack = BlockStack::new();
        assert!(stack.finish().is_ok());
        stack.push(Frame::tag("main", "<main>"));
        stack.push(Frame::code_block("if x"));
        assert_eq!(
            stack.finish().unwrap_err(),
            ErrorKind::UnmatchedCloseTag {
                found: None,
                open: vec!["main".to_string(), "if x".to_string()],
            }
        );
        assert_eq!(stack.top().map(Frame::label), Some("if x"));
    }
}
