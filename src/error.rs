//! Error types and result aliases for erbfmt.
//!
//! This module defines the error handling infrastructure:
//! - [`Result<T>`]: Type alias for `anyhow::Result<T>` used by the command line and config layers
//! - [`FormatError`]: A fatal layout failure, located in the source document
//! - [`ErrorKind`]: What went wrong, independent of where

use std::fmt;

use anyhow::Result as AnyhowResult;
use thiserror::Error;

pub type Result<T> = AnyhowResult<T>;

/// The reasons a document can be rejected by the layout engine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ErrorKind {
    /// `name= "value"`: whitespace between the equals sign and the value
    #[error("Bad attribute, please fix spaces after the equal sign: {text:?}")]
    BadAttributeSyntax { text: String },

    #[error("Unknown tag {name:?}")]
    UnknownTagName { name: String },

    /// `found` is `None` when the document ended with `open` still on the stack
    #[error("{}", describe_unmatched(.found.as_deref(), .open))]
    UnmatchedCloseTag {
        found: Option<String>,
        open: Vec<String>,
    },

    #[error("Unrecognized content: {text:?}")]
    UnrecognizedContent { text: String },
}

fn describe_unmatched(found: Option<&str>, open: &[String]) -> String {
    match (found, open.is_empty()) {
        (Some(found), true) => format!("Unmatched close tag {found:?}, but nothing was open"),
        (Some(found), false) => format!(
            "Unmatched close tag {found:?}, but {:?} was on the stack",
            open.join(", ")
        ),
        (None, _) => format!("Unclosed at end of document: {}", open.join(", ")),
    }
}

/// A fatal formatting error with its location in the source document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatError {
    pub kind: ErrorKind,
    pub filename: String,
    /// 1-based line in the original source, front matter included
    pub line: usize,
    /// Label of the innermost open block when the error was raised
    pub context: Option<String>,
}

impl fmt::Display for FormatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.filename, self.line)?;
        if let Some(context) = &self.context {
            write!(f, ":in `{context}'")?;
        }
        write!(f, ": {}", self.kind)
    }
}

impl std::error::Error for FormatError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.kind)
    }
}

impl FormatError {
    #[must_use]
    pub fn is_unmatched(&self) -> bool {
        matches!(self.kind, ErrorKind::UnmatchedCloseTag { .. })
    }
}
