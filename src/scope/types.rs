//! Block stack entries

/// One currently open construct
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Frame {
    /// An HTML element waiting for its closing tag
    Tag {
        name: String,
        /// The open tag as it was emitted
        raw: String,
    },
    /// An embedded-code block (`if`, `each do`, ...) waiting for `end`
    CodeBlock { code: String },
}

/// Discriminant of a [`Frame`], used when matching pops
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameKind {
    Tag,
    CodeBlock,
}

impl Frame {
    #[must_use]
    pub fn tag(name: &str, raw: impl Into<String>) -> Self {
        Frame::Tag {
            name: name.to_string(),
            raw: raw.into(),
        }
    }

    #[must_use]
    pub fn code_block(code: impl Into<String>) -> Self {
        Frame::CodeBlock { code: code.into() }
    }

    #[must_use]
    pub fn kind(&self) -> FrameKind {
        match self {
            Frame::Tag { .. } => FrameKind::Tag,
            Frame::CodeBlock { .. } => FrameKind::CodeBlock,
        }
    }

    /// Tag name or opening code, used in diagnostics
    #[must_use]
    pub fn label(&self) -> &str {
        match self {
            Frame::Tag { name, .. } => name,
            Frame::CodeBlock { code } => code,
        }
    }

    /// Whether a closer of `kind` named `name` closes this frame.
    ///
    /// Tags must agree on the name; any code closer closes any code block.
    #[must_use]
    pub fn is_closed_by(&self, kind: FrameKind, name: &str) -> bool {
        self.kind() == kind
            && match self {
                Frame::Tag { name: open, .. } => open == name,
                Frame::CodeBlock { .. } => true,
            }
    }
}
