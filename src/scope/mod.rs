//! Nesting tracking and indentation control.
//!
//! Open HTML elements and open ERB blocks share one stack:
//! - Tags: pushed by a non-self-closing open tag, popped by `</name>`
//! - Code blocks: pushed by `if`, `each do`, ..., popped by `end` or `}`
//! - Reopeners (`else`, `when`, `rescue`, ...) pop and push in one step
//!
//! The [`BlockStack`] depth is the indentation level, and every pop is
//! checked against the top [`Frame`].

pub mod stack;
pub mod types;

pub use stack::BlockStack;
pub use types::{Frame, FrameKind};
