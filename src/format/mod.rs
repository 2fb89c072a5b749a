//! Width-aware layout.
//!
//! This module contains the reflow logic organized into submodules:
//! - [`layout`]: Available width per depth, indentation and greedy line packing
//! - [`text`]: Collapses free text and breaks it into lines at spaces
//! - [`attributes`]: One-line or one-attribute-per-line open tags, token-split class lists
//! - [`code`]: Classifies ERB fragments and re-indents formatted code

pub mod attributes;
pub mod code;
pub mod layout;
pub mod text;

pub use attributes::{format_attributes, parse_attributes, Attribute, AttributeLayout, Quote};
pub use code::{autoclose, classify, reindent, strip_terminator, CodeKind, ErbTag};
pub use layout::{collapse_whitespace, greedy_lines, indented, Layout, INDENT};
pub use text::{reflow, Reflowed};
