//! Template tokenizing.
//!
//! This module separates markup from embedded code without building a tree:
//! - [`front_matter`]: Splits a leading `---` metadata block off the body
//! - [`placeholder`]: Swaps ERB tags for opaque markers and back
//! - [`scanner`]: Regex-driven split of the body into text runs and tags
//! - [`patterns`]: Precompiled regex patterns for markup and ERB syntax
//!
//! Markers are substituted before scanning, so code containing `<`, `>` or
//! quotes is invisible to the markup patterns.

pub mod front_matter;
pub mod patterns;
pub mod placeholder;
pub mod scanner;

pub use front_matter::split_front_matter;
pub use placeholder::Placeholders;
pub use scanner::{Scanner, Token, TokenKind, RAW_TEXT_TAGS};
