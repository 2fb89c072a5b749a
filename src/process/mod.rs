//! Document formatting pipeline.
//!
//! One run formats one complete document in a single pass:
//!
//! - Split off front matter and replace ERB tags with opaque markers
//! - Scan the markup into text runs and tags
//! - Track open tags and ERB blocks to derive the indentation depth
//! - Reflow text and attribute lists to the line width
//! - Hand embedded code to the configured formatter and re-indent it
//! - Restore the markers and re-attach front matter
//!
//! The main entry points are [`format_document`], which formats a string
//! with explicit [`FormatOptions`], and [`format_file`], which reads a
//! buffered reader and writes the result using a [`Config`](crate::Config).

pub mod pipeline;

pub use pipeline::{format, format_document, format_file, FormatOptions, DEFAULT_FILENAME};
