//! erbfmt - Auto-formatter for ERB templates
//!
//! Lays out HTML with embedded Ruby: one element per line, nested
//! indentation driven by both markup and code blocks, overlong attribute
//! lists and text paragraphs reflowed to the line width, and embedded code
//! optionally handed to an external Ruby formatter.
//!
//! ```
//! let html = erbfmt::format("<div        > asdf    </div>").unwrap();
//! assert_eq!(html, "<div>\n  asdf\n</div>\n");
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::struct_excessive_bools)]

pub mod cli;
pub mod config;
pub mod directive;
pub mod embed;
pub mod error;
pub mod format;
pub mod ignore;
pub mod observe;
pub mod parser;
pub mod process;
pub mod scope;

// Re-export commonly used types
pub use cli::{build_cli, parse_args, parse_args_from, CliArgs};
pub use config::Config;
pub use directive::{find_directive, parse_directive, DirectiveOverrides};
pub use embed::{ClassOrder, CodeFormatter, FormatOutcome, SyntaxProbe};
pub use error::{ErrorKind, FormatError, Result};
pub use ignore::IgnoreList;
pub use process::{format, format_document, format_file, FormatOptions};
