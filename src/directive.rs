//! Inline directive parsing for `<%# erbfmt: %>` comments
//!
//! Supports in-file configuration overrides via special ERB comments:
//! `<%# erbfmt: --line-width 100 --single-class-per-line %>`
//!
//! `<%# erbfmt: off %>` leaves the whole file untouched.

use std::sync::LazyLock;

use regex::Regex;

use crate::config::Config;

static ERBFMT_DIRECTIVE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)<%#\s*erbfmt:\s*(.*?)\s*-?%>")
        .unwrap_or_else(|_| panic!("Invalid directive pattern"))
});

/// Parsed directive options that can override config
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct DirectiveOverrides {
    pub line_width: Option<usize>,
    pub single_class_per_line: Option<bool>,
    /// `off`: do not format this file
    pub disabled: bool,
}

impl DirectiveOverrides {
    /// Check if any overrides are set
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.line_width.is_none() && self.single_class_per_line.is_none() && !self.disabled
    }

    /// Apply the overrides on top of `config`
    pub fn apply(&self, config: &mut Config) {
        if let Some(v) = self.line_width {
            config.line_width = v;
        }
        if let Some(v) = self.single_class_per_line {
            config.single_class_per_line = v;
        }
    }
}

/// Parse one directive comment and return option overrides
///
/// # Returns
/// * `Some(DirectiveOverrides)` if `text` holds a directive with known options
/// * `None` otherwise
#[must_use]
pub fn parse_directive(text: &str) -> Option<DirectiveOverrides> {
    let caps = ERBFMT_DIRECTIVE_RE.captures(text)?;
    parse_directive_args(caps.get(1)?.as_str())
}

fn parse_directive_args(args_str: &str) -> Option<DirectiveOverrides> {
    let mut overrides = DirectiveOverrides::default();
    let mut tokens = args_str.split_whitespace();

    while let Some(token) = tokens.next() {
        match token {
            "off" | "disable" => overrides.disabled = true,
            "-l" | "--line-width" => {
                overrides.line_width = tokens.next().and_then(|v| v.parse().ok());
            }
            "--single-class-per-line" => overrides.single_class_per_line = Some(true),
            "--no-single-class-per-line" => overrides.single_class_per_line = Some(false),
            _ => {
                if let Some(v) = token.strip_prefix("--line-width=") {
                    overrides.line_width = v.parse().ok();
                } else {
                    tracing::debug!("ignoring unknown directive option {token:?}");
                }
            }
        }
    }

    if overrides.is_empty() {
        None
    } else {
        Some(overrides)
    }
}

/// Scan a document for erbfmt directives and return the first found
///
/// Only the first directive is used (subsequent ones are ignored).
#[must_use]
pub fn find_directive(source: &str) -> Option<DirectiveOverrides> {
    parse_directive(source)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_directive_comment_forms() {
        assert!(parse_directive("<%#erbfmt: off-%>").unwrap().disabled);
        assert!(parse_directive("<%# ERBFMT: off %>").unwrap().disabled);
        assert!(parse_directive("<%# a regular comment %>").is_none());
        assert!(parse_directive("<%= erbfmt: off %>").is_none());
    }

    #[test]
    fn test_parse_directive_line_width() {
        let overrides = parse_directive("<%# erbfmt: --line-width 100 %>").unwrap();
        assert_eq!(overrides.line_width, Some(100));

        let overrides = parse_directive("<%# erbfmt: -l 60 %>").unwrap();
        assert_eq!(overrides.line_width, Some(60));

        let overrides = parse_directive("<%# erbfmt: --line-width=72 %>").unwrap();
        assert_eq!(overrides.line_width, Some(72));
    }

    #[test]
    fn test_parse_directive_multiple() {
        let overrides =
            parse_directive("<%# erbfmt: --single-class-per-line -l 120 %>").unwrap();
        assert_eq!(
            overrides,
            DirectiveOverrides {
                line_width: Some(120),
                single_class_per_line: Some(true),
                disabled: false,
            }
        );
    }

    #[test]
    fn test_parse_directive_off() {
        let overrides = parse_directive("<%# erbfmt: off %>").unwrap();
        assert!(overrides.disabled);
    }

    #[test]
    fn test_parse_invalid_directive() {
        assert!(parse_directive("<%# erbfmt: %>").is_none());
        assert!(parse_directive("<%# erbfmt: --colour %>").is_none());
    }

    #[test]
    fn test_find_directive_uses_first() {
        let source = "<div>\n<%# erbfmt: -l 90 %>\n<%# erbfmt: -l 50 %>\n</div>";
        assert_eq!(find_directive(source).unwrap().line_width, Some(90));
        assert!(find_directive("<div></div>").is_none());
    }

    #[test]
    fn test_apply_overrides() {
        let mut config = Config::default();
        let overrides = find_directive("<%# erbfmt: -l 100 --single-class-per-line %>").unwrap();
        overrides.apply(&mut config);
        assert_eq!(config.line_width, 100);
        assert!(config.single_class_per_line);
    }
}
