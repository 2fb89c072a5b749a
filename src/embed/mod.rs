//! Collaborators for the embedded language.
//!
//! The layout engine never parses Ruby itself. It asks two questions through
//! traits defined here:
//! - [`SyntaxProbe`]: does this fragment leave a block open?
//! - [`CodeFormatter`]: how should this fragment be written at a given width?
//!
//! and optionally orders class tokens through [`ClassOrder`].
//!
//! Default implementations:
//! - [`KeywordProbe`]: keyword and bracket counting heuristic
//! - [`Passthrough`]: never changes code
//! - [`CommandFormatter`]: pipes fragments through an external program
//! - [`ListedClassOrder`]: ranks classes by their position in a list

pub mod command;
pub mod probe;

use std::collections::HashMap;

pub use command::CommandFormatter;
pub use probe::KeywordProbe;

/// Syntax validator for the embedded language
pub trait SyntaxProbe {
    /// `true` when `code` does not parse on its own because it opens a block
    /// that a later fragment closes.
    fn is_incomplete(&self, code: &str) -> bool;
}

/// Result of asking a [`CodeFormatter`] to rewrite a fragment
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormatOutcome {
    Formatted(String),
    /// The fragment could not be parsed or formatted; keep the original
    Unchanged,
}

/// Formatter for the embedded language
pub trait CodeFormatter {
    /// Rewrite `code` so that it fits in `width` columns where possible.
    fn format_code(&self, code: &str, width: usize) -> FormatOutcome;
}

/// Ordering policy for the tokens of a `class` attribute
pub trait ClassOrder {
    /// Sort key of `class`; `None` sorts after every ranked class.
    fn rank(&self, class: &str) -> Option<usize>;
}

/// Leaves every fragment as written
#[derive(Debug, Clone, Copy, Default)]
pub struct Passthrough;

impl CodeFormatter for Passthrough {
    fn format_code(&self, _code: &str, _width: usize) -> FormatOutcome {
        FormatOutcome::Unchanged
    }
}

impl<F> SyntaxProbe for F
where
    F: Fn(&str) -> bool,
{
    fn is_incomplete(&self, code: &str) -> bool {
        self(code)
    }
}

impl<F> ClassOrder for F
where
    F: Fn(&str) -> Option<usize>,
{
    fn rank(&self, class: &str) -> Option<usize> {
        self(class)
    }
}

/// Ranks classes by their position in a configured list.
///
/// An entry ending in `*` ranks every class starting with the text before
/// it, e.g. `md:*`. Exact entries win over prefixes.
#[derive(Debug, Clone, Default)]
pub struct ListedClassOrder {
    exact: HashMap<String, usize>,
    prefixes: Vec<(String, usize)>,
}

impl ListedClassOrder {
    #[must_use]
    pub fn new<I, S>(classes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut order = Self::default();
        for (rank, class) in classes.into_iter().enumerate() {
            let class = class.as_ref();
            if let Some(prefix) = class.strip_suffix('*') {
                order.prefixes.push((prefix.to_string(), rank));
            } else {
                order.exact.entry(class.to_string()).or_insert(rank);
            }
        }
        order
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.exact.is_empty() && self.prefixes.is_empty()
    }
}

impl ClassOrder for ListedClassOrder {
    fn rank(&self, class: &str) -> Option<usize> {
        self.exact.get(class).copied().or_else(|| {
            self.prefixes
                .iter()
                .find(|(prefix, _)| class.starts_with(prefix.as_str()))
                .map(|&(_, rank)| rank)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_passthrough_never_formats() {
        assert_eq!(Passthrough.format_code("a(1)", 80), FormatOutcome::Unchanged);
    }

    #[test]
    fn test_closures_as_collaborators() {
        let probe = |code: &str| code.ends_with(" do");
        assert!(probe.is_incomplete("items.each do"));
        assert!(!probe.is_incomplete("x"));

        let order = |class: &str| if class == "first" { Some(0) } else { None };
        assert_eq!(order.rank("first"), Some(0));
        assert_eq!(order.rank("other"), None);
    }

    #[test]
    fn test_listed_class_order() {
        let order = ListedClassOrder::new(["container", "flex", "md:*", "p-4"]);
        assert_eq!(order.rank("container"), Some(0));
        assert_eq!(order.rank("p-4"), Some(3));
        assert_eq!(order.rank("md:flex"), Some(2));
        assert_eq!(order.rank("unknown"), None);
        assert!(!order.is_empty());
    }

    #[test]
    fn test_listed_class_order_exact_beats_prefix() {
        let order = ListedClassOrder::new(["btn*", "btn-primary"]);
        assert_eq!(order.rank("btn-primary"), Some(1));
        assert_eq!(order.rank("btn-small"), Some(0));
    }

    #[test]
    fn test_listed_class_order_keeps_first_duplicate() {
        let order = ListedClassOrder::new(["a", "b", "a"]);
        assert_eq!(order.rank("a"), Some(0));
    }
}
