/// Attribute-list reflow
///
/// An open tag that fits stays on one line. Otherwise every attribute moves
/// to its own line one level deeper than the tag, and an overlong `class` or
/// `data-action` value is itself split into token lines:
///
/// ```text
/// <button
///   type="submit"
///   class="
///     btn btn-primary btn-lg
///     rounded shadow"
/// >
/// ```
use crate::embed::ClassOrder;
use crate::parser::patterns::{ATTR_RE, UNQUOTED_VALUE_RE};

use super::layout::{collapse_whitespace, greedy_lines, indented, Layout};

/// Attributes whose values are whitespace-separated token lists
pub const MULTI_VALUE_ATTRIBUTES: &[&str] = &["class", "data-action"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Quote {
    Single,
    Double,
    /// Written without quotes
    None,
}

impl Quote {
    fn as_str(self) -> &'static str {
        match self {
            Quote::Single => "'",
            Quote::Double | Quote::None => "\"",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute<'s> {
    pub name: &'s str,
    /// Value without its quotes; `None` for a bare attribute
    pub value: Option<&'s str>,
    pub quote: Quote,
}

impl Attribute<'_> {
    #[must_use]
    pub fn is_multi_value(&self) -> bool {
        self.quote != Quote::None && MULTI_VALUE_ATTRIBUTES.contains(&self.name)
    }

    /// Value tokens, `class` tokens stably sorted when an order is given
    fn tokens(&self, class_order: Option<&dyn ClassOrder>) -> Vec<&str> {
        let mut tokens: Vec<&str> = self.value.unwrap_or("").split_whitespace().collect();
        if let (Some(order), "class") = (class_order, self.name) {
            tokens.sort_by_key(|token| order.rank(token).unwrap_or(usize::MAX));
        }
        tokens
    }

    /// `name`, or `name="value"` with the value's whitespace collapsed
    fn render(&self, class_order: Option<&dyn ClassOrder>) -> String {
        match (self.value, self.quote) {
            (None, _) => self.name.to_string(),
            (Some(value), Quote::None) => format!("{}=\"{value}\"", self.name),
            (Some(_), quote) => {
                let q = quote.as_str();
                format!("{}={q}{}{q}", self.name, self.tokens(class_order).join(" "))
            }
        }
    }
}

/// Split raw attribute text into attributes, in source order
#[must_use]
pub fn parse_attributes(attrs: &str) -> Vec<Attribute<'_>> {
    ATTR_RE
        .find_iter(attrs)
        .map(|m| {
            let attr = m.as_str().trim();
            let Some((name, value)) = attr.split_once('=') else {
                return Attribute {
                    name: attr,
                    value: None,
                    quote: Quote::None,
                };
            };
            if UNQUOTED_VALUE_RE.is_match(value) {
                return Attribute {
                    name,
                    value: Some(value),
                    quote: Quote::None,
                };
            }
            let quote = if value.starts_with('\'') {
                Quote::Single
            } else {
                Quote::Double
            };
            let inner = value
                .strip_prefix(['"', '\''])
                .and_then(|v| v.strip_suffix(['"', '\'']));
            match inner {
                Some(inner) => Attribute {
                    name,
                    value: Some(inner),
                    quote,
                },
                // `name=` with nothing after it is kept as written
                None => Attribute {
                    name: attr,
                    value: None,
                    quote: Quote::None,
                },
            }
        })
        .collect()
}

/// Settings for [`format_attributes`]
#[derive(Clone, Copy)]
pub struct AttributeLayout<'a> {
    pub layout: Layout,
    pub single_class_per_line: bool,
    pub class_order: Option<&'a dyn ClassOrder>,
}

/// Format the attribute text of an open tag at `depth`.
///
/// Returns what goes between the tag name and `closing`: empty, a single
/// space-prefixed line, or one line per attribute ending with a newline at
/// the tag's own depth.
pub fn format_attributes<M>(
    options: &AttributeLayout<'_>,
    name: &str,
    attrs: &str,
    closing: &str,
    depth: usize,
    measure: M,
) -> String
where
    M: Fn(&str) -> usize,
{
    if attrs.trim().is_empty() {
        return String::new();
    }

    let layout = options.layout;
    let plain = collapse_whitespace(attrs);
    let fits = measure(&format!("<{name} {plain}{closing}")) <= layout.available(depth);
    let attributes = parse_attributes(attrs);
    let has_class = attributes.iter().any(|attr| attr.name == "class");

    if fits && options.class_order.is_none() && !has_class {
        return format!(" {plain}");
    }

    let mut html = String::new();
    for attr in &attributes {
        let unit = attr.render(options.class_order);
        if fits {
            html.push(' ');
            html.push_str(&unit);
        } else if attr.is_multi_value() && measure(&unit) > layout.available(depth + 1) {
            push_token_lines(&mut html, options, attr, depth + 1, &measure);
        } else {
            html.push_str(&indented(depth + 1, &unit));
        }
    }

    if !fits {
        html.push_str(&indented(depth, ""));
    }
    html
}

/// `name="` on its own line, then the value tokens one level deeper with the
/// closing quote after the last of them
fn push_token_lines<M>(
    html: &mut String,
    options: &AttributeLayout<'_>,
    attr: &Attribute<'_>,
    depth: usize,
    measure: &M,
) where
    M: Fn(&str) -> usize,
{
    let quote = attr.quote.as_str();
    let tokens = attr.tokens(options.class_order);

    let lines = if attr.name == "class" && !options.single_class_per_line {
        let width = options.layout.available(depth + 1);
        greedy_lines(tokens, width, width, 0, measure)
    } else {
        tokens.into_iter().map(str::to_string).collect()
    };

    html.push_str(&indented(depth, &format!("{}={quote}", attr.name)));
    for line in &lines {
        html.push_str(&indented(depth + 1, line));
    }
    html.push_str(quote);
}
