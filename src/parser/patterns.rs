/// Regex patterns for ERB templates
///
/// All patterns are compiled once on first use via `LazyLock`. The `regex`
/// crate matches with finite automata, so every scan is linear in the input,
/// and alternations are leftmost-first: earlier branches win at the same
/// offset.
use std::sync::LazyLock;

use regex::Regex;

/// Build a regex from a compile-time constant pattern.
///
/// # Panics
///
/// Panics if the pattern is invalid. All patterns in this module are
/// compile-time constants covered by the tests below.
fn build_re(pattern: &str) -> Regex {
    Regex::new(pattern).unwrap_or_else(|_| panic!("Invalid regex pattern: {pattern}"))
}

// ===== BUILDING BLOCKS =====

/// Attribute name, never ending with a slash (so `<br/>` keeps its `/>`)
pub const ATTR_NAME: &str = r#"[^\r\n\t\f\v= '"<>]*[^\r\n\t\f\v= '"<>/]"#;
pub const UNQUOTED_VALUE: &str = r#"[^<>'"\s]+"#;
pub const TAG_NAME: &str = r"[a-z0-9_:-]+";

fn unquoted_attr() -> String {
    format!("{ATTR_NAME}={UNQUOTED_VALUE}")
}

fn single_quote_attr() -> String {
    format!("{ATTR_NAME}='[^']*'")
}

fn double_quote_attr() -> String {
    format!(r#"{ATTR_NAME}="[^"]*""#)
}

// ===== MARKUP =====

/// Tag-close or tag-open, close first.
///
/// Groups: `close` (closing tag name), `open` (opening tag name), `attrs`
/// (raw attribute text, whitespace-prefixed), `closing` (`/>` or `>`).
pub static TAG_RE: LazyLock<Regex> = LazyLock::new(|| {
    let attr = format!(
        r"\s+{sq}|\s+{dq}|\s+{uq}|\s+{ATTR_NAME}",
        sq = single_quote_attr(),
        dq = double_quote_attr(),
        uq = unquoted_attr(),
    );
    build_re(&format!(
        r"</\s*(?P<close>{TAG_NAME})\s*>|<(?P<open>{TAG_NAME})(?P<attrs>(?:{attr})*)\s*?(?P<closing>/>|>)"
    ))
});

/// One attribute inside an already matched attribute list
pub static ATTR_RE: LazyLock<Regex> = LazyLock::new(|| {
    build_re(&format!(
        "{}|{}|{}|{UNQUOTED_VALUE}",
        single_quote_attr(),
        double_quote_attr(),
        unquoted_attr()
    ))
});

pub static UNQUOTED_VALUE_RE: LazyLock<Regex> =
    LazyLock::new(|| build_re(&format!(r"\A{UNQUOTED_VALUE}\z")));

/// `name=` followed by whitespace in text that failed to scan as a tag
pub static BAD_ATTR_RE: LazyLock<Regex> =
    LazyLock::new(|| build_re(&format!(r"{ATTR_NAME}=\s+")));

pub static TAG_NAME_ONLY_RE: LazyLock<Regex> =
    LazyLock::new(|| build_re(&format!(r"\A{TAG_NAME}\z")));

pub static SELF_CLOSING_RE: LazyLock<Regex> = LazyLock::new(|| {
    build_re(
        r"(?i)\A(area|base|br|col|command|embed|hr|img|input|keygen|link|menuitem|meta|param|source|track|wbr)\z",
    )
});

/// Closing tag of a raw-text container
pub static RAW_TEXT_CLOSE_RE: LazyLock<Regex> =
    LazyLock::new(|| build_re(r"</\s*(script|style)\s*>"));

pub static SPACES_RE: LazyLock<Regex> = LazyLock::new(|| build_re(r"\s+"));

// ===== EMBEDDED CODE =====

/// `<%`, `<%=`, `<%==` or `<%-`, the code, then `%>` or `-%>`
pub static ERB_TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| build_re(r"(?s)(<%(?:==|=|-|))\s*(.*?)\s*(-?%>)"));

/// Anything shaped like a marker, including text that was already in the source
pub static PRE_PLACEHOLDER_RE: LazyLock<Regex> =
    LazyLock::new(|| build_re(r"erb[a-z0-9]+tag"));

/// Markers generated by this crate
pub static MARKER_RE: LazyLock<Regex> = LazyLock::new(|| build_re(r"erb[0-9]+tag"));

pub static STANDALONE_BLOCK_RE: LazyLock<Regex> =
    LazyLock::new(|| build_re(r"\A(yield|next)\b"));
pub static CLOSE_BLOCK_RE: LazyLock<Regex> = LazyLock::new(|| build_re(r"\A(end|\})\z"));
pub static REOPEN_BLOCK_RE: LazyLock<Regex> = LazyLock::new(|| {
    build_re(r"\A(else|ensure|elsif\b.*|when\b.*|in\b.*|rescue\b.*)\z")
});
