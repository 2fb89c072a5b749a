//! Leading metadata block detection
//!
//! A document may start with a YAML block delimited by `---` lines. That
//! block is excluded from layout and re-attached verbatim afterwards.

const OPENING: &str = "---\n";

/// Split `source` into `(front_matter, body)`.
///
/// The front matter runs from the opening `---` line through the next line
/// that is exactly `---` or `...`, including that line's newline. Without a
/// closing delimiter the whole document is body.
#[must_use]
pub fn split_front_matter(source: &str) -> (Option<&str>, &str) {
    if !source.starts_with(OPENING) {
        return (None, source);
    }

    let mut offset = OPENING.len();
    for line in source[offset..].split_inclusive('\n') {
        offset += line.len();
        let content = line.trim_end_matches(['\n', '\r']);
        if content == "---" || content == "..." {
            return (Some(&source[..offset]), &source[offset..]);
        }
    }

    (None, source)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_front_matter() {
        assert_eq!(split_front_matter("<div></div>"), (None, "<div></div>"));
    }

    #[test]
    fn test_front_matter_split() {
        let source = "---\ntitle: Home\nlayout: main\n---\n<h1>Home</h1>\n";
        let (front, body) = split_front_matter(source);
        assert_eq!(front, Some("---\ntitle: Home\nlayout: main\n---\n"));
        assert_eq!(body, "<h1>Home</h1>\n");
    }

    #[test]
    fn test_front_matter_dots_terminator() {
        let (front, body) = split_front_matter("---\na: 1\n...\nbody");
        assert_eq!(front, Some("---\na: 1\n...\n"));
        assert_eq!(body, "body");
    }

    #[test]
    fn test_front_matter_without_trailing_newline() {
        let (front, body) = split_front_matter("---\na: 1\n---");
        assert_eq!(front, Some("---\na: 1\n---"));
        assert_eq!(body, "");
    }

    #[test]
    fn test_unterminated_front_matter_is_body() {
        let source = "---\ntitle: x\n<p>no end</p>";
        assert_eq!(split_front_matter(source), (None, source));
    }

    #[test]
    fn test_dashes_not_at_start() {
        let source = "\n---\na: 1\n---\n";
        assert_eq!(split_front_matter(source), (None, source));
    }
}
