//! Markup scanner
//!
//! Splits a placeholder-substituted body into text runs and tags. Tags are
//! found with [`TAG_RE`]; whatever lies between two tags is text, which may
//! still carry code markers. Content of `<script>` and `<style>` is handed
//! out as one raw segment without looking for markup inside it.

use super::patterns::{RAW_TEXT_CLOSE_RE, TAG_RE};

/// Tags whose content is never scanned for markup
pub const RAW_TEXT_TAGS: &[&str] = &["script", "style"];

/// What the scanner found
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenKind<'s> {
    /// Text between tags, code markers included
    Text(&'s str),
    /// Verbatim content of a raw-text container
    Raw(&'s str),
    Open {
        name: &'s str,
        /// Attribute text as written, leading whitespace included
        attrs: &'s str,
        /// `>` or `/>`
        closing: &'s str,
    },
    Close {
        name: &'s str,
    },
    /// A tag match that is neither an open nor a close tag
    Unrecognized(&'s str),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token<'s> {
    /// Byte offset of the token in the scanned body
    pub offset: usize,
    /// Source before the token ends with whitespace
    pub after_space: bool,
    pub kind: TokenKind<'s>,
}

/// Iterator over the tokens of a body
pub struct Scanner<'s> {
    source: &'s str,
    pos: usize,
    /// Tag matched together with the text that preceded it
    pending: Option<Token<'s>>,
    /// Inside a raw-text container with this name
    raw_until: Option<&'s str>,
}

impl<'s> Scanner<'s> {
    #[must_use]
    pub fn new(source: &'s str) -> Self {
        Self {
            source,
            pos: 0,
            pending: None,
            raw_until: None,
        }
    }

    fn after_space(&self, offset: usize) -> bool {
        self.source[..offset].ends_with(char::is_whitespace)
    }

    fn text(&self, offset: usize, text: &'s str) -> Token<'s> {
        Token {
            offset,
            after_space: self.after_space(offset),
            kind: TokenKind::Text(text),
        }
    }

    /// Raw content up to the closing tag named `name`
    fn scan_raw(&mut self, name: &'s str) -> Option<Token<'s>> {
        let source = self.source;
        let start = self.pos;
        let rest = &source[start..];
        let close = RAW_TEXT_CLOSE_RE
            .captures_iter(rest)
            .find(|caps| &caps[1] == name)
            .and_then(|caps| caps.get(0));

        let end = close.map_or(rest.len(), |m| m.start());
        if let Some(m) = close {
            self.pending = Some(Token {
                offset: start + m.start(),
                after_space: self.after_space(start + m.start()),
                kind: TokenKind::Close { name },
            });
            self.pos = start + m.end();
        } else {
            self.pos = self.source.len();
        }

        if end == 0 {
            return self.pending.take();
        }
        Some(Token {
            offset: start,
            after_space: self.after_space(start),
            kind: TokenKind::Raw(&rest[..end]),
        })
    }

    fn scan_markup(&mut self) -> Option<Token<'s>> {
        let source = self.source;
        let start = self.pos;
        let rest = &source[start..];

        let Some(caps) = TAG_RE.captures(rest) else {
            self.pos = self.source.len();
            return Some(self.text(start, rest));
        };
        // Invariant: group 0 always participates in a match
        let whole = caps.get(0)?;
        let offset = start + whole.start();
        self.pos = start + whole.end();

        let kind = if let Some(name) = caps.name("close") {
            TokenKind::Close {
                name: name.as_str(),
            }
        } else if let Some(name) = caps.name("open") {
            let closing = caps.name("closing").map_or(">", |m| m.as_str());
            if closing == ">" && RAW_TEXT_TAGS.contains(&name.as_str()) {
                self.raw_until = Some(name.as_str());
            }
            TokenKind::Open {
                name: name.as_str(),
                attrs: caps.name("attrs").map_or("", |m| m.as_str()),
                closing,
            }
        } else {
            TokenKind::Unrecognized(whole.as_str())
        };
        let tag = Token {
            offset,
            after_space: self.after_space(offset),
            kind,
        };

        if whole.start() == 0 {
            return Some(tag);
        }
        self.pending = Some(tag);
        Some(self.text(start, &rest[..whole.start()]))
    }
}

impl<'s> Iterator for Scanner<'s> {
    type Item = Token<'s>;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(token) = self.pending.take() {
            return Some(token);
        }
        if self.pos >= self.source.len() {
            return None;
        }
        match self.raw_until.take() {
            Some(name) => self.scan_raw(name),
            None => self.scan_markup(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<TokenKind<'_>> {
        Scanner::new(source).map(|token| token.kind).collect()
    }

    #[test]
    fn test_text_and_tags() {
        assert_eq!(
            kinds("<div        > asdf    </div>"),
            vec![
                TokenKind::Open {
                    name: "div",
                    attrs: "",
                    closing: ">"
                },
                TokenKind::Text(" asdf    "),
                TokenKind::Close { name: "div" },
            ]
        );
    }

    #[test]
    fn test_trailing_text() {
        assert_eq!(
            kinds("<br/>tail"),
            vec![
                TokenKind::Open {
                    name: "br",
                    attrs: "",
                    closing: "/>"
                },
                TokenKind::Text("tail"),
            ]
        );
    }

    #[test]
    fn test_offsets_and_spacing() {
        let tokens: Vec<Token<'_>> = Scanner::new("a <b>c</b>").collect();
        assert_eq!(tokens.len(), 4);
        assert_eq!(tokens[1].offset, 2);
        assert!(tokens[1].after_space);
        assert_eq!(tokens[3].offset, 6);
        assert!(!tokens[3].after_space);
    }

    #[test]
    fn test_attributes_are_captured_raw() {
        assert_eq!(
            kinds(r#"<input type="text"  disabled >"#),
            vec![TokenKind::Open {
                name: "input",
                attrs: r#" type="text"  disabled"#,
                closing: ">"
            }]
        );
    }

    #[test]
    fn test_script_content_is_raw() {
        assert_eq!(
            kinds("<script>if (a<b && c>d) {}</script><p>"),
            vec![
                TokenKind::Open {
                    name: "script",
                    attrs: "",
                    closing: ">"
                },
                TokenKind::Raw("if (a<b && c>d) {}"),
                TokenKind::Close { name: "script" },
                TokenKind::Open {
                    name: "p",
                    attrs: "",
                    closing: ">"
                },
            ]
        );
    }

    #[test]
    fn test_style_close_must_match_name() {
        assert_eq!(
            kinds("<style>a</script>b</style>"),
            vec![
                TokenKind::Open {
                    name: "style",
                    attrs: "",
                    closing: ">"
                },
                TokenKind::Raw("a</script>b"),
                TokenKind::Close { name: "style" },
            ]
        );
    }

    #[test]
    fn test_empty_script() {
        assert_eq!(
            kinds("<script></script>"),
            vec![
                TokenKind::Open {
                    name: "script",
                    attrs: "",
                    closing: ">"
                },
                TokenKind::Close { name: "script" },
            ]
        );
    }

    #[test]
    fn test_unclosed_script_runs_to_end() {
        assert_eq!(
            kinds("<script>x = 1"),
            vec![
                TokenKind::Open {
                    name: "script",
                    attrs: "",
                    closing: ">"
                },
                TokenKind::Raw("x = 1"),
            ]
        );
    }

    #[test]
    fn test_self_closed_script_is_not_raw() {
        assert_eq!(
            kinds("<script/><b>"),
            vec![
                TokenKind::Open {
                    name: "script",
                    attrs: "",
                    closing: "/>"
                },
                TokenKind::Open {
                    name: "b",
                    attrs: "",
                    closing: ">"
                },
            ]
        );
    }

    #[test]
    fn test_unmatched_angle_brackets_are_text() {
        assert_eq!(kinds("1 < 2 > 0"), vec![TokenKind::Text("1 < 2 > 0")]);
    }
}
