/// `KeywordProbe` - block detection for Ruby fragments without a parser
///
/// A fragment is incomplete when it opens more than it closes: a leading
/// block keyword (`if`, `case`, `def`, ...), a `do` block, or an unbalanced
/// `{`, `(` or `[`. String literals and `#` comments are blanked out before
/// counting so their contents never count.
use std::sync::LazyLock;

use regex::Regex;

use super::SyntaxProbe;

static BLOCK_KEYWORD_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\A(if|unless|while|until|case|begin|def|class|module|for)\b")
        .unwrap_or_else(|_| panic!("Invalid block keyword pattern"))
});
/// Loops whose optional `do` is part of the header, not a block
static LOOP_KEYWORD_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\A(while|until|for)\b").unwrap_or_else(|_| panic!("Invalid loop keyword pattern"))
});
static DO_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:\A|[^.\w])do\b").unwrap_or_else(|_| panic!("Invalid do pattern"))
});
static END_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:\A|[^.\w:])end\b").unwrap_or_else(|_| panic!("Invalid end pattern"))
});

#[derive(Debug, Clone, Copy, Default)]
pub struct KeywordProbe;

impl SyntaxProbe for KeywordProbe {
    fn is_incomplete(&self, code: &str) -> bool {
        let balance = Balance::of(&strip_literals(code));
        balance.blocks > 0 || balance.braces > 0 || balance.parens > 0 || balance.brackets > 0
    }
}

/// Net count of openers minus closers, per kind
#[derive(Debug, Default, PartialEq, Eq)]
struct Balance {
    blocks: i32,
    braces: i32,
    parens: i32,
    brackets: i32,
}

impl Balance {
    fn of(code: &str) -> Self {
        let mut balance = Self::default();

        for statement in code.split([';', '\n']) {
            let statement = statement.trim();
            if statement.is_empty() {
                continue;
            }
            if BLOCK_KEYWORD_RE.is_match(statement) {
                balance.blocks += 1;
            }
            if !LOOP_KEYWORD_RE.is_match(statement) {
                balance.blocks += count(&DO_RE, statement);
            }
            balance.blocks -= count(&END_RE, statement);
        }

        for c in code.chars() {
            match c {
                '{' => balance.braces += 1,
                '}' => balance.braces -= 1,
                '(' => balance.parens += 1,
                ')' => balance.parens -= 1,
                '[' => balance.brackets += 1,
                ']' => balance.brackets -= 1,
                _ => {}
            }
        }
        balance
    }
}

fn count(re: &Regex, text: &str) -> i32 {
    i32::try_from(re.find_iter(text).count()).unwrap_or(i32::MAX)
}

/// Replace string contents with nothing and drop `#` comments.
///
/// The quotes themselves are kept, so `"do"` still separates its neighbours.
fn strip_literals(code: &str) -> String {
    let mut out = String::with_capacity(code.len());
    let mut quote: Option<char> = None;
    let mut in_comment = false;
    let mut chars = code.chars();

    while let Some(c) = chars.next() {
        if in_comment {
            if c == '\n' {
                in_comment = false;
                out.push(c);
            }
            continue;
        }
        match quote {
            Some(q) => {
                if c == '\\' {
                    chars.next();
                } else if c == q {
                    quote = None;
                    out.push(c);
                }
            }
            None => match c {
                '"' | '\'' | '`' => {
                    quote = Some(c);
                    out.push(c);
                }
                '#' => in_comment = true,
                _ => out.push(c),
            },
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn incomplete(code: &str) -> bool {
        KeywordProbe.is_incomplete(code)
    }

    #[test]
    fn test_keyword_openers() {
        assert!(incomplete("if user.admin?"));
        assert!(incomplete("unless flash.empty?"));
        assert!(incomplete("case status"));
        assert!(incomplete("begin"));
        assert!(incomplete("def helper(x)"));
        assert!(incomplete("while queue.any?"));
    }

    #[test]
    fn test_do_blocks() {
        assert!(incomplete("items.each do |item|"));
        assert!(incomplete("form_with model: @post do |f|"));
        assert!(incomplete("link_to root_path do"));
        assert!(!incomplete("items.each do |i| puts i end"));
    }

    #[test]
    fn test_loop_do_is_not_counted_twice() {
        assert!(!incomplete("while x do\nend"));
        assert!(incomplete("while x do"));
    }

    #[test]
    fn test_brace_blocks() {
        assert!(incomplete("items.each { |item|"));
        assert!(!incomplete("items.map { |i| i * 2 }"));
        assert!(!incomplete("items.each { |item|\n}"));
    }

    #[test]
    fn test_complete_expressions() {
        assert!(!incomplete("user.name"));
        assert!(!incomplete("render partial: 'form', locals: { f: f }"));
        assert!(!incomplete("x = 1 if y"));
        assert!(!incomplete("if x then y end"));
        assert!(!incomplete("end"));
    }

    #[test]
    fn test_modifier_keywords_mid_statement() {
        assert!(!incomplete("link_to 'Edit', edit_path, class: 'btn'"));
        assert!(!incomplete("value.end_with?('x')"));
        assert!(!incomplete("range.end"));
    }

    #[test]
    fn test_strings_and_comments_are_ignored() {
        assert!(!incomplete(r#"t("if you do")"#));
        assert!(!incomplete(r#"puts "{ (" "#));
        assert!(!incomplete("x # do something"));
        assert!(!incomplete(r#"puts "a \" do""#));
    }

    #[test]
    fn test_unbalanced_parens() {
        assert!(incomplete("render(partial: 'x',"));
        assert!(incomplete("tag.div [1,"));
    }

    #[test]
    fn test_synthetic_terminators_complete_openers() {
        assert!(!incomplete("if x\nend"));
        assert!(!incomplete("items.each do |i|\nend"));
        assert!(!incomplete("items.each { |i|\n}"));
        assert!(incomplete("items.each { |i|\nend"));
    }

    #[test]
    fn test_strip_literals() {
        assert_eq!(strip_literals(r#"a "b" 'c' # d"#), r#"a "" '' "#);
        assert_eq!(strip_literals("a # x\nb"), "a \nb");
    }
}
