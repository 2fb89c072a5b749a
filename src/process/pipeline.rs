//! Single-pass layout pipeline
//!
//! Implements the formatting run over one document:
//! - Split off front matter, swap ERB tags for markers
//! - Scan markup, tracking open tags and code blocks on the [`BlockStack`]
//! - Reflow text and attributes, hand code to the [`CodeFormatter`]
//! - Restore markers and re-attach front matter

use std::io::{BufRead, Write};

use crate::config::Config;
use crate::embed::{
    ClassOrder, CodeFormatter, FormatOutcome, KeywordProbe, Passthrough, SyntaxProbe,
};
use crate::error::{ErrorKind, FormatError};
use crate::format::code::{autoclose, classify, reindent, strip_terminator, CodeKind, ErbTag};
use crate::format::{format_attributes, indented, reflow, AttributeLayout, Layout};
use crate::observe::{Event, Observer};
use crate::parser::patterns::{BAD_ATTR_RE, MARKER_RE, SELF_CLOSING_RE, TAG_NAME_ONLY_RE};
use crate::parser::{split_front_matter, Placeholders, Scanner, Token, TokenKind};
use crate::scope::{BlockStack, Frame, FrameKind};
use crate::Result;

/// Filename used in errors when none is given
pub const DEFAULT_FILENAME: &str = "(erb)";

/// Everything one formatting run needs besides the source
#[derive(Clone, Copy)]
pub struct FormatOptions<'a> {
    pub line_width: usize,
    pub single_class_per_line: bool,
    /// Used in error messages
    pub filename: &'a str,
    pub probe: &'a dyn SyntaxProbe,
    pub code_formatter: &'a dyn CodeFormatter,
    pub class_order: Option<&'a dyn ClassOrder>,
    pub observer: Option<&'a dyn Observer>,
}

impl Default for FormatOptions<'_> {
    fn default() -> Self {
        Self {
            line_width: 80,
            single_class_per_line: false,
            filename: DEFAULT_FILENAME,
            probe: &KeywordProbe,
            code_formatter: &Passthrough,
            class_order: None,
            observer: None,
        }
    }
}

/// Format `source` with default options
pub fn format(source: &str) -> std::result::Result<String, FormatError> {
    format_document(source, &FormatOptions::default())
}

/// Format one complete document.
///
/// Either the whole document is returned, ending with exactly one newline,
/// or the run fails with the first structural error.
pub fn format_document(
    source: &str,
    options: &FormatOptions<'_>,
) -> std::result::Result<String, FormatError> {
    let (front_matter, body) = split_front_matter(source);
    let (body, placeholders) = Placeholders::extract(body);
    let front_matter_lines = front_matter.map_or(0, |fm| fm.matches('\n').count());

    let mut formatter = Formatter::new(options, placeholders, front_matter_lines);
    formatter.run(&body)?;
    Ok(formatter.finish(front_matter))
}

/// Read a document, format it according to `config` and write the result.
pub fn format_file<R: BufRead, W: Write>(
    mut input: R,
    output: &mut W,
    config: &Config,
    filename: &str,
) -> Result<()> {
    let mut source = String::new();
    input.read_to_string(&mut source)?;

    let class_order = config.class_order();
    let code_formatter = config.code_formatter();
    let options = FormatOptions {
        line_width: config.line_width,
        single_class_per_line: config.single_class_per_line,
        filename,
        class_order: class_order.as_ref().map(|o| o as &dyn ClassOrder),
        code_formatter: code_formatter
            .as_ref()
            .map_or(&Passthrough as &dyn CodeFormatter, |f| f as &dyn CodeFormatter),
        observer: Some(&crate::observe::TracingObserver),
        ..FormatOptions::default()
    };

    let formatted = format_document(&source, &options)?;
    output.write_all(formatted.as_bytes())?;
    Ok(())
}

/// State of one formatting run
struct Formatter<'a> {
    options: &'a FormatOptions<'a>,
    layout: Layout,
    placeholders: Placeholders,
    stack: BlockStack,
    html: String,
    /// Offset in the body of the construct being processed
    pos: usize,
    front_matter_lines: usize,
}

impl<'a> Formatter<'a> {
    fn new(
        options: &'a FormatOptions<'a>,
        placeholders: Placeholders,
        front_matter_lines: usize,
    ) -> Self {
        Self {
            options,
            layout: Layout::new(options.line_width),
            placeholders,
            stack: BlockStack::new(),
            html: String::new(),
            pos: 0,
            front_matter_lines,
        }
    }

    fn run(&mut self, body: &str) -> std::result::Result<(), FormatError> {
        let tokens: Vec<Token<'_>> = Scanner::new(body).collect();
        for (i, token) in tokens.iter().enumerate() {
            self.pos = token.offset;
            let result = match token.kind {
                TokenKind::Text(text) => {
                    self.text(token.offset, text, glued_width(&tokens[i + 1..]))
                }
                TokenKind::Raw(raw) => {
                    self.append(raw.trim_end());
                    Ok(())
                }
                TokenKind::Open {
                    name,
                    attrs,
                    closing,
                } => self.open_tag(name, attrs, closing, token.after_space),
                TokenKind::Close { name } => self.close_tag(name, token.after_space),
                TokenKind::Unrecognized(text) => Err(ErrorKind::UnrecognizedContent {
                    text: self.placeholders.restore(text),
                }),
            };
            result.map_err(|kind| self.error(kind, body))?;
        }

        self.pos = body.len();
        self.stack.finish().map_err(|kind| self.error(kind, body))
    }

    fn finish(self, front_matter: Option<&str>) -> String {
        let html = self.placeholders.restore(&self.html);
        let body = html.trim();

        let mut output = String::with_capacity(body.len() + 2);
        if let Some(front_matter) = front_matter {
            output.push_str(front_matter);
            if !front_matter.ends_with('\n') {
                output.push('\n');
            }
            if body.is_empty() {
                return output;
            }
            output.push('\n');
        }
        output.push_str(body);
        output.push('\n');
        output
    }

    fn error(&self, kind: ErrorKind, body: &str) -> FormatError {
        let consumed = self.placeholders.restore(&body[..self.pos]);
        FormatError {
            kind,
            filename: self.options.filename.to_string(),
            line: self.front_matter_lines + consumed.matches('\n').count() + 1,
            context: self.stack.top().map(|frame| frame.label().to_string()),
        }
    }

    fn observe(&self, event: &Event<'_>) {
        if let Some(observer) = self.options.observer {
            observer.on_event(event);
        }
    }

    fn depth(&self) -> usize {
        self.stack.depth()
    }

    fn append(&mut self, output: &str) {
        self.observe(&Event::Append {
            output,
            depth: self.depth(),
        });
        self.html.push_str(output);
    }

    /// Append on a new indented line, or inline
    fn emit(&mut self, output: &str, on_new_line: bool) {
        if on_new_line {
            let line = indented(self.depth(), output);
            self.append(&line);
        } else {
            self.append(output);
        }
    }

    fn push(&mut self, frame: Frame) {
        self.stack.push(frame);
        if let Some(top) = self.stack.top() {
            self.observe(&Event::Push {
                label: top.label(),
                depth: self.stack.depth(),
            });
        }
    }

    fn pop(
        &mut self,
        kind: FrameKind,
        name: &str,
        found: &str,
    ) -> std::result::Result<(), ErrorKind> {
        let frame = self.stack.pop(kind, name, found)?;
        self.observe(&Event::Pop {
            label: frame.label(),
            depth: self.stack.depth(),
        });
        Ok(())
    }

    /// Display width of output, markers counted as the code they stand for
    fn width(&self, text: &str) -> usize {
        self.placeholders.width(text)
    }

    /// Column at which the next inline output starts
    fn column(&self) -> usize {
        self.html.rsplit('\n').next().map_or(0, |line| self.width(line))
    }

    // ===== TEXT =====

    /// A text run between tags: prose interleaved with code markers
    fn text(
        &mut self,
        offset: usize,
        text: &str,
        glued: usize,
    ) -> std::result::Result<(), ErrorKind> {
        if BAD_ATTR_RE.is_match(text) {
            return Err(ErrorKind::BadAttributeSyntax {
                text: self.placeholders.restore(text.trim()),
            });
        }

        let mut last = 0;
        for marker in MARKER_RE.find_iter(text) {
            let Some(tag) = self.placeholders.code_tag(marker.as_str()).map(str::to_string) else {
                // Marker-shaped text from the source, part of the prose
                continue;
            };
            let before = &text[last..marker.start()];
            self.reflow_text(before, 0);
            self.pos = offset + marker.start();
            self.code_tag(&tag, before.ends_with(char::is_whitespace))?;
            last = marker.end();
        }
        self.reflow_text(&text[last..], glued);
        Ok(())
    }

    /// Reflow prose; `glued` columns of tags follow it without whitespace
    fn reflow_text(&mut self, text: &str, glued: usize) {
        if text.is_empty() {
            return;
        }
        self.observe(&Event::Text { text });

        let width = self.layout.available(self.depth());
        let inline_width = self.options.line_width.saturating_sub(self.column());
        let reflowed = reflow(text, width, inline_width, glued, |s| self.width(s));

        for (i, line) in reflowed.lines.iter().enumerate() {
            self.emit(line, i > 0 || reflowed.leading_space);
        }
        if reflowed.paragraph_break {
            self.html.push('\n');
        }
    }

    // ===== MARKUP =====

    fn open_tag(
        &mut self,
        name: &str,
        attrs: &str,
        closing: &str,
        after_space: bool,
    ) -> std::result::Result<(), ErrorKind> {
        if !TAG_NAME_ONLY_RE.is_match(name) {
            return Err(ErrorKind::UnknownTagName {
                name: name.to_string(),
            });
        }
        let self_closing = closing == "/>" || SELF_CLOSING_RE.is_match(name);

        let attribute_layout = AttributeLayout {
            layout: self.layout,
            single_class_per_line: self.options.single_class_per_line,
            class_order: self.options.class_order,
        };
        let attributes = format_attributes(
            &attribute_layout,
            name,
            attrs.trim(),
            closing,
            self.depth(),
            |s| self.width(s),
        );
        let tag = format!("<{name}{attributes}{closing}");
        self.emit(&tag, after_space);

        if !self_closing {
            self.push(Frame::tag(name, tag));
        }
        Ok(())
    }

    fn close_tag(&mut self, name: &str, after_space: bool) -> std::result::Result<(), ErrorKind> {
        let tag = format!("</{name}>");
        self.pop(FrameKind::Tag, name, &tag)?;
        self.emit(&tag, after_space);
        Ok(())
    }

    // ===== EMBEDDED CODE =====

    fn code_tag(&mut self, tag: &str, on_new_line: bool) -> std::result::Result<(), ErrorKind> {
        let Some(erb) = ErbTag::parse(tag) else {
            self.emit(tag, on_new_line);
            return Ok(());
        };

        match classify(erb.code, self.options.probe) {
            CodeKind::Comment => self.emit(&erb.render(erb.code), on_new_line),
            CodeKind::Closer => {
                let found = self.placeholders.restore(tag);
                self.pop(FrameKind::CodeBlock, erb.code, &found)?;
                self.emit(&erb.render(erb.code), on_new_line);
            }
            CodeKind::Reopener => {
                let found = self.placeholders.restore(tag);
                self.pop(FrameKind::CodeBlock, erb.code, &found)?;
                self.emit(&erb.render(erb.code), on_new_line);
                self.push(Frame::code_block(erb.code));
            }
            CodeKind::Opener => {
                let code = self.format_opener(erb.code);
                self.emit(&erb.render(&code), on_new_line);
                self.push(Frame::code_block(erb.code));
            }
            CodeKind::Standalone | CodeKind::Expression => {
                let code = self.format_code(erb.code).map_or_else(
                    || erb.code.to_string(),
                    |formatted| reindent(&formatted, self.depth()),
                );
                self.emit(&erb.render(&code), on_new_line);
            }
        }
        Ok(())
    }

    /// Ask the code formatter, `None` when the code stays as written
    fn format_code(&self, code: &str) -> Option<String> {
        let width = self.layout.available(self.depth());
        self.observe(&Event::CodeIn { code, width });

        let formatted = match self.options.code_formatter.format_code(code, width) {
            FormatOutcome::Formatted(formatted) if !formatted.trim().is_empty() => Some(formatted),
            FormatOutcome::Formatted(_) | FormatOutcome::Unchanged => None,
        };
        self.observe(&Event::CodeOut {
            code: formatted.as_deref(),
        });
        formatted
    }

    /// Close an opener with a synthetic terminator, format, then drop the
    /// terminator again
    fn format_opener(&self, code: &str) -> String {
        let Some((terminator, closed)) = autoclose(code, self.options.probe) else {
            return code.to_string();
        };
        self.format_code(&closed)
            .as_deref()
            .and_then(|formatted| strip_terminator(formatted, terminator))
            .map_or_else(|| code.to_string(), |head| reindent(head, self.depth()))
    }
}

/// Width of the tags right after a text run that are not separated from it
/// by whitespace. They are emitted inline, on the text's last line.
fn glued_width(following: &[Token<'_>]) -> usize {
    following
        .iter()
        .take_while(|token| !token.after_space)
        .map_while(|token| match token.kind {
            TokenKind::Close { name } => Some(name.len() + "</>".len()),
            TokenKind::Open {
                name,
                attrs,
                closing,
            } if attrs.trim().is_empty() => Some(1 + name.len() + closing.len()),
            _ => None,
        })
        .sum()
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::io::{BufReader, Cursor};

    use pretty_assertions::assert_eq;

    use super::*;
    use crate::embed::ListedClassOrder;

    fn fmt(source: &str) -> String {
        format(source).unwrap()
    }

    fn fmt_width(source: &str, line_width: usize) -> String {
        let options = FormatOptions {
            line_width,
            ..FormatOptions::default()
        };
        format_document(source, &options).unwrap()
    }

    /// Formats `name(args)` as one argument per line
    struct SplitArguments;

    impl CodeFormatter for SplitArguments {
        fn format_code(&self, code: &str, width: usize) -> FormatOutcome {
            let Some((call, args)) = code.split_once('(') else {
                return FormatOutcome::Unchanged;
            };
            let args = args.trim_end_matches(')');
            if code.len() <= width {
                return FormatOutcome::Formatted(format!("{call}({args})"));
            }
            let mut out = format!("{call}(\n");
            for arg in args.split(',') {
                out.push_str(&format!("  {},\n", arg.trim()));
            }
            out.push(')');
            FormatOutcome::Formatted(out)
        }
    }

    #[test]
    fn test_simple_tag() {
        assert_eq!(fmt("<div        > asdf    </div>"), "<div>\n  asdf\n</div>\n");
    }

    #[test]
    fn test_custom_element() {
        assert_eq!(
            fmt("<custom-div        > asdf    </custom-div>"),
            "<custom-div>\n  asdf\n</custom-div>\n"
        );
    }

    #[test]
    fn test_inline_content_stays_inline() {
        assert_eq!(
            fmt("<p>Hello <b>world</b></p>"),
            "<p>Hello\n  <b>world</b></p>\n"
        );
        assert_eq!(fmt("<span>x</span>"), "<span>x</span>\n");
    }

    #[test]
    fn test_nested_indentation() {
        let source = "<ul>\n<li>\none\n</li>\n<li>two</li>\n</ul>\n";
        assert_eq!(
            fmt(source),
            "<ul>\n  <li>\n    one\n  </li>\n  <li>two</li>\n</ul>\n"
        );
    }

    #[test]
    fn test_self_closing_tags_are_not_pushed() {
        let source = "<div>\n<br>\n<img src=\"a.png\">\n<hr/>\n</div>";
        assert_eq!(
            fmt(source),
            "<div>\n  <br>\n  <img src=\"a.png\">\n  <hr/>\n</div>\n"
        );
    }

    #[test]
    fn test_erb_blocks_indent() {
        let source = "<% if admin? %>\n<p>Hi</p>\n<% else %>\n<p>Bye</p>\n<% end %>\n";
        assert_eq!(
            fmt(source),
            "<% if admin? %>\n  <p>Hi</p>\n<% else %>\n  <p>Bye</p>\n<% end %>\n"
        );
    }

    #[test]
    fn test_erb_spacing_is_normalised() {
        assert_eq!(
            fmt("<%=user.name%>\n<%-   x   -%>\n<%#note%>"),
            "<%= user.name %>\n<%- x -%>\n<%#note %>\n"
        );
    }

    #[test]
    fn test_do_block_with_brace_closer() {
        let source = "<% items.each { |item| %>\n<li><%= item %></li>\n<% } %>";
        assert_eq!(
            fmt(source),
            "<% items.each { |item| %>\n  <li><%= item %></li>\n<% } %>\n"
        );
    }

    #[test]
    fn test_code_with_markup_characters() {
        let source = "<p><%= a > b ? \"<x>\" : '</p>' %></p>";
        assert_eq!(fmt(source), "<p><%= a > b ? \"<x>\" : '</p>' %></p>\n");
    }

    #[test]
    fn test_front_matter() {
        let source = "---\ntitle: Home\n---\n<div>\nx\n</div>\n";
        assert_eq!(fmt(source), "---\ntitle: Home\n---\n\n<div>\n  x\n</div>\n");
    }

    #[test]
    fn test_front_matter_with_empty_body() {
        assert_eq!(fmt("---\na: 1\n---\n"), "---\na: 1\n---\n");
        assert_eq!(fmt("---\na: 1\n---\n\n  \n"), "---\na: 1\n---\n");
        assert_eq!(fmt("---\na: 1\n---"), "---\na: 1\n---\n");
    }

    #[test]
    fn test_blank_line_between_blocks_is_kept_once() {
        let source = "<p>a</p>\n\n\n\n<p>b</p>";
        assert_eq!(fmt(source), "<p>a</p>\n\n<p>b</p>\n");
    }

    #[test]
    fn test_text_is_wrapped_at_width() {
        let source = "<div>\nLorem ipsum dolor sit amet, consectetur adipiscing elit, sed do eiusmod\n</div>";
        let formatted = fmt_width(source, 50);
        assert_eq!(
            formatted,
            "<div>\n  Lorem ipsum dolor sit amet, consectetur\n  adipiscing elit, sed do eiusmod\n</div>\n"
        );
        for line in formatted.lines() {
            assert!(line.len() <= 50, "{line:?}");
        }
    }

    #[test]
    fn test_glued_close_tags_count_toward_width() {
        let prose = "alpha beta gamma delta epsilon zeta eta theta iota kappa lambda mu ";
        let source = format!("<div><section><p>{}end</p></section></div>", prose.repeat(3));
        let formatted = fmt(&source);
        for line in formatted.lines() {
            assert!(line.len() <= 80, "{} columns: {line:?}", line.len());
        }
        assert_eq!(
            formatted.lines().last(),
            Some("      end</p></section></div>")
        );
        assert_eq!(fmt(&formatted), formatted);
    }

    #[test]
    fn test_glued_tags_stop_at_whitespace() {
        let tokens: Vec<Token<'_>> = Scanner::new("x</b><br/> </i>").collect();
        assert_eq!(glued_width(&tokens[1..]), "</b><br/>".len());
        let tokens: Vec<Token<'_>> = Scanner::new("x<a href=\"/\"></a>").collect();
        assert_eq!(glued_width(&tokens[1..]), 0);
    }

    #[test]
    fn test_script_content_is_verbatim() {
        let source = "<div>\n<script>\n  if (a < b) { go(\"<%= x %>\") }   \n</script>\n</div>";
        assert_eq!(
            fmt(source),
            "<div>\n  <script>\n  if (a < b) { go(\"<%= x %>\") }\n  </script>\n</div>\n"
        );
    }

    #[test]
    fn test_overlong_attributes_split() {
        let source = r#"<input type="text" name="user[email]" placeholder="you@example.com" required autofocus>"#;
        assert_eq!(
            fmt_width(source, 60),
            "<input\n  type=\"text\"\n  name=\"user[email]\"\n  placeholder=\"you@example.com\"\n  required\n  autofocus\n>\n"
        );
    }

    #[test]
    fn test_class_order_option() {
        let order = ListedClassOrder::new(["flex", "items-center"]);
        let options = FormatOptions {
            class_order: Some(&order),
            ..FormatOptions::default()
        };
        assert_eq!(
            format_document(r#"<div class="gap-2 items-center flex">x</div>"#, &options).unwrap(),
            "<div class=\"flex items-center gap-2\">x</div>\n"
        );
    }

    #[test]
    fn test_expression_reformatted_and_reindented() {
        let options = FormatOptions {
            line_width: 40,
            code_formatter: &SplitArguments,
            ..FormatOptions::default()
        };
        let source = "<div>\n<%= link_to(\"Edit profile\", edit_user_path(user), class: \"btn\") %>\n</div>";
        assert_eq!(
            format_document(source, &options).unwrap(),
            "<div>\n  <%= link_to(\n    \"Edit profile\",\n    edit_user_path(user),\n    class: \"btn\",\n  ) %>\n</div>\n"
        );
    }

    #[test]
    fn test_opener_formatted_without_terminator() {
        struct Squeeze;
        impl CodeFormatter for Squeeze {
            fn format_code(&self, code: &str, _width: usize) -> FormatOutcome {
                let lines: Vec<String> = code
                    .lines()
                    .map(|line| line.split_whitespace().collect::<Vec<_>>().join(" "))
                    .collect();
                FormatOutcome::Formatted(lines.join("\n"))
            }
        }
        let options = FormatOptions {
            code_formatter: &Squeeze,
            ..FormatOptions::default()
        };
        let source = "<% if   user.admin?   %>\nx\n<% end %>";
        assert_eq!(
            format_document(source, &options).unwrap(),
            "<% if user.admin? %>\n  x\n<% end %>\n"
        );
    }

    #[test]
    fn test_unmatched_close_tag() {
        let error = format("<div>\n<p>\n</div>").unwrap_err();
        assert!(error.is_unmatched());
        assert_eq!(error.line, 3);
        assert_eq!(error.context.as_deref(), Some("p"));
        assert_eq!(error.filename, DEFAULT_FILENAME);
    }

    #[test]
    fn test_stray_end() {
        let error = format("<p>x</p>\n<% end %>").unwrap_err();
        assert_eq!(
            error.kind,
            ErrorKind::UnmatchedCloseTag {
                found: Some("<% end %>".to_string()),
                open: vec![],
            }
        );
        assert_eq!(error.line, 2);
    }

    #[test]
    fn test_reopener_inside_tag() {
        let error = format("<% if x %>\n<div>\n<% else %>\n</div>\n<% end %>").unwrap_err();
        assert!(error.is_unmatched());
        assert_eq!(error.context.as_deref(), Some("div"));
    }

    #[test]
    fn test_unclosed_at_end() {
        let error = format("<section>\n<% if x %>\n").unwrap_err();
        assert_eq!(
            error.kind,
            ErrorKind::UnmatchedCloseTag {
                found: None,
                open: vec!["section".to_string(), "if x".to_string()],
            }
        );
    }

    #[test]
    fn test_bad_attribute() {
        let error = format("<div class= \"x\">y</div>").unwrap_err();
        assert!(matches!(error.kind, ErrorKind::BadAttributeSyntax { .. }));
    }

    #[test]
    fn test_error_line_counts_front_matter() {
        let error = format("---\na: 1\n---\n<p>\n</div>").unwrap_err();
        assert_eq!(error.line, 5);
    }

    #[test]
    fn test_observer_sees_stack_changes() {
        #[derive(Default)]
        struct Stack(RefCell<Vec<String>>);
        impl Observer for Stack {
            fn on_event(&self, event: &Event<'_>) {
                match event {
                    Event::Push { label, depth } => {
                        self.0.borrow_mut().push(format!("+{label}@{depth}"));
                    }
                    Event::Pop { label, depth } => {
                        self.0.borrow_mut().push(format!("-{label}@{depth}"));
                    }
                    _ => {}
                }
            }
        }
        let observer = Stack::default();
        let options = FormatOptions {
            observer: Some(&observer),
            ..FormatOptions::default()
        };
        format_document("<div><% if x %><p></p><% end %></div>", &options).unwrap();
        assert_eq!(
            observer.0.borrow().as_slice(),
            ["+div@1", "+if x@2", "+p@3", "-p@2", "-if x@1", "-div@0"]
        );
    }

    #[test]
    fn test_empty_document() {
        assert_eq!(fmt(""), "\n");
        assert_eq!(fmt("  \n\n "), "\n");
    }

    #[test]
    fn test_idempotent() {
        let source = "<nav class=\"navbar navbar-expand-lg navbar-light bg-light fixed-top shadow-sm py-3\">\n<% links.each do |link| %>\n<a href=\"<%= link.url %>\" data-turbo=false>\n<%= link.title %>\n</a>\n<% end %>\n</nav>\n\n\n<p>Some text that is long enough to wrap around the configured width of eighty columns.</p>";
        let once = fmt(source);
        assert_eq!(fmt(&once), once);
    }

    #[test]
    fn test_format_file() {
        let config = Config {
            line_width: 100,
            ..Default::default()
        };
        let reader = BufReader::new(Cursor::new("<div   >x</div>".as_bytes()));
        let mut output = Vec::new();

        format_file(reader, &mut output, &config, "test.html.erb").unwrap();

        assert_eq!(String::from_utf8(output).unwrap(), "<div>x</div>\n");
    }

    #[test]
    fn test_format_file_reports_filename() {
        let reader = BufReader::new(Cursor::new("</p>".as_bytes()));
        let mut output = Vec::new();
        let error = format_file(reader, &mut output, &Config::default(), "views/a.html.erb")
            .unwrap_err();
        assert!(error.to_string().starts_with("views/a.html.erb:1"));
        assert!(output.is_empty());
    }
}
