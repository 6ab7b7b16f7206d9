//! Topic content parsing.
//!
//! Deck content is a small markup fragment: plain text interleaved with
//! `<span class="span-memory">…</span>` regions (the parts hidden under
//! mask mode), `<br>` line breaks, and a handful of block tags. The
//! fragment is parsed once on detail entry into a flat segment structure so
//! that interaction is keyed by stable span ordinals, never by re-scanning
//! markup.

use regex::Regex;
use std::sync::LazyLock;

/// Matches any markup tag; text between matches is content.
static TAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?s)<[^>]*>").expect("static regex"));

/// Block-level tags whose boundaries become line breaks.
static BLOCK_TAG: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^</?(?:div|p|li|ul|ol|h[1-6]|table|tr|section|article|blockquote)\b")
        .expect("static regex")
});

/// One piece of a rendered content line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentSegment {
    /// Always-visible text
    Text(String),
    /// A memory span, hidden under mask mode until revealed.
    ///
    /// The ordinal is the span's position in fragment order and is the
    /// identity used by the reveal set.
    Memory { ordinal: usize, text: String },
}

/// A topic's content, parsed into lines of segments.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedContent {
    lines: Vec<Vec<ContentSegment>>,
    span_count: usize,
}

impl ParsedContent {
    /// Parse a markup fragment.
    ///
    /// Recognized markup: memory spans, `<br>` (line break), block tags
    /// (line break at the boundary). Every other tag is dropped and
    /// whitespace runs collapse to a single space, matching how the
    /// fragment would flow in its source medium. An unterminated memory
    /// span swallows the rest of the fragment.
    #[must_use]
    pub fn parse(fragment: &str) -> Self {
        let mut builder = Builder::default();
        let mut last_end = 0;

        for tag in TAG.find_iter(fragment) {
            builder.text(&fragment[last_end..tag.start()]);
            last_end = tag.end();

            let raw = tag.as_str();
            if is_memory_span_open(raw) {
                builder.open_span();
            } else if is_span_close(raw) {
                builder.close_span();
            } else if is_line_break(raw) {
                builder.line_break(true);
            } else if BLOCK_TAG.is_match(raw) {
                builder.line_break(false);
            }
            // Anything else (<b>, <em>, unknown tags) is dropped.
        }

        builder.text(&fragment[last_end..]);
        builder.finish()
    }

    /// Lines of segments, in display order.
    #[must_use]
    pub fn lines(&self) -> &[Vec<ContentSegment>] {
        &self.lines
    }

    /// Total number of memory spans in the fragment.
    #[must_use]
    pub const fn span_count(&self) -> usize {
        self.span_count
    }

    /// The text of a span by ordinal.
    #[must_use]
    pub fn span_text(&self, ordinal: usize) -> Option<&str> {
        self.lines.iter().flatten().find_map(|seg| match seg {
            ContentSegment::Memory { ordinal: o, text } if *o == ordinal => Some(text.as_str()),
            _ => None,
        })
    }

    /// Whether the fragment produced no visible content at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

fn is_memory_span_open(tag: &str) -> bool {
    static SPAN_OPEN: LazyLock<Regex> =
        LazyLock::new(|| Regex::new(r"(?i)^<\s*span\b").expect("static regex"));
    SPAN_OPEN.is_match(tag) && tag.contains("span-memory")
}

fn is_span_close(tag: &str) -> bool {
    static SPAN_CLOSE: LazyLock<Regex> =
        LazyLock::new(|| Regex::new(r"(?i)^<\s*/\s*span\s*>$").expect("static regex"));
    SPAN_CLOSE.is_match(tag)
}

fn is_line_break(tag: &str) -> bool {
    static BR: LazyLock<Regex> =
        LazyLock::new(|| Regex::new(r"(?i)^<\s*br\s*/?\s*>$").expect("static regex"));
    BR.is_match(tag)
}

/// Decode the handful of entities the deck extractor emits.
fn decode_entities(text: &str) -> String {
    text.replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&apos;", "'")
        .replace("&amp;", "&")
}

/// Collapse whitespace runs (including raw newlines) to single spaces.
fn collapse_whitespace(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_ws = false;
    for ch in text.chars() {
        if ch.is_whitespace() {
            if !in_ws {
                out.push(' ');
            }
            in_ws = true;
        } else {
            out.push(ch);
            in_ws = false;
        }
    }
    out
}

#[derive(Default)]
struct Builder {
    lines: Vec<Vec<ContentSegment>>,
    current: Vec<ContentSegment>,
    text_buf: String,
    span_buf: String,
    in_span: bool,
    span_count: usize,
}

impl Builder {
    fn text(&mut self, raw: &str) {
        if raw.is_empty() {
            return;
        }
        if self.in_span {
            self.span_buf.push_str(raw);
        } else {
            self.text_buf.push_str(raw);
        }
    }

    fn flush_text(&mut self) {
        if self.text_buf.is_empty() {
            return;
        }
        let mut text = collapse_whitespace(&decode_entities(&self.text_buf));
        self.text_buf.clear();
        if self.current.is_empty() {
            text = text.trim_start().to_string();
        }
        if !text.is_empty() {
            self.current.push(ContentSegment::Text(text));
        }
    }

    fn open_span(&mut self) {
        // Nested opens are treated as part of the outer span's text.
        if !self.in_span {
            self.flush_text();
            self.in_span = true;
        }
    }

    fn close_span(&mut self) {
        if !self.in_span {
            return;
        }
        self.in_span = false;
        let text = collapse_whitespace(&decode_entities(&self.span_buf))
            .trim()
            .to_string();
        self.span_buf.clear();
        self.current.push(ContentSegment::Memory {
            ordinal: self.span_count,
            text,
        });
        self.span_count += 1;
    }

    fn line_break(&mut self, force: bool) {
        if self.in_span {
            // An inline break inside a span folds into the span's text.
            self.span_buf.push(' ');
            return;
        }
        self.flush_text();
        if !self.current.is_empty() {
            self.lines.push(std::mem::take(&mut self.current));
        } else if force && self.lines.last().is_some_and(|l| !l.is_empty()) {
            // Explicit <br> after content keeps one blank line.
            self.lines.push(Vec::new());
        }
    }

    fn finish(mut self) -> ParsedContent {
        if self.in_span {
            self.close_span();
        }
        self.flush_text();
        if !self.current.is_empty() {
            self.lines.push(self.current);
        }
        while self.lines.last().is_some_and(Vec::is_empty) {
            self.lines.pop();
        }
        ParsedContent {
            lines: self.lines,
            span_count: self.span_count,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> ContentSegment {
        ContentSegment::Text(s.to_string())
    }

    fn memory(ordinal: usize, s: &str) -> ContentSegment {
        ContentSegment::Memory {
            ordinal,
            text: s.to_string(),
        }
    }

    #[test]
    fn test_plain_text() {
        let parsed = ParsedContent::parse("plain text");
        assert_eq!(parsed.lines(), &[vec![text("plain text")]]);
        assert_eq!(parsed.span_count(), 0);
    }

    #[test]
    fn test_single_span() {
        let parsed =
            ParsedContent::parse(r#"The answer is <span class="span-memory">equity</span>."#);
        assert_eq!(
            parsed.lines(),
            &[vec![text("The answer is "), memory(0, "equity"), text(".")]]
        );
        assert_eq!(parsed.span_count(), 1);
        assert_eq!(parsed.span_text(0), Some("equity"));
    }

    #[test]
    fn test_span_ordinals_follow_fragment_order() {
        let parsed = ParsedContent::parse(
            r#"<span class="span-memory">one</span><br><span class="span-memory">two</span>"#,
        );
        assert_eq!(parsed.span_count(), 2);
        assert_eq!(parsed.span_text(0), Some("one"));
        assert_eq!(parsed.span_text(1), Some("two"));
        assert_eq!(parsed.lines().len(), 2);
    }

    #[test]
    fn test_br_breaks_lines() {
        let parsed = ParsedContent::parse("first<br>second<br/>third");
        assert_eq!(parsed.lines().len(), 3);
    }

    #[test]
    fn test_double_br_keeps_blank_line() {
        let parsed = ParsedContent::parse("first<br><br>second");
        assert_eq!(
            parsed.lines(),
            &[vec![text("first")], vec![], vec![text("second")]]
        );
    }

    #[test]
    fn test_block_tags_break_without_blank_lines() {
        let parsed = ParsedContent::parse("<div>first</div><div>second</div>");
        assert_eq!(parsed.lines(), &[vec![text("first")], vec![text("second")]]);
    }

    #[test]
    fn test_unknown_tags_are_dropped() {
        let parsed = ParsedContent::parse("a <b>bold</b> claim");
        assert_eq!(parsed.lines(), &[vec![text("a bold claim")]]);
    }

    #[test]
    fn test_entities_decoded() {
        let parsed = ParsedContent::parse("cost &lt; value &amp; price");
        assert_eq!(parsed.lines(), &[vec![text("cost < value & price")]]);
    }

    #[test]
    fn test_whitespace_collapses() {
        let parsed = ParsedContent::parse("spread \n  over\n\tlines");
        assert_eq!(parsed.lines(), &[vec![text("spread over lines")]]);
    }

    #[test]
    fn test_unterminated_span_takes_rest() {
        let parsed = ParsedContent::parse(r#"lead <span class="span-memory">rest of it"#);
        assert_eq!(
            parsed.lines(),
            &[vec![text("lead "), memory(0, "rest of it")]]
        );
    }

    #[test]
    fn test_br_inside_span_folds_to_space() {
        let parsed =
            ParsedContent::parse(r#"<span class="span-memory">two<br>words</span>"#);
        assert_eq!(parsed.span_text(0), Some("two words"));
    }

    #[test]
    fn test_empty_fragment() {
        let parsed = ParsedContent::parse("");
        assert!(parsed.is_empty());
        assert_eq!(parsed.span_count(), 0);
    }

    #[test]
    fn test_plain_span_is_not_memory() {
        let parsed = ParsedContent::parse(r#"<span class="note">visible</span>"#);
        assert_eq!(parsed.span_count(), 0);
        assert_eq!(parsed.lines(), &[vec![text("visible")]]);
    }
}
