//! Inline formatting within a single line.
//!
//! At each position the scanner tries, in order: protected atoms, images,
//! links, autolinks and then the delimiter table. Delimiters are ordered from
//! longest to shortest so `***x***` is never read as `**` plus a stray `*`.
//! Links and delimiters nested deeper than [`MAX_INLINE_NESTING`] stay literal.

use html_escape::encode_double_quoted_attribute;

use crate::html::Renderer;
use crate::media::{BracketPairs, parse_autolink, parse_image, parse_link};
use crate::token::{Unit, UnitsExt};

/// One row of the delimiter table.
#[derive(Debug, Clone, Copy)]
pub struct Delimiter {
    /// Marker character, repeated `width` times.
    pub marker: char,
    /// Marker run length.
    pub width: usize,
    /// Opening markup.
    pub open: &'static str,
    /// Closing markup.
    pub close: &'static str,
    /// Whether the run may sit inside a word (`*` yes, `_` no).
    pub intraword: bool,
}

const fn delimiter(
    marker: char,
    width: usize,
    open: &'static str,
    close: &'static str,
    intraword: bool,
) -> Delimiter {
    Delimiter {
        marker,
        width,
        open,
        close,
        intraword,
    }
}

/// Deepest nesting of link text and emphasis content that is still formatted.
pub const MAX_INLINE_NESTING: usize = 32;

const PATTERN_COUNT: usize = 7;

/// Delimiters in the order they are tried.
pub const PATTERNS: [Delimiter; PATTERN_COUNT] = [
    delimiter('~', 2, "<del>", "</del>", true),
    delimiter('*', 3, "<strong><em>", "</em></strong>", true),
    delimiter('_', 3, "<strong><em>", "</em></strong>", false),
    delimiter('*', 2, "<strong>", "</strong>", true),
    delimiter('_', 2, "<strong>", "</strong>", false),
    delimiter('*', 1, "<em>", "</em>", true),
    delimiter('_', 1, "<em>", "</em>", false),
];

impl Delimiter {
    fn run_at(&self, units: &[Unit], at: usize) -> bool {
        at + self.width <= units.len()
            && units[at..at + self.width]
                .iter()
                .all(|u| *u == Unit::Char(self.marker))
    }

    /// Whether a character next to the run disqualifies it.
    fn blocks_side(&self, c: Option<char>) -> bool {
        match c {
            Some(c) => c == self.marker || (!self.intraword && c.is_alphanumeric()),
            None => false,
        }
    }

    fn opens_at(&self, units: &[Unit], at: usize) -> bool {
        if !self.run_at(units, at) {
            return false;
        }
        let before = at.checked_sub(1).and_then(|i| units.char_at(i));
        if self.blocks_side(before) {
            return false;
        }
        match units.get(at + self.width) {
            None => false,
            Some(Unit::Atom(_)) => true,
            Some(Unit::Char(c)) => !c.is_whitespace() && *c != self.marker,
        }
    }

    fn closes_at(&self, units: &[Unit], at: usize) -> bool {
        if !self.run_at(units, at) {
            return false;
        }
        if let Some(Unit::Char(c)) = units.get(at - 1)
            && (c.is_whitespace() || *c == self.marker)
        {
            return false;
        }
        !self.blocks_side(units.char_at(at + self.width))
    }

    /// Finds a closing run for an opener at `at`; content must be non-empty.
    fn find_close(&self, units: &[Unit], at: usize) -> Option<usize> {
        let start = at + self.width + 1;
        (start..units.len()).find(|&j| self.closes_at(units, j))
    }
}

/// Per-span scan state.
struct Scan {
    depth: usize,
    brackets: BracketPairs,
    /// Patterns known to have no closer after the current position.
    exhausted: [bool; PATTERN_COUNT],
}

impl Renderer<'_> {
    /// Renders one line (or cell, or item) of inline content.
    pub fn render_inline(&self, units: &[Unit], out: &mut String) {
        self.render_span(units, 0, out);
    }

    fn render_span(&self, units: &[Unit], depth: usize, out: &mut String) {
        let mut scan = Scan {
            depth,
            brackets: BracketPairs::new(units),
            exhausted: [false; PATTERN_COUNT],
        };
        let mut i = 0;
        while i < units.len() {
            let c = match units[i] {
                Unit::Atom(id) => {
                    self.write_atom(id, out);
                    i += 1;
                    continue;
                }
                Unit::Char(c) => c,
            };

            let consumed = match c {
                '!' => self.try_image(units, i, &scan, out),
                '[' => self.try_link(units, i, &scan, out),
                '<' | '&' => self.try_autolink(units, i, out),
                _ => None,
            }
            .or_else(|| self.try_delimiters(units, i, &mut scan, out));

            match consumed {
                Some(next) => i = next,
                None => {
                    out.push(c);
                    i += 1;
                }
            }
        }
    }

    fn try_delimiters(
        &self,
        units: &[Unit],
        at: usize,
        scan: &mut Scan,
        out: &mut String,
    ) -> Option<usize> {
        if scan.depth >= MAX_INLINE_NESTING {
            return None;
        }
        for (index, delim) in PATTERNS.iter().enumerate() {
            if scan.exhausted[index] || !delim.opens_at(units, at) {
                continue;
            }
            let Some(close) = delim.find_close(units, at) else {
                scan.exhausted[index] = true;
                continue;
            };
            out.push_str(delim.open);
            self.render_span(&units[at + delim.width..close], scan.depth + 1, out);
            out.push_str(delim.close);
            return Some(close + delim.width);
        }
        None
    }

    fn try_image(&self, units: &[Unit], at: usize, scan: &Scan, out: &mut String) -> Option<usize> {
        let (next, image) = parse_image(units, at, &scan.brackets, self.arena)?;
        out.push_str("<img src=\"");
        out.push_str(&encode_double_quoted_attribute(&image.src));
        out.push_str("\" alt=\"");
        out.push_str(&encode_double_quoted_attribute(&image.alt));
        out.push('"');
        if let Some(title) = &image.title {
            out.push_str(" title=\"");
            out.push_str(&encode_double_quoted_attribute(title));
            out.push('"');
        }
        out.push_str(" style=\"max-width:100%;\">");
        Some(next)
    }

    fn try_link(&self, units: &[Unit], at: usize, scan: &Scan, out: &mut String) -> Option<usize> {
        if scan.depth >= MAX_INLINE_NESTING {
            return None;
        }
        let (next, link) = parse_link(units, at, &scan.brackets, self.arena)?;
        out.push_str("<a href=\"");
        out.push_str(&encode_double_quoted_attribute(&link.href));
        out.push('"');
        if let Some(title) = &link.title {
            out.push_str(" title=\"");
            out.push_str(&encode_double_quoted_attribute(title));
            out.push('"');
        }
        self.push_target(out);
        out.push('>');
        self.render_span(link.text, scan.depth + 1, out);
        out.push_str("</a>");
        Some(next)
    }

    fn try_autolink(&self, units: &[Unit], at: usize, out: &mut String) -> Option<usize> {
        let (next, url) = parse_autolink(units, at, self.arena)?;
        out.push_str("<a href=\"");
        out.push_str(&encode_double_quoted_attribute(&url));
        out.push('"');
        self.push_target(out);
        out.push('>');
        out.push_str(&url);
        out.push_str("</a>");
        Some(next)
    }

    fn push_target(&self, out: &mut String) {
        if self.options.link_target_blank {
            out.push_str(" target=\"_blank\"");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::MAX_INLINE_NESTING;
    use crate::error::Diagnostics;
    use crate::escape::extract_escapes;
    use crate::html::Renderer;
    use crate::literal::tokenize_literals;
    use crate::options::ConvertOptions;
    use crate::token::TokenArena;

    fn inline_with(input: &str, options: &ConvertOptions) -> String {
        let mut arena = TokenArena::new();
        let mut diagnostics = Diagnostics::new();
        let units = extract_escapes(input, &mut arena);
        let units = tokenize_literals(&units, &mut arena, &mut diagnostics);
        let mut out = String::new();
        Renderer::new(&arena, options).render_inline(&units, &mut out);
        out
    }

    fn inline(input: &str) -> String {
        inline_with(input, &ConvertOptions::default())
    }

    #[test]
    fn emphasis_levels() {
        assert_eq!(
            inline("**bold** _em_"),
            "<strong>bold</strong> <em>em</em>"
        );
        assert_eq!(inline("***both***"), "<strong><em>both</em></strong>");
        assert_eq!(inline("___both___"), "<strong><em>both</em></strong>");
        assert_eq!(inline("~~gone~~"), "<del>gone</del>");
    }

    #[test]
    fn nested_emphasis() {
        assert_eq!(
            inline("**a *b* c**"),
            "<strong>a <em>b</em> c</strong>"
        );
    }

    #[test]
    fn underscores_inside_words_stay_literal() {
        assert_eq!(inline("snake_case_name"), "snake_case_name");
        assert_eq!(inline("a*b*c"), "a<em>b</em>c");
    }

    #[test]
    fn unmatched_or_spaced_markers_stay_literal() {
        assert_eq!(inline("2 * 3 * 4"), "2 * 3 * 4");
        assert_eq!(inline("**open"), "**open");
        assert_eq!(inline("****"), "****");
    }

    #[test]
    fn escaped_markers_are_literal() {
        assert_eq!(inline(r"\*not em\*"), "*not em*");
    }

    #[test]
    fn code_spans_are_not_formatted() {
        assert_eq!(inline("`*x*` *y*"), "<code>*x*</code> <em>y</em>");
    }

    #[test]
    fn images_and_links() {
        assert_eq!(
            inline("![logo](a.png \"Logo\")"),
            "<img src=\"a.png\" alt=\"logo\" title=\"Logo\" style=\"max-width:100%;\">"
        );
        assert_eq!(
            inline("[**docs**](https://d.io)"),
            "<a href=\"https://d.io\" target=\"_blank\"><strong>docs</strong></a>"
        );
        assert_eq!(
            inline("[t](u \"T\")"),
            "<a href=\"u\" title=\"T\" target=\"_blank\">t</a>"
        );
    }

    #[test]
    fn autolinks() {
        assert_eq!(
            inline("see <https://x.io>"),
            "see <a href=\"https://x.io\" target=\"_blank\">https://x.io</a>"
        );
        assert_eq!(
            inline("&lt;https://x.io&gt;"),
            "<a href=\"https://x.io\" target=\"_blank\">https://x.io</a>"
        );
        assert_eq!(inline("a <b> c"), "a <b> c");
    }

    #[test]
    fn link_target_can_be_disabled() {
        let options = ConvertOptions {
            link_target_blank: false,
            ..Default::default()
        };
        assert_eq!(inline_with("[a](b)", &options), "<a href=\"b\">a</a>");
    }

    #[test]
    fn attribute_values_are_escaped() {
        assert_eq!(
            inline("![a \"q\"](x.png)"),
            "<img src=\"x.png\" alt=\"a &quot;q&quot;\" style=\"max-width:100%;\">"
        );
    }

    #[test]
    fn deeply_nested_links_stay_bounded() {
        let depth = 5000;
        let input = format!("{}x{}", "[".repeat(depth), "](u)".repeat(depth));
        let html = inline(&input);
        assert_eq!(html.matches("<a ").count(), MAX_INLINE_NESTING);
        assert!(html.contains("x"));
    }

    #[test]
    fn unmatched_openers_scan_once() {
        let input = "**x ".repeat(20000);
        assert_eq!(inline(&input), input);
        let input = "[a".repeat(20000);
        assert_eq!(inline(&input), input);
        let input = "&lt;a".repeat(20000);
        assert_eq!(inline(&input), input);
    }
}
