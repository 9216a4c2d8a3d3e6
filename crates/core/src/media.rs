//! Images, links and angle-bracket autolinks.

use crate::token::{Atom, TokenArena, Unit, UnitsExt};

/// `![alt](src "title")`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Image {
    /// Alternative text, flattened.
    pub alt: String,
    /// Image URL.
    pub src: String,
    /// Optional quoted title.
    pub title: Option<String>,
}

/// `[text](href "title")`; the text stays as units for inline rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link<'a> {
    /// Link text.
    pub text: &'a [Unit],
    /// Target URL.
    pub href: String,
    /// Optional quoted title.
    pub title: Option<String>,
}

/// Angle-bracket delimiters accepted around autolinks.
const AUTOLINK_BRACKETS: [(&str, &str); 2] = [("<", ">"), ("&lt;", "&gt;")];

/// Matching `]` for every `[` of a span, found in one pass.
#[derive(Debug, Clone, Default)]
pub struct BracketPairs {
    closes: Vec<Option<usize>>,
}

impl BracketPairs {
    /// Pairs brackets by depth; unbalanced openers have no match.
    pub fn new(units: &[Unit]) -> Self {
        let mut closes = vec![None; units.len()];
        let mut open = Vec::new();
        for (i, unit) in units.iter().enumerate() {
            match unit {
                Unit::Char('[') => open.push(i),
                Unit::Char(']') => {
                    if let Some(start) = open.pop() {
                        closes[start] = Some(i);
                    }
                }
                _ => {}
            }
        }
        Self { closes }
    }

    /// Index of the `]` closing the `[` at `open`.
    pub fn closing(&self, open: usize) -> Option<usize> {
        self.closes.get(open).copied().flatten()
    }
}

/// Parses `(url "title")` starting at the `(`; returns the index after `)`.
fn destination(
    units: &[Unit],
    open: usize,
    arena: &TokenArena,
) -> Option<(usize, String, Option<String>)> {
    if units.char_at(open) != Some('(') {
        return None;
    }
    let mut k = open + 1;
    let skip_ws = |mut k: usize| {
        while matches!(units.char_at(k), Some(c) if c.is_whitespace()) {
            k += 1;
        }
        k
    };

    k = skip_ws(k);
    let url_start = k;
    while let Some(unit) = units.get(k) {
        match unit {
            Unit::Char(c) if c.is_whitespace() || *c == ')' => break,
            _ => k += 1,
        }
    }
    let url = arena.plain_text(&units[url_start..k]);
    if url.is_empty() {
        return None;
    }

    k = skip_ws(k);
    let mut title = None;
    if units.char_at(k) == Some('"') {
        let title_start = k + 1;
        let close = (title_start..units.len()).find(|&j| units.char_at(j) == Some('"'))?;
        title = Some(arena.plain_text(&units[title_start..close]));
        k = skip_ws(close + 1);
    }

    (units.char_at(k) == Some(')')).then(|| (k + 1, url, title))
}

/// Parses an image at `at` (the `!`).
pub fn parse_image(
    units: &[Unit],
    at: usize,
    brackets: &BracketPairs,
    arena: &TokenArena,
) -> Option<(usize, Image)> {
    if units.char_at(at) != Some('!') || units.char_at(at + 1) != Some('[') {
        return None;
    }
    let close = brackets.closing(at + 1)?;
    let (next, src, title) = destination(units, close + 1, arena)?;
    let alt = arena.plain_text(&units[at + 2..close]);
    Some((next, Image { alt, src, title }))
}

/// Parses a link at `at` (the `[`).
pub fn parse_link<'a>(
    units: &'a [Unit],
    at: usize,
    brackets: &BracketPairs,
    arena: &TokenArena,
) -> Option<(usize, Link<'a>)> {
    if units.char_at(at) != Some('[') {
        return None;
    }
    let close = brackets.closing(at)?;
    let (next, href, title) = destination(units, close + 1, arena)?;
    Some((
        next,
        Link {
            text: &units[at + 1..close],
            href,
            title,
        },
    ))
}

fn looks_like_url(candidate: &str) -> bool {
    if candidate.starts_with("mailto:") {
        return candidate.len() > "mailto:".len();
    }
    let Some((scheme, rest)) = candidate.split_once("://") else {
        return false;
    };
    !rest.is_empty()
        && scheme.chars().next().is_some_and(|c| c.is_ascii_alphabetic())
        && scheme
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
}

/// Parses `<scheme://…>` (or its entity-escaped form) at `at`.
pub fn parse_autolink(units: &[Unit], at: usize, arena: &TokenArena) -> Option<(usize, String)> {
    for (open, close) in AUTOLINK_BRACKETS {
        let Some(rest) = units[at..].strip_prefix_str(open) else {
            continue;
        };
        let body_start = at + open.chars().count();
        let mut url = String::new();
        for (offset, unit) in rest.iter().enumerate() {
            if rest[offset..].starts_with_str(open) {
                break;
            }
            if rest[offset..].starts_with_str(close) {
                if looks_like_url(&url) {
                    return Some((body_start + offset + close.chars().count(), url));
                }
                break;
            }
            match unit {
                Unit::Char(c) if !c.is_whitespace() && *c != '<' => url.push(*c),
                Unit::Atom(id) => match arena.get(*id) {
                    Some(Atom::Escape(c)) => url.push(*c),
                    _ => break,
                },
                _ => break,
            }
        }
    }
    None
}
