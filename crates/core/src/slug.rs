use std::collections::HashMap;

use crate::token::{TokenArena, Unit, UnitsExt};

/// Splits a trailing `{#custom-id}` off heading text.
///
/// The id may contain ASCII alphanumerics, `-` and `_`. Anything else leaves
/// the text untouched.
///
/// ```
/// use mdtag_core::slug::extract_custom_id;
///
/// assert_eq!(extract_custom_id("Setup {#install}"), ("Setup", Some("install")));
/// assert_eq!(extract_custom_id("Setup {#two words}"), ("Setup {#two words}", None));
/// ```
pub fn extract_custom_id(text: &str) -> (&str, Option<&str>) {
    let trimmed = text.trim_end();
    let Some(inner) = trimmed.strip_suffix('}') else {
        return (text, None);
    };
    let Some(open) = inner.rfind("{#") else {
        return (text, None);
    };
    let id = &inner[open + 2..];
    let valid = !id.is_empty()
        && id
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_');
    if valid {
        (inner[..open].trim_end(), Some(id))
    } else {
        (text, None)
    }
}

/// Unit-level variant of [`extract_custom_id`]: returns the heading units to
/// render and the custom id, if the heading ends with one.
pub fn split_custom_id<'a>(content: &'a [Unit], arena: &TokenArena) -> (&'a [Unit], Option<String>) {
    let Some(open) = content.iter().rposition(|u| *u == Unit::Char('{')) else {
        return (content, None);
    };
    let suffix = arena.plain_text(&content[open..]);
    match extract_custom_id(&suffix) {
        ("", Some(id)) => (content[..open].trim_end_ws(), Some(id.to_string())),
        _ => (content, None),
    }
}

/// Per-document heading id generator compatible with github-slugger.
#[derive(Debug, Default)]
pub struct Slugger {
    seen: HashMap<String, usize>,
}

impl Slugger {
    /// Creates a slugger with no ids issued.
    pub fn new() -> Self {
        Self::default()
    }

    /// Slugifies `text`, appending `-N` when the slug was already issued.
    pub fn slug(&mut self, text: &str) -> String {
        let base = slugify(text);
        let count = self.seen.entry(base.clone()).or_insert(0);
        let slug = if *count == 0 {
            base
        } else {
            format!("{base}-{count}")
        };
        *count += 1;
        slug
    }

    /// Marks an explicit id as taken so generated ids avoid it.
    pub fn reserve(&mut self, id: &str) {
        *self.seen.entry(id.to_string()).or_insert(0) += 1;
    }
}

/// Lowercases and keeps letters, digits, marks, `-` and `_`; spaces become
/// hyphens and everything else is dropped. Runs of hyphens are not collapsed.
pub fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            ' ' => slug.push('-'),
            '-' | '_' => slug.push(ch),
            c if c.is_ascii_alphanumeric() => slug.push(c.to_ascii_lowercase()),
            c if !c.is_ascii() && (c.is_alphanumeric() || is_combining_mark(c)) => {
                slug.extend(c.to_lowercase())
            }
            _ => {}
        }
    }
    if slug.is_empty() {
        slug.push_str("heading");
    }
    slug
}

/// Combining marks (Mn/Mc/Me) for the scripts headings are commonly written in.
fn is_combining_mark(ch: char) -> bool {
    matches!(
        ch as u32,
        0x0300..=0x036F
            | 0x0483..=0x0489
            | 0x0591..=0x05C7
            | 0x0610..=0x061A
            | 0x064B..=0x065F
            | 0x0670
            | 0x0900..=0x0903
            | 0x093A..=0x094F
            | 0x0951..=0x0957
            | 0x0962..=0x0963
            | 0x0981..=0x0983
            | 0x09BC..=0x09D7
            | 0x0E31
            | 0x0E34..=0x0E3A
            | 0x0E47..=0x0E4E
            | 0x1AB0..=0x1AFF
            | 0x1DC0..=0x1DFF
            | 0x3099..=0x309A
            | 0xFE20..=0xFE2F
    )
}
