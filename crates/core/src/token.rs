//! Token arena and unit stream shared by every pipeline stage.
//!
//! After escaping and literal tokenization the source is a flat sequence of
//! [`Unit`]s. Protected content (escaped punctuation, code spans, fenced code)
//! lives in the [`TokenArena`] and is referenced by index, so no structural or
//! inline pass can ever see it as markdown syntax.

/// Index of an [`Atom`] inside a [`TokenArena`].
pub type AtomId = usize;

/// One element of the tokenized source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Unit {
    /// A plain source character.
    Char(char),
    /// A reference to protected content in the arena.
    Atom(AtomId),
}

/// Protected content extracted before structural parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Atom {
    /// A backslash-escaped punctuation character.
    Escape(char),
    /// Raw text of a single- or double-backtick code span.
    InlineCode(String),
    /// A fenced code block, already dedented and trimmed.
    CodeBlock {
        /// Language tag (empty when the fence had none).
        lang: String,
        /// Literal code content (not yet HTML-escaped).
        body: String,
    },
}

/// Per-conversion storage for atoms.
#[derive(Debug, Default)]
pub struct TokenArena {
    atoms: Vec<Atom>,
}

impl TokenArena {
    /// Creates an empty arena.
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores an atom and returns the unit referencing it.
    pub fn push(&mut self, atom: Atom) -> Unit {
        self.atoms.push(atom);
        Unit::Atom(self.atoms.len() - 1)
    }

    /// Looks up an atom by id.
    pub fn get(&self, id: AtomId) -> Option<&Atom> {
        self.atoms.get(id)
    }

    /// Number of stored atoms.
    pub fn len(&self) -> usize {
        self.atoms.len()
    }

    /// Whether no atoms have been stored.
    pub fn is_empty(&self) -> bool {
        self.atoms.is_empty()
    }

    /// Flattens units to text, resolving escapes to their character and code
    /// spans to their raw content. Used for URLs, alt text and slugs.
    pub fn plain_text(&self, units: &[Unit]) -> String {
        let mut out = String::with_capacity(units.len());
        for unit in units {
            match *unit {
                Unit::Char(c) => out.push(c),
                Unit::Atom(id) => match self.get(id) {
                    Some(Atom::Escape(c)) => out.push(*c),
                    Some(Atom::InlineCode(code)) => out.push_str(code),
                    Some(Atom::CodeBlock { body, .. }) => out.push_str(body),
                    None => {}
                },
            }
        }
        out
    }
}

/// Converts a string into plain character units.
pub fn units_from_str(s: &str) -> Vec<Unit> {
    s.chars().map(Unit::Char).collect()
}

/// Splits a unit stream into lines, dropping a trailing `\r` from each.
pub fn split_lines(units: &[Unit]) -> Vec<&[Unit]> {
    units
        .split(|u| *u == Unit::Char('\n'))
        .map(|line| match line.last() {
            Some(Unit::Char('\r')) => &line[..line.len() - 1],
            _ => line,
        })
        .collect()
}

/// Text helpers over unit slices.
pub trait UnitsExt {
    /// The character at `index`, if that unit is a plain character.
    fn char_at(&self, index: usize) -> Option<char>;
    /// Drops leading whitespace characters.
    fn trim_start_ws(&self) -> &[Unit];
    /// Drops trailing whitespace characters.
    fn trim_end_ws(&self) -> &[Unit];
    /// Drops whitespace on both ends.
    fn trim_ws(&self) -> &[Unit];
    /// Whether the slice contains only whitespace characters (or nothing).
    fn is_blank(&self) -> bool;
    /// Whether the slice begins with the given literal text.
    fn starts_with_str(&self, prefix: &str) -> bool;
    /// Returns the remainder after a literal prefix.
    fn strip_prefix_str(&self, prefix: &str) -> Option<&[Unit]>;
    /// Returns the text when the slice has no atoms.
    fn as_plain(&self) -> Option<String>;
    /// Splits on a character, leaving atoms intact.
    fn split_char(&self, sep: char) -> Vec<&[Unit]>;
}

fn is_ws(unit: &Unit) -> bool {
    matches!(unit, Unit::Char(c) if c.is_whitespace())
}

impl UnitsExt for [Unit] {
    fn char_at(&self, index: usize) -> Option<char> {
        match self.get(index) {
            Some(Unit::Char(c)) => Some(*c),
            _ => None,
        }
    }

    fn trim_start_ws(&self) -> &[Unit] {
        let start = self.iter().position(|u| !is_ws(u)).unwrap_or(self.len());
        &self[start..]
    }

    fn trim_end_ws(&self) -> &[Unit] {
        let end = self.iter().rposition(|u| !is_ws(u)).map_or(0, |i| i + 1);
        &self[..end]
    }

    fn trim_ws(&self) -> &[Unit] {
        self.trim_start_ws().trim_end_ws()
    }

    fn is_blank(&self) -> bool {
        self.iter().all(is_ws)
    }

    fn starts_with_str(&self, prefix: &str) -> bool {
        self.strip_prefix_str(prefix).is_some()
    }

    fn strip_prefix_str(&self, prefix: &str) -> Option<&[Unit]> {
        let mut rest = self;
        for expected in prefix.chars() {
            match rest.split_first() {
                Some((Unit::Char(c), tail)) if *c == expected => rest = tail,
                _ => return None,
            }
        }
        Some(rest)
    }

    fn as_plain(&self) -> Option<String> {
        self.iter()
            .map(|u| match u {
                Unit::Char(c) => Some(*c),
                Unit::Atom(_) => None,
            })
            .collect()
    }

    fn split_char(&self, sep: char) -> Vec<&[Unit]> {
        self.split(|u| *u == Unit::Char(sep)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_lines_strips_carriage_returns() {
        let units = units_from_str("a\r\nb\nc");
        let lines = split_lines(&units);
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0].as_plain().as_deref(), Some("a"));
        assert_eq!(lines[1].as_plain().as_deref(), Some("b"));
    }

    #[test]
    fn trims_whitespace_but_not_atoms() {
        let mut arena = TokenArena::new();
        let mut units = units_from_str("  ");
        units.push(arena.push(Atom::Escape('*')));
        units.extend(units_from_str(" x  "));
        let trimmed = units.trim_ws();
        assert_eq!(trimmed.len(), 3);
        assert!(matches!(trimmed[0], Unit::Atom(0)));
        assert_eq!(trimmed.as_plain(), None);
        assert_eq!(arena.plain_text(trimmed), "* x");
    }

    #[test]
    fn split_char_keeps_atoms_whole() {
        let mut arena = TokenArena::new();
        let mut units = units_from_str("a|");
        units.push(arena.push(Atom::InlineCode("x|y".into())));
        units.extend(units_from_str("|b"));
        let cells = units.split_char('|');
        assert_eq!(cells.len(), 3);
        assert_eq!(arena.plain_text(cells[1]), "x|y");
    }

    #[test]
    fn prefix_helpers() {
        let units = units_from_str("&gt; quoted");
        assert!(units.starts_with_str("&gt;"));
        let rest = units.strip_prefix_str("&gt;").unwrap();
        assert_eq!(rest.as_plain().as_deref(), Some(" quoted"));
        assert!(units_from_str(" \t").is_blank());
    }
}
