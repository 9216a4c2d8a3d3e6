//! Backslash escapes.
//!
//! Runs before any structural parsing so escaped punctuation is invisible to
//! every later pass and comes back verbatim only when atoms are rendered.

use crate::token::{Atom, TokenArena, Unit};

/// Characters that may follow a backslash to form an escape.
pub const ESCAPABLE: &[char] = &[
    '\\', '`', '*', '_', '{', '}', '[', ']', '(', ')', '#', '+', '-', '.', '!', '|', '~', '<',
    '>', '"',
];

/// Returns true if `c` is in the escape set.
pub fn is_escapable(c: char) -> bool {
    ESCAPABLE.contains(&c)
}

/// Converts source text into units, replacing each `\X` (X escapable) with an
/// escape atom. A backslash before any other character stays literal.
pub fn extract_escapes(input: &str, arena: &mut TokenArena) -> Vec<Unit> {
    let mut units = Vec::with_capacity(input.len());
    let mut chars = input.chars().peekable();

    while let Some(c) = chars.next() {
        if c == '\\'
            && let Some(&next) = chars.peek()
            && is_escapable(next)
        {
            chars.next();
            units.push(arena.push(Atom::Escape(next)));
            continue;
        }
        units.push(Unit::Char(c));
    }

    units
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_listed_punctuation() {
        let mut arena = TokenArena::new();
        let units = extract_escapes(r"\*not em\*", &mut arena);
        assert_eq!(arena.len(), 2);
        assert!(matches!(units[0], Unit::Atom(0)));
        assert_eq!(arena.get(0), Some(&Atom::Escape('*')));
        assert_eq!(arena.plain_text(&units), "*not em*");
    }

    #[test]
    fn leaves_unknown_targets_alone() {
        let mut arena = TokenArena::new();
        let units = extract_escapes(r"C:\path\n", &mut arena);
        assert!(arena.is_empty());
        assert_eq!(arena.plain_text(&units), r"C:\path\n");
    }

    #[test]
    fn double_backslash_is_one_escape() {
        let mut arena = TokenArena::new();
        let units = extract_escapes(r"\\*", &mut arena);
        assert_eq!(units.len(), 2);
        assert_eq!(arena.get(0), Some(&Atom::Escape('\\')));
        assert_eq!(units[1], Unit::Char('*'));
    }

    #[test]
    fn trailing_backslash_is_literal() {
        let mut arena = TokenArena::new();
        let units = extract_escapes("end\\", &mut arena);
        assert_eq!(units.last(), Some(&Unit::Char('\\')));
    }
}
