//! Literal tokenizer: fenced code blocks and backtick code spans.
//!
//! A single forward scan over the escaped unit stream. At each position it
//! tries, in order, a triple-backtick fence, a double-backtick span and a
//! single-backtick span. Matches become arena atoms so no later pass can read
//! code content as markdown. Unterminated fences and spans run to the end of
//! input and are reported as warnings.

use crate::error::{Diagnostics, ParseWarning, SourceLocation};
use crate::token::{Atom, TokenArena, Unit};

/// Replaces code fences and code spans in `units` with atoms.
pub fn tokenize_literals(
    units: &[Unit],
    arena: &mut TokenArena,
    diagnostics: &mut Diagnostics,
) -> Vec<Unit> {
    let mut out = Vec::with_capacity(units.len());
    let mut i = 0;

    while i < units.len() {
        if ticks_at(units, i, 3) {
            let (next, atom) = read_fence(units, i, arena, diagnostics);
            out.push(arena.push(atom));
            i = next;
        } else if ticks_at(units, i, 2) {
            let (next, code) = read_span(units, i, 2, arena, diagnostics);
            out.push(arena.push(Atom::InlineCode(code)));
            i = next;
        } else if ticks_at(units, i, 1) {
            let (next, code) = read_span(units, i, 1, arena, diagnostics);
            out.push(arena.push(Atom::InlineCode(code)));
            i = next;
        } else {
            out.push(units[i]);
            i += 1;
        }
    }

    out
}

fn ticks_at(units: &[Unit], at: usize, count: usize) -> bool {
    units.len() >= at + count && units[at..at + count].iter().all(|u| *u == Unit::Char('`'))
}

fn find_ticks(units: &[Unit], from: usize, count: usize) -> Option<usize> {
    (from..units.len()).find(|&k| ticks_at(units, k, count))
}

/// Reads a fence starting at `start`; returns the index after it and its atom.
fn read_fence(
    units: &[Unit],
    start: usize,
    arena: &TokenArena,
    diagnostics: &mut Diagnostics,
) -> (usize, Atom) {
    let mut j = start + 3;

    let mut lang = String::new();
    while let Some(unit) = units.get(j) {
        match *unit {
            Unit::Char(c) if !c.is_whitespace() => lang.push(c),
            Unit::Atom(id) => match arena.get(id) {
                Some(Atom::Escape(c)) => lang.push(*c),
                _ => break,
            },
            _ => break,
        }
        j += 1;
    }

    while matches!(units.get(j), Some(Unit::Char(' ' | '\t'))) {
        j += 1;
    }
    if units.get(j) == Some(&Unit::Char('\r')) {
        j += 1;
    }
    if units.get(j) == Some(&Unit::Char('\n')) {
        j += 1;
    }

    let (body_end, next) = match find_ticks(units, j, 3) {
        Some(close) => (close, close + 3),
        None => {
            let location = location_of(units, start);
            log::debug!("Unclosed code fence at {}", location);
            diagnostics.add_warning(ParseWarning::UnclosedCodeFence {
                location,
                lang: (!lang.is_empty()).then(|| lang.clone()),
            });
            (units.len(), units.len())
        }
    };

    let raw = arena.plain_text(&units[j.min(body_end)..body_end]);
    let atom = Atom::CodeBlock {
        lang,
        body: normalize_code_body(&raw),
    };
    (next, atom)
}

/// Reads a span of `ticks` backticks starting at `start`.
fn read_span(
    units: &[Unit],
    start: usize,
    ticks: usize,
    arena: &TokenArena,
    diagnostics: &mut Diagnostics,
) -> (usize, String) {
    let body_start = start + ticks;
    match find_ticks(units, body_start, ticks) {
        Some(close) => (close + ticks, arena.plain_text(&units[body_start..close])),
        None => {
            let location = location_of(units, start);
            log::debug!("Unclosed code span at {}", location);
            diagnostics.add_warning(ParseWarning::UnclosedCodeSpan { location, ticks });
            (units.len(), arena.plain_text(&units[body_start..]))
        }
    }
}

/// Dedents code by the smallest leading-space count among non-blank lines and
/// trims leading/trailing blank lines.
pub fn normalize_code_body(raw: &str) -> String {
    let lines: Vec<&str> = raw
        .split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
        .collect();

    let is_blank = |line: &&str| line.trim().is_empty();
    let Some(first) = lines.iter().position(|l| !is_blank(l)) else {
        return String::new();
    };
    let last = lines.iter().rposition(|l| !is_blank(l)).unwrap_or(first);

    let indent = lines[first..=last]
        .iter()
        .filter(|l| !is_blank(*l))
        .map(|l| l.len() - l.trim_start_matches(' ').len())
        .min()
        .unwrap_or(0);

    lines[first..=last]
        .iter()
        .map(|line| strip_spaces(line, indent))
        .collect::<Vec<_>>()
        .join("\n")
}

fn strip_spaces(line: &str, max: usize) -> &str {
    let spaces = line.bytes().take(max).take_while(|b| *b == b' ').count();
    &line[spaces..]
}

fn location_of(units: &[Unit], index: usize) -> SourceLocation {
    let mut line = 1;
    let mut column = 1;
    for unit in &units[..index] {
        if *unit == Unit::Char('\n') {
            line += 1;
            column = 1;
        } else {
            column += 1;
        }
    }
    SourceLocation::new(line, column)
}
