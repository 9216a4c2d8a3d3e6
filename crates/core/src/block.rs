//! Block parser: classifies indentation-normalized lines into a block tree.
//!
//! Each line is tried against the block kinds in a fixed priority order:
//! blank, code block, quote, checkbox item, list item, heading, rule, pipe
//! table, raw HTML line, and finally paragraph text. Plain-text lines
//! accumulate into a paragraph until a blank or block-level line flushes it.

use crate::error::{Diagnostics, ParseWarning};
use crate::list::{ChecklistItem, ListItem, parse_checklist_item, parse_list_item};
use crate::options::ConvertOptions;
use crate::quote::{QuoteNode, is_quote_line};
use crate::table::{Table, is_table_line};
use crate::token::{Atom, AtomId, TokenArena, Unit, UnitsExt};

/// A parsed block. Borrowed slices point into the tokenized source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block<'a> {
    /// Consecutive text lines, joined with line breaks when rendered.
    Paragraph(Vec<&'a [Unit]>),
    /// `#`-prefixed heading, level 1 to 6.
    Heading {
        /// Number of leading `#`.
        level: u8,
        /// Heading text.
        content: &'a [Unit],
    },
    /// Horizontal rule.
    Rule,
    /// A line starting with a fenced code block, plus any text after it.
    Code(AtomId, &'a [Unit]),
    /// A line that already starts with an HTML tag; emitted verbatim.
    Html(&'a [Unit]),
    /// Contiguous checkbox items.
    Checklist(Vec<ChecklistItem<'a>>),
    /// Contiguous ordered/unordered items, nested by indentation.
    List(Vec<ListItem<'a>>),
    /// A blockquote and its nested levels.
    Quote(Vec<QuoteNode<'a>>),
    /// A pipe table.
    Table(Table<'a>),
}

/// Recursive-descent block parser for one conversion.
pub struct BlockParser<'s> {
    pub(crate) arena: &'s TokenArena,
    pub(crate) max_quote_depth: usize,
    pub(crate) depth: usize,
    pub(crate) diagnostics: &'s mut Diagnostics,
}

impl<'s> BlockParser<'s> {
    /// Creates a parser over atoms already stored in `arena`.
    pub fn new(
        arena: &'s TokenArena,
        options: &ConvertOptions,
        diagnostics: &'s mut Diagnostics,
    ) -> Self {
        Self {
            arena,
            max_quote_depth: options.max_quote_depth,
            depth: 0,
            diagnostics,
        }
    }

    /// Parses lines into blocks.
    pub fn parse<'a>(&mut self, lines: &[&'a [Unit]]) -> Vec<Block<'a>> {
        let lines = normalize_indentation(lines);
        let mut blocks = Vec::new();
        let mut paragraph: Vec<&'a [Unit]> = Vec::new();
        let mut i = 0;

        while i < lines.len() {
            let line = lines[i];

            if line.is_blank() {
                flush_paragraph(&mut paragraph, &mut blocks);
                i += 1;
                continue;
            }

            if let Some((id, trailing)) = self.code_block_atom(line) {
                flush_paragraph(&mut paragraph, &mut blocks);
                blocks.push(Block::Code(id, trailing));
                i += 1;
                continue;
            }

            if self.depth < self.max_quote_depth && is_quote_line(line) {
                flush_paragraph(&mut paragraph, &mut blocks);
                let end = run_end(&lines, i, |l| !l.is_blank());
                blocks.push(Block::Quote(self.parse_quote(&lines[i..end])));
                i = end;
                continue;
            }

            if parse_checklist_item(line).is_some() {
                flush_paragraph(&mut paragraph, &mut blocks);
                let end = run_end(&lines, i, |l| parse_checklist_item(l).is_some());
                let items = lines[i..end]
                    .iter()
                    .filter_map(|l| parse_checklist_item(*l))
                    .collect();
                blocks.push(Block::Checklist(items));
                i = end;
                continue;
            }

            if parse_list_item(line).is_some() {
                flush_paragraph(&mut paragraph, &mut blocks);
                let end = run_end(&lines, i, |l| {
                    parse_list_item(l).is_some() && parse_checklist_item(l).is_none()
                });
                let items = lines[i..end]
                    .iter()
                    .filter_map(|l| parse_list_item(*l))
                    .collect();
                blocks.push(Block::List(items));
                i = end;
                continue;
            }

            if let Some((level, content)) = parse_heading(line) {
                flush_paragraph(&mut paragraph, &mut blocks);
                blocks.push(Block::Heading { level, content });
                i += 1;
                continue;
            }

            if is_rule(line) {
                flush_paragraph(&mut paragraph, &mut blocks);
                blocks.push(Block::Rule);
                i += 1;
                continue;
            }

            if is_table_line(line) {
                let end = run_end(&lines, i, is_table_line);
                match Table::parse(&lines[i..end]) {
                    Some(table) => {
                        flush_paragraph(&mut paragraph, &mut blocks);
                        blocks.push(Block::Table(table));
                    }
                    None => {
                        log::debug!("Pipe block without alignment row kept as text");
                        self.diagnostics
                            .add_warning(ParseWarning::MalformedTable { lines: end - i });
                        paragraph.extend(lines[i..end].iter().map(|&l| l.trim_ws()));
                    }
                }
                i = end;
                continue;
            }

            if is_html_line(line) {
                flush_paragraph(&mut paragraph, &mut blocks);
                blocks.push(Block::Html(line.trim_ws()));
                i += 1;
                continue;
            }

            paragraph.push(line.trim_ws());
            i += 1;
        }

        flush_paragraph(&mut paragraph, &mut blocks);
        blocks
    }

    fn code_block_atom<'a>(&self, line: &'a [Unit]) -> Option<(AtomId, &'a [Unit])> {
        match line.trim_ws() {
            [Unit::Atom(id), rest @ ..]
                if matches!(self.arena.get(*id), Some(Atom::CodeBlock { .. })) =>
            {
                Some((*id, rest))
            }
            _ => None,
        }
    }
}

fn flush_paragraph<'a>(paragraph: &mut Vec<&'a [Unit]>, blocks: &mut Vec<Block<'a>>) {
    if !paragraph.is_empty() {
        blocks.push(Block::Paragraph(std::mem::take(paragraph)));
    }
}

/// Index one past the last line of the run starting at `start`.
fn run_end(lines: &[&[Unit]], start: usize, mut keep: impl FnMut(&[Unit]) -> bool) -> usize {
    start
        + 1
        + lines[start + 1..]
            .iter()
            .take_while(|l| keep(**l))
            .count()
}

/// Strips leading whitespace from every line except list items, whose
/// indentation drives nesting, and lines starting with a protected atom.
pub fn normalize_indentation<'a>(lines: &[&'a [Unit]]) -> Vec<&'a [Unit]> {
    lines
        .iter()
        .map(|&line| {
            let trimmed = line.trim_start_ws();
            if parse_list_item(line).is_some() || matches!(trimmed.first(), Some(Unit::Atom(_))) {
                line
            } else {
                trimmed
            }
        })
        .collect()
}

/// `# Title` through `###### Title`.
pub fn parse_heading(line: &[Unit]) -> Option<(u8, &[Unit])> {
    let hashes = line
        .iter()
        .take_while(|u| **u == Unit::Char('#'))
        .count();
    if !(1..=6).contains(&hashes) {
        return None;
    }
    match line.get(hashes) {
        Some(Unit::Char(c)) if c.is_whitespace() => {
            Some((hashes as u8, line[hashes..].trim_ws()))
        }
        _ => None,
    }
}

/// Three or more of the same `-`, `*` or `_` alone on a line.
pub fn is_rule(line: &[Unit]) -> bool {
    let Some(text) = line.trim_ws().as_plain() else {
        return false;
    };
    let mut chars = text.chars();
    match chars.next() {
        Some(first @ ('-' | '*' | '_')) => text.len() >= 3 && chars.all(|c| c == first),
        _ => false,
    }
}

/// Lines opening with a start tag, end tag or comment.
pub fn is_html_line(line: &[Unit]) -> bool {
    let line = line.trim_start_ws();
    if line.starts_with_str("<!--") {
        return true;
    }
    let Some(rest) = line.strip_prefix_str("<") else {
        return false;
    };
    let rest = rest.strip_prefix_str("/").unwrap_or(rest);
    if !matches!(rest.char_at(0), Some(c) if c.is_ascii_alphabetic()) {
        return false;
    }
    let name_len = rest
        .iter()
        .take_while(|u| matches!(u, Unit::Char(c) if c.is_ascii_alphanumeric() || *c == '-'))
        .count();
    match rest.get(name_len) {
        None => true,
        Some(Unit::Char(c)) => c.is_whitespace() || *c == '>' || *c == '/',
        Some(Unit::Atom(_)) => false,
    }
}
