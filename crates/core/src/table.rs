//! Pipe tables with an alignment row.

use crate::html::Renderer;
use crate::token::{Unit, UnitsExt};

/// Column alignment derived from the separator row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Alignment {
    /// `:---` or `---`
    #[default]
    Left,
    /// `:---:`
    Center,
    /// `---:`
    Right,
}

impl Alignment {
    fn as_css(self) -> &'static str {
        match self {
            Alignment::Left => "left",
            Alignment::Center => "center",
            Alignment::Right => "right",
        }
    }
}

/// A parsed pipe table. Rows keep whatever cell count they were written with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table<'a> {
    /// Per-column alignment, from the separator row.
    pub alignments: Vec<Alignment>,
    /// Header cells.
    pub header: Vec<&'a [Unit]>,
    /// Body rows.
    pub rows: Vec<Vec<&'a [Unit]>>,
}

/// Whether the (indentation-normalized) line belongs to a pipe block.
pub fn is_table_line(line: &[Unit]) -> bool {
    line.trim_start_ws().starts_with_str("|")
}

/// Splits a row into trimmed cells after dropping the outer pipes.
pub fn split_row(line: &[Unit]) -> Vec<&[Unit]> {
    let mut row = line.trim_ws();
    if let Some(rest) = row.strip_prefix_str("|") {
        row = rest;
    }
    if row.last() == Some(&Unit::Char('|')) {
        row = &row[..row.len() - 1];
    }
    row.split_char('|')
        .into_iter()
        .map(|cell| cell.trim_ws())
        .collect()
}

fn parse_alignment(cell: &[Unit]) -> Option<Alignment> {
    let text = cell.as_plain()?;
    let text = text.trim();
    let valid = text.contains('-')
        && text
            .chars()
            .all(|c| c == '-' || c == ':' || c.is_whitespace());
    if !valid {
        return None;
    }
    Some(match (text.starts_with(':'), text.ends_with(':')) {
        (true, true) => Alignment::Center,
        (false, true) => Alignment::Right,
        _ => Alignment::Left,
    })
}

impl<'a> Table<'a> {
    /// Builds a table from a run of pipe lines, or `None` when the second line
    /// is not a pure alignment row.
    pub fn parse(lines: &[&'a [Unit]]) -> Option<Self> {
        let [header, separator, body @ ..] = lines else {
            return None;
        };
        let alignments = split_row(*separator)
            .into_iter()
            .map(parse_alignment)
            .collect::<Option<Vec<_>>>()?;

        Some(Table {
            alignments,
            header: split_row(*header),
            rows: body.iter().map(|line| split_row(*line)).collect(),
        })
    }

    fn alignment(&self, column: usize) -> Alignment {
        self.alignments.get(column).copied().unwrap_or_default()
    }

    /// Renders the table; header and body cells carry their column alignment.
    pub fn render(&self, renderer: &Renderer<'_>, out: &mut String) {
        out.push_str("<table><thead><tr>");
        self.render_cells(&self.header, "th", renderer, out);
        out.push_str("</tr></thead><tbody>");
        for row in &self.rows {
            out.push_str("<tr>");
            self.render_cells(row, "td", renderer, out);
            out.push_str("</tr>");
        }
        out.push_str("</tbody></table>");
    }

    fn render_cells(&self, cells: &[&[Unit]], tag: &str, renderer: &Renderer<'_>, out: &mut String) {
        for (column, cell) in cells.iter().enumerate() {
            out.push('<');
            out.push_str(tag);
            out.push_str(" style=\"text-align:");
            out.push_str(self.alignment(column).as_css());
            out.push_str("\">");
            renderer.render_inline(cell, out);
            out.push_str("</");
            out.push_str(tag);
            out.push('>');
        }
    }
}
