//! Checkbox lists and indentation-nested ordered/unordered lists.

use crate::html::Renderer;
use crate::token::{Unit, UnitsExt};

/// Whether a list level renders as `<ol>` or `<ul>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListKind {
    /// Numbered items (`1.`)
    Ordered,
    /// Bulleted items (`-`, `+`, `*`)
    Unordered,
}

impl ListKind {
    fn tag(self) -> &'static str {
        match self {
            ListKind::Ordered => "ol",
            ListKind::Unordered => "ul",
        }
    }
}

/// One line of a nested list block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListItem<'a> {
    /// Visual indentation width (tabs expand to 4-column stops).
    pub indent: usize,
    /// Marker family of the item.
    pub kind: ListKind,
    /// Literal number of an ordered marker.
    pub number: Option<u64>,
    /// Item text after the marker.
    pub content: &'a [Unit],
}

/// One line of a checkbox list block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChecklistItem<'a> {
    /// `[x]`/`[X]` versus `[ ]`.
    pub checked: bool,
    /// Item text after the checkbox.
    pub content: &'a [Unit],
}

/// Returns (visual_columns, unit_offset) for leading whitespace.
/// Visual columns expand tabs to 4-column boundaries.
pub fn leading_whitespace_info(line: &[Unit]) -> (usize, usize) {
    let mut col = 0;
    let mut units = 0;
    for unit in line {
        match unit {
            Unit::Char(' ') => col += 1,
            Unit::Char('\t') => col += 4 - (col % 4),
            _ => break,
        }
        units += 1;
    }
    (col, units)
}

fn is_bullet(unit: Option<&Unit>) -> bool {
    matches!(unit, Some(Unit::Char('-' | '+' | '*')))
}

fn is_space(unit: Option<&Unit>) -> bool {
    matches!(unit, Some(Unit::Char(' ' | '\t')))
}

/// Parses `- item`, `* item`, `+ item` or `12. item` with any indentation.
pub fn parse_list_item(line: &[Unit]) -> Option<ListItem<'_>> {
    let (indent, offset) = leading_whitespace_info(line);
    let rest = &line[offset..];

    let (kind, number, marker_len) = if is_bullet(rest.first()) {
        (ListKind::Unordered, None, 1)
    } else {
        let digits: Vec<u64> = rest
            .iter()
            .map_while(|u| match u {
                Unit::Char(c) => c.to_digit(10).map(u64::from),
                Unit::Atom(_) => None,
            })
            .collect();
        if digits.is_empty() || rest.char_at(digits.len()) != Some('.') {
            return None;
        }
        // Saturates on markers too long for u64
        let number = digits
            .iter()
            .fold(0u64, |n, d| n.saturating_mul(10).saturating_add(*d));
        (ListKind::Ordered, Some(number), digits.len() + 1)
    };

    if !is_space(rest.get(marker_len)) {
        return None;
    }

    Some(ListItem {
        indent,
        kind,
        number,
        content: rest[marker_len..].trim_ws(),
    })
}

/// Parses `- [ ] todo` / `* [x] done` lines.
pub fn parse_checklist_item(line: &[Unit]) -> Option<ChecklistItem<'_>> {
    let rest = line.trim_start_ws();
    if !is_bullet(rest.first()) {
        return None;
    }
    let rest = &rest[1..];
    if !is_space(rest.first()) {
        return None;
    }
    let rest = rest.trim_start_ws();

    let checked = match (rest.char_at(0), rest.char_at(1), rest.char_at(2)) {
        (Some('['), Some(' '), Some(']')) => false,
        (Some('['), Some('x' | 'X'), Some(']')) => true,
        _ => return None,
    };
    let after = &rest[3..];
    if !after.is_empty() && !is_space(after.first()) {
        return None;
    }

    Some(ChecklistItem {
        checked,
        content: after.trim_ws(),
    })
}

/// Renders a checkbox list block.
pub fn render_checklist(items: &[ChecklistItem<'_>], renderer: &Renderer<'_>, out: &mut String) {
    out.push_str("<ul style=\"list-style-type:none;\">");
    for item in items {
        out.push_str("<li><input type=\"checkbox\" disabled");
        if item.checked {
            out.push_str(" checked");
        }
        out.push_str("> ");
        renderer.render_inline(item.content, out);
        out.push_str("</li>");
    }
    out.push_str("</ul>");
}

struct Frame {
    indent: usize,
    kind: ListKind,
}

/// Renders a nested list block by walking its lines with an indentation stack.
///
/// Frames deeper than the incoming line are closed first (strictly greater
/// indentation only). A line deeper than the remaining top opens a nested list
/// inside the still-open item; a line at the top's indentation is a sibling.
pub fn render_list(items: &[ListItem<'_>], renderer: &Renderer<'_>, out: &mut String) {
    let mut stack: Vec<Frame> = Vec::new();

    for item in items {
        while let Some(top) = stack.last() {
            if top.indent <= item.indent {
                break;
            }
            close_frame(top, out);
            stack.pop();
        }

        match stack.last() {
            Some(top) if top.indent >= item.indent => out.push_str("</li>"),
            _ => {
                out.push('<');
                out.push_str(item.kind.tag());
                out.push('>');
                stack.push(Frame {
                    indent: item.indent,
                    kind: item.kind,
                });
            }
        }

        match (item.kind, item.number) {
            (ListKind::Ordered, Some(number)) => {
                out.push_str("<li value=\"");
                out.push_str(&number.to_string());
                out.push_str("\">");
            }
            _ => out.push_str("<li>"),
        }
        renderer.render_inline(item.content, out);
    }

    while let Some(frame) = stack.pop() {
        close_frame(&frame, out);
    }
}

fn close_frame(frame: &Frame, out: &mut String) {
    out.push_str("</li></");
    out.push_str(frame.kind.tag());
    out.push('>');
}
