//! Level-aware blockquotes.
//!
//! A quote block is every non-blank line from the first quote-marked line up
//! to the next blank line. Each line is classified by its marker count; lines
//! without markers continue the innermost open quote. The tree is built level
//! by level, and every quoted line is parsed again by the block parser on its
//! own, so consecutive quote lines become separate blocks.

use crate::block::{Block, BlockParser};
use crate::error::ParseWarning;
use crate::token::{Unit, UnitsExt};

/// Accepted quote markers: raw and entity-encoded.
const MARKERS: [&str; 2] = [">", "&gt;"];

/// A child of a rendered `<blockquote>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuoteNode<'a> {
    /// Quoted content at the current level.
    Blocks(Vec<Block<'a>>),
    /// An empty quote line (or a nested quote with nothing in it).
    Break,
    /// A deeper quote level.
    Nested(Vec<QuoteNode<'a>>),
}

/// One classified line of a quote block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuoteLine<'a> {
    /// Marker count; continuation lines inherit the previous line's level.
    pub level: usize,
    /// Text after the markers.
    pub content: &'a [Unit],
    /// False for continuation lines.
    pub is_quote: bool,
}

fn strip_marker(line: &[Unit]) -> Option<&[Unit]> {
    MARKERS
        .iter()
        .find_map(|marker| line.strip_prefix_str(marker))
}

/// Whether the line opens with a quote marker.
pub fn is_quote_line(line: &[Unit]) -> bool {
    strip_marker(line.trim_start_ws()).is_some()
}

/// Counts leading markers (whitespace between markers is ignored) and returns
/// the level with the remaining content, minus one separating space.
pub fn classify(line: &[Unit]) -> Option<(usize, &[Unit])> {
    let mut rest = strip_marker(line.trim_start_ws())?;
    let mut level = 1;
    while let Some(after) = strip_marker(rest.trim_start_ws()) {
        rest = after;
        level += 1;
    }
    let content = rest.strip_prefix_str(" ").unwrap_or(rest);
    Some((level, content))
}

impl BlockParser<'_> {
    /// Parses a captured quote block into its top-level children.
    pub(crate) fn parse_quote<'a>(&mut self, lines: &[&'a [Unit]]) -> Vec<QuoteNode<'a>> {
        let mut items = Vec::with_capacity(lines.len());
        let mut current = 1;

        for &line in lines {
            match classify(line) {
                Some((found, content)) => {
                    let limit = self.max_quote_depth.saturating_sub(self.depth).max(1);
                    if found > limit {
                        log::warn!("Quote nested {} levels deep, clamped to {}", found, limit);
                        self.diagnostics
                            .add_warning(ParseWarning::QuoteDepthExceeded { found, limit });
                    }
                    current = found.min(limit);
                    items.push(QuoteLine {
                        level: current,
                        content,
                        is_quote: true,
                    });
                }
                None => items.push(QuoteLine {
                    level: current,
                    content: line,
                    is_quote: false,
                }),
            }
        }

        self.depth += 1;
        let nodes = self.build_level(&items, 1);
        self.depth -= 1;
        nodes
    }

    fn build_level<'a>(&mut self, items: &[QuoteLine<'a>], level: usize) -> Vec<QuoteNode<'a>> {
        let mut nodes = Vec::new();
        let mut i = 0;

        while i < items.len() {
            let item = items[i];

            if item.level > level {
                let end = i + items[i..].iter().take_while(|it| it.level > level).count();
                let nested = self.build_level(&items[i..end], level + 1);
                if matches!(nested.as_slice(), [] | [QuoteNode::Break]) {
                    nodes.push(QuoteNode::Break);
                } else {
                    nodes.push(QuoteNode::Nested(nested));
                }
                i = end;
            } else if item.content.is_blank() {
                nodes.push(QuoteNode::Break);
                i += 1;
            } else {
                nodes.push(QuoteNode::Blocks(self.parse(&[item.content])));
                i += 1;
            }
        }

        nodes
    }
}
