//! HTML renderer for parsed blocks.
//!
//! Protected atoms are turned into markup only here, so code content is
//! HTML-escaped exactly once and escaped punctuation comes back as itself.

use html_escape::{encode_double_quoted_attribute, encode_text};

use crate::block::Block;
use crate::list::{render_checklist, render_list};
use crate::options::ConvertOptions;
use crate::quote::QuoteNode;
use crate::slug::{Slugger, split_custom_id};
use crate::token::{Atom, AtomId, TokenArena};

/// Renders blocks for one conversion.
pub struct Renderer<'s> {
    pub(crate) arena: &'s TokenArena,
    pub(crate) options: &'s ConvertOptions,
    slugger: Slugger,
}

impl<'s> Renderer<'s> {
    /// Creates a renderer over the conversion's atoms.
    pub fn new(arena: &'s TokenArena, options: &'s ConvertOptions) -> Self {
        Self {
            arena,
            options,
            slugger: Slugger::new(),
        }
    }

    /// Renders top-level blocks, one per line.
    pub fn render_document(&mut self, blocks: &[Block<'_>]) -> String {
        let mut parts = Vec::with_capacity(blocks.len());
        for block in blocks {
            let mut out = String::new();
            self.render_block(block, &mut out);
            parts.push(out);
        }
        parts.join("\n")
    }

    fn render_block(&mut self, block: &Block<'_>, out: &mut String) {
        match block {
            Block::Paragraph(lines) => {
                out.push_str("<p>");
                for (i, line) in lines.iter().enumerate() {
                    if i > 0 {
                        out.push_str("<br>");
                    }
                    self.render_inline(line, out);
                }
                out.push_str("</p>");
            }
            Block::Heading { level, content } => {
                out.push_str(&format!("<h{level}"));
                let mut text = *content;
                if self.options.heading_ids {
                    let (visible, custom) = split_custom_id(*content, self.arena);
                    let id = match custom {
                        Some(id) => {
                            self.slugger.reserve(&id);
                            id
                        }
                        None => self.slugger.slug(&self.arena.plain_text(visible)),
                    };
                    out.push_str(" id=\"");
                    out.push_str(&encode_double_quoted_attribute(&id));
                    out.push('"');
                    text = visible;
                }
                out.push('>');
                self.render_inline(text, out);
                out.push_str(&format!("</h{level}>"));
            }
            Block::Rule => out.push_str("<hr>"),
            Block::Code(id, trailing) => {
                self.write_atom(*id, out);
                self.render_inline(trailing, out);
            }
            Block::Html(line) => self.render_inline(line, out),
            Block::Checklist(items) => render_checklist(items, self, out),
            Block::List(items) => render_list(items, self, out),
            Block::Quote(nodes) => self.render_quote(nodes, out),
            Block::Table(table) => table.render(self, out),
        }
    }

    fn render_quote(&mut self, nodes: &[QuoteNode<'_>], out: &mut String) {
        out.push_str("<blockquote>");
        for node in nodes {
            match node {
                QuoteNode::Blocks(blocks) => {
                    for block in blocks {
                        self.render_block(block, out);
                    }
                }
                QuoteNode::Break => out.push_str("<br>"),
                QuoteNode::Nested(inner) => self.render_quote(inner, out),
            }
        }
        out.push_str("</blockquote>");
    }

    /// Writes the markup for a protected atom.
    pub(crate) fn write_atom(&self, id: AtomId, out: &mut String) {
        match self.arena.get(id) {
            Some(Atom::Escape(c)) => out.push(*c),
            Some(Atom::InlineCode(code)) => {
                out.push_str("<code>");
                out.push_str(&encode_text(code));
                out.push_str("</code>");
            }
            Some(Atom::CodeBlock { lang, body }) => {
                let lang = if lang.is_empty() {
                    self.options.default_code_language.as_str()
                } else {
                    lang.as_str()
                };
                out.push_str("<pre class=\"language-");
                out.push_str(&encode_double_quoted_attribute(lang));
                out.push_str("\"><code>");
                out.push_str(&encode_text(body));
                out.push_str("</code></pre>");
            }
            None => log::warn!("Dangling atom reference {}", id),
        }
    }
}
