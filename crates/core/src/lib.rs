#![deny(missing_docs)]
//! mdtag core: converts a constrained markdown dialect into an HTML fragment.

/// Block classification and the block tree.
pub mod block;
/// Core error and diagnostic types.
pub mod error;
/// Backslash escape extraction.
pub mod escape;
/// HTML rendering of blocks and atoms.
pub mod html;
/// Inline formatting (emphasis, strike, links, images, autolinks).
pub mod inline;
/// Ordered, unordered and checkbox lists.
pub mod list;
/// Code fences and code spans.
pub mod literal;
/// Link, image and autolink syntax.
pub mod media;
/// Conversion options.
pub mod options;
/// Conversion entry points and text transform hooks.
pub mod pipeline;
/// Blockquote tree construction.
pub mod quote;
/// Heading slug generation.
pub mod slug;
/// Pipe tables.
pub mod table;
/// Token arena and unit stream.
pub mod token;

pub use error::{ConvertError, Diagnostics, ParseWarning, SourceLocation};
pub use options::{ConvertOptions, DEFAULT_MAX_QUOTE_DEPTH};
pub use pipeline::{Conversion, Pipeline, TextTransform, convert_markdown_to_html, try_convert};
pub use slug::{Slugger, extract_custom_id, slugify};
