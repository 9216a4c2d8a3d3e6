//! Conversion entry points and source preprocessing hooks.

use std::borrow::Cow;

use crate::block::BlockParser;
use crate::error::{ConvertError, Diagnostics};
use crate::escape::extract_escapes;
use crate::html::Renderer;
use crate::literal::tokenize_literals;
use crate::options::ConvertOptions;
use crate::token::{TokenArena, split_lines};

/// Trait for rewriting the raw markdown source before conversion.
pub trait TextTransform: Send + Sync {
    /// Transform the input text, returning an owned or borrowed string.
    fn transform<'a>(&self, input: &'a str) -> Cow<'a, str>;
}

impl<F> TextTransform for F
where
    F: for<'a> Fn(&'a str) -> Cow<'a, str> + Send + Sync,
{
    fn transform<'a>(&self, input: &'a str) -> Cow<'a, str> {
        (self)(input)
    }
}

/// Rendered HTML together with the warnings collected while producing it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conversion {
    /// The HTML fragment.
    pub html: String,
    /// Non-fatal findings; they never change `html`.
    pub diagnostics: Diagnostics,
}

/// Options plus an ordered list of source transforms.
#[derive(Default)]
pub struct Pipeline {
    options: ConvertOptions,
    text_transforms: Vec<Box<dyn TextTransform>>,
}

impl Pipeline {
    /// Creates a pipeline without validating `options`.
    pub fn new(options: ConvertOptions) -> Self {
        Self {
            options,
            text_transforms: Vec::new(),
        }
    }

    /// Creates a pipeline, rejecting unusable options.
    pub fn try_new(options: ConvertOptions) -> Result<Self, ConvertError> {
        options.validate()?;
        Ok(Self::new(options))
    }

    /// Adds a transform that runs on the raw source, in insertion order.
    pub fn add_text_transform<T: TextTransform + 'static>(&mut self, transform: T) {
        self.text_transforms.push(Box::new(transform));
    }

    /// Converts markdown to an HTML fragment.
    pub fn convert(&self, input: &str) -> String {
        self.convert_with_diagnostics(input).html
    }

    /// Converts markdown and reports what was recovered from along the way.
    pub fn convert_with_diagnostics(&self, input: &str) -> Conversion {
        let mut current = Cow::Borrowed(input);
        for transform in &self.text_transforms {
            let next = transform.transform(current.as_ref());
            current = Cow::Owned(next.into_owned());
        }

        let mut arena = TokenArena::new();
        let mut diagnostics = Diagnostics::new();
        let units = extract_escapes(&current, &mut arena);
        let units = tokenize_literals(&units, &mut arena, &mut diagnostics);
        let lines = split_lines(&units);

        let blocks = BlockParser::new(&arena, &self.options, &mut diagnostics).parse(&lines);
        log::trace!(
            "Parsed {} lines into {} blocks ({} atoms)",
            lines.len(),
            blocks.len(),
            arena.len()
        );

        let html = Renderer::new(&arena, &self.options).render_document(&blocks);
        Conversion {
            html: html.trim().to_string(),
            diagnostics,
        }
    }
}

/// Validates `options` and converts `input` with them.
pub fn try_convert(input: &str, options: ConvertOptions) -> Result<Conversion, ConvertError> {
    Ok(Pipeline::try_new(options)?.convert_with_diagnostics(input))
}

/// Converts markdown to an HTML fragment with default options. Never fails.
///
/// ```
/// use mdtag_core::convert_markdown_to_html;
///
/// assert_eq!(
///     convert_markdown_to_html("**bold** _em_"),
///     "<p><strong>bold</strong> <em>em</em></p>"
/// );
/// ```
pub fn convert_markdown_to_html(input: &str) -> String {
    Pipeline::default().convert(input)
}
