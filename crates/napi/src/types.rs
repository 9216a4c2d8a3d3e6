use mdtag_core::{ConvertOptions, ParseWarning};
use napi_derive::napi;

/// Conversion options accepted from JavaScript. Unset fields keep their defaults.
#[napi(object)]
#[derive(Debug, Clone, Default)]
pub struct ConvertConfig {
    /// Emit slug `id` attributes on headings.
    pub heading_ids: Option<bool>,
    /// Maximum blockquote nesting (at least 1).
    pub max_quote_depth: Option<u32>,
    /// Language class for fences without a tag.
    pub default_code_language: Option<String>,
    /// Add `target="_blank"` to links.
    pub link_target_blank: Option<bool>,
}

impl From<ConvertConfig> for ConvertOptions {
    fn from(config: ConvertConfig) -> Self {
        let defaults = ConvertOptions::default();
        ConvertOptions {
            heading_ids: config.heading_ids.unwrap_or(defaults.heading_ids),
            max_quote_depth: config
                .max_quote_depth
                .map_or(defaults.max_quote_depth, |depth| depth as usize),
            default_code_language: config
                .default_code_language
                .unwrap_or(defaults.default_code_language),
            link_target_blank: config
                .link_target_blank
                .unwrap_or(defaults.link_target_blank),
        }
    }
}

/// Parse warning returned from Rust
#[napi(object)]
#[derive(Debug, Clone)]
pub struct WarningEntry {
    /// Warning type (e.g., "unclosed_code_fence")
    pub kind: String,
    /// Line number, when the warning maps to a position
    pub line: Option<u32>,
    /// Column number, when the warning maps to a position
    pub column: Option<u32>,
    /// Human-readable message
    pub message: String,
}

impl From<&ParseWarning> for WarningEntry {
    fn from(warning: &ParseWarning) -> Self {
        let location = warning.location();
        WarningEntry {
            kind: warning.kind().to_string(),
            line: location.map(|l| l.line as u32),
            column: location.map(|l| l.column as u32),
            message: warning.to_string(),
        }
    }
}

/// HTML plus the warnings collected while converting.
#[napi(object)]
#[derive(Debug, Clone)]
pub struct ConversionResult {
    /// Rendered HTML fragment.
    pub html: String,
    /// Non-fatal warnings, in discovery order.
    pub warnings: Vec<WarningEntry>,
}

impl From<mdtag_core::Conversion> for ConversionResult {
    fn from(conversion: mdtag_core::Conversion) -> Self {
        ConversionResult {
            warnings: conversion
                .diagnostics
                .warnings
                .iter()
                .map(WarningEntry::from)
                .collect(),
            html: conversion.html,
        }
    }
}
