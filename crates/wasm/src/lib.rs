use mdtag_core::{ConvertOptions, Pipeline};
use serde::Serialize;
use wasm_bindgen::JsValue;
use wasm_bindgen::prelude::*;

/// Elements the browser adapter collects markdown from, in discovery order.
pub const SOURCE_SELECTORS: [&str; 3] = ["md", "markdown", "script[type=\"text/markdown\"]"];

// ============================================================================
// Options
// ============================================================================

fn parse_options(options: JsValue) -> Result<ConvertOptions, JsError> {
    if options.is_undefined() || options.is_null() {
        return Ok(ConvertOptions::default());
    }
    let options: ConvertOptions = serde_wasm_bindgen::from_value(options)
        .map_err(|e| JsError::new(&format!("Invalid options: {}", e)))?;
    options
        .validate()
        .map_err(|e| JsError::new(&e.to_string()))?;
    Ok(options)
}

// ============================================================================
// Conversion API
// ============================================================================

/// A non-fatal finding reported alongside the HTML.
#[derive(Debug, Clone, Serialize)]
pub struct WarningEntry {
    /// Stable identifier, e.g. `unclosed_code_fence`.
    pub kind: String,
    /// 1-indexed line, when the warning maps to a position.
    pub line: Option<usize>,
    /// 1-indexed column, when the warning maps to a position.
    pub column: Option<usize>,
    /// Human-readable description.
    pub message: String,
}

/// Result of `convertWithDiagnostics`.
#[derive(Debug, Clone, Serialize)]
pub struct ConversionResult {
    /// Rendered HTML fragment.
    pub html: String,
    /// Warnings in discovery order.
    pub warnings: Vec<WarningEntry>,
}

/// Converts markdown into an HTML fragment.
///
/// `options` may be omitted; fields are accepted in camelCase
/// (`headingIds`, `maxQuoteDepth`, `defaultCodeLanguage`, `linkTargetBlank`).
#[wasm_bindgen]
pub fn convert(source: &str, options: JsValue) -> Result<String, JsError> {
    let options = parse_options(options)?;
    Ok(Pipeline::new(options).convert(source))
}

/// Converts markdown and reports recovered problems (unclosed fences, malformed
/// tables, clamped quotes) next to the HTML.
#[wasm_bindgen(js_name = convertWithDiagnostics)]
pub fn convert_with_diagnostics(source: &str, options: JsValue) -> Result<JsValue, JsError> {
    let options = parse_options(options)?;
    let conversion = Pipeline::new(options).convert_with_diagnostics(source);

    let warnings = conversion
        .diagnostics
        .warnings
        .iter()
        .map(|warning| WarningEntry {
            kind: warning.kind().to_string(),
            line: warning.location().map(|l| l.line),
            column: warning.location().map(|l| l.column),
            message: warning.to_string(),
        })
        .collect();

    let result = ConversionResult {
        html: conversion.html,
        warnings,
    };
    serde_wasm_bindgen::to_value(&result)
        .map_err(|e| JsError::new(&format!("Serialization error: {}", e)))
}

// ============================================================================
// Host adapter helpers
// ============================================================================

/// Selectors the page script queries to find markdown sources.
#[wasm_bindgen(js_name = sourceSelectors)]
pub fn source_selectors() -> js_sys::Array {
    SOURCE_SELECTORS.iter().map(|s| JsValue::from_str(s)).collect()
}

/// Stylesheet text that hides source elements until they are replaced.
#[wasm_bindgen(js_name = hiddenSourceStyle)]
pub fn hidden_source_style() -> String {
    format!("{} {{ display: none; }}", SOURCE_SELECTORS.join(", "))
}
