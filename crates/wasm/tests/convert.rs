use mdtag_wasm::{convert, convert_with_diagnostics, hidden_source_style, source_selectors};
use serde::{Deserialize, Serialize};
use wasm_bindgen::JsValue;
use wasm_bindgen_test::*;

#[derive(Deserialize, Debug)]
struct ConversionResult {
    html: String,
    warnings: Vec<WarningEntry>,
}

#[derive(Deserialize, Debug)]
struct WarningEntry {
    kind: String,
    line: Option<usize>,
    column: Option<usize>,
    message: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Options {
    heading_ids: bool,
    max_quote_depth: usize,
}

#[wasm_bindgen_test]
fn convert_without_options() {
    let html = convert("**bold** _em_", JsValue::UNDEFINED).expect("convert should succeed");
    assert_eq!(html, "<p><strong>bold</strong> <em>em</em></p>");
}

#[wasm_bindgen_test]
fn convert_with_camel_case_options() {
    let options = serde_wasm_bindgen::to_value(&Options {
        heading_ids: true,
        max_quote_depth: 8,
    })
    .expect("serialize options");
    let html = convert("# Hello World", options).expect("convert should succeed");
    assert_eq!(html, "<h1 id=\"hello-world\">Hello World</h1>");
}

#[wasm_bindgen_test]
fn invalid_options_are_rejected() {
    let options = serde_wasm_bindgen::to_value(&Options {
        heading_ids: false,
        max_quote_depth: 0,
    })
    .expect("serialize options");
    assert!(convert("x", options).is_err());
}

#[wasm_bindgen_test]
fn diagnostics_report_unclosed_fence() {
    let result = convert_with_diagnostics("text\n```js\nlet a = 1;", JsValue::NULL)
        .expect("convert should succeed");
    let result: ConversionResult =
        serde_wasm_bindgen::from_value(result).expect("deserialize result");

    assert_eq!(
        result.html,
        "<p>text</p>\n<pre class=\"language-js\"><code>let a = 1;</code></pre>"
    );
    assert_eq!(result.warnings.len(), 1);
    let warning = &result.warnings[0];
    assert_eq!(warning.kind, "unclosed_code_fence");
    assert_eq!(warning.line, Some(2));
    assert_eq!(warning.column, Some(1));
    assert!(warning.message.contains("unclosed code fence"));
}

#[wasm_bindgen_test]
fn host_adapter_helpers() {
    let selectors: Vec<String> = source_selectors()
        .iter()
        .filter_map(|v| v.as_string())
        .collect();
    assert_eq!(
        selectors,
        vec!["md", "markdown", "script[type=\"text/markdown\"]"]
    );
    assert_eq!(
        hidden_source_style(),
        "md, markdown, script[type=\"text/markdown\"] { display: none; }"
    );
}
