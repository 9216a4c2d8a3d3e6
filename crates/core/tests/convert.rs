use insta::assert_snapshot;
use mdtag_core::escape::ESCAPABLE;
use mdtag_core::{ConvertOptions, ParseWarning, Pipeline, convert_markdown_to_html, try_convert};

fn with_options(source: &str, options: ConvertOptions) -> String {
    Pipeline::new(options).convert(source)
}

#[test]
fn strong_and_emphasis() {
    assert_snapshot!(convert_markdown_to_html("**bold** _em_"), @"<p><strong>bold</strong> <em>em</em></p>");
    assert_snapshot!(convert_markdown_to_html("~~old~~ ***new***"), @"<p><del>old</del> <strong><em>new</em></strong></p>");
}

#[test]
fn paragraphs_headings_and_rules() {
    assert_snapshot!(convert_markdown_to_html("# Title\n\nSome text\nmore text\n\n---"), @r"
    <h1>Title</h1>
    <p>Some text<br>more text</p>
    <hr>
    ");
}

#[test]
fn checkbox_list() {
    assert_snapshot!(convert_markdown_to_html("- [x] done\n- [ ] todo"), @r#"<ul style="list-style-type:none;"><li><input type="checkbox" disabled checked> done</li><li><input type="checkbox" disabled> todo</li></ul>"#);
}

#[test]
fn nested_lists() {
    assert_snapshot!(
        convert_markdown_to_html("1. one\n2. two\n   - nested\n3. three"),
        @r#"<ol><li value="1">one</li><li value="2">two<ul><li>nested</li></ul></li><li value="3">three</li></ol>"#
    );
}

#[test]
fn list_depth_follows_indent_steps() {
    assert_snapshot!(
        convert_markdown_to_html("- a\n  - b\n    - c\n    - d"),
        @"<ul><li>a<ul><li>b<ul><li>c</li><li>d</li></ul></li></ul></li></ul>"
    );
}

#[test]
fn shallower_item_below_a_deep_start_opens_a_new_list() {
    assert_snapshot!(
        convert_markdown_to_html("    - a\n  - b"),
        @"<ul><li>a</li></ul><ul><li>b</li></ul>"
    );
}

#[test]
fn long_ordered_markers_keep_their_number() {
    assert_snapshot!(
        convert_markdown_to_html("1234567890. big"),
        @r#"<ol><li value="1234567890">big</li></ol>"#
    );
}

#[test]
fn table_alignment() {
    assert_snapshot!(
        convert_markdown_to_html("| Name | Qty |\n|:---|---:|\n| a | 1 |"),
        @r#"<table><thead><tr><th style="text-align:left">Name</th><th style="text-align:right">Qty</th></tr></thead><tbody><tr><td style="text-align:left">a</td><td style="text-align:right">1</td></tr></tbody></table>"#
    );
}

#[test]
fn pipe_block_without_alignment_row_stays_text() {
    assert_snapshot!(convert_markdown_to_html("| a | b |\n| c | d |"), @"<p>| a | b |<br>| c | d |</p>");
}

#[test]
fn fenced_code_block() {
    assert_snapshot!(
        convert_markdown_to_html("```js\nconsole.log(1)\n```"),
        @r#"<pre class="language-js"><code>console.log(1)</code></pre>"#
    );
    assert_snapshot!(
        convert_markdown_to_html("```\nif a < b && c {}\n```"),
        @r#"<pre class="language-plaintext"><code>if a &lt; b &amp;&amp; c {}</code></pre>"#
    );
}

#[test]
fn fence_dedents_and_keeps_markdown_literal() {
    let html = convert_markdown_to_html("```md\n    # not a heading\n      **kept**\n```");
    assert_eq!(
        html,
        "<pre class=\"language-md\"><code># not a heading\n  **kept**</code></pre>"
    );
}

#[test]
fn text_after_closing_fence_is_not_a_paragraph() {
    assert_snapshot!(
        convert_markdown_to_html("```\ncode\n``` tail"),
        @r#"<pre class="language-plaintext"><code>code</code></pre> tail"#
    );
}

#[test]
fn inline_code_is_escaped_not_formatted() {
    assert_snapshot!(convert_markdown_to_html("Use `<div>` and `*x*`"), @"<p>Use <code>&lt;div&gt;</code> and <code>*x*</code></p>");
}

#[test]
fn escapes_suppress_syntax() {
    assert_snapshot!(convert_markdown_to_html(r"\# not a heading"), @"<p># not a heading</p>");
    assert_snapshot!(convert_markdown_to_html(r"\*literal\* and \`tick\`"), @"<p>*literal* and `tick`</p>");
}

#[test]
fn every_escapable_character_comes_back_verbatim() {
    for c in ESCAPABLE {
        assert_eq!(
            convert_markdown_to_html(&format!("\\{c}")),
            format!("<p>{c}</p>"),
            "escape of {c:?}"
        );
        assert_eq!(
            convert_markdown_to_html(&format!("a \\{c} b")),
            format!("<p>a {c} b</p>"),
            "escape of {c:?} inside prose"
        );
    }
}

#[test]
fn entity_encoded_quote_nesting() {
    assert_snapshot!(
        convert_markdown_to_html("&gt; x\n&gt;&gt;&gt; a"),
        @"<blockquote><p>x</p><blockquote><blockquote><p>a</p></blockquote></blockquote></blockquote>"
    );
}

#[test]
fn quote_lines_become_separate_blocks() {
    assert_snapshot!(
        convert_markdown_to_html("&gt; a\n&gt; b"),
        @"<blockquote><p>a</p><p>b</p></blockquote>"
    );
}

#[test]
fn raw_quote_with_blank_line_and_lazy_continuation() {
    assert_snapshot!(
        convert_markdown_to_html("> a\n>\n> b\nlazy"),
        @"<blockquote><p>a</p><br><p>b</p><p>lazy</p></blockquote>"
    );
}

#[test]
fn quoted_content_is_parsed_as_markdown() {
    assert_snapshot!(
        convert_markdown_to_html("> ## Note\n> - one\n> - two"),
        @"<blockquote><h2>Note</h2><ul><li>one</li></ul><ul><li>two</li></ul></blockquote>"
    );
}

#[test]
fn empty_nested_quote_collapses() {
    assert_snapshot!(
        convert_markdown_to_html("> a\n>>\n> b"),
        @"<blockquote><p>a</p><br><p>b</p></blockquote>"
    );
}

#[test]
fn links_images_and_autolinks() {
    assert_snapshot!(
        convert_markdown_to_html("See [docs](https://example.com \"Docs\") and ![logo](logo.png)"),
        @r#"<p>See <a href="https://example.com" title="Docs" target="_blank">docs</a> and <img src="logo.png" alt="logo" style="max-width:100%;"></p>"#
    );
    assert_snapshot!(
        convert_markdown_to_html("Visit <https://example.com>."),
        @r#"<p>Visit <a href="https://example.com" target="_blank">https://example.com</a>.</p>"#
    );
}

#[test]
fn html_lines_pass_through() {
    assert_snapshot!(convert_markdown_to_html("<div class=\"note\">\nhello\n</div>"), @r#"
    <div class="note">
    <p>hello</p>
    </div>
    "#);
}

#[test]
fn whitespace_handling() {
    assert_eq!(convert_markdown_to_html(""), "");
    assert_eq!(convert_markdown_to_html("   indented prose"), "<p>indented prose</p>");
    assert_eq!(convert_markdown_to_html("a\r\nb"), "<p>a<br>b</p>");
}

#[test]
fn conversion_is_pure() {
    let source = "# T\n\n> q\n\n- a\n  - b\n\n| x |\n|---|\n| 1 |\n\n```\ncode\n```";
    let first = convert_markdown_to_html(source);
    assert_eq!(first, convert_markdown_to_html(source));
}

#[test]
fn converting_plain_output_again_is_stable() {
    let once = convert_markdown_to_html("just some prose");
    assert_eq!(once, "<p>just some prose</p>");
    assert_eq!(convert_markdown_to_html(&once), once);
    assert_eq!(convert_markdown_to_html(&convert_markdown_to_html(&once)), once);
}

#[test]
fn deeply_nested_links_do_not_overflow() {
    let depth = 5000;
    let source = format!("{}x{}", "[".repeat(depth), "](u)".repeat(depth));
    let html = convert_markdown_to_html(&source);
    assert!(html.starts_with("<p><a href=\"u\""));
    assert!(html.ends_with("</a></p>"));
}

#[test]
fn unmatched_emphasis_runs_stay_literal() {
    let source = "**x ".repeat(20000);
    assert_eq!(convert_markdown_to_html(&source), format!("<p>{}</p>", source.trim_end()));
}

#[test]
fn heading_ids() {
    let options = ConvertOptions {
        heading_ids: true,
        ..Default::default()
    };
    assert_snapshot!(with_options("# Intro\n## Intro\n### Setup {#install}", options), @r#"
    <h1 id="intro">Intro</h1>
    <h2 id="intro-1">Intro</h2>
    <h3 id="install">Setup</h3>
    "#);
}

#[test]
fn quote_depth_cap() {
    let options = ConvertOptions {
        max_quote_depth: 2,
        ..Default::default()
    };
    let conversion = try_convert(">>> deep", options).unwrap();
    assert_snapshot!(conversion.html, @"<blockquote><blockquote><p>deep</p></blockquote></blockquote>");
    assert_eq!(
        conversion.diagnostics.warnings,
        vec![ParseWarning::QuoteDepthExceeded { found: 3, limit: 2 }]
    );
}

#[test]
fn links_without_target() {
    let options = ConvertOptions {
        link_target_blank: false,
        ..Default::default()
    };
    assert_snapshot!(with_options("[a](b)", options), @r#"<p><a href="b">a</a></p>"#);
}
