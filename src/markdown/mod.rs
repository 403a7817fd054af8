//! Regex-sequenced conversion of the README markdown subset to HTML.
//!
//! Code is tokenized first: fenced blocks and inline spans are lifted out
//! behind control-character placeholders before any other rule runs, so the
//! emphasis/link passes can never corrupt code content. The placeholders are
//! restored verbatim at the end. All other rules run in a fixed order; the
//! order matters because later rules must not re-match text produced by
//! earlier ones. Unmatched or unusual syntax passes through as literal text;
//! there is no parse-failure state.

use once_cell::sync::Lazy;
use regex::Regex;

static FRONTMATTER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)\A---\s*\n.*?\n---\s*\n").unwrap());

static FENCED_CODE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)```(\w+)?\n(.*?)```").unwrap());

static INLINE_CODE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"`([^`\n]+)`").unwrap());

static MD_IMAGE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"!\[([^\]]*)\]\(([^)]+)\)").unwrap());

static HTML_IMAGE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)<img[^>]+>").unwrap());

static H4_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)^#### (.+)$").unwrap());
static H3_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)^### (.+)$").unwrap());
static H2_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)^## (.+)$").unwrap());
static H1_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)^# (.+)$").unwrap());

static BOLD_ITALIC_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)\*\*\*(.+?)\*\*\*").unwrap());
static BOLD_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)\*\*(.+?)\*\*").unwrap());
static BOLD_UNDERSCORE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)__(.+?)__").unwrap());
// Single-character emphasis stays within one line so list bullets and stray
// underscores on later lines cannot pair up across line boundaries.
static ITALIC_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\*([^*\n]+)\*").unwrap());
static ITALIC_UNDERSCORE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"_([^_\n]+)_").unwrap());

static LINK_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\[([^\]]+)\]\(([^)]+)\)").unwrap());

static BULLET_ITEM_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)^\s*[-*+] (.+)$").unwrap());
static NUMBERED_ITEM_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)^\s*\d+\. (.+)$").unwrap());
static LIST_RUN_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?:<li>.*</li>\n?)+").unwrap());

static BLOCKQUOTE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)^> (.+)$").unwrap());

static HR_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)^---+$").unwrap());

static TABLE_ROW_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)^\|(.+)\|$").unwrap());
static TD_SPLIT_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"<td>([^|<]+)\|([^<]*)</td>").unwrap());

static PARAGRAPH_SPLIT_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n\n+").unwrap());
static BLOCK_START_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^<(h[1-6]|ul|ol|li|blockquote|pre|hr|table|tr)").unwrap());

// Placeholder frame for lifted code. The control characters cannot occur in
// any later substitution pattern.
const TOKEN_OPEN: char = '\u{1}';
const TOKEN_CLOSE: char = '\u{2}';

/// Convert the supported markdown subset to an HTML fragment.
pub fn render(markdown: &str) -> String {
    let mut blocks: Vec<String> = Vec::new();
    let mut spans: Vec<String> = Vec::new();

    let html = FRONTMATTER_RE.replace(markdown, "").into_owned();

    // Lift code out before any other rule can touch it.
    let html = FENCED_CODE_RE
        .replace_all(&html, |caps: &regex::Captures| {
            let lang = caps.get(1).map_or("", |m| m.as_str());
            let code = escape_html(&caps[2]);
            let token = format!("{TOKEN_OPEN}B{}{TOKEN_CLOSE}", blocks.len());
            blocks.push(format!(
                "<pre><code class=\"language-{lang}\">{code}</code></pre>"
            ));
            token
        })
        .into_owned();
    let html = INLINE_CODE_RE
        .replace_all(&html, |caps: &regex::Captures| {
            let token = format!("{TOKEN_OPEN}I{}{TOKEN_CLOSE}", spans.len());
            spans.push(format!("<code>{}</code>", &caps[1]));
            token
        })
        .into_owned();

    // Image syntax is removed outright (the gallery presents images); doing
    // it before link conversion keeps `![alt](url)` from half-matching the
    // link rule and leaking into the output.
    let html = MD_IMAGE_RE.replace_all(&html, "").into_owned();
    let html = HTML_IMAGE_RE.replace_all(&html, "").into_owned();

    // Headings, longest prefix first.
    let html = H4_RE.replace_all(&html, "<h4>$1</h4>").into_owned();
    let html = H3_RE.replace_all(&html, "<h3>$1</h3>").into_owned();
    let html = H2_RE.replace_all(&html, "<h2>$1</h2>").into_owned();
    let html = H1_RE.replace_all(&html, "<h1>$1</h1>").into_owned();

    let html = BOLD_ITALIC_RE
        .replace_all(&html, "<strong><em>$1</em></strong>")
        .into_owned();
    let html = BOLD_RE.replace_all(&html, "<strong>$1</strong>").into_owned();
    let html = BOLD_UNDERSCORE_RE
        .replace_all(&html, "<strong>$1</strong>")
        .into_owned();
    let html = ITALIC_RE.replace_all(&html, "<em>$1</em>").into_owned();
    let html = ITALIC_UNDERSCORE_RE
        .replace_all(&html, "<em>$1</em>")
        .into_owned();

    let html = LINK_RE
        .replace_all(
            &html,
            "<a href=\"$2\" target=\"_blank\" rel=\"noopener noreferrer\">$1</a>",
        )
        .into_owned();

    // Bullet and numbered items both become <li>; consecutive runs are
    // wrapped in <ul>. Numbering is not preserved.
    let html = BULLET_ITEM_RE.replace_all(&html, "<li>$1</li>").into_owned();
    let html = NUMBERED_ITEM_RE.replace_all(&html, "<li>$1</li>").into_owned();
    let html = LIST_RUN_RE.replace_all(&html, "<ul>$0</ul>").into_owned();

    let html = BLOCKQUOTE_RE
        .replace_all(&html, "<blockquote>$1</blockquote>")
        .into_owned();

    let html = HR_RE.replace_all(&html, "<hr>").into_owned();

    // Single-row table fragments: the whole line becomes one cell, then the
    // remaining interior pipes split it into more cells.
    let mut html = TABLE_ROW_RE
        .replace_all(&html, "<tr><td>$1</td></tr>")
        .into_owned();
    while TD_SPLIT_RE.is_match(&html) {
        html = TD_SPLIT_RE
            .replace_all(&html, "<td>$1</td><td>$2</td>")
            .into_owned();
    }

    // Paragraph segmentation on blank-line runs. Chunks already starting
    // with a block tag (or a lifted code block) pass through unwrapped;
    // inside a paragraph, line breaks collapse to spaces.
    let mut rendered: Vec<String> = Vec::new();
    for chunk in PARAGRAPH_SPLIT_RE.split(&html) {
        let chunk = chunk.trim();
        if chunk.is_empty() {
            continue;
        }
        if BLOCK_START_RE.is_match(chunk)
            || (chunk.starts_with(TOKEN_OPEN) && is_block_token(chunk))
        {
            rendered.push(chunk.to_string());
        } else {
            rendered.push(format!("<p>{}</p>", chunk.replace('\n', " ")));
        }
    }
    let mut html = rendered.join("\n\n");

    // Put the code back, untouched by everything above.
    for (index, snippet) in blocks.iter().enumerate() {
        html = html.replace(&format!("{TOKEN_OPEN}B{index}{TOKEN_CLOSE}"), snippet);
    }
    for (index, snippet) in spans.iter().enumerate() {
        html = html.replace(&format!("{TOKEN_OPEN}I{index}{TOKEN_CLOSE}"), snippet);
    }

    html
}

fn is_block_token(chunk: &str) -> bool {
    chunk[TOKEN_OPEN.len_utf8()..].starts_with('B')
}

fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#039;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn heading_and_emphasis_round_trip() {
        let html = render("# Title\n\nSome **bold** and *italic* text.");
        assert!(html.contains("<h1>Title</h1>"));
        assert!(html.contains("<strong>bold</strong>"));
        assert!(html.contains("<em>italic</em>"));
        assert!(!html.contains('*'));
    }

    #[test]
    fn code_block_content_is_protected_from_emphasis() {
        let html = render("```\n**not-bold**\n```");
        assert!(html.contains("<pre><code class=\"language-\">**not-bold**"));
        assert!(!html.contains("<strong>"));
    }

    #[test]
    fn code_block_language_tag_and_escaping() {
        let html = render("```rust\nif a < b && c > d {}\n```");
        assert!(html.contains("<code class=\"language-rust\">"));
        assert!(html.contains("if a &lt; b &amp;&amp; c &gt; d {}"));
    }

    #[test]
    fn inline_code_span() {
        let html = render("Run `cargo build` first.");
        assert!(html.contains("<p>Run <code>cargo build</code> first.</p>"));
    }

    #[test]
    fn inline_code_is_protected_from_emphasis() {
        let html = render("The `**raw**` marker.");
        assert!(html.contains("<code>**raw**</code>"));
        assert!(!html.contains("<strong>"));
    }

    #[test]
    fn images_are_stripped_entirely() {
        let html = render(
            "Before ![screenshot](docs/shot.png) after\n\n<img src=\"logo.png\" alt=\"x\" />",
        );
        assert!(!html.contains("shot.png"));
        assert!(!html.contains("<img"));
        assert!(!html.contains("!["));
    }

    #[test]
    fn image_with_alt_text_does_not_leak_as_link() {
        let html = render("![alt text](image.png) and [real](https://example.com)");
        assert!(!html.contains("image.png"));
        assert!(html.contains(
            "<a href=\"https://example.com\" target=\"_blank\" rel=\"noopener noreferrer\">real</a>"
        ));
    }

    #[test]
    fn links_open_in_new_context() {
        let html = render("[GitHub](https://github.com)");
        assert!(html.contains(
            "<a href=\"https://github.com\" target=\"_blank\" rel=\"noopener noreferrer\">GitHub</a>"
        ));
    }

    #[test]
    fn bullet_list_items_wrapped_in_ul() {
        let html = render("- one\n- two\n- three");
        assert!(html.contains("<ul><li>one</li>"));
        assert!(html.contains("<li>three</li></ul>"));
    }

    #[test]
    fn numbered_items_render_as_unordered_list() {
        let html = render("1. first\n2. second");
        assert!(html.contains("<ul><li>first</li>"));
        assert!(html.contains("<li>second</li></ul>"));
        assert!(!html.contains("1."));
    }

    #[test]
    fn blockquote_lines() {
        let html = render("> do not panic");
        assert!(html.contains("<blockquote>do not panic</blockquote>"));
    }

    #[test]
    fn horizontal_rule() {
        let html = render("above\n\n-----\n\nbelow");
        assert!(html.contains("<hr>"));
    }

    #[test]
    fn frontmatter_is_removed() {
        let html = render("---\ntitle: my page\nlayout: default\n---\n# Real Heading\n");
        assert!(!html.contains("title: my page"));
        assert!(html.contains("<h1>Real Heading</h1>"));
    }

    #[test]
    fn paragraph_newlines_collapse_to_spaces() {
        let html = render("line one\nline two\n\nsecond paragraph");
        assert!(html.contains("<p>line one line two</p>"));
        assert!(html.contains("<p>second paragraph</p>"));
    }

    #[test]
    fn table_row_splits_into_cells() {
        let html = render("| alpha | beta |");
        assert!(html.contains("<tr><td> alpha </td><td> beta </td></tr>"));
    }

    #[test]
    fn triple_asterisk_is_bold_italic() {
        let html = render("***wow***");
        assert!(html.contains("<strong><em>wow</em></strong>"));
    }

    #[test]
    fn underscore_emphasis() {
        let html = render("__strong__ and _slanted_");
        assert!(html.contains("<strong>strong</strong>"));
        assert!(html.contains("<em>slanted</em>"));
    }

    #[test]
    fn unmatched_syntax_passes_through() {
        let html = render("an **unclosed marker and a ] stray bracket");
        assert!(html.contains("**unclosed marker"));
        assert!(html.contains("] stray bracket"));
    }

    #[test]
    fn standalone_code_block_is_not_wrapped_in_paragraph() {
        let html = render("intro\n\n```\nlet x = 1;\n```\n\noutro");
        assert!(!html.contains("<p><pre>"));
        assert!(html.contains("<pre><code class=\"language-\">let x = 1;"));
    }
}
