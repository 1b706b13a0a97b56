//! Rendering of serialized rich-text documents.
//!
//! Article bodies come from the knowledge graph as a JSON node tree:
//!
//! ```json
//! { "root": { "type": "root", "children": [
//!     { "type": "paragraph", "children": [
//!         { "type": "text", "text": "Hello", "format": 1 }
//!     ] }
//! ] } }
//! ```
//!
//! Text `format` is a bitmask; see the `FORMAT_*` constants. Unknown node types
//! render their children so new node kinds degrade to plain content.

use maud::{Markup, PreEscaped, html};
use pulldown_cmark::{Parser, html as md_html};
use serde_json::Value;

const FORMAT_BOLD: u64 = 1;
const FORMAT_ITALIC: u64 = 1 << 1;
const FORMAT_STRIKETHROUGH: u64 = 1 << 2;
const FORMAT_UNDERLINE: u64 = 1 << 3;
const FORMAT_CODE: u64 = 1 << 4;
const FORMAT_SUBSCRIPT: u64 = 1 << 5;
const FORMAT_SUPERSCRIPT: u64 = 1 << 6;

/// Render a serialized rich-text document. Accepts either the wrapper object
/// with a `root` key or a bare root node.
pub fn render(document: &Value) -> Markup {
    let root = document.get("root").unwrap_or(document);
    render_children(root)
}

/// Render Markdown to HTML.
pub fn render_markdown(source: &str) -> Markup {
    let parser = Parser::new(source);
    let mut body_html = String::new();
    md_html::push_html(&mut body_html, parser);
    PreEscaped(body_html)
}

fn children(node: &Value) -> &[Value] {
    node.get("children")
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or(&[])
}

fn render_children(node: &Value) -> Markup {
    html! {
        @for child in children(node) {
            (render_node(child))
        }
    }
}

fn render_node(node: &Value) -> Markup {
    let kind = node.get("type").and_then(Value::as_str).unwrap_or_default();
    match kind {
        "text" | "code-highlight" | "tab" => render_text(node),
        "linebreak" => html! { br; },
        "horizontalrule" => html! { hr; },
        "paragraph" => html! { p { (render_children(node)) } },
        "heading" => render_heading(node),
        "quote" => html! { blockquote { (render_children(node)) } },
        "code" => html! { pre { code { (render_children(node)) } } },
        "list" => {
            let ordered = node.get("listType").and_then(Value::as_str) == Some("number");
            if ordered {
                html! { ol { (render_children(node)) } }
            } else {
                html! { ul { (render_children(node)) } }
            }
        }
        "listitem" => html! { li { (render_children(node)) } },
        "link" | "autolink" => match node.get("url").and_then(Value::as_str) {
            Some(url) if is_safe_url(url) => html! { a href=(url) { (render_children(node)) } },
            _ => render_children(node),
        },
        _ => render_children(node),
    }
}

fn render_heading(node: &Value) -> Markup {
    let content = render_children(node);
    match node.get("tag").and_then(Value::as_str) {
        Some("h1") => html! { h1 { (content) } },
        Some("h2") => html! { h2 { (content) } },
        Some("h3") => html! { h3 { (content) } },
        Some("h4") => html! { h4 { (content) } },
        Some("h5") => html! { h5 { (content) } },
        _ => html! { h6 { (content) } },
    }
}

fn render_text(node: &Value) -> Markup {
    let text = node.get("text").and_then(Value::as_str).unwrap_or_default();
    let format = node.get("format").and_then(Value::as_u64).unwrap_or(0);

    let mut out = html! { (text) };
    // Innermost first, so bold wraps everything else.
    if format & FORMAT_CODE != 0 {
        out = html! { code { (out) } };
    }
    if format & FORMAT_SUBSCRIPT != 0 {
        out = html! { sub { (out) } };
    }
    if format & FORMAT_SUPERSCRIPT != 0 {
        out = html! { sup { (out) } };
    }
    if format & FORMAT_UNDERLINE != 0 {
        out = html! { u { (out) } };
    }
    if format & FORMAT_STRIKETHROUGH != 0 {
        out = html! { s { (out) } };
    }
    if format & FORMAT_ITALIC != 0 {
        out = html! { em { (out) } };
    }
    if format & FORMAT_BOLD != 0 {
        out = html! { strong { (out) } };
    }
    out
}

fn is_safe_url(url: &str) -> bool {
    let scheme = url.trim_start().to_ascii_lowercase();
    !(scheme.starts_with("javascript:")
        || scheme.starts_with("vbscript:")
        || scheme.starts_with("data:"))
}
