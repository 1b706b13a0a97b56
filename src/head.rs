//! Page `<head>` metadata.
//!
//! Every template returns a [`HeadConfig`] for each document. The generate
//! stage appends the site-wide tags from `config.toml` and renders the result
//! with [`render_head`].

use maud::{Markup, PreEscaped, html};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const DEFAULT_CHARSET: &str = "UTF-8";
pub const DEFAULT_VIEWPORT: &str = "width=device-width, initial-scale=1";

/// Contents of a generated page's `<head>`.
#[derive(Debug, Clone, PartialEq)]
pub struct HeadConfig {
    pub title: String,
    pub charset: String,
    pub viewport: String,
    pub tags: Vec<HeadTag>,
}

impl HeadConfig {
    /// Head with the given title, the standard charset and viewport, and no tags.
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            charset: DEFAULT_CHARSET.to_string(),
            viewport: DEFAULT_VIEWPORT.to_string(),
            tags: Vec::new(),
        }
    }
}

/// An extra `<meta>` or `<link>` element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HeadTag {
    #[serde(rename = "type")]
    pub kind: TagKind,
    /// Attributes render in key order.
    #[serde(default)]
    pub attributes: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TagKind {
    Meta,
    Link,
}

impl TagKind {
    fn element(self) -> &'static str {
        match self {
            TagKind::Meta => "meta",
            TagKind::Link => "link",
        }
    }
}

/// Render a head config and inline stylesheet as a `<head>` element.
pub fn render_head(head: &HeadConfig, css: &str) -> Markup {
    html! {
        head {
            meta charset=(head.charset);
            meta name="viewport" content=(head.viewport);
            title { (head.title) }
            @for tag in &head.tags {
                (render_tag(tag))
            }
            style { (PreEscaped(css)) }
        }
    }
}

/// Maud needs element names at compile time, so void tags with arbitrary
/// attributes are assembled by hand with escaped attribute values.
fn render_tag(tag: &HeadTag) -> Markup {
    let mut out = String::from("<");
    out.push_str(tag.kind.element());
    for (name, value) in &tag.attributes {
        if !is_valid_attribute_name(name) {
            continue;
        }
        out.push(' ');
        out.push_str(name);
        out.push_str("=\"");
        out.push_str(&html! { (value) }.into_string());
        out.push('"');
    }
    out.push('>');
    PreEscaped(out)
}

fn is_valid_attribute_name(name: &str) -> bool {
    !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | ':'))
}
