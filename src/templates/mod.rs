//! Page templates.
//!
//! A template binds one stream of documents to one kind of page. For every
//! document in its stream the generate stage asks the template, in order, for:
//!
//! 1. [`Template::path`]: where the page is written, relative to the output root
//! 2. [`Template::redirects`]: legacy paths that should forward to it
//! 3. [`Template::head`]: `<head>` metadata
//! 4. [`Template::render`]: the `<body>` content
//!
//! All four are pure functions of the document (plus site config for the last
//! two). Templates never touch the filesystem.
//!
//! | Template | Stream | Path |
//! |----------|--------|------|
//! | [`article::ArticleTemplate`] | `helpArticle` | `slug`, else `name` |
//! | [`home::HomeTemplate`] | `home` | `index.html` |

pub mod article;
pub mod components;
pub mod home;

use crate::config::SiteConfig;
use crate::head::{HeadConfig, render_head};
use crate::stream::TemplateConfig;
use maud::{DOCTYPE, Markup, html};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::path::{Component, Path};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TemplateError {
    #[error("document {id} has neither a slug nor a name to derive its path from")]
    MissingPath { id: String },
    #[error("document {id} maps to unsafe output path '{path}'")]
    UnsafePath { id: String, path: String },
}

/// Inputs to [`Template::head`] and [`Template::render`].
pub struct RenderProps<'a, D> {
    pub document: &'a D,
    /// The page's own path, as returned by [`Template::path`].
    pub path: &'a str,
    /// `../` once per directory level of `path`; empty at the root.
    pub relative_prefix_to_root: String,
    pub site: &'a SiteConfig,
}

impl<'a, D> RenderProps<'a, D> {
    pub fn new(document: &'a D, path: &'a str, site: &'a SiteConfig) -> Self {
        Self {
            document,
            path,
            relative_prefix_to_root: relative_prefix_to_root(path),
            site,
        }
    }
}

pub trait Template: Sync {
    /// Typed view the raw stream document is deserialized into.
    type Document: DeserializeOwned + Send;

    fn config(&self) -> &'static TemplateConfig;

    fn path(&self, document: &Self::Document) -> Result<String, TemplateError>;

    fn redirects(&self, _document: &Self::Document) -> Vec<String> {
        Vec::new()
    }

    fn head(&self, props: &RenderProps<'_, Self::Document>) -> HeadConfig;

    fn render(&self, props: &RenderProps<'_, Self::Document>) -> Markup;
}

/// The registered templates. Serialized into the scan manifest so the
/// generate stage knows which template each stream batch belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TemplateKind {
    Article,
    Home,
}

impl TemplateKind {
    pub const ALL: [TemplateKind; 2] = [TemplateKind::Article, TemplateKind::Home];

    pub fn config(self) -> &'static TemplateConfig {
        match self {
            TemplateKind::Article => &article::CONFIG,
            TemplateKind::Home => &home::CONFIG,
        }
    }
}

/// `../` repeated once per `/` in the path.
///
/// ```text
/// "index.html"        → ""
/// "reset-password"    → ""
/// "guides/reset"      → "../"
/// "guides/"           → "../"   (written as guides/index.html)
/// ```
pub fn relative_prefix_to_root(path: &str) -> String {
    "../".repeat(path.matches('/').count())
}

/// Reject output paths that are empty, absolute, or climb out of the output
/// directory.
pub fn check_output_path(id: &str, path: &str) -> Result<(), TemplateError> {
    let unsafe_path = || TemplateError::UnsafePath {
        id: id.to_string(),
        path: path.to_string(),
    };
    if path.trim().is_empty() || path.starts_with('/') || path.starts_with('\\') {
        return Err(unsafe_path());
    }
    let all_normal = Path::new(path)
        .components()
        .all(|c| matches!(c, Component::Normal(_) | Component::CurDir));
    if !all_normal {
        return Err(unsafe_path());
    }
    Ok(())
}

/// Renders the full HTML document around a page body.
pub fn base_document(lang: &str, head: &HeadConfig, css: &str, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang=(lang) {
            (render_head(head, css))
            body {
                (content)
            }
        }
    }
}
