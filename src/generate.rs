//! HTML site generation.
//!
//! Stage 2 of the build pipeline. Takes the scan manifest, runs every stream
//! document through its template, and writes the static site.
//!
//! ## Generated Files
//!
//! - **Article pages** (`/{slug}` or `/{name}`): one per help article
//! - **Home page** (`/index.html`): from the home page document
//! - **Redirect table** (`/_redirects`): `/{from} /{to} {status}` per line,
//!   only written when at least one page declares redirects; `%` and whitespace
//!   in paths are percent-encoded so every line keeps three fields
//!
//! Page paths are used verbatim, so an article with slug `reset-password` is
//! written to `dist/reset-password` with no extension, the way the hosting
//! layer serves it. A path ending in `/` is written as `index.html` inside
//! that directory.
//!
//! ## Rendering
//!
//! Documents render in parallel on the rayon pool; nothing is written until
//! every page has rendered and no two pages claim the same path. Reports keep
//! manifest order regardless of scheduling.
//!
//! ## CSS
//!
//! `static/style.css` is embedded at compile time and prefixed with CSS custom
//! properties generated from `[colors]` in config.

use crate::config::{self, SiteConfig};
use crate::head::HeadConfig;
use crate::scan::{Manifest, StreamBatch, StreamDocument, document_id};
use crate::templates::article::ArticleTemplate;
use crate::templates::home::HomeTemplate;
use crate::templates::{
    RenderProps, Template, TemplateError, TemplateKind, base_document, check_output_path,
};
use rayon::prelude::*;
use std::collections::HashMap;
use std::fs;
use std::path::{Component, Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Invalid {stream} document from {source_file}: {error}")]
    Document {
        stream: String,
        source_file: String,
        error: serde_json::Error,
    },
    #[error(transparent)]
    Template(#[from] TemplateError),
    #[error("Documents {first} and {second} both map to path '{path}'")]
    DuplicatePath {
        path: String,
        first: String,
        second: String,
    },
}

const CSS_STATIC: &str = include_str!("../static/style.css");

/// A rendered page, ready to write.
#[derive(Debug, Clone)]
pub struct RenderedPage {
    pub template: TemplateKind,
    pub document_id: String,
    /// Head title, used for reporting.
    pub title: String,
    pub path: String,
    pub redirects: Vec<String>,
    pub html: String,
}

/// What a generate run produced.
#[derive(Debug, Default)]
pub struct GenerateReport {
    pub pages: Vec<PageSummary>,
    /// Redirect table file name, when one was written.
    pub redirects_file: Option<String>,
}

impl GenerateReport {
    pub fn redirect_count(&self) -> usize {
        self.pages.iter().map(|p| p.redirects.len()).sum()
    }
}

#[derive(Debug, Clone)]
pub struct PageSummary {
    pub template: TemplateKind,
    pub document_id: String,
    pub title: String,
    pub path: String,
    pub redirects: Vec<String>,
}

impl From<&RenderedPage> for PageSummary {
    fn from(page: &RenderedPage) -> Self {
        Self {
            template: page.template,
            document_id: page.document_id.clone(),
            title: page.title.clone(),
            path: page.path.clone(),
            redirects: page.redirects.clone(),
        }
    }
}

/// Read a scan manifest and write the site into `output_dir`.
pub fn generate(manifest_path: &Path, output_dir: &Path) -> Result<GenerateReport, GenerateError> {
    let manifest_content = fs::read_to_string(manifest_path)?;
    let manifest: Manifest = serde_json::from_str(&manifest_content)?;
    generate_from_manifest(&manifest, output_dir)
}

/// Render and write an in-memory manifest.
pub fn generate_from_manifest(
    manifest: &Manifest,
    output_dir: &Path,
) -> Result<GenerateReport, GenerateError> {
    let pages = render_site(manifest)?;
    write_site(&pages, &manifest.config, output_dir)
}

/// Render every page in memory and check that paths are unique.
///
/// Used directly by `check`, which validates without writing.
pub fn render_site(manifest: &Manifest) -> Result<Vec<RenderedPage>, GenerateError> {
    let css = format!(
        "{}\n\n{}",
        config::generate_color_css(&manifest.config.colors),
        CSS_STATIC
    );

    let mut pages = Vec::with_capacity(manifest.document_count());
    for batch in &manifest.streams {
        let rendered = match batch.template {
            TemplateKind::Article => render_batch(&ArticleTemplate, batch, &manifest.config, &css)?,
            TemplateKind::Home => render_batch(&HomeTemplate, batch, &manifest.config, &css)?,
        };
        pages.extend(rendered);
    }

    check_unique_paths(&pages)?;
    Ok(pages)
}

fn render_batch<T: Template>(
    template: &T,
    batch: &StreamBatch,
    site: &SiteConfig,
    css: &str,
) -> Result<Vec<RenderedPage>, GenerateError> {
    let kind = batch.template;
    batch
        .documents
        .par_iter()
        .map(|doc| render_document(template, kind, doc, site, css))
        .collect()
}

fn render_document<T: Template>(
    template: &T,
    kind: TemplateKind,
    doc: &StreamDocument,
    site: &SiteConfig,
    css: &str,
) -> Result<RenderedPage, GenerateError> {
    let stream = &template.config().stream;
    let document: T::Document =
        serde_json::from_value(doc.data.clone()).map_err(|error| GenerateError::Document {
            stream: stream.id.to_string(),
            source_file: doc.source.clone(),
            error,
        })?;
    let id = document_id(&doc.data).unwrap_or_else(|| doc.source.clone());

    let path = template.path(&document)?;
    check_output_path(&id, &path)?;
    let redirects = template.redirects(&document);
    for redirect in &redirects {
        check_output_path(&id, redirect)?;
    }

    let props = RenderProps::new(&document, &path, site);
    let mut head: HeadConfig = template.head(&props);
    head.tags.extend(site.head.tags.iter().cloned());
    let lang = stream.localization.locales.first().copied().unwrap_or("en");
    let html = base_document(lang, &head, css, template.render(&props)).into_string();

    Ok(RenderedPage {
        template: kind,
        document_id: id,
        title: head.title,
        path,
        redirects,
        html,
    })
}

/// Pages collide when they land on the same file, so `guides/` and
/// `guides/index.html` (or `x` and `./x`) are duplicates.
fn check_unique_paths(pages: &[RenderedPage]) -> Result<(), GenerateError> {
    let mut seen: HashMap<PathBuf, &str> = HashMap::new();
    for page in pages {
        if let Some(first) = seen.insert(file_key(&page.path), &page.document_id) {
            return Err(GenerateError::DuplicatePath {
                path: page.path.clone(),
                first: first.to_string(),
                second: page.document_id.clone(),
            });
        }
    }
    Ok(())
}

/// Output file of `path` relative to the output root, without `.` segments.
fn file_key(path: &str) -> PathBuf {
    output_file(Path::new(""), path)
        .components()
        .filter(|c| !matches!(c, Component::CurDir))
        .collect()
}

/// File a page path is written to.
pub fn output_file(output_dir: &Path, path: &str) -> PathBuf {
    if path.ends_with('/') {
        output_dir.join(path).join("index.html")
    } else {
        output_dir.join(path)
    }
}

/// The redirect table, one line per redirect in page order.
pub fn redirect_lines(pages: &[RenderedPage], status: u16) -> Vec<String> {
    pages
        .iter()
        .flat_map(|page| {
            page.redirects.iter().map(move |from| {
                format!(
                    "/{} /{} {}",
                    encode_redirect_path(from.trim_start_matches('/')),
                    encode_redirect_path(page.path.trim_start_matches('/')),
                    status
                )
            })
        })
        .collect()
}

/// Percent-encode the characters that would break a whitespace-separated
/// redirect line. `%` is encoded too so existing escapes stay literal.
fn encode_redirect_path(path: &str) -> String {
    let mut out = String::with_capacity(path.len());
    for c in path.chars() {
        if c == '%' || c.is_whitespace() {
            let mut buf = [0; 4];
            for byte in c.encode_utf8(&mut buf).bytes() {
                out.push_str(&format!("%{:02X}", byte));
            }
        } else {
            out.push(c);
        }
    }
    out
}

fn write_site(
    pages: &[RenderedPage],
    site: &SiteConfig,
    output_dir: &Path,
) -> Result<GenerateReport, GenerateError> {
    fs::create_dir_all(output_dir)?;

    for page in pages {
        let file = output_file(output_dir, &page.path);
        if let Some(parent) = file.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&file, &page.html)?;
    }

    let lines = redirect_lines(pages, site.redirects.status);
    let redirects_file = if lines.is_empty() {
        None
    } else {
        let mut content = lines.join("\n");
        content.push('\n');
        fs::write(output_dir.join(&site.redirects.file), content)?;
        Some(site.redirects.file.clone())
    };

    Ok(GenerateReport {
        pages: pages.iter().map(PageSummary::from).collect(),
        redirects_file,
    })
}

// ============================================================================
// Tests
// ============================================================================
