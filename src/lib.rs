//! # Help Site
//!
//! A static site generator for a help center. Content arrives as JSON
//! documents exported from a content platform; each document is matched to a
//! page template by its entity type and locale, projected down to the fields
//! that template declares, and rendered to a standalone HTML page.
//!
//! # Architecture: Two-Stage Pipeline
//!
//! ```text
//! 1. Scan      content/  →  manifest.json    (documents → matched, projected streams)
//! 2. Generate  manifest  →  dist/            (final HTML pages + redirect table)
//! ```
//!
//! The manifest is human-readable JSON you can inspect between stages, and each
//! stage is a function from data to data, so unit tests exercise stream
//! matching and rendering without a content directory.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`scan`] | Stage 1: loads documents, matches them to template streams, produces the manifest |
//! | [`generate`] | Stage 2: renders every stream document and writes pages plus `_redirects` |
//! | [`stream`] | Stream declarations: entity-type/locale matching and field projection |
//! | [`templates`] | The `Template` trait and the article and home page templates |
//! | [`document`] | Typed views of the projected documents each template consumes |
//! | [`rich_text`] | Lexical rich-text JSON and Markdown body rendering |
//! | [`head`] | `<head>` descriptors and their rendering |
//! | [`verticals`] | Static navigation descriptors for search-style sections |
//! | [`config`] | `config.toml` loading, validation, merging, and CSS generation |
//! | [`output`] | CLI output formatting for pipeline results |
//!
//! # Design Decisions
//!
//! ## Maud Over Template Engines
//!
//! HTML is generated with [Maud](https://maud.lambda.xyz/). Malformed markup is
//! a build error, template variables are typed Rust expressions, and all
//! interpolation is auto-escaped. Document text comes from an external content
//! platform, so escaping by default matters here.
//!
//! ## Templates Declare Their Inputs
//!
//! Each template carries a static [`stream::TemplateConfig`]: which entity
//! types and locales it accepts and which field paths it reads. The scan stage
//! applies these declarations, so a template only ever sees the fields it
//! asked for.
//!
//! ## Paths Are Verbatim
//!
//! An article with slug `reset-password` is written to `dist/reset-password`,
//! not `reset-password.html`. The hosting layer serves extensionless files, and
//! old URLs are kept alive through the `_redirects` table.

pub mod config;
pub mod document;
pub mod generate;
pub mod head;
pub mod output;
pub mod rich_text;
pub mod scan;
pub mod stream;
pub mod templates;
pub mod verticals;

#[cfg(test)]
pub(crate) mod test_helpers;
