//! CLI output formatting for all pipeline stages.
//!
//! # Information-First Display
//!
//! Every entity leads with its positional index and display title; file paths
//! and other context follow on indented lines. Documents are shown by name
//! (falling back to their id), pages by head title and output path.
//!
//! # Output Format
//!
//! ## Scan
//!
//! ```text
//! Streams
//! helpArticle (3 documents)
//!     Vertical: Help Articles
//!     001 Reset your password
//!         Source: articles.json
//! home (1 document)
//!     001 Help Home
//!         Source: home.json
//!
//! Unmatched (1 document)
//!     faq-1 (faq)
//!         Source: faqs.json
//!
//! Config
//!     config.toml
//!     documents/
//! ```
//!
//! ## Generate
//!
//! ```text
//! helpArticle
//!     001 Reset your password → reset-password
//!         Redirect: index-old/1001
//! home
//!     001 Help Site Home → index.html
//!
//! Generated 4 pages, 3 redirects → _redirects
//! ```
//!
//! # Architecture
//!
//! Each stage has a `format_*` function (returns `Vec<String>`) for testability
//! and a `print_*` wrapper that writes to stdout. Format functions are pure:
//! no I/O beyond the existence checks in the config section.

use crate::generate::GenerateReport;
use crate::scan::{Manifest, StreamDocument, document_id};
use crate::templates::TemplateKind;
use crate::verticals::{self, Vertical};
use std::path::Path;

// ============================================================================
// Shared helpers
// ============================================================================

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// `1 document`, `3 documents`.
fn count(n: usize, singular: &str) -> String {
    if n == 1 {
        format!("{} {}", n, singular)
    } else {
        format!("{} {}s", n, singular)
    }
}

/// Display title of a projected document: name, then id, then its source file.
fn document_title(doc: &StreamDocument) -> String {
    doc.data
        .get("name")
        .and_then(|v| v.as_str())
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .or_else(|| document_id(&doc.data))
        .unwrap_or_else(|| format!("({})", doc.source))
}

// ============================================================================
// Stage 1: Scan output
// ============================================================================

/// Format scan stage output: streams with their documents, unmatched
/// documents, and the config inputs that were found.
pub fn format_scan_output(manifest: &Manifest, source_root: &Path) -> Vec<String> {
    let mut lines = vec!["Streams".to_string()];

    for batch in &manifest.streams {
        lines.push(format!(
            "{} ({})",
            batch.stream_id,
            count(batch.documents.len(), "document")
        ));
        let config = batch.template.config();
        let vertical = config
            .stream
            .filter
            .entity_types
            .iter()
            .find_map(|t| verticals::for_entity_type(verticals::VERTICALS, t));
        if let Some(vertical) = vertical {
            lines.push(format!("    Vertical: {}", vertical.label));
        }
        for (i, doc) in batch.documents.iter().enumerate() {
            lines.push(format!("    {} {}", format_index(i + 1), document_title(doc)));
            lines.push(format!("        Source: {}", doc.source));
        }
    }

    if !manifest.unmatched.is_empty() {
        lines.push(String::new());
        lines.push(format!(
            "Unmatched ({})",
            count(manifest.unmatched.len(), "document")
        ));
        for doc in &manifest.unmatched {
            let id = doc.id.as_deref().unwrap_or("(no id)");
            let kind = doc.entity_type.as_deref().unwrap_or("no entity type");
            lines.push(format!("    {} ({})", id, kind));
            lines.push(format!("        Source: {}", doc.source));
        }
    }

    lines.push(String::new());
    lines.push("Config".to_string());
    if source_root.join("config.toml").exists() {
        lines.push("    config.toml".to_string());
    }
    lines.push(format!("    {}/", manifest.config.documents_dir));

    lines
}

/// Print scan output to stdout.
pub fn print_scan_output(manifest: &Manifest, source_root: &Path) {
    for line in format_scan_output(manifest, source_root) {
        println!("{}", line);
    }
}

// ============================================================================
// Stage 2: Generate output
// ============================================================================

/// Format generate stage output: pages grouped by stream, with redirects.
pub fn format_generate_output(report: &GenerateReport) -> Vec<String> {
    let mut lines = Vec::new();

    for kind in TemplateKind::ALL {
        let pages: Vec<_> = report.pages.iter().filter(|p| p.template == kind).collect();
        if pages.is_empty() {
            continue;
        }
        lines.push(kind.config().stream.id.to_string());
        for (i, page) in pages.iter().enumerate() {
            lines.push(format!(
                "    {} {} → {}",
                format_index(i + 1),
                page.title,
                page.path
            ));
            for redirect in &page.redirects {
                lines.push(format!("        Redirect: {}", redirect));
            }
        }
    }

    if !lines.is_empty() {
        lines.push(String::new());
    }
    let mut summary = format!(
        "Generated {}, {}",
        count(report.pages.len(), "page"),
        count(report.redirect_count(), "redirect")
    );
    if let Some(file) = &report.redirects_file {
        summary.push_str(&format!(" → {}", file));
    }
    lines.push(summary);

    lines
}

/// Print generate output to stdout.
pub fn print_generate_output(report: &GenerateReport) {
    for line in format_generate_output(report) {
        println!("{}", line);
    }
}

// ============================================================================
// Verticals
// ============================================================================

/// Format the vertical registry, one entity per vertical.
pub fn format_verticals(registry: &[Vertical]) -> Vec<String> {
    let mut lines = vec!["Verticals".to_string()];
    for (i, vertical) in registry.iter().enumerate() {
        let hidden = if vertical.show_in_nav { "" } else { " (hidden)" };
        lines.push(format!(
            "{} {}{}",
            format_index(i + 1),
            vertical.label,
            hidden
        ));
        if let Some(key) = vertical.key {
            lines.push(format!("    Key: {}", key));
        }
        if let Some(entity_type) = vertical.entity_type {
            lines.push(format!("    Entity type: {}", entity_type));
        }
        if let Some(limit) = vertical.limit {
            lines.push(format!("    Limit: {}", limit));
        }
    }

    let nav: Vec<&str> = verticals::nav_verticals(registry)
        .map(|v| v.label)
        .collect();
    lines.push(String::new());
    lines.push(format!("Navigation: {}", nav.join(" · ")));
    lines
}

/// Warnings for vertical keys used more than once.
pub fn format_vertical_warnings(registry: &[Vertical]) -> Vec<String> {
    verticals::duplicate_keys(registry)
        .into_iter()
        .map(|key| format!("Warning: vertical key '{}' is used by more than one vertical", key))
        .collect()
}

pub fn print_verticals(registry: &[Vertical]) {
    for line in format_verticals(registry) {
        println!("{}", line);
    }
}

pub fn print_vertical_warnings(registry: &[Vertical]) {
    for line in format_vertical_warnings(registry) {
        eprintln!("{}", line);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generate::{PageSummary, generate_from_manifest};
    use crate::scan::scan;
    use crate::test_helpers::*;
    use tempfile::TempDir;

    #[test]
    fn format_index_pads() {
        assert_eq!(format_index(1), "001");
        assert_eq!(format_index(42), "042");
        assert_eq!(format_index(1000), "1000");
    }

    #[test]
    fn count_pluralizes() {
        assert_eq!(count(0, "page"), "0 pages");
        assert_eq!(count(1, "page"), "1 page");
        assert_eq!(count(2, "page"), "2 pages");
    }

    #[test]
    fn scan_output_lists_streams_and_unmatched() {
        let tmp = setup_fixtures();
        let manifest = scan(tmp.path()).unwrap();
        let lines = format_scan_output(&manifest, tmp.path());

        assert_eq!(lines[0], "Streams");
        assert_eq!(lines[1], "helpArticle (3 documents)");
        assert_eq!(lines[2], "    Vertical: Help Articles");
        assert_eq!(lines[3], "    001 Reset your password");
        assert_eq!(lines[4], "        Source: articles.json");
        assert!(lines.contains(&"home (1 document)".to_string()));
        assert!(lines.contains(&"Unmatched (2 documents)".to_string()));
        assert!(lines.contains(&"    faq-1 (faq)".to_string()));
        assert!(lines.contains(&"    config.toml".to_string()));
        assert!(lines.contains(&"    documents/".to_string()));
    }

    #[test]
    fn generate_output_groups_pages() {
        let tmp = setup_fixtures();
        let manifest = scan(tmp.path()).unwrap();
        let out = TempDir::new().unwrap();
        let report = generate_from_manifest(&manifest, out.path()).unwrap();
        let lines = format_generate_output(&report);

        assert_eq!(lines[0], "helpArticle");
        assert_eq!(lines[1], "    001 Reset your password → reset-password");
        assert_eq!(lines[2], "        Redirect: index-old/1001");
        assert!(lines.contains(&"home".to_string()));
        assert!(lines.contains(&"    001 Help Site Home → index.html".to_string()));
        assert_eq!(
            lines.last().unwrap(),
            "Generated 4 pages, 3 redirects → _redirects"
        );
    }

    #[test]
    fn generate_output_for_empty_report() {
        let lines = format_generate_output(&GenerateReport::default());
        assert_eq!(lines, vec!["Generated 0 pages, 0 redirects"]);
    }

    #[test]
    fn generate_output_single_page() {
        let report = GenerateReport {
            pages: vec![PageSummary {
                template: TemplateKind::Home,
                document_id: "home".to_string(),
                title: "Help Site Home".to_string(),
                path: "index.html".to_string(),
                redirects: vec![],
            }],
            redirects_file: None,
        };
        let lines = format_generate_output(&report);
        assert_eq!(lines.last().unwrap(), "Generated 1 page, 0 redirects");
    }

    #[test]
    fn verticals_listing() {
        let lines = format_verticals(verticals::VERTICALS);
        assert_eq!(lines[0], "Verticals");
        assert_eq!(lines[1], "001 All");
        assert_eq!(lines[2], "002 Help Articles");
        assert_eq!(lines[3], "    Key: help_articles");
        assert_eq!(lines[4], "    Entity type: helpArticle");
        assert_eq!(
            lines.last().unwrap(),
            "Navigation: All · Help Articles · FAQs"
        );
    }

    #[test]
    fn vertical_warnings_for_duplicates() {
        assert!(format_vertical_warnings(verticals::VERTICALS).is_empty());

        let registry = [verticals::VERTICALS[1], verticals::VERTICALS[1]];
        let warnings = format_vertical_warnings(&registry);
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("help_articles"));
    }
}
