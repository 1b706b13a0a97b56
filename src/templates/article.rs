//! Help article pages: one page per `helpArticle` document.

use super::{RenderProps, Template, TemplateError};
use crate::document::{HelpArticle, non_empty};
use crate::head::HeadConfig;
use crate::rich_text;
use crate::stream::{Localization, StreamConfig, StreamFilter, TemplateConfig};
use maud::{Markup, html};

pub static CONFIG: TemplateConfig = TemplateConfig {
    stream: StreamConfig {
        id: "helpArticle",
        fields: &[
            "id",
            "name",
            "slug",
            "body",
            "c_lexicalRichText",
            "shortDescription",
            "voteCount",
            "voteSum",
            "promoted",
            "externalArticlePostDate",
            "externalArticleUpdateDate",
        ],
        filter: StreamFilter {
            entity_types: &["helpArticle"],
        },
        localization: Localization {
            locales: &["en"],
            primary: false,
        },
    },
};

/// Page header text, also the title of articles without a name.
const SITE_HEADING: &str = "Help Center";

pub struct ArticleTemplate;

impl Template for ArticleTemplate {
    type Document = HelpArticle;

    fn config(&self) -> &'static TemplateConfig {
        &CONFIG
    }

    /// `slug` when present, otherwise `name`.
    fn path(&self, document: &HelpArticle) -> Result<String, TemplateError> {
        non_empty(&document.slug)
            .or_else(|| non_empty(&document.name))
            .map(str::to_string)
            .ok_or_else(|| TemplateError::MissingPath {
                id: document.id.clone(),
            })
    }

    fn redirects(&self, document: &HelpArticle) -> Vec<String> {
        vec![format!("index-old/{}", document.id)]
    }

    fn head(&self, props: &RenderProps<'_, HelpArticle>) -> HeadConfig {
        HeadConfig::titled(non_empty(&props.document.name).unwrap_or(SITE_HEADING))
    }

    fn render(&self, props: &RenderProps<'_, HelpArticle>) -> Markup {
        let doc = props.document;
        html! {
            div.article-page {
                header.page-header {
                    h1 { a href={ (props.relative_prefix_to_root) "index.html" } { (SITE_HEADING) } }
                }
                main.article-content {
                    @if let Some(name) = non_empty(&doc.name) {
                        h1.article-title { (name) }
                    }
                    @if let Some(description) = non_empty(&doc.short_description) {
                        div.callout-box {
                            p.short-description { (description) }
                        }
                    }
                    // Zero is data; only missing counts hide the stats.
                    @if let (Some(count), Some(sum)) = (doc.vote_count, doc.vote_sum) {
                        div.vote-stats {
                            span.vote-count { (count) " votes" }
                            span.separator { "|" }
                            span.vote-sum { "Total vote sum: " (sum) }
                        }
                    }
                    @if doc.promoted == Some(true) {
                        div.promoted-banner { "Promoted" }
                    }
                    @if let Some(body) = body_markup(doc) {
                        div.prose { (body) }
                    }
                    @if let Some(date) = non_empty(&doc.external_article_post_date) {
                        p.post-date { "Original article posted: " (date) }
                    }
                    @if let Some(date) = non_empty(&doc.external_article_update_date) {
                        p.update-date { "Article last updated: " (date) }
                    }
                }
            }
        }
    }
}

/// The structured body wins; the Markdown body is the fallback.
fn body_markup(doc: &HelpArticle) -> Option<Markup> {
    if let Some(rich_text) = doc.rich_text.as_ref().filter(|r| !r.json.is_null()) {
        return Some(rich_text::render(&rich_text.json));
    }
    non_empty(&doc.body).map(rich_text::render_markdown)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SiteConfig;
    use crate::document::RichTextField;
    use serde_json::json;

    fn article() -> HelpArticle {
        HelpArticle {
            id: "123".to_string(),
            ..HelpArticle::default()
        }
    }

    fn render(doc: &HelpArticle) -> String {
        let site = SiteConfig::default();
        let path = ArticleTemplate.path(doc).unwrap_or_else(|_| "fallback".to_string());
        ArticleTemplate
            .render(&RenderProps::new(doc, &path, &site))
            .into_string()
    }

    // =========================================================================
    // Path and redirects
    // =========================================================================

    #[test]
    fn path_is_slug_when_present() {
        let doc = HelpArticle {
            slug: Some("reset-password".to_string()),
            name: Some("Reset your password".to_string()),
            ..article()
        };
        assert_eq!(ArticleTemplate.path(&doc).unwrap(), "reset-password");
    }

    #[test]
    fn path_falls_back_to_name() {
        let doc = HelpArticle {
            name: Some("Reset your password".to_string()),
            ..article()
        };
        assert_eq!(ArticleTemplate.path(&doc).unwrap(), "Reset your password");
    }

    #[test]
    fn empty_slug_falls_back_to_name() {
        let doc = HelpArticle {
            slug: Some(String::new()),
            name: Some("Billing".to_string()),
            ..article()
        };
        assert_eq!(ArticleTemplate.path(&doc).unwrap(), "Billing");
    }

    #[test]
    fn path_without_slug_or_name_is_error() {
        let err = ArticleTemplate.path(&article()).unwrap_err();
        assert!(matches!(err, TemplateError::MissingPath { ref id } if id == "123"));
    }

    #[test]
    fn redirects_to_legacy_index_path() {
        assert_eq!(ArticleTemplate.redirects(&article()), vec!["index-old/123"]);
    }

    // =========================================================================
    // Head
    // =========================================================================

    #[test]
    fn head_title_is_document_name() {
        let doc = HelpArticle {
            name: Some("Reset your password".to_string()),
            slug: Some("reset".to_string()),
            ..article()
        };
        let site = SiteConfig::default();
        let head = ArticleTemplate.head(&RenderProps::new(&doc, "reset", &site));
        assert_eq!(head.title, "Reset your password");
        assert_eq!(head.charset, "UTF-8");
        assert_eq!(head.viewport, "width=device-width, initial-scale=1");
        assert!(head.tags.is_empty());
    }

    #[test]
    fn head_title_without_name_uses_site_heading() {
        let doc = HelpArticle {
            slug: Some("reset".to_string()),
            ..article()
        };
        let site = SiteConfig::default();
        let head = ArticleTemplate.head(&RenderProps::new(&doc, "reset", &site));
        assert_eq!(head.title, "Help Center");
    }

    // =========================================================================
    // Render
    // =========================================================================

    #[test]
    fn renders_vote_stats() {
        let doc = HelpArticle {
            vote_count: Some(5),
            vote_sum: Some(42),
            ..article()
        };
        let html = render(&doc);
        assert!(html.contains("5 votes"));
        assert!(html.contains("Total vote sum: 42"));
    }

    #[test]
    fn zero_votes_still_render() {
        let doc = HelpArticle {
            vote_count: Some(0),
            vote_sum: Some(0),
            ..article()
        };
        let html = render(&doc);
        assert!(html.contains("0 votes"));
        assert!(html.contains("Total vote sum: 0"));
    }

    #[test]
    fn missing_vote_data_hides_stats() {
        let doc = HelpArticle {
            vote_count: Some(3),
            ..article()
        };
        let html = render(&doc);
        assert!(!html.contains("vote-stats"));
        assert!(!html.contains("votes"));
    }

    #[test]
    fn absent_short_description_has_no_callout() {
        let html = render(&article());
        assert!(!html.contains("callout-box"));
    }

    #[test]
    fn short_description_renders_callout() {
        let doc = HelpArticle {
            short_description: Some("Quick answer".to_string()),
            ..article()
        };
        let html = render(&doc);
        assert!(html.contains("callout-box"));
        assert!(html.contains("Quick answer"));
    }

    #[test]
    fn promoted_banner_only_when_true() {
        let promoted = HelpArticle {
            promoted: Some(true),
            ..article()
        };
        assert!(render(&promoted).contains("promoted-banner"));

        let not_promoted = HelpArticle {
            promoted: Some(false),
            ..article()
        };
        assert!(!render(&not_promoted).contains("promoted-banner"));
        assert!(!render(&article()).contains("promoted-banner"));
    }

    #[test]
    fn dates_render_with_labels() {
        let doc = HelpArticle {
            external_article_post_date: Some("2023-01-02".to_string()),
            external_article_update_date: Some("2023-03-04".to_string()),
            ..article()
        };
        let html = render(&doc);
        assert!(html.contains("Original article posted: 2023-01-02"));
        assert!(html.contains("Article last updated: 2023-03-04"));
    }

    #[test]
    fn bare_document_renders_only_page_header() {
        let html = render(&article());
        assert!(html.contains("Help Center"));
        for absent in ["article-title", "prose", "post-date", "update-date", "vote-stats"] {
            assert!(!html.contains(absent), "{absent} should not render");
        }
    }

    #[test]
    fn rich_text_body_preferred_over_markdown() {
        let doc = HelpArticle {
            body: Some("**markdown**".to_string()),
            rich_text: Some(RichTextField {
                json: json!({ "root": { "children": [
                    { "type": "paragraph", "children": [{ "type": "text", "text": "structured" }] }
                ] } }),
            }),
            ..article()
        };
        let html = render(&doc);
        assert!(html.contains("<p>structured</p>"));
        assert!(!html.contains("markdown"));
    }

    #[test]
    fn markdown_body_when_no_rich_text() {
        let doc = HelpArticle {
            body: Some("Press **Reset**.".to_string()),
            ..article()
        };
        let html = render(&doc);
        assert!(html.contains(r#"<div class="prose">"#));
        assert!(html.contains("<strong>Reset</strong>"));
    }

    #[test]
    fn header_links_back_to_root() {
        let doc = HelpArticle {
            slug: Some("guides/reset".to_string()),
            ..article()
        };
        let html = render(&doc);
        assert!(html.contains(r#"href="../index.html""#));
    }

    #[test]
    fn name_is_escaped() {
        let doc = HelpArticle {
            name: Some("<img src=x onerror=alert(1)>".to_string()),
            ..article()
        };
        let html = render(&doc);
        assert!(!html.contains("<img"));
    }
}
