//! Presentational building blocks for the home page.
//!
//! Each component is a plain function returning [`Markup`]; callers thread
//! document fields and site config through as arguments.

use crate::config::{FooterConfig, HeaderConfig};
use crate::document::{FeaturedArticle, non_empty};
use maud::{Markup, html};

/// Outermost page wrapper.
pub fn main_layout(content: Markup) -> Markup {
    html! {
        div.main-layout {
            (content)
        }
    }
}

/// Site header with logo and navigation links.
pub fn complex_header(header: &HeaderConfig, prefix: &str) -> Markup {
    html! {
        header.complex-header {
            a.logo href={ (prefix) "index.html" } {
                @if let Some(logo) = &header.logo {
                    img src=(logo) alt="";
                    span.sr-only { (header.company_name) }
                } @else {
                    span.company-name { (header.company_name) }
                }
            }
            nav.header-links {
                ul {
                    @for link in &header.links {
                        li { a href=(link.href) { (link.label) } }
                    }
                }
            }
        }
    }
}

pub fn centered_container(content: Markup) -> Markup {
    html! {
        div.centered-container {
            (content)
        }
    }
}

pub fn vertical_stack(content: Markup) -> Markup {
    html! {
        div.vertical-stack {
            (content)
        }
    }
}

pub fn big_image(src: &str, alt: &str) -> Markup {
    html! {
        div.big-image {
            img src=(src) alt=(alt);
        }
    }
}

pub fn title(value: &str) -> Markup {
    html! {
        h2.title { (value) }
    }
}

/// Card linking to a featured article.
pub fn featured_article(article: &FeaturedArticle, prefix: &str) -> Markup {
    let name = non_empty(&article.name);
    html! {
        article.featured-article {
            @match (name, non_empty(&article.slug)) {
                (Some(name), Some(slug)) => h3 { a href={ (prefix) (slug) } { (name) } },
                (Some(name), None) => h3 { (name) },
                (None, _) => {}
            }
            @if let Some(date) = non_empty(&article.external_article_post_date) {
                p.date-posted { "Posted " (date) }
            }
        }
    }
}

pub fn footer(footer: &FooterConfig) -> Markup {
    html! {
        footer.site-footer {
            ul {
                @for link in &footer.links {
                    li { a href=(link.href) { (link.label) } }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card(name: Option<&str>, slug: Option<&str>, date: Option<&str>) -> FeaturedArticle {
        FeaturedArticle {
            id: None,
            name: name.map(String::from),
            slug: slug.map(String::from),
            external_article_post_date: date.map(String::from),
        }
    }

    #[test]
    fn header_without_logo_shows_company_name() {
        let html = complex_header(&HeaderConfig::default(), "").into_string();
        assert!(html.contains(r#"<span class="company-name">Help Center</span>"#));
        assert!(html.contains("About"));
        assert!(html.contains("Membership"));
        assert!(html.contains("Contribute"));
        assert!(!html.contains("<img"));
    }

    #[test]
    fn header_with_logo_keeps_screen_reader_text() {
        let header = HeaderConfig {
            logo: Some("https://example.com/logo.png".to_string()),
            ..HeaderConfig::default()
        };
        let html = complex_header(&header, "../").into_string();
        assert!(html.contains(r#"src="https://example.com/logo.png""#));
        assert!(html.contains(r#"<span class="sr-only">Help Center</span>"#));
        assert!(html.contains(r#"href="../index.html""#));
    }

    #[test]
    fn featured_article_links_to_slug() {
        let html = featured_article(
            &card(Some("Reset"), Some("reset-password"), Some("2023-01-02")),
            "",
        )
        .into_string();
        assert!(html.contains(r#"<a href="reset-password">Reset</a>"#));
        assert!(html.contains("Posted 2023-01-02"));
    }

    #[test]
    fn featured_article_without_slug_is_unlinked() {
        let html = featured_article(&card(Some("Reset"), None, None), "").into_string();
        assert!(html.contains("<h3>Reset</h3>"));
        assert!(!html.contains("<a"));
        assert!(!html.contains("date-posted"));
    }

    #[test]
    fn featured_article_without_fields_is_empty_card() {
        let html = featured_article(&card(None, None, None), "").into_string();
        assert_eq!(html, r#"<article class="featured-article"></article>"#);
    }

    #[test]
    fn footer_renders_links_in_order() {
        let html = footer(&FooterConfig::default()).into_string();
        let privacy = html.find("Privacy").unwrap();
        let help = html.find("Help").unwrap();
        assert!(privacy < help);
    }

    #[test]
    fn big_image_escapes_alt() {
        let html = big_image("x.png", r#"a "quoted" alt"#).into_string();
        assert!(html.contains(r#"alt="a &quot;quoted&quot; alt""#));
    }
}
