//! The site home page, generated from the single `helpstarter_homePage`
//! document.

use super::components::{
    big_image, centered_container, complex_header, featured_article, footer, main_layout, title,
    vertical_stack,
};
use super::{RenderProps, Template, TemplateError};
use crate::document::{HomePage, non_empty};
use crate::head::HeadConfig;
use crate::stream::{Localization, StreamConfig, StreamFilter, TemplateConfig};
use maud::{Markup, html};

pub static CONFIG: TemplateConfig = TemplateConfig {
    stream: StreamConfig {
        id: "home",
        fields: &[
            "id",
            "name",
            "c_coverPhoto",
            "c_heading",
            "c_subHeading",
            "slug",
            "c_featuredArticles.id",
            "c_featuredArticles.name",
            "c_featuredArticles.slug",
            "c_featuredArticles.externalArticlePostDate",
        ],
        filter: StreamFilter {
            entity_types: &["helpstarter_homePage"],
        },
        localization: Localization {
            locales: &["en"],
            primary: false,
        },
    },
};

pub const HOME_PATH: &str = "index.html";

pub struct HomeTemplate;

impl Template for HomeTemplate {
    type Document = HomePage;

    fn config(&self) -> &'static TemplateConfig {
        &CONFIG
    }

    fn path(&self, _document: &HomePage) -> Result<String, TemplateError> {
        Ok(HOME_PATH.to_string())
    }

    fn head(&self, _props: &RenderProps<'_, HomePage>) -> HeadConfig {
        HeadConfig::titled("Help Site Home")
    }

    fn render(&self, props: &RenderProps<'_, HomePage>) -> Markup {
        let doc = props.document;
        let prefix = props.relative_prefix_to_root.as_str();

        let stack = vertical_stack(html! {
            @if let Some(image) = doc.cover_photo.as_ref().map(|p| &p.image) {
                @if let Some(url) = non_empty(&image.url) {
                    (big_image(url, image.alternate_text.as_deref().unwrap_or_default()))
                }
            }
            @if let Some(heading) = non_empty(&doc.heading) {
                h1.home-heading { (heading) }
            }
            @if let Some(sub_heading) = non_empty(&doc.sub_heading) {
                p.home-sub-heading { (sub_heading) }
            }
            (title("Featured Articles"))
            @for article in &doc.featured_articles {
                (featured_article(article, prefix))
            }
        });

        main_layout(html! {
            (complex_header(&props.site.header, prefix))
            (centered_container(stack))
            (footer(&props.site.footer))
        })
    }
}
