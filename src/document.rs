//! Typed views of knowledge-graph documents.
//!
//! Documents reach the templates after field projection, so only the fields a
//! template declares can be present. Every field other than `id` is therefore
//! an `Option`, and templates skip markup for absent values instead of
//! rendering placeholders.
//!
//! Field names follow the knowledge-graph schema (`camelCase`, custom fields
//! prefixed with `c_`).

use serde::{Deserialize, Deserializer};

/// A help article entity (`helpArticle`).
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HelpArticle {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    pub name: Option<String>,
    pub slug: Option<String>,
    /// Plain body in Markdown.
    pub body: Option<String>,
    /// Structured rich-text body.
    #[serde(rename = "c_lexicalRichText")]
    pub rich_text: Option<RichTextField>,
    pub short_description: Option<String>,
    pub vote_count: Option<i64>,
    pub vote_sum: Option<i64>,
    pub promoted: Option<bool>,
    pub external_article_post_date: Option<String>,
    pub external_article_update_date: Option<String>,
}

/// Wrapper the knowledge graph puts around a serialized rich-text AST.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RichTextField {
    #[serde(default)]
    pub json: serde_json::Value,
}

/// The help-site home page entity (`helpstarter_homePage`).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct HomePage {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    pub name: Option<String>,
    pub slug: Option<String>,
    #[serde(rename = "c_coverPhoto")]
    pub cover_photo: Option<Photo>,
    #[serde(rename = "c_heading")]
    pub heading: Option<String>,
    #[serde(rename = "c_subHeading")]
    pub sub_heading: Option<String>,
    /// Rendered in array order. A null list or null entries count as absent.
    #[serde(
        rename = "c_featuredArticles",
        default,
        deserialize_with = "list_skipping_nulls"
    )]
    pub featured_articles: Vec<FeaturedArticle>,
}

/// Partial help article linked from the home page.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeaturedArticle {
    #[serde(default, deserialize_with = "optional_string_or_number")]
    pub id: Option<String>,
    pub name: Option<String>,
    pub slug: Option<String>,
    pub external_article_post_date: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Photo {
    pub image: Image,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Image {
    pub url: Option<String>,
    pub alternate_text: Option<String>,
    pub width: Option<u32>,
    pub height: Option<u32>,
}

/// Return `value` when it is present and not blank.
pub fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.trim().is_empty())
}

#[derive(Deserialize)]
#[serde(untagged)]
enum StringOrNumber {
    String(String),
    Number(serde_json::Number),
}

impl From<StringOrNumber> for String {
    fn from(value: StringOrNumber) -> Self {
        match value {
            StringOrNumber::String(s) => s,
            StringOrNumber::Number(n) => n.to_string(),
        }
    }
}

/// Entity ids are strings in the schema but numeric in some exports.
fn string_or_number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    StringOrNumber::deserialize(deserializer).map(String::from)
}

fn optional_string_or_number<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<String>, D::Error> {
    Option::<StringOrNumber>::deserialize(deserializer).map(|v| v.map(String::from))
}

fn list_skipping_nulls<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    let items = Option::<Vec<Option<T>>>::deserialize(deserializer)?;
    Ok(items.into_iter().flatten().flatten().collect())
}
