//! Stream declarations: which documents a template receives, and which of
//! their fields.
//!
//! Each template owns a static [`TemplateConfig`]. The scan stage uses it to
//! pick matching documents ([`StreamConfig::matches`]) and to strip them down
//! to the declared fields ([`StreamConfig::project`]).
//!
//! ## Field Paths
//!
//! Fields use dot notation to reach into nested objects and related entities:
//!
//! ```text
//! "name"                           → top-level key
//! "c_coverPhoto"                   → whole nested object
//! "c_featuredArticles.slug"        → `slug` of every entry in the list
//! ```
//!
//! Selecting a parent whole (`c_coverPhoto`) subsumes any path beneath it.

use serde_json::{Map, Value};
use std::collections::BTreeMap;

#[derive(Debug)]
pub struct TemplateConfig {
    pub stream: StreamConfig,
}

#[derive(Debug)]
pub struct StreamConfig {
    /// Stream identifier, unique per template.
    pub id: &'static str,
    /// Declared field paths, dot notation.
    pub fields: &'static [&'static str],
    pub filter: StreamFilter,
    pub localization: Localization,
}

#[derive(Debug)]
pub struct StreamFilter {
    pub entity_types: &'static [&'static str],
}

/// Locale profiles documents are generated for.
#[derive(Debug)]
pub struct Localization {
    pub locales: &'static [&'static str],
    /// Whether the stream targets the primary profile. Carried as declared.
    pub primary: bool,
}

/// Entity type of a raw document: `meta.entityType` as a string, or as an
/// object with an `id`.
pub fn entity_type(document: &Value) -> Option<&str> {
    let entity_type = document.get("meta")?.get("entityType")?;
    entity_type
        .as_str()
        .or_else(|| entity_type.get("id").and_then(Value::as_str))
}

/// Locale of a raw document (`meta.locale`), if it has one.
pub fn locale(document: &Value) -> Option<&str> {
    document.get("meta")?.get("locale")?.as_str()
}

impl StreamConfig {
    /// Whether a raw document belongs to this stream.
    ///
    /// Documents without a locale are not localized and match any stream of
    /// their entity type.
    pub fn matches(&self, document: &Value) -> bool {
        let Some(kind) = entity_type(document) else {
            return false;
        };
        if !self.filter.entity_types.contains(&kind) {
            return false;
        }
        match locale(document) {
            Some(loc) => self.localization.locales.contains(&loc),
            None => true,
        }
    }

    /// Strip a raw document down to the declared fields.
    pub fn project(&self, document: &Value) -> Value {
        let tree = FieldTree::from_paths(self.fields);
        tree.apply(document).unwrap_or_else(|| Value::Object(Map::new()))
    }
}

/// Declared field paths arranged as a tree of keys.
#[derive(Debug, Default)]
struct FieldTree {
    /// The whole value at this node is selected.
    whole: bool,
    children: BTreeMap<String, FieldTree>,
}

impl FieldTree {
    fn from_paths(paths: &[&str]) -> Self {
        let mut root = FieldTree::default();
        for path in paths {
            root.insert(path.split('.').filter(|s| !s.is_empty()));
        }
        root
    }

    fn insert<'a>(&mut self, mut segments: impl Iterator<Item = &'a str>) {
        if self.whole {
            return;
        }
        match segments.next() {
            None => {
                self.whole = true;
                self.children.clear();
            }
            Some(key) => self
                .children
                .entry(key.to_string())
                .or_default()
                .insert(segments),
        }
    }

    /// Select from `value`. Returns `None` when nothing selected is present.
    fn apply(&self, value: &Value) -> Option<Value> {
        if self.whole {
            return Some(value.clone());
        }
        match value {
            Value::Object(map) => {
                let mut out = Map::new();
                for (key, subtree) in &self.children {
                    if let Some(selected) = map.get(key).and_then(|v| subtree.apply(v)) {
                        out.insert(key.clone(), selected);
                    }
                }
                Some(Value::Object(out))
            }
            Value::Array(items) => Some(Value::Array(
                items.iter().filter_map(|item| self.apply(item)).collect(),
            )),
            // A nested path cannot select into a scalar; keep explicit nulls.
            Value::Null => Some(Value::Null),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const ARTICLES: StreamConfig = StreamConfig {
        id: "test",
        fields: &["id", "name", "related.slug", "cover", "cover.image.url"],
        filter: StreamFilter {
            entity_types: &["helpArticle"],
        },
        localization: Localization {
            locales: &["en"],
            primary: false,
        },
    };

    #[test]
    fn entity_type_from_string_or_object() {
        assert_eq!(
            entity_type(&json!({ "meta": { "entityType": "faq" } })),
            Some("faq")
        );
        assert_eq!(
            entity_type(&json!({ "meta": { "entityType": { "id": "faq", "uid": 7 } } })),
            Some("faq")
        );
        assert_eq!(entity_type(&json!({ "id": "1" })), None);
    }

    #[test]
    fn matches_entity_type_and_locale() {
        let doc = json!({ "meta": { "entityType": "helpArticle", "locale": "en" } });
        assert!(ARTICLES.matches(&doc));

        let other_type = json!({ "meta": { "entityType": "faq", "locale": "en" } });
        assert!(!ARTICLES.matches(&other_type));

        let other_locale = json!({ "meta": { "entityType": "helpArticle", "locale": "fr" } });
        assert!(!ARTICLES.matches(&other_locale));
    }

    #[test]
    fn document_without_locale_matches() {
        let doc = json!({ "meta": { "entityType": "helpArticle" } });
        assert!(ARTICLES.matches(&doc));
    }

    #[test]
    fn document_without_meta_matches_nothing() {
        assert!(!ARTICLES.matches(&json!({ "id": "1", "name": "x" })));
    }

    #[test]
    fn project_keeps_declared_and_drops_others() {
        let doc = json!({
            "meta": { "entityType": "helpArticle" },
            "id": "1",
            "name": "Name",
            "body": "not declared"
        });
        let projected = ARTICLES.project(&doc);
        assert_eq!(projected, json!({ "id": "1", "name": "Name" }));
    }

    #[test]
    fn project_reaches_into_lists() {
        let doc = json!({
            "id": "1",
            "related": [
                { "slug": "a", "name": "A" },
                { "slug": "b", "secret": true },
                { "name": "no slug" }
            ]
        });
        let projected = ARTICLES.project(&doc);
        assert_eq!(
            projected["related"],
            json!([{ "slug": "a" }, { "slug": "b" }, {}])
        );
    }

    #[test]
    fn parent_selection_subsumes_child_paths() {
        let doc = json!({
            "cover": { "image": { "url": "u", "alternateText": "alt" }, "extra": 1 }
        });
        let projected = ARTICLES.project(&doc);
        assert_eq!(projected["cover"], doc["cover"]);
    }

    #[test]
    fn child_path_before_parent_is_subsumed_too() {
        let tree = FieldTree::from_paths(&["a.b", "a"]);
        assert!(tree.children["a"].whole);
        assert!(tree.children["a"].children.is_empty());
    }

    #[test]
    fn nested_path_into_scalar_is_dropped() {
        let doc = json!({ "related": "not an object" });
        let projected = ARTICLES.project(&doc);
        assert!(projected.get("related").is_none());
    }

    #[test]
    fn project_non_object_yields_empty_object() {
        let projected = ARTICLES.project(&json!(42));
        assert_eq!(projected, json!({}));
    }
}
