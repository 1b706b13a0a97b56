//! Vertical registry: the navigation descriptors for search-style sections
//! of the help site.
//!
//! The registry is static data. Nothing here validates it; [`duplicate_keys`]
//! exists so `check` can warn about collisions.

/// A navigation descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Vertical {
    pub show_in_nav: bool,
    /// Display label.
    pub label: &'static str,
    /// Routing/filter identifier. The universal vertical has none.
    pub key: Option<&'static str>,
    pub entity_type: Option<&'static str>,
    /// Result limit. Declared only; nothing applies it.
    pub limit: Option<usize>,
}

pub const VERTICALS: &[Vertical] = &[
    Vertical {
        show_in_nav: true,
        label: "All",
        key: None,
        entity_type: None,
        limit: None,
    },
    Vertical {
        show_in_nav: true,
        label: "Help Articles",
        key: Some("help_articles"),
        entity_type: Some("helpArticle"),
        limit: None,
    },
    Vertical {
        show_in_nav: true,
        label: "FAQs",
        key: Some("faqs"),
        entity_type: Some("faq"),
        limit: None,
    },
];

/// Verticals shown in navigation, in registry order.
pub fn nav_verticals(verticals: &[Vertical]) -> impl Iterator<Item = &Vertical> {
    verticals.iter().filter(|v| v.show_in_nav)
}

/// First vertical for an entity type.
pub fn for_entity_type<'a>(verticals: &'a [Vertical], entity_type: &str) -> Option<&'a Vertical> {
    verticals
        .iter()
        .find(|v| v.entity_type == Some(entity_type))
}

/// Keys used by more than one vertical, each reported once in first-seen order.
pub fn duplicate_keys(verticals: &[Vertical]) -> Vec<&'static str> {
    let mut seen = Vec::new();
    let mut duplicates = Vec::new();
    for key in verticals.iter().filter_map(|v| v.key) {
        if seen.contains(&key) {
            if !duplicates.contains(&key) {
                duplicates.push(key);
            }
        } else {
            seen.push(key);
        }
    }
    duplicates
}
