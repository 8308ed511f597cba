//! Unified suggestion model produced from heterogeneous backend records.

mod normalizer;
mod record;

pub use normalizer::normalize_records;
pub use record::RawRecord;

/// Entity class of a suggestion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SuggestionKind {
    Menu,
    Restaurant,
    Category,
}

impl SuggestionKind {
    /// Display rank: menus first, then restaurants, then categories.
    pub fn rank(self) -> u8 {
        match self {
            SuggestionKind::Menu => 0,
            SuggestionKind::Restaurant => 1,
            SuggestionKind::Category => 2,
        }
    }

    /// Backend discriminator / display label for this kind.
    pub fn label(self) -> &'static str {
        match self {
            SuggestionKind::Menu => "menu",
            SuggestionKind::Restaurant => "restaurant",
            SuggestionKind::Category => "category",
        }
    }
}

/// One display-ready search result, regardless of backend entity type.
#[derive(Debug, Clone, PartialEq)]
pub struct Suggestion {
    pub id: u64,
    pub kind: SuggestionKind,
    pub name: String,
    /// Empty means "not yet known"; enrichment may fill it later.
    pub slug: String,
    pub description: Option<String>,
    pub image: Option<String>,
    /// `None` means unknown; zero is a valid rating.
    pub rating: Option<f64>,
    /// Item count, categories only.
    pub count: Option<u32>,
    /// Free-form restaurant reference, menus only; never resolved here.
    pub restaurant: Option<String>,
}

impl Suggestion {
    /// True when the slug is missing and worth a secondary lookup.
    pub fn needs_slug(&self) -> bool {
        self.slug.is_empty() || self.slug == "null"
    }
}
