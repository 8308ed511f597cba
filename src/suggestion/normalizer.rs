//! Pure mapping from backend records to the unified suggestion list.

use serde_json::Value;

use super::record::{RawCategory, RawMenu, RawRecord, RawRestaurant};
use super::{Suggestion, SuggestionKind};

/// Map a backend result list to display-ready suggestions.
///
/// Records that fail to decode (unknown `type`, missing id, no usable name)
/// are dropped; the rest are mapped per type and stable-sorted by kind rank,
/// preserving backend order within each kind. Identical input always yields
/// identical, identically-ordered output.
pub fn normalize_records(results: &[Value]) -> Vec<Suggestion> {
    let mut suggestions: Vec<Suggestion> = results
        .iter()
        .filter_map(|value| match serde_json::from_value::<RawRecord>(value.clone()) {
            Ok(record) => map_record(record),
            Err(err) => {
                log::debug!("dropping unrecognized search record: {}", err);
                None
            }
        })
        .collect();
    suggestions.sort_by_key(|suggestion| suggestion.kind.rank());
    suggestions
}

fn map_record(record: RawRecord) -> Option<Suggestion> {
    match record {
        RawRecord::Menu(menu) => map_menu(menu),
        RawRecord::Restaurant(restaurant) => map_restaurant(restaurant),
        RawRecord::Category(category) => map_category(category),
    }
}

fn map_menu(menu: RawMenu) -> Option<Suggestion> {
    Some(Suggestion {
        id: menu.id,
        kind: SuggestionKind::Menu,
        name: menu.name?,
        // An absent menu slug stays empty; it is a "not yet known" state for
        // enrichment to fill, never synthesized from the name.
        slug: menu.slug.unwrap_or_default(),
        description: menu.description,
        image: menu.image,
        rating: menu.rating,
        count: None,
        restaurant: menu.restaurant.as_ref().and_then(reference_text),
    })
}

fn map_restaurant(restaurant: RawRestaurant) -> Option<Suggestion> {
    Some(Suggestion {
        id: restaurant.id,
        kind: SuggestionKind::Restaurant,
        name: restaurant.name?,
        slug: restaurant.slug.unwrap_or_default(),
        description: restaurant.description.or(restaurant.address),
        image: restaurant.image,
        rating: restaurant.rating,
        count: None,
        restaurant: None,
    })
}

fn map_category(category: RawCategory) -> Option<Suggestion> {
    let name = category.name?;
    let slug = match category.slug {
        Some(slug) if !slug.is_empty() => slug,
        _ => slug_from_name(&name),
    };
    Some(Suggestion {
        id: category.id,
        kind: SuggestionKind::Category,
        name,
        slug,
        description: None,
        image: category.image,
        rating: None,
        count: Some(category.count.unwrap_or(0)),
        restaurant: None,
    })
}

/// Lowercase the name and join its words with hyphens.
fn slug_from_name(name: &str) -> String {
    name.to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("-")
}

/// Render a free-form restaurant reference (name or numeric id) as text.
fn reference_text(value: &Value) -> Option<String> {
    match value {
        Value::String(text) if !text.is_empty() => Some(text.clone()),
        Value::Number(id) => Some(id.to_string()),
        _ => None,
    }
}

#[cfg(test)]
#[path = "normalizer_tests.rs"]
mod normalizer_tests;
