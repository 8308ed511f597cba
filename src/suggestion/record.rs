//! Wire-shape records returned by the search backend.
//!
//! Field names vary between backend revisions; every accepted alias is
//! enumerated here so normalization stays an explicit per-type mapping.

use serde::Deserialize;
use serde_json::Value;

/// A backend search record, tagged by entity type.
///
/// An unknown tag fails deserialization of that single record; callers drop
/// the record instead of failing the batch.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum RawRecord {
    Menu(RawMenu),
    Restaurant(RawRestaurant),
    Category(RawCategory),
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawMenu {
    pub id: u64,
    #[serde(default, alias = "nama_menu", alias = "title")]
    pub name: Option<String>,
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default, alias = "deskripsi")]
    pub description: Option<String>,
    #[serde(default, alias = "photo", alias = "gambar")]
    pub image: Option<String>,
    #[serde(default)]
    pub rating: Option<f64>,
    /// Restaurant association: a name or a numeric id, kept free-form.
    #[serde(default, alias = "restoran", alias = "restaurant_id")]
    pub restaurant: Option<Value>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawRestaurant {
    pub id: u64,
    #[serde(default, alias = "nama_resto")]
    pub name: Option<String>,
    #[serde(default, alias = "slug_resto")]
    pub slug: Option<String>,
    #[serde(default, alias = "deskripsi")]
    pub description: Option<String>,
    #[serde(default, alias = "alamat")]
    pub address: Option<String>,
    #[serde(default, alias = "photo", alias = "gambar")]
    pub image: Option<String>,
    #[serde(default)]
    pub rating: Option<f64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawCategory {
    pub id: u64,
    #[serde(default, alias = "nama_kategori")]
    pub name: Option<String>,
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default, alias = "icon", alias = "gambar")]
    pub image: Option<String>,
    #[serde(default, alias = "total_menu", alias = "jumlah_menu")]
    pub count: Option<u32>,
}
