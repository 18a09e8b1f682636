//! Catalog record types.
//!
//! These mirror the JSON returned by the catalog API.
//! Everything but the identifier and the name may be missing or `null`,
//! so every other field is an explicit [Option].

use serde::{Deserialize, Serialize};

pub type GameId = u64;

/// A `{id, name}` pair as used for genres, developers, publishers and tags.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct NamedRef {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub slug: Option<String>,
}

impl NamedRef {
    pub fn new(id: i64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            slug: None,
        }
    }
}

/// Platforms are nested one level deeper than other references.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlatformEntry {
    pub platform: NamedRef,
}

/// A screenshot reference.
///
/// List responses put the background image first with an id of `-1`.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct Screenshot {
    #[serde(default)]
    pub id: i64,
    pub image: String,
}

/// A game as returned by the catalog.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogRecord {
    pub id: GameId,
    pub name: String,
    #[serde(default)]
    pub slug: Option<String>,
    /// HTML description, only present on single game responses
    #[serde(default)]
    pub description: Option<String>,
    /// Plain text description, only present on single game responses
    #[serde(default)]
    pub description_raw: Option<String>,
    /// ISO date, absent if the release date is not announced
    #[serde(default)]
    pub released: Option<String>,
    /// Release date is to be announced
    #[serde(default)]
    pub tba: Option<bool>,
    /// Average user rating on a 0 to 5 scale
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub ratings_count: Option<u64>,
    /// Metacritic score on a 0 to 100 scale
    #[serde(default)]
    pub metacritic: Option<u32>,
    /// Average playtime in hours
    #[serde(default)]
    pub playtime: Option<u32>,
    #[serde(default)]
    pub background_image: Option<String>,
    #[serde(default)]
    pub short_screenshots: Option<Vec<Screenshot>>,
    #[serde(default)]
    pub genres: Option<Vec<NamedRef>>,
    #[serde(default)]
    pub developers: Option<Vec<NamedRef>>,
    #[serde(default)]
    pub publishers: Option<Vec<NamedRef>>,
    #[serde(default)]
    pub tags: Option<Vec<NamedRef>>,
    #[serde(default)]
    pub platforms: Option<Vec<PlatformEntry>>,
    #[serde(default)]
    pub parent_platforms: Option<Vec<PlatformEntry>>,
}

/// A single page of games as returned by the list endpoint.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogPage {
    /// Total number of matching games, not the number on this page
    pub count: u64,
    #[serde(default)]
    pub next: Option<String>,
    #[serde(default)]
    pub previous: Option<String>,
    pub results: Vec<CatalogRecord>,
}

impl CatalogPage {
    pub fn empty() -> Self {
        Self::default()
    }
}
