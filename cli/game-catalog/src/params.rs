//! Query parameters accepted by the list endpoint.

use chrono::{Months, NaiveDate};
use serde::Serialize;

/// Query parameters for [crate::ClientTrait::fetch_list].
///
/// Unset and empty values are left out of the request entirely.
#[derive(Debug, Default, Clone, PartialEq, Serialize)]
pub struct GameSearchParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_size: Option<u32>,
    #[serde(skip_serializing_if = "is_unset")]
    pub search: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search_precise: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search_exact: Option<bool>,
    #[serde(skip_serializing_if = "is_unset")]
    pub parent_platforms: Option<String>,
    #[serde(skip_serializing_if = "is_unset")]
    pub platforms: Option<String>,
    #[serde(skip_serializing_if = "is_unset")]
    pub stores: Option<String>,
    #[serde(skip_serializing_if = "is_unset")]
    pub developers: Option<String>,
    #[serde(skip_serializing_if = "is_unset")]
    pub publishers: Option<String>,
    #[serde(skip_serializing_if = "is_unset")]
    pub genres: Option<String>,
    #[serde(skip_serializing_if = "is_unset")]
    pub tags: Option<String>,
    #[serde(skip_serializing_if = "is_unset")]
    pub creators: Option<String>,
    /// Release date range, `YYYY-MM-DD,YYYY-MM-DD`
    #[serde(skip_serializing_if = "is_unset")]
    pub dates: Option<String>,
    /// Update date range, `YYYY-MM-DD,YYYY-MM-DD`
    #[serde(skip_serializing_if = "is_unset")]
    pub updated: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub platforms_count: Option<u32>,
    /// Metacritic range, `80,100`
    #[serde(skip_serializing_if = "is_unset")]
    pub metacritic: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exclude_collection: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exclude_additions: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exclude_parents: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exclude_game_series: Option<bool>,
    /// Ordering expression, e.g. `-rating,-reviews_count`
    #[serde(skip_serializing_if = "is_unset")]
    pub ordering: Option<String>,
}

fn is_unset(value: &Option<String>) -> bool {
    value.as_deref().is_none_or(str::is_empty)
}

impl GameSearchParams {
    /// Full text search for `query`.
    pub fn search(query: impl Into<String>) -> Self {
        Self {
            search: Some(query.into()),
            ..Default::default()
        }
    }

    /// Highest rated games with a metacritic score of at least 80.
    pub fn popular() -> Self {
        Self {
            ordering: Some("-rating,-reviews_count".to_string()),
            metacritic: Some("80,100".to_string()),
            ..Default::default()
        }
    }

    /// Games released in the three months up to `today`, newest first.
    pub fn recent(today: NaiveDate) -> Self {
        let three_months_ago = today.checked_sub_months(Months::new(3)).unwrap_or(today);
        Self {
            dates: Some(format!(
                "{},{}",
                three_months_ago.format("%Y-%m-%d"),
                today.format("%Y-%m-%d")
            )),
            ordering: Some("-released".to_string()),
            ..Default::default()
        }
    }

    /// Games in the genre with the given slug.
    pub fn by_genre(genre_slug: impl Into<String>) -> Self {
        Self {
            genres: Some(genre_slug.into()),
            ..Default::default()
        }
    }

    /// Games available on the platform with the given id.
    pub fn by_platform(platform_id: impl Into<String>) -> Self {
        Self {
            platforms: Some(platform_id.into()),
            ..Default::default()
        }
    }

    /// Games tagged free-to-play.
    pub fn free() -> Self {
        Self {
            tags: Some("free-to-play".to_string()),
            ..Default::default()
        }
    }

    /// Combine with caller supplied parameters.
    ///
    /// Every value set in `overrides` replaces the value in `self`.
    pub fn overridden_by(self, overrides: GameSearchParams) -> Self {
        Self {
            page: overrides.page.or(self.page),
            page_size: overrides.page_size.or(self.page_size),
            search: overrides.search.or(self.search),
            search_precise: overrides.search_precise.or(self.search_precise),
            search_exact: overrides.search_exact.or(self.search_exact),
            parent_platforms: overrides.parent_platforms.or(self.parent_platforms),
            platforms: overrides.platforms.or(self.platforms),
            stores: overrides.stores.or(self.stores),
            developers: overrides.developers.or(self.developers),
            publishers: overrides.publishers.or(self.publishers),
            genres: overrides.genres.or(self.genres),
            tags: overrides.tags.or(self.tags),
            creators: overrides.creators.or(self.creators),
            dates: overrides.dates.or(self.dates),
            updated: overrides.updated.or(self.updated),
            platforms_count: overrides.platforms_count.or(self.platforms_count),
            metacritic: overrides.metacritic.or(self.metacritic),
            exclude_collection: overrides.exclude_collection.or(self.exclude_collection),
            exclude_additions: overrides.exclude_additions.or(self.exclude_additions),
            exclude_parents: overrides.exclude_parents.or(self.exclude_parents),
            exclude_game_series: overrides.exclude_game_series.or(self.exclude_game_series),
            ordering: overrides.ordering.or(self.ordering),
        }
    }

    /// Set `page_size` if the caller didn't.
    pub fn with_default_page_size(mut self, page_size: u32) -> Self {
        self.page_size.get_or_insert(page_size);
        self
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn query_string(params: &GameSearchParams) -> String {
        reqwest::Client::new()
            .get("http://catalog.invalid/games")
            .query(params)
            .build()
            .unwrap()
            .url()
            .query()
            .unwrap_or_default()
            .to_string()
    }

    #[test]
    fn unset_and_empty_values_are_omitted() {
        let params = GameSearchParams {
            search: Some(String::new()),
            genres: Some("action".to_string()),
            ..Default::default()
        };
        assert_eq!(query_string(&params), "genres=action");
        assert_eq!(query_string(&GameSearchParams::default()), "");
    }

    #[test]
    fn flags_and_numbers_are_serialized() {
        let params = GameSearchParams {
            page: Some(2),
            page_size: Some(10),
            search_exact: Some(true),
            exclude_additions: Some(false),
            ..Default::default()
        };
        assert_eq!(
            query_string(&params),
            "page=2&page_size=10&search_exact=true&exclude_additions=false"
        );
    }

    #[test]
    fn popular_sets_ordering_and_metacritic() {
        let query = query_string(&GameSearchParams::popular());
        assert!(query.contains("ordering=-rating%2C-reviews_count"), "{query}");
        assert!(query.contains("metacritic=80%2C100"), "{query}");
    }

    #[test]
    fn recent_covers_three_months() {
        let today = NaiveDate::from_ymd_opt(2024, 5, 31).unwrap();
        let params = GameSearchParams::recent(today);
        assert_eq!(params.dates.as_deref(), Some("2024-02-29,2024-05-31"));
        assert_eq!(params.ordering.as_deref(), Some("-released"));
    }

    #[test]
    fn shapers_set_their_filter() {
        assert_eq!(GameSearchParams::by_genre("action").genres.as_deref(), Some("action"));
        assert_eq!(GameSearchParams::by_platform("4").platforms.as_deref(), Some("4"));
        assert_eq!(GameSearchParams::free().tags.as_deref(), Some("free-to-play"));
        assert_eq!(GameSearchParams::search("test").search.as_deref(), Some("test"));
    }

    #[test]
    fn overrides_win_over_shaper_defaults() {
        let params = GameSearchParams::popular().overridden_by(GameSearchParams {
            metacritic: Some("90,100".to_string()),
            page_size: Some(5),
            ..Default::default()
        });
        assert_eq!(params.metacritic.as_deref(), Some("90,100"));
        assert_eq!(params.ordering.as_deref(), Some("-rating,-reviews_count"));
        assert_eq!(params.page_size, Some(5));
    }

    #[test]
    fn default_page_size_only_fills_gaps() {
        assert_eq!(
            GameSearchParams::default().with_default_page_size(20).page_size,
            Some(20)
        );
        let explicit = GameSearchParams {
            page_size: Some(40),
            ..Default::default()
        };
        assert_eq!(explicit.with_default_page_size(20).page_size, Some(40));
    }
}
