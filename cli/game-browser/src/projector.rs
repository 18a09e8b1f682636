//! Projection of catalog records into flat, presentation ready values.
//!
//! None of these functions fail.
//! Missing optional fields project to empty values or fixed placeholders.

use std::fmt::Display;

use chrono::{DateTime, NaiveDate};
use game_catalog::types::{NamedRef, PlatformEntry};
use game_catalog::{CatalogRecord, GameId};

/// Shown when a game has no announced release date.
pub const RELEASE_DATE_TBA: &str = "TBA";

/// Shown when the release date could not be parsed.
pub const RELEASE_DATE_INVALID: &str = "Invalid Date";

/// A flattened view of a [CatalogRecord].
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayGame {
    pub id: GameId,
    pub name: String,
    /// Resolved image URL, empty if the record has none
    pub image: String,
    pub genres: Vec<String>,
    pub developers: Vec<String>,
    pub publishers: Vec<String>,
    pub platforms: Vec<String>,
    /// Long form release date, [RELEASE_DATE_TBA] or [RELEASE_DATE_INVALID]
    pub release_date: String,
    /// Whether the record carries a release date at all
    pub has_release_date: bool,
    pub screenshots: Vec<String>,
    pub description: Option<String>,
    pub rating: Option<f64>,
    pub rating_label: Option<RatingLabel>,
    pub ratings_count: u64,
    pub metacritic: Option<u32>,
    pub playtime: Option<u32>,
}

impl From<&CatalogRecord> for DisplayGame {
    fn from(record: &CatalogRecord) -> Self {
        let rating = record.rating.filter(|rating| *rating > 0.0);
        DisplayGame {
            id: record.id,
            name: record.name.clone(),
            image: game_image(record),
            genres: genre_names(record),
            developers: developer_names(record),
            publishers: publisher_names(record),
            platforms: platform_names(record),
            release_date: formatted_release_date(record.released.as_deref()),
            has_release_date: non_empty(record.released.as_deref()).is_some(),
            screenshots: screenshots(record),
            description: non_empty(record.description_raw.as_deref()).map(str::to_string),
            rating,
            rating_label: rating.map(RatingLabel::from_rating),
            ratings_count: record.ratings_count.unwrap_or_default(),
            metacritic: record.metacritic.filter(|score| *score > 0),
            playtime: record.playtime.filter(|hours| *hours > 0),
        }
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|value| !value.is_empty())
}

/// The primary image, else the first screenshot, else an empty string.
pub fn game_image(record: &CatalogRecord) -> String {
    non_empty(record.background_image.as_deref())
        .or_else(|| {
            record
                .short_screenshots
                .as_deref()
                .and_then(|screenshots| screenshots.first())
                .and_then(|screenshot| non_empty(Some(screenshot.image.as_str())))
        })
        .unwrap_or_default()
        .to_string()
}

fn names(refs: Option<&[NamedRef]>) -> Vec<String> {
    refs.unwrap_or_default()
        .iter()
        .map(|named| named.name.clone())
        .collect()
}

pub fn genre_names(record: &CatalogRecord) -> Vec<String> {
    names(record.genres.as_deref())
}

pub fn developer_names(record: &CatalogRecord) -> Vec<String> {
    names(record.developers.as_deref())
}

pub fn publisher_names(record: &CatalogRecord) -> Vec<String> {
    names(record.publishers.as_deref())
}

/// Names of the top level platform families, e.g. `PC`, `PlayStation`.
pub fn platform_names(record: &CatalogRecord) -> Vec<String> {
    record
        .parent_platforms
        .as_deref()
        .unwrap_or_default()
        .iter()
        .map(|PlatformEntry { platform }| platform.name.clone())
        .collect()
}

pub fn screenshots(record: &CatalogRecord) -> Vec<String> {
    record
        .short_screenshots
        .as_deref()
        .unwrap_or_default()
        .iter()
        .map(|screenshot| screenshot.image.clone())
        .collect()
}

/// Format a release date as e.g. `December 15, 2023`.
///
/// Dates are formatted as the calendar date they name,
/// timestamps as the calendar date in their own offset.
pub fn formatted_release_date(released: Option<&str>) -> String {
    let Some(released) = non_empty(released) else {
        return RELEASE_DATE_TBA.to_string();
    };

    let date = NaiveDate::parse_from_str(released, "%Y-%m-%d").ok().or_else(|| {
        DateTime::parse_from_rfc3339(released)
            .ok()
            .map(|timestamp| timestamp.date_naive())
    });

    match date {
        Some(date) => date.format("%B %-d, %Y").to_string(),
        None => RELEASE_DATE_INVALID.to_string(),
    }
}

/// Summary of the average user rating on the 0 to 5 scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RatingLabel {
    OverwhelminglyPositive,
    VeryPositive,
    MostlyPositive,
    Mixed,
    MostlyNegative,
}

impl RatingLabel {
    pub fn from_rating(rating: f64) -> Self {
        if rating >= 4.0 {
            RatingLabel::OverwhelminglyPositive
        } else if rating >= 3.5 {
            RatingLabel::VeryPositive
        } else if rating >= 3.0 {
            RatingLabel::MostlyPositive
        } else if rating >= 2.5 {
            RatingLabel::Mixed
        } else {
            RatingLabel::MostlyNegative
        }
    }
}

impl Display for RatingLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            RatingLabel::OverwhelminglyPositive => "Overwhelmingly Positive",
            RatingLabel::VeryPositive => "Very Positive",
            RatingLabel::MostlyPositive => "Mostly Positive",
            RatingLabel::Mixed => "Mixed",
            RatingLabel::MostlyNegative => "Mostly Negative",
        };
        write!(f, "{label}")
    }
}
