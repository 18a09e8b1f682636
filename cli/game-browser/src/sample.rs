//! Static sample catalog used as the initial set in local search mode.

use game_catalog::CatalogRecord;

const SAMPLE_GAMES: &str = include_str!("../data/sample_games.json");

/// The bundled sample games, in catalog order.
pub fn sample_games() -> Result<Vec<CatalogRecord>, serde_json::Error> {
    serde_json::from_str(SAMPLE_GAMES)
}
