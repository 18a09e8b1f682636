//! Error handling for catalog API operations.

use reqwest::StatusCode;
use thiserror::Error;

use crate::types::GameId;

/// Common error type for catalog API operations.
///
/// Operation specific errors ([ListError], [GameError]) wrap this type.
#[derive(Debug, Error)]
pub enum CatalogClientError {
    /// No API key was configured, the request was never sent.
    #[error("no catalog API key configured")]
    MissingApiKey,
    /// The catalog could not be reached or the body could not be read.
    #[error("could not reach the game catalog")]
    Transport(#[source] reqwest::Error),
    /// The catalog answered with a non-success status.
    #[error("{} {status_text}", status.as_u16())]
    Http {
        status: StatusCode,
        status_text: String,
    },
    /// The response body was not the expected JSON.
    #[error("could not parse catalog response")]
    Parse(#[source] serde_json::Error),
    #[error("{0}")]
    Other(String),
}

impl CatalogClientError {
    /// Build an [CatalogClientError::Http] from a response status,
    /// using the canonical reason phrase as status text.
    pub fn from_status(status: StatusCode) -> Self {
        Self::Http {
            status,
            status_text: status
                .canonical_reason()
                .unwrap_or("Unknown Status")
                .to_string(),
        }
    }

    /// The HTTP status if the catalog responded with one.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            CatalogClientError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Error returned when fetching a list of games.
#[derive(Debug, Error)]
pub enum ListError {
    #[error("failed to fetch games: {0}")]
    CatalogClientError(#[from] CatalogClientError),
}

/// Error returned when fetching a single game.
#[derive(Debug, Error)]
pub enum GameError {
    /// The catalog reported that no game with this id exists.
    #[error("game {0} not found")]
    NotFound(GameId),
    #[error("failed to fetch game: {0}")]
    CatalogClientError(#[from] CatalogClientError),
}

impl GameError {
    /// Map a 404 response to [GameError::NotFound], keep everything else.
    pub(crate) fn for_game(id: GameId, err: CatalogClientError) -> Self {
        match err.status() {
            Some(StatusCode::NOT_FOUND) => GameError::NotFound(id),
            _ => GameError::CatalogClientError(err),
        }
    }
}
