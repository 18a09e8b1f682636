//! Loading a single game for the detail page.

use game_catalog::{CatalogRecord, Client, ClientTrait, GameError, GameId};
use tracing::{debug, instrument};

#[derive(Debug, Clone, PartialEq, Default)]
pub enum GameDetailState {
    #[default]
    Loading,
    Loaded(Box<CatalogRecord>),
    NotFound(GameId),
    Failed {
        message: String,
    },
}

/// Look up a game in an already loaded set.
pub fn find_game(games: &[CatalogRecord], id: GameId) -> GameDetailState {
    match games.iter().find(|game| game.id == id) {
        Some(game) => GameDetailState::Loaded(Box::new(game.clone())),
        None => GameDetailState::NotFound(id),
    }
}

/// Fetch a game from the catalog.
#[instrument(skip(client))]
pub async fn load_game(client: &impl ClientTrait, id: GameId) -> GameDetailState {
    match client.fetch_by_id(id).await {
        Ok(record) => GameDetailState::Loaded(Box::new(record)),
        Err(GameError::NotFound(id)) => GameDetailState::NotFound(id),
        Err(err) => {
            debug!(%err, "loading game failed");
            GameDetailState::Failed {
                message: err.to_string(),
            }
        },
    }
}

#[derive(Debug)]
enum Source {
    Local(Vec<CatalogRecord>),
    Remote(Client),
}

/// A game request that has been started but not yet sent.
#[derive(Debug)]
pub struct PendingGame {
    seq: u64,
    id: GameId,
    client: Client,
}

impl PendingGame {
    pub async fn run(self) -> GameOutcome {
        GameOutcome {
            seq: self.seq,
            state: load_game(&self.client, self.id).await,
        }
    }
}

#[derive(Debug)]
pub struct GameOutcome {
    pub seq: u64,
    pub state: GameDetailState,
}

/// State of the detail page.
///
/// Opening another game while a request is in flight makes that
/// request stale, its outcome is discarded.
#[derive(Debug)]
pub struct GameDetailPage {
    source: Source,
    state: GameDetailState,
    seq: u64,
}

impl GameDetailPage {
    /// Show games from an already loaded set.
    pub fn local(games: Vec<CatalogRecord>) -> Self {
        Self {
            source: Source::Local(games),
            state: GameDetailState::Loading,
            seq: 0,
        }
    }

    /// Fetch games from the catalog.
    pub fn remote(client: Client) -> Self {
        Self {
            source: Source::Remote(client),
            state: GameDetailState::Loading,
            seq: 0,
        }
    }

    pub fn state(&self) -> &GameDetailState {
        &self.state
    }

    /// Start showing game `id`.
    ///
    /// Returns a [PendingGame] if the game has to be fetched.
    pub fn begin(&mut self, id: GameId) -> Option<PendingGame> {
        self.seq += 1;
        match &self.source {
            Source::Local(games) => {
                self.state = find_game(games, id);
                None
            },
            Source::Remote(client) => {
                self.state = GameDetailState::Loading;
                Some(PendingGame {
                    seq: self.seq,
                    id,
                    client: client.clone(),
                })
            },
        }
    }

    /// Apply a fetched game, returns `false` if the outcome is stale.
    pub fn complete(&mut self, outcome: GameOutcome) -> bool {
        if outcome.seq != self.seq {
            debug!(seq = outcome.seq, latest = self.seq, "discarding stale game");
            return false;
        }
        self.state = outcome.state;
        true
    }

    /// Show game `id`, fetching it if needed.
    pub async fn open(&mut self, id: GameId) -> &GameDetailState {
        if let Some(pending) = self.begin(id) {
            let outcome = pending.run().await;
            self.complete(outcome);
        }
        &self.state
    }
}
