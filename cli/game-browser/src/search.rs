//! The search orchestrator owns the displayed result set.
//!
//! In [SearchMode::Local] a query filters the initial set in memory.
//! In [SearchMode::Remote] a query is sent to the catalog,
//! the previous results stay displayed until the response arrives
//! and are kept if the request fails.
//!
//! Remote submissions are split in three steps so a caller can drive
//! several of them concurrently:
//!
//! 1. [SearchOrchestrator::begin] updates the state synchronously and
//!    hands out a [PendingSearch] tagged with a sequence number
//! 2. [PendingSearch::run] performs the request
//! 3. [SearchOrchestrator::complete] applies the outcome,
//!    unless a newer submission or a reset happened in the meantime

use game_catalog::{CatalogPage, CatalogRecord, Client, ClientTrait, GameSearchParams, ListError};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// Page size requested for remote searches.
pub const DEFAULT_SEARCH_PAGE_SIZE: u32 = 40;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchMode {
    /// Case insensitive substring match over the initial set
    Local,
    /// Full text search by the catalog
    #[default]
    Remote,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum SearchPhase {
    #[default]
    Idle,
    Searching,
    Success,
    Failed {
        message: String,
    },
}

/// Everything the presentation needs to show the current result set.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchState {
    pub query: String,
    pub results: Vec<CatalogRecord>,
    /// Number of matches reported for the current query
    pub count: u64,
    pub phase: SearchPhase,
    pub mode: SearchMode,
}

impl SearchState {
    fn new(mode: SearchMode, initial: Vec<CatalogRecord>) -> Self {
        Self {
            query: String::new(),
            count: initial.len() as u64,
            results: initial,
            phase: SearchPhase::Idle,
            mode,
        }
    }

    pub fn loading(&self) -> bool {
        matches!(self.phase, SearchPhase::Searching)
    }

    pub fn error(&self) -> Option<&str> {
        match &self.phase {
            SearchPhase::Failed { message } => Some(message),
            _ => None,
        }
    }

    /// Whether a non-blank query is active.
    pub fn has_query(&self) -> bool {
        !self.query.trim().is_empty()
    }

    /// A query is active and finished without error or results.
    pub fn no_matches(&self) -> bool {
        self.has_query() && self.results.is_empty() && !self.loading() && self.error().is_none()
    }
}

/// Whether `record` matches the lowercased `needle`
/// by name, developer name or genre name.
fn matches_query(record: &CatalogRecord, needle: &str) -> bool {
    let contains = |haystack: &str| haystack.to_lowercase().contains(needle);

    contains(&record.name)
        || record
            .developers
            .iter()
            .flatten()
            .any(|developer| contains(&developer.name))
        || record
            .genres
            .iter()
            .flatten()
            .any(|genre| contains(&genre.name))
}

/// Filter `records` by a case insensitive substring match.
///
/// A blank query returns all records, order is always preserved.
pub fn filter_local(records: &[CatalogRecord], query: &str) -> Vec<CatalogRecord> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return records.to_vec();
    }

    records
        .iter()
        .filter(|record| matches_query(record, &needle))
        .cloned()
        .collect()
}

#[derive(Debug)]
enum Backend {
    Local,
    Remote { client: Client, page_size: u32 },
}

/// A remote search that has been submitted but not yet sent.
#[derive(Debug)]
pub struct PendingSearch {
    seq: u64,
    query: String,
    client: Client,
    page_size: u32,
}

impl PendingSearch {
    pub fn seq(&self) -> u64 {
        self.seq
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    /// Send the request to the catalog.
    #[instrument(skip(self), fields(seq = self.seq, query = %self.query))]
    pub async fn run(self) -> SearchOutcome {
        let params = GameSearchParams {
            page_size: Some(self.page_size),
            ..Default::default()
        };
        let result = self.client.search(&self.query, params).await;
        SearchOutcome {
            seq: self.seq,
            result,
        }
    }
}

/// The result of a [PendingSearch].
#[derive(Debug)]
pub struct SearchOutcome {
    pub seq: u64,
    pub result: Result<CatalogPage, ListError>,
}

#[derive(Debug)]
pub struct SearchOrchestrator {
    backend: Backend,
    initial: Vec<CatalogRecord>,
    state: SearchState,
    seq: u64,
}

impl SearchOrchestrator {
    /// Search by filtering `initial` in memory.
    pub fn local(initial: Vec<CatalogRecord>) -> Self {
        Self {
            backend: Backend::Local,
            state: SearchState::new(SearchMode::Local, initial.clone()),
            initial,
            seq: 0,
        }
    }

    /// Search through `client`, showing `initial` while no query is active.
    pub fn remote(client: Client, initial: Vec<CatalogRecord>, page_size: u32) -> Self {
        Self {
            backend: Backend::Remote { client, page_size },
            state: SearchState::new(SearchMode::Remote, initial.clone()),
            initial,
            seq: 0,
        }
    }

    pub fn state(&self) -> &SearchState {
        &self.state
    }

    pub fn mode(&self) -> SearchMode {
        self.state.mode
    }

    /// Replace the set shown while no query is active.
    pub fn set_initial(&mut self, initial: Vec<CatalogRecord>) {
        self.initial = initial;
        if matches!(self.backend, Backend::Local) {
            self.state.results = filter_local(&self.initial, &self.state.query);
            self.state.count = self.state.results.len() as u64;
        } else if !self.state.has_query() {
            self.reset();
        }
    }

    fn reset(&mut self) {
        self.state.results = self.initial.clone();
        self.state.count = self.initial.len() as u64;
        self.state.phase = SearchPhase::Idle;
    }

    /// Submit `query` and update the state synchronously.
    ///
    /// Returns a [PendingSearch] if a catalog request is needed,
    /// i.e. in remote mode for a non-blank query.
    /// Any search still in flight becomes stale.
    pub fn begin(&mut self, query: impl Into<String>) -> Option<PendingSearch> {
        let query = query.into();
        self.seq += 1;
        self.state.query = query.clone();

        let blank = query.trim().is_empty();
        let (client, page_size) = match &self.backend {
            Backend::Local => {
                self.state.results = filter_local(&self.initial, &query);
                self.state.count = self.state.results.len() as u64;
                self.state.phase = if blank {
                    SearchPhase::Idle
                } else {
                    SearchPhase::Success
                };
                return None;
            },
            Backend::Remote { client, page_size } => (client.clone(), *page_size),
        };

        if blank {
            debug!(seq = self.seq, "query cleared, showing initial set");
            self.reset();
            return None;
        }

        debug!(seq = self.seq, %query, "starting remote search");
        self.state.phase = SearchPhase::Searching;
        Some(PendingSearch {
            seq: self.seq,
            query: query.trim().to_string(),
            client,
            page_size,
        })
    }

    /// Apply the outcome of a search.
    ///
    /// Returns `false` if the outcome is stale and was discarded.
    pub fn complete(&mut self, outcome: SearchOutcome) -> bool {
        if outcome.seq != self.seq {
            debug!(
                seq = outcome.seq,
                latest = self.seq,
                "discarding stale search result"
            );
            return false;
        }

        match outcome.result {
            Ok(page) => {
                debug!(count = page.count, "search succeeded");
                self.state.count = page.count;
                self.state.results = page.results;
                self.state.phase = SearchPhase::Success;
            },
            Err(err) => {
                debug!(%err, "search failed");
                self.state.phase = SearchPhase::Failed {
                    message: err.to_string(),
                };
            },
        }
        true
    }

    /// Submit `query` and wait for the catalog if needed.
    pub async fn submit(&mut self, query: impl Into<String>) -> &SearchState {
        if let Some(pending) = self.begin(query) {
            let outcome = pending.run().await;
            self.complete(outcome);
        }
        &self.state
    }
}
