use anyhow::{Context, Result, bail};
use game_catalog::{CatalogClient, CatalogRecord, Client, MockClient};
use tracing::debug;

use crate::config::Config;
use crate::search::{SearchMode, SearchOrchestrator};

/// Create the catalog client described by `config`.
///
/// If `mock_responses` points to a file of canned responses,
/// a [MockClient] serving them is used instead of the network.
pub fn init_catalog_client(config: &Config) -> Result<Client> {
    if let Some(path) = &config.mock_responses {
        if !path.exists() {
            bail!("path to mock data file doesn't exist: {}", path.display());
        }

        debug!(mock_data_path = %path.display(), "using mock catalog client");
        return Ok(MockClient::new(Some(path))
            .context("could not load mock catalog responses")?
            .into());
    }

    if config.api_key.as_deref().is_none_or(str::is_empty) {
        debug!("no catalog API key configured, catalog requests will fail");
    }

    debug!(catalog_url = %config.catalog_url, "using catalog client");
    Ok(CatalogClient::new(config.catalog_client_config())?.into())
}

/// Create a search orchestrator in the configured mode.
///
/// `initial` is shown while no query is active,
/// in local mode it is also the set that is searched.
pub fn init_search_orchestrator(
    config: &Config,
    client: Client,
    initial: Vec<CatalogRecord>,
) -> SearchOrchestrator {
    match config.search_mode {
        SearchMode::Local => SearchOrchestrator::local(initial),
        SearchMode::Remote => {
            SearchOrchestrator::remote(client, initial, config.search_page_size)
        },
    }
}
