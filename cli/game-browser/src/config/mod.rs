use std::env;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use config::{Config as HierarchicalConfig, Environment};
use game_catalog::{CatalogClientConfig, DEFAULT_CATALOG_URL, DEFAULT_PAGE_SIZE};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::search::{DEFAULT_SEARCH_PAGE_SIZE, SearchMode};

pub const GAME_BROWSER_CONFIG_DIR_VAR: &str = "GAME_BROWSER_CONFIG_DIR";
pub const GAME_BROWSER_CONFIG_FILE: &str = "game-browser.toml";
const GAME_BROWSER_ENV_PREFIX: &str = "GAME_BROWSER";

/// Describes the configuration of the game browser
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct Config {
    /// Key for the catalog API.
    ///
    /// Without it every catalog request fails.
    pub api_key: Option<String>,

    /// The URL of the catalog instance to use
    // Using a URL here adds an extra trailing slash,
    // so just use a String.
    pub catalog_url: String,

    /// Whether searches filter the loaded games or query the catalog
    pub search_mode: SearchMode,

    /// How many games a remote search requests
    pub search_page_size: u32,

    /// How many games a list request fetches if not set explicitly
    pub page_size: u32,

    /// User agent sent to the catalog
    pub user_agent: Option<String>,

    /// Serve catalog responses from this JSON file instead of the network
    pub mock_responses: Option<PathBuf>,
}

impl Config {
    fn raw_config() -> Result<HierarchicalConfig> {
        let mut builder = HierarchicalConfig::builder()
            .set_default("catalog_url", DEFAULT_CATALOG_URL)?
            .set_default("search_mode", "remote")?
            .set_default("search_page_size", i64::from(DEFAULT_SEARCH_PAGE_SIZE))?
            .set_default("page_size", i64::from(DEFAULT_PAGE_SIZE))?;

        match env::var(GAME_BROWSER_CONFIG_DIR_VAR) {
            Ok(config_dir) => {
                let config_file = Path::new(&config_dir).join(GAME_BROWSER_CONFIG_FILE);
                debug!("`${GAME_BROWSER_CONFIG_DIR_VAR}` set, reading {config_file:?}");
                builder = builder.add_source(
                    config::File::from(config_file)
                        .format(config::FileFormat::Toml)
                        .required(false),
                );
            },
            Err(_) => debug!("`${GAME_BROWSER_CONFIG_DIR_VAR}` not set, skipping config file"),
        }

        // override via env variables
        let builder = builder.add_source(
            Environment::with_prefix(GAME_BROWSER_ENV_PREFIX).prefix_separator("_"),
        );

        Ok(builder.build()?)
    }

    /// Creates a [Config] from defaults, the config file and the environment
    pub fn parse() -> Result<Config> {
        let config: Config = Self::raw_config()?
            .try_deserialize()
            .context("Could not parse config")?;
        Ok(config)
    }

    /// Configuration for [game_catalog::CatalogClient]
    pub fn catalog_client_config(&self) -> CatalogClientConfig {
        CatalogClientConfig {
            catalog_url: self.catalog_url.clone(),
            api_key: self.api_key.clone(),
            user_agent: self.user_agent.clone(),
            default_page_size: self.page_size,
        }
    }
}
