//! HTTP client for a RAWG-style game catalog API.
//!
//! This crate provides:
//! - Typed catalog records with tolerant deserialization of optional fields
//! - Query parameter building, including the fixed "popular", "recent", ...
//!   query shapes
//! - A [`ClientTrait`] seam with an HTTP implementation ([`CatalogClient`])
//!   and a queue backed [`MockClient`]
//! - Typed errors distinguishing transport, HTTP status, parse and
//!   not-found failures
//!
//! ## Usage
//!
//! ```ignore
//! use game_catalog::{CatalogClient, CatalogClientConfig, ClientTrait, GameSearchParams};
//!
//! let config = CatalogClientConfig {
//!     api_key: Some(api_key),
//!     ..CatalogClientConfig::default()
//! };
//!
//! let client = CatalogClient::new(config)?;
//! let page = client.search("cyberpunk", GameSearchParams::default()).await?;
//! ```

mod client;
mod config;
mod error;
mod mock;
mod params;
pub mod types;

pub use client::{CatalogClient, Client, ClientTrait, API_KEY_PARAM};
pub use config::{CatalogClientConfig, DEFAULT_CATALOG_URL, DEFAULT_PAGE_SIZE};
pub use error::{CatalogClientError, GameError, ListError};
pub use mock::{MockClient, MockDataError, MockErrorResponse, MockRequest, Response};
pub use params::GameSearchParams;
pub use types::{CatalogPage, CatalogRecord, GameId};
