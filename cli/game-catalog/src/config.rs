//! Configuration types for catalog client construction.

/// Base URL of the public catalog API.
pub const DEFAULT_CATALOG_URL: &str = "https://api.rawg.io/api";

/// Page size sent with list requests that don't set one explicitly.
pub const DEFAULT_PAGE_SIZE: u32 = 20;

/// Configuration for catalog client construction.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogClientConfig {
    /// Base URL for the catalog API, without the `/games` suffix.
    // Using a URL here adds an extra trailing slash,
    // so just use a String.
    pub catalog_url: String,
    /// Key attached as `key=` to every request.
    ///
    /// Without a key every request fails with
    /// [`crate::CatalogClientError::MissingApiKey`].
    pub api_key: Option<String>,
    /// User agent sent with every request.
    pub user_agent: Option<String>,
    /// `page_size` used when a list request doesn't set one.
    pub default_page_size: u32,
}

impl Default for CatalogClientConfig {
    fn default() -> Self {
        Self {
            catalog_url: DEFAULT_CATALOG_URL.to_string(),
            api_key: None,
            user_agent: None,
            default_page_size: DEFAULT_PAGE_SIZE,
        }
    }
}
