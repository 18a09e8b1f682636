//! Catalog client and the [ClientTrait] seam.

use std::fmt::Debug;
use std::time::Duration;

use enum_dispatch::enum_dispatch;
use reqwest::header::{self, HeaderMap};
use serde::de::DeserializeOwned;
use tracing::{debug, instrument};

use crate::config::CatalogClientConfig;
use crate::error::{CatalogClientError, GameError, ListError};
use crate::mock::MockClient;
use crate::params::GameSearchParams;
use crate::types::{CatalogPage, CatalogRecord, GameId};

/// Name of the query parameter carrying the API key.
pub const API_KEY_PARAM: &str = "key";

// ---------------------------------------------------------------------------
// Catalog trait
// ---------------------------------------------------------------------------

/// The catalog API interface.
///
/// Every call issues at most one request, there is no retry, caching or
/// deduplication of identical requests.
/// The query shapers (`search`, `popular`, ...) only build parameters and
/// delegate to [ClientTrait::fetch_list].
#[enum_dispatch]
#[allow(async_fn_in_trait)]
pub trait ClientTrait {
    /// Fetch a single page of games matching `params`.
    async fn fetch_list(&self, params: GameSearchParams) -> Result<CatalogPage, ListError>;

    /// Fetch a single game by its id.
    async fn fetch_by_id(&self, id: GameId) -> Result<CatalogRecord, GameError>;

    /// Full text search. `query` takes precedence over `params.search`.
    async fn search(
        &self,
        query: impl AsRef<str> + Send + Sync,
        params: GameSearchParams,
    ) -> Result<CatalogPage, ListError> {
        self.fetch_list(GameSearchParams {
            search: Some(query.as_ref().to_string()),
            ..params
        })
        .await
    }

    /// Highest rated games.
    async fn popular(&self, params: GameSearchParams) -> Result<CatalogPage, ListError> {
        self.fetch_list(GameSearchParams::popular().overridden_by(params))
            .await
    }

    /// Games released in the last three months.
    async fn recent(&self, params: GameSearchParams) -> Result<CatalogPage, ListError> {
        let today = chrono::Utc::now().date_naive();
        self.fetch_list(GameSearchParams::recent(today).overridden_by(params))
            .await
    }

    /// Games in a genre, identified by slug (e.g. `action`).
    async fn by_genre(
        &self,
        genre_slug: impl AsRef<str> + Send + Sync,
        params: GameSearchParams,
    ) -> Result<CatalogPage, ListError> {
        self.fetch_list(GameSearchParams::by_genre(genre_slug.as_ref()).overridden_by(params))
            .await
    }

    /// Games on a platform, identified by platform id (e.g. `4`).
    async fn by_platform(
        &self,
        platform_id: impl AsRef<str> + Send + Sync,
        params: GameSearchParams,
    ) -> Result<CatalogPage, ListError> {
        self.fetch_list(GameSearchParams::by_platform(platform_id.as_ref()).overridden_by(params))
            .await
    }

    /// Free-to-play games.
    async fn free(&self, params: GameSearchParams) -> Result<CatalogPage, ListError> {
        self.fetch_list(GameSearchParams::free().overridden_by(params))
            .await
    }
}

/// Either a client for the actual catalog service,
/// or a mock client for testing and offline use.
#[derive(Debug, Clone)]
#[enum_dispatch(ClientTrait)]
pub enum Client {
    Catalog(CatalogClient),
    Mock(MockClient),
}

// ---------------------------------------------------------------------------
// HTTP client
// ---------------------------------------------------------------------------

/// A client for the catalog service.
#[derive(Clone)]
pub struct CatalogClient {
    http: reqwest::Client,
    config: CatalogClientConfig,
}

impl Debug for CatalogClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CatalogClient")
            .field("catalog_url", &self.config.catalog_url)
            .field("has_api_key", &self.config.api_key.is_some())
            .finish_non_exhaustive()
    }
}

impl CatalogClient {
    /// Create a new catalog client from configuration.
    pub fn new(config: CatalogClientConfig) -> Result<Self, CatalogClientError> {
        let http = build_http_client(&config)?;
        Ok(Self { http, config })
    }

    /// Get the configured catalog URL.
    pub fn catalog_url(&self) -> &str {
        &self.config.catalog_url
    }

    /// Update the client configuration and recreate the client.
    pub fn update_config(
        &mut self,
        update: impl FnOnce(&mut CatalogClientConfig),
    ) -> Result<(), CatalogClientError> {
        let mut modified_config = self.config.clone();
        update(&mut modified_config);
        *self = Self::new(modified_config)?;
        Ok(())
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{path}", self.config.catalog_url.trim_end_matches('/'))
    }

    /// Send a single GET request and decode the JSON body.
    async fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        params: Option<&GameSearchParams>,
    ) -> Result<T, CatalogClientError> {
        let api_key = self
            .config
            .api_key
            .as_deref()
            .filter(|key| !key.is_empty())
            .ok_or(CatalogClientError::MissingApiKey)?;

        let mut request = self.http.get(url).query(&[(API_KEY_PARAM, api_key)]);
        if let Some(params) = params {
            request = request.query(params);
        }

        let response = request
            .send()
            .await
            .map_err(CatalogClientError::Transport)?;

        let status = response.status();
        if !status.is_success() {
            debug!(%status, url, "catalog responded with error status");
            return Err(CatalogClientError::from_status(status));
        }

        let body = response
            .text()
            .await
            .map_err(CatalogClientError::Transport)?;
        serde_json::from_str(&body).map_err(CatalogClientError::Parse)
    }
}

impl ClientTrait for CatalogClient {
    #[instrument(skip_all, fields(search = ?params.search))]
    async fn fetch_list(&self, params: GameSearchParams) -> Result<CatalogPage, ListError> {
        let params = params.with_default_page_size(self.config.default_page_size);
        debug!(?params, "sending list request");

        let page: CatalogPage = self.get_json(&self.endpoint("games"), Some(&params)).await?;

        debug!(
            count = page.count,
            n_results = page.results.len(),
            "received games"
        );
        Ok(page)
    }

    #[instrument(skip(self))]
    async fn fetch_by_id(&self, id: GameId) -> Result<CatalogRecord, GameError> {
        let url = self.endpoint(&format!("games/{id}"));
        let record = self
            .get_json(&url, None)
            .await
            .map_err(|err| GameError::for_game(id, err))?;
        debug!("received game");
        Ok(record)
    }
}

// ---------------------------------------------------------------------------
// HTTP client builder
// ---------------------------------------------------------------------------

fn build_http_client(config: &CatalogClientConfig) -> Result<reqwest::Client, CatalogClientError> {
    let mut headers = HeaderMap::new();
    headers.insert(
        header::ACCEPT,
        header::HeaderValue::from_static("application/json"),
    );

    debug!(
        catalog_url = %config.catalog_url,
        has_api_key = config.api_key.is_some(),
        "building catalog HTTP client"
    );

    let user_agent = config
        .user_agent
        .clone()
        .unwrap_or_else(|| format!("game-browser/{}", env!("CARGO_PKG_VERSION")));

    reqwest::Client::builder()
        .default_headers(headers)
        .user_agent(user_agent)
        .connect_timeout(Duration::from_secs(15))
        .timeout(Duration::from_secs(60))
        .build()
        .map_err(|e| CatalogClientError::Other(e.to_string()))
}

#[cfg(test)]
mod tests {
    use httpmock::Method::GET;
    use httpmock::MockServer;
    use pretty_assertions::assert_eq;
    use reqwest::StatusCode;
    use serde_json::json;

    use super::*;

    const API_KEY: &str = "test-api-key";

    fn client_config(url: &str) -> CatalogClientConfig {
        CatalogClientConfig {
            catalog_url: url.to_string(),
            api_key: Some(API_KEY.to_string()),
            ..Default::default()
        }
    }

    fn games_response() -> serde_json::Value {
        json!({
            "count": 2,
            "next": "https://api.rawg.io/api/games?page=2",
            "previous": null,
            "results": [
                { "id": 1, "name": "Test Game", "released": "2023-01-01", "genres": [] },
                { "id": 2, "name": "Other Game", "background_image": null }
            ]
        })
    }

    #[tokio::test]
    async fn fetch_list_sends_key_and_default_page_size() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/games")
                    .query_param(API_KEY_PARAM, API_KEY)
                    .query_param("page_size", "20");
                then.status(200).json_body(games_response());
            })
            .await;

        let client = CatalogClient::new(client_config(&server.base_url())).unwrap();
        let page = client.fetch_list(GameSearchParams::default()).await.unwrap();

        mock.assert_async().await;
        assert_eq!(page.count, 2);
        assert_eq!(
            page.results.iter().map(|r| r.name.as_str()).collect::<Vec<_>>(),
            vec!["Test Game", "Other Game"]
        );
    }

    #[tokio::test]
    async fn fetch_list_sends_custom_params() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/games")
                    .query_param("page", "2")
                    .query_param("page_size", "10")
                    .query_param("search", "cyberpunk");
                then.status(200).json_body(games_response());
            })
            .await;

        let client = CatalogClient::new(client_config(&server.base_url())).unwrap();
        client
            .fetch_list(GameSearchParams {
                page: Some(2),
                page_size: Some(10),
                search: Some("cyberpunk".to_string()),
                ..Default::default()
            })
            .await
            .unwrap();

        mock.assert_async().await;
    }

    #[tokio::test]
    async fn search_issues_exactly_one_request() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET).path("/games").query_param("search", "test");
                then.status(200).json_body(json!({ "count": 0, "results": [] }));
            })
            .await;

        let client = CatalogClient::new(client_config(&server.base_url())).unwrap();
        let page = client
            .search("test", GameSearchParams {
                page_size: Some(40),
                ..Default::default()
            })
            .await
            .unwrap();

        assert_eq!(mock.hits_async().await, 1);
        assert_eq!(page, CatalogPage::empty());
    }

    #[tokio::test]
    async fn shapers_send_fixed_parameters() {
        let server = MockServer::start_async().await;
        let popular = server
            .mock_async(|when, then| {
                when.path("/games")
                    .query_param("ordering", "-rating,-reviews_count")
                    .query_param("metacritic", "80,100");
                then.status(200).json_body(games_response());
            })
            .await;
        let genre = server
            .mock_async(|when, then| {
                when.path("/games").query_param("genres", "action");
                then.status(200).json_body(games_response());
            })
            .await;
        let platform = server
            .mock_async(|when, then| {
                when.path("/games").query_param("platforms", "4");
                then.status(200).json_body(games_response());
            })
            .await;
        let free = server
            .mock_async(|when, then| {
                when.path("/games").query_param("tags", "free-to-play");
                then.status(200).json_body(games_response());
            })
            .await;
        let recent = server
            .mock_async(|when, then| {
                when.path("/games")
                    .query_param("ordering", "-released")
                    .query_param_exists("dates");
                then.status(200).json_body(games_response());
            })
            .await;

        let client = CatalogClient::new(client_config(&server.base_url())).unwrap();
        client.popular(Default::default()).await.unwrap();
        client.by_genre("action", Default::default()).await.unwrap();
        client.by_platform("4", Default::default()).await.unwrap();
        client.free(Default::default()).await.unwrap();
        client.recent(Default::default()).await.unwrap();

        popular.assert_async().await;
        genre.assert_async().await;
        platform.assert_async().await;
        free.assert_async().await;
        recent.assert_async().await;
    }

    #[tokio::test]
    async fn fetch_by_id_requests_game_path() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/games/1")
                    .query_param(API_KEY_PARAM, API_KEY);
                then.status(200).json_body(json!({
                    "id": 1,
                    "name": "Test Game",
                    "description": "<p>A test game</p>",
                    "background_image": "https://example.com/test.jpg"
                }));
            })
            .await;

        let client = CatalogClient::new(client_config(&server.base_url())).unwrap();
        let record = client.fetch_by_id(1).await.unwrap();

        mock.assert_async().await;
        assert_eq!(record.name, "Test Game");
        assert_eq!(
            record.background_image.as_deref(),
            Some("https://example.com/test.jpg")
        );
    }

    // region: Error response handling

    /// Non-success responses carry the status text
    #[tokio::test]
    async fn fetch_list_error_status() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|_, then| {
                then.status(404);
            })
            .await;

        let client = CatalogClient::new(client_config(&server.base_url())).unwrap();
        let result = client.fetch_list(GameSearchParams::default()).await;

        mock.assert_async().await;
        match result {
            Err(ListError::CatalogClientError(CatalogClientError::Http {
                status,
                status_text,
            })) => {
                assert_eq!(status, StatusCode::NOT_FOUND);
                assert_eq!(status_text, "Not Found");
            },
            other => panic!("expected Http error, found: {other:?}"),
        }
    }

    /// 404 on a single game is mapped to [GameError::NotFound]
    #[tokio::test]
    async fn fetch_by_id_not_found() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.path("/games/999");
                then.status(404)
                    .json_body(json!({ "detail": "Not found." }));
            })
            .await;

        let client = CatalogClient::new(client_config(&server.base_url())).unwrap();
        let result = client.fetch_by_id(999).await;

        mock.assert_async().await;
        assert!(
            matches!(result, Err(GameError::NotFound(999))),
            "expected GameError::NotFound, found: {result:?}"
        );
    }

    /// Other error statuses on a single game stay generic
    #[tokio::test]
    async fn fetch_by_id_server_error() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|_, then| {
                then.status(500);
            })
            .await;

        let client = CatalogClient::new(client_config(&server.base_url())).unwrap();
        let err = client.fetch_by_id(1).await.unwrap_err();

        assert_eq!(
            err.to_string(),
            "failed to fetch game: 500 Internal Server Error"
        );
    }

    /// A malformed body fails differently from an HTTP failure
    #[tokio::test]
    async fn malformed_body_is_parse_error() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|_, then| {
                then.status(200)
                    .header("content-type", "application/json")
                    .body("{\"count\": 1, \"results\": [");
            })
            .await;

        let client = CatalogClient::new(client_config(&server.base_url())).unwrap();
        let result = client.fetch_list(GameSearchParams::default()).await;

        assert!(
            matches!(
                result,
                Err(ListError::CatalogClientError(CatalogClientError::Parse(_)))
            ),
            "expected Parse error, found: {result:?}"
        );
    }

    #[tokio::test]
    async fn unreachable_catalog_is_transport_error() {
        let client = CatalogClient::new(client_config("http://127.0.0.1:1")).unwrap();
        let result = client.fetch_by_id(1).await;

        assert!(
            matches!(
                result,
                Err(GameError::CatalogClientError(CatalogClientError::Transport(_)))
            ),
            "expected Transport error, found: {result:?}"
        );
    }

    /// Without an API key nothing is sent
    #[tokio::test]
    async fn missing_api_key_fails_without_request() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|_, then| {
                then.status(200).json_body(json!({ "count": 0, "results": [] }));
            })
            .await;

        let config = CatalogClientConfig {
            api_key: None,
            ..client_config(&server.base_url())
        };
        let client = CatalogClient::new(config).unwrap();
        let result = client.fetch_list(GameSearchParams::default()).await;

        assert_eq!(mock.hits_async().await, 0);
        assert!(
            matches!(
                result,
                Err(ListError::CatalogClientError(CatalogClientError::MissingApiKey))
            ),
            "expected MissingApiKey, found: {result:?}"
        );
    }

    // endregion

    #[tokio::test]
    async fn user_agent_set_on_requests() {
        let expected_agent = "my-custom-user-agent";

        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.header("user-agent", expected_agent);
                then.status(200).json_body(json!({ "count": 0, "results": [] }));
            })
            .await;

        let config = CatalogClientConfig {
            user_agent: Some(expected_agent.to_owned()),
            ..client_config(&server.base_url())
        };

        let client = CatalogClient::new(config).unwrap();
        let _ = client.fetch_list(GameSearchParams::default()).await;
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn update_config_rebuilds_client() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.query_param(API_KEY_PARAM, "rotated-key");
                then.status(200).json_body(json!({ "count": 0, "results": [] }));
            })
            .await;

        let mut client = CatalogClient::new(client_config(&server.base_url())).unwrap();
        client
            .update_config(|config| config.api_key = Some("rotated-key".to_string()))
            .unwrap();
        client.fetch_list(GameSearchParams::default()).await.unwrap();

        mock.assert_async().await;
        assert_eq!(client.catalog_url(), server.base_url());
    }

    #[test]
    fn debug_output_hides_api_key() {
        let client = CatalogClient::new(client_config("http://catalog.invalid")).unwrap();
        let debug = format!("{client:?}");
        assert!(!debug.contains(API_KEY), "{debug}");
    }
}
