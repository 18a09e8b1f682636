//! A catalog client serving seeded responses.

use std::collections::VecDeque;
use std::path::Path;
use std::sync::{Arc, Mutex};

use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::client::ClientTrait;
use crate::error::{CatalogClientError, GameError, ListError};
use crate::params::GameSearchParams;
use crate::types::{CatalogPage, CatalogRecord, GameId};

type MockField<T> = Arc<Mutex<T>>;

/// An error status the mock client should answer with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MockErrorResponse {
    pub status: u16,
}

impl TryFrom<MockErrorResponse> for CatalogClientError {
    type Error = MockDataError;

    fn try_from(value: MockErrorResponse) -> Result<Self, Self::Error> {
        let status = StatusCode::from_u16(value.status)
            .map_err(|_| MockDataError::InvalidData(format!("invalid status code {}", value.status)))?;
        Ok(CatalogClientError::from_status(status))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Response {
    List(CatalogPage),
    Game(CatalogRecord),
    Error(MockErrorResponse),
}

/// A request received by a [MockClient].
#[derive(Debug, Clone, PartialEq)]
pub enum MockRequest {
    List(GameSearchParams),
    Game(GameId),
}

#[derive(Debug, Error)]
pub enum MockDataError {
    /// Failed to read the JSON file with mock responses
    #[error("failed to read mock response file")]
    ReadMockFile(#[source] std::io::Error),
    /// Failed to parse the contents of the mock data file as JSON
    #[error("failed to parse mock data as JSON")]
    ParseJson(#[source] serde_json::Error),
    /// The data was parsed as JSON but it wasn't semantically valid
    #[error("invalid mocked data: {0}")]
    InvalidData(String),
}

/// Reads a list of mock responses from disk.
fn read_mock_responses(path: impl AsRef<Path>) -> Result<VecDeque<Response>, MockDataError> {
    let contents = std::fs::read_to_string(path).map_err(MockDataError::ReadMockFile)?;
    let deserialized: Vec<Response> =
        serde_json::from_str(&contents).map_err(MockDataError::ParseJson)?;

    for response in &deserialized {
        if let Response::Error(err) = response {
            CatalogClientError::try_from(err.clone())?;
        }
    }

    Ok(deserialized.into())
}

/// A catalog client that can be seeded with mock responses.
///
/// Responses are served in order, regardless of the request.
/// Requests are recorded and can be inspected with [MockClient::requests].
#[derive(Debug, Default, Clone)]
pub struct MockClient {
    // Shared so responses can be pushed through a clone handed to another owner.
    pub mock_responses: MockField<VecDeque<Response>>,
    requests: MockField<Vec<MockRequest>>,
}

impl MockClient {
    /// Create a new mock client, potentially reading mock responses from disk
    pub fn new(mock_data_path: Option<impl AsRef<Path>>) -> Result<Self, MockDataError> {
        let mock_responses = match mock_data_path {
            Some(path) => read_mock_responses(path)?,
            None => VecDeque::new(),
        };
        Ok(Self {
            mock_responses: Arc::new(Mutex::new(mock_responses)),
            requests: Default::default(),
        })
    }

    /// Push a new list response into the list of mock responses
    pub fn push_list_response(&self, page: CatalogPage) {
        self.push(Response::List(page));
    }

    /// Push a new single game response into the list of mock responses
    pub fn push_game_response(&self, record: CatalogRecord) {
        self.push(Response::Game(record));
    }

    /// Push an HTTP error into the list of mock responses
    pub fn push_error_response(&self, status: u16) {
        self.push(Response::Error(MockErrorResponse { status }));
    }

    /// All requests received so far, oldest first.
    pub fn requests(&self) -> Vec<MockRequest> {
        self.requests
            .lock()
            .expect("couldn't acquire mock lock")
            .clone()
    }

    fn push(&self, response: Response) {
        self.mock_responses
            .lock()
            .expect("couldn't acquire mock lock")
            .push_back(response);
    }

    fn next_response(&self, request: MockRequest) -> Option<Response> {
        self.requests
            .lock()
            .expect("couldn't acquire mock lock")
            .push(request);
        self.mock_responses
            .lock()
            .expect("couldn't acquire mock lock")
            .pop_front()
    }
}

fn no_response_left() -> CatalogClientError {
    CatalogClientError::Other("no mock response left".to_string())
}

impl ClientTrait for MockClient {
    async fn fetch_list(&self, params: GameSearchParams) -> Result<CatalogPage, ListError> {
        let mock_resp = self.next_response(MockRequest::List(params));
        match mock_resp {
            Some(Response::List(page)) => Ok(page),
            Some(Response::Error(err)) => Err(ListError::CatalogClientError(
                err.try_into()
                    .expect("couldn't convert mock error response"),
            )),
            Some(other) => Err(ListError::CatalogClientError(CatalogClientError::Other(
                format!("expected list response, found {other:?}"),
            ))),
            None => Err(ListError::CatalogClientError(no_response_left())),
        }
    }

    async fn fetch_by_id(&self, id: GameId) -> Result<CatalogRecord, GameError> {
        let mock_resp = self.next_response(MockRequest::Game(id));
        match mock_resp {
            Some(Response::Game(record)) => Ok(record),
            Some(Response::Error(err)) => Err(GameError::for_game(
                id,
                err.try_into()
                    .expect("couldn't convert mock error response"),
            )),
            Some(other) => Err(GameError::for_game(
                id,
                CatalogClientError::Other(format!("expected game response, found {other:?}")),
            )),
            None => Err(GameError::for_game(id, no_response_left())),
        }
    }
}
