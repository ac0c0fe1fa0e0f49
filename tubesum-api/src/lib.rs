pub mod endpoints;
mod error;
mod macros;
pub mod repositories;

pub use crate::error::{ErrorDetail, TubesumApiError};
use repositories::*;
use tower_api_client::Client as ApiClient;
pub use tower_api_client::Request as ApiRequest;

pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

/// Bearer-authenticated client for the summarizer API.
///
/// The token is fixed for the lifetime of the client; callers that refresh
/// tokens build a new client with the replacement.
pub struct Client {
    inner: ApiClient,
}

impl Client {
    pub fn new(access_token: &str) -> Self {
        Self::with_base_url(DEFAULT_BASE_URL, access_token)
    }

    pub fn with_base_url(base_url: &str, access_token: &str) -> Self {
        Self {
            inner: ApiClient::new(base_url.trim_end_matches('/')).bearer_auth(access_token),
        }
    }

    pub async fn send<R>(&self, request: R) -> Result<R::Response, TubesumApiError>
    where
        R: ApiRequest,
    {
        self.inner.send(request).await.map_err(From::from)
    }
}

pub struct Request;

impl Request {
    pub fn comments() -> CommentRepository {
        CommentRepository::new()
    }

    pub fn users() -> UserRepository {
        UserRepository::new()
    }

    pub fn videos() -> VideoRepository {
        VideoRepository::new()
    }
}
