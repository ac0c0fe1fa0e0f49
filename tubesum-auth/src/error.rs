use thiserror::Error;
use tubesum_api::TubesumApiError;

use crate::client::auth_client::AuthClientError;

#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Session storage error: {0}")]
    SessionStorage(String),

    #[error("Not logged in")]
    NotLoggedIn,

    #[error("Token refresh failed: {0}")]
    RefreshFailed(AuthClientError),

    #[error("Session rejected after token refresh: {0}")]
    SessionRejected(TubesumApiError),

    #[error("Request timed out after {0:?}")]
    RequestTimeout(std::time::Duration),

    #[error("Missing permissions: {0}")]
    InsufficientScope(String),

    #[error("Login failed: {0}")]
    Login(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Auth error: {0}")]
    AuthClient(#[from] AuthClientError),

    #[error("API error: {0}")]
    Api(#[from] TubesumApiError),
}

impl AuthError {
    /// Errors after which the stored session can no longer be used.
    pub fn requires_login(&self) -> bool {
        match self {
            AuthError::NotLoggedIn
            | AuthError::RefreshFailed(_)
            | AuthError::SessionRejected(_)
            | AuthError::InsufficientScope(_) => true,
            _ => false,
        }
    }

    /// A 401 from a call that does not refresh; the session may still be renewable.
    pub fn is_expired_token(&self) -> bool {
        matches!(self, AuthError::Api(e) if e.is_unauthorized())
    }
}

impl From<config::ConfigError> for AuthError {
    fn from(err: config::ConfigError) -> Self {
        AuthError::Configuration(err.to_string())
    }
}
