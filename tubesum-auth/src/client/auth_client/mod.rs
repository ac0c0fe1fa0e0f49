mod models;

use crate::common::SessionToken;
pub use models::AuthClientError;
use models::*;
use reqwest::header::AUTHORIZATION;
use reqwest::Client;
use std::time::Duration;

const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Talks to the session endpoints of the API server: login redirect,
/// token refresh and logout.
#[derive(Clone)]
pub struct ServerAuthClient {
    http_client: Client,
    server_url: String,
}

impl ServerAuthClient {
    pub fn new(server_url: impl Into<String>) -> Result<Self, AuthClientError> {
        Self::with_timeout(server_url, Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }

    pub fn with_timeout(
        server_url: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, AuthClientError> {
        let http_client = Client::builder().timeout(timeout).build()?;
        let server_url = server_url.into().trim_end_matches('/').to_string();

        Ok(Self {
            http_client,
            server_url,
        })
    }

    pub fn server_url(&self) -> &str {
        &self.server_url
    }

    /// Browser entry point that starts the OAuth redirect chain.
    pub fn login_url(&self) -> String {
        format!("{}/auth/login", self.server_url)
    }

    /// Exchange the current access token for a new one.
    pub async fn refresh_token(
        &self,
        current: &SessionToken,
    ) -> Result<SessionToken, AuthClientError> {
        let url = format!("{}/api/refresh_token", self.server_url);
        tracing::debug!("Requesting token refresh");

        let resp = self
            .http_client
            .post(&url)
            .header(AUTHORIZATION, current.bearer_header())
            .json(&serde_json::json!({}))
            .send()
            .await?
            .error_for_status()?
            .json::<RefreshResponse>()
            .await?;

        if resp.access_token.is_empty() {
            return Err(AuthClientError::ServerError(
                "Refresh response contained an empty access token".into(),
            ));
        }

        Ok(SessionToken::new(resp.access_token))
    }

    /// Invalidate the server-side session for this token.
    pub async fn logout(&self, token: &SessionToken) -> Result<(), AuthClientError> {
        let url = format!("{}/logout", self.server_url);

        let resp = self
            .http_client
            .get(&url)
            .header(AUTHORIZATION, token.bearer_header())
            .send()
            .await?
            .error_for_status()?
            .json::<LogoutResponse>()
            .await?;

        if let Some(message) = resp.message {
            tracing::debug!(%message, "Server logout");
        }
        Ok(())
    }
}
