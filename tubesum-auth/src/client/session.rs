use std::time::Duration;
use tubesum_api::endpoints::{videos::Video, VideoId};
use tubesum_api::{ApiRequest, Client, Request};

use super::auth_client::ServerAuthClient;
use super::session_store::SessionStore;
use crate::common::{SessionToken, UserIdentity};
use crate::error::AuthError;

const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Where a request stands in the refresh-once policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Attempt {
    Initial,
    Refreshed,
}

/// API access on behalf of the stored session.
///
/// Only `fetch_videos` recovers from an expired token, and it does so at most
/// once per call: one refresh, one retry.
pub struct AuthenticatedClient<S> {
    store: S,
    auth_client: ServerAuthClient,
    request_timeout: Duration,
}

impl<S: SessionStore> AuthenticatedClient<S> {
    pub fn new(store: S, auth_client: ServerAuthClient) -> Self {
        Self {
            store,
            auth_client,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }

    /// Upper bound on each API request; an elapsed request fails with `RequestTimeout`.
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn login_url(&self) -> String {
        self.auth_client.login_url()
    }

    pub fn auth_client(&self) -> &ServerAuthClient {
        &self.auth_client
    }

    /// The stored session, if both identity and token are present.
    pub fn session(&self) -> Result<Option<(UserIdentity, SessionToken)>, AuthError> {
        self.store.load()
    }

    /// Persist the identity and token delivered by the login redirect.
    pub fn complete_login(
        &self,
        identity: &UserIdentity,
        token: &SessionToken,
    ) -> Result<(), AuthError> {
        self.store.save(identity, token)?;
        tracing::info!(channel_id = %identity.channel_id, "Session stored");
        Ok(())
    }

    fn current_token(&self) -> Result<SessionToken, AuthError> {
        self.store
            .load()?
            .map(|(_, token)| token)
            .ok_or(AuthError::NotLoggedIn)
    }

    async fn send<R: ApiRequest>(
        &self,
        token: &SessionToken,
        request: R,
    ) -> Result<R::Response, AuthError> {
        let client = Client::with_base_url(self.auth_client.server_url(), token.expose());
        match tokio::time::timeout(self.request_timeout, client.send(request)).await {
            Ok(result) => Ok(result?),
            Err(_) => {
                tracing::warn!(timeout = ?self.request_timeout, "API request timed out");
                Err(AuthError::RequestTimeout(self.request_timeout))
            }
        }
    }

    pub async fn fetch_videos(&self) -> Result<Vec<Video>, AuthError> {
        let mut token = self.current_token()?;
        let mut attempt = Attempt::Initial;

        loop {
            match self.send(&token, Request::videos().list()).await {
                Ok(response) => {
                    tracing::debug!(count = response.videos.len(), "Fetched videos");
                    return Ok(response.videos);
                }
                Err(AuthError::Api(e)) if e.is_unauthorized() => match attempt {
                    Attempt::Initial => {
                        tracing::info!("Video request unauthorized, refreshing token");
                        token = self.refresh(&token).await?;
                        attempt = Attempt::Refreshed;
                    }
                    Attempt::Refreshed => {
                        tracing::warn!(error = %e, "Refreshed token rejected");
                        return Err(AuthError::SessionRejected(e));
                    }
                },
                Err(e) => {
                    tracing::warn!(error = %e, ?attempt, "Fetching videos failed");
                    return Err(e);
                }
            }
        }
    }

    async fn refresh(&self, token: &SessionToken) -> Result<SessionToken, AuthError> {
        let new_token = self
            .auth_client
            .refresh_token(token)
            .await
            .map_err(AuthError::RefreshFailed)?;
        self.store.update_token(&new_token)?;
        tracing::info!("Token refreshed");
        Ok(new_token)
    }

    /// Summarize a video's comments. A response indicating missing OAuth scopes
    /// ends the session so the user can log in again and grant them.
    pub async fn summarize_comments(
        &self,
        video_id: &VideoId,
        prompt: &str,
    ) -> Result<String, AuthError> {
        let token = self.current_token()?;
        let request = Request::comments()
            .with_video(video_id.clone())
            .summarize(prompt);

        match self.send(&token, request).await {
            Ok(response) => Ok(response.summary),
            Err(AuthError::Api(e)) if e.is_insufficient_scope() => {
                tracing::warn!(error = %e, "Token lacks the scopes needed to read comments");
                self.store.clear()?;
                Err(AuthError::InsufficientScope(
                    "Please log in again to grant necessary permissions.".to_string(),
                ))
            }
            Err(e) => Err(e),
        }
    }

    pub async fn list_comments(&self, video_id: &VideoId) -> Result<Vec<String>, AuthError> {
        let token = self.current_token()?;
        let response = self
            .send(&token, Request::comments().with_video(video_id.clone()).list())
            .await?;
        Ok(response.comments)
    }

    pub async fn fetch_user(&self) -> Result<UserIdentity, AuthError> {
        let token = self.current_token()?;
        let user = self.send(&token, Request::users().me()).await?;
        Ok(user.into())
    }

    /// End the session. Local state is always cleared; a failing server call
    /// is only logged.
    pub async fn logout(&self) -> Result<(), AuthError> {
        match self.store.load() {
            Ok(Some((_, token))) => {
                if let Err(e) = self.auth_client.logout(&token).await {
                    tracing::warn!(error = %e, "Server logout failed, clearing local session anyway");
                }
            }
            Ok(None) => {}
            Err(e) => tracing::warn!(error = %e, "Could not read stored session"),
        }
        self.store.clear()?;
        tracing::info!("Logged out");
        Ok(())
    }
}
