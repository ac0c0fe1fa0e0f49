use std::sync::Arc;
use tokio::sync::mpsc::UnboundedSender;
use tubesum_api::endpoints::VideoId;
use tubesum_auth::{AuthError, AuthenticatedClient, SessionStore, Settings};

use crate::events::DataEvent;

const RELOGIN_MESSAGE: &str = "Failed to fetch videos. Please log in again.";
const EXPIRED_MESSAGE: &str =
    "Session token expired. Type `refresh` to renew it, then try again.";

/// Runs API work for commands and reports the outcome as `DataEvent`s
pub struct DataLoader<S> {
    client: Arc<AuthenticatedClient<S>>,
    settings: Arc<Settings>,
    data_tx: UnboundedSender<DataEvent>,
}

impl<S> Clone for DataLoader<S> {
    fn clone(&self) -> Self {
        Self {
            client: self.client.clone(),
            settings: self.settings.clone(),
            data_tx: self.data_tx.clone(),
        }
    }
}

impl<S: SessionStore + 'static> DataLoader<S> {
    pub fn new(
        client: Arc<AuthenticatedClient<S>>,
        settings: Arc<Settings>,
        data_tx: UnboundedSender<DataEvent>,
    ) -> Self {
        Self {
            client,
            settings,
            data_tx,
        }
    }

    fn send(&self, event: DataEvent) {
        // Receiver is gone only during shutdown
        let _ = self.data_tx.send(event);
    }

    /// Reproduce the authenticated view from storage, without a new login
    pub async fn restore_session(&self, load_videos: bool) {
        match self.client.session() {
            Ok(Some((identity, _))) => {
                tracing::info!(channel_id = %identity.channel_id, "Restored stored session");
                self.send(DataEvent::SessionRestored { identity });
                if load_videos {
                    self.load_videos().await;
                }
            }
            Ok(None) => {
                tracing::debug!("No stored session");
                self.send(DataEvent::NoStoredSession);
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to read stored session");
                self.send(DataEvent::NoStoredSession);
                self.send(DataEvent::LoadError {
                    error: format!("Could not read stored session: {}", e),
                });
            }
        }
    }

    pub async fn login(&self) {
        let result = tubesum_auth::login(&self.settings, self.client.auth_client()).await;

        let (identity, token) = match result {
            Ok(session) => session,
            Err(e) => {
                tracing::warn!(error = %e, "Login failed");
                self.send(DataEvent::LoginFailed {
                    error: e.to_string(),
                });
                return;
            }
        };

        if let Err(e) = self.client.complete_login(&identity, &token) {
            tracing::error!(error = %e, "Failed to store session");
            self.send(DataEvent::LoginFailed {
                error: e.to_string(),
            });
            return;
        }

        self.send(DataEvent::LoginCompleted { identity });
        self.load_videos().await;
    }

    pub async fn load_videos(&self) {
        match self.client.fetch_videos().await {
            Ok(videos) => {
                tracing::info!(count = videos.len(), "Videos loaded");
                self.send(DataEvent::VideosLoaded { videos });
            }
            Err(e) if e.requires_login() => {
                tracing::warn!(error = %e, "Session unusable, logging out");
                self.end_session(RELOGIN_MESSAGE).await;
            }
            Err(e) => {
                self.send(DataEvent::VideosLoadFailed {
                    error: e.to_string(),
                });
            }
        }
    }

    pub async fn load_user(&self) {
        match self.client.fetch_user().await {
            Ok(identity) => self.send(DataEvent::UserLoaded { identity }),
            Err(e) => self.report(e).await,
        }
    }

    pub async fn load_comments(&self, video_id: VideoId) {
        match self.client.list_comments(&video_id).await {
            Ok(comments) => self.send(DataEvent::CommentsLoaded { video_id, comments }),
            Err(e) => self.report(e).await,
        }
    }

    pub async fn summarize(&self, video_id: VideoId, prompt: String) {
        tracing::info!(%video_id, "Requesting comment summary");
        match self.client.summarize_comments(&video_id, &prompt).await {
            Ok(summary) => self.send(DataEvent::SummaryLoaded { video_id, summary }),
            Err(AuthError::InsufficientScope(message)) => {
                // Session already cleared by the client
                self.send(DataEvent::SessionEnded { message });
            }
            Err(e) => self.report(e).await,
        }
    }

    pub async fn logout(&self) {
        match self.client.logout().await {
            Ok(()) => self.send(DataEvent::LoggedOut),
            Err(e) => {
                tracing::error!(error = %e, "Failed to clear session");
                self.send(DataEvent::LoadError {
                    error: format!("Failed to log out: {}", e),
                });
            }
        }
    }

    async fn report(&self, error: AuthError) {
        if error.requires_login() {
            self.end_session(&format!("{}. Session ended; please log in again.", error))
                .await;
        } else if error.is_expired_token() {
            // Only the video list renews tokens; the stored session is kept
            self.send(DataEvent::LoadError {
                error: EXPIRED_MESSAGE.to_string(),
            });
        } else {
            self.send(DataEvent::LoadError {
                error: error.to_string(),
            });
        }
    }

    /// Forced logout after an unrecoverable auth failure
    async fn end_session(&self, message: &str) {
        if let Err(e) = self.client.logout().await {
            tracing::error!(error = %e, "Failed to clear session");
        }
        self.send(DataEvent::SessionEnded {
            message: message.to_string(),
        });
    }
}
