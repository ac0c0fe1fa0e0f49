use axum::{
    extract::{Query, State},
    response::Html,
    routing::get,
    Router,
};
use serde::Deserialize;
use std::future::IntoFuture;
use std::net::SocketAddr;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::sync::mpsc;
use tower_http::trace::TraceLayer;

use super::auth_client::AuthClientError;
use crate::common::{SessionToken, UserIdentity};

const SUCCESS_HTML: &str = r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="utf-8">
    <title>Signed in to tubesum</title>
    <style>
        body { font-family: -apple-system, "Segoe UI", Roboto, Arial, sans-serif; margin: 4rem auto; max-width: 32rem; color: #1F2937; }
        h1 { font-size: 1.5rem; }
    </style>
</head>
<body>
    <h1>Signed in as {NAME}</h1>
    <p>You can close this tab and return to your terminal.</p>
</body>
</html>"#;

const ERROR_HTML_TEMPLATE: &str = r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="utf-8">
    <title>tubesum sign-in problem</title>
    <style>
        body { font-family: -apple-system, "Segoe UI", Roboto, Arial, sans-serif; margin: 4rem auto; max-width: 32rem; color: #1F2937; }
        h1 { font-size: 1.5rem; color: #991B1B; }
        code { background: #FEE2E2; padding: 0.25rem 0.5rem; border-radius: 4px; }
    </style>
</head>
<body>
    <h1>Sign-in did not complete</h1>
    <p><code>{ERROR}</code></p>
    <p>Return to your terminal and try again.</p>
</body>
</html>"#;

/// Query parameters the API server appends to the post-login redirect.
#[derive(Debug, Default, Deserialize)]
pub struct CallbackParams {
    pub name: Option<String>,
    pub email: Option<String>,
    pub channel_id: Option<String>,
    pub access_token: Option<String>,
    pub error: Option<String>,
}

impl CallbackParams {
    /// Identity and token, when every field is present and non-empty.
    pub fn into_session(self) -> Option<(UserIdentity, SessionToken)> {
        let non_empty = |value: Option<String>| value.filter(|v| !v.trim().is_empty());

        let identity = UserIdentity {
            name: non_empty(self.name)?,
            email: non_empty(self.email)?,
            channel_id: non_empty(self.channel_id)?,
        };
        let token = SessionToken::new(non_empty(self.access_token)?);
        Some((identity, token))
    }
}

#[derive(Debug)]
enum CallbackOutcome {
    Completed(UserIdentity, SessionToken),
    Failed(String),
}

#[derive(Clone)]
struct CallbackState {
    outcome_tx: mpsc::UnboundedSender<CallbackOutcome>,
}

/// Local HTTP listener that receives the browser redirect after login.
pub struct CallbackListener {
    listener: TcpListener,
}

impl CallbackListener {
    pub async fn bind(addr: SocketAddr) -> Result<Self, AuthClientError> {
        let listener = TcpListener::bind(addr).await.map_err(|e| {
            AuthClientError::Callback(format!("Could not listen on {}: {}", addr, e))
        })?;
        Ok(Self { listener })
    }

    pub fn local_addr(&self) -> Result<SocketAddr, AuthClientError> {
        self.listener
            .local_addr()
            .map_err(|e| AuthClientError::Callback(e.to_string()))
    }

    /// Serve until a complete redirect arrives, an error is reported, or the
    /// timeout elapses.
    pub async fn wait_for_session(
        self,
        timeout: Duration,
    ) -> Result<(UserIdentity, SessionToken), AuthClientError> {
        let (outcome_tx, mut outcome_rx) = mpsc::unbounded_channel();
        let app = Router::new()
            .route("/", get(handle_callback))
            .layer(TraceLayer::new_for_http())
            .with_state(CallbackState { outcome_tx });

        // The server lives inside this future, so dropping the waiter closes the port
        let server = axum::serve(self.listener, app).into_future();
        let outcome = tokio::select! {
            result = server => {
                let reason = match result {
                    Ok(()) => "Callback listener stopped".to_string(),
                    Err(e) => format!("Callback listener stopped: {}", e),
                };
                tracing::error!(%reason);
                return Err(AuthClientError::Callback(reason));
            }
            outcome = tokio::time::timeout(timeout, outcome_rx.recv()) => outcome,
        };

        match outcome {
            Ok(Some(CallbackOutcome::Completed(identity, token))) => Ok((identity, token)),
            Ok(Some(CallbackOutcome::Failed(error))) => Err(AuthClientError::Callback(error)),
            Ok(None) => Err(AuthClientError::Callback(
                "Callback listener closed unexpectedly".to_string(),
            )),
            Err(_) => Err(AuthClientError::Timeout),
        }
    }
}

async fn handle_callback(
    State(state): State<CallbackState>,
    Query(params): Query<CallbackParams>,
) -> Html<String> {
    if let Some(error) = params.error.clone() {
        tracing::warn!(error = %error, "Login redirect reported an error");
        let _ = state.outcome_tx.send(CallbackOutcome::Failed(error.clone()));
        return Html(ERROR_HTML_TEMPLATE.replace("{ERROR}", &escape_html(&error)));
    }

    match params.into_session() {
        Some((identity, token)) => {
            tracing::info!(channel_id = %identity.channel_id, "Login redirect received");
            let page = SUCCESS_HTML.replace("{NAME}", &escape_html(&identity.name));
            let _ = state
                .outcome_tx
                .send(CallbackOutcome::Completed(identity, token));
            Html(page)
        }
        None => {
            tracing::debug!("Ignoring redirect with incomplete parameters");
            Html(ERROR_HTML_TEMPLATE.replace("{ERROR}", "Missing login parameters"))
        }
    }
}

fn escape_html(raw: &str) -> String {
    raw.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
