pub mod auth_client;
mod callback;
mod config;
mod session;
mod session_store;

pub use auth_client::ServerAuthClient;
pub use callback::{CallbackListener, CallbackParams};
pub use config::Settings;
pub use session::AuthenticatedClient;
pub use session_store::{FileSessionStore, MemorySessionStore, SessionStore};

use crate::common::{SessionToken, UserIdentity};
use crate::error::AuthError;

/// Run the browser login: listen for the redirect, open the login page and
/// wait for the identity and token to arrive.
pub async fn login(
    settings: &Settings,
    auth_client: &ServerAuthClient,
) -> Result<(UserIdentity, SessionToken), AuthError> {
    let addr = settings
        .callback_socket_addr()
        .map_err(AuthError::Configuration)?;

    // Bind before opening the browser so the redirect cannot race the listener
    let listener = CallbackListener::bind(addr).await?;
    let login_url = auth_client.login_url();

    tracing::info!(%addr, "Waiting for login redirect");

    if let Err(e) = open::that(&login_url) {
        tracing::warn!(error = %e, "Failed to open browser");
        eprintln!("Failed to open browser automatically: {}", e);
        eprintln!("\nPlease open this URL in your browser:");
        eprintln!("{}\n", login_url);
    } else {
        println!("Browser opened. Please sign in with your Google account...");
        println!("\nYou can also open this URL directly in your browser:");
        println!("{}\n", login_url);
    }

    let session = listener
        .wait_for_session(settings.login_timeout())
        .await
        .map_err(|e| AuthError::Login(e.to_string()))?;

    Ok(session)
}
