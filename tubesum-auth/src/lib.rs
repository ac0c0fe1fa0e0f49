// Identity and token types shared by the store and the clients
pub mod common;

mod client;
mod error;

pub use client::{
    auth_client::AuthClientError, login, AuthenticatedClient, CallbackListener, CallbackParams,
    FileSessionStore, MemorySessionStore, ServerAuthClient, SessionStore, Settings,
};
pub use common::{SessionToken, UserIdentity};
pub use error::AuthError;
