use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

/// Account details returned by the login redirect
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserIdentity {
    pub name: String,
    pub email: String,
    pub channel_id: String,
}

impl From<tubesum_api::endpoints::users::UserResponse> for UserIdentity {
    fn from(user: tubesum_api::endpoints::users::UserResponse) -> Self {
        Self {
            name: user.name,
            email: user.email,
            channel_id: user.channel_id,
        }
    }
}

/// Opaque bearer token. Redacted in `Debug` output.
#[derive(Debug, Clone)]
pub struct SessionToken(SecretString);

impl SessionToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(SecretString::from(token.into()))
    }

    pub fn expose(&self) -> &str {
        self.0.expose_secret()
    }

    pub fn bearer_header(&self) -> String {
        format!("Bearer {}", self.expose())
    }
}

impl PartialEq for SessionToken {
    fn eq(&self, other: &Self) -> bool {
        self.expose() == other.expose()
    }
}

impl Eq for SessionToken {}

impl From<&str> for SessionToken {
    fn from(token: &str) -> Self {
        Self::new(token)
    }
}
