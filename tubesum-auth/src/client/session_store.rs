use crate::common::{SessionToken, UserIdentity};
use crate::error::AuthError;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

const IDENTITY_FILE: &str = "user_data.json";
const TOKEN_FILE: &str = "access_token";

/// Persistence for the logged-in identity and its bearer token.
///
/// Identity and token are stored together or not at all: `load` reports a
/// session only when both halves are present.
pub trait SessionStore: Send + Sync {
    fn save(&self, identity: &UserIdentity, token: &SessionToken) -> Result<(), AuthError>;

    fn load(&self) -> Result<Option<(UserIdentity, SessionToken)>, AuthError>;

    fn clear(&self) -> Result<(), AuthError>;

    /// Replace the token of the current session, keeping its identity.
    fn update_token(&self, token: &SessionToken) -> Result<(), AuthError> {
        let (identity, _) = self.load()?.ok_or(AuthError::NotLoggedIn)?;
        self.save(&identity, token)
    }
}

/// Two files under the user cache directory, one per persisted key.
pub struct FileSessionStore {
    identity_path: PathBuf,
    token_path: PathBuf,
}

impl FileSessionStore {
    pub fn new() -> Result<Self, AuthError> {
        let cache_dir = dirs::cache_dir()
            .ok_or_else(|| AuthError::Configuration("Could not find cache directory".to_string()))?
            .join("tubesum");
        Self::in_dir(cache_dir)
    }

    pub fn in_dir(dir: impl Into<PathBuf>) -> Result<Self, AuthError> {
        let dir = dir.into();

        if !dir.exists() {
            fs::create_dir_all(&dir).map_err(|e| {
                AuthError::SessionStorage(format!("Failed to create cache directory: {}", e))
            })?;
        }

        Ok(Self {
            identity_path: dir.join(IDENTITY_FILE),
            token_path: dir.join(TOKEN_FILE),
        })
    }

    fn write_private(path: &Path, contents: &str) -> Result<(), AuthError> {
        fs::write(path, contents)
            .map_err(|e| AuthError::SessionStorage(format!("Failed to save session: {}", e)))?;

        // Set permissions to 0600 (read/write for owner only)
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mut perms = fs::metadata(path)
                .map_err(|e| {
                    AuthError::SessionStorage(format!("Failed to get file permissions: {}", e))
                })?
                .permissions();
            perms.set_mode(0o600);
            fs::set_permissions(path, perms).map_err(|e| {
                AuthError::SessionStorage(format!("Failed to set file permissions: {}", e))
            })?;
        }

        Ok(())
    }

    fn remove_if_exists(path: &Path) -> Result<(), AuthError> {
        match fs::remove_file(path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(AuthError::SessionStorage(format!(
                "Failed to delete {}: {}",
                path.display(),
                e
            ))),
        }
    }
}

impl SessionStore for FileSessionStore {
    fn save(&self, identity: &UserIdentity, token: &SessionToken) -> Result<(), AuthError> {
        let json = serde_json::to_string_pretty(identity)?;
        Self::write_private(&self.token_path, token.expose())?;
        Self::write_private(&self.identity_path, &json)?;
        Ok(())
    }

    fn load(&self) -> Result<Option<(UserIdentity, SessionToken)>, AuthError> {
        let has_identity = self.identity_path.exists();
        let has_token = self.token_path.exists();

        if !(has_identity && has_token) {
            if has_identity || has_token {
                tracing::warn!("Found half of a stored session, ignoring it");
            }
            return Ok(None);
        }

        let json = fs::read_to_string(&self.identity_path)
            .map_err(|e| AuthError::SessionStorage(format!("Failed to read identity: {}", e)))?;
        let token = fs::read_to_string(&self.token_path)
            .map_err(|e| AuthError::SessionStorage(format!("Failed to read token: {}", e)))?;

        let token = token.trim();
        if token.is_empty() {
            return Ok(None);
        }

        let identity: UserIdentity = serde_json::from_str(&json)?;
        Ok(Some((identity, SessionToken::new(token))))
    }

    fn clear(&self) -> Result<(), AuthError> {
        let token_result = Self::remove_if_exists(&self.token_path);
        let identity_result = Self::remove_if_exists(&self.identity_path);
        token_result.and(identity_result)
    }
}

/// Process-local store, used by tests and `--ephemeral` runs.
#[derive(Default)]
pub struct MemorySessionStore {
    session: Mutex<Option<(UserIdentity, SessionToken)>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_session(identity: UserIdentity, token: SessionToken) -> Self {
        Self {
            session: Mutex::new(Some((identity, token))),
        }
    }

    fn lock(
        &self,
    ) -> Result<std::sync::MutexGuard<'_, Option<(UserIdentity, SessionToken)>>, AuthError> {
        self.session
            .lock()
            .map_err(|_| AuthError::SessionStorage("Session lock poisoned".to_string()))
    }
}

impl SessionStore for MemorySessionStore {
    fn save(&self, identity: &UserIdentity, token: &SessionToken) -> Result<(), AuthError> {
        *self.lock()? = Some((identity.clone(), token.clone()));
        Ok(())
    }

    fn load(&self) -> Result<Option<(UserIdentity, SessionToken)>, AuthError> {
        Ok(self.lock()?.clone())
    }

    fn clear(&self) -> Result<(), AuthError> {
        *self.lock()? = None;
        Ok(())
    }
}

impl<S: SessionStore + ?Sized> SessionStore for std::sync::Arc<S> {
    fn save(&self, identity: &UserIdentity, token: &SessionToken) -> Result<(), AuthError> {
        (**self).save(identity, token)
    }

    fn load(&self) -> Result<Option<(UserIdentity, SessionToken)>, AuthError> {
        (**self).load()
    }

    fn clear(&self) -> Result<(), AuthError> {
        (**self).clear()
    }

    fn update_token(&self, token: &SessionToken) -> Result<(), AuthError> {
        (**self).update_token(token)
    }
}
