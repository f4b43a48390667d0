use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::sync::{Arc, RwLock};
use tracing::{info, warn};

/// Token cell shared with the API client so every outgoing request sees the
/// current bearer token without the client holding auth state itself.
pub type SharedToken = Arc<RwLock<Option<String>>>;

#[derive(Debug, Clone, Serialize, Deserialize)]
struct StoredSession {
    token: String,
}

/// Process-wide authentication state with an explicit lifecycle: construct,
/// `restore()` once at startup (loads the persisted token and flips `ready`),
/// then mutate only through `sign_in` / `sign_out`.
#[derive(Debug)]
pub struct AuthState {
    token: SharedToken,
    ready: bool,
    file_path: Option<PathBuf>,
}

impl AuthState {
    /// Session file under the OS config directory. The file name is the
    /// fixed storage key the mobile client used for its token.
    fn default_session_path() -> Option<PathBuf> {
        Some(dirs::config_dir()?.join("dealgrown").join("session.json"))
    }

    pub fn new() -> Self {
        Self {
            token: Arc::new(RwLock::new(None)),
            ready: false,
            file_path: Self::default_session_path(),
        }
    }

    #[cfg(test)]
    pub fn with_file_path(path: PathBuf) -> Self {
        Self {
            token: Arc::new(RwLock::new(None)),
            ready: false,
            file_path: Some(path),
        }
    }

    /// Load the persisted session, if any. Failures are logged and leave the
    /// state signed out; the app still becomes ready.
    pub fn restore(&mut self) {
        match self.try_load() {
            Ok(Some(token)) => {
                info!("Restored persisted session");
                self.set_token(Some(token));
            }
            Ok(None) => {
                info!("No persisted session found");
            }
            Err(error) => {
                warn!("Could not restore session: {error:#}");
            }
        }
        self.ready = true;
    }

    fn try_load(&self) -> Result<Option<String>> {
        let Some(path) = &self.file_path else {
            return Ok(None);
        };
        if !path.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read session file {}", path.display()))?;
        let stored: StoredSession =
            serde_json::from_str(&content).context("Failed to parse session file")?;
        Ok(Some(stored.token))
    }

    /// True once `restore` has run, whether or not a token was found.
    pub fn is_ready(&self) -> bool {
        self.ready
    }

    pub fn is_authenticated(&self) -> bool {
        self.token
            .read()
            .map(|token| token.is_some())
            .unwrap_or(false)
    }

    /// Clone of the shared token cell for the API client.
    pub fn shared_token(&self) -> SharedToken {
        Arc::clone(&self.token)
    }

    /// Persist the token, then make it visible to outgoing requests. On a
    /// persistence failure the in-memory state is left unchanged.
    pub fn sign_in(&mut self, token: String) -> Result<()> {
        if let Some(path) = &self.file_path {
            if let Some(dir) = path.parent() {
                fs::create_dir_all(dir).with_context(|| {
                    format!("Failed to create config directory {}", dir.display())
                })?;
            }
            let stored = StoredSession {
                token: token.clone(),
            };
            let content =
                serde_json::to_string_pretty(&stored).context("Failed to serialize session")?;
            fs::write(path, content)
                .with_context(|| format!("Failed to write session file {}", path.display()))?;
            info!(session_file = %path.display(), "Saved session");
        }
        self.set_token(Some(token));
        Ok(())
    }

    /// Remove the persisted token and clear the in-memory state.
    pub fn sign_out(&mut self) -> Result<()> {
        if let Some(path) = &self.file_path
            && path.exists()
        {
            fs::remove_file(path)
                .with_context(|| format!("Failed to remove session file {}", path.display()))?;
            info!(session_file = %path.display(), "Removed session");
        }
        self.set_token(None);
        Ok(())
    }

    fn set_token(&mut self, token: Option<String>) {
        if let Ok(mut cell) = self.token.write() {
            *cell = token;
        }
    }
}

impl Default for AuthState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_session_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("dealgrown_auth_test_{name}.json"))
    }

    #[test]
    fn restore_without_file_is_signed_out_but_ready() {
        let path = temp_session_path("missing");
        let _ = fs::remove_file(&path);
        let mut auth = AuthState::with_file_path(path);
        assert!(!auth.is_ready());
        auth.restore();
        assert!(auth.is_ready());
        assert!(!auth.is_authenticated());
    }

    #[test]
    fn sign_in_persists_and_restores() {
        let path = temp_session_path("roundtrip");
        let _ = fs::remove_file(&path);

        let mut auth = AuthState::with_file_path(path.clone());
        auth.restore();
        auth.sign_in("tok-123".to_string()).unwrap();
        assert!(auth.is_authenticated());

        let mut fresh = AuthState::with_file_path(path.clone());
        fresh.restore();
        assert!(fresh.is_authenticated());
        assert_eq!(
            fresh.shared_token().read().unwrap().as_deref(),
            Some("tok-123")
        );

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn sign_out_removes_file_and_clears_token() {
        let path = temp_session_path("signout");
        let _ = fs::remove_file(&path);

        let mut auth = AuthState::with_file_path(path.clone());
        auth.restore();
        auth.sign_in("tok-456".to_string()).unwrap();
        auth.sign_out().unwrap();

        assert!(!auth.is_authenticated());
        assert!(!path.exists());
    }

    #[test]
    fn corrupt_session_file_is_swallowed() {
        let path = temp_session_path("corrupt");
        fs::write(&path, "not json").unwrap();

        let mut auth = AuthState::with_file_path(path.clone());
        auth.restore();
        assert!(auth.is_ready());
        assert!(!auth.is_authenticated());

        let _ = fs::remove_file(&path);
    }
}
