//! Shared token state.
//!
//! One `TokenStore` is constructed at application start and handed to the
//! API client and the console server. Consumers subscribe to learn about
//! login/logout without polling.

use std::path::PathBuf;

use bayline_core::store::{Store, Subscription};
use tokio::fs;

use crate::error::{AuthError, AuthResult};
use crate::token::TokenInfo;

/// In-memory bearer-token state with optional on-disk persistence.
pub struct TokenStore {
    state: Store<Option<TokenInfo>>,
    config_path: PathBuf,
}

impl TokenStore {
    /// Create a store persisting to the default location (~/.bayline/auth.toml).
    pub fn new() -> Self {
        Self::with_path(bayline_core::bayline_dir().join("auth.toml"))
    }

    /// Create a store persisting to an explicit path (used by tests).
    pub fn with_path(config_path: PathBuf) -> Self {
        Self {
            state: Store::new(None),
            config_path,
        }
    }

    /// Load a previously persisted token, if any.
    pub async fn init(&self) -> AuthResult<()> {
        if let Err(e) = self.load().await {
            tracing::debug!("Could not load existing token: {}", e);
        }
        Ok(())
    }

    pub fn current(&self) -> Option<TokenInfo> {
        self.state.get()
    }

    /// The raw bearer token, if a valid one is held.
    pub fn bearer_token(&self) -> Option<String> {
        self.state
            .get()
            .filter(|info| info.is_valid())
            .map(|info| info.token)
    }

    pub fn is_authenticated(&self) -> bool {
        self.bearer_token().is_some()
    }

    /// Store a new token and notify subscribers.
    pub fn set(&self, info: TokenInfo) {
        self.state.set(Some(info));
    }

    /// Drop the held token (e.g. after an HTTP 401) and notify subscribers.
    pub fn clear(&self) {
        self.state.set(None);
    }

    pub fn subscribe(
        &self,
        listener: impl Fn(&Option<TokenInfo>) + Send + Sync + 'static,
    ) -> Subscription {
        self.state.subscribe(listener)
    }

    pub fn unsubscribe(&self, subscription: Subscription) {
        self.state.unsubscribe(subscription);
    }

    /// Persist the current token to disk.
    pub async fn save(&self) -> AuthResult<()> {
        let Some(info) = self.state.get() else {
            // Nothing held; remove any stale file.
            if self.config_path.exists() {
                fs::remove_file(&self.config_path).await?;
            }
            return Ok(());
        };

        if let Some(parent) = self.config_path.parent() {
            fs::create_dir_all(parent).await?;
        }

        let toml_content = toml::to_string_pretty(&info)
            .map_err(|e| AuthError::config(format!("Failed to serialize token: {}", e)))?;
        fs::write(&self.config_path, toml_content).await?;
        Ok(())
    }

    /// Load token state from disk, replacing whatever is held.
    pub async fn load(&self) -> AuthResult<()> {
        if !self.config_path.exists() {
            return Err(AuthError::config("No auth configuration found"));
        }

        let content = fs::read_to_string(&self.config_path).await?;
        let info: TokenInfo = toml::from_str(&content)
            .map_err(|e| AuthError::config(format!("Invalid auth configuration: {}", e)))?;
        self.state.set(Some(info));
        Ok(())
    }
}

impl Default for TokenStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[test]
    fn test_clear_notifies_subscribers() {
        let store = TokenStore::with_path(PathBuf::from("/nonexistent/auth.toml"));
        let notified = Arc::new(AtomicUsize::new(0));
        let notified_clone = notified.clone();
        store.subscribe(move |_| {
            notified_clone.fetch_add(1, Ordering::SeqCst);
        });

        store.set(TokenInfo::bearer("tok"));
        assert!(store.is_authenticated());
        store.clear();
        assert!(!store.is_authenticated());
        assert_eq!(notified.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_expired_token_is_not_usable() {
        let store = TokenStore::with_path(PathBuf::from("/nonexistent/auth.toml"));
        store.set(TokenInfo {
            token: "tok".to_string(),
            expires_at: Some(chrono::Utc::now() - chrono::Duration::hours(2)),
            user_email: None,
            user_role: None,
        });
        assert!(store.bearer_token().is_none());
    }

    #[tokio::test]
    async fn test_save_and_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("auth.toml");

        let store = TokenStore::with_path(path.clone());
        store.set(TokenInfo::bearer("persisted"));
        store.save().await.unwrap();

        let restored = TokenStore::with_path(path);
        restored.load().await.unwrap();
        assert_eq!(restored.bearer_token().as_deref(), Some("persisted"));
    }

    #[tokio::test]
    async fn test_save_with_no_token_removes_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("auth.toml");

        let store = TokenStore::with_path(path.clone());
        store.set(TokenInfo::bearer("tok"));
        store.save().await.unwrap();
        assert!(path.exists());

        store.clear();
        store.save().await.unwrap();
        assert!(!path.exists());
    }
}
