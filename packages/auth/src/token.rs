use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Token information stored locally
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenInfo {
    pub token: String,
    pub expires_at: Option<DateTime<Utc>>,
    pub user_email: Option<String>,
    pub user_role: Option<String>,
}

impl TokenInfo {
    /// A bare bearer token with no expiry metadata, as returned by
    /// `POST /auth/login`.
    pub fn bearer(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            expires_at: None,
            user_email: None,
            user_role: None,
        }
    }

    /// Check if the token is expired (with 5 minute buffer). Tokens without
    /// expiry metadata never expire client-side; the backend's 401 is the
    /// source of truth for those.
    pub fn is_expired(&self) -> bool {
        match self.expires_at {
            Some(expires_at) => {
                let buffer = Duration::minutes(5);
                expires_at < Utc::now() + buffer
            }
            None => false,
        }
    }

    /// Check if the token is valid (not expired)
    pub fn is_valid(&self) -> bool {
        !self.is_expired()
    }
}
