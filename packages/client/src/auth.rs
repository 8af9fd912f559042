//! Auth endpoints: login, current user, logout, password reset.
//!
//! Login is an OAuth2 password form; the returned access token is placed in
//! the shared token store so subsequent requests carry it.

use bayline_auth::TokenInfo;
use serde::{Deserialize, Serialize};

use crate::client::ApiClient;
use crate::error::ApiResult;

#[derive(Debug, Serialize)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginResponse {
    pub access_token: String,
    pub token_type: String,
}

/// Authenticated user as returned by `GET /auth/me`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentUser {
    pub id: String,
    pub email: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct PasswordResetRequest {
    pub email: String,
}

#[derive(Debug, Serialize)]
pub struct PasswordResetConfirm {
    pub token: String,
    pub new_password: String,
}

#[derive(Debug, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

/// Auth operations over the shared client.
pub struct AuthApi<'a> {
    client: &'a ApiClient,
}

impl<'a> AuthApi<'a> {
    pub fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// Log in and store the returned bearer token.
    pub async fn login(&self, username: &str, password: &str) -> ApiResult<LoginResponse> {
        let form = LoginForm {
            username: username.to_string(),
            password: password.to_string(),
        };
        let response: LoginResponse = self.client.post_form("/auth/login", &form).await?;
        self.client
            .tokens()
            .set(TokenInfo::bearer(response.access_token.clone()));
        Ok(response)
    }

    pub async fn me(&self) -> ApiResult<CurrentUser> {
        self.client.get("/auth/me").await
    }

    /// Log out server-side and drop the local token either way.
    pub async fn logout(&self) -> ApiResult<MessageResponse> {
        let result = self.client.post_empty("/auth/logout").await;
        self.client.tokens().clear();
        result
    }

    pub async fn request_password_reset(&self, email: &str) -> ApiResult<MessageResponse> {
        let body = PasswordResetRequest {
            email: email.to_string(),
        };
        self.client.post("/auth/request-password-reset", &body).await
    }

    pub async fn reset_password(&self, token: &str, new_password: &str) -> ApiResult<MessageResponse> {
        let body = PasswordResetConfirm {
            token: token.to_string(),
            new_password: new_password.to_string(),
        };
        self.client.post("/auth/reset-password", &body).await
    }
}
