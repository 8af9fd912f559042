use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use bayline_auth::TokenStore;
use bayline_client::{ApiClient, ClientConfig};
use serde::Serialize;

pub mod auth;
pub mod health;

/// Name of the HTTP-only cookie carrying the backend bearer token.
pub const SESSION_COOKIE: &str = "bayline_session";

#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        ApiResponse {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn error(message: String) -> ApiResponse<()> {
        ApiResponse {
            success: false,
            data: None,
            error: Some(message),
        }
    }
}

#[derive(Clone)]
pub struct AppState {
    pub client: ApiClient,
}

pub fn create_router(api_url: &str) -> anyhow::Result<Router> {
    let tokens = Arc::new(TokenStore::new());
    let client = ApiClient::new(ClientConfig::new(api_url), tokens)?;
    Ok(router_with_state(AppState { client }))
}

pub fn router_with_state(state: AppState) -> Router {
    Router::new()
        .route("/api/health", get(health::health_check))
        .route("/api/auth/login", post(auth::login))
        .route("/api/auth/session", get(auth::session))
        .route("/api/auth/logout", post(auth::logout))
        .route("/api/auth/password-reset", post(auth::password_reset))
        .with_state(state)
}
