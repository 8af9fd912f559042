//! Session routes.
//!
//! The console server sits between the dashboard and the backend: the
//! dashboard never sees the bearer token. Login proxies credentials to the
//! backend and moves the returned token into an HTTP-only cookie; session
//! lookup reads the cookie back into the token store before asking the
//! backend who the user is.

use axum::extract::State;
use axum::http::header::{HeaderMap, COOKIE, SET_COOKIE};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use bayline_auth::TokenInfo;
use bayline_client::{ApiError, AuthApi, CurrentUser};
use serde::Deserialize;

use super::{ApiResponse, AppState, SESSION_COOKIE};

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct PasswordResetRequest {
    pub email: String,
}

fn session_cookie(token: &str) -> String {
    format!(
        "{}={}; HttpOnly; SameSite=Lax; Path=/",
        SESSION_COOKIE, token
    )
}

fn expired_session_cookie() -> String {
    format!("{}=; HttpOnly; SameSite=Lax; Path=/; Max-Age=0", SESSION_COOKIE)
}

fn cookie_token(headers: &HeaderMap) -> Option<String> {
    let cookies = headers.get(COOKIE)?.to_str().ok()?;
    cookies.split(';').find_map(|pair| {
        let (name, value) = pair.trim().split_once('=')?;
        (name == SESSION_COOKIE && !value.is_empty()).then(|| value.to_string())
    })
}

fn error_status(error: &ApiError) -> StatusCode {
    error
        .status
        .and_then(|status| StatusCode::from_u16(status).ok())
        .unwrap_or(StatusCode::BAD_GATEWAY)
}

fn error_response(error: ApiError) -> Response {
    (
        error_status(&error),
        Json(ApiResponse::<()>::error(error.message)),
    )
        .into_response()
}

pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Response {
    let auth = AuthApi::new(&state.client);
    match auth.login(&request.email, &request.password).await {
        Ok(response) => match auth.me().await {
            Ok(user) => (
                [(SET_COOKIE, session_cookie(&response.access_token))],
                Json(ApiResponse::success(user)),
            )
                .into_response(),
            Err(e) => error_response(e),
        },
        Err(e) => {
            tracing::debug!("Login rejected: {}", e.message);
            error_response(e)
        }
    }
}

pub async fn session(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let Some(token) = cookie_token(&headers) else {
        return (
            StatusCode::UNAUTHORIZED,
            Json(ApiResponse::<()>::error("Not authenticated".to_string())),
        )
            .into_response();
    };

    // Single-user console: the cookie is the source of truth for the
    // backend token between requests.
    state.client.tokens().set(TokenInfo::bearer(token));
    match AuthApi::new(&state.client).me().await {
        Ok(user) => Json(ApiResponse::<CurrentUser>::success(user)).into_response(),
        Err(e) => error_response(e),
    }
}

pub async fn logout(State(state): State<AppState>, headers: HeaderMap) -> Response {
    if let Some(token) = cookie_token(&headers) {
        state.client.tokens().set(TokenInfo::bearer(token));
        // Best effort; the cookie is cleared regardless.
        if let Err(e) = AuthApi::new(&state.client).logout().await {
            tracing::debug!("Backend logout failed: {}", e.message);
        }
    }
    state.client.tokens().clear();

    (
        [(SET_COOKIE, expired_session_cookie())],
        Json(ApiResponse::success(serde_json::json!({
            "message": "Logged out"
        }))),
    )
        .into_response()
}

pub async fn password_reset(
    State(state): State<AppState>,
    Json(request): Json<PasswordResetRequest>,
) -> Response {
    match AuthApi::new(&state.client)
        .request_password_reset(&request.email)
        .await
    {
        Ok(response) => Json(ApiResponse::success(serde_json::json!({
            "message": response.message
        })))
        .into_response(),
        Err(e) => error_response(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cookie_token_extraction() {
        let mut headers = HeaderMap::new();
        headers.insert(
            COOKIE,
            "theme=dark; bayline_session=tok-123; other=x".parse().unwrap(),
        );
        assert_eq!(cookie_token(&headers), Some("tok-123".to_string()));
    }

    #[test]
    fn test_missing_or_empty_cookie_yields_none() {
        assert_eq!(cookie_token(&HeaderMap::new()), None);

        let mut headers = HeaderMap::new();
        headers.insert(COOKIE, "bayline_session=".parse().unwrap());
        assert_eq!(cookie_token(&headers), None);
    }

    #[test]
    fn test_session_cookie_is_http_only() {
        let cookie = session_cookie("tok");
        assert!(cookie.contains("HttpOnly"));
        assert!(cookie.starts_with("bayline_session=tok"));
        assert!(expired_session_cookie().contains("Max-Age=0"));
    }
}
