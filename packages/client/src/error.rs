//! Normalized API error types
//!
//! The backend is FastAPI-shaped: failures carry either a plain string
//! `detail` or a list of `{loc, msg, type}` validation entries. Both forms,
//! plus transport and decode failures, normalize into [`ApiError`].

use serde_json::Value;
use thiserror::Error;

/// Result type for API operations
pub type ApiResult<T> = Result<T, ApiError>;

/// One field-level validation detail extracted from a FastAPI `detail` array.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDetail {
    /// Location path, e.g. `["body", "quantity"]`. Numeric segments are
    /// stringified.
    pub loc: Vec<String>,
    pub msg: String,
    pub kind: String,
}

/// Any failed request, normalized.
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct ApiError {
    /// HTTP status, absent for transport-level failures.
    pub status: Option<u16>,
    /// Stable machine-readable code: `http_<status>`, `network`, or `decode`.
    pub code: String,
    pub message: String,
    pub details: Vec<FieldDetail>,
    /// Raw response body, kept for logging and debugging.
    pub original: Option<String>,
}

impl ApiError {
    /// Transport-level failure (connect, timeout, TLS).
    pub fn network(err: reqwest::Error) -> Self {
        Self {
            status: None,
            code: "network".to_string(),
            message: format!("Network error: {}", err),
            details: Vec::new(),
            original: None,
        }
    }

    /// A 2xx body that failed to deserialize.
    pub fn decode(err: impl std::fmt::Display) -> Self {
        Self {
            status: None,
            code: "decode".to_string(),
            message: format!("Invalid response: {}", err),
            details: Vec::new(),
            original: None,
        }
    }

    /// Configuration failure (bad base URL, client build).
    pub fn config(msg: impl Into<String>) -> Self {
        Self {
            status: None,
            code: "config".to_string(),
            message: msg.into(),
            details: Vec::new(),
            original: None,
        }
    }

    /// Normalize a non-2xx response body.
    pub fn from_response(status: u16, body: &str) -> Self {
        let mut message = format!("Request failed with status {}", status);
        let mut details = Vec::new();

        if let Ok(parsed) = serde_json::from_str::<Value>(body) {
            match parsed.get("detail") {
                Some(Value::String(detail)) => {
                    message = detail.clone();
                }
                Some(Value::Array(entries)) => {
                    details = entries.iter().filter_map(parse_field_detail).collect();
                    if let Some(first) = details.first() {
                        message = first.msg.clone();
                    }
                }
                _ => {
                    // Some endpoints use {error, message} instead of detail.
                    if let Some(Value::String(msg)) = parsed.get("message") {
                        message = msg.clone();
                    }
                }
            }
        }

        Self {
            status: Some(status),
            code: format!("http_{}", status),
            message,
            details,
            original: if body.is_empty() {
                None
            } else {
                Some(body.to_string())
            },
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        self.status == Some(401)
    }

    pub fn is_network_error(&self) -> bool {
        self.code == "network"
    }
}

fn parse_field_detail(entry: &Value) -> Option<FieldDetail> {
    let obj = entry.as_object()?;
    let loc = obj
        .get("loc")
        .and_then(Value::as_array)
        .map(|segments| {
            segments
                .iter()
                .map(|segment| match segment {
                    Value::String(s) => s.clone(),
                    other => other.to_string(),
                })
                .collect()
        })
        .unwrap_or_default();
    let msg = obj
        .get("msg")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();
    let kind = obj
        .get("type")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();
    Some(FieldDetail { loc, msg, kind })
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        Self::network(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_string_detail_becomes_message() {
        let err = ApiError::from_response(400, r#"{"detail": "Insufficient stock"}"#);
        assert_eq!(err.status, Some(400));
        assert_eq!(err.code, "http_400");
        assert_eq!(err.message, "Insufficient stock");
        assert!(err.details.is_empty());
    }

    #[test]
    fn test_fastapi_detail_array_extracted() {
        let body = r#"{"detail": [
            {"loc": ["body", "quantity"], "msg": "value is not a valid integer", "type": "type_error.integer"},
            {"loc": ["body", 0, "cost"], "msg": "field required", "type": "value_error.missing"}
        ]}"#;
        let err = ApiError::from_response(422, body);
        assert_eq!(err.details.len(), 2);
        assert_eq!(
            err.details[0].loc,
            vec!["body".to_string(), "quantity".to_string()]
        );
        assert_eq!(err.details[1].loc[1], "0");
        assert_eq!(err.message, "value is not a valid integer");
        assert_eq!(err.details[1].kind, "value_error.missing");
    }

    #[test]
    fn test_unparsable_body_keeps_generic_message() {
        let err = ApiError::from_response(500, "<html>oops</html>");
        assert_eq!(err.message, "Request failed with status 500");
        assert_eq!(err.original.as_deref(), Some("<html>oops</html>"));
    }

    #[test]
    fn test_unauthorized_flag() {
        assert!(ApiError::from_response(401, "").is_unauthorized());
        assert!(!ApiError::from_response(403, "").is_unauthorized());
    }
}
