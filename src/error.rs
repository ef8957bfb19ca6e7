//! Error handling for the travel booking client

use std::fmt;
use std::sync::Arc;

use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

/// Message used when the server cannot be reached at all
pub const CONNECTION_MESSAGE: &str =
    "Unable to connect to server. Please check your internet connection.";

/// Unified error type for the travel booking client
#[derive(Error, Debug)]
pub enum Error {
    /// The server could not be reached (DNS, refused connection, timeout)
    #[error("{}", CONNECTION_MESSAGE)]
    Connection(#[source] reqwest::Error),

    /// The server answered with a non-2xx status
    #[error("{0}")]
    Api(ApiError),

    /// Any other HTTP client failure
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization or deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// URL parsing errors
    #[error("URL error: {0}")]
    Url(#[from] url::ParseError),

    /// Token decoding errors
    #[error("JWT error: {0}")]
    Jwt(#[from] jsonwebtoken::errors::Error),

    /// Input rejected locally before any request was made
    #[error("{0}")]
    Validation(String),

    /// Token persistence failures
    #[error("Storage error: {0}")]
    Storage(#[from] std::io::Error),

    /// Missing or invalid configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// A checkout submission failed; `message` is the gateway's fixed text
    #[error("{message}")]
    Payment {
        message: String,
        #[source]
        source: Arc<Error>,
    },
}

pub type Result<T> = std::result::Result<T, Error>;

/// Coarse classification used by callers to pick a recovery path
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Connectivity,
    Unauthorized,
    Forbidden,
    NotFound,
    Validation,
    RateLimited,
    Server,
    Other,
}

impl Error {
    /// Create a new validation error
    pub fn validation<T: fmt::Display>(msg: T) -> Self {
        Error::Validation(msg.to_string())
    }

    /// Create a new configuration error
    pub fn config<T: fmt::Display>(msg: T) -> Self {
        Error::Config(msg.to_string())
    }

    /// Classify the error
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Connection(_) => ErrorKind::Connectivity,
            Error::Api(api) => api.kind(),
            Error::Validation(_) => ErrorKind::Validation,
            Error::Payment { source, .. } => source.kind(),
            _ => ErrorKind::Other,
        }
    }

    /// The HTTP status, when the error came from a response
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Api(api) => Some(api.status),
            Error::Payment { source, .. } => source.status(),
            _ => None,
        }
    }

    /// A message that is safe to show to an end user.
    ///
    /// Falls back to `fallback` for failures that carry no user-facing text
    /// (serialization, storage, configuration).
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            Error::Connection(_) => CONNECTION_MESSAGE.to_string(),
            Error::Api(api) => api.user_message(),
            Error::Validation(msg) => msg.clone(),
            Error::Payment { message, .. } => message.clone(),
            _ => fallback.to_string(),
        }
    }
}

/// Which fixed message table applies to a failed response
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorFlavor {
    /// Regular JSON API calls
    Json,
    /// The form-encoded login endpoint
    FormLogin,
}

/// A non-2xx response, reduced to a status and a sanitized message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    /// HTTP status code
    pub status: u16,
    /// Sanitized server detail, or the fixed message for the status
    pub message: String,
    /// Whether `message` came from the server body
    pub from_server: bool,
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

#[derive(Deserialize)]
struct ErrorBody {
    #[serde(default)]
    detail: Option<Value>,
    #[serde(default)]
    message: Option<String>,
}

impl ApiError {
    /// Build an error from the raw parts of a failed response
    pub fn from_response(status: u16, reason: Option<&str>, body: &[u8], flavor: ErrorFlavor) -> Self {
        let detail = serde_json::from_slice::<ErrorBody>(body)
            .ok()
            .and_then(|body| {
                body.detail
                    .and_then(|detail| detail_text(&detail))
                    .or(body.message)
            })
            .map(|text| sanitize(&text))
            .filter(|text| !text.trim().is_empty());

        match detail {
            Some(message) => Self { status, message, from_server: true },
            None => Self {
                status,
                message: status_message(status, reason, flavor),
                from_server: false,
            },
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self.status {
            401 => ErrorKind::Unauthorized,
            403 => ErrorKind::Forbidden,
            404 => ErrorKind::NotFound,
            400 | 422 => ErrorKind::Validation,
            429 => ErrorKind::RateLimited,
            500..=599 => ErrorKind::Server,
            _ => ErrorKind::Other,
        }
    }

    /// Server detail for client errors, the generic text for server errors.
    ///
    /// 5xx bodies tend to carry stack traces or internal identifiers.
    pub fn user_message(&self) -> String {
        if self.from_server && self.kind() == ErrorKind::Server {
            status_message(self.status, None, ErrorFlavor::Json)
        } else {
            self.message.clone()
        }
    }
}

fn detail_text(detail: &Value) -> Option<String> {
    match detail {
        Value::String(s) => Some(s.clone()),
        Value::Array(items) => {
            let parts: Vec<String> = items
                .iter()
                .filter_map(|item| match item {
                    Value::String(s) => Some(s.clone()),
                    Value::Object(obj) => obj.get("msg").and_then(Value::as_str).map(str::to_string),
                    _ => None,
                })
                .collect();
            if parts.is_empty() {
                None
            } else {
                Some(parts.join("; "))
            }
        }
        Value::Object(obj) => obj.get("msg").and_then(Value::as_str).map(str::to_string),
        _ => None,
    }
}

/// Strip characters that could be interpreted as markup
pub fn sanitize(text: &str) -> String {
    text.chars()
        .filter(|c| !matches!(c, '<' | '>' | '"' | '\'' | '&'))
        .collect()
}

/// Fixed message for a status code when the body gave nothing usable
pub fn status_message(status: u16, reason: Option<&str>, flavor: ErrorFlavor) -> String {
    match (status, flavor) {
        (401, ErrorFlavor::FormLogin) => "Invalid credentials".to_string(),
        (401, ErrorFlavor::Json) => {
            "Invalid credentials or session expired. Please log in again.".to_string()
        }
        (403, _) => "Access denied. You do not have permission to perform this action.".to_string(),
        (404, _) => "The requested resource was not found.".to_string(),
        (422, _) => "Invalid data provided. Please check your input.".to_string(),
        (429, _) => "Too many requests. Please try again later.".to_string(),
        (500, _) => "Server error. Please try again later.".to_string(),
        (503, _) => "Service temporarily unavailable. Please try again later.".to_string(),
        _ => format!("HTTP {}: {}", status, reason.unwrap_or("Unknown Status")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detail_is_sanitized() {
        let body = br#"{"detail": "<script>alert('x')</script> & more"}"#;
        let err = ApiError::from_response(400, Some("Bad Request"), body, ErrorFlavor::Json);
        assert!(err.from_server);
        for c in ['<', '>', '"', '\'', '&'] {
            assert!(!err.message.contains(c), "message still contains {c}");
        }
        assert_eq!(err.message, "scriptalert(x)/script  more");
    }

    #[test]
    fn unparseable_body_uses_status_table() {
        let err = ApiError::from_response(404, Some("Not Found"), b"<html>", ErrorFlavor::Json);
        assert!(!err.from_server);
        assert!(err.message.contains("not found"));

        let err = ApiError::from_response(429, None, b"", ErrorFlavor::Json);
        assert!(err.message.contains("Too many requests"));

        let err = ApiError::from_response(418, Some("I'm a teapot"), b"", ErrorFlavor::Json);
        assert_eq!(err.message, "HTTP 418: I'm a teapot");
    }

    #[test]
    fn login_flavor_reports_invalid_credentials() {
        let err = ApiError::from_response(401, Some("Unauthorized"), b"", ErrorFlavor::FormLogin);
        assert_eq!(err.message, "Invalid credentials");
        let err = ApiError::from_response(401, Some("Unauthorized"), b"", ErrorFlavor::Json);
        assert!(err.message.starts_with("Invalid credentials or session expired"));
    }

    #[test]
    fn validation_detail_list_is_joined() {
        let body = br#"{"detail": [{"loc": ["body", "email"], "msg": "field required"}, {"msg": "too short"}]}"#;
        let err = ApiError::from_response(422, None, body, ErrorFlavor::Json);
        assert_eq!(err.message, "field required; too short");
        assert_eq!(err.kind(), ErrorKind::Validation);
    }

    #[test]
    fn blank_detail_falls_back() {
        let err = ApiError::from_response(403, None, br#"{"detail": "<>"}"#, ErrorFlavor::Json);
        assert!(!err.from_server);
        assert!(err.message.starts_with("Access denied"));
    }

    #[test]
    fn server_details_are_not_shown_to_users() {
        let err = ApiError::from_response(500, None, br#"{"detail": "pool exhausted"}"#, ErrorFlavor::Json);
        assert_eq!(err.message, "pool exhausted");
        assert_eq!(err.user_message(), "Server error. Please try again later.");

        let err = ApiError::from_response(409, None, br#"{"detail": "Room already booked"}"#, ErrorFlavor::Json);
        assert_eq!(err.user_message(), "Room already booked");
    }

    #[test]
    fn fixed_text_keeps_flavor_and_reason() {
        let err = ApiError::from_response(401, Some("Unauthorized"), b"", ErrorFlavor::FormLogin);
        assert_eq!(err.user_message(), "Invalid credentials");

        let err = ApiError::from_response(418, Some("I'm a teapot"), b"", ErrorFlavor::Json);
        assert_eq!(err.user_message(), "HTTP 418: I'm a teapot");
    }
}
