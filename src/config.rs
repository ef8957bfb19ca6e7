//! Configuration options for the travel booking client

use std::path::PathBuf;
use std::time::Duration;

use url::Url;

use crate::error::{Error, Result};

/// Environment variable holding the API base URL
pub const API_URL_ENV: &str = "TRAVEL_API_URL";

/// Environment variable holding the token file location
pub const TOKEN_PATH_ENV: &str = "TRAVEL_TOKEN_PATH";

/// Configuration options for the client
#[derive(Debug, Clone)]
pub struct ClientOptions {
    /// The request timeout. `None` leaves it to the platform default.
    pub request_timeout: Option<Duration>,

    /// The key the bearer token is persisted under
    pub token_storage_key: String,

    /// File used to persist the token. `None` keeps it in memory only.
    pub token_storage_path: Option<PathBuf>,

    /// The User-Agent header sent with every request
    pub user_agent: String,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            request_timeout: None,
            token_storage_key: "auth_token".to_string(),
            token_storage_path: None,
            user_agent: format!("travel-booking-client/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl ClientOptions {
    /// Set the request timeout
    pub fn with_request_timeout(mut self, value: Option<Duration>) -> Self {
        self.request_timeout = value;
        self
    }

    /// Set the key the token is stored under
    pub fn with_token_storage_key(mut self, value: &str) -> Self {
        self.token_storage_key = value.to_string();
        self
    }

    /// Persist the token to a file
    pub fn with_token_storage_path(mut self, value: impl Into<PathBuf>) -> Self {
        self.token_storage_path = Some(value.into());
        self
    }

    /// Set the User-Agent header
    pub fn with_user_agent(mut self, value: &str) -> Self {
        self.user_agent = value.to_string();
        self
    }
}

/// Base URL plus options, usually loaded from the environment
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub base_url: String,
    pub options: ClientOptions,
}

impl ClientConfig {
    /// Creates a new configuration, validating the URL.
    pub fn new(base_url: &str, options: ClientOptions) -> Result<Self> {
        Ok(Self {
            base_url: normalize_base_url(base_url)?,
            options,
        })
    }

    /// Reads `TRAVEL_API_URL` and optionally `TRAVEL_TOKEN_PATH`.
    pub fn from_env() -> Result<Self> {
        let url = std::env::var(API_URL_ENV)
            .map_err(|_| Error::config(format!("{} environment variable not found", API_URL_ENV)))?;

        let mut options = ClientOptions::default();
        if let Ok(path) = std::env::var(TOKEN_PATH_ENV) {
            options = options.with_token_storage_path(path);
        }

        Self::new(&url, options)
    }
}

/// Validate a base URL and strip the trailing slash
pub fn normalize_base_url(raw: &str) -> Result<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(Error::config("API base URL cannot be empty"));
    }
    let parsed = Url::parse(trimmed)?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(Error::config(format!("unsupported URL scheme: {}", parsed.scheme())));
    }
    Ok(trimmed.trim_end_matches('/').to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_is_normalized() {
        assert_eq!(
            normalize_base_url("https://api.example.com/api/v1/").unwrap(),
            "https://api.example.com/api/v1"
        );
        assert!(normalize_base_url("").is_err());
        assert!(normalize_base_url("ftp://example.com").is_err());
        assert!(normalize_base_url("not a url").is_err());
    }

    #[test]
    fn defaults_have_no_timeout() {
        let options = ClientOptions::default();
        assert!(options.request_timeout.is_none());
        assert_eq!(options.token_storage_key, "auth_token");
        assert!(options.token_storage_path.is_none());
    }
}
