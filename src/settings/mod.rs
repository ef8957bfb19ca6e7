//! Platform settings grouped by category

mod types;

use std::sync::Arc;

use crate::error::Result;
use crate::fetch::HttpClient;

pub use types::*;

/// Client for `/settings`
#[derive(Debug, Clone)]
pub struct SettingsApi {
    http: Arc<HttpClient>,
}

impl SettingsApi {
    pub(crate) fn new(http: Arc<HttpClient>) -> Self {
        Self { http }
    }

    pub async fn all(&self) -> Result<AllSettings> {
        self.http.get("/settings").execute().await
    }

    pub async fn category(&self, name: &str) -> Result<SettingsMap> {
        self.http.get("/settings").segment(name).execute().await
    }

    /// Replace the values of one category; returns what the server stored
    pub async fn update(&self, name: &str, values: &SettingsMap) -> Result<SettingsMap> {
        self.http
            .put("/settings")
            .segment(name)
            .json(values)?
            .execute()
            .await
    }
}
