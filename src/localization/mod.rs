//! Location detection, supported currencies, conversion and rate administration

mod types;

use std::sync::Arc;

use crate::error::Result;
use crate::fetch::HttpClient;

pub use types::*;

/// Client for `/localization` and `/admin/currency-rates`
#[derive(Debug, Clone)]
pub struct LocalizationApi {
    http: Arc<HttpClient>,
}

impl LocalizationApi {
    pub(crate) fn new(http: Arc<HttpClient>) -> Self {
        Self { http }
    }

    pub async fn detect_location(&self) -> Result<LocationInfo> {
        self.http.get("/localization/detect-location").execute().await
    }

    pub async fn currencies(&self) -> Result<Vec<CurrencyInfo>> {
        self.http.get("/localization/currencies").execute().await
    }

    /// Convert with the server's current rate
    pub async fn convert(&self, amount: f64, from: &str, to: &str) -> Result<ConversionResult> {
        self.http
            .post("/localization/convert")
            .json(&ConversionRequest {
                amount,
                from_currency: from,
                to_currency: to,
            })?
            .execute()
            .await
    }

    pub async fn rates(&self) -> Result<Vec<CurrencyRate>> {
        self.http.get("/admin/currency-rates").execute().await
    }

    pub async fn update_rate(&self, code: &str, rate: f64) -> Result<CurrencyRate> {
        self.http
            .put("/admin/currency-rates")
            .segment(code)
            .json(&RateUpdate { rate })?
            .execute()
            .await
    }

    /// Ask the server to pull fresh rates from its provider
    pub async fn refresh_rates(&self) -> Result<Vec<CurrencyRate>> {
        self.http.post("/admin/currency-rates/refresh").execute().await
    }
}
