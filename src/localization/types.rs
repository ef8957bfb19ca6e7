//! Types for localization and currency rates

use serde::{Deserialize, Serialize};

/// Result of the location lookup used to pick a default currency
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationInfo {
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub country_code: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    pub currency: String,
    #[serde(default)]
    pub language: Option<String>,
}

/// A currency the platform can display
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrencyInfo {
    pub code: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub symbol: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub(crate) struct ConversionRequest<'a> {
    pub amount: f64,
    pub from_currency: &'a str,
    pub to_currency: &'a str,
}

/// A server-side conversion
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversionResult {
    #[serde(alias = "converted_amount")]
    pub amount: f64,
    #[serde(alias = "to_currency")]
    pub currency: String,
    #[serde(default)]
    pub rate: Option<f64>,
}

/// An exchange rate managed by admins
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrencyRate {
    #[serde(alias = "code")]
    pub currency_code: String,
    pub rate: f64,
    #[serde(default)]
    pub base_currency: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub(crate) struct RateUpdate {
    pub rate: f64,
}
