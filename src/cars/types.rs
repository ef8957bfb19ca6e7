//! Types for car rentals

use serde::{Deserialize, Serialize};

use crate::money::Money;
use crate::types::Id;

/// Gearbox of a rental car
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Transmission {
    Automatic,
    Manual,
}

/// A rental car
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Car {
    pub id: Id,
    pub name: String,
    #[serde(default)]
    pub category: Option<String>,
    pub price: f64,
    pub currency: String,
    #[serde(default)]
    pub passengers: Option<u32>,
    #[serde(default)]
    pub transmission: Option<Transmission>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default = "default_true")]
    pub is_available: bool,
}

fn default_true() -> bool {
    true
}

impl Car {
    pub fn price(&self) -> Money {
        Money::new(self.price, &self.currency)
    }
}

/// Public car search filters
#[derive(Debug, Clone, Default, Serialize)]
pub struct CarSearchParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pickup_location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pickup_date: Option<chrono::NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub return_date: Option<chrono::NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub passengers: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transmission: Option<Transmission>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(rename = "perPage", skip_serializing_if = "Option::is_none")]
    pub per_page: Option<u32>,
}

/// Admin create/edit form
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CarForm {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    pub price: f64,
    pub currency: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub passengers: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transmission: Option<Transmission>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    pub is_available: bool,
}
