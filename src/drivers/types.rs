//! Types for drivers and their trips

use serde::{Deserialize, Serialize};

use crate::bookings::BookingStatus;
use crate::money::Money;
use crate::types::Id;

/// A chauffeur attached to car bookings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Driver {
    pub id: Id,
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub license_number: Option<String>,
    #[serde(default)]
    pub license_expiry: Option<String>,
    /// Whether the account is enabled at all
    #[serde(default = "default_true")]
    pub is_active: bool,
    /// Whether the driver takes new trips right now; stored independently
    /// of `is_active`
    #[serde(default)]
    pub is_available: bool,
    #[serde(default)]
    pub rating: f32,
    #[serde(default)]
    pub total_trips: u32,
}

fn default_true() -> bool {
    true
}

impl Driver {
    /// Only active drivers that are marked available can be assigned
    pub fn is_assignable(&self) -> bool {
        self.is_active && self.is_available
    }

    /// Rating clamped to the 0-5 scale
    pub fn rating(&self) -> f32 {
        self.rating.clamp(0.0, 5.0)
    }
}

/// Driver list filters
#[derive(Debug, Clone, Default, Serialize)]
pub struct DriverQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_available: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

/// Admin create/edit form
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DriverForm {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub license_number: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub license_expiry: Option<String>,
    pub is_active: bool,
    pub is_available: bool,
}

/// A new driver starts active and ready for assignment
impl Default for DriverForm {
    fn default() -> Self {
        Self {
            name: String::new(),
            email: String::new(),
            phone: String::new(),
            license_number: String::new(),
            license_expiry: None,
            is_active: true,
            is_available: true,
        }
    }
}

impl DriverForm {
    pub fn from_driver(driver: &Driver) -> Self {
        Self {
            name: driver.name.clone(),
            email: driver.email.clone().unwrap_or_default(),
            phone: driver.phone.clone().unwrap_or_default(),
            license_number: driver.license_number.clone().unwrap_or_default(),
            license_expiry: driver.license_expiry.clone(),
            is_active: driver.is_active,
            is_available: driver.is_available,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub(crate) struct AvailabilityChange {
    pub is_available: bool,
}

/// Progress of a trip from the driver's point of view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TripStatus {
    Pending,
    EnRoute,
    InProgress,
    Completed,
    Cancelled,
}

impl TripStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, TripStatus::Completed | TripStatus::Cancelled)
    }

    /// The next step on the happy path
    pub fn next(&self) -> Option<TripStatus> {
        match self {
            TripStatus::Pending => Some(TripStatus::EnRoute),
            TripStatus::EnRoute => Some(TripStatus::InProgress),
            TripStatus::InProgress => Some(TripStatus::Completed),
            TripStatus::Completed | TripStatus::Cancelled => None,
        }
    }

    /// One step forward, or cancellation from any non-terminal state
    pub fn can_transition_to(&self, to: TripStatus) -> bool {
        if self.is_terminal() {
            return false;
        }
        to == TripStatus::Cancelled || self.next() == Some(to)
    }

    /// Targets a driver may pick from this state
    pub fn allowed_transitions(&self) -> Vec<TripStatus> {
        let mut targets: Vec<TripStatus> = self.next().into_iter().collect();
        if !self.is_terminal() {
            targets.push(TripStatus::Cancelled);
        }
        targets
    }
}

/// A car booking as the assigned driver sees it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trip {
    #[serde(alias = "id")]
    pub booking_id: Id,
    pub booking_reference: String,
    pub status: BookingStatus,
    pub trip_status: TripStatus,
    #[serde(default)]
    pub pickup_location: Option<String>,
    #[serde(default)]
    pub dropoff_location: Option<String>,
    #[serde(default)]
    pub pickup_time: Option<String>,
    #[serde(default)]
    pub customer_name: Option<String>,
    #[serde(default)]
    pub customer_phone: Option<String>,
    #[serde(default)]
    pub customer_email: Option<String>,
    #[serde(default)]
    pub total_amount: Option<f64>,
    #[serde(default)]
    pub currency: Option<String>,
}

impl Trip {
    /// Fare with its currency, when the server disclosed both
    pub fn fare(&self) -> Option<Money> {
        match (self.total_amount, &self.currency) {
            (Some(amount), Some(currency)) => Some(Money::new(amount, currency)),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub(crate) struct TripStatusChange {
    pub trip_status: TripStatus,
}
