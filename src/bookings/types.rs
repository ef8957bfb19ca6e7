//! Types for bookings

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::money::Money;
use crate::types::Id;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookingType {
    Hotel,
    Car,
}

/// Lifecycle of a booking. Transitions are decided by the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    Pending,
    Confirmed,
    Cancelled,
    Completed,
}

impl BookingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Pending => "pending",
            BookingStatus::Confirmed => "confirmed",
            BookingStatus::Cancelled => "cancelled",
            BookingStatus::Completed => "completed",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, BookingStatus::Cancelled | BookingStatus::Completed)
    }
}

/// Payment progress of a booking, usually moved by gateway webhooks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    Pending,
    Paid,
    Failed,
    Refunded,
    AwaitingVerification,
    #[serde(other)]
    Unknown,
}

/// A hotel or car booking
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Booking {
    pub id: Id,
    pub booking_reference: String,
    pub booking_type: BookingType,
    pub status: BookingStatus,
    #[serde(default = "unknown_payment")]
    pub payment_status: PaymentStatus,
    #[serde(default)]
    pub customer_name: Option<String>,
    #[serde(default)]
    pub customer_email: Option<String>,
    #[serde(default)]
    pub customer_phone: Option<String>,
    #[serde(default, alias = "check_in_date", alias = "pickup_date")]
    pub start_date: Option<String>,
    #[serde(default, alias = "check_out_date", alias = "return_date")]
    pub end_date: Option<String>,
    pub total_amount: f64,
    pub currency: String,
    #[serde(default)]
    pub special_requests: Option<String>,
    #[serde(default)]
    pub hotel_id: Option<Id>,
    #[serde(default)]
    pub car_id: Option<Id>,
    #[serde(default)]
    pub driver_id: Option<Id>,
    #[serde(default)]
    pub driver_name: Option<String>,
    /// Type-specific fields such as pickup and dropoff locations
    #[serde(default)]
    pub booking_data: Value,
    #[serde(default)]
    pub created_at: Option<String>,
}

fn unknown_payment() -> PaymentStatus {
    PaymentStatus::Unknown
}

impl Booking {
    pub fn total(&self) -> Money {
        Money::new(self.total_amount, &self.currency)
    }

    /// A string field from `booking_data`
    pub fn data_str(&self, key: &str) -> Option<&str> {
        self.booking_data.get(key).and_then(Value::as_str)
    }
}

/// Customer booking request
#[derive(Debug, Clone, Serialize)]
pub struct BookingRequest {
    pub booking_type: BookingType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hotel_id: Option<Id>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub car_id: Option<Id>,
    pub start_date: chrono::NaiveDate,
    pub end_date: chrono::NaiveDate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub guests: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rooms: Option<u32>,
    pub customer_name: String,
    pub customer_email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub special_requests: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    #[serde(skip_serializing_if = "Value::is_null")]
    pub booking_data: Value,
}

/// Admin edit of a booking; unset fields are left alone
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BookingUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub special_requests: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<BookingStatus>,
}

/// Sort orders the bookings list supports
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BookingSort {
    #[default]
    Newest,
    Oldest,
    AmountDesc,
    AmountAsc,
}

/// Admin bookings list query
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BookingQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<BookingStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_status: Option<PaymentStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub booking_type: Option<BookingType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_by: Option<BookingSort>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(rename = "perPage", skip_serializing_if = "Option::is_none")]
    pub per_page: Option<u32>,
}

/// Aggregate numbers for the bookings dashboard
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BookingStats {
    #[serde(default)]
    pub total_bookings: u64,
    #[serde(default)]
    pub pending: u64,
    #[serde(default)]
    pub confirmed: u64,
    #[serde(default)]
    pub cancelled: u64,
    #[serde(default)]
    pub completed: u64,
    #[serde(default)]
    pub total_revenue: f64,
    #[serde(default)]
    pub currency: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub(crate) struct StatusChange {
    pub status: BookingStatus,
}

#[derive(Debug, Clone, Serialize)]
pub(crate) struct CancelRequest<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<&'a str>,
}

#[derive(Debug, Clone, Serialize)]
pub(crate) struct DriverAssignment {
    pub driver_id: Id,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn booking_parses_with_date_aliases_and_unknown_payment_status() {
        let booking: Booking = serde_json::from_value(json!({
            "id": 9,
            "booking_reference": "BK-7F3A",
            "booking_type": "car",
            "status": "confirmed",
            "payment_status": "chargeback",
            "pickup_date": "2024-06-01",
            "return_date": "2024-06-04",
            "total_amount": 120.5,
            "currency": "USD",
            "booking_data": {"pickup_location": "Airport"}
        }))
        .unwrap();

        assert_eq!(booking.payment_status, PaymentStatus::Unknown);
        assert_eq!(booking.start_date.as_deref(), Some("2024-06-01"));
        assert_eq!(booking.data_str("pickup_location"), Some("Airport"));
        assert_eq!(booking.total().to_string(), "$120.50");
    }
}
