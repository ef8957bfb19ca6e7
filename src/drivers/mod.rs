//! Driver administration, availability and trips

mod types;

use std::sync::Arc;

use crate::error::{Error, Result};
use crate::fetch::HttpClient;
use crate::types::{BulkDeleteRequest, BulkDeleteResult, Id};

pub use types::*;

/// Client for `/drivers`
#[derive(Debug, Clone)]
pub struct DriversApi {
    http: Arc<HttpClient>,
}

impl DriversApi {
    pub(crate) fn new(http: Arc<HttpClient>) -> Self {
        Self { http }
    }

    pub async fn list(&self, query: &DriverQuery) -> Result<Vec<Driver>> {
        self.http.get("/drivers").query(query)?.execute().await
    }

    pub async fn get(&self, id: Id) -> Result<Driver> {
        self.http.get(&format!("/drivers/{}", id)).execute().await
    }

    pub async fn create(&self, form: &DriverForm) -> Result<Driver> {
        self.http.post("/drivers").json(form)?.execute().await
    }

    pub async fn update(&self, id: Id, form: &DriverForm) -> Result<Driver> {
        self.http
            .put(&format!("/drivers/{}", id))
            .json(form)?
            .execute()
            .await
    }

    pub async fn delete(&self, id: Id) -> Result<()> {
        self.http.delete(&format!("/drivers/{}", id)).send().await
    }

    pub async fn bulk_delete(&self, ids: &[Id]) -> Result<BulkDeleteResult> {
        self.http
            .post("/drivers/bulk-delete")
            .json(&BulkDeleteRequest { ids })?
            .execute()
            .await
    }

    pub async fn set_availability(&self, id: Id, is_available: bool) -> Result<Driver> {
        self.http
            .put(&format!("/drivers/{}/availability", id))
            .json(&AvailabilityChange { is_available })?
            .execute()
            .await
    }

    /// Trips assigned to a driver, optionally narrowed to one status
    pub async fn trips(&self, driver_id: Id, status: Option<TripStatus>) -> Result<Vec<Trip>> {
        self.http
            .get(&format!("/drivers/{}/trips", driver_id))
            .query(&serde_json::json!({ "trip_status": status }))?
            .execute()
            .await
    }

    /// Move a trip along. Transitions the trip state machine forbids are
    /// rejected without a request.
    pub async fn update_trip_status(&self, trip: &Trip, to: TripStatus) -> Result<Trip> {
        if !trip.trip_status.can_transition_to(to) {
            return Err(Error::validation(format!(
                "Cannot change trip from {:?} to {:?}",
                trip.trip_status, to
            )));
        }
        self.http
            .put(&format!("/drivers/trips/{}/status", trip.booking_id))
            .json(&TripStatusChange { trip_status: to })?
            .execute()
            .await
    }
}
