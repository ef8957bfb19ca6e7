//! Customer bookings and booking administration

mod types;

use std::sync::Arc;

use crate::error::Result;
use crate::fetch::HttpClient;
use crate::types::{BulkDeleteRequest, BulkDeleteResult, Id, Page};

pub use types::*;

/// Client for `/bookings`
#[derive(Debug, Clone)]
pub struct BookingsApi {
    http: Arc<HttpClient>,
}

impl BookingsApi {
    pub(crate) fn new(http: Arc<HttpClient>) -> Self {
        Self { http }
    }

    pub async fn create(&self, request: &BookingRequest) -> Result<Booking> {
        self.http.post("/bookings").json(request)?.execute().await
    }

    /// Bookings of the signed-in customer
    pub async fn mine(&self, query: &BookingQuery) -> Result<Page<Booking>> {
        self.http.get("/bookings").query(query)?.execute().await
    }

    pub async fn get(&self, id: Id) -> Result<Booking> {
        self.http.get(&format!("/bookings/{}", id)).execute().await
    }

    pub async fn cancel(&self, id: Id, reason: Option<&str>) -> Result<Booking> {
        self.http
            .post(&format!("/bookings/{}/cancel", id))
            .json(&CancelRequest { reason })?
            .execute()
            .await
    }
}

/// Client for `/admin/bookings`
#[derive(Debug, Clone)]
pub struct AdminBookingsApi {
    http: Arc<HttpClient>,
}

impl AdminBookingsApi {
    pub(crate) fn new(http: Arc<HttpClient>) -> Self {
        Self { http }
    }

    pub async fn list(&self, query: &BookingQuery) -> Result<Page<Booking>> {
        self.http.get("/admin/bookings").query(query)?.execute().await
    }

    pub async fn get(&self, id: Id) -> Result<Booking> {
        self.http.get(&format!("/admin/bookings/{}", id)).execute().await
    }

    pub async fn update(&self, id: Id, update: &BookingUpdate) -> Result<Booking> {
        self.http
            .put(&format!("/admin/bookings/{}", id))
            .json(update)?
            .execute()
            .await
    }

    /// Request a status transition; the server decides whether it is allowed
    pub async fn update_status(&self, id: Id, status: BookingStatus) -> Result<Booking> {
        self.http
            .put(&format!("/admin/bookings/{}/status", id))
            .json(&StatusChange { status })?
            .execute()
            .await
    }

    pub async fn assign_driver(&self, id: Id, driver_id: Id) -> Result<Booking> {
        self.http
            .put(&format!("/admin/bookings/{}/driver", id))
            .json(&DriverAssignment { driver_id })?
            .execute()
            .await
    }

    pub async fn delete(&self, id: Id) -> Result<()> {
        self.http.delete(&format!("/admin/bookings/{}", id)).send().await
    }

    pub async fn bulk_delete(&self, ids: &[Id]) -> Result<BulkDeleteResult> {
        self.http
            .post("/admin/bookings/bulk-delete")
            .json(&BulkDeleteRequest { ids })?
            .execute()
            .await
    }

    pub async fn stats(&self) -> Result<BookingStats> {
        self.http.get("/admin/bookings/stats").execute().await
    }
}
