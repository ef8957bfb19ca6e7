//! Admin bookings screen: the store plus the calls that feed it

use std::sync::Arc;

use log::{error, info};

use crate::bookings::{AdminBookingsApi, Booking, BookingStatus, BookingUpdate};
use crate::error::{Error, Result};
use crate::types::{BulkDeleteResult, Id};

use super::{BookingFilters, BookingStore, PaginationPatch};

const LOAD_FAILED: &str = "Failed to load bookings";

/// Drives the bookings screen. Every change of filters or page refetches,
/// and every mutation is followed by a refetch instead of patching rows.
#[derive(Debug, Clone)]
pub struct BookingsController {
    api: AdminBookingsApi,
    store: Arc<BookingStore>,
}

impl BookingsController {
    pub fn new(api: AdminBookingsApi, store: Arc<BookingStore>) -> Self {
        Self { api, store }
    }

    pub fn store(&self) -> &Arc<BookingStore> {
        &self.store
    }

    /// Fetch the page matching the current filters.
    ///
    /// A response that arrives after a newer fetch started is discarded.
    pub async fn refresh(&self) -> Result<()> {
        let ticket = self.store.begin_fetch();
        match self.api.list(&ticket.query).await {
            Ok(page) => {
                self.store.finish_fetch(ticket, Ok(page));
                Ok(())
            }
            Err(e) => {
                error!("Loading bookings failed: {}", e);
                self.store.finish_fetch(ticket, Err(e.user_message(LOAD_FAILED)));
                Err(e)
            }
        }
    }

    // Failures are already recorded in the store's load state.
    async fn refetch(&self) {
        let _ = self.refresh().await;
    }

    pub async fn set_filters<F>(&self, change: F) -> Result<()>
    where
        F: FnOnce(&mut BookingFilters),
    {
        self.store.set_filters(change);
        self.refresh().await
    }

    pub async fn reset_filters(&self) -> Result<()> {
        self.store.reset_filters();
        self.refresh().await
    }

    pub async fn go_to_page(&self, page: u32) -> Result<()> {
        self.store.set_pagination(PaginationPatch::page(page));
        self.refresh().await
    }

    pub async fn set_per_page(&self, per_page: u32) -> Result<()> {
        self.store.set_pagination(PaginationPatch {
            page: None,
            per_page: Some(per_page),
        });
        self.refresh().await
    }

    /// Load one booking into the detail view
    pub async fn select(&self, id: Id) -> Result<Booking> {
        let booking = self.api.get(id).await.map_err(|e| {
            error!("Loading booking {} failed: {}", id, e);
            e
        })?;
        self.store.set_selected_booking(Some(booking.clone()));
        Ok(booking)
    }

    pub fn close_details(&self) {
        self.store.set_selected_booking(None);
    }

    pub fn toggle_checked(&self, id: Id) -> bool {
        self.store.toggle_checked(id)
    }

    pub async fn update_status(&self, id: Id, status: BookingStatus) -> Result<Booking> {
        let booking = self.api.update_status(id, status).await.map_err(|e| {
            error!("Updating status of booking {} failed: {}", id, e);
            e
        })?;
        info!("Booking {} is now {}", id, status.as_str());
        self.after_change(&booking).await;
        Ok(booking)
    }

    pub async fn update(&self, id: Id, update: &BookingUpdate) -> Result<Booking> {
        let booking = self.api.update(id, update).await.map_err(|e| {
            error!("Updating booking {} failed: {}", id, e);
            e
        })?;
        self.after_change(&booking).await;
        Ok(booking)
    }

    pub async fn cancel(&self, id: Id) -> Result<Booking> {
        self.update_status(id, BookingStatus::Cancelled).await
    }

    pub async fn assign_driver(&self, id: Id, driver_id: Id) -> Result<Booking> {
        let booking = self.api.assign_driver(id, driver_id).await.map_err(|e| {
            error!("Assigning driver {} to booking {} failed: {}", driver_id, id, e);
            e
        })?;
        self.after_change(&booking).await;
        Ok(booking)
    }

    pub async fn delete(&self, id: Id) -> Result<()> {
        self.api.delete(id).await.map_err(|e| {
            error!("Deleting booking {} failed: {}", id, e);
            e
        })?;
        if self.selected_id() == Some(id) {
            self.store.set_selected_booking(None);
        }
        self.store.uncheck(&[id]);
        self.refetch().await;
        Ok(())
    }

    /// Delete every ticked booking with a single call.
    ///
    /// Ids the server deleted are unticked; ids it refused stay ticked so
    /// they can be retried.
    pub async fn bulk_delete(&self) -> Result<BulkDeleteResult> {
        let ids = self.store.checked_ids();
        if ids.is_empty() {
            return Err(Error::validation("No bookings selected"));
        }

        let result = self.api.bulk_delete(&ids).await.map_err(|e| {
            error!("Bulk delete of {} bookings failed: {}", ids.len(), e);
            e
        })?;

        if result.is_complete() {
            self.store.clear_checked();
        } else {
            let deleted: Vec<Id> = ids
                .iter()
                .copied()
                .filter(|id| !result.failed.iter().any(|f| f.id == *id))
                .collect();
            self.store.uncheck(&deleted);
            error!("{} bookings could not be deleted", result.failed.len());
        }
        if let Some(selected) = self.selected_id() {
            if ids.contains(&selected) && !result.failed.iter().any(|f| f.id == selected) {
                self.store.set_selected_booking(None);
            }
        }

        info!("Deleted {} bookings", result.deleted);
        self.refetch().await;
        Ok(result)
    }

    fn selected_id(&self) -> Option<Id> {
        self.store.snapshot().selected.map(|b| b.id)
    }

    async fn after_change(&self, booking: &Booking) {
        if self.selected_id() == Some(booking.id) {
            self.store.set_selected_booking(Some(booking.clone()));
        }
        self.refetch().await;
    }
}
