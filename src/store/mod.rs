//! Booking State Store: filters, pagination and the current page of the
//! admin bookings list, with one writer and any number of readers

mod controller;
mod state;

use std::sync::atomic::{AtomicU64, Ordering};

use log::debug;
use tokio::sync::watch;

use crate::bookings::{Booking, BookingQuery};
use crate::types::{Id, Page};

pub use controller::*;
pub use state::*;

/// Identifies one list fetch. Only the ticket of the latest fetch may
/// write its result back.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchTicket {
    generation: u64,
    pub query: BookingQuery,
}

impl FetchTicket {
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// Holds the bookings screen state and publishes every change
#[derive(Debug)]
pub struct BookingStore {
    state: watch::Sender<BookingState>,
    generation: AtomicU64,
}

impl Default for BookingStore {
    fn default() -> Self {
        Self::new()
    }
}

impl BookingStore {
    pub fn new() -> Self {
        let (state, _) = watch::channel(BookingState::default());
        Self {
            state,
            generation: AtomicU64::new(0),
        }
    }

    /// A copy of the current state
    pub fn snapshot(&self) -> BookingState {
        self.state.borrow().clone()
    }

    /// Follow state changes
    pub fn subscribe(&self) -> watch::Receiver<BookingState> {
        self.state.subscribe()
    }

    /// Merge filter changes and go back to the first page
    pub fn set_filters<F>(&self, change: F)
    where
        F: FnOnce(&mut BookingFilters),
    {
        self.state.send_modify(|state| {
            change(&mut state.filters);
            state.pagination.page = 1;
        });
    }

    pub fn set_pagination(&self, patch: PaginationPatch) {
        self.state.send_modify(|state| {
            if let Some(page) = patch.page {
                state.pagination.page = page.max(1);
            }
            if let Some(per_page) = patch.per_page {
                state.pagination.per_page = per_page.max(1);
                state.pagination.page = 1;
            }
        });
    }

    /// Replace the list and counts with a fetched page
    pub fn set_bookings(&self, page: Page<Booking>) {
        self.state.send_modify(|state| {
            state.apply_page(page);
            state.load = LoadState::Ready;
        });
    }

    pub fn set_selected_booking(&self, booking: Option<Booking>) {
        self.state.send_modify(|state| state.selected = booking);
    }

    pub fn reset_filters(&self) {
        self.state.send_modify(|state| {
            state.filters = BookingFilters::default();
            state.pagination.page = 1;
        });
    }

    /// Tick or untick a row; returns whether it is now ticked
    pub fn toggle_checked(&self, id: Id) -> bool {
        let mut checked = false;
        self.state.send_modify(|state| {
            checked = state.checked.insert(id);
            if !checked {
                state.checked.remove(&id);
            }
        });
        checked
    }

    /// Tick every row on the current page
    pub fn check_all(&self) {
        self.state.send_modify(|state| {
            state.checked = state.bookings.iter().map(|b| b.id).collect();
        });
    }

    pub fn clear_checked(&self) {
        self.state.send_modify(|state| state.checked.clear());
    }

    pub(crate) fn uncheck(&self, ids: &[Id]) {
        self.state.send_modify(|state| {
            for id in ids {
                state.checked.remove(id);
            }
        });
    }

    pub fn checked_ids(&self) -> Vec<Id> {
        self.state.borrow().checked.iter().copied().collect()
    }

    /// Start a list fetch for the current filters and page
    pub fn begin_fetch(&self) -> FetchTicket {
        let mut ticket = FetchTicket {
            generation: 0,
            query: BookingQuery::default(),
        };
        // The counter only moves while the state lock is held
        self.state.send_modify(|state| {
            ticket.generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
            ticket.query = state.query();
            state.load = LoadState::Loading;
        });
        ticket
    }

    /// Apply the outcome of a fetch. Returns `false` and leaves the state
    /// alone when a newer fetch has started since `ticket` was issued.
    pub fn finish_fetch(&self, ticket: FetchTicket, result: Result<Page<Booking>, String>) -> bool {
        self.state.send_if_modified(|state| {
            let latest = self.generation.load(Ordering::SeqCst);
            if ticket.generation != latest {
                debug!(
                    "Dropping stale bookings response (generation {}, latest {})",
                    ticket.generation, latest
                );
                return false;
            }

            match result {
                Ok(page) => {
                    state.apply_page(page);
                    state.load = LoadState::Ready;
                }
                Err(message) => {
                    state.load = LoadState::Failed(message);
                }
            }
            true
        })
    }
}
