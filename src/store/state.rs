//! Snapshot types published by the booking store

use std::collections::BTreeSet;

use crate::bookings::{Booking, BookingQuery, BookingSort, BookingStatus, BookingType, PaymentStatus};
use crate::types::{Id, Page};

pub const DEFAULT_PER_PAGE: u32 = 10;

/// Filters of the admin bookings list
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BookingFilters {
    pub search: Option<String>,
    pub status: Option<BookingStatus>,
    pub payment_status: Option<PaymentStatus>,
    pub booking_type: Option<BookingType>,
    pub sort: BookingSort,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub page: u32,
    pub per_page: u32,
    pub total: u64,
    pub total_pages: u32,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page: 1,
            per_page: DEFAULT_PER_PAGE,
            total: 0,
            total_pages: 0,
        }
    }
}

impl Pagination {
    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }

    pub fn has_previous(&self) -> bool {
        self.page > 1
    }
}

/// Partial update for [`Pagination`]; `None` keeps the current value
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PaginationPatch {
    pub page: Option<u32>,
    pub per_page: Option<u32>,
}

impl PaginationPatch {
    pub fn page(page: u32) -> Self {
        Self {
            page: Some(page),
            per_page: None,
        }
    }
}

/// Progress of the latest list fetch
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum LoadState {
    #[default]
    Idle,
    Loading,
    Ready,
    Failed(String),
}

impl LoadState {
    pub fn is_loading(&self) -> bool {
        matches!(self, LoadState::Loading)
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            LoadState::Failed(message) => Some(message),
            _ => None,
        }
    }
}

/// Everything the bookings screen renders from
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BookingState {
    pub filters: BookingFilters,
    pub pagination: Pagination,
    pub bookings: Vec<Booking>,
    pub selected: Option<Booking>,
    /// Rows ticked for bulk actions
    pub checked: BTreeSet<Id>,
    pub load: LoadState,
}

impl BookingState {
    /// The list query matching the current filters and page
    pub fn query(&self) -> BookingQuery {
        BookingQuery {
            search: self
                .filters
                .search
                .as_ref()
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty()),
            status: self.filters.status,
            payment_status: self.filters.payment_status,
            booking_type: self.filters.booking_type,
            sort_by: Some(self.filters.sort),
            page: Some(self.pagination.page),
            per_page: Some(self.pagination.per_page),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.load == LoadState::Ready && self.bookings.is_empty()
    }

    pub(crate) fn apply_page(&mut self, page: Page<Booking>) {
        self.pagination.total = page.total;
        self.pagination.total_pages = page.page_count();
        if page.page > 0 {
            self.pagination.page = page.page;
        }
        if page.per_page > 0 {
            self.pagination.per_page = page.per_page;
        }
        self.bookings = page.items;
        let visible: BTreeSet<Id> = self.bookings.iter().map(|b| b.id).collect();
        self.checked.retain(|id| visible.contains(id));
    }
}
