//! Shapes shared by several resources

use serde::{Deserialize, Serialize};

/// Server-assigned identifier
pub type Id = i64;

fn first_page() -> u32 {
    1
}

/// One page of a list endpoint.
///
/// Endpoints disagree on field names, so the common variants are accepted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    #[serde(
        default = "Vec::new",
        alias = "data",
        alias = "results",
        alias = "bookings",
        alias = "hotels",
        alias = "cars",
        alias = "drivers",
        alias = "users",
        alias = "tickets"
    )]
    pub items: Vec<T>,

    #[serde(default)]
    pub total: u64,

    #[serde(default = "first_page")]
    pub page: u32,

    #[serde(default, alias = "perPage", alias = "limit", alias = "page_size")]
    pub per_page: u32,

    #[serde(default, alias = "totalPages", alias = "pages")]
    pub total_pages: u32,
}

impl<T> Page<T> {
    /// Total pages, derived from `total`/`per_page` when the server left it out
    pub fn page_count(&self) -> u32 {
        if self.total_pages > 0 {
            self.total_pages
        } else if self.per_page > 0 {
            let per_page = u64::from(self.per_page);
            let pages = self.total / per_page + u64::from(self.total % per_page != 0);
            u32::try_from(pages).unwrap_or(u32::MAX)
        } else if self.items.is_empty() {
            0
        } else {
            1
        }
    }
}

impl<T> Default for Page<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            total: 0,
            page: 1,
            per_page: 0,
            total_pages: 0,
        }
    }
}

/// Body of every bulk-delete endpoint
#[derive(Debug, Clone, Serialize)]
pub struct BulkDeleteRequest<'a> {
    pub ids: &'a [Id],
}

/// One id the server refused to delete
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BulkFailure {
    pub id: Id,
    #[serde(default, alias = "detail", alias = "message")]
    pub error: String,
}

/// Outcome of a bulk delete, with partial failures listed
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BulkDeleteResult {
    #[serde(default, alias = "deleted_count")]
    pub deleted: u64,
    #[serde(default)]
    pub failed: Vec<BulkFailure>,
}

impl BulkDeleteResult {
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Plain `{message}` acknowledgement
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageResponse {
    #[serde(default, alias = "detail")]
    pub message: String,
}
