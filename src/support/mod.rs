//! Customer support tickets

mod types;

use std::sync::Arc;

use crate::error::{Error, Result};
use crate::fetch::HttpClient;
use crate::types::{Id, Page};

pub use types::*;

/// Client for `/support` and `/admin/support`
#[derive(Debug, Clone)]
pub struct SupportApi {
    http: Arc<HttpClient>,
}

impl SupportApi {
    pub(crate) fn new(http: Arc<HttpClient>) -> Self {
        Self { http }
    }

    pub async fn create_ticket(&self, ticket: &NewTicket) -> Result<SupportTicket> {
        if ticket.subject.trim().is_empty() || ticket.description.trim().is_empty() {
            return Err(Error::validation("Please fill in all required fields"));
        }
        self.http.post("/support/tickets").json(ticket)?.execute().await
    }

    pub async fn tickets(&self, query: &TicketQuery) -> Result<Page<SupportTicket>> {
        self.http.get("/support/tickets").query(query)?.execute().await
    }

    pub async fn ticket(&self, id: Id) -> Result<SupportTicket> {
        self.http
            .get(&format!("/support/tickets/{}", id))
            .execute()
            .await
    }

    pub async fn reply(&self, id: Id, message: &str) -> Result<TicketMessage> {
        if message.trim().is_empty() {
            return Err(Error::validation("Message cannot be empty"));
        }
        self.http
            .post(&format!("/support/tickets/{}/messages", id))
            .json(&Reply { message })?
            .execute()
            .await
    }

    pub async fn update_status(&self, id: Id, status: TicketStatus) -> Result<SupportTicket> {
        self.admin_update(
            id,
            &TicketUpdate {
                status: Some(status),
                ..Default::default()
            },
        )
        .await
    }

    pub async fn assign(&self, id: Id, staff_id: Id) -> Result<SupportTicket> {
        self.admin_update(
            id,
            &TicketUpdate {
                assigned_to: Some(staff_id),
                ..Default::default()
            },
        )
        .await
    }

    async fn admin_update(&self, id: Id, update: &TicketUpdate) -> Result<SupportTicket> {
        self.http
            .put(&format!("/admin/support/tickets/{}", id))
            .json(update)?
            .execute()
            .await
    }
}
