//! Types for support tickets

use serde::{Deserialize, Serialize};

use crate::types::Id;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TicketPriority {
    Low,
    #[default]
    Medium,
    High,
    Urgent,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TicketStatus {
    #[default]
    Open,
    InProgress,
    Resolved,
    Closed,
}

impl TicketStatus {
    /// Customers can still reply
    pub fn accepts_replies(&self) -> bool {
        !matches!(self, TicketStatus::Closed)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TicketMessage {
    #[serde(default)]
    pub id: Option<Id>,
    pub message: String,
    /// Written by staff rather than the customer
    #[serde(default)]
    pub is_admin: bool,
    #[serde(default)]
    pub created_at: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SupportTicket {
    pub id: Id,
    pub subject: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub priority: TicketPriority,
    #[serde(default)]
    pub status: TicketStatus,
    #[serde(default)]
    pub booking_id: Option<Id>,
    #[serde(default)]
    pub assigned_to: Option<Id>,
    #[serde(default)]
    pub messages: Vec<TicketMessage>,
    #[serde(default)]
    pub created_at: Option<String>,
}

impl SupportTicket {
    /// The most recent staff reply, if any
    pub fn last_staff_reply(&self) -> Option<&TicketMessage> {
        self.messages.iter().rev().find(|m| m.is_admin)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct NewTicket {
    pub subject: String,
    pub description: String,
    pub priority: TicketPriority,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub booking_id: Option<Id>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct TicketQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<TicketStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<TicketPriority>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(rename = "perPage", skip_serializing_if = "Option::is_none")]
    pub per_page: Option<u32>,
}

/// Admin-side change to a ticket; unset fields are left alone
#[derive(Debug, Clone, Default, Serialize)]
pub(crate) struct TicketUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<TicketStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assigned_to: Option<Id>,
}

#[derive(Debug, Clone, Serialize)]
pub(crate) struct Reply<'a> {
    pub message: &'a str,
}
