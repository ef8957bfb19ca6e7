//! Types for notification templates and the user inbox

use serde::{Deserialize, Serialize};

use crate::types::Id;

/// Delivery channel of a template
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Channel {
    #[default]
    Email,
    Sms,
    Push,
}

/// A message template bound to a platform event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotificationTemplate {
    pub id: Id,
    pub name: String,
    #[serde(rename = "type")]
    pub channel: Channel,
    /// Event that triggers the template, e.g. `booking_confirmed`
    #[serde(default, alias = "event_type")]
    pub event: String,
    #[serde(default)]
    pub subject: Option<String>,
    #[serde(default, alias = "body")]
    pub content: String,
    #[serde(default)]
    pub is_active: bool,
    #[serde(default)]
    pub updated_at: Option<String>,
}

/// Create/edit form for a template
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemplateForm {
    pub name: String,
    #[serde(rename = "type")]
    pub channel: Channel,
    pub event: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    pub content: String,
    pub is_active: bool,
}

impl Default for TemplateForm {
    fn default() -> Self {
        Self {
            name: String::new(),
            channel: Channel::default(),
            event: String::new(),
            subject: None,
            content: String::new(),
            is_active: true,
        }
    }
}

impl TemplateForm {
    pub fn from_template(template: &NotificationTemplate) -> Self {
        Self {
            name: template.name.clone(),
            channel: template.channel,
            event: template.event.clone(),
            subject: template.subject.clone(),
            content: template.content.clone(),
            is_active: template.is_active,
        }
    }
}

/// Filters for the template list
#[derive(Debug, Clone, Default, Serialize)]
pub struct TemplateQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub channel: Option<Channel>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

#[derive(Debug, Clone, Serialize)]
pub(crate) struct Toggle {
    pub is_active: bool,
}

#[derive(Debug, Clone, Serialize)]
pub(crate) struct TestSend<'a> {
    pub recipient: &'a str,
}

/// An entry in the signed-in user's inbox
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    pub id: Id,
    #[serde(default)]
    pub title: String,
    #[serde(default, alias = "content")]
    pub message: String,
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
    #[serde(default)]
    pub is_read: bool,
    #[serde(default)]
    pub created_at: Option<String>,
}

pub fn unread_count(notifications: &[Notification]) -> usize {
    notifications.iter().filter(|n| !n.is_read).count()
}
