//! Notification templates (admin) and the user's inbox

mod types;

use std::sync::Arc;

use crate::error::Result;
use crate::fetch::HttpClient;
use crate::types::{BulkDeleteRequest, BulkDeleteResult, Id, MessageResponse};

pub use types::*;

/// Client for `/notifications`
#[derive(Debug, Clone)]
pub struct NotificationsApi {
    http: Arc<HttpClient>,
}

impl NotificationsApi {
    pub(crate) fn new(http: Arc<HttpClient>) -> Self {
        Self { http }
    }

    pub async fn templates(&self, query: &TemplateQuery) -> Result<Vec<NotificationTemplate>> {
        self.http
            .get("/notifications/templates")
            .query(query)?
            .execute()
            .await
    }

    pub async fn template(&self, id: Id) -> Result<NotificationTemplate> {
        self.http
            .get(&format!("/notifications/templates/{}", id))
            .execute()
            .await
    }

    pub async fn create_template(&self, form: &TemplateForm) -> Result<NotificationTemplate> {
        self.http
            .post("/notifications/templates")
            .json(form)?
            .execute()
            .await
    }

    pub async fn update_template(&self, id: Id, form: &TemplateForm) -> Result<NotificationTemplate> {
        self.http
            .put(&format!("/notifications/templates/{}", id))
            .json(form)?
            .execute()
            .await
    }

    pub async fn delete_template(&self, id: Id) -> Result<()> {
        self.http
            .delete(&format!("/notifications/templates/{}", id))
            .send()
            .await
    }

    pub async fn bulk_delete_templates(&self, ids: &[Id]) -> Result<BulkDeleteResult> {
        self.http
            .post("/notifications/templates/bulk-delete")
            .json(&BulkDeleteRequest { ids })?
            .execute()
            .await
    }

    /// Enable or disable a template without touching its content
    pub async fn toggle_template(&self, id: Id, is_active: bool) -> Result<NotificationTemplate> {
        self.http
            .patch(&format!("/notifications/templates/{}/toggle", id))
            .json(&Toggle { is_active })?
            .execute()
            .await
    }

    /// Send a rendered sample of the template to `recipient`
    pub async fn test_template(&self, id: Id, recipient: &str) -> Result<MessageResponse> {
        self.http
            .post(&format!("/notifications/templates/{}/test", id))
            .json(&TestSend { recipient })?
            .execute()
            .await
    }

    pub async fn list(&self) -> Result<Vec<Notification>> {
        self.http.get("/notifications").execute().await
    }

    pub async fn mark_read(&self, id: Id) -> Result<()> {
        self.http
            .put(&format!("/notifications/{}/read", id))
            .send()
            .await
    }

    pub async fn mark_all_read(&self) -> Result<()> {
        self.http.put("/notifications/read-all").send().await
    }
}
