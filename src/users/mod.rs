//! User, role and permission management (RBAC)

mod types;

use std::sync::Arc;

use serde::Serialize;

use crate::error::Result;
use crate::fetch::HttpClient;
use crate::types::{BulkDeleteRequest, BulkDeleteResult, Id, Page};

pub use types::*;

/// Client for `/rbac`
#[derive(Debug, Clone)]
pub struct UsersApi {
    http: Arc<HttpClient>,
}

#[derive(Serialize)]
struct RoleAssignment<'a> {
    role_ids: &'a [Id],
}

impl UsersApi {
    pub(crate) fn new(http: Arc<HttpClient>) -> Self {
        Self { http }
    }

    pub async fn list(&self, query: &UserQuery) -> Result<Page<User>> {
        self.http.get("/rbac/users").query(query)?.execute().await
    }

    pub async fn get(&self, id: Id) -> Result<User> {
        self.http.get(&format!("/rbac/users/{}", id)).execute().await
    }

    pub async fn create(&self, form: &UserForm) -> Result<User> {
        self.http.post("/rbac/users").json(form)?.execute().await
    }

    pub async fn update(&self, id: Id, form: &UserForm) -> Result<User> {
        self.http
            .put(&format!("/rbac/users/{}", id))
            .json(form)?
            .execute()
            .await
    }

    pub async fn delete(&self, id: Id) -> Result<()> {
        self.http.delete(&format!("/rbac/users/{}", id)).send().await
    }

    pub async fn bulk_delete(&self, ids: &[Id]) -> Result<BulkDeleteResult> {
        self.http
            .post("/rbac/users/bulk-delete")
            .json(&BulkDeleteRequest { ids })?
            .execute()
            .await
    }

    /// Replace the roles of a user
    pub async fn assign_roles(&self, id: Id, role_ids: &[Id]) -> Result<User> {
        self.http
            .put(&format!("/rbac/users/{}/roles", id))
            .json(&RoleAssignment { role_ids })?
            .execute()
            .await
    }

    pub async fn roles(&self) -> Result<Vec<Role>> {
        self.http.get("/rbac/roles").execute().await
    }

    pub async fn permissions(&self) -> Result<Vec<PermissionEntry>> {
        self.http.get("/rbac/permissions").execute().await
    }
}
