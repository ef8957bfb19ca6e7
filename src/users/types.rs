//! Types for user and role management

use serde::{Deserialize, Serialize};

use crate::admin::Permissions;
use crate::types::Id;

/// A permission as the server returns it: either a bare key or an object
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PermissionEntry {
    Key(String),
    Named {
        name: String,
        #[serde(default)]
        id: Option<Id>,
    },
}

impl PermissionEntry {
    pub fn key(&self) -> &str {
        match self {
            PermissionEntry::Key(key) => key,
            PermissionEntry::Named { name, .. } => name,
        }
    }
}

/// A role assignable to users
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Role {
    pub id: Id,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub permissions: Vec<PermissionEntry>,
}

/// A platform user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: Id,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub roles: Vec<Role>,
    /// Effective permission keys, when the server flattens them for us
    #[serde(default)]
    pub permissions: Vec<PermissionEntry>,
    #[serde(default)]
    pub created_at: Option<String>,
}

fn default_true() -> bool {
    true
}

impl User {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name).trim().to_string()
    }

    /// Union of the user's own permissions and those of every role
    pub fn permission_set(&self) -> Permissions {
        let keys = self
            .permissions
            .iter()
            .chain(self.roles.iter().flat_map(|role| role.permissions.iter()))
            .map(|p| p.key().to_string());
        let roles = self.roles.iter().map(|role| role.name.clone());
        Permissions::new(keys, roles)
    }

    pub fn has_role(&self, name: &str) -> bool {
        self.roles.iter().any(|role| role.name.eq_ignore_ascii_case(name))
    }
}

/// Filters for the user list
#[derive(Debug, Clone, Default, Serialize)]
pub struct UserQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(rename = "perPage", skip_serializing_if = "Option::is_none")]
    pub per_page: Option<u32>,
}

/// Admin "add user" / "edit user" form
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserForm {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    /// Required when creating, ignored by the server on update when empty
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(default)]
    pub role_ids: Vec<Id>,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

impl Default for UserForm {
    fn default() -> Self {
        Self {
            first_name: String::new(),
            last_name: String::new(),
            email: String::new(),
            phone: None,
            password: None,
            role_ids: Vec::new(),
            is_active: true,
        }
    }
}

impl UserForm {
    pub fn from_user(user: &User) -> Self {
        Self {
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            email: user.email.clone(),
            phone: user.phone.clone(),
            password: None,
            role_ids: user.roles.iter().map(|role| role.id).collect(),
            is_active: user.is_active,
        }
    }
}
