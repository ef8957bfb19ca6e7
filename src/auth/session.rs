//! Session state shared with every reader of the auth context

use crate::admin::Permissions;
use crate::users::User;

/// Who is signed in, as last confirmed by the server
#[derive(Debug, Clone, Default, PartialEq)]
pub enum SessionState {
    /// No token, or the token was cleared
    #[default]
    Anonymous,
    /// A token is held but the profile has not been loaded yet
    TokenOnly,
    /// Profile loaded
    Authenticated {
        user: Box<User>,
        permissions: Permissions,
    },
}

impl SessionState {
    pub fn authenticated(user: User) -> Self {
        let permissions = user.permission_set();
        SessionState::Authenticated {
            user: Box::new(user),
            permissions,
        }
    }

    pub fn user(&self) -> Option<&User> {
        match self {
            SessionState::Authenticated { user, .. } => Some(&**user),
            _ => None,
        }
    }

    /// Permissions of the signed-in user; empty for anyone else
    pub fn permissions(&self) -> Permissions {
        match self {
            SessionState::Authenticated { permissions, .. } => permissions.clone(),
            _ => Permissions::default(),
        }
    }

    pub fn has_permission(&self, key: &str) -> bool {
        match self {
            SessionState::Authenticated { permissions, .. } => permissions.has(key),
            _ => false,
        }
    }
}
