//! Permission keys and the permission set used to gate actions

use std::collections::BTreeSet;

/// Permission keys checked by the admin screens
pub mod keys {
    pub const BOOKINGS_VIEW: &str = "bookings.view";
    pub const BOOKINGS_EDIT: &str = "bookings.edit";
    pub const BOOKINGS_DELETE: &str = "bookings.delete";

    pub const DRIVERS_VIEW: &str = "drivers.view";
    pub const DRIVERS_CREATE: &str = "drivers.create";
    pub const DRIVERS_EDIT: &str = "drivers.edit";
    pub const DRIVERS_DELETE: &str = "drivers.delete";

    pub const HOTELS_VIEW: &str = "hotels.view";
    pub const HOTELS_CREATE: &str = "hotels.create";
    pub const HOTELS_EDIT: &str = "hotels.edit";
    pub const HOTELS_DELETE: &str = "hotels.delete";

    pub const USERS_VIEW: &str = "users.view";
    pub const USERS_CREATE: &str = "users.create";
    pub const USERS_EDIT: &str = "users.edit";
    pub const USERS_DELETE: &str = "users.delete";

    pub const NOTIFICATIONS_VIEW: &str = "notifications.view";
    pub const NOTIFICATIONS_CREATE: &str = "notifications.create";
    pub const NOTIFICATIONS_EDIT: &str = "notifications.edit";
    pub const NOTIFICATIONS_DELETE: &str = "notifications.delete";

    pub const SETTINGS_EDIT: &str = "settings.edit";
}

/// The four keys a CRUD screen checks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResourcePermissions {
    pub view: &'static str,
    pub create: &'static str,
    pub edit: &'static str,
    pub delete: &'static str,
}

/// Effective permissions of a user.
///
/// A key matches exactly, through a `resource.*` grant, or through `*`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Permissions {
    keys: BTreeSet<String>,
    roles: BTreeSet<String>,
}

impl Permissions {
    pub fn new<K, R>(keys: K, roles: R) -> Self
    where
        K: IntoIterator,
        K::Item: Into<String>,
        R: IntoIterator,
        R::Item: Into<String>,
    {
        Self {
            keys: keys.into_iter().map(Into::into).collect(),
            roles: roles.into_iter().map(|r| r.into().to_ascii_lowercase()).collect(),
        }
    }

    /// A set granting everything
    pub fn all() -> Self {
        Self::new(["*"], Vec::<String>::new())
    }

    pub fn has(&self, key: &str) -> bool {
        if self.keys.contains(key) || self.keys.contains("*") {
            return true;
        }
        match key.split_once('.') {
            Some((resource, _)) => self.keys.contains(&format!("{}.*", resource)),
            None => false,
        }
    }

    pub fn has_role(&self, role: &str) -> bool {
        self.roles.contains(&role.to_ascii_lowercase())
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_and_wildcard_grants() {
        let perms = Permissions::new(["drivers.view", "hotels.*"], ["Admin"]);
        assert!(perms.has(keys::DRIVERS_VIEW));
        assert!(!perms.has(keys::DRIVERS_DELETE));
        assert!(perms.has(keys::HOTELS_DELETE));
        assert!(perms.has_role("admin"));

        assert!(Permissions::all().has(keys::USERS_DELETE));
        assert!(!Permissions::default().has(keys::USERS_VIEW));
    }
}
