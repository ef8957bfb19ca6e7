//! Types for platform settings

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Values of one settings category, keyed by setting name
pub type SettingsMap = BTreeMap<String, Value>;

/// Every category the server knows about
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AllSettings(pub BTreeMap<String, SettingsMap>);

impl AllSettings {
    pub fn category(&self, name: &str) -> Option<&SettingsMap> {
        self.0.get(name)
    }

    /// A string value, e.g. `general.site_name`
    pub fn str(&self, category: &str, key: &str) -> Option<&str> {
        self.category(category)?.get(key)?.as_str()
    }

    pub fn bool(&self, category: &str, key: &str) -> Option<bool> {
        self.category(category)?.get(key)?.as_bool()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn lookups_by_category_and_key() {
        let settings: AllSettings = serde_json::from_value(json!({
            "general": {"site_name": "Trips", "maintenance_mode": false},
            "payment": {"default_currency": "NGN"}
        }))
        .unwrap();

        assert_eq!(settings.str("general", "site_name"), Some("Trips"));
        assert_eq!(settings.bool("general", "maintenance_mode"), Some(false));
        assert_eq!(settings.str("payment", "missing"), None);
        assert!(settings.category("email").is_none());
    }
}
