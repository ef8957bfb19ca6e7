//! Bearer token state and its persistence

use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use std::sync::{Arc, Mutex, RwLock};

use jsonwebtoken::{decode, DecodingKey, Validation};
use log::{info, warn};
use serde::Deserialize;

use crate::error::Result;

/// Durable key/value storage for the token
pub trait TokenStorage: Send + Sync {
    fn load(&self, key: &str) -> Result<Option<String>>;
    fn save(&self, key: &str, value: &str) -> Result<()>;
    fn remove(&self, key: &str) -> Result<()>;
}

/// Storage that lives as long as the process
#[derive(Debug, Default)]
pub struct MemoryStorage {
    values: Mutex<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TokenStorage for MemoryStorage {
    fn load(&self, key: &str) -> Result<Option<String>> {
        let values = self.values.lock().unwrap_or_else(|e| e.into_inner());
        Ok(values.get(key).cloned())
    }

    fn save(&self, key: &str, value: &str) -> Result<()> {
        let mut values = self.values.lock().unwrap_or_else(|e| e.into_inner());
        values.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        let mut values = self.values.lock().unwrap_or_else(|e| e.into_inner());
        values.remove(key);
        Ok(())
    }
}

/// Storage backed by a JSON object in a file
#[derive(Debug, Clone)]
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn read_all(&self) -> Result<HashMap<String, String>> {
        match fs::read(&self.path) {
            Ok(bytes) if bytes.is_empty() => Ok(HashMap::new()),
            Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(HashMap::new()),
            Err(e) => Err(e.into()),
        }
    }

    fn write_all(&self, values: &HashMap<String, String>) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(&self.path, serde_json::to_vec_pretty(values)?)?;
        Ok(())
    }
}

impl TokenStorage for FileStorage {
    fn load(&self, key: &str) -> Result<Option<String>> {
        Ok(self.read_all()?.remove(key))
    }

    fn save(&self, key: &str, value: &str) -> Result<()> {
        let mut values = self.read_all()?;
        values.insert(key.to_string(), value.to_string());
        self.write_all(&values)
    }

    fn remove(&self, key: &str) -> Result<()> {
        let mut values = self.read_all()?;
        if values.remove(key).is_some() {
            self.write_all(&values)?;
        }
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
struct Claims {
    #[serde(default)]
    exp: Option<i64>,
}

/// The process-wide bearer token, mirrored into durable storage.
///
/// There is exactly one writer path (`set_token`/`clear_token`); requests read
/// the in-memory copy.
pub struct TokenStore {
    current: RwLock<Option<String>>,
    storage: Arc<dyn TokenStorage>,
    key: String,
}

impl TokenStore {
    /// Create a store, seeding the in-memory token from storage
    pub fn new(storage: Arc<dyn TokenStorage>, key: &str) -> Self {
        let initial = match storage.load(key) {
            Ok(token) => token.filter(|t| !t.is_empty()),
            Err(e) => {
                warn!("Failed to load persisted token: {}", e);
                None
            }
        };

        Self {
            current: RwLock::new(initial),
            storage,
            key: key.to_string(),
        }
    }

    /// A store that never touches disk
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryStorage::new()), "auth_token")
    }

    /// The current token, if any
    pub fn get(&self) -> Option<String> {
        self.current.read().unwrap_or_else(|e| e.into_inner()).clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.get().is_some()
    }

    /// Persist the token, then make it the in-memory token.
    ///
    /// A storage failure leaves the previous token in place.
    pub fn set_token(&self, token: &str) -> Result<()> {
        self.storage.save(&self.key, token)?;
        {
            let mut current = self.current.write().unwrap_or_else(|e| e.into_inner());
            *current = Some(token.to_string());
        }
        info!("Auth token updated");
        Ok(())
    }

    /// Forget the token in memory and in storage
    pub fn clear_token(&self) -> Result<()> {
        {
            let mut current = self.current.write().unwrap_or_else(|e| e.into_inner());
            *current = None;
        }
        info!("Auth token cleared");
        self.storage.remove(&self.key)
    }

    /// The `exp` claim of the current token (seconds since the epoch).
    ///
    /// The signature is not checked; the server remains the authority.
    pub fn expires_at(&self) -> Result<Option<i64>> {
        let Some(token) = self.get() else {
            return Ok(None);
        };

        let mut validation = Validation::default();
        validation.insecure_disable_signature_validation();
        validation.validate_exp = false;
        validation.validate_aud = false;
        validation.required_spec_claims.clear();

        let data = decode::<Claims>(&token, &DecodingKey::from_secret(b""), &validation)?;
        Ok(data.claims.exp)
    }

    /// Whether the current token carries an `exp` claim in the past
    pub fn is_expired(&self) -> bool {
        match self.expires_at() {
            Ok(Some(exp)) => chrono::Utc::now().timestamp() >= exp,
            Ok(None) => false,
            Err(_) => false,
        }
    }
}

impl std::fmt::Debug for TokenStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenStore")
            .field("key", &self.key)
            .field("authenticated", &self.is_authenticated())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonwebtoken::{encode, EncodingKey, Header};
    use serde::Serialize;

    #[derive(Serialize)]
    struct TestClaims {
        sub: String,
        exp: i64,
    }

    fn token_expiring_at(exp: i64) -> String {
        let claims = TestClaims { sub: "42".to_string(), exp };
        encode(&Header::default(), &claims, &EncodingKey::from_secret(b"secret")).unwrap()
    }

    #[test]
    fn set_and_clear_mirror_into_storage() {
        let storage = Arc::new(MemoryStorage::new());
        let store = TokenStore::new(storage.clone(), "auth_token");
        assert!(!store.is_authenticated());

        store.set_token("abc").unwrap();
        assert_eq!(store.get().as_deref(), Some("abc"));
        assert_eq!(storage.load("auth_token").unwrap().as_deref(), Some("abc"));

        store.clear_token().unwrap();
        assert!(store.get().is_none());
        assert!(storage.load("auth_token").unwrap().is_none());
    }

    #[test]
    fn store_is_seeded_from_storage() {
        let storage = Arc::new(MemoryStorage::new());
        storage.save("auth_token", "persisted").unwrap();
        let store = TokenStore::new(storage, "auth_token");
        assert_eq!(store.get().as_deref(), Some("persisted"));
    }

    #[test]
    fn file_storage_survives_a_new_store() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");

        let first = TokenStore::new(Arc::new(FileStorage::new(&path)), "auth_token");
        first.set_token("from-disk").unwrap();

        let second = TokenStore::new(Arc::new(FileStorage::new(&path)), "auth_token");
        assert_eq!(second.get().as_deref(), Some("from-disk"));

        second.clear_token().unwrap();
        let third = TokenStore::new(Arc::new(FileStorage::new(&path)), "auth_token");
        assert!(third.get().is_none());
    }

    #[test]
    fn expiry_is_read_from_claims() {
        let store = TokenStore::in_memory();
        assert!(!store.is_expired());

        let past = chrono::Utc::now().timestamp() - 60;
        store.set_token(&token_expiring_at(past)).unwrap();
        assert_eq!(store.expires_at().unwrap(), Some(past));
        assert!(store.is_expired());

        let future = chrono::Utc::now().timestamp() + 3600;
        store.set_token(&token_expiring_at(future)).unwrap();
        assert!(!store.is_expired());
    }

    #[test]
    fn opaque_tokens_are_never_expired() {
        let store = TokenStore::in_memory();
        store.set_token("not-a-jwt").unwrap();
        assert!(store.expires_at().is_err());
        assert!(!store.is_expired());
    }
}
