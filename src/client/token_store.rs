//! Persisted access/refresh tokens
//!
//! Tokens live in a flat key/value storage under four fixed keys. The
//! [`KeyValueStorage`] trait keeps the token store independent of where
//! those keys end up.

use std::collections::BTreeMap;
use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};

use super::models::TokenPair;

pub const ACCESS_TOKEN_KEY: &str = "access_token";
pub const REFRESH_TOKEN_KEY: &str = "refresh_token";
pub const TOKEN_TYPE_KEY: &str = "token_type";
pub const EXPIRES_AT_KEY: &str = "expires_at";

/// Every key written by [`TokenStore::save`] and removed by [`TokenStore::clear`].
pub const TOKEN_KEYS: [&str; 4] = [
    ACCESS_TOKEN_KEY,
    REFRESH_TOKEN_KEY,
    TOKEN_TYPE_KEY,
    EXPIRES_AT_KEY,
];

const DEFAULT_TOKEN_TYPE: &str = "Bearer";

/// Flat string key/value persistence.
///
/// Reads never fail; writes update the in-process view first and report
/// persistence failures afterwards.
pub trait KeyValueStorage: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str) -> io::Result<()>;
    fn remove(&self, key: &str) -> io::Result<()>;

    /// Write several keys as one change.
    fn set_many(&self, entries: &[(&str, &str)]) -> io::Result<()> {
        let results: Vec<io::Result<()>> = entries
            .iter()
            .map(|(key, value)| self.set(key, value))
            .collect();
        results.into_iter().collect()
    }

    /// Remove several keys as one change.
    fn remove_many(&self, keys: &[&str]) -> io::Result<()> {
        let results: Vec<io::Result<()>> = keys.iter().map(|key| self.remove(key)).collect();
        results.into_iter().collect()
    }
}

/// In-memory storage for tests.
#[cfg(test)]
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: Mutex<BTreeMap<String, String>>,
}

#[cfg(test)]
impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored keys
    pub fn len(&self) -> usize {
        self.entries.lock().map(|e| e.len()).unwrap_or(0)
    }
}

#[cfg(test)]
impl KeyValueStorage for MemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.lock().ok()?.get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> io::Result<()> {
        let mut entries = self.entries.lock().map_err(poisoned)?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> io::Result<()> {
        let mut entries = self.entries.lock().map_err(poisoned)?;
        entries.remove(key);
        Ok(())
    }
}

/// YAML-file backed storage.
///
/// The whole map is rewritten on every change. The file is removed once the
/// last key is gone and is only readable by the owner on Unix.
#[derive(Debug)]
pub struct FileStorage {
    path: PathBuf,
    entries: Mutex<BTreeMap<String, String>>,
}

impl FileStorage {
    /// Open storage at `path`, loading any existing entries.
    pub fn open(path: impl Into<PathBuf>) -> io::Result<Self> {
        let path = path.into();
        let entries = if path.exists() {
            let contents = std::fs::read_to_string(&path)?;
            match serde_yaml::from_str::<BTreeMap<String, String>>(&contents) {
                Ok(map) => map,
                Err(e) => {
                    log::warn!("Ignoring unreadable session file {}: {}", path.display(), e);
                    BTreeMap::new()
                }
            }
        } else {
            BTreeMap::new()
        };

        Ok(Self {
            path,
            entries: Mutex::new(entries),
        })
    }

    fn flush(&self, entries: &BTreeMap<String, String>) -> io::Result<()> {
        if entries.is_empty() {
            if self.path.exists() {
                std::fs::remove_file(&self.path)?;
            }
            return Ok(());
        }

        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = serde_yaml::to_string(entries)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;

        // Written beside the target, then renamed over it in one step
        let staging = self.path.with_extension("tmp");
        if staging.exists() {
            std::fs::remove_file(&staging)?;
        }

        let mut options = OpenOptions::new();
        options.write(true).create_new(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            options.mode(0o600);
        }

        let mut file = options.open(&staging)?;
        file.write_all(contents.as_bytes())?;
        file.sync_all()?;
        drop(file);
        std::fs::rename(&staging, &self.path)?;

        log::debug!("Wrote {} session keys to {}", entries.len(), self.path.display());
        Ok(())
    }
}

impl KeyValueStorage for FileStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.lock().ok()?.get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> io::Result<()> {
        self.set_many(&[(key, value)])
    }

    fn remove(&self, key: &str) -> io::Result<()> {
        self.remove_many(&[key])
    }

    fn set_many(&self, new_entries: &[(&str, &str)]) -> io::Result<()> {
        let mut entries = self.entries.lock().map_err(poisoned)?;
        for (key, value) in new_entries {
            entries.insert(key.to_string(), value.to_string());
        }
        self.flush(&entries)
    }

    fn remove_many(&self, keys: &[&str]) -> io::Result<()> {
        let mut entries = self.entries.lock().map_err(poisoned)?;
        let before = entries.len();
        for key in keys {
            entries.remove(*key);
        }
        if entries.len() != before {
            self.flush(&entries)?;
        }
        Ok(())
    }
}

fn poisoned<T>(_: std::sync::PoisonError<T>) -> io::Error {
    io::Error::other("storage lock poisoned")
}

/// Typed access to the persisted [`TokenPair`].
#[derive(Clone)]
pub struct TokenStore {
    storage: Arc<dyn KeyValueStorage>,
}

impl TokenStore {
    pub fn new(storage: Arc<dyn KeyValueStorage>) -> Self {
        Self { storage }
    }

    /// Overwrite all four token keys in one write.
    pub fn save(&self, pair: &TokenPair) -> io::Result<()> {
        let expires_at = pair.expires_at.to_rfc3339();
        self.storage.set_many(&[
            (ACCESS_TOKEN_KEY, pair.access_token.as_str()),
            (REFRESH_TOKEN_KEY, pair.refresh_token.as_str()),
            (TOKEN_TYPE_KEY, pair.token_type.as_str()),
            (EXPIRES_AT_KEY, expires_at.as_str()),
        ])
    }

    /// Remove all four token keys in one write.
    pub fn clear(&self) -> io::Result<()> {
        self.storage.remove_many(&TOKEN_KEYS)
    }

    pub fn access_token(&self) -> Option<String> {
        self.storage.get(ACCESS_TOKEN_KEY)
    }

    pub fn refresh_token(&self) -> Option<String> {
        self.storage.get(REFRESH_TOKEN_KEY)
    }

    pub fn token_type(&self) -> String {
        self.storage
            .get(TOKEN_TYPE_KEY)
            .unwrap_or_else(|| DEFAULT_TOKEN_TYPE.to_string())
    }

    /// Stored expiry; `None` if absent or unparseable
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.storage
            .get(EXPIRES_AT_KEY)
            .and_then(|raw| DateTime::parse_from_rfc3339(&raw).ok())
            .map(|dt| dt.with_timezone(&Utc))
    }

    /// The full pair, if both tokens and a readable expiry are stored.
    pub fn load(&self) -> Option<TokenPair> {
        Some(TokenPair {
            access_token: self.access_token()?,
            refresh_token: self.refresh_token()?,
            token_type: self.token_type(),
            expires_at: self.expires_at()?,
        })
    }

    /// Whether a stored pair exists and has not expired
    pub fn has_valid_tokens(&self) -> bool {
        self.load().is_some_and(|pair| !pair.is_expired())
    }

    /// `Authorization` header value for the stored access token
    pub fn authorization(&self) -> Option<String> {
        self.access_token()
            .map(|token| format!("{} {}", self.token_type(), token))
    }
}
