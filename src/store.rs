//! Key/value persistence
//!
//! Saved addresses, favorites and the auth session are all kept as string blobs behind a narrow
//! [`KeyValueStore`] interface so any backend can stand in for the browser's local storage.

use std::{
    fmt::Debug,
    fs, io,
    path::{Path, PathBuf},
    sync::{Mutex, MutexGuard, PoisonError},
};

use rustc_hash::FxHashMap;
use serde::{Serialize, de::DeserializeOwned};
use thiserror::Error;
use tracing::{debug, error};

/// Key holding the saved delivery addresses.
pub const ADDRESSES_KEY: &str = "foodwagon_addresses";

/// Key holding the favorited restaurant snapshots.
pub const FAVORITES_KEY: &str = "foodwagon_favorites";

/// Key holding the signed-in user profile.
pub const USER_KEY: &str = "foodwagon_user";

/// Key holding the session token.
pub const TOKEN_KEY: &str = "foodwagon_token";

/// Errors raised by store backends.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Reading or writing the backing file failed.
    #[error("failed to access store file")]
    Io(#[from] io::Error),

    /// A value could not be encoded or decoded.
    #[error("failed to encode or decode stored value")]
    Json(#[from] serde_json::Error),
}

/// Durable string key/value store.
pub trait KeyValueStore: Debug + Send + Sync {
    /// Fetch the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] if the backend cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Store `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] if the backend cannot be written.
    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Remove `key` from the store. Removing a missing key is not an error.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] if the backend cannot be written.
    fn remove(&self, key: &str) -> Result<(), StoreError>;
}

/// In-memory store, lost when dropped.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<FxHashMap<String, String>>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn entries(&self) -> MutexGuard<'_, FxHashMap<String, String>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.entries().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.entries().insert(key.to_string(), value.to_string());

        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        self.entries().remove(key);

        Ok(())
    }
}

/// Store backed by a single JSON object file, rewritten on every mutation.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    entries: Mutex<FxHashMap<String, String>>,
}

impl JsonFileStore {
    /// Open the store at `path`. A missing file is an empty store.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] if the file exists but cannot be read or is not a JSON object of
    /// strings.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref().to_path_buf();

        let entries = match fs::read_to_string(&path) {
            Ok(contents) if contents.trim().is_empty() => FxHashMap::default(),
            Ok(contents) => serde_json::from_str(&contents)?,
            Err(source) if source.kind() == io::ErrorKind::NotFound => FxHashMap::default(),
            Err(source) => return Err(source.into()),
        };

        debug!(path = %path.display(), keys = entries.len(), "opened json file store");

        Ok(Self {
            path,
            entries: Mutex::new(entries),
        })
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn entries(&self) -> MutexGuard<'_, FxHashMap<String, String>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Write `next` to disk, then swap it in. The in-memory map is untouched if the write fails.
    fn commit(
        &self,
        entries: &mut FxHashMap<String, String>,
        next: FxHashMap<String, String>,
    ) -> Result<(), StoreError> {
        let encoded = serde_json::to_string_pretty(&next)?;

        fs::write(&self.path, encoded)?;

        *entries = next;

        Ok(())
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.entries().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut entries = self.entries();
        let mut next = entries.clone();

        next.insert(key.to_string(), value.to_string());

        self.commit(&mut entries, next)
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        let mut entries = self.entries();

        if !entries.contains_key(key) {
            return Ok(());
        }

        let mut next = entries.clone();
        next.remove(key);

        self.commit(&mut entries, next)
    }
}

/// Load a JSON blob from `key`, falling back to the default value.
///
/// Missing keys, unreadable backends and unparseable blobs all degrade to `T::default()`; the
/// latter two are logged and never surfaced.
pub fn load_json<T>(store: &dyn KeyValueStore, key: &str) -> T
where
    T: DeserializeOwned + Default,
{
    match store.get(key) {
        Ok(Some(raw)) => serde_json::from_str(&raw).unwrap_or_else(|source| {
            error!(key, error = %source, "failed to parse stored value");
            T::default()
        }),
        Ok(None) => T::default(),
        Err(source) => {
            error!(key, error = %source, "failed to read stored value");
            T::default()
        }
    }
}

/// Encode `value` as JSON and store it under `key`.
///
/// # Errors
///
/// Returns a [`StoreError`] if encoding or the backend write fails.
pub fn save_json<T>(store: &dyn KeyValueStore, key: &str, value: &T) -> Result<(), StoreError>
where
    T: Serialize + ?Sized,
{
    let encoded = serde_json::to_string(value)?;

    store.set(key, &encoded)
}
