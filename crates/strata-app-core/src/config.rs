// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Settings storage for Strata tools: a keyed blob port plus typed JSON access.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::{de::DeserializeOwned, Serialize};
use thiserror::Error;

/// Where simulation prefs and other tool settings live, keyed by name
/// (`"sim"` for [`crate::prefs::SimPrefs`]).
pub trait ConfigStore {
    /// Raw JSON bytes stored under `key`, or [`ConfigError::NotFound`].
    fn load_raw(&self, key: &str) -> Result<Vec<u8>, ConfigError>;
    /// Replaces whatever is stored under `key`.
    fn save_raw(&self, key: &str, data: &[u8]) -> Result<(), ConfigError>;
}

/// Failures while reading or writing Strata settings.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Nothing is stored under the key.
    #[error("no config stored under `{0}`")]
    NotFound(String),
    /// The config directory itself could not be created or resolved.
    #[error("config directory {}: {reason}", path.display())]
    Dir {
        /// Directory that was requested (empty when it could not be resolved).
        path: PathBuf,
        /// What went wrong.
        reason: String,
    },
    /// Reading or writing the blob for `key` failed.
    #[error("config `{key}`: {source}")]
    Io {
        /// Config key being accessed.
        key: String,
        /// Underlying I/O failure.
        source: std::io::Error,
    },
    /// The blob for `key` is not valid JSON for the requested type.
    #[error("config `{key}` is malformed: {source}")]
    Malformed {
        /// Config key being decoded or encoded.
        key: String,
        /// Underlying JSON failure.
        source: serde_json::Error,
    },
}

impl ConfigError {
    /// Wraps an I/O failure on `key`.
    pub fn io(key: &str, source: std::io::Error) -> Self {
        Self::Io { key: key.to_owned(), source }
    }
}

/// Volatile store for tests and `--no-config` style runs; nothing touches disk.
#[derive(Debug, Default)]
pub struct MemoryConfigStore {
    blobs: RefCell<BTreeMap<String, Vec<u8>>>,
}

impl MemoryConfigStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl ConfigStore for MemoryConfigStore {
    fn load_raw(&self, key: &str) -> Result<Vec<u8>, ConfigError> {
        self.blobs.borrow().get(key).cloned().ok_or_else(|| ConfigError::NotFound(key.to_owned()))
    }

    fn save_raw(&self, key: &str, data: &[u8]) -> Result<(), ConfigError> {
        self.blobs.borrow_mut().insert(key.to_owned(), data.to_vec());
        Ok(())
    }
}

/// Typed JSON access to a [`ConfigStore`].
///
/// A missing key and an empty blob both read as "not configured yet".
pub struct ConfigService<S> {
    store: S,
}

impl<S> ConfigService<S> {
    /// Wraps `store`.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// The backing store.
    pub fn store(&self) -> &S {
        &self.store
    }
}

impl<S: ConfigStore> ConfigService<S> {
    /// Decodes the value stored under `key`; `Ok(None)` when nothing is stored.
    pub fn load<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, ConfigError> {
        let bytes = match self.store.load_raw(key) {
            Ok(bytes) if bytes.is_empty() => return Ok(None),
            Ok(bytes) => bytes,
            Err(ConfigError::NotFound(_)) => return Ok(None),
            Err(err) => return Err(err),
        };
        serde_json::from_slice(&bytes)
            .map(Some)
            .map_err(|source| ConfigError::Malformed { key: key.to_owned(), source })
    }

    /// Encodes `value` as pretty JSON under `key`.
    pub fn save<T: Serialize>(&self, key: &str, value: &T) -> Result<(), ConfigError> {
        let data = serde_json::to_vec_pretty(value)
            .map_err(|source| ConfigError::Malformed { key: key.to_owned(), source })?;
        self.store.save_raw(key, &data)
    }

    /// Loads `key`, writing `T::default()` first when nothing is stored.
    pub fn load_or_init<T>(&self, key: &str) -> Result<T, ConfigError>
    where
        T: DeserializeOwned + Serialize + Default,
    {
        if let Some(value) = self.load(key)? {
            return Ok(value);
        }
        let value = T::default();
        self.save(key, &value)?;
        Ok(value)
    }
}
