//! Asset cache with non-blocking lookups
//!
//! Decoding happens elsewhere (browser image/audio decoders). The frame loop
//! never waits on it: it asks the cache, and anything not `Ready` means "use
//! the procedural fallback".

use std::collections::HashMap;
use std::hash::Hash;

use thiserror::Error;

/// Why an asset could not be loaded
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AssetError {
    #[error("failed to fetch {path}: {reason}")]
    Fetch { path: String, reason: String },
    #[error("failed to decode {path}: {reason}")]
    Decode { path: String, reason: String },
    #[error("no decoder available for {path}")]
    Unavailable { path: String },
}

/// Load state of a single asset
#[derive(Debug, Clone, PartialEq)]
pub enum AssetState<V> {
    Pending,
    Ready(V),
    Failed(AssetError),
}

impl<V> AssetState<V> {
    pub fn is_ready(&self) -> bool {
        matches!(self, AssetState::Ready(_))
    }
}

/// Cache keyed by asset identifier
#[derive(Debug)]
pub struct AssetCache<K, V> {
    entries: HashMap<K, AssetState<V>>,
}

impl<K, V> Default for AssetCache<K, V> {
    fn default() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }
}

impl<K: Eq + Hash + Copy + std::fmt::Debug, V> AssetCache<K, V> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark `key` as loading.
    ///
    /// Returns `true` if the caller should start a load; `false` if the asset is
    /// already pending, ready or failed (failed assets are not retried).
    pub fn request(&mut self, key: K) -> bool {
        if self.entries.contains_key(&key) {
            return false;
        }
        self.entries.insert(key, AssetState::Pending);
        true
    }

    /// Record the outcome of a load
    pub fn resolve(&mut self, key: K, result: Result<V, AssetError>) {
        let state = match result {
            Ok(value) => {
                log::debug!("Asset {:?} ready", key);
                AssetState::Ready(value)
            }
            Err(err) => {
                log::warn!("Asset {:?} unavailable, using fallback: {}", key, err);
                AssetState::Failed(err)
            }
        };
        self.entries.insert(key, state);
    }

    /// The decoded asset, if it is ready right now
    pub fn get(&self, key: K) -> Option<&V> {
        match self.entries.get(&key) {
            Some(AssetState::Ready(value)) => Some(value),
            _ => None,
        }
    }

    pub fn state(&self, key: K) -> Option<&AssetState<V>> {
        self.entries.get(&key)
    }

    pub fn is_ready(&self, key: K) -> bool {
        self.get(key).is_some()
    }

    /// Keys still waiting on a decoder
    pub fn pending(&self) -> Vec<K> {
        self.entries
            .iter()
            .filter(|(_, state)| matches!(state, AssetState::Pending))
            .map(|(key, _)| *key)
            .collect()
    }
}
