use std::sync::atomic::{AtomicU64, Ordering};

use dashmap::DashMap;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tokio::sync::broadcast;

use crate::error::CacheResult;
use crate::key::QueryKey;

/// Notification emitted after cache state changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CacheEvent {
    Updated(QueryKey),
    Invalidated(QueryKey),
    Removed(QueryKey),
    Cancelled(QueryKey),
}

#[derive(Debug, Clone)]
struct CacheEntry {
    value: Value,
    stale: bool,
}

/// Token handed out when a fetch begins; committing with a guard that
/// predates a cancellation is a no-op.
#[derive(Debug, Clone)]
pub struct FetchGuard {
    key: QueryKey,
    epoch: u64,
}

/// The client-side query cache.
///
/// Values are stored in serialized form, matching the heterogeneous shapes
/// a view layer caches; typed access goes through serde. Writes notify
/// subscribers through a broadcast channel.
pub struct QueryCache {
    entries: DashMap<QueryKey, CacheEntry>,
    epochs: DashMap<QueryKey, u64>,
    events: broadcast::Sender<CacheEvent>,
    epoch_counter: AtomicU64,
}

impl QueryCache {
    pub fn new() -> Self {
        let (events, _) = broadcast::channel(64);
        Self {
            entries: DashMap::new(),
            epochs: DashMap::new(),
            events,
            epoch_counter: AtomicU64::new(1),
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<CacheEvent> {
        self.events.subscribe()
    }

    /// Typed read. Returns `None` when the key is missing or the cached
    /// value does not deserialize to `T`.
    pub fn get<T: DeserializeOwned>(&self, key: &QueryKey) -> Option<T> {
        let entry = self.entries.get(key)?;
        match serde_json::from_value(entry.value.clone()) {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!("Cached value under {} has unexpected shape: {}", key, e);
                None
            }
        }
    }

    /// Typed write. Marks the entry fresh and notifies subscribers.
    pub fn set<T: Serialize>(&self, key: QueryKey, value: &T) -> CacheResult<()> {
        let value = serde_json::to_value(value)?;
        self.entries.insert(
            key.clone(),
            CacheEntry {
                value,
                stale: false,
            },
        );
        let _ = self.events.send(CacheEvent::Updated(key));
        Ok(())
    }

    /// Patch a single entry in place if present. Returns whether a patch
    /// was applied.
    pub fn update<T>(&self, key: &QueryKey, f: impl FnOnce(T) -> T) -> bool
    where
        T: DeserializeOwned + Serialize,
    {
        let Some(current) = self.get::<T>(key) else {
            return false;
        };
        let patched = f(current);
        self.set(key.clone(), &patched).is_ok()
    }

    /// Visit every cached entry under a namespace, replacing each value
    /// with the closure's result. Entries whose value does not deserialize
    /// to `T` are skipped.
    pub fn update_namespace<T>(&self, namespace: &str, mut f: impl FnMut(&QueryKey, T) -> T)
    where
        T: DeserializeOwned + Serialize,
    {
        let keys: Vec<QueryKey> = self
            .entries
            .iter()
            .filter(|entry| entry.key().namespace() == namespace)
            .map(|entry| entry.key().clone())
            .collect();

        for key in keys {
            if let Some(current) = self.get::<T>(&key) {
                let patched = f(&key, current);
                let _ = self.set(key, &patched);
            }
        }
    }

    pub fn keys_in_namespace(&self, namespace: &str) -> Vec<QueryKey> {
        self.entries
            .iter()
            .filter(|entry| entry.key().namespace() == namespace)
            .map(|entry| entry.key().clone())
            .collect()
    }

    /// Begin a fetch for a key. The returned guard must be presented when
    /// committing the fetched value.
    pub fn begin_fetch(&self, key: &QueryKey) -> FetchGuard {
        let epoch = *self
            .epochs
            .entry(key.clone())
            .or_insert_with(|| self.epoch_counter.fetch_add(1, Ordering::Relaxed));
        FetchGuard {
            key: key.clone(),
            epoch,
        }
    }

    /// Commit a fetched value. Returns `false` (and leaves the cache
    /// untouched) when the key was cancelled after the fetch began, so a
    /// racing refetch cannot overwrite an optimistic write.
    pub fn commit_fetch<T: Serialize>(&self, guard: FetchGuard, value: &T) -> CacheResult<bool> {
        let current = self.epochs.get(&guard.key).map(|e| *e);
        if current != Some(guard.epoch) {
            tracing::debug!("Dropping stale fetch result for {}", guard.key);
            return Ok(false);
        }
        self.set(guard.key, value)?;
        Ok(true)
    }

    /// Cancel in-flight fetches for a key. Fetches begun before the cancel
    /// will fail to commit.
    pub fn cancel(&self, key: &QueryKey) {
        self.epochs.insert(
            key.clone(),
            self.epoch_counter.fetch_add(1, Ordering::Relaxed),
        );
        let _ = self.events.send(CacheEvent::Cancelled(key.clone()));
    }

    /// Mark an entry stale and notify subscribers so it gets refetched.
    pub fn invalidate(&self, key: &QueryKey) {
        if let Some(mut entry) = self.entries.get_mut(key) {
            entry.stale = true;
        }
        let _ = self.events.send(CacheEvent::Invalidated(key.clone()));
    }

    pub fn is_stale(&self, key: &QueryKey) -> bool {
        self.entries.get(key).map(|e| e.stale).unwrap_or(true)
    }

    /// Raw snapshot of an entry for later rollback. `None` means the key
    /// was absent.
    pub fn snapshot(&self, key: &QueryKey) -> Option<Value> {
        self.entries.get(key).map(|entry| entry.value.clone())
    }

    /// Restore a snapshot taken earlier. A `None` snapshot removes the key.
    pub fn restore(&self, key: &QueryKey, snapshot: Option<Value>) {
        match snapshot {
            Some(value) => {
                self.entries.insert(
                    key.clone(),
                    CacheEntry {
                        value,
                        stale: false,
                    },
                );
                let _ = self.events.send(CacheEvent::Updated(key.clone()));
            }
            None => {
                self.entries.remove(key);
                let _ = self.events.send(CacheEvent::Removed(key.clone()));
            }
        }
    }

    pub fn remove(&self, key: &QueryKey) {
        if self.entries.remove(key).is_some() {
            let _ = self.events.send(CacheEvent::Removed(key.clone()));
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for QueryCache {
    fn default() -> Self {
        Self::new()
    }
}
