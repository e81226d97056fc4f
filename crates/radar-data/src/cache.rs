//! Time-to-live cache for raw fetch results.

use std::collections::HashMap;
use std::hash::Hash;
use std::time::{Duration, Instant};

struct Entry<V> {
    value: V,
    inserted_at: Instant,
}

/// In-memory cache whose entries expire a fixed time after insertion.
pub struct FetchCache<K, V> {
    entries: HashMap<K, Entry<V>>,
    ttl: Duration,
}

impl<K: Eq + Hash, V> FetchCache<K, V> {
    /// Create a new cache with the given time-to-live.
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: HashMap::new(),
            ttl,
        }
    }

    /// Get a fresh entry.
    pub fn get(&self, key: &K) -> Option<&V> {
        self.get_at(key, Instant::now())
    }

    /// Get an entry that is still fresh at `now`.
    pub fn get_at(&self, key: &K, now: Instant) -> Option<&V> {
        self.entries
            .get(key)
            .filter(|e| now.saturating_duration_since(e.inserted_at) < self.ttl)
            .map(|e| &e.value)
    }

    /// Store a value, replacing any previous entry for the key.
    pub fn insert(&mut self, key: K, value: V) {
        self.insert_at(key, value, Instant::now());
    }

    /// Store a value as if inserted at `now`.
    pub fn insert_at(&mut self, key: K, value: V, now: Instant) {
        self.entries.insert(
            key,
            Entry {
                value,
                inserted_at: now,
            },
        );
    }

    /// Remove one entry.
    pub fn invalidate(&mut self, key: &K) {
        self.entries.remove(key);
    }

    /// Remove all entries.
    pub fn invalidate_all(&mut self) {
        self.entries.clear();
    }

    /// Drop entries that have expired at `now`.
    pub fn purge_expired(&mut self, now: Instant) {
        let ttl = self.ttl;
        self.entries
            .retain(|_, e| now.saturating_duration_since(e.inserted_at) < ttl);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }
}
