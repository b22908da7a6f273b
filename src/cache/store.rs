//! In-memory TTL cache for API responses
//!
//! Provides a `TtlCache` that stores cloneable values under string keys with
//! per-entry expiry timestamps and a bounded entry count. The cache knows
//! nothing about HTTP or JSON; the repository layer decides what goes in.

use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Default time-to-live for entries stored via [`TtlCache::set`], in seconds
const DEFAULT_TTL_SECS: u64 = 300;

/// Default maximum number of live entries
const DEFAULT_CAPACITY: usize = 100;

/// A single cached value with its expiry bookkeeping
#[derive(Debug)]
struct CacheEntry<T> {
    /// The cached value
    value: T,
    /// When the entry stops being served
    expires_at: DateTime<Utc>,
    /// Last read or write, used to pick an eviction victim
    last_used: DateTime<Utc>,
}

/// Bounded key-value store with per-entry expiration
///
/// `get` returns a value only while its TTL has not elapsed; expired entries
/// are lazily evicted on lookup. A `set` under an existing key replaces the
/// old entry (last write wins, never additive). When the entry count would
/// exceed the capacity, the least recently used entry is dropped; the exact
/// eviction order is a policy choice, the bound itself is the contract.
///
/// The store is safe to share between concurrent callers: all access goes
/// through one internal lock, and the handle is cheap to clone.
#[derive(Debug, Clone)]
pub struct TtlCache<T> {
    /// Shared entry map guarded by a single lock
    entries: Arc<Mutex<HashMap<String, CacheEntry<T>>>>,
    /// Maximum number of entries kept at once
    capacity: usize,
}

impl<T: Clone> TtlCache<T> {
    /// Creates a cache with the default capacity of 100 entries
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// Creates a cache bounded to `capacity` entries
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Arc::new(Mutex::new(HashMap::new())),
            capacity,
        }
    }

    /// Stores `value` under `key` with the default 300 second TTL
    pub fn set(&self, key: &str, value: T) {
        self.set_with_ttl(key, value, DEFAULT_TTL_SECS);
    }

    /// Stores `value` under `key`, replacing any previous entry
    ///
    /// The entry is served until `ttl_secs` seconds from now. Inserting a new
    /// key into a full cache first drops expired entries, then the least
    /// recently used live one.
    pub fn set_with_ttl(&self, key: &str, value: T, ttl_secs: u64) {
        let now = Utc::now();
        let entry = CacheEntry {
            value,
            expires_at: now + Duration::seconds(ttl_secs as i64),
            last_used: now,
        };

        let mut entries = self.lock();
        if !entries.contains_key(key) && entries.len() >= self.capacity {
            entries.retain(|_, e| now < e.expires_at);
            if entries.len() >= self.capacity {
                let victim = entries
                    .iter()
                    .min_by_key(|(_, e)| e.last_used)
                    .map(|(k, _)| k.clone());
                if let Some(victim) = victim {
                    entries.remove(&victim);
                }
            }
        }
        entries.insert(key.to_string(), entry);
    }

    /// Returns the value stored under `key` while its TTL has not elapsed
    ///
    /// An expired entry is removed and `None` is returned, so a stale value
    /// is never served.
    pub fn get(&self, key: &str) -> Option<T> {
        let now = Utc::now();
        let mut entries = self.lock();
        match entries.get_mut(key) {
            Some(entry) if now < entry.expires_at => {
                entry.last_used = now;
                Some(entry.value.clone())
            }
            Some(_) => {
                // Lazy eviction of the stale entry
                entries.remove(key);
                None
            }
            None => None,
        }
    }

    /// Removes all entries
    pub fn clear(&self) {
        self.lock().clear();
    }

    /// Number of stored entries, counting expired ones not yet evicted
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Returns true when the cache holds no entries
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Recovers the map even if another caller panicked mid-write
    fn lock(&self) -> MutexGuard<'_, HashMap<String, CacheEntry<T>>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<T: Clone> Default for TtlCache<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;
    use std::time::Duration as StdDuration;

    #[test]
    fn test_set_then_get_returns_value() {
        let cache: TtlCache<i32> = TtlCache::new();
        cache.set("answer", 42);
        assert_eq!(cache.get("answer"), Some(42));
    }

    #[test]
    fn test_get_returns_none_for_missing_key() {
        let cache: TtlCache<i32> = TtlCache::new();
        assert_eq!(cache.get("nothing"), None);
    }

    #[test]
    fn test_expired_entry_is_not_served() {
        let cache: TtlCache<String> = TtlCache::new();
        cache.set_with_ttl("stale", "value".to_string(), 0);

        // Small delay to ensure expiry
        thread::sleep(StdDuration::from_millis(10));

        assert_eq!(cache.get("stale"), None);
    }

    #[test]
    fn test_expired_entry_is_lazily_evicted() {
        let cache: TtlCache<String> = TtlCache::new();
        cache.set_with_ttl("stale", "value".to_string(), 0);
        thread::sleep(StdDuration::from_millis(10));

        assert_eq!(cache.len(), 1);
        assert_eq!(cache.get("stale"), None);
        assert_eq!(cache.len(), 0);
    }

    #[test]
    fn test_set_is_last_write_wins() {
        let cache: TtlCache<i32> = TtlCache::new();
        cache.set("key", 1);
        cache.set("key", 2);

        assert_eq!(cache.get("key"), Some(2));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_clear_removes_all_entries() {
        let cache: TtlCache<i32> = TtlCache::new();
        cache.set("a", 1);
        cache.set("b", 2);

        cache.clear();

        assert!(cache.is_empty());
        assert_eq!(cache.get("a"), None);
        assert_eq!(cache.get("b"), None);
    }

    #[test]
    fn test_capacity_bound_is_enforced() {
        let cache: TtlCache<i32> = TtlCache::with_capacity(2);
        cache.set("a", 1);
        cache.set("b", 2);
        cache.set("c", 3);

        assert_eq!(cache.len(), 2);
        // The newest entry always survives the eviction that made room for it
        assert_eq!(cache.get("c"), Some(3));
    }

    #[test]
    fn test_least_recently_used_entry_is_evicted_first() {
        let cache: TtlCache<i32> = TtlCache::with_capacity(2);
        cache.set("old", 1);
        thread::sleep(StdDuration::from_millis(5));
        cache.set("fresh", 2);
        thread::sleep(StdDuration::from_millis(5));

        // Touch "old" so "fresh" becomes the eviction victim
        assert_eq!(cache.get("old"), Some(1));
        thread::sleep(StdDuration::from_millis(5));
        cache.set("new", 3);

        assert_eq!(cache.get("old"), Some(1));
        assert_eq!(cache.get("fresh"), None);
        assert_eq!(cache.get("new"), Some(3));
    }

    #[test]
    fn test_overwriting_a_key_does_not_trigger_eviction() {
        let cache: TtlCache<i32> = TtlCache::with_capacity(2);
        cache.set("a", 1);
        cache.set("b", 2);
        cache.set("a", 10);

        assert_eq!(cache.get("a"), Some(10));
        assert_eq!(cache.get("b"), Some(2));
    }

    #[test]
    fn test_expired_entries_are_dropped_before_live_ones() {
        let cache: TtlCache<i32> = TtlCache::with_capacity(2);
        cache.set_with_ttl("stale", 1, 0);
        cache.set("live", 2);
        thread::sleep(StdDuration::from_millis(10));

        cache.set("new", 3);

        assert_eq!(cache.get("live"), Some(2));
        assert_eq!(cache.get("new"), Some(3));
        assert_eq!(cache.get("stale"), None);
    }

    #[test]
    fn test_concurrent_get_and_set_do_not_corrupt_state() {
        let cache: TtlCache<u64> = TtlCache::new();
        let mut handles = Vec::new();

        for worker in 0..8u64 {
            let cache = cache.clone();
            handles.push(thread::spawn(move || {
                for i in 0..100u64 {
                    let key = format!("key_{}", i % 10);
                    cache.set(&key, worker * 1000 + i);
                    let _ = cache.get(&key);
                }
            }));
        }
        for handle in handles {
            handle.join().expect("worker thread panicked");
        }

        // Ten distinct keys were written, each must hold some worker's value
        for i in 0..10u64 {
            assert!(cache.get(&format!("key_{}", i)).is_some());
        }
    }

    #[test]
    fn test_clone_shares_the_same_store() {
        let cache: TtlCache<i32> = TtlCache::new();
        let other = cache.clone();

        cache.set("shared", 7);

        assert_eq!(other.get("shared"), Some(7));
    }
}
