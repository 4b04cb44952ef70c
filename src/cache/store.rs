// Render cache store.
// Holds previously fetched render payloads keyed by CacheKey, with optional TTL.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use chrono::{DateTime, Utc};
use dashmap::DashMap;
use tracing::debug;

use super::keys::CacheKey;

/// Inserts between sweeps of expired entries.
const SWEEP_INTERVAL: usize = 64;

/// Wrapper for cached data with metadata.
#[derive(Debug, Clone)]
pub struct CachedData<T> {
    /// The cached data.
    pub data: Arc<T>,
    /// When the data was cached.
    pub cached_at: DateTime<Utc>,
}

impl<T> CachedData<T> {
    /// Create a new cached data entry.
    pub fn new(data: Arc<T>) -> Self {
        Self {
            data,
            cached_at: Utc::now(),
        }
    }

    /// Check if this cached data has expired. Without a TTL nothing expires.
    pub fn is_expired(&self, ttl: Option<Duration>) -> bool {
        let Some(ttl) = ttl else {
            return false;
        };

        let elapsed = Utc::now()
            .signed_duration_since(self.cached_at)
            .to_std()
            .unwrap_or(Duration::ZERO);

        elapsed > ttl
    }

    /// Check if this cached data is still valid (not expired).
    pub fn is_valid(&self, ttl: Option<Duration>) -> bool {
        !self.is_expired(ttl)
    }
}

/// In-memory cache of render payloads, shared across request handlers.
///
/// Writes are last-write-wins. There is no in-flight de-duplication: two
/// concurrent misses for the same key both fetch and both insert.
pub struct RenderCache<T> {
    entries: DashMap<CacheKey, CachedData<T>>,
    ttl: Option<Duration>,
    inserts: AtomicUsize,
}

impl<T> RenderCache<T> {
    /// Create a cache whose entries live for the process lifetime.
    pub fn new() -> Self {
        Self::with_ttl(None)
    }

    pub fn with_ttl(ttl: Option<Duration>) -> Self {
        Self {
            entries: DashMap::new(),
            ttl,
            inserts: AtomicUsize::new(0),
        }
    }

    /// Look up a fresh entry. Expired entries are dropped on read.
    pub fn get(&self, key: &CacheKey) -> Option<Arc<T>> {
        let data = {
            let entry = self.entries.get(key)?;
            entry.is_valid(self.ttl).then(|| Arc::clone(&entry.data))
        };

        if data.is_none() {
            debug!(key = %key, "dropping expired cache entry");
            self.entries
                .remove_if(key, |_, cached| cached.is_expired(self.ttl));
        }
        data
    }

    /// Store a payload, replacing any previous entry for the key.
    ///
    /// With a TTL set, every `SWEEP_INTERVAL`th insert also drops expired
    /// entries, so keys that are never read again do not pile up.
    pub fn insert(&self, key: CacheKey, data: Arc<T>) {
        let inserted = self.inserts.fetch_add(1, Ordering::Relaxed) + 1;
        if self.ttl.is_some() && inserted % SWEEP_INTERVAL == 0 {
            self.purge_expired();
        }
        self.entries.insert(key, CachedData::new(data));
    }

    /// Drop every expired entry, returning how many were removed.
    pub fn purge_expired(&self) -> usize {
        let before = self.entries.len();
        self.entries.retain(|_, cached| cached.is_valid(self.ttl));
        let purged = before.saturating_sub(self.entries.len());
        if purged > 0 {
            debug!(purged, "swept expired cache entries");
        }
        purged
    }

    pub fn remove(&self, key: &CacheKey) -> Option<Arc<T>> {
        self.entries.remove(key).map(|(_, cached)| cached.data)
    }

    /// Drop every entry, returning how many were removed.
    pub fn clear(&self) -> usize {
        let count = self.entries.len();
        self.entries.clear();
        count
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<T> Default for RenderCache<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(term: &str) -> CacheKey {
        CacheKey::list(&[("query", term)])
    }

    #[test]
    fn test_insert_and_get() {
        let cache = RenderCache::new();
        cache.insert(key("react"), Arc::new(42));

        assert_eq!(cache.get(&key("react")).as_deref(), Some(&42));
        assert!(cache.get(&key("vue")).is_none());
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_last_write_wins() {
        let cache = RenderCache::new();
        cache.insert(key("react"), Arc::new("first"));
        cache.insert(key("react"), Arc::new("second"));

        assert_eq!(cache.get(&key("react")).as_deref(), Some(&"second"));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_clear_and_remove() {
        let cache = RenderCache::new();
        cache.insert(key("a"), Arc::new(1));
        cache.insert(key("b"), Arc::new(2));
        cache.insert(key("c"), Arc::new(3));

        assert_eq!(cache.remove(&key("a")).as_deref(), Some(&1));
        assert_eq!(cache.clear(), 2);
        assert!(cache.is_empty());
    }

    #[test]
    fn test_no_ttl_never_expires() {
        let mut data = CachedData::new(Arc::new("test"));
        data.cached_at = Utc::now() - chrono::Duration::days(365);

        assert!(!data.is_expired(None));
    }

    #[test]
    fn test_ttl_expires() {
        let mut data = CachedData::new(Arc::new("test"));
        data.cached_at = Utc::now() - chrono::Duration::seconds(600);

        assert!(data.is_expired(Some(Duration::from_secs(300))));
        assert!(data.is_valid(Some(Duration::from_secs(900))));
    }

    #[test]
    fn test_expired_entry_is_dropped_on_read() {
        let cache = RenderCache::with_ttl(Some(Duration::ZERO));
        cache.insert(key("react"), Arc::new(1));
        std::thread::sleep(Duration::from_millis(5));

        assert!(cache.get(&key("react")).is_none());
        assert!(cache.is_empty());
    }

    #[test]
    fn test_purge_expired_keeps_fresh_entries() {
        let cache = RenderCache::with_ttl(Some(Duration::from_secs(300)));
        cache.insert(key("fresh"), Arc::new(1));
        cache.insert(key("stale"), Arc::new(2));
        cache
            .entries
            .get_mut(&key("stale"))
            .unwrap()
            .cached_at = Utc::now() - chrono::Duration::seconds(600);

        assert_eq!(cache.purge_expired(), 1);
        assert_eq!(cache.get(&key("fresh")).as_deref(), Some(&1));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_unread_expired_keys_are_swept_on_insert() {
        let cache = RenderCache::with_ttl(Some(Duration::from_secs(300)));
        cache.insert(key("never-read"), Arc::new(0));
        cache
            .entries
            .get_mut(&key("never-read"))
            .unwrap()
            .cached_at = Utc::now() - chrono::Duration::seconds(600);

        for n in 1..SWEEP_INTERVAL {
            cache.insert(key(&format!("query-{n}")), Arc::new(n));
        }

        assert!(!cache.entries.contains_key(&key("never-read")));
        assert_eq!(cache.len(), SWEEP_INTERVAL - 1);
    }

    #[test]
    fn test_no_sweep_without_ttl() {
        let cache = RenderCache::new();
        for n in 0..SWEEP_INTERVAL * 2 {
            cache.insert(key(&format!("query-{n}")), Arc::new(n));
        }

        assert_eq!(cache.purge_expired(), 0);
        assert_eq!(cache.len(), SWEEP_INTERVAL * 2);
    }
}
