use log::debug;
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

/// Cap for TTLs too large to add to an `Instant`.
const ONE_YEAR: Duration = Duration::from_secs(365 * 24 * 3600);

struct Entry<V> {
    value: V,
    expires_at: Instant,
}

/// In-process key/value store with a time-to-live per entry.
///
/// Expiry is lazy: an entry is dropped the first time it is read at or after
/// its expiry instant.
///
/// ```
/// use event_weather::MemoryCache;
/// use std::time::Duration;
///
/// let cache = MemoryCache::new();
/// cache.put("radar", vec![1, 2, 3], Duration::from_secs(120));
/// assert_eq!(cache.get("radar"), Some(vec![1, 2, 3]));
/// assert_eq!(cache.get("satellite"), None);
/// ```
pub struct MemoryCache<V> {
    entries: Mutex<HashMap<String, Entry<V>>>,
}

impl<V: Clone> MemoryCache<V> {
    pub fn new() -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
        }
    }

    pub fn get(&self, key: &str) -> Option<V> {
        let mut entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        let expired = match entries.get(key) {
            None => return None,
            Some(entry) => Instant::now() >= entry.expires_at,
        };
        if expired {
            debug!("Memory cache entry '{}' expired", key);
            entries.remove(key);
            return None;
        }
        entries.get(key).map(|entry| entry.value.clone())
    }

    pub fn put(&self, key: impl Into<String>, value: V, ttl: Duration) {
        let now = Instant::now();
        let expires_at = now.checked_add(ttl).unwrap_or(now + ONE_YEAR);
        let mut entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        entries.insert(key.into(), Entry { value, expires_at });
    }

    pub fn remove(&self, key: &str) -> Option<V> {
        let mut entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        entries.remove(key).map(|entry| entry.value)
    }

    /// Number of stored entries, including expired ones not read since expiring.
    pub fn len(&self) -> usize {
        self.entries.lock().unwrap_or_else(|e| e.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<V: Clone> Default for MemoryCache<V> {
    fn default() -> Self {
        Self::new()
    }
}
