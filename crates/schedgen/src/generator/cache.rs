//! TTL-based caching for generation results.
//!
//! Generation is deterministic, so identical requests can be answered from
//! cache while students tweak course selections back and forth in the UI.

use dashmap::DashMap;
use sha2::{Digest, Sha256};
use std::time::{Duration, Instant};

use super::search::SearchLimits;
use super::types::Course;
use super::Generation;

/// A cache key derived from the full generation request.
#[derive(Debug, Clone, Hash, Eq, PartialEq)]
pub struct RequestKey(String);

impl RequestKey {
    /// Creates a key from the request's course list and limits.
    ///
    /// The canonical JSON encoding of both is hashed, so any change to the
    /// requested courses or ceilings produces a different key.
    pub fn from_request(courses: &[Course], limits: &SearchLimits) -> Self {
        let mut hasher = Sha256::new();
        // Struct fields serialize in declaration order, so the encoding is
        // stable for equal inputs.
        if let Ok(body) = serde_json::to_vec(courses) {
            hasher.update(&body);
        }
        if let Ok(body) = serde_json::to_vec(limits) {
            hasher.update(&body);
        }
        let digest = hasher.finalize();
        // Use first 16 bytes as hex string
        Self(hex::encode(&digest[..16]))
    }

    /// Returns the internal hash string (for logging/debugging).
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for RequestKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // First 8 chars are plenty for log lines
        write!(f, "{}...", &self.0[..8.min(self.0.len())])
    }
}

/// A cached generation result with metadata.
#[derive(Clone)]
struct CachedGeneration {
    result: Generation,
    cached_at: Instant,
    ttl: Duration,
}

/// Thread-safe cache for generation results.
///
/// Uses DashMap for concurrent access without external locking.
pub struct GenerationCache {
    entries: DashMap<RequestKey, CachedGeneration>,
    default_ttl: Duration,
}

impl GenerationCache {
    /// Creates a new cache with the specified default TTL.
    pub fn new(default_ttl: Duration) -> Self {
        Self {
            entries: DashMap::new(),
            default_ttl,
        }
    }

    /// Creates a cache with a 10-minute default TTL.
    pub fn with_default_ttl() -> Self {
        Self::new(Duration::from_secs(10 * 60))
    }

    /// Gets a cached result if it exists and hasn't expired.
    pub fn get(&self, key: &RequestKey) -> Option<Generation> {
        self.entries.get(key).and_then(|entry| {
            if entry.cached_at.elapsed() < entry.ttl {
                Some(entry.result.clone())
            } else {
                // Entry expired, remove it
                drop(entry);
                self.entries.remove(key);
                None
            }
        })
    }

    /// Inserts a generation result with the default TTL.
    pub fn insert(&self, key: RequestKey, result: Generation) {
        self.insert_with_ttl(key, result, self.default_ttl);
    }

    /// Inserts a generation result with a custom TTL.
    pub fn insert_with_ttl(&self, key: RequestKey, result: Generation, ttl: Duration) {
        self.entries.insert(
            key,
            CachedGeneration {
                result,
                cached_at: Instant::now(),
                ttl,
            },
        );
    }

    /// Invalidates (removes) a cached entry.
    pub fn invalidate(&self, key: &RequestKey) {
        self.entries.remove(key);
    }

    /// Clears all entries from the cache.
    pub fn clear(&self) {
        self.entries.clear();
    }

    /// Returns the number of entries in the cache (including expired ones).
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the cache is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Removes expired entries from the cache.
    ///
    /// Call this periodically if you want proactive cleanup.
    pub fn cleanup_expired(&self) {
        self.entries
            .retain(|_, entry| entry.cached_at.elapsed() < entry.ttl);
    }

    /// Gets cache statistics.
    pub fn stats(&self) -> CacheStats {
        let mut total = 0;
        let mut expired = 0;

        for entry in self.entries.iter() {
            total += 1;
            if entry.cached_at.elapsed() >= entry.ttl {
                expired += 1;
            }
        }

        CacheStats {
            total_entries: total,
            expired_entries: expired,
            active_entries: total - expired,
        }
    }
}

impl Default for GenerationCache {
    fn default() -> Self {
        Self::with_default_ttl()
    }
}

/// Cache statistics for monitoring.
#[derive(Debug, Clone)]
pub struct CacheStats {
    pub total_entries: usize,
    pub expired_entries: usize,
    pub active_entries: usize,
}

/// Helper module for hex encoding (avoiding extra dependency).
mod hex {
    pub fn encode(bytes: &[u8]) -> String {
        bytes.iter().map(|b| format!("{:02x}", b)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::search::SearchStats;
    use crate::generator::types::Schedule;

    fn empty_generation() -> Generation {
        Generation {
            schedules: Vec::<Schedule>::new(),
            stats: SearchStats::default(),
        }
    }

    #[test]
    fn test_request_key_is_stable_for_equal_input() {
        let limits = SearchLimits::default();
        let key1 = RequestKey::from_request(&[], &limits);
        let key2 = RequestKey::from_request(&[], &limits);
        assert_eq!(key1, key2);
    }

    #[test]
    fn test_request_key_changes_with_limits() {
        let key1 = RequestKey::from_request(&[], &SearchLimits::default());
        let key2 = RequestKey::from_request(
            &[],
            &SearchLimits {
                max_queue: 10,
                max_schedules: 10,
            },
        );
        assert_ne!(key1, key2);
    }

    #[test]
    fn test_expired_entries_are_dropped_on_get() {
        let cache = GenerationCache::new(Duration::from_secs(0));
        let key = RequestKey::from_request(&[], &SearchLimits::default());
        cache.insert(key.clone(), empty_generation());
        assert!(cache.get(&key).is_none());
        assert!(cache.is_empty());
    }

    #[test]
    fn test_insert_get_invalidate_roundtrip() {
        let cache = GenerationCache::with_default_ttl();
        let key = RequestKey::from_request(&[], &SearchLimits::default());
        cache.insert(key.clone(), empty_generation());
        assert!(cache.get(&key).is_some());
        assert_eq!(cache.stats().active_entries, 1);

        cache.invalidate(&key);
        assert!(cache.get(&key).is_none());
    }
}
