use crate::clock::{ClockHandle, SystemClock};
use crate::config::CacheConfig;
use std::collections::HashMap;
use std::sync::Arc;
use time::UtcDateTime;
use tokio::sync::RwLock;
use tracing::instrument;

/// Cache key for a query: trimmed and lowercased, so "Pikachu " and
/// "pikachu" share an entry.
pub fn normalize_key(query: &str) -> String {
    query.trim().to_lowercase()
}

/// Where an entry is in its lifecycle, as seen at a given instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryState {
    Absent,
    Fresh,
    Stale,
}

#[derive(Debug, Clone)]
struct CacheEntry<V> {
    value: V,
    created_at: UtcDateTime,
}

/// Query-keyed cache with a time-to-live and a retention window.
///
/// All methods take `&self`; the map sits behind a [`RwLock`] and is never
/// held across anything but map operations. Two callers missing on the same
/// key at the same time will both resolve it, and whichever writes last wins.
#[derive(Debug)]
pub struct ResponseCache<V> {
    config: CacheConfig,
    clock: ClockHandle,
    entries: RwLock<HashMap<String, CacheEntry<V>>>,
}
impl<V: Clone> ResponseCache<V> {
    pub fn new(config: CacheConfig) -> Self {
        Self::with_clock(config, Arc::new(SystemClock))
    }

    pub fn with_clock(config: CacheConfig, clock: ClockHandle) -> Self {
        Self { config, clock, entries: RwLock::new(HashMap::new()) }
    }

    pub fn config(&self) -> &CacheConfig {
        &self.config
    }

    fn age(&self, entry: &CacheEntry<V>, now: UtcDateTime) -> time::Duration {
        now - entry.created_at
    }

    fn is_fresh(&self, entry: &CacheEntry<V>, now: UtcDateTime) -> bool {
        self.age(entry, now) < self.config.ttl
    }

    /// The cached value for `query`, if it is still fresh.
    ///
    /// A stale entry is removed on the way out, unless a fresher write
    /// replaced it between the check and the removal.
    #[instrument(level = "debug", skip(self))]
    pub async fn get(&self, query: &str) -> Option<V> {
        let key = normalize_key(query);
        {
            let entries = self.entries.read().await;
            let entry = entries.get(&key)?;
            if self.is_fresh(entry, self.clock.now()) {
                tracing::debug!("Cache hit");
                return Some(entry.value.clone());
            }
        }
        let mut entries = self.entries.write().await;
        let now = self.clock.now();
        if let Some(entry) = entries.get(&key) {
            if self.is_fresh(entry, now) {
                tracing::debug!("Cache hit after concurrent refresh");
                return Some(entry.value.clone());
            }
            entries.remove(&key);
            tracing::debug!("Evicted stale entry");
        }
        None
    }

    /// Store (or overwrite) the value for `query`, timestamped now.
    #[instrument(level = "debug", skip(self, value))]
    pub async fn insert(&self, query: &str, value: V) {
        let entry = CacheEntry { value, created_at: self.clock.now() };
        self.entries.write().await.insert(normalize_key(query), entry);
    }

    pub async fn state(&self, query: &str) -> EntryState {
        let entries = self.entries.read().await;
        match entries.get(&normalize_key(query)) {
            None => EntryState::Absent,
            Some(entry) if self.is_fresh(entry, self.clock.now()) => EntryState::Fresh,
            Some(_) => EntryState::Stale,
        }
    }

    /// Remove every entry older than the retention window, returning how many
    /// went.
    ///
    /// Ages are checked against the entries as they are while the write lock
    /// is held, so a write that lands mid-sweep is never thrown away.
    #[instrument(level = "debug", skip(self))]
    pub async fn sweep(&self) -> usize {
        let mut entries = self.entries.write().await;
        let now = self.clock.now();
        let before = entries.len();
        entries.retain(|_, entry| self.age(entry, now) < self.config.retention);
        let evicted = before - entries.len();
        if evicted > 0 {
            tracing::debug!(evicted, remaining = entries.len(), "Swept expired entries");
        }
        evicted
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }

    pub async fn clear(&self) {
        self.entries.write().await.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MockClock;
    use std::time::Duration;

    fn cache(ttl: u64, retention: u64) -> (Arc<MockClock>, ResponseCache<String>) {
        let clock = Arc::new(MockClock::default());
        let config = CacheConfig::new(Duration::from_secs(ttl), Duration::from_secs(retention)).unwrap();
        (clock.clone(), ResponseCache::with_clock(config, clock))
    }

    #[tokio::test]
    async fn test_absent_then_fresh() {
        let (_clock, cache) = cache(30, 180);
        assert_eq!(cache.state("pikachu").await, EntryState::Absent);
        assert_eq!(cache.get("pikachu").await, None);
        cache.insert("pikachu", "reply".to_string()).await;
        assert_eq!(cache.state("pikachu").await, EntryState::Fresh);
        assert_eq!(cache.get("pikachu").await.as_deref(), Some("reply"));
    }

    #[tokio::test]
    async fn test_keys_are_normalized() {
        let (_clock, cache) = cache(30, 180);
        cache.insert("  Pikachu VMAX ", "reply".to_string()).await;
        assert_eq!(cache.get("pikachu vmax").await.as_deref(), Some("reply"));
        assert_eq!(cache.len().await, 1);
    }

    #[tokio::test]
    async fn test_stale_entry_is_missed_and_evicted() {
        let (clock, cache) = cache(30, 180);
        cache.insert("pikachu", "reply".to_string()).await;
        clock.advance(Duration::from_secs(29));
        assert_eq!(cache.state("pikachu").await, EntryState::Fresh);
        clock.advance(Duration::from_secs(1));
        assert_eq!(cache.state("pikachu").await, EntryState::Stale);
        assert_eq!(cache.get("pikachu").await, None);
        assert_eq!(cache.state("pikachu").await, EntryState::Absent);
    }

    #[tokio::test]
    async fn test_overwrite_refreshes() {
        let (clock, cache) = cache(30, 180);
        cache.insert("pikachu", "old".to_string()).await;
        clock.advance(Duration::from_secs(45));
        cache.insert("pikachu", "new".to_string()).await;
        assert_eq!(cache.get("pikachu").await.as_deref(), Some("new"));
    }

    #[tokio::test]
    async fn test_sweep_respects_retention() {
        let (clock, cache) = cache(30, 180);
        cache.insert("old", "a".to_string()).await;
        clock.advance(Duration::from_secs(100));
        cache.insert("newer", "b".to_string()).await;
        // "old" is stale but still retained.
        assert_eq!(cache.sweep().await, 0);
        clock.advance(Duration::from_secs(80));
        assert_eq!(cache.sweep().await, 1);
        assert_eq!(cache.state("old").await, EntryState::Absent);
        assert_eq!(cache.state("newer").await, EntryState::Stale);
    }

    #[tokio::test]
    async fn test_sweep_keeps_rewritten_entries() {
        let (clock, cache) = cache(30, 60);
        cache.insert("pikachu", "old".to_string()).await;
        clock.advance(Duration::from_secs(90));
        cache.insert("pikachu", "new".to_string()).await;
        assert_eq!(cache.sweep().await, 0);
        assert_eq!(cache.get("pikachu").await.as_deref(), Some("new"));
    }

    #[tokio::test]
    async fn test_clear() {
        let (_clock, cache) = cache(30, 180);
        cache.insert("a", "1".to_string()).await;
        cache.insert("b", "2".to_string()).await;
        cache.clear().await;
        assert!(cache.is_empty().await);
    }
}
