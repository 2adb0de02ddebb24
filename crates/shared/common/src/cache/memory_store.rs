//! In-memory cache store using DashMap (stands in for Redis in development and tests).

use std::sync::{Arc, Weak};
use std::time::{Duration, Instant};

use async_trait::async_trait;
use dashmap::DashMap;
use tokio::task::JoinHandle;
use tracing::debug;

use super::{CacheError, CacheStore};

struct CacheEntry {
    value: String,
    expires_at: Instant,
}

impl CacheEntry {
    fn is_expired(&self, now: Instant) -> bool {
        self.expires_at <= now
    }
}

/// Process-local store. Expired entries are dropped on read or by the sweeper.
#[derive(Clone, Default)]
pub struct MemoryStore {
    data: Arc<DashMap<String, CacheEntry>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live (non-expired) entries.
    pub fn len(&self) -> usize {
        let now = Instant::now();
        self.data.iter().filter(|e| e.expires_at > now).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Check whether a live entry exists for `key`.
    pub fn contains_key(&self, key: &str) -> bool {
        self.data
            .get(key)
            .map(|entry| entry.expires_at > Instant::now())
            .unwrap_or(false)
    }

    /// Drop every expired entry and return how many were removed.
    pub fn purge_expired(&self) -> usize {
        purge(&self.data)
    }

    /// Start a background task that purges expired entries every `period`.
    ///
    /// Keys that are never read again would otherwise stay in the map. The
    /// task ends once the last handle to the store is dropped.
    pub fn spawn_sweeper(&self, period: Duration) -> JoinHandle<()> {
        let data: Weak<DashMap<String, CacheEntry>> = Arc::downgrade(&self.data);
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(period);
            loop {
                interval.tick().await;
                let Some(data) = data.upgrade() else {
                    break;
                };
                let removed = purge(&data);
                if removed > 0 {
                    debug!(removed, "Purged expired cache entries");
                }
            }
        })
    }
}

fn purge(data: &DashMap<String, CacheEntry>) -> usize {
    let now = Instant::now();
    let before = data.len();
    data.retain(|_, entry| !entry.is_expired(now));
    before.saturating_sub(data.len())
}

#[async_trait]
impl CacheStore for MemoryStore {
    async fn get_raw(&self, key: &str) -> Result<Option<String>, CacheError> {
        let value = match self.data.get(key) {
            Some(entry) if !entry.is_expired(Instant::now()) => Some(entry.value.clone()),
            Some(entry) => {
                drop(entry);
                self.data.remove(key);
                None
            }
            None => None,
        };
        Ok(value)
    }

    async fn set_raw(&self, key: &str, value: String, ttl_seconds: u64) -> Result<(), CacheError> {
        self.data.insert(
            key.to_string(),
            CacheEntry {
                value,
                expires_at: Instant::now() + Duration::from_secs(ttl_seconds),
            },
        );
        Ok(())
    }

    async fn delete_many(&self, keys: &[String]) -> Result<(), CacheError> {
        for key in keys {
            self.data.remove(key);
        }
        Ok(())
    }

    async fn ping(&self) -> Result<(), CacheError> {
        Ok(())
    }
}
