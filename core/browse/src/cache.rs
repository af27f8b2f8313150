//! Per-session memo of search pages

use std::future::Future;
use std::num::NonZeroUsize;
use std::sync::Arc;

use catalog::SearchEnvelope;
use lru::LruCache;
use parking_lot::Mutex;

use crate::BrowseMode;

/// Cache slot identity
///
/// The mode is part of the key: page 2 of an infinite list is an appended
/// chunk, page 2 of a paged list is a replacement page.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    pub query: String,
    pub mode: BrowseMode,
    pub page: u32,
}

impl CacheKey {
    pub fn new(query: impl Into<String>, mode: BrowseMode, page: u32) -> Self {
        Self {
            query: query.into(),
            mode,
            page,
        }
    }
}

impl std::fmt::Display for CacheKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}_{}_{}", self.query, self.mode, self.page)
    }
}

/// Bounded LRU of search envelopes
///
/// Envelopes are immutable once stored. Empty envelopes are cached as well.
/// The lock is never held across an await. `clear` starts a new epoch, and a
/// fetch begun in an earlier epoch is not stored when it lands.
pub struct QueryCache {
    inner: Mutex<Entries>,
}

struct Entries {
    pages: LruCache<CacheKey, Arc<SearchEnvelope>>,
    epoch: u64,
}

impl QueryCache {
    /// Create a cache holding at most `capacity` pages (minimum 1).
    pub fn new(capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            inner: Mutex::new(Entries {
                pages: LruCache::new(capacity),
                epoch: 0,
            }),
        }
    }

    pub fn get(&self, key: &CacheKey) -> Option<Arc<SearchEnvelope>> {
        self.inner.lock().pages.get(key).cloned()
    }

    pub fn insert(&self, key: CacheKey, envelope: SearchEnvelope) -> Arc<SearchEnvelope> {
        let envelope = Arc::new(envelope);
        self.inner.lock().pages.put(key, Arc::clone(&envelope));
        envelope
    }

    /// Get cached data or fetch it using the provided async function
    ///
    /// The result is only stored if the cache was not cleared while fetching.
    pub async fn get_or_fetch<F, Fut>(&self, key: CacheKey, fetcher: F) -> Arc<SearchEnvelope>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = SearchEnvelope>,
    {
        let epoch = {
            let mut inner = self.inner.lock();
            if let Some(cached) = inner.pages.get(&key) {
                tracing::debug!("Cache hit for '{}'", key);
                return Arc::clone(cached);
            }
            inner.epoch
        };

        tracing::debug!("Cache miss for '{}'", key);
        let envelope = Arc::new(fetcher().await);

        let mut inner = self.inner.lock();
        if inner.epoch == epoch {
            inner.pages.put(key, Arc::clone(&envelope));
        } else {
            tracing::debug!("Cache cleared while fetching '{}', not storing", key);
        }
        envelope
    }

    pub fn len(&self) -> usize {
        self.inner.lock().pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.lock().pages.is_empty()
    }

    pub fn clear(&self) {
        let mut inner = self.inner.lock();
        inner.pages.clear();
        inner.epoch += 1;
    }
}
