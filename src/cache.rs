use std::collections::HashMap;
use std::hash::Hash;
use std::num::NonZeroUsize;

use lru::LruCache;

/// Memoizes results by their call arguments.
///
/// `Unbounded` never forgets anything. `Lru` keeps at most `capacity` entries
/// and evicts the least recently used one when full.
pub(crate) enum MemoCache<K: Hash + Eq, V> {
    Unbounded(HashMap<K, V>),
    Lru(LruCache<K, V>),
}

impl<K: Hash + Eq, V: Clone> MemoCache<K, V> {
    pub(crate) fn unbounded() -> Self {
        MemoCache::Unbounded(HashMap::new())
    }

    pub(crate) fn bounded(capacity: NonZeroUsize) -> Self {
        MemoCache::Lru(LruCache::new(capacity))
    }

    /// Looks up `key`, marking it as recently used.
    pub(crate) fn get(&mut self, key: &K) -> Option<&V> {
        match self {
            MemoCache::Unbounded(map) => map.get(key),
            MemoCache::Lru(lru) => lru.get(key),
        }
    }

    /// Checks for `key` without touching its recency.
    pub(crate) fn contains(&self, key: &K) -> bool {
        match self {
            MemoCache::Unbounded(map) => map.contains_key(key),
            MemoCache::Lru(lru) => lru.contains(key),
        }
    }

    /// Stores `value`, returning the entry evicted to make room, if any.
    pub(crate) fn insert(&mut self, key: K, value: V) -> Option<(K, V)> {
        match self {
            MemoCache::Unbounded(map) => {
                map.insert(key, value);
                None
            }
            MemoCache::Lru(lru) => lru.push(key, value).filter(|(k, _)| !lru.contains(k)),
        }
    }

    /// Returns the cached value for `key` or computes, stores and returns it.
    ///
    /// Failed computations are not cached.
    pub(crate) fn get_or_try_insert_with<E>(
        &mut self,
        key: K,
        f: impl FnOnce() -> Result<V, E>,
    ) -> Result<V, E> {
        if let Some(v) = self.get(&key) {
            return Ok(v.clone());
        }
        let value = f()?;
        if self.insert(key, value.clone()).is_some() {
            log::trace!("memo cache full, evicted least recently used entry");
        }
        Ok(value)
    }

    pub(crate) fn len(&self) -> usize {
        match self {
            MemoCache::Unbounded(map) => map.len(),
            MemoCache::Lru(lru) => lru.len(),
        }
    }

    /// `None` for unbounded caches.
    pub(crate) fn capacity(&self) -> Option<usize> {
        match self {
            MemoCache::Unbounded(_) => None,
            MemoCache::Lru(lru) => Some(lru.cap().get()),
        }
    }

    pub(crate) fn clear(&mut self) {
        match self {
            MemoCache::Unbounded(map) => map.clear(),
            MemoCache::Lru(lru) => lru.clear(),
        }
    }
}
