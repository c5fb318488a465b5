use log::trace;
use std::cell::Cell;
use std::collections::HashMap;
use std::collections::hash_map::{Entry, Values};
use std::hash::Hash;

/// Hit and miss counters of one cache.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub struct CacheCounters {
    pub hits: usize,
    pub misses: usize,
}

/// Process-lifetime map from a hash key to a GPU resource.
///
/// Entries are never evicted; they live until the cache itself is dropped.
pub struct Cache<K, V> {
    name: &'static str,
    data: HashMap<K, V>,
    hits: Cell<usize>,
    misses: Cell<usize>,
}

impl<K: Copy + Eq + Hash + std::fmt::Debug, V> Cache<K, V> {
    pub fn new(name: &'static str) -> Self {
        Cache {
            name,
            data: HashMap::new(),
            hits: Cell::new(0),
            misses: Cell::new(0),
        }
    }

    /// Looks up `key` and records a hit or a miss.
    pub fn lookup(&self, key: K) -> Option<&V> {
        let found = self.data.get(&key);
        match found {
            Some(_) => self.hits.set(self.hits.get() + 1),
            None => {
                self.misses.set(self.misses.get() + 1);
                trace!("[{} Cache] Miss: {key:?}, Misses: {}", self.name, self.misses.get());
            }
        }
        found
    }

    /// Looks up `key` without touching the counters.
    pub fn peek(&self, key: K) -> Option<&V> {
        self.data.get(&key)
    }

    pub fn contains(&self, key: K) -> bool {
        self.data.contains_key(&key)
    }

    /// Inserts `value` unless `key` is already present. Returns the stored value and
    /// whether it was newly inserted.
    pub fn insert(&mut self, key: K, value: V) -> (&V, bool) {
        match self.data.entry(key) {
            Entry::Occupied(entry) => (entry.into_mut(), false),
            Entry::Vacant(entry) => (entry.insert(value), true),
        }
    }

    /// Returns the cached value for `key`, creating it with `create` on a miss.
    /// A failed creation leaves the cache untouched.
    pub fn get_or_try_insert_with<E>(
        &mut self,
        key: K,
        create: impl FnOnce() -> Result<V, E>,
    ) -> Result<&V, E> {
        match self.data.entry(key) {
            Entry::Occupied(entry) => {
                self.hits.set(self.hits.get() + 1);
                Ok(entry.into_mut())
            }
            Entry::Vacant(entry) => {
                self.misses.set(self.misses.get() + 1);
                trace!("[{} Cache] Miss: {key:?}, Misses: {}", self.name, self.misses.get());
                Ok(entry.insert(create()?))
            }
        }
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn values(&self) -> Values<'_, K, V> {
        self.data.values()
    }

    pub fn counters(&self) -> CacheCounters {
        CacheCounters {
            hits: self.hits.get(),
            misses: self.misses.get(),
        }
    }

    /// Empties the cache, returning how many entries were dropped.
    pub fn drain_all(&mut self) -> usize {
        let count = self.data.len();
        self.data.clear();
        count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_hits_and_misses() {
        let mut cache: Cache<u32, &str> = Cache::new("Test");
        assert!(cache.lookup(1).is_none());
        cache.insert(1, "one");
        assert_eq!(cache.lookup(1), Some(&"one"));
        assert_eq!(cache.lookup(1), Some(&"one"));

        assert_eq!(cache.counters(), CacheCounters { hits: 2, misses: 1 });
    }

    #[test]
    fn insert_keeps_first_value() {
        let mut cache: Cache<u32, &str> = Cache::new("Test");
        assert!(cache.insert(7, "first").1);
        let (stored, inserted) = cache.insert(7, "second");
        assert!(!inserted);
        assert_eq!(*stored, "first");
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn failed_creation_is_not_cached() {
        let mut cache: Cache<u32, u32> = Cache::new("Test");
        let result: Result<&u32, &str> = cache.get_or_try_insert_with(5, || Err("nope"));
        assert!(result.is_err());
        assert!(!cache.contains(5));

        let mut calls = 0;
        for _ in 0..3 {
            let value = cache.get_or_try_insert_with(5, || {
                calls += 1;
                Ok::<_, ()>(50)
            });
            assert_eq!(value, Ok(&50));
        }
        assert_eq!(calls, 1);
        assert_eq!(cache.counters(), CacheCounters { hits: 2, misses: 2 });
    }

    #[test]
    fn peek_does_not_count() {
        let cache: Cache<u32, ()> = Cache::new("Test");
        assert!(cache.peek(3).is_none());
        assert_eq!(cache.counters(), CacheCounters::default());
    }

    #[test]
    fn drain_reports_count() {
        let mut cache: Cache<(u32, u32), u8> = Cache::new("Test");
        cache.insert((1, 2), 0);
        cache.insert((2, 1), 0);
        assert_eq!(cache.drain_all(), 2);
        assert!(cache.is_empty());
    }
}
