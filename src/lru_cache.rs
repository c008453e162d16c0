use super::RawLruCache;
use parking_lot::Mutex;
use std::hash::Hash;

/// A thread-safe LRU cache serialized by a single mutex.
///
/// Every public operation acquires the one lock owned by the cache and
/// holds it end-to-end, so callers observe a strict serial order across
/// all threads. There is no per-key locking and no read-only fast path:
/// even [`get`](Self::get) mutates recency, so it takes exclusive
/// access like everything else.
///
/// # Type Parameters
///
/// * `K` - The type of keys used in the cache. Must implement `Eq + Hash + Clone`
/// * `V` - The type of values stored in the cache. Must implement `Clone`
///
/// # Examples
///
/// ```rust
/// use lru_fetch::LruCache;
///
/// let cache = LruCache::new(1000);
/// cache.update("key1".to_string(), "value1".to_string());
/// assert_eq!(cache.get(&"key1".to_string()), Some("value1".to_string()));
/// ```
pub struct LruCache<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    inner: Mutex<RawLruCache<K, V>>,
}

impl<K, V> LruCache<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    /// Creates a new cache bounded to `capacity` entries.
    ///
    /// As with [`RawLruCache`], a capacity of zero is accepted and
    /// yields a cache that retains nothing.
    pub fn new(capacity: usize) -> Self {
        Self {
            inner: Mutex::new(RawLruCache::new(capacity)),
        }
    }

    /// Returns the configured maximum number of entries.
    pub fn capacity(&self) -> usize {
        self.inner.lock().capacity()
    }

    /// Returns the number of entries in the cache.
    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    /// Returns true if the cache is empty.
    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }

    /// Retrieves a value from the cache by its key.
    ///
    /// If the key exists, the entry is promoted to most-recently-used
    /// and its value is cloned and returned.
    ///
    /// # Returns
    ///
    /// * `Some(V)` if the key exists
    /// * `None` if the key doesn't exist
    pub fn get(&self, key: &K) -> Option<V> {
        self.inner.lock().get(key)
    }

    /// Inserts a key-value pair, overwriting any previous value.
    ///
    /// A new key is inserted at the most-recently-used position; the
    /// least-recently-used entry is evicted if the capacity bound is
    /// exceeded. Evicted entries are discarded silently.
    pub fn update(&self, key: K, value: V) {
        self.inner.lock().update(key, value)
    }

    /// Looks up `key`, populating the cache on a miss.
    ///
    /// The whole get/compute/update sequence runs as one atomic unit:
    /// `compute` executes *while the cache lock is held*, so concurrent
    /// callers racing on the same missing key trigger at most one
    /// computation — at the cost of every other cache operation
    /// blocking behind a slow callback.
    ///
    /// The callback must not touch this cache instance; re-entry
    /// deadlocks the single-lock design.
    ///
    /// # Returns
    ///
    /// * `Some(V)` on a hit, or on a miss where `compute` produced a value
    /// * `None` if the key was absent and `compute` returned `None`
    pub fn fetch<F>(&self, key: K, compute: F) -> Option<V>
    where
        F: FnOnce(&K) -> Option<V>,
    {
        self.inner.lock().fetch(key, compute)
    }

    /// Discards every entry and adopts a new capacity.
    ///
    /// No prior entry survives. Callers holding a reference to the
    /// cache observe it freshly emptied, as if newly constructed with
    /// the given capacity.
    pub fn reset(&self, capacity: usize) {
        self.inner.lock().reset(capacity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::thread;
    use std::time::Duration;

    #[test]
    fn test_basic_operations() {
        let cache = LruCache::new(2);

        // Test empty cache
        assert!(cache.is_empty());
        assert_eq!(cache.len(), 0);

        cache.update("key1".to_string(), "one".to_string());
        cache.update("key2".to_string(), "two".to_string());

        assert!(!cache.is_empty());
        assert_eq!(cache.len(), 2);

        assert_eq!(cache.get(&"key1".to_string()), Some("one".to_string()));
        assert_eq!(cache.get(&"key2".to_string()), Some("two".to_string()));

        // Verify capacity limit
        cache.update("key3".to_string(), "three".to_string());
        assert!(cache.len() <= cache.capacity());
    }

    #[test]
    fn test_reset_changes_capacity() {
        let cache = LruCache::new(3);

        cache.update("key1".to_string(), 1);
        cache.update("key2".to_string(), 2);

        cache.reset(1);
        assert!(cache.is_empty());
        assert_eq!(cache.capacity(), 1);
        assert_eq!(cache.get(&"key1".to_string()), None);

        cache.update("key3".to_string(), 3);
        cache.update("key4".to_string(), 4);
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.get(&"key4".to_string()), Some(4));
    }

    #[test]
    fn test_concurrent_access() {
        let cache = Arc::new(LruCache::new(1000));
        let mut handles = vec![];

        // Create multiple threads for concurrent access
        for i in 0..10 {
            let cache = Arc::clone(&cache);
            let handle = thread::spawn(move || {
                for j in 0..100 {
                    let key = format!("key_{}_{}", i, j);
                    cache.update(key.clone(), format!("value_{}", j));
                    thread::sleep(Duration::from_micros(1));
                    if let Some(value) = cache.get(&key) {
                        assert_eq!(value, format!("value_{}", j));
                    }
                }
            });
            handles.push(handle);
        }

        // Wait for all threads to complete
        for handle in handles {
            handle.join().unwrap();
        }

        assert!(cache.len() <= cache.capacity());
    }

    #[test]
    fn test_concurrent_capacity_correctness() {
        let capacity = 100;
        let cache = Arc::new(LruCache::new(capacity));
        let threads_count = 8;
        let operations_per_thread = 1000;
        let total_ops_counter = Arc::new(AtomicUsize::new(0));
        let mut handles = vec![];

        // Create multiple threads for concurrent writes
        for i in 0..threads_count {
            let cache = Arc::clone(&cache);
            let ops_counter = Arc::clone(&total_ops_counter);
            let handle = thread::spawn(move || {
                for j in 0..operations_per_thread {
                    let key = format!("key_{}_{}", i, j);
                    cache.update(key, j);
                    ops_counter.fetch_add(1, Ordering::SeqCst);
                }
            });
            handles.push(handle);
        }

        // Wait for all threads to complete
        for handle in handles {
            handle.join().unwrap();
        }

        // Verify capacity limit
        assert!(
            cache.len() <= capacity,
            "Cache size {} exceeded capacity {}",
            cache.len(),
            capacity
        );

        // Verify total operations
        assert_eq!(
            total_ops_counter.load(Ordering::SeqCst),
            threads_count * operations_per_thread
        );
    }

    #[test]
    fn test_concurrent_fetch_computes_once() {
        let cache = Arc::new(LruCache::new(100));
        let compute_count = Arc::new(AtomicUsize::new(0));
        let mut handles = vec![];

        // Many threads race to fetch the same missing key; the lock
        // serializes them, so only the first one computes
        for _ in 0..8 {
            let cache = Arc::clone(&cache);
            let compute_count = Arc::clone(&compute_count);
            let handle = thread::spawn(move || {
                let value = cache.fetch("shared_key".to_string(), |_| {
                    compute_count.fetch_add(1, Ordering::SeqCst);
                    Some(42)
                });
                assert_eq!(value, Some(42));
            });
            handles.push(handle);
        }

        // Wait for all threads to complete
        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(compute_count.load(Ordering::SeqCst), 1);
        assert_eq!(cache.get(&"shared_key".to_string()), Some(42));
    }

    #[test]
    fn test_concurrent_reset_correctness() {
        let cache = Arc::new(LruCache::new(1000));
        let mut handles = vec![];

        // Pre-fill cache
        for i in 0..500 {
            cache.update(format!("init_key_{}", i), i);
        }

        // Create reset thread
        let cache_clone = Arc::clone(&cache);
        handles.push(thread::spawn(move || {
            thread::sleep(Duration::from_millis(50));
            cache_clone.reset(1000);
        }));

        // Create concurrent read/write threads
        for i in 0..4 {
            let cache = Arc::clone(&cache);
            let handle = thread::spawn(move || {
                for j in 0..100 {
                    let key = format!("key_{}_{}", i, j);
                    cache.update(key.clone(), j);
                    thread::sleep(Duration::from_micros(10));
                    let _ = cache.get(&key);
                }
            });
            handles.push(handle);
        }

        // Wait for all threads to complete
        for handle in handles {
            handle.join().unwrap();
        }

        // Verify final state
        assert!(cache.len() <= cache.capacity());
    }
}
