use std::collections::HashMap;
use std::hash::Hash;

// Null link for the arena-backed list
const NIL: usize = usize::MAX;

// Internal node structure for the recency list. Links are indices into
// the arena rather than pointers, so detach/prepend stay O(1) without
// any unsafe code.
struct Node<K, V> {
    key: K,
    value: V,
    prev: usize,
    next: usize,
}

impl<K, V> Node<K, V> {
    fn new(key: K, value: V) -> Self {
        Self {
            key,
            value,
            prev: NIL,
            next: NIL,
        }
    }
}

/// An unsynchronized LRU cache engine.
///
/// This implementation uses a combination of a `HashMap` for O(1) key
/// lookups and an arena-backed doubly linked list for maintaining LRU
/// order. The list threads `prev`/`next` indices through a `Vec` of
/// nodes; evicted slots are recycled through a free list.
///
/// All operations take `&mut self` and make no thread-safety promises.
/// For concurrent use, see [`LruCache`](crate::LruCache), which wraps
/// this engine in a mutex.
///
/// A capacity of zero is accepted and yields an always-empty cache:
/// every insertion is evicted immediately.
///
/// # Type Parameters
///
/// * `K` - The type of keys used in the cache. Must implement `Eq + Hash + Clone`
/// * `V` - The type of values stored in the cache. Must implement `Clone`
///
/// # Examples
///
/// ```rust
/// use lru_fetch::RawLruCache;
///
/// let mut cache = RawLruCache::new(2);
/// cache.update("key1".to_string(), "value1".to_string());
/// assert_eq!(cache.get(&"key1".to_string()), Some("value1".to_string()));
/// ```
pub struct RawLruCache<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    cap: usize,
    nodes: Vec<Node<K, V>>,
    free: Vec<usize>,
    map: HashMap<K, usize>,
    head: usize,
    tail: usize,
}

impl<K, V> RawLruCache<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    /// Creates a new cache bounded to `capacity` entries.
    ///
    /// A capacity of zero is not an error; it produces a cache that
    /// retains nothing.
    pub fn new(capacity: usize) -> Self {
        Self {
            cap: capacity,
            nodes: Vec::with_capacity(capacity),
            free: Vec::new(),
            map: HashMap::with_capacity(capacity),
            head: NIL,
            tail: NIL,
        }
    }

    /// Returns the configured maximum number of entries.
    pub fn capacity(&self) -> usize {
        self.cap
    }

    /// Returns the number of entries in the cache.
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Returns true if the cache is empty.
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Retrieves a value from the cache by its key.
    ///
    /// A hit is itself a recency event: the entry is promoted to
    /// most-recently-used before its value is cloned and returned.
    /// A miss leaves the cache untouched.
    ///
    /// # Returns
    ///
    /// * `Some(V)` if the key exists
    /// * `None` if the key doesn't exist
    pub fn get(&mut self, key: &K) -> Option<V> {
        let idx = *self.map.get(key)?;
        self.detach(idx);
        self.prepend(idx);
        Some(self.nodes[idx].value.clone())
    }

    /// Inserts a key-value pair, overwriting any previous value.
    ///
    /// If the key already exists, its value is replaced and the entry is
    /// promoted to most-recently-used; the length is unchanged. If the
    /// key is new, the entry is inserted at the most-recently-used
    /// position and the least-recently-used entry is evicted if the
    /// cache has grown past its capacity.
    pub fn update(&mut self, key: K, value: V) {
        if let Some(&idx) = self.map.get(&key) {
            self.nodes[idx].value = value;
            self.detach(idx);
            self.prepend(idx);
        } else {
            let idx = self.alloc(key.clone(), value);
            self.prepend(idx);
            self.map.insert(key, idx);
            self.trim();
        }
    }

    /// Looks up `key`, populating the cache on a miss.
    ///
    /// On a hit the cached value is returned and `compute` is never
    /// invoked. On a miss, `compute` is called with the key: if it
    /// produces a value, the value is stored via [`update`](Self::update)
    /// and returned; if it produces `None`, the cache is left unchanged
    /// and `None` is returned.
    pub fn fetch<F>(&mut self, key: K, compute: F) -> Option<V>
    where
        F: FnOnce(&K) -> Option<V>,
    {
        if let Some(value) = self.get(&key) {
            return Some(value);
        }

        let value = compute(&key)?;
        self.update(key, value.clone());
        Some(value)
    }

    /// Discards every entry and adopts a new capacity.
    ///
    /// No prior entry survives, even if `capacity` would have
    /// accommodated it. Equivalent to constructing a fresh cache of the
    /// given capacity, performed in place.
    pub fn reset(&mut self, capacity: usize) {
        self.nodes.clear();
        self.free.clear();
        self.map.clear();
        self.head = NIL;
        self.tail = NIL;
        self.cap = capacity;
    }

    // Place a new node into the arena, reusing a recycled slot when one
    // is available.
    fn alloc(&mut self, key: K, value: V) -> usize {
        match self.free.pop() {
            Some(idx) => {
                self.nodes[idx] = Node::new(key, value);
                idx
            }
            None => {
                self.nodes.push(Node::new(key, value));
                self.nodes.len() - 1
            }
        }
    }

    // Evict from the tail until the length is back within capacity.
    // One insertion precedes each call, so at most one entry goes per
    // invocation in practice; the loop form also absorbs a shrink.
    fn trim(&mut self) {
        while self.map.len() > self.cap {
            let tail = self.tail;
            self.detach(tail);
            self.map.remove(&self.nodes[tail].key);
            self.free.push(tail);
        }
    }

    // Unlink a node from the recency list, patching its neighbors and
    // the head/tail indices. Detaching the only entry leaves both head
    // and tail at NIL.
    fn detach(&mut self, idx: usize) {
        let prev = self.nodes[idx].prev;
        let next = self.nodes[idx].next;

        if prev != NIL {
            self.nodes[prev].next = next;
        } else {
            self.head = next;
        }

        if next != NIL {
            self.nodes[next].prev = prev;
        } else {
            self.tail = prev;
        }

        self.nodes[idx].prev = NIL;
        self.nodes[idx].next = NIL;
    }

    // Link a detached node in as the new head. If the list was empty the
    // node becomes both head and tail.
    fn prepend(&mut self, idx: usize) {
        self.nodes[idx].prev = NIL;
        self.nodes[idx].next = self.head;

        if self.head != NIL {
            self.nodes[self.head].prev = idx;
        } else {
            self.tail = idx;
        }
        self.head = idx;
    }
}
