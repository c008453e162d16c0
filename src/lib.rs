//! A fixed-capacity LRU (Least Recently Used) cache with an atomic
//! get-or-populate operation.
//!
//! This crate provides two cache flavors:
//!
//! 1. [`RawLruCache`] - The unsynchronized cache engine, for single-threaded use
//! 2. [`LruCache`] - A thread-safe wrapper serializing all operations behind one mutex
//!
//! # Features
//!
//! - O(1) lookup, insertion, promotion, and eviction
//! - Atomic get-or-populate via [`LruCache::fetch`]: at most one
//!   computation per key race
//! - In-place [`LruCache::reset`] to clear the cache and change capacity
//! - Generic key and value types
//! - Zero-capacity caches degrade to an always-empty store instead of
//!   being rejected
//! - No unsafe code
//!
//! # Examples
//!
//! ```rust
//! use lru_fetch::LruCache;
//!
//! let cache: LruCache<String, String> = LruCache::new(1000);
//! cache.update("key".to_string(), "value".to_string());
//! assert_eq!(cache.get(&"key".to_string()), Some("value".to_string()));
//!
//! // You can use any Eq + Hash + Clone type as key
//! let cache: LruCache<u64, String> = LruCache::new(1000);
//! cache.update(42, "answer".to_string());
//! assert_eq!(cache.get(&42), Some("answer".to_string()));
//!
//! // Populate on miss, atomically
//! let value = cache.fetch(7, |key| Some(format!("computed_{}", key)));
//! assert_eq!(value, Some("computed_7".to_string()));
//! ```

pub mod lru_cache;
pub mod raw_lru_cache;

pub use lru_cache::LruCache;
pub use raw_lru_cache::RawLruCache;
