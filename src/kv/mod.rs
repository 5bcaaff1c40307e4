//! Key-Value Store Module
//!
//! The seam between the façade and the external key-value store. The Redis
//! backend talks to a real server; the in-process backend mirrors its
//! observable semantics for tests and offline runs.

mod entry;
mod memory;
mod redis_store;

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use crate::error::Result;
use crate::instrument::OperationRegistry;

// Re-export public types
pub use entry::{Payload, StoreEntry};
pub use memory::MemoryStore;
pub use redis_store::RedisStore;

/// Shared handle to a store. The façade never owns the store exclusively.
pub type SharedStore = Arc<dyn KeyValueStore>;

// == Key-Value Store Trait ==
/// Atomic operations over string keys, with Redis semantics.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Reads a plain value. Missing or expired keys are `None`.
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>>;

    /// Writes a plain value, clearing any previous expiration.
    async fn set(&self, key: &str, value: &[u8]) -> Result<()>;

    /// Increments the decimal integer at `key` by one and returns the new value.
    async fn incr(&self, key: &str) -> Result<i64>;

    /// Appends to the list at `key` and returns the new length.
    async fn rpush(&self, key: &str, value: &[u8]) -> Result<usize>;

    /// Reads list elements `start..=stop`; negative indices count from the end.
    async fn lrange(&self, key: &str, start: isize, stop: isize) -> Result<Vec<Vec<u8>>>;

    /// Sets a time-to-live on an existing key. Returns false if the key is missing.
    async fn expire(&self, key: &str, ttl: Duration) -> Result<bool>;

    /// Removes every key of the selected database.
    async fn flush(&self) -> Result<()>;

    /// Number of live keys in the selected database.
    async fn key_count(&self) -> Result<usize>;

    /// Operation names reserved on this store. Clones of a store handle share
    /// one registry.
    fn operations(&self) -> &OperationRegistry;

    /// Writes a value that expires after `ttl`.
    async fn set_with_ttl(&self, key: &str, value: &[u8], ttl: Duration) -> Result<()> {
        self.set(key, value).await?;
        self.expire(key, ttl).await?;
        Ok(())
    }
}

// == Index Helpers ==
/// Resolves an inclusive `start..=stop` range over a list of `len` elements
/// the way LRANGE does. Returns None when the range selects nothing.
pub(crate) fn resolve_range(len: usize, start: isize, stop: isize) -> Option<(usize, usize)> {
    let len = len as isize;
    let start = if start < 0 { (start + len).max(0) } else { start };
    let stop = if stop < 0 { stop + len } else { stop.min(len - 1) };

    if len == 0 || start > stop || start >= len {
        None
    } else {
        Some((start as usize, stop as usize))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_full_range() {
        assert_eq!(resolve_range(3, 0, -1), Some((0, 2)));
    }

    #[test]
    fn test_resolve_negative_start() {
        assert_eq!(resolve_range(5, -2, -1), Some((3, 4)));
        assert_eq!(resolve_range(5, -10, 1), Some((0, 1)));
    }

    #[test]
    fn test_resolve_clamps_stop() {
        assert_eq!(resolve_range(3, 1, 100), Some((1, 2)));
    }

    #[test]
    fn test_resolve_empty_selections() {
        assert_eq!(resolve_range(0, 0, -1), None);
        assert_eq!(resolve_range(3, 2, 1), None);
        assert_eq!(resolve_range(3, 5, 10), None);
        assert_eq!(resolve_range(3, 0, -5), None);
    }
}
