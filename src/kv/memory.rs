//! In-Process Store Module
//!
//! HashMap-backed store with lazy TTL expiration, mirroring Redis semantics
//! for plain values, counters and lists.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;

use crate::error::{Error, Result};
use crate::instrument::OperationRegistry;
use crate::kv::{resolve_range, KeyValueStore, Payload, StoreEntry};

// == Memory Store ==
/// Thread-safe in-process store.
///
/// Clones share the same underlying map, like clones of a connection handle.
#[derive(Debug, Clone)]
pub struct MemoryStore {
    entries: Arc<RwLock<HashMap<String, StoreEntry>>>,
    operations: OperationRegistry,
}

impl MemoryStore {
    // == Constructor ==
    /// Creates a new empty store.
    pub fn new() -> Self {
        Self {
            entries: Arc::new(RwLock::new(HashMap::new())),
            operations: OperationRegistry::new(),
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

/// Removes `key` if it has expired, so it reads as never written.
fn drop_if_expired(entries: &mut HashMap<String, StoreEntry>, key: &str) {
    if entries.get(key).is_some_and(StoreEntry::is_expired) {
        entries.remove(key);
    }
}

/// Returns the live entry for `key`, dropping it first if it has expired.
fn live_entry<'a>(
    entries: &'a mut HashMap<String, StoreEntry>,
    key: &str,
) -> Option<&'a mut StoreEntry> {
    drop_if_expired(entries, key);
    entries.get_mut(key)
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let mut entries = self.entries.write().await;
        match live_entry(&mut entries, key) {
            Some(StoreEntry {
                payload: Payload::Bytes(value),
                ..
            }) => Ok(Some(value.clone())),
            Some(_) => Err(Error::WrongType(key.to_string())),
            None => Ok(None),
        }
    }

    async fn set(&self, key: &str, value: &[u8]) -> Result<()> {
        let mut entries = self.entries.write().await;
        entries.insert(key.to_string(), StoreEntry::bytes(value.to_vec()));
        Ok(())
    }

    async fn incr(&self, key: &str) -> Result<i64> {
        let mut entries = self.entries.write().await;
        drop_if_expired(&mut entries, key);
        let entry = entries
            .entry(key.to_string())
            .or_insert_with(|| StoreEntry::bytes(b"0".to_vec()));

        let Payload::Bytes(raw) = &mut entry.payload else {
            return Err(Error::WrongType(key.to_string()));
        };
        let current: i64 = std::str::from_utf8(raw.as_slice())
            .ok()
            .and_then(|text| text.parse().ok())
            .ok_or_else(|| Error::NotInteger(key.to_string()))?;
        let next = current
            .checked_add(1)
            .ok_or_else(|| Error::NotInteger(key.to_string()))?;

        *raw = next.to_string().into_bytes();
        debug!("INCR {} -> {}", key, next);
        Ok(next)
    }

    async fn rpush(&self, key: &str, value: &[u8]) -> Result<usize> {
        let mut entries = self.entries.write().await;
        drop_if_expired(&mut entries, key);
        let entry = entries
            .entry(key.to_string())
            .or_insert_with(StoreEntry::list);

        match &mut entry.payload {
            Payload::List(items) => {
                items.push(value.to_vec());
                Ok(items.len())
            }
            Payload::Bytes(_) => Err(Error::WrongType(key.to_string())),
        }
    }

    async fn lrange(&self, key: &str, start: isize, stop: isize) -> Result<Vec<Vec<u8>>> {
        let mut entries = self.entries.write().await;
        match live_entry(&mut entries, key) {
            Some(StoreEntry {
                payload: Payload::List(items),
                ..
            }) => Ok(match resolve_range(items.len(), start, stop) {
                Some((from, to)) => items[from..=to].to_vec(),
                None => Vec::new(),
            }),
            Some(_) => Err(Error::WrongType(key.to_string())),
            None => Ok(Vec::new()),
        }
    }

    async fn expire(&self, key: &str, ttl: Duration) -> Result<bool> {
        let mut entries = self.entries.write().await;
        match live_entry(&mut entries, key) {
            Some(entry) => {
                entry.expire_in(ttl);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn flush(&self) -> Result<()> {
        let mut entries = self.entries.write().await;
        let dropped = entries.len();
        entries.clear();
        debug!("FLUSH dropped {} keys", dropped);
        Ok(())
    }

    async fn key_count(&self) -> Result<usize> {
        let entries = self.entries.read().await;
        Ok(entries.values().filter(|entry| !entry.is_expired()).count())
    }

    fn operations(&self) -> &OperationRegistry {
        &self.operations
    }
}
