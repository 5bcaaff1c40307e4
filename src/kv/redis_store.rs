//! Redis store implementation.
//!
//! Every trait call is a single command round-trip over a shared
//! `ConnectionManager`, so INCR and RPUSH keep Redis' own atomicity.

use std::time::Duration;

use async_trait::async_trait;
use redis::AsyncCommands;
use tracing::{debug, info};

use crate::error::Result;
use crate::instrument::OperationRegistry;
use crate::kv::KeyValueStore;

/// Redis store backend using a connection manager for reconnects.
///
/// Operation names are reserved per connected handle and its clones; a
/// second `connect` to the same database gets its own registry.
#[derive(Clone)]
pub struct RedisStore {
    conn: redis::aio::ConnectionManager,
    operations: OperationRegistry,
}

impl RedisStore {
    /// Opens a connection to the database selected by `url`.
    ///
    /// # Arguments
    ///
    /// * `url` - Redis connection URL (e.g., "redis://localhost:6379/0")
    ///
    /// # Errors
    ///
    /// Returns `Error::Connection` if the server cannot be reached.
    pub async fn connect(url: &str) -> Result<Self> {
        let client = redis::Client::open(url)?;
        let conn = redis::aio::ConnectionManager::new(client).await?;
        info!("Connected to Redis at {}", url);
        Ok(Self {
            conn,
            operations: OperationRegistry::new(),
        })
    }
}

/// Whole seconds for EXPIRE, rounding sub-second TTLs up to one second.
fn ttl_seconds(ttl: Duration) -> u64 {
    ttl.as_secs().max(1)
}

#[async_trait]
impl KeyValueStore for RedisStore {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let mut conn = self.conn.clone();
        let value: Option<Vec<u8>> = conn.get(key).await?;
        Ok(value)
    }

    async fn set(&self, key: &str, value: &[u8]) -> Result<()> {
        let mut conn = self.conn.clone();
        conn.set::<_, _, ()>(key, value).await?;
        Ok(())
    }

    async fn incr(&self, key: &str) -> Result<i64> {
        let mut conn = self.conn.clone();
        let next: i64 = conn.incr(key, 1_i64).await?;
        debug!("INCR {} -> {}", key, next);
        Ok(next)
    }

    async fn rpush(&self, key: &str, value: &[u8]) -> Result<usize> {
        let mut conn = self.conn.clone();
        let len: usize = conn.rpush(key, value).await?;
        Ok(len)
    }

    async fn lrange(&self, key: &str, start: isize, stop: isize) -> Result<Vec<Vec<u8>>> {
        let mut conn = self.conn.clone();
        let items: Vec<Vec<u8>> = conn.lrange(key, start, stop).await?;
        Ok(items)
    }

    async fn expire(&self, key: &str, ttl: Duration) -> Result<bool> {
        let mut conn = self.conn.clone();
        let seconds = i64::try_from(ttl_seconds(ttl)).unwrap_or(i64::MAX);
        let existed: bool = conn.expire(key, seconds).await?;
        Ok(existed)
    }

    async fn flush(&self) -> Result<()> {
        let mut conn = self.conn.clone();
        let _: () = redis::cmd("FLUSHDB").query_async(&mut conn).await?;
        debug!("FLUSHDB");
        Ok(())
    }

    async fn key_count(&self) -> Result<usize> {
        let mut conn = self.conn.clone();
        let count: usize = redis::cmd("DBSIZE").query_async(&mut conn).await?;
        Ok(count)
    }

    async fn set_with_ttl(&self, key: &str, value: &[u8], ttl: Duration) -> Result<()> {
        let mut conn = self.conn.clone();
        conn.set_ex::<_, _, ()>(key, value, ttl_seconds(ttl)).await?;
        Ok(())
    }

    fn operations(&self) -> &OperationRegistry {
        &self.operations
    }
}
