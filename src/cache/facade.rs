//! Cache Façade Module
//!
//! Value store over a shared key-value store whose `store` operation is
//! counted and history-recorded on every call.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::cache::{replay, Replay};
use crate::config::Config;
use crate::error::Result;
use crate::instrument::{CallHistory, CountCalls, Operation, OperationExt, OperationName};
use crate::kv::{RedisStore, SharedStore};
use crate::value::{decode_integer, decode_text, Value};

// == Raw Store Operation ==
/// Writes a value under a fresh random key and returns the key.
pub struct StoreValue {
    name: OperationName,
    store: SharedStore,
}

#[async_trait]
impl Operation for StoreValue {
    type Input = Value;
    type Output = String;

    fn name(&self) -> &str {
        self.name.as_str()
    }

    async fn invoke(&self, value: Value) -> Result<String> {
        let key = Uuid::new_v4().to_string();
        self.store.set(&key, &value.to_bytes()).await?;
        Ok(key)
    }
}

// == Cache ==
/// Instrumented key-value façade.
pub struct Cache {
    store: SharedStore,
    store_op: CallHistory<CountCalls<StoreValue>>,
}

impl Cache {
    /// Qualified name of the `store` operation.
    pub const STORE_OPERATION: &'static str = "Cache.store";

    // == Constructor ==
    /// Creates a façade over `store`.
    ///
    /// Reserves `Cache.store` on the store, then flushes the selected
    /// database: every key from previous sessions, including counters and
    /// histories, is dropped without confirmation. While this façade lives, a
    /// second one over the same store handle fails with `DuplicateName`
    /// before touching any data.
    pub async fn new(store: SharedStore) -> Result<Self> {
        let name = store.operations().register(Self::STORE_OPERATION)?;

        store.flush().await?;
        info!("Store flushed for a fresh session");

        let store_op = StoreValue {
            name,
            store: store.clone(),
        }
        .count_calls(store.clone())
        .call_history(store.clone());

        Ok(Self { store, store_op })
    }

    /// Connects to the Redis database from `config` and creates a façade over it.
    pub async fn connect(config: &Config) -> Result<Self> {
        let store = RedisStore::connect(&config.redis_url()).await?;
        Self::new(Arc::new(store)).await
    }

    // == Store ==
    /// Stores `value` under a new random key and returns the key.
    ///
    /// Each call also increments `Cache.store` and appends to
    /// `Cache.store:inputs` and `Cache.store:outputs`.
    pub async fn store(&self, value: impl Into<Value>) -> Result<String> {
        self.store_op.invoke(value.into()).await
    }

    // == Fetch ==
    /// Reads the raw bytes under `key`; `None` when nothing is stored.
    pub async fn fetch(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let value = self.store.get(key).await?;
        debug!("GET {} -> {}", key, if value.is_some() { "hit" } else { "absent" });
        Ok(value)
    }

    /// Reads `key` and applies `decode` to a present value.
    ///
    /// Absence is returned as `None` without reaching the decoder; decoder
    /// errors propagate.
    pub async fn fetch_with<T, F>(&self, key: &str, decode: F) -> Result<Option<T>>
    where
        F: FnOnce(Vec<u8>) -> Result<T>,
    {
        self.fetch(key).await?.map(decode).transpose()
    }

    /// Reads `key` as UTF-8 text.
    pub async fn fetch_as_text(&self, key: &str) -> Result<Option<String>> {
        self.fetch_with(key, decode_text).await
    }

    /// Reads `key` as a decimal integer.
    ///
    /// Absent or undecodable values read as `0`; store failures still propagate.
    pub async fn fetch_as_integer(&self, key: &str) -> Result<i64> {
        match self.fetch(key).await? {
            Some(raw) => Ok(decode_integer(raw).unwrap_or_else(|err| {
                warn!("Integer fallback for {}: {}", key, err);
                0
            })),
            None => Ok(0),
        }
    }

    // == Replay ==
    /// Reads back the recorded calls of the operation named `name`.
    pub async fn replay(&self, name: &str) -> Result<Replay> {
        replay(&*self.store, name).await
    }

    // == Accessors ==
    /// Shared handle to the underlying store. Further operations wrapped over
    /// it register their names through `operations()`, which already holds
    /// `Cache.store`.
    pub fn shared_store(&self) -> SharedStore {
        self.store.clone()
    }
}
