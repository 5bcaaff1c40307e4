//! nosql_kit - Instrumented key-value façade and document-store helpers
//!
//! Provides a Redis-backed value store whose calls are counted and recorded,
//! a read-through page cache with expiration, and MongoDB query helpers.

pub mod cache;
pub mod config;
pub mod docs;
pub mod error;
pub mod instrument;
pub mod keys;
pub mod kv;
pub mod logging;
pub mod value;
pub mod web;

pub use cache::{replay, Cache, Replay};
pub use config::Config;
pub use error::{Error, Result};
pub use kv::{KeyValueStore, MemoryStore, RedisStore, SharedStore};
pub use value::Value;
pub use web::{HttpFetcher, PageCache};
