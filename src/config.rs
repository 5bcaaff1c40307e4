//! Configuration Module
//!
//! Handles loading store endpoints and cache settings from environment variables.

use std::env;
use std::str::FromStr;

/// Runtime configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Redis host name
    pub redis_host: String,
    /// Redis port
    pub redis_port: u16,
    /// Redis logical database index
    pub redis_db: i64,
    /// MongoDB connection string
    pub mongo_uri: String,
    /// Database holding the nginx logs
    pub log_db: String,
    /// Collection holding the nginx logs
    pub log_collection: String,
    /// Expiration in seconds of cached pages
    pub page_cache_ttl: u64,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `REDIS_HOST` - Redis host (default: localhost)
    /// - `REDIS_PORT` - Redis port (default: 6379)
    /// - `REDIS_DB` - Redis database index (default: 0)
    /// - `MONGO_URI` - MongoDB URI (default: mongodb://localhost:27017)
    /// - `LOG_DB` - Log database name (default: logs)
    /// - `LOG_COLLECTION` - Log collection name (default: nginx)
    /// - `PAGE_CACHE_TTL` - Cached page lifetime in seconds (default: 10)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            redis_host: env::var("REDIS_HOST").unwrap_or(defaults.redis_host),
            redis_port: parse_var("REDIS_PORT").unwrap_or(defaults.redis_port),
            redis_db: parse_var("REDIS_DB").unwrap_or(defaults.redis_db),
            mongo_uri: env::var("MONGO_URI").unwrap_or(defaults.mongo_uri),
            log_db: env::var("LOG_DB").unwrap_or(defaults.log_db),
            log_collection: env::var("LOG_COLLECTION").unwrap_or(defaults.log_collection),
            page_cache_ttl: parse_var("PAGE_CACHE_TTL").unwrap_or(defaults.page_cache_ttl),
        }
    }

    /// Connection URL for the configured Redis database.
    pub fn redis_url(&self) -> String {
        format!(
            "redis://{}:{}/{}",
            self.redis_host, self.redis_port, self.redis_db
        )
    }
}

fn parse_var<T: FromStr>(name: &str) -> Option<T> {
    env::var(name).ok().and_then(|v| v.parse().ok())
}

impl Default for Config {
    fn default() -> Self {
        Self {
            redis_host: "localhost".to_string(),
            redis_port: 6379,
            redis_db: 0,
            mongo_uri: "mongodb://localhost:27017".to_string(),
            log_db: "logs".to_string(),
            log_collection: "nginx".to_string(),
            page_cache_ttl: 10,
        }
    }
}
