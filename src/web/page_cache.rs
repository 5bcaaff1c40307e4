//! Read-Through Page Cache
//!
//! Serves `cached:<url>` while it lives; on a miss counts the access under
//! `count:<url>`, fetches the page and caches it for the TTL.
//!
//! Only misses are counted. The lookup, fetch and write are separate store
//! calls, so two concurrent misses for one URL both fetch and the last write
//! wins.

use std::time::Duration;

use tracing::{debug, info};

use crate::config::Config;
use crate::error::Result;
use crate::keys;
use crate::kv::SharedStore;
use crate::value::{decode_integer, decode_text};
use crate::web::PageFetcher;

/// Lifetime of a cached page unless configured otherwise.
pub const DEFAULT_PAGE_TTL: Duration = Duration::from_secs(10);

// == Page Cache ==
/// Read-through cache in front of a `PageFetcher`.
pub struct PageCache<F> {
    fetcher: F,
    store: SharedStore,
    ttl: Duration,
}

impl<F: PageFetcher> PageCache<F> {
    // == Constructors ==
    /// Creates a page cache with the default 10 second TTL.
    pub fn new(fetcher: F, store: SharedStore) -> Self {
        Self {
            fetcher,
            store,
            ttl: DEFAULT_PAGE_TTL,
        }
    }

    /// Creates a page cache with the TTL from `config`.
    pub fn from_config(fetcher: F, store: SharedStore, config: &Config) -> Self {
        Self::new(fetcher, store).with_ttl(Duration::from_secs(config.page_cache_ttl))
    }

    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    // == Get Page ==
    /// Returns the content of `url`, from cache when present.
    ///
    /// Fetch failures propagate unchanged and leave nothing cached.
    pub async fn get_page(&self, url: &str) -> Result<String> {
        let cached_key = keys::cached_key(url);
        if let Some(raw) = self.store.get(&cached_key).await? {
            debug!("Page cache hit for {}", url);
            return decode_text(raw);
        }

        let misses = self.store.incr(&keys::count_key(url)).await?;
        info!("Page cache miss #{} for {}", misses, url);

        let page = self.fetcher.fetch(url).await?;
        self.store
            .set_with_ttl(&cached_key, page.as_bytes(), self.ttl)
            .await?;
        Ok(page)
    }

    // == Access Count ==
    /// Number of misses recorded for `url`; 0 when never fetched.
    pub async fn access_count(&self, url: &str) -> Result<i64> {
        Ok(self
            .store
            .get(&keys::count_key(url))
            .await?
            .and_then(|raw| decode_integer(raw).ok())
            .unwrap_or(0))
    }
}
