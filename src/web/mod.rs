//! Web Module
//!
//! Page fetching and the read-through page cache.

mod fetcher;
mod page_cache;

pub use fetcher::{HttpFetcher, PageFetcher};
pub use page_cache::{PageCache, DEFAULT_PAGE_TTL};
