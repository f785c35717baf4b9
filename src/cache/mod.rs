//! Cache module for reducing provider calls
//!
//! Quotes, fetch timestamps and declared counts are kept per language in a
//! [`KeyValueStore`](crate::store::KeyValueStore), alongside a manifest of the
//! languages currently tracked.

mod quotes;

pub use quotes::{QuoteCache, ACTIVE_LANGUAGE_KEY, MANIFEST_KEY, METADATA_TIMESTAMP_KEY};

/// Overall cache status
#[derive(Debug)]
pub struct CacheStatus {
    /// Language the last retrieval ran for
    pub active_language: Option<String>,
    /// Catalog timestamp from the last bulk refresh
    pub metadata_timestamp: Option<String>,
    /// One entry per tracked language
    pub languages: Vec<CacheEntryStatus>,
}

/// Status of a single language entry
#[derive(Debug)]
pub struct CacheEntryStatus {
    pub language: String,
    pub exists: bool,
    pub age_secs: Option<u64>,
    pub count: Option<usize>,
    pub declared_count: Option<u64>,
}
