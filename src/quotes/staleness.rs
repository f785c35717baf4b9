//! Cache freshness decisions

use chrono::{DateTime, Duration, Utc};

use super::types::LanguageCacheEntry;

/// Datasets smaller than this are rechecked daily
pub const SMALL_DATASET: u64 = 100;

/// Refresh interval for empty and small datasets
pub fn short_ttl() -> Duration {
    Duration::days(1)
}

/// Refresh interval for full datasets
pub fn long_ttl() -> Duration {
    Duration::days(7)
}

/// Maximum age an entry may reach before it is refetched
pub fn ttl_for(declared_count: u64) -> Duration {
    if declared_count < SMALL_DATASET {
        short_ttl()
    } else {
        long_ttl()
    }
}

/// Decide whether cached data for `language` should be refetched
///
/// * offline: never (stale but unreachable is not worth trying)
/// * `previous` differs from `language`: always
/// * no complete entry: always
/// * otherwise when the entry is older than [`ttl_for`] its declared count
///
/// An entry exactly at its TTL is still fresh.
pub fn needs_refresh(
    language: &str,
    previous: Option<&str>,
    entry: Option<&LanguageCacheEntry>,
    now: DateTime<Utc>,
    online: bool,
) -> bool {
    if !online {
        return false;
    }

    if previous != Some(language) {
        return true;
    }

    let Some(entry) = entry else {
        return true;
    };

    now - entry.fetched_at > ttl_for(entry.declared_count)
}
