//! Per-language quote caching

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::cache::{CacheEntryStatus, CacheStatus};
use crate::error::Result;
use crate::quotes::types::{LanguageCacheEntry, Metadata, Quote, ENGLISH};
use crate::store::KeyValueStore;

/// Shared catalog timestamp, not scoped to a language
pub const METADATA_TIMESTAMP_KEY: &str = "quotes_metadata_timestamp";

/// JSON array of language codes that currently have entries
pub const MANIFEST_KEY: &str = "quotes_languages";

/// Last language a retrieval ran for
pub const ACTIVE_LANGUAGE_KEY: &str = "quotes_active_language";

fn quotes_key(language: &str) -> String {
    format!("quotes_{language}")
}

fn timestamp_key(language: &str) -> String {
    format!("quotes_{language}_timestamp")
}

fn count_key(language: &str) -> String {
    format!("quotes_{language}_count")
}

/// Quote cache over a key-value store
pub struct QuoteCache<S> {
    store: S,
    now: fn() -> DateTime<Utc>,
}

impl<S: KeyValueStore> QuoteCache<S> {
    /// Create a cache stamping entries with the wall clock
    pub fn new(store: S) -> Self {
        Self {
            store,
            now: Utc::now,
        }
    }

    /// Create with a custom clock
    pub fn with_clock(store: S, now: fn() -> DateTime<Utc>) -> Self {
        Self { store, now }
    }

    /// Current time according to this cache's clock
    pub fn now(&self) -> DateTime<Utc> {
        (self.now)()
    }

    /// Underlying store
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Store quotes for a language, stamped with the current time
    ///
    /// With metadata, the declared count comes from the catalog (falling back
    /// to the number of quotes when the catalog has no entry for the language)
    /// and the catalog timestamp is recorded.
    pub fn put(
        &mut self,
        language: &str,
        quotes: &[Quote],
        metadata: Option<&Metadata>,
    ) -> Result<()> {
        let declared = metadata
            .and_then(|m| m.count_for(language))
            .unwrap_or(quotes.len() as u64);

        self.write_entry(language, quotes, declared, metadata)
    }

    /// Record that the provider has no quotes for a language
    pub fn put_no_data(&mut self, language: &str, metadata: Option<&Metadata>) -> Result<()> {
        self.write_entry(language, &[], 0, metadata)
    }

    fn write_entry(
        &mut self,
        language: &str,
        quotes: &[Quote],
        declared: u64,
        metadata: Option<&Metadata>,
    ) -> Result<()> {
        let json = serde_json::to_string(quotes)?;
        let stamp = self.now().timestamp_millis().to_string();

        self.store.set(&quotes_key(language), &json)?;
        self.store.set(&timestamp_key(language), &stamp)?;
        self.store.set(&count_key(language), &declared.to_string())?;

        if let Some(metadata) = metadata {
            self.store
                .set(METADATA_TIMESTAMP_KEY, &metadata.last_updated)?;
        }

        self.track(language)?;
        debug!(language, quotes = quotes.len(), declared, "cached quotes");
        Ok(())
    }

    /// Read the entry for a language
    ///
    /// Returns `None` unless all three keys are present and parse.
    pub fn get(&self, language: &str) -> Option<LanguageCacheEntry> {
        let quotes: Vec<Quote> = serde_json::from_str(&self.store.get(&quotes_key(language))?).ok()?;
        let millis: i64 = self.store.get(&timestamp_key(language))?.parse().ok()?;
        let fetched_at = DateTime::from_timestamp_millis(millis)?;
        let declared_count: u64 = self.store.get(&count_key(language))?.parse().ok()?;

        Some(LanguageCacheEntry {
            language: language.to_string(),
            quotes,
            fetched_at,
            declared_count,
        })
    }

    /// Cached quotes for a language, only when there is at least one
    pub fn quotes(&self, language: &str) -> Option<Vec<Quote>> {
        self.get(language)
            .map(|entry| entry.quotes)
            .filter(|quotes| !quotes.is_empty())
    }

    /// Delete every language entry except `keep` and English
    ///
    /// The catalog timestamp is kept.
    pub fn purge_except(&mut self, keep: &str) -> Result<()> {
        let tracked = self.tracked_languages();
        let mut remaining = Vec::new();

        for language in tracked {
            if language == keep || language == ENGLISH {
                remaining.push(language);
            } else {
                debug!(language = %language, keep, "purging language entry");
                self.remove_entry(&language)?;
            }
        }

        self.write_manifest(&remaining)
    }

    /// Delete every quote-related key
    pub fn purge_all(&mut self) -> Result<()> {
        for language in self.tracked_languages() {
            self.remove_entry(&language)?;
        }

        self.store.remove(METADATA_TIMESTAMP_KEY)?;
        self.store.remove(ACTIVE_LANGUAGE_KEY)?;
        self.store.remove(MANIFEST_KEY)?;
        debug!("purged quote cache");
        Ok(())
    }

    /// Languages with entries, in insertion order
    pub fn tracked_languages(&self) -> Vec<String> {
        self.store
            .get(MANIFEST_KEY)
            .and_then(|json| serde_json::from_str(&json).ok())
            .unwrap_or_default()
    }

    /// Catalog timestamp from the last bulk refresh
    pub fn metadata_timestamp(&self) -> Option<String> {
        self.store.get(METADATA_TIMESTAMP_KEY)
    }

    /// Language the previous retrieval ran for
    pub fn active_language(&self) -> Option<String> {
        self.store.get(ACTIVE_LANGUAGE_KEY)
    }

    /// Remember the language of the current retrieval
    pub fn set_active_language(&mut self, language: &str) -> Result<()> {
        self.store.set(ACTIVE_LANGUAGE_KEY, language)
    }

    /// Get cache status
    pub fn status(&self) -> CacheStatus {
        let now = self.now();
        let languages = self
            .tracked_languages()
            .into_iter()
            .map(|language| match self.get(&language) {
                Some(entry) => CacheEntryStatus {
                    exists: true,
                    age_secs: Some((now - entry.fetched_at).num_seconds().max(0) as u64),
                    count: Some(entry.quotes.len()),
                    declared_count: Some(entry.declared_count),
                    language,
                },
                None => CacheEntryStatus {
                    exists: false,
                    age_secs: None,
                    count: None,
                    declared_count: None,
                    language,
                },
            })
            .collect();

        CacheStatus {
            active_language: self.active_language(),
            metadata_timestamp: self.metadata_timestamp(),
            languages,
        }
    }

    fn remove_entry(&mut self, language: &str) -> Result<()> {
        self.store.remove(&quotes_key(language))?;
        self.store.remove(&timestamp_key(language))?;
        self.store.remove(&count_key(language))
    }

    fn track(&mut self, language: &str) -> Result<()> {
        let mut tracked = self.tracked_languages();
        if !tracked.iter().any(|l| l == language) {
            tracked.push(language.to_string());
            self.write_manifest(&tracked)?;
        }
        Ok(())
    }

    fn write_manifest(&mut self, languages: &[String]) -> Result<()> {
        if languages.is_empty() {
            return self.store.remove(MANIFEST_KEY);
        }
        let json = serde_json::to_string(languages)?;
        self.store.set(MANIFEST_KEY, &json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quotes::types::FileInfo;
    use crate::store::{FileStore, MemoryStore};
    use chrono::TimeZone;
    use tempfile::TempDir;

    fn fixed_now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()
    }

    fn make_cache() -> QuoteCache<MemoryStore> {
        QuoteCache::with_clock(MemoryStore::new(), fixed_now)
    }

    fn make_quotes(n: usize) -> Vec<Quote> {
        (0..n)
            .map(|i| Quote::new(format!("Quote {i}"), format!("Author {i}")))
            .collect()
    }

    fn make_metadata(entries: &[(&str, u64)]) -> Metadata {
        Metadata {
            last_updated: "2024-05-30".to_string(),
            files: entries
                .iter()
                .map(|(lang, count)| (format!("{lang}.json"), FileInfo { count: *count }))
                .collect(),
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Put/Get Tests
    // ─────────────────────────────────────────────────────────────────────────

    #[test]
    fn test_get_returns_none_when_empty() {
        let cache = make_cache();
        assert!(cache.get("en").is_none());
    }

    #[test]
    fn test_put_and_get_roundtrip_with_metadata() {
        let mut cache = make_cache();
        let quotes = make_quotes(3);
        let metadata = make_metadata(&[("de", 250)]);

        cache.put("de", &quotes, Some(&metadata)).unwrap();
        let entry = cache.get("de").unwrap();

        assert_eq!(entry.language, "de");
        assert_eq!(entry.quotes, quotes);
        assert_eq!(entry.declared_count, 250);
        assert_eq!(entry.fetched_at, fixed_now());
        assert_eq!(cache.metadata_timestamp().as_deref(), Some("2024-05-30"));
    }

    #[test]
    fn test_put_without_catalog_count_uses_quote_count() {
        let mut cache = make_cache();
        let metadata = make_metadata(&[("en", 1000)]);

        cache.put("it", &make_quotes(2), Some(&metadata)).unwrap();
        assert_eq!(cache.get("it").unwrap().declared_count, 2);

        cache.put("pt", &make_quotes(1), None).unwrap();
        assert_eq!(cache.get("pt").unwrap().declared_count, 1);
        assert_eq!(cache.store().get("quotes_pt_count").as_deref(), Some("1"));
    }

    #[test]
    fn test_put_no_data_records_zero_count() {
        let mut cache = make_cache();
        cache.put_no_data("sw", None).unwrap();

        let entry = cache.get("sw").unwrap();
        assert!(entry.is_no_data());
        assert!(entry.quotes.is_empty());
        assert!(cache.quotes("sw").is_none());
    }

    #[test]
    fn test_get_requires_all_three_keys() {
        let mut cache = make_cache();
        cache.put("fr", &make_quotes(1), None).unwrap();

        let mut store = cache.store().clone();
        store.remove("quotes_fr_count").unwrap();
        let partial = QuoteCache::with_clock(store, fixed_now);

        assert!(partial.get("fr").is_none());
    }

    #[test]
    fn test_put_overwrites_existing_entry() {
        let mut cache = make_cache();
        cache.put("en", &make_quotes(1), None).unwrap();
        cache.put("en", &make_quotes(4), None).unwrap();

        assert_eq!(cache.get("en").unwrap().quotes.len(), 4);
        assert_eq!(cache.tracked_languages(), vec!["en".to_string()]);
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Purge Tests
    // ─────────────────────────────────────────────────────────────────────────

    #[test]
    fn test_purge_except_keeps_active_and_english() {
        let mut cache = make_cache();
        let metadata = make_metadata(&[]);
        cache.put("en", &make_quotes(1), Some(&metadata)).unwrap();
        cache.put("fr", &make_quotes(1), None).unwrap();
        cache.put("de", &make_quotes(1), None).unwrap();

        cache.purge_except("de").unwrap();

        assert!(cache.get("en").is_some());
        assert!(cache.get("de").is_some());
        assert!(cache.get("fr").is_none());
        assert!(cache.store().get("quotes_fr_timestamp").is_none());
        assert_eq!(cache.tracked_languages(), vec!["en".to_string(), "de".to_string()]);
        assert!(cache.metadata_timestamp().is_some());
    }

    #[test]
    fn test_purge_all_removes_every_quote_key() {
        let mut cache = make_cache();
        let metadata = make_metadata(&[("en", 500)]);
        cache.put("en", &make_quotes(2), Some(&metadata)).unwrap();
        cache.put_no_data("fr", None).unwrap();
        cache.set_active_language("fr").unwrap();

        let mut cache = QuoteCache::with_clock(
            {
                let mut store = cache.store().clone();
                store.set("showShortcutSwitch", "true").unwrap();
                store
            },
            fixed_now,
        );
        cache.purge_all().unwrap();

        assert_eq!(cache.store().keys(), vec!["showShortcutSwitch".to_string()]);
        assert!(cache.active_language().is_none());
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Status Tests
    // ─────────────────────────────────────────────────────────────────────────

    #[test]
    fn test_status_reports_tracked_languages() {
        let mut cache = make_cache();
        cache.put("en", &make_quotes(3), None).unwrap();
        cache.put_no_data("fr", None).unwrap();
        cache.set_active_language("fr").unwrap();

        let status = cache.status();
        assert_eq!(status.active_language.as_deref(), Some("fr"));
        assert_eq!(status.languages.len(), 2);
        assert_eq!(status.languages[0].count, Some(3));
        assert_eq!(status.languages[0].age_secs, Some(0));
        assert_eq!(status.languages[1].declared_count, Some(0));
    }

    #[test]
    fn test_file_backed_cache_survives_reopen() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("store.json");

        let mut cache = QuoteCache::with_clock(FileStore::open(&path), fixed_now);
        cache.put("es", &make_quotes(2), None).unwrap();

        let reopened = QuoteCache::with_clock(FileStore::open(&path), fixed_now);
        assert_eq!(reopened.get("es").unwrap().quotes.len(), 2);
    }

    #[test]
    fn test_write_finishing_after_purge_all_does_not_restore_entries() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("store.json");

        let mut seeded = QuoteCache::with_clock(FileStore::open(&path), fixed_now);
        seeded.put("en", &make_quotes(2), None).unwrap();
        seeded.put("de", &make_quotes(2), None).unwrap();

        // A retrieval holding its own handle completes after quotes were disabled
        let mut in_flight = QuoteCache::with_clock(FileStore::open(&path), fixed_now);
        QuoteCache::new(FileStore::open(&path)).purge_all().unwrap();
        in_flight.put("fr", &make_quotes(1), None).unwrap();
        in_flight.set_active_language("fr").unwrap();

        let after = QuoteCache::with_clock(FileStore::open(&path), fixed_now);
        assert!(after.get("en").is_none());
        assert!(after.get("de").is_none());
        assert_eq!(after.tracked_languages(), vec!["fr".to_string()]);
        assert_eq!(after.active_language().as_deref(), Some("fr"));
    }
}
