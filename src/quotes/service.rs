//! End-to-end quote retrieval
//!
//! [`QuoteService::quotes_for_language`] decides between cache and network,
//! walks the provider fallbacks and always produces something to display.

use tracing::{debug, info, warn};

use super::language::resolve_target;
use super::staleness::needs_refresh;
use super::types::{LanguageCacheEntry, Quote, ENGLISH};
use crate::cache::QuoteCache;
use crate::error::{QuoteError, Result};
use crate::providers::{first_success, BulkSource, FallbackChain, Strategy};
use crate::store::KeyValueStore;

/// Retrieval state carried between calls
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    last_language: Option<String>,
}

impl Session {
    pub fn new(last_language: Option<String>) -> Self {
        Self { last_language }
    }

    /// Language of the previous retrieval
    pub fn last_language(&self) -> Option<&str> {
        self.last_language.as_deref()
    }

    /// Record `language` as current, returning the one it replaces
    fn observe(&mut self, language: &str) -> Option<String> {
        self.last_language.replace(language.to_string())
    }

    /// Restore from the store-backed cache
    pub fn restore<S: KeyValueStore>(cache: &QuoteCache<S>) -> Self {
        Self::new(cache.active_language())
    }

    /// Persist for the next run
    pub fn persist<S: KeyValueStore>(&self, cache: &mut QuoteCache<S>) -> Result<()> {
        match self.last_language() {
            Some(language) => cache.set_active_language(language),
            None => Ok(()),
        }
    }
}

/// Retrieval orchestrator over a cache and providers
pub struct QuoteService<S> {
    cache: QuoteCache<S>,
    bulk: Box<dyn BulkSource>,
    alternatives: FallbackChain,
    online: bool,
}

impl<S: KeyValueStore> QuoteService<S> {
    pub fn new(cache: QuoteCache<S>, bulk: Box<dyn BulkSource>, alternatives: FallbackChain) -> Self {
        Self {
            cache,
            bulk,
            alternatives,
            online: true,
        }
    }

    /// Set the connectivity signal; offline never touches the network
    pub fn with_online(mut self, online: bool) -> Self {
        self.online = online;
        self
    }

    pub fn cache(&self) -> &QuoteCache<S> {
        &self.cache
    }

    pub fn cache_mut(&mut self) -> &mut QuoteCache<S> {
        &mut self.cache
    }

    /// Quotes to display for `language`
    ///
    /// Never fails: when every source is exhausted the result is the
    /// hardcoded fallback quote.
    pub fn quotes_for_language(
        &mut self,
        session: &mut Session,
        language: &str,
        force_refresh: bool,
    ) -> Vec<Quote> {
        let previous = session.observe(language);

        match self.retrieve(language, previous.as_deref(), force_refresh) {
            Ok(quotes) => quotes,
            Err(e) => {
                warn!(language, error = %e, "quote retrieval failed");
                self.recover(language)
            }
        }
    }

    fn retrieve(
        &mut self,
        language: &str,
        previous: Option<&str>,
        force_refresh: bool,
    ) -> Result<Vec<Quote>> {
        if previous != Some(language) {
            debug!(language, previous = ?previous, "language changed");
        }

        let entry = self.cache.get(language);
        let stale = needs_refresh(language, previous, entry.as_ref(), self.cache.now(), self.online);

        if force_refresh || stale {
            debug!(language, force_refresh, "fetching quotes");
            self.refresh(language)
        } else {
            Ok(self.from_cache(language, entry))
        }
    }

    fn refresh(&mut self, language: &str) -> Result<Vec<Quote>> {
        match self.refresh_from_bulk(language) {
            Ok(quotes) => Ok(quotes),
            Err(e) => {
                warn!(language, error = %e, "bulk provider failed, trying alternatives");
                let quotes = vec![self.fetch_alternative()?];
                self.best_effort("cache alternative quote", |c| c.put(language, &quotes, None));
                self.best_effort("purge other languages", |c| c.purge_except(language));
                Ok(quotes)
            }
        }
    }

    fn refresh_from_bulk(&mut self, language: &str) -> Result<Vec<Quote>> {
        self.ensure_online()?;
        let metadata = self.bulk.fetch_catalog_metadata()?;
        let target = resolve_target(language, &metadata);

        // Remembered even though the target's quotes are what gets shown
        if language != ENGLISH && metadata.count_for(language).unwrap_or(0) == 0 {
            self.best_effort("record missing language", |c| {
                c.put_no_data(language, Some(&metadata))
            });
        }

        let quotes = self.bulk.fetch_language_quotes(target)?;
        self.best_effort("cache quotes", |c| c.put(target, &quotes, Some(&metadata)));
        self.best_effort("purge other languages", |c| c.purge_except(language));

        info!(language, target, count = quotes.len(), "refreshed quotes");
        Ok(quotes)
    }

    fn from_cache(&mut self, language: &str, entry: Option<LanguageCacheEntry>) -> Vec<Quote> {
        match entry {
            Some(entry) if entry.is_no_data() && language != ENGLISH => {
                debug!(language, "no quotes for language, using English");
                self.english_quotes()
            }
            Some(entry) if !entry.quotes.is_empty() => entry.quotes,
            _ => {
                debug!(language, "cache entry empty, trying alternatives");
                self.cached_alternative(language)
                    .unwrap_or_else(|_| vec![Quote::fallback()])
            }
        }
    }

    /// English quotes from cache, bulk provider, then alternatives
    fn english_quotes(&mut self) -> Vec<Quote> {
        let strategies = [
            Strategy::new("cached English", |s: &mut Self| s.cached(ENGLISH)),
            Strategy::new("bulk English", |s: &mut Self| s.bulk_english()),
            Strategy::new("alternative English", |s: &mut Self| s.cached_alternative(ENGLISH)),
        ];

        first_success(self, strategies).unwrap_or_else(|_| vec![Quote::fallback()])
    }

    fn bulk_english(&mut self) -> Result<Vec<Quote>> {
        self.ensure_online()?;
        let metadata = self.bulk.fetch_catalog_metadata()?;
        let quotes = self.bulk.fetch_language_quotes(ENGLISH)?;
        self.best_effort("cache English quotes", |c| c.put(ENGLISH, &quotes, Some(&metadata)));
        Ok(quotes)
    }

    /// Last line of defense after an unexpected failure
    fn recover(&mut self, language: &str) -> Vec<Quote> {
        let strategies = [
            Strategy::new("cached language", |s: &mut Self| s.cached(language)),
            Strategy::new("cached English", |s: &mut Self| s.cached(ENGLISH)),
            Strategy::new("alternative", |s: &mut Self| s.fetch_alternative().map(|q| vec![q])),
        ];

        first_success(self, strategies).unwrap_or_else(|_| vec![Quote::fallback()])
    }

    fn cached(&mut self, language: &str) -> Result<Vec<Quote>> {
        self.cache
            .quotes(language)
            .ok_or_else(|| QuoteError::fetch("cache", format!("No cached quotes for '{language}'")))
    }

    /// One alternative quote, cached as a single-element list under `language`
    fn cached_alternative(&mut self, language: &str) -> Result<Vec<Quote>> {
        let quotes = vec![self.fetch_alternative()?];
        self.best_effort("cache alternative quote", |c| c.put(language, &quotes, None));
        Ok(quotes)
    }

    fn fetch_alternative(&self) -> Result<Quote> {
        self.ensure_online()?;
        self.alternatives.fetch_any_alternative()
    }

    fn ensure_online(&self) -> Result<()> {
        if self.online {
            Ok(())
        } else {
            Err(QuoteError::Offline)
        }
    }

    /// Cache writes never fail retrieval
    fn best_effort(&mut self, what: &str, write: impl FnOnce(&mut QuoteCache<S>) -> Result<()>) {
        if let Err(e) = write(&mut self.cache) {
            warn!(error = %e, "failed to {what}");
        }
    }
}
