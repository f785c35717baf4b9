//! Quote providers
//!
//! One bulk multi-language source and three single-quote alternatives, each
//! normalized to [`Quote`].

mod chain;
mod http;
mod rules;

pub use chain::{first_success, FallbackChain, Strategy};
pub use http::{HttpBulkSource, HttpClient, HttpQuoteSource};
pub use rules::{FieldRules, AUTHOR_FIELDS, TEXT_FIELDS};

use crate::config::ProvidersConfig;
use crate::error::Result;
use crate::quotes::types::{Metadata, Quote};

/// Alternative provider names in try order
pub const QUOTES_API: &str = "quotes-api";
pub const PROGRAMMING_QUOTES: &str = "programming-quotes";
pub const QUOTABLE: &str = "quotable";

/// Multi-language source serving whole datasets
pub trait BulkSource {
    /// Catalog of languages and their quote counts
    fn fetch_catalog_metadata(&self) -> Result<Metadata>;

    /// Every quote for a language, possibly none
    fn fetch_language_quotes(&self, language: &str) -> Result<Vec<Quote>>;
}

/// Source returning one quote per request
pub trait QuoteSource {
    /// Name used in logs and errors
    fn name(&self) -> &str;

    fn fetch_quote(&self) -> Result<Quote>;
}

/// Build the bulk source and the alternative chain from configuration
///
/// The alternatives are always tried in the order quotes-api,
/// programming-quotes, quotable.
pub fn from_config(config: &ProvidersConfig) -> Result<(HttpBulkSource, FallbackChain)> {
    let client = HttpClient::new(config.timeout())?;
    let bulk = HttpBulkSource::new(client.clone(), &config.bulk_url)?;

    let alternatives: Vec<Box<dyn QuoteSource>> = vec![
        Box::new(HttpQuoteSource::new(
            client.clone(),
            QUOTES_API,
            config.quotes_api_url.clone(),
            FieldRules::default(),
        )),
        Box::new(HttpQuoteSource::new(
            client.clone(),
            PROGRAMMING_QUOTES,
            config.programming_quotes_url.clone(),
            FieldRules::default().with_text_field("en"),
        )),
        Box::new(HttpQuoteSource::new(
            client,
            QUOTABLE,
            config.quotable_url.clone(),
            FieldRules::default(),
        )),
    ];

    Ok((bulk, FallbackChain::new(alternatives)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alternatives_are_in_fixed_order() {
        let (_, chain) = from_config(&ProvidersConfig::default()).unwrap();
        assert_eq!(chain.names(), vec![QUOTES_API, PROGRAMMING_QUOTES, QUOTABLE]);
    }

    #[test]
    fn test_invalid_bulk_url_is_rejected() {
        let config = ProvidersConfig {
            bulk_url: "::nope".to_string(),
            ..ProvidersConfig::default()
        };
        assert!(from_config(&config).is_err());
    }
}
