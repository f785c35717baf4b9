use std::time::Duration;

use reqwest::blocking::Client;
use serde_json::Value;
use url::Url;

use super::rules::FieldRules;
use super::{BulkSource, QuoteSource};
use crate::error::{QuoteError, Result};
use crate::quotes::types::{Metadata, Quote};

const USER_AGENT: &str = concat!("tabquote/", env!("CARGO_PKG_VERSION"));

/// Shared blocking HTTP client for all providers
#[derive(Clone)]
pub struct HttpClient {
    client: Client,
}

impl HttpClient {
    /// Create a client with the given request timeout
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()?;

        Ok(Self { client })
    }

    /// GET a URL and parse the body as JSON, attributing failures to `provider`
    fn get_json(&self, provider: &str, url: &str) -> Result<Value> {
        let response = self
            .client
            .get(url)
            .send()
            .map_err(|e| QuoteError::Http(e).for_provider(provider))?;

        let status = response.status();
        if !status.is_success() {
            return Err(QuoteError::fetch(
                provider,
                format!("HTTP {} from {url}", status.as_u16()),
            ));
        }

        let body = response
            .text()
            .map_err(|e| QuoteError::Http(e).for_provider(provider))?;
        serde_json::from_str(&body).map_err(|e| QuoteError::Json(e).for_provider(provider))
    }
}

/// Multi-language bulk provider
///
/// Serves `metadata.json` and one `<lang>.json` array per language under a
/// common base URL.
pub struct HttpBulkSource {
    client: HttpClient,
    base: Url,
    rules: FieldRules,
}

impl HttpBulkSource {
    pub const NAME: &'static str = "bulk";

    pub fn new(client: HttpClient, base_url: &str) -> Result<Self> {
        // Without a trailing slash, joins would replace the last path segment
        let mut base = base_url.trim().to_string();
        if !base.ends_with('/') {
            base.push('/');
        }

        let base = Url::parse(&base)
            .map_err(|e| QuoteError::Config(format!("Invalid bulk provider URL '{base_url}': {e}")))?;

        Ok(Self {
            client,
            base,
            rules: FieldRules::default(),
        })
    }

    fn resource(&self, file: &str) -> Result<Url> {
        self.base
            .join(file)
            .map_err(|e| QuoteError::fetch(Self::NAME, format!("Invalid resource '{file}': {e}")))
    }
}

impl BulkSource for HttpBulkSource {
    fn fetch_catalog_metadata(&self) -> Result<Metadata> {
        let url = self.resource("metadata.json")?;
        let body = self.client.get_json(Self::NAME, url.as_str())?;
        serde_json::from_value(body).map_err(|e| QuoteError::Json(e).for_provider(Self::NAME))
    }

    fn fetch_language_quotes(&self, language: &str) -> Result<Vec<Quote>> {
        let url = self.resource(&format!("{language}.json"))?;
        match self.client.get_json(Self::NAME, url.as_str())? {
            Value::Array(items) => Ok(self.rules.extract_all(&items)),
            _ => Err(QuoteError::fetch(
                Self::NAME,
                format!("Expected a JSON array of quotes for '{language}'"),
            )),
        }
    }
}

/// Single-quote provider with its own response shape
pub struct HttpQuoteSource {
    name: String,
    url: String,
    rules: FieldRules,
    client: HttpClient,
}

impl HttpQuoteSource {
    pub fn new(
        client: HttpClient,
        name: impl Into<String>,
        url: impl Into<String>,
        rules: FieldRules,
    ) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
            rules,
            client,
        }
    }
}

impl QuoteSource for HttpQuoteSource {
    fn name(&self) -> &str {
        &self.name
    }

    fn fetch_quote(&self) -> Result<Quote> {
        let body = self.client.get_json(&self.name, &self.url)?;
        self.rules.extract_single(&body).ok_or_else(|| {
            QuoteError::fetch(
                &self.name,
                format!(
                    "Response has none of the text fields [{}]",
                    self.rules.text_fields().join(", ")
                ),
            )
        })
    }
}
