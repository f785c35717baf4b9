use serde::{Deserialize, Serialize};
use std::fs;
#[cfg(unix)]
use std::os::unix::fs::PermissionsExt;
use std::time::Duration;

use super::paths::Paths;
use crate::error::Result;
use crate::quotes::types::ENGLISH;

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Widget settings
    #[serde(default)]
    pub quotes: QuotesConfig,

    /// Provider endpoints
    #[serde(default)]
    pub providers: ProvidersConfig,

    /// Output preferences
    #[serde(default)]
    pub output: OutputConfig,
}

/// Quote widget settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuotesConfig {
    /// Active language code
    #[serde(default = "default_language")]
    pub language: String,
    /// Motivational quotes checkbox
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Hide-search-widget checkbox; quotes take the search widget's place
    #[serde(default = "default_true")]
    pub hide_search_widget: bool,
}

fn default_language() -> String {
    ENGLISH.to_string()
}

fn default_true() -> bool {
    true
}

impl Default for QuotesConfig {
    fn default() -> Self {
        Self {
            language: default_language(),
            enabled: true,
            hide_search_widget: true,
        }
    }
}

impl QuotesConfig {
    /// Both checkboxes must be on for retrieval to run
    pub fn retrieval_enabled(&self) -> bool {
        self.enabled && self.hide_search_widget
    }
}

/// Provider endpoints, tried in the order listed here
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProvidersConfig {
    /// Base URL serving `metadata.json` and `<lang>.json`
    #[serde(default = "default_bulk_url")]
    pub bulk_url: String,
    /// Alternative A: `{ quote, author }`
    #[serde(default = "default_quotes_api_url")]
    pub quotes_api_url: String,
    /// Alternative B: `{ en, author }`
    #[serde(default = "default_programming_quotes_url")]
    pub programming_quotes_url: String,
    /// Alternative C: `{ content, author }`
    #[serde(default = "default_quotable_url")]
    pub quotable_url: String,
    /// Per-request timeout
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_bulk_url() -> String {
    "https://cdn.jsdelivr.net/gh/prem-k-r/multilingual-quotes-api@main/dist/".to_string()
}

fn default_quotes_api_url() -> String {
    "https://quotes-api-self.vercel.app/quote".to_string()
}

fn default_programming_quotes_url() -> String {
    "https://programming-quotesapi.vercel.app/api/random".to_string()
}

fn default_quotable_url() -> String {
    "https://api.quotable.io/random".to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

impl Default for ProvidersConfig {
    fn default() -> Self {
        Self {
            bulk_url: default_bulk_url(),
            quotes_api_url: default_quotes_api_url(),
            programming_quotes_url: default_programming_quotes_url(),
            quotable_url: default_quotable_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl ProvidersConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Output formatting preferences
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Default output format
    #[serde(default = "default_format")]
    pub format: String,
}

fn default_format() -> String {
    "pretty".to_string()
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: default_format(),
        }
    }
}

impl Config {
    /// Load configuration from a specific paths instance
    pub fn load_from(paths: &Paths) -> Result<Self> {
        if !paths.config_exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&paths.config_file)?;
        let config: Config = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Save configuration to a specific paths instance
    pub fn save_to(&self, paths: &Paths) -> Result<()> {
        paths.ensure_dirs()?;
        let contents = toml::to_string_pretty(self)?;
        fs::write(&paths.config_file, &contents)?;

        #[cfg(unix)]
        {
            let perms = fs::Permissions::from_mode(0o600);
            fs::set_permissions(&paths.config_file, perms)?;
        }

        Ok(())
    }
}
