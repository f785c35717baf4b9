use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Author used when a source omits one
pub const UNKNOWN_AUTHOR: &str = "Unknown";

/// Universal fallback language
pub const ENGLISH: &str = "en";

/// Shown whenever nothing else can be obtained
pub const FALLBACK_TEXT: &str = "Don't watch the clock; do what it does. Keep going.";
pub const FALLBACK_AUTHOR: &str = "Sam Levenson";

/// A short quote with its attribution
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quote {
    pub text: String,
    pub author: String,
}

impl Quote {
    /// Create a quote, substituting the unknown author for a blank one
    pub fn new(text: impl Into<String>, author: impl Into<String>) -> Self {
        let author = author.into();
        Self {
            text: text.into(),
            author: if author.trim().is_empty() {
                UNKNOWN_AUTHOR.to_string()
            } else {
                author
            },
        }
    }

    /// The hardcoded quote of last resort
    pub fn fallback() -> Self {
        Self {
            text: FALLBACK_TEXT.to_string(),
            author: FALLBACK_AUTHOR.to_string(),
        }
    }

    /// Both text and author carry content
    pub fn is_complete(&self) -> bool {
        !self.text.trim().is_empty() && !self.author.trim().is_empty()
    }

    /// Combined display length in characters
    pub fn display_len(&self) -> usize {
        self.text.chars().count() + self.author.chars().count()
    }
}

/// Cached quotes for one language
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanguageCacheEntry {
    pub language: String,
    pub quotes: Vec<Quote>,
    pub fetched_at: DateTime<Utc>,
    /// `0` means the provider confirmed it has no data for this language
    pub declared_count: u64,
}

impl LanguageCacheEntry {
    /// Provider confirmed no data, as opposed to never fetched
    pub fn is_no_data(&self) -> bool {
        self.declared_count == 0
    }
}

/// Per-file entry in the bulk provider's catalog
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileInfo {
    #[serde(default)]
    pub count: u64,
}

/// Bulk provider catalog, without quote text
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Metadata {
    #[serde(default, deserialize_with = "string_or_number")]
    pub last_updated: String,
    #[serde(default)]
    pub files: BTreeMap<String, FileInfo>,
}

impl Metadata {
    /// Declared quote count for a language, keyed as `<lang>.json` in the catalog
    pub fn count_for(&self, language: &str) -> Option<u64> {
        self.files
            .get(&format!("{language}.json"))
            .map(|info| info.count)
    }
}

/// Catalogs have shipped `lastUpdated` both as an ISO string and as epoch millis
fn string_or_number<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::String(s) => s,
        serde_json::Value::Null => String::new(),
        other => other.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_author_becomes_unknown() {
        let quote = Quote::new("Stay hungry.", "  ");
        assert_eq!(quote.author, UNKNOWN_AUTHOR);
        assert!(quote.is_complete());
    }

    #[test]
    fn test_display_len_counts_chars_not_bytes() {
        let quote = Quote::new("héllo", "Zoë");
        assert_eq!(quote.display_len(), 8);
    }

    #[test]
    fn test_metadata_deserializes_catalog() {
        let json = r#"{
            "lastUpdated": "2024-05-01T00:00:00Z",
            "files": { "en.json": { "count": 1200 }, "fr.json": { "count": 42 } }
        }"#;
        let metadata: Metadata = serde_json::from_str(json).unwrap();

        assert_eq!(metadata.last_updated, "2024-05-01T00:00:00Z");
        assert_eq!(metadata.count_for("en"), Some(1200));
        assert_eq!(metadata.count_for("fr"), Some(42));
        assert_eq!(metadata.count_for("de"), None);
    }

    #[test]
    fn test_metadata_accepts_numeric_timestamp() {
        let metadata: Metadata =
            serde_json::from_str(r#"{"lastUpdated": 1714521600000, "files": {}}"#).unwrap();
        assert_eq!(metadata.last_updated, "1714521600000");
    }
}
