//! Field-name rules for normalizing heterogeneous quote payloads

use serde_json::Value;

use crate::quotes::types::Quote;

/// Text fields every provider is checked for, in order
pub const TEXT_FIELDS: &[&str] = &["quote", "text", "content"];

/// Author fields every provider is checked for, in order
pub const AUTHOR_FIELDS: &[&str] = &["author", "by"];

/// Ordered candidate field names for quote text and author
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldRules {
    text: Vec<String>,
    author: Vec<String>,
}

impl Default for FieldRules {
    fn default() -> Self {
        Self {
            text: TEXT_FIELDS.iter().map(|s| s.to_string()).collect(),
            author: AUTHOR_FIELDS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl FieldRules {
    /// Append a provider-specific text field, checked after the common ones
    pub fn with_text_field(mut self, field: impl Into<String>) -> Self {
        self.text.push(field.into());
        self
    }

    /// Text field candidates in lookup order
    pub fn text_fields(&self) -> &[String] {
        &self.text
    }

    /// Extract a quote from one JSON object
    ///
    /// Returns `None` when no text field holds a non-blank string. A missing
    /// author becomes "Unknown".
    pub fn extract(&self, value: &Value) -> Option<Quote> {
        let text = first_string(value, &self.text)?;
        let author = first_string(value, &self.author).unwrap_or_default();
        Some(Quote::new(text, author))
    }

    /// Extract from a single-quote response body
    ///
    /// Some APIs wrap their one quote in an array; the first element is used.
    pub fn extract_single(&self, body: &Value) -> Option<Quote> {
        match body {
            Value::Array(items) => items.first().and_then(|item| self.extract(item)),
            other => self.extract(other),
        }
    }

    /// Extract every usable quote from a list, preserving order
    pub fn extract_all(&self, items: &[Value]) -> Vec<Quote> {
        items.iter().filter_map(|item| self.extract(item)).collect()
    }
}

fn first_string(value: &Value, fields: &[String]) -> Option<String> {
    fields
        .iter()
        .filter_map(|field| value.get(field.as_str()).and_then(Value::as_str))
        .map(str::trim)
        .find(|s| !s.is_empty())
        .map(str::to_string)
}
