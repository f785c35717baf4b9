use serde::Serialize;

use crate::error::Result;
use crate::quotes::Quote;

/// Format a single quote as JSON
pub fn format_quote(quote: &Quote) -> Result<String> {
    Ok(serde_json::to_string_pretty(quote)?)
}

/// Format quotes as JSON
pub fn format_quotes(quotes: &[Quote]) -> Result<String> {
    Ok(serde_json::to_string_pretty(quotes)?)
}

/// Format any serializable value as JSON
pub fn format_json<T: Serialize>(value: &T) -> Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}
