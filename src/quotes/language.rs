use super::staleness::SMALL_DATASET;
use super::types::{Metadata, ENGLISH};
use crate::error::{QuoteError, Result};

/// Language whose dataset should actually be fetched for `requested`
///
/// Non-English languages are served in their own language only when the
/// catalog lists at least [`SMALL_DATASET`] quotes for them.
pub fn resolve_target<'a>(requested: &'a str, metadata: &Metadata) -> &'a str {
    if requested == ENGLISH {
        return ENGLISH;
    }

    match metadata.count_for(requested) {
        Some(count) if count >= SMALL_DATASET => requested,
        _ => ENGLISH,
    }
}

/// Normalize a user-supplied language code (e.g. `fr-CA` -> `fr`)
///
/// Codes become part of cache keys, so only ASCII letters are accepted and
/// the names used by shared keys are rejected.
pub fn normalize_language(code: &str) -> Result<String> {
    let primary = code
        .trim()
        .split(['-', '_'])
        .next()
        .unwrap_or_default()
        .to_ascii_lowercase();

    let valid = (2..=8).contains(&primary.len())
        && primary.chars().all(|c| c.is_ascii_lowercase())
        && !matches!(primary.as_str(), "metadata" | "languages" | "active");

    if valid {
        Ok(primary)
    } else {
        Err(QuoteError::InvalidArgument(format!(
            "Invalid language code: '{code}'. Use a code like 'en', 'fr' or 'pt-BR'"
        )))
    }
}
