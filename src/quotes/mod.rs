//! Quote retrieval pipeline

pub mod language;
pub mod selector;
pub mod service;
pub mod staleness;
pub mod types;

pub use language::{normalize_language, resolve_target};
pub use selector::{select_displayable, select_displayable_with};
pub use service::{QuoteService, Session};
pub use staleness::needs_refresh;
pub use types::{LanguageCacheEntry, Metadata, Quote};
