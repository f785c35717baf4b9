use colored::Colorize;
use tracing::warn;

use crate::cache::QuoteCache;
use crate::cli::args::{OutputFormat, ShowArgs};
use crate::config::{Config, Paths};
use crate::error::Result;
use crate::output::json::format_json;
use crate::output;
use crate::providers;
use crate::quotes::{normalize_language, select_displayable, QuoteService, Session};
use crate::store::FileStore;

/// Handle the show command
pub fn show(config: &Config, paths: &Paths, args: &ShowArgs, format: OutputFormat) -> Result<String> {
    if !config.quotes.retrieval_enabled() {
        return disabled(format);
    }

    let language = normalize_language(
        args.language
            .as_deref()
            .unwrap_or(&config.quotes.language),
    )?;

    let (bulk, alternatives) = providers::from_config(&config.providers)?;
    let cache = QuoteCache::new(FileStore::open(&paths.store_file));
    let mut session = Session::restore(&cache);
    let mut service =
        QuoteService::new(cache, Box::new(bulk), alternatives).with_online(!args.offline);

    let quotes = service.quotes_for_language(&mut session, &language, args.refresh);
    if let Err(e) = session.persist(service.cache_mut()) {
        warn!(error = %e, "failed to remember active language");
    }

    // Fetches are not cancelled, so the widget may have been switched off meanwhile
    if !Config::load_from(paths)?.quotes.retrieval_enabled() {
        return disabled(format);
    }

    if args.all {
        output::format_quotes(&quotes, format)
    } else {
        output::format_quote(&select_displayable(&quotes), format)
    }
}

fn disabled(format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Pretty => Ok(format!(
            "{}\nRun '{}' to turn them on.",
            "Quotes are disabled.".dimmed(),
            "tabquote config set quotes.enabled true".cyan()
        )),
        OutputFormat::Json => {
            let json = serde_json::json!({ "enabled": false });
            format_json(&json)
        }
    }
}
