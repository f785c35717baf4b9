//! Cache management commands

use colored::Colorize;

use crate::cache::QuoteCache;
use crate::cli::args::{CacheArgs, CacheCommands, OutputFormat};
use crate::config::Paths;
use crate::error::Result;
use crate::output::json::format_json;
use crate::quotes::staleness::ttl_for;
use crate::store::FileStore;

/// Handle cache commands
pub fn cache(paths: &Paths, args: &CacheArgs, format: OutputFormat) -> Result<String> {
    let cache = QuoteCache::new(FileStore::open(&paths.store_file));

    match &args.command {
        CacheCommands::Status => status(paths, &cache, format),
        CacheCommands::Clear => clear(cache, format),
    }
}

fn status(paths: &Paths, cache: &QuoteCache<FileStore>, format: OutputFormat) -> Result<String> {
    let status = cache.status();

    match format {
        OutputFormat::Pretty => {
            let mut output = String::new();
            output.push_str(&format!("{}\n", "Cache Status".bold()));
            output.push_str(&format!("Location: {}\n", paths.store_file.display()));
            output.push_str(&format!(
                "Active language: {}\n",
                status.active_language.as_deref().unwrap_or("(none)")
            ));
            if let Some(ref stamp) = status.metadata_timestamp {
                output.push_str(&format!("Catalog updated: {}\n", stamp));
            }
            output.push('\n');

            if status.languages.is_empty() {
                output.push_str(&format!("  {}\n", "Not cached".dimmed()));
            }

            for entry in &status.languages {
                output.push_str(&format!("{}\n", format!("[{}]", entry.language).cyan()));
                if !entry.exists {
                    output.push_str(&format!("  {}\n", "Incomplete entry".yellow()));
                    continue;
                }
                if let (Some(count), Some(declared)) = (entry.count, entry.declared_count) {
                    if declared == 0 {
                        output.push_str(&format!("  Entries: {}\n", "no data for language".dimmed()));
                    } else {
                        output.push_str(&format!("  Entries: {} (declared {})\n", count, declared));
                    }
                }
                if let (Some(age), Some(declared)) = (entry.age_secs, entry.declared_count) {
                    let fresh = age as i64 <= ttl_for(declared).num_seconds();
                    let label = if fresh {
                        "(fresh)".green()
                    } else {
                        "(stale)".yellow()
                    };
                    output.push_str(&format!("  Age: {} {}\n", format_age(age), label));
                }
            }

            Ok(output.trim_end().to_string())
        }
        OutputFormat::Json => {
            let languages: Vec<_> = status
                .languages
                .iter()
                .map(|entry| {
                    serde_json::json!({
                        "language": entry.language,
                        "exists": entry.exists,
                        "age_secs": entry.age_secs,
                        "count": entry.count,
                        "declared_count": entry.declared_count,
                    })
                })
                .collect();

            let json = serde_json::json!({
                "store_file": paths.store_file.to_string_lossy(),
                "active_language": status.active_language,
                "metadata_timestamp": status.metadata_timestamp,
                "languages": languages,
            });
            format_json(&json)
        }
    }
}

fn clear(mut cache: QuoteCache<FileStore>, format: OutputFormat) -> Result<String> {
    cache.purge_all()?;

    match format {
        OutputFormat::Pretty => Ok(format!("{} Cache cleared", "✓".green())),
        OutputFormat::Json => {
            let json = serde_json::json!({
                "status": "cleared"
            });
            format_json(&json)
        }
    }
}

/// Format age in human-readable form
fn format_age(secs: u64) -> String {
    if secs < 60 {
        format!("{}s", secs)
    } else if secs < 3600 {
        format!("{}m {}s", secs / 60, secs % 60)
    } else if secs < 86_400 {
        format!("{}h {}m", secs / 3600, (secs % 3600) / 60)
    } else {
        format!("{}d {}h", secs / 86_400, (secs % 86_400) / 3600)
    }
}
