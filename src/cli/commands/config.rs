use colored::Colorize;
use tracing::debug;

use crate::cache::QuoteCache;
use crate::cli::args::{ConfigArgs, ConfigCommands, OutputFormat};
use crate::config::{Config, Paths};
use crate::error::{QuoteError, Result};
use crate::output::json::format_json;
use crate::quotes::normalize_language;
use crate::store::FileStore;

const VALID_KEYS: &str = "quotes.language, quotes.enabled, quotes.hide_search_widget, \
providers.bulk_url, providers.quotes_api_url, providers.programming_quotes_url, \
providers.quotable_url, providers.timeout_secs, output.format";

/// Handle the config command
pub fn config(
    config: &mut Config,
    paths: &Paths,
    args: &ConfigArgs,
    format: OutputFormat,
) -> Result<String> {
    match &args.command {
        ConfigCommands::Show => config_show(config, format),
        ConfigCommands::Set { key, value } => config_set(config, paths, key, value, format),
        ConfigCommands::Path => config_path(paths, format),
    }
}

/// Show current configuration
fn config_show(config: &Config, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Pretty => {
            let mut output = String::new();
            output.push_str(&format!("{}\n", "Configuration".bold()));
            output.push_str(&"─".repeat(40));
            output.push('\n');

            output.push_str(&format!("\n{}\n", "[quotes]".cyan()));
            output.push_str(&format!("  language = {}\n", config.quotes.language));
            output.push_str(&format!("  enabled = {}\n", config.quotes.enabled));
            output.push_str(&format!(
                "  hide_search_widget = {}\n",
                config.quotes.hide_search_widget
            ));

            output.push_str(&format!("\n{}\n", "[providers]".cyan()));
            output.push_str(&format!("  bulk_url = {}\n", config.providers.bulk_url));
            output.push_str(&format!("  quotes_api_url = {}\n", config.providers.quotes_api_url));
            output.push_str(&format!(
                "  programming_quotes_url = {}\n",
                config.providers.programming_quotes_url
            ));
            output.push_str(&format!("  quotable_url = {}\n", config.providers.quotable_url));
            output.push_str(&format!("  timeout_secs = {}\n", config.providers.timeout_secs));

            output.push_str(&format!("\n{}\n", "[output]".cyan()));
            output.push_str(&format!("  format = {}\n", config.output.format));

            Ok(output)
        }
        OutputFormat::Json => format_json(config),
    }
}

fn parse_bool(key: &str, value: &str) -> Result<bool> {
    value.parse().map_err(|_| {
        QuoteError::InvalidArgument(format!("{key} must be 'true' or 'false'"))
    })
}

/// Set a configuration value
fn config_set(
    config: &mut Config,
    paths: &Paths,
    key: &str,
    value: &str,
    format: OutputFormat,
) -> Result<String> {
    let mut purge = false;

    match key {
        "quotes.language" => {
            config.quotes.language = normalize_language(value)?;
        }
        "quotes.enabled" => {
            config.quotes.enabled = parse_bool(key, value)?;
            purge = !config.quotes.enabled;
        }
        "quotes.hide_search_widget" => {
            config.quotes.hide_search_widget = parse_bool(key, value)?;
            purge = !config.quotes.hide_search_widget;
        }
        "providers.bulk_url" => config.providers.bulk_url = value.to_string(),
        "providers.quotes_api_url" => config.providers.quotes_api_url = value.to_string(),
        "providers.programming_quotes_url" => {
            config.providers.programming_quotes_url = value.to_string()
        }
        "providers.quotable_url" => config.providers.quotable_url = value.to_string(),
        "providers.timeout_secs" => {
            config.providers.timeout_secs = value.parse().map_err(|_| {
                QuoteError::InvalidArgument(
                    "providers.timeout_secs must be a whole number of seconds".to_string(),
                )
            })?;
        }
        "output.format" => {
            if value != "pretty" && value != "json" {
                return Err(QuoteError::InvalidArgument(
                    "output.format must be 'pretty' or 'json'".to_string(),
                ));
            }
            config.output.format = value.to_string();
        }
        _ => {
            return Err(QuoteError::InvalidArgument(format!(
                "Unknown config key: {}. Valid keys: {}",
                key, VALID_KEYS
            )));
        }
    }

    config.save_to(paths)?;

    // Turning the widget off drops everything it cached
    if purge {
        debug!(key, "quotes disabled, purging cache");
        QuoteCache::new(FileStore::open(&paths.store_file)).purge_all()?;
    }

    match format {
        OutputFormat::Pretty => {
            let mut output = format!("{} Set {} = {}", "✓".green(), key, value);
            if purge {
                output.push_str(&format!("\n{} Quote cache cleared", "✓".green()));
            }
            Ok(output)
        }
        OutputFormat::Json => {
            let result = serde_json::json!({
                "success": true,
                "key": key,
                "value": value,
                "cache_cleared": purge,
            });
            format_json(&result)
        }
    }
}

/// Show configuration file path
fn config_path(paths: &Paths, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Pretty => {
            let mut output = String::new();
            output.push_str(&format!("Config file: {}\n", paths.config_file.display()));
            output.push_str(&format!(
                "Exists: {}\n",
                if paths.config_exists() {
                    "yes".green()
                } else {
                    "no".yellow()
                }
            ));
            Ok(output)
        }
        OutputFormat::Json => {
            let result = serde_json::json!({
                "path": paths.config_file.display().to_string(),
                "exists": paths.config_exists()
            });
            format_json(&result)
        }
    }
}
