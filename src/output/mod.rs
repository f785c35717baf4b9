pub mod json;
pub mod pretty;

use crate::cli::OutputFormat;
use crate::error::Result;
use crate::quotes::Quote;

/// Format the selected quote based on output format
pub fn format_quote(quote: &Quote, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Pretty => Ok(pretty::format_quote(quote)),
        OutputFormat::Json => json::format_quote(quote),
    }
}

/// Format every candidate quote based on output format
pub fn format_quotes(quotes: &[Quote], format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Pretty => Ok(pretty::format_quotes(quotes)),
        OutputFormat::Json => json::format_quotes(quotes),
    }
}
