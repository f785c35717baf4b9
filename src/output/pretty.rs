use colored::Colorize;

use crate::quotes::selector::MAX_DISPLAY_LEN;
use crate::quotes::Quote;

/// Safely truncate a string to n characters, appending "..." if truncated.
/// Works correctly with multi-byte UTF-8 characters.
fn truncate_str(s: &str, max_chars: usize) -> String {
    let chars: Vec<char> = s.chars().collect();
    if chars.len() > max_chars {
        let truncated: String = chars.iter().take(max_chars.saturating_sub(3)).collect();
        format!("{}...", truncated)
    } else {
        s.to_string()
    }
}

/// Format the displayed quote the way the widget renders it
pub fn format_quote(quote: &Quote) -> String {
    format!(
        "{}\n  {} {}",
        format!("\u{201c}{}\u{201d}", quote.text).italic(),
        "\u{2014}".dimmed(),
        quote.author.cyan()
    )
}

/// Format every candidate quote, one per line
pub fn format_quotes(quotes: &[Quote]) -> String {
    if quotes.is_empty() {
        return "No quotes available.".to_string();
    }

    let mut output = String::new();
    output.push_str(&format!("{} ({})\n", "Quotes".bold(), quotes.len()));
    output.push_str(&"─".repeat(70));
    output.push('\n');

    for quote in quotes {
        let marker = if quote.display_len() <= MAX_DISPLAY_LEN {
            " ".normal()
        } else {
            "+".yellow()
        };
        output.push_str(&format!(
            "{} {} {}\n",
            marker,
            truncate_str(&quote.text, 90),
            format!("({})", quote.author).dimmed()
        ));
    }

    output.trim_end().to_string()
}
