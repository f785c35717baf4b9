use clap::{Args, CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;
use serde::{Deserialize, Serialize};

/// Fetch, cache and rotate inspirational quotes for your new tab
#[derive(Parser)]
#[command(name = "tabquote")]
#[command(version, propagate_version = true)]
#[command(about = "Fetch, cache and rotate inspirational quotes for your new tab")]
pub struct Cli {
    /// Output format for command results (defaults to output.format from config)
    #[arg(short, long, value_enum, global = true)]
    pub output: Option<OutputFormat>,

    /// Log cache and provider decisions to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Print shell completions to stdout
    pub fn print_completions(shell: Shell) {
        let mut cmd = Self::command();
        let name = cmd.get_name().to_string();
        clap_complete::generate(shell, &mut cmd, name, &mut std::io::stdout());
    }
}

/// Output format options
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Colored, human-readable output
    #[default]
    Pretty,
    /// JSON output for scripting
    Json,
}

impl OutputFormat {
    /// Parse a configured format name, falling back to pretty
    pub fn from_config(name: &str) -> Self {
        <Self as ValueEnum>::from_str(name, true).unwrap_or_default()
    }
}

/// Available commands
#[derive(Subcommand)]
pub enum Commands {
    /// Show a quote for the current language
    #[command(alias = "s")]
    Show(ShowArgs),

    /// Manage local quote cache
    Cache(CacheArgs),

    /// Manage configuration
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Arguments for the show command
#[derive(Args)]
pub struct ShowArgs {
    /// Language code (overrides configured language)
    #[arg(short, long, env = "TABQUOTE_LANGUAGE")]
    pub language: Option<String>,

    /// Fetch from providers even if the cache is fresh
    #[arg(short, long)]
    pub refresh: bool,

    /// Treat the network as unavailable
    #[arg(long)]
    pub offline: bool,

    /// List every candidate quote instead of picking one
    #[arg(short, long)]
    pub all: bool,
}

/// Arguments for the cache command
#[derive(Args)]
pub struct CacheArgs {
    #[command(subcommand)]
    pub command: CacheCommands,
}

/// Cache subcommands
#[derive(Subcommand)]
pub enum CacheCommands {
    /// Show cached languages and their age
    Status,
    /// Remove every cached quote
    Clear,
}

/// Arguments for the config command
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommands,
}

/// Config subcommands
#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Show current configuration
    Show,
    /// Set a configuration value
    Set {
        /// Configuration key (e.g., quotes.language)
        key: String,
        /// Value to set
        value: String,
    },
    /// Show configuration file path
    Path,
}

/// Arguments for the completions command
#[derive(Args)]
pub struct CompletionsArgs {
    /// Target shell
    #[arg(value_enum)]
    pub shell: Shell,
}
