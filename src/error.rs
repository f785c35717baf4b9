use thiserror::Error;

/// Result type alias for tabquote operations
pub type Result<T> = std::result::Result<T, QuoteError>;

/// Errors that can occur while retrieving, caching or displaying quotes
#[derive(Error, Debug)]
pub enum QuoteError {
    /// A single provider failed (network, HTTP status or body shape)
    #[error("Provider '{provider}' failed: {message}")]
    Fetch { provider: String, message: String },

    /// Every fallback provider failed or returned incomplete data
    #[error("All quote providers failed ({})", summarize(.0))]
    AllProvidersFailed(Vec<QuoteError>),

    /// Network access was requested while the host reported no connectivity
    #[error("Network unavailable (offline)")]
    Offline,

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON parsing error
    #[error("Failed to parse JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML parsing error
    #[error("Failed to parse config file: {0}")]
    Toml(#[from] toml::de::Error),

    /// TOML serialization error
    #[error("Failed to write config file: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid argument
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Environment variable error
    #[error("Environment error: {0}")]
    Env(#[from] std::env::VarError),
}

fn summarize(errors: &[QuoteError]) -> String {
    if errors.is_empty() {
        return "no providers attempted".to_string();
    }
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

impl QuoteError {
    /// Create a fetch error attributed to a provider
    pub fn fetch(provider: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Fetch {
            provider: provider.into(),
            message: message.into(),
        }
    }

    /// Re-attribute transport and parse failures to the provider that raised them
    pub fn for_provider(self, provider: &str) -> Self {
        match self {
            e @ (Self::Fetch { .. } | Self::AllProvidersFailed(_) | Self::Offline) => e,
            other => Self::fetch(provider, other.to_string()),
        }
    }

    /// Process exit code for the binary
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Config(_) | Self::Toml(_) | Self::TomlSerialize(_) | Self::Env(_) => 2,
            Self::InvalidArgument(_) => 64,
            Self::Fetch { .. } | Self::AllProvidersFailed(_) | Self::Offline | Self::Http(_) => 3,
            Self::Json(_) | Self::Io(_) => 1,
        }
    }
}
