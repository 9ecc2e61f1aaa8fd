//! Error types for msearch

use thiserror::Error;

/// Result type alias using msearch's Error
pub type Result<T> = std::result::Result<T, Error>;

/// msearch error types
///
/// Backend failures inside the search pipeline are logged and degraded
/// rather than returned; these variants surface only at the edges
/// (configuration, terminal I/O, browser launch) or inside the HTTP
/// clients before they are caught.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid region bounds: {message}")]
    InvalidRegion { message: String },

    #[error("{service} returned an error: {message}")]
    Backend {
        service: &'static str,
        message: String,
    },

    #[error("Search keyword must not be empty")]
    EmptyKeyword,

    #[error("Prompt error: {message}")]
    PromptError { message: String },

    #[error("Failed to open browser: {message}")]
    BrowserError { message: String },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),
}
