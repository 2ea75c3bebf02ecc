//! Error types for the twitter-media-downloader application.

use thiserror::Error;

/// Main error type for the application.
#[derive(Error, Debug)]
pub enum Error {
    // Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid configuration value for '{field}': {message}")]
    ConfigValidation { field: String, message: String },

    // Post URL errors
    #[error("Invalid post URL: {0}")]
    InvalidUrl(String),

    // Fetch errors
    #[error("Network error during {stage}: {message}")]
    Network {
        stage: &'static str,
        message: String,
    },

    #[error("HTTP {status} from {url}")]
    HttpStatus { status: u16, url: String },

    #[error("Empty response body from {0}")]
    EmptyResponse(String),

    // Extraction errors
    #[error("Failed to parse page content: {0}")]
    Parse(String),

    // Per-entry download errors
    #[error("Write error: {0}")]
    Write(String),

    #[error("Transfer error: {0}")]
    Transfer(String),

    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // Serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    // URL parsing errors
    #[error("Invalid URL: {0}")]
    UrlParse(#[from] url::ParseError),
}

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Whether this error aborts the whole run or only the current entry.
    ///
    /// `Write` and `Transfer` are recorded per entry and the batch
    /// continues; everything else is pipeline-fatal.
    pub fn is_entry_scoped(&self) -> bool {
        matches!(self, Error::Write(_) | Error::Transfer(_))
    }
}

/// Process exit codes for the CLI entry point.
pub mod exit_codes {
    pub const SUCCESS: i32 = 0;
    pub const ABORT: i32 = 1;
    pub const INVALID_URL: i32 = 2;
    pub const CONFIG_ERROR: i32 = 3;
    pub const FETCH_ERROR: i32 = 4;
    pub const PARSE_ERROR: i32 = 5;
    pub const ALL_DOWNLOADS_FAILED: i32 = 6;
    pub const UNEXPECTED_ERROR: i32 = 7;
}
