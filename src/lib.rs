//! Twitter Media Downloader
//!
//! This library fetches an X/Twitter post page, extracts the post's embedded
//! media, and downloads the highest-quality variant of each item to local
//! storage.
//!
//! # Features
//!
//! - Photo, video, and animated-GIF (served as MP4) support
//! - Deterministic best-variant selection by bitrate and resolution
//! - Pluggable extraction strategies for the site's unstable page structure
//! - Streaming downloads that never leave truncated files behind
//! - Per-entry failure reporting; one bad entry does not abort the run
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//! use twitter_media_downloader::{download_from_url, Config, TwitterClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::default();
//!     let client = TwitterClient::new(&config.network)?;
//!
//!     let results = download_from_url(
//!         &client,
//!         &config,
//!         "https://x.com/user/status/1234567890",
//!         Path::new("./downloads"),
//!     )
//!     .await?;
//!
//!     for result in results.iter().filter_map(|r| r.path()) {
//!         println!("{}", result.display());
//!     }
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod cli;
pub mod config;
pub mod download;
pub mod error;
pub mod fs;
pub mod media;
pub mod output;

// Re-exports for convenience
pub use api::{PostReference, TwitterClient};
pub use config::Config;
pub use download::{download_entries, download_from_url, DownloadOutcome, DownloadResult, RunStats};
pub use error::{Error, Result};
pub use media::{MediaEntry, MediaExtractor, MediaKind, MediaVariant};
