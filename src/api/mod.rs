//! HTTP layer.
//!
//! This module provides:
//! - Post URL parsing and validation
//! - The shared HTTP client used for page fetches and media downloads

pub mod client;
pub mod post;

pub use client::TwitterClient;
pub use post::PostReference;
