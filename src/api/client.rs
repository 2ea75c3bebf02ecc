//! HTTP client for page fetches and media downloads.

use std::time::Duration;

use reqwest::{header, Client, Response};

use crate::api::post::PostReference;
use crate::config::NetworkConfig;
use crate::error::{Error, Result};

/// HTTP client shared by the page fetcher and the media downloader.
///
/// Wraps a single `reqwest::Client` configured with browser-approximating
/// headers; constructed once by the caller and passed into the pipeline.
pub struct TwitterClient {
    client: Client,
}

impl TwitterClient {
    /// Build a new client from network configuration.
    pub fn new(config: &NetworkConfig) -> Result<Self> {
        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::ACCEPT,
            header::HeaderValue::from_static(
                "text/html,application/xhtml+xml,application/xml;q=0.9,image/avif,image/webp,*/*;q=0.8",
            ),
        );
        headers.insert(
            header::ACCEPT_LANGUAGE,
            header::HeaderValue::from_static("en-US,en;q=0.9"),
        );
        headers.insert("DNT", header::HeaderValue::from_static("1"));
        headers.insert(
            "Upgrade-Insecure-Requests",
            header::HeaderValue::from_static("1"),
        );

        let client = Client::builder()
            .user_agent(&config.user_agent)
            .default_headers(headers)
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|e| Error::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { client })
    }

    /// Fetch the post page and return the raw body text.
    ///
    /// Redirects are followed transparently. A 2xx response with an empty
    /// body is reported as `EmptyResponse`.
    pub async fn fetch_post_page(&self, post: &PostReference) -> Result<String> {
        let url = post.page_url();
        tracing::debug!("GET {}", url);

        let response = self.client.get(&url).send().await.map_err(|e| {
            Error::Network {
                stage: "page fetch",
                message: e.to_string(),
            }
        })?;

        let status = response.status();
        tracing::debug!("Response status: {}", status);

        if !status.is_success() {
            return Err(Error::HttpStatus {
                status: status.as_u16(),
                url,
            });
        }

        let body = response.text().await.map_err(|e| Error::Network {
            stage: "page fetch",
            message: e.to_string(),
        })?;

        if body.is_empty() {
            return Err(Error::EmptyResponse(url));
        }

        Ok(body)
    }

    /// Start a streaming GET for a media URL.
    ///
    /// Returns the response with its body unconsumed so the caller can
    /// stream it to disk. Non-2xx statuses are reported as `Transfer`
    /// failures since they are scoped to one entry.
    pub async fn download_file(&self, url: &str) -> Result<Response> {
        tracing::debug!("GET {}", url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| Error::Transfer(format!("{}: {}", url, e)))?;

        if !response.status().is_success() {
            return Err(Error::Transfer(format!(
                "HTTP {} from {}",
                response.status(),
                url
            )));
        }

        Ok(response)
    }
}
