//! Post reference parsing and validation.

use url::Url;

use crate::error::{Error, Result};

/// A validated reference to a single X/Twitter post.
///
/// Parsed once from the input URL and immutable afterwards. The post ID is
/// guaranteed to be digits only and the handle non-empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostReference {
    handle: String,
    id: String,
}

impl PostReference {
    /// Parse a post reference from an `x.com` or `twitter.com` status URL.
    ///
    /// Accepted forms:
    /// - `https://x.com/<handle>/status/<id>`
    /// - `https://twitter.com/<handle>/status/<id>`
    ///
    /// `www.` and `mobile.` host prefixes are tolerated, as are trailing
    /// path segments (`/photo/1`) and query parameters.
    pub fn parse(input: &str) -> Result<Self> {
        let input = input.trim();
        let url = Url::parse(input).map_err(|e| Error::InvalidUrl(format!("{}: {}", input, e)))?;

        let host = url
            .host_str()
            .ok_or_else(|| Error::InvalidUrl(format!("missing host: {}", input)))?;

        let base_host = host
            .strip_prefix("www.")
            .or_else(|| host.strip_prefix("mobile."))
            .unwrap_or(host);

        if base_host != "x.com" && base_host != "twitter.com" {
            return Err(Error::InvalidUrl(format!(
                "unsupported domain '{}' (expected x.com or twitter.com)",
                host
            )));
        }

        let segments: Vec<&str> = url
            .path_segments()
            .map(|s| s.filter(|p| !p.is_empty()).collect())
            .unwrap_or_default();

        // Expected path shape: /<handle>/status/<id>[/...]
        if segments.len() < 3 || segments[1] != "status" {
            return Err(Error::InvalidUrl(format!(
                "expected /<handle>/status/<id> path: {}",
                input
            )));
        }

        let handle = segments[0].to_string();
        let id = segments[2].to_string();

        if id.is_empty() || !id.bytes().all(|b| b.is_ascii_digit()) {
            return Err(Error::InvalidUrl(format!(
                "post ID must be numeric, got '{}'",
                id
            )));
        }

        Ok(Self { handle, id })
    }

    /// The author handle, without a leading `@`.
    pub fn handle(&self) -> &str {
        &self.handle
    }

    /// The numeric post ID.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Canonical page URL for the post, normalized to the x.com domain.
    pub fn page_url(&self) -> String {
        format!("https://x.com/{}/status/{}", self.handle, self.id)
    }
}

impl std::fmt::Display for PostReference {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "@{}/{}", self.handle, self.id)
    }
}
