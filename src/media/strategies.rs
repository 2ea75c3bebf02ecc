//! Extraction strategies for locating post media in fetched page content.
//!
//! The page structure of the source site is not a stable contract, so each
//! known shape of the embedded media data gets its own strategy. Strategies
//! are tried in priority order by [`crate::media::MediaExtractor`]; the
//! first one that yields at least one entry wins.

use std::collections::HashSet;

use regex::Regex;
use serde::Deserialize;

use crate::error::Result;
use crate::media::item::{MediaEntry, MediaKind, MediaVariant};

/// A single way of recovering media entries from page content.
///
/// `Ok(None)` means the strategy found nothing it recognizes; the driver
/// moves on to the next strategy. Errors are reserved for content that the
/// strategy positively identified as its shape but could not process.
pub trait ExtractStrategy {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Attempt extraction against the given content.
    fn try_extract(&self, content: &str) -> Result<Option<Vec<MediaEntry>>>;
}

// ---------------------------------------------------------------------------
// Embedded JSON strategy
// ---------------------------------------------------------------------------

/// Raw `extended_entities` object embedded in the page's inline JSON.
#[derive(Debug, Deserialize)]
struct ExtendedEntities {
    #[serde(default)]
    media: Vec<MediaEntity>,
}

/// One media entity from the embedded data.
#[derive(Debug, Deserialize)]
struct MediaEntity {
    #[serde(rename = "type")]
    media_type: String,
    media_url_https: Option<String>,
    video_info: Option<VideoInfo>,
}

#[derive(Debug, Deserialize)]
struct VideoInfo {
    #[serde(default)]
    variants: Vec<RawVariant>,
}

#[derive(Debug, Deserialize)]
struct RawVariant {
    bitrate: Option<u64>,
    content_type: Option<String>,
    url: String,
}

impl RawVariant {
    /// Only MP4 variants are downloadable; HLS playlists are skipped.
    fn is_mp4(&self) -> bool {
        match &self.content_type {
            Some(ct) => ct == "video/mp4",
            None => {
                let path = self.url.split(['?', '#']).next().unwrap_or(&self.url);
                path.ends_with(".mp4")
            }
        }
    }
}

/// Extracts media from `"extended_entities"` JSON objects embedded in the
/// page, the shape the site's own frontend consumes.
pub struct EmbeddedJsonStrategy {
    dimensions: Regex,
}

impl EmbeddedJsonStrategy {
    pub fn new() -> Self {
        Self {
            // Variant URLs carry their dimensions as a `/640x360/` path
            // segment.
            dimensions: Regex::new(r"/(\d{2,5})x(\d{2,5})/").unwrap(),
        }
    }

    fn entity_to_entry(&self, entity: &MediaEntity, index: usize) -> Option<MediaEntry> {
        match entity.media_type.as_str() {
            "photo" => {
                let url = entity.media_url_https.as_deref()?;
                Some(MediaEntry::photo(index, promote_photo_url(url)))
            }
            "video" | "animated_gif" => {
                let info = entity.video_info.as_ref()?;
                let variants: Vec<MediaVariant> = info
                    .variants
                    .iter()
                    .filter(|v| v.is_mp4())
                    .map(|v| {
                        let (width, height) = self.url_dimensions(&v.url);
                        MediaVariant {
                            url: v.url.clone(),
                            content_type: v.content_type.clone(),
                            bitrate: v.bitrate,
                            width,
                            height,
                        }
                    })
                    .collect();

                if variants.is_empty() {
                    return None;
                }

                let kind = if entity.media_type == "animated_gif" {
                    MediaKind::AnimatedGif
                } else {
                    MediaKind::Video
                };

                Some(MediaEntry {
                    kind,
                    index,
                    variants,
                })
            }
            other => {
                tracing::debug!("Skipping unknown media entity type: {}", other);
                None
            }
        }
    }

    fn url_dimensions(&self, url: &str) -> (Option<u32>, Option<u32>) {
        if let Some(caps) = self.dimensions.captures(url) {
            let width = caps.get(1).and_then(|m| m.as_str().parse().ok());
            let height = caps.get(2).and_then(|m| m.as_str().parse().ok());
            (width, height)
        } else {
            (None, None)
        }
    }
}

impl Default for EmbeddedJsonStrategy {
    fn default() -> Self {
        Self::new()
    }
}

impl ExtractStrategy for EmbeddedJsonStrategy {
    fn name(&self) -> &'static str {
        "embedded-json"
    }

    fn try_extract(&self, content: &str) -> Result<Option<Vec<MediaEntry>>> {
        // Only the first blob that yields media is used: later occurrences
        // belong to quoted or threaded posts, which are out of scope.
        for blob in json_objects_after_key(content, "\"extended_entities\"") {
            let entities: ExtendedEntities = match serde_json::from_str(blob) {
                Ok(parsed) => parsed,
                Err(e) => {
                    tracing::debug!("Skipping malformed extended_entities blob: {}", e);
                    continue;
                }
            };

            let entries: Vec<MediaEntry> = entities
                .media
                .iter()
                .enumerate()
                .filter_map(|(i, entity)| self.entity_to_entry(entity, i))
                .collect();

            if !entries.is_empty() {
                return Ok(Some(entries));
            }
        }

        Ok(None)
    }
}

/// Locate balanced JSON objects following each occurrence of `"key":`.
///
/// Returns the raw object slices. Occurrences not followed by an object, or
/// with unbalanced braces (truncated markup), are skipped.
fn json_objects_after_key<'a>(content: &'a str, key: &str) -> Vec<&'a str> {
    let mut objects = Vec::new();
    let bytes = content.as_bytes();
    let mut search_from = 0;

    while let Some(pos) = content[search_from..].find(key) {
        let mut i = search_from + pos + key.len();

        // Skip whitespace and the separating colon.
        while i < bytes.len() && (bytes[i].is_ascii_whitespace() || bytes[i] == b':') {
            i += 1;
        }

        if i < bytes.len() && bytes[i] == b'{' {
            if let Some(len) = balanced_object_len(&content[i..]) {
                objects.push(&content[i..i + len]);
                search_from = i + len;
                continue;
            }
        }

        search_from = search_from + pos + key.len();
    }

    objects
}

/// Byte length of the balanced JSON object at the start of `s`.
///
/// Brace counting is string-aware: braces inside string literals and
/// escaped quotes do not affect the depth.
fn balanced_object_len(s: &str) -> Option<usize> {
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (i, b) in s.bytes().enumerate() {
        if in_string {
            if escaped {
                escaped = false;
            } else if b == b'\\' {
                escaped = true;
            } else if b == b'"' {
                in_string = false;
            }
            continue;
        }

        match b {
            b'"' => in_string = true,
            b'{' => depth += 1,
            b'}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(i + 1);
                }
            }
            _ => {}
        }
    }

    None
}

/// Promote a static-image URL to its original-size form.
fn promote_photo_url(url: &str) -> String {
    if url.contains("pbs.twimg.com/media/") && !url.contains('?') && !url.ends_with(":orig") {
        format!("{}:orig", url)
    } else {
        url.to_string()
    }
}

// ---------------------------------------------------------------------------
// HTML pattern scan strategy
// ---------------------------------------------------------------------------

/// Fallback strategy scanning raw markup for media URLs when no structured
/// data blob is present or parseable.
pub struct HtmlScanStrategy {
    video_patterns: Vec<Regex>,
    mp4_link_pattern: Regex,
    image_patterns: Vec<Regex>,
}

impl HtmlScanStrategy {
    pub fn new() -> Self {
        let video_patterns = [
            r#""video_url":"([^"]*\.mp4[^"]*)""#,
            r#""playback_url":"([^"]*\.mp4[^"]*)""#,
            r#""content_url":"([^"]*\.mp4[^"]*)""#,
        ]
        .iter()
        .map(|p| Regex::new(p).unwrap())
        .collect();

        Self {
            video_patterns,
            mp4_link_pattern: Regex::new(r#"(?:href|src)="([^"]*\.mp4[^"]*)""#).unwrap(),
            image_patterns: vec![
                Regex::new(r#""media_url_https":"([^"]*\.(?:jpg|jpeg|png|gif)[^"]*)""#).unwrap(),
                Regex::new(r#"(?:href|src)="(https://pbs\.twimg\.com/media/[^"]+)""#).unwrap(),
            ],
        }
    }
}

impl Default for HtmlScanStrategy {
    fn default() -> Self {
        Self::new()
    }
}

impl ExtractStrategy for HtmlScanStrategy {
    fn name(&self) -> &'static str {
        "html-scan"
    }

    fn try_extract(&self, content: &str) -> Result<Option<Vec<MediaEntry>>> {
        let mut seen = HashSet::new();
        let mut entries = Vec::new();

        let mut push = |kind: MediaKind, url: String, entries: &mut Vec<MediaEntry>| {
            if !seen.insert(url.clone()) {
                return;
            }
            let index = entries.len();
            let entry = match kind {
                MediaKind::Photo => MediaEntry::photo(index, url),
                _ => MediaEntry {
                    kind,
                    index,
                    variants: vec![MediaVariant {
                        url,
                        content_type: Some("video/mp4".to_string()),
                        bitrate: None,
                        width: None,
                        height: None,
                    }],
                },
            };
            entries.push(entry);
        };

        for pattern in &self.video_patterns {
            for caps in pattern.captures_iter(content) {
                let url = unescape_json_url(&caps[1]);
                if url.starts_with("http") {
                    push(MediaKind::Video, url, &mut entries);
                }
            }
        }

        // MP4 links in plain attributes: animated GIFs live under the
        // `tweet_video` path, anything else hosted as video counts as one.
        for caps in self.mp4_link_pattern.captures_iter(content) {
            let url = unescape_json_url(&caps[1]);
            if !url.starts_with("http") || !url.contains("video") {
                continue;
            }
            let kind = if url.contains("tweet_video") {
                MediaKind::AnimatedGif
            } else {
                MediaKind::Video
            };
            push(kind, url, &mut entries);
        }

        for pattern in &self.image_patterns {
            for caps in pattern.captures_iter(content) {
                let url = unescape_json_url(&caps[1]);
                if url.starts_with("http") {
                    push(MediaKind::Photo, promote_photo_url(&url), &mut entries);
                }
            }
        }

        if entries.is_empty() {
            Ok(None)
        } else {
            Ok(Some(entries))
        }
    }
}

/// Undo JSON forward-slash escaping in URLs lifted from inline scripts.
fn unescape_json_url(url: &str) -> String {
    url.replace("\\/", "/")
}
