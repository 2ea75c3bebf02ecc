//! Media entry representation and variant selection.

/// Kind of media attached to a post.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    Photo,
    Video,
    /// Animated GIFs are served by the site as soundless MP4 videos.
    AnimatedGif,
}

impl MediaKind {
    /// Tag used in generated filenames.
    pub fn tag(&self) -> &'static str {
        match self {
            MediaKind::Photo => "photo",
            MediaKind::Video => "video",
            MediaKind::AnimatedGif => "gif",
        }
    }

    /// Whether this kind is delivered as an encoded video container.
    pub fn is_video_like(&self) -> bool {
        matches!(self, MediaKind::Video | MediaKind::AnimatedGif)
    }
}

impl std::fmt::Display for MediaKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.tag())
    }
}

/// One quality/encoding option for a media entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaVariant {
    /// Source URL.
    pub url: String,

    /// Declared content type, e.g. `video/mp4`.
    pub content_type: Option<String>,

    /// Declared bitrate in bits per second.
    pub bitrate: Option<u64>,

    /// Width in pixels, when known.
    pub width: Option<u32>,

    /// Height in pixels, when known.
    pub height: Option<u32>,
}

impl MediaVariant {
    /// Variant with only a URL, no quality metadata.
    pub fn bare(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            content_type: None,
            bitrate: None,
            width: None,
            height: None,
        }
    }

    /// Pixel area used as the bitrate tie-breaker.
    fn resolution(&self) -> u64 {
        (self.width.unwrap_or(0) as u64) * (self.height.unwrap_or(0) as u64)
    }
}

/// One piece of media found in a post.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaEntry {
    /// Classified media kind.
    pub kind: MediaKind,

    /// Stable position within the post, starting at 0.
    pub index: usize,

    /// Available source variants, in the order the source listed them.
    pub variants: Vec<MediaVariant>,
}

impl MediaEntry {
    /// A photo entry with a single static-image URL.
    pub fn photo(index: usize, url: impl Into<String>) -> Self {
        Self {
            kind: MediaKind::Photo,
            index,
            variants: vec![MediaVariant::bare(url)],
        }
    }

    /// Select the single variant to download.
    ///
    /// Highest bitrate wins; on absent or tied bitrate the greatest
    /// width*height wins; on a full tie the first-listed variant is kept.
    /// The choice is deterministic for identical input data.
    pub fn select_variant(&self) -> Option<&MediaVariant> {
        let mut best: Option<&MediaVariant> = None;

        for variant in &self.variants {
            match best {
                None => best = Some(variant),
                Some(current) => {
                    let (cur_br, cand_br) =
                        (current.bitrate.unwrap_or(0), variant.bitrate.unwrap_or(0));
                    if cand_br > cur_br
                        || (cand_br == cur_br && variant.resolution() > current.resolution())
                    {
                        best = Some(variant);
                    }
                }
            }
        }

        best
    }

    /// File extension for the saved file, without the dot.
    ///
    /// Video-like entries are always saved as `mp4`. Photos keep the
    /// source image extension when one can be read from the URL and fall
    /// back to `jpg` otherwise.
    pub fn file_extension(&self) -> Option<String> {
        if self.kind.is_video_like() {
            return Some("mp4".to_string());
        }
        self.select_variant()
            .and_then(|v| image_extension_from_url(&v.url))
    }
}

/// Extract an image extension from a media URL.
///
/// Handles both the legacy path style (`.../abc.jpg:orig`) and the modern
/// query style (`...?format=jpg&name=orig`). Returns `None` when the URL
/// carries no recognizable extension.
pub fn image_extension_from_url(url: &str) -> Option<String> {
    // Modern style: extension in the `format` query parameter.
    if let Some(query) = url.split('?').nth(1) {
        for pair in query.split('&') {
            if let Some(value) = pair.strip_prefix("format=") {
                if is_valid_extension(value) {
                    return Some(value.to_lowercase());
                }
            }
        }
    }

    // Legacy style: path extension, possibly followed by a `:size` suffix
    // (`abc.jpg:orig`).
    let path = url.split(['?', '#']).next()?;
    let filename = path.rsplit('/').next()?;
    let filename = filename.split(':').next()?;
    let ext = filename.rsplit('.').next()?;

    if ext != filename && is_valid_extension(ext) {
        Some(ext.to_lowercase())
    } else {
        None
    }
}

fn is_valid_extension(ext: &str) -> bool {
    !ext.is_empty() && ext.len() <= 10 && ext.chars().all(|c| c.is_ascii_alphanumeric())
}
