//! Strategy driver for media extraction.

use crate::error::{Error, Result};
use crate::media::item::MediaEntry;
use crate::media::strategies::{EmbeddedJsonStrategy, ExtractStrategy, HtmlScanStrategy};

/// Runs extraction strategies in priority order over fetched page content.
pub struct MediaExtractor {
    strategies: Vec<Box<dyn ExtractStrategy>>,
}

impl MediaExtractor {
    /// Extractor with the default strategy order: embedded JSON first,
    /// raw markup scan as the fallback.
    pub fn new() -> Self {
        Self {
            strategies: vec![
                Box::new(EmbeddedJsonStrategy::new()),
                Box::new(HtmlScanStrategy::new()),
            ],
        }
    }

    /// Extractor with a caller-supplied strategy list.
    pub fn with_strategies(strategies: Vec<Box<dyn ExtractStrategy>>) -> Self {
        Self { strategies }
    }

    /// Extract the post's media entries from page content.
    ///
    /// The first strategy yielding at least one entry wins. An empty result
    /// is a valid outcome for a post without media; `Parse` is returned only
    /// when the content cannot be interpreted as markup or structured text
    /// at all.
    pub fn extract(&self, content: &str) -> Result<Vec<MediaEntry>> {
        if !looks_like_structured_text(content) {
            return Err(Error::Parse(
                "content is neither markup nor structured data".to_string(),
            ));
        }

        for strategy in &self.strategies {
            match strategy.try_extract(content)? {
                Some(mut entries) if !entries.is_empty() => {
                    for (i, entry) in entries.iter_mut().enumerate() {
                        entry.index = i;
                    }
                    tracing::debug!(
                        "Strategy '{}' extracted {} media entries",
                        strategy.name(),
                        entries.len()
                    );
                    return Ok(entries);
                }
                _ => {
                    tracing::debug!("Strategy '{}' found no media", strategy.name());
                }
            }
        }

        Ok(Vec::new())
    }
}

impl Default for MediaExtractor {
    fn default() -> Self {
        Self::new()
    }
}

/// Whether content is worth handing to the strategies at all.
///
/// Markup qualifies by the presence of angle-bracket tags; anything else
/// must parse as JSON.
fn looks_like_structured_text(content: &str) -> bool {
    if content.contains('<') && content.contains('>') {
        return true;
    }
    serde_json::from_str::<serde::de::IgnoredAny>(content).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::media::item::MediaKind;

    struct FixedStrategy {
        name: &'static str,
        urls: Vec<&'static str>,
    }

    impl ExtractStrategy for FixedStrategy {
        fn name(&self) -> &'static str {
            self.name
        }

        fn try_extract(&self, _content: &str) -> Result<Option<Vec<MediaEntry>>> {
            if self.urls.is_empty() {
                Ok(None)
            } else {
                Ok(Some(
                    self.urls
                        .iter()
                        .enumerate()
                        .map(|(i, url)| MediaEntry::photo(i, *url))
                        .collect(),
                ))
            }
        }
    }

    #[test]
    fn test_first_yielding_strategy_wins() {
        let extractor = MediaExtractor::with_strategies(vec![
            Box::new(FixedStrategy {
                name: "empty",
                urls: vec![],
            }),
            Box::new(FixedStrategy {
                name: "second",
                urls: vec!["https://pbs.twimg.com/media/a.jpg"],
            }),
            Box::new(FixedStrategy {
                name: "third",
                urls: vec!["https://pbs.twimg.com/media/b.jpg"],
            }),
        ]);

        let entries = extractor.extract("<html></html>").unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].variants[0].url, "https://pbs.twimg.com/media/a.jpg");
    }

    #[test]
    fn test_no_media_is_not_an_error() {
        let extractor = MediaExtractor::new();
        let entries = extractor
            .extract("<html><body>just text, no media</body></html>")
            .unwrap();
        assert!(entries.is_empty());
    }

    #[test]
    fn test_unparseable_content_is_parse_error() {
        let extractor = MediaExtractor::new();
        let result = extractor.extract("\u{0}\u{1}garbage bytes, no markup");
        assert!(matches!(result, Err(Error::Parse(_))));
    }

    #[test]
    fn test_json_only_content_is_accepted() {
        let extractor = MediaExtractor::new();
        // Syndication-style payload: pure JSON, no markup.
        let entries = extractor.extract(r#"{"id_str":"42","text":"hello"}"#).unwrap();
        assert!(entries.is_empty());
    }

    #[test]
    fn test_extraction_is_idempotent() {
        let page = concat!(
            r#"<script>{"extended_entities":{"media":["#,
            r#"{"type":"photo","media_url_https":"https:\/\/pbs.twimg.com\/media\/F1.jpg"},"#,
            r#"{"type":"video","video_info":{"variants":["#,
            r#"{"bitrate":832000,"content_type":"video\/mp4","url":"https:\/\/video.twimg.com\/vid\/640x360\/v.mp4"}]}}"#,
            r#"]}}</script>"#,
        );
        let extractor = MediaExtractor::new();
        let first = extractor.extract(page).unwrap();
        let second = extractor.extract(page).unwrap();

        assert_eq!(first, second);
        assert_eq!(first.len(), 2);
        assert_eq!(first[0].kind, MediaKind::Photo);
        assert_eq!(first[1].kind, MediaKind::Video);
        assert_eq!(first[0].index, 0);
        assert_eq!(first[1].index, 1);
    }
}
