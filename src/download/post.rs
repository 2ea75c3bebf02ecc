//! Whole-post download orchestration.

use std::path::Path;
use std::time::Duration;

use rand::Rng;
use tokio::time::sleep;

use crate::api::{PostReference, TwitterClient};
use crate::config::Config;
use crate::download::media::download_entry;
use crate::download::state::DownloadResult;
use crate::error::Result;
use crate::fs::naming::FilenameAllocator;
use crate::fs::paths::ensure_dir;
use crate::media::{MediaEntry, MediaExtractor};

/// Download all media from a post URL into `output_dir`.
///
/// Fetch and extraction failures abort the run; download failures are
/// recorded per entry. A post without media yields an empty result list.
pub async fn download_from_url(
    client: &TwitterClient,
    config: &Config,
    post_url: &str,
    output_dir: &Path,
) -> Result<Vec<DownloadResult>> {
    let post = PostReference::parse(post_url)?;
    tracing::info!("Resolved post {}", post);

    let content = client.fetch_post_page(&post).await?;

    let extractor = MediaExtractor::new();
    let entries = extractor.extract(&content)?;

    if entries.is_empty() {
        tracing::info!("No media found in post {}", post.id());
        return Ok(Vec::new());
    }

    tracing::info!("Found {} media entries", entries.len());
    download_entries(client, config, &entries, output_dir).await
}

/// Download a list of already-extracted entries.
///
/// Results come back in input order, one per entry. Per-entry failures are
/// recorded and the batch continues.
pub async fn download_entries(
    client: &TwitterClient,
    config: &Config,
    entries: &[MediaEntry],
    output_dir: &Path,
) -> Result<Vec<DownloadResult>> {
    ensure_dir(output_dir)?;

    let mut allocator = FilenameAllocator::new();
    let mut results = Vec::with_capacity(entries.len());

    for (i, entry) in entries.iter().enumerate() {
        if i > 0 {
            politeness_delay(config).await;
        }

        tracing::info!("Downloading {} entry {}", entry.kind, entry.index);

        match download_entry(client, config, entry, &mut allocator, output_dir).await {
            Ok((path, bytes)) => {
                tracing::info!("Saved {} ({} bytes)", path.display(), bytes);
                results.push(DownloadResult::saved(entry.index, entry.kind, path, bytes));
            }
            Err(e) if e.is_entry_scoped() => {
                tracing::warn!("Failed to download entry {}: {}", entry.index, e);
                results.push(DownloadResult::failed(entry.index, entry.kind, e.to_string()));
            }
            Err(e) => return Err(e),
        }
    }

    Ok(results)
}

/// Short randomized pause between consecutive downloads.
async fn politeness_delay(config: &Config) {
    let min = config.options.download_delay_min_ms;
    let max = config.options.download_delay_max_ms;
    if max == 0 {
        return;
    }

    let delay_ms = if min >= max {
        min
    } else {
        rand::thread_rng().gen_range(min..=max)
    };
    sleep(Duration::from_millis(delay_ms)).await;
}
