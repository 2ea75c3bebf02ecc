//! Streaming download of a single media entry.

use std::path::{Path, PathBuf};

use chrono::Utc;
use futures::StreamExt;
use reqwest::header;
use tokio::fs::File;
use tokio::io::AsyncWriteExt;

use crate::api::TwitterClient;
use crate::config::Config;
use crate::error::{Error, Result};
use crate::fs::naming::FilenameAllocator;
use crate::media::MediaEntry;
use crate::output::progress::create_download_bar;

/// Minimum expected size to show a progress bar (5 MB).
const PROGRESS_THRESHOLD: u64 = 5 * 1024 * 1024;

/// Download one entry's selected variant into `output_dir`.
///
/// The body is streamed into a `.part` file and renamed into place once
/// complete, so a failed transfer never leaves a truncated file behind.
/// Returns the final path and the byte count.
pub async fn download_entry(
    client: &TwitterClient,
    config: &Config,
    entry: &MediaEntry,
    allocator: &mut FilenameAllocator,
    output_dir: &Path,
) -> Result<(PathBuf, u64)> {
    let variant = entry
        .select_variant()
        .ok_or_else(|| Error::Transfer("entry has no downloadable variant".to_string()))?;

    let response = client.download_file(&variant.url).await?;

    // The extension is fixed for video-like entries; photos read it from
    // the URL, falling back to the response content type.
    let extension = entry
        .file_extension()
        .or_else(|| extension_from_content_type(response.headers()))
        .unwrap_or_else(|| "jpg".to_string());

    let timestamp = Utc::now().timestamp();
    let dest = allocator.allocate(output_dir, entry.kind, timestamp, &extension);
    let part = partial_path(&dest);

    let content_length = response.content_length();
    let progress = if config.options.show_downloads
        && content_length.map(|l| l > PROGRESS_THRESHOLD).unwrap_or(false)
    {
        Some(create_download_bar(content_length.unwrap_or(0)))
    } else {
        None
    };

    let mut file = File::create(&part)
        .await
        .map_err(|e| Error::Write(format!("{}: {}", part.display(), e)))?;

    let mut stream = response.bytes_stream();
    let mut downloaded: u64 = 0;

    while let Some(chunk) = stream.next().await {
        let chunk = match chunk {
            Ok(chunk) => chunk,
            Err(e) => {
                drop(file);
                discard_partial(&part).await;
                return Err(Error::Transfer(format!("{}: {}", variant.url, e)));
            }
        };

        if let Err(e) = file.write_all(&chunk).await {
            drop(file);
            discard_partial(&part).await;
            return Err(Error::Write(format!("{}: {}", part.display(), e)));
        }

        downloaded += chunk.len() as u64;
        if let Some(ref bar) = progress {
            bar.set_position(downloaded);
        }
    }

    if let Err(e) = file.flush().await {
        drop(file);
        discard_partial(&part).await;
        return Err(Error::Write(format!("{}: {}", part.display(), e)));
    }
    drop(file);

    if let Some(bar) = progress {
        bar.finish_and_clear();
    }

    if let Err(e) = tokio::fs::rename(&part, &dest).await {
        discard_partial(&part).await;
        return Err(Error::Write(format!("{}: {}", dest.display(), e)));
    }

    Ok((dest, downloaded))
}

/// The in-flight path for a destination: `<name>.<ext>.part`.
fn partial_path(dest: &Path) -> PathBuf {
    let mut name = dest.as_os_str().to_owned();
    name.push(".part");
    PathBuf::from(name)
}

/// Remove a partial file, keeping the original error as the one reported.
async fn discard_partial(part: &Path) {
    if let Err(e) = tokio::fs::remove_file(part).await {
        tracing::warn!("Could not remove partial file {}: {}", part.display(), e);
    }
}

/// Derive a file extension from the response `Content-Type` header.
fn extension_from_content_type(headers: &header::HeaderMap) -> Option<String> {
    let content_type = headers.get(header::CONTENT_TYPE)?.to_str().ok()?;
    let mime = content_type.split(';').next()?.trim();

    // mime_guess lists "jpe" among jpeg extensions; prefer the common one.
    if mime == "image/jpeg" {
        return Some("jpg".to_string());
    }

    mime_guess::get_mime_extensions_str(mime)?
        .first()
        .map(|ext| ext.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::NetworkConfig;
    use crate::download::testutil::serve;
    use crate::media::{MediaKind, MediaVariant};

    fn test_client() -> TwitterClient {
        TwitterClient::new(&NetworkConfig::default()).unwrap()
    }

    fn video_entry(url: String) -> MediaEntry {
        MediaEntry {
            kind: MediaKind::Video,
            index: 0,
            variants: vec![MediaVariant {
                url,
                content_type: Some("video/mp4".to_string()),
                bitrate: Some(832_000),
                width: Some(640),
                height: Some(360),
            }],
        }
    }

    #[tokio::test]
    async fn test_download_entry_streams_to_file() {
        let body = vec![0xABu8; 64 * 1024];
        let url = serve(body.clone(), None, "video/mp4").await;
        let dir = tempfile::tempdir().unwrap();

        let client = test_client();
        let config = Config::default();
        let mut allocator = FilenameAllocator::new();
        let entry = video_entry(url);

        let (path, bytes) = download_entry(&client, &config, &entry, &mut allocator, dir.path())
            .await
            .unwrap();

        assert_eq!(bytes, body.len() as u64);
        assert_eq!(std::fs::read(&path).unwrap(), body);

        let name = path.file_name().unwrap().to_str().unwrap();
        assert!(name.starts_with("twitter_video_"));
        assert!(name.ends_with(".mp4"));
        assert!(no_partials(dir.path()));
    }

    #[tokio::test]
    async fn test_failed_transfer_discards_partial() {
        let body = vec![0x42u8; 1024];
        // Declare twice the bytes actually sent, then close the connection.
        let url = serve(body.clone(), Some(body.len() * 2), "video/mp4").await;
        let dir = tempfile::tempdir().unwrap();

        let client = test_client();
        let config = Config::default();
        let mut allocator = FilenameAllocator::new();
        let entry = video_entry(url);

        let result = download_entry(&client, &config, &entry, &mut allocator, dir.path()).await;

        assert!(matches!(result, Err(Error::Transfer(_))));
        assert!(no_partials(dir.path()));
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[tokio::test]
    async fn test_unreachable_host_is_transfer_failure() {
        let client = test_client();
        let config = Config::default();
        let mut allocator = FilenameAllocator::new();
        let dir = tempfile::tempdir().unwrap();
        // Port 1 is never listening; the connection is refused immediately.
        let entry = video_entry("http://127.0.0.1:1/unreachable.mp4".to_string());

        let result = download_entry(&client, &config, &entry, &mut allocator, dir.path()).await;
        assert!(matches!(result, Err(Error::Transfer(_))));
    }

    #[tokio::test]
    async fn test_photo_extension_falls_back_to_content_type() {
        let body = vec![0x89u8; 256];
        let url = serve(body, None, "image/png").await;
        let dir = tempfile::tempdir().unwrap();

        let client = test_client();
        let config = Config::default();
        let mut allocator = FilenameAllocator::new();
        // Photo URL with no recognizable extension.
        let entry = MediaEntry::photo(0, url);

        let (path, _) = download_entry(&client, &config, &entry, &mut allocator, dir.path())
            .await
            .unwrap();

        assert!(path.to_str().unwrap().ends_with(".png"));
    }

    #[test]
    fn test_partial_path() {
        assert_eq!(
            partial_path(Path::new("/tmp/twitter_video_1.mp4")),
            PathBuf::from("/tmp/twitter_video_1.mp4.part")
        );
    }

    #[test]
    fn test_extension_from_content_type() {
        let mut headers = header::HeaderMap::new();
        headers.insert(header::CONTENT_TYPE, "image/jpeg".parse().unwrap());
        assert_eq!(extension_from_content_type(&headers), Some("jpg".to_string()));

        headers.insert(
            header::CONTENT_TYPE,
            "image/png; charset=binary".parse().unwrap(),
        );
        assert_eq!(extension_from_content_type(&headers), Some("png".to_string()));

        headers.remove(header::CONTENT_TYPE);
        assert_eq!(extension_from_content_type(&headers), None);
    }

    fn no_partials(dir: &Path) -> bool {
        std::fs::read_dir(dir)
            .unwrap()
            .filter_map(|e| e.ok())
            .all(|e| !e.file_name().to_string_lossy().ends_with(".part"))
    }
}
